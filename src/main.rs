//! ScriptPlot - interactive line charts from small data scripts

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use scriptplot::app::ScriptPlotApp;
use scriptplot::state::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Set the macOS application name for the dock
#[cfg(target_os = "macos")]
fn set_macos_app_name() {
    use objc2::{class, msg_send};
    use objc2_foundation::NSString;

    unsafe {
        let app_name = NSString::from_str("ScriptPlot");
        let process_info_class = class!(NSProcessInfo);
        let process_info: *mut objc2::runtime::AnyObject =
            msg_send![process_info_class, processInfo];
        let _: () = msg_send![process_info, setProcessName: &*app_name];
    }
}

#[cfg(not(target_os = "macos"))]
fn set_macos_app_name() {}

fn main() -> eframe::Result<()> {
    set_macos_app_name();

    // Initialize logging
    tracing_subscriber::fmt::init();

    // Room for the editor panel next to the chart
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([CANVAS_WIDTH + 560.0, CANVAS_HEIGHT + 420.0])
            .with_min_inner_size([CANVAS_WIDTH + 320.0, CANVAS_HEIGHT + 200.0])
            .with_title("ScriptPlot")
            .with_app_id("ScriptPlot"),
        ..Default::default()
    };

    eframe::run_native(
        "ScriptPlot",
        native_options,
        Box::new(|cc| Ok(Box::new(ScriptPlotApp::new(cc)))),
    )
}
