//! Header bar (Examples and View menus).

use eframe::egui;
use strum::IntoEnumIterator;

use crate::app::{apply_theme, ScriptPlotApp};
use crate::state::{EditorTheme, ExampleScript};

impl ScriptPlotApp {
    /// Render the header menu bar
    pub fn render_header(&mut self, ui: &mut egui::Ui) {
        let mut example: Option<ExampleScript> = None;
        let mut theme_changed: Option<EditorTheme> = None;

        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("Examples", |ui| {
                ui.set_min_width(180.0);
                for preset in ExampleScript::iter() {
                    if ui.button(preset.as_ref()).clicked() {
                        example = Some(preset);
                        ui.close();
                    }
                }
            });

            ui.menu_button("View", |ui| {
                let options = self.editor.options_mut();
                ui.checkbox(&mut options.line_numbers, "Line numbers");
                ui.separator();
                for theme in EditorTheme::iter() {
                    if ui
                        .selectable_label(options.theme == theme, theme.as_ref())
                        .clicked()
                    {
                        options.theme = theme;
                        theme_changed = Some(theme);
                        ui.close();
                    }
                }
            });

            let depth = self.chart.windows().depth();
            if depth > 0 {
                ui.separator();
                ui.label(egui::RichText::new(format!("Zoom level {}", depth)).weak());
            }
        });

        if let Some(theme) = theme_changed {
            apply_theme(ui.ctx(), theme);
        }
        if let Some(preset) = example {
            self.load_example(preset);
        }
    }
}
