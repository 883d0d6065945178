//! Script editor panel.

use eframe::egui;

use crate::app::ScriptPlotApp;
use crate::state::EditorOptions;

/// Source text plus the cosmetic options it is shown with
#[derive(Clone, Debug)]
pub struct ScriptEditor {
    text: String,
    options: EditorOptions,
}

impl ScriptEditor {
    pub fn new(text: impl Into<String>, options: EditorOptions) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text without reporting it as an edit
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Label shown above the text
    pub fn mode(&self) -> &str {
        &self.options.mode
    }

    pub fn options_mut(&mut self) -> &mut EditorOptions {
        &mut self.options
    }

    /// Draw the editor; returns the new text when the user changed it
    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<String> {
        ui.label(egui::RichText::new(self.mode()).small().weak());
        ui.add_space(4.0);

        let mut changed = false;
        egui::ScrollArea::vertical()
            .id_salt("script_editor_scroll")
            .show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    if self.options.line_numbers {
                        let line_count = self.text.lines().count().max(1)
                            + usize::from(self.text.ends_with('\n'));
                        let numbers = (1..=line_count)
                            .map(|n| n.to_string())
                            .collect::<Vec<_>>()
                            .join("\n");
                        ui.label(egui::RichText::new(numbers).monospace().weak());
                    }

                    let response = ui.add(
                        egui::TextEdit::multiline(&mut self.text)
                            .code_editor()
                            .desired_width(ui.available_width())
                            .desired_rows(24),
                    );
                    changed = response.changed();
                });
            });

        changed.then(|| self.text.clone())
    }
}

impl ScriptPlotApp {
    /// Render the editor panel and evaluate user edits
    pub fn render_editor(&mut self, ui: &mut egui::Ui) {
        ui.heading("Script");
        ui.add_space(4.0);

        if let Some(text) = self.editor.show(ui) {
            self.handle_source_change(&text);
        }
    }
}
