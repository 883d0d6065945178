//! Legend table with per-series visibility toggles and value readouts.

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::app::ScriptPlotApp;
use crate::render::legend_readout;

/// Row contents computed before the table borrows the UI
struct LegendRow {
    label: String,
    color: egui::Color32,
    hidden: bool,
    readout: String,
}

impl ScriptPlotApp {
    /// Render the legend below the chart; clicking a label toggles its series
    pub fn render_legend(&mut self, ui: &mut egui::Ui) {
        if self.series.is_empty() {
            ui.label(egui::RichText::new("No series to display").weak());
            return;
        }

        let window = self.chart.active_window();
        let hover = self.chart.hover();
        let rows: Vec<LegendRow> = self
            .series
            .iter()
            .enumerate()
            .map(|(i, series)| LegendRow {
                label: series.label.clone(),
                color: series.color(),
                hidden: self.chart.hidden().is_hidden(i),
                readout: legend_readout(series, window, hover),
            })
            .collect();

        let mut toggled: Option<usize> = None;

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(120.0))
            .column(Column::remainder())
            .body(|mut body| {
                for (i, row) in rows.iter().enumerate() {
                    body.row(20.0, |mut table_row| {
                        table_row.col(|ui| {
                            let color = if row.hidden {
                                row.color.gamma_multiply(0.5)
                            } else {
                                row.color
                            };
                            let mut text = egui::RichText::new(&row.label).color(color).strong();
                            if row.hidden {
                                text = text.strikethrough();
                            }
                            if ui
                                .add(egui::Label::new(text).sense(egui::Sense::click()))
                                .on_hover_text("Click to show or hide")
                                .clicked()
                            {
                                toggled = Some(i);
                            }
                        });
                        table_row.col(|ui| {
                            ui.monospace(&row.readout);
                        });
                    });
                }
            });

        if let Some(index) = toggled {
            let hidden = self.toggle_series(index);
            tracing::debug!("Series {} hidden: {}", index, hidden);
        }
    }
}
