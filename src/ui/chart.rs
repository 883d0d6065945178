//! Chart surface: replays the render layers onto egui_plot and feeds pointer
//! input back into the chart state.

use eframe::egui;
use egui_plot::{Line, Plot, PlotBounds, PlotPoints, PlotResponse, PlotUi, Points, Polygon, VLine};
use std::time::Instant;

use crate::app::ScriptPlotApp;
use crate::interaction::PointerSample;
use crate::render::{DrawCommand, Layer};

impl ScriptPlotApp {
    /// Render the title row, the chart surface and handle pointer input
    pub fn render_chart(&mut self, ui: &mut egui::Ui) {
        let mut zoom_out = false;
        ui.horizontal(|ui| {
            if let Some(title) = &self.title {
                ui.heading(title);
            }
            // Only offered while zoomed in
            if self.chart.can_zoom_out() && ui.button("Zoom out").clicked() {
                zoom_out = true;
            }
        });
        if zoom_out {
            self.zoom_out();
        }

        self.refresh_layers();

        let width = self.canvas.width;
        let height = self.canvas.height;
        let data_layer = &self.data_layer;
        let overlay_layer = &self.overlay_layer;

        // Fixed-size surface; all navigation goes through ChartState
        let plot = Plot::new("script_chart")
            .width(width as f32)
            .height(height as f32)
            .show_axes(false)
            .show_grid(false)
            .show_x(false)
            .show_y(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false);

        let response = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([0.0, 0.0], [width, height]));
            replay_layer(plot_ui, data_layer, height);
            replay_layer(plot_ui, overlay_layer, height);
        });

        self.handle_chart_input(ui, &response);
    }

    /// Translate this frame's pointer activity into chart state transitions
    fn handle_chart_input(&mut self, ui: &egui::Ui, response: &PlotResponse<()>) {
        let width = self.canvas.width;
        let to_fraction = |pos: egui::Pos2| response.transform.value_from_position(pos).x / width;
        let plot_response = &response.response;
        let now = Instant::now();

        let before = (
            self.chart.hover(),
            self.chart.preview(),
            self.chart.active_window(),
            self.chart.drag(),
        );

        // Only the primary button selects; other buttons never start a drag
        let (press_origin, latest_pos, primary_down) = ui.input(|i| {
            (
                i.pointer.press_origin(),
                i.pointer.latest_pos(),
                i.pointer.primary_down(),
            )
        });
        let sample = PointerSample {
            clicked_at: plot_response
                .clicked()
                .then(|| plot_response.interact_pointer_pos())
                .flatten()
                .map(to_fraction),
            drag_started_at: press_origin
                .filter(|_| plot_response.drag_started_by(egui::PointerButton::Primary))
                .map(to_fraction),
            pointer_at: latest_pos.map(to_fraction),
            released: plot_response.drag_stopped_by(egui::PointerButton::Primary)
                || !primary_down,
            hover_at: plot_response.hover_pos().map(to_fraction),
        };
        self.chart.apply_pointer(&sample, now);

        let after = (
            self.chart.hover(),
            self.chart.preview(),
            self.chart.active_window(),
            self.chart.drag(),
        );
        if before != after {
            ui.ctx().request_repaint();
        }
    }
}

/// Draw every command of a layer into the plot
fn replay_layer(plot_ui: &mut PlotUi, layer: &Layer, height: f64) {
    for command in layer.commands() {
        match command {
            DrawCommand::Polyline {
                label,
                points,
                color,
                width,
            } => {
                let plot_points: PlotPoints = points.iter().copied().collect();
                if points.len() == 1 {
                    plot_ui.points(
                        Points::new(label.clone(), plot_points)
                            .color(*color)
                            .radius(*width * 2.0),
                    );
                } else {
                    plot_ui.line(
                        Line::new(label.clone(), plot_points)
                            .color(*color)
                            .width(*width),
                    );
                }
            }
            DrawCommand::VerticalLine { x, color } => {
                plot_ui.vline(VLine::new("Hover", *x).color(*color).width(1.0));
            }
            DrawCommand::FillSpan {
                x_start,
                x_end,
                color,
            } => {
                let corners = vec![
                    [*x_start, 0.0],
                    [*x_end, 0.0],
                    [*x_end, height],
                    [*x_start, height],
                ];
                plot_ui.polygon(
                    Polygon::new("Selection", PlotPoints::from(corners))
                        .fill_color(*color)
                        .stroke(egui::Stroke::NONE),
                );
            }
        }
    }
}
