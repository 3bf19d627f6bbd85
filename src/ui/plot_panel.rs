use egui_plot::{GridMark, Line, Plot, PlotBounds, PlotPoints};

use crate::controller::Banner;
use crate::error::FETCH_HINT;
use crate::state::chart_state::ChartState;
use crate::ui::legend::{show_legend, Legend, LegendAction};

pub const LOADING_TEXT: &str = "Calculating charge breeding evolution...";

/// Actions that the plot panel can request from the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotAction {
    None,
    Legend(LegendAction),
    DismissBanner,
}

/// Tick label for a log10 axis position.
pub fn format_log_tick(log_value: f64) -> String {
    if (log_value - log_value.round()).abs() < 1e-9 {
        format!("1e{}", log_value.round() as i64)
    } else {
        format!("{:.3e}", 10f64.powf(log_value))
    }
}

/// Zoom factor for one frame of mouse-wheel movement. Scrolling up zooms in.
pub fn wheel_zoom_factor(scroll_delta: f32) -> f32 {
    (scroll_delta / 200.0).exp()
}

/// Render the chart, its legend and any status banner.
pub fn show_plot_panel(
    ui: &mut egui::Ui,
    chart: &mut ChartState,
    legend: &Legend,
    banner: &Banner,
) -> PlotAction {
    let mut action = PlotAction::None;

    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new(&chart.title).strong().size(16.0));
    });
    ui.add_space(4.0);

    let reset_bounds = chart.take_bounds_reset();
    let (x_min, x_max) = chart.x_bounds;
    let (y_min, y_max) = chart.y_bounds;
    let series = &chart.series;

    // Drag pans, right-drag box-zooms, the wheel zooms and a double-click
    // returns to the configured ranges rather than fitting the data.
    let plot = Plot::new("charge_state_plot")
        .x_axis_label(chart.x_axis_label.clone())
        .y_axis_label(chart.y_axis_label.clone())
        .x_axis_formatter(|mark: GridMark, _range| format_log_tick(mark.value))
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("t = {}", format_log_tick(value.x))
            } else {
                format!("{name}\nt = {:.3e} s\nabundance = {:.4}", 10f64.powf(value.x), value.y)
            }
        })
        .allow_drag(true)
        .allow_boxed_zoom(true)
        .allow_scroll(false)
        .allow_double_click_reset(false)
        .height(ui.available_height());

    let response = plot.show(ui, |plot_ui| {
        if reset_bounds {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));
        } else if plot_ui.response().hovered() {
            let scroll = plot_ui.ctx().input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                let factor = wheel_zoom_factor(scroll);
                plot_ui.zoom_bounds_around_hovered(egui::vec2(factor, factor));
            }
        }
        for s in series.iter().filter(|s| s.visible) {
            plot_ui.line(
                Line::new(s.label.clone(), PlotPoints::from(s.points()))
                    .color(s.color32())
                    .width(s.line_width),
            );
        }
    });
    if response.response.double_clicked() {
        chart.request_bounds_reset();
    }
    let plot_rect = response.response.rect;
    chart.last_frame_rect = Some(plot_rect);

    match show_legend(ui, legend, plot_rect) {
        LegendAction::None => {}
        other => action = PlotAction::Legend(other),
    }

    if show_banner(ui, banner, plot_rect) {
        action = PlotAction::DismissBanner;
    }

    action
}

/// Overlay the loading/error banner in the middle of the plot. Returns `true`
/// when the user dismissed an error.
fn show_banner(ui: &mut egui::Ui, banner: &Banner, plot_rect: egui::Rect) -> bool {
    let error_color = egui::Color32::from_rgb(255, 80, 80);
    let mut dismissed = false;

    let (headline, hint) = match banner {
        Banner::None => return false,
        Banner::Loading => {
            egui::Area::new(egui::Id::new("plot_banner"))
                .fixed_pos(plot_rect.center())
                .pivot(egui::Align2::CENTER_CENTER)
                .order(egui::Order::Foreground)
                .show(ui.ctx(), |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(LOADING_TEXT);
                        });
                    });
                });
            return false;
        }
        Banner::FetchFailed(err) => (err.banner(), Some(FETCH_HINT)),
        Banner::RenderFailed(err) => (err.banner(), None),
    };

    egui::Area::new(egui::Id::new("plot_banner"))
        .fixed_pos(plot_rect.center())
        .pivot(egui::Align2::CENTER_CENTER)
        .order(egui::Order::Foreground)
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style())
                .inner_margin(egui::Margin::same(14))
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new("⚠").size(24.0).color(error_color));
                        ui.label(egui::RichText::new(headline).strong().color(error_color));
                        if let Some(hint) = hint {
                            ui.label(egui::RichText::new(hint).weak());
                        }
                        ui.add_space(4.0);
                        if ui.small_button("dismiss").clicked() {
                            dismissed = true;
                        }
                    });
                });
        });

    dismissed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_log_tick() {
        assert_eq!(format_log_tick(-6.0), "1e-6");
        assert_eq!(format_log_tick(0.0), "1e0");
        assert_eq!(format_log_tick(2.0), "1e2");
        assert_eq!(format_log_tick(-0.5), "3.162e-1");
    }

    #[test]
    fn test_wheel_zoom_direction() {
        assert_eq!(wheel_zoom_factor(0.0), 1.0);
        assert!(wheel_zoom_factor(50.0) > 1.0);
        assert!(wheel_zoom_factor(-50.0) < 1.0);
        assert!((wheel_zoom_factor(80.0) * wheel_zoom_factor(-80.0) - 1.0).abs() < 1e-6);
    }
}
