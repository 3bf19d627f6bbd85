use eframe::egui;

use crate::controller::PlotController;
use crate::data::{export, snapshot};
use crate::ui::form_panel::{self, FormAction};
use crate::ui::legend::LegendAction;
use crate::ui::plot_panel::{self, PlotAction};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The main charge-breeding plotter window.
pub struct ChargeBreedApp {
    pub controller: PlotController,
    /// An error message to display in the footer (export failures).
    pub error_message: Option<String>,
    /// A screenshot was requested and its event has not arrived yet.
    pub pending_screenshot: bool,
}

impl ChargeBreedApp {
    pub fn new(cc: &eframe::CreationContext<'_>, mut controller: PlotController) -> Self {
        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();

        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::proportional(14.5),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            egui::FontId::proportional(14.0),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::proportional(20.0),
        );

        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.visuals.window_corner_radius = egui::CornerRadius::same(8);
        style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
        style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
        style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(6);
        ctx.set_style(style);

        // First calculation with the configured defaults.
        controller.calculate();

        Self {
            controller,
            error_message: None,
            pending_screenshot: false,
        }
    }

    fn export_csv(&mut self) {
        let Some(dataset) = self.controller.dataset.as_ref() else {
            return;
        };
        let filename = format!(
            "charge_states_{}_{}eV.csv",
            self.controller.params.element.replace(' ', "_"),
            self.controller.params.energy
        );
        if let Err(e) = export::export_with_dialog(dataset, &filename) {
            tracing::error!("{e}");
            self.error_message = Some(e);
        }
    }

    /// Crop a finished window screenshot to the plot and save it as PNG.
    fn save_screenshot(&mut self, ctx: &egui::Context, image: &egui::ColorImage) {
        let (rgba, width, height) =
            snapshot::crop_rgba(image, self.controller.chart.last_frame_rect, ctx.pixels_per_point());
        let filename = format!(
            "charge_states_{}_{}eV.png",
            self.controller.params.element.replace(' ', "_"),
            self.controller.params.energy
        );
        if let Err(e) = snapshot::save_png_with_dialog(rgba, width, height, &filename) {
            tracing::error!("{e}");
            self.error_message = Some(e);
        }
    }

    fn handle_plot_action(&mut self, action: PlotAction) {
        match action {
            PlotAction::None => {}
            PlotAction::Legend(LegendAction::Toggle(index)) => self.controller.toggle_one(index),
            PlotAction::Legend(LegendAction::ShowAll) => self.controller.show_all(),
            PlotAction::Legend(LegendAction::None) => {}
            PlotAction::DismissBanner => self.controller.dismiss_banner(),
        }
    }
}

impl eframe::App for ChargeBreedApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ------------------------------------------------------------------
        // 1. Apply finished requests
        // ------------------------------------------------------------------
        self.controller.poll();

        // Screenshot requested on the previous frame
        if self.pending_screenshot {
            let screenshot = ctx.input(|i| {
                i.raw.events.iter().find_map(|event| match event {
                    egui::Event::Screenshot { image, .. } => Some(image.clone()),
                    _ => None,
                })
            });
            if let Some(image) = screenshot {
                self.pending_screenshot = false;
                self.save_screenshot(ctx, &image);
            }
        }

        // --- Header panel ---
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 8)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Charge Breeding Simulator");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.small(format!("v{VERSION}"));
                    });
                });
            });

        // --- Footer panel ---
        egui::TopBottomPanel::bottom("footer")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 6)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let shown = self.controller.chart.series.iter().filter(|s| s.visible).count();
                    let total = self.controller.chart.renderer_count();
                    ui.label(egui::RichText::new(format!("{shown}/{total} charge states shown")).weak());

                    if let Some(msg) = &self.error_message {
                        ui.separator();
                        ui.colored_label(egui::Color32::from_rgb(255, 80, 80), msg);
                        if ui.small_button("dismiss").clicked() {
                            self.error_message = None;
                        }
                    }
                });
            });

        // --- Form panel ---
        let mut form_action = FormAction::None;
        egui::SidePanel::left("form")
            .resizable(false)
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(12)))
            .show(ctx, |ui| {
                let can_export = self.controller.dataset.is_some();
                let can_save_image = self.controller.chart.renderer_count() > 0;
                form_action = form_panel::show_form_panel(
                    ui,
                    &mut self.controller.params,
                    can_export,
                    can_save_image,
                );
            });

        match form_action {
            FormAction::None => {}
            FormAction::Calculate => {
                self.controller.calculate();
            }
            FormAction::ExportCsv => self.export_csv(),
            FormAction::SavePng => {
                self.pending_screenshot = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            }
        }

        // --- Central panel with the plot ---
        let mut plot_action = PlotAction::None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let controller = &mut self.controller;
            plot_action = plot_panel::show_plot_panel(
                ui,
                &mut controller.chart,
                &controller.legend,
                &controller.banner,
            );
        });
        self.handle_plot_action(plot_action);

        // Keep polling while a worker thread is running.
        if self.controller.is_loading() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}
