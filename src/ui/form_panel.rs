use crate::data::request::{QueryParams, INJECTION_MODES};

/// Actions that the form panel can request from the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Calculate,
    ExportCsv,
    SavePng,
}

fn text_row(ui: &mut egui::Ui, label: &str, hint: &str, value: &mut String) {
    ui.label(label);
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(140.0),
    );
    ui.end_row();
}

/// Render the calculation form. Values are edited in place and never checked
/// here; the API decides what it accepts.
pub fn show_form_panel(
    ui: &mut egui::Ui,
    params: &mut QueryParams,
    can_export: bool,
    can_save_image: bool,
) -> FormAction {
    let mut action = FormAction::None;

    ui.label(egui::RichText::new("Beam & Trap").strong().size(15.0));
    ui.add_space(4.0);

    egui::Grid::new("calc_form")
        .num_columns(2)
        .spacing(egui::vec2(8.0, 6.0))
        .show(ui, |ui| {
            text_row(ui, "Element", "e.g. Ar", &mut params.element);
            text_row(ui, "Electron energy [eV]", "5000", &mut params.energy);
            text_row(ui, "Current density [A/cm²]", "500", &mut params.density);
            text_row(ui, "Min log10(time)", "-6", &mut params.min_log_time);
            text_row(ui, "Max log10(time)", "-1", &mut params.max_log_time);
            text_row(ui, "Rest gas pressure [mbar]", "1e-10", &mut params.rest_gas_pressure);
            text_row(ui, "Rest gas IP [eV]", "15", &mut params.rest_gas_ip);

            ui.label("Injection");
            egui::ComboBox::from_id_salt("injection_mode")
                .selected_text(params.injection.as_str())
                .show_ui(ui, |ui| {
                    for mode in INJECTION_MODES {
                        ui.selectable_value(&mut params.injection, mode.to_string(), mode);
                    }
                });
            ui.end_row();
        });

    ui.add_space(10.0);
    let calc_btn = egui::Button::new(egui::RichText::new("Calculate").strong())
        .min_size(egui::vec2(120.0, 28.0));
    if ui.add(calc_btn).clicked() {
        action = FormAction::Calculate;
    }

    ui.add_space(4.0);
    if ui
        .add_enabled(can_export, egui::Button::new("Export CSV").min_size(egui::vec2(120.0, 26.0)))
        .on_disabled_hover_text("Calculate first")
        .clicked()
    {
        action = FormAction::ExportCsv;
    }

    ui.add_space(4.0);
    if ui
        .add_enabled(can_save_image, egui::Button::new("Save PNG").min_size(egui::vec2(120.0, 26.0)))
        .on_disabled_hover_text("Nothing drawn yet")
        .clicked()
    {
        action = FormAction::SavePng;
    }

    action
}
