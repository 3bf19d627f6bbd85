pub mod form_panel;
pub mod legend;
pub mod plot_panel;
