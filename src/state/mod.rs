pub mod chart_state;
pub mod data_series;
pub mod dataset;
pub mod visibility;
