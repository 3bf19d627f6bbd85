use serde::{Deserialize, Serialize};

use crate::state::chart_state::DEFAULT_LOG_TIME_BOUNDS;

/// Injection modes offered by the form.
pub const INJECTION_MODES: [&str; 2] = ["continuous", "pulsed"];

/// Raw values of the calculation form. Everything is forwarded to the API as
/// typed; nothing is validated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    pub element: String,
    pub energy: String,
    pub density: String,
    pub min_log_time: String,
    pub max_log_time: String,
    pub rest_gas_pressure: String,
    pub rest_gas_ip: String,
    pub injection: String,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            element: "Ar".to_string(),
            energy: "5000".to_string(),
            density: "500".to_string(),
            min_log_time: "-6".to_string(),
            max_log_time: "-1".to_string(),
            rest_gas_pressure: "1e-10".to_string(),
            rest_gas_ip: "15".to_string(),
            injection: INJECTION_MODES[0].to_string(),
        }
    }
}

impl QueryParams {
    /// `key=value` pairs in the order the API documents them.
    pub fn pairs(&self) -> [(&'static str, &str); 8] {
        [
            ("element", self.element.as_str()),
            ("energy", self.energy.as_str()),
            ("density", self.density.as_str()),
            ("minlogtime", self.min_log_time.as_str()),
            ("maxlogtime", self.max_log_time.as_str()),
            ("rest_gas_pressure", self.rest_gas_pressure.as_str()),
            ("rest_gas_ip", self.rest_gas_ip.as_str()),
            ("injection", self.injection.as_str()),
        ]
    }

    pub fn query_string(&self) -> String {
        self.pairs()
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn request_url(&self, endpoint: &str) -> String {
        format!("{endpoint}?{}", self.query_string())
    }

    /// X-axis bounds in log10(seconds), read from the min/max fields.
    /// A field that does not parse keeps its default.
    pub fn log_time_bounds(&self) -> (f64, f64) {
        let min = self
            .min_log_time
            .trim()
            .parse::<f64>()
            .unwrap_or(DEFAULT_LOG_TIME_BOUNDS.0);
        let max = self
            .max_log_time
            .trim()
            .parse::<f64>()
            .unwrap_or(DEFAULT_LOG_TIME_BOUNDS.1);
        (min, max)
    }

    pub fn plot_title(&self) -> String {
        format!(
            "Charge state evolution of {} under flow of {} eV electrons at {} A/cm² current density",
            self.element, self.energy, self.density
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_orders_and_encodes_fields() {
        let params = QueryParams {
            element: "Ar".to_string(),
            energy: "5000".to_string(),
            density: "500".to_string(),
            min_log_time: "-6".to_string(),
            max_log_time: "-1".to_string(),
            rest_gas_pressure: "1e-10".to_string(),
            rest_gas_ip: "15.7".to_string(),
            injection: "pulsed mode".to_string(),
        };

        assert_eq!(
            params.query_string(),
            "element=Ar&energy=5000&density=500&minlogtime=-6&maxlogtime=-1\
             &rest_gas_pressure=1e-10&rest_gas_ip=15.7&injection=pulsed%20mode"
        );
    }

    #[test]
    fn test_request_url_forwards_empty_values() {
        let params = QueryParams {
            energy: String::new(),
            ..QueryParams::default()
        };
        let url = params.request_url("https://api.example.org/dev");

        assert!(url.starts_with("https://api.example.org/dev?element=Ar&energy=&density="));
    }

    #[test]
    fn test_log_time_bounds_fall_back_per_field() {
        let mut params = QueryParams::default();
        params.min_log_time = " -4.5 ".to_string();
        params.max_log_time = "soon".to_string();

        assert_eq!(params.log_time_bounds(), (-4.5, DEFAULT_LOG_TIME_BOUNDS.1));
    }

    #[test]
    fn test_plot_title_mentions_beam_parameters() {
        let title = QueryParams::default().plot_title();
        assert_eq!(
            title,
            "Charge state evolution of Ar under flow of 5000 eV electrons at 500 A/cm² current density"
        );
    }
}
