use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;

/// Label used for a charge state both in the API payload and on screen.
pub fn charge_label(index: usize) -> String {
    format!("{index}+")
}

/// Inverse of [`charge_label`]: `"12+"` gives 12.
fn parse_charge_label(key: &str) -> Option<usize> {
    let index: usize = key.strip_suffix('+')?.parse().ok()?;
    (charge_label(index) == key).then_some(index)
}

/// Fixed part of the API payload. Per-charge-state series live next to these
/// fields under `"0+"`, `"1+"`, ... and are picked out separately.
#[derive(Debug, Deserialize)]
struct ResponseHeader {
    number_of_ch_states: usize,
    labels: Vec<f64>,
}

/// One simulation result: a shared time axis and one abundance curve per
/// charge state.
///
/// `series` is keyed by charge-state index. An index below `charge_states`
/// that has no entry means the API announced the state but sent no data for
/// it; that is only detected when the dataset is drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChargeStateDataset {
    pub labels: Vec<f64>,
    pub series: BTreeMap<usize, Vec<f64>>,
    charge_states: usize,
}

impl ChargeStateDataset {
    #[cfg(test)]
    pub fn new(labels: Vec<f64>, series: Vec<Vec<f64>>) -> Self {
        let charge_states = series.len();
        Self {
            labels,
            series: series.into_iter().enumerate().collect(),
            charge_states,
        }
    }

    /// Build a dataset from the raw JSON body returned by the API.
    ///
    /// Only `number_of_ch_states` and `labels` are required. A missing or
    /// non-numeric `"<i>+"` field leaves index `i` absent.
    pub fn from_response(body: Value) -> Result<Self, FetchError> {
        let header = ResponseHeader::deserialize(&body)
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        let fields = body
            .as_object()
            .ok_or_else(|| FetchError::Decode("response is not an object".to_string()))?;
        let mut series = BTreeMap::new();
        for (key, field) in fields {
            let Some(index) = parse_charge_label(key) else {
                continue;
            };
            if index >= header.number_of_ch_states {
                continue;
            }
            match Vec::<f64>::deserialize(field) {
                Ok(values) => {
                    series.insert(index, values);
                }
                Err(e) => tracing::warn!("series {key} is not numeric: {e}"),
            }
        }

        let missing = header.number_of_ch_states - series.len();
        if missing > 0 {
            tracing::warn!(
                "response announces {} charge states but {missing} have no usable series",
                header.number_of_ch_states
            );
        }

        Ok(Self {
            labels: header.labels,
            series,
            charge_states: header.number_of_ch_states,
        })
    }

    /// Columns worth writing out: announced states up to the highest one that
    /// actually carries data.
    pub fn populated_states(&self) -> usize {
        self.series
            .keys()
            .next_back()
            .map_or(0, |last| (last + 1).min(self.charge_states))
    }

    /// Number of charge states the API announced.
    pub fn charge_states(&self) -> usize {
        self.charge_states
    }

    pub fn point_count(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_response_collects_indexed_series() {
        let body = json!({
            "number_of_ch_states": 2,
            "labels": [1, 2, 3],
            "0+": [0.1, 0.2, 0.3],
            "1+": [0.4, 0.5, 0.6],
        });

        let dataset = ChargeStateDataset::from_response(body).unwrap();

        assert_eq!(dataset.series.len(), 2);
        assert_eq!(dataset.charge_states(), 2);
        assert_eq!(dataset.labels, vec![1.0, 2.0, 3.0]);
        assert_eq!(dataset.series[&1], vec![0.4, 0.5, 0.6]);
    }

    #[test]
    fn test_from_response_leaves_missing_series_absent() {
        let body = json!({
            "number_of_ch_states": 3,
            "labels": [1.0, 2.0],
            "0+": [0.5, 0.5],
            "2+": [0.1, 0.2],
        });

        let dataset = ChargeStateDataset::from_response(body).unwrap();

        assert_eq!(dataset.charge_states(), 3);
        assert!(dataset.series.contains_key(&0));
        assert!(!dataset.series.contains_key(&1));
        assert!(dataset.series.contains_key(&2));
    }

    #[test]
    fn test_from_response_ignores_fields_beyond_count() {
        let body = json!({
            "number_of_ch_states": 1,
            "labels": [1.0],
            "0+": [0.9],
            "1+": [0.1],
        });

        let dataset = ChargeStateDataset::from_response(body).unwrap();

        assert_eq!(dataset.series.len(), 1);
    }

    #[test]
    fn test_from_response_with_huge_announced_count_returns_quickly() {
        let body = json!({
            "number_of_ch_states": 1_000_000_000_000u64,
            "labels": [1.0],
            "0+": [0.2],
            "5+": [0.8],
            "extra": "ignored",
        });

        let started = std::time::Instant::now();
        let dataset = ChargeStateDataset::from_response(body).unwrap();

        assert!(started.elapsed() < std::time::Duration::from_secs(1));
        assert_eq!(dataset.charge_states(), 1_000_000_000_000);
        assert_eq!(dataset.series.keys().copied().collect::<Vec<_>>(), vec![0, 5]);
    }

    #[test]
    fn test_parse_charge_label() {
        assert_eq!(parse_charge_label("0+"), Some(0));
        assert_eq!(parse_charge_label("17+"), Some(17));
        assert_eq!(parse_charge_label("labels"), None);
        assert_eq!(parse_charge_label("-1+"), None);
        assert_eq!(parse_charge_label("+"), None);
        assert_eq!(parse_charge_label("+3+"), None);
        assert_eq!(parse_charge_label("03+"), None);
    }

    #[test]
    fn test_from_response_requires_header_fields() {
        let err = ChargeStateDataset::from_response(json!({ "labels": [1.0] })).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));

        let err = ChargeStateDataset::from_response(json!("not an object")).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_new_indexes_series_in_order() {
        let dataset = ChargeStateDataset::new(vec![1.0], vec![vec![0.3], vec![0.7]]);
        assert_eq!(dataset.charge_states(), 2);
        assert_eq!(dataset.series[&0], vec![0.3]);
        assert_eq!(charge_label(11), "11+");
    }
}
