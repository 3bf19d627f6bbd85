use std::io::Write;
use std::path::Path;

use crate::state::dataset::{charge_label, ChargeStateDataset};

/// Write `dataset` as CSV: a `time` column followed by one column per charge
/// state up to the highest one with data. Charge states without data are
/// written as empty cells.
pub fn write_csv<W: Write>(dataset: &ChargeStateDataset, writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);

    let mut header = vec!["time".to_string()];
    let columns = dataset.populated_states();
    header.extend((0..columns).map(charge_label));
    out.write_record(&header)?;

    for (row, time) in dataset.labels.iter().enumerate() {
        let mut record = vec![time.to_string()];
        for index in 0..columns {
            let cell = dataset
                .series
                .get(&index)
                .and_then(|s| s.get(row))
                .map(|v| v.to_string())
                .unwrap_or_default();
            record.push(cell);
        }
        out.write_record(&record)?;
    }

    out.flush()?;
    Ok(())
}

/// Ask for a destination and export the dataset there.
pub fn export_with_dialog(dataset: &ChargeStateDataset, suggested_name: &str) -> Result<(), String> {
    let Some(path) = rfd::FileDialog::new()
        .set_file_name(suggested_name)
        .add_filter("CSV Files", &["csv"])
        .save_file()
    else {
        return Ok(());
    };
    export_to_path(dataset, &path)
}

pub fn export_to_path(dataset: &ChargeStateDataset, path: &Path) -> Result<(), String> {
    let file = std::fs::File::create(path).map_err(|e| format!("Cannot create file: {e}"))?;
    write_csv(dataset, file).map_err(|e| format!("Failed to write CSV: {e}"))?;
    tracing::info!("Exported CSV to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv_layout() {
        let dataset = ChargeStateDataset::new(
            vec![0.001, 0.01],
            vec![vec![0.9, 0.4], vec![0.1, 0.6]],
        );
        let mut buf = Vec::new();
        write_csv(&dataset, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "time,0+,1+\n0.001,0.9,0.1\n0.01,0.4,0.6\n");
    }

    #[test]
    fn test_write_csv_leaves_missing_series_blank() {
        let mut dataset = ChargeStateDataset::new(vec![1.0], vec![vec![0.5], vec![0.5]]);
        dataset.series.remove(&0);
        let mut buf = Vec::new();
        write_csv(&dataset, &mut buf).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "time,0+,1+\n1,,0.5\n");
    }

    #[test]
    fn test_write_csv_stops_at_last_populated_state() {
        let body = serde_json::json!({
            "number_of_ch_states": 1_000_000_000_000u64,
            "labels": [1.0],
            "1+": [0.5],
        });
        let dataset = ChargeStateDataset::from_response(body).unwrap();
        let mut buf = Vec::new();
        write_csv(&dataset, &mut buf).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "time,0+,1+\n1,,0.5\n");
    }

    #[test]
    fn test_export_to_path_writes_file() {
        let dataset = ChargeStateDataset::new(vec![1.0], vec![vec![0.25]]);
        let path = std::env::temp_dir().join(format!("chargebreed-export-{}.csv", std::process::id()));

        export_to_path(&dataset, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(text, "time,0+\n1,0.25\n");
    }
}
