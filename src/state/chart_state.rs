use crate::error::RenderError;
use crate::state::data_series::DataSeries;
use crate::state::dataset::{charge_label, ChargeStateDataset};

/// Default X range in log10(seconds): 1 µs .. 0.1 s.
pub const DEFAULT_LOG_TIME_BOUNDS: (f64, f64) = (-6.0, -1.0);

/// The drawn side of the plot: the list of line series plus the axis setup
/// the plot panel applies on the next frame.
#[derive(Debug, Clone)]
pub struct ChartState {
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub series: Vec<DataSeries>,
    /// X bounds in log10(seconds).
    pub x_bounds: (f64, f64),
    pub y_bounds: (f64, f64),
    /// Set when the bounds should be pushed to the plot on the next frame,
    /// overriding any pan/zoom the user did.
    pub reset_bounds: bool,
    /// Screen rect of the plot (set each frame for screenshot cropping).
    pub last_frame_rect: Option<egui::Rect>,
}

impl ChartState {
    pub fn new() -> Self {
        Self {
            title: "Charge state evolution".to_string(),
            x_axis_label: "Breeding time [s]".to_string(),
            y_axis_label: "Charge state abundance".to_string(),
            series: Vec::new(),
            x_bounds: DEFAULT_LOG_TIME_BOUNDS,
            y_bounds: (0.0, 1.0),
            reset_bounds: true,
            last_frame_rect: None,
        }
    }

    /// Replace every drawn series with one line per charge state of `dataset`.
    ///
    /// The previous series are dropped first, so on error the chart is empty.
    pub fn render(
        &mut self,
        dataset: &ChargeStateDataset,
        x_bounds: (f64, f64),
    ) -> Result<(), RenderError> {
        self.series.clear();
        self.x_bounds = x_bounds;
        self.reset_bounds = true;

        let expected = dataset.labels.len();
        let mut drawn = Vec::with_capacity(dataset.series.len());
        for index in 0..dataset.charge_states() {
            let y = dataset
                .series
                .get(&index)
                .ok_or(RenderError::MissingSeries(index))?;
            if y.len() != expected {
                return Err(RenderError::LengthMismatch {
                    index,
                    expected,
                    actual: y.len(),
                });
            }

            // Log axis: points at t <= 0 have no position.
            let (xs, ys): (Vec<f64>, Vec<f64>) = dataset
                .labels
                .iter()
                .zip(y.iter())
                .filter(|(t, _)| **t > 0.0)
                .map(|(t, v)| (t.log10(), *v))
                .unzip();

            drawn.push(DataSeries::new(index, charge_label(index), xs, ys));
        }

        self.series = drawn;
        tracing::debug!("rendered {} series", self.series.len());
        Ok(())
    }

    /// Go back to the configured ranges on the next frame.
    pub fn request_bounds_reset(&mut self) {
        self.reset_bounds = true;
    }

    pub fn take_bounds_reset(&mut self) -> bool {
        std::mem::take(&mut self.reset_bounds)
    }

    /// Number of drawn series.
    pub fn renderer_count(&self) -> usize {
        self.series.len()
    }

    pub fn set_visible(&mut self, index: usize, visible: bool) {
        if let Some(series) = self.series.get_mut(index) {
            series.visible = visible;
        }
    }

    pub fn set_all_visible(&mut self, visible: bool) {
        for series in &mut self.series {
            series.visible = visible;
        }
    }

    #[cfg(test)]
    pub fn is_visible(&self, index: usize) -> Option<bool> {
        self.series.get(index).map(|s| s.visible)
    }
}

impl Default for ChartState {
    fn default() -> Self {
        Self::new()
    }
}
