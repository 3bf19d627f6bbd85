use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

use crate::data::client::ChargeStateSource;
use crate::data::request::QueryParams;
use crate::error::{FetchError, RenderError};
use crate::state::chart_state::ChartState;
use crate::state::dataset::ChargeStateDataset;
use crate::state::visibility::SeriesVisibility;
use crate::ui::legend::{build_legend, Legend};

type FetchSlot = Arc<Mutex<Option<Result<ChargeStateDataset, FetchError>>>>;

/// A fetch still running on its worker thread.
struct PendingFetch {
    token: u64,
    result: FetchSlot,
}

/// Status overlay shown over the plot.
#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    None,
    Loading,
    FetchFailed(FetchError),
    RenderFailed(RenderError),
}

/// Owns the plot state and keeps chart, visibility flags and legend in step.
///
/// Fetches run on worker threads. Each one is tagged with a request token and
/// only the result of the most recently issued request is applied.
pub struct PlotController {
    pub params: QueryParams,
    pub dataset: Option<ChargeStateDataset>,
    pub visibility: SeriesVisibility,
    pub chart: ChartState,
    pub legend: Legend,
    pub banner: Banner,
    source: Arc<dyn ChargeStateSource>,
    latest_token: u64,
    pending: Vec<PendingFetch>,
}

impl PlotController {
    pub fn new(source: Arc<dyn ChargeStateSource>, params: QueryParams) -> Self {
        Self {
            params,
            dataset: None,
            visibility: SeriesVisibility::new(),
            chart: ChartState::new(),
            legend: Legend::default(),
            banner: Banner::None,
            source,
            latest_token: 0,
            pending: Vec::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Fetch
    // ---------------------------------------------------------------------

    /// Hand out the token for a new request. Anything issued earlier is stale
    /// from now on.
    pub fn issue_token(&mut self) -> u64 {
        self.latest_token += 1;
        self.latest_token
    }

    #[cfg(test)]
    pub fn latest_token(&self) -> u64 {
        self.latest_token
    }

    pub fn is_loading(&self) -> bool {
        self.banner == Banner::Loading
    }

    /// Start a calculation with the current form values on a worker thread.
    pub fn calculate(&mut self) -> u64 {
        self.chart.title = self.params.plot_title();
        let token = self.issue_token();
        let result: FetchSlot = Arc::new(Mutex::new(None));
        let result_clone = Arc::clone(&result);
        let source = Arc::clone(&self.source);
        let params = self.params.clone();

        tracing::info!("issuing request #{token} for {}", params.element);
        std::thread::spawn(move || {
            // A panicking source still has to clear the loading banner.
            let fetched = panic::catch_unwind(AssertUnwindSafe(|| source.fetch(&params)))
                .unwrap_or_else(|_| {
                    tracing::error!("request #{token} worker panicked");
                    Err(FetchError::Network("fetch worker panicked".to_string()))
                });
            *result_clone.lock().unwrap_or_else(PoisonError::into_inner) = Some(fetched);
        });

        self.pending.push(PendingFetch { token, result });
        self.banner = Banner::Loading;
        token
    }

    /// Collect finished worker results and apply them. Returns `true` if
    /// anything was applied.
    pub fn poll(&mut self) -> bool {
        let mut finished = Vec::new();
        self.pending.retain(|pending| {
            let taken = pending
                .result
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            match taken {
                Some(result) => {
                    finished.push((pending.token, result));
                    false
                }
                None => true,
            }
        });

        let mut applied = false;
        for (token, result) in finished {
            applied |= self.apply_fetch(token, result);
        }
        applied
    }

    /// Apply a completed fetch if `token` is the latest one issued.
    ///
    /// On success the dataset replaces the previous one and is rendered. On
    /// failure the previous dataset, chart, visibility and legend stay as they
    /// were and the fetch banner is shown.
    pub fn apply_fetch(
        &mut self,
        token: u64,
        result: Result<ChargeStateDataset, FetchError>,
    ) -> bool {
        if token != self.latest_token {
            tracing::warn!(
                "discarding stale response #{token} (latest is #{})",
                self.latest_token
            );
            return false;
        }

        match result {
            Ok(dataset) => {
                tracing::info!(
                    "response #{token}: {} charge states, {} points",
                    dataset.charge_states(),
                    dataset.point_count()
                );
                self.banner = Banner::None;
                self.render(dataset);
            }
            Err(err) => {
                tracing::error!("response #{token} failed: {err}");
                self.banner = Banner::FetchFailed(err);
            }
        }
        true
    }

    // ---------------------------------------------------------------------
    // Render
    // ---------------------------------------------------------------------

    /// Draw `dataset` from scratch: new series, fresh visibility, new legend.
    pub fn render(&mut self, dataset: ChargeStateDataset) {
        self.visibility.reset();
        let bounds = self.params.log_time_bounds();
        let result = self.chart.render(&dataset, bounds);
        self.dataset = Some(dataset);
        self.legend = build_legend(self.chart.renderer_count(), &self.visibility);

        if let Err(err) = result {
            tracing::error!("render failed: {err}");
            self.banner = Banner::RenderFailed(err);
        }
    }

    // ---------------------------------------------------------------------
    // Visibility sync
    // ---------------------------------------------------------------------

    /// Flip one charge state and patch only its legend row.
    pub fn toggle_one(&mut self, index: usize) {
        if index >= self.chart.renderer_count() {
            return;
        }
        let visible = self.visibility.toggle(index);
        self.chart.set_visible(index, visible);
        self.legend.patch_row(index, visible);
    }

    pub fn show_all(&mut self) {
        self.set_all(true);
    }

    /// Hide every charge state. No control in the window calls this today.
    #[allow(dead_code)]
    pub fn hide_all(&mut self) {
        self.set_all(false);
    }

    fn set_all(&mut self, visible: bool) {
        let count = self.chart.renderer_count();
        self.visibility.set_all(count, visible);
        self.chart.set_all_visible(visible);
        self.legend.repaint(&self.visibility);
    }

    pub fn dismiss_banner(&mut self) {
        if !self.is_loading() {
            self.banner = Banner::None;
        }
    }
}
