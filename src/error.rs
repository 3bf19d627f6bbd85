use thiserror::Error;

/// Banner text shown when the simulation API could not be reached or answered badly.
pub const FETCH_BANNER: &str = "Error communicating with API";
/// Secondary line under the fetch banner.
pub const FETCH_HINT: &str = "Please check your parameters and try again.";
/// Banner text shown when a dataset could not be drawn.
pub const RENDER_BANNER: &str = "Error while rendering plot";

/// Errors raised while fetching a dataset from the simulation API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connection refused, timeout...).
    #[error("request failed: {0}")]
    Network(String),

    /// The API answered with a non-2xx status.
    #[error("API responded with status {0}")]
    Status(u16),

    /// The body was not the JSON object we expect.
    #[error("malformed API response: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn banner(&self) -> &'static str {
        FETCH_BANNER
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Errors raised while building the drawn series from a dataset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The response announced a charge state but carried no `"<i>+"` series for it.
    #[error("no data for charge state {0}+")]
    MissingSeries(usize),

    /// A series does not line up with the shared time axis.
    #[error("charge state {index}+ has {actual} points, expected {expected}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

impl RenderError {
    pub fn banner(&self) -> &'static str {
        RENDER_BANNER
    }
}
