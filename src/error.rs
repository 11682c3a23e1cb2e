use thiserror::Error;

/// Transport-level failures of a route oracle.
///
/// Service-level refusals (unknown address, no route) are not errors; the
/// oracle reports them as `Ok(None)`.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("oracle unreachable: {0}")]
    Unreachable(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid address pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),
}
