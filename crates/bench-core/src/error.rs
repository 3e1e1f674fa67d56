use thiserror::Error;

/// Errors surfaced by the benchmark engine
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{0} is an invalid number of requests")]
    InvalidRequests(u64),

    #[error("{0} is an invalid concurrency level")]
    InvalidConcurrency(u64),

    #[error("invalid HTTP method {0:?}")]
    InvalidMethod(String),

    #[error("no time recorded")]
    NoTimeRecorded,

    #[error("stats cannot be empty")]
    EmptyStats,

    #[error("unknown stats file format: invalid line {0:?}")]
    MalformedStatsFile(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("dispatch semaphore closed: {0}")]
    Acquire(#[from] tokio::sync::AcquireError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Config(#[from] toml::de::Error),
}
