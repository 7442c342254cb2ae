use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("candle count must be at least 1")]
    NoCandles,
    #[error("candle count must be at most {max}, got {count}")]
    TooManyCandles { count: usize, max: usize },
    #[error("{name} must be finite and positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("extinguish scale must lie in [0, 1), got {0}")]
    ExtinguishScale(f32),
    #[error("{name} must be a positive duration")]
    ZeroDuration { name: &'static str },
}

#[derive(Debug, Error)]
pub enum GuestbookError {
    #[error("both a name and a message are required")]
    MissingField,
    #[error("wish cache is not valid JSON: {0}")]
    Cache(#[from] serde_json::Error),
    #[error("wishes service reply is not valid JSON: {0}")]
    Reply(serde_json::Error),
    #[error("wishes service reported: {0}")]
    Upstream(String),
    #[error("request failed with HTTP status {0}")]
    Status(u16),
}
