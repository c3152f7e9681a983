use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Cascade safety cap ({cap}) exceeded: the payout table permits unbounded cascades")]
    CascadeCapExceeded { cap: u32 },

    #[error("Redraw cap ({cap}) exceeded filling cell (row {row}, col {col})")]
    RedrawCapExceeded { cap: u32, row: usize, col: usize },

    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
