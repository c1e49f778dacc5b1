use thiserror::Error;

#[derive(Debug, Error)]
pub enum WrapperError {
    #[error("no global window object")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    /// A DOM call threw. Holds the debug print of the thrown value.
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error("invalid wrapper configuration: {0}")]
    Config(#[from] serde_json::Error),
}
