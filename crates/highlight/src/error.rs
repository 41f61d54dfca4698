use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    #[error("highlighter failed: {0}")]
    Engine(String),
}

pub type Result<T> = std::result::Result<T, HighlightError>;
