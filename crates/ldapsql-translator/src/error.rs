use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The predicate has no equivalent in the filter grammar
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// The query object itself is malformed or incomplete
    #[error("Translation error: {0}")]
    Translation(String),
}

impl TranslateError {
    pub fn reason(&self) -> &str {
        match self {
            TranslateError::Unsupported(reason) | TranslateError::Translation(reason) => reason,
        }
    }
}
