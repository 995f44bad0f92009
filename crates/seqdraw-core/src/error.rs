pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An enumerated field (style, placement, arrow head, ...) carried a value outside its set.
    #[error("unknown {field} `{value}`")]
    UnknownValue { field: &'static str, value: String },

    #[error("invalid diagram model: {message}")]
    InvalidModel { message: String },

    #[error("diagram model JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn unknown(field: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownValue {
            field,
            value: value.into(),
        }
    }

    pub fn invalid_model(message: impl Into<String>) -> Self {
        Self::InvalidModel {
            message: message.into(),
        }
    }
}
