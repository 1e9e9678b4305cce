use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown measurement code '{0}'")]
    UnknownMeasurementCode(String),
    #[error("size label must not be empty")]
    EmptySize,
}

pub type Result<T> = std::result::Result<T, ModelError>;
