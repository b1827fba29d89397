use thiserror::Error;

/// Why an inbound update was refused. Every variant maps to HTTP 400.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedUpdate {
    #[error("body is not valid JSON: {0}")]
    NotJson(String),
    #[error("body is not a JSON object")]
    NotAnObject,
    #[error("missing field `mode`")]
    MissingMode,
    #[error("field `mode` must be a string")]
    ModeNotString,
    #[error("field `mode` is empty")]
    EmptyMode,
    #[error("missing field `turbidity`")]
    MissingTurbidity,
    #[error("field `turbidity` must be a number")]
    TurbidityNotNumber,
    #[error("field `turbidity` must be >= 0")]
    NegativeTurbidity,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngressError {
    #[error("malformed update: {0}")]
    Malformed(#[from] MalformedUpdate),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisplayError {
    #[error("display side is gone")]
    Disconnected,
}
