use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteGraphError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl RouteGraphError {
    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        RouteGraphError::InvalidInput(msg.into())
    }

    pub fn persistence<T: Into<String>>(msg: T) -> Self {
        RouteGraphError::Persistence(msg.into())
    }
}
