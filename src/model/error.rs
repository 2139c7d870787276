use thiserror::Error;

/// Errors raised by the cost model and the surface generator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Division by zero: denominator {denominator} is not positive")]
    DivisionByZero { denominator: f64 },

    #[error("Invalid sweep axis: {0}")]
    InvalidAxis(String),
}

impl ModelError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        ModelError::InvalidInput(msg.into())
    }

    pub fn invalid_axis(msg: impl Into<String>) -> Self {
        ModelError::InvalidAxis(msg.into())
    }
}

impl From<validator::ValidationErrors> for ModelError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ModelError::InvalidInput(errors.to_string())
    }
}
