use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("\"{value}\" is not a valid URL")]
    InvalidUrl { value: String },
    #[error("\"{value}\" is not a valid integer.")]
    InvalidInteger {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Timeout overflow.")]
    TimeoutOverflow,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
