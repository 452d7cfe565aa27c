use thiserror::Error;

pub type CsaResult<T> = Result<T, CsaError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsaError {
    #[error("Unknown {what}: '{value}'")]
    UnknownName { what: &'static str, value: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
