//! Template catalog errors.

use csa_core::CsaError;
use thiserror::Error;

pub type TemplateResult<T> = Result<T, TemplateError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Unknown template: {name}")]
    UnknownTemplate { name: String },

    /// An override value outside its allowed range.
    #[error("Invalid override {field} = {value}: {reason}")]
    InvalidOverride {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl From<TemplateError> for CsaError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::UnknownTemplate { name } => CsaError::UnknownName {
                what: "template",
                value: name,
            },
            TemplateError::InvalidOverride { field, .. } => CsaError::InvalidArg { what: field },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TemplateError::UnknownTemplate {
            name: "ring_bus".into(),
        };
        assert!(err.to_string().contains("ring_bus"));
    }

    #[test]
    fn error_to_csa_error() {
        let err: CsaError = TemplateError::InvalidOverride {
            field: "spare_io_pct",
            value: "120".into(),
            reason: "too large".into(),
        }
        .into();
        assert!(matches!(err, CsaError::InvalidArg { what: "spare_io_pct" }));
    }
}
