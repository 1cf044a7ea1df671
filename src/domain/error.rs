use thiserror::Error;

/// Domain-level errors representing invalid payment data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Amount must not be negative")]
    NegativeAmount,

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Correlation id must not be empty")]
    EmptyCorrelationId,

    #[error("Unknown processor: {0}")]
    UnknownProcessor(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats_correctly() {
        assert_eq!(DomainError::InvalidAmount.to_string(), "Invalid amount");
        assert_eq!(
            DomainError::NegativeAmount.to_string(),
            "Amount must not be negative"
        );
        assert_eq!(DomainError::Overflow.to_string(), "Arithmetic overflow");
        assert_eq!(
            DomainError::EmptyCorrelationId.to_string(),
            "Correlation id must not be empty"
        );
        assert_eq!(
            DomainError::UnknownProcessor("backup".to_string()).to_string(),
            "Unknown processor: backup"
        );
    }

    #[test]
    fn error_comparison_works() {
        assert_eq!(DomainError::Overflow, DomainError::Overflow.clone());
        assert_ne!(DomainError::Overflow, DomainError::InvalidAmount);
    }
}
