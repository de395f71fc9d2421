//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid friend description: {0}")]
    InvalidParticipant(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainError::InvalidCoordinates("abc".to_string());
        assert_eq!(error.to_string(), "Invalid coordinates: abc");

        let error = DomainError::InvalidParticipant("empty location".to_string());
        assert_eq!(error.to_string(), "Invalid friend description: empty location");
    }
}
