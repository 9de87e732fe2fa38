//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from data-source and persistence errors.

use super::Timestamp;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Journey has no legs
    #[error("journey must have at least one leg")]
    EmptyJourney,

    /// Journey would arrive before it departs
    #[error("journey departs at {depart} but arrives at {arrive}")]
    DepartsAfterArrival { depart: Timestamp, arrive: Timestamp },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_timestamp;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyJourney;
        assert_eq!(err.to_string(), "journey must have at least one leg");

        let err = DomainError::DepartsAfterArrival {
            depart: parse_timestamp("2024-03-15T10:30:00+01:00").unwrap(),
            arrive: parse_timestamp("2024-03-15T10:00:00+01:00").unwrap(),
        };
        assert!(err.to_string().starts_with("journey departs at 2024-03-15 10:30:00"));
    }
}
