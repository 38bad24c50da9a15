//! Unified error type for Vestibule.

use vestibule_catalogue::DiscoveryError;
use vestibule_join::JoinError;

/// Top-level error wrapping the crate-specific errors.
///
/// Hosts using the `vestibule` meta crate deal with this single type;
/// the `#[from]` attributes keep `?` conversions automatic.
#[derive(Debug, thiserror::Error)]
pub enum VestibuleError {
    /// A join-layer error (full, rejected, unavailable).
    #[error(transparent)]
    Join(#[from] JoinError),

    /// A discovery-layer error (unreachable source, bad listing).
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_join_error() {
        let err = JoinError::Rejected("wrong password".into());
        let top: VestibuleError = err.into();
        assert!(matches!(top, VestibuleError::Join(_)));
        assert_eq!(top.to_string(), "join rejected: wrong password");
    }

    #[test]
    fn test_from_discovery_error() {
        let err = DiscoveryError::Unavailable("dns".into());
        let top: VestibuleError = err.into();
        assert!(matches!(top, VestibuleError::Discovery(_)));
    }
}
