//! Failure taxonomy for the gate pipeline.
//!
//! Every terminal outcome of the login/callback/follow flows maps to exactly
//! one variant. Variants carry only sanitized, user-safe detail strings; the
//! raw remote errors are logged where they occur.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    /// The remote service reported a denial (e.g. the user declined consent).
    #[error("access denied: {0}")]
    AuthDenied(String),

    /// The callback arrived without an authorization code.
    #[error("no authorization code in callback")]
    MissingCode,

    /// The echoed state token and the cookie value are absent or unequal.
    #[error("state token mismatch")]
    StateMismatch,

    /// The token endpoint rejected the code exchange.
    #[error("token exchange failed: {0}")]
    TokenExchangeFailed(String),

    /// A follow-status query or the identity probe failed.
    #[error("follow verification failed: {0}")]
    VerificationFailed(String),

    /// One or more follow mutations failed. Prior successful mutations are
    /// not rolled back; the remote service has no transactional follow.
    #[error("follow action failed for {resource}: {detail}")]
    FollowActionFailed { resource: String, detail: String },

    /// The mutations succeeded but a re-check does not observe them yet.
    /// Recoverable: callers should offer a retry.
    #[error("follow not yet visible after subscribing")]
    VerificationAfterActionFailed,
}

impl GateError {
    /// Stable machine-readable tag carried in redirects and JSON bodies.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::AuthDenied(_) => "access_denied",
            Self::MissingCode => "missing_code",
            Self::StateMismatch => "state_mismatch",
            Self::TokenExchangeFailed(_) => "token_exchange_failed",
            Self::VerificationFailed(_) => "verification_failed",
            Self::FollowActionFailed { .. } => "follow_action_failed",
            Self::VerificationAfterActionFailed => "verification_after_action_failed",
        }
    }

    /// Human-readable detail for the failure surface.
    #[must_use]
    pub fn details(&self) -> String {
        match self {
            Self::AuthDenied(reason) => reason.clone(),
            Self::MissingCode => "the remote service sent no authorization code".to_string(),
            Self::StateMismatch => "login state could not be verified, please retry".to_string(),
            Self::TokenExchangeFailed(detail) | Self::VerificationFailed(detail) => detail.clone(),
            Self::FollowActionFailed { resource, detail } => format!("{resource}: {detail}"),
            Self::VerificationAfterActionFailed => {
                "the follow was accepted but is not visible yet, please retry".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_stable() {
        assert_eq!(GateError::StateMismatch.tag(), "state_mismatch");
        assert_eq!(GateError::MissingCode.tag(), "missing_code");
        assert_eq!(
            GateError::AuthDenied("access_denied".to_string()).tag(),
            "access_denied"
        );
        assert_eq!(
            GateError::VerificationAfterActionFailed.tag(),
            "verification_after_action_failed"
        );
    }

    #[test]
    fn follow_action_failed_names_the_resource() {
        let err = GateError::FollowActionFailed {
            resource: "playlist".to_string(),
            detail: "Insufficient client scope".to_string(),
        };
        assert!(err.details().starts_with("playlist:"));
        assert!(err.to_string().contains("playlist"));
    }
}
