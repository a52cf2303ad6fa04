use std::fmt;

use common::error::AppError;

/// Classification carried by a soft failure so callers can distinguish
/// credential problems from upstream ones without parsing message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftErrorKind {
    InvalidCredential,
    NoUsableModel,
    Timeout,
    QuotaExceeded,
    Unavailable,
    Other,
}

impl SoftErrorKind {
    pub fn from_error(err: &AppError) -> Self {
        match err {
            AppError::InvalidCredential(_) => Self::InvalidCredential,
            AppError::NoUsableModel(_) => Self::NoUsableModel,
            AppError::UpstreamTimeout(_) => Self::Timeout,
            AppError::UpstreamQuotaExceeded(_) => Self::QuotaExceeded,
            AppError::UpstreamUnavailable(_) => Self::Unavailable,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCredential => "invalid credential",
            Self::NoUsableModel => "no usable model",
            Self::Timeout => "timeout",
            Self::QuotaExceeded => "quota exceeded",
            Self::Unavailable => "unavailable",
            Self::Other => "error",
        }
    }
}

impl fmt::Display for SoftErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an answer/prioritize call.
///
/// Generation-path failures are tagged rather than raised: the HTTP boundary
/// decides whether a `SoftError` becomes a 200 text payload (source
/// compatibility) or a proper error status.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    Answered(String),
    /// The namespace has no ingested content yet; a normal response carrying
    /// a user-facing instruction, not an error.
    EmptyCorpus,
    SoftError {
        kind: SoftErrorKind,
        message: String,
    },
}

impl AnswerOutcome {
    pub fn soft(err: &AppError) -> Self {
        Self::SoftError {
            kind: SoftErrorKind::from_error(err),
            message: err.to_string(),
        }
    }

    pub fn is_soft_error(&self) -> bool {
        matches!(self, Self::SoftError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_error_kind_classification() {
        let quota = AppError::UpstreamQuotaExceeded("429".into());
        assert_eq!(SoftErrorKind::from_error(&quota), SoftErrorKind::QuotaExceeded);

        let auth = AppError::InvalidCredential("nope".into());
        assert_eq!(
            SoftErrorKind::from_error(&auth),
            SoftErrorKind::InvalidCredential
        );

        let other = AppError::Processing("glue failure".into());
        assert_eq!(SoftErrorKind::from_error(&other), SoftErrorKind::Other);
    }

    #[test]
    fn test_soft_outcome_carries_message() {
        let outcome = AnswerOutcome::soft(&AppError::NoUsableModel("empty catalog".into()));
        match outcome {
            AnswerOutcome::SoftError { kind, message } => {
                assert_eq!(kind, SoftErrorKind::NoUsableModel);
                assert!(message.contains("empty catalog"));
            }
            other => panic!("expected soft error, got {other:?}"),
        }
    }
}
