use retrieval_pipeline::{AnswerOutcome, EMPTY_CORPUS_MESSAGE};

pub mod chat;
pub mod drawings;
pub mod key_check;
pub mod liveness;
pub mod notes;
pub mod prioritize;
pub mod projects;
pub mod readiness;
pub mod upload;
pub mod users;

/// Marker prefix for soft failures carried inside a 200-shaped payload.
pub(crate) const SOFT_ERROR_PREFIX: &str = "AI error";

/// Flattens an outcome into the text payload the API contract promises:
/// answer text, the empty-corpus sentinel, or a marker-prefixed error
/// string, always inside a successful response.
pub(crate) fn render_outcome(outcome: AnswerOutcome) -> String {
    match outcome {
        AnswerOutcome::Answered(text) => text,
        AnswerOutcome::EmptyCorpus => EMPTY_CORPUS_MESSAGE.to_owned(),
        AnswerOutcome::SoftError { kind, message } => {
            format!("{SOFT_ERROR_PREFIX} ({kind}): {message}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retrieval_pipeline::SoftErrorKind;

    #[test]
    fn test_render_outcome_variants() {
        assert_eq!(
            render_outcome(AnswerOutcome::Answered("Paris".into())),
            "Paris"
        );
        assert_eq!(
            render_outcome(AnswerOutcome::EmptyCorpus),
            EMPTY_CORPUS_MESSAGE
        );

        let soft = render_outcome(AnswerOutcome::SoftError {
            kind: SoftErrorKind::QuotaExceeded,
            message: "slow down".into(),
        });
        assert!(soft.starts_with(SOFT_ERROR_PREFIX));
        assert!(soft.contains("quota exceeded"));
        assert!(soft.contains("slow down"));
    }
}
