#![allow(clippy::missing_docs_in_private_items)]

pub mod answerer;
pub mod gateway;
pub mod index;
pub mod model_resolver;
pub mod outcome;
pub mod prioritizer;
pub mod scoring;

pub use answerer::{QueryAnswerer, EMPTY_CORPUS_MESSAGE};
pub use gateway::GenerationGateway;
pub use index::VectorIndex;
pub use model_resolver::{ModelHandle, ModelResolver};
pub use outcome::{AnswerOutcome, SoftErrorKind};
pub use prioritizer::TaskPrioritizer;
pub use scoring::ScoredChunk;
