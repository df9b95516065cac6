pub mod quiz_pipeline;
pub mod quiz_session;

pub use quiz_pipeline::{GenerateSummary, QuizPipeline};
pub use quiz_session::{QuestionOutcome, QuizSession, SessionState, SubmitOutcome};
