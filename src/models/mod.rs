pub mod question;
pub mod score;

pub use question::{option_label, ParseReport, Question, QuizRecord};
pub use score::{percentage, ScoreResult, UserAnswerMap};
