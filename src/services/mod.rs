pub mod llm_service;
pub mod mcq_parser;
pub mod question_generator;
pub mod result_store;

pub use llm_service::{CompletionClient, LlmService};
pub use mcq_parser::McqParser;
pub use question_generator::QuestionGenerator;
pub use result_store::{JsonResultStore, ResultStore};
