//! # PDF Quiz
//!
//! 从 PDF 讲义生成选择题测验的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构，控制流只向前：提取 → 生成 → 解析 → 会话
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部资源，只暴露能力
//! - `TextExtractor` - 按文档、页码顺序提取 PDF 文本
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `LlmService` - 调用 LLM 生成文本
//! - `QuestionGenerator` - 拼装提示词并请求生成题目
//! - `McqParser` - 把 LLM 输出解析成题目列表
//! - `JsonResultStore` - 写入/读取最新成绩
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 会话状态与计分
//! - `QuizSession` - 显式的会话上下文（题目、作答、状态）
//! - `QuizPipeline` - 串联四个阶段
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 终端交互界面与应用生命周期

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, LoadedConfig};
pub use error::{AppError, AppResult};
pub use infrastructure::{PdfUpload, TextExtractor};
pub use models::{ParseReport, Question, QuizRecord, ScoreResult, UserAnswerMap};
pub use orchestrator::App;
pub use services::{CompletionClient, JsonResultStore, LlmService, McqParser, QuestionGenerator, ResultStore};
pub use workflow::{QuizPipeline, QuizSession, SessionState, SubmitOutcome};
