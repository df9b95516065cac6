//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! app (交互循环 + 终端界面)
//!     ↓
//! workflow::QuizPipeline (提取 → 生成 → 解析 → 会话)
//!     ↓
//! services (能力层：llm / generator / parser / result store)
//!     ↓
//! infrastructure (基础设施：PDF 文本提取)
//! ```

pub mod app;
pub mod console;

pub use app::App;
pub use console::Console;
