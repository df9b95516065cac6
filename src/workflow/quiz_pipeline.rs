//! 测验流水线 - 流程层
//!
//! 串联四个阶段：提取 → 生成 → 解析 → 会话。只向前调用，不回调。

use tracing::info;

use crate::error::AppResult;
use crate::infrastructure::pdf_reader::{PdfUpload, TextExtractor};
use crate::models::score::ScoreResult;
use crate::services::llm_service::CompletionClient;
use crate::services::mcq_parser::McqParser;
use crate::services::question_generator::QuestionGenerator;
use crate::services::result_store::ResultStore;
use crate::utils::logging;
use crate::workflow::quiz_session::{QuizSession, SubmitOutcome};

/// 一次"生成"的摘要
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSummary {
    pub generated: usize,
    pub malformed: usize,
    pub dropped_lines: usize,
}

/// 测验流水线
///
/// 持有会话上下文，所有界面操作都通过它完成
pub struct QuizPipeline<C> {
    extractor: TextExtractor,
    generator: QuestionGenerator<C>,
    parser: McqParser,
    store: Box<dyn ResultStore>,
    session: QuizSession,
    num_questions: usize,
}

impl<C: CompletionClient> QuizPipeline<C> {
    pub fn new(client: C, store: Box<dyn ResultStore>, num_questions: usize) -> Self {
        Self {
            extractor: TextExtractor::new(),
            generator: QuestionGenerator::new(client),
            parser: McqParser::new(),
            store,
            session: QuizSession::new(),
            num_questions,
        }
    }

    pub fn client(&self) -> &C {
        self.generator.client()
    }

    pub fn num_questions(&self) -> usize {
        self.num_questions
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut QuizSession {
        &mut self.session
    }

    /// 提取所有上传文档的文本
    pub fn extract(&self, uploads: &[PdfUpload]) -> AppResult<String> {
        let text = self.extractor.extract(uploads)?;
        logging::log_extracted(uploads.len(), &text);
        Ok(text)
    }

    /// 生成并解析题目，成功后替换会话中的题目
    ///
    /// 失败时会话保持原样
    pub async fn generate(&mut self, text: &str) -> AppResult<GenerateSummary> {
        let raw = self.generator.generate(text, self.num_questions).await?;
        let report = self.parser.parse(&raw);

        let summary = GenerateSummary {
            generated: report.mcqs.len(),
            malformed: report.mcqs.iter().filter(|q| !q.is_well_formed()).count(),
            dropped_lines: report.dropped_lines(),
        };
        logging::log_generated(summary.generated, report.orphaned_lines, report.ignored_lines);

        self.session.start_quiz(report.mcqs);
        Ok(summary)
    }

    /// 提取 + 生成
    pub async fn generate_from_uploads(&mut self, uploads: &[PdfUpload]) -> AppResult<GenerateSummary> {
        let text = self.extract(uploads)?;
        self.generate(&text).await
    }

    /// 提交并保存成绩
    pub fn submit(&mut self) -> AppResult<SubmitOutcome> {
        let outcome = self.session.submit(self.store.as_ref())?;
        if let SubmitOutcome::Scored(result) = &outcome {
            logging::log_score(result.score, result.correct, result.total);
        }
        Ok(outcome)
    }

    /// 读取上一次保存的成绩
    pub fn latest_result(&self) -> AppResult<Option<ScoreResult>> {
        let latest = self.store.load_latest()?;
        if let Some(result) = &latest {
            info!("上次成绩: {}% ({})", result.score, result.timestamp);
        }
        Ok(latest)
    }
}
