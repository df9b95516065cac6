//! 应用主流程 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：加载配置、创建 LLM 客户端和成绩存储
//! 2. **接收上传**：从命令行参数读取 PDF 文件（只接受 PDF）
//! 3. **交互循环**：生成 → 作答 → 提交，可多次重新生成
//! 4. **错误就地报告**：提取/生成失败时提示用户，不渲染测验，也不退出界面

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use tracing::{error, warn};

use crate::config::Config;
use crate::infrastructure::pdf_reader::PdfUpload;
use crate::services::llm_service::{CompletionClient, LlmService};
use crate::services::result_store::JsonResultStore;
use crate::utils::logging;
use crate::workflow::{QuizPipeline, SubmitOutcome};
use crate::orchestrator::console::Console;

/// 应用主结构
pub struct App<C, R, W> {
    pipeline: QuizPipeline<C>,
    console: Console<R, W>,
    results_path: String,
}

impl App<LlmService, std::io::StdinLock<'static>, std::io::Stdout> {
    /// 用配置初始化应用（标准输入输出）
    pub fn initialize(config: Config) -> Self {
        logging::log_startup(&config);

        let store = JsonResultStore::new(&config.results_path);
        let pipeline = QuizPipeline::new(
            LlmService::new(&config),
            Box::new(store),
            config.num_questions,
        );
        let console = Console::new(std::io::stdin().lock(), std::io::stdout());

        Self::with_parts(pipeline, console, config.results_path)
    }
}

impl<C: CompletionClient, R: BufRead, W: Write> App<C, R, W> {
    pub fn with_parts(pipeline: QuizPipeline<C>, console: Console<R, W>, results_path: impl Into<String>) -> Self {
        Self {
            pipeline,
            console,
            results_path: results_path.into(),
        }
    }

    pub fn pipeline(&self) -> &QuizPipeline<C> {
        &self.pipeline
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// 运行应用主逻辑
    pub async fn run(&mut self, files: &[PathBuf]) -> Result<()> {
        self.show_previous_result()?;

        let uploads = self.load_uploads(files)?;
        if uploads.is_empty() {
            self.console.say("请上传至少一个 PDF 文件（作为命令行参数传入）。")?;
            return Ok(());
        }

        self.console.say(format!("已上传 {} 个 PDF:", uploads.len()))?;
        for upload in &uploads {
            self.console.say(format!("  - {}", upload.name))?;
        }

        let text = match self.pipeline.extract(&uploads) {
            Ok(text) => text,
            Err(e) => {
                error!("文本提取失败: {}", e);
                self.console.say(format!("❌ 无法提取 PDF 文本: {}", e))?;
                return Ok(());
            }
        };

        while self.console.confirm("Generate MCQs?")? {
            self.console
                .say(format!("⏳ 正在生成 {} 道选择题...", self.pipeline.num_questions()))?;
            match self.pipeline.generate(&text).await {
                Ok(summary) => {
                    self.console.say(format!("✅ Generated {} MCQs!", summary.generated))?;
                    if summary.malformed > 0 {
                        self.console.say(format!("⚠️ 其中 {} 道题目格式不完整", summary.malformed))?;
                    }
                }
                Err(e) => {
                    error!("题目生成失败: {}", e);
                    self.console.say(format!("❌ 生成失败: {}", e))?;
                    continue;
                }
            }

            if self.pipeline.session().questions().is_empty() {
                self.console.say("LLM 没有返回可识别的题目，请重试。")?;
                continue;
            }

            self.take_quiz()?;
        }

        Ok(())
    }

    /// 逐题作答并提交
    fn take_quiz(&mut self) -> Result<()> {
        self.console.say("\n📝 Take the Test")?;

        // 单选框默认选中第一个选项
        self.pipeline.session_mut().apply_default_selections();

        let questions = self.pipeline.session().questions().to_vec();
        for (number, question) in questions.iter().enumerate() {
            let selected = self.pipeline.session().selected(question.id).map(str::to_string);
            self.console
                .render_question(number + 1, question, selected.as_deref())?;
            if let Some(choice) = self.console.ask_choice(question)? {
                self.pipeline.session_mut().record_answer(question.id, choice)?;
            }
        }

        if !self.console.confirm("Submit Quiz?")? {
            return Ok(());
        }

        match self.pipeline.submit() {
            Ok(SubmitOutcome::Scored(result)) => {
                self.console.say(format!(
                    "✅ You scored {}% ({}/{} correct)",
                    result.score, result.correct, result.total
                ))?;
                self.console.say(format!(
                    "Your latest quiz results have been saved locally as '{}'.",
                    self.results_path
                ))?;
            }
            Ok(SubmitOutcome::Incomplete { unanswered }) => {
                let numbers: Vec<String> = unanswered.iter().map(|id| (id + 1).to_string()).collect();
                self.console.say(format!("⚠️ 以下题目没有可选答案，无法计分: {}", numbers.join(", ")))?;
            }
            Err(e) => {
                error!("提交失败: {}", e);
                self.console.say(format!("❌ 提交失败: {}", e))?;
            }
        }

        Ok(())
    }

    /// 读取上传的文件，非 PDF 或读取失败的文件会被跳过并提示
    fn load_uploads(&mut self, files: &[PathBuf]) -> Result<Vec<PdfUpload>> {
        let mut uploads = Vec::new();
        for path in files {
            match PdfUpload::from_path(path) {
                Ok(upload) => uploads.push(upload),
                Err(e) => {
                    warn!("跳过文件: {}", e);
                    self.console.say(format!("⚠️ 跳过: {}", e))?;
                }
            }
        }
        Ok(uploads)
    }

    fn show_previous_result(&mut self) -> Result<()> {
        match self.pipeline.latest_result() {
            Ok(Some(result)) => {
                self.console.say(format!(
                    "上次成绩: {}% ({}/{})，时间 {}",
                    result.score, result.correct, result.total, result.timestamp
                ))?;
            }
            Ok(None) => {}
            Err(e) => warn!("无法读取上次成绩: {}", e),
        }
        Ok(())
    }
}
