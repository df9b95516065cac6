//! 题目生成服务 - 业务能力层
//!
//! 把提取出的文本套进固定的提示词模板交给 LLM，原样返回 LLM 的输出

use tracing::{debug, info};

use crate::error::AppResult;
use crate::services::llm_service::CompletionClient;

/// 默认生成的题目数量
pub const DEFAULT_NUM_QUESTIONS: usize = 20;

/// 题目生成器
///
/// 输出格式只是提示词中的要求，这里不做任何校验
pub struct QuestionGenerator<C> {
    client: C,
}

impl<C: CompletionClient> QuestionGenerator<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// 生成题目，返回 LLM 的原始文本
    pub async fn generate(&self, text: &str, num_questions: usize) -> AppResult<String> {
        let prompt = build_prompt(text, num_questions);
        debug!("提示词长度: {} 字符", prompt.len());

        info!("🤖 正在请求 LLM 生成 {} 道选择题...", num_questions);
        let raw = self.client.complete(&prompt).await?;
        debug!("LLM 返回 {} 行", raw.lines().count());

        Ok(raw)
    }
}

/// 构建生成提示词
pub fn build_prompt(text: &str, num_questions: usize) -> String {
    format!(
        r#"Generate {num_questions} multiple choice questions from the text below.
Each question should have 4 options (A–D) and one correct answer.
Format strictly as:
Q1. <question>
A) <option>
B) <option>
C) <option>
D) <option>
Answer: <letter>

Text:
{text}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 记录收到的提示词并返回固定文本
    struct RecordingClient {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CompletionClient for RecordingClient {
        async fn complete(&self, prompt: &str) -> AppResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl CompletionClient for FailingClient {
        async fn complete(&self, _prompt: &str) -> AppResult<String> {
            Err(crate::AppError::llm_api_failed("test-model", "quota exceeded"))
        }
    }

    #[test]
    fn test_prompt_embeds_count_text_and_layout() {
        let prompt = build_prompt("Photosynthesis converts light into energy.", 7);
        assert!(prompt.starts_with("Generate 7 multiple choice questions"));
        assert!(prompt.contains("Q1. <question>"));
        assert!(prompt.contains("D) <option>\nAnswer: <letter>"));
        assert!(prompt.ends_with("Text:\nPhotosynthesis converts light into energy.\n"));
    }

    #[tokio::test]
    async fn test_generate_returns_raw_text_verbatim() {
        let reply = "  Sure! Here you go:\nQ1. x\nA) y\n".to_string();
        let generator = QuestionGenerator::new(RecordingClient {
            reply: reply.clone(),
            prompts: Mutex::new(Vec::new()),
        });

        let raw = generator.generate("some text", DEFAULT_NUM_QUESTIONS).await.unwrap();
        assert_eq!(raw, reply);

        let prompts = generator.client().prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Generate 20 multiple choice questions"));
        assert!(prompts[0].contains("some text"));
    }

    #[test]
    fn test_generate_propagates_failure() {
        let generator = QuestionGenerator::new(FailingClient);
        let err = tokio_test::block_on(generator.generate("text", 3)).unwrap_err();
        assert!(matches!(err, crate::AppError::Generation(_)));
    }
}
