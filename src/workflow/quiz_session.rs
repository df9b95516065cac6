//! 测验会话 - 流程层
//!
//! 显式的会话上下文：当前题目列表、用户作答、状态机以及计分

use tracing::{debug, info};

use crate::error::{AppResult, QuizError};
use crate::models::question::{Question, QuizRecord};
use crate::models::score::{ScoreResult, UserAnswerMap};
use crate::services::result_store::ResultStore;

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// 尚未生成题目
    #[default]
    Empty,
    /// 已生成题目，等待提交
    Loaded,
    /// 已提交并计分
    Answered,
}

/// 单道题的判分结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub id: usize,
    pub selected: Option<String>,
    pub correct: bool,
}

/// 提交结果
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 已计分并保存
    Scored(ScoreResult),
    /// 还有题目没有作答，未计分也未保存
    Incomplete { unanswered: Vec<usize> },
}

/// 测验会话
#[derive(Debug, Default)]
pub struct QuizSession {
    record: QuizRecord,
    answers: UserAnswerMap,
    state: SessionState,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.record
    }

    pub fn answers(&self) -> &UserAnswerMap {
        &self.answers
    }

    pub fn selected(&self, id: usize) -> Option<&str> {
        self.answers.get(&id).map(String::as_str)
    }

    /// 开始新的测验：替换题目列表并清空作答
    pub fn start_quiz(&mut self, mcqs: QuizRecord) {
        info!("📝 开始新测验，共 {} 道题", mcqs.len());
        self.record = mcqs;
        self.answers.clear();
        self.state = SessionState::Loaded;
    }

    /// 记录（或覆盖）某道题的选择
    ///
    /// 不校验所选文本是否属于该题的选项
    pub fn record_answer(&mut self, id: usize, selected_option: impl Into<String>) -> AppResult<()> {
        self.ensure_started()?;
        if !self.record.iter().any(|q| q.id == id) {
            return Err(QuizError::UnknownQuestion {
                id,
                total: self.record.len(),
            }
            .into());
        }

        let selected_option = selected_option.into();
        debug!("题目 #{} 选择: {}", id, selected_option);
        self.answers.insert(id, selected_option);
        Ok(())
    }

    /// 未作答且有选项的题目默认选中第一个选项
    ///
    /// 返回被填充默认值的题目数量
    pub fn apply_default_selections(&mut self) -> usize {
        let mut filled = 0;
        for q in &self.record {
            if self.answers.contains_key(&q.id) {
                continue;
            }
            if let Some(first) = q.options.first() {
                self.answers.insert(q.id, first.clone());
                filled += 1;
            }
        }
        filled
    }

    /// 还没有作答的题目编号
    pub fn unanswered(&self) -> Vec<usize> {
        self.record
            .iter()
            .map(|q| q.id)
            .filter(|id| !self.answers.contains_key(id))
            .collect()
    }

    /// 逐题判分（未作答的题目算错）
    pub fn grade(&self) -> Vec<QuestionOutcome> {
        self.record
            .iter()
            .map(|q| {
                let selected = self.answers.get(&q.id).cloned();
                let correct = selected.as_deref().is_some_and(|s| q.is_correct(s));
                QuestionOutcome {
                    id: q.id,
                    selected,
                    correct,
                }
            })
            .collect()
    }

    /// 提交测验
    ///
    /// 所有题目都有选择时计分，并把成绩交给 `store` 覆盖保存；
    /// 否则返回 `Incomplete`，会话状态不变
    pub fn submit(&mut self, store: &dyn ResultStore) -> AppResult<SubmitOutcome> {
        self.ensure_started()?;
        if self.record.is_empty() {
            return Err(QuizError::EmptyQuiz.into());
        }

        let unanswered = self.unanswered();
        if !unanswered.is_empty() {
            info!("⚠️ 还有 {} 道题未作答", unanswered.len());
            return Ok(SubmitOutcome::Incomplete { unanswered });
        }

        let correct = self.grade().iter().filter(|o| o.correct).count();
        let result = ScoreResult::new(
            correct,
            self.record.len(),
            self.record.clone(),
            self.answers.clone(),
        );

        store.save(&result)?;
        self.state = SessionState::Answered;

        Ok(SubmitOutcome::Scored(result))
    }

    fn ensure_started(&self) -> Result<(), QuizError> {
        match self.state {
            SessionState::Empty => Err(QuizError::NoQuiz),
            SessionState::Loaded | SessionState::Answered => Ok(()),
        }
    }
}
