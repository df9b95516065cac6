use crate::models::question::QuizRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 用户作答：题目编号 → 所选选项的原文
pub type UserAnswerMap = BTreeMap<usize, String>;

/// 一次提交的成绩，整体写入结果文件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// ISO-8601 本地时间
    pub timestamp: String,
    /// 百分制得分，保留两位小数
    pub score: f64,
    pub correct: usize,
    pub total: usize,
    pub mcqs: QuizRecord,
    pub user_answers: UserAnswerMap,
}

impl ScoreResult {
    pub fn new(correct: usize, total: usize, mcqs: QuizRecord, user_answers: UserAnswerMap) -> Self {
        Self {
            timestamp: chrono::Local::now().to_rfc3339(),
            score: percentage(correct, total),
            correct,
            total,
            mcqs,
            user_answers,
        }
    }
}

/// `round(100 * correct / total, 2)`，total 为 0 时返回 0
pub fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = correct as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}
