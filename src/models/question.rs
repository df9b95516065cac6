use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// 选项标签，如 `"B) Light"` 中的 `B`
static OPTION_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z])\s*\)").expect("valid option label regex"));

/// 一道选择题
///
/// 选项保留 LLM 输出中的原始文本（包含 `"A)"` 前缀）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// 解析时分配的稳定编号（从 0 开始），会话状态都以它为键
    pub id: usize,
    #[serde(rename = "question")]
    pub question_text: String,
    pub options: Vec<String>,
    #[serde(rename = "answer")]
    pub answer_label: Option<String>,
}

impl Question {
    pub fn new(id: usize, question_text: impl Into<String>) -> Self {
        Self {
            id,
            question_text: question_text.into(),
            options: Vec::new(),
            answer_label: None,
        }
    }

    /// 答案标签恰好对应一个选项时返回 true
    pub fn is_well_formed(&self) -> bool {
        let Some(answer) = self.answer_label.as_deref() else {
            return false;
        };
        self.options
            .iter()
            .filter(|opt| label_matches(opt, answer))
            .count()
            == 1
    }

    /// 判断所选选项是否正确（比较标签是否相等）
    pub fn is_correct(&self, selected_option: &str) -> bool {
        self.answer_label
            .as_deref()
            .is_some_and(|answer| label_matches(selected_option, answer))
    }
}

/// 提取选项的标签字母（大写）
pub fn option_label(option: &str) -> Option<char> {
    OPTION_LABEL
        .captures(option)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .map(|c| c.to_ascii_uppercase())
}

/// 归一化答案标签：去掉空白以及结尾的 `)` / `.`，只接受单个字母
fn normalize_answer(answer: &str) -> Option<char> {
    let trimmed = answer.trim().trim_end_matches([')', '.']).trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}

fn label_matches(option: &str, answer: &str) -> bool {
    match (option_label(option), normalize_answer(answer)) {
        (Some(label), Some(expected)) => label == expected,
        _ => false,
    }
}

/// 一次"生成"得到的完整题目列表
pub type QuizRecord = Vec<Question>;

/// 解析结果，附带被丢弃行的计数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub mcqs: QuizRecord,
    /// 没有打开的题目时出现的选项行/答案行
    pub orphaned_lines: usize,
    /// 不匹配任何模式的非空行
    pub ignored_lines: usize,
}

impl ParseReport {
    pub fn dropped_lines(&self) -> usize {
        self.orphaned_lines + self.ignored_lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question {
            id: 0,
            question_text: "Q1. What does photosynthesis convert?".to_string(),
            options: vec![
                "A) Heat".to_string(),
                "B) Light".to_string(),
                "C) Sound".to_string(),
                "D) Mass".to_string(),
            ],
            answer_label: Some("B".to_string()),
        }
    }

    #[test]
    fn test_option_label() {
        assert_eq!(option_label("B) Light"), Some('B'));
        assert_eq!(option_label("  c ) lower"), Some('C'));
        assert_eq!(option_label("Light"), None);
    }

    #[test]
    fn test_is_correct_uses_label_equality() {
        let q = sample();
        assert!(q.is_correct("B) Light"));
        assert!(!q.is_correct("A) Heat"));
        // 与答案同字母开头但标签不同的文本不算对
        assert!(!q.is_correct("Bright light"));
    }

    #[test]
    fn test_answer_noise_is_tolerated() {
        let mut q = sample();
        q.answer_label = Some(" b) ".to_string());
        assert!(q.is_correct("B) Light"));
        q.answer_label = Some("B.".to_string());
        assert!(q.is_correct("B) Light"));
    }

    #[test]
    fn test_missing_or_malformed_answer_never_correct() {
        let mut q = sample();
        q.answer_label = None;
        assert!(!q.is_correct("B) Light"));
        q.answer_label = Some("Light".to_string());
        assert!(!q.is_correct("B) Light"));
    }

    #[test]
    fn test_well_formed() {
        let mut q = sample();
        assert!(q.is_well_formed());
        q.answer_label = Some("E".to_string());
        assert!(!q.is_well_formed());
        q.answer_label = None;
        assert!(!q.is_well_formed());
    }

    #[test]
    fn test_json_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["question"], "Q1. What does photosynthesis convert?");
        assert_eq!(json["answer"], "B");
        assert_eq!(json["options"][1], "B) Light");
        assert_eq!(json["id"], 0);
    }
}
