//! 选择题解析 - 业务能力层
//!
//! 把 LLM 输出的半结构化文本逐行解析成题目列表。格式不对的行只计数、不报错。

use tracing::{debug, warn};

use crate::models::question::{ParseReport, Question};

const OPTION_PREFIXES: [&str; 4] = ["A)", "B)", "C)", "D)"];
const ANSWER_PREFIX: &str = "Answer:";

/// 一行文本的分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Blank,
    QuestionHeader(&'a str),
    Option(&'a str),
    Answer(&'a str),
    Other,
}

fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        LineKind::Blank
    } else if line.starts_with('Q') && line.contains('.') {
        LineKind::QuestionHeader(line)
    } else if OPTION_PREFIXES.iter().any(|p| line.starts_with(p)) {
        LineKind::Option(line)
    } else if line.starts_with(ANSWER_PREFIX) {
        // 取最后一个冒号之后的内容
        let answer = line.rsplit(':').next().unwrap_or_default().trim();
        LineKind::Answer(answer)
    } else {
        LineKind::Other
    }
}

/// 选择题解析器
#[derive(Debug, Default, Clone, Copy)]
pub struct McqParser;

impl McqParser {
    pub fn new() -> Self {
        Self
    }

    /// 解析 LLM 的原始输出
    ///
    /// 选项不足 4 个、缺少答案的题目同样会被输出
    pub fn parse(&self, raw: &str) -> ParseReport {
        let mut report = ParseReport::default();
        let mut current: Option<Question> = None;

        for line in raw.lines().map(str::trim) {
            match classify(line) {
                LineKind::QuestionHeader(text) => {
                    if let Some(done) = current.take() {
                        report.mcqs.push(done);
                    }
                    current = Some(Question::new(report.mcqs.len(), text));
                }
                LineKind::Option(option) => match current.as_mut() {
                    Some(q) => q.options.push(option.to_string()),
                    None => {
                        debug!("丢弃无所属题目的选项行: {}", option);
                        report.orphaned_lines += 1;
                    }
                },
                LineKind::Answer(answer) => match current.as_mut() {
                    Some(q) => q.answer_label = Some(answer.to_string()),
                    None => {
                        debug!("丢弃无所属题目的答案行: {}", line);
                        report.orphaned_lines += 1;
                    }
                },
                LineKind::Other => report.ignored_lines += 1,
                LineKind::Blank => {}
            }
        }

        if let Some(done) = current {
            report.mcqs.push(done);
        }

        let malformed = report.mcqs.iter().filter(|q| !q.is_well_formed()).count();
        if malformed > 0 {
            warn!("⚠️ {} 道题目格式不完整（选项或答案缺失）", malformed);
        }
        if report.orphaned_lines > 0 {
            warn!("⚠️ 丢弃了 {} 行无所属题目的选项/答案", report.orphaned_lines);
        }
        debug!(
            "解析完成: {} 道题目, 忽略 {} 行",
            report.mcqs.len(),
            report.ignored_lines
        );

        report
    }
}
