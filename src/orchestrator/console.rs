//! 终端交互界面 - 编排层
//!
//! 按行读写的测验界面：渲染题目、读取选择、显示得分。
//! 读写对象是泛型的，测试时用内存缓冲区驱动。

use std::io::{self, BufRead, Write};

use crate::models::question::{option_label, Question};

/// 终端界面
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// 输出一行
    pub fn say(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", message.as_ref())
    }

    /// 读取一行（去掉首尾空白），EOF 返回 None
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// 是/否确认，只有 y / yes 视为确认，EOF 视为否
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{} [y/N] ", question)?;
        self.output.flush()?;
        Ok(self
            .read_line()?
            .is_some_and(|answer| matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")))
    }

    /// 渲染一道题，`selected` 为当前选中项
    pub fn render_question(&mut self, number: usize, question: &Question, selected: Option<&str>) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "[{}] {}", number, question.question_text)?;
        for option in &question.options {
            let marker = if selected == Some(option.as_str()) { "●" } else { "○" };
            writeln!(self.output, "    {} {}", marker, option)?;
        }
        Ok(())
    }

    /// 读取一道题的选择
    ///
    /// 输入选项字母（大小写均可）；空行保持当前选择，返回 None。
    /// 输入无效时重新询问，EOF 同样返回 None。
    pub fn ask_choice(&mut self, question: &Question) -> io::Result<Option<String>> {
        if question.options.is_empty() {
            writeln!(self.output, "    (该题没有可选项)")?;
            return Ok(None);
        }

        loop {
            write!(self.output, "Select your answer: ")?;
            self.output.flush()?;

            let Some(input) = self.read_line()? else {
                return Ok(None);
            };
            if input.is_empty() {
                return Ok(None);
            }

            if let Some(option) = match_choice(question, &input) {
                return Ok(Some(option.to_string()));
            }
            writeln!(self.output, "无效的选择: {}", input)?;
        }
    }
}

/// 把用户输入匹配到某个选项：单个字母按标签匹配，否则要求与选项原文一致
fn match_choice<'q>(question: &'q Question, input: &str) -> Option<&'q str> {
    let mut chars = input.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        let letter = letter.to_ascii_uppercase();
        return question
            .options
            .iter()
            .find(|opt| option_label(opt) == Some(letter))
            .map(String::as_str);
    }
    question
        .options
        .iter()
        .find(|opt| opt.as_str() == input)
        .map(String::as_str)
}
