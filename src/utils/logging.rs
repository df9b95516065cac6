/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化 tracing 日志
///
/// 日志输出到 stderr，stdout 留给测验界面。`RUST_LOG` 优先于 `verbose_logging`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - PDF 选择题测验");
    info!("🤖 模型: {}", config.llm_model_name);
    info!("📊 每次生成题目数: {}", config.num_questions);
    info!("💾 成绩文件: {}", config.results_path);
    info!("{}", "=".repeat(60));
}

/// 记录文本提取结果
pub fn log_extracted(documents: usize, text: &str) {
    info!(
        "✓ 已提取 {} 个文档, 共 {} 个字符",
        documents,
        text.chars().count()
    );
    if text.is_empty() {
        warn!("⚠️ 提取的文本为空（可能是扫描件）");
    } else {
        info!("文本预览: {}", truncate_text(text, 80));
    }
}

/// 记录题目生成结果
pub fn log_generated(generated: usize, orphaned: usize, ignored: usize) {
    info!("✓ 生成了 {} 道选择题", generated);
    if orphaned + ignored > 0 {
        info!("解析时丢弃 {} 行, 忽略 {} 行", orphaned, ignored);
    }
}

/// 记录得分
pub fn log_score(score: f64, correct: usize, total: usize) {
    info!("{}", "─".repeat(60));
    info!("✅ 得分: {}% ({}/{} 正确)", score, correct, total);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本（换行替换为空格）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > max_len {
        flat.chars().take(max_len).collect::<String>() + "..."
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 4), "abcd...");
        assert_eq!(truncate_text("光合作用把光能转化", 4), "光合作用...");
        assert_eq!(truncate_text("a\nb", 10), "a b");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
