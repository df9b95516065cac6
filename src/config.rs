use crate::error::{AppResult, ConfigError, FileError};
use crate::services::question_generator::DEFAULT_NUM_QUESTIONS;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// 默认的配置文件路径
pub const DEFAULT_CONFIG_FILE: &str = "quiz.toml";

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    // --- 测验配置 ---
    /// 每次生成的题目数量
    pub num_questions: usize,
    /// 最新成绩的保存路径（每次提交覆盖）
    pub results_path: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.5-pro".to_string(),
            num_questions: DEFAULT_NUM_QUESTIONS,
            results_path: "quiz_results.json".to_string(),
            verbose_logging: false,
        }
    }
}

/// `quiz.toml` 中允许出现的字段，全部可选
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    llm_api_key: Option<String>,
    llm_api_base_url: Option<String>,
    llm_model_name: Option<String>,
    num_questions: Option<usize>,
    results_path: Option<String>,
    verbose_logging: Option<bool>,
}

/// 配置加载结果
///
/// 加载发生在日志初始化之前，过程中的提示先收集起来，初始化后再由 [`LoadedConfig::log`] 输出
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// 实际读取的配置文件，`None` 表示未找到
    pub source: Option<String>,
    pub warnings: Vec<ConfigError>,
}

impl LoadedConfig {
    /// 输出加载过程中收集的提示
    pub fn log(&self) {
        match &self.source {
            Some(path) => debug!("已读取配置文件 {}", path),
            None => debug!("未找到配置文件，使用默认配置"),
        }
        for warning in &self.warnings {
            warn!("{}，保留原值", warning);
        }
    }
}

impl Config {
    /// 加载完整配置：默认值 ← quiz.toml ← 环境变量
    ///
    /// `.env` 文件会先被加载到进程环境中。配置文件路径可以用 `QUIZ_CONFIG` 覆盖，
    /// 文件不存在时直接跳过。
    pub fn load() -> AppResult<LoadedConfig> {
        let _ = dotenvy::dotenv();

        let path = std::env::var("QUIZ_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let (base, source) = if Path::new(&path).exists() {
            (Self::from_toml_file(&path)?, Some(path))
        } else {
            (Self::default(), None)
        };

        let mut warnings = Vec::new();
        let config = base.with_env_overrides(|name| std::env::var(name).ok(), &mut warnings);
        Ok(LoadedConfig {
            config,
            source,
            warnings,
        })
    }

    /// 只从环境变量读取（缺失项使用默认值）
    pub fn from_env() -> Self {
        let mut warnings = Vec::new();
        let config = Self::default().with_env_overrides(|name| std::env::var(name).ok(), &mut warnings);
        for warning in &warnings {
            warn!("{}，保留原值", warning);
        }
        config
    }

    /// 从 TOML 文件读取配置，未出现的字段使用默认值
    pub fn from_toml_file(path: &str) -> AppResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| crate::AppError::file_read_failed(path, e))?;
        Self::from_toml_str(&content).map_err(|source| {
            FileError::TomlParseFailed {
                path: path.to_string(),
                source,
            }
            .into()
        })
    }

    fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: FileConfig = toml::from_str(content)?;
        let default = Self::default();
        Ok(Self {
            llm_api_key: file.llm_api_key.unwrap_or(default.llm_api_key),
            llm_api_base_url: file.llm_api_base_url.unwrap_or(default.llm_api_base_url),
            llm_model_name: file.llm_model_name.unwrap_or(default.llm_model_name),
            num_questions: file.num_questions.unwrap_or(default.num_questions),
            results_path: file.results_path.unwrap_or(default.results_path),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
        })
    }

    /// 用环境变量覆盖当前配置
    ///
    /// `lookup` 抽象了环境变量读取，便于测试。无法解析的数值保留原值，
    /// 对应的错误追加到 `warnings`。
    fn with_env_overrides(
        self,
        lookup: impl Fn(&str) -> Option<String>,
        warnings: &mut Vec<ConfigError>,
    ) -> Self {
        Self {
            llm_api_key: lookup("GEMINI_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: lookup("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: lookup("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            num_questions: parse_or_keep(&lookup, "NUM_QUESTIONS", self.num_questions, warnings),
            results_path: lookup("RESULTS_PATH").unwrap_or(self.results_path),
            verbose_logging: parse_or_keep(&lookup, "VERBOSE_LOGGING", self.verbose_logging, warnings),
        }
    }
}

fn parse_or_keep<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    current: T,
    warnings: &mut Vec<ConfigError>,
) -> T {
    let Some(value) = lookup(var_name) else {
        return current;
    };
    match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            warnings.push(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: std::any::type_name::<T>().to_string(),
            });
            current
        }
    }
}
