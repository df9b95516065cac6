use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// PDF 文本提取错误
    #[error("提取错误: {0}")]
    Extraction(#[from] ExtractionError),
    /// 题目生成（LLM）错误
    #[error("生成错误: {0}")]
    Generation(#[from] GenerationError),
    /// 测验会话错误
    #[error("测验错误: {0}")]
    Quiz(#[from] QuizError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// PDF 文本提取错误
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// 上传的文件不是 PDF
    #[error("不是 PDF 文件: {name}")]
    NotPdf { name: String },
    /// 读取文件失败
    #[error("读取文件失败 ({name}): {source}")]
    ReadFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },
    /// 文档无法解析
    #[error("无法解析 PDF ({name}): {source}")]
    LoadFailed {
        name: String,
        #[source]
        source: lopdf::Error,
    },
    /// 单页文本提取失败
    #[error("提取第 {page} 页文本失败 ({name}): {source}")]
    PageFailed {
        name: String,
        page: u32,
        #[source]
        source: lopdf::Error,
    },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 构建请求失败
    #[error("构建 LLM 请求失败: {0}")]
    RequestBuild(String),
    /// API 调用失败（网络、鉴权、配额等）
    #[error("LLM API 调用失败 (模型: {model}): {message}")]
    ApiCallFailed { model: String, message: String },
    /// 返回内容为空
    #[error("LLM 返回内容为空 (模型: {model})")]
    EmptyResponse { model: String },
}

/// 测验会话错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// 尚未生成题目
    #[error("当前没有测验，请先生成题目")]
    NoQuiz,
    /// 题目列表为空，无法计分
    #[error("测验中没有任何题目")]
    EmptyQuiz,
    /// 题目编号不存在
    #[error("题目编号 {id} 不存在 (共 {total} 题)")]
    UnknownQuestion { id: usize, total: usize },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 序列化/反序列化失败
    #[error("JSON 处理失败 ({path}): {source}")]
    JsonFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// TOML 解析失败
    #[error("TOML 解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建 LLM API 调用错误
    pub fn llm_api_failed(model: impl Into<String>, source: impl std::fmt::Display) -> Self {
        AppError::Generation(GenerationError::ApiCallFailed {
            model: model.into(),
            message: source.to_string(),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }
}

impl From<async_openai::error::OpenAIError> for GenerationError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        GenerationError::RequestBuild(err.to_string())
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
