use thiserror::Error;

/// 应用程序错误类型
///
/// 只覆盖"整个请求/整个运行"级别的失败。单个会员号的失败（会话失效、网络错误）
/// 不走这里，而是写进该会员号 `FieldSet` 的 `error` 字段。
#[derive(Debug, Error)]
pub enum AppError {
    /// 请求参数错误
    #[error("请求错误: {0}")]
    Request(#[from] RequestError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 批量校验请求的参数错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// 会话令牌为空
    #[error("会话令牌不能为空")]
    MissingSessionToken,
    /// 会员号列表为空
    #[error("会员号列表不能为空")]
    EmptyIdentifiers,
    /// 窗口大小非法
    #[error("窗口大小必须大于 0 (当前: {size})")]
    InvalidWindowSize { size: usize },
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 客户端构建失败
    #[error("HTTP客户端初始化失败: {0}")]
    ClientBuildFailed(#[source] reqwest::Error),
    /// JSON 序列化/解析失败
    #[error("JSON处理失败: {0}")]
    JsonParseFailed(#[from] serde_json::Error),
}

/// 外部凭据刷新动作的错误
///
/// 网关只记录这些错误，从不向上抛出。
#[derive(Debug, Error)]
pub enum RefreshError {
    /// 缺少必要配置
    #[error("刷新动作未配置: {what}")]
    NotConfigured { what: &'static str },
    /// 仓库格式错误
    #[error("GITHUB_REPO 格式错误 '{value}'，应为 owner/repo")]
    InvalidRepo { value: String },
    /// 网络请求失败
    #[error("刷新请求失败: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 对端拒绝
    #[error("刷新请求被拒绝: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
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
    /// TOML 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed(err))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
