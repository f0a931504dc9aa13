use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "VALIDATOR_CONFIG";
/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "validator.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 会员校验页面地址
    pub validator_url: String,
    /// 会话令牌（PA.Global_Websession cookie）
    pub session_token: String,
    /// 健康结果页中必须出现的状态区块标记
    pub status_marker: String,
    /// 每个窗口处理的会员号数量
    pub window_size: usize,
    /// 相邻请求之间的间隔（毫秒），构建请求时会被限制在 [0, 5000]
    pub request_delay_ms: i64,
    /// 相邻窗口之间的间隔（毫秒）
    pub window_pause_ms: u64,
    /// 会员号列表文件
    pub identifiers_file: String,
    /// 结果输出文件
    pub output_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 连续网络错误达到该数量时视为会话失效（None 表示不升级）
    pub transport_error_threshold: Option<usize>,
    // --- 凭据刷新配置 ---
    pub refresh: RefreshConfig,
}

/// 凭据刷新（GitHub workflow_dispatch）配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub github_token: Option<String>,
    /// 格式: owner/repo
    pub github_repo: Option<String>,
    pub workflow_id: String,
    pub git_ref: String,
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validator_url: "https://services24.ieee.org/membership-validator.html".to_string(),
            session_token: String::new(),
            status_marker: "Membership validation status".to_string(),
            window_size: 10,
            request_delay_ms: 700,
            window_pause_ms: 100,
            identifiers_file: "identifiers.txt".to_string(),
            output_file: "validation_results.json".to_string(),
            verbose_logging: false,
            transport_error_threshold: None,
            refresh: RefreshConfig::default(),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            github_repo: None,
            workflow_id: "refresh-cookie.yml".to_string(),
            git_ref: "main".to_string(),
            api_base_url: "https://api.github.com".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：先读 TOML 文件（若存在），再用环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let base = if Path::new(&path).exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| crate::error::AppError::file_read_failed(&path, e))?;
            Self::from_toml_str(&content, &path)?
        } else {
            Self::default()
        };
        base.apply_env()
    }

    /// 只从环境变量加载（其余使用默认值）
    pub fn from_env() -> AppResult<Self> {
        Self::default().apply_env()
    }

    /// 解析 TOML 配置内容，缺失的键使用默认值
    pub fn from_toml_str(content: &str, path: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            ConfigError::TomlParseFailed {
                path: path.to_string(),
                source,
            }
            .into()
        })
    }

    /// 用环境变量覆盖当前配置
    pub fn apply_env(mut self) -> AppResult<Self> {
        if let Ok(v) = std::env::var("VALIDATOR_URL") {
            self.validator_url = v;
        }
        if let Ok(v) = std::env::var("SESSION_TOKEN") {
            self.session_token = v;
        }
        if let Ok(v) = std::env::var("STATUS_MARKER") {
            self.status_marker = v;
        }
        if let Some(v) = parse_env("WINDOW_SIZE", "usize")? {
            self.window_size = v;
        }
        if let Some(v) = parse_env("REQUEST_DELAY_MS", "i64")? {
            self.request_delay_ms = v;
        }
        if let Some(v) = parse_env("WINDOW_PAUSE_MS", "u64")? {
            self.window_pause_ms = v;
        }
        if let Ok(v) = std::env::var("IDENTIFIERS_FILE") {
            self.identifiers_file = v;
        }
        if let Ok(v) = std::env::var("OUTPUT_FILE") {
            self.output_file = v;
        }
        if let Some(v) = parse_env("VERBOSE_LOGGING", "bool")? {
            self.verbose_logging = v;
        }
        if let Some(v) = parse_env("TRANSPORT_ERROR_THRESHOLD", "usize")? {
            self.transport_error_threshold = Some(v);
        }
        if let Ok(v) = std::env::var("GITHUB_TOKEN") {
            self.refresh.github_token = Some(v);
        }
        if let Ok(v) = std::env::var("GITHUB_REPO") {
            self.refresh.github_repo = Some(v);
        }
        if let Ok(v) = std::env::var("REFRESH_WORKFLOW_ID") {
            self.refresh.workflow_id = v;
        }
        if let Ok(v) = std::env::var("REFRESH_GIT_REF") {
            self.refresh.git_ref = v;
        }
        Ok(self)
    }
}

fn parse_env<T: FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
        Err(_) => Ok(None),
    }
}
