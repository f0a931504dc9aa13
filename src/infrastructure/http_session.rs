//! HTTP 会话 - 基础设施层
//!
//! 持有唯一的 `reqwest::Client`（连接池），只暴露"发请求"的能力

use crate::error::{ApiError, AppResult};
use reqwest::Client;
use std::time::Duration;

/// 每个出站请求的固定超时
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTP 会话
///
/// 职责：
/// - 持有唯一的 Client，clone 只增加引用计数
/// - 统一超时和 User-Agent
/// - 不认识会员号 / 字段
#[derive(Clone)]
pub struct HttpSession {
    client: Client,
}

impl HttpSession {
    /// 使用固定 30 秒超时创建会话
    pub fn new() -> AppResult<Self> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::ClientBuildFailed)?;
        Ok(Self { client })
    }

    /// 直连本机测试服务，忽略环境里的代理设置
    #[cfg(test)]
    pub(crate) fn local() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .user_agent(USER_AGENT)
            .no_proxy()
            .build()
            .expect("local test client");
        Self { client }
    }

    /// 获取 client 的引用
    pub fn client(&self) -> &Client {
        &self.client
    }
}
