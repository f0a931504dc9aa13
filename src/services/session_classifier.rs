//! 会话健康分类 - 业务能力层
//!
//! 区分"这个会员号没有数据"和"整个会话已经失效"

use crate::models::FetchOutcome;
use std::fmt;

/// 会话过期的判定依据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryReason {
    /// HTTP 401
    Unauthorized,
    /// 2xx 但页面没有状态区块标记
    MarkerMissing,
}

/// 一次抓取的会话健康判定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionVerdict {
    Healthy,
    Expired(ExpiryReason),
    Forbidden,
    /// 404：接口未开通
    NotInitialized,
    /// 只影响当前会员号
    TransportError(String),
}

impl SessionVerdict {
    /// 过期 / 禁止 / 未开通 会导致窗口中止并触发刷新
    pub fn is_session_unhealthy(&self) -> bool {
        matches!(
            self,
            SessionVerdict::Expired(_) | SessionVerdict::Forbidden | SessionVerdict::NotInitialized
        )
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(self, SessionVerdict::TransportError(_))
    }
}

impl fmt::Display for SessionVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionVerdict::Healthy => write!(f, "healthy"),
            SessionVerdict::Expired(ExpiryReason::Unauthorized) => write!(f, "session expired"),
            SessionVerdict::Expired(ExpiryReason::MarkerMissing) => {
                write!(f, "session expired: status section not found")
            }
            SessionVerdict::Forbidden => write!(f, "session forbidden"),
            SessionVerdict::NotInitialized => write!(f, "endpoint not provisioned"),
            SessionVerdict::TransportError(message) => write!(f, "transport error: {}", message),
        }
    }
}

/// 会话健康分类器
pub struct SessionClassifier {
    status_marker: String,
}

impl SessionClassifier {
    /// `status_marker`：健康结果页中一定出现的状态区块文字
    pub fn new(status_marker: impl Into<String>) -> Self {
        Self {
            status_marker: status_marker.into(),
        }
    }

    pub fn classify(&self, outcome: &FetchOutcome) -> SessionVerdict {
        let status = match outcome.status {
            Some(status) => status,
            None => {
                let message = outcome
                    .transport_error
                    .clone()
                    .unwrap_or_else(|| "no response".to_string());
                return SessionVerdict::TransportError(message);
            }
        };

        match status {
            404 => SessionVerdict::NotInitialized,
            401 => SessionVerdict::Expired(ExpiryReason::Unauthorized),
            403 => SessionVerdict::Forbidden,
            200..=299 => {
                let body = outcome.body.as_deref().unwrap_or_default();
                if body.contains(&self.status_marker) {
                    SessionVerdict::Healthy
                } else {
                    SessionVerdict::Expired(ExpiryReason::MarkerMissing)
                }
            }
            other => SessionVerdict::TransportError(format!("HTTP status {}", other)),
        }
    }
}
