use crate::error::RequestError;
use crate::models::field_set::FieldSet;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_WINDOW_SIZE: usize = 10;
pub const DEFAULT_DELAY_MS: i64 = 700;
pub const MAX_DELAY_MS: i64 = 5000;

/// 将请求间隔限制在 [0, 5000] 毫秒
pub fn clamp_delay_ms(ms: i64) -> Duration {
    Duration::from_millis(ms.clamp(0, MAX_DELAY_MS) as u64)
}

/// 批量校验请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    pub identifiers: Vec<String>,
    #[serde(default)]
    pub window_start: usize,
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default = "default_delay_ms")]
    pub inter_request_delay_ms: i64,
    pub session_token: String,
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

fn default_delay_ms() -> i64 {
    DEFAULT_DELAY_MS
}

impl BatchRequest {
    pub fn new(identifiers: Vec<String>, session_token: impl Into<String>) -> Self {
        Self {
            identifiers,
            window_start: 0,
            window_size: DEFAULT_WINDOW_SIZE,
            inter_request_delay_ms: DEFAULT_DELAY_MS,
            session_token: session_token.into(),
        }
    }

    pub fn with_window(mut self, window_start: usize, window_size: usize) -> Self {
        self.window_start = window_start;
        self.window_size = window_size;
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: i64) -> Self {
        self.inter_request_delay_ms = delay_ms;
        self
    }

    /// 在发出任何请求之前检查参数
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.session_token.trim().is_empty() {
            return Err(RequestError::MissingSessionToken);
        }
        if self.identifiers.is_empty() {
            return Err(RequestError::EmptyIdentifiers);
        }
        if self.window_size == 0 {
            return Err(RequestError::InvalidWindowSize {
                size: self.window_size,
            });
        }
        Ok(())
    }

    pub fn window(&self) -> BatchWindow {
        BatchWindow {
            start: self.window_start,
            size: self.window_size,
        }
    }

    pub fn delay(&self) -> Duration {
        clamp_delay_ms(self.inter_request_delay_ms)
    }
}

/// 本次调用要处理的会员号切片
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchWindow {
    pub start: usize,
    pub size: usize,
}

impl BatchWindow {
    /// 窗口在总数为 `total` 的列表上的下标范围（不越界）
    pub fn range(&self, total: usize) -> std::ops::Range<usize> {
        let start = self.start.min(total);
        let end = self.start.saturating_add(self.size).min(total);
        start..end
    }
}

/// 窗口处理的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowState {
    Pending,
    Fetching,
    Classifying,
    Extracting,
    Accumulate,
    Unhealthy,
    /// 窗口内所有会员号都已尝试
    Complete,
    /// 因会话失效提前结束
    Aborted,
}

/// 一次窗口处理的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub results: Vec<FieldSet>,
    pub window_start: usize,
    /// 续传游标：window_start + 实际尝试的数量
    pub window_end: usize,
    pub total: usize,
    pub more_remaining: bool,
    pub escalation_fired: bool,
    pub session_unhealthy: bool,
    #[serde(skip)]
    pub final_state: Option<WindowState>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_is_clamped() {
        assert_eq!(clamp_delay_ms(-5), Duration::ZERO);
        assert_eq!(clamp_delay_ms(700), Duration::from_millis(700));
        assert_eq!(clamp_delay_ms(60_000), Duration::from_millis(5000));
    }

    #[test]
    fn test_request_defaults_from_json() {
        let request: BatchRequest = serde_json::from_str(
            r#"{"identifiers": ["11111111"], "session_token": "abc"}"#,
        )
        .unwrap();
        assert_eq!(request.window_start, 0);
        assert_eq!(request.window_size, 10);
        assert_eq!(request.delay(), Duration::from_millis(700));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_missing_inputs() {
        let no_token = BatchRequest::new(vec!["1".to_string()], "  ");
        assert_eq!(no_token.validate(), Err(RequestError::MissingSessionToken));

        let no_ids = BatchRequest::new(Vec::new(), "abc");
        assert_eq!(no_ids.validate(), Err(RequestError::EmptyIdentifiers));

        let zero = BatchRequest::new(vec!["1".to_string()], "abc").with_window(0, 0);
        assert_eq!(
            zero.validate(),
            Err(RequestError::InvalidWindowSize { size: 0 })
        );
    }

    #[test]
    fn test_window_range_stays_in_bounds() {
        let window = BatchWindow { start: 8, size: 10 };
        assert_eq!(window.range(12), 8..12);
        let past_end = BatchWindow { start: 20, size: 10 };
        assert!(past_end.range(12).is_empty());
    }
}
