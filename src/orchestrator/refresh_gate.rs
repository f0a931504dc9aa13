//! 凭据刷新网关 - 编排层
//!
//! 一个窗口内最多调用一次外部刷新动作，无论有多少个会员号判定为会话失效。
//! 网关只属于一次窗口处理，不跨调用保存状态。

use crate::clients::RefreshAction;
use std::sync::Arc;
use tracing::{info, warn};

/// 网关状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// 尚未触发
    Idle,
    /// 已成功触发
    Fired,
    /// 已尝试但失败（或未配置），本窗口不再尝试
    Failed,
}

/// 单次窗口内的刷新网关
pub struct RefreshGate {
    action: Option<Arc<dyn RefreshAction>>,
    state: GateState,
}

impl RefreshGate {
    pub fn new(action: Option<Arc<dyn RefreshAction>>) -> Self {
        Self {
            action,
            state: GateState::Idle,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// 是否已经成功触发
    pub fn fired(&self) -> bool {
        self.state == GateState::Fired
    }

    /// 请求一次刷新；只有第一次调用会真正触发外部动作
    ///
    /// 失败只记录日志，不向上抛出。返回本窗口内是否已成功触发。
    pub async fn escalate(&mut self) -> bool {
        if self.state != GateState::Idle {
            return self.fired();
        }

        let action = match &self.action {
            Some(action) => action,
            None => {
                warn!("⚠️ 会话失效，但未配置凭据刷新动作");
                self.state = GateState::Failed;
                return false;
            }
        };

        info!("🔄 会话失效，触发凭据刷新...");
        match action.trigger().await {
            Ok(()) => {
                info!("✓ 凭据刷新已触发");
                self.state = GateState::Fired;
            }
            Err(e) => {
                warn!("⚠️ 凭据刷新触发失败: {}", e);
                self.state = GateState::Failed;
            }
        }

        self.fired()
    }
}
