//! 窗口处理器 - 编排层
//!
//! ## 职责
//!
//! 处理一个 `BatchWindow`：按顺序逐个会员号执行 fetch → classify → extract，
//! 相邻请求之间插入固定间隔，汇总结果并决定是否触发凭据刷新。
//!
//! ## 状态机
//!
//! ```text
//! PENDING → FETCHING → CLASSIFYING → EXTRACTING → ACCUMULATE ─┐ (下一个会员号)
//!              ↑                                               │
//!              └───────────────────────────────────────────────┘
//!                          CLASSIFYING → UNHEALTHY → ABORTED
//! 全部尝试完毕 → COMPLETE
//! ```
//!
//! ## 设计特点
//!
//! - **严格串行**：对端有频率限制，间隔的先后顺序有意义，不并发
//! - **提前中止**：第一次会话失效后立即停止本窗口，不再消耗请求配额
//! - **续传游标**：`window_end = window_start + 实际尝试数`，调用方按顺序重放窗口

use crate::clients::RefreshAction;
use crate::error::AppResult;
use crate::models::{BatchRequest, BatchResponse, WindowState};
use crate::orchestrator::refresh_gate::RefreshGate;
use crate::utils::logging::{log_window_complete, log_window_start};
use crate::workflow::{MemberCtx, MemberFlow};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, warn};

/// 升级策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EscalationPolicy {
    /// 连续网络错误达到该数量时按会话失效处理；None 表示网络错误从不升级
    pub transport_error_threshold: Option<usize>,
}

/// 窗口状态机
#[derive(Debug)]
pub struct WindowStateMachine {
    state: WindowState,
}

impl WindowStateMachine {
    pub fn new() -> Self {
        Self {
            state: WindowState::Pending,
        }
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    /// 推进状态；非法迁移只记录警告，不改变状态
    pub fn transition(&mut self, next: WindowState) -> bool {
        if !Self::allowed(self.state, next) {
            warn!("非法的窗口状态迁移: {:?} → {:?}", self.state, next);
            return false;
        }
        debug!("窗口状态: {:?} → {:?}", self.state, next);
        self.state = next;
        true
    }

    pub fn allowed(from: WindowState, to: WindowState) -> bool {
        use WindowState::*;
        matches!(
            (from, to),
            (Pending, Fetching)
                | (Pending, Complete)
                | (Fetching, Classifying)
                | (Classifying, Extracting)
                | (Classifying, Unhealthy)
                | (Extracting, Accumulate)
                | (Accumulate, Fetching)
                | (Accumulate, Complete)
                | (Accumulate, Unhealthy)
                | (Unhealthy, Aborted)
        )
    }
}

impl Default for WindowStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// 窗口处理器
pub struct WindowProcessor {
    flow: MemberFlow,
    refresh: Option<Arc<dyn RefreshAction>>,
    policy: EscalationPolicy,
}

impl WindowProcessor {
    pub fn new(
        flow: MemberFlow,
        refresh: Option<Arc<dyn RefreshAction>>,
        policy: EscalationPolicy,
    ) -> Self {
        Self {
            flow,
            refresh,
            policy,
        }
    }

    /// 处理一个窗口
    ///
    /// 只有请求参数非法时返回 Err；单个会员号的失败都记录在结果里。
    pub async fn process(&self, request: &BatchRequest) -> AppResult<BatchResponse> {
        request.validate()?;

        let total = request.identifiers.len();
        let window = request.window();
        let range = window.range(total);
        let delay = request.delay();

        log_window_start(window.start, range.end, total);

        let mut machine = WindowStateMachine::new();
        let mut gate = RefreshGate::new(self.refresh.clone());
        let mut results = Vec::with_capacity(range.len());
        let mut session_unhealthy = false;
        let mut consecutive_transport_errors = 0usize;

        for (offset, position) in range.enumerate() {
            // 间隔只出现在两次请求之间
            if offset > 0 {
                sleep(delay).await;
            }

            let ctx = MemberCtx::new(&request.identifiers[position], position, total);

            machine.transition(WindowState::Fetching);
            let outcome = self.flow.fetch(&ctx).await;

            machine.transition(WindowState::Classifying);
            let verdict = self.flow.classify(&ctx, &outcome);

            if verdict.is_session_unhealthy() {
                machine.transition(WindowState::Unhealthy);
                results.push(self.flow.extract(&ctx, &outcome, &verdict));
                session_unhealthy = true;
                break;
            }

            machine.transition(WindowState::Extracting);
            let field_set = self.flow.extract(&ctx, &outcome, &verdict);

            machine.transition(WindowState::Accumulate);
            results.push(field_set);

            if verdict.is_transport_error() {
                consecutive_transport_errors += 1;
                if self.transport_burst_reached(consecutive_transport_errors) {
                    warn!(
                        "{} 连续 {} 次网络错误，按会话失效处理",
                        ctx, consecutive_transport_errors
                    );
                    machine.transition(WindowState::Unhealthy);
                    session_unhealthy = true;
                    break;
                }
            } else {
                consecutive_transport_errors = 0;
            }
        }

        let escalation_fired = if session_unhealthy {
            gate.escalate().await
        } else {
            false
        };

        machine.transition(if session_unhealthy {
            WindowState::Aborted
        } else {
            WindowState::Complete
        });

        let window_end = window.start + results.len();
        let response = BatchResponse {
            results,
            window_start: window.start,
            window_end,
            total,
            more_remaining: window_end < total,
            escalation_fired,
            session_unhealthy,
            final_state: Some(machine.state()),
        };

        log_window_complete(&response);

        Ok(response)
    }

    fn transport_burst_reached(&self, consecutive: usize) -> bool {
        matches!(self.policy.transport_error_threshold, Some(threshold) if threshold > 0 && consecutive >= threshold)
    }
}
