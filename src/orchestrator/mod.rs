//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `window_processor` - 单个窗口处理器
//! - 严格串行地处理一个窗口内的会员号
//! - 请求之间插入固定间隔
//! - 第一次会话失效即中止，并通过刷新网关触发一次凭据刷新
//!
//! ### `refresh_gate` - 凭据刷新网关
//! - 每个窗口最多触发一次外部刷新动作
//! - 失败只记录，不抛出
//!
//! ### `batch_processor` - 批量处理器（调用方）
//! - 加载会员号列表
//! - 按返回的游标逐窗口提交
//! - 输出结果文件和统计
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理整个列表，多个窗口)
//!     ↓
//! window_processor (处理一个窗口) ── refresh_gate
//!     ↓
//! workflow::MemberFlow (处理单个会员号)
//!     ↓
//! services (能力层：classify / extract / write)
//!     ↓
//! clients + infrastructure (HTTP)
//! ```

pub mod batch_processor;
pub mod refresh_gate;
pub mod window_processor;

// 重新导出主要类型
pub use batch_processor::{App, RunSummary};
pub use refresh_gate::{GateState, RefreshGate};
pub use window_processor::{EscalationPolicy, WindowProcessor, WindowStateMachine};
