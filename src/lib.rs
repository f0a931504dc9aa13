//! # Membership Validator
//!
//! 批量校验会员记录的 Rust 应用程序：逐个会员号向门户提交查询，
//! 从返回的 HTML 结果页中提取固定的几个字段。
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP 连接池），只暴露能力
//! - `HttpSession` - 唯一的 client owner，统一 30 秒超时
//!
//! ### ② 客户端与业务能力层（Clients / Services）
//! - `clients/` - `PortalClient`（抓取结果页）、`WorkflowDispatchClient`（触发凭据刷新）
//! - `services/` - 描述"我能做什么"，只处理单个页面
//! - `SessionClassifier` - 判定会话是否仍然有效
//! - `field_extractor` / `society_extractor` - 标签锚点 + 取值策略链
//! - `ResultWriter` - 写结果文件
//!
//! ### ③ 流程层（Workflow）
//! - `MemberFlow` - 一个会员号的流程（fetch → classify → extract）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/window_processor` - 一个窗口的串行处理、限速、提前中止
//! - `orchestrator/refresh_gate` - 每窗口最多一次的凭据刷新
//! - `orchestrator/batch_processor` - 命令行的多窗口调用方
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{MemberFetcher, PortalClient, RefreshAction, WorkflowDispatchClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::HttpSession;
pub use models::{BatchRequest, BatchResponse, BatchWindow, FetchOutcome, FieldSet};
pub use orchestrator::{App, EscalationPolicy, RefreshGate, WindowProcessor};
pub use services::{SessionClassifier, SessionVerdict};
pub use workflow::{MemberCtx, MemberFlow};
