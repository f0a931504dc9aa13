//! 基础设施层
//!
//! 持有稀缺资源（HTTP 连接池），只暴露能力

pub mod http_session;

pub use http_session::{HttpSession, REQUEST_TIMEOUT};
