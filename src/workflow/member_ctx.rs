//! 会员号处理上下文
//!
//! 封装"我正在处理列表中的第几个会员号"这一信息

use std::fmt::Display;

/// 会员号处理上下文
#[derive(Debug, Clone)]
pub struct MemberCtx {
    /// 去掉首尾空白后的会员号（或邮箱）
    pub identifier: String,

    /// 在整个列表中的位置（从0开始）
    pub position: usize,

    /// 列表总数（仅用于日志显示）
    pub total: usize,
}

impl MemberCtx {
    /// 创建新的会员号上下文
    pub fn new(identifier: &str, position: usize, total: usize) -> Self {
        Self {
            identifier: identifier.trim().to_string(),
            position,
            total,
        }
    }
}

impl Display for MemberCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[会员号 {}/{} #{}]",
            self.position + 1,
            self.total,
            self.identifier
        )
    }
}
