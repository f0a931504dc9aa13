//! 会员号处理流程 - 流程层
//!
//! 核心职责：定义"一个会员号"的处理步骤
//!
//! 流程顺序：
//! 1. fetch → 取回结果页
//! 2. classify → 判定会话是否健康
//! 3. extract → 仅在健康时提取字段

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::clients::MemberFetcher;
use crate::models::{FetchOutcome, FieldSet};
use crate::services::{extract_member_record, SessionClassifier, SessionVerdict};
use crate::utils::logging::truncate_text;
use crate::workflow::member_ctx::MemberCtx;

/// 会员号处理流程
///
/// - 不决定何时中止窗口、何时刷新凭据（那是编排层的事）
/// - 每一步单独暴露，编排层据此推进窗口状态
pub struct MemberFlow {
    fetcher: Arc<dyn MemberFetcher>,
    classifier: SessionClassifier,
    verbose_logging: bool,
}

impl MemberFlow {
    pub fn new(
        fetcher: Arc<dyn MemberFetcher>,
        classifier: SessionClassifier,
        verbose_logging: bool,
    ) -> Self {
        Self {
            fetcher,
            classifier,
            verbose_logging,
        }
    }

    /// 发出一次请求
    pub async fn fetch(&self, ctx: &MemberCtx) -> FetchOutcome {
        info!("{} 🔍 正在查询...", ctx);
        let outcome = self.fetcher.fetch(&ctx.identifier).await;

        if self.verbose_logging {
            if let Some(body) = outcome.body.as_deref() {
                debug!("{} 页面预览: {}", ctx, truncate_text(body, 200));
            }
        }

        outcome
    }

    pub fn classify(&self, ctx: &MemberCtx, outcome: &FetchOutcome) -> SessionVerdict {
        let verdict = self.classifier.classify(outcome);
        debug!("{} 会话判定: {}", ctx, verdict);
        verdict
    }

    /// 健康时提取字段，否则只记录判定结果作为错误
    pub fn extract(&self, ctx: &MemberCtx, outcome: &FetchOutcome, verdict: &SessionVerdict) -> FieldSet {
        match verdict {
            SessionVerdict::Healthy => {
                let body = outcome.body.as_deref().unwrap_or_default();
                let field_set = extract_member_record(&ctx.identifier, body);
                match field_set.error.as_deref() {
                    None => info!(
                        "{} ✓ 状态: {} | 等级: {}",
                        ctx,
                        field_set.membership_status.as_deref().unwrap_or("-"),
                        field_set.member_grade.as_deref().unwrap_or("-")
                    ),
                    Some(error) => warn!("{} ⚠️ {}", ctx, error),
                }
                field_set
            }
            SessionVerdict::TransportError(_) => {
                warn!("{} ⚠️ 请求失败（仅影响本会员号）: {}", ctx, verdict);
                FieldSet::failed(&ctx.identifier, verdict.to_string())
            }
            _ => {
                warn!("{} ❌ 会话失效: {}", ctx, verdict);
                FieldSet::failed(&ctx.identifier, verdict.to_string())
            }
        }
    }
}
