//! 批量校验处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是命令行程序的入口，扮演"调用方"的角色：
//!
//! 1. **应用初始化**：创建 HTTP 会话、门户客户端、刷新客户端
//! 2. **加载会员号**：从文件读取待校验的列表
//! 3. **逐窗口提交**：用上一个窗口返回的 `window_end` 作为下一个窗口的起点
//! 4. **停止条件**：没有剩余，或某个窗口报告会话失效
//! 5. **结果输出**：把全部结果写入 JSON 文件并打印统计
//!
//! 窗口之间不共享状态，刷新网关只在单个窗口内生效。

use crate::clients::{PortalClient, RefreshAction, WorkflowDispatchClient};
use crate::config::Config;
use crate::infrastructure::HttpSession;
use crate::models::{load_identifiers, BatchRequest, FieldSet};
use crate::orchestrator::window_processor::{EscalationPolicy, WindowProcessor};
use crate::services::{ResultWriter, SessionClassifier, ValidationReport};
use crate::utils::logging::{log_identifiers_loaded, log_startup, print_final_stats};
use crate::workflow::MemberFlow;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    processor: WindowProcessor,
    writer: ResultWriter,
}

/// 一次完整运行的汇总
#[derive(Debug, Default)]
pub struct RunSummary {
    pub results: Vec<FieldSet>,
    pub total: usize,
    pub windows: usize,
    pub session_unhealthy: bool,
    pub escalation_fired: bool,
}

impl RunSummary {
    pub fn with_data(&self) -> usize {
        self.results.iter().filter(|r| r.has_data()).count()
    }

    pub fn with_error(&self) -> usize {
        self.results.len() - self.with_data()
    }
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let session = HttpSession::new().context("无法创建 HTTP 会话")?;

        let fetcher = Arc::new(PortalClient::new(
            session.clone(),
            config.validator_url.clone(),
            config.session_token.clone(),
        ));

        let refresh: Option<Arc<dyn RefreshAction>> =
            if config.refresh.github_token.is_some() || config.refresh.github_repo.is_some() {
                Some(Arc::new(WorkflowDispatchClient::new(
                    session,
                    config.refresh.clone(),
                )))
            } else {
                warn!("⚠️ 未配置 GITHUB_TOKEN / GITHUB_REPO，会话失效时不会自动刷新");
                None
            };

        let flow = MemberFlow::new(
            fetcher,
            SessionClassifier::new(config.status_marker.clone()),
            config.verbose_logging,
        );
        let processor = WindowProcessor::new(
            flow,
            refresh,
            EscalationPolicy {
                transport_error_threshold: config.transport_error_threshold,
            },
        );

        Ok(Self::with_processor(config, processor))
    }

    /// 使用已组装好的窗口处理器创建应用
    pub fn with_processor(config: Config, processor: WindowProcessor) -> Self {
        let writer = ResultWriter::with_path(config.output_file.clone());
        Self {
            config,
            processor,
            writer,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunSummary> {
        let identifiers = load_identifiers(Path::new(&self.config.identifiers_file)).await?;

        if identifiers.is_empty() {
            warn!("⚠️ 没有找到待校验的会员号，程序结束");
            return Ok(RunSummary::default());
        }

        log_identifiers_loaded(identifiers.len(), self.config.window_size);

        let summary = self.validate_all(identifiers).await?;

        let report =
            ValidationReport::new(&summary.results, summary.total, summary.session_unhealthy);
        self.writer.write(&report).await?;

        print_final_stats(
            summary.with_data(),
            summary.with_error(),
            summary.total,
            self.writer.path(),
        );

        Ok(summary)
    }

    /// 逐窗口校验整个列表
    pub async fn validate_all(&self, identifiers: Vec<String>) -> Result<RunSummary> {
        let mut request = BatchRequest::new(identifiers, self.config.session_token.clone())
            .with_window(0, self.config.window_size)
            .with_delay_ms(self.config.request_delay_ms);

        let mut summary = RunSummary {
            total: request.identifiers.len(),
            ..Default::default()
        };

        loop {
            let response = self.processor.process(&request).await?;
            summary.windows += 1;
            summary.results.extend(response.results);

            if response.session_unhealthy {
                summary.session_unhealthy = true;
                summary.escalation_fired = response.escalation_fired;
                warn!(
                    "❌ 会话失效，已在第 {} 个会员号处停止，请更新令牌后从该位置继续",
                    response.window_end
                );
                break;
            }

            if !response.more_remaining {
                break;
            }

            request.window_start = response.window_end;
            info!("⏳ 下一个窗口从第 {} 个会员号开始", request.window_start + 1);
            sleep(Duration::from_millis(self.config.window_pause_ms)).await;
        }

        Ok(summary)
    }
}
