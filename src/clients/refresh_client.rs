/// 凭据刷新客户端
///
/// 触发 GitHub Actions 的 workflow_dispatch，由外部 workflow 负责真正刷新 cookie
use crate::config::RefreshConfig;
use crate::error::RefreshError;
use crate::infrastructure::HttpSession;
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

/// 外部凭据刷新动作
#[async_trait]
pub trait RefreshAction: Send + Sync {
    /// 触发一次刷新；任何 2xx 视为成功
    async fn trigger(&self) -> Result<(), RefreshError>;
}

/// workflow_dispatch 客户端
pub struct WorkflowDispatchClient {
    session: HttpSession,
    config: RefreshConfig,
}

impl WorkflowDispatchClient {
    /// 创建新的刷新客户端
    pub fn new(session: HttpSession, config: RefreshConfig) -> Self {
        Self { session, config }
    }

    /// 拼出 dispatch 接口地址，顺带校验配置
    pub fn dispatch_url(&self) -> Result<String, RefreshError> {
        let repo = self
            .config
            .github_repo
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or(RefreshError::NotConfigured { what: "GITHUB_REPO" })?;

        let (owner, name) = match repo.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                (owner, name)
            }
            _ => {
                return Err(RefreshError::InvalidRepo {
                    value: repo.to_string(),
                })
            }
        };

        Ok(format!(
            "{}/repos/{}/{}/actions/workflows/{}/dispatches",
            self.config.api_base_url.trim_end_matches('/'),
            owner,
            name,
            self.config.workflow_id
        ))
    }

    fn token(&self) -> Result<&str, RefreshError> {
        self.config
            .github_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(RefreshError::NotConfigured { what: "GITHUB_TOKEN" })
    }
}

#[async_trait]
impl RefreshAction for WorkflowDispatchClient {
    async fn trigger(&self) -> Result<(), RefreshError> {
        let token = self.token()?;
        let url = self.dispatch_url()?;

        debug!("触发刷新 workflow: {} (ref: {})", url, self.config.git_ref);

        let response = self
            .session
            .client()
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .bearer_auth(token)
            .json(&json!({ "ref": self.config.git_ref }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(RefreshError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
