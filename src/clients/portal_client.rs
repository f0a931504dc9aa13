/// 会员校验门户客户端
///
/// 每个会员号发一次 POST，不做重试，重试策略属于编排层/调用方
use crate::infrastructure::HttpSession;
use crate::models::FetchOutcome;
use async_trait::async_trait;
use tracing::debug;

/// 会话 cookie 名
pub const SESSION_COOKIE: &str = "PA.Global_Websession";

/// 抓取单个会员号结果页的能力
#[async_trait]
pub trait MemberFetcher: Send + Sync {
    /// 一次请求，永不返回 Err：失败都编码在 `FetchOutcome` 中
    async fn fetch(&self, identifier: &str) -> FetchOutcome;
}

/// 门户客户端
pub struct PortalClient {
    session: HttpSession,
    url: String,
    origin: Option<String>,
    session_token: String,
}

impl PortalClient {
    /// 创建新的门户客户端
    pub fn new(session: HttpSession, url: impl Into<String>, session_token: impl Into<String>) -> Self {
        let url = url.into();
        let origin = origin_of(&url);
        Self {
            session,
            url,
            origin,
            session_token: session_token.into(),
        }
    }

    fn cookie_header(&self) -> String {
        format!("{}={}", SESSION_COOKIE, self.session_token.trim())
    }
}

#[async_trait]
impl MemberFetcher for PortalClient {
    async fn fetch(&self, identifier: &str) -> FetchOutcome {
        let identifier = identifier.trim();
        debug!("请求会员号 {}", identifier);

        let mut request = self
            .session
            .client()
            .post(&self.url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8")
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::REFERER, self.url.as_str())
            .header(reqwest::header::COOKIE, self.cookie_header());
        if let Some(origin) = &self.origin {
            request = request.header(reqwest::header::ORIGIN, origin.as_str());
        }

        let response = request
            .form(&[("customerId", identifier)])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => return FetchOutcome::transport_failure(identifier, describe_transport_error(&e)),
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => {
                debug!("会员号 {} 返回 HTTP {}，正文 {} 字节", identifier, status, body.len());
                FetchOutcome::response(identifier, status, body)
            }
            Err(e) => FetchOutcome::transport_failure(identifier, describe_transport_error(&e)),
        }
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {}", err)
    } else {
        err.to_string()
    }
}

/// URL 的 origin，作为 Origin 头；无法解析或没有 origin 时不发送
fn origin_of(url: &str) -> Option<String> {
    let origin = reqwest::Url::parse(url).ok()?.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::clients::test_server::serve_once;

    #[test]
    fn test_origin_strips_path() {
        assert_eq!(
            origin_of("https://services24.ieee.org/membership-validator.html").as_deref(),
            Some("https://services24.ieee.org")
        );
        assert_eq!(
            origin_of("http://localhost:8080/a/b?x=1").as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(
            origin_of("https://services24.ieee.org:443/x").as_deref(),
            Some("https://services24.ieee.org")
        );
        assert_eq!(origin_of("not a url"), None);
    }

    #[tokio::test]
    async fn test_fetch_posts_form_with_session_cookie() {
        let (base_url, server) = serve_once(200, "<html><body>ok</body></html>").await;
        let url = format!("{}/membership-validator.html", base_url);
        let client = PortalClient::new(HttpSession::local(), url.clone(), "abc123");

        let outcome = client.fetch(" 11111111 ").await;
        let request = server.await.unwrap();

        assert_eq!(request.request_line(), "POST /membership-validator.html HTTP/1.1");
        assert_eq!(request.body, "customerId=11111111");
        assert_eq!(
            request.header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(request.header("cookie"), Some("PA.Global_Websession=abc123"));
        assert_eq!(request.header("origin"), Some(base_url.as_str()));
        assert_eq!(request.header("referer"), Some(url.as_str()));

        assert_eq!(outcome.identifier, "11111111");
        assert_eq!(outcome.status, Some(200));
        assert_eq!(outcome.body.as_deref(), Some("<html><body>ok</body></html>"));
        assert!(outcome.transport_error.is_none());
    }

    #[tokio::test]
    async fn test_error_status_keeps_body_for_classifier() {
        for status in [401u16, 404] {
            let (base_url, server) = serve_once(status, "<html>denied</html>").await;
            let client = PortalClient::new(HttpSession::local(), base_url, "abc123");

            let outcome = client.fetch("11111111").await;
            server.await.unwrap();

            assert_eq!(outcome.status, Some(status));
            assert_eq!(outcome.body.as_deref(), Some("<html>denied</html>"));
            assert!(outcome.transport_error.is_none());
        }
    }

    #[test]
    fn test_cookie_header_uses_session_cookie_name() {
        let client = PortalClient::new(
            HttpSession::new().unwrap(),
            "https://services24.ieee.org/membership-validator.html",
            " token-value \n",
        );
        assert_eq!(client.cookie_header(), "PA.Global_Websession=token-value");
    }

    #[tokio::test]
    async fn test_unreachable_portal_is_transport_failure() {
        // 端口 9 (discard) 上通常没有 HTTP 服务
        let client = PortalClient::new(
            HttpSession::with_timeout(std::time::Duration::from_secs(2)).unwrap(),
            "http://127.0.0.1:9/membership-validator.html",
            "token",
        );
        let outcome = client.fetch(" 11111111 ").await;
        assert_eq!(outcome.identifier, "11111111");
        assert!(outcome.status.is_none());
        assert!(outcome.body.is_none());
        assert!(outcome.transport_error.is_some());
    }

    /// 真实门户，需要有效的 SESSION_TOKEN
    #[tokio::test]
    #[ignore]
    async fn test_fetch_live_portal() {
        let _ = tracing_subscriber::fmt::try_init();
        let config = crate::config::Config::from_env().unwrap();
        let client = PortalClient::new(
            HttpSession::new().unwrap(),
            config.validator_url.clone(),
            config.session_token.clone(),
        );
        let outcome = client.fetch("11111111").await;
        println!("状态: {:?}, 错误: {:?}", outcome.status, outcome.transport_error);
        assert!(outcome.status.is_some() || outcome.transport_error.is_some());
    }
}
