/// 单个会员号的一次抓取结果
///
/// 由 Fetcher 产生后不再修改，供会话分类器和字段提取器读取。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub identifier: String,
    /// 响应正文（网络错误时为 None）
    pub body: Option<String>,
    /// HTTP 状态码（网络错误时为 None）
    pub status: Option<u16>,
    /// 网络/超时错误描述
    pub transport_error: Option<String>,
}

impl FetchOutcome {
    /// 收到了 HTTP 响应
    pub fn response(identifier: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            body: Some(body.into()),
            status: Some(status),
            transport_error: None,
        }
    }

    /// 请求没有得到任何响应
    pub fn transport_failure(identifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            body: None,
            status: None,
            transport_error: Some(message.into()),
        }
    }
}
