use encoding_rs::{Encoding, UTF_8};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use url::Url;

/// 一次请求的完整结果
///
/// 创建后不再修改。`headers` 的键不区分大小写。
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
    /// 跟随重定向之后的最终地址
    pub final_url: Url,
}

impl FetchedResponse {
    pub fn new(status: u16, headers: HeaderMap, body: String, final_url: Url) -> Self {
        FetchedResponse {
            status,
            headers,
            body,
            final_url,
        }
    }

    /// 按 `content-type` 声明的字符集解码原始响应体，未声明或无法识别时回退到 UTF-8
    /// （BOM 检测仍然生效）
    pub fn from_bytes(status: u16, headers: HeaderMap, data: &[u8], final_url: Url) -> Self {
        let (_, charset) = parse_content_type(content_type_of(&headers));
        let encoding = Encoding::for_label(charset.as_bytes()).unwrap_or(UTF_8);
        let (body, _, _) = encoding.decode(data);

        FetchedResponse::new(status, headers, body.into_owned(), final_url)
    }

    /// 原始 `content-type` 头；缺失或含非可见 ASCII 字符时为空串
    pub fn content_type(&self) -> &str {
        content_type_of(&self.headers)
    }
}

fn content_type_of(headers: &HeaderMap) -> &str {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// 将 Content-Type 头拆分为（媒体类型, 字符集）
pub fn parse_content_type(content_type: &str) -> (String, String) {
    let mut parts = content_type.split(';');
    let media_type = parts.next().unwrap_or("").trim().to_lowercase();
    let mut charset = String::new();

    for part in parts {
        let part = part.trim();
        if let Some(value) = part
            .strip_prefix("charset=")
            .or_else(|| part.strip_prefix("CHARSET="))
        {
            charset = value.trim_matches('"').to_string();
        }
    }

    (media_type, charset)
}
