pub use url::{ParseError, Url};

/// 判断输入是否为带协议的 http(s) 地址
pub fn is_url_and_has_protocol(input: &str) -> bool {
    match Url::parse(input) {
        Ok(parsed_url) => parsed_url.scheme() == "http" || parsed_url.scheme() == "https",
        Err(_) => false,
    }
}

/// 将相对地址解析为绝对地址
///
/// 遵循标准 URL 解析规则：`a.css` 相对于 `https://example.com/dir/page`
/// 得到 `https://example.com/dir/a.css`，协议相对地址继承基准地址的协议。
pub fn resolve_url(from: &Url, to: &str) -> Result<Url, ParseError> {
    from.join(to.trim())
}
