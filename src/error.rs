//! 统一错误处理
//!
//! 样式统计流水线是"全有或全无"的：任何一步失败都会以下面的某个变体返回给调用方。

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 流水线错误类型
#[derive(Error, Debug)]
pub enum StyleStatsError {
    /// 无法连接到目标地址（DNS、连接、TLS、读取响应体等）
    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 响应状态码不是 200
    #[error("status code is {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// 响应既不是 CSS 也不是 HTML
    #[error("content type of {url} is not HTML or CSS: {content_type:?}")]
    UnsupportedContentType { url: String, content_type: String },

    /// 输入组合或参数无效
    #[error("argument is invalid: {0}")]
    InvalidArgument(String),

    /// 聚合后的样式无法解析
    #[error("CSS syntax error at {line}:{column}: {reason}")]
    CssSyntax {
        line: u32,
        column: u32,
        reason: String,
    },

    /// 样式解析成功但没有任何规则
    #[error("rule is not found")]
    EmptyStylesheet,

    /// 本地文件无法读取
    #[error("failed to read {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// 流水线结果类型
pub type StyleStatsResult<T> = Result<T, StyleStatsError>;
