//! # 工具模块
//!
//! - `url` - URL 判断与相对地址解析

pub mod url;

// Re-export commonly used items for convenience
pub use self::url::{is_url_and_has_protocol, resolve_url, Url};
