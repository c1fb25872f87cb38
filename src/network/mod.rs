//! # 网络模块
//!
//! 这个模块负责样式来源的网络获取：
//!
//! - `session` - HTTP 会话与单次请求
//! - `response` - 获取结果及其内容类型、字符集处理

pub mod response;
pub mod session;

// Re-export commonly used items for convenience
pub use response::{parse_content_type, FetchedResponse};
pub use session::{RequestOptions, Session};
