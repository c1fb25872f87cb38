//! # Stylestats Library
//!
//! 从网页、本地文件和样式片段中收集 CSS，合并成一个样式表并统计其结构。
//!
//! ## 模块组织
//!
//! - `core` - 样式来源聚合流水线（两轮抓取、HTML 挖掘、拼接）
//! - `parsers` - 内容分类、HTML 样式提取、CSS 规则解析与统计
//! - `network` - HTTP 会话与响应处理
//! - `utils` - URL 工具函数
//! - `env` - 环境变量配置
//! - `error` - 错误类型

pub mod core;
pub mod env;
pub mod error;
pub mod network;
pub mod parsers;
pub mod utils;

// Re-export commonly used items for convenience
pub use crate::core::*;
pub use crate::error::{StyleStatsError, StyleStatsResult};
pub use crate::network::*;
pub use crate::parsers::*;
pub use crate::utils::*;
