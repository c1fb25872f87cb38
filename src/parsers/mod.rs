//! # 解析器模块
//!
//! 这个模块包含所有用于识别和解析样式来源的功能：
//!
//! - `content` - 判断获取结果是 CSS 还是 HTML
//! - `html` - HTML 文档解析，提取外链样式表与内联样式
//! - `css` - CSS 样式表解析、规则扁平化与统计

pub mod content;
pub mod css;
pub mod html;

// Re-export commonly used items for convenience
pub use content::{classify, looks_like_css, ContentKind};
pub use css::{
    extract_rules, parse_stylesheet, AtRule, BlockItem, CssRule, Declaration, MediaRule,
    RuleStatistics, StyleRule, Stylesheet,
};
pub use html::{extract_stylesheets, ExtractedStyles};
