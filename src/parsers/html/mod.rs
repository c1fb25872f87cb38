//! HTML 解析和处理模块
//!
//! - `utils`: 基础工具函数和常量
//! - `dom`: 基础 DOM 解析与查询
//! - `stylesheets`: 样式表引用与内联样式的提取

pub mod dom;
pub mod stylesheets;
pub mod utils;

pub use dom::{find_elements, get_node_attr, get_node_name, get_text_content, html_to_dom};
pub use stylesheets::{extract_stylesheets, ExtractedStyles};
pub use utils::is_stylesheet_link;
