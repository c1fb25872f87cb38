//! HTML 样式表提取
//!
//! 从 HTML 文档中找出 `<link rel="stylesheet">` 引用（解析为绝对地址）
//! 和 `<style>` 元素中的内联样式。不递归：样式表里的 `@import` 不会被跟随。

use url::Url;

use super::dom::{find_elements, get_node_attr, get_text_content, html_to_dom};
use super::utils::is_stylesheet_link;
use crate::utils::url::resolve_url;

/// 从一个 HTML 文档中找到的样式来源
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedStyles {
    /// 外链样式表的绝对地址，按文档顺序
    pub links: Vec<Url>,
    /// 每个 `<style>` 元素的文本内容，按文档顺序
    pub styles: Vec<String>,
}

/// 提取 HTML 中的外链样式表与内联样式
///
/// `base_url` 通常是该文档跟随重定向后的最终地址。
pub fn extract_stylesheets(html: &str, base_url: &Url) -> ExtractedStyles {
    let dom = html_to_dom(html);
    let mut extracted = ExtractedStyles::default();

    for link_node in find_elements(&dom.document, "link") {
        let is_stylesheet = get_node_attr(&link_node, "rel")
            .map(|rel| is_stylesheet_link(&rel))
            .unwrap_or(false);
        if !is_stylesheet {
            continue;
        }

        let Some(href) = get_node_attr(&link_node, "href") else {
            tracing::debug!("skipping stylesheet link without href in {}", base_url);
            continue;
        };

        match resolve_url(base_url, &href) {
            Ok(link_url) => extracted.links.push(link_url),
            Err(e) => tracing::warn!("cannot resolve {:?} against {}: {}", href, base_url, e),
        }
    }

    for style_node in find_elements(&dom.document, "style") {
        extracted.styles.push(get_text_content(&style_node));
    }

    tracing::debug!(
        "found {} linked stylesheets and {} style elements in {}",
        extracted.links.len(),
        extracted.styles.len(),
        base_url
    );

    extracted
}
