//! 内容分类器
//!
//! 判断一次获取结果是 CSS 还是 HTML。先对正文做启发式嗅探，
//! 嗅探失败后再回退到 `content-type` 响应头。

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{StyleStatsError, StyleStatsResult};
use crate::network::response::FetchedResponse;

/// 空白与注释（可出现在样式表开头）
static LEADING_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\s+|/\*[\s\S]*?\*/)+").unwrap());

/// 以已知 at-rule 开头
static AT_RULE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^@(?:-[a-z]+-)?(?:charset|import|namespace|media|supports|font-face|keyframes|page|layer|container|counter-style|font-feature-values|property|viewport)\b",
    )
    .unwrap()
});

/// 选择器后紧跟一个空块或以 `属性:` 开头的块
static RULE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^<{}@;]+\{(?:\s+|/\*[\s\S]*?\*/)*(?:\}|-{0,2}[A-Za-z_][\w-]*\s*:)").unwrap()
});

/// 获取结果的内容类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Css,
    Html,
}

/// 判断文本本身是否像 CSS
pub fn looks_like_css(text: &str) -> bool {
    let text = text.trim_start_matches('\u{feff}');
    let text = match LEADING_NOISE.find(text) {
        Some(noise) => &text[noise.end()..],
        None => text,
    };

    if text.starts_with('<') {
        return false;
    }

    AT_RULE_START.is_match(text) || RULE_START.is_match(text)
}

/// 对获取结果分类，两者都不是时返回 `UnsupportedContentType`
pub fn classify(response: &FetchedResponse) -> StyleStatsResult<ContentKind> {
    if looks_like_css(&response.body) {
        return Ok(ContentKind::Css);
    }

    let content_type = response.content_type().to_lowercase();
    if content_type.contains("html") {
        Ok(ContentKind::Html)
    } else if content_type.contains("css") {
        Ok(ContentKind::Css)
    } else {
        Err(StyleStatsError::UnsupportedContentType {
            url: response.final_url.to_string(),
            content_type: response.content_type().to_string(),
        })
    }
}
