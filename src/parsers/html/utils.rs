/// ASCII 空白字符
pub const WHITESPACES: &[char] = &[' ', '\t', '\n', '\x0c', '\r'];

/// 检查 `rel` 属性是否声明了样式表
///
/// `rel` 是以空白分隔、不区分大小写的关键字列表，
/// 例如 `stylesheet`、`alternate stylesheet`。
pub fn is_stylesheet_link(rel: &str) -> bool {
    rel.split(WHITESPACES)
        .any(|keyword| keyword.eq_ignore_ascii_case("stylesheet"))
}
