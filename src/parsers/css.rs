//! CSS 解析器模块
//!
//! 此模块把聚合后的样式字符串解析成规则树，并从中统计规则、选择器、声明和媒体查询。
//! 语法解析基于 cssparser 库的 `StyleSheetParser` / `RuleBodyParser`。
//!
//! # 规则树
//!
//! - `CssRule::Style` - 普通样式规则（选择器列表 + 声明块）
//! - `CssRule::Media` - `@media` 分组规则，内部规则会被递归解析
//! - `CssRule::AtRule` - 其它 at-rule（`@keyframes`、`@import`、`@font-face` 等），
//!   只保留原始文本，不参与统计
//!
//! # 扁平化
//!
//! 统计时只取顶层的样式规则，以及 `@media` 内部**一层**的样式规则。
//! 更深层的嵌套（例如 `@supports` 里的规则、`@media` 中再嵌套的 at-rule）会被丢弃。
//!
//! # 使用示例
//!
//! ```rust
//! use stylestats::parsers::css::extract_rules;
//!
//! let statistics = extract_rules("@media screen { .a { color: red; } } .b { color: blue; }").unwrap();
//! assert_eq!(statistics.media_queries, 1);
//! assert_eq!(statistics.selectors, vec![".a", ".b"]);
//! ```

use std::fmt;

use cssparser::{
    AtRuleParser, BasicParseErrorKind, CowRcStr, DeclarationParser, Delimiter, ParseError,
    ParseErrorKind, Parser, ParserInput, ParserState, QualifiedRuleParser, RuleBodyItemParser,
    RuleBodyParser, StyleSheetParser, Token,
};
use serde::Serialize;

use crate::error::{StyleStatsError, StyleStatsResult};

/// 解析后的样式表
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stylesheet {
    pub rules: Vec<CssRule>,
}

/// 规则树节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum CssRule {
    #[serde(rename = "rule")]
    Style(StyleRule),
    #[serde(rename = "media")]
    Media(MediaRule),
    #[serde(rename = "at-rule")]
    AtRule(AtRule),
}

/// 普通样式规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleRule {
    /// 以顶层逗号拆分后的选择器，保持声明顺序
    pub selectors: Vec<String>,
    /// 声明与注释，按源码顺序
    pub declarations: Vec<BlockItem>,
    /// 规则起始行（从 1 开始）
    pub line: u32,
    pub column: u32,
}

impl StyleRule {
    /// 只返回真正的声明，跳过注释
    pub fn iter_declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter_map(|item| match item {
            BlockItem::Declaration(declaration) => Some(declaration),
            BlockItem::Comment { .. } => None,
        })
    }
}

/// `@media` 分组规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaRule {
    /// 媒体查询条件，例如 `screen and (max-width: 600px)`
    pub media: String,
    pub rules: Vec<CssRule>,
}

/// 其它 at-rule，原样保留
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtRule {
    pub name: String,
    pub prelude: String,
    /// 块内容（不含花括号）；`@import ...;` 这类无块规则为 `None`
    pub block: Option<String>,
}

/// 声明块中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockItem {
    Declaration(Declaration),
    Comment { comment: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// 扁平化后的统计结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleStatistics {
    pub rules: Vec<StyleRule>,
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
    pub media_queries: usize,
}

/// 解析出错的具体原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssParseError {
    EmptySelector,
    EmptyValue(String),
}

impl fmt::Display for CssParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CssParseError::EmptySelector => write!(f, "selector is missing"),
            CssParseError::EmptyValue(property) => write!(f, "value of {property} is missing"),
        }
    }
}

/// 将样式字符串解析为规则树
///
/// 顶层任何无法恢复的规则都会导致 `CssSyntax` 错误；声明块中的无效声明
/// （例如 `*zoom: 1` 这类浏览器 hack）则被跳过。
pub fn parse_stylesheet(css: &str) -> StyleStatsResult<Stylesheet> {
    let css = css.trim_start_matches('\u{feff}');
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);

    let mut rules: Vec<CssRule> = parse_leading_charset(&mut parser).into_iter().collect();
    let rest = parse_rule_list(&mut parser).map_err(|error| {
        let syntax_error = StyleStatsError::CssSyntax {
            line: error.location.line + 1,
            column: error.location.column,
            reason: describe_error(&error.kind),
        };
        tracing::debug!("{}", syntax_error);
        syntax_error
    })?;
    rules.extend(rest);

    Ok(Stylesheet { rules })
}

/// 解析样式字符串并统计规则、选择器、声明与媒体查询
pub fn extract_rules(css: &str) -> StyleStatsResult<RuleStatistics> {
    let stylesheet = parse_stylesheet(css)?;
    if stylesheet.rules.is_empty() {
        return Err(StyleStatsError::EmptyStylesheet);
    }

    let mut statistics = RuleStatistics::default();

    for rule in stylesheet.rules {
        match rule {
            CssRule::Style(style_rule) => statistics.rules.push(style_rule),
            CssRule::Media(media_rule) => {
                statistics.media_queries += 1;
                statistics
                    .rules
                    .extend(media_rule.rules.into_iter().filter_map(|child| match child {
                        CssRule::Style(style_rule) => Some(style_rule),
                        CssRule::Media(_) | CssRule::AtRule(_) => None,
                    }));
            }
            CssRule::AtRule(_) => {}
        }
    }

    for rule in &statistics.rules {
        statistics.selectors.extend(rule.selectors.iter().cloned());
        statistics
            .declarations
            .extend(rule.iter_declarations().cloned());
    }

    Ok(statistics)
}

fn describe_error(kind: &ParseErrorKind<'_, CssParseError>) -> String {
    match kind {
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            format!("unexpected token {token:?}")
        }
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            "unexpected end of input".to_string()
        }
        ParseErrorKind::Basic(BasicParseErrorKind::QualifiedRuleInvalid) => {
            "missing '{' after selector".to_string()
        }
        ParseErrorKind::Basic(other) => format!("{other:?}"),
        ParseErrorKind::Custom(custom) => custom.to_string(),
    }
}

/// 解析规则列表（样式表顶层或 `@media` 块内部）
fn parse_rule_list<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<Vec<CssRule>, ParseError<'i, CssParseError>> {
    let mut rule_parser = RuleListParser;
    let mut rules = Vec::new();

    for result in StyleSheetParser::new(input, &mut rule_parser) {
        match result {
            Ok(rule) => rules.push(rule),
            Err((error, _)) => return Err(error),
        }
    }

    Ok(rules)
}

/// `StyleSheetParser` 会静默丢弃开头的 `@charset`，这里先把它取出来
fn parse_leading_charset<'i>(input: &mut Parser<'i, '_>) -> Option<CssRule> {
    let start = input.state();
    let is_charset = matches!(
        input.next(),
        Ok(Token::AtKeyword(name)) if name.eq_ignore_ascii_case("charset")
    );
    if !is_charset {
        input.reset(&start);
        return None;
    }

    let prelude = input
        .parse_until_after(Delimiter::Semicolon, |input| {
            Ok::<_, ParseError<'i, CssParseError>>(consume_raw(input).to_string())
        })
        .ok()?;

    Some(CssRule::AtRule(AtRule {
        name: "charset".to_string(),
        prelude,
        block: None,
    }))
}

/// 消费剩余的所有 token，返回对应的原始文本
fn consume_raw<'i>(input: &mut Parser<'i, '_>) -> &'i str {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start).trim()
}

/// 消费剩余的所有 token，返回去掉注释后的文本
///
/// 嵌套块（函数参数、`[...]` 等）会被递归展开，块内的注释同样被去掉。
/// 不成对的右括号以及无效字符串、无效 `url()` 都视为语法错误。
fn consume_stripped<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<String, ParseError<'i, CssParseError>> {
    let mut text = String::new();
    collect_tokens(input, &mut text)?;
    Ok(text.trim().to_string())
}

fn collect_tokens<'i>(
    input: &mut Parser<'i, '_>,
    text: &mut String,
) -> Result<(), ParseError<'i, CssParseError>> {
    loop {
        let token_start = input.position();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(()),
        };

        match token {
            Token::Comment(_) => {}
            // 去掉注释后相邻的空白只保留一段
            Token::WhiteSpace(_) => {
                if !text.ends_with(|c: char| c.is_ascii_whitespace()) {
                    text.push_str(input.slice_from(token_start));
                }
            }
            Token::Function(_)
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::CurlyBracketBlock => {
                text.push_str(input.slice_from(token_start));
                let content_end = input.parse_nested_block(|nested| {
                    collect_tokens(nested, text).map(|()| nested.position())
                })?;
                text.push_str(input.slice_from(content_end));
            }
            Token::CloseCurlyBracket
            | Token::CloseParenthesis
            | Token::CloseSquareBracket
            | Token::BadString(_)
            | Token::BadUrl(_) => return Err(input.new_unexpected_token_error(token)),
            _ => text.push_str(input.slice_from(token_start)),
        }
    }
}

/// 按顶层逗号拆分选择器列表
fn parse_selector_list<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<Vec<String>, ParseError<'i, CssParseError>> {
    input.parse_comma_separated(|input| {
        let selector = consume_stripped(input)?;
        if selector.is_empty() {
            return Err(input.new_custom_error(CssParseError::EmptySelector));
        }
        Ok(selector)
    })
}

/// 解析声明块，注释按源码位置合并回去
fn parse_rule_body(input: &mut Parser<'_, '_>) -> Vec<BlockItem> {
    let block_start = input.state();
    let mut comments: Vec<(usize, String)> = Vec::new();
    loop {
        let offset = input.position().byte_index();
        match input.next_including_whitespace_and_comments() {
            Ok(&Token::Comment(text)) => comments.push((offset, text.trim().to_string())),
            Ok(_) => {}
            Err(_) => break,
        }
    }
    input.reset(&block_start);

    let mut body_parser = RuleBodyItems;
    let mut items: Vec<PositionedItem> = Vec::new();
    for result in RuleBodyParser::new(input, &mut body_parser) {
        match result {
            Ok(item) => items.push(item),
            Err((error, slice)) => {
                tracing::debug!("skipping invalid declaration {:?}: {:?}", slice.trim(), error.kind)
            }
        }
    }

    // 声明值内部的注释属于声明本身
    comments.retain(|(offset, _)| {
        !items
            .iter()
            .any(|item| item.start <= *offset && *offset < item.end)
    });
    items.extend(comments.into_iter().map(|(offset, comment)| PositionedItem {
        start: offset,
        end: offset,
        item: BlockItem::Comment { comment },
    }));
    items.sort_by_key(|item| item.start);

    items.into_iter().map(|item| item.item).collect()
}

struct AtRulePrelude {
    name: String,
    prelude: String,
}

/// 规则列表解析器：样式规则、`@media` 与其它 at-rule
struct RuleListParser;

impl<'i> QualifiedRuleParser<'i> for RuleListParser {
    type Prelude = Vec<String>;
    type QualifiedRule = CssRule;
    type Error = CssParseError;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Vec<String>, ParseError<'i, CssParseError>> {
        parse_selector_list(input)
    }

    fn parse_block<'t>(
        &mut self,
        selectors: Vec<String>,
        start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<CssRule, ParseError<'i, CssParseError>> {
        let location = start.source_location();
        Ok(CssRule::Style(StyleRule {
            selectors,
            declarations: parse_rule_body(input),
            line: location.line + 1,
            column: location.column,
        }))
    }
}

impl<'i> AtRuleParser<'i> for RuleListParser {
    type Prelude = AtRulePrelude;
    type AtRule = CssRule;
    type Error = CssParseError;

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<AtRulePrelude, ParseError<'i, CssParseError>> {
        Ok(AtRulePrelude {
            name: name.to_string(),
            prelude: consume_raw(input).to_string(),
        })
    }

    fn rule_without_block(
        &mut self,
        prelude: AtRulePrelude,
        _start: &ParserState,
    ) -> Result<CssRule, ()> {
        Ok(CssRule::AtRule(AtRule {
            name: prelude.name,
            prelude: prelude.prelude,
            block: None,
        }))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: AtRulePrelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<CssRule, ParseError<'i, CssParseError>> {
        if prelude.name.eq_ignore_ascii_case("media") {
            let rules = parse_rule_list(input)?;
            return Ok(CssRule::Media(MediaRule {
                media: prelude.prelude,
                rules,
            }));
        }

        Ok(CssRule::AtRule(AtRule {
            name: prelude.name,
            prelude: prelude.prelude,
            block: Some(consume_raw(input).to_string()),
        }))
    }
}

struct PositionedItem {
    start: usize,
    end: usize,
    item: BlockItem,
}

/// 声明块解析器：只接受声明，嵌套规则与 at-rule 视为无效项
struct RuleBodyItems;

impl<'i> DeclarationParser<'i> for RuleBodyItems {
    type Declaration = PositionedItem;
    type Error = CssParseError;

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        declaration_start: &ParserState,
    ) -> Result<PositionedItem, ParseError<'i, CssParseError>> {
        let value = consume_stripped(input)?;
        if value.is_empty() {
            return Err(input.new_custom_error(CssParseError::EmptyValue(name.to_string())));
        }

        Ok(PositionedItem {
            start: declaration_start.position().byte_index(),
            end: input.position().byte_index(),
            item: BlockItem::Declaration(Declaration {
                property: name.to_string(),
                value,
            }),
        })
    }
}

impl<'i> AtRuleParser<'i> for RuleBodyItems {
    type Prelude = ();
    type AtRule = PositionedItem;
    type Error = CssParseError;
}

impl<'i> QualifiedRuleParser<'i> for RuleBodyItems {
    type Prelude = ();
    type QualifiedRule = PositionedItem;
    type Error = CssParseError;
}

impl<'i> RuleBodyItemParser<'i, PositionedItem, CssParseError> for RuleBodyItems {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}
