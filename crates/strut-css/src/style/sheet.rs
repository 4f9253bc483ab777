//! Default style provider: author `<style>` sheets plus inline `style`
//! attributes over user-agent defaults.
//!
//! [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
//!
//! Deliberately small. Stylesheets are tokenized with `cssparser`; selectors
//! are compounds of type, `#id`, `.class` and `*`, joined by descendant or
//! child combinators. At-rules are skipped. Values are passed through as
//! written.

use cssparser::{
    BasicParseError, Delimiter, ParseError, Parser, ParserInput, ToCss, Token,
};
use strut_common::warning::warn_once;
use strut_dom::{DomTree, ElementData, NodeId};

use super::display::default_display;
use super::property::Side;
use super::provider::StyleProvider;
use super::value::CssValue;

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
///
/// (ids, classes, types), compared component-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
#[derive(Debug, Clone, PartialEq, Eq)]
enum SimpleSelector {
    Type(String),
    Class(String),
    Id(String),
    Universal,
}

impl SimpleSelector {
    fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Type(name) => element.tag_name.eq_ignore_ascii_case(name),
            Self::Class(class) => element.has_class(class),
            Self::Id(id) => element.id() == Some(id.as_str()),
            Self::Universal => true,
        }
    }
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// A compound selector chain, stored subject first.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Selector {
    subject: Vec<SimpleSelector>,
    /// `(combinator, compound)` pairs walking left from the subject.
    ancestors: Vec<(Combinator, Vec<SimpleSelector>)>,
}

impl Selector {
    fn specificity(&self) -> Specificity {
        let mut specificity = Specificity::default();
        let compounds =
            std::iter::once(&self.subject).chain(self.ancestors.iter().map(|(_, c)| c));
        for simple in compounds.flatten() {
            match simple {
                SimpleSelector::Id(_) => specificity.0 += 1,
                SimpleSelector::Class(_) => specificity.1 += 1,
                SimpleSelector::Type(_) => specificity.2 += 1,
                SimpleSelector::Universal => {}
            }
        }
        specificity
    }

    fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        compound_matches(&self.subject, tree, node) && self.ancestors_match(tree, node, 0)
    }

    /// Right-to-left matching with backtracking over descendant combinators.
    fn ancestors_match(&self, tree: &DomTree, node: NodeId, index: usize) -> bool {
        let Some((combinator, compound)) = self.ancestors.get(index) else {
            return true;
        };
        match combinator {
            Combinator::Child => tree.parent(node).is_some_and(|parent| {
                compound_matches(compound, tree, parent)
                    && self.ancestors_match(tree, parent, index + 1)
            }),
            Combinator::Descendant => tree.ancestors(node).any(|ancestor| {
                compound_matches(compound, tree, ancestor)
                    && self.ancestors_match(tree, ancestor, index + 1)
            }),
        }
    }
}

fn compound_matches(compound: &[SimpleSelector], tree: &DomTree, node: NodeId) -> bool {
    tree.as_element(node)
        .is_some_and(|element| compound.iter().all(|simple| simple.matches(element)))
}

/// [§ 3 Declarations](https://www.w3.org/TR/css-syntax-3/#declaration)
///
/// One longhand declaration after shorthand expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased longhand property name.
    pub property: String,
    /// The value as written, without `!important`.
    pub value: String,
    /// Whether the declaration carried `!important`.
    pub important: bool,
}

#[derive(Debug, Clone)]
struct StyleRule {
    selector: Selector,
    specificity: Specificity,
    declarations: Vec<Declaration>,
}

/// [§ 6.4 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
///
/// Importance, then inline-ness, then specificity, then source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Precedence {
    important: bool,
    inline: bool,
    specificity: Specificity,
    order: usize,
}

/// Style provider backed by the document's own CSS.
#[derive(Debug, Clone, Default)]
pub struct DocumentStyles {
    rules: Vec<StyleRule>,
}

impl DocumentStyles {
    /// Collect and parse every `<style>` element of `tree`, in tree order.
    #[must_use]
    pub fn from_document(tree: &DomTree) -> Self {
        let mut styles = Self::default();
        let mut stack = vec![tree.root()];
        while let Some(id) = stack.pop() {
            if tree
                .as_element(id)
                .is_some_and(|el| el.tag_name == "style")
            {
                styles.push_stylesheet(&tree.text_content(id));
            }
            stack.extend(tree.children(id).iter().rev().copied());
        }
        styles
    }

    /// Parse a single stylesheet.
    #[must_use]
    pub fn from_css(css: &str) -> Self {
        let mut styles = Self::default();
        styles.push_stylesheet(css);
        styles
    }

    /// Append a stylesheet; its rules come after any already present.
    pub fn push_stylesheet(&mut self, css: &str) {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        while let Some((prelude, has_block)) = read_prelude(&mut parser) {
            let prelude = prelude.trim();
            if prelude.starts_with('@') {
                warn_once("CSS", &format!("skipping at-rule '{prelude}'"));
                continue;
            }
            if !has_block {
                warn_once("CSS", &format!("ignoring '{prelude};' outside a rule"));
                continue;
            }
            let declarations: Result<Vec<Declaration>, ParseError<'_, ()>> =
                parser.parse_nested_block(|block| Ok(declaration_list(block)));
            let declarations = declarations.unwrap_or_default();
            for text in prelude.split(',') {
                let Some(selector) = parse_selector(text) else {
                    warn_once("CSS", &format!("unsupported selector '{}'", text.trim()));
                    continue;
                };
                self.rules.push(StyleRule {
                    specificity: selector.specificity(),
                    selector,
                    declarations: declarations.clone(),
                });
            }
        }
    }

    /// Number of (selector, declaration block) rules parsed.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// The winning declared value for `property`, if any.
    fn cascaded(&self, tree: &DomTree, node: NodeId, property: &str) -> Option<String> {
        let element = tree.as_element(node)?;
        let inline = element
            .style_attribute()
            .map(parse_declarations)
            .unwrap_or_default();

        let from_rules = self
            .rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.selector.matches(tree, node))
            .flat_map(|(order, rule)| {
                rule.declarations
                    .iter()
                    .filter(move |decl| decl.property == property)
                    .map(move |decl| {
                        let precedence = Precedence {
                            important: decl.important,
                            inline: false,
                            specificity: rule.specificity,
                            order,
                        };
                        (precedence, decl.value.as_str())
                    })
            });
        let from_inline = inline
            .iter()
            .filter(|decl| decl.property == property)
            .map(|decl| {
                let precedence = Precedence {
                    important: decl.important,
                    inline: true,
                    specificity: Specificity::default(),
                    order: usize::MAX,
                };
                (precedence, decl.value.as_str())
            });

        // Later declarations win ties, which `max_by_key` gives us.
        from_rules
            .chain(from_inline)
            .max_by_key(|(precedence, _)| *precedence)
            .map(|(_, value)| value.to_string())
    }
}

impl StyleProvider for DocumentStyles {
    fn computed_value(&self, tree: &DomTree, node: NodeId, property: &str) -> Option<String> {
        let element = tree.as_element(node)?;

        // [§ 8.5.1 Border width](https://www.w3.org/TR/CSS2/box.html#border-width-properties)
        // "Computed value: absolute length; '0' if the border style is 'none'
        // or 'hidden'"
        if let Some(side) = border_width_side(property) {
            let style = self
                .cascaded(tree, node, &format!("border-{side}-style"))
                .unwrap_or_else(|| "none".to_string());
            if matches!(style.to_ascii_lowercase().as_str(), "none" | "hidden") {
                return Some("0px".to_string());
            }
            return Some(
                self.cascaded(tree, node, property)
                    .unwrap_or_else(|| "medium".to_string()),
            );
        }

        self.cascaded(tree, node, property)
            .or_else(|| initial_value(property, element).map(str::to_string))
    }
}

/// User-agent values for the classification properties.
fn initial_value(property: &str, element: &ElementData) -> Option<&'static str> {
    match property {
        "display" => Some(default_display(&element.tag_name)),
        "position" => Some("static"),
        "float" => Some("none"),
        "overflow" => Some("visible"),
        "block-progression" => Some("tb"),
        _ => None,
    }
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Top => "top",
        Side::Right => "right",
        Side::Bottom => "bottom",
        Side::Left => "left",
    }
}

fn border_width_side(property: &str) -> Option<&'static str> {
    Side::ALL
        .into_iter()
        .map(side_name)
        .find(|side| property == format!("border-{side}-width"))
}

/// Parse a declaration block, expanding the box shorthands into longhands.
#[must_use]
pub fn parse_declarations(block: &str) -> Vec<Declaration> {
    let mut input = ParserInput::new(block);
    declaration_list(&mut Parser::new(&mut input))
}

/// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
///
/// A declaration that fails to parse is dropped up to its `;`.
fn declaration_list(parser: &mut Parser<'_, '_>) -> Vec<Declaration> {
    let mut out = Vec::new();
    while !parser.is_exhausted() {
        let parsed: Result<Vec<Declaration>, ParseError<'_, ()>> = parser
            .parse_until_after(Delimiter::Semicolon, |p| declaration(p).map_err(Into::into));
        if let Ok(declarations) = parsed {
            out.extend(declarations);
        }
    }
    out
}

/// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
///
/// The value is the source text between the colon and the end (or a
/// trailing `!important`), so strings and `url(...)` pass through intact.
fn declaration<'i>(parser: &mut Parser<'i, '_>) -> Result<Vec<Declaration>, BasicParseError<'i>> {
    let name = parser.expect_ident()?.to_ascii_lowercase();
    parser.expect_colon()?;

    let start = parser.position();
    let mut end = start;
    let mut bang = false;
    let mut important = false;
    loop {
        let token = parser.next().cloned();
        match token {
            Ok(Token::Delim('!')) => bang = true,
            Ok(Token::Ident(ref ident)) if bang && ident.eq_ignore_ascii_case("important") => {
                important = true;
            }
            Ok(_) => {
                bang = false;
                important = false;
                end = parser.position();
            }
            Err(_) => break,
        }
    }

    let value = parser.slice(start..end).trim();
    if value.is_empty() {
        return Ok(Vec::new());
    }
    Ok(expand_shorthand(&name, value)
        .into_iter()
        .map(|(property, value)| Declaration {
            property,
            value,
            important,
        })
        .collect())
}

/// The tokens before the next `{}` block or `;` as selector text, and
/// whether a block follows. `None` at the end of the stylesheet.
fn read_prelude(parser: &mut Parser<'_, '_>) -> Option<(String, bool)> {
    let mut text = String::new();
    loop {
        let token = parser.next_including_whitespace().cloned();
        match token {
            Ok(Token::CurlyBracketBlock) => return Some((text, true)),
            Ok(Token::Semicolon) => return Some((text, false)),
            Ok(Token::WhiteSpace(_)) => text.push(' '),
            Ok(token) => text.push_str(&token.to_css_string()),
            Err(_) => {
                if !text.trim().is_empty() {
                    warn_once("CSS", &format!("unterminated rule '{}'", text.trim()));
                }
                return None;
            }
        }
    }
}

/// [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
///
/// "If there is only one component value, it applies to all sides. If there
/// are two values, the top and bottom margins are set to the first value and
/// the right and left margins are set to the second. If there are three
/// values, the top is set to the first value, the left and right are set to
/// the second, and the bottom is set to the third. If there are four values,
/// they apply to the top, right, bottom, and left, respectively."
fn four_sides(value: &str) -> Option<[String; 4]> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let [top, right, bottom, left] = match parts.as_slice() {
        [all] => [all, all, all, all],
        [vertical, horizontal] => [vertical, horizontal, vertical, horizontal],
        [top, horizontal, bottom] => [top, horizontal, bottom, horizontal],
        [top, right, bottom, left] => [top, right, bottom, left],
        _ => return None,
    };
    Some([top, right, bottom, left].map(|s| (*s).to_string()))
}

fn expand_shorthand(name: &str, value: &str) -> Vec<(String, String)> {
    let per_side = |format_name: &dyn Fn(&str) -> String| -> Vec<(String, String)> {
        let Some(values) = four_sides(value) else {
            warn_once("CSS", &format!("cannot expand '{name}: {value}'"));
            return Vec::new();
        };
        Side::ALL
            .into_iter()
            .zip(values)
            .map(|(side, v)| (format_name(side_name(side)), v))
            .collect()
    };

    match name {
        "margin" | "padding" => per_side(&|side: &str| format!("{name}-{side}")),
        "border-width" => per_side(&|side: &str| format!("border-{side}-width")),
        "border-style" => per_side(&|side: &str| format!("border-{side}-style")),
        "border-color" => per_side(&|side: &str| format!("border-{side}-color")),
        "border" => Side::ALL
            .into_iter()
            .flat_map(|side| expand_border_side(side_name(side), value))
            .collect(),
        _ => match name.strip_prefix("border-") {
            Some(side) if Side::ALL.into_iter().map(side_name).any(|s| s == side) => {
                expand_border_side(side, value)
            }
            _ => vec![(name.to_string(), value.to_string())],
        },
    }
}

/// [§ 8.5.4 Border shorthand properties](https://www.w3.org/TR/CSS2/box.html#border-shorthand-properties)
///
/// Omitted components reset to their initial values.
fn expand_border_side(side: &str, value: &str) -> Vec<(String, String)> {
    const STYLES: [&str; 10] = [
        "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset",
        "outset",
    ];
    let mut width = "medium".to_string();
    let mut style = "none".to_string();
    let mut color = "currentcolor".to_string();
    for token in value.split_whitespace() {
        if STYLES.iter().any(|s| s.eq_ignore_ascii_case(token)) {
            style = token.to_ascii_lowercase();
        } else if CssValue::new(token).is_length() {
            width = token.to_string();
        } else {
            color = token.to_string();
        }
    }
    vec![
        (format!("border-{side}"), value.to_string()),
        (format!("border-{side}-width"), width),
        (format!("border-{side}-style"), style),
        (format!("border-{side}-color"), color),
    ]
}

/// [§ 4.3.9 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn parse_compound(text: &str) -> Option<Vec<SimpleSelector>> {
    let mut out = Vec::new();
    let mut rest = text;
    if let Some(tail) = rest.strip_prefix('*') {
        out.push(SimpleSelector::Universal);
        rest = tail;
    }
    while !rest.is_empty() {
        let (kind, body) = match rest.chars().next()? {
            '#' => (Some('#'), &rest[1..]),
            '.' => (Some('.'), &rest[1..]),
            c if is_ident_char(c) && out.is_empty() => (None, rest),
            _ => return None,
        };
        let end = body.find(|c| !is_ident_char(c)).unwrap_or(body.len());
        let ident = &body[..end];
        if ident.is_empty() {
            return None;
        }
        out.push(match kind {
            Some('#') => SimpleSelector::Id(ident.to_string()),
            Some(_) => SimpleSelector::Class(ident.to_string()),
            None => SimpleSelector::Type(ident.to_ascii_lowercase()),
        });
        rest = &body[end..];
    }
    (!out.is_empty()).then_some(out)
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
fn parse_selector(text: &str) -> Option<Selector> {
    let spaced = text.replace('>', " > ");
    let mut compounds: Vec<Vec<SimpleSelector>> = Vec::new();
    let mut combinators: Vec<Combinator> = Vec::new();
    let mut pending: Option<Combinator> = None;

    for token in spaced.split_whitespace() {
        if token == ">" {
            if compounds.is_empty() || pending.is_some() {
                return None;
            }
            pending = Some(Combinator::Child);
            continue;
        }
        let compound = parse_compound(token)?;
        if !compounds.is_empty() {
            combinators.push(pending.take().unwrap_or(Combinator::Descendant));
        }
        compounds.push(compound);
    }
    if pending.is_some() {
        return None;
    }

    let subject = compounds.pop()?;
    let ancestors = combinators
        .into_iter()
        .rev()
        .zip(compounds.into_iter().rev())
        .collect();
    Some(Selector { subject, ancestors })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector_specificity() {
        let specificity_of = |s| parse_selector(s).map(|sel| sel.specificity());
        assert_eq!(specificity_of("div"), Some(Specificity(0, 0, 1)));
        assert_eq!(specificity_of("div.note#main"), Some(Specificity(1, 1, 1)));
        assert_eq!(specificity_of("*"), Some(Specificity(0, 0, 0)));
        assert_eq!(specificity_of("ul > li .x"), Some(Specificity(0, 1, 2)));
        assert_eq!(specificity_of("a:hover"), None);
        assert_eq!(specificity_of("h1 + p"), None);
        assert_eq!(specificity_of("> p"), None);
    }

    #[test]
    fn test_shorthand_expansion() {
        let decls = parse_declarations("margin: 1px 2px; padding: 4px 5px 6px");
        let pairs: Vec<(&str, &str)> = decls
            .iter()
            .map(|d| (d.property.as_str(), d.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("margin-top", "1px"),
                ("margin-right", "2px"),
                ("margin-bottom", "1px"),
                ("margin-left", "2px"),
                ("padding-top", "4px"),
                ("padding-right", "5px"),
                ("padding-bottom", "6px"),
                ("padding-left", "5px"),
            ]
        );
    }

    #[test]
    fn test_border_shorthand() {
        let decls = parse_declarations("border-left: 2px dashed red");
        let find = |p: &str| {
            decls
                .iter()
                .find(|d| d.property == p)
                .map(|d| d.value.clone())
        };
        assert_eq!(find("border-left").as_deref(), Some("2px dashed red"));
        assert_eq!(find("border-left-width").as_deref(), Some("2px"));
        assert_eq!(find("border-left-style").as_deref(), Some("dashed"));
        assert_eq!(find("border-left-color").as_deref(), Some("red"));
        assert_eq!(find("border-top-width"), None);
    }

    #[test]
    fn test_important_flag() {
        let decls = parse_declarations("width: 10px !important; height: 5px");
        assert_eq!(decls[0].value, "10px");
        assert!(decls[0].important);
        assert!(!decls[1].important);
    }

    #[test]
    fn test_comments_and_at_rules_are_skipped() {
        let styles = DocumentStyles::from_css(
            "/* x { width: 1px } */ @media print { p { width: 2px } } p { width: 3px }",
        );
        assert_eq!(styles.rule_count(), 1);
    }
}
