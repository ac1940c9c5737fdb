use super::utils::{StaticValue, base_class, static_value};
use crate::registry::Registries;
use crate::rule::{Reporter, Rule, RuleContext};
use serde_json::json;
use tokenguard_syntax::{Element, NodeKind, Property, SyntaxNode, Template, WalkContext};
use tokenguard_types::{Confidence, ids};

/// Line-heights come from tokens, and roles use their canonical token.
pub struct Rhythm;

const CONTEXT_OBJECT_PROPERTY: &str = "object property";
const CONTEXT_CSS_BLOCK: &str = "CSS block";

fn is_line_height_key(key: &str) -> bool {
    key == "lineHeight" || key == "line-height"
}

/// `var(--line-height-*)`, `var(--leading-*)`, `leading-*` or a bare token name.
fn is_token_reference(value: &str, registries: &Registries) -> bool {
    let value = value.trim();
    value.starts_with("var(--line-height-")
        || value.starts_with("var(--leading-")
        || base_class(value).starts_with("leading-")
        || registries.is_line_height_token(value)
}

/// Token name carried by a line-height value, or the raw text.
fn token_name(value: &str) -> String {
    let value = value.trim();
    for prefix in ["var(--line-height-", "var(--leading-"] {
        if let Some(rest) = value.strip_prefix(prefix) {
            return rest.trim_end_matches(')').trim().to_string();
        }
    }
    if let Some(rest) = base_class(value).strip_prefix("leading-") {
        return rest.to_string();
    }
    value.to_string()
}

/// Raw line-height text of a value node, if it is one.
fn raw_value(
    node: &SyntaxNode,
    walk: &WalkContext<'_>,
    registries: &Registries,
) -> Option<StaticValue> {
    let value = match &node.kind {
        NodeKind::Number(text) => StaticValue {
            text: text.clone(),
            resolved: false,
        },
        _ => static_value(node, walk)?,
    };
    if is_token_reference(&value.text, registries) || !registries.is_raw_line_height(&value.text)
    {
        return None;
    }
    Some(value)
}

/// Token extracted from a line-height value; `None` when unresolvable.
fn line_height_token(node: &SyntaxNode, walk: &WalkContext<'_>) -> Option<StaticValue> {
    match &node.kind {
        NodeKind::MemberPath(segments) => segments.last().map(|last| StaticValue {
            text: last.clone(),
            resolved: false,
        }),
        NodeKind::Number(text) => Some(StaticValue {
            text: text.clone(),
            resolved: false,
        }),
        _ => static_value(node, walk).map(|value| StaticValue {
            text: token_name(&value.text),
            resolved: value.resolved,
        }),
    }
}

fn combined_confidence(a: &StaticValue, b: &StaticValue) -> Confidence {
    if a.resolved || b.resolved {
        Confidence::Medium
    } else {
        Confidence::High
    }
}

fn report_mismatch(
    node: &SyntaxNode,
    role: &'static str,
    role_value: &StaticValue,
    value_node: &SyntaxNode,
    walk: &WalkContext<'_>,
    registries: &Registries,
    out: &mut dyn Reporter,
) {
    let Some(expected) = registries.canonical_line_height(role) else {
        return;
    };
    let Some(token) = line_height_token(value_node, walk) else {
        return;
    };
    if token.text == expected {
        return;
    }
    out.report(
        node,
        ids::CLASS_ROLE_LINE_HEIGHT_MISMATCH,
        json!({ "role": role, "expected": expected, "value": token.text }),
        combined_confidence(role_value, &token),
    );
}

/// Element owning the `style={{ ... }}` object the current property sits in.
fn style_owner<'a>(walk: &WalkContext<'a>) -> Option<&'a SyntaxNode> {
    let mut ancestors = walk.ancestors();
    let object = ancestors.next()?;
    let attribute = ancestors.next()?;
    let element = ancestors.next()?;
    let is_style = matches!(object.kind, NodeKind::ObjectLiteral)
        && attribute.attribute_name() == Some("style");
    (is_style && element.element().is_some()).then_some(element)
}

fn role_of(
    node: &SyntaxNode,
    walk: &WalkContext<'_>,
    registries: &Registries,
) -> Option<(&'static str, StaticValue)> {
    let value = static_value(node, walk)?;
    let role = registries.role(&value.text)?;
    Some((role, value))
}

impl Rhythm {
    fn css_text(&self, cx: &RuleContext<'_, '_>, node: &SyntaxNode, text: &str, out: &mut dyn Reporter) {
        for value in cx.registries.css_line_heights(text) {
            if is_token_reference(&value, cx.registries) || !cx.registries.is_raw_line_height(&value)
            {
                continue;
            }
            out.report(
                node,
                ids::CLASS_RAW_LINE_HEIGHT,
                json!({ "value": value, "context": CONTEXT_CSS_BLOCK }),
                Confidence::High,
            );
        }
    }
}

impl Rule for Rhythm {
    fn check_id(&self) -> &'static str {
        ids::CHECK_TOKENS_RHYTHM
    }

    fn on_string(
        &self,
        cx: &RuleContext<'_, '_>,
        node: &SyntaxNode,
        value: &str,
        out: &mut dyn Reporter,
    ) {
        self.css_text(cx, node, value, out);
    }

    fn on_template(
        &self,
        cx: &RuleContext<'_, '_>,
        node: &SyntaxNode,
        template: &Template,
        out: &mut dyn Reporter,
    ) {
        self.css_text(cx, node, &template.joined(), out);
    }

    fn on_property(
        &self,
        cx: &RuleContext<'_, '_>,
        node: &SyntaxNode,
        property: &Property,
        out: &mut dyn Reporter,
    ) {
        if !is_line_height_key(&property.key) {
            return;
        }
        let Some(value_node) = node.value() else {
            return;
        };
        let style_element = style_owner(cx.walk);

        if let Some(raw) = raw_value(value_node, cx.walk, cx.registries) {
            match style_element.and_then(SyntaxNode::element) {
                Some(element) => out.report(
                    node,
                    ids::CLASS_INLINE_LINE_HEIGHT,
                    json!({ "value": raw.text, "component": element.name.display() }),
                    raw.confidence(),
                ),
                None => out.report(
                    node,
                    ids::CLASS_RAW_LINE_HEIGHT,
                    json!({ "value": raw.text, "context": CONTEXT_OBJECT_PROPERTY }),
                    raw.confidence(),
                ),
            }
        }

        // Style objects are checked against their element's role instead.
        if style_element.is_some() {
            return;
        }
        let Some(object) = cx.walk.parent() else {
            return;
        };
        let role = object
            .properties()
            .filter(|(key, _)| *key == "typographyRole" || *key == "role")
            .find_map(|(_, prop)| {
                prop.value()
                    .and_then(|v| role_of(v, cx.walk, cx.registries))
            });
        if let Some((role, role_value)) = role {
            report_mismatch(
                node,
                role,
                &role_value,
                value_node,
                cx.walk,
                cx.registries,
                out,
            );
        }
    }

    fn on_element(
        &self,
        cx: &RuleContext<'_, '_>,
        node: &SyntaxNode,
        _element: &Element,
        out: &mut dyn Reporter,
    ) {
        let Some((role, role_value)) = node
            .find_attribute("typographyRole")
            .and_then(SyntaxNode::value)
            .and_then(|v| role_of(v, cx.walk, cx.registries))
        else {
            return;
        };

        if let Some(attr) = node.find_attribute("lineHeight")
            && let Some(value) = attr.value()
        {
            report_mismatch(attr, role, &role_value, value, cx.walk, cx.registries, out);
        }

        let style = node.find_attribute("style").and_then(SyntaxNode::value);
        if let Some(style) = style {
            for (key, prop) in style.properties() {
                if !is_line_height_key(key) {
                    continue;
                }
                if let Some(value) = prop.value() {
                    report_mismatch(prop, role, &role_value, value, cx.walk, cx.registries, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_names_are_extracted() {
        assert_eq!(token_name("var(--line-height-relaxed)"), "relaxed");
        assert_eq!(token_name("var(--leading-tight)"), "tight");
        assert_eq!(token_name("md:leading-snug"), "snug");
        assert_eq!(token_name(" normal "), "normal");
        assert_eq!(token_name("24px"), "24px");
    }

    #[test]
    fn token_references_are_exempt() {
        let reg = Registries::standard();
        assert!(is_token_reference("var(--line-height-body)", &reg));
        assert!(is_token_reference("leading-6", &reg));
        assert!(is_token_reference("relaxed", &reg));
        assert!(!is_token_reference("1.5", &reg));
    }
}
