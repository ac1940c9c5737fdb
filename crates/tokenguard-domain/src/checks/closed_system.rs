use super::utils::{base_class, describe_expression, is_class_attribute, static_value};
use crate::registry::Registries;
use crate::rule::{Reporter, Rule, RuleContext};
use serde_json::json;
use tokenguard_syntax::{Element, NodeKind, SyntaxNode};
use tokenguard_types::{Confidence, ids};

/// Consumers may only style regulated components through their typed props.
///
/// - V1: `className` on a regulated component
/// - V2: `style` on a regulated component
/// - V3: utility-classed host element wrapping a regulated component
/// - V4: raw HTML tag while its regulated substitute is imported
/// - V5: untyped spread into a regulated component
pub struct ClosedSystem;

impl Rule for ClosedSystem {
    fn check_id(&self) -> &'static str {
        ids::CHECK_CLOSED_SYSTEM
    }

    fn on_element(
        &self,
        cx: &RuleContext<'_, '_>,
        node: &SyntaxNode,
        element: &Element,
        out: &mut dyn Reporter,
    ) {
        if cx.bindings.is_empty() {
            return;
        }
        if let Some(component) = cx.regulated(element) {
            check_regulated_instance(cx, node, element, component, out);
        } else if element.intrinsic {
            check_utility_wrapper(cx, node, element, out);
            check_raw_html(cx, node, element, out);
        }
    }
}

fn check_regulated_instance(
    cx: &RuleContext<'_, '_>,
    node: &SyntaxNode,
    element: &Element,
    component: &'static str,
    out: &mut dyn Reporter,
) {
    for attr in node.attributes() {
        match &attr.kind {
            NodeKind::Attribute(a) if is_class_attribute(&a.name) => {
                let confidence = match attr.value() {
                    Some(value) if static_value(value, cx.walk).is_some() => Confidence::High,
                    _ => Confidence::Medium,
                };
                out.report(
                    attr,
                    ids::CLASS_V1_CLASS_NAME,
                    json!({ "component": component, "attribute": a.name }),
                    confidence,
                );
            }
            NodeKind::Attribute(a) if a.name == "style" => {
                out.report(
                    attr,
                    ids::CLASS_V2_INLINE_STYLE,
                    json!({ "component": component }),
                    Confidence::High,
                );
            }
            NodeKind::SpreadAttribute => {
                let Some(argument) = attr.value() else {
                    continue;
                };
                let local = element.name.last();
                if let Some(confidence) = spread_confidence(argument, component, local, cx.registries)
                {
                    out.report(
                        attr,
                        ids::CLASS_V5_UNTYPED_SPREAD,
                        json!({
                            "component": component,
                            "expression": describe_expression(argument),
                        }),
                        confidence,
                    );
                }
            }
            _ => {}
        }
    }
}

/// `None` when the spread is acceptable.
fn spread_confidence(
    argument: &SyntaxNode,
    component: &str,
    local: &str,
    registries: &Registries,
) -> Option<Confidence> {
    match &argument.kind {
        NodeKind::ObjectLiteral => None,
        NodeKind::Identifier(name) if is_typed_props_name(name, component, local) => None,
        NodeKind::Identifier(name) if registries.is_generic_spread_name(name) => {
            Some(Confidence::High)
        }
        _ => Some(Confidence::Low),
    }
}

/// `ButtonProps` / `buttonProps` for `Button` (or its local alias).
fn is_typed_props_name(name: &str, component: &str, local: &str) -> bool {
    let Some(stem) = name.strip_suffix("Props") else {
        return false;
    };
    [component, local].iter().any(|candidate| {
        let mut expected = candidate.chars();
        let mut actual = stem.chars();
        match (expected.next(), actual.next()) {
            (Some(e), Some(a)) => {
                e.eq_ignore_ascii_case(&a) && expected.as_str() == actual.as_str()
            }
            _ => false,
        }
    })
}

fn utility_classes<'t>(classes: &'t str, registries: &Registries) -> Vec<&'t str> {
    classes
        .split_whitespace()
        .filter(|token| {
            let base = base_class(token);
            registries.utility_exact.contains(&base)
                || registries
                    .utility_prefixes
                    .iter()
                    .any(|prefix| base.starts_with(prefix))
        })
        .collect()
}

fn check_utility_wrapper(
    cx: &RuleContext<'_, '_>,
    node: &SyntaxNode,
    element: &Element,
    out: &mut dyn Reporter,
) {
    let Some(classes) = node
        .attributes()
        .iter()
        .filter(|attr| attr.attribute_name().is_some_and(is_class_attribute))
        .find_map(|attr| attr.value().and_then(|v| static_value(v, cx.walk)))
    else {
        return;
    };
    let utilities = utility_classes(&classes.text, cx.registries);
    if utilities.is_empty() {
        return;
    }

    let wrapped = node
        .body()
        .iter()
        .flat_map(SyntaxNode::descendants)
        .filter_map(SyntaxNode::element)
        .find_map(|inner| cx.regulated(inner));
    let Some(component) = wrapped else {
        return;
    };

    out.report(
        node,
        ids::CLASS_V3_UTILITY_WRAPPER,
        json!({
            "tag": element.name.display(),
            "component": component,
            "classes": utilities.join(" "),
        }),
        classes.confidence(),
    );
}

fn check_raw_html(
    cx: &RuleContext<'_, '_>,
    node: &SyntaxNode,
    element: &Element,
    out: &mut dyn Reporter,
) {
    let tag = element.name.last();
    let alternatives: Vec<&str> = cx
        .registries
        .substitutes(tag)
        .iter()
        .copied()
        .filter(|alt| cx.bindings.is_bound(alt))
        .collect();
    if alternatives.is_empty() {
        return;
    }
    out.report(
        node,
        ids::CLASS_V4_RAW_HTML,
        json!({ "tag": tag, "alternatives": alternatives.join(" / ") }),
        Confidence::Medium,
    );
}
