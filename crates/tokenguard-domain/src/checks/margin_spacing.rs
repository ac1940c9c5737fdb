use super::utils::{base_class, is_class_attribute, static_value};
use crate::registry::Registries;
use crate::rule::{Reporter, Rule, RuleContext};
use serde_json::json;
use tokenguard_syntax::{Element, NodeKind, SyntaxNode};
use tokenguard_types::{Confidence, RepoPath, ids};

/// Typography components must not carry vertical margin.
pub struct MarginSpacing;

impl Rule for MarginSpacing {
    fn check_id(&self) -> &'static str {
        ids::CHECK_TOKENS_MARGIN_SPACING
    }

    fn applies_to(&self, path: &RepoPath) -> bool {
        !path.is_story_or_test()
    }

    fn on_element(
        &self,
        cx: &RuleContext<'_, '_>,
        node: &SyntaxNode,
        element: &Element,
        out: &mut dyn Reporter,
    ) {
        if !cx.registries.is_typography(element.name.last()) {
            return;
        }
        let component = element.name.display();

        for attr in node.attributes() {
            let Some(name) = attr.attribute_name() else {
                continue;
            };
            let Some(value) = attr.value() else {
                continue;
            };

            if is_class_attribute(name) {
                let Some(classes) = static_value(value, cx.walk) else {
                    continue;
                };
                let tokens = vertical_margin_classes(&classes.text, cx.registries);
                if tokens.is_empty() {
                    continue;
                }
                out.report(
                    attr,
                    ids::CLASS_MARGIN_SPACING,
                    json!({
                        "component": component,
                        "attribute": name,
                        "tokens": tokens.join(", "),
                    }),
                    classes.confidence(),
                );
            } else if name == "style" && matches!(value.kind, NodeKind::ObjectLiteral) {
                let keys: Vec<&str> = value
                    .properties()
                    .map(|(key, _)| key)
                    .filter(|key| cx.registries.margin_style_keys.contains(key))
                    .collect();
                if keys.is_empty() {
                    continue;
                }
                out.report(
                    attr,
                    ids::CLASS_MARGIN_SPACING,
                    json!({
                        "component": component,
                        "attribute": name,
                        "tokens": keys.join(", "),
                    }),
                    Confidence::High,
                );
            }
        }
    }
}

/// Class tokens setting top, bottom or block margin.
pub fn vertical_margin_classes<'t>(classes: &'t str, registries: &Registries) -> Vec<&'t str> {
    classes
        .split_whitespace()
        .filter(|token| {
            let base = base_class(token);
            registries
                .margin_prefixes
                .iter()
                .any(|prefix| base.starts_with(prefix))
        })
        .collect()
}
