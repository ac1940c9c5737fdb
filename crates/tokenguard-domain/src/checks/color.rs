use super::utils::static_value;
use crate::registry::Registries;
use crate::rule::{Reporter, Rule, RuleContext};
use serde_json::json;
use tokenguard_syntax::{Element, NodeKind, SyntaxNode, Template};
use tokenguard_types::{Confidence, ids};

/// Typography roles may only be paired with their allowed text colors.
pub struct ColorPolicy;

/// Roles, colors and surfaces recognised in one unit of text or markup.
#[derive(Debug, Default)]
struct Evidence {
    roles: Vec<&'static str>,
    colors: Vec<&'static str>,
    surfaces: Vec<&'static str>,
}

impl Evidence {
    fn from_text(text: &str, registries: &Registries) -> Self {
        Self {
            roles: registries.roles_in(text),
            colors: registries.colors_in(text),
            surfaces: registries.light_surfaces_in(text),
        }
    }

    fn merge(&mut self, other: Evidence) {
        for (into, from) in [
            (&mut self.roles, other.roles),
            (&mut self.colors, other.colors),
            (&mut self.surfaces, other.surfaces),
        ] {
            for token in from {
                if !into.contains(&token) {
                    into.push(token);
                }
            }
        }
    }

    fn evaluate(
        &self,
        node: &SyntaxNode,
        registries: &Registries,
        confidence: Confidence,
        out: &mut dyn Reporter,
    ) {
        for role in &self.roles {
            let allowed = registries.allowed_colors(role);
            for color in &self.colors {
                if !allowed.contains(color) {
                    out.report(
                        node,
                        ids::CLASS_FORBIDDEN_COMBINATION,
                        json!({
                            "role": role,
                            "color": color,
                            "allowed": allowed.join(", "),
                        }),
                        confidence,
                    );
                }
                if registries.is_quiet_color(color) && registries.is_readable_role(role) {
                    out.report(
                        node,
                        ids::CLASS_MUTED_ON_READABLE_ROLE,
                        json!({ "role": role, "color": color }),
                        confidence,
                    );
                }
            }
        }

        if let Some(surface) = self.surfaces.first()
            && self.colors.contains(&"inverse")
        {
            out.report(
                node,
                ids::CLASS_INVERSE_ON_LIGHT_SURFACE,
                json!({ "color": "inverse", "surface": surface }),
                confidence,
            );
        }
    }
}

impl Rule for ColorPolicy {
    fn check_id(&self) -> &'static str {
        ids::CHECK_TOKENS_COLOR
    }

    fn on_string(
        &self,
        cx: &RuleContext<'_, '_>,
        node: &SyntaxNode,
        value: &str,
        out: &mut dyn Reporter,
    ) {
        if is_attribute_value(cx) {
            return;
        }
        Evidence::from_text(value, cx.registries).evaluate(
            node,
            cx.registries,
            Confidence::High,
            out,
        );
    }

    fn on_template(
        &self,
        cx: &RuleContext<'_, '_>,
        node: &SyntaxNode,
        template: &Template,
        out: &mut dyn Reporter,
    ) {
        if template.is_static() && is_attribute_value(cx) {
            return;
        }
        Evidence::from_text(&template.joined(), cx.registries).evaluate(
            node,
            cx.registries,
            Confidence::High,
            out,
        );
    }

    fn on_element(
        &self,
        cx: &RuleContext<'_, '_>,
        node: &SyntaxNode,
        element: &Element,
        out: &mut dyn Reporter,
    ) {
        let reg = cx.registries;
        let mut evidence = Evidence::default();
        let mut confidence = Confidence::High;

        for attr in node.attributes() {
            let (Some(name), Some(value)) = (attr.attribute_name(), attr.value()) else {
                continue;
            };

            if name == "style"
                && reg.is_typography(element.name.last())
                && matches!(value.kind, NodeKind::ObjectLiteral)
                && value.properties().any(|(key, _)| key == "color")
            {
                out.report(
                    attr,
                    ids::CLASS_INLINE_COLOR,
                    json!({ "component": element.name.display() }),
                    Confidence::High,
                );
            }

            let Some(value) = static_value(value, cx.walk) else {
                continue;
            };
            match name {
                "typographyRole" => {
                    if let Some(role) = reg.role(&value.text) {
                        evidence.roles.push(role);
                        if value.resolved {
                            confidence = Confidence::Medium;
                        }
                    }
                }
                "color" => {
                    if let Some(color) = reg.color(&value.text) {
                        evidence.colors.push(color);
                        if value.resolved {
                            confidence = Confidence::Medium;
                        }
                    }
                }
                _ => {
                    let found = Evidence::from_text(&value.text, reg);
                    if value.resolved && !(found.roles.is_empty() && found.colors.is_empty()) {
                        confidence = Confidence::Medium;
                    }
                    evidence.merge(found);
                }
            }
        }

        evidence.evaluate(node, reg, confidence, out);
    }
}

/// Static attribute values belong to their element's unit.
fn is_attribute_value(cx: &RuleContext<'_, '_>) -> bool {
    cx.walk
        .parent()
        .is_some_and(|parent| matches!(parent.kind, NodeKind::Attribute(_)))
}
