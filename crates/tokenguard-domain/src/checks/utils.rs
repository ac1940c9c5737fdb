use tokenguard_syntax::{NodeKind, SyntaxNode, WalkContext};
use tokenguard_types::Confidence;

/// A value reduced to literal text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticValue {
    pub text: String,
    /// True when the text came from a scope lookup rather than the node itself.
    pub resolved: bool,
}

impl StaticValue {
    pub fn confidence(&self) -> Confidence {
        if self.resolved {
            Confidence::Medium
        } else {
            Confidence::High
        }
    }
}

/// String literal, interpolation-free template, or identifier resolved through
/// the scope chain. Anything else is unknown.
pub fn static_value(node: &SyntaxNode, walk: &WalkContext<'_>) -> Option<StaticValue> {
    match &node.kind {
        NodeKind::StringLiteral(value) => Some(StaticValue {
            text: value.clone(),
            resolved: false,
        }),
        NodeKind::TemplateLiteral(template) if template.is_static() => Some(StaticValue {
            text: template.joined(),
            resolved: false,
        }),
        NodeKind::Identifier(name) => walk.resolve(node, name).map(|text| StaticValue {
            text: text.to_string(),
            resolved: true,
        }),
        _ => None,
    }
}

/// Utility class with variant prefixes (`md:`, `hover:`), importance (`!`)
/// and negation (`-`) stripped.
pub fn base_class(token: &str) -> &str {
    let token = token.rsplit(':').next().unwrap_or(token);
    token.trim_start_matches(['!', '-'])
}

pub fn is_class_attribute(name: &str) -> bool {
    name == "className" || name == "class"
}

/// Source-ish rendering of an expression for messages.
pub fn describe_expression(node: &SyntaxNode) -> String {
    match &node.kind {
        NodeKind::Identifier(name) => name.clone(),
        NodeKind::MemberPath(segments) => segments.join("."),
        NodeKind::StringLiteral(value) => format!("\"{value}\""),
        NodeKind::Number(value) => value.clone(),
        NodeKind::ObjectLiteral => "{…}".to_string(),
        NodeKind::TemplateLiteral(_) => "`…`".to_string(),
        NodeKind::Program
        | NodeKind::Import(_)
        | NodeKind::Element(_)
        | NodeKind::Attribute(_)
        | NodeKind::SpreadAttribute
        | NodeKind::Property(_)
        | NodeKind::Other => "expression".to_string(),
    }
}
