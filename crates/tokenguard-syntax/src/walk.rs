//! Depth-first, pre-order traversal with typed visitor callbacks.

use crate::model::{Element, ImportDecl, NodeKind, Property, SourceUnit, SyntaxNode, Template};
use crate::scope::ScopeArena;
use tokenguard_types::RepoPath;

/// Callbacks invoked while walking a [`SourceUnit`].
///
/// Every hook defaults to a no-op; the walker never stops early.
pub trait Visitor {
    fn visit_import(&mut self, _node: &SyntaxNode, _import: &ImportDecl, _cx: &WalkContext<'_>) {}

    fn visit_element(&mut self, _node: &SyntaxNode, _element: &Element, _cx: &WalkContext<'_>) {}

    fn visit_string(&mut self, _node: &SyntaxNode, _value: &str, _cx: &WalkContext<'_>) {}

    fn visit_template(&mut self, _node: &SyntaxNode, _template: &Template, _cx: &WalkContext<'_>) {
    }

    fn visit_property(&mut self, _node: &SyntaxNode, _property: &Property, _cx: &WalkContext<'_>) {
    }
}

/// Position of the walk: the file and the chain of enclosing nodes.
pub struct WalkContext<'a> {
    unit: &'a SourceUnit,
    ancestors: Vec<&'a SyntaxNode>,
}

impl<'a> WalkContext<'a> {
    pub fn path(&self) -> &'a RepoPath {
        &self.unit.path
    }

    pub fn scopes(&self) -> &'a ScopeArena {
        &self.unit.scopes
    }

    /// Enclosing nodes, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = &'a SyntaxNode> + '_ {
        self.ancestors.iter().rev().copied()
    }

    pub fn parent(&self) -> Option<&'a SyntaxNode> {
        self.ancestors.last().copied()
    }

    pub fn grandparent(&self) -> Option<&'a SyntaxNode> {
        let len = self.ancestors.len();
        if len < 2 {
            return None;
        }
        self.ancestors.get(len - 2).copied()
    }

    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Resolves `name` from the scope `node` was lowered in.
    pub fn resolve(&self, node: &SyntaxNode, name: &str) -> Option<&'a str> {
        self.unit.scopes.resolve(node.scope, name)
    }
}

/// Walks every node of `unit` once, parents before children.
pub fn walk(unit: &SourceUnit, visitor: &mut dyn Visitor) {
    let mut cx = WalkContext {
        unit,
        ancestors: Vec::new(),
    };
    walk_node(&unit.root, &mut cx, visitor);
}

fn walk_node<'a>(node: &'a SyntaxNode, cx: &mut WalkContext<'a>, visitor: &mut dyn Visitor) {
    match &node.kind {
        NodeKind::Import(import) => visitor.visit_import(node, import, cx),
        NodeKind::Element(element) => visitor.visit_element(node, element, cx),
        NodeKind::StringLiteral(value) => visitor.visit_string(node, value, cx),
        NodeKind::TemplateLiteral(template) => visitor.visit_template(node, template, cx),
        NodeKind::Property(property) => visitor.visit_property(node, property, cx),
        NodeKind::Program
        | NodeKind::Attribute(_)
        | NodeKind::SpreadAttribute
        | NodeKind::ObjectLiteral
        | NodeKind::Identifier(_)
        | NodeKind::MemberPath(_)
        | NodeKind::Number(_)
        | NodeKind::Other => {}
    }

    cx.ancestors.push(node);
    for child in &node.children {
        walk_node(child, cx, visitor);
    }
    cx.ancestors.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lower::parse_source;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Visitor for Recorder {
        fn visit_import(&mut self, _node: &SyntaxNode, import: &ImportDecl, _cx: &WalkContext<'_>) {
            self.events.push(format!("import {}", import.source));
        }

        fn visit_element(&mut self, _node: &SyntaxNode, element: &Element, cx: &WalkContext<'_>) {
            self.events
                .push(format!("element {} depth={}", element.name.display(), cx.depth()));
        }

        fn visit_string(&mut self, _node: &SyntaxNode, value: &str, cx: &WalkContext<'_>) {
            let parent = cx.parent().and_then(|p| p.attribute_name()).unwrap_or("-");
            self.events.push(format!("string {value} in {parent}"));
        }

        fn visit_property(&mut self, _node: &SyntaxNode, property: &Property, _cx: &WalkContext<'_>) {
            self.events.push(format!("property {}", property.key));
        }
    }

    #[test]
    fn visits_in_pre_order() {
        let unit = parse_source(
            &RepoPath::new("src/Card.tsx"),
            "import { Text } from '@northstar/ui';\n\
             export const Card = () => (\n  <div className=\"p-4\">\n    <Text style={{ color: 'red' }} />\n  </div>\n);\n",
        )
        .expect("parse");

        let mut recorder = Recorder::default();
        walk(&unit, &mut recorder);

        let elements: Vec<_> = recorder
            .events
            .iter()
            .filter(|e| !e.starts_with("element"))
            .cloned()
            .collect();
        assert_eq!(
            elements,
            vec![
                "import @northstar/ui".to_string(),
                "string p-4 in className".to_string(),
                "property color".to_string(),
                "string red in -".to_string(),
            ]
        );

        let div = recorder.events.iter().position(|e| e.starts_with("element div"));
        let text = recorder.events.iter().position(|e| e.starts_with("element Text"));
        assert!(div < text);
    }

    #[test]
    fn resolves_through_context() {
        struct Resolver(Vec<Option<String>>);
        impl Visitor for Resolver {
            fn visit_element(&mut self, node: &SyntaxNode, _e: &Element, cx: &WalkContext<'_>) {
                let value = node.find_attribute("className").and_then(|a| a.value());
                if let Some(value) = value
                    && let NodeKind::Identifier(name) = &value.kind
                {
                    self.0.push(cx.resolve(value, name).map(str::to_string));
                }
            }
        }

        let unit = parse_source(
            &RepoPath::new("src/a.tsx"),
            "const cls = 'mt-2';\nconst a = <Text className={cls} />;\nconst b = <Text className={other} />;\n",
        )
        .expect("parse");
        let mut resolver = Resolver(Vec::new());
        walk(&unit, &mut resolver);
        assert_eq!(resolver.0, vec![Some("mt-2".to_string()), None]);
    }
}
