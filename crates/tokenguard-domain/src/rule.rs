//! The interface between the engine and the individual policy rules.

use crate::registry::Registries;
use crate::scope::FileBindings;
use serde_json::Value;
use tokenguard_syntax::{Element, ImportDecl, Property, SyntaxNode, Template, WalkContext};
use tokenguard_types::{Confidence, RepoPath};

/// Everything a rule may look at while handling one node.
pub struct RuleContext<'a, 'w> {
    pub registries: &'a Registries,
    pub bindings: &'a FileBindings,
    pub walk: &'a WalkContext<'w>,
}

impl<'a, 'w> RuleContext<'a, 'w> {
    pub fn path(&self) -> &'w RepoPath {
        self.walk.path()
    }

    /// Canonical regulated name of a non-intrinsic element.
    pub fn regulated(&self, element: &Element) -> Option<&'static str> {
        if element.intrinsic {
            return None;
        }
        self.bindings.resolve_element(&element.name, self.registries)
    }
}

/// Sink for rule output. One call produces exactly one finding.
pub trait Reporter {
    fn report(
        &mut self,
        node: &SyntaxNode,
        class: &'static str,
        data: Value,
        confidence: Confidence,
    );
}

/// A pure policy evaluator invoked per node during a single walk.
///
/// Rules keep no state between calls; the order rules run in is irrelevant.
pub trait Rule: Sync {
    fn check_id(&self) -> &'static str;

    /// Files a rule never looks at.
    fn applies_to(&self, _path: &RepoPath) -> bool {
        true
    }

    fn on_import(
        &self,
        _cx: &RuleContext<'_, '_>,
        _node: &SyntaxNode,
        _import: &ImportDecl,
        _out: &mut dyn Reporter,
    ) {
    }

    fn on_element(
        &self,
        _cx: &RuleContext<'_, '_>,
        _node: &SyntaxNode,
        _element: &Element,
        _out: &mut dyn Reporter,
    ) {
    }

    fn on_string(
        &self,
        _cx: &RuleContext<'_, '_>,
        _node: &SyntaxNode,
        _value: &str,
        _out: &mut dyn Reporter,
    ) {
    }

    fn on_template(
        &self,
        _cx: &RuleContext<'_, '_>,
        _node: &SyntaxNode,
        _template: &Template,
        _out: &mut dyn Reporter,
    ) {
    }

    fn on_property(
        &self,
        _cx: &RuleContext<'_, '_>,
        _node: &SyntaxNode,
        _property: &Property,
        _out: &mut dyn Reporter,
    ) {
    }
}
