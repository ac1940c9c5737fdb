//! Owned, closed syntax model produced by lowering.

use crate::scope::{ScopeArena, ScopeId};
use tokenguard_types::RepoPath;

/// 1-based source position of a node's first byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub line: u32,
    pub col: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: Span,
    /// Innermost scope frame the node was lowered in.
    pub scope: ScopeId,
    pub children: Vec<SyntaxNode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    Import(ImportDecl),
    Element(Element),
    /// Children: the attribute value, if any.
    Attribute(Attribute),
    /// Children: the spread argument.
    SpreadAttribute,
    StringLiteral(String),
    /// Children: the lowered interpolated expressions.
    TemplateLiteral(Template),
    /// Children: properties and any other members.
    ObjectLiteral,
    /// Children: the property value.
    Property(Property),
    Identifier(String),
    MemberPath(Vec<String>),
    Number(String),
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportDecl {
    pub source: String,
    pub default: Option<String>,
    pub namespace: Option<String>,
    pub named: Vec<ImportSpecifier>,
    pub type_only: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSpecifier {
    pub imported: String,
    pub local: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementName {
    Simple(String),
    Member(Vec<String>),
}

impl ElementName {
    /// Parses `Foo`, `ui.Foo` or `a.b.Foo` tag names.
    pub fn parse(raw: &str) -> Self {
        let segments: Vec<String> = raw.split('.').map(|s| s.trim().to_string()).collect();
        if segments.len() == 1 {
            ElementName::Simple(segments.into_iter().next().unwrap_or_default())
        } else {
            ElementName::Member(segments)
        }
    }

    /// Final segment of the name (`Text` for `UI.Text`).
    pub fn last(&self) -> &str {
        match self {
            ElementName::Simple(name) => name,
            ElementName::Member(segments) => segments.last().map(String::as_str).unwrap_or(""),
        }
    }

    pub fn display(&self) -> String {
        match self {
            ElementName::Simple(name) => name.clone(),
            ElementName::Member(segments) => segments.join("."),
        }
    }
}

/// A markup element. Children are its attributes first, then body nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: ElementName,
    /// Lowercase simple names (`div`, `button`) are host elements.
    pub intrinsic: bool,
    pub attribute_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Template {
    pub quasis: Vec<String>,
    pub expressions: usize,
}

impl Template {
    pub fn is_static(&self) -> bool {
        self.expressions == 0
    }

    /// Static parts joined with a single space standing in for each interpolation.
    pub fn joined(&self) -> String {
        self.quasis.join(" ")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub key: String,
    pub shorthand: bool,
}

impl SyntaxNode {
    pub fn element(&self) -> Option<&Element> {
        match &self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn attribute_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Attribute(attr) => Some(&attr.name),
            _ => None,
        }
    }

    pub fn property_key(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Property(prop) => Some(&prop.key),
            _ => None,
        }
    }

    /// Attribute and spread children of an element.
    pub fn attributes(&self) -> &[SyntaxNode] {
        match &self.kind {
            NodeKind::Element(element) => {
                &self.children[..element.attribute_count.min(self.children.len())]
            }
            _ => &[],
        }
    }

    /// Body children of an element (everything after the attributes).
    pub fn body(&self) -> &[SyntaxNode] {
        match &self.kind {
            NodeKind::Element(element) => {
                &self.children[element.attribute_count.min(self.children.len())..]
            }
            _ => &self.children,
        }
    }

    /// First attribute with the given name.
    pub fn find_attribute(&self, name: &str) -> Option<&SyntaxNode> {
        self.attributes()
            .iter()
            .find(|attr| attr.attribute_name() == Some(name))
    }

    /// Value of an attribute or property node.
    pub fn value(&self) -> Option<&SyntaxNode> {
        match &self.kind {
            NodeKind::Attribute(_) | NodeKind::Property(_) | NodeKind::SpreadAttribute => {
                self.children.first()
            }
            _ => None,
        }
    }

    /// Properties of an object literal.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &SyntaxNode)> {
        let children: &[SyntaxNode] = match self.kind {
            NodeKind::ObjectLiteral => &self.children,
            _ => &[],
        };
        children
            .iter()
            .filter_map(|child| child.property_key().map(|key| (key, child)))
    }

    /// Depth-first pre-order iteration over this node and its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// One parsed file: the lowered tree plus its scope arena.
#[derive(Clone, Debug)]
pub struct SourceUnit {
    pub path: RepoPath,
    pub root: SyntaxNode,
    pub scopes: ScopeArena,
}

impl SourceUnit {
    /// Top-level import declarations in source order.
    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.root.children.iter().filter_map(|child| match &child.kind {
            NodeKind::Import(decl) => Some(decl),
            _ => None,
        })
    }
}
