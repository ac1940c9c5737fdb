//! Parsing with tree-sitter and lowering into the owned syntax model.

use crate::model::{
    Attribute, Element, ElementName, ImportDecl, ImportSpecifier, NodeKind, Property, SourceUnit,
    Span, SyntaxNode, Template,
};
use crate::scope::{ScopeArena, ScopeId};
use thiserror::Error;
use tokenguard_types::RepoPath;
use tree_sitter::{Language, Node, Parser};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("syntax error at {line}:{col}")]
    Syntax { line: u32, col: u32 },
    #[error("failed to configure parser: {0}")]
    Language(String),
    #[error("parser produced no tree")]
    NoTree,
}

/// Grammar used for a file, selected by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceLanguage {
    TypeScript,
    Tsx,
}

impl SourceLanguage {
    pub fn for_path(path: &RepoPath) -> Self {
        match path.extension().as_deref() {
            Some("ts" | "mts" | "cts") => SourceLanguage::TypeScript,
            _ => SourceLanguage::Tsx,
        }
    }

    fn grammar(self) -> Language {
        match self {
            SourceLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

const SKIPPED_KINDS: &[&str] = &[
    "comment",
    "html_comment",
    "hash_bang_line",
    "jsx_text",
    "html_character_reference",
    "type_annotation",
    "type_alias_declaration",
    "interface_declaration",
    "type_arguments",
    "type_parameters",
];

const TRANSPARENT_KINDS: &[&str] = &[
    "parenthesized_expression",
    "as_expression",
    "satisfies_expression",
    "non_null_expression",
    "jsx_expression",
];

const SCOPE_KINDS: &[&str] = &[
    "statement_block",
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "function",
    "generator_function",
    "arrow_function",
    "method_definition",
    "class_body",
];

/// Parses `text` and lowers it into a [`SourceUnit`].
///
/// Trees containing error or missing nodes are rejected with the position of
/// the first offending node.
pub fn parse_source(path: &RepoPath, text: &str) -> Result<SourceUnit, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&SourceLanguage::for_path(path).grammar())
        .map_err(|e| ParseError::Language(e.to_string()))?;
    let tree = parser.parse(text, None).ok_or(ParseError::NoTree)?;
    let root = tree.root_node();

    if root.has_error() {
        let span = first_error(root).map(span_of).unwrap_or(Span { line: 1, col: 1 });
        return Err(ParseError::Syntax {
            line: span.line,
            col: span.col,
        });
    }

    let mut lowerer = Lowerer {
        src: text,
        scopes: ScopeArena::new(),
    };
    let children = lowerer.lower_children(root, ScopeId::ROOT);
    Ok(SourceUnit {
        path: path.clone(),
        root: SyntaxNode {
            kind: NodeKind::Program,
            span: span_of(root),
            scope: ScopeId::ROOT,
            children,
        },
        scopes: lowerer.scopes,
    })
}

fn span_of(node: Node<'_>) -> Span {
    let point = node.start_position();
    Span {
        line: point.row as u32 + 1,
        col: point.column as u32 + 1,
    }
}

fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error()
            && let Some(found) = first_error(child)
        {
            return Some(found);
        }
    }
    None
}

struct Lowerer<'s> {
    src: &'s str,
    scopes: ScopeArena,
}

impl<'s> Lowerer<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        self.slice(node.start_byte(), node.end_byte())
    }

    fn slice(&self, start: usize, end: usize) -> &'s str {
        let src: &'s str = self.src;
        src.get(start..end).unwrap_or("")
    }

    fn first_named<'t>(&self, node: Node<'t>) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .find(|child| child.kind() != "comment")
    }

    fn lower_children(&mut self, node: Node<'_>, scope: ScopeId) -> Vec<SyntaxNode> {
        let mut cursor = node.walk();
        let named: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        named
            .into_iter()
            .filter_map(|child| self.lower(child, scope))
            .collect()
    }

    fn lower(&mut self, node: Node<'_>, scope: ScopeId) -> Option<SyntaxNode> {
        let kind = node.kind();
        if !node.is_named() || SKIPPED_KINDS.contains(&kind) {
            return None;
        }
        if TRANSPARENT_KINDS.contains(&kind) {
            let inner = self.first_named(node)?;
            return self.lower(inner, scope);
        }

        let scope = if SCOPE_KINDS.contains(&kind) {
            self.scopes.push(scope)
        } else {
            scope
        };
        let span = span_of(node);

        let (kind, children) = match kind {
            "import_statement" => (NodeKind::Import(self.import_decl(node)), Vec::new()),
            "jsx_element" => return Some(self.lower_jsx_element(node, scope)),
            "jsx_self_closing_element" => {
                return Some(self.lower_element(node, node, Vec::new(), scope));
            }
            "string" => (NodeKind::StringLiteral(self.string_value(node)), Vec::new()),
            "template_string" => return Some(self.lower_template(node, scope)),
            "object" => (NodeKind::ObjectLiteral, self.lower_object_members(node, scope)),
            "identifier" | "undefined" => {
                (NodeKind::Identifier(self.text(node).to_string()), Vec::new())
            }
            "number" => (NodeKind::Number(self.text(node).to_string()), Vec::new()),
            "member_expression" => match self.member_path(node) {
                Some(path) => (NodeKind::MemberPath(path), Vec::new()),
                None => (NodeKind::Other, self.lower_children(node, scope)),
            },
            "variable_declarator" => {
                self.record_binding(node, scope);
                (NodeKind::Other, self.lower_children(node, scope))
            }
            _ => (NodeKind::Other, self.lower_children(node, scope)),
        };

        Some(SyntaxNode {
            kind,
            span,
            scope,
            children,
        })
    }

    // --- imports ---

    fn import_decl(&self, node: Node<'_>) -> ImportDecl {
        let mut decl = ImportDecl {
            source: node
                .child_by_field_name("source")
                .map(|s| self.string_value(s))
                .unwrap_or_default(),
            ..ImportDecl::default()
        };

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "type" => decl.type_only = true,
                "import_clause" => self.import_clause(child, &mut decl),
                _ => {}
            }
        }
        decl
    }

    fn import_clause(&self, clause: Node<'_>, decl: &mut ImportDecl) {
        let mut cursor = clause.walk();
        for part in clause.named_children(&mut cursor) {
            match part.kind() {
                "identifier" => decl.default = Some(self.text(part).to_string()),
                "namespace_import" => {
                    decl.namespace = self
                        .first_named(part)
                        .map(|ident| self.text(ident).to_string());
                }
                "named_imports" => {
                    let mut specs = part.walk();
                    for spec in part.named_children(&mut specs) {
                        if spec.kind() != "import_specifier" {
                            continue;
                        }
                        let Some(name) = spec.child_by_field_name("name") else {
                            continue;
                        };
                        let imported = if name.kind() == "string" {
                            self.string_value(name)
                        } else {
                            self.text(name).to_string()
                        };
                        let local = spec
                            .child_by_field_name("alias")
                            .map(|alias| self.text(alias).to_string())
                            .unwrap_or_else(|| imported.clone());
                        decl.named.push(ImportSpecifier { imported, local });
                    }
                }
                _ => {}
            }
        }
    }

    // --- markup ---

    fn lower_jsx_element(&mut self, node: Node<'_>, scope: ScopeId) -> SyntaxNode {
        let mut cursor = node.walk();
        let mut open = None;
        let mut body = Vec::new();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "jsx_opening_element" => open = Some(child),
                "jsx_closing_element" => {}
                _ => body.push(child),
            }
        }

        match open {
            Some(open) if open.child_by_field_name("name").is_some() => {
                self.lower_element(node, open, body, scope)
            }
            // Fragments carry no name and no attributes.
            _ => SyntaxNode {
                kind: NodeKind::Other,
                span: span_of(node),
                scope,
                children: body
                    .into_iter()
                    .filter_map(|child| self.lower(child, scope))
                    .collect(),
            },
        }
    }

    fn lower_element(
        &mut self,
        node: Node<'_>,
        tag: Node<'_>,
        body: Vec<Node<'_>>,
        scope: ScopeId,
    ) -> SyntaxNode {
        let name_node = tag.child_by_field_name("name");
        let name = ElementName::parse(name_node.map(|n| self.text(n)).unwrap_or(""));
        let intrinsic = match &name {
            ElementName::Simple(simple) => simple
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_lowercase()),
            ElementName::Member(_) => false,
        };

        let mut cursor = tag.walk();
        let parts: Vec<Node<'_>> = tag
            .named_children(&mut cursor)
            .filter(|child| Some(child.id()) != name_node.map(|n| n.id()))
            .collect();

        let mut children = Vec::new();
        for part in parts {
            match part.kind() {
                "jsx_attribute" => children.push(self.lower_attribute(part, scope)),
                "jsx_expression" => {
                    let Some(inner) = self.first_named(part) else {
                        continue;
                    };
                    if inner.kind() != "spread_element" {
                        continue;
                    }
                    let argument = self
                        .first_named(inner)
                        .and_then(|arg| self.lower(arg, scope));
                    children.push(SyntaxNode {
                        kind: NodeKind::SpreadAttribute,
                        span: span_of(part),
                        scope,
                        children: argument.into_iter().collect(),
                    });
                }
                _ => {}
            }
        }
        let attribute_count = children.len();

        children.extend(body.into_iter().filter_map(|child| self.lower(child, scope)));

        SyntaxNode {
            kind: NodeKind::Element(Element {
                name,
                intrinsic,
                attribute_count,
            }),
            span: span_of(node),
            scope,
            children,
        }
    }

    fn lower_attribute(&mut self, node: Node<'_>, scope: ScopeId) -> SyntaxNode {
        let mut cursor = node.walk();
        let mut named = node.named_children(&mut cursor);
        let name = named
            .next()
            .map(|n| self.text(n).to_string())
            .unwrap_or_default();
        let value = named.next();

        let children = value
            .and_then(|v| self.lower(v, scope))
            .into_iter()
            .collect();

        SyntaxNode {
            kind: NodeKind::Attribute(Attribute { name }),
            span: span_of(node),
            scope,
            children,
        }
    }

    // --- literals ---

    fn string_value(&self, node: Node<'_>) -> String {
        let raw = self.text(node);
        let mut chars = raw.chars();
        match (chars.next(), chars.next_back()) {
            (Some(open), Some(close)) if open == close && (open == '"' || open == '\'') => {
                chars.as_str().to_string()
            }
            _ => raw.to_string(),
        }
    }

    fn lower_template(&mut self, node: Node<'_>, scope: ScopeId) -> SyntaxNode {
        let mut cursor = node.walk();
        let substitutions: Vec<Node<'_>> = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "template_substitution")
            .collect();

        let mut quasis = Vec::with_capacity(substitutions.len() + 1);
        let mut children = Vec::new();
        let mut offset = node.start_byte() + 1;
        for substitution in &substitutions {
            quasis.push(self.slice(offset, substitution.start_byte()).to_string());
            offset = substitution.end_byte();
            if let Some(inner) = self.first_named(*substitution)
                && let Some(lowered) = self.lower(inner, scope)
            {
                children.push(lowered);
            }
        }
        quasis.push(
            self.slice(offset, node.end_byte().saturating_sub(1))
                .to_string(),
        );

        SyntaxNode {
            kind: NodeKind::TemplateLiteral(Template {
                quasis,
                expressions: substitutions.len(),
            }),
            span: span_of(node),
            scope,
            children,
        }
    }

    /// Static text of a string or interpolation-free template.
    fn static_literal(&self, node: Node<'_>) -> Option<String> {
        match node.kind() {
            "string" => Some(self.string_value(node)),
            "template_string" => {
                let mut cursor = node.walk();
                let has_substitution = node
                    .named_children(&mut cursor)
                    .any(|child| child.kind() == "template_substitution");
                if has_substitution {
                    return None;
                }
                Some(
                    self.slice(node.start_byte() + 1, node.end_byte().saturating_sub(1))
                        .to_string(),
                )
            }
            kind if TRANSPARENT_KINDS.contains(&kind) => {
                self.first_named(node).and_then(|inner| self.static_literal(inner))
            }
            _ => None,
        }
    }

    fn member_path(&self, node: Node<'_>) -> Option<Vec<String>> {
        match node.kind() {
            "identifier" | "this" | "property_identifier" | "private_property_identifier" => {
                Some(vec![self.text(node).to_string()])
            }
            "member_expression" => {
                let object = node.child_by_field_name("object")?;
                let property = node.child_by_field_name("property")?;
                let mut path = self.member_path(object)?;
                path.push(self.text(property).to_string());
                Some(path)
            }
            "parenthesized_expression" | "non_null_expression" => {
                self.first_named(node).and_then(|inner| self.member_path(inner))
            }
            _ => None,
        }
    }

    // --- objects ---

    fn lower_object_members(&mut self, node: Node<'_>, scope: ScopeId) -> Vec<SyntaxNode> {
        let mut cursor = node.walk();
        let members: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        let mut out = Vec::with_capacity(members.len());
        for member in members {
            match member.kind() {
                "pair" => {
                    let key = member.child_by_field_name("key").and_then(|key| match key
                        .kind()
                    {
                        "property_identifier" | "number" => Some(self.text(key).to_string()),
                        "string" => Some(self.string_value(key)),
                        _ => None,
                    });
                    let Some(key) = key else {
                        out.extend(self.lower(member, scope));
                        continue;
                    };
                    let value = member
                        .child_by_field_name("value")
                        .and_then(|value| self.lower(value, scope));
                    out.push(SyntaxNode {
                        kind: NodeKind::Property(Property {
                            key,
                            shorthand: false,
                        }),
                        span: span_of(member),
                        scope,
                        children: value.into_iter().collect(),
                    });
                }
                "shorthand_property_identifier" => {
                    let name = self.text(member).to_string();
                    let span = span_of(member);
                    out.push(SyntaxNode {
                        kind: NodeKind::Property(Property {
                            key: name.clone(),
                            shorthand: true,
                        }),
                        span,
                        scope,
                        children: vec![SyntaxNode {
                            kind: NodeKind::Identifier(name),
                            span,
                            scope,
                            children: Vec::new(),
                        }],
                    });
                }
                _ => out.extend(self.lower(member, scope)),
            }
        }
        out
    }

    // --- scope ---

    fn record_binding(&mut self, node: Node<'_>, scope: ScopeId) {
        let Some(declaration) = node.parent() else {
            return;
        };
        if declaration.kind() != "lexical_declaration" {
            return;
        }
        let mut cursor = declaration.walk();
        let is_const = declaration
            .children(&mut cursor)
            .next()
            .is_some_and(|keyword| keyword.kind() == "const");
        if !is_const {
            return;
        }

        let (Some(name), Some(value)) = (
            node.child_by_field_name("name"),
            node.child_by_field_name("value"),
        ) else {
            return;
        };
        if name.kind() != "identifier" {
            return;
        }
        if let Some(literal) = self.static_literal(value) {
            let name = self.text(name);
            self.scopes.bind(scope, name, &literal);
        }
    }
}
