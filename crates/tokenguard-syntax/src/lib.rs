//! Source parsing for tokenguard.
//!
//! Input: TypeScript / JavaScript (with JSX) source text.
//! Output: an owned, closed syntax model with per-file scope frames, plus a
//! pre-order walker that rules hook into.

#![forbid(unsafe_code)]

pub mod lower;
pub mod model;
pub mod scope;
pub mod walk;

pub use lower::{ParseError, SourceLanguage, parse_source};
pub use model::{
    Attribute, Element, ElementName, ImportDecl, ImportSpecifier, NodeKind, Property, SourceUnit,
    Span, SyntaxNode, Template,
};
pub use scope::{ScopeArena, ScopeFrame, ScopeId};
pub use walk::{Visitor, WalkContext, walk};

#[cfg(test)]
mod proptest;
