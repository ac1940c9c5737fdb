//! Property-based tests for the syntax crate.
//!
//! - parsing arbitrary text never panics
//! - lowered spans are 1-based and inside the input
//! - scope resolution never panics and respects shadowing

use crate::lower::parse_source;
use crate::scope::{ScopeArena, ScopeId};
use proptest::prelude::*;
use tokenguard_types::RepoPath;

fn arb_extension() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["ts", "tsx", "js", "jsx", "mjs", "cjs", "mts", "cts"])
}

/// Fragments that tend to produce interesting (and frequently broken) JSX.
fn arb_jsx_soup() -> impl Strategy<Value = String> {
    let piece = prop::sample::select(vec![
        "<Text",
        "<div",
        " className=\"mt-4 p-2\"",
        " style={{ lineHeight: 1.5 }}",
        " {...rest}",
        ">",
        "/>",
        "</Text>",
        "</div>",
        "`line-height: 20px; ${x}`",
        "const a = ",
        "import { Text } from '@northstar/ui';\n",
        "\n",
        "{",
        "}",
        ";",
    ]);
    prop::collection::vec(piece, 0..24).prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn parse_never_panics_on_arbitrary_text(text in ".{0,200}", ext in arb_extension()) {
        let path = RepoPath::new(format!("src/file.{ext}"));
        let _ = parse_source(&path, &text);
    }

    #[test]
    fn parse_never_panics_on_jsx_soup(text in arb_jsx_soup()) {
        let path = RepoPath::new("src/Soup.tsx");
        let _ = parse_source(&path, &text);
    }

    #[test]
    fn spans_stay_inside_the_source(text in arb_jsx_soup()) {
        let path = RepoPath::new("src/Soup.tsx");
        if let Ok(unit) = parse_source(&path, &text) {
            let lines = text.split('\n').count() as u32;
            for node in unit.root.descendants() {
                prop_assert!(node.span.line >= 1);
                prop_assert!(node.span.col >= 1);
                prop_assert!(node.span.line <= lines.max(1));
                prop_assert!(unit.scopes.frame(node.scope).is_some());
            }
        }
    }

    #[test]
    fn resolution_prefers_innermost_frame(
        depth in 1usize..8,
        bind_at in 0usize..8,
        name in "[a-z]{1,6}",
        value in "[a-z0-9-]{0,8}",
    ) {
        let mut arena = ScopeArena::new();
        let mut chain = vec![ScopeId::ROOT];
        for _ in 0..depth {
            let next = arena.push(*chain.last().unwrap());
            chain.push(next);
        }
        let bind_at = bind_at.min(depth);
        arena.bind(chain[bind_at], &name, &value);

        let innermost = *chain.last().unwrap();
        prop_assert_eq!(arena.resolve(innermost, &name), Some(value.as_str()));
        if bind_at > 0 {
            prop_assert_eq!(arena.resolve(ScopeId::ROOT, &name), None);
        }
    }
}
