//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - class-list tokenisation (margin and utility detection)
//! - evaluation of arbitrary markup never panicking
//! - every produced finding mapping onto a known class and template

use crate::checks::vertical_margin_classes;
use crate::engine::evaluate_unit;
use crate::policy::EffectiveConfig;
use crate::registry::Registries;
use proptest::prelude::*;
use tokenguard_syntax::parse_source;
use tokenguard_types::{RepoPath, lookup_class};

fn arb_class_token() -> impl Strategy<Value = String> {
    let variant = prop::sample::select(vec!["", "md:", "hover:", "lg:focus:"]);
    let modifier = prop::sample::select(vec!["", "!", "-"]);
    let base = prop::sample::select(vec![
        "mt-4", "mb-2", "my-1", "m-0", "mx-4", "ml-2", "mr-3", "p-2", "text-muted", "flex",
    ]);
    (variant, modifier, base).prop_map(|(v, m, b)| format!("{v}{m}{b}"))
}

fn arb_attribute() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::collection::vec(arb_class_token(), 0..5)
            .prop_map(|tokens| format!(" className=\"{}\"", tokens.join(" "))),
        Just(" style={{ lineHeight: 1.5, marginTop: 2 }}".to_string()),
        Just(" typographyRole=\"body\"".to_string()),
        Just(" color=\"muted\"".to_string()),
        Just(" {...rest}".to_string()),
        Just(" lineHeight=\"tight\"".to_string()),
    ]
}

fn arb_element() -> impl Strategy<Value = String> {
    let tag = prop::sample::select(vec!["Text", "Heading", "Box", "div", "button", "span"]);
    (tag, prop::collection::vec(arb_attribute(), 0..4))
        .prop_map(|(tag, attrs)| format!("<{tag}{} />", attrs.concat()))
}

proptest! {
    #[test]
    fn vertical_margin_tokens_are_exactly_the_vertical_bases(
        tokens in prop::collection::vec(arb_class_token(), 0..8)
    ) {
        let reg = Registries::standard();
        let joined = tokens.join(" ");
        let found = vertical_margin_classes(&joined, &reg);
        let expected: Vec<&str> = tokens
            .iter()
            .map(String::as_str)
            .filter(|t| {
                let base = t.rsplit(':').next().unwrap_or_default().trim_start_matches(['!', '-']);
                ["mt-", "mb-", "my-", "m-"].iter().any(|p| base.starts_with(p))
            })
            .collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn evaluation_never_panics_and_findings_are_catalogued(
        elements in prop::collection::vec(arb_element(), 0..6)
    ) {
        let text = format!(
            "import {{ Text, Heading, Box, Button }} from '@northstar/ui';\nconst view = <>{}</>;\n",
            elements.concat()
        );
        let unit = parse_source(&RepoPath::new("src/View.tsx"), &text)
            .expect("generated markup parses");
        let findings = evaluate_unit(&unit, &EffectiveConfig::default(), &Registries::standard());
        for finding in &findings {
            let spec = lookup_class(&finding.violation_class);
            prop_assert!(spec.is_some());
            let spec = spec.unwrap();
            prop_assert_eq!(&finding.check_id, spec.check_id);
            prop_assert_eq!(finding.severity, spec.severity);
            prop_assert!(finding.location.line >= 1);
        }
    }

    #[test]
    fn evaluation_is_deterministic(elements in prop::collection::vec(arb_element(), 0..6)) {
        let text = format!("import {{ Text }} from '@northstar/ui';\nconst v = <>{}</>;\n", elements.concat());
        let unit = parse_source(&RepoPath::new("src/View.tsx"), &text).expect("parses");
        let cfg = EffectiveConfig::default();
        let reg = Registries::standard();
        prop_assert_eq!(evaluate_unit(&unit, &cfg, &reg), evaluate_unit(&unit, &cfg, &reg));
    }
}
