//! Violation class catalog.
//!
//! Each class is produced by exactly one check, carries a fixed severity and a
//! message template with `{{name}}` placeholders.

use crate::ids;
use crate::receipt::Severity;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassSpec {
    pub class: &'static str,
    pub check_id: &'static str,
    pub severity: Severity,
    pub template: &'static str,
}

const CLASSES: &[ClassSpec] = &[
    ClassSpec {
        class: ids::CLASS_MARGIN_SPACING,
        check_id: ids::CHECK_TOKENS_MARGIN_SPACING,
        severity: Severity::Major,
        template: "{{component}} must not carry vertical margin ({{tokens}}); use layout spacing on the parent instead",
    },
    ClassSpec {
        class: ids::CLASS_FORBIDDEN_COMBINATION,
        check_id: ids::CHECK_TOKENS_COLOR,
        severity: Severity::Major,
        template: "Color '{{color}}' is not allowed for typography role '{{role}}' (allowed: {{allowed}})",
    },
    ClassSpec {
        class: ids::CLASS_INVERSE_ON_LIGHT_SURFACE,
        check_id: ids::CHECK_TOKENS_COLOR,
        severity: Severity::Critical,
        template: "Inverse text color '{{color}}' is used together with light surface '{{surface}}'",
    },
    ClassSpec {
        class: ids::CLASS_MUTED_ON_READABLE_ROLE,
        check_id: ids::CHECK_TOKENS_COLOR,
        severity: Severity::Major,
        template: "'{{color}}' text color must not be used for readable role '{{role}}'",
    },
    ClassSpec {
        class: ids::CLASS_INLINE_COLOR,
        check_id: ids::CHECK_TOKENS_COLOR,
        severity: Severity::Major,
        template: "Inline style.color is forbidden on {{component}}; use the color prop with a text color token",
    },
    ClassSpec {
        class: ids::CLASS_RAW_LINE_HEIGHT,
        check_id: ids::CHECK_TOKENS_RHYTHM,
        severity: Severity::Minor,
        template: "Raw line-height '{{value}}' in {{context}}; use a line-height token",
    },
    ClassSpec {
        class: ids::CLASS_INLINE_LINE_HEIGHT,
        check_id: ids::CHECK_TOKENS_RHYTHM,
        severity: Severity::Major,
        template: "Inline style lineHeight '{{value}}' on {{component}}; use a line-height token",
    },
    ClassSpec {
        class: ids::CLASS_ROLE_LINE_HEIGHT_MISMATCH,
        check_id: ids::CHECK_TOKENS_RHYTHM,
        severity: Severity::Major,
        template: "Typography role '{{role}}' requires line-height token '{{expected}}', found '{{value}}'",
    },
    ClassSpec {
        class: ids::CLASS_V1_CLASS_NAME,
        check_id: ids::CHECK_CLOSED_SYSTEM,
        severity: Severity::Critical,
        template: "V1: className passed to regulated component {{component}}",
    },
    ClassSpec {
        class: ids::CLASS_V2_INLINE_STYLE,
        check_id: ids::CHECK_CLOSED_SYSTEM,
        severity: Severity::Critical,
        template: "V2: inline style passed to regulated component {{component}}",
    },
    ClassSpec {
        class: ids::CLASS_V3_UTILITY_WRAPPER,
        check_id: ids::CHECK_CLOSED_SYSTEM,
        severity: Severity::Major,
        template: "V3: <{{tag}}> wrapper styles regulated component {{component}} with utility classes ({{classes}})",
    },
    ClassSpec {
        class: ids::CLASS_V4_RAW_HTML,
        check_id: ids::CHECK_CLOSED_SYSTEM,
        severity: Severity::Minor,
        template: "V4: raw <{{tag}}> used while {{alternatives}} is imported",
    },
    ClassSpec {
        class: ids::CLASS_V5_UNTYPED_SPREAD,
        check_id: ids::CHECK_CLOSED_SYSTEM,
        severity: Severity::Major,
        template: "V5: untyped spread '{{expression}}' passed to regulated component {{component}}",
    },
];

/// All known violation classes, in catalog order.
pub fn all_classes() -> &'static [ClassSpec] {
    CLASSES
}

/// All known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_TOKENS_MARGIN_SPACING,
        ids::CHECK_TOKENS_COLOR,
        ids::CHECK_TOKENS_RHYTHM,
        ids::CHECK_CLOSED_SYSTEM,
    ]
}

pub fn lookup_class(class: &str) -> Option<&'static ClassSpec> {
    CLASSES.iter().find(|c| c.class == class)
}

/// Substitute `{{name}}` placeholders with string values from a JSON object.
///
/// Missing keys render as an empty string; non-string values use their JSON text.
pub fn render_template(template: &str, data: &Value) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = after[..end].trim();
        match data.get(key) {
            Some(Value::String(s)) => out.push_str(s),
            Some(Value::Null) | None => {}
            Some(other) => out.push_str(&other.to_string()),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_class_belongs_to_a_known_check() {
        for spec in all_classes() {
            assert!(
                all_check_ids().contains(&spec.check_id),
                "class {} points at unknown check {}",
                spec.class,
                spec.check_id
            );
        }
    }

    #[test]
    fn class_ids_are_unique() {
        let mut seen = std::collections::BTreeSet::new();
        for spec in all_classes() {
            assert!(seen.insert(spec.class), "duplicate class {}", spec.class);
        }
    }

    #[test]
    fn render_template_substitutes_and_blanks_missing_keys() {
        let data = json!({ "role": "body", "color": "muted" });
        let rendered = render_template(
            "Color '{{color}}' is not allowed for typography role '{{role}}' (allowed: {{allowed}})",
            &data,
        );
        assert_eq!(
            rendered,
            "Color 'muted' is not allowed for typography role 'body' (allowed: )"
        );
    }

    #[test]
    fn render_template_keeps_unterminated_placeholder() {
        let rendered = render_template("broken {{role", &json!({ "role": "x" }));
        assert_eq!(rendered, "broken {{role");
    }

    #[test]
    fn lookup_unknown_class_returns_none() {
        assert!(lookup_class("no_such_class").is_none());
        assert_eq!(
            lookup_class(ids::CLASS_V3_UTILITY_WRAPPER).map(|c| c.severity),
            Some(Severity::Major)
        );
    }
}
