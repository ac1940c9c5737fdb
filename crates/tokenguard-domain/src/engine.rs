use crate::checks;
use crate::collector::FindingCollector;
use crate::policy::{EffectiveConfig, FailOn};
use crate::registry::Registries;
use crate::report::DomainReport;
use crate::rule::{Rule, RuleContext};
use crate::scope::FileBindings;
use tokenguard_syntax::{
    Element, ImportDecl, Property, SourceUnit, SyntaxNode, Template, Visitor, WalkContext, walk,
};
use tokenguard_types::{Finding, SeverityCounts, Verdict};

/// Forwards every visited node to each enabled rule.
struct Dispatch<'a> {
    rules: Vec<&'static dyn Rule>,
    registries: &'a Registries,
    bindings: FileBindings,
    collector: FindingCollector,
}

impl Visitor for Dispatch<'_> {
    fn visit_import(&mut self, node: &SyntaxNode, import: &ImportDecl, walk: &WalkContext<'_>) {
        let cx = RuleContext {
            registries: self.registries,
            bindings: &self.bindings,
            walk,
        };
        for rule in &self.rules {
            rule.on_import(&cx, node, import, &mut self.collector);
        }
    }

    fn visit_element(&mut self, node: &SyntaxNode, element: &Element, walk: &WalkContext<'_>) {
        let cx = RuleContext {
            registries: self.registries,
            bindings: &self.bindings,
            walk,
        };
        for rule in &self.rules {
            rule.on_element(&cx, node, element, &mut self.collector);
        }
    }

    fn visit_string(&mut self, node: &SyntaxNode, value: &str, walk: &WalkContext<'_>) {
        let cx = RuleContext {
            registries: self.registries,
            bindings: &self.bindings,
            walk,
        };
        for rule in &self.rules {
            rule.on_string(&cx, node, value, &mut self.collector);
        }
    }

    fn visit_template(&mut self, node: &SyntaxNode, template: &Template, walk: &WalkContext<'_>) {
        let cx = RuleContext {
            registries: self.registries,
            bindings: &self.bindings,
            walk,
        };
        for rule in &self.rules {
            rule.on_template(&cx, node, template, &mut self.collector);
        }
    }

    fn visit_property(&mut self, node: &SyntaxNode, property: &Property, walk: &WalkContext<'_>) {
        let cx = RuleContext {
            registries: self.registries,
            bindings: &self.bindings,
            walk,
        };
        for rule in &self.rules {
            rule.on_property(&cx, node, property, &mut self.collector);
        }
    }
}

/// Runs every enabled rule over one file in a single walk.
///
/// Findings come back in walk order; nothing is sorted, merged or dropped.
pub fn evaluate_unit(
    unit: &SourceUnit,
    cfg: &EffectiveConfig,
    registries: &Registries,
) -> Vec<Finding> {
    let rules = checks::enabled_rules(cfg, &unit.path);
    if rules.is_empty() {
        return Vec::new();
    }

    let mut dispatch = Dispatch {
        rules,
        registries,
        bindings: FileBindings::from_imports(unit.imports(), registries),
        collector: FindingCollector::new(unit.path.clone()),
    };
    walk(unit, &mut dispatch);
    dispatch.collector.into_findings()
}

/// Evaluates files in the order given and concatenates their findings.
pub fn evaluate(units: &[SourceUnit], cfg: &EffectiveConfig, registries: &Registries) -> DomainReport {
    let findings: Vec<Finding> = units
        .iter()
        .flat_map(|unit| evaluate_unit(unit, cfg, registries))
        .collect();
    DomainReport::new(findings, cfg.fail_on)
}

pub fn compute_verdict(findings: &[Finding], fail_on: FailOn) -> Verdict {
    if findings.is_empty() {
        return Verdict::Pass;
    }
    let fails = fail_on
        .threshold()
        .is_some_and(|threshold| findings.iter().any(|f| f.severity >= threshold));
    if fails { Verdict::Fail } else { Verdict::Warn }
}

pub fn severity_counts(findings: &[Finding]) -> SeverityCounts {
    let mut counts = SeverityCounts::default();
    for f in findings {
        counts.add(f.severity);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::parse;
    use tokenguard_types::ids;

    const SOURCE: &str = r#"
import { Text } from '@northstar/ui';

export const Title = () => <Text className="mt-4" typographyRole="body" color="muted" />;
"#;

    #[test]
    fn verdict_fails_only_at_or_above_threshold() {
        let unit = parse("src/Title.tsx", SOURCE);
        let registries = Registries::standard();

        let mut cfg = EffectiveConfig::default();
        let report = evaluate(std::slice::from_ref(&unit), &cfg, &registries);
        assert_eq!(report.verdict, Verdict::Warn);

        cfg.fail_on = FailOn::Critical;
        assert_eq!(
            evaluate(std::slice::from_ref(&unit), &cfg, &registries).verdict,
            Verdict::Fail,
            "V1 is critical"
        );

        let cfg = EffectiveConfig {
            fail_on: FailOn::Critical,
            ..EffectiveConfig::only(&[ids::CHECK_TOKENS_COLOR])
        };
        assert_eq!(
            evaluate(std::slice::from_ref(&unit), &cfg, &registries).verdict,
            Verdict::Warn
        );
    }

    #[test]
    fn disabled_checks_produce_nothing() {
        let unit = parse("src/Title.tsx", SOURCE);
        let cfg = EffectiveConfig::only(&[]);
        assert!(evaluate_unit(&unit, &cfg, &Registries::standard()).is_empty());
    }

    #[test]
    fn findings_keep_walk_order() {
        let unit = parse("src/Title.tsx", SOURCE);
        let findings = evaluate_unit(&unit, &EffectiveConfig::default(), &Registries::standard());
        let classes: Vec<_> = findings.iter().map(|f| f.violation_class.as_str()).collect();
        assert_eq!(
            classes,
            vec![
                ids::CLASS_MARGIN_SPACING,
                ids::CLASS_FORBIDDEN_COMBINATION,
                ids::CLASS_MUTED_ON_READABLE_ROLE,
                ids::CLASS_V1_CLASS_NAME,
            ]
        );
    }

    #[test]
    fn empty_input_passes() {
        let report = evaluate(&[], &EffectiveConfig::default(), &Registries::standard());
        assert_eq!(report.verdict, Verdict::Pass);
        assert_eq!(report.counts, SeverityCounts::default());
    }
}
