//! Threshold policy for the static initializer rule

use crate::adapter::{adapt, AdaptError, TypeSymbolView};
use crate::config::RuleConfig;
use crate::diagnostic::Finding;
use crate::rule::STATIC_INITIALIZER_RULE;
use crate::symbol::Symbol;

/// Check whether a view violates the rule
pub fn is_violation(view: &TypeSymbolView<'_>, config: &RuleConfig) -> bool {
    view.has_static_initializer && view.static_method_count > config.method_threshold
}

/// Build the finding message for a type
pub fn format_message(name: &str) -> String {
    STATIC_INITIALIZER_RULE.format_message(name)
}

/// Evaluate one type. Returns `None` when the type is within policy.
pub fn evaluate<'a>(view: &TypeSymbolView<'a>, config: &RuleConfig) -> Option<Finding<'a>> {
    if !is_violation(view, config) {
        return None;
    }

    log::debug!(
        "{}: {} static methods with a static initializer (threshold {})",
        view.name,
        view.static_method_count,
        config.method_threshold
    );

    Some(Finding::new(
        STATIC_INITIALIZER_RULE.id,
        STATIC_INITIALIZER_RULE.default_severity,
        STATIC_INITIALIZER_RULE.category,
        format_message(view.name),
        view.location,
    ))
}

/// Adapt and evaluate a host symbol in one step
pub fn check<'a>(
    symbol: &'a Symbol,
    config: &RuleConfig,
) -> Result<Option<Finding<'a>>, AdaptError> {
    let view = adapt(symbol)?;
    Ok(evaluate(&view, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Location, Severity};
    use crate::rule::RuleCategory;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn view(name: &str, has_static_initializer: bool, count: usize) -> TypeSymbolView<'_> {
        TypeSymbolView {
            name,
            has_static_initializer,
            static_method_count: count,
            location: None,
        }
    }

    #[test]
    fn test_no_initializer_never_triggers() {
        let config = RuleConfig::default();
        for count in [0, 50, 51, 1000] {
            assert_eq!(evaluate(&view("Baz", false, count), &config), None);
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let config = RuleConfig::default();
        assert_eq!(evaluate(&view("Bar", true, 50), &config), None);
        assert!(evaluate(&view("Foo", true, 51), &config).is_some());
    }

    #[test]
    fn test_custom_threshold() {
        let config = RuleConfig { method_threshold: 5 };
        assert_eq!(evaluate(&view("T", true, 5), &config), None);
        assert!(evaluate(&view("T", true, 6), &config).is_some());

        let zero = RuleConfig { method_threshold: 0 };
        assert_eq!(evaluate(&view("T", true, 0), &zero), None);
        assert!(evaluate(&view("T", true, 1), &zero).is_some());
    }

    #[test]
    fn test_finding_contents() {
        let loc = Location::new(PathBuf::from("Foo.cs"), 10, 18);
        let view = TypeSymbolView {
            name: "Foo",
            has_static_initializer: true,
            static_method_count: 51,
            location: Some(&loc),
        };

        let finding = evaluate(&view, &RuleConfig::default()).unwrap();
        assert_eq!(finding.rule_id, "UNOM0003");
        assert_eq!(finding.severity, Severity::Warning);
        assert_eq!(finding.category, RuleCategory::Performance);
        assert_eq!(
            finding.message,
            "Foo has a static type initializer and contains too many static methods. Refactor to use instance methods or remove the static type initializer."
        );
        assert!(std::ptr::eq(finding.location.unwrap(), &loc));
    }

    #[test]
    fn test_missing_location_still_reports() {
        let finding = evaluate(&view("Ns.NoLoc", true, 60), &RuleConfig::default()).unwrap();
        assert!(finding.location.is_none());
        assert!(finding.message.starts_with("Ns.NoLoc has"));
    }

    #[test]
    fn test_check_symbol() {
        use crate::symbol::{NamedTypeSymbol, OtherSymbol, SymbolKind};

        let config = RuleConfig::default();
        let foo: Symbol = NamedTypeSymbol::new("Foo")
            .with_static_constructor()
            .with_static_methods(51)
            .into();
        let finding = check(&foo, &config).unwrap().unwrap();
        assert_eq!(finding.message, format_message("Foo"));

        let bar: Symbol = NamedTypeSymbol::new("Bar")
            .with_static_constructor()
            .with_static_methods(50)
            .into();
        assert_eq!(check(&bar, &config).unwrap(), None);

        let field = Symbol::Field(OtherSymbol::default());
        assert_eq!(
            check(&field, &config),
            Err(AdaptError::InvalidInputKind {
                kind: SymbolKind::Field
            })
        );
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let config = RuleConfig::default();
        let v = view("Foo", true, 51);
        assert_eq!(evaluate(&v, &config), evaluate(&v, &config));
    }
}
