//! Analysis loop over a host symbol table

use crate::adapter::adapt;
use crate::config::{Config, TypeSuppressions};
use crate::diagnostic::Finding;
use crate::evaluator::evaluate;
use crate::rule::STATIC_INITIALIZER_RULE;
use crate::symbol::{Symbol, SymbolKind};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Result of an analysis pass
#[derive(Debug, Default)]
pub struct AnalysisResult<'a> {
    /// Findings, in symbol order
    pub findings: Vec<Finding<'a>>,

    /// Named types that were evaluated
    pub types_analyzed: usize,

    /// Named types skipped (generated code, disabled rule)
    pub types_skipped: usize,

    /// Findings dropped by per-type suppressions
    pub suppressed_count: usize,

    /// Total warnings
    pub warning_count: usize,

    /// Processing duration
    pub duration: Duration,
}

impl<'a> AnalysisResult<'a> {
    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }

    /// Check if result is clean (no warnings)
    pub fn is_clean(&self) -> bool {
        self.warning_count == 0
    }

    /// Get exit code (0 = clean, 1 = warnings)
    pub fn exit_code(&self) -> i32 {
        if self.warning_count > 0 {
            1
        } else {
            0
        }
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: AnalysisResult<'a>) {
        self.findings.extend(other.findings);
        self.types_analyzed += other.types_analyzed;
        self.types_skipped += other.types_skipped;
        self.suppressed_count += other.suppressed_count;
        self.warning_count += other.warning_count;
    }
}

/// Runs the static initializer rule over every named type a host supplies
pub struct Engine {
    config: Config,
    suppressions: TypeSuppressions,
}

impl Engine {
    /// Create a new engine with configuration
    pub fn new(config: Config) -> Self {
        let suppressions = TypeSuppressions::build(&config.rules, STATIC_INITIALIZER_RULE.id);
        Self {
            config,
            suppressions,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze all symbols and collect findings
    pub fn analyze<'a>(&self, symbols: &'a [Symbol]) -> AnalysisResult<'a> {
        let start = Instant::now();

        let results: Vec<AnalysisResult<'a>> = if self.config.engine.parallel {
            self.analyze_parallel(symbols)
        } else {
            symbols.iter().map(|s| self.analyze_symbol(s)).collect()
        };

        let mut combined = AnalysisResult::default();
        for result in results {
            combined.merge(result);
        }

        combined.duration = start.elapsed();
        log::info!(
            "analyzed {} types ({} skipped), {} findings in {:?}",
            combined.types_analyzed,
            combined.types_skipped,
            combined.findings.len(),
            combined.duration
        );
        combined
    }

    /// Analyze all symbols sequentially, handing each finding to `sink`
    ///
    /// The returned result carries the counters only; its `findings` is empty.
    pub fn analyze_with<'a, F>(&self, symbols: &'a [Symbol], mut sink: F) -> AnalysisResult<'a>
    where
        F: FnMut(Finding<'a>),
    {
        let start = Instant::now();
        let mut combined = AnalysisResult::default();

        for symbol in symbols {
            let mut result = self.analyze_symbol(symbol);
            for finding in result.findings.drain(..) {
                sink(finding);
            }
            combined.merge(result);
        }

        combined.duration = start.elapsed();
        combined
    }

    fn analyze_parallel<'a>(&self, symbols: &'a [Symbol]) -> Vec<AnalysisResult<'a>> {
        let threads = if self.config.engine.jobs > 0 {
            self.config.engine.jobs
        } else {
            num_cpus::get()
        };

        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(|| {
                symbols
                    .par_iter()
                    .map(|s| self.analyze_symbol(s))
                    .collect()
            }),
            Err(e) => {
                log::warn!("failed to build thread pool, analyzing sequentially: {}", e);
                symbols.iter().map(|s| self.analyze_symbol(s)).collect()
            }
        }
    }

    /// Analyze a single symbol
    pub fn analyze_symbol<'a>(&self, symbol: &'a Symbol) -> AnalysisResult<'a> {
        let mut result = AnalysisResult::default();

        if symbol.kind() != SymbolKind::NamedType {
            log::debug!("skipping {} symbol {}", symbol.kind(), symbol.name());
            return result;
        }

        let rule_id = STATIC_INITIALIZER_RULE.id;
        if !self.config.is_rule_enabled(rule_id) {
            result.types_skipped = 1;
            return result;
        }

        let is_generated = symbol.as_named_type().is_some_and(|t| t.is_generated);
        if is_generated && !self.config.engine.analyze_generated {
            log::debug!("skipping generated type {}", symbol.name());
            result.types_skipped = 1;
            return result;
        }

        let view = match adapt(symbol) {
            Ok(view) => view,
            Err(e) => {
                log::warn!("cannot analyze {}: {}", symbol.name(), e);
                return result;
            }
        };

        log::trace!(
            "{}: static initializer = {}, static methods = {}",
            view.name,
            view.has_static_initializer,
            view.static_method_count
        );
        result.types_analyzed = 1;

        if let Some(finding) = evaluate(&view, &self.config.static_initializer) {
            if self.suppressions.is_suppressed(view.name) {
                log::debug!("{} suppressed for {}", rule_id, view.name);
                result.suppressed_count = 1;
            } else {
                result.warning_count += 1;
                result.findings.push(finding);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{NamedTypeSymbol, OtherSymbol};

    fn heavy(name: &str) -> Symbol {
        NamedTypeSymbol::new(name)
            .with_static_constructor()
            .with_static_methods(51)
            .into()
    }

    fn sequential() -> Config {
        let mut config = Config::new();
        config.engine.parallel = false;
        config
    }

    #[test]
    fn test_analysis_result_exit_code() {
        let mut result = AnalysisResult::default();
        assert_eq!(result.exit_code(), 0);
        assert!(result.is_clean());

        result.warning_count = 1;
        assert_eq!(result.exit_code(), 1);
        assert!(result.has_warnings());
        assert!(!result.is_clean());
    }

    #[test]
    fn test_analysis_result_merge() {
        let mut result1 = AnalysisResult {
            types_analyzed: 1,
            warning_count: 2,
            ..Default::default()
        };
        let result2 = AnalysisResult {
            types_analyzed: 3,
            types_skipped: 1,
            suppressed_count: 1,
            ..Default::default()
        };

        result1.merge(result2);
        assert_eq!(result1.types_analyzed, 4);
        assert_eq!(result1.types_skipped, 1);
        assert_eq!(result1.suppressed_count, 1);
        assert_eq!(result1.warning_count, 2);
    }

    #[test]
    fn test_non_type_symbols_are_ignored() {
        let symbols = vec![Symbol::Namespace(OtherSymbol {
            name: "Ns".to_string(),
        })];

        let result = Engine::new(sequential()).analyze(&symbols);
        assert_eq!(result.types_analyzed, 0);
        assert_eq!(result.types_skipped, 0);
        assert!(result.findings.is_empty());
    }

    struct CaptureLogger;

    static CAPTURED: std::sync::Mutex<Vec<(log::Level, String)>> =
        std::sync::Mutex::new(Vec::new());

    impl log::Log for CaptureLogger {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            let message = record.args().to_string();
            if message.contains("Ns.SkippedField") {
                CAPTURED.lock().unwrap().push((record.level(), message));
            }
        }

        fn flush(&self) {}
    }

    #[test]
    fn test_non_type_skip_logged_at_debug() {
        if log::set_logger(&CaptureLogger).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }

        let symbols = vec![Symbol::Field(OtherSymbol {
            name: "Ns.SkippedField".to_string(),
        })];
        Engine::new(sequential()).analyze(&symbols);

        let captured = CAPTURED.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].0, log::Level::Debug);
        assert_eq!(captured[0].1, "skipping field symbol Ns.SkippedField");
    }

    #[test]
    fn test_disabled_rule() {
        let mut config = sequential();
        config.rules.disabled.push("UNOM0003".to_string());

        let symbols = vec![heavy("Foo")];
        let result = Engine::new(config).analyze(&symbols);
        assert!(result.findings.is_empty());
        assert_eq!(result.types_skipped, 1);
    }

    #[test]
    fn test_generated_types() {
        let symbols: Vec<Symbol> = vec![NamedTypeSymbol::new("Gen.Foo")
            .with_static_constructor()
            .with_static_methods(60)
            .generated()
            .into()];

        let result = Engine::new(sequential()).analyze(&symbols);
        assert_eq!(result.findings.len(), 1);

        let mut config = sequential();
        config.engine.analyze_generated = false;
        let result = Engine::new(config).analyze(&symbols);
        assert!(result.findings.is_empty());
        assert_eq!(result.types_skipped, 1);
    }

    #[test]
    fn test_per_type_suppression() {
        let mut config = sequential();
        config
            .rules
            .per_type
            .insert("Legacy.*".to_string(), vec!["UNOM0003".to_string()]);

        let symbols = vec![heavy("Legacy.Foo"), heavy("App.Foo")];
        let result = Engine::new(config).analyze(&symbols);

        assert_eq!(result.findings.len(), 1);
        assert!(result.findings[0].message.starts_with("App.Foo "));
        assert_eq!(result.suppressed_count, 1);
        assert_eq!(result.warning_count, 1);
        assert_eq!(result.types_analyzed, 2);
    }

    #[test]
    fn test_suppressions_compiled_once_for_parallel_run() {
        let mut config = Config::new();
        config.engine.jobs = 4;
        config
            .rules
            .per_type
            .insert("[".to_string(), vec!["all".to_string()]);
        config
            .rules
            .per_type
            .insert("Legacy.*".to_string(), vec!["all".to_string()]);

        let engine = Engine::new(config);
        assert!(!engine.suppressions.is_empty());

        let symbols: Vec<Symbol> = (0..32)
            .map(|i| {
                if i % 2 == 0 {
                    heavy(&format!("Legacy.T{}", i))
                } else {
                    heavy(&format!("App.T{}", i))
                }
            })
            .collect();

        let result = engine.analyze(&symbols);
        assert_eq!(result.findings.len(), 16);
        assert_eq!(result.suppressed_count, 16);
        assert!(result
            .findings
            .iter()
            .all(|f| f.message.starts_with("App.")));
    }

    #[test]
    fn test_threshold_from_config() {
        let mut config = sequential();
        config.static_initializer.method_threshold = 2;

        let symbols: Vec<Symbol> = vec![NamedTypeSymbol::new("Small")
            .with_static_constructor()
            .with_static_methods(3)
            .into()];

        let result = Engine::new(config).analyze(&symbols);
        assert_eq!(result.findings.len(), 1);
    }

    #[test]
    fn test_analyze_with_sink() {
        let symbols: Vec<Symbol> = vec![heavy("A"), heavy("B"), NamedTypeSymbol::new("C").into()];
        let mut seen = Vec::new();

        let result = Engine::new(Config::new()).analyze_with(&symbols, |f| seen.push(f.message));

        assert_eq!(seen.len(), 2);
        assert!(seen[0].starts_with("A "));
        assert!(seen[1].starts_with("B "));
        assert!(result.findings.is_empty());
        assert_eq!(result.warning_count, 2);
        assert_eq!(result.types_analyzed, 3);
    }
}
