//! static-init-lint - static initializer overhead rule
//!
//! Flags named types that declare a static type initializer together with
//! more than a configurable number (default 50) of static methods. Every
//! static method of such a type pays for the initializer check on entry.
//!
//! # Architecture
//!
//! ```text
//! Host symbol table -> adapt -> TypeSymbolView -> evaluate -> Finding
//! ```
//!
//! [`adapt`] and [`evaluate`] are pure and can be called from any host loop,
//! from any number of threads. [`Engine`] is a ready-made loop over a
//! [`SymbolTable`] with configuration, suppressions and parallelism.
//!
//! ```
//! use static_init_lint::{check, NamedTypeSymbol, RuleConfig, Symbol};
//!
//! let symbol: Symbol = NamedTypeSymbol::new("Foo")
//!     .with_static_constructor()
//!     .with_static_methods(51)
//!     .into();
//!
//! let finding = check(&symbol, &RuleConfig::default()).unwrap().unwrap();
//! assert_eq!(finding.rule_id, "UNOM0003");
//! ```

pub mod adapter;
pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod evaluator;
pub mod rule;
pub mod symbol;

// Re-export main types
pub use adapter::{adapt, AdaptError, TypeSymbolView};
pub use config::{Config, ConfigError, EngineConfig, RuleConfig, RulesConfig, TypeSuppressions};
pub use diagnostic::{Finding, Location, Severity};
pub use engine::{AnalysisResult, Engine};
pub use evaluator::{check, evaluate, format_message};
pub use rule::{RuleCategory, RuleDescriptor, STATIC_INITIALIZER_RULE};
pub use symbol::{
    ConstructorSymbol, MemberKind, MemberSymbol, NamedTypeSymbol, OtherSymbol, Symbol, SymbolKind,
    SymbolTable, SymbolTableError,
};
