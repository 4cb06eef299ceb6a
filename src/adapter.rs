//! Projection of a host symbol onto the attributes the rule inspects

use crate::diagnostic::Location;
use crate::symbol::{MemberKind, NamedTypeSymbol, Symbol, SymbolKind};
use thiserror::Error;

/// Error adapting a host symbol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdaptError {
    #[error("expected a named type symbol, got {kind}")]
    InvalidInputKind { kind: SymbolKind },
}

/// Read-only attribute view of one named type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSymbolView<'a> {
    /// Fully qualified display name
    pub name: &'a str,
    /// Declares a static constructor in source
    pub has_static_initializer: bool,
    /// Number of static methods declared directly on the type
    pub static_method_count: usize,
    /// Borrowed from the host symbol
    pub location: Option<&'a Location>,
}

impl<'a> TypeSymbolView<'a> {
    /// Build a view from a named type
    pub fn from_named_type(symbol: &'a NamedTypeSymbol) -> Self {
        // Compiler-synthesized initializers do not count
        let has_static_initializer = symbol
            .constructors
            .iter()
            .any(|c| c.is_static && !c.is_implicitly_declared);

        let static_method_count = symbol
            .members
            .iter()
            .filter(|m| m.kind == MemberKind::Method && m.is_static)
            .count();

        Self {
            name: &symbol.display_name,
            has_static_initializer,
            static_method_count,
            location: symbol.location(),
        }
    }
}

/// Adapt any host symbol, rejecting everything that is not a named type
pub fn adapt(symbol: &Symbol) -> Result<TypeSymbolView<'_>, AdaptError> {
    match symbol {
        Symbol::NamedType(ty) => Ok(TypeSymbolView::from_named_type(ty)),
        other => Err(AdaptError::InvalidInputKind { kind: other.kind() }),
    }
}
