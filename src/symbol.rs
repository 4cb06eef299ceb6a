//! Host-facing symbol model
//!
//! The host resolves declarations and hands them over in this shape, either
//! built in memory or deserialized from a JSON/YAML symbol table.

use crate::diagnostic::Location;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error reading a serialized symbol table
#[derive(Debug, Error)]
pub enum SymbolTableError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kind of a symbol in the host's symbol table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    NamedType,
    Method,
    Field,
    Property,
    Event,
    Namespace,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::NamedType => write!(f, "named_type"),
            SymbolKind::Method => write!(f, "method"),
            SymbolKind::Field => write!(f, "field"),
            SymbolKind::Property => write!(f, "property"),
            SymbolKind::Event => write!(f, "event"),
            SymbolKind::Namespace => write!(f, "namespace"),
        }
    }
}

/// Kind of a member declared directly inside a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    /// Ordinary method
    Method,
    /// User-defined operator or conversion
    Operator,
    Property,
    Field,
    Event,
    /// Type declared inside this type
    NestedType,
}

/// A constructor declared on a type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructorSymbol {
    /// Static constructor (type initializer)
    pub is_static: bool,
    /// Synthesized by the compiler rather than written in source
    pub is_implicitly_declared: bool,
}

impl ConstructorSymbol {
    /// A static constructor written in source
    pub fn static_ctor() -> Self {
        Self {
            is_static: true,
            is_implicitly_declared: false,
        }
    }

    /// An instance constructor written in source
    pub fn instance() -> Self {
        Self::default()
    }

    /// Mark as compiler-synthesized
    pub fn implicit(mut self) -> Self {
        self.is_implicitly_declared = true;
        self
    }
}

/// A member declared directly inside a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSymbol {
    /// Member name
    pub name: String,
    /// Member kind
    pub kind: MemberKind,
    /// Declared with the static modifier
    #[serde(default)]
    pub is_static: bool,
}

impl MemberSymbol {
    pub fn new(name: &str, kind: MemberKind, is_static: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            is_static,
        }
    }

    pub fn static_method(name: &str) -> Self {
        Self::new(name, MemberKind::Method, true)
    }

    pub fn instance_method(name: &str) -> Self {
        Self::new(name, MemberKind::Method, false)
    }
}

/// A class, struct, interface or similar declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedTypeSymbol {
    /// Fully qualified display name (e.g. "MyApp.Utilities.Foo")
    pub display_name: String,

    /// Constructors declared on the type
    #[serde(default)]
    pub constructors: Vec<ConstructorSymbol>,

    /// Direct members, excluding inherited ones
    #[serde(default)]
    pub members: Vec<MemberSymbol>,

    /// Declaration sites; partial types have several
    #[serde(default)]
    pub locations: Vec<Location>,

    /// Declared in generated code
    #[serde(default)]
    pub is_generated: bool,
}

impl NamedTypeSymbol {
    /// Create a type with no constructors or members
    pub fn new(display_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            ..Default::default()
        }
    }

    /// Primary location (first declaration site)
    pub fn location(&self) -> Option<&Location> {
        self.locations.first()
    }

    pub fn with_constructor(mut self, ctor: ConstructorSymbol) -> Self {
        self.constructors.push(ctor);
        self
    }

    /// Add a static constructor written in source
    pub fn with_static_constructor(self) -> Self {
        self.with_constructor(ConstructorSymbol::static_ctor())
    }

    pub fn with_member(mut self, member: MemberSymbol) -> Self {
        self.members.push(member);
        self
    }

    /// Add `count` static methods named `Method0`, `Method1`, ...
    pub fn with_static_methods(mut self, count: usize) -> Self {
        let start = self.members.len();
        self.members.extend(
            (start..start + count).map(|i| MemberSymbol::static_method(&format!("Method{}", i))),
        );
        self
    }

    /// Add `count` instance methods named `Instance0`, `Instance1`, ...
    pub fn with_instance_methods(mut self, count: usize) -> Self {
        let start = self.members.len();
        self.members.extend(
            (start..start + count).map(|i| MemberSymbol::instance_method(&format!("Instance{}", i))),
        );
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    /// Mark as generated code
    pub fn generated(mut self) -> Self {
        self.is_generated = true;
        self
    }
}

/// Symbols that are not types; carried so the host can pass an unfiltered table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherSymbol {
    pub name: String,
}

/// Any symbol the host may enumerate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Symbol {
    NamedType(NamedTypeSymbol),
    Method(OtherSymbol),
    Field(OtherSymbol),
    Property(OtherSymbol),
    Event(OtherSymbol),
    Namespace(OtherSymbol),
}

impl Symbol {
    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::NamedType(_) => SymbolKind::NamedType,
            Symbol::Method(_) => SymbolKind::Method,
            Symbol::Field(_) => SymbolKind::Field,
            Symbol::Property(_) => SymbolKind::Property,
            Symbol::Event(_) => SymbolKind::Event,
            Symbol::Namespace(_) => SymbolKind::Namespace,
        }
    }

    /// Display name regardless of kind
    pub fn name(&self) -> &str {
        match self {
            Symbol::NamedType(t) => &t.display_name,
            Symbol::Method(s)
            | Symbol::Field(s)
            | Symbol::Property(s)
            | Symbol::Event(s)
            | Symbol::Namespace(s) => &s.name,
        }
    }

    pub fn as_named_type(&self) -> Option<&NamedTypeSymbol> {
        match self {
            Symbol::NamedType(t) => Some(t),
            _ => None,
        }
    }
}

impl From<NamedTypeSymbol> for Symbol {
    fn from(symbol: NamedTypeSymbol) -> Self {
        Symbol::NamedType(symbol)
    }
}

/// A flat list of symbols handed over by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn from_json_str(content: &str) -> Result<Self, SymbolTableError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, SymbolTableError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Iterate over named-type symbols only
    pub fn named_types(&self) -> impl Iterator<Item = &NamedTypeSymbol> {
        self.symbols.iter().filter_map(Symbol::as_named_type)
    }
}
