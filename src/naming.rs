//! Target identifiers for shapes, members and runtime types.
//!
//! The renderer asks a [`SymbolProvider`] for every name it writes. The
//! shipped provider, [`KotlinSymbols`], follows the usual Kotlin SDK
//! conventions: PascalCase types, camelCase members, backtick-escaped
//! keywords.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::schema::{Shape, ShapeCategory};

pub const DEFAULT_RUNTIME_PACKAGE: &str = "aws.smithy.kotlin.runtime";

static INVALID_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("valid pattern"));
static LEADING_UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]+").expect("valid pattern"));
static UNDERSCORE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+([A-Za-z0-9])").expect("valid pattern"));

const KOTLIN_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw",
    "true", "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// A name that may need an import.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    pub namespace: String,
    pub name: String,
}

impl Symbol {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self { namespace: namespace.into(), name: name.into() }
    }

    pub fn fully_qualified(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

/// Runtime library types the emitted literals construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeType {
    Instant,
    ByteStream,
    Document,
    BuildDocument,
    BigInteger,
    BigDecimal,
}

pub trait SymbolProvider {
    /// Type name used for constructors, companion calls and sentinels.
    fn type_name(&self, shape: &Shape) -> String;

    fn member_field_name(&self, shape: &Shape, member: &str) -> String;

    fn variant_name(&self, shape: &Shape, member: &str) -> String;

    /// The generated type's symbol, if the shape has one that must be imported.
    fn symbol_for(&self, shape: &Shape) -> Option<Symbol>;

    /// Builder function for list, set and map literals.
    fn collection_builder(&self, category: ShapeCategory) -> &'static str;

    fn runtime(&self, ty: RuntimeType) -> Symbol;
}

// --------------------------- Kotlin naming -------------------------------- //

#[derive(Debug, Clone)]
pub struct KotlinSymbols {
    runtime_package: String,
    model_package: Option<String>,
}

impl Default for KotlinSymbols {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME_PACKAGE, None)
    }
}

impl KotlinSymbols {
    /// `model_package` defaults to each shape's namespace.
    pub fn new(runtime_package: impl Into<String>, model_package: Option<String>) -> Self {
        Self { runtime_package: runtime_package.into(), model_package }
    }
}

impl SymbolProvider for KotlinSymbols {
    fn type_name(&self, shape: &Shape) -> String {
        use ShapeCategory as C;
        let builtin = match shape.category() {
            C::Boolean => "Boolean",
            C::String => "String",
            C::Byte => "Byte",
            C::Short => "Short",
            C::Integer => "Int",
            C::Long => "Long",
            C::Float => "Float",
            C::Double => "Double",
            C::Blob => "ByteArray",
            C::StreamingBlob => "ByteStream",
            C::Timestamp => "Instant",
            C::Document => "Document",
            C::BigInteger => "BigInteger",
            C::BigDecimal => "BigDecimal",
            C::Structure | C::Union | C::Enum | C::IntEnum | C::List | C::Set | C::Map => {
                return pascal_case(shape.id.name());
            }
        };
        builtin.to_string()
    }

    fn member_field_name(&self, _shape: &Shape, member: &str) -> String {
        escape_keyword(camel_case(member))
    }

    fn variant_name(&self, _shape: &Shape, member: &str) -> String {
        pascal_case(&camel_case(member))
    }

    fn symbol_for(&self, shape: &Shape) -> Option<Symbol> {
        use ShapeCategory as C;
        match shape.category() {
            C::Structure | C::Union | C::Enum | C::IntEnum => {
                let namespace = self
                    .model_package
                    .clone()
                    .unwrap_or_else(|| shape.id.namespace().to_string());
                Some(Symbol::new(namespace, self.type_name(shape)))
            }
            _ => None,
        }
    }

    fn collection_builder(&self, category: ShapeCategory) -> &'static str {
        match category {
            ShapeCategory::Set => "setOf",
            ShapeCategory::Map => "mapOf",
            _ => "listOf",
        }
    }

    fn runtime(&self, ty: RuntimeType) -> Symbol {
        let (package, name) = match ty {
            RuntimeType::Instant => ("time", "Instant"),
            RuntimeType::ByteStream => ("content", "ByteStream"),
            RuntimeType::Document => ("content", "Document"),
            RuntimeType::BuildDocument => ("content", "buildDocument"),
            RuntimeType::BigInteger => ("content", "BigInteger"),
            RuntimeType::BigDecimal => ("content", "BigDecimal"),
        };
        Symbol::new(format!("{}.{package}", self.runtime_package), name)
    }
}

// ------------------------------ Helpers ----------------------------------- //

fn sanitize(raw: &str) -> String {
    let cleaned = INVALID_CHARS.replace_all(raw, "_");
    if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{cleaned}")
    } else {
        cleaned.into_owned()
    }
}

/// `fooBar` / `foo_bar` → `FooBar`.
pub fn pascal_case(raw: &str) -> String {
    let camel = camel_case(raw);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => camel,
    }
}

/// `FooBar` → `fooBar`, `HTTPServer` → `httpServer`, `foo_bar` → `fooBar`.
pub fn camel_case(raw: &str) -> String {
    let sanitized = sanitize(raw);
    let joined = UNDERSCORE_WORD.replace_all(&sanitized, |caps: &Captures| caps[1].to_uppercase());
    let joined = joined.trim_end_matches('_');
    LEADING_UPPER
        .replace(joined, |caps: &Captures| {
            let run = &caps[0];
            let whole = run.len() == joined.len();
            let next_is_lower = joined[run.len()..].starts_with(|c: char| c.is_ascii_lowercase());
            if run.len() > 1 && !whole && next_is_lower {
                // keep the last capital, it starts the next word
                let (head, last) = run.split_at(run.len() - 1);
                format!("{}{last}", head.to_lowercase())
            } else {
                run.to_lowercase()
            }
        })
        .into_owned()
}

fn escape_keyword(name: String) -> String {
    if KOTLIN_KEYWORDS.contains(&name.as_str()) {
        format!("`{name}`")
    } else {
        name
    }
}

// ------------------------------- Tests ------------------------------------ //
