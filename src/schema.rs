//! Shape graph the synthesizer renders against.
//!
//! A [`Model`] is an ordered set of [`Shape`]s keyed by [`ShapeId`], loaded from
//! a Smithy JSON AST document (see [`ast`]) on top of the prelude. Rendering
//! only ever talks to it through [`ShapeIndex`], so any other model store can
//! stand in.
pub mod ast;
pub mod prelude;
pub mod shape_id;

use std::fmt;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::SchemaError;

pub use shape_id::ShapeId;

pub const STREAMING_TRAIT: &str = "smithy.api#streaming";
pub const ENUM_VALUE_TRAIT: &str = "smithy.api#enumValue";
/// IDL 1.0 enum: a string shape listing its values in a trait.
pub const ENUM_TRAIT: &str = "smithy.api#enum";

// ------------------------------- Shapes ----------------------------------- //

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub traits: IndexMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub target: ShapeId,
}

/// Shape type plus whatever the type needs to describe its contents.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Structure { members: IndexMap<String, Member> },
    Union { members: IndexMap<String, Member> },
    List { member: Member },
    Set { member: Member },
    Map { key: Member, value: Member },
    Document,
    /// member name → wire value
    Enum { values: IndexMap<String, String> },
    IntEnum { values: IndexMap<String, i64> },
    Blob,
    Timestamp,
    Boolean,
    String,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    BigInteger,
    BigDecimal,
}

/// Closed set of categories the renderer dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeCategory {
    Structure,
    List,
    Set,
    Map,
    Union,
    Document,
    Enum,
    IntEnum,
    Blob,
    StreamingBlob,
    Timestamp,
    Boolean,
    String,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    BigInteger,
    BigDecimal,
}

impl Shape {
    pub fn new(id: ShapeId, kind: ShapeKind) -> Self {
        Self { id, kind, traits: IndexMap::new() }
    }

    pub fn with_trait(mut self, name: &str, value: Value) -> Self {
        self.traits.insert(name.to_string(), value);
        self
    }

    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.contains_key(name)
    }

    pub fn category(&self) -> ShapeCategory {
        use ShapeCategory as C;
        match &self.kind {
            ShapeKind::Structure { .. } => C::Structure,
            ShapeKind::Union { .. } => C::Union,
            ShapeKind::List { .. } => C::List,
            ShapeKind::Set { .. } => C::Set,
            ShapeKind::Map { .. } => C::Map,
            ShapeKind::Document => C::Document,
            ShapeKind::Enum { .. } => C::Enum,
            ShapeKind::IntEnum { .. } => C::IntEnum,
            ShapeKind::Blob if self.has_trait(STREAMING_TRAIT) => C::StreamingBlob,
            ShapeKind::Blob => C::Blob,
            ShapeKind::Timestamp => C::Timestamp,
            ShapeKind::Boolean => C::Boolean,
            ShapeKind::String if self.has_trait(ENUM_TRAIT) => C::Enum,
            ShapeKind::String => C::String,
            ShapeKind::Byte => C::Byte,
            ShapeKind::Short => C::Short,
            ShapeKind::Integer => C::Integer,
            ShapeKind::Long => C::Long,
            ShapeKind::Float => C::Float,
            ShapeKind::Double => C::Double,
            ShapeKind::BigInteger => C::BigInteger,
            ShapeKind::BigDecimal => C::BigDecimal,
        }
    }

    /// Wire values of an enum shape, either form.
    pub fn enum_values(&self) -> Option<Vec<&str>> {
        match &self.kind {
            ShapeKind::Enum { values } => Some(values.values().map(String::as_str).collect()),
            ShapeKind::String => {
                let definitions = self.traits.get(ENUM_TRAIT)?.as_array()?;
                Some(definitions.iter().filter_map(|d| d.get("value")?.as_str()).collect())
            }
            _ => None,
        }
    }

    pub fn members(&self) -> Option<&IndexMap<String, Member>> {
        match &self.kind {
            ShapeKind::Structure { members } | ShapeKind::Union { members } => Some(members),
            _ => None,
        }
    }

    /// Every shape id this shape points at.
    pub fn targets(&self) -> Vec<&ShapeId> {
        match &self.kind {
            ShapeKind::Structure { members } | ShapeKind::Union { members } => {
                members.values().map(|m| &m.target).collect()
            }
            ShapeKind::List { member } | ShapeKind::Set { member } => vec![&member.target],
            ShapeKind::Map { key, value } => vec![&key.target, &value.target],
            _ => Vec::new(),
        }
    }
}

impl ShapeCategory {
    /// Categories rendered straight from a string, number or boolean node.
    pub fn is_scalar(self) -> bool {
        use ShapeCategory as C;
        match self {
            C::Structure | C::List | C::Set | C::Map | C::Union => false,
            C::Document
            | C::Enum
            | C::IntEnum
            | C::Blob
            | C::StreamingBlob
            | C::Timestamp
            | C::Boolean
            | C::String
            | C::Byte
            | C::Short
            | C::Integer
            | C::Long
            | C::Float
            | C::Double
            | C::BigInteger
            | C::BigDecimal => true,
        }
    }

    pub fn is_string_like(self) -> bool {
        matches!(self, ShapeCategory::String | ShapeCategory::Enum)
    }

    pub fn as_str(self) -> &'static str {
        use ShapeCategory as C;
        match self {
            C::Structure => "structure",
            C::List => "list",
            C::Set => "set",
            C::Map => "map",
            C::Union => "union",
            C::Document => "document",
            C::Enum => "enum",
            C::IntEnum => "intEnum",
            C::Blob => "blob",
            C::StreamingBlob => "streamingBlob",
            C::Timestamp => "timestamp",
            C::Boolean => "boolean",
            C::String => "string",
            C::Byte => "byte",
            C::Short => "short",
            C::Integer => "integer",
            C::Long => "long",
            C::Float => "float",
            C::Double => "double",
            C::BigInteger => "bigInteger",
            C::BigDecimal => "bigDecimal",
        }
    }
}

impl fmt::Display for ShapeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ------------------------------- Lookup ----------------------------------- //

/// Read-only query interface over a shape graph.
pub trait ShapeIndex {
    fn shape(&self, id: &ShapeId) -> Option<&Shape>;

    fn category_of(&self, id: &ShapeId) -> Option<ShapeCategory> {
        self.shape(id).map(Shape::category)
    }

    fn members_of(&self, id: &ShapeId) -> Option<&IndexMap<String, Member>> {
        self.shape(id).and_then(Shape::members)
    }

    fn element_of(&self, id: &ShapeId) -> Option<&ShapeId> {
        match &self.shape(id)?.kind {
            ShapeKind::List { member } | ShapeKind::Set { member } => Some(&member.target),
            _ => None,
        }
    }

    fn key_value_of(&self, id: &ShapeId) -> Option<(&ShapeId, &ShapeId)> {
        match &self.shape(id)?.kind {
            ShapeKind::Map { key, value } => Some((&key.target, &value.target)),
            _ => None,
        }
    }
}

// -------------------------------- Model ----------------------------------- //

#[derive(Debug, Clone)]
pub struct Model {
    shapes: IndexMap<ShapeId, Shape>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// A model holding only the prelude shapes.
    pub fn new() -> Self {
        let shapes = prelude::shapes().into_iter().map(|s| (s.id.clone(), s)).collect();
        Self { shapes }
    }

    pub fn from_json_str(src: &str) -> Result<Self, SchemaError> {
        let mut model = Self::new();
        model.merge(ast::parse_str(src)?)?;
        model.validate()?;
        Ok(model)
    }

    pub fn from_json_value(value: Value) -> Result<Self, SchemaError> {
        let mut model = Self::new();
        model.merge(ast::parse_value(value)?)?;
        model.validate()?;
        Ok(model)
    }

    /// Loads and merges several model files; a shape defined twice is an error.
    pub fn from_json_sources<'a>(sources: impl IntoIterator<Item = &'a str>) -> Result<Self, SchemaError> {
        let mut model = Self::new();
        for src in sources {
            model.merge(ast::parse_str(src)?)?;
        }
        model.validate()?;
        Ok(model)
    }

    pub fn insert(&mut self, shape: Shape) -> Result<(), SchemaError> {
        if self.shapes.contains_key(&shape.id) {
            return Err(SchemaError::Conflict(shape.id));
        }
        self.shapes.insert(shape.id.clone(), shape);
        Ok(())
    }

    fn merge(&mut self, shapes: Vec<Shape>) -> Result<(), SchemaError> {
        for shape in shapes {
            self.insert(shape)?;
        }
        Ok(())
    }

    /// Every target resolves and every map key is string-like.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for shape in self.shapes.values() {
            for target in shape.targets() {
                if !self.shapes.contains_key(target) {
                    return Err(SchemaError::UnresolvedTarget {
                        shape: shape.id.clone(),
                        target: target.clone(),
                    });
                }
            }
            if let ShapeKind::Map { key, .. } = &shape.kind {
                let category = self.shapes[&key.target].category();
                if !category.is_string_like() {
                    return Err(SchemaError::NonStringMapKey {
                        shape: shape.id.clone(),
                        key: key.target.clone(),
                        category,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl ShapeIndex for Model {
    fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(s: &str) -> ShapeId {
        s.parse().unwrap()
    }

    #[test]
    fn prelude_is_always_present() {
        let model = Model::new();
        assert_eq!(model.category_of(&id("smithy.api#Integer")), Some(ShapeCategory::Integer));
        assert_eq!(model.category_of(&id("smithy.api#PrimitiveDouble")), Some(ShapeCategory::Double));
        assert_eq!(model.category_of(&id("smithy.api#Document")), Some(ShapeCategory::Document));
    }

    #[test]
    fn lookups_follow_members_elements_and_map_entries() {
        let model = Model::from_json_value(json!({
            "smithy": "2.0",
            "shapes": {
                "example#Point": {
                    "type": "structure",
                    "members": {
                        "x": { "target": "smithy.api#Integer" },
                        "y": { "target": "smithy.api#Integer" }
                    }
                },
                "example#Points": { "type": "list", "member": { "target": "example#Point" } },
                "example#Tags": {
                    "type": "map",
                    "key": { "target": "smithy.api#String" },
                    "value": { "target": "smithy.api#String" }
                }
            }
        }))
        .unwrap();

        let members = model.members_of(&id("example#Point")).unwrap();
        assert_eq!(members.keys().collect::<Vec<_>>(), ["x", "y"]);
        assert_eq!(model.element_of(&id("example#Points")), Some(&id("example#Point")));
        let (k, v) = model.key_value_of(&id("example#Tags")).unwrap();
        assert_eq!(k, &id("smithy.api#String"));
        assert_eq!(v, &id("smithy.api#String"));
        assert_eq!(model.element_of(&id("example#Point")), None);
    }

    #[test]
    fn streaming_blob_is_its_own_category() {
        let blob = Shape::new(id("example#Body"), ShapeKind::Blob);
        assert_eq!(blob.category(), ShapeCategory::Blob);
        let streaming = blob.with_trait(STREAMING_TRAIT, json!({}));
        assert_eq!(streaming.category(), ShapeCategory::StreamingBlob);
    }

    #[test]
    fn legacy_enum_trait_makes_a_string_an_enum() {
        let model = Model::from_json_value(json!({
            "smithy": "1.0",
            "shapes": {
                "example#Suit": {
                    "type": "string",
                    "traits": { "smithy.api#enum": [{ "value": "club", "name": "CLUB" }, { "value": "heart" }] }
                }
            }
        }))
        .unwrap();
        let suit = model.shape(&id("example#Suit")).unwrap();
        assert_eq!(suit.category(), ShapeCategory::Enum);
        assert_eq!(suit.enum_values(), Some(vec!["club", "heart"]));
        assert_eq!(model.category_of(&id("smithy.api#String")), Some(ShapeCategory::String));
    }

    #[test]
    fn unresolved_targets_are_rejected() {
        let err = Model::from_json_value(json!({
            "smithy": "2.0",
            "shapes": {
                "example#Broken": { "type": "list", "member": { "target": "example#Missing" } }
            }
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::UnresolvedTarget { .. }), "{err}");
    }

    #[test]
    fn map_keys_must_be_string_like() {
        let err = Model::from_json_value(json!({
            "smithy": "2.0",
            "shapes": {
                "example#ByNumber": {
                    "type": "map",
                    "key": { "target": "smithy.api#Integer" },
                    "value": { "target": "smithy.api#String" }
                }
            }
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::NonStringMapKey { category: ShapeCategory::Integer, .. }));
    }

    #[test]
    fn duplicate_shapes_across_sources_conflict() {
        let src = r#"{ "smithy": "2.0", "shapes": { "example#Name": { "type": "string" } } }"#;
        let err = Model::from_json_sources([src, src]).unwrap_err();
        assert!(matches!(err, SchemaError::Conflict(_)));
    }
}
