use thiserror::Error;

use crate::node::NodeKind;
use crate::schema::{ShapeCategory, ShapeId};

/// Failure while loading or validating a model.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to parse model at JSON path {path}: {message}")]
    Parse { path: String, message: String },
    #[error("invalid shape id `{0}`")]
    InvalidShapeId(String),
    #[error("shape {shape} is missing required field `{field}`")]
    MissingField { shape: ShapeId, field: &'static str },
    #[error("{shape} targets {target}, which is not defined in the model")]
    UnresolvedTarget { shape: ShapeId, target: ShapeId },
    #[error("map {shape} has a non-string key shape {key} ({category})")]
    NonStringMapKey { shape: ShapeId, key: ShapeId, category: ShapeCategory },
    #[error("shape {0} is defined more than once")]
    Conflict(ShapeId),
    #[error("enum member {shape}${member} has a non-{expected} enumValue")]
    BadEnumValue { shape: ShapeId, member: String, expected: &'static str },
}

/// A render failure together with the value path it occurred at.
#[derive(Debug, Error, PartialEq)]
#[error("{kind} (at {path})")]
pub struct RenderError {
    pub path: String,
    pub kind: RenderErrorKind,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderErrorKind {
    #[error("unknown member {shape}${member}")]
    UnknownMember { shape: ShapeId, member: String },
    #[error("cannot render a {kind} value as {shape} ({category})")]
    ShapeKindMismatch { shape: ShapeId, category: ShapeCategory, kind: NodeKind },
    #[error("cannot interpret {shape} value \"{token}\"")]
    UnsupportedNumericLiteral { shape: ShapeId, token: String },
    #[error("unexpected shape {shape} ({category}) for number value")]
    UnsupportedShapeForNumber { shape: ShapeId, category: ShapeCategory },
    #[error("unexpected shape {shape} ({category}) for boolean value")]
    UnsupportedShapeForBoolean { shape: ShapeId, category: ShapeCategory },
    #[error("union {shape} value must set exactly one member, found {count}")]
    UnionCardinality { shape: ShapeId, count: usize },
    #[error("invalid numeric literal `{text}` for {shape}")]
    InvalidNumber { shape: ShapeId, text: String },
    #[error("shape {0} is not defined in the model")]
    UnresolvedShape(ShapeId),
    #[error("`{value}` is not a value of enum {shape}")]
    UnknownEnumValue { shape: ShapeId, value: String },
}

impl RenderError {
    pub fn kind(&self) -> &RenderErrorKind {
        &self.kind
    }
}
