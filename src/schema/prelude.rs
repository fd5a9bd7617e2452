//! `smithy.api` simple shapes every model can target without declaring them.

use indexmap::IndexMap;

use super::{Shape, ShapeId, ShapeKind};

pub const NAMESPACE: &str = "smithy.api";

pub fn shapes() -> Vec<Shape> {
    let simple: [(&str, ShapeKind); 20] = [
        ("String", ShapeKind::String),
        ("Blob", ShapeKind::Blob),
        ("Boolean", ShapeKind::Boolean),
        ("PrimitiveBoolean", ShapeKind::Boolean),
        ("Byte", ShapeKind::Byte),
        ("PrimitiveByte", ShapeKind::Byte),
        ("Short", ShapeKind::Short),
        ("PrimitiveShort", ShapeKind::Short),
        ("Integer", ShapeKind::Integer),
        ("PrimitiveInteger", ShapeKind::Integer),
        ("Long", ShapeKind::Long),
        ("PrimitiveLong", ShapeKind::Long),
        ("Float", ShapeKind::Float),
        ("PrimitiveFloat", ShapeKind::Float),
        ("Double", ShapeKind::Double),
        ("PrimitiveDouble", ShapeKind::Double),
        ("BigInteger", ShapeKind::BigInteger),
        ("BigDecimal", ShapeKind::BigDecimal),
        ("Timestamp", ShapeKind::Timestamp),
        ("Document", ShapeKind::Document),
    ];

    let mut out: Vec<Shape> = simple
        .into_iter()
        .map(|(name, kind)| Shape::new(ShapeId::new(NAMESPACE, name), kind))
        .collect();
    out.push(Shape::new(
        ShapeId::new(NAMESPACE, "Unit"),
        ShapeKind::Structure { members: IndexMap::new() },
    ));
    out
}
