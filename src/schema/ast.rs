//! Smithy JSON AST loader.
//!
//! Only the parts the renderer needs are read: shape types, members, list
//! members, map key/value and traits. Service, operation, resource and
//! `apply` entries are accepted and dropped.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::SchemaError;
use crate::path_de;
use super::{Member, Shape, ShapeId, ShapeKind, ENUM_VALUE_TRAIT};

#[derive(Debug, Deserialize)]
struct ModelFile {
    #[allow(dead_code)]
    smithy: String,
    #[serde(default)]
    shapes: IndexMap<String, AstShape>,
}

#[derive(Debug, Deserialize)]
struct AstShape {
    #[serde(rename = "type")]
    ty: AstType,
    #[serde(default)]
    members: IndexMap<String, AstMember>,
    member: Option<AstMember>,
    key: Option<AstMember>,
    value: Option<AstMember>,
    #[serde(default)]
    traits: IndexMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct AstMember {
    target: String,
    #[serde(default)]
    traits: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
enum AstType {
    Structure,
    Union,
    List,
    Set,
    Map,
    Document,
    Enum,
    IntEnum,
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
    Service,
    Operation,
    Resource,
    Apply,
}

// ------------------------------- Parse ------------------------------------ //

pub fn parse_str(src: &str) -> Result<Vec<Shape>, SchemaError> {
    lower(path_de::from_str_with_path::<ModelFile>(src)?)
}

pub fn parse_value(value: Value) -> Result<Vec<Shape>, SchemaError> {
    lower(path_de::from_value_with_path::<ModelFile>(value)?)
}

fn lower(file: ModelFile) -> Result<Vec<Shape>, SchemaError> {
    let mut out = Vec::with_capacity(file.shapes.len());
    for (raw_id, ast) in file.shapes {
        let id: ShapeId = raw_id.parse()?;
        if let Some(kind) = lower_kind(&id, &ast)? {
            out.push(Shape { id, kind, traits: ast.traits });
        }
    }
    Ok(out)
}

fn lower_kind(id: &ShapeId, ast: &AstShape) -> Result<Option<ShapeKind>, SchemaError> {
    let kind = match ast.ty {
        AstType::Structure => ShapeKind::Structure { members: lower_members(&ast.members)? },
        AstType::Union => ShapeKind::Union { members: lower_members(&ast.members)? },
        AstType::List => ShapeKind::List { member: required(id, &ast.member, "member")? },
        AstType::Set => ShapeKind::Set { member: required(id, &ast.member, "member")? },
        AstType::Map => ShapeKind::Map {
            key: required(id, &ast.key, "key")?,
            value: required(id, &ast.value, "value")?,
        },
        AstType::Enum => ShapeKind::Enum { values: enum_values(id, &ast.members)? },
        AstType::IntEnum => ShapeKind::IntEnum { values: int_enum_values(id, &ast.members)? },
        AstType::Document => ShapeKind::Document,
        AstType::Blob => ShapeKind::Blob,
        AstType::Timestamp => ShapeKind::Timestamp,
        AstType::Boolean => ShapeKind::Boolean,
        AstType::String => ShapeKind::String,
        AstType::Byte => ShapeKind::Byte,
        AstType::Short => ShapeKind::Short,
        AstType::Integer => ShapeKind::Integer,
        AstType::Long => ShapeKind::Long,
        AstType::Float => ShapeKind::Float,
        AstType::Double => ShapeKind::Double,
        AstType::BigInteger => ShapeKind::BigInteger,
        AstType::BigDecimal => ShapeKind::BigDecimal,
        AstType::Service | AstType::Operation | AstType::Resource | AstType::Apply => return Ok(None),
    };
    Ok(Some(kind))
}

fn lower_member(ast: &AstMember) -> Result<Member, SchemaError> {
    Ok(Member { target: ast.target.parse()? })
}

fn lower_members(members: &IndexMap<String, AstMember>) -> Result<IndexMap<String, Member>, SchemaError> {
    members
        .iter()
        .map(|(name, m)| Ok((name.clone(), lower_member(m)?)))
        .collect()
}

fn required(id: &ShapeId, member: &Option<AstMember>, field: &'static str) -> Result<Member, SchemaError> {
    match member {
        Some(m) => lower_member(m),
        None => Err(SchemaError::MissingField { shape: id.clone(), field }),
    }
}

fn enum_values(id: &ShapeId, members: &IndexMap<String, AstMember>) -> Result<IndexMap<String, String>, SchemaError> {
    let mut out = IndexMap::with_capacity(members.len());
    for (name, m) in members {
        let value = match m.traits.get(ENUM_VALUE_TRAIT) {
            None => name.clone(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(SchemaError::BadEnumValue {
                    shape: id.clone(),
                    member: name.clone(),
                    expected: "string",
                });
            }
        };
        out.insert(name.clone(), value);
    }
    Ok(out)
}

fn int_enum_values(id: &ShapeId, members: &IndexMap<String, AstMember>) -> Result<IndexMap<String, i64>, SchemaError> {
    let mut out = IndexMap::with_capacity(members.len());
    for (name, m) in members {
        let value = m
            .traits
            .get(ENUM_VALUE_TRAIT)
            .and_then(Value::as_i64)
            .ok_or_else(|| SchemaError::BadEnumValue {
                shape: id.clone(),
                member: name.clone(),
                expected: "integer",
            })?;
        out.insert(name.clone(), value);
    }
    Ok(out)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enum_values_default_to_member_names() {
        let shapes = parse_value(json!({
            "smithy": "2.0",
            "shapes": {
                "example#Suit": {
                    "type": "enum",
                    "members": {
                        "DIAMOND": { "target": "smithy.api#Unit", "traits": { "smithy.api#enumValue": "diamond" } },
                        "CLUB": { "target": "smithy.api#Unit" }
                    }
                }
            }
        }))
        .unwrap();
        let ShapeKind::Enum { values } = &shapes[0].kind else { panic!("expected enum") };
        assert_eq!(values["DIAMOND"], "diamond");
        assert_eq!(values["CLUB"], "CLUB");
    }

    #[test]
    fn int_enums_need_integer_values() {
        let err = parse_value(json!({
            "smithy": "2.0",
            "shapes": {
                "example#Level": {
                    "type": "intEnum",
                    "members": { "LOW": { "target": "smithy.api#Unit" } }
                }
            }
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::BadEnumValue { expected: "integer", .. }));
    }

    #[test]
    fn service_shapes_are_skipped() {
        let shapes = parse_value(json!({
            "smithy": "2.0",
            "shapes": {
                "example#Weather": { "type": "service", "version": "2006-03-01" },
                "example#City": { "type": "string" }
            }
        }))
        .unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].id.name(), "City");
    }

    #[test]
    fn parse_errors_name_the_json_path() {
        let err = parse_str(r#"{ "smithy": "2.0", "shapes": { "example#X": { "type": "tuple" } } }"#).unwrap_err();
        let SchemaError::Parse { path, .. } = err else { panic!("expected parse error") };
        assert_eq!(path, "shapes.example#X.type");
    }

    #[test]
    fn lists_require_a_member() {
        let err = parse_value(json!({
            "smithy": "2.0",
            "shapes": { "example#Names": { "type": "list" } }
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::MissingField { field: "member", .. }));
    }
}
