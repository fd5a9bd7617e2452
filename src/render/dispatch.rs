//! The (shape category × node kind) state machine.

use crate::error::{RenderError, RenderErrorKind};
use crate::naming::RuntimeType;
use crate::node::{Node, NodeKind};
use crate::schema::{Member, Shape, ShapeCategory, ShapeId};
use crate::writer::{kotlin_string, CodeWriter};
use super::coerce::{self, Literal};
use super::wrap::scoped;
use super::{ShapeValueRenderer, ValuePath};

impl ShapeValueRenderer<'_> {
    pub(super) fn dispatch(&self, w: &mut CodeWriter, shape: &Shape, node: &Node, path: &ValuePath<'_>) -> Result<(), RenderError> {
        use ShapeCategory as C;
        let category = shape.category();
        match (category, node) {
            (_, Node::Null) => {
                w.write("null");
                Ok(())
            }
            (C::Structure, Node::Object(pairs)) => self.structure_members(w, shape, pairs, path),
            (C::Map, Node::Object(pairs)) => self.map_entries(w, shape, pairs, path),
            (C::Union, Node::Object(pairs)) => self.union_variant(w, shape, pairs, path),
            (C::Document, Node::Object(pairs)) => self.document_object(w, shape, pairs, path),
            (C::List | C::Set, Node::Array(elements)) => {
                let element = self.index.element_of(&shape.id).ok_or_else(|| self.mismatch(shape, node.kind(), path))?;
                self.elements(w, element, elements, path)
            }
            (C::Document, Node::Array(elements)) => self.document_list(w, shape, elements, path),
            (category, Node::String(value)) if category.is_scalar() => {
                let literal = coerce::string_literal(self.symbols, shape, value).map_err(|e| path.error(e))?;
                emit(w, literal);
                Ok(())
            }
            (category, Node::Number(number)) if category.is_scalar() => {
                let literal = coerce::number_literal(self.symbols, shape, number).map_err(|e| path.error(e))?;
                emit(w, literal);
                Ok(())
            }
            (category, Node::Boolean(value)) if category.is_scalar() => {
                let literal = coerce::boolean_literal(self.symbols, shape, *value).map_err(|e| path.error(e))?;
                emit(w, literal);
                Ok(())
            }
            _ => Err(self.mismatch(shape, node.kind(), path)),
        }
    }

    fn mismatch(&self, shape: &Shape, kind: NodeKind, path: &ValuePath<'_>) -> RenderError {
        path.error(RenderErrorKind::ShapeKindMismatch {
            shape: shape.id.clone(),
            category: shape.category(),
            kind,
        })
    }

    fn member<'s>(&self, shape: &'s Shape, name: &str, path: &ValuePath<'_>) -> Result<&'s Member, RenderError> {
        shape.members().and_then(|m| m.get(name)).ok_or_else(|| {
            path.error(RenderErrorKind::UnknownMember { shape: shape.id.clone(), member: name.to_string() })
        })
    }

    /// `field = value`, one per line.
    fn structure_members(&self, w: &mut CodeWriter, shape: &Shape, pairs: &[(String, Node)], path: &ValuePath<'_>) -> Result<(), RenderError> {
        for (i, (key, value)) in pairs.iter().enumerate() {
            let member = self.member(shape, key, path)?;
            if i > 0 {
                w.newline();
            }
            w.write(&format!("{} = ", self.symbols.member_field_name(shape, key)));
            self.render_at(w, &member.target, value, &path.key(key))?;
        }
        Ok(())
    }

    /// `"key" to value`, comma separated.
    fn map_entries(&self, w: &mut CodeWriter, shape: &Shape, pairs: &[(String, Node)], path: &ValuePath<'_>) -> Result<(), RenderError> {
        let (_, value_shape) = self
            .index
            .key_value_of(&shape.id)
            .ok_or_else(|| self.mismatch(shape, NodeKind::Object, path))?;
        for (i, (key, value)) in pairs.iter().enumerate() {
            if i > 0 {
                w.write(",");
                w.newline();
            }
            w.write(&format!("{} to ", kotlin_string(key)));
            if value.is_null() {
                // never hand a null to the value shape's coercion
                w.write("null");
            } else {
                self.render_at(w, value_shape, value, &path.key(key))?;
            }
        }
        Ok(())
    }

    /// `Union.Variant(payload)`; exactly one member may be set.
    fn union_variant(&self, w: &mut CodeWriter, shape: &Shape, pairs: &[(String, Node)], path: &ValuePath<'_>) -> Result<(), RenderError> {
        let [(key, value)] = pairs else {
            return Err(path.error(RenderErrorKind::UnionCardinality { shape: shape.id.clone(), count: pairs.len() }));
        };
        let member = self.member(shape, key, path)?;
        let variant = self.symbols.variant_name(shape, key);
        w.write(&format!("{}.{variant}(", self.symbols.type_name(shape)));
        self.render_at(w, &member.target, value, &path.key(key))?;
        w.write(")");
        Ok(())
    }

    /// `buildDocument { "key" to value ... }`, members rendered as documents.
    fn document_object(&self, w: &mut CodeWriter, shape: &Shape, pairs: &[(String, Node)], path: &ValuePath<'_>) -> Result<(), RenderError> {
        let builder = self.symbols.runtime(RuntimeType::BuildDocument);
        let open = format!("{} {{", builder.name);
        w.register_reference(builder);
        scoped(w, &open, "}", pairs.is_empty(), |w| {
            for (i, (key, value)) in pairs.iter().enumerate() {
                if i > 0 {
                    w.newline();
                }
                w.write(&format!("{} to ", kotlin_string(key)));
                self.render_at(w, &shape.id, value, &path.key(key))?;
            }
            Ok(())
        })
    }

    /// `Document(listOf(...))`, elements rendered as documents.
    fn document_list(&self, w: &mut CodeWriter, shape: &Shape, elements: &[Node], path: &ValuePath<'_>) -> Result<(), RenderError> {
        let document = self.symbols.runtime(RuntimeType::Document);
        let builder = self.symbols.collection_builder(ShapeCategory::List);
        let open = format!("{}({builder}(", document.name);
        w.register_reference(document);
        scoped(w, &open, "))", elements.is_empty(), |w| self.elements(w, &shape.id, elements, path))
    }

    fn elements(&self, w: &mut CodeWriter, element: &ShapeId, elements: &[Node], path: &ValuePath<'_>) -> Result<(), RenderError> {
        for (i, value) in elements.iter().enumerate() {
            if i > 0 {
                w.write(",");
                w.newline();
            }
            self.render_at(w, element, value, &path.index(i))?;
        }
        Ok(())
    }
}

fn emit(w: &mut CodeWriter, literal: Literal) {
    w.write(&literal.text);
    if let Some(symbol) = literal.reference {
        w.register_reference(symbol);
    }
}
