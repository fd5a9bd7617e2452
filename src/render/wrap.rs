//! Outer syntactic form for a shape: constructor block, builder call, or
//! nothing at all for scalars.

use crate::error::{RenderError, RenderErrorKind};
use crate::naming::RuntimeType;
use crate::node::Node;
use crate::schema::{Shape, ShapeCategory, ShapeKind};
use crate::writer::CodeWriter;
use super::{ShapeValueRenderer, ValuePath};

impl ShapeValueRenderer<'_> {
    pub(super) fn wrap(&self, w: &mut CodeWriter, shape: &Shape, node: &Node, path: &ValuePath<'_>) -> Result<(), RenderError> {
        use ShapeCategory as C;
        match shape.category() {
            C::Structure => {
                let name = self.symbols.type_name(shape);
                self.block(w, &format!("{name} {{"), "}", shape, node, path)
            }
            C::Map => {
                let builder = self.symbols.collection_builder(shape.category());
                self.block(w, &format!("{builder}("), ")", shape, node, path)
            }
            C::List | C::Set => {
                if let Some(element) = self.index.element_of(&shape.id).and_then(|id| self.index.shape(id)) {
                    if let Some(symbol) = self.symbols.symbol_for(element) {
                        w.register_reference(symbol);
                    }
                }
                let builder = self.symbols.collection_builder(shape.category());
                self.block(w, &format!("{builder}("), ")", shape, node, path)
            }
            C::Enum => {
                if let (Node::String(value), Some(values)) = (node, shape.enum_values()) {
                    if !values.contains(&value.as_str()) {
                        return Err(unknown_enum_value(shape, value, path));
                    }
                }
                w.write(&format!("{}.fromValue(", self.symbols.type_name(shape)));
                self.dispatch(w, shape, node, path)?;
                w.write(")");
                Ok(())
            }
            C::StreamingBlob => {
                let byte_stream = self.symbols.runtime(RuntimeType::ByteStream);
                w.write(&format!("{}.fromString(", byte_stream.name));
                w.register_reference(byte_stream);
                self.dispatch(w, shape, node, path)?;
                w.write(")");
                Ok(())
            }
            C::Blob => {
                self.dispatch(w, shape, node, path)?;
                w.write(".encodeAsByteArray()");
                Ok(())
            }
            C::IntEnum => {
                if let (Node::Number(number), ShapeKind::IntEnum { values }) = (node, &shape.kind) {
                    if !values.values().any(|v| v.to_string() == number.text) {
                        return Err(unknown_enum_value(shape, &number.text, path));
                    }
                }
                self.dispatch(w, shape, node, path)
            }
            C::Union
            | C::Document
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
            | C::BigDecimal => self.dispatch(w, shape, node, path),
        }
    }

    fn block(
        &self,
        w: &mut CodeWriter,
        open: &str,
        close: &str,
        shape: &Shape,
        node: &Node,
        path: &ValuePath<'_>,
    ) -> Result<(), RenderError> {
        let empty = match node {
            Node::Object(pairs) => pairs.is_empty(),
            Node::Array(elements) => elements.is_empty(),
            _ => false,
        };
        scoped(w, open, close, empty, |w| self.dispatch(w, shape, node, path))
    }
}

fn unknown_enum_value(shape: &Shape, value: &str, path: &ValuePath<'_>) -> RenderError {
    path.error(RenderErrorKind::UnknownEnumValue { shape: shape.id.clone(), value: value.to_string() })
}

/// `open`, then `body` one scope deeper, then `close` on its own line. Empty
/// contents collapse onto one line.
pub(super) fn scoped(
    w: &mut CodeWriter,
    open: &str,
    close: &str,
    empty: bool,
    body: impl FnOnce(&mut CodeWriter) -> Result<(), RenderError>,
) -> Result<(), RenderError> {
    w.write(open);
    if empty {
        w.write(close);
        return Ok(());
    }
    w.newline();
    {
        let mut inner = w.scope();
        body(&mut inner)?;
    }
    w.newline();
    w.write(close);
    Ok(())
}
