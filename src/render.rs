//! Schema-directed value literal synthesis.
//!
//! [`ShapeValueRenderer::render`] writes a Kotlin expression that constructs a
//! value of the given shape equal to the given [`Node`]. Three layers, leaf
//! first:
//! - [`coerce`]: scalar node + scalar shape → literal text
//! - [`dispatch`]: walks objects and arrays against composite shapes
//! - [`wrap`]: picks the outer form (constructor, builder call, bare scalar)
//!
//! Recursion follows the value tree, never the shape graph, so recursive
//! shapes need no cycle tracking.
pub mod coerce;
mod dispatch;
mod path;
mod wrap;

use tracing::debug;

use crate::error::{RenderError, RenderErrorKind};
use crate::naming::SymbolProvider;
use crate::node::Node;
use crate::schema::{Shape, ShapeId, ShapeIndex};
use crate::writer::CodeWriter;

pub use path::ValuePath;

pub struct ShapeValueRenderer<'a> {
    index: &'a dyn ShapeIndex,
    symbols: &'a dyn SymbolProvider,
}

impl<'a> ShapeValueRenderer<'a> {
    pub fn new(index: &'a dyn ShapeIndex, symbols: &'a dyn SymbolProvider) -> Self {
        Self { index, symbols }
    }

    /// Append the expression for `node` at the writer's cursor.
    pub fn render(&self, w: &mut CodeWriter, shape: &ShapeId, node: &Node) -> Result<(), RenderError> {
        debug!(%shape, kind = %node.kind(), "rendering value");
        self.render_at(w, shape, node, &ValuePath::root())
    }

    pub(crate) fn render_at(
        &self,
        w: &mut CodeWriter,
        shape: &ShapeId,
        node: &Node,
        path: &ValuePath<'_>,
    ) -> Result<(), RenderError> {
        // legal wherever a value may be absent, whatever the shape
        if node.is_null() {
            w.write("null");
            return Ok(());
        }
        let shape = self.resolve(shape, path)?;
        self.wrap(w, shape, node, path)
    }

    fn resolve(&self, id: &ShapeId, path: &ValuePath<'_>) -> Result<&'a Shape, RenderError> {
        self.index
            .shape(id)
            .ok_or_else(|| path.error(RenderErrorKind::UnresolvedShape(id.clone())))
    }
}

// ------------------------------- Tests ------------------------------------ //
