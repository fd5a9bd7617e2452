//! Schema-directed value literal synthesis.
//!
//! Given a Smithy model and a parsed JSON value, emit the Kotlin expression
//! that builds the equivalent value of a shape:
//!
//! ```ignore
//! let model = Model::from_json_str(&model_src)?;
//! let node = Node::from(serde_json::from_str::<serde_json::Value>(&input)?);
//! let src = render_source(&model, &"example#Forecast".parse()?, &node, &RenderSettings::default())?;
//! ```

pub mod cli;
pub mod error;
pub mod generate;
pub mod jq_exec;
pub mod naming;
pub mod node;
pub mod path_de;
pub mod render;
pub mod schema;
pub mod writer;

pub use error::{RenderError, RenderErrorKind, SchemaError};
pub use generate::{render_source, RenderSettings};
pub use node::{Node, NodeKind};
pub use render::ShapeValueRenderer;
pub use schema::{Model, ShapeCategory, ShapeId, ShapeIndex};
