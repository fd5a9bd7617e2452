//! One generated artifact: a single value rendered into its own writer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RenderError;
use crate::naming::{KotlinSymbols, DEFAULT_RUNTIME_PACKAGE};
use crate::node::Node;
use crate::render::ShapeValueRenderer;
use crate::schema::{Model, ShapeId};
use crate::writer::CodeWriter;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderSettings {
    /// spaces per scope
    pub indent: usize,
    pub runtime_package: String,
    /// package generated types are imported from; each shape's namespace if unset
    pub model_package: Option<String>,
    /// emit `val <binding> = <expr>` instead of a bare expression
    pub binding: Option<String>,
    /// prefix the body with `import` lines for every referenced symbol
    pub imports: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            indent: 4,
            runtime_package: DEFAULT_RUNTIME_PACKAGE.to_string(),
            model_package: None,
            binding: None,
            imports: true,
        }
    }
}

impl RenderSettings {
    pub fn symbols(&self) -> KotlinSymbols {
        KotlinSymbols::new(self.runtime_package.clone(), self.model_package.clone())
    }
}

/// Render `node` as a value of `shape` into a fresh writer and return the
/// finished source. Nothing is returned on failure.
pub fn render_source(model: &Model, shape: &ShapeId, node: &Node, settings: &RenderSettings) -> Result<String, RenderError> {
    let symbols = settings.symbols();
    let renderer = ShapeValueRenderer::new(model, &symbols);
    let mut w = CodeWriter::with_indent(settings.indent);
    if let Some(binding) = &settings.binding {
        w.write(&format!("val {binding} = "));
    }
    renderer.render(&mut w, shape, node)?;
    debug!(%shape, references = w.references().count(), "rendered artifact");
    if settings.imports {
        Ok(w.into_source())
    } else {
        Ok(w.into_parts().0)
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model() -> Model {
        Model::from_json_value(json!({
            "smithy": "2.0",
            "shapes": {
                "example#Reading": {
                    "type": "structure",
                    "members": {
                        "at": { "target": "smithy.api#Timestamp" },
                        "celsius": { "target": "smithy.api#Float" }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn binding_and_imports_frame_the_expression() {
        let settings = RenderSettings { binding: Some("expected".into()), indent: 2, ..Default::default() };
        let node = Node::from(json!({"at": 1.25, "celsius": 20}));
        let out = render_source(&model(), &"example#Reading".parse().unwrap(), &node, &settings).unwrap();
        assert_eq!(
            out,
            "import aws.smithy.kotlin.runtime.time.Instant\n\n\
             val expected = Reading {\n  at = Instant.fromEpochMilliseconds(1250)\n  celsius = 20.toFloat()\n}"
        );
    }

    #[test]
    fn imports_can_be_left_to_the_caller() {
        let settings = RenderSettings { imports: false, runtime_package: "rt".into(), ..Default::default() };
        let node = Node::from(json!({"at": 3}));
        let out = render_source(&model(), &"example#Reading".parse().unwrap(), &node, &settings).unwrap();
        assert_eq!(out, "Reading {\n    at = Instant.fromEpochSeconds(3, 0)\n}");
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: RenderSettings = serde_json::from_value(json!({"runtimePackage": "my.rt"})).unwrap();
        assert_eq!(settings.runtime_package, "my.rt");
        assert_eq!(settings.indent, 4);
        assert!(settings.imports);
        assert!(settings.binding.is_none());
    }
}
