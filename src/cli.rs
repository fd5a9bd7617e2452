//! Minimal CLI: model + JSON inputs → (Kotlin value literals | shape listing)
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::generate::{render_source, RenderSettings};
use crate::naming::DEFAULT_RUNTIME_PACKAGE;
use crate::node::Node;
use crate::schema::{prelude, Model, ShapeId, ShapeIndex};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// render JSON values as Kotlin expressions that construct Smithy-modelled types
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,

    /// more logging (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// render each input document as a value of one shape
    Render(RenderOut),
    /// list the model's shapes and their categories as JSON
    Shapes(ShapesOut),
}

#[derive(Args, Debug, Clone)]
struct ModelSettings {
    /// Smithy JSON AST model files (merged; may be quoted glob patterns)
    #[arg(long, short, num_args = 1.., required = true)]
    model: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct RenderOut {
    #[command(flatten)]
    model_settings: ModelSettings,

    #[command(flatten)]
    input_settings: InputSettings,

    /// shape to render, `namespace#Name` (or `Name` with --namespace)
    #[arg(long, short)]
    shape: String,

    /// namespace for a relative --shape
    #[arg(long)]
    namespace: Option<String>,

    /// emit `val <binding> = ...`
    #[arg(long)]
    binding: Option<String>,

    /// spaces per indent level
    #[arg(long, default_value_t = 4)]
    indent: usize,

    /// runtime library package root
    #[arg(long, default_value = DEFAULT_RUNTIME_PACKAGE)]
    runtime_package: String,

    /// package generated model types are imported from
    #[arg(long)]
    model_package: Option<String>,

    /// leave out `import` lines
    #[arg(long, default_value_t = false)]
    no_imports: bool,

    /// output .kt file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct ShapesOut {
    #[command(flatten)]
    model_settings: ModelSettings,

    /// include prelude shapes
    #[arg(long, default_value_t = false)]
    prelude: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// One parsed input value and where it came from.
#[derive(Debug)]
struct Document {
    origin: String,
    value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl ModelSettings {
    fn load(&self) -> Result<Model> {
        let paths = resolve_file_path_patterns(&self.model)?;
        let mut sources = Vec::with_capacity(paths.len());
        for path in &paths {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read model file {}", path.display()))?;
            sources.push(source);
        }
        let model = Model::from_json_sources(sources.iter().map(String::as_str))
            .with_context(|| format!("failed to load model from {:?}", self.model))?;
        info!(files = paths.len(), shapes = model.len(), "loaded model");
        Ok(model)
    }
}

impl InputSettings {
    fn load(&self) -> Result<Vec<Document>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let mut out = Vec::new();
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file {source_path_str}"))?;
            if self.ndjson {
                for (line_no, line) in source.lines().enumerate() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let origin = format!("{source_path_str}:{}", line_no + 1);
                    let value = serde_json::from_str::<Value>(line)
                        .with_context(|| format!("failed to parse JSON line ({origin})"))?;
                    self.process(origin, value, &mut out)?;
                }
            } else {
                let value = serde_json::from_str::<Value>(&source)
                    .with_context(|| format!("failed to parse JSON source file ({source_path_str})"))?;
                self.process(source_path_str, value, &mut out)?;
            }
        }
        debug!(documents = out.len(), "loaded inputs");
        Ok(out)
    }

    fn process(&self, origin: String, value: Value, out: &mut Vec<Document>) -> Result<()> {
        let value = match self.json_pointer.as_deref() {
            None => value,
            Some(pointer) => match value.pointer(pointer) {
                Some(selected) => selected.clone(),
                None => bail!("JSON pointer {pointer} selects nothing in {origin}"),
            },
        };
        match self.jq_expr.as_ref() {
            None => out.push(Document { origin, value }),
            Some(jq_expr) => {
                let results = crate::jq_exec::run_jaq(jq_expr, &value)
                    .with_context(|| format!("failed to apply jq expression to {origin}"))?;
                for (i, value) in results.into_iter().enumerate() {
                    out.push(Document { origin: format!("{origin}#{i}"), value });
                }
            }
        }
        Ok(())
    }
}

impl RenderOut {
    fn settings(&self) -> RenderSettings {
        RenderSettings {
            indent: self.indent,
            runtime_package: self.runtime_package.clone(),
            model_package: self.model_package.clone(),
            binding: self.binding.clone(),
            imports: !self.no_imports,
        }
    }

    fn shape_id(&self) -> Result<ShapeId> {
        let id = match &self.namespace {
            Some(namespace) => ShapeId::parse_relative(&self.shape, namespace)?,
            None => self.shape.parse()?,
        };
        Ok(id)
    }

    fn run(&self) -> Result<()> {
        let model = self.model_settings.load()?;
        let shape = self.shape_id()?;
        if model.shape(&shape).is_none() {
            bail!("shape {shape} is not defined in the model");
        }
        let documents = self.input_settings.load()?;
        if documents.is_empty() {
            warn!("inputs produced no documents");
        }
        let settings = self.settings();

        // each document is its own artifact with its own writer
        let rendered = documents
            .par_iter()
            .map(|doc| {
                let node = Node::from(&doc.value);
                render_source(&model, &shape, &node, &settings)
            })
            .collect::<Vec<_>>();

        let mut outputs = Vec::with_capacity(rendered.len());
        let mut failures = 0usize;
        for (doc, result) in documents.iter().zip(rendered) {
            match result {
                Ok(src) => outputs.push(src),
                Err(error) => {
                    failures += 1;
                    eprintln!("{} {}: {error}", "error".red().bold(), doc.origin.bold());
                }
            }
        }
        if failures > 0 {
            bail!("{failures} of {} documents failed to render", documents.len());
        }
        info!(documents = outputs.len(), %shape, "rendered");
        write_output(self.out.as_deref(), &outputs.join("\n\n"))
    }
}

impl ShapesOut {
    fn run(&self) -> Result<()> {
        let model = self.model_settings.load()?;
        let listing = model
            .shapes()
            .filter(|s| self.prelude || s.id.namespace() != prelude::NAMESPACE)
            .map(|s| (s.id.to_string(), Value::from(s.category().as_str())))
            .collect::<IndexMap<_, _>>();
        let src = serde_json::to_string_pretty(&listing)?;
        write_output(self.out.as_deref(), &src)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// stderr subscriber; RUST_LOG wins over -v
    pub fn init_tracing(&self) {
        let fallback = match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Render(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                target.run()
            }
            Command::Shapes(target) => target.run(),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, src: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))
        }
        None => {
            println!("{src}");
            Ok(())
        }
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("invalid glob pattern {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
