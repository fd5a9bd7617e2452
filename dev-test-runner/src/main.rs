//! Fixture runner: renders every `*.json` case under a directory and compares
//! the output against the expected Kotlin text (or error pattern).
//!
//! ```text
//! cargo run -p dev-test-runner -- fixtures
//! ```
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use shape_literal::{render_source, Model, Node, RenderSettings, ShapeId};

static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("valid pattern"));

#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(default)]
    description: Option<String>,
    model: Value,
    shape: String,
    input: Value,
    #[serde(default)]
    settings: RenderSettings,
    #[serde(default)]
    expected: Option<String>,
    /// regex matched against the error's display text
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug)]
enum Outcome {
    Expected(String),
    Error(String),
}

impl Fixture {
    fn outcome(&mut self) -> Result<Outcome> {
        match (self.expected.take(), self.error.take()) {
            (Some(expected), None) => Ok(Outcome::Expected(expected)),
            (None, Some(pattern)) => Ok(Outcome::Error(pattern)),
            _ => bail!("a fixture needs exactly one of `expected` or `error`"),
        }
    }
}

#[derive(Debug)]
enum Verdict {
    Pass,
    Fail(String),
}

fn main() -> Result<()> {
    let root = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("fixtures"));
    let fixtures = collect_fixtures(&root)?;
    if fixtures.is_empty() {
        bail!("no fixtures found under {}", root.display());
    }

    let mut failed = 0usize;
    for path in &fixtures {
        let name = path.strip_prefix(&root).unwrap_or(path).display().to_string();
        match run_fixture(path) {
            Ok(Verdict::Pass) => println!("{} {name}", "pass".green()),
            Ok(Verdict::Fail(reason)) => {
                failed += 1;
                println!("{} {name}\n{reason}", "FAIL".red().bold());
            }
            Err(error) => {
                failed += 1;
                println!("{} {name}: {error:#}", "BROKEN".yellow().bold());
            }
        }
    }

    let passed = fixtures.len() - failed;
    let summary = format!("{passed} passed, {failed} failed");
    if failed > 0 {
        println!("{}", summary.red().bold());
        bail!("{failed} fixture(s) failed");
    }
    println!("{}", summary.green().bold());
    Ok(())
}

fn collect_fixtures(root: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let entries = std::fs::read_dir(root).with_context(|| format!("failed to read {}", root.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            out.extend(collect_fixtures(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn run_fixture(path: &Path) -> Result<Verdict> {
    let source = std::fs::read_to_string(path)?;
    let de = &mut serde_json::Deserializer::from_str(&source);
    let mut fixture: Fixture = serde_path_to_error::deserialize(de)
        .map_err(|e| anyhow::anyhow!("invalid fixture at {}: {}", e.path(), e.inner()))?;
    let outcome = fixture.outcome()?;

    let model = Model::from_json_value(fixture.model)?;
    let shape: ShapeId = fixture.shape.parse()?;
    let node = Node::from(&fixture.input);
    let result = render_source(&model, &shape, &node, &fixture.settings);
    let context = fixture.description.as_deref().unwrap_or_default();

    let verdict = match (outcome, result) {
        (Outcome::Expected(expected), Ok(actual)) => {
            if normalize(&expected) == normalize(&actual) {
                Verdict::Pass
            } else {
                Verdict::Fail(format!("{context}\n--- expected\n{expected}\n--- actual\n{actual}"))
            }
        }
        (Outcome::Expected(_), Err(error)) => Verdict::Fail(format!("{context}\nunexpected error: {error}")),
        (Outcome::Error(pattern), Err(error)) => {
            let re = Regex::new(&pattern).with_context(|| format!("bad error pattern {pattern}"))?;
            if re.is_match(&error.to_string()) {
                Verdict::Pass
            } else {
                Verdict::Fail(format!("{context}\nerror `{error}` does not match /{pattern}/"))
            }
        }
        (Outcome::Error(pattern), Ok(actual)) => {
            Verdict::Fail(format!("{context}\nexpected an error matching /{pattern}/, got\n{actual}"))
        }
    };
    Ok(verdict)
}

/// One entry per line with indentation and repeated blanks squeezed out, so
/// indent width doesn't matter but line breaks still do.
fn normalize(src: &str) -> Vec<String> {
    src.trim()
        .lines()
        .map(|line| SPACE_RUN.replace_all(line.trim(), " ").into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indentation_width_is_ignored() {
        assert_eq!(normalize("Point {\n    a = 1\n}"), normalize("Point {\n  a = 1\n}\n"));
    }

    #[test]
    fn line_breaks_are_significant() {
        assert_ne!(normalize("Point {\n    a = 1\n    b = 2\n}"), normalize("Point {\n    a = 1 b = 2\n}"));
        assert_ne!(normalize("listOf(\n    1,\n    2\n)"), normalize("listOf(\n    1, 2\n)"));
    }

    #[test]
    fn fixtures_name_exactly_one_outcome() {
        let mut both: Fixture = serde_json::from_value(serde_json::json!({
            "model": {}, "shape": "a#B", "input": 1, "expected": "1", "error": "x"
        }))
        .unwrap();
        assert!(both.outcome().is_err());

        let mut error: Fixture = serde_json::from_value(serde_json::json!({
            "model": {}, "shape": "a#B", "input": 1, "error": "boom"
        }))
        .unwrap();
        assert!(matches!(error.outcome().unwrap(), Outcome::Error(p) if p == "boom"));
    }
}
