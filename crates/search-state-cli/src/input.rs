//! Reading states, contexts and refinements from command-line input.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context as _, Result, anyhow, bail};
use search_state_model::{Context, IndexId, Refinement, SearchState};
use serde_json::Value;

/// Reads a JSON document from `path`, or from stdin when `path` is `-`.
pub fn read_document(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("read stdin")?;
        return Ok(buffer);
    }
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

pub fn load_state(path: &Path) -> Result<SearchState> {
    let document = read_document(path)?;
    parse_state(&document).with_context(|| format!("parse search state {}", path.display()))
}

/// Parses a state document. Blank input is an empty state.
pub fn parse_state(document: &str) -> Result<SearchState> {
    if document.trim().is_empty() {
        return Ok(SearchState::new());
    }
    Ok(SearchState::from_json(document)?)
}

/// Builds the caller context from flags, on top of an optional context file.
///
/// `--index` selects multi-index mode against that index, `--main-index`
/// names the application's main index.
pub fn build_context(
    context_file: Option<&Path>,
    index: Option<&str>,
    main_index: Option<&str>,
) -> Result<Context> {
    let mut context = match context_file {
        Some(path) => {
            let document = read_document(path)?;
            serde_json::from_str(&document)
                .with_context(|| format!("parse context {}", path.display()))?
        }
        None => Context::default(),
    };
    if let Some(main_index) = main_index {
        context = context.with_main_index(IndexId::new(main_index)?);
    }
    if let Some(index) = index {
        let main = context.main_targeted_index.take();
        context = Context::multi(IndexId::new(index)?);
        context.main_targeted_index = main;
    }
    Ok(context)
}

/// Parses a value argument as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Parses `KEY=VALUE` into a refinement entry.
pub fn parse_assignment(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got {raw:?}"))?;
    if key.is_empty() {
        bail!("empty key in {raw:?}");
    }
    Ok((key.to_string(), parse_value(value)))
}

pub fn parse_refinement<S: AsRef<str>>(assignments: &[S]) -> Result<Refinement> {
    assignments
        .iter()
        .map(|raw| parse_assignment(raw.as_ref()))
        .collect()
}
