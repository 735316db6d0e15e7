//! Suggest command: complete a partial location name.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use campusnav_lib::LocationTree;

use crate::commands::load_campus_from;
use crate::output::{to_json, OutputFormat};
use crate::terminal::ColorPalette;

/// How the returned names were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Prefix,
    Fuzzy,
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestions {
    pub query: String,
    pub matched_by: MatchKind,
    pub names: Vec<String>,
}

/// Prefix completions, falling back to fuzzy matches when nothing starts
/// with `query`.
pub fn suggest(tree: &LocationTree, query: &str, limit: usize) -> Suggestions {
    let names = tree.complete(query, limit);
    if !names.is_empty() {
        return Suggestions {
            query: query.to_string(),
            matched_by: MatchKind::Prefix,
            names,
        };
    }
    Suggestions {
        query: query.to_string(),
        matched_by: MatchKind::Fuzzy,
        names: tree.suggest(query, limit),
    }
}

pub fn format_suggestions_text(suggestions: &Suggestions, palette: &ColorPalette) -> String {
    let mut out = String::new();
    if suggestions.names.is_empty() {
        let _ = writeln!(out, "No locations match '{}'", suggestions.query);
        return out;
    }
    if suggestions.matched_by == MatchKind::Fuzzy {
        let _ = writeln!(
            out,
            "{}No location starts with '{}'; closest matches:{}",
            palette.gray, suggestions.query, palette.reset
        );
    }
    for name in &suggestions.names {
        let _ = writeln!(out, "{name}");
    }
    out
}

/// Handle the suggest subcommand.
pub fn handle_suggest_command(
    data_dir: Option<&Path>,
    format: OutputFormat,
    palette: &ColorPalette,
    query: &str,
    limit: usize,
) -> Result<()> {
    let (_, campus) = load_campus_from(data_dir)?;
    let suggestions = suggest(&campus.locations, query, limit);
    let rendered = if format.is_json() {
        to_json(&suggestions)?
    } else {
        format_suggestions_text(&suggestions, palette)
    };
    print!("{rendered}");
    Ok(())
}
