use std::fs::{create_dir_all, read_dir};
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::role::PromptRole;

/// Fixed name of the export artifact, shared with the web tool.
pub const EXPORT_FILE_NAME: &str = "roo-commander-prompts.json";

// Errors on the import path. Format stays deliberately generic: a file that
// is not JSON at all gets no field-level detail.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON format in the selected file. Please check the file content.")]
    Format,

    #[error("Invalid prompt data found in file: {0}")]
    Schema(String),

    #[error("Error reading the selected file.")]
    Read(#[source] std::io::Error),

    #[error("No valid prompts found in the file.")]
    Empty,
}

/// Parses and validates prompt data from JSON file content.
///
/// A single top-level object is treated as a one-element batch. Any element
/// failing validation rejects the whole batch; the error report names each
/// failing element by its index and the offending field.
pub fn parse_roles(text: &str) -> Result<Vec<PromptRole>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(|_| ImportError::Format)?;

    let elements = match value {
        Value::Array(elements) => elements,
        other => vec![other],
    };

    let mut roles = Vec::with_capacity(elements.len());
    let mut problems = Vec::new();
    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<PromptRole>(element) {
            Ok(role) => {
                let errors = role.validate();
                if errors.is_empty() {
                    roles.push(role);
                } else {
                    problems.extend(errors.into_iter().map(|e| {
                        format!("Prompt at index {index}: {} (field: {})", e.message, e.field)
                    }));
                }
            }
            Err(e) => problems.push(format!("Prompt at index {index}: {e}")),
        }
    }

    if !problems.is_empty() {
        return Err(ImportError::Schema(problems.join("; ")));
    }
    if roles.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(roles)
}

/// Merges imported roles into the existing collection.
///
/// An incoming record whose slug matches an existing one replaces it in
/// place, keeping its position; novel slugs are appended in input order.
/// Slugs compare by exact equality, absent matching absent. Duplicate slugs
/// within one batch resolve last-write-wins by array order.
pub fn merge_roles(existing: &[PromptRole], imported: &[PromptRole]) -> Vec<PromptRole> {
    let mut merged = existing.to_vec();
    for incoming in imported {
        match merged.iter().position(|role| role.slug == incoming.slug) {
            Some(index) => merged[index] = incoming.clone(),
            None => merged.push(incoming.clone()),
        }
    }
    merged
}

/// Serializes the full collection and writes it into `dir` under the fixed
/// export file name. Returns the path written.
pub fn export_roles(roles: &[PromptRole], dir: &Path) -> crate::error::Result<PathBuf> {
    create_dir_all(dir)?;
    let serialized = serde_json::to_string_pretty(roles)?;
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, serialized)?;
    Ok(path)
}

/// Base directory for exports and the application log.
pub fn data_dir() -> PathBuf {
    dir::home_dir()
        .expect("Failed to get home directory")
        .join("roodeck")
        .join("data")
}

/// Scans a directory for JSON files that could hold a prompt batch.
pub fn scan_json_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            (path.is_file() && path.extension()? == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// Candidate files offered by the import screen: the data directory first,
/// then the current working directory.
pub fn scan_import_candidates() -> Vec<PathBuf> {
    let mut candidates = scan_json_files(&data_dir());
    if let Ok(cwd) = std::env::current_dir() {
        for path in scan_json_files(&cwd) {
            if !candidates.contains(&path) {
                candidates.push(path);
            }
        }
    }
    candidates
}
