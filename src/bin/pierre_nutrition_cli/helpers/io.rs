// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: JSON input/output helpers for pierre-nutrition-cli
// ABOUTME: Reads typed documents from files and prints results as pretty JSON

use pierre_nutrition::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read and deserialize a JSON document
pub fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    debug!(path = %path.display(), "Reading input");
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::invalid_input(format!("Cannot read {}", path.display())).with_source(e)
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        AppError::invalid_input(format!("Invalid JSON in {}: {e}", path.display())).with_source(e)
    })
}

/// Serialize a value as pretty JSON into a file
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    fs::write(path, rendered)?;
    debug!(path = %path.display(), "Wrote output");
    Ok(())
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
