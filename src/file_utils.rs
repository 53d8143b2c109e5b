use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::errors::AppError;

// @module: File utilities for the JSON documents the tool reads and appends to

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Read a JSON array document into a vector
    pub fn read_json_array<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>, AppError> {
        let content = fs::read_to_string(path.as_ref())?;
        let items = serde_json::from_str(&content)?;
        Ok(items)
    }

    /// Append one entry to a JSON array document, creating the document if missing.
    ///
    /// The whole array is rewritten; earlier entries are kept verbatim.
    pub fn append_json_entry<T: Serialize, P: AsRef<Path>>(path: P, entry: &T) -> Result<(), AppError> {
        let path = path.as_ref();

        let mut entries: Vec<serde_json::Value> = match fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| AppError::Serialization(format!("unmarshal {:?}: {}", path, e)))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(AppError::File(format!("read {:?}: {}", path, e))),
        };

        entries.push(serde_json::to_value(entry)?);

        let content = Self::to_tab_indented_json(&entries)?;
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }
        fs::write(path, content)
            .map_err(|e| AppError::File(format!("write {:?}: {}", path, e)))?;

        Ok(())
    }

    /// Pretty-print JSON with tab indentation
    fn to_tab_indented_json<T: Serialize>(value: &T) -> Result<String, AppError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        value.serialize(&mut serializer)?;
        String::from_utf8(buffer).map_err(|e| AppError::Serialization(e.to_string()))
    }
}
