//! Multipart staging
//!
//! Reads a multipart form, collecting text fields and writing file fields
//! into the staging directory. The staged paths are handed to the media
//! adapter, which consumes them on every path - so this module only has to
//! clean up when the request never reaches a service call.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use tokio::fs;
use uuid::Uuid;

use crate::response::ApiError;

/// Parsed multipart form: text fields plus staged file paths, keyed by field name
#[derive(Debug, Default)]
pub struct StagedForm {
    texts: HashMap<String, String>,
    files: HashMap<String, PathBuf>,
}

impl StagedForm {
    /// Get a text field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.get(name).map(String::as_str)
    }

    /// Get a required text field
    pub fn require_text(&self, name: &str) -> Result<String, ApiError> {
        self.texts
            .get(name)
            .cloned()
            .ok_or_else(|| ApiError::invalid_upload(format!("Missing field: {name}")))
    }

    /// Take a staged file path, transferring cleanup responsibility to the caller
    pub fn take_file(&mut self, name: &str) -> Option<PathBuf> {
        self.files.remove(name)
    }

    /// Take a required staged file path
    pub fn require_file(&mut self, name: &str) -> Result<PathBuf, ApiError> {
        self.take_file(name)
            .ok_or_else(|| ApiError::invalid_upload(format!("Missing file: {name}")))
    }

    /// Remove any staged files that were never handed to the media adapter
    pub async fn discard(self) {
        for path in self.files.into_values() {
            let _ = fs::remove_file(path).await;
        }
    }
}

/// Read the whole multipart body, staging file parts under `staging_dir`
pub async fn stage_form(
    multipart: &mut Multipart,
    staging_dir: &Path,
) -> Result<StagedForm, ApiError> {
    fs::create_dir_all(staging_dir)
        .await
        .map_err(ApiError::internal)?;

    let mut form = StagedForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_upload(e.to_string()))?
    {
        let Some(name) = field.name().map(String::from) else {
            continue;
        };

        if let Some(file_name) = field.file_name().map(String::from) {
            let staged = staging_dir.join(staged_name(&file_name));
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::invalid_upload(e.to_string()))?;
            fs::write(&staged, &bytes).await.map_err(ApiError::internal)?;
            form.files.insert(name, staged);
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::invalid_upload(e.to_string()))?;
            form.texts.insert(name, value);
        }
    }

    Ok(form)
}

/// Unique staging name keeping the client file's extension
fn staged_name(file_name: &str) -> String {
    let id = Uuid::new_v4();
    match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{id}.{}", ext.to_lowercase()),
        _ => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staged_name_keeps_extension() {
        let name = staged_name("movie.MP4");
        assert!(name.ends_with(".mp4"));

        let name = staged_name("no-extension");
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_require_missing_field() {
        let form = StagedForm::default();
        assert!(form.require_text("title").is_err());
    }
}
