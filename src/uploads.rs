//! Multipart form handling and photo storage.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use axum::extract::Multipart;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// An uploaded file held in memory until it is transferred to disk.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl FilePart {
    /// Writes the file into `dir` under `filename` and returns the full path.
    pub async fn transfer_to(&self, dir: &Path, filename: &str) -> AppResult<PathBuf> {
        let target = dir.join(filename);
        tokio::fs::write(&target, &self.bytes).await?;
        tracing::info!("Stored upload {} ({} bytes)", target.display(), self.bytes.len());
        Ok(target)
    }
}

#[derive(Debug, Clone)]
pub enum Part {
    Text(String),
    File(FilePart),
}

/// The parts of a multipart body keyed by name. Only the first part of each
/// name is kept.
#[derive(Debug, Default)]
pub struct MultipartForm {
    parts: HashMap<String, Part>,
}

impl MultipartForm {
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = MultipartForm::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            let part = match field.file_name().map(str::to_owned) {
                Some(filename) => {
                    let content_type = field.content_type().map(str::to_owned);
                    let bytes = field.bytes().await?;
                    Part::File(FilePart { filename, content_type, bytes })
                }
                None => Part::Text(field.text().await?),
            };
            form.parts.entry(name).or_insert(part);
        }
        Ok(form)
    }

    pub fn insert(&mut self, name: impl Into<String>, part: Part) {
        self.parts.entry(name.into()).or_insert(part);
    }

    pub fn text(&self, name: &str) -> AppResult<&str> {
        match self.parts.get(name) {
            Some(Part::Text(value)) => Ok(value),
            _ => Err(AppError::MissingPart { name: name.to_string(), expected: "text" }),
        }
    }

    pub fn file(&self, name: &str) -> AppResult<&FilePart> {
        match self.parts.get(name) {
            Some(Part::File(file)) => Ok(file),
            _ => Err(AppError::MissingPart { name: name.to_string(), expected: "file" }),
        }
    }

    /// Moves the file part out of the form.
    pub fn take_file(&mut self, name: &str) -> AppResult<FilePart> {
        match self.parts.remove(name) {
            Some(Part::File(file)) => Ok(file),
            other => {
                if let Some(part) = other {
                    self.parts.insert(name.to_string(), part);
                }
                Err(AppError::MissingPart { name: name.to_string(), expected: "file" })
            }
        }
    }
}

/// Strips the characters the photo naming scheme does not accept.
///
/// Spaces become dashes; colons and backslashes are dropped. Nothing else is
/// touched, so names like `../x.png` pass through unchanged.
pub fn sanitize_filename(original: &str) -> String {
    original.replace(' ', "-").replace(':', "").replace('\\', "")
}

/// `<uuid>-<sanitized original>`
pub fn unique_filename(original: &str) -> String {
    format!("{}-{}", Uuid::new_v4(), sanitize_filename(original))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_spaces_and_drops_colons_and_backslashes() {
        assert_eq!(sanitize_filename("my photo:1.png"), "my-photo1.png");
        assert_eq!(sanitize_filename(r"C:\fotos\a b.jpg"), "Cfotosa-b.jpg");
        assert_eq!(sanitize_filename("plain.png"), "plain.png");
    }

    #[test]
    fn unique_filename_is_prefixed_with_fresh_uuid() {
        let a = unique_filename("my photo:1.png");
        let b = unique_filename("my photo:1.png");
        assert_ne!(a, b);
        assert!(a.ends_with("-my-photo1.png"));
        assert!(!a.contains(' ') && !a.contains(':'));
        let prefix = &a[..36];
        assert!(Uuid::parse_str(prefix).is_ok());
    }

    #[test]
    fn lookups_distinguish_missing_and_wrong_kind() {
        let mut form = MultipartForm::default();
        form.insert("nombre", Part::Text("Mouse".into()));
        form.insert(
            "file",
            Part::File(FilePart { filename: "a.png".into(), content_type: None, bytes: Bytes::from_static(b"x") }),
        );

        assert_eq!(form.text("nombre").unwrap(), "Mouse");
        assert!(matches!(form.text("precio"), Err(AppError::MissingPart { ref name, .. }) if name == "precio"));
        assert!(matches!(form.file("nombre"), Err(AppError::MissingPart { expected: "file", .. })));
        assert!(matches!(form.text("file"), Err(AppError::MissingPart { expected: "text", .. })));

        let file = form.take_file("file").unwrap();
        assert_eq!(file.filename, "a.png");
        assert!(form.file("file").is_err());
    }

    #[test]
    fn first_part_of_a_name_wins() {
        let mut form = MultipartForm::default();
        form.insert("nombre", Part::Text("first".into()));
        form.insert("nombre", Part::Text("second".into()));
        assert_eq!(form.text("nombre").unwrap(), "first");
    }

    #[tokio::test]
    async fn transfer_writes_bytes_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let part = FilePart { filename: "a.png".into(), content_type: None, bytes: Bytes::from_static(b"png") };
        let path = part.transfer_to(dir.path(), "x-a.png").await.unwrap();
        assert_eq!(path, dir.path().join("x-a.png"));
        assert_eq!(std::fs::read(path).unwrap(), b"png");
    }
}
