//! Multipart payloads: profile pictures, verification documents, chat
//! attachments and reels.

use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use std::path::Path;

/// Extensions the backend accepts for uploads.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "mp4"];

pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "mp4" => Some("video/mp4"),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl Upload {
    pub fn new(
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file, guessing its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let mime = mime_for_extension(ext).ok_or_else(|| {
            Error::validation_with_context(
                format!(
                    "File type '{}' not allowed (expected one of {})",
                    ext,
                    ALLOWED_EXTENSIONS.join(", ")
                ),
                ErrorContext::new()
                    .with_field_path("upload.file_name")
                    .with_details(path.display().to_string()),
            )
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(file_name, mime, bytes))
    }

    pub fn into_part(self) -> Result<Part> {
        let len = self.bytes.len() as u64;
        Part::stream_with_length(self.bytes, len)
            .file_name(self.file_name)
            .mime_str(&self.mime)
            .map_err(|e| {
                Error::validation_with_context(
                    format!("Invalid mime: {}", e),
                    ErrorContext::new().with_field_path("upload.mime"),
                )
            })
    }

    /// A form holding just this file under `field`.
    pub fn into_form(self, field: &'static str) -> Result<Form> {
        Ok(Form::new().part(field, self.into_part()?))
    }
}

/// A chat message with a file. The server still requires text content.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub content: String,
    pub file: Upload,
}

impl Attachment {
    pub fn new(content: impl Into<String>, file: Upload) -> Self {
        Self {
            content: content.into(),
            file,
        }
    }

    pub fn into_form(self) -> Result<Form> {
        Ok(Form::new()
            .text("content", self.content)
            .part("attachment", self.file.into_part()?))
    }
}

#[derive(Debug, Clone)]
pub struct NewReel {
    pub video: Upload,
    pub thumbnail: Option<Upload>,
    pub caption: Option<String>,
    /// Seconds.
    pub duration: Option<u32>,
    pub music: Option<String>,
    pub filter: Option<String>,
    /// Space- or comma-separated tags, passed through as typed.
    pub hashtags: Option<String>,
    pub is_private: bool,
}

impl NewReel {
    pub fn new(video: Upload) -> Self {
        Self {
            video,
            thumbnail: None,
            caption: None,
            duration: None,
            music: None,
            filter: None,
            hashtags: None,
            is_private: false,
        }
    }

    pub fn thumbnail(mut self, thumbnail: Upload) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn hashtags(mut self, tags: impl Into<String>) -> Self {
        self.hashtags = Some(tags.into());
        self
    }

    pub fn private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    pub fn into_form(self) -> Result<Form> {
        let mut form = Form::new().part("video", self.video.into_part()?);
        if let Some(thumb) = self.thumbnail {
            form = form.part("thumbnail", thumb.into_part()?);
        }
        if let Some(caption) = self.caption {
            form = form.text("caption", caption);
        }
        if let Some(duration) = self.duration {
            form = form.text("duration", duration.to_string());
        }
        if let Some(music) = self.music {
            form = form.text("music", music);
        }
        if let Some(filter) = self.filter {
            form = form.text("filter", filter);
        }
        if let Some(hashtags) = self.hashtags {
            form = form.text("hashtags", hashtags);
        }
        Ok(form.text("is_private", self.is_private.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_guess_is_case_insensitive() {
        assert_eq!(mime_for_extension("JPG"), Some("image/jpeg"));
        assert_eq!(mime_for_extension("mp4"), Some("video/mp4"));
        assert_eq!(mime_for_extension("exe"), None);
    }

    #[tokio::test]
    async fn from_path_rejects_disallowed_extension() {
        let err = Upload::from_path("/tmp/notes.txt").await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn from_path_reads_bytes_and_names_the_file() {
        let dir = std::env::temp_dir().join(format!("datify-upload-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("me.png");
        std::fs::write(&path, b"\x89PNG").unwrap();

        let upload = Upload::from_path(&path).await.unwrap();
        assert_eq!(upload.file_name, "me.png");
        assert_eq!(upload.mime, "image/png");
        assert_eq!(&upload.bytes[..], b"\x89PNG");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn bad_mime_is_a_validation_error() {
        let err = Upload::new("x.png", "not a mime", vec![1u8]).into_part().unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }
}
