//! Multipart uploads and image URL construction.
//!
//! Images are stored by the backend under `/uploads/<file>` at the server
//! root (not under the API prefix); a fixed fallback file name is used
//! when an entity has no image of its own.

use reqwest::multipart::{Form, Part};

/// Fallback image served when an entity has no image reference
pub const DEFAULT_ROOM_IMAGE: &str = "default-room.jpg";

/// An avatar or entity image staged for upload.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub(crate) fn into_part(self) -> Part {
        Part::bytes(self.bytes).file_name(self.file_name)
    }
}

/// Build the multipart profile-update form
pub(crate) fn profile_form(username: &str, email: &str, avatar: Option<FileUpload>) -> Form {
    let mut form = Form::new()
        .text("username", username.to_string())
        .text("email", email.to_string());
    if let Some(upload) = avatar {
        form = form.part("avatar", upload.into_part());
    }
    form
}

/// Resolve the public URL for an uploaded image.
///
/// `base_url` is the API base (e.g. `http://host:8080/api`); uploads live
/// one level up at the server root.
pub fn image_url(base_url: &str, file_name: Option<&str>) -> String {
    let root = base_url
        .trim_end_matches('/')
        .trim_end_matches("/api");
    format!(
        "{}/uploads/{}",
        root,
        file_name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_ROOM_IMAGE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_with_name() {
        assert_eq!(
            image_url("http://localhost:8080/api", Some("room-7.png")),
            "http://localhost:8080/uploads/room-7.png"
        );
    }

    #[test]
    fn test_image_url_fallback() {
        assert_eq!(
            image_url("http://localhost:8080/api", None),
            "http://localhost:8080/uploads/default-room.jpg"
        );
        assert_eq!(
            image_url("http://localhost:8080/api/", Some("")),
            "http://localhost:8080/uploads/default-room.jpg"
        );
    }

    #[test]
    fn test_image_url_without_api_suffix() {
        assert_eq!(
            image_url("http://cdn.example.com", Some("a.jpg")),
            "http://cdn.example.com/uploads/a.jpg"
        );
    }
}
