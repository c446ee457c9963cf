//! Packaging of the OpenAPI file as a `multipart/form-data` upload

use super::ClientError;
use std::path::Path;

/// Form field the report endpoint expects the document under
pub const FILE_FIELD: &str = "apiFile";

/// Best-effort content type from the file extension.
///
/// YAML is sent as `text/yaml`; everything else comes from the MIME table.
/// Unknown extensions return `None` and the part is sent without a
/// content type.
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "yaml" | "yml" => Some("text/yaml"),
        _ => mime_guess::from_ext(&ext).first_raw(),
    }
}

/// The document to upload, fully buffered in memory
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<&'static str>,
    pub contents: String,
}

impl UploadFile {
    pub fn read(path: &Path) -> Result<Self, ClientError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ClientError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            file_name: path.to_string_lossy().to_string(),
            content_type: content_type_for(path),
            contents,
        })
    }

    /// Encode as a single-part form body under [`FILE_FIELD`]
    pub fn to_multipart(&self) -> Multipart {
        let boundary = format!("----rmoa-lint-{}", uuid::Uuid::new_v4().simple());
        self.to_multipart_with_boundary(boundary)
    }

    fn to_multipart_with_boundary(&self, boundary: String) -> Multipart {
        let mut head = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{FILE_FIELD}\"; filename=\"{}\"\r\n",
            escape_filename(&self.file_name)
        );
        if let Some(ct) = self.content_type {
            head.push_str(&format!("Content-Type: {ct}\r\n"));
        }
        head.push_str("\r\n");

        let mut body = Vec::with_capacity(head.len() + self.contents.len() + boundary.len() + 8);
        body.extend_from_slice(head.as_bytes());
        body.extend_from_slice(self.contents.as_bytes());
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Multipart { boundary, body }
    }
}

/// An encoded multipart body and its boundary
#[derive(Debug, Clone)]
pub struct Multipart {
    pub boundary: String,
    pub body: Vec<u8>,
}

impl Multipart {
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }
}

// Same escaping browsers apply to FormData filenames
fn escape_filename(name: &str) -> String {
    name.replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
