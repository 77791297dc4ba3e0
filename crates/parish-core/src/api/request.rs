//! Per-call request description passed once through the gateway.

use std::path::PathBuf;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;

use super::ApiError;

/// Form field name the backend expects uploads under
const UPLOAD_FIELD: &str = "file";

pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Form),
}

/// Method, path, query, headers and body of one backend call.
///
/// Built by a feature service, consumed by [`Gateway::execute`](super::Gateway::execute).
pub struct RequestContext {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: RequestBody,
}

impl RequestContext {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, form: Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub(crate) fn into_parts(self) -> (Method, String, Vec<(String, String)>, HeaderMap, RequestBody) {
        (self.method, self.path, self.query, self.headers, self.body)
    }
}

enum UploadContents {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// A file to send as the `file` part of a multipart upload.
pub struct FileUpload {
    file_name: String,
    mime_type: String,
    contents: UploadContents,
}

impl FileUpload {
    /// Upload read from disk; the file name defaults to the path's last component
    pub fn from_path(path: impl Into<PathBuf>, mime_type: impl Into<String>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Self {
            file_name,
            mime_type: mime_type.into(),
            contents: UploadContents::Path(path),
        }
    }

    pub fn from_bytes(
        bytes: Vec<u8>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            contents: UploadContents::Bytes(bytes),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub async fn into_form(self) -> Result<Form, ApiError> {
        let bytes = match self.contents {
            UploadContents::Bytes(bytes) => bytes,
            UploadContents::Path(path) => tokio::fs::read(&path).await.map_err(|e| {
                ApiError::InvalidRequest(format!("Failed to read {}: {}", path.display(), e))
            })?,
        };
        let part = Part::bytes(bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)
            .map_err(|e| ApiError::InvalidRequest(format!("Invalid MIME type: {}", e)))?;
        Ok(Form::new().part(UPLOAD_FIELD, part))
    }
}
