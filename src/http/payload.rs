// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request payloads and their transformation into bodies
//!
//! Structured values are serialized to JSON text. Files, blobs and
//! multipart forms are opaque: they reach the transport untouched.

use std::path::Path;

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Payload passed to a verb call
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Plain JSON-serializable value, always sent as JSON text. A string
    /// value goes out quoted (`"abc"` becomes `"\"abc\""`); use
    /// [`Payload::Text`] to send a string verbatim.
    Structured(Value),
    /// File handle
    File(FileHandle),
    /// Binary blob
    Blob(Blob),
    /// Multipart form data
    Form(MultipartForm),
    /// Raw text, sent verbatim
    Text(String),
}

/// Kind of a payload, as seen by the body transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Structured,
    File,
    Blob,
    Form,
    Text,
}

impl Payload {
    /// Structured payload from any serializable value
    pub fn json<T: Serialize + ?Sized>(data: &T) -> Result<Self> {
        Ok(Payload::Structured(serde_json::to_value(data)?))
    }

    /// Raw text payload
    pub fn text(text: impl Into<String>) -> Self {
        Payload::Text(text.into())
    }

    /// Classify the payload
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Structured(_) => PayloadKind::Structured,
            Payload::File(_) => PayloadKind::File,
            Payload::Blob(_) => PayloadKind::Blob,
            Payload::Form(_) => PayloadKind::Form,
            Payload::Text(_) => PayloadKind::Text,
        }
    }

    /// File, blob and form payloads pass through without serialization
    pub fn is_opaque(&self) -> bool {
        matches!(
            self.kind(),
            PayloadKind::File | PayloadKind::Blob | PayloadKind::Form
        )
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Structured(value)
    }
}

impl From<FileHandle> for Payload {
    fn from(file: FileHandle) -> Self {
        Payload::File(file)
    }
}

impl From<Blob> for Payload {
    fn from(blob: Blob) -> Self {
        Payload::Blob(blob)
    }
}

impl From<MultipartForm> for Payload {
    fn from(form: MultipartForm) -> Self {
        Payload::Form(form)
    }
}

/// Body attached to an outgoing descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized structured payload
    Json(String),
    Text(String),
    File(FileHandle),
    Blob(Blob),
    Form(MultipartForm),
}

impl RequestBody {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RequestBody::Json(text) | RequestBody::Text(text) => Some(text),
            _ => None,
        }
    }

    /// MIME type the payload itself declares
    pub fn content_type(&self) -> Option<&str> {
        match self {
            RequestBody::File(file) => file.content_type.as_deref(),
            RequestBody::Blob(blob) => blob.content_type.as_deref(),
            _ => None,
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(
            self,
            RequestBody::File(_) | RequestBody::Blob(_) | RequestBody::Form(_)
        )
    }
}

/// Turn a payload into the body that goes on the wire.
///
/// An absent payload or a structured `null` produces no body.
pub fn transform_request(payload: Option<Payload>) -> Result<Option<RequestBody>> {
    let body = match payload {
        None | Some(Payload::Structured(Value::Null)) => None,
        Some(Payload::Structured(value)) => Some(RequestBody::Json(serde_json::to_string(&value)?)),
        Some(Payload::Text(text)) => Some(RequestBody::Text(text)),
        Some(Payload::File(file)) => Some(RequestBody::File(file)),
        Some(Payload::Blob(blob)) => Some(RequestBody::Blob(blob)),
        Some(Payload::Form(form)) => Some(RequestBody::Form(form)),
    };
    Ok(body)
}

/// File contents with the name it was selected under
#[derive(Debug, Clone, PartialEq)]
pub struct FileHandle {
    pub name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            data: data.into(),
        }
    }

    /// Read a file from disk; the handle is named after the file
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, data))
    }

    /// Set the MIME type
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Anonymous binary data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Blob {
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl Blob {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            content_type: None,
            data: data.into(),
        }
    }

    /// Set the MIME type
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// One entry of a multipart form
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: FileHandle },
    Blob { name: String, blob: Blob },
}

impl FormPart {
    /// Field name
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } | FormPart::Blob { name, .. } => {
                name
            }
        }
    }
}

/// Ordered multipart form data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Append a file field
    pub fn file(mut self, name: impl Into<String>, file: FileHandle) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file,
        });
        self
    }

    /// Append a blob field
    pub fn blob(mut self, name: impl Into<String>, blob: Blob) -> Self {
        self.parts.push(FormPart::Blob {
            name: name.into(),
            blob,
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_structured_payload_serialized() {
        let body = transform_request(Some(json!({"a": 1, "b": [true, null]}).into()))
            .unwrap()
            .unwrap();
        assert_eq!(body, RequestBody::Json(r#"{"a":1,"b":[true,null]}"#.to_string()));
    }

    #[test]
    fn test_absent_and_null_payload() {
        assert_eq!(transform_request(None).unwrap(), None);
        assert_eq!(transform_request(Some(Value::Null.into())).unwrap(), None);
    }

    #[test]
    fn test_opaque_payloads_pass_through() {
        let file = FileHandle::new("report.csv", "a,b\n1,2").content_type("text/csv");
        let blob = Blob::new(vec![0u8, 159, 146, 150]);
        let form = MultipartForm::new().text("title", "q3").file("doc", file.clone());

        for payload in [
            Payload::from(file.clone()),
            Payload::from(blob.clone()),
            Payload::from(form.clone()),
        ] {
            assert!(payload.is_opaque());
        }

        assert_eq!(
            transform_request(Some(file.clone().into())).unwrap(),
            Some(RequestBody::File(file))
        );
        assert_eq!(
            transform_request(Some(blob.clone().into())).unwrap(),
            Some(RequestBody::Blob(blob))
        );
        assert_eq!(
            transform_request(Some(form.clone().into())).unwrap(),
            Some(RequestBody::Form(form))
        );
    }

    #[test]
    fn test_text_payload_verbatim() {
        let payload = Payload::text("name=kalle&age=3");
        assert_eq!(payload.kind(), PayloadKind::Text);
        assert!(!payload.is_opaque());

        let body = transform_request(Some(payload)).unwrap().unwrap();
        assert_eq!(body.as_text(), Some("name=kalle&age=3"));
    }

    #[test]
    fn test_structured_string_is_quoted() {
        let body = transform_request(Some(json!("abc").into())).unwrap().unwrap();
        assert_eq!(body, RequestBody::Json("\"abc\"".to_string()));
    }

    #[test]
    fn test_payload_from_serialize() {
        #[derive(Serialize)]
        struct Item {
            id: u32,
            label: &'static str,
        }

        let payload = Payload::json(&Item { id: 7, label: "x" }).unwrap();
        assert_eq!(payload.kind(), PayloadKind::Structured);
        assert_eq!(payload, Payload::Structured(json!({"id": 7, "label": "x"})));
    }

    #[test]
    fn test_form_parts_keep_order() {
        let form = MultipartForm::new()
            .text("a", "1")
            .blob("b", Blob::new("raw"))
            .text("c", "3");
        let names: Vec<_> = form.parts().iter().map(FormPart::name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_file_handle_open() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"hello file").unwrap();

        let file = FileHandle::open(tmp.path()).await.unwrap();
        assert_eq!(file.data, Bytes::from_static(b"hello file"));
        assert_eq!(
            file.name,
            tmp.path().file_name().unwrap().to_string_lossy()
        );
        assert!(file.content_type.is_none());
    }
}
