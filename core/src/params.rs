//! Loosely-typed request parameters and their wire encodings.
//!
//! # Design
//! Vendor endpoints take nested key/value structures (recipients,
//! conditions, coordinates, branding texts). `Value` is a tagged union over
//! everything those structures can hold, and `Params` is an
//! insertion-ordered map of them. Encoding is written once:
//!
//! - nested maps flatten to `parent[child]`
//! - list items flatten to `parent[]`
//! - dotted keys such as `data.reference` are passed through untouched
//!
//! The flattened field list then becomes a query string, a form body or a
//! multipart body depending on the method and on whether any value is a file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use url::form_urlencoded;

use crate::error::ApiError;
use crate::http::{Multipart, Part};

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Bool(bool),
    List(Vec<Value>),
    Map(Params),
    File(FileRef),
}

impl Value {
    /// Scalar rendering; `None` for lists, maps and files.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Text(text) => Some(text.clone()),
            Value::Integer(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::List(_) | Value::Map(_) | Value::File(_) => None,
        }
    }

    /// Wrap anything that is not already a list into a one-element list.
    pub fn into_list(self) -> Value {
        match self {
            Value::List(_) => self,
            other => Value::List(vec![other]),
        }
    }

    pub fn contains_file(&self) -> bool {
        match self {
            Value::File(_) => true,
            Value::List(items) => items.iter().any(Value::contains_file),
            Value::Map(params) => params.has_files(),
            Value::Text(_) | Value::Integer(_) | Value::Bool(_) => false,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Params> for Value {
    fn from(value: Params) -> Self {
        Value::Map(value)
    }
}

impl From<FileRef> for Value {
    fn from(value: FileRef) -> Self {
        Value::File(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

/// JSON is accepted so callers can keep request templates in config files.
/// Floats and `null` are rendered as text.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Text(String::new()),
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Text(n.to_string()),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(Params::from(map)),
        }
    }
}

/// Insertion-ordered parameter map.
///
/// Re-inserting an existing key replaces the value in place, so key order
/// always reflects first insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// True if any value, at any depth, is a file reference.
    pub fn has_files(&self) -> bool {
        self.entries.iter().any(|(_, value)| value.contains_file())
    }

    /// Flatten into wire field names, depth first, preserving order.
    pub fn flatten(&self) -> Vec<(String, Field<'_>)> {
        let mut fields = Vec::new();
        for (key, value) in &self.entries {
            flatten_into(key.clone(), value, &mut fields);
        }
        fields
    }

    /// `application/x-www-form-urlencoded` rendering, used both for query
    /// strings and for form bodies. File references contribute their file
    /// name.
    pub fn to_urlencoded(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, field) in self.flatten() {
            match field {
                Field::Text(text) => serializer.append_pair(&name, &text),
                Field::File(file) => serializer.append_pair(&name, file.filename()),
            };
        }
        serializer.finish()
    }

    pub fn to_multipart(&self) -> Multipart {
        let mut form = Multipart::new();
        self.fill_multipart(&mut form);
        form
    }

    pub fn fill_multipart(&self, form: &mut Multipart) {
        for (name, field) in self.flatten() {
            let part = match field {
                Field::Text(value) => Part::Text { name, value },
                Field::File(file) => Part::File {
                    name,
                    filename: file.filename().to_string(),
                    content_type: file.content_type(),
                    content: file.content().to_vec(),
                },
            };
            form.push(part);
        }
    }
}

fn flatten_into<'a>(name: String, value: &'a Value, fields: &mut Vec<(String, Field<'a>)>) {
    match value {
        Value::Map(params) => {
            for (key, child) in &params.entries {
                flatten_into(format!("{name}[{key}]"), child, fields);
            }
        }
        Value::List(items) => {
            for item in items {
                flatten_into(format!("{name}[]"), item, fields);
            }
        }
        Value::File(file) => fields.push((name, Field::File(file))),
        scalar => {
            if let Some(text) = scalar.as_text() {
                fields.push((name, Field::Text(text)));
            }
        }
    }
}

/// A flattened leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<'a> {
    Text(String),
    File(&'a FileRef),
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Params {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter().collect()
    }
}

/// A local file read into memory, ready to be sent as a multipart part.
#[derive(Clone, PartialEq, Eq)]
pub struct FileRef {
    path: PathBuf,
    filename: String,
    content: Vec<u8>,
}

impl FileRef {
    /// Read `path` in binary mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let content = fs::read(path).map_err(|source| ApiError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        Ok(Self {
            path: path.to_path_buf(),
            filename,
            content,
        })
    }

    /// In-memory file that never touched the disk.
    pub fn from_bytes(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let filename = filename.into();
        Self {
            path: PathBuf::from(&filename),
            filename,
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn into_content(self) -> Vec<u8> {
        self.content
    }

    /// MIME type guessed from the filename extension.
    pub fn content_type(&self) -> String {
        mime_guess::from_path(&self.filename)
            .first_or_octet_stream()
            .to_string()
    }
}

impl fmt::Debug for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileRef")
            .field("path", &self.path)
            .field("filename", &self.filename)
            .field("len", &self.content.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_first_position() {
        let mut params = Params::new().with("a", 1).with("b", 2);
        params.insert("a", 3);
        let keys: Vec<&str> = params.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(params.get("a"), Some(&Value::Integer(3)));
    }

    #[test]
    fn remove_returns_value() {
        let mut params = Params::new().with("a", "x");
        assert_eq!(params.remove("a"), Some(Value::Text("x".to_string())));
        assert!(params.is_empty());
        assert_eq!(params.remove("a"), None);
    }

    #[test]
    fn urlencoded_keeps_insertion_order() {
        let params = Params::new()
            .with("status", "signed")
            .with("since", "1982-07-27");
        assert_eq!(params.to_urlencoded(), "status=signed&since=1982-07-27");
    }

    #[test]
    fn urlencoded_escapes_values_and_brackets() {
        let params = Params::new()
            .with("subject", "Sign this, please")
            .with("recipients", Params::new().with("0", Params::new().with("email", "a@b.c")));
        assert_eq!(
            params.to_urlencoded(),
            "subject=Sign+this%2C+please&recipients%5B0%5D%5Bemail%5D=a%40b.c"
        );
    }

    #[test]
    fn flatten_names_nested_and_list_fields() {
        let params = Params::new()
            .with("templates", vec!["t1", "t2"])
            .with(
                "recipients",
                Params::new().with("0", Params::new().with("name", "Ann").with("email", "ann@x.io")),
            )
            .with("data.reference", "abc")
            .with("photo", true);

        let names: Vec<String> = params.flatten().into_iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "templates[]",
                "templates[]",
                "recipients[0][name]",
                "recipients[0][email]",
                "data.reference",
                "photo",
            ]
        );
        assert_eq!(params.flatten()[5].1, Field::Text("true".to_string()));
    }

    #[test]
    fn has_files_looks_through_nesting() {
        let plain = Params::new().with("a", vec![Params::new().with("b", 1)]);
        assert!(!plain.has_files());

        let nested = Params::new().with(
            "attachments",
            vec![Value::File(FileRef::from_bytes("a.pdf", b"x".to_vec()))],
        );
        assert!(nested.has_files());
    }

    #[test]
    fn multipart_turns_files_into_file_parts() {
        let params = Params::new()
            .with("body", "hello")
            .with(
                "files",
                vec![
                    Value::File(FileRef::from_bytes("one.pdf", b"1".to_vec())),
                    Value::File(FileRef::from_bytes("two.png", b"2".to_vec())),
                ],
            );
        let form = params.to_multipart();
        assert_eq!(form.text("body"), Some("hello"));

        let files: Vec<&Part> = form.files().collect();
        assert_eq!(files.len(), 2);
        match files[1] {
            Part::File {
                name,
                filename,
                content_type,
                content,
            } => {
                assert_eq!(name, "files[]");
                assert_eq!(filename, "two.png");
                assert_eq!(content_type, "image/png");
                assert_eq!(content, b"2");
            }
            other => panic!("expected file part, got {other:?}"),
        }
    }

    #[test]
    fn json_objects_keep_key_order() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"z": 1, "a": [true, "x"], "m": {"k": 2.5}}"#).unwrap();
        let serde_json::Value::Object(map) = json else {
            panic!("expected object");
        };
        let params = Params::from(map);
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(params.to_urlencoded(), "z=1&a%5B%5D=true&a%5B%5D=x&m%5Bk%5D=2.5");
    }

    #[test]
    fn open_missing_file_is_a_file_error() {
        let err = FileRef::open("/definitely/not/here.pdf").unwrap_err();
        assert!(matches!(err, ApiError::File { .. }));
    }

    #[test]
    fn open_reads_bytes_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Contract.PDF");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let file = FileRef::open(&path).unwrap();
        assert_eq!(file.filename(), "Contract.PDF");
        assert_eq!(file.content(), b"%PDF-1.7");
        assert_eq!(file.content_type(), "application/pdf");
        assert_eq!(file.path(), path.as_path());
    }

    #[test]
    fn content_types_follow_the_extension() {
        let cases = [
            ("logo.png", "image/png"),
            ("page.html", "text/html"),
            ("scan.JPG", "image/jpeg"),
            ("blob", "application/octet-stream"),
        ];
        for (filename, expected) in cases {
            assert_eq!(FileRef::from_bytes(filename, Vec::new()).content_type(), expected, "{filename}");
        }
    }
}
