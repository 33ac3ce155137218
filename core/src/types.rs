//! Typed inputs for endpoints that would otherwise take free-form maps.
//!
//! # Design
//! Endpoints accept either one recipient/file or many. `Recipients` and
//! `Files` convert from both shapes so call sites read naturally:
//! `create_signature("contract.pdf", "ann@example.com", ...)` and
//! `create_signature(vec![a, b], vec![r1, r2], ...)` both work.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::params::{Params, Value};

/// One addressee of a signature request, email or SMS.
///
/// A bare string converts to an email recipient. Vendor-specific extras
/// (`require_signature_in_coordinates`, `type`, ...) go in `extra` and are
/// sent after the named fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip)]
    pub extra: Params,
}

impl Recipient {
    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn phone(phone: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, value);
        self
    }

    /// Reinterpret an email-only recipient as a phone number. Used by SMS
    /// endpoints, where bare strings are phone numbers.
    pub fn into_sms(mut self) -> Self {
        if self.phone.is_none() {
            self.phone = self.email.take();
        }
        self
    }
}

impl From<&str> for Recipient {
    fn from(email: &str) -> Self {
        Recipient::email(email)
    }
}

impl From<String> for Recipient {
    fn from(email: String) -> Self {
        Recipient::email(email)
    }
}

impl From<Recipient> for Value {
    fn from(recipient: Recipient) -> Self {
        let mut params = Params::new();
        if let Some(name) = recipient.name {
            params.insert("name", name);
        }
        if let Some(email) = recipient.email {
            params.insert("email", email);
        }
        if let Some(phone) = recipient.phone {
            params.insert("phone", phone);
        }
        params.extend(recipient.extra);
        Value::Map(params)
    }
}

/// One or many recipients, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recipients(pub Vec<Recipient>);

impl Recipients {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl IntoIterator for Recipients {
    type Item = Recipient;
    type IntoIter = std::vec::IntoIter<Recipient>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<&str> for Recipients {
    fn from(email: &str) -> Self {
        Recipients(vec![email.into()])
    }
}

impl From<String> for Recipients {
    fn from(email: String) -> Self {
        Recipients(vec![email.into()])
    }
}

impl From<Recipient> for Recipients {
    fn from(recipient: Recipient) -> Self {
        Recipients(vec![recipient])
    }
}

impl<R: Into<Recipient>> From<Vec<R>> for Recipients {
    fn from(recipients: Vec<R>) -> Self {
        Recipients(recipients.into_iter().map(Into::into).collect())
    }
}

impl<R: Into<Recipient>, const N: usize> From<[R; N]> for Recipients {
    fn from(recipients: [R; N]) -> Self {
        Recipients(recipients.into_iter().map(Into::into).collect())
    }
}

/// One or many local file paths, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Files(pub Vec<PathBuf>);

impl Files {
    pub fn none() -> Self {
        Files(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl IntoIterator for Files {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<&str> for Files {
    fn from(path: &str) -> Self {
        Files(vec![PathBuf::from(path)])
    }
}

impl From<String> for Files {
    fn from(path: String) -> Self {
        Files(vec![PathBuf::from(path)])
    }
}

impl From<&Path> for Files {
    fn from(path: &Path) -> Self {
        Files(vec![path.to_path_buf()])
    }
}

impl From<PathBuf> for Files {
    fn from(path: PathBuf) -> Self {
        Files(vec![path])
    }
}

impl From<&PathBuf> for Files {
    fn from(path: &PathBuf) -> Self {
        Files(vec![path.clone()])
    }
}

impl<P: AsRef<Path>> From<Vec<P>> for Files {
    fn from(paths: Vec<P>) -> Self {
        Files(paths.iter().map(|p| p.as_ref().to_path_buf()).collect())
    }
}

impl<P: AsRef<Path>, const N: usize> From<[P; N]> for Files {
    fn from(paths: [P; N]) -> Self {
        Files(paths.iter().map(|p| p.as_ref().to_path_buf()).collect())
    }
}

/// Role of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Member,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Member => "member",
        }
    }
}

impl From<UserRole> for Value {
    fn from(role: UserRole) -> Self {
        Value::Text(role.as_str().to_string())
    }
}
