//! Visitor profile and admin session persistence over an abstract key-value store.
//!
//! Every write of the visitor profile goes through [`save_profile`] so the
//! stored JSON has exactly one shape.

use std::cell::RefCell;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Course, UserInfo};

/// Durable storage key holding the serialized [`UserInfo`].
pub const PROFILE_KEY: &str = "userInfo";
/// Session-scoped storage key holding the admin bearer token.
pub const ADMIN_TOKEN_KEY: &str = "adminAuthToken";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Minimal string key-value store (browser local/session storage, or memory in tests).
pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns an error if the backing store cannot be modified.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store for native tests and the scenario tester.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Read the stored profile. Unparseable JSON is removed and reported as absent.
pub fn load_profile<S: KeyValueStore + ?Sized>(store: &S) -> Option<UserInfo> {
    let raw = match store.get(PROFILE_KEY) {
        Ok(raw) => raw?,
        Err(err) => {
            log::warn!("profile unavailable: {err}");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(info) => Some(info),
        Err(err) => {
            log::warn!("discarding corrupt profile: {err}");
            let _ = store.remove(PROFILE_KEY);
            None
        }
    }
}

/// Overwrite the stored profile wholesale.
///
/// # Errors
///
/// Returns an error if the profile cannot be serialized or stored.
pub fn save_profile<S: KeyValueStore + ?Sized>(
    store: &S,
    info: &UserInfo,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(info)?;
    store.set(PROFILE_KEY, &json)
}

#[must_use]
pub fn admin_token<S: KeyValueStore + ?Sized>(store: &S) -> Option<String> {
    store
        .get(ADMIN_TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.is_empty())
}

/// # Errors
///
/// Returns an error if the session store rejects the write.
pub fn store_admin_token<S: KeyValueStore + ?Sized>(
    store: &S,
    token: &str,
) -> Result<(), StorageError> {
    store.set(ADMIN_TOKEN_KEY, token)
}

/// # Errors
///
/// Returns an error if the session store cannot be modified.
pub fn clear_admin_token<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), StorageError> {
    store.remove(ADMIN_TOKEN_KEY)
}

static MOBILE_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^09\d{9}$").ok());

/// Contact fields collected by the lead forms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactDetails {
    pub name: String,
    pub phone: String,
    pub city: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("name is required")]
    MissingName,
    #[error("phone is required")]
    MissingPhone,
    #[error("city is required")]
    MissingCity,
    #[error("phone must be a mobile number like 09123456789")]
    InvalidPhone,
}

impl ContactError {
    /// Translation key for the message shown next to the form.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::MissingName | Self::MissingPhone | Self::MissingCity => "form.required",
            Self::InvalidPhone => "form.invalid_phone",
        }
    }
}

impl ContactDetails {
    /// Trim fields, normalise Persian/Arabic digits in the phone and validate.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed field.
    pub fn validated(&self) -> Result<Self, ContactError> {
        let name = self.name.trim();
        let city = self.city.trim();
        let phone: String = self
            .phone
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .map(to_ascii_digit)
            .collect();
        if name.is_empty() {
            return Err(ContactError::MissingName);
        }
        if phone.is_empty() {
            return Err(ContactError::MissingPhone);
        }
        if city.is_empty() {
            return Err(ContactError::MissingCity);
        }
        let valid = MOBILE_RE
            .as_ref()
            .is_some_and(|re| re.is_match(&phone));
        if !valid {
            return Err(ContactError::InvalidPhone);
        }
        Ok(Self {
            name: name.to_string(),
            phone,
            city: city.to_string(),
        })
    }
}

impl From<&UserInfo> for ContactDetails {
    fn from(info: &UserInfo) -> Self {
        Self {
            name: info.name.clone(),
            phone: info.phone.clone(),
            city: info.city.clone(),
        }
    }
}

impl UserInfo {
    /// Replace the contact fields, keeping the course of interest.
    #[must_use]
    pub fn with_contact(self, contact: ContactDetails) -> Self {
        Self {
            name: contact.name,
            phone: contact.phone,
            city: contact.city,
            course_of_interest: self.course_of_interest,
        }
    }

    /// Profile recorded when a consultation is requested for `course`.
    #[must_use]
    pub fn for_consultation(
        previous: Option<&Self>,
        contact: ContactDetails,
        course: &Course,
    ) -> Self {
        let mut merged = previous.cloned().unwrap_or_default().with_contact(contact);
        merged.course_of_interest = Some(course.language.clone());
        merged
    }
}

/// Map Persian (`۰-۹`) and Arabic-Indic (`٠-٩`) digits to ASCII.
#[must_use]
pub fn to_ascii_digit(c: char) -> char {
    match c {
        '۰'..='۹' => char::from_u32(u32::from(c) - 0x06F0 + u32::from('0')).unwrap_or(c),
        '٠'..='٩' => char::from_u32(u32::from(c) - 0x0660 + u32::from('0')).unwrap_or(c),
        _ => c,
    }
}
