//! Ordered key/value records scraped from portal tables
//!
//! The portal's tables carry meaning in their column order, so records keep
//! their keys in insertion order and serialize to JSON objects the same way.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Base URL of the bucket hosting student profile photos
const PROFILE_IMAGE_BASE: &str = "https://iare-data.s3.ap-south-1.amazonaws.com/uploads/STUDENTS";

/// An ordered mapping from column label to cell text.
///
/// Inserting an existing key overwrites its value in place; the key keeps the
/// position of its first insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair, overwriting in place if the key exists
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    /// Get a value by position in insertion order
    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(_, value)| value.as_str())
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Key/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Student identity fields scraped from the attendance page's info table,
/// plus the derived profile photo URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentInfo {
    pub fields: Record,
    pub profile_image: Option<String>,
}

impl StudentInfo {
    /// Build from scraped fields, deriving the profile photo URL from the
    /// roll number when one is present.
    pub fn from_fields(fields: Record) -> Self {
        let mut info = Self {
            fields,
            profile_image: None,
        };
        info.profile_image = info
            .roll_no()
            .map(|roll| format!("{}/{}/{}.jpg", PROFILE_IMAGE_BASE, roll, roll));
        info
    }

    /// Roll number, preferring the portal's "Rollno" label over "Roll No"
    pub fn roll_no(&self) -> Option<&str> {
        ["Rollno", "Roll No"]
            .iter()
            .filter_map(|key| self.fields.get(key))
            .map(str::trim)
            .find(|roll| !roll.is_empty())
    }

    /// Student name as the portal labels it
    pub fn name(&self) -> Option<&str> {
        self.fields
            .get("Name")
            .or_else(|| self.fields.get("Student Name"))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for StudentInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (key, value) in self.fields.iter() {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("profile_image", &self.profile_image)?;
        map.end()
    }
}
