//! Typed cell values and the maps that carry them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Kinds
// ──────────────────────────────────────────────

/// The closed set of value kinds a column or form field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Kind {
    Text,
    Number,
    Boolean,
    Date,
    #[serde(rename = "datetime")]
    DateTime,
    Choice,
    ChoiceList,
    File,
}

impl Kind {
    pub const ALL: [Kind; 8] = [
        Kind::Text,
        Kind::Number,
        Kind::Boolean,
        Kind::Date,
        Kind::DateTime,
        Kind::Choice,
        Kind::ChoiceList,
        Kind::File,
    ];

    /// Wire name of the kind, as used in the `type` tag of a value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Text => "text",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Date => "date",
            Kind::DateTime => "datetime",
            Kind::Choice => "choice",
            Kind::ChoiceList => "choiceList",
            Kind::File => "file",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown kind '{}'", s))
    }
}

// ──────────────────────────────────────────────
// Values
// ──────────────────────────────────────────────

/// An uploaded file referenced from a `file` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    pub url: String,
    pub filename: String,
    pub size: u64,
    pub mime_type: String,
    pub checksum: String,
}

/// A cell value tagged with its kind.
///
/// The tag always matches the payload shape; there is no way to build a
/// `Number` holding text. `Date` and `DateTime` keep the ISO calendar string
/// as stored and are only parsed when compared or formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum TypedValue {
    Text(String),
    Number(i64),
    Boolean(bool),
    Date(String),
    #[serde(rename = "datetime")]
    DateTime(String),
    Choice(String),
    ChoiceList(Vec<String>),
    File(Vec<FileRef>),
}

impl TypedValue {
    pub fn kind(&self) -> Kind {
        match self {
            TypedValue::Text(_) => Kind::Text,
            TypedValue::Number(_) => Kind::Number,
            TypedValue::Boolean(_) => Kind::Boolean,
            TypedValue::Date(_) => Kind::Date,
            TypedValue::DateTime(_) => Kind::DateTime,
            TypedValue::Choice(_) => Kind::Choice,
            TypedValue::ChoiceList(_) => Kind::ChoiceList,
            TypedValue::File(_) => Kind::File,
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        TypedValue::Text(s.into())
    }
}

// ──────────────────────────────────────────────
// Maps
// ──────────────────────────────────────────────

/// Field id → value. An id that is not present has no value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Data(pub BTreeMap<String, TypedValue>);

impl Data {
    pub fn new() -> Self {
        Data(BTreeMap::new())
    }

    pub fn get(&self, id: &str) -> Option<&TypedValue> {
        self.0.get(id)
    }

    pub fn insert(&mut self, id: impl Into<String>, value: TypedValue) {
        self.0.insert(id.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypedValue)> {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, TypedValue)> for Data {
    fn from_iter<I: IntoIterator<Item = (K, TypedValue)>>(iter: I) -> Self {
        Data(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Placeholder id → ordered rows, used for repeated document sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubData(pub BTreeMap<String, Vec<Data>>);

impl SubData {
    pub fn new() -> Self {
        SubData(BTreeMap::new())
    }

    pub fn get(&self, id: &str) -> Option<&[Data]> {
        self.0.get(id).map(Vec::as_slice)
    }

    pub fn insert(&mut self, id: impl Into<String>, rows: Vec<Data>) {
        self.0.insert(id.into(), rows);
    }
}

/// Column or form field id → declared kind.
pub type Columns = BTreeMap<String, Kind>;
