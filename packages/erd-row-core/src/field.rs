//! Field definition within a diagram table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub String);

/// Stable identifier of a table. Table nodes in the diagram share this id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TableId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Type descriptor of a field (e.g. `{ id: "varchar", name: "varchar(255)" }`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    /// Type identifier
    pub id: String,
    /// Display name, possibly a full type expression
    pub name: String,
}

impl TypeRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Returns the head word of the type name.
    ///
    /// Long type expressions are cut to their first whitespace-delimited
    /// token, and any parenthesized parameters are dropped, so
    /// `"varchar(255) NOT NULL"` yields `"varchar"`.
    pub fn head_word(&self) -> &str {
        let token = self.name.split_whitespace().next().unwrap_or("");
        match token.find('(') {
            Some(idx) => &token[..idx],
            None => token,
        }
    }
}

/// Field definition owned by the external schema store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field id
    pub id: FieldId,
    /// Field name
    pub name: String,
    /// Part of the primary key
    pub primary_key: bool,
    /// Accepts NULL
    pub nullable: bool,
    /// Has a unique constraint
    pub unique: bool,
    /// Free-form comment text
    #[serde(default)]
    pub comments: String,
    /// Column type
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    /// Character length facet (e.g. `varchar(255)`)
    #[serde(default)]
    pub character_maximum_length: Option<u32>,
    /// Numeric precision facet
    #[serde(default)]
    pub precision: Option<u32>,
    /// Numeric scale facet
    #[serde(default)]
    pub scale: Option<u32>,
    /// Column default expression
    #[serde(default)]
    pub default_value: Option<String>,
    /// Creation timestamp in milliseconds
    #[serde(default)]
    pub created_at: u64,
}

impl Field {
    /// Creates a field with the given id, name and type and no flags or facets.
    pub fn new(id: impl Into<String>, name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            id: FieldId::new(id),
            name: name.into(),
            primary_key: false,
            nullable: false,
            unique: false,
            comments: String::new(),
            type_ref,
            character_maximum_length: None,
            precision: None,
            scale: None,
            default_value: None,
            created_at: 0,
        }
    }

    /// Returns the attribute suffix derived from the numeric facets.
    ///
    /// Character length wins over precision; scale is only shown together
    /// with precision.
    pub fn attribute_suffix(&self) -> Option<String> {
        if let Some(len) = self.character_maximum_length {
            return Some(format!("({len})"));
        }
        match (self.precision, self.scale) {
            (Some(precision), Some(scale)) => Some(format!("({precision}, {scale})")),
            (Some(precision), None) => Some(format!("({precision})")),
            _ => None,
        }
    }
}
