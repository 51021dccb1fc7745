//! Record and pedigree data shapes shared by the API client and the views.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sex of a dog as the service reports it.
///
/// Wire parsing is lenient: a missing field, an empty string, or unrecognized
/// text all come through as `Unknown` (older records predate the enumeration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Unknown,
    Male,
    Female,
}

impl Sex {
    fn from_wire(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Sex::Male,
            "female" => Sex::Female,
            _ => Sex::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for Sex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Sex::from_wire).unwrap_or_default())
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sex::Unknown => "Unknown",
            Sex::Male => "Male",
            Sex::Female => "Female",
        };
        f.write_str(s)
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unknown" | "" => Ok(Sex::Unknown),
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            other => Err(format!(
                "unknown sex {:?} (expected male, female, or unknown)",
                other
            )),
        }
    }
}

/// A dog record as returned by the service.
///
/// The server owns the authoritative state; copies held here are transient.
/// Listing responses carry only the summary fields, so everything beyond id
/// and name defaults when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dog {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Dog {
    /// One-line summary for directory rows: sex, plus color when present.
    pub fn summary(&self) -> String {
        match self.color.as_deref() {
            Some(color) if !color.is_empty() => format!("{} \u{2022} {}", self.sex, color),
            _ => self.sex.to_string(),
        }
    }
}

/// Creation payload for a new record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DogDraft {
    pub name: String,
    pub sex: Sex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DogDraft {
    /// Required-field check, performed before any request is made.
    pub fn validate(&self) -> anyhow::Result<()> {
        use anyhow::bail;

        if self.name.trim().is_empty() {
            bail!("name is required");
        }
        Ok(())
    }
}

/// One node of a pedigree tree: the dog plus its optional paternal (`sire`)
/// and maternal (`dam`) ancestors.
///
/// Acyclic by construction on the server, but the received depth is never
/// trusted: `render::layout` enforces its own bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AncestryNode {
    pub name: String,
    #[serde(default)]
    pub sire: Option<Box<AncestryNode>>,
    #[serde(default)]
    pub dam: Option<Box<AncestryNode>>,
}
