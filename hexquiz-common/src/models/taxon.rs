//! Taxon records and ancestry paths
//!
//! iNaturalist encodes a taxon's lineage as a `/`-separated path of ancestor
//! ids, root first (e.g. `48460/1/47120/372739/47158`). The path is kept as an
//! ordered `Vec<TaxonId>` internally and serialized back to the same path
//! string on the wire.

use std::collections::HashSet;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Numeric iNaturalist taxon identifier
pub type TaxonId = u64;

/// Taxonomic ranks a quiz taxon may have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Family,
    Superfamily,
    Order,
}

impl Rank {
    /// All permitted ranks, in the order they are sent to the taxonomy search
    pub const ALL: [Rank; 3] = [Rank::Family, Rank::Superfamily, Rank::Order];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Family => "family",
            Rank::Superfamily => "superfamily",
            Rank::Order => "order",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "family" => Ok(Rank::Family),
            "superfamily" => Ok(Rank::Superfamily),
            "order" => Ok(Rank::Order),
            other => Err(Error::Validation(format!(
                "Unsupported rank '{}' (expected family, superfamily, or order)",
                other
            ))),
        }
    }
}

/// Parse an ancestry path into ordered ancestor ids
///
/// An empty or whitespace-only path yields no ancestors.
pub fn parse_ancestry(path: &str) -> std::result::Result<Vec<TaxonId>, ParseIntError> {
    if path.trim().is_empty() {
        return Ok(Vec::new());
    }
    path.split('/').map(|token| token.trim().parse()).collect()
}

/// Render ancestor ids back into iNaturalist's path form
pub fn format_ancestry(ids: &[TaxonId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Serde adapter: `Vec<TaxonId>` <-> `"1/47120/47158"`
pub mod ancestry_path {
    use super::{format_ancestry, parse_ancestry, TaxonId};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ids: &[TaxonId], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_ancestry(ids))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<TaxonId>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        parse_ancestry(raw.as_deref().unwrap_or(""))
            .map_err(|e| serde::de::Error::custom(format!("invalid ancestry path: {}", e)))
    }
}

/// Canonical taxon resolved from the taxonomy search
///
/// Immutable once resolved. `ancestry` lists ancestors only; the taxon's own
/// id is added when building its [`lineage`](TaxonRecord::lineage).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonRecord {
    pub id: TaxonId,
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub rank: Rank,
    #[serde(with = "ancestry_path", default)]
    pub ancestry: Vec<TaxonId>,
}

impl TaxonRecord {
    pub fn new(
        id: TaxonId,
        scientific_name: impl Into<String>,
        common_name: Option<String>,
        rank: Rank,
        mut ancestry: Vec<TaxonId>,
    ) -> Self {
        // Some upstream payloads end the path with the taxon itself
        ancestry.retain(|ancestor| *ancestor != id);
        Self {
            id,
            scientific_name: scientific_name.into(),
            common_name,
            rank,
            ancestry,
        }
    }

    /// Ancestry path ids plus the taxon's own id
    pub fn lineage(&self) -> HashSet<TaxonId> {
        let mut set: HashSet<TaxonId> = self.ancestry.iter().copied().collect();
        set.insert(self.id);
        set
    }

    pub fn ancestry_path(&self) -> String {
        format_ancestry(&self.ancestry)
    }
}

/// Loosely-typed taxon as sent by clients to the overlap check
///
/// Mirrors the shape returned by taxon validation. Every field is optional so
/// malformed input can be reported instead of rejected at deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonDescriptor {
    /// Number or numeric string
    #[serde(default, alias = "id")]
    pub taxon_id: Option<Value>,
    #[serde(default, alias = "name")]
    pub taxon_name: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub ancestry: Option<String>,
}

impl TaxonDescriptor {
    /// Best-effort display label for diagnostics
    pub fn label(&self) -> String {
        match (&self.taxon_name, &self.taxon_id) {
            (Some(name), _) if !name.trim().is_empty() => name.clone(),
            (_, Some(id)) => format!("taxon {}", id),
            _ => "unnamed taxon".to_string(),
        }
    }
}

fn parse_taxon_id(value: &Value) -> Option<TaxonId> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl TryFrom<&TaxonDescriptor> for TaxonRecord {
    type Error = Error;

    fn try_from(descriptor: &TaxonDescriptor) -> Result<Self> {
        let label = descriptor.label();

        let id = match &descriptor.taxon_id {
            None | Some(Value::Null) => {
                return Err(Error::Validation(format!("{} is missing taxon_id", label)))
            }
            Some(value) => parse_taxon_id(value).ok_or_else(|| {
                Error::Validation(format!("{} has a non-numeric taxon_id: {}", label, value))
            })?,
        };

        let name = descriptor
            .taxon_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::Validation(format!("taxon {} is missing taxon_name", id)))?;

        let rank = descriptor
            .rank
            .as_deref()
            .ok_or_else(|| Error::Validation(format!("{} is missing rank", name)))?
            .parse::<Rank>()?;

        let path = descriptor
            .ancestry
            .as_deref()
            .ok_or_else(|| Error::Validation(format!("{} is missing ancestry", name)))?;
        let ancestry = parse_ancestry(path).map_err(|e| {
            Error::Validation(format!("{} has a malformed ancestry '{}': {}", name, path, e))
        })?;

        Ok(TaxonRecord::new(id, name, None, rank, ancestry))
    }
}
