//! Booth input records and the center/booth output rows

use serde::{Deserialize, Serialize};

use crate::error::{PollError, Result};

/// One input booth line: ward, booth key, name and (optional) address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BoothRecord {
    pub ward_key: String,
    /// Path-like key; the last `/` segment is the booth code
    pub booth_key: String,
    pub name: String,
    /// Required when deriving centers, absent when only renaming booths
    pub address: Option<String>,
}

impl BoothRecord {
    pub fn new(
        ward_key: impl Into<String>,
        booth_key: impl Into<String>,
        name: impl Into<String>,
        address: Option<&str>,
    ) -> Self {
        Self {
            ward_key: ward_key.into(),
            booth_key: booth_key.into(),
            name: name.into(),
            address: address.map(str::to_string),
        }
    }

    /// Parse a tab-separated line.
    ///
    /// The line is trimmed and split into at most four fields, so an address
    /// may itself contain tabs.
    pub fn parse_line(line: &str) -> Result<Self> {
        let trimmed = line.trim();
        let fields: Vec<&str> = trimmed.splitn(4, '\t').collect();
        match fields.as_slice() {
            [ward_key, booth_key, name] => Ok(Self::new(*ward_key, *booth_key, *name, None)),
            [ward_key, booth_key, name, address] => {
                Ok(Self::new(*ward_key, *booth_key, *name, Some(*address)))
            }
            _ => Err(PollError::malformed(
                line,
                format!("expected 3 or 4 tab-separated fields, found {}", fields.len()),
            )),
        }
    }

    /// Last path segment of the booth key
    pub fn booth_code(&self) -> &str {
        self.booth_key.rsplit('/').next().unwrap_or(&self.booth_key)
    }

    pub(crate) fn require_address(&self) -> Result<&str> {
        self.address.as_deref().ok_or_else(|| {
            PollError::malformed(&self.booth_key, "address field is required to derive centers")
        })
    }
}

/// Dedup key of a booth: lowercased normalized name followed by lowercased
/// normalized address, no separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    pub fn new(normalized_name: &str, normalized_address: &str) -> Self {
        let mut key = normalized_name.to_lowercase();
        key.push_str(&normalized_address.to_lowercase());
        Signature(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A physical polling location hosting one or more booths.
///
/// Field order defines the row ordering: origin, then center key, then name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PollingCenter {
    /// Ward key, or the AC when the ward key is a placeholder ward
    pub origin_key: String,
    /// `<AC>/<prefix><seq>`, e.g. `KA/AC101/PX001`
    pub center_key: String,
    /// `<center code> - <normalized name>`
    pub display_name: String,
}

/// A booth row rewritten to point at its resolved center.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PollingBooth {
    pub center_key: String,
    pub booth_key: String,
    /// `<booth code> - <normalized name>`
    pub display_name: String,
}

/// A booth with its name normalized, used when no centers are derived.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NormalizedBooth {
    pub ward_key: String,
    pub booth_key: String,
    pub name: String,
}
