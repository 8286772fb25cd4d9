//! Configuration for pollcenter-core
//!
//! Centralized configuration for the normalizer vocabulary, center code
//! format, and pipeline behavior. Every section has defaults that reproduce
//! the stock behavior, so a TOML file only needs the keys it overrides:
//!
//! ```toml
//! [normalizer]
//! max_trailing_fragment = 2
//!
//! [resolver]
//! center_prefix = "PC"
//! center_order = "first_seen"
//!
//! [pipeline]
//! skip_failed_wards = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PollError, Result};

/// Latin room/location words removed from booth names.
pub const LATIN_ROOM_WORDS: &[&str] = &[
    "ROOM", "CENTER", "CENTRE", "PART", "BOOTH", "NORTH", "SOUTH", "EAST", "WEST", "AREA", "ROAD",
    "KA", "NAGAR", "NAG",
];

/// Devanagari room/location words: directions, "part", "room", "near", "road", "nagar".
pub const DEVANAGARI_ROOM_WORDS: &[&str] = &[
    "दक्षिण",
    "उत्तरी",
    "पश्चिमी",
    "मध्य",
    "पूर्वी",
    "पशि",
    "पशिचम",
    "पश्चिम",
    "भाग",
    "कमरा",
    "के",
    "पास",
    "रोड",
    "नगर",
];

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollcenterConfig {
    /// Name normalization settings
    pub normalizer: NormalizerConfig,
    /// Center code assignment settings
    pub resolver: ResolverConfig,
    /// Driver settings
    pub pipeline: PipelineConfig,
}

impl PollcenterConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PollcenterConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Reject settings that cannot produce well-formed keys
    pub fn validate(&self) -> Result<()> {
        if self.resolver.center_prefix.is_empty() {
            return Err(PollError::Config("center_prefix must not be empty".into()));
        }
        if self.resolver.code_width == 0 {
            return Err(PollError::Config("code_width must be at least 1".into()));
        }
        if self.normalizer.room_words.iter().any(|w| w.trim().is_empty()) {
            return Err(PollError::Config("room_words must not contain blank entries".into()));
        }
        Ok(())
    }
}

/// Name normalizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Whole-token vocabulary stripped from names and addresses
    pub room_words: Vec<String>,
    /// Longest trailing fragment (after a space) dropped from the end; 0 disables
    pub max_trailing_fragment: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            room_words: LATIN_ROOM_WORDS
                .iter()
                .chain(DEVANAGARI_ROOM_WORDS)
                .map(|w| w.to_string())
                .collect(),
            max_trailing_fragment: 3,
        }
    }
}

/// Ordering of center rows emitted for a ward
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterOrder {
    /// Lexicographic over (origin, center key, display name)
    #[default]
    Sorted,
    /// Order in which signatures were first seen
    FirstSeen,
}

/// Center resolver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Prefix of the per-ward center code
    pub center_prefix: String,
    /// Minimum zero-padded width of the sequence number
    pub code_width: usize,
    /// Ward keys containing this marker use the AC as origin
    pub origin_marker: String,
    /// Center row ordering
    pub center_order: CenterOrder,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            center_prefix: "PX".to_string(),
            code_width: 3,
            origin_marker: "WL000".to_string(),
            center_order: CenterOrder::Sorted,
        }
    }
}

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Sort input lines before grouping; when false, input must already be grouped
    pub sort_input: bool,
    /// Drop wards that fail to resolve instead of aborting the run
    pub skip_failed_wards: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sort_input: true,
            skip_failed_wards: false,
        }
    }
}
