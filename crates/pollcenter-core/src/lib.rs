//! pollcenter-core: polling center inference from electoral-roll booth lists.
//!
//! Raw booth lists often encode several booths at the same physical site
//! under near-duplicate names that differ only by room number, floor or a
//! locale-specific suffix. This crate normalizes booth names and addresses,
//! groups booths by ward, and assigns each distinct (name, address) pair a
//! polling center key such as `KA/AC101/PX001`.
//!
//! - [`normalize`]: name/address cleanup and transliteration
//! - [`ward`]: administrative-code extraction and per-ward grouping
//! - [`resolve`]: per-ward center assignment
//! - [`pipeline`]: sort, group, resolve, and write tab-separated rows

pub mod config;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod resolve;
pub mod ward;

pub use config::*;
pub use error::{PollError, Result};
pub use normalize::{normalize, normalize_booth_names, Normalizer, Transliterator, Unidecode};
pub use pipeline::{ensure_grouped, write_rows, Pipeline, PipelineOutput};
pub use record::*;
pub use resolve::{resolve, CenterResolver, WardResolution};
pub use ward::{extract_ac, group_by_ward, WardGroups};
