//! Ward keys: administrative-code extraction and grouping of booth records

use std::iter::Peekable;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{PollError, Result};
use crate::record::BoothRecord;

lazy_static! {
    // Constituency token like "KA/AC101"
    static ref AC_REGEX: Regex = Regex::new(r"[A-Z][A-Z]/AC[0-9]{3}").unwrap();
}

/// Extract the first `<2 letters>/AC<3 digits>` token from a ward key
pub fn extract_ac(ward_key: &str) -> Result<&str> {
    AC_REGEX
        .find(ward_key)
        .map(|m| m.as_str())
        .ok_or_else(|| PollError::MissingAdministrativeCode(ward_key.to_string()))
}

/// Splits a record stream into contiguous runs sharing a ward key.
///
/// The grouper relies on adjacency only: records of one ward that are not
/// contiguous come out as separate groups. Sort the input by ward key first
/// (see [`crate::pipeline::Pipeline`]).
pub struct WardGroups<I: Iterator<Item = BoothRecord>> {
    records: Peekable<I>,
}

impl<I: Iterator<Item = BoothRecord>> WardGroups<I> {
    pub fn new(records: I) -> Self {
        Self {
            records: records.peekable(),
        }
    }
}

impl<I: Iterator<Item = BoothRecord>> Iterator for WardGroups<I> {
    type Item = (String, Vec<BoothRecord>);

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.records.next()?;
        let ward_key = first.ward_key.clone();
        let mut group = vec![first];

        while let Some(record) = self.records.next_if(|r| r.ward_key == ward_key) {
            group.push(record);
        }

        Some((ward_key, group))
    }
}

/// Group records into per-ward runs
pub fn group_by_ward<I>(records: I) -> WardGroups<I::IntoIter>
where
    I: IntoIterator<Item = BoothRecord>,
{
    WardGroups::new(records.into_iter())
}
