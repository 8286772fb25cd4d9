//! Polling center inference for a single ward
//!
//! Booths of one ward that normalize to the same name and address are taken
//! to share a physical location. Each distinct [`Signature`] becomes a
//! [`PollingCenter`] numbered in first-seen order (`PX001`, `PX002`, ...), and
//! every booth is rewritten to reference its center.
//!
//! Signatures are never compared across wards: the signature table lives only
//! for the duration of one [`CenterResolver::resolve`] call.

use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::debug;

use crate::config::{CenterOrder, PollcenterConfig, ResolverConfig};
use crate::error::Result;
use crate::normalize::Normalizer;
use crate::record::{BoothRecord, PollingBooth, PollingCenter, Signature};
use crate::ward::extract_ac;

lazy_static! {
    static ref DEFAULT_RESOLVER: CenterResolver = CenterResolver::new(&PollcenterConfig::default())
        .expect("default config is valid");
}

/// Centers and rewritten booths for one ward
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WardResolution {
    pub centers: Vec<PollingCenter>,
    /// One per input record, in input order
    pub booths: Vec<PollingBooth>,
}

#[derive(Debug)]
pub struct CenterResolver {
    normalizer: Normalizer,
    config: ResolverConfig,
}

impl CenterResolver {
    pub fn new(config: &PollcenterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_normalizer(
            Normalizer::new(&config.normalizer)?,
            config.resolver.clone(),
        ))
    }

    pub fn with_normalizer(normalizer: Normalizer, config: ResolverConfig) -> Self {
        Self { normalizer, config }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Resolve one ward's records into center and booth rows.
    ///
    /// Fails with `MissingAdministrativeCode` if the ward key has no AC token,
    /// or `MalformedRecord` if a record has no address. Nothing is returned
    /// for a ward that fails.
    pub fn resolve(&self, ward_key: &str, records: &[BoothRecord]) -> Result<WardResolution> {
        let mut seen: HashMap<Signature, usize> = HashMap::new();
        let mut centers: Vec<PollingCenter> = Vec::new();
        let mut booths = Vec::with_capacity(records.len());

        for record in records {
            let address = self.normalizer.normalize(record.require_address()?);
            let name = self.normalizer.normalize(&record.name);
            let signature = Signature::new(&name, &address);

            let center_key = match seen.get(&signature) {
                Some(&index) => centers[index].center_key.clone(),
                None => {
                    let center = self.new_center(ward_key, centers.len() + 1, &name)?;
                    let center_key = center.center_key.clone();
                    seen.insert(signature, centers.len());
                    centers.push(center);
                    center_key
                }
            };

            booths.push(PollingBooth {
                center_key,
                booth_key: record.booth_key.clone(),
                display_name: format!("{} - {}", record.booth_code(), name),
            });
        }

        if self.config.center_order == CenterOrder::Sorted {
            centers.sort();
        }

        debug!(
            "Resolved ward {} - booths={}, centers={}",
            ward_key,
            booths.len(),
            centers.len()
        );

        Ok(WardResolution { centers, booths })
    }

    fn new_center(&self, ward_key: &str, sequence: usize, name: &str) -> Result<PollingCenter> {
        let ac = extract_ac(ward_key)?;
        let center_code = format!(
            "{}{:0>width$}",
            self.config.center_prefix,
            sequence,
            width = self.config.code_width
        );
        let origin_key = if ward_key.contains(&self.config.origin_marker) {
            ac
        } else {
            ward_key
        };

        Ok(PollingCenter {
            origin_key: origin_key.to_string(),
            center_key: format!("{}/{}", ac, center_code),
            display_name: format!("{} - {}", center_code, name),
        })
    }
}

/// Resolve a ward with the default configuration
pub fn resolve(ward_key: &str, records: &[BoothRecord]) -> Result<WardResolution> {
    DEFAULT_RESOLVER.resolve(ward_key, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PollError;

    const WARD: &str = "KA/AC101-W007";

    fn booth(key: &str, name: &str, address: &str) -> BoothRecord {
        BoothRecord::new(WARD, key, name, Some(address))
    }

    #[test]
    fn test_shared_location_single_center() {
        let records = vec![
            booth("KA/AC101/PB001", "PB0001 - ROOM 1, GOVT SCHOOL", "MAIN ROAD, HUBLI"),
            booth("KA/AC101/PB002", "PB0002 - ROOM 2, GOVT SCHOOL", "MAIN ROAD, HUBLI"),
        ];
        let out = resolve(WARD, &records).unwrap();

        assert_eq!(out.centers.len(), 1);
        assert_eq!(out.centers[0].origin_key, WARD);
        assert_eq!(out.centers[0].center_key, "KA/AC101/PX001");
        assert_eq!(out.centers[0].display_name, "PX001 - GOVT SCHOOL");
        assert!(out.booths.iter().all(|b| b.center_key == "KA/AC101/PX001"));
        assert_eq!(out.booths[0].display_name, "PB001 - GOVT SCHOOL");
        assert_eq!(out.booths[1].booth_key, "KA/AC101/PB002");
    }

    #[test]
    fn test_codes_in_first_seen_order() {
        let records = vec![
            booth("K/PB1", "ZILLA SCHOOL", "HUBLI"),
            booth("K/PB2", "AMBEDKAR BHAVAN", "HUBLI"),
            booth("K/PB3", "ZILLA SCHOOL", "HUBLI"),
        ];
        let out = resolve(WARD, &records).unwrap();

        let keys: Vec<_> = out.booths.iter().map(|b| b.center_key.as_str()).collect();
        assert_eq!(keys, vec!["KA/AC101/PX001", "KA/AC101/PX002", "KA/AC101/PX001"]);
    }

    #[test]
    fn test_address_participates_in_signature() {
        let records = vec![
            booth("K/PB1", "GOVT SCHOOL", "HUBLI"),
            booth("K/PB2", "GOVT SCHOOL", "DHARWAD"),
        ];
        let out = resolve(WARD, &records).unwrap();
        assert_eq!(out.centers.len(), 2);
    }

    #[test]
    fn test_signature_ignores_case() {
        let records = vec![
            booth("K/PB1", "Govt School", "Hubli"),
            booth("K/PB2", "GOVT SCHOOL", "HUBLI"),
        ];
        let out = resolve(WARD, &records).unwrap();
        assert_eq!(out.centers.len(), 1);
        // First-seen spelling names the center
        assert_eq!(out.centers[0].display_name, "PX001 - Govt School");
    }

    #[test]
    fn test_placeholder_ward_uses_ac_as_origin() {
        let ward = "KA/AC101/WL000";
        let records = vec![BoothRecord::new(ward, "K/PB1", "SCHOOL", Some("HUBLI"))];
        let out = resolve(ward, &records).unwrap();
        assert_eq!(out.centers[0].origin_key, "KA/AC101");
    }

    #[test]
    fn test_missing_ac_fails() {
        let ward = "KA101-W007";
        let records = vec![BoothRecord::new(ward, "K/PB1", "SCHOOL", Some("HUBLI"))];
        let err = resolve(ward, &records).unwrap_err();
        assert_eq!(err, PollError::MissingAdministrativeCode(ward.to_string()));
    }

    #[test]
    fn test_missing_address_fails() {
        let records = vec![BoothRecord::new(WARD, "K/PB1", "SCHOOL", None)];
        let err = resolve(WARD, &records).unwrap_err();
        assert!(matches!(err, PollError::MalformedRecord { .. }));
    }

    #[test]
    fn test_empty_name_still_resolves() {
        let records = vec![booth("K/PB1", "ROOM (X)", "HUBLI")];
        let out = resolve(WARD, &records).unwrap();
        assert_eq!(out.centers[0].display_name, "PX001 - ");
        assert_eq!(out.booths[0].display_name, "PB1 - ");
    }

    #[test]
    fn test_sequence_not_truncated_past_width() {
        let records: Vec<_> = (0..1000)
            .map(|i| booth(&format!("K/PB{}", i), &format!("SCHOOL {} HALL", to_letters(i)), "HUBLI"))
            .collect();
        let out = resolve(WARD, &records).unwrap();

        assert_eq!(out.centers.len(), 1000);
        assert_eq!(out.booths[999].center_key, "KA/AC101/PX1000");
        // Sorted rows put PX1000 between PX100 and PX101
        let pos = out
            .centers
            .iter()
            .position(|c| c.center_key == "KA/AC101/PX1000")
            .unwrap();
        assert_eq!(out.centers[pos - 1].center_key, "KA/AC101/PX100");
    }

    #[test]
    fn test_first_seen_order() {
        let config = PollcenterConfig {
            resolver: ResolverConfig {
                center_order: CenterOrder::FirstSeen,
                center_prefix: "PC".to_string(),
                code_width: 4,
                ..Default::default()
            },
            ..Default::default()
        };
        let resolver = CenterResolver::new(&config).unwrap();
        let records = vec![
            booth("K/PB1", "ZILLA SCHOOL", "HUBLI"),
            booth("K/PB2", "AMBEDKAR BHAVAN", "HUBLI"),
        ];
        let out = resolver.resolve(WARD, &records).unwrap();
        assert_eq!(out.centers[0].center_key, "KA/AC101/PC0001");
        assert_eq!(out.centers[0].display_name, "PC0001 - ZILLA SCHOOL");
        assert_eq!(out.centers[1].center_key, "KA/AC101/PC0002");
    }

    /// Distinct letters-only word; digits would be stripped by the normalizer
    fn to_letters(mut n: usize) -> String {
        let mut s = String::new();
        loop {
            s.push((b'A' + (n % 26) as u8) as char);
            n /= 26;
            if n == 0 {
                break;
            }
        }
        s
    }
}
