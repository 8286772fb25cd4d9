//! In-memory driver: booth lines in, center and booth rows out
//!
//! The driver owns the ordering contract of [`crate::ward::WardGroups`]: input
//! lines are sorted before grouping, or (with `sort_input = false`) checked
//! for contiguity so that a ward is never silently split in two.

use std::collections::HashSet;
use std::io::Write;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{PipelineConfig, PollcenterConfig};
use crate::error::{PollError, Result};
use crate::record::{BoothRecord, NormalizedBooth, PollingBooth, PollingCenter};
use crate::resolve::CenterResolver;
use crate::ward::group_by_ward;

/// Accumulated rows of a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutput {
    pub centers: Vec<PollingCenter>,
    pub booths: Vec<PollingBooth>,
    /// Number of wards resolved
    pub wards: usize,
    /// Wards dropped under `skip_failed_wards`
    pub skipped_wards: Vec<String>,
}

impl PipelineOutput {
    /// Write both row streams as tab-separated lines
    pub fn write<C: Write, B: Write>(&self, centers: C, booths: B) -> Result<()> {
        write_rows(centers, &self.centers)?;
        write_rows(booths, &self.booths)
    }
}

pub struct Pipeline {
    resolver: CenterResolver,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: &PollcenterConfig) -> Result<Self> {
        Ok(Self {
            resolver: CenterResolver::new(config)?,
            config: config.pipeline.clone(),
        })
    }

    /// Derive centers from raw booth lines
    pub fn run<I, S>(&self, lines: I) -> Result<PipelineOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records = self.prepare(lines)?;
        self.run_records(records)
    }

    /// Derive centers from records already in ward order
    pub fn run_records(&self, records: Vec<BoothRecord>) -> Result<PipelineOutput> {
        let mut output = PipelineOutput::default();

        for (ward_key, group) in group_by_ward(records) {
            match self.resolver.resolve(&ward_key, &group) {
                Ok(resolution) => {
                    output.centers.extend(resolution.centers);
                    output.booths.extend(resolution.booths);
                    output.wards += 1;
                }
                Err(e) if self.config.skip_failed_wards => {
                    warn!("Skipping ward {} ({} booths): {}", ward_key, group.len(), e);
                    output.skipped_wards.push(ward_key);
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Pipeline finished - wards={}, centers={}, booths={}, skipped={}",
            output.wards,
            output.centers.len(),
            output.booths.len(),
            output.skipped_wards.len()
        );

        Ok(output)
    }

    /// Normalize booth names only, without deriving centers
    pub fn normalize_names<I, S>(&self, lines: I) -> Result<Vec<NormalizedBooth>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records = self.prepare(lines)?;
        Ok(self.resolver.normalizer().normalize_booths(&records))
    }

    /// Parse lines and bring them into ward order
    pub fn prepare<I, S>(&self, lines: I) -> Result<Vec<BoothRecord>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines: Vec<String> = lines
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        if self.config.sort_input {
            lines.sort();
        }

        let records = lines
            .iter()
            .map(|l| BoothRecord::parse_line(l))
            .collect::<Result<Vec<_>>>()?;

        if !self.config.sort_input {
            ensure_grouped(&records)?;
        }

        debug!("Prepared {} booth records", records.len());
        Ok(records)
    }
}

/// Fail if any ward key appears in more than one contiguous run
pub fn ensure_grouped(records: &[BoothRecord]) -> Result<()> {
    let mut finished: HashSet<&str> = HashSet::new();

    for pair in records.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if prev.ward_key != next.ward_key {
            finished.insert(&prev.ward_key);
            if finished.contains(next.ward_key.as_str()) {
                return Err(PollError::UnsortedInput(next.ward_key.clone()));
            }
        }
    }

    Ok(())
}

/// Write rows as tab-separated, newline-terminated lines with no header or quoting
pub fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
