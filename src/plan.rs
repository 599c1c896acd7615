//! Distribution planning: turn "N files across these percentages" into
//! exact per-format integer counts.
//!
//! The plan is the single source of truth for how many files of each
//! format one run produces. Counts always sum to the requested total for
//! percentage maps summing to ~100; integer rounding drift is reconciled
//! by handing the whole remainder to the format holding the largest count.

use crate::format::FileFormat;
use rand::Rng;

/// Tolerance in percentage points before a sum warning is emitted.
const PERCENT_SUM_TOLERANCE: f64 = 1.0;

/// One entry of a percentage map.
///
/// `Remaining` is the typed form of the reserved `"remaining"` key: its
/// share is split evenly across active formats that carry no explicit
/// percentage. Typed here so a typo in config can only fail at the parse
/// boundary, never silently select the wrong branch at plan time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentageSpec {
    Format(FileFormat),
    Remaining,
}

/// Resolved per-format file counts for one generation run.
///
/// Entries are kept in canonical `FileFormat` order and only formats with
/// a non-zero count appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionPlan {
    counts: Vec<(FileFormat, u64)>,
}

impl DistributionPlan {
    /// Build a plan from raw per-format counts, normalizing to canonical
    /// order and dropping zero entries.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (FileFormat, u64)>,
    {
        let mut by_format = [0u64; FileFormat::ALL.len()];
        for (format, count) in counts {
            let idx = FileFormat::ALL.iter().position(|f| *f == format).unwrap();
            by_format[idx] += count;
        }
        let counts = FileFormat::ALL
            .iter()
            .zip(by_format)
            .filter(|(_, count)| *count > 0)
            .map(|(format, count)| (*format, count))
            .collect();
        Self { counts }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of files planned.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, c)| c).sum()
    }

    /// Count for one format (0 when absent).
    pub fn count(&self, format: FileFormat) -> u64 {
        self.counts
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Entries in canonical format order.
    pub fn entries(&self) -> &[(FileFormat, u64)] {
        &self.counts
    }
}

/// A plan plus any non-fatal warnings produced while computing it.
#[derive(Debug, Clone, Default)]
pub struct PlanOutcome {
    pub plan: DistributionPlan,
    pub warnings: Vec<String>,
}

/// Plan `total` files according to a percentage map.
///
/// An empty map yields an empty plan: that is a mode-selection signal for
/// the caller (fall back to fixed counts or random assignment), not an
/// error. A sum outside `100 +/- 1` is reported as a warning and the given
/// values are used as-is.
pub fn plan_percentages(
    total: u64,
    percentages: &[(PercentageSpec, f64)],
    active: &[FileFormat],
) -> PlanOutcome {
    if percentages.is_empty() {
        return PlanOutcome::default();
    }

    let mut warnings = Vec::new();

    let sum: f64 = percentages.iter().map(|(_, pct)| pct).sum();
    if (sum - 100.0).abs() > PERCENT_SUM_TOLERANCE {
        warnings.push(format!(
            "Percentages sum to {:.1}, expected 100 (±{:.0}); proceeding with given values",
            sum, PERCENT_SUM_TOLERANCE
        ));
    }

    // Resolve explicit shares first; "remaining" accumulates separately.
    let mut explicit: Vec<(FileFormat, f64)> = Vec::new();
    let mut remaining_share = 0.0;
    for (spec, pct) in percentages {
        match spec {
            PercentageSpec::Format(format) => {
                match explicit.iter_mut().find(|(f, _)| f == format) {
                    Some((_, existing)) => *existing += pct,
                    None => explicit.push((*format, *pct)),
                }
            }
            PercentageSpec::Remaining => remaining_share += pct,
        }
    }

    // Split the remaining share evenly across active formats that have no
    // explicit percentage. With nothing left unassigned the share is
    // dropped; reconciliation below absorbs the resulting under-count.
    if remaining_share > 0.0 {
        let unassigned: Vec<FileFormat> = active
            .iter()
            .copied()
            .filter(|f| !explicit.iter().any(|(e, _)| e == f))
            .collect();
        if !unassigned.is_empty() {
            let share = remaining_share / unassigned.len() as f64;
            for format in unassigned {
                explicit.push((format, share));
            }
        }
    }

    // Floor each count, in canonical order so the tie-break is stable.
    let mut counts: Vec<(FileFormat, u64)> = FileFormat::ALL
        .iter()
        .filter_map(|format| {
            explicit
                .iter()
                .find(|(f, _)| f == format)
                .map(|(_, pct)| (*format, (total as f64 * pct / 100.0).floor() as u64))
        })
        .collect();

    // Reconcile rounding drift: the remainder (positive or negative) goes
    // to the format currently holding the largest count, first such format
    // in canonical order on ties. A map summing well over 100 can leave a
    // deficit bigger than any single count, so a count clamped to zero
    // passes the residual on to the next-largest until it is absorbed and
    // the counts sum exactly to `total` again.
    let assigned: u64 = counts.iter().map(|(_, c)| c).sum();
    let mut remainder = total as i64 - assigned as i64;
    while remainder != 0 && !counts.is_empty() {
        let mut largest = 0;
        for (i, (_, count)) in counts.iter().enumerate() {
            if *count > counts[largest].1 {
                largest = i;
            }
        }
        let current = counts[largest].1 as i64;
        if current == 0 && remainder < 0 {
            break;
        }
        let adjusted = (current + remainder).max(0);
        remainder -= adjusted - current;
        counts[largest].1 = adjusted as u64;
    }

    PlanOutcome {
        plan: DistributionPlan::from_counts(counts),
        warnings,
    }
}

/// Plan `total` files by drawing each file's format uniformly at random
/// from the active set. Deterministic for a fixed RNG seed.
pub fn plan_random<R: Rng>(total: u64, active: &[FileFormat], rng: &mut R) -> DistributionPlan {
    if active.is_empty() || total == 0 {
        return DistributionPlan::default();
    }
    let mut counts = vec![0u64; active.len()];
    for _ in 0..total {
        counts[rng.random_range(0..active.len())] += 1;
    }
    DistributionPlan::from_counts(active.iter().copied().zip(counts))
}
