//! Generation orchestrator: resolve a distribution plan, then drive the
//! per-format renderers file by file.
//!
//! Each render call is isolated — a failing file is recorded in the
//! report and the loop moves on. Only structural problems (no active
//! types, a format with no registered renderer) abort before any file is
//! attempted. The loop is synchronous and single-threaded; the gap
//! between files is the only cancellation point.

use crate::content::RowGenerator;
use crate::estimate::{estimate, EstimateParams};
use crate::format::FileFormat;
use crate::plan::{plan_percentages, plan_random, DistributionPlan, PercentageSpec, PlanOutcome};
use crate::render::{RenderContext, RendererRegistry};
use indicatif::{ProgressBar, ProgressStyle};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// How the per-format counts are determined.
#[derive(Debug, Clone)]
pub enum GenerateMode {
    /// Explicit count per format; active formats without an entry get 1.
    Fixed(HashMap<FileFormat, u64>),
    /// Total count, each file's format drawn uniformly from the active set.
    TotalRandom(u64),
    /// Total count distributed by percentages.
    TotalPercent {
        total: u64,
        percentages: Vec<(PercentageSpec, f64)>,
    },
}

/// Everything one generation run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub output_dir: PathBuf,
    pub mode: GenerateMode,
    pub active: Vec<FileFormat>,
    /// Target size in MB per format (format default when absent)
    pub sizes_mb: HashMap<FileFormat, f64>,
    /// Text shaping parameters per format
    pub params: HashMap<FileFormat, EstimateParams>,
    pub seed: u64,
    pub locale: String,
    pub progress: bool,
    pub dry_run: bool,
}

impl GenerateConfig {
    fn size_for(&self, format: FileFormat) -> f64 {
        self.sizes_mb
            .get(&format)
            .copied()
            .unwrap_or_else(|| format.default_size_mb())
    }

    fn params_for(&self, format: FileFormat) -> EstimateParams {
        self.params.get(&format).copied().unwrap_or_default()
    }
}

/// Outcome of one file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub format: FileFormat,
    pub path: PathBuf,
    pub target_mb: f64,
    /// Measured on-disk size on success, error description on failure
    pub result: Result<u64, String>,
}

/// Result of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub plan: DistributionPlan,
    pub outcomes: Vec<FileOutcome>,
    pub succeeded: usize,
    pub failed: usize,
    pub total_bytes: u64,
    pub warnings: Vec<String>,
}

impl GenerationReport {
    pub fn planned(&self) -> u64 {
        self.plan.total()
    }
}

/// Resolve the distribution plan for a config.
///
/// An empty percentage map in `TotalPercent` mode falls back to random
/// assignment — it is a mode-selection signal, not an error.
pub fn resolve_plan(config: &GenerateConfig, rng: &mut rand_chacha::ChaCha8Rng) -> PlanOutcome {
    match &config.mode {
        GenerateMode::Fixed(counts) => {
            let plan = DistributionPlan::from_counts(
                config
                    .active
                    .iter()
                    .map(|f| (*f, counts.get(f).copied().unwrap_or(1))),
            );
            PlanOutcome {
                plan,
                warnings: Vec::new(),
            }
        }
        GenerateMode::TotalRandom(total) => PlanOutcome {
            plan: plan_random(*total, &config.active, rng),
            warnings: Vec::new(),
        },
        GenerateMode::TotalPercent { total, percentages } => {
            if percentages.is_empty() {
                return PlanOutcome {
                    plan: plan_random(*total, &config.active, rng),
                    warnings: Vec::new(),
                };
            }
            plan_percentages(*total, percentages, &config.active)
        }
    }
}

/// Execute one generation run.
pub fn run(config: &GenerateConfig, registry: &RendererRegistry) -> anyhow::Result<GenerationReport> {
    use rand::SeedableRng;

    if config.active.is_empty() {
        anyhow::bail!("No active formats; nothing to generate");
    }

    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(config.seed);
    let PlanOutcome { plan, warnings } = resolve_plan(config, &mut rng);

    // Structural check up front: every planned format must have a
    // renderer before any file is attempted.
    for (format, _) in plan.entries() {
        if registry.get(*format).is_none() {
            anyhow::bail!("No renderer registered for format: {format}");
        }
    }

    let mut report = GenerationReport {
        plan: plan.clone(),
        warnings,
        ..Default::default()
    };

    if config.dry_run {
        return Ok(report);
    }

    fs::create_dir_all(&config.output_dir)?;

    let progress_bar = if config.progress {
        let pb = ProgressBar::new(plan.total());
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap()
            .progress_chars("█▓▒░  "),
        );
        pb.set_message("Generating fixtures...");
        Some(pb)
    } else {
        None
    };

    let mut ctx = RenderContext {
        rng,
        rows: RowGenerator::new(config.locale.clone()),
    };

    let mut counter: u64 = 0;
    for (format, count) in plan.entries() {
        let renderer = registry.get(*format).unwrap();
        let target_mb = config.size_for(*format);
        let param = estimate(*format, target_mb, &config.params_for(*format));

        for _ in 0..*count {
            counter += 1;
            let name = format!("{}.{}", unique_stem(counter), format.extension());
            let dest = config.output_dir.join(name);

            let result = renderer
                .render(&dest, &param, &mut ctx)
                .and_then(|_| Ok(fs::metadata(&dest)?.len()));

            match result {
                Ok(bytes) => {
                    report.succeeded += 1;
                    report.total_bytes += bytes;
                    report.outcomes.push(FileOutcome {
                        format: *format,
                        path: dest,
                        target_mb,
                        result: Ok(bytes),
                    });
                }
                Err(e) => {
                    report.failed += 1;
                    report.outcomes.push(FileOutcome {
                        format: *format,
                        path: dest,
                        target_mb,
                        result: Err(e.to_string()),
                    });
                }
            }

            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message("done");
    }

    Ok(report)
}

/// 160-bit hex stem derived from wall clock, per-run counter and a random
/// nonce. Collision probability is negligible even across concurrent runs.
fn unique_stem(counter: u64) -> String {
    let mut hasher = Sha256::new();
    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default();
    hasher.update(nanos.to_le_bytes());
    hasher.update(counter.to_le_bytes());
    hasher.update(rand::random::<u64>().to_le_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..20])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_stems_are_40_hex_chars() {
        let a = unique_stem(1);
        let b = unique_stem(2);
        assert_eq!(a.len(), 40);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
