//! Generate command CLI handler.

use crate::archive::{pack_directory, Compression};
use crate::config::{parse_percentage_map, AppConfig, REMAINING_KEY};
use crate::format::{parse_format_list, FileFormat};
use crate::generate::{self, GenerateConfig, GenerateMode};
use crate::plan::PercentageSpec;
use crate::render::RendererRegistry;
use std::collections::HashMap;
use std::path::PathBuf;

#[allow(clippy::too_many_arguments)]
pub fn run(
    output: Option<PathBuf>,
    types: Option<String>,
    count: Option<String>,
    total: Option<u64>,
    percent: Option<String>,
    template: Option<String>,
    sizes: Option<String>,
    seed: Option<u64>,
    locale: Option<String>,
    config: Option<PathBuf>,
    tar: bool,
    compression: String,
    clean: bool,
    progress: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let app = AppConfig::load_or_default(config.as_deref());

    // A named template supplies the baseline; explicit flags override it.
    let template_name = template;
    let template = match &template_name {
        Some(name) => Some(
            app.template(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown template: {name}"))?,
        ),
        None => None,
    };

    let cli_counts = count
        .as_deref()
        .map(parse_count_map)
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    // Active formats: explicit list, then template, then the counts map's
    // keys, then every format.
    let active: Vec<FileFormat> = if let Some(list) = types.as_deref() {
        parse_format_list(list).map_err(|e| anyhow::anyhow!(e))?
    } else if let Some(t) = template.as_ref().filter(|t| !t.types.is_empty()) {
        t.types.clone()
    } else if let Some(counts) = cli_counts.as_ref().filter(|c| !c.is_empty()) {
        FileFormat::ALL
            .iter()
            .copied()
            .filter(|f| counts.contains_key(f))
            .collect()
    } else {
        FileFormat::ALL.to_vec()
    };

    // Size targets: per-format defaults, template overrides, CLI overrides.
    let mut sizes_mb: HashMap<FileFormat, f64> =
        active.iter().map(|f| (*f, app.size_mb(*f))).collect();
    if let Some(t) = template.as_ref() {
        for (format, mb) in &t.sizes_mb {
            sizes_mb.insert(*format, *mb);
        }
    }
    if let Some(list) = sizes.as_deref() {
        for (format, mb) in parse_size_map(list).map_err(|e| anyhow::anyhow!(e))? {
            sizes_mb.insert(format, mb);
        }
    }

    let percentages: Vec<(PercentageSpec, f64)> = if let Some(list) = percent.as_deref() {
        parse_percent_list(list).map_err(|e| anyhow::anyhow!(e))?
    } else if let Some(t) = template.as_ref() {
        parse_percentage_map(&t.percentages).map_err(|e| anyhow::anyhow!(e))?
    } else {
        Vec::new()
    };

    let effective_total = total.or_else(|| template.as_ref().and_then(|t| t.total));
    let mode = if let Some(total) = effective_total {
        if percentages.is_empty() {
            GenerateMode::TotalRandom(total)
        } else {
            GenerateMode::TotalPercent { total, percentages }
        }
    } else if !percentages.is_empty() {
        // Only reachable through a template: clap makes --percent require
        // --total on the command line.
        anyhow::bail!(
            "Percentages require a total file count; template \"{}\" sets percentages but no total",
            template_name.as_deref().unwrap_or_default()
        );
    } else if let Some(counts) = cli_counts {
        GenerateMode::Fixed(counts)
    } else if let Some(t) = template.as_ref().filter(|t| !t.counts.is_empty()) {
        GenerateMode::Fixed(t.counts.clone())
    } else {
        GenerateMode::Fixed(HashMap::new())
    };

    let compression: Compression = compression
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    // Generate random seed if not provided
    let seed = seed.unwrap_or_else(rand::random);

    let generate_config = GenerateConfig {
        output_dir: output.unwrap_or_else(|| app.global.output_dir.clone()),
        mode,
        active: active.clone(),
        sizes_mb,
        params: active.iter().map(|f| (*f, app.estimate_params(*f))).collect(),
        seed,
        locale: locale.unwrap_or_else(|| app.global.locale.clone()),
        progress,
        dry_run,
    };

    let report = generate::run(&generate_config, &RendererRegistry::standard())?;

    for warning in &report.warnings {
        eprintln!("Warning: {warning}");
    }

    if dry_run {
        eprintln!("Plan ({} files):", report.planned());
        for (format, count) in report.plan.entries() {
            eprintln!("  {format}: {count}");
        }
        return Ok(());
    }

    eprintln!(
        "Generated {} succeeded / {} failed out of {} planned ({:.2} MB) in {}",
        report.succeeded,
        report.failed,
        report.planned(),
        report.total_bytes as f64 / crate::estimate::MIB,
        generate_config.output_dir.display()
    );
    for outcome in &report.outcomes {
        if let Err(e) = &outcome.result {
            eprintln!("  Failed: {} ({})", outcome.path.display(), e);
        }
    }

    if tar {
        let archive = pack_directory(&generate_config.output_dir, compression, clean)?;
        eprintln!("Packaged into {}", archive.display());
    }

    Ok(())
}

/// Parse `txt=2,pdf=1` into a count map.
fn parse_count_map(s: &str) -> Result<HashMap<FileFormat, u64>, String> {
    let mut counts = HashMap::new();
    for (key, value) in split_pairs(s)? {
        let format: FileFormat = key.parse()?;
        let count: u64 = value
            .parse()
            .map_err(|_| format!("Invalid count for {}: {}", key, value))?;
        counts.insert(format, count);
    }
    Ok(counts)
}

/// Parse `txt=0.1,pdf=0.3` into a size map.
fn parse_size_map(s: &str) -> Result<Vec<(FileFormat, f64)>, String> {
    let mut sizes = Vec::new();
    for (key, value) in split_pairs(s)? {
        let format: FileFormat = key.parse()?;
        let mb: f64 = value
            .parse()
            .map_err(|_| format!("Invalid size for {}: {}", key, value))?;
        if mb <= 0.0 {
            return Err(format!("Size for {} must be positive, got {}", key, value));
        }
        sizes.push((format, mb));
    }
    Ok(sizes)
}

/// Parse `pdf=70,remaining=30` into typed percentage specs, preserving
/// the order given on the command line.
fn parse_percent_list(s: &str) -> Result<Vec<(PercentageSpec, f64)>, String> {
    let mut specs = Vec::new();
    for (key, value) in split_pairs(s)? {
        let pct: f64 = value
            .parse()
            .map_err(|_| format!("Invalid percentage for {}: {}", key, value))?;
        if !(0.0..=100.0).contains(&pct) {
            return Err(format!("Percentage for {} out of range: {}", key, value));
        }
        let spec = if key.eq_ignore_ascii_case(REMAINING_KEY) {
            PercentageSpec::Remaining
        } else {
            PercentageSpec::Format(key.parse()?)
        };
        specs.push((spec, pct));
    }
    Ok(specs)
}

fn split_pairs(s: &str) -> Result<Vec<(String, String)>, String> {
    let mut pairs = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| format!("Expected key=value, got: {}", part))?;
        pairs.push((key.trim().to_string(), value.trim().to_string()));
    }
    if pairs.is_empty() {
        return Err("Empty key=value list".to_string());
    }
    Ok(pairs)
}
