//! Configuration file support.
//!
//! An optional `config.json` supplies defaults (output directory, fake
//! data locale, per-format size targets and text-shaping parameters) and
//! named generation templates. A missing file means built-in defaults; a
//! malformed file warns on stderr and falls back to the same defaults —
//! configuration problems are never fatal at startup.

use crate::estimate::EstimateParams;
use crate::format::FileFormat;
use crate::plan::PercentageSpec;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Reserved percentage-map key whose share spreads over unassigned types.
pub const REMAINING_KEY: &str = "remaining";

/// Per-format content shaping overrides.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeParams {
    pub chars_per_line: Option<u32>,
    pub chars_per_paragraph: Option<u32>,
    /// Fixed jpeg resolution, e.g. `[1920, 1080]`; bypasses the tier table
    pub resolution: Option<(u32, u32)>,
    /// Spreadsheet column count, clamped to the realistic schema width
    pub columns: Option<u32>,
}

/// Global defaults section of `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output directory
    pub output_dir: PathBuf,
    /// Locale hint for realistic fake data
    pub locale: String,
    /// Default target size in MB per format
    pub sizes_mb: HashMap<FileFormat, f64>,
    /// Text shaping parameters per format
    pub type_params: HashMap<FileFormat, TypeParams>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("fixtures"),
            locale: "en".to_string(),
            sizes_mb: HashMap::new(),
            type_params: HashMap::new(),
        }
    }
}

/// A named generation preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    /// Active formats, canonical order preserved from the list
    pub types: Vec<FileFormat>,
    /// Fixed count per format (ignored when `total` is set)
    pub counts: HashMap<FileFormat, u64>,
    /// Total file count; overrides `counts` when present
    pub total: Option<u64>,
    /// Percentage per format name, may include the `remaining` key;
    /// only meaningful together with `total`
    pub percentages: HashMap<String, f64>,
    /// Target size in MB per format
    pub sizes_mb: HashMap<FileFormat, f64>,
}

/// Complete configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub global: GlobalConfig,
    pub templates: HashMap<String, Template>,
}

impl AppConfig {
    /// Load from an explicit path, or from `config.json` in the working
    /// directory when none is given. Missing file → defaults; malformed
    /// file → stderr warning + defaults.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("config.json"));
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(&path).map_err(anyhow::Error::from).and_then(|content| {
            serde_json::from_str::<AppConfig>(&content).map_err(anyhow::Error::from)
        }) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: could not read {}: {}; using built-in defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Parse a configuration document from a JSON string.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Target size in MB for one format: config value or format default.
    pub fn size_mb(&self, format: FileFormat) -> f64 {
        self.global
            .sizes_mb
            .get(&format)
            .copied()
            .unwrap_or_else(|| format.default_size_mb())
    }

    /// Estimator parameters for one format, with config overrides applied.
    pub fn estimate_params(&self, format: FileFormat) -> EstimateParams {
        let mut params = EstimateParams::default();
        if let Some(overrides) = self.global.type_params.get(&format) {
            if let Some(chars) = overrides.chars_per_line {
                params.chars_per_line = chars;
            }
            if let Some(chars) = overrides.chars_per_paragraph {
                params.chars_per_paragraph = chars;
            }
            if overrides.resolution.is_some() {
                params.resolution = overrides.resolution;
            }
            if let Some(columns) = overrides.columns {
                params.columns = columns;
            }
        }
        params
    }

    /// Resolve a template by name: config file first, then built-ins.
    pub fn template(&self, name: &str) -> Option<Template> {
        self.templates
            .get(name)
            .or_else(|| BUILTIN_TEMPLATES.get(name))
            .cloned()
    }

    /// Template names available, built-ins plus config file, sorted.
    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = BUILTIN_TEMPLATES
            .keys()
            .chain(self.templates.keys())
            .cloned()
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

/// Parse a `format -> percentage` map with the reserved `remaining` key
/// into typed percentage specs.
pub fn parse_percentage_map(map: &HashMap<String, f64>) -> Result<Vec<(PercentageSpec, f64)>, String> {
    let mut specs = Vec::with_capacity(map.len());
    // Sort keys so downstream warnings and plans are order-independent.
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    for key in keys {
        let pct = map[key];
        if !(0.0..=100.0).contains(&pct) {
            return Err(format!("Percentage for {} out of range: {}", key, pct));
        }
        if key.eq_ignore_ascii_case(REMAINING_KEY) {
            specs.push((PercentageSpec::Remaining, pct));
        } else {
            let format: FileFormat = key.parse()?;
            specs.push((PercentageSpec::Format(format), pct));
        }
    }
    Ok(specs)
}

fn template(
    entries: &[(FileFormat, u64, f64)],
) -> Template {
    Template {
        types: entries.iter().map(|(f, _, _)| *f).collect(),
        counts: entries.iter().map(|(f, c, _)| (*f, *c)).collect(),
        total: None,
        percentages: HashMap::new(),
        sizes_mb: entries.iter().map(|(f, _, mb)| (*f, *mb)).collect(),
    }
}

/// Built-in presets, mirroring the historically useful combinations.
static BUILTIN_TEMPLATES: Lazy<HashMap<String, Template>> = Lazy::new(|| {
    use FileFormat::*;
    let mut templates = HashMap::new();
    templates.insert(
        "default".to_string(),
        template(&[
            (Txt, 1, 0.1),
            (Pdf, 1, 0.3),
            (Docx, 1, 0.2),
            (Xlsx, 1, 0.1),
            (Jpeg, 1, 0.5),
        ]),
    );
    templates.insert(
        "minimal".to_string(),
        template(&[(Txt, 1, 0.05)]),
    );
    templates.insert(
        "small".to_string(),
        template(&[(Txt, 2, 0.05), (Pdf, 1, 0.1)]),
    );
    templates.insert(
        "medium".to_string(),
        template(&[(Txt, 3, 0.2), (Pdf, 2, 0.4), (Docx, 2, 0.3), (Xlsx, 2, 0.2)]),
    );
    templates.insert(
        "large".to_string(),
        template(&[(Txt, 2, 1.0), (Pdf, 1, 2.0), (Docx, 1, 1.5), (Xlsx, 1, 0.5)]),
    );
    templates.insert(
        "realistic".to_string(),
        template(&[(Xlsx, 5, 0.3)]),
    );
    templates.insert(
        "lorem".to_string(),
        template(&[(Txt, 2, 0.5), (Pdf, 1, 0.8), (Docx, 1, 0.6)]),
    );
    templates
});
