//! Size estimation: translate a target size in MB into the content
//! parameter each renderer understands.
//!
//! The ratios here are empirical and deliberately open-loop: compression,
//! per-cell formatting and font metrics make exact prediction impossible,
//! so the estimator trades precision for determinism. It never re-measures
//! and re-adjusts after rendering.

use crate::content::RowRecord;
use crate::format::FileFormat;

/// 1 MiB in bytes.
pub const MIB: f64 = 1_048_576.0;

/// Discount applied to the raw byte target for PDF (page/stream overhead).
const PDF_OVERHEAD_FACTOR: f64 = 0.7;

/// Discount applied to the raw byte target for DOCX (XML container overhead).
const DOCX_OVERHEAD_FACTOR: f64 = 0.5;

/// Rows per MB for the realistic xlsx schema (7 columns, ~200 raw bytes/row).
const XLSX_ROWS_PER_MB: f64 = 5200.0;

/// Smallest target the estimator will work with; requests at or below zero
/// clamp to this so a positive target never yields empty content.
const MIN_TARGET_MB: f64 = 0.01;

/// Resolution tiers for jpeg output, ascending by size threshold (MB).
/// The first tier whose threshold is >= the target wins; targets above the
/// last threshold use the last tier.
const JPEG_TIERS: &[(f64, u32, u32)] = &[
    (0.1, 640, 480),
    (0.5, 1024, 768),
    (1.0, 1600, 1200),
    (2.0, 2560, 1920),
    (5.0, 3840, 2880),
];

/// Format-specific quantity that drives how much content a renderer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentParameter {
    /// Fixed-width text lines (txt, pdf)
    Lines { count: u64, chars_per_line: u32 },
    /// Paragraphs of roughly fixed length (docx)
    Paragraphs { count: u64, chars_per_paragraph: u32 },
    /// Data rows over the leading `columns` of the realistic schema (xlsx)
    Rows { count: u64, columns: u32 },
    /// Image resolution (jpeg)
    Resolution { width: u32, height: u32 },
}

/// Tunable content-shaping knobs, overridable per format from the config
/// file.
#[derive(Debug, Clone, Copy)]
pub struct EstimateParams {
    pub chars_per_line: u32,
    pub chars_per_paragraph: u32,
    /// Fixed image resolution; bypasses the tier table when set
    pub resolution: Option<(u32, u32)>,
    /// Spreadsheet columns, clamped to the realistic schema width
    pub columns: u32,
}

impl Default for EstimateParams {
    fn default() -> Self {
        Self {
            chars_per_line: 80,
            chars_per_paragraph: 150,
            resolution: None,
            columns: RowRecord::HEADERS.len() as u32,
        }
    }
}

/// Map a target size in MB onto the content parameter for `format`.
///
/// Pure function; monotonically non-decreasing in `target_mb` and never
/// returns an empty parameter (min 1 line/paragraph, min 10 rows, smallest
/// resolution tier).
pub fn estimate(format: FileFormat, target_mb: f64, params: &EstimateParams) -> ContentParameter {
    let target_mb = if target_mb <= 0.0 {
        MIN_TARGET_MB
    } else {
        target_mb
    };
    let target_bytes = target_mb * MIB;

    match format {
        FileFormat::Txt => {
            let count = (target_bytes / params.chars_per_line as f64).floor() as u64;
            ContentParameter::Lines {
                count: count.max(1),
                chars_per_line: params.chars_per_line,
            }
        }
        FileFormat::Pdf => {
            let effective = target_bytes * PDF_OVERHEAD_FACTOR;
            let count = (effective / params.chars_per_line as f64).floor() as u64;
            ContentParameter::Lines {
                count: count.max(1),
                chars_per_line: params.chars_per_line,
            }
        }
        FileFormat::Docx => {
            let effective = target_bytes * DOCX_OVERHEAD_FACTOR;
            let count = (effective / params.chars_per_paragraph as f64).floor() as u64;
            ContentParameter::Paragraphs {
                count: count.max(1),
                chars_per_paragraph: params.chars_per_paragraph,
            }
        }
        FileFormat::Xlsx => {
            let rows = (target_mb * XLSX_ROWS_PER_MB).floor() as u64;
            ContentParameter::Rows {
                count: rows.max(10),
                columns: params.columns.clamp(1, RowRecord::HEADERS.len() as u32),
            }
        }
        FileFormat::Jpeg => {
            if let Some((width, height)) = params.resolution {
                return ContentParameter::Resolution {
                    width: width.max(1),
                    height: height.max(1),
                };
            }
            let (_, width, height) = JPEG_TIERS
                .iter()
                .find(|(threshold, _, _)| target_mb <= *threshold)
                .unwrap_or(JPEG_TIERS.last().unwrap());
            ContentParameter::Resolution {
                width: *width,
                height: *height,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn magnitude(p: ContentParameter) -> u64 {
        match p {
            ContentParameter::Lines { count, .. } => count,
            ContentParameter::Paragraphs { count, .. } => count,
            ContentParameter::Rows { count, .. } => count,
            ContentParameter::Resolution { width, height } => width as u64 * height as u64,
        }
    }

    #[test]
    fn txt_line_count_from_target() {
        let params = EstimateParams::default();
        // 0.1 MB at 80 chars/line -> floor(104857.6 / 80) = 1310
        let p = estimate(FileFormat::Txt, 0.1, &params);
        assert_eq!(
            p,
            ContentParameter::Lines {
                count: 1310,
                chars_per_line: 80
            }
        );
    }

    #[test]
    fn pdf_applies_overhead_discount() {
        let params = EstimateParams::default();
        let txt = magnitude(estimate(FileFormat::Txt, 1.0, &params));
        let pdf = magnitude(estimate(FileFormat::Pdf, 1.0, &params));
        assert!(pdf < txt);
        assert_eq!(pdf, (MIB * 0.7 / 80.0).floor() as u64);
    }

    #[test]
    fn docx_applies_container_discount() {
        let params = EstimateParams::default();
        let p = estimate(FileFormat::Docx, 1.0, &params);
        assert_eq!(
            p,
            ContentParameter::Paragraphs {
                count: (MIB * 0.5 / 150.0).floor() as u64,
                chars_per_paragraph: 150
            }
        );
    }

    #[test]
    fn xlsx_row_floor_is_ten() {
        let params = EstimateParams::default();
        assert_eq!(
            estimate(FileFormat::Xlsx, 0.0001, &params),
            ContentParameter::Rows {
                count: 10,
                columns: 7
            }
        );
        assert_eq!(
            estimate(FileFormat::Xlsx, 1.0, &params),
            ContentParameter::Rows {
                count: 5200,
                columns: 7
            }
        );
    }

    #[test]
    fn xlsx_columns_clamp_to_schema_width() {
        let mut params = EstimateParams::default();
        params.columns = 3;
        assert_eq!(
            estimate(FileFormat::Xlsx, 0.0001, &params),
            ContentParameter::Rows {
                count: 10,
                columns: 3
            }
        );
        params.columns = 50;
        let ContentParameter::Rows { columns, .. } = estimate(FileFormat::Xlsx, 1.0, &params)
        else {
            panic!("xlsx estimates rows");
        };
        assert_eq!(columns, 7);
    }

    #[test]
    fn jpeg_resolution_override_bypasses_tiers() {
        let mut params = EstimateParams::default();
        params.resolution = Some((1920, 1080));
        for mb in [0.05, 5.0, 50.0] {
            assert_eq!(
                estimate(FileFormat::Jpeg, mb, &params),
                ContentParameter::Resolution {
                    width: 1920,
                    height: 1080
                }
            );
        }
    }

    #[test]
    fn jpeg_tier_endpoints() {
        let params = EstimateParams::default();
        assert_eq!(
            estimate(FileFormat::Jpeg, 0.05, &params),
            ContentParameter::Resolution {
                width: 640,
                height: 480
            }
        );
        assert_eq!(
            estimate(FileFormat::Jpeg, 5.0, &params),
            ContentParameter::Resolution {
                width: 3840,
                height: 2880
            }
        );
        // Above the largest threshold the largest tier still wins
        assert_eq!(
            estimate(FileFormat::Jpeg, 50.0, &params),
            ContentParameter::Resolution {
                width: 3840,
                height: 2880
            }
        );
    }

    #[test]
    fn never_empty_for_tiny_targets() {
        let params = EstimateParams::default();
        for &format in FileFormat::ALL {
            assert!(magnitude(estimate(format, 0.000001, &params)) >= 1);
            assert!(magnitude(estimate(format, -1.0, &params)) >= 1);
        }
    }

    #[test]
    fn monotone_in_target_size() {
        let params = EstimateParams::default();
        let sizes = [0.01, 0.05, 0.1, 0.3, 0.5, 1.0, 2.0, 5.0, 10.0];
        for &format in FileFormat::ALL {
            let mut last = 0u64;
            for &mb in &sizes {
                let m = magnitude(estimate(format, mb, &params));
                assert!(
                    m >= last,
                    "{format} shrank from {last} to {m} at {mb} MB"
                );
                last = m;
            }
        }
    }
}
