//! Supported fixture file formats.

use serde::{Deserialize, Serialize};

/// One of the supported output formats.
///
/// Declaration order is the canonical iteration order used everywhere a
/// deterministic ordering matters (plan output, remainder tie-breaks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Plain text, lorem ipsum lines
    Txt,
    /// PDF with lorem ipsum text lines
    Pdf,
    /// Word document (OOXML) with lorem ipsum paragraphs
    Docx,
    /// Spreadsheet (OOXML) with realistic fake rows
    Xlsx,
    /// JPEG raster image
    Jpeg,
}

impl FileFormat {
    /// All formats in canonical order.
    pub const ALL: &'static [FileFormat] = &[
        FileFormat::Txt,
        FileFormat::Pdf,
        FileFormat::Docx,
        FileFormat::Xlsx,
        FileFormat::Jpeg,
    ];

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Txt => "txt",
            FileFormat::Pdf => "pdf",
            FileFormat::Docx => "docx",
            FileFormat::Xlsx => "xlsx",
            FileFormat::Jpeg => "jpeg",
        }
    }

    /// Default target size in MB when neither CLI nor config provides one.
    pub fn default_size_mb(&self) -> f64 {
        match self {
            FileFormat::Txt => 0.1,
            FileFormat::Pdf => 0.3,
            FileFormat::Docx => 0.2,
            FileFormat::Xlsx => 0.1,
            FileFormat::Jpeg => 0.5,
        }
    }
}

impl std::str::FromStr for FileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(FileFormat::Txt),
            "pdf" => Ok(FileFormat::Pdf),
            "docx" | "doc" => Ok(FileFormat::Docx),
            "xlsx" | "xls" => Ok(FileFormat::Xlsx),
            "jpeg" | "jpg" => Ok(FileFormat::Jpeg),
            _ => Err(format!(
                "Unsupported format: {}. Valid options: txt, pdf, docx, xlsx, jpeg",
                s
            )),
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Parse a comma-separated list of format names, e.g. `txt,pdf,xlsx`.
pub fn parse_format_list(s: &str) -> Result<Vec<FileFormat>, String> {
    let mut formats = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let format: FileFormat = part.parse()?;
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    if formats.is_empty() {
        return Err("No formats given".to_string());
    }
    Ok(formats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_formats() {
        assert_eq!("txt".parse::<FileFormat>().unwrap(), FileFormat::Txt);
        assert_eq!("PDF".parse::<FileFormat>().unwrap(), FileFormat::Pdf);
        assert_eq!("jpg".parse::<FileFormat>().unwrap(), FileFormat::Jpeg);
        assert!("exe".parse::<FileFormat>().is_err());
    }

    #[test]
    fn parse_list_dedupes_and_trims() {
        let formats = parse_format_list("txt, pdf,txt").unwrap();
        assert_eq!(formats, vec![FileFormat::Txt, FileFormat::Pdf]);
        assert!(parse_format_list(" , ").is_err());
    }
}
