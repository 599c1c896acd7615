//! Packaging: bundle a directory of generated fixtures into a tar
//! archive, optionally compressed. Archives are named with the same
//! 160-bit hex identifier scheme as individual fixtures.
//!
//! Packaging failure never un-reports generated files; the caller treats
//! it as fatal only to this step.

use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Compression applied to the tar stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    None,
    Gzip,
    Bzip2,
    Xz,
    Zstd,
}

impl Compression {
    /// Archive filename suffix including the `.tar` part.
    pub fn archive_suffix(&self) -> &'static str {
        match self {
            Compression::None => ".tar",
            Compression::Gzip => ".tar.gz",
            Compression::Bzip2 => ".tar.bz2",
            Compression::Xz => ".tar.xz",
            Compression::Zstd => ".tar.zst",
        }
    }
}

impl std::str::FromStr for Compression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Compression::None),
            "gz" | "gzip" => Ok(Compression::Gzip),
            "bz2" | "bzip2" => Ok(Compression::Bzip2),
            "xz" | "lzma" => Ok(Compression::Xz),
            "zst" | "zstd" => Ok(Compression::Zstd),
            _ => Err(format!(
                "Unknown compression: {}. Valid options: none, gz, bz2, xz, zst",
                s
            )),
        }
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compression::None => write!(f, "none"),
            Compression::Gzip => write!(f, "gzip"),
            Compression::Bzip2 => write!(f, "bzip2"),
            Compression::Xz => write!(f, "xz"),
            Compression::Zstd => write!(f, "zstd"),
        }
    }
}

/// Package `source_dir` into a tar archive next to it.
///
/// The archive lands in `source_dir`'s parent (current directory when the
/// source has no parent), named `<40-hex>.tar[.gz|.bz2|.xz|.zst]`. With
/// `clean` the source directory is removed after the archive is written.
/// Returns the archive path.
pub fn pack_directory(
    source_dir: &Path,
    compression: Compression,
    clean: bool,
) -> anyhow::Result<PathBuf> {
    if !source_dir.is_dir() {
        anyhow::bail!("Not a directory: {}", source_dir.display());
    }

    let parent = source_dir.parent().filter(|p| !p.as_os_str().is_empty());
    let archive_name = format!("{}{}", archive_stem(source_dir), compression.archive_suffix());
    let archive_path = match parent {
        Some(parent) => parent.join(archive_name),
        None => PathBuf::from(archive_name),
    };

    let file = File::create(&archive_path)?;
    let writer = BufWriter::new(file);

    // Entries are stored under the directory's own name so extraction
    // reproduces the original layout.
    let root = source_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "fixtures".to_string());

    match compression {
        Compression::None => {
            let mut writer = append_dir(writer, &root, source_dir)?;
            writer.flush()?;
        }
        Compression::Gzip => {
            let encoder = flate2::write::GzEncoder::new(writer, flate2::Compression::default());
            let encoder = append_dir(encoder, &root, source_dir)?;
            encoder.finish()?.flush()?;
        }
        Compression::Bzip2 => {
            let encoder = bzip2::write::BzEncoder::new(writer, bzip2::Compression::default());
            let encoder = append_dir(encoder, &root, source_dir)?;
            encoder.finish()?.flush()?;
        }
        Compression::Xz => {
            let encoder = xz2::write::XzEncoder::new(writer, 6);
            let encoder = append_dir(encoder, &root, source_dir)?;
            encoder.finish()?.flush()?;
        }
        Compression::Zstd => {
            let encoder = zstd::stream::write::Encoder::new(writer, 0)?;
            let encoder = append_dir(encoder, &root, source_dir)?;
            encoder.finish()?.flush()?;
        }
    }

    if clean {
        fs::remove_dir_all(source_dir)?;
    }

    Ok(archive_path)
}

/// Write the tar stream for `source_dir` into `writer` and hand the
/// writer back for the compressor-specific finish call.
fn append_dir<W: Write>(writer: W, root: &str, source_dir: &Path) -> io::Result<W> {
    let mut builder = tar::Builder::new(writer);
    builder.append_dir_all(root, source_dir)?;
    builder.into_inner()
}

/// 160-bit hex identifier for the archive, derived from the source path,
/// wall clock and a random nonce.
fn archive_stem(source_dir: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source_dir.to_string_lossy().as_bytes());
    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default();
    hasher.update(nanos.to_le_bytes());
    hasher.update(rand::random::<u64>().to_le_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..20])
}
