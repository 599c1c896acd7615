//! PDF renderer.
//!
//! Emits a minimal but well-formed PDF directly: catalog, page tree, one
//! Helvetica font object, and one content stream per page of lorem text.
//! No PDF library is involved; the files only need to be valid instances
//! of the format, not optimized ones.

use super::{RenderContext, Renderer};
use crate::content::lorem_line;
use crate::estimate::ContentParameter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A4 in points
const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;

/// Text block layout: 10pt Helvetica, 12pt leading, ~60 lines per page.
const FONT_SIZE: u32 = 10;
const LEADING: u32 = 12;
const MARGIN: u32 = 50;
const LINES_PER_PAGE: u64 = 60;

pub struct PdfRenderer;

impl Renderer for PdfRenderer {
    fn render(
        &self,
        dest: &Path,
        param: &ContentParameter,
        ctx: &mut RenderContext,
    ) -> anyhow::Result<()> {
        let ContentParameter::Lines {
            count,
            chars_per_line,
        } = param
        else {
            anyhow::bail!("pdf renderer expects a line-count parameter, got {param:?}");
        };

        let pages = count.div_ceil(LINES_PER_PAGE).max(1);
        let mut remaining = *count;

        // Fixed object numbering: 1 catalog, 2 page tree, 3 font, then
        // alternating page / content-stream objects.
        let page_object_ids: Vec<u64> = (0..pages).map(|i| 4 + i * 2).collect();

        let mut objects: Vec<Vec<u8>> = Vec::new();
        objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());

        let kids = page_object_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");
        objects.push(
            format!(
                "<< /Type /Pages /Kids [{kids}] /Count {pages} /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] >>"
            )
            .into_bytes(),
        );
        objects.push(b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_vec());

        for page_id in &page_object_ids {
            let lines_here = remaining.min(LINES_PER_PAGE);
            remaining -= lines_here;

            let mut stream = String::new();
            stream.push_str("BT\n");
            stream.push_str(&format!("/F1 {FONT_SIZE} Tf\n"));
            stream.push_str(&format!("{LEADING} TL\n"));
            stream.push_str(&format!("{MARGIN} {} Td\n", PAGE_HEIGHT as u32 - MARGIN));
            for _ in 0..lines_here {
                let line = lorem_line(&mut ctx.rng, *chars_per_line);
                stream.push_str(&format!("({}) Tj\nT*\n", escape_pdf_text(&line)));
            }
            stream.push_str("ET\n");

            objects.push(
                format!(
                    "<< /Type /Page /Parent 2 0 R /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                    page_id + 1
                )
                .into_bytes(),
            );
            let mut content = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
            content.extend_from_slice(stream.as_bytes());
            content.extend_from_slice(b"endstream");
            objects.push(content);
        }

        let file = File::create(dest)?;
        let mut writer = BufWriter::new(file);

        let mut offset: u64 = 0;
        let mut offsets = Vec::with_capacity(objects.len());
        let header: &[u8] = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n";
        writer.write_all(header)?;
        offset += header.len() as u64;

        for (i, body) in objects.iter().enumerate() {
            offsets.push(offset);
            let head = format!("{} 0 obj\n", i + 1);
            let tail = b"\nendobj\n";
            writer.write_all(head.as_bytes())?;
            writer.write_all(body)?;
            writer.write_all(tail)?;
            offset += head.len() as u64 + body.len() as u64 + tail.len() as u64;
        }

        // Cross-reference table: fixed 20-byte entries.
        let xref_offset = offset;
        writeln!(writer, "xref")?;
        writeln!(writer, "0 {}", objects.len() + 1)?;
        writer.write_all(b"0000000000 65535 f \n")?;
        for object_offset in &offsets {
            write!(writer, "{:010} 00000 n \n", object_offset)?;
        }
        writeln!(writer, "trailer")?;
        writeln!(writer, "<< /Size {} /Root 1 0 R >>", objects.len() + 1)?;
        writeln!(writer, "startxref")?;
        writeln!(writer, "{xref_offset}")?;
        writer.write_all(b"%%EOF\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Escape the three characters with meaning inside a PDF literal string.
fn escape_pdf_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RowGenerator;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn writes_parseable_pdf_skeleton() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.pdf");
        let mut ctx = RenderContext {
            rng: ChaCha8Rng::seed_from_u64(1),
            rows: RowGenerator::new("en"),
        };
        PdfRenderer
            .render(
                &dest,
                &ContentParameter::Lines {
                    count: 130,
                    chars_per_line: 80,
                },
                &mut ctx,
            )
            .unwrap();

        let bytes = std::fs::read(&dest).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        let text = String::from_utf8_lossy(&bytes);
        // 130 lines at 60 per page -> 3 page objects
        assert_eq!(text.matches("/Type /Page ").count(), 3);
        assert!(text.contains("startxref"));
    }

    #[test]
    fn escapes_literal_string_delimiters() {
        assert_eq!(escape_pdf_text(r"a(b)c\d"), r"a\(b\)c\\d");
    }
}
