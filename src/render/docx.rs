//! DOCX renderer.
//!
//! Writes the three-part minimal OOXML package (content types, package
//! rels, document body) with one `<w:p>` per lorem paragraph.

use super::{escape_xml, RenderContext, Renderer};
use crate::content::lorem_paragraph;
use crate::estimate::ContentParameter;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

pub struct DocxRenderer;

impl Renderer for DocxRenderer {
    fn render(
        &self,
        dest: &Path,
        param: &ContentParameter,
        ctx: &mut RenderContext,
    ) -> anyhow::Result<()> {
        let ContentParameter::Paragraphs {
            count,
            chars_per_paragraph,
        } = param
        else {
            anyhow::bail!("docx renderer expects a paragraph-count parameter, got {param:?}");
        };

        let mut body = String::with_capacity(*count as usize * (*chars_per_paragraph as usize + 64));
        body.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        body.push_str(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
        );
        for _ in 0..*count {
            let paragraph = lorem_paragraph(&mut ctx.rng, *chars_per_paragraph);
            body.push_str("<w:p><w:r><w:t>");
            body.push_str(&escape_xml(&paragraph));
            body.push_str("</w:t></w:r></w:p>");
        }
        body.push_str("<w:sectPr/></w:body></w:document>");

        let file = File::create(dest)?;
        let mut zip = ZipWriter::new(file);
        let options: FileOptions = FileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(CONTENT_TYPES.as_bytes())?;
        zip.start_file("_rels/.rels", options)?;
        zip.write_all(PACKAGE_RELS.as_bytes())?;
        zip.start_file("word/document.xml", options)?;
        zip.write_all(body.as_bytes())?;
        zip.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RowGenerator;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn package_contains_document_part() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.docx");
        let mut ctx = RenderContext {
            rng: ChaCha8Rng::seed_from_u64(4),
            rows: RowGenerator::new("en"),
        };
        DocxRenderer
            .render(
                &dest,
                &ContentParameter::Paragraphs {
                    count: 5,
                    chars_per_paragraph: 150,
                },
                &mut ctx,
            )
            .unwrap();

        let file = File::open(&dest).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert!(names.contains(&"word/document.xml".to_string()));
        assert!(names.contains(&"[Content_Types].xml".to_string()));

        let mut part = archive.by_name("word/document.xml").unwrap();
        let mut xml = String::new();
        std::io::Read::read_to_string(&mut part, &mut xml).unwrap();
        assert_eq!(xml.matches("<w:p>").count(), 5);
    }
}
