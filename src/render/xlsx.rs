//! XLSX renderer.
//!
//! Minimal OOXML spreadsheet package with a single worksheet of realistic
//! rows (name, email, company, city, phone, amount, date). String cells
//! use inline strings so no shared-strings part is needed.

use super::{escape_xml, RenderContext, Renderer};
use crate::content::RowRecord;
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
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="data" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

pub struct XlsxRenderer;

impl Renderer for XlsxRenderer {
    fn render(
        &self,
        dest: &Path,
        param: &ContentParameter,
        ctx: &mut RenderContext,
    ) -> anyhow::Result<()> {
        let ContentParameter::Rows { count, columns } = param else {
            anyhow::bail!("xlsx renderer expects a row-count parameter, got {param:?}");
        };
        let columns = (*columns).clamp(1, RowRecord::HEADERS.len() as u32) as usize;

        let mut sheet = String::with_capacity(*count as usize * 256);
        sheet.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        sheet.push_str(
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
        );

        sheet.push_str("<row>");
        for header in &RowRecord::HEADERS[..columns] {
            push_string_cell(&mut sheet, header);
        }
        sheet.push_str("</row>");

        for _ in 0..*count {
            let record = ctx.rows.row(&mut ctx.rng);
            sheet.push_str("<row>");
            for cell in 0..columns {
                match cell {
                    0 => push_string_cell(&mut sheet, &record.name),
                    1 => push_string_cell(&mut sheet, &record.email),
                    2 => push_string_cell(&mut sheet, &record.company),
                    3 => push_string_cell(&mut sheet, &record.city),
                    4 => push_string_cell(&mut sheet, &record.phone),
                    5 => sheet.push_str(&format!("<c><v>{:.2}</v></c>", record.amount)),
                    _ => push_string_cell(&mut sheet, &record.date),
                }
            }
            sheet.push_str("</row>");
        }
        sheet.push_str("</sheetData></worksheet>");

        let file = File::create(dest)?;
        let mut zip = ZipWriter::new(file);
        let options: FileOptions = FileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(CONTENT_TYPES.as_bytes())?;
        zip.start_file("_rels/.rels", options)?;
        zip.write_all(PACKAGE_RELS.as_bytes())?;
        zip.start_file("xl/workbook.xml", options)?;
        zip.write_all(WORKBOOK.as_bytes())?;
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;
        zip.write_all(WORKBOOK_RELS.as_bytes())?;
        zip.start_file("xl/worksheets/sheet1.xml", options)?;
        zip.write_all(sheet.as_bytes())?;
        zip.finish()?;
        Ok(())
    }
}

fn push_string_cell(sheet: &mut String, value: &str) {
    sheet.push_str("<c t=\"inlineStr\"><is><t>");
    sheet.push_str(&escape_xml(value));
    sheet.push_str("</t></is></c>");
}
