//! Format renderers.
//!
//! Each renderer writes exactly one file of its format given a content
//! parameter from the estimator. Renderers are registered behind a trait
//! so the orchestrator stays a dispatch loop and tests can substitute
//! failing collaborators.

mod docx;
mod jpeg;
mod pdf;
mod txt;
mod xlsx;

pub use docx::DocxRenderer;
pub use jpeg::JpegRenderer;
pub use pdf::PdfRenderer;
pub use txt::TxtRenderer;
pub use xlsx::XlsxRenderer;

use crate::content::RowGenerator;
use crate::estimate::ContentParameter;
use crate::format::FileFormat;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::path::Path;

/// Shared per-run state handed to every render call.
pub struct RenderContext {
    /// Seeded RNG driving all content generation for the run
    pub rng: ChaCha8Rng,
    /// Realistic row generator (xlsx)
    pub rows: RowGenerator,
}

/// A collaborator that writes one file of one format.
pub trait Renderer {
    /// Render `param` worth of content to `dest`. Any error is recorded
    /// per file by the orchestrator; it never aborts the batch.
    fn render(
        &self,
        dest: &Path,
        param: &ContentParameter,
        ctx: &mut RenderContext,
    ) -> anyhow::Result<()>;
}

/// Dispatch table from format to renderer.
pub struct RendererRegistry {
    renderers: HashMap<FileFormat, Box<dyn Renderer>>,
}

impl RendererRegistry {
    /// Registry with the standard renderer for every supported format.
    pub fn standard() -> Self {
        let mut renderers: HashMap<FileFormat, Box<dyn Renderer>> = HashMap::new();
        renderers.insert(FileFormat::Txt, Box::new(TxtRenderer));
        renderers.insert(FileFormat::Pdf, Box::new(PdfRenderer));
        renderers.insert(FileFormat::Docx, Box::new(DocxRenderer));
        renderers.insert(FileFormat::Xlsx, Box::new(XlsxRenderer));
        renderers.insert(FileFormat::Jpeg, Box::new(JpegRenderer));
        Self { renderers }
    }

    /// Replace the renderer for one format (used by tests to inject
    /// failing collaborators).
    pub fn with_renderer(mut self, format: FileFormat, renderer: Box<dyn Renderer>) -> Self {
        self.renderers.insert(format, renderer);
        self
    }

    pub fn get(&self, format: FileFormat) -> Option<&dyn Renderer> {
        self.renderers.get(&format).map(|r| r.as_ref())
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Minimal XML text escaping for the OOXML parts.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
