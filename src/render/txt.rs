//! Plain-text renderer: fixed-width lorem ipsum lines.

use super::{RenderContext, Renderer};
use crate::content::lorem_line;
use crate::estimate::ContentParameter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct TxtRenderer;

impl Renderer for TxtRenderer {
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
            anyhow::bail!("txt renderer expects a line-count parameter, got {param:?}");
        };

        let file = File::create(dest)?;
        let mut writer = BufWriter::new(file);
        for _ in 0..*count {
            let line = lorem_line(&mut ctx.rng, *chars_per_line);
            writeln!(writer, "{line}")?;
        }
        writer.flush()?;
        Ok(())
    }
}
