//! Templates listing command.

use crate::config::AppConfig;
use std::path::PathBuf;

pub fn run(config: Option<PathBuf>) -> anyhow::Result<()> {
    let app = AppConfig::load_or_default(config.as_deref());

    println!("Available templates:");
    for name in app.template_names() {
        let template = match app.template(&name) {
            Some(t) => t,
            None => continue,
        };
        let summary = if let Some(total) = template.total {
            format!("{} files total", total)
        } else {
            let files: u64 = template
                .types
                .iter()
                .map(|f| template.counts.get(f).copied().unwrap_or(1))
                .sum();
            format!("{} files", files)
        };
        let types: Vec<String> = template.types.iter().map(|f| f.to_string()).collect();
        println!("  {:<12} {} ({})", name, summary, types.join(", "));
    }

    Ok(())
}
