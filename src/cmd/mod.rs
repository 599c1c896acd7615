mod generate;
mod templates;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate as generate_completions, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fixturegen")]
#[command(author = "Helge Sverre <helge.sverre@gmail.com>")]
#[command(version)]
#[command(about = "Generate synthetic test fixture files with controllable size and type mix", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a batch of fixture files
    Generate {
        /// Output directory (default from config, falls back to "fixtures")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Active formats, comma-separated (txt, pdf, docx, xlsx, jpeg)
        #[arg(short, long)]
        types: Option<String>,

        /// Fixed count per format, e.g. txt=2,pdf=1
        #[arg(long, conflicts_with_all = ["total", "percent"])]
        count: Option<String>,

        /// Total file count; formats drawn at random unless --percent is given
        #[arg(short = 'n', long)]
        total: Option<u64>,

        /// Percentage per format, e.g. pdf=70,remaining=30 (requires --total)
        #[arg(long, requires = "total")]
        percent: Option<String>,

        /// Named template from config or built-ins (see `fixturegen templates`)
        #[arg(long)]
        template: Option<String>,

        /// Target size in MB per format, e.g. txt=0.1,pdf=0.3
        #[arg(long)]
        sizes: Option<String>,

        /// Random seed for reproducible content
        #[arg(long)]
        seed: Option<u64>,

        /// Locale hint for realistic fake data
        #[arg(long)]
        locale: Option<String>,

        /// JSON config file (default: config.json when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Bundle the output directory into a tar archive afterwards
        #[arg(long)]
        tar: bool,

        /// Tar compression: none, gz, bz2, xz, zst
        #[arg(long, default_value = "none", requires = "tar")]
        compression: String,

        /// Remove the output directory after the archive is written
        #[arg(long, requires = "tar")]
        clean: bool,

        /// Show a progress bar during generation
        #[arg(short, long)]
        progress: bool,

        /// Resolve and print the plan without writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// List available generation templates
    Templates {
        /// JSON config file (default: config.json when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            output,
            types,
            count,
            total,
            percent,
            template,
            sizes,
            seed,
            locale,
            config,
            tar,
            compression,
            clean,
            progress,
            dry_run,
        } => generate::run(
            output,
            types,
            count,
            total,
            percent,
            template,
            sizes,
            seed,
            locale,
            config,
            tar,
            compression,
            clean,
            progress,
            dry_run,
        ),
        Commands::Templates { config } => templates::run(config),
        Commands::Completions { shell } => {
            generate_completions(shell, &mut Cli::command(), "fixturegen", &mut io::stdout());
            Ok(())
        }
    }
}
