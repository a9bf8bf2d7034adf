use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use soc_coder::{
    build_reference_index, code_file, load_cached_index, write_index_cache, CodeOptions,
};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "soc-coder")]
#[command(
    about = "Attach standardized occupation codes to free-text job titles",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the reference title index and persist it as a cache directory
    Build {
        /// Canonical occupation titles (tab-separated)
        #[arg(long)]
        occupations: PathBuf,
        /// Alternate/synonym titles sharing the code column
        #[arg(long)]
        alternate_titles: PathBuf,
        /// Output cache directory
        #[arg(long)]
        output: PathBuf,
    },
    /// Attach codes to every row of a delimited input file
    Code {
        /// Cached index directory produced by `build`
        #[arg(long, conflicts_with_all = ["occupations", "alternate_titles"])]
        index: Option<PathBuf>,
        /// Canonical occupation titles (tab-separated)
        #[arg(long, requires = "alternate_titles")]
        occupations: Option<PathBuf>,
        /// Alternate/synonym titles sharing the code column
        #[arg(long, requires = "occupations")]
        alternate_titles: Option<PathBuf>,
        /// Input CSV
        #[arg(long)]
        infile: PathBuf,
        /// Column containing a job-title-like string
        #[arg(long)]
        title_col: String,
        /// Output CSV
        #[arg(long)]
        outfile: PathBuf,
        /// Minimum similarity score for a match (0-100)
        #[arg(long, default_value_t = soc_core::DEFAULT_CUTOFF)]
        cutoff: f64,
        /// Derive a pseudo title from the first tokens of the text column
        #[arg(long, default_value_t = false)]
        title_from_text: bool,
        /// Number of leading tokens for --title-from-text
        #[arg(long, default_value_t = 6)]
        pseudo_tokens: usize,
        /// Keep unmatched rows with blank code columns instead of dropping them
        #[arg(long, default_value_t = false)]
        keep_unmatched: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            occupations,
            alternate_titles,
            output,
        } => {
            let index = build_reference_index(&occupations, &alternate_titles)?;
            write_index_cache(&index, &output)?;
            tracing::info!(output = %output.display(), "index cache written");
            Ok(())
        }
        Commands::Code {
            index,
            occupations,
            alternate_titles,
            infile,
            title_col,
            outfile,
            cutoff,
            title_from_text,
            pseudo_tokens,
            keep_unmatched,
        } => {
            let index = match (index, occupations, alternate_titles) {
                (Some(dir), _, _) => load_cached_index(&dir)?,
                (None, Some(occ), Some(alt)) => build_reference_index(&occ, &alt)?,
                _ => bail!("pass either --index or both --occupations and --alternate-titles"),
            };
            let opts = CodeOptions {
                title_column: title_col,
                cutoff,
                title_from_text,
                pseudo_tokens,
                keep_unmatched,
            };
            code_file(&index, &infile, &outfile, &opts)?;
            Ok(())
        }
    }
}
