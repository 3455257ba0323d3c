//! `sme template`: starter CSV files for each business type.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Subcommand;
use sme_insights::{
    format_sample_preview, generate_template_csv, template_meta, TemplateKind, DATA_REQUIREMENTS,
};

/// Sub-commands available under `template`.
#[derive(Debug, Subcommand)]
pub enum TemplateCommands {
    /// Write a template CSV file
    Generate {
        /// retail, service or ecommerce
        kind: TemplateKind,
        /// Output path (defaults to the template's file name in the current directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print a template's sample rows
    Preview {
        /// retail, service or ecommerce
        kind: TemplateKind,
    },
    /// Print the data checklist
    Requirements,
    /// List available templates
    List,
}

/// # Errors
///
/// Returns an error if a generated file cannot be written.
pub(crate) fn run_template(command: &TemplateCommands) -> anyhow::Result<()> {
    match command {
        TemplateCommands::Generate { kind, output } => {
            let path = output
                .clone()
                .unwrap_or_else(|| PathBuf::from(template_meta(*kind).filename));
            write_template(*kind, &path)?;
            println!("wrote {} template to {}", kind, path.display());
        }
        TemplateCommands::Preview { kind } => {
            let meta = template_meta(*kind);
            println!("{} ({})", meta.description, meta.filename);
            println!();
            println!("{}", format_sample_preview(*kind));
        }
        TemplateCommands::Requirements => {
            for line in DATA_REQUIREMENTS {
                println!("{line}");
            }
        }
        TemplateCommands::List => {
            println!("{:<11}{:<31}DESCRIPTION", "TYPE", "FILE");
            for kind in TemplateKind::ALL {
                let meta = template_meta(kind);
                println!("{:<11}{:<31}{}", kind.as_str(), meta.filename, meta.description);
            }
        }
    }
    Ok(())
}

fn write_template(kind: TemplateKind, path: &Path) -> anyhow::Result<()> {
    std::fs::write(path, generate_template_csv(kind))
        .with_context(|| format!("failed to write {}", path.display()))
}
