use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rcimport::vfs::DirTree;
use rcimport::{Classification, Importer, ImporterOptions};
use std::path::PathBuf;
use std::sync::Arc;

mod probe;

#[derive(Parser)]
#[command(name = "rcimport")]
#[command(version = "0.2.0")]
#[command(about = "Inspect a resource bundle the way the bundle importer sees it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct BundleArgs {
    /// Directory holding the bundle contents
    #[arg(short, long, value_name = "DIR")]
    root: PathBuf,

    /// Bundle path the directory is mounted at (e.g. ":/")
    #[arg(short, long, value_name = "PREFIX", default_value = "/")]
    mount: String,

    /// Extension of precompiled code files
    #[arg(long, value_name = "EXT", default_value = "pyc")]
    ext: String,
}

impl BundleArgs {
    fn importer(&self) -> Result<Importer> {
        let tree = DirTree::mounted(&self.root, &self.mount)
            .with_context(|| format!("Failed to open bundle at {}", self.root.display()))?;
        let options = ImporterOptions::default().with_extension(&self.ext);

        log::info!("Bundle: {} mounted at {}", self.root.display(), tree.mount());

        Importer::with_options(Arc::new(tree), &self.mount, options)
            .context("Bundle root is not usable")
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Classify module names against the bundle
    Locate {
        #[command(flatten)]
        bundle: BundleArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Fully qualified module names
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },

    /// List the units the bundle defines
    Tree {
        #[command(flatten)]
        bundle: BundleArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report module files that hide a same-named directory
    Check {
        #[command(flatten)]
        bundle: BundleArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Locate {
            bundle,
            json,
            names,
        } => {
            let importer = bundle.importer()?;
            let reports = probe::locate(&importer, &names);

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
                return Ok(());
            }

            for report in &reports {
                println!("{}: {}", report.name.bold(), label(report.classification));
                if let Some(pathname) = &report.pathname {
                    println!("  pathname: {}", pathname);
                }
                if let Some(filename) = &report.filename {
                    println!("  filename: {}", filename);
                }
            }

            Ok(())
        }

        Commands::Tree { bundle, json } => {
            let importer = bundle.importer()?;
            let units = probe::units(&importer)
                .with_context(|| format!("Failed to walk {}", importer.root()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&units)?);
                return Ok(());
            }

            println!("{}", importer.root().bold());
            for unit in &units {
                let indent = "  ".repeat(unit.depth + 1);
                let note = if unit.reachable {
                    String::new()
                } else {
                    format!(" {}", "(not importable by this name)".dimmed())
                };
                println!("{}{} {}{}", indent, unit.name, label(unit.kind), note);
            }
            println!();
            println!("Total: {} units", units.len());

            Ok(())
        }

        Commands::Check { bundle, json } => {
            let importer = bundle.importer()?;
            let shadows = probe::shadows(&importer)
                .with_context(|| format!("Failed to walk {}", importer.root()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&shadows)?);
            } else if shadows.is_empty() {
                println!("{} no shadowed units", "ok:".green().bold());
            } else {
                for shadow in &shadows {
                    println!(
                        "{} {} hides {} {}",
                        "warning:".yellow().bold(),
                        shadow.module,
                        shadow.hidden_kind,
                        shadow.hidden
                    );
                }
            }

            if !shadows.is_empty() {
                std::process::exit(1);
            }

            Ok(())
        }
    }
}

fn label(classification: Classification) -> colored::ColoredString {
    let text = classification.as_str();
    match classification {
        Classification::Module => text.green(),
        Classification::Package => text.cyan(),
        Classification::Namespace => text.yellow(),
        Classification::NotFound => text.red(),
    }
}
