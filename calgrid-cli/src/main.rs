mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use calgrid_core::config::{CalendarConfig, TEMPLATE_FILENAME};
use calgrid_core::layout::layout_document;
use calgrid_core::pdf::render_document;
use clap::Parser;
use owo_colors::OwoColorize;

#[derive(Parser)]
#[command(name = "calgrid")]
#[command(about = "Render monthly calendar pages from a YAML event config into a PDF")]
struct Cli {
    /// Path to the calendar config file (YAML)
    config_file: Option<PathBuf>,

    /// Write a starter config to template_config.yaml and exit
    #[arg(long)]
    template: bool,

    /// Where to write the generated PDF
    #[arg(short, long, default_value = "calendar.pdf")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.template {
        let path = PathBuf::from(TEMPLATE_FILENAME);
        CalendarConfig::write_template(&path)
            .with_context(|| format!("Could not write {}", path.display()))?;
        println!("Template config file created: {}", path.display().bold());
        return Ok(());
    }

    let Some(config_file) = cli.config_file else {
        anyhow::bail!(
            "You must specify a config file or use --template.\n\n\
            Generate a starter config with:\n  \
            calgrid --template"
        );
    };

    let config = CalendarConfig::load(&config_file)?;
    let plans = layout_document(&config)?;
    let bytes = render_document(&plans)?;

    output::write_atomic(&cli.output, &bytes)
        .with_context(|| format!("Could not write {}", cli.output.display()))?;

    println!("Calendar PDF generated: {}", cli.output.display().bold());
    Ok(())
}
