use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use munsell_pages::models::AppConfig;
use munsell_pages::rendering::{paint_hue_page, plan_hue_page, PageLayout};
use munsell_pages::services::{aggregate_by_hue_page, records};
use munsell_pages::table::{CellValue, ChipTable, Column};

#[derive(Parser)]
#[command(name = "munsell-pages")]
#[command(about = "Canonicalize Munsell color chips and render hue page images")]
struct Cli {
    /// Optional config.yaml with chip geometry and hue page catalog
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collapse raw chip samples into a canonical chip table
    Aggregate {
        /// JSON array of raw chip records
        #[arg(short, long)]
        input: PathBuf,

        /// Output chip table file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Render one PNG per hue page from a chip table
    Render {
        /// Chip table file
        #[arg(short, long)]
        input: PathBuf,

        /// Folder receiving the hue page images
        #[arg(short, long)]
        output_dir: PathBuf,
    },
    /// Print a summary of a chip table
    Stats {
        /// Chip table file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "munsell_pages=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load(cli.config.as_deref());

    match cli.command {
        Commands::Aggregate { input, output } => run_aggregate_command(&config, &input, &output),
        Commands::Render { input, output_dir } => {
            run_render_command(&config, &input, &output_dir)
        }
        Commands::Stats { input } => run_stats_command(&config, &input),
    }
}

fn run_aggregate_command(config: &AppConfig, input: &Path, output: &Path) -> anyhow::Result<()> {
    let catalog = config.catalog();
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let mut raw = records::raw_from_json(&content)?;
    for chip in &mut raw {
        chip.resolve_hue_page(&catalog)?;
    }

    let table = ChipTable::from_raw(&raw)?;
    table.check_hue_pages(&catalog)?;

    let (canonical, summary) = aggregate_by_hue_page(&table)?;
    records::write_file(&canonical, output)?;

    println!(
        "Aggregated {} samples into {} chips ({} merged)",
        summary.input_rows, summary.output_rows, summary.merged_groups
    );
    Ok(())
}

fn run_render_command(config: &AppConfig, input: &Path, output_dir: &Path) -> anyhow::Result<()> {
    let catalog = config.catalog();
    let table = records::read_file(input)?;
    let (canonical, _) = aggregate_by_hue_page(&table)?;
    let layout = PageLayout::for_table(&canonical, &config.layout)?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut total = 0;
    for (index, name) in catalog.iter() {
        let plan = plan_hue_page(&canonical, index, &layout)?;
        let pixmap = paint_hue_page(&plan, &layout)?;
        let path = output_dir.join(catalog.image_file_name(index)?);
        pixmap
            .save_png(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!(page = name, chips = plan.len(), path = %path.display(), "Rendered hue page");
        total += plan.len();
    }

    println!(
        "Rendered {} hue pages ({} chips) to {}",
        catalog.len(),
        total,
        output_dir.display()
    );
    Ok(())
}

fn run_stats_command(config: &AppConfig, input: &Path) -> anyhow::Result<()> {
    let table = records::read_file(input)?;
    let (rows, columns) = table.shape();
    println!("Shape: {rows} rows x {columns} columns");

    if table.is_empty() {
        return Ok(());
    }

    println!("Max value row: {}", table.max(Column::ValueRow)?);
    println!("Max chroma column: {}", table.max(Column::ChromaColumn)?);

    let catalog = config.catalog();
    let pages = table.unique_values(Column::HuePageIndex)?;
    println!("Hue pages: {}", pages.len());
    for page in pages {
        let CellValue::Int(index) = page else {
            continue;
        };
        let chips = table.hue_page(index as u32)?.len();
        let name = u32::try_from(index)
            .ok()
            .and_then(|i| catalog.name(i))
            .unwrap_or("?");
        println!("  {index:02} {name}: {chips} chips");
    }
    Ok(())
}
