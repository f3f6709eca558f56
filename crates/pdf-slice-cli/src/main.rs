use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use pdf_slice::{
    AppConfig, BatchRunner, BatchUpdate, FixedDirectory, ImageSource, LastUsedDirectory,
    SliceOptions,
};
use std::path::PathBuf;
use tokio::sync::mpsc;

mod chooser;
mod logger;

use chooser::DirectoryPrompt;

#[derive(Parser)]
#[command(name = "pdfslice", about = "Slice tall images into full-bleed A4 PDFs", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON config holding slicing options and the last output directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert each image into its own A4 PDF
    Convert {
        /// Input image files
        #[arg(required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Reuse the output directory remembered in the config
        #[arg(long, conflicts_with = "output_dir")]
        last_dir: bool,

        /// Pick the output directory with a folder dialog
        #[cfg(feature = "dialog")]
        #[arg(long, conflicts_with_all = ["output_dir", "last_dir"])]
        pick_dir: bool,

        #[command(flatten)]
        slicing: SlicingArgs,

        /// Show pagination only, don't write any PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Write each page of an image as a numbered PNG
    Slices {
        /// Input image file
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output_dir: PathBuf,

        #[command(flatten)]
        slicing: SlicingArgs,
    },
}

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Largest `--max-file-size-mb` whose byte count fits in a u64
const MAX_FILE_SIZE_MB: u64 = u64::MAX / BYTES_PER_MB;

#[derive(Args)]
struct SlicingArgs {
    /// Width/height ratio above which wide images get narrower pages
    #[arg(long)]
    panoramic_threshold: Option<f64>,

    /// Background color for uncovered page area, as RRGGBB
    #[arg(long, value_parser = parse_hex_color)]
    background: Option<[u8; 3]>,

    /// Largest accepted input file in megabytes
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_FILE_SIZE_MB))]
    max_file_size_mb: Option<u64>,
}

impl SlicingArgs {
    fn apply(&self, options: &mut SliceOptions) {
        if let Some(threshold) = self.panoramic_threshold {
            options.panoramic_threshold = threshold;
        }
        if let Some(background) = self.background {
            options.background = background;
        }
        if let Some(mb) = self.max_file_size_mb {
            options.max_file_size = mb * BYTES_PER_MB;
        }
    }
}

fn parse_hex_color(s: &str) -> std::result::Result<[u8; 3], String> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected RRGGBB, got {s:?}"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("bad color {s:?}: {e}"))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

async fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    Ok(match path {
        Some(path) => AppConfig::load_or_default(path).await?,
        None => AppConfig::default(),
    })
}

/// Print per-item progress as the batch reports it
async fn print_progress(mut rx: mpsc::UnboundedReceiver<BatchUpdate>) {
    let mut total = 0;
    while let Some(update) = rx.recv().await {
        match update {
            BatchUpdate::Started { output_dir, total: n } => {
                total = n;
                println!("Writing {} document(s) to {}", n, output_dir.display());
            }
            BatchUpdate::ItemStarted { index, name } => {
                println!("  [{}/{}] {}", index + 1, total, name);
            }
            BatchUpdate::ItemSucceeded {
                path, page_count, ..
            } => {
                println!("        → {} ({} page(s))", path.display(), page_count);
            }
            BatchUpdate::ItemFailed { kind, .. } => {
                println!("        failed ({:?})", kind);
            }
            BatchUpdate::Finished { .. } => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::CliLogger::from_verbosity(cli.verbose).init()?;

    let mut config = load_config(cli.config.as_ref()).await?;

    match cli.command {
        Commands::Convert {
            input,
            output_dir,
            last_dir,
            #[cfg(feature = "dialog")]
            pick_dir,
            slicing,
            stats_only,
        } => {
            slicing.apply(&mut config.options);
            config.options.validate()?;

            if stats_only {
                for path in &input {
                    let image =
                        pdf_slice::load_image(path, config.options.max_file_size).await?;
                    let stats = pdf_slice::calculate_statistics(
                        image.width(),
                        image.height(),
                        &config.options,
                    )?;
                    println!("{}:", path.display());
                    println!("  Image: {}x{}", stats.image_width, stats.image_height);
                    println!(
                        "  Page: {:.2}x{:.2} px{}",
                        stats.page_width_px,
                        stats.page_height_px,
                        if stats.panoramic { " (panoramic)" } else { "" }
                    );
                    println!("  Pages: {}", stats.page_count);
                    println!("  Last page rows: {}", stats.last_page_rows);
                }
                return Ok(());
            }

            let mut prompt = match output_dir {
                Some(dir) => DirectoryPrompt::Given(FixedDirectory::new(dir)),
                None if last_dir => DirectoryPrompt::LastUsed(LastUsedDirectory),
                #[cfg(feature = "dialog")]
                None if pick_dir => DirectoryPrompt::Dialog,
                None => DirectoryPrompt::Given(FixedDirectory::cancelled()),
            };

            let (tx, rx) = mpsc::unbounded_channel();
            let printer = tokio::spawn(print_progress(rx));

            let runner = BatchRunner::new(config.options.clone()).with_updates(tx);
            let inputs = input.into_iter().map(ImageSource::from).collect();
            let result = runner.run(inputs, &mut prompt, &mut config).await;
            drop(runner);
            printer.await?;

            let report = result?;
            if let Some(path) = &cli.config {
                config.save(path).await?;
            }

            println!("Generated {} PDF file(s)", report.succeeded());
            if report.failed() > 0 {
                println!("{} image(s) failed, run with -v for details", report.failed());
            }
            if report.succeeded() == 0 {
                bail!("no documents were produced");
            }
        }

        Commands::Slices {
            input,
            output_dir,
            slicing,
        } => {
            slicing.apply(&mut config.options);
            config.options.validate()?;

            let image = pdf_slice::load_image(&input, config.options.max_file_size).await?;
            let paths = pdf_slice::export_slices(image, &config.options, &output_dir).await?;
            println!(
                "Exported {} slice(s) of {} → {}",
                paths.len(),
                input.display(),
                output_dir.display()
            );
        }
    }

    Ok(())
}
