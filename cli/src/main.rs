//! tocpdf CLI - export editor HTML to PDF with a table of contents

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use tocpdf::convert::NormalizePreset;
use tocpdf::render::{to_json, to_text};
use tocpdf::{
    extract_titles, ComposeOptions, ConvertOptions, DocumentComposer, ExportStats, JsonFormat,
    Metadata, PageSize, PdfOptions, PdfRenderer, TablePatchPolicy, OUTPUT_FILENAME,
};

#[derive(Parser)]
#[command(name = "tocpdf")]
#[command(version)]
#[command(about = "Export editor HTML to PDF with a generated table of contents", long_about = None)]
struct Cli {
    /// Input HTML file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT_DIR")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export HTML to PDF
    Export {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output file name
        #[arg(long, default_value = OUTPUT_FILENAME)]
        filename: String,

        /// Page size
        #[arg(long, value_enum, default_value = "a4")]
        page_size: PageSizeArg,

        /// Keep column widths and borders the author already set
        #[arg(long)]
        keep_table_styles: bool,

        /// Title block text
        #[arg(long)]
        title: Option<String>,

        /// Text normalization preset
        #[arg(long, value_enum)]
        normalize: Option<NormalizeLevel>,

        /// Write uncompressed content streams
        #[arg(long)]
        no_compress: bool,
    },

    /// Print the numbered heading outline
    Toc {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the document description as JSON
    Json {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print a plain text preview
    Text {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show document statistics
    Info {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageSizeArg {
    /// ISO A4
    A4,
    /// US Letter
    Letter,
    /// US Legal
    Legal,
}

impl From<PageSizeArg> for PageSize {
    fn from(size: PageSizeArg) -> Self {
        match size {
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::Letter => PageSize::Letter,
            PageSizeArg::Legal => PageSize::Legal,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum NormalizeLevel {
    /// Whitespace collapsing only
    Minimal,
    /// Unicode and whitespace cleanup (default)
    Standard,
}

impl From<NormalizeLevel> for NormalizePreset {
    fn from(level: NormalizeLevel) -> Self {
        match level {
            NormalizeLevel::Minimal => NormalizePreset::Minimal,
            NormalizeLevel::Standard => NormalizePreset::Standard,
        }
    }
}

struct ExportArgs {
    filename: String,
    page_size: PageSizeArg,
    keep_table_styles: bool,
    title: Option<String>,
    normalize: Option<NormalizeLevel>,
    no_compress: bool,
}

impl Default for ExportArgs {
    fn default() -> Self {
        Self {
            filename: OUTPUT_FILENAME.to_string(),
            page_size: PageSizeArg::A4,
            keep_table_styles: false,
            title: None,
            normalize: None,
            no_compress: false,
        }
    }
}

impl ExportArgs {
    fn compose_options(&self, input: &Path) -> ComposeOptions {
        let mut convert = ConvertOptions::new();
        if let Some(level) = self.normalize {
            convert = convert.with_preset(level.into());
        }

        let mut metadata = Metadata::default();
        metadata.title = input.file_stem().map(|s| s.to_string_lossy().into_owned());
        metadata.creator = Some(format!("tocpdf-cli {}", env!("CARGO_PKG_VERSION")));

        let mut options = ComposeOptions::new()
            .with_page_size(self.page_size.into())
            .with_metadata(metadata)
            .with_convert_options(convert);
        if self.keep_table_styles {
            options = options.with_table_policy(TablePatchPolicy::OnlyIfUnset);
        }
        if let Some(ref title) = self.title {
            options = options.with_title(title.clone());
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Export {
            input,
            output,
            filename,
            page_size,
            keep_table_styles,
            title,
            normalize,
            no_compress,
        }) => cmd_export(
            &input,
            output.as_deref(),
            &ExportArgs {
                filename,
                page_size,
                keep_table_styles,
                title,
                normalize,
                no_compress,
            },
        ),
        Some(Commands::Toc { input }) => cmd_toc(&input),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: export if input is provided
            if let Some(input) = cli.input {
                cmd_export(&input, cli.output.as_deref(), &ExportArgs::default())
            } else {
                println!("{}", "Usage: tocpdf <FILE> [OUTPUT_DIR]".yellow());
                println!("       tocpdf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_html(input: &Path) -> Result<String, Box<dyn std::error::Error>> {
    fs::read_to_string(input).map_err(|e| format!("Cannot read {}: {}", input.display(), e).into())
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_export(
    input: &Path,
    output: Option<&Path>,
    args: &ExportArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Reading HTML...");
    let html = read_html(input)?;
    pb.inc(1);

    pb.set_message("Composing document...");
    let doc = DocumentComposer::with_options(args.compose_options(input)).compose(&html)?;
    pb.inc(1);

    pb.set_message("Rendering PDF...");
    let renderer = PdfRenderer::with_options(PdfOptions::new().with_compression(!args.no_compress));
    let mut bytes = Vec::new();
    let pages = renderer.render_pages(&doc, &mut bytes)?;

    fs::create_dir_all(&output_dir)?;
    let path = output_dir.join(&args.filename);
    fs::write(&path, &bytes)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    let stats = ExportStats::collect(&doc).with_pages(pages);
    println!("\n{} {}", "Saved to".green().bold(), path.display());
    println!(
        "  {} {} outline entries, {} tables, {} pages",
        "└─".dimmed(),
        stats.outline_entries,
        stats.table_count,
        stats.page_count
    );

    Ok(())
}

fn cmd_toc(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let html = read_html(input)?;
    let titles = extract_titles(&html);

    if titles.is_empty() {
        println!("{}", "No headings found".yellow());
        return Ok(());
    }

    for entry in &titles {
        let indent = "  ".repeat(entry.level.number().saturating_sub(1) as usize);
        println!("{}{} {}", indent, entry.text, format!("({})", entry.level.as_str()).dimmed());
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = read_html(input)?;
    let doc = tocpdf::compose(&html)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = to_json(&doc, format)?;
    write_or_print(output, &json)
}

fn cmd_text(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let html = read_html(input)?;
    let doc = tocpdf::compose(&html)?;
    write_or_print(output, &to_text(&doc))
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let html = read_html(input)?;
    let doc = tocpdf::compose(&html)?;
    let pages = PdfRenderer::new().render_pages(&doc, &mut std::io::sink())?;
    let stats = ExportStats::collect(&doc).with_pages(pages);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Page size".bold(), doc.page_size);
    println!("{}: {}", "Pages".bold(), stats.page_count);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Outline entries".bold(), stats.outline_entries);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Lists".bold(), stats.list_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Words".bold(), stats.word_count);

    if log::log_enabled!(log::Level::Debug) {
        log::debug!("{}", serde_json::to_string(&stats)?);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "tocpdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("HTML to PDF export with a generated table of contents");
    println!();
    println!("License: MIT");
}
