//! blockdoc CLI - OCR block graph reconstruction tool

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use blockdoc::{
    parse_file_with_options, parse_many, render, Action, Backend, Document, JsonFormat,
    PageSelection, ParseOptions, RenderOptions, Response,
};

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "blockdoc")]
#[command(version)]
#[command(about = "Rebuild pages, tables and forms from OCR block responses", long_about = None)]
struct Cli {
    /// Extraction action the response was produced with
    #[arg(
        long,
        global = true,
        env = "BLOCKDOC_ACTION",
        default_value = "ocr_tables_forms",
        value_parser = parse_action
    )]
    action: Action,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print page text
    Text {
        /// Input response JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long, value_parser = PageSelection::parse)]
        pages: Option<PageSelection>,
    },

    /// Convert the reconstructed document to JSON
    Json {
        /// Input response JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print tables, or export them to an XLSX workbook
    Tables {
        /// Input response JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Workbook to write, one sheet per table
        #[arg(short, long, value_name = "FILE.xlsx")]
        output: Option<PathBuf>,

        /// Print only the table at this index
        #[arg(long, value_name = "N", conflicts_with = "output")]
        index: Option<usize>,
    },

    /// Print form fields
    Forms {
        /// Input response JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print as a JSON object
        #[arg(long)]
        json: bool,
    },

    /// Show document information
    Info {
        /// Input response JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Convert responses to text, JSON and XLSX
    Convert {
        /// Input response JSON files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn parse_action(s: &str) -> Result<Action, String> {
    s.parse::<Action>().map_err(|e| e.to_string())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("Using action {}", cli.action);

    let result = Backend::Aws
        .validate(cli.action)
        .map_err(Into::into)
        .and_then(|()| run(cli.command, parse_options(cli.action)));

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_options(action: Action) -> ParseOptions {
    ParseOptions::new().with_features(action.features())
}

fn run(command: Commands, options: ParseOptions) -> CliResult {
    match command {
        Commands::Text {
            input,
            output,
            pages,
        } => cmd_text(&input, output.as_deref(), pages, options),
        Commands::Json {
            input,
            output,
            compact,
        } => cmd_json(&input, output.as_deref(), compact, options),
        Commands::Tables {
            input,
            output,
            index,
        } => cmd_tables(&input, output.as_deref(), index, options),
        Commands::Forms { input, json } => cmd_forms(&input, json, options),
        Commands::Info { input } => cmd_info(&input, options),
        Commands::Convert { inputs, output } => cmd_convert(&inputs, output.as_deref(), options),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    pages: Option<PageSelection>,
    options: ParseOptions,
) -> CliResult {
    let doc = parse_file_with_options(input, options.text_only())?;
    let render_options = RenderOptions::new().with_pages(pages.unwrap_or_default());
    write_or_print(output, &render::to_text(&doc, &render_options))
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool, options: ParseOptions) -> CliResult {
    let doc = parse_file_with_options(input, options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    write_or_print(output, &render::to_json(&doc, format)?)
}

fn cmd_tables(
    input: &Path,
    output: Option<&Path>,
    index: Option<usize>,
    options: ParseOptions,
) -> CliResult {
    let doc = parse_file_with_options(input, options.with_forms(false))?;

    if let Some(path) = output {
        doc.export_all_tables(path)?;
        println!(
            "{} {} tables to {}",
            "Exported".green(),
            doc.num_tables(),
            path.display()
        );
        return Ok(());
    }

    if let Some(index) = index {
        println!("{}", doc.export_table(index)?.to_tsv());
        return Ok(());
    }

    if doc.num_tables() == 0 {
        println!("{}", "No tables found".yellow());
    }
    for index in 0..doc.num_tables() {
        let frame = doc.export_table(index)?;
        let shape = format!("(page {}, {}x{})", frame.page, frame.height(), frame.width());
        println!("{} {} {}", "Table".cyan().bold(), index, shape.as_str().dimmed());
        println!("{}\n", frame.to_tsv());
    }
    Ok(())
}

fn cmd_forms(input: &Path, json: bool, options: ParseOptions) -> CliResult {
    let doc = parse_file_with_options(input, options.with_tables(false))?;

    if json {
        println!("{}", serde_json::to_string_pretty(doc.forms())?);
        return Ok(());
    }

    if doc.forms().is_empty() {
        println!("{}", "No form fields found".yellow());
    }
    for (key, value) in doc.forms() {
        println!("{}: {}", key.trim().bold(), value.trim());
    }
    Ok(())
}

fn cmd_info(input: &Path, options: ParseOptions) -> CliResult {
    let doc = parse_file_with_options(input, options)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Response".bold(), doc.metadata.kind);
    println!("{}: {}", "Pages".bold(), doc.metadata.page_count);
    println!("{}: {}", "Blocks".bold(), doc.metadata.block_count);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let words: usize = doc.pages.iter().map(|page| page.word_count()).sum();
    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Tables".bold(), doc.num_tables());
    println!("{}: {}", "Form fields".bold(), doc.forms().len());

    for page in &doc.pages {
        println!(
            "  {} {}: {} blocks, {} tables",
            "Page".dimmed(),
            page.number,
            page.block_count(),
            page.tables.len()
        );
    }

    Ok(())
}

fn load_response(path: &Path) -> blockdoc::Result<Response> {
    let reader = BufReader::new(File::open(path)?);
    let value = serde_json::from_reader(reader)?;
    blockdoc::response_from_value(value)
}

fn write_outputs(doc: &Document, dir: &Path, stem: &str) -> CliResult {
    fs::write(
        dir.join(format!("{}.txt", stem)),
        render::to_text(doc, &RenderOptions::default()),
    )?;
    fs::write(
        dir.join(format!("{}.json", stem)),
        render::to_json(doc, JsonFormat::Pretty)?,
    )?;
    doc.export_all_tables(dir.join(format!("{}.xlsx", stem)))?;
    Ok(())
}

fn cmd_convert(inputs: &[PathBuf], output: Option<&Path>, options: ParseOptions) -> CliResult {
    let output_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("blockdoc_output"));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64 * 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    // Load every response first so parsing can run as one batch
    pb.set_message("Loading responses...");
    let mut failures: Vec<(PathBuf, String)> = Vec::new();
    let mut loaded = Vec::with_capacity(inputs.len());
    for input in inputs {
        match load_response(input) {
            Ok(response) => loaded.push((input, response)),
            Err(e) => failures.push((input.clone(), e.to_string())),
        }
        pb.inc(1);
    }

    pb.set_message("Reconstructing...");
    let (paths, responses): (Vec<_>, Vec<_>) = loaded.into_iter().unzip();
    let results = parse_many(&responses, &options);

    for (input, result) in paths.into_iter().zip(results) {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        pb.set_message(format!("Writing {}...", stem));
        let written = result
            .map_err(Into::into)
            .and_then(|doc| write_outputs(&doc, &output_dir, &stem));
        if let Err(e) = written {
            failures.push((input.clone(), e.to_string()));
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    let converted = inputs.len() - failures.len();
    println!(
        "\n{} {} of {} files to {}",
        "Converted".green().bold(),
        converted,
        inputs.len(),
        output_dir.display()
    );

    if failures.is_empty() {
        return Ok(());
    }
    for (path, error) in &failures {
        eprintln!("  {} {}: {}", "✗".red(), path.display(), error);
    }
    Err(format!("{} files failed", failures.len()).into())
}

fn cmd_version() {
    println!("{} {}", "blockdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("OCR block graph reconstruction tool");
    println!();
    let actions = Action::ALL
        .iter()
        .map(Action::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    println!("Actions: {}", actions.as_str().dimmed());
    println!("License: MIT");
}
