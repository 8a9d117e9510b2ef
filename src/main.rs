//! lampstand - Fast Bible text converter

use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use lampstand::canon::Testament;
use lampstand::{Bible, write_blocks_json, write_simple_json, write_summary_json, write_text};

#[derive(Parser)]
#[command(name = "lampstand")]
#[command(version, about = "Fast Bible text converter", long_about = None)]
#[command(after_help = "EXAMPLES:
    lampstand bsb.usj.json bsb.txt             Convert USJ to plain text
    lampstand bible.xml bible.json             Convert Zefania XML to simple JSON
    lampstand -t blocks bsb.usj.json out.json  Export display blocks for a viewer
    lampstand -i bsb.usj.json                  Show bundle statistics")]
struct Cli {
    /// Input file (USJ bundle or Zefania XML)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (.txt or .json)
    #[arg(value_name = "OUTPUT", required_unless_present = "info")]
    output: Option<String>,

    /// Output format (inferred from the output extension when omitted)
    #[arg(short = 't', long = "to", value_enum)]
    to: Option<OutputFormat>,

    /// Show bundle statistics without converting
    #[arg(short, long)]
    info: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Plain text with bracketed verse numbers
    Text,
    /// Book/chapter/verse JSON
    Simple,
    /// Display block JSON for viewers
    Blocks,
    /// Chapter and verse counts JSON
    Summary,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.info {
        match show_info(&cli.input) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        }
    } else {
        let output = cli.output.expect("output required");
        match convert(&cli.input, &output, cli.to, cli.quiet) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        }
    }
}

fn show_info(path: &str) -> Result<(), String> {
    let bible = Bible::open(path).map_err(|e| e.to_string())?;

    let old = bible
        .books
        .iter()
        .filter(|book| book.id.testament() == Testament::Old)
        .count();
    let new = bible.books.len() - old;

    println!("File: {path}");
    println!("Books: {}", bible.books.len());
    println!("Old Testament: {old}");
    println!("New Testament: {new}");
    println!("Chapters: {}", bible.chapter_count());
    println!("Verses: {}", bible.verse_count());
    println!("Footnotes: {}", bible.footnote_count());

    Ok(())
}

fn convert(input: &str, output: &str, to: Option<OutputFormat>, quiet: bool) -> Result<(), String> {
    let format = match to {
        Some(format) => format,
        None => infer_format(output)?,
    };

    let bible = Bible::open(input).map_err(|e| e.to_string())?;

    match format {
        OutputFormat::Text => write_text(&bible, output),
        OutputFormat::Simple => write_simple_json(&bible, output),
        OutputFormat::Blocks => write_blocks_json(&bible, output),
        OutputFormat::Summary => write_summary_json(&bible, output),
    }
    .map_err(|e| e.to_string())?;

    if !quiet {
        println!("Wrote {output}");
    }

    Ok(())
}

fn infer_format(output: &str) -> Result<OutputFormat, String> {
    let extension = Path::new(output)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("txt") => Ok(OutputFormat::Text),
        Some("json") => Ok(OutputFormat::Simple),
        _ => Err(format!("cannot infer output format for {output}; pass --to")),
    }
}
