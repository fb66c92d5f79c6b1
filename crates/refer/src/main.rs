use clap::{Parser, Subcommand, ValueEnum};
use csl_refer::{codec, io, FormatOptions, Formatted, LineEnding, OutputFormat, Translator};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a refer file to CSL-JSON
    Parse {
        /// Path to the refer file, or `-` for stdin
        input: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Convert CSL-JSON (or YAML) items to refer
    Format {
        /// Path to the items file, or `-` for CSL-JSON on stdin
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Line ending for text output
        #[arg(long, value_enum, default_value_t = Ending::Lf)]
        line_ending: Ending,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Format {
    Text,
    Object,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Ending {
    Lf,
    Crlf,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Text => write!(f, "text"),
            Format::Object => write!(f, "object"),
        }
    }
}

impl std::fmt::Display for Ending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ending::Lf => write!(f, "lf"),
            Ending::Crlf => write!(f, "crlf"),
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { input, pretty } => {
            let records = if is_stdin(&input) {
                read_stdin().map(|text| codec::parse_file(&text))
            } else {
                io::load_records(&input)
            };
            let records = match records {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("Error reading {}: {}", input.display(), e);
                    std::process::exit(1);
                }
            };
            tracing::info!(records = records.len(), "parsed refer input");

            let items = match Translator::default().translate_records(&records) {
                Ok(items) => items,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            };

            let json = if pretty {
                serde_json::to_string_pretty(&items)
            } else {
                serde_json::to_string(&items)
            };
            match json {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error writing JSON: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Format {
            input,
            format,
            line_ending,
        } => {
            let items = if is_stdin(&input) {
                read_stdin().and_then(|content| io::parse_items(&content, "json"))
            } else {
                io::load_items(&input)
            };
            let items = match items {
                Ok(items) => items,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            };

            let options = FormatOptions {
                format: match format {
                    Format::Text => OutputFormat::Text,
                    Format::Object => OutputFormat::Object,
                },
                line_ending: match line_ending {
                    Ending::Lf => LineEnding::Lf,
                    Ending::Crlf => LineEnding::CrLf,
                },
            };

            match csl_refer::format(&items, &options) {
                Ok(Formatted::Text(text)) => print!("{}", text),
                Ok(Formatted::Records(records)) => {
                    match serde_json::to_string_pretty(&records) {
                        Ok(json) => println!("{}", json),
                        Err(e) => {
                            eprintln!("Error writing JSON: {}", e);
                            std::process::exit(1);
                        }
                    }
                }
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read stdin as text, replacing invalid UTF-8 the way file loading does.
fn read_stdin() -> csl_refer::Result<String> {
    let mut bytes = Vec::new();
    std::io::stdin().read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
