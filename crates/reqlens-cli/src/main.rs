//! Reqlens CLI - Command-line interface for decoding captured requests

mod mcp;

use clap::{Parser, Subcommand, ValueEnum};
use reqlens::samples::{demo_input, DEMO_INPUTS};
use reqlens::{
    explain, restore_panels, share_query, utf16_len, DecodeRequest, DecodeResult, Tool,
    TOOL_LLMTXT,
};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

/// Output format for decode subcommand
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Markdown with YAML frontmatter
    #[default]
    Md,
    /// JSON format
    Json,
}

/// Reqlens - decode captured search API requests
#[derive(Parser, Debug)]
#[command(name = "reqlens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print full help with examples (llmtxt)
    #[arg(long)]
    llmtxt: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run as MCP (Model Context Protocol) server over stdio
    Mcp,
    /// Decode a transcript or JSON body (reads stdin when INPUT is omitted)
    Decode {
        /// Raw transcript or JSON body
        input: Option<String>,

        #[command(flatten)]
        decode: DecodeArgs,
    },
    /// Decode one of the built-in demo inputs
    Demo {
        /// Demo index, wraps around
        #[arg(default_value_t = 0)]
        index: usize,

        #[command(flatten)]
        decode: DecodeArgs,
    },
    /// Build a shareable query string from one or more inputs
    Share {
        /// Panel inputs, in order
        #[arg(required = true)]
        inputs: Vec<String>,
    },
    /// Print the inputs stored in a shareable query string
    Restore {
        /// Query string, with or without the leading `?`
        query: String,
    },
    /// Break text into UTF-16 code units
    Explain {
        /// Text to explain
        text: String,
    },
}

/// Options shared by the decoding subcommands
#[derive(clap::Args, Debug)]
struct DecodeArgs {
    /// Output format
    #[arg(long, short, default_value = "md")]
    output: OutputFormat,

    /// Key whose string values are expanded as query strings
    #[arg(long)]
    params_key: Option<String>,

    /// Base URL used when the input has no URL argument
    #[arg(long)]
    base_url: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Handle --llmtxt flag
    if cli.llmtxt {
        writeln_safe(TOOL_LLMTXT);
        std::process::exit(0);
    }

    match cli.command {
        Some(Commands::Mcp) => {
            mcp::run_server();
        }
        Some(Commands::Decode { input, decode }) => {
            let input = input.unwrap_or_else(read_stdin);
            run_decode(&input, decode);
        }
        Some(Commands::Demo { index, decode }) => {
            tracing::debug!(index, total = DEMO_INPUTS.len(), "Decoding demo input");
            run_decode(demo_input(index), decode);
        }
        Some(Commands::Share { inputs }) => {
            writeln_safe(&share_query(&inputs));
        }
        Some(Commands::Restore { query }) => {
            for (idx, panel) in restore_panels(&query).iter().enumerate() {
                writeln_safe(&format!("[{}] {}", idx, panel));
            }
        }
        Some(Commands::Explain { text }) => {
            writeln_safe(&format_explain(&text));
        }
        None => {
            eprintln!("Usage: reqlens decode <INPUT>");
            eprintln!("   or: reqlens mcp");
            eprintln!("   or: reqlens --help");
            std::process::exit(1);
        }
    }
}

fn read_stdin() -> String {
    let mut buffer = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buffer) {
        eprintln!("Error reading stdin: {}", e);
        std::process::exit(1);
    }
    buffer.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string()
}

fn run_decode(input: &str, args: DecodeArgs) {
    let mut builder = Tool::builder();

    if let Some(key) = args.params_key {
        builder = builder.params_key(key);
    }
    if let Some(url) = args.base_url {
        builder = builder.base_url(url);
    }

    let tool = builder.build();

    match tool.execute(DecodeRequest::new(input)) {
        Ok(result) => match args.output {
            OutputFormat::Md => writeln_safe(&format_md_with_frontmatter(&result)),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&result).unwrap_or_else(|e| {
                    eprintln!("Error serializing result: {}", e);
                    std::process::exit(1);
                });
                writeln_safe(&json);
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Format result as a JSON block with YAML frontmatter
fn format_md_with_frontmatter(result: &DecodeResult) -> String {
    let mut output = String::new();
    let credentials = &result.credentials;

    // Build frontmatter
    output.push_str("---\n");
    if let Some(ref app_id) = credentials.application_id {
        output.push_str(&format!("application_id: {}\n", app_id));
    }
    if let Some(ref api_key) = credentials.api_key {
        output.push_str(&format!("api_key: {}\n", api_key));
    }
    if !credentials.client_agent_tokens.is_empty() {
        output.push_str("client_agent:\n");
        for token in &credentials.client_agent_tokens {
            output.push_str(&format!("  - {}\n", token));
        }
    }
    output.push_str("---\n");

    let payload = serde_json::to_string_pretty(&result.payload)
        .unwrap_or_else(|_| result.payload.to_string());
    output.push_str("```json\n");
    output.push_str(&payload);
    output.push_str("\n```");

    if let Some(snippet) = result.search_snippet() {
        output.push_str("\n\n```js\n");
        output.push_str(&snippet);
        output.push_str("\n```");
    }

    output
}

/// Format the code units of `text` as a table
fn format_explain(text: &str) -> String {
    let mut output = String::from("binary             | code   | decimal | character\n");

    for unit in explain(text) {
        output.push_str(&format!(
            "{:<18} | {:<6} | {:<7} | {}\n",
            unit.binary.join(" "),
            unit.code,
            unit.decimal,
            unit.character
        ));
    }

    output.push_str(&format!("length: {}", utf16_len(text)));
    output
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
