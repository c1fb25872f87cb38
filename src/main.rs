use std::error::Error;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;
use tracing::Level;

use stylestats::core::{ParsedData, StyleStats, StyleStatsOptions};
use stylestats::env::{self, EnvVar};
use stylestats::parsers::css::Declaration;
use stylestats::utils::url::is_url_and_has_protocol;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "stylestats",
    version,
    about = "Collects stylesheets from pages, files and snippets and reports CSS statistics"
)]
struct Cli {
    /// URLs of HTML pages or stylesheets, or paths to local CSS files
    inputs: Vec<String>,

    /// Literal CSS to include (may be repeated)
    #[arg(short = 's', long = "style", value_name = "CSS")]
    styles: Vec<String>,

    /// Extra request header (may be repeated)
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
    headers: Vec<String>,

    /// Set custom User-Agent string
    #[arg(short = 'u', long)]
    user_agent: Option<String>,

    /// Adjust network request timeout
    #[arg(short = 't', long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Do not request compressed responses
    #[arg(long)]
    no_compression: bool,

    /// Allow invalid X.509 (TLS) certificates
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Report format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Print supported environment variables and exit
    #[arg(long)]
    env_docs: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    css_files: usize,
    style_elements: usize,
    css_size: usize,
    rules: usize,
    selectors: usize,
    declarations: usize,
    media_queries: usize,
    selector_list: &'a [String],
    declaration_list: &'a [Declaration],
}

impl<'a> From<&'a ParsedData> for Report<'a> {
    fn from(parsed_data: &'a ParsedData) -> Self {
        Report {
            css_files: parsed_data.css_files,
            style_elements: parsed_data.style_elements,
            css_size: parsed_data.css_size,
            rules: parsed_data.rules.len(),
            selectors: parsed_data.selectors.len(),
            declarations: parsed_data.declarations.len(),
            media_queries: parsed_data.media_queries,
            selector_list: &parsed_data.selectors,
            declaration_list: &parsed_data.declarations,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.env_docs {
        print!("{}", env::generate_env_docs());
        return;
    }

    init_logging(cli.verbose);

    if cli.inputs.is_empty() && cli.styles.is_empty() {
        eprintln!("Error: no input given (pass URLs, CSS files or --style)");
        process::exit(2);
    }

    let options = match build_options(&cli) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {message}");
            process::exit(2);
        }
    };

    let (urls, files): (Vec<String>, Vec<String>) = cli
        .inputs
        .iter()
        .cloned()
        .partition(|input| is_url_and_has_protocol(input));
    let files: Vec<PathBuf> = files.into_iter().map(PathBuf::from).collect();

    let stylestats = StyleStats::new(urls, files, cli.styles.clone(), options);

    match stylestats.parse().await {
        Ok(parsed_data) => print_report(&parsed_data, cli.format),
        Err(error) => {
            eprintln!("Error: {error}");
            let mut source = error.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            process::exit(1);
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => env::core::LogLevel::get()
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Environment variables first, command-line flags on top
fn build_options(cli: &Cli) -> Result<StyleStatsOptions, String> {
    let mut options = StyleStatsOptions::from_env().map_err(|e| e.to_string())?;

    for header in &cli.headers {
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| format!("header {header:?} must look like \"Name: value\""))?;
        options
            .request
            .headers
            .push((name.trim().to_string(), value.trim().to_string()));
    }

    if let Some(user_agent) = &cli.user_agent {
        options.request.user_agent = Some(user_agent.clone());
    }
    if let Some(timeout) = cli.timeout {
        options.request.timeout = (timeout > 0).then(|| Duration::from_secs(timeout));
    }
    if cli.no_compression {
        options.request.compression = false;
    }
    if cli.insecure {
        options.request.insecure = true;
    }

    Ok(options)
}

fn print_report(parsed_data: &ParsedData, format: OutputFormat) {
    let report = Report::from(parsed_data);

    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: failed to serialize report: {e}");
                process::exit(1);
            }
        },
        OutputFormat::Text => {
            println!("{:<16}{}", "Stylesheets", report.css_files);
            println!("{:<16}{}", "Style Elements", report.style_elements);
            println!("{:<16}{}", "Size", format_size(report.css_size));
            println!("{:<16}{}", "Rules", report.rules);
            println!("{:<16}{}", "Selectors", report.selectors);
            println!("{:<16}{}", "Declarations", report.declarations);
            println!("{:<16}{}", "Media Queries", report.media_queries);
        }
    }
}

fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else {
        format!("{:.1} KB ({bytes} B)", bytes as f64 / 1024.0)
    }
}
