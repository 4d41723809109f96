//! Command-line front end for `diffattr-core`.
//!
//! Loads a reference and a test document (JSON by default, YAML with
//! `--yaml`), compares them and prints one line per difference. The exit
//! status tells scripts whether the documents differ.

use std::ffi::OsString;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use diffattr_core::{compare, render_differences, render_json, ReportConfig, Value};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const EXIT_SAME: i32 = 0;
const EXIT_DIFFERENT: i32 = 1;
const EXIT_ERROR: i32 = 2;

const AFTER_HELP: &str = "\
When TEST is omitted the test document is read from STDIN.
Exit status is 0 when the documents match, 1 when they differ and 2 on error.

Examples:
  diffattr expected.json actual.json
  cat actual.json | diffattr expected.json
  diffattr --yaml --format json expected.yaml actual.yaml";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    /// `Path: <path>, Ref: <ref>, Test: <test>` lines.
    #[default]
    Text,
    /// JSON array of `{"path", "ref", "test"}` objects.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "diffattr",
    version,
    about = "Print the structural differences between two JSON or YAML documents.",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Render differing values using ANSI colors (text format only).
    #[arg(long = "color", action = ArgAction::SetTrue)]
    color: bool,

    /// Select the output format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write output to FILE instead of STDOUT.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Read YAML instead of JSON.
    #[arg(long = "yaml", action = ArgAction::SetTrue)]
    yaml: bool,

    /// Increase log verbosity on STDERR (-v debug, -vv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Reference document followed by an optional test document.
    #[arg(value_name = "REF [TEST]", num_args = 1..=2, required = true)]
    inputs: Vec<OsString>,
}

fn main() {
    let code = match try_main() {
        Ok(code) => code,
        Err(err) => {
            let _ = writeln!(io::stderr(), "diffattr: {err:#}");
            EXIT_ERROR
        }
    };
    std::process::exit(code);
}

fn try_main() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    run(&cli)
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let (first, second) = input_sources(&cli.inputs)?;

    let reference_text = read_input(&first)?;
    let test_text = read_input(&second)?;
    let reference =
        parse_value(&reference_text, cli.yaml).context("failed to parse reference document")?;
    let test = parse_value(&test_text, cli.yaml).context("failed to parse test document")?;

    let (rendered, have_differences) = render(cli, &reference, &test)?;

    if let Some(path) = &cli.output {
        fs::write(path, rendered.as_bytes())
            .with_context(|| format!("failed to write output to {}", path.display()))?;
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
    }

    Ok(if have_differences { EXIT_DIFFERENT } else { EXIT_SAME })
}

fn render(cli: &Cli, reference: &Value, test: &Value) -> Result<(String, bool)> {
    let differences = compare(reference, test)
        .collect::<Result<Vec<_>, _>>()
        .context("comparison failed")?;
    debug!(differences = differences.len(), format = ?cli.format, "rendering output");

    let rendered = match cli.format {
        OutputFormat::Text => {
            let config = ReportConfig::new().with_color(cli.color);
            render_differences(&differences, &config)
                .map(|mut report| {
                    report.push('\n');
                    report
                })
                .unwrap_or_default()
        }
        OutputFormat::Json => {
            let mut json = render_json(&differences).context("failed to serialize differences")?;
            json.push('\n');
            json
        }
    };
    Ok((rendered, !differences.is_empty()))
}

#[derive(Debug, PartialEq)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

fn input_sources(inputs: &[OsString]) -> Result<(InputSource, InputSource)> {
    match inputs {
        [reference] => Ok((InputSource::File(path_from(reference)?), InputSource::Stdin)),
        [reference, test] => {
            Ok((InputSource::File(path_from(reference)?), InputSource::File(path_from(test)?)))
        }
        _ => bail!("expected REF and an optional TEST document, got {} inputs", inputs.len()),
    }
}

fn path_from(input: &OsString) -> Result<PathBuf> {
    let path = PathBuf::from(input);
    if path.as_os_str().is_empty() {
        bail!("expected file path; got empty string");
    }
    Ok(path)
}

fn read_input(source: &InputSource) -> Result<String> {
    match source {
        InputSource::File(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("failed to read STDIN")?;
            Ok(buffer)
        }
    }
}

fn parse_value(input: &str, yaml: bool) -> Result<Value> {
    let value = if yaml { Value::from_yaml_str(input)? } else { Value::from_json_str(input)? };
    Ok(value)
}
