//! tagnest CLI - tag nesting validator
//!
//! Usage:
//!   tagnest <file>              Validate a file and print the report
//!   tagnest <file> --tokens     Also list every tag with its match status
//!   tagnest <file> --step       Replay validation step by step
//!   tagnest <file> -f json      Print the report as JSON
//!   tagnest --html '<p></b>'    Validate an inline string
//!   tagnest --sample            Validate the built-in sample document

mod render;
mod sample;

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::Value;
use tagnest_common::Source;
use tagnest_common::warning::{set_color, warn_once};
use tagnest_core::{Report, Step, analyze, steps};

use render::Paint;

/// tagnest - check that markup tags are properly opened, closed and nested
#[derive(Parser, Debug)]
#[command(name = "tagnest")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Validate a file
    tagnest page.html

    # Validate standard input
    cat page.html | tagnest -

    # Show every tag with its partner
    tagnest --tokens page.html

    # Replay the stack, pausing 500ms per step
    tagnest --step --delay 500 page.html

    # Machine-readable report
    tagnest --format json --html '<ul><li></ul>'
"#)]
struct Cli {
    /// Markup file to validate (`-` or nothing for stdin)
    #[arg(value_name = "FILE", conflicts_with_all = ["html", "sample"])]
    path: Option<PathBuf>,

    /// Validate this markup string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "sample")]
    html: Option<String>,

    /// Validate the built-in sample document
    #[arg(long)]
    sample: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// List every tag with its match status
    #[arg(short, long)]
    tokens: bool,

    /// Replay validation one step at a time
    #[arg(short, long)]
    step: bool,

    /// Pause between replayed steps, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 0, requires = "step")]
    delay: u64,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl Cli {
    fn source(&self) -> Source {
        if self.sample {
            Source::Inline(sample::SAMPLE_DOCUMENT.to_string())
        } else if let Some(html) = &self.html {
            Source::Inline(html.clone())
        } else {
            Source::from_path_arg(self.path.clone())
        }
    }
}

/// How a run ended, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Every tag is properly matched and nested.
    Valid,
    /// The report has at least one error.
    Invalid,
    /// Nothing to validate: blank input, no tags, or the source could not be read.
    Unusable,
}

impl Outcome {
    fn of(report: &Report) -> Self {
        if report.is_valid() {
            Self::Valid
        } else {
            Self::Invalid
        }
    }

    const fn code(self) -> u8 {
        match self {
            Self::Valid => 0,
            Self::Invalid => 1,
            Self::Unusable => 2,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        Self::from(outcome.code())
    }
}

fn main() -> ExitCode {
    match run(&Cli::parse()) {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            eprintln!("Error: {err:#}");
            Outcome::Unusable.into()
        }
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    let paint = Paint {
        color: !cli.no_color,
    };
    set_color(paint.color);

    let source = cli.source();
    let text = source
        .load()
        .with_context(|| format!("could not load {}", source.display_name()))?;

    let report = match analyze(&text) {
        Ok(report) => report,
        Err(empty) => {
            eprintln!("Error: {empty}");
            return Ok(Outcome::Unusable);
        }
    };

    warn_self_closing(&report);

    match cli.format {
        Format::Json => {
            let value = json_report(&report, cli.step)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Format::Text => {
            if cli.step {
                print_steps(&report, Duration::from_millis(cli.delay), paint);
            }
            print!(
                "{}",
                render::render_report(&report, &source.display_name(), cli.tokens, paint)
            );
        }
    }

    Ok(Outcome::of(&report))
}

/// The serialized report, with the full step replay under `steps` when asked.
fn json_report(report: &Report, with_steps: bool) -> serde_json::Result<Value> {
    let mut value = serde_json::to_value(report)?;
    if with_steps {
        let replay: Vec<Step> = steps(&report.tokens).collect();
        value["steps"] = serde_json::to_value(replay)?;
    }
    Ok(value)
}

/// Names of tags written as `<name/>`, once each, in order of first appearance.
fn self_closing_names(report: &Report) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for token in report.tokens.iter().filter(|token| token.looks_self_closing()) {
        if !names.contains(&token.name.as_str()) {
            names.push(&token.name);
        }
    }
    names
}

fn self_closing_message(name: &str) -> String {
    format!("'<{name}/>' is validated as an opening tag and will be reported as unclosed")
}

/// Tags written as `<name/>` are validated as opening tags.
fn warn_self_closing(report: &Report) {
    for name in self_closing_names(report) {
        warn_once("Tokenizer", &self_closing_message(name));
    }
}

fn print_steps(report: &Report, delay: Duration, paint: Paint) {
    println!("=== Steps ===");
    for step in steps(&report.tokens) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        println!("{}", render::render_step(&step, paint));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagnest_common::warning::has_warned;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tagnest").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Outcome::Valid.code(), 0);
        assert_eq!(Outcome::Invalid.code(), 1);
        assert_eq!(Outcome::Unusable.code(), 2);
    }

    #[test]
    fn test_run_outcomes() {
        let run_html =
            |html: &str| run(&cli(&["--no-color", "-f", "json", "--html", html])).unwrap();
        assert_eq!(run_html("<a><b></b></a>"), Outcome::Valid);
        assert_eq!(run_html("<a></b>"), Outcome::Invalid);
        assert_eq!(run_html("   \n "), Outcome::Unusable);
        assert_eq!(run_html("no tags here"), Outcome::Unusable);
        assert_eq!(run(&cli(&["--no-color", "--sample"])).unwrap(), Outcome::Valid);
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let err = run(&cli(&["--no-color", "/nonexistent/tagnest/page.html"])).unwrap_err();
        assert!(format!("{err:#}").contains("could not load /nonexistent/tagnest/page.html"));
    }

    #[test]
    fn test_json_steps_only_when_stepping() {
        let report = analyze("<a><b></a>").unwrap();

        let plain = json_report(&report, false).unwrap();
        assert!(plain.get("steps").is_none());
        assert_eq!(plain["counts"]["total"], 3);

        let stepped = json_report(&report, true).unwrap();
        let replay = stepped["steps"].as_array().unwrap();
        // Three tokens, then two unclosed tags unwound.
        assert_eq!(replay.len(), 5);
        assert_eq!(replay[0]["number"], 1);
        assert_eq!(replay[0]["stack"], serde_json::json!(["a"]));
        assert_eq!(stepped["errors"], plain["errors"]);
    }

    #[test]
    fn test_self_closing_warned_once_per_name() {
        let report = analyze("<p><br/>a<br/>b<hr /><img></p><br/>").unwrap();
        assert_eq!(self_closing_names(&report), vec!["br", "hr"]);

        warn_self_closing(&report);
        assert!(has_warned("Tokenizer", &self_closing_message("br")));
        assert!(has_warned("Tokenizer", &self_closing_message("hr")));
        assert!(!has_warned("Tokenizer", &self_closing_message("img")));
    }
}
