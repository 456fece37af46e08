mod common;
mod logic;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use common::{Fixture, report_timestamp, split_csv};
use logic::reports::{
    RunInfo, generate_console_report, generate_json_report, generate_markdown_report,
};
use logic::{ScenarioCtx, ScenarioResult, ScenarioTester, list_scenarios};

#[derive(Debug, Parser)]
#[command(name = "parsa-tester", version = "0.1.0")]
#[command(
    about = "Headless QA scenarios for the Parsa site - routing, loading and admin flows against fixture data"
)]
struct Args {
    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Fixture JSON to serve instead of the built-in catalog
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let (fixture, fixture_label) = load_fixture(&args)?;
    let scenarios = expand_scenarios(&args.scenarios);
    log::info!("running {} scenarios against {fixture_label}", scenarios.len());

    let tester = ScenarioTester::new(ScenarioCtx {
        fixture: &fixture,
        verbose: args.verbose,
    });
    let results = tester.run_all(&scenarios).await;

    let info = RunInfo {
        generated_at: report_timestamp(Utc::now()),
        fixture: fixture_label,
    };
    write_reports(&args, &info, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎓 Parsa Scenario Tester".bright_cyan().bold());
    println!("{}", "========================".cyan());
}

fn load_fixture(args: &Args) -> Result<(Fixture, String)> {
    match &args.fixture {
        Some(path) => {
            let fixture = Fixture::load(path)
                .with_context(|| format!("loading fixture {}", path.display()))?;
            Ok((fixture, path.display().to_string()))
        }
        None => Ok((
            Fixture::builtin().context("built-in fixture")?,
            "builtin".to_string(),
        )),
    }
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for (key, _) in list_scenarios() {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push(key.to_string());
            }
        }
    }
    scenarios
}

fn write_reports(
    args: &Args,
    info: &RunInfo,
    results: &[ScenarioResult],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => generate_json_report(&mut output_target, info, results)?,
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Parsa Scenario Results\n\n_No scenarios executed._"
                )?;
            } else {
                generate_markdown_report(&mut output_target, info, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                generate_console_report(&mut output_target, info, results, start_time.elapsed())?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
