use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::ScenarioResult;

/// Run metadata shared by every report format.
#[derive(Debug, Clone, Serialize)]
pub struct RunInfo {
    pub generated_at: String,
    pub fixture: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    info: &'a RunInfo,
    passed: usize,
    failed: usize,
    results: &'a [ScenarioResult],
}

fn tally(results: &[ScenarioResult]) -> (usize, usize) {
    let passed = results.iter().filter(|r| r.passed).count();
    (passed, results.len() - passed)
}

#[allow(clippy::cast_precision_loss)]
fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (passed as f64 / total as f64) * 100.0
}

pub fn generate_console_report(
    out: &mut dyn Write,
    info: &RunInfo,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    let (passed, failed) = tally(results);

    writeln!(out)?;
    writeln!(out, "{}", "📊 Scenario Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "===========================".cyan())?;
    writeln!(out, "Fixture: {}", info.fixture)?;
    writeln!(out, "Generated: {}", info.generated_at)?;
    writeln!(out, "Total scenarios: {}", results.len())?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", failed.to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(passed, results.len()))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{} {}", status, result.scenario_name.bold())?;
        if !result.description.is_empty() {
            writeln!(out, "   {}", result.description)?;
        }
        writeln!(out, "   Time: {:?}", result.duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    let fastest = results.iter().min_by_key(|r| r.duration);
    let slowest = results.iter().max_by_key(|r| r.duration);
    if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
        writeln!(out, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "=====================".yellow())?;
        writeln!(
            out,
            "Fastest: {} ({:?})",
            fastest.scenario_name.green(),
            fastest.duration
        )?;
        writeln!(
            out,
            "Slowest: {} ({:?})",
            slowest.scenario_name.yellow(),
            slowest.duration
        )?;
    }
    Ok(())
}

pub fn generate_json_report(
    out: &mut dyn Write,
    info: &RunInfo,
    results: &[ScenarioResult],
) -> Result<()> {
    let (passed, failed) = tally(results);
    let report = JsonReport {
        info,
        passed,
        failed,
        results,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(
    out: &mut dyn Write,
    info: &RunInfo,
    results: &[ScenarioResult],
) -> Result<()> {
    let (passed, failed) = tally(results);

    writeln!(out, "# Parsa Scenario Results\n")?;
    writeln!(out, "_Fixture `{}`, generated {}_\n", info.fixture, info.generated_at)?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {}", results.len())?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {failed}")?;
    writeln!(
        out,
        "- **Success rate**: {:.1}%\n",
        success_rate(passed, results.len())
    )?;

    writeln!(out, "## Detailed Results\n")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "### {} {}\n", status, result.scenario_name)?;
        if !result.description.is_empty() {
            writeln!(out, "{}\n", result.description)?;
        }
        writeln!(out, "- **Time**: {:?}", result.duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> RunInfo {
        RunInfo {
            generated_at: "2025-05-01T12:00:00Z".into(),
            fixture: "builtin".into(),
        }
    }

    fn results() -> Vec<ScenarioResult> {
        vec![
            ScenarioResult {
                scenario_name: "smoke".into(),
                description: "Load the catalog".into(),
                passed: true,
                failures: Vec::new(),
                duration: Duration::from_millis(3),
            },
            ScenarioResult {
                scenario_name: "club".into(),
                description: String::new(),
                passed: false,
                failures: vec!["member was not created".into()],
                duration: Duration::from_millis(9),
            },
        ]
    }

    #[test]
    fn json_report_carries_totals_and_metadata() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &info(), &results()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["passed"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["fixture"], "builtin");
        assert_eq!(value["results"][1]["failures"][0], "member was not created");
    }

    #[test]
    fn markdown_report_lists_failures() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &info(), &results()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("# Parsa Scenario Results"));
        assert!(text.contains("### ❌ club"));
        assert!(text.contains("  - member was not created"));
        assert!(text.contains("- **Success rate**: 50.0%"));
    }

    #[test]
    fn console_report_names_fastest_and_slowest() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &info(), &results(), Duration::from_millis(12)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Fastest: smoke"));
        assert!(text.contains("Slowest: club"));
        assert!(text.contains("❌ FAIL club"));
    }

    #[test]
    fn empty_runs_do_not_divide_by_zero() {
        assert!(success_rate(0, 0).abs() < f64::EPSILON);
    }
}
