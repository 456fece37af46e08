use std::time::{Duration, Instant};

use colored::Colorize;
use serde::Serialize;

use super::scenarios::{Scenario, ScenarioCtx};

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub description: String,
    pub passed: bool,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl ScenarioResult {
    #[must_use]
    pub fn unknown(key: &str) -> Self {
        Self {
            scenario_name: key.to_string(),
            description: String::new(),
            passed: false,
            failures: vec![format!("unknown scenario {key:?}")],
            duration: Duration::ZERO,
        }
    }
}

pub struct ScenarioTester<'a> {
    ctx: ScenarioCtx<'a>,
}

impl<'a> ScenarioTester<'a> {
    #[must_use]
    pub const fn new(ctx: ScenarioCtx<'a>) -> Self {
        Self { ctx }
    }

    pub async fn run_scenario(&self, scenario: Scenario) -> ScenarioResult {
        if self.ctx.verbose {
            println!("▶ {}", scenario.key().bold());
        }
        let start = Instant::now();
        let outcome = scenario.run(&self.ctx).await;
        let duration = start.elapsed();

        let failures = match outcome {
            Ok(()) => {
                println!("✅ {} - {duration:?}", scenario.key().green());
                Vec::new()
            }
            Err(err) => {
                eprintln!("❌ {} - {duration:?}: {err:#}", scenario.key().red());
                vec![format!("{err:#}")]
            }
        };

        ScenarioResult {
            scenario_name: scenario.key().to_string(),
            description: scenario.description().to_string(),
            passed: failures.is_empty(),
            failures,
            duration,
        }
    }

    /// Run `keys` in order. Unknown keys are reported as failed results.
    pub async fn run_all(&self, keys: &[String]) -> Vec<ScenarioResult> {
        let mut results = Vec::with_capacity(keys.len());
        for key in keys {
            match Scenario::from_key(key) {
                Some(scenario) => results.push(self.run_scenario(scenario).await),
                None => {
                    eprintln!("⚠️  Unknown scenario: {}", key.yellow());
                    results.push(ScenarioResult::unknown(key));
                }
            }
        }
        results
    }
}

mod duration_serde {
    use serde::{Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }
}
