pub mod backend;
pub mod reports;
pub mod scenarios;
pub mod tester;

pub use scenarios::{ScenarioCtx, list_scenarios};
pub use tester::{ScenarioResult, ScenarioTester};
