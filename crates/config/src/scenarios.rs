//! Scenario file loading and selection

use std::path::Path;

use rand::seq::SliceRandom;
use tracing::info;

use hotel_eval_core::{Scenario, ScenarioFile};

use crate::ConfigError;

/// Which scenarios out of a loaded file to run
#[derive(Debug, Clone)]
pub enum ScenarioSelection {
    /// Every scenario in file order
    All,
    /// Only the scenarios with these ids, in file order
    ByIds(Vec<String>),
    /// A random sample of up to `n` scenarios
    Random(usize),
}

/// Load scenario definitions from a JSON file.
pub fn load_scenarios(path: impl AsRef<Path>) -> Result<Vec<Scenario>, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let file: ScenarioFile = serde_json::from_str(&raw)?;
    info!(
        path = %path.display(),
        count = file.scenarios.len(),
        "loaded scenario definitions"
    );
    Ok(file.scenarios)
}

/// Pick the scenarios to run out of a loaded set.
pub fn select_scenarios(
    all: Vec<Scenario>,
    selection: &ScenarioSelection,
) -> Result<Vec<Scenario>, ConfigError> {
    match selection {
        ScenarioSelection::All => Ok(all),
        ScenarioSelection::ByIds(ids) => {
            for id in ids {
                if !all.iter().any(|s| &s.id == id) {
                    return Err(ConfigError::ScenarioNotFound(id.clone()));
                }
            }
            Ok(all.into_iter().filter(|s| ids.contains(&s.id)).collect())
        }
        ScenarioSelection::Random(count) => {
            let mut rng = rand::thread_rng();
            let n = (*count).min(all.len());
            Ok(all.choose_multiple(&mut rng, n).cloned().collect())
        }
    }
}
