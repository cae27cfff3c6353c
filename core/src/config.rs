use crate::feedback::FeedbackParams;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Engine tunables. Every field is optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Result count when the caller does not ask for one.
    pub default_k: usize,
    pub feedback: FeedbackParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { default_k: 5, feedback: FeedbackParams::default() }
    }
}

impl EngineConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let buf = fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&buf)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_k == 0 {
            return Err(Error::InvalidArgument("default_k must be positive"));
        }
        let fb = &self.feedback;
        if ![fb.alpha, fb.beta, fb.threshold].iter().all(|v| v.is_finite()) {
            return Err(Error::InvalidArgument("feedback weights must be finite"));
        }
        Ok(())
    }
}
