//! Per-role generation budgets from TOML (`[budget]` section)

use council_application::{GenerationParams, RoleParams};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout, token cap and temperature for one role
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FileRoleBudget {
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl From<&GenerationParams> for FileRoleBudget {
    fn from(p: &GenerationParams) -> Self {
        Self {
            timeout_secs: p.timeout.as_secs(),
            max_tokens: p.max_tokens,
            temperature: p.temperature,
        }
    }
}

impl From<&FileRoleBudget> for GenerationParams {
    fn from(b: &FileRoleBudget) -> Self {
        GenerationParams::new(Duration::from_secs(b.timeout_secs), b.max_tokens, b.temperature)
    }
}

/// ```toml
/// [budget.judge]
/// timeout_secs = 60
/// max_tokens = 900
/// temperature = 0.2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBudgetConfig {
    pub draft: FileRoleBudget,
    pub rank: FileRoleBudget,
    pub judge: FileRoleBudget,
    pub polish: FileRoleBudget,
}

impl Default for FileBudgetConfig {
    fn default() -> Self {
        let params = RoleParams::default();
        Self {
            draft: (&params.draft).into(),
            rank: (&params.rank).into(),
            judge: (&params.judge).into(),
            polish: (&params.polish).into(),
        }
    }
}

impl FileBudgetConfig {
    pub fn to_role_params(&self) -> RoleParams {
        RoleParams {
            draft: (&self.draft).into(),
            rank: (&self.rank).into(),
            judge: (&self.judge).into(),
            polish: (&self.polish).into(),
        }
    }
}
