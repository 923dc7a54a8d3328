use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub generate: GenerateConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Where the plan and recommendation endpoints live
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_plan_path")]
    pub plan_path: String,

    #[serde(default = "default_recommend_path")]
    pub recommend_path: String,

    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            plan_path: default_plan_path(),
            recommend_path: default_recommend_path(),
            timeout_sec: default_timeout_sec(),
        }
    }
}

impl ServerConfig {
    pub fn plan_url(&self) -> String {
        join_url(&self.base_url, &self.plan_path)
    }

    pub fn recommend_url(&self) -> String {
        join_url(&self.base_url, &self.recommend_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Backoff for plan fetches. Recommendation requests are never retried.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct GenerateConfig {
    /// Hour cap selected when a session starts
    #[serde(default = "default_max_hours")]
    pub max_hours: u32,

    /// Choices offered by the hour-cap selector, in display order
    #[serde(default = "default_hour_caps")]
    pub hour_caps: Vec<u32>,

    /// Restrict results to sections with known scheduled times
    #[serde(default = "default_true")]
    pub use_offered: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            max_hours: default_max_hours(),
            hour_caps: default_hour_caps(),
            use_offered: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct DisplayConfig {
    #[serde(default = "default_density")]
    pub density: Density,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            density: default_density(),
        }
    }
}

/// Display density: comfortable shows every group expanded, compact collapses them
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    #[default]
    Comfortable,
    Compact,
}

impl Density {
    pub fn toggle(self) -> Self {
        match self {
            Density::Comfortable => Density::Compact,
            Density::Compact => Density::Comfortable,
        }
    }
}

impl std::fmt::Display for Density {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Density::Comfortable => write!(f, "comfortable"),
            Density::Compact => write!(f, "compact"),
        }
    }
}

impl std::str::FromStr for Density {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "comfortable" | "expanded" => Ok(Density::Comfortable),
            "compact" | "collapsed" => Ok(Density::Compact),
            _ => Err(format!("Unknown density: {}", s)),
        }
    }
}
