//! Match configuration
//!
//! Settings are plain data with serde support, so they can come from the
//! `[config]` table of a pattern file, from environment variables, or be
//! built directly in code.

use serde::Deserialize;

use crate::error::MatchResult;

/// Environment variable overriding [`MatchConfig::max_steps`]
pub const MAX_STEPS_ENV: &str = "TRAMPEX_MAX_STEPS";
/// Environment variable overriding [`MatchConfig::zero_width`] (`guard` or `faithful`)
pub const ZERO_WIDTH_ENV: &str = "TRAMPEX_ZERO_WIDTH";

/// How a repetition reacts when one more iteration succeeds without advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroWidthPolicy {
    /// Stop repeating once an iteration ends where it started.
    ///
    /// This is a deliberate behavioural change from the plain algorithm, in
    /// which a repeat whose body can match the empty string never terminates.
    #[default]
    Guard,
    /// Keep repeating regardless of progress. A repeat over an empty-matching
    /// body then loops until a step limit stops it, or forever without one.
    Faithful,
}

impl ZeroWidthPolicy {
    fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "guard" => Some(ZeroWidthPolicy::Guard),
            "faithful" => Some(ZeroWidthPolicy::Faithful),
            _ => None,
        }
    }
}

/// Configuration for the matcher
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Zero-width repetition handling
    pub zero_width: ZeroWidthPolicy,
    /// Maximum number of driver steps before giving up (unbounded if `None`)
    pub max_steps: Option<u64>,
}

impl MatchConfig {
    /// Defaults overlaid with `TRAMPEX_MAX_STEPS` and `TRAMPEX_ZERO_WIDTH`.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Overlay `TRAMPEX_MAX_STEPS` and `TRAMPEX_ZERO_WIDTH` onto this
    /// configuration. Values that do not parse are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(MAX_STEPS_ENV).ok().as_deref(),
            std::env::var(ZERO_WIDTH_ENV).ok().as_deref(),
        )
    }

    fn with_overrides(mut self, max_steps: Option<&str>, zero_width: Option<&str>) -> Self {
        if let Some(limit) = max_steps.and_then(|s| s.trim().parse().ok()) {
            self.max_steps = Some(limit);
        }
        if let Some(policy) = zero_width.and_then(ZeroWidthPolicy::parse) {
            self.zero_width = policy;
        }
        self
    }

    /// Parse a configuration from TOML content.
    pub fn parse_toml(content: &str) -> MatchResult<Self> {
        Ok(toml::from_str(content)?)
    }
}
