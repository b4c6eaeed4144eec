//! Top-level matching
//!
//! A match succeeds only when the committed evaluation of the expression,
//! started at position 0, ends exactly at the end of the input.

use tracing::debug;

use crate::config::MatchConfig;
use crate::error::MatchResult;
use crate::expr::Expr;
use crate::trampoline::eval_trampoline;

/// Runs expressions against inputs under a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    pub fn new(config: MatchConfig) -> Self {
        Matcher { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Position where the committed match of `expr` from 0 ends, if any
    pub fn find_end(&self, expr: &Expr, input: &str) -> MatchResult<Option<usize>> {
        let (end, stats) = eval_trampoline(expr, input, &self.config)?;
        debug!(
            target: "trampex::matcher",
            ?end,
            len = input.len(),
            steps = stats.steps,
            peak_depth = stats.peak_depth,
            "match attempt"
        );
        Ok(end)
    }

    /// Whether `expr` consumes all of `input`
    pub fn is_match(&self, expr: &Expr, input: &str) -> MatchResult<bool> {
        Ok(self.find_end(expr, input)? == Some(input.len()))
    }
}

impl Expr {
    /// Whether this expression matches the whole of `input`.
    ///
    /// Uses the default configuration: zero-width repetitions stop as soon as
    /// an iteration fails to advance, and there is no step limit, so this
    /// always terminates.
    pub fn matches(&self, input: &str) -> bool {
        matches!(Matcher::default().is_match(self, input), Ok(true))
    }
}
