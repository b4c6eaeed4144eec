//! Trampoline Engine - Iterative Matching
//!
//! This module contains the driver loop. It holds exactly one current
//! `WorkItem` and replaces it on every step, so native stack usage is
//! constant in both expression depth and repetition count. All logical
//! recursion is carried by the `ContinuationStore`.

use tracing::{debug, trace};

use crate::config::MatchConfig;
use crate::error::{MatchError, MatchResult};
use crate::expr::{Expr, ExprKind};

use super::types::{ContId, Continuation, ContinuationStore, WorkItem};

/// Counters collected while driving a match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveStats {
    /// Work items processed before the terminal result
    pub steps: u64,
    /// Largest number of continuations pending at once
    pub peak_depth: usize,
    /// Continuations still pending when the driver stopped; zero after a terminal result
    pub pending: usize,
}

/// Driver state for one match attempt against one input
#[derive(Debug)]
pub struct Trampoline<'a> {
    input: &'a str,
    config: MatchConfig,
    store: ContinuationStore,
    steps: u64,
}

impl<'a> Trampoline<'a> {
    pub fn new(input: &'a str, config: MatchConfig) -> Self {
        Trampoline {
            input,
            config,
            store: ContinuationStore::new(),
            steps: 0,
        }
    }

    /// Store a continuation so work items can refer to it
    pub fn push_continuation(&mut self, cont: Continuation) -> ContId {
        self.store.push(cont)
    }

    /// Run work items until one of them is `Finished`
    pub fn drive(&mut self, first: WorkItem) -> MatchResult<Option<usize>> {
        let mut work = first;
        loop {
            work = match work {
                WorkItem::Finished(result) => {
                    debug!(
                        target: "trampex::trampoline::engine",
                        ?result,
                        steps = self.steps,
                        peak_depth = self.store.peak(),
                        "drive finished"
                    );
                    return Ok(result);
                }
                WorkItem::Eval { expr, pos, cont } => {
                    self.tick()?;
                    trace!(target: "trampex::trampoline::engine", node = expr.kind().name(), pos, cont = cont.index(), "eval work item");
                    self.eval(expr, pos, cont)
                }
                WorkItem::Resume { result, cont } => {
                    self.tick()?;
                    trace!(target: "trampex::trampoline::engine", ?result, cont = cont.index(), "resume work item");
                    let Some(next) = self.store.take(cont) else {
                        return Err(MatchError::UnknownContinuation { id: cont.index() });
                    };
                    next.resume(result, self.config.zero_width)
                }
            };
        }
    }

    fn tick(&mut self) -> MatchResult<()> {
        if let Some(limit) = self.config.max_steps {
            if self.steps >= limit {
                debug!(target: "trampex::trampoline::engine", limit, "step limit reached");
                return Err(MatchError::StepLimitExceeded { limit });
            }
        }
        self.steps += 1;
        Ok(())
    }

    /// One evaluation step: either a leaf result or a descent into a child
    fn eval(&mut self, expr: Expr, pos: usize, cont: ContId) -> WorkItem {
        match expr.kind() {
            ExprKind::Concat(left, right) => {
                let next = self.store.push(Continuation::AfterConcat {
                    right: right.clone(),
                    next: cont,
                });
                WorkItem::Eval { expr: left.clone(), pos, cont: next }
            }
            ExprKind::Alternate(first, second) => {
                let next = self.store.push(Continuation::AfterAlternate {
                    second: second.clone(),
                    start: pos,
                    next: cont,
                });
                WorkItem::Eval { expr: first.clone(), pos, cont: next }
            }
            ExprKind::Repeat(inner) => {
                let inner = inner.clone();
                let next = self.store.push(Continuation::AfterRepeat {
                    node: expr,
                    last_good: pos,
                    next: cont,
                });
                WorkItem::Eval { expr: inner, pos, cont: next }
            }
            ExprKind::Literal(text) => {
                let matched = self
                    .input
                    .get(pos..)
                    .map_or(false, |rest| rest.starts_with(&**text));
                let result = matched.then(|| pos + text.len());
                WorkItem::Resume { result, cont }
            }
            ExprKind::Empty => WorkItem::Resume { result: None, cont },
        }
    }

    pub fn stats(&self) -> DriveStats {
        DriveStats {
            steps: self.steps,
            peak_depth: self.store.peak(),
            pending: self.store.live(),
        }
    }
}

/// Match `expr` from position 0 of `input` and return where the committed
/// match ended, together with the driver counters.
pub fn eval_trampoline(
    expr: &Expr,
    input: &str,
    config: &MatchConfig,
) -> MatchResult<(Option<usize>, DriveStats)> {
    let mut trampoline = Trampoline::new(input, config.clone());
    let end = trampoline.drive(WorkItem::Eval {
        expr: expr.clone(),
        pos: 0,
        cont: ContId::DONE,
    })?;
    Ok((end, trampoline.stats()))
}
