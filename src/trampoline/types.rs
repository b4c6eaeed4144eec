//! Trampoline Types for Iterative Matching
//!
//! Each `Continuation` variant is the state a native recursive matcher would
//! have kept on its stack frame while waiting for a subexpression to finish.
//! Continuations live in a `ContinuationStore` and link to their parent by
//! `ContId`, so the chain is a linked list on the heap rather than on the
//! call stack.

use crate::config::ZeroWidthPolicy;
use crate::expr::Expr;

/// Identifier of a continuation held in a `ContinuationStore`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContId(usize);

impl ContId {
    /// The terminal continuation; always present in every store
    pub const DONE: ContId = ContId(0);

    /// Slot index inside the owning store
    pub fn index(self) -> usize {
        self.0
    }
}

/// Work item representing the next unit of work for the driver
#[derive(Debug)]
pub enum WorkItem {
    /// Begin matching `expr` at `pos`, then resume `cont` with the outcome
    Eval { expr: Expr, pos: usize, cont: ContId },
    /// A subexpression finished with `result`; feed it to `cont`
    Resume { result: Option<usize>, cont: ContId },
    /// Terminal result of the whole computation
    Finished(Option<usize>),
}

/// Continuation representing what to do with a subexpression's result
#[derive(Debug)]
pub enum Continuation {
    /// Terminal; report the result
    Done,
    /// Left side of a concatenation matched or failed; `right` is still owed
    AfterConcat { right: Expr, next: ContId },
    /// First branch of an alternation finished; `second` is tried from `start` on failure
    AfterAlternate { second: Expr, start: usize, next: ContId },
    /// One repetition attempt finished; `node` is the whole repeat node
    AfterRepeat { node: Expr, last_good: usize, next: ContId },
}

impl Continuation {
    /// Produce the next unit of work from this continuation and an inner result
    pub fn resume(self, result: Option<usize>, zero_width: ZeroWidthPolicy) -> WorkItem {
        match (self, result) {
            (Continuation::Done, result) => WorkItem::Finished(result),

            (Continuation::AfterConcat { next, .. }, None) => WorkItem::Resume { result: None, cont: next },
            (Continuation::AfterConcat { right, next }, Some(pos)) => WorkItem::Eval {
                expr: right,
                pos,
                cont: next,
            },

            (Continuation::AfterAlternate { second, start, next }, None) => WorkItem::Eval {
                expr: second,
                pos: start,
                cont: next,
            },
            (Continuation::AfterAlternate { next, .. }, Some(pos)) => WorkItem::Resume {
                result: Some(pos),
                cont: next,
            },

            // Zero repetitions is always a success.
            (Continuation::AfterRepeat { last_good, next, .. }, None) => WorkItem::Resume {
                result: Some(last_good),
                cont: next,
            },
            (Continuation::AfterRepeat { last_good, next, .. }, Some(pos))
                if pos == last_good && zero_width == ZeroWidthPolicy::Guard =>
            {
                WorkItem::Resume { result: Some(pos), cont: next }
            }
            (Continuation::AfterRepeat { node, next, .. }, Some(pos)) => WorkItem::Eval {
                expr: node,
                pos,
                cont: next,
            },
        }
    }
}

/// Heap storage for the continuation chain
///
/// Slot 0 always holds `Done`. A continuation is resumed exactly once, so
/// `take` frees its slot for reuse; the store therefore grows with the depth
/// of unresolved enclosing expressions and not with the number of steps.
/// A freed slot is empty until the next `push`, and taking it again yields
/// `None`.
#[derive(Debug)]
pub struct ContinuationStore {
    slots: Vec<Option<Continuation>>,
    free: Vec<usize>,
    live: usize,
    peak: usize,
}

impl ContinuationStore {
    pub fn new() -> Self {
        ContinuationStore {
            slots: vec![Some(Continuation::Done)],
            free: Vec::new(),
            live: 0,
            peak: 0,
        }
    }

    /// Store a continuation and return its id
    pub fn push(&mut self, cont: Continuation) -> ContId {
        self.live += 1;
        self.peak = self.peak.max(self.live);
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(cont);
                ContId(index)
            }
            None => {
                self.slots.push(Some(cont));
                ContId(self.slots.len() - 1)
            }
        }
    }

    /// Remove a continuation so it can be resumed; `DONE` is never removed.
    ///
    /// Returns `None` when `id` was already taken or never issued by this store.
    pub fn take(&mut self, id: ContId) -> Option<Continuation> {
        if id == ContId::DONE {
            return Some(Continuation::Done);
        }
        let cont = self.slots.get_mut(id.0)?.take()?;
        self.live -= 1;
        self.free.push(id.0);
        Some(cont)
    }

    /// Number of pending, non-terminal continuations
    pub fn live(&self) -> usize {
        self.live
    }

    /// Highest number of pending continuations seen so far
    pub fn peak(&self) -> usize {
        self.peak
    }
}

impl Default for ContinuationStore {
    fn default() -> Self {
        Self::new()
    }
}
