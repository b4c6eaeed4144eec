//! Expression Grammar
//!
//! An immutable, structurally shared tree describing a regular expression.
//! Nodes are reference counted so combinators can embed existing
//! subexpressions without copying them. Every walk over the tree (printing,
//! measuring, dropping) uses an explicit stack, so a tree nested a million
//! levels deep is as safe to handle as a flat one.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

/// A node kind in the expression tree
#[derive(Clone)]
pub enum ExprKind {
    /// Always fails; never produces a position
    Empty,
    /// Matches exactly this text at the current position
    Literal(Arc<str>),
    /// Matches the left expression, then the right one where it ended
    Concat(Expr, Expr),
    /// Matches the first expression, or the second one if the first fails
    Alternate(Expr, Expr),
    /// Matches the inner expression zero or more times, greedily, without backtracking
    Repeat(Expr),
}

impl ExprKind {
    /// Short name of the variant, for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::Empty => "empty",
            ExprKind::Literal(_) => "literal",
            ExprKind::Concat(..) => "concat",
            ExprKind::Alternate(..) => "alternate",
            ExprKind::Repeat(_) => "repeat",
        }
    }
}

/// A shared handle to an immutable expression node
///
/// Cloning is O(1). There is no way to build a cyclic expression: every
/// combinator only refers to nodes that already exist.
///
/// Dropping is iterative: the handle that releases a node last detaches its
/// children onto a heap stack. A node whose last two handles are released at
/// the same moment on different threads may instead be freed by the default
/// drop glue, which recurses one level into its children before their own
/// iterative drop takes over.
#[derive(Clone)]
pub struct Expr(Arc<ExprKind>);

/// An expression that never matches
pub fn empty() -> Expr {
    Expr::new(ExprKind::Empty)
}

/// An expression that matches exactly `text`
pub fn literal(text: impl Into<Arc<str>>) -> Expr {
    Expr::new(ExprKind::Literal(text.into()))
}

impl Expr {
    fn new(kind: ExprKind) -> Self {
        Expr(Arc::new(kind))
    }

    /// See [`empty`]
    pub fn empty() -> Self {
        empty()
    }

    /// See [`literal`]
    pub fn literal(text: impl Into<Arc<str>>) -> Self {
        literal(text)
    }

    /// Match `self`, then `other` immediately after
    pub fn concat(&self, other: &Expr) -> Expr {
        Expr::new(ExprKind::Concat(self.clone(), other.clone()))
    }

    /// Match `self`; if it fails, match `other` from the same position
    pub fn alternate(&self, other: &Expr) -> Expr {
        Expr::new(ExprKind::Alternate(self.clone(), other.clone()))
    }

    /// Match `self` zero or more times
    pub fn repeat(&self) -> Expr {
        Expr::new(ExprKind::Repeat(self.clone()))
    }

    /// Postfix star, an alias for [`Expr::repeat`]
    pub fn star(&self) -> Expr {
        self.repeat()
    }

    /// The variant of this node
    pub fn kind(&self) -> &ExprKind {
        &self.0
    }

    /// Whether two handles refer to the same node
    pub fn ptr_eq(&self, other: &Expr) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Number of nodes reachable from this one, counting shared nodes once per reference
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: SmallVec<[&Expr; 16]> = SmallVec::new();
        stack.push(self);
        while let Some(expr) = stack.pop() {
            count += 1;
            match expr.kind() {
                ExprKind::Empty | ExprKind::Literal(_) => {}
                ExprKind::Concat(a, b) | ExprKind::Alternate(a, b) => {
                    stack.push(b);
                    stack.push(a);
                }
                ExprKind::Repeat(inner) => stack.push(inner),
            }
        }
        count
    }

    /// Length of the longest root-to-leaf path; a leaf has depth 1
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: SmallVec<[(&Expr, usize); 16]> = SmallVec::new();
        stack.push((self, 1));
        while let Some((expr, level)) = stack.pop() {
            deepest = deepest.max(level);
            match expr.kind() {
                ExprKind::Empty | ExprKind::Literal(_) => {}
                ExprKind::Concat(a, b) | ExprKind::Alternate(a, b) => {
                    stack.push((b, level + 1));
                    stack.push((a, level + 1));
                }
                ExprKind::Repeat(inner) => stack.push((inner, level + 1)),
            }
        }
        deepest
    }
}

impl From<&str> for Expr {
    fn from(text: &str) -> Self {
        literal(text)
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        // Detach children of uniquely owned nodes onto a heap stack so the
        // default drop glue never recurses more than one level.
        let mut pending: SmallVec<[Expr; 8]> = SmallVec::new();
        detach_children(&mut self.0, &mut pending);
        while let Some(mut expr) = pending.pop() {
            detach_children(&mut expr.0, &mut pending);
        }
    }
}

fn detach_children(node: &mut Arc<ExprKind>, out: &mut SmallVec<[Expr; 8]>) {
    let Some(kind) = Arc::get_mut(node) else {
        return;
    };
    match std::mem::replace(kind, ExprKind::Empty) {
        ExprKind::Concat(a, b) | ExprKind::Alternate(a, b) => {
            out.push(a);
            out.push(b);
        }
        ExprKind::Repeat(inner) => out.push(inner),
        ExprKind::Empty | ExprKind::Literal(_) => {}
    }
}

// Binding strength used to decide where parentheses are needed.
const PREC_ALTERNATE: u8 = 0;
const PREC_CONCAT: u8 = 1;
const PREC_REPEAT: u8 = 2;

fn precedence(kind: &ExprKind) -> u8 {
    match kind {
        ExprKind::Alternate(..) => PREC_ALTERNATE,
        ExprKind::Concat(..) => PREC_CONCAT,
        ExprKind::Repeat(_) => PREC_REPEAT,
        ExprKind::Empty | ExprKind::Literal(_) => PREC_REPEAT + 1,
    }
}

enum Piece<'a> {
    Node(&'a Expr, u8),
    Text(&'static str),
}

/// Compact notation: quoted literals, juxtaposition for concatenation,
/// `|` for alternation, postfix `*`, and `∅` for the empty expression.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: Vec<Piece<'_>> = vec![Piece::Node(self, PREC_ALTERNATE)];
        while let Some(piece) = stack.pop() {
            let (expr, min_prec) = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(expr, min_prec) => (expr, min_prec),
            };

            let prec = precedence(expr.kind());
            let parens = prec < min_prec;
            if parens {
                f.write_str("(")?;
                stack.push(Piece::Text(")"));
            }

            // Pieces are pushed in reverse output order.
            match expr.kind() {
                ExprKind::Empty => f.write_str("∅")?,
                ExprKind::Literal(text) => write!(f, "{:?}", text)?,
                ExprKind::Concat(a, b) => {
                    stack.push(Piece::Node(b, PREC_CONCAT + 1));
                    stack.push(Piece::Text(" "));
                    stack.push(Piece::Node(a, PREC_CONCAT));
                }
                ExprKind::Alternate(a, b) => {
                    stack.push(Piece::Node(b, PREC_ALTERNATE + 1));
                    stack.push(Piece::Text(" | "));
                    stack.push(Piece::Node(a, PREC_ALTERNATE));
                }
                ExprKind::Repeat(inner) => {
                    stack.push(Piece::Text("*"));
                    stack.push(Piece::Node(inner, PREC_REPEAT));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({})", self)
    }
}

impl fmt::Debug for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprKind::Empty => f.write_str("Empty"),
            ExprKind::Literal(text) => write!(f, "Literal({:?})", text),
            ExprKind::Concat(a, b) => write!(f, "Concat({}, {})", a, b),
            ExprKind::Alternate(a, b) => write!(f, "Alternate({}, {})", a, b),
            ExprKind::Repeat(inner) => write!(f, "Repeat({})", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_produce_expected_kinds() {
        assert!(matches!(empty().kind(), ExprKind::Empty));
        assert!(matches!(literal("ab").kind(), ExprKind::Literal(t) if &**t == "ab"));

        let a = literal("a");
        let b = literal("b");
        assert!(matches!(a.concat(&b).kind(), ExprKind::Concat(..)));
        assert!(matches!(a.alternate(&b).kind(), ExprKind::Alternate(..)));
        assert!(matches!(a.repeat().kind(), ExprKind::Repeat(_)));
        assert!(matches!(a.star().kind(), ExprKind::Repeat(_)));
    }

    #[test]
    fn test_combinators_share_subexpressions() {
        let a = literal("a");
        let both = a.concat(&a);
        match both.kind() {
            ExprKind::Concat(left, right) => {
                assert!(left.ptr_eq(&a));
                assert!(right.ptr_eq(&a));
            }
            other => panic!("expected Concat, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_literal_is_allowed() {
        assert!(matches!(literal("").kind(), ExprKind::Literal(t) if t.is_empty()));
    }

    #[test]
    fn test_node_count_and_depth() {
        let e = literal("Sca")
            .concat(&literal("la"))
            .concat(&literal("la").repeat());
        assert_eq!(e.node_count(), 6);
        assert_eq!(e.depth(), 3);
        assert_eq!(literal("x").depth(), 1);
    }

    #[test]
    fn test_display_notation() {
        let e = literal("Sca")
            .concat(&literal("la"))
            .concat(&literal("la").repeat());
        assert_eq!(e.to_string(), r#""Sca" "la" "la"*"#);

        let alt = literal("a").alternate(&literal("b")).repeat();
        assert_eq!(alt.to_string(), r#"("a" | "b")*"#);

        let right_nested = literal("a").concat(&literal("b").concat(&literal("c")));
        assert_eq!(right_nested.to_string(), r#""a" ("b" "c")"#);

        assert_eq!(empty().alternate(&literal("x")).to_string(), r#"∅ | "x""#);
        assert_eq!(literal("a").repeat().repeat().to_string(), r#""a"**"#);
    }

    #[test]
    fn test_debug_wraps_display() {
        assert_eq!(format!("{:?}", literal("q")), r#"Expr("q")"#);
    }

    #[test]
    fn test_deep_tree_drops_and_prints_iteratively() {
        let mut e = literal("a");
        for _ in 0..200_000 {
            e = e.concat(&literal("a"));
        }
        assert_eq!(e.depth(), 200_001);
        assert!(e.to_string().len() > 200_000);
        drop(e);
    }
}
