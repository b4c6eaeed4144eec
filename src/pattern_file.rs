//! Pattern definition files
//!
//! A pattern file is TOML describing an expression tree, an optional match
//! configuration, and optional test cases. There is no textual regex syntax;
//! the tree is spelled out with externally tagged variants:
//!
//! ```toml
//! pattern = { concat = [
//!     { literal = "Sca" },
//!     { literal = "la" },
//!     { repeat = { literal = "la" } },
//! ] }
//!
//! [config]
//! zero_width = "guard"
//! max_steps = 100000
//!
//! [[case]]
//! input = "Scalala"
//! expect = true
//! ```
//!
//! `concat` and `alternate` take one or more operands and fold them to the
//! left; `"empty"` is the never-matching expression.

use std::path::Path;

use serde::Deserialize;

use crate::config::MatchConfig;
use crate::error::{MatchError, MatchResult};
use crate::expr::{empty, literal, Expr};
use crate::matcher::Matcher;

/// Serialized form of an expression tree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprDef {
    Empty,
    Literal(String),
    Concat(Vec<ExprDef>),
    Alternate(Vec<ExprDef>),
    Repeat(Box<ExprDef>),
}

#[derive(Debug, Clone, Copy)]
enum Combine {
    Concat,
    Alternate,
    Repeat,
}

enum Frame<'a> {
    Visit(&'a ExprDef),
    Build(Combine, usize),
}

impl ExprDef {
    /// Build the expression this definition describes
    pub fn to_expr(&self) -> MatchResult<Expr> {
        let mut frames = vec![Frame::Visit(self)];
        let mut built: Vec<Expr> = Vec::new();

        while let Some(frame) = frames.pop() {
            match frame {
                Frame::Visit(def) => match def {
                    ExprDef::Empty => built.push(empty()),
                    ExprDef::Literal(text) => built.push(literal(text.as_str())),
                    ExprDef::Concat(items) | ExprDef::Alternate(items) => {
                        let combine = if matches!(def, ExprDef::Concat(_)) {
                            Combine::Concat
                        } else {
                            Combine::Alternate
                        };
                        if items.is_empty() {
                            return Err(MatchError::Parse(format!(
                                "{:?} needs at least one operand",
                                combine
                            )));
                        }
                        frames.push(Frame::Build(combine, items.len()));
                        frames.extend(items.iter().rev().map(Frame::Visit));
                    }
                    ExprDef::Repeat(inner) => {
                        frames.push(Frame::Build(Combine::Repeat, 1));
                        frames.push(Frame::Visit(inner));
                    }
                },
                Frame::Build(combine, arity) => {
                    let mut operands = built.split_off(built.len() - arity).into_iter();
                    let Some(first) = operands.next() else {
                        return Err(MatchError::Parse("missing operand".to_string()));
                    };
                    let expr = match combine {
                        Combine::Concat => operands.fold(first, |acc, e| acc.concat(&e)),
                        Combine::Alternate => operands.fold(first, |acc, e| acc.alternate(&e)),
                        Combine::Repeat => first.repeat(),
                    };
                    built.push(expr);
                }
            }
        }

        built
            .pop()
            .ok_or_else(|| MatchError::Parse("empty pattern".to_string()))
    }
}

/// An input with its expected outcome
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Case {
    pub input: String,
    pub expect: bool,
}

/// Contents of a pattern file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternFile {
    /// Expression tree (required)
    pub pattern: ExprDef,

    /// Optional `[config]` table
    #[serde(default)]
    pub config: MatchConfig,

    /// Optional `[[case]]` entries
    #[serde(default, rename = "case")]
    pub cases: Vec<Case>,
}

impl PatternFile {
    /// Parse a pattern file from TOML content.
    pub fn parse_toml(content: &str) -> MatchResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a pattern file.
    pub fn load(path: &Path) -> MatchResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MatchError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse_toml(&content)
    }

    pub fn expr(&self) -> MatchResult<Expr> {
        self.pattern.to_expr()
    }

    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.config.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZeroWidthPolicy;

    const SCALA: &str = r#"
pattern = { concat = [
    { literal = "Sca" },
    { literal = "la" },
    { repeat = { literal = "la" } },
] }

[config]
max_steps = 100000

[[case]]
input = "Scalala"
expect = true

[[case]]
input = "Scalal"
expect = false
"#;

    #[test]
    fn test_parse_scala_file() {
        let file = PatternFile::parse_toml(SCALA).unwrap();
        assert_eq!(file.config.max_steps, Some(100_000));
        assert_eq!(file.config.zero_width, ZeroWidthPolicy::Guard);
        assert_eq!(file.cases.len(), 2);

        let expr = file.expr().unwrap();
        assert_eq!(expr.to_string(), r#""Sca" "la" "la"*"#);

        let matcher = file.matcher();
        for case in &file.cases {
            assert_eq!(matcher.is_match(&expr, &case.input).unwrap(), case.expect);
        }
    }

    #[test]
    fn test_empty_and_alternate() {
        let file = PatternFile::parse_toml(
            r#"pattern = { alternate = ["empty", { literal = "x" }, { literal = "y" }] }"#,
        )
        .unwrap();
        let expr = file.expr().unwrap();
        assert_eq!(expr.to_string(), r#"∅ | "x" | "y""#);
        assert!(expr.matches("y"));
        assert!(file.cases.is_empty());
    }

    #[test]
    fn test_single_operand_concat_is_the_operand() {
        let def = ExprDef::Concat(vec![ExprDef::Literal("a".to_string())]);
        assert_eq!(def.to_expr().unwrap().to_string(), r#""a""#);
    }

    #[test]
    fn test_empty_operand_list_is_rejected() {
        let def = ExprDef::Repeat(Box::new(ExprDef::Alternate(vec![])));
        assert!(matches!(def.to_expr(), Err(MatchError::Parse(_))));
    }

    #[test]
    fn test_missing_pattern_is_rejected() {
        let err = PatternFile::parse_toml("[config]\nmax_steps = 1").unwrap_err();
        assert!(matches!(err, MatchError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PatternFile::load(Path::new("/nonexistent/trampex/pattern.toml")).unwrap_err();
        assert!(matches!(err, MatchError::Io { .. }));
    }

    #[test]
    fn test_deep_definition_converts_iteratively() {
        let mut def = ExprDef::Literal("a".to_string());
        for _ in 0..10_000 {
            def = ExprDef::Repeat(Box::new(def));
        }
        let expr = def.to_expr().unwrap();
        assert_eq!(expr.depth(), 10_001);
    }
}
