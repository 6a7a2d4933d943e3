// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Predicates deciding which conditional units apply to a build.
//!
//! A predicate is a small boolean expression over three variables:
//! `arch`, `version` and `format`.
//!
//! ```text
//! format == "deb" && arch != "armv7"
//! format in ("deb", "rpm") || version =~ "^2\."
//! ```

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{alpha1, alphanumeric1, char, digit1, multispace0, multispace1};
use nom::combinator::{all_consuming, map, map_res, opt, peek, recognize, value};
use nom::multi::{many0, separated_list0};
use nom::sequence::{delimited, pair, preceded, terminated};

use crate::spec::Conditional;
use crate::{Arch, Error, Format, Result};

#[cfg(test)]
#[path = "./predicate_test.rs"]
mod predicate_test;

/// Names of the variables a predicate can see.
pub const VARIABLES: &[&str] = &["arch", "version", "format"];

/// Deepest nesting of parentheses and `!` a predicate may use.
const MAX_DEPTH: usize = 64;

/// The variables a predicate can see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub arch: String,
    pub version: String,
    pub format: String,
}

impl Context {
    pub fn new(arch: Arch, version: &str, format: Format) -> Self {
        Self {
            arch: arch.to_string(),
            version: version.to_string(),
            format: format.to_string(),
        }
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        match name {
            "arch" => Some(Value::Str(self.arch.clone())),
            "version" => Some(Value::Str(self.version.clone())),
            "format" => Some(Value::Str(self.format.clone())),
            _ => None,
        }
    }
}

/// Compiles and evaluates predicate strings.
pub trait PredicateEngine {
    type Compiled;

    /// Parse `expression`, failing with [`Error::PredicateSyntax`].
    ///
    /// Engines may also reject names outside [`VARIABLES`] here, with
    /// [`Error::PredicateEvaluation`].
    fn compile(&self, expression: &str) -> Result<Self::Compiled>;

    /// Evaluate to a boolean, failing with [`Error::PredicateEvaluation`].
    fn evaluate(&self, compiled: &Self::Compiled, context: &Context) -> Result<bool>;
}

/// Collect the units of every conditional whose predicate holds.
///
/// Units keep conditional order, then listed order, without deduplication.
pub fn conditional_units<E: PredicateEngine>(
    engine: &E,
    conditionals: &[Conditional],
    context: &Context,
) -> Result<Vec<String>> {
    let mut units = Vec::new();
    for cond in conditionals {
        let compiled = engine.compile(&cond.when)?;
        let matched = engine.evaluate(&compiled, context)?;
        tracing::debug!(when = %cond.when, matched, format = %context.format, "conditional");
        if matched {
            units.extend(cond.units.iter().cloned());
        }
    }
    Ok(units)
}

/// The built-in expression engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExprEngine;

/// A parsed predicate along with its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    source: String,
    expr: Expr,
}

impl PredicateEngine for ExprEngine {
    type Compiled = Predicate;

    fn compile(&self, expression: &str) -> Result<Predicate> {
        if nesting_depth(expression) > MAX_DEPTH {
            return Err(Error::PredicateSyntax {
                expression: expression.to_string(),
                reason: "expression nested too deeply".to_string(),
            });
        }

        match all_consuming(ws(or_expr))(expression) {
            Ok((_, expr)) => {
                if let Some(name) = expr.undefined_identifier() {
                    return Err(Error::PredicateEvaluation {
                        expression: expression.to_string(),
                        reason: format!("undefined identifier '{name}'"),
                    });
                }
                Ok(Predicate {
                    source: expression.to_string(),
                    expr,
                })
            }
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(Error::PredicateSyntax {
                expression: expression.to_string(),
                reason: if e.input.trim().is_empty() {
                    "unexpected end of expression".to_string()
                } else {
                    format!("unexpected input at '{}'", e.input.trim())
                },
            }),
            Err(nom::Err::Incomplete(_)) => Err(Error::PredicateSyntax {
                expression: expression.to_string(),
                reason: "incomplete expression".to_string(),
            }),
        }
    }

    fn evaluate(&self, compiled: &Predicate, context: &Context) -> Result<bool> {
        let fail = |reason: String| Error::PredicateEvaluation {
            expression: compiled.source.clone(),
            reason,
        };
        match eval(&compiled.expr, context).map_err(fail)? {
            Value::Bool(b) => Ok(b),
            other => Err(fail(format!(
                "expected a boolean result, got {}",
                other.type_name()
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Bool(bool),
    Num(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Num(_) => "number",
            Self::Str(_) => "string",
            Self::List(_) => "list",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Match,
    NotMatch,
    In,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Literal(Value),
    Ident(String),
    List(Vec<Expr>),
    Not(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// First identifier that no context defines, in source order.
    fn undefined_identifier(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Ident(name) => (!VARIABLES.contains(&name.as_str())).then_some(name.as_str()),
            Self::List(items) => items.iter().find_map(Expr::undefined_identifier),
            Self::Not(inner) => inner.undefined_identifier(),
            Self::Binary { lhs, rhs, .. } => lhs
                .undefined_identifier()
                .or_else(|| rhs.undefined_identifier()),
        }
    }
}

/// How deep the parser would recurse on `expression`.
///
/// Counts open parentheses plus the `!` operators applying inside them,
/// skipping quoted text. Never less than the real depth.
fn nesting_depth(expression: &str) -> usize {
    let mut levels: Vec<usize> = vec![0];
    let mut quote = None;
    let mut deepest = 0;
    let mut chars = expression.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => levels.push(0),
            ')' => {
                if levels.len() > 1 {
                    levels.pop();
                }
            }
            '!' if !matches!(chars.peek(), Some('=' | '~')) => {
                if let Some(bangs) = levels.last_mut() {
                    *bangs += 1;
                }
            }
            '&' | '|' => {
                if let Some(bangs) = levels.last_mut() {
                    *bangs = 0;
                }
            }
            _ => {}
        }
        let depth = levels.len() - 1 + levels.iter().sum::<usize>();
        deepest = deepest.max(depth);
    }
    deepest
}

fn eval(expr: &Expr, context: &Context) -> std::result::Result<Value, String> {
    match expr {
        Expr::Literal(v) => Ok(v.clone()),
        Expr::Ident(name) => context
            .lookup(name)
            .ok_or_else(|| format!("undefined identifier '{name}'")),
        Expr::List(items) => items
            .iter()
            .map(|item| eval(item, context))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Value::List),
        Expr::Not(inner) => Ok(Value::Bool(!as_bool(eval(inner, context)?, "!")?)),
        Expr::Binary { op, lhs, rhs } => {
            let lhs = eval(lhs, context)?;
            match op {
                BinaryOp::And => {
                    if !as_bool(lhs, "&&")? {
                        return Ok(Value::Bool(false));
                    }
                    Ok(Value::Bool(as_bool(eval(rhs, context)?, "&&")?))
                }
                BinaryOp::Or => {
                    if as_bool(lhs, "||")? {
                        return Ok(Value::Bool(true));
                    }
                    Ok(Value::Bool(as_bool(eval(rhs, context)?, "||")?))
                }
                _ => compare(*op, lhs, eval(rhs, context)?).map(Value::Bool),
            }
        }
    }
}

fn as_bool(value: Value, op: &str) -> std::result::Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(format!(
            "'{op}' needs boolean operands, got {}",
            other.type_name()
        )),
    }
}

fn compare(op: BinaryOp, lhs: Value, rhs: Value) -> std::result::Result<bool, String> {
    use std::cmp::Ordering;

    match op {
        BinaryOp::Eq => Ok(lhs == rhs),
        BinaryOp::Ne => Ok(lhs != rhs),
        BinaryOp::In => match rhs {
            Value::List(items) => Ok(items.contains(&lhs)),
            other => Err(format!("'in' needs a list, got {}", other.type_name())),
        },
        BinaryOp::Match | BinaryOp::NotMatch => match (lhs, rhs) {
            (Value::Str(text), Value::Str(pattern)) => {
                let re = regex::Regex::new(&pattern)
                    .map_err(|e| format!("invalid regular expression '{pattern}': {e}"))?;
                Ok(re.is_match(&text) == (op == BinaryOp::Match))
            }
            (l, r) => Err(format!(
                "regular expression match needs strings, got {} and {}",
                l.type_name(),
                r.type_name()
            )),
        },
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let ordering = match (&lhs, &rhs) {
                (Value::Num(a), Value::Num(b)) => a.partial_cmp(b),
                (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
                _ => None,
            }
            .ok_or_else(|| {
                format!(
                    "cannot order {} against {}",
                    lhs.type_name(),
                    rhs.type_name()
                )
            })?;
            Ok(match op {
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::Le => ordering != Ordering::Greater,
                BinaryOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            })
        }
        BinaryOp::And | BinaryOp::Or => Err("logical operator used as a comparison".to_string()),
    }
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn or_expr(input: &str) -> IResult<&str, Expr> {
    let (input, first) = and_expr(input)?;
    let (input, rest) = many0(preceded(ws(tag("||")), and_expr))(input)?;
    Ok((input, fold_binary(BinaryOp::Or, first, rest)))
}

fn and_expr(input: &str) -> IResult<&str, Expr> {
    let (input, first) = unary(input)?;
    let (input, rest) = many0(preceded(ws(tag("&&")), unary))(input)?;
    Ok((input, fold_binary(BinaryOp::And, first, rest)))
}

fn fold_binary(op: BinaryOp, first: Expr, rest: Vec<Expr>) -> Expr {
    rest.into_iter().fold(first, |lhs, rhs| Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    })
}

fn unary(input: &str) -> IResult<&str, Expr> {
    alt((
        map(preceded(ws(char('!')), unary), |e| Expr::Not(Box::new(e))),
        comparison,
    ))(input)
}

fn comparison(input: &str) -> IResult<&str, Expr> {
    let (input, lhs) = ws(primary)(input)?;
    let (input, rhs) = opt(alt((
        pair(ws(comparison_op), ws(primary)),
        pair(ws(in_op), ws(list)),
    )))(input)?;
    let expr = match rhs {
        Some((op, rhs)) => Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        None => lhs,
    };
    Ok((input, expr))
}

fn comparison_op(input: &str) -> IResult<&str, BinaryOp> {
    alt((
        value(BinaryOp::Eq, tag("==")),
        value(BinaryOp::Ne, tag("!=")),
        value(BinaryOp::Match, tag("=~")),
        value(BinaryOp::NotMatch, tag("!~")),
        value(BinaryOp::Le, tag("<=")),
        value(BinaryOp::Ge, tag(">=")),
        value(BinaryOp::Lt, tag("<")),
        value(BinaryOp::Gt, tag(">")),
    ))(input)
}

fn in_op(input: &str) -> IResult<&str, BinaryOp> {
    value(
        BinaryOp::In,
        terminated(tag("in"), peek(alt((multispace1, tag("("))))),
    )(input)
}

fn primary(input: &str) -> IResult<&str, Expr> {
    alt((delimited(ws(char('(')), or_expr, ws(char(')'))), operand))(input)
}

fn list(input: &str) -> IResult<&str, Expr> {
    map(
        delimited(
            ws(char('(')),
            separated_list0(ws(char(',')), ws(operand)),
            ws(char(')')),
        ),
        Expr::List,
    )(input)
}

fn operand(input: &str) -> IResult<&str, Expr> {
    alt((
        map(string, |s| Expr::Literal(Value::Str(s.to_string()))),
        map(number, |n| Expr::Literal(Value::Num(n))),
        map(identifier, |name| match name {
            "true" => Expr::Literal(Value::Bool(true)),
            "false" => Expr::Literal(Value::Bool(false)),
            _ => Expr::Ident(name.to_string()),
        }),
    ))(input)
}

fn string(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
    ))(input)
}

fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(digit1, opt(pair(char('.'), digit1)))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}
