use pest::iterators::{Pair, Pairs};

use crate::{ExprError, Rule, parse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
  Plus,
  Minus,
  Times,
  Divide,
  Power,
}

impl BinaryOperator {
  pub fn apply(self, left: f64, right: f64) -> f64 {
    match self {
      BinaryOperator::Plus => left + right,
      BinaryOperator::Minus => left - right,
      BinaryOperator::Times => left * right,
      BinaryOperator::Divide => left / right,
      BinaryOperator::Power => left.powf(right),
    }
  }

  fn symbol(self) -> &'static str {
    match self {
      BinaryOperator::Plus => "+",
      BinaryOperator::Minus => "-",
      BinaryOperator::Times => "*",
      BinaryOperator::Divide => "/",
      BinaryOperator::Power => "^",
    }
  }

  fn precedence(self) -> u8 {
    match self {
      BinaryOperator::Plus | BinaryOperator::Minus => 1,
      BinaryOperator::Times | BinaryOperator::Divide => 2,
      BinaryOperator::Power => 4,
    }
  }
}

/// A run of leading signs folds to at most one negation, so `--x` parses to
/// plain `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
  Minus,
}

/// Precedence of a leading sign: between `*` and `^`.
const UNARY_PRECEDENCE: u8 = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Number(f64),
  Identifier(String),
  UnaryOp {
    op: UnaryOperator,
    operand: Box<Expr>,
  },
  BinaryOp {
    op: BinaryOperator,
    left: Box<Expr>,
    right: Box<Expr>,
  },
  FunctionCall {
    name: String,
    args: Vec<Expr>,
  },
}

impl Expr {
  /// Visit every identifier that is read as a value (not called).
  pub fn for_each_identifier<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
    match self {
      Expr::Number(_) => {}
      Expr::Identifier(name) => f(name),
      Expr::UnaryOp { operand, .. } => operand.for_each_identifier(f),
      Expr::BinaryOp { left, right, .. } => {
        left.for_each_identifier(f);
        right.for_each_identifier(f);
      }
      Expr::FunctionCall { args, .. } => {
        for arg in args {
          arg.for_each_identifier(f);
        }
      }
    }
  }

  /// Visit every function call as `(name, argument count)`.
  pub fn for_each_call<'a>(&'a self, f: &mut impl FnMut(&'a str, usize)) {
    match self {
      Expr::Number(_) | Expr::Identifier(_) => {}
      Expr::UnaryOp { operand, .. } => operand.for_each_call(f),
      Expr::BinaryOp { left, right, .. } => {
        left.for_each_call(f);
        right.for_each_call(f);
      }
      Expr::FunctionCall { name, args } => {
        f(name, args.len());
        for arg in args {
          arg.for_each_call(f);
        }
      }
    }
  }

  fn precedence(&self) -> u8 {
    match self {
      Expr::BinaryOp { op, .. } => op.precedence(),
      Expr::UnaryOp { .. } => UNARY_PRECEDENCE,
      _ => u8::MAX,
    }
  }
}

/// Deepest syntax tree that will be built. Evaluation recurses once per
/// tree level.
pub const MAX_DEPTH: usize = 512;

/// Most parenthesis levels, and most `**` operators, accepted in the text.
/// The grammar recurses through several rules for each of these.
pub const MAX_NESTING: usize = 128;

/// Parse expression text (with `**` as the power operator) into an [`Expr`].
pub fn parse_expression(input: &str) -> Result<Expr, ExprError> {
  if input.trim().is_empty() {
    return Err(ExprError::EmptyInput);
  }
  check_nesting(input)?;
  let mut pairs = parse(input)?;
  let program = next_pair(&mut pairs, "Program")?;
  let mut inner = program.into_inner();
  let expression = next_pair(&mut inner, "Expression")?;
  pair_to_expr(expression)
}

/// Reject text whose parenthesis depth or number of `**` operators passes
/// [`MAX_NESTING`], before the grammar recurses into it.
fn check_nesting(input: &str) -> Result<(), ExprError> {
  let mut depth = 0usize;
  let mut deepest = 0usize;
  for c in input.chars() {
    match c {
      '(' => {
        depth += 1;
        deepest = deepest.max(depth);
      }
      ')' => depth = depth.saturating_sub(1),
      _ => {}
    }
  }
  let powers = input.matches("**").count();
  if deepest > MAX_NESTING || powers > MAX_NESTING {
    return Err(ExprError::Malformed(format!(
      "more than {MAX_NESTING} nested parentheses or powers"
    )));
  }
  Ok(())
}

fn too_deep() -> ExprError {
  ExprError::Malformed(format!("syntax tree deeper than {MAX_DEPTH} levels"))
}

fn next_pair<'i>(
  pairs: &mut Pairs<'i, Rule>,
  expected: &str,
) -> Result<Pair<'i, Rule>, ExprError> {
  pairs
    .next()
    .ok_or_else(|| ExprError::Malformed(format!("missing {expected}")))
}

pub fn pair_to_expr(pair: Pair<Rule>) -> Result<Expr, ExprError> {
  build(pair).map(|(expr, _)| expr)
}

/// Convert one pair, returning the tree together with its depth. Fails as
/// soon as the depth would pass [`MAX_DEPTH`].
fn build(pair: Pair<Rule>) -> Result<(Expr, usize), ExprError> {
  let built = match pair.as_rule() {
    Rule::Expression => {
      let mut inner = pair.into_inner();
      return build(next_pair(&mut inner, "Sum")?);
    }
    Rule::Sum | Rule::Product => return fold_left(pair),
    Rule::Unary => {
      let mut negate = false;
      let mut operand = None;
      for child in pair.into_inner() {
        match child.as_rule() {
          Rule::Sign => negate ^= child.as_str() == "-",
          _ => operand = Some(build(child)?),
        }
      }
      let (expr, depth) = operand
        .ok_or_else(|| ExprError::Malformed("sign without operand".into()))?;
      if !negate {
        return Ok((expr, depth));
      }
      let expr = Expr::UnaryOp {
        op: UnaryOperator::Minus,
        operand: Box::new(expr),
      };
      (expr, depth + 1)
    }
    Rule::Power => {
      let mut inner = pair.into_inner();
      let (base, base_depth) = build(next_pair(&mut inner, "base")?)?;
      match inner.next() {
        None => return Ok((base, base_depth)),
        Some(_pow_op) => {
          let (exponent, exp_depth) =
            build(next_pair(&mut inner, "exponent")?)?;
          let expr = Expr::BinaryOp {
            op: BinaryOperator::Power,
            left: Box::new(base),
            right: Box::new(exponent),
          };
          (expr, base_depth.max(exp_depth) + 1)
        }
      }
    }
    Rule::FunctionCall => {
      let mut inner = pair.into_inner();
      let name = next_pair(&mut inner, "function name")?.as_str().to_string();
      let mut args = Vec::new();
      let mut depth = 0;
      for arg in inner {
        let (expr, arg_depth) = build(arg)?;
        depth = depth.max(arg_depth);
        args.push(expr);
      }
      (Expr::FunctionCall { name, args }, depth + 1)
    }
    Rule::Identifier => (Expr::Identifier(pair.as_str().to_string()), 1),
    Rule::Number => {
      let n = pair.as_str().parse::<f64>().map_err(|e| {
        ExprError::Malformed(format!("{}: {e}", pair.as_str()))
      })?;
      (Expr::Number(n), 1)
    }
    rule => {
      return Err(ExprError::Malformed(format!("unexpected rule {rule:?}")));
    }
  };
  if built.1 > MAX_DEPTH {
    return Err(too_deep());
  }
  Ok(built)
}

/// Build a left-associative chain from `operand (op operand)*`.
fn fold_left(pair: Pair<Rule>) -> Result<(Expr, usize), ExprError> {
  let mut inner = pair.into_inner();
  let (mut acc, mut depth) = build(next_pair(&mut inner, "operand")?)?;
  while let Some(op_pair) = inner.next() {
    let op = match op_pair.as_str() {
      "+" => BinaryOperator::Plus,
      "-" => BinaryOperator::Minus,
      "*" => BinaryOperator::Times,
      "/" => BinaryOperator::Divide,
      other => {
        return Err(ExprError::Malformed(format!("unknown operator {other}")));
      }
    };
    let (rhs, rhs_depth) = build(next_pair(&mut inner, "operand")?)?;
    depth = depth.max(rhs_depth) + 1;
    if depth > MAX_DEPTH {
      return Err(too_deep());
    }
    acc = Expr::BinaryOp {
      op,
      left: Box::new(acc),
      right: Box::new(rhs),
    };
  }
  Ok((acc, depth))
}

pub fn expr_to_string(expr: &Expr) -> String {
  match expr {
    Expr::Number(n) => format_number(*n),
    Expr::Identifier(name) => name.clone(),
    Expr::UnaryOp { op, operand } => {
      let sign = match op {
        UnaryOperator::Minus => "-",
      };
      format!("{sign}{}", wrap(operand, UNARY_PRECEDENCE, false))
    }
    Expr::BinaryOp { op, left, right } => {
      let prec = op.precedence();
      // Power is right-associative, everything else left-associative
      let (left_str, right_str) = if *op == BinaryOperator::Power {
        (wrap(left, prec, true), wrap(right, prec, false))
      } else {
        (wrap(left, prec, false), wrap(right, prec, true))
      };
      match op {
        BinaryOperator::Power => format!("{left_str}^{right_str}"),
        _ => format!("{left_str} {} {right_str}", op.symbol()),
      }
    }
    Expr::FunctionCall { name, args } => {
      let parts: Vec<String> = args.iter().map(expr_to_string).collect();
      format!("{name}({})", parts.join(", "))
    }
  }
}

fn wrap(expr: &Expr, parent: u8, strict: bool) -> String {
  let child = expr.precedence();
  let needs_parens = if strict { child <= parent } else { child < parent };
  if needs_parens {
    format!("({})", expr_to_string(expr))
  } else {
    expr_to_string(expr)
  }
}

fn format_number(n: f64) -> String {
  if n.fract() == 0.0 && n.abs() < 1e15 {
    format!("{}", n as i64)
  } else {
    n.to_string()
  }
}

impl std::fmt::Display for Expr {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&expr_to_string(self))
  }
}
