use pest::iterators::Pair;

use crate::Rule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
  Plus,
  Minus,
  Times,
  Divide,
  Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
  Minus,
}

/// Tree representation of a parsed expression.
///
/// Operations manipulate this form symbolically (expansion, coefficient
/// extraction) or fold it to a number (evaluation, graph sampling).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Integer(i128),
  Real(f64),
  Constant(String),
  Identifier(String),
  BinaryOp {
    op: BinaryOperator,
    left: Box<Expr>,
    right: Box<Expr>,
  },
  UnaryOp {
    op: UnaryOperator,
    operand: Box<Expr>,
  },
  FunctionCall {
    name: String,
    args: Vec<Expr>,
  },
}

/// Lower a pest parse pair into an [`Expr`].
pub fn pair_to_expr(pair: Pair<Rule>) -> Expr {
  match pair.as_rule() {
    Rule::Program => {
      let inner = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::Expression)
        .unwrap();
      pair_to_expr(inner)
    }
    Rule::Expression | Rule::Term => lower_binary_chain(pair),
    Rule::Factor => lower_factor(pair),
    Rule::Power => lower_power(pair),
    Rule::Primary => {
      let inner = pair.into_inner().next().unwrap();
      pair_to_expr(inner)
    }
    Rule::FunctionCall => {
      let mut inner = pair.into_inner();
      let name = inner.next().unwrap().as_str().to_string();
      let args = inner.map(pair_to_expr).collect();
      Expr::FunctionCall { name, args }
    }
    Rule::Identifier => lower_identifier(pair.as_str()),
    Rule::Number => lower_number(pair.as_str()),
    other => unreachable!("unexpected rule in expression position: {other:?}"),
  }
}

/// Fold `operand (op operand)*` chains left-associatively.
fn lower_binary_chain(pair: Pair<Rule>) -> Expr {
  let mut inner = pair.into_inner();
  let mut expr = pair_to_expr(inner.next().unwrap());
  while let Some(op_pair) = inner.next() {
    let op = match op_pair.as_str() {
      "+" => BinaryOperator::Plus,
      "-" => BinaryOperator::Minus,
      "*" => BinaryOperator::Times,
      _ => BinaryOperator::Divide,
    };
    let rhs = pair_to_expr(inner.next().unwrap());
    expr = Expr::BinaryOp {
      op,
      left: Box::new(expr),
      right: Box::new(rhs),
    };
  }
  expr
}

/// A factor is a run of prefix signs followed by a power chain.
fn lower_factor(pair: Pair<Rule>) -> Expr {
  let mut negate = false;
  let mut operand = None;
  for p in pair.into_inner() {
    match p.as_rule() {
      Rule::AddOp => {
        if p.as_str() == "-" {
          negate = !negate;
        }
      }
      _ => operand = Some(pair_to_expr(p)),
    }
  }
  let expr = operand.unwrap();
  if negate {
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand: Box::new(expr),
    }
  } else {
    expr
  }
}

fn lower_power(pair: Pair<Rule>) -> Expr {
  let mut inner = pair.into_inner();
  let base = pair_to_expr(inner.next().unwrap());
  match inner.next() {
    Some(exponent) => Expr::BinaryOp {
      op: BinaryOperator::Power,
      left: Box::new(base),
      right: Box::new(pair_to_expr(exponent)),
    },
    None => base,
  }
}

fn lower_identifier(name: &str) -> Expr {
  match name {
    "pi" | "e" => Expr::Constant(name.to_string()),
    _ => Expr::Identifier(name.to_string()),
  }
}

fn lower_number(text: &str) -> Expr {
  if !text.contains('.') {
    if let Ok(n) = text.parse::<i128>() {
      return Expr::Integer(n);
    }
  }
  Expr::Real(text.parse::<f64>().unwrap_or(f64::NAN))
}

/// Replace every occurrence of a symbol with another expression.
pub fn substitute_variable(expr: &Expr, var: &str, value: &Expr) -> Expr {
  match expr {
    Expr::Identifier(name) if name == var => value.clone(),
    Expr::FunctionCall { name, args } => Expr::FunctionCall {
      name: name.clone(),
      args: args
        .iter()
        .map(|a| substitute_variable(a, var, value))
        .collect(),
    },
    Expr::BinaryOp { op, left, right } => Expr::BinaryOp {
      op: *op,
      left: Box::new(substitute_variable(left, var, value)),
      right: Box::new(substitute_variable(right, var, value)),
    },
    Expr::UnaryOp { op, operand } => Expr::UnaryOp {
      op: *op,
      operand: Box::new(substitute_variable(operand, var, value)),
    },
    other => other.clone(),
  }
}

/// Check whether a symbol occurs anywhere in an expression.
pub fn contains_symbol(expr: &Expr, name: &str) -> bool {
  match expr {
    Expr::Identifier(id) => id == name,
    Expr::BinaryOp { left, right, .. } => {
      contains_symbol(left, name) || contains_symbol(right, name)
    }
    Expr::UnaryOp { operand, .. } => contains_symbol(operand, name),
    Expr::FunctionCall { args, .. } => {
      args.iter().any(|a| contains_symbol(a, name))
    }
    _ => false,
  }
}

// Binding strength for the infix printer: sums 1, products 2, powers 3,
// atoms 4. Negative literals print like sums so they pick up parentheses
// inside tighter contexts.
fn precedence(expr: &Expr) -> u8 {
  match expr {
    Expr::Integer(n) if *n < 0 => 1,
    Expr::Real(r) if *r < 0.0 => 1,
    Expr::UnaryOp { .. } => 1,
    Expr::BinaryOp { op, .. } => match op {
      BinaryOperator::Plus | BinaryOperator::Minus => 1,
      BinaryOperator::Times | BinaryOperator::Divide => 2,
      BinaryOperator::Power => 3,
    },
    _ => 4,
  }
}

/// If the expression is a negated term, return its positive counterpart.
fn negated_form(expr: &Expr) -> Option<Expr> {
  match expr {
    Expr::Integer(n) if *n < 0 => Some(Expr::Integer(-n)),
    Expr::Real(r) if *r < 0.0 => Some(Expr::Real(-r)),
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand,
    } => Some(*operand.clone()),
    Expr::BinaryOp {
      op: BinaryOperator::Times,
      left,
      right,
    } => negated_form(left).map(|l| {
      if l == Expr::Integer(1) {
        *right.clone()
      } else {
        Expr::BinaryOp {
          op: BinaryOperator::Times,
          left: Box::new(l),
          right: right.clone(),
        }
      }
    }),
    _ => None,
  }
}

fn fmt_expr(expr: &Expr, min_prec: u8) -> String {
  let rendered = match expr {
    Expr::Integer(n) => n.to_string(),
    Expr::Real(r) => format_real(*r),
    Expr::Constant(name) | Expr::Identifier(name) => name.clone(),
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand,
    } => format!("-{}", fmt_expr(operand, 2)),
    Expr::BinaryOp { op, left, right } => match op {
      BinaryOperator::Plus => match negated_form(right) {
        Some(positive) => {
          format!("{} - {}", fmt_expr(left, 1), fmt_expr(&positive, 2))
        }
        None => format!("{} + {}", fmt_expr(left, 1), fmt_expr(right, 1)),
      },
      BinaryOperator::Minus => {
        format!("{} - {}", fmt_expr(left, 1), fmt_expr(right, 2))
      }
      BinaryOperator::Times => {
        format!("{}*{}", fmt_expr(left, 2), fmt_expr(right, 2))
      }
      BinaryOperator::Divide => {
        format!("{}/{}", fmt_expr(left, 2), fmt_expr(right, 3))
      }
      BinaryOperator::Power => {
        format!("{}**{}", fmt_expr(left, 4), fmt_expr(right, 3))
      }
    },
    Expr::FunctionCall { name, args } => {
      let parts: Vec<String> = args.iter().map(|a| fmt_expr(a, 1)).collect();
      format!("{}({})", name, parts.join(", "))
    }
  };
  if precedence(expr) < min_prec {
    format!("({rendered})")
  } else {
    rendered
  }
}

/// Canonical infix rendering with `**` powers, the same notation the
/// parser accepts.
pub fn expr_to_string(expr: &Expr) -> String {
  fmt_expr(expr, 0)
}

/// Format a real number, keeping a trailing `.0` so it reads as a real.
pub fn format_real(f: f64) -> String {
  if f.fract() == 0.0 && f.abs() < 1e15 {
    format!("{:.1}", f)
  } else {
    format!("{}", f)
  }
}

/// Format a number for display, dropping the fraction when it is whole.
pub fn format_number(f: f64) -> String {
  if f.fract() == 0.0 && f.abs() < 1e15 {
    format!("{}", f as i64)
  } else {
    format!("{}", f)
  }
}
