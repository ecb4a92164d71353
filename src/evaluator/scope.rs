use std::f64::consts;

use crate::ExprError;
use crate::functions::FunctionLibrary;
use crate::syntax::{Expr, UnaryOperator};

/// Named constants visible to every expression.
pub const CONSTANTS: [(&str, f64); 2] = [("PI", consts::PI), ("E", consts::E)];

pub fn constant(name: &str) -> Option<f64> {
  CONSTANTS
    .iter()
    .find(|(constant, _)| *constant == name)
    .map(|(_, value)| *value)
}

/// Values of the plot variables at one sample point.
///
/// `y` is only bound when sampling a surface; a 2D expression that mentions
/// `y` fails like any other unknown identifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bindings {
  pub x: f64,
  pub y: Option<f64>,
}

impl Bindings {
  pub fn x(x: f64) -> Self {
    Bindings { x, y: None }
  }

  pub fn xy(x: f64, y: f64) -> Self {
    Bindings { x, y: Some(y) }
  }

  pub fn get(&self, name: &str) -> Option<f64> {
    match name {
      "x" => Some(self.x),
      "y" => self.y,
      _ => None,
    }
  }
}

/// Evaluation environment: function library, bound variables and constants.
pub struct Scope<'a> {
  library: &'a FunctionLibrary,
  bindings: &'a Bindings,
}

impl<'a> Scope<'a> {
  pub fn new(library: &'a FunctionLibrary, bindings: &'a Bindings) -> Self {
    Scope { library, bindings }
  }

  pub fn lookup(&self, name: &str) -> Result<f64, ExprError> {
    if let Some(value) = self.bindings.get(name) {
      return Ok(value);
    }
    if let Some(value) = constant(name) {
      return Ok(value);
    }
    if self.library.contains(name) {
      return Err(ExprError::NotAValue(name.to_string()));
    }
    Err(ExprError::UnknownIdentifier(name.to_string()))
  }

  pub fn call(&self, name: &str, args: &[f64]) -> Result<f64, ExprError> {
    let Some(func) = self.library.get(name) else {
      if self.bindings.get(name).is_some() || constant(name).is_some() {
        return Err(ExprError::NotCallable(name.to_string()));
      }
      return Err(ExprError::UnknownFunction(name.to_string()));
    };
    func.call(args).ok_or_else(|| ExprError::ArityMismatch {
      name: name.to_string(),
      expected: func.arity(),
      got: args.len(),
    })
  }

  /// Walk the tree with plain IEEE-754 arithmetic. Infinities and NaN may
  /// appear in intermediate results; only the caller judges the final value.
  pub fn eval(&self, expr: &Expr) -> Result<f64, ExprError> {
    match expr {
      Expr::Number(n) => Ok(*n),
      Expr::Identifier(name) => self.lookup(name),
      Expr::UnaryOp { op, operand } => {
        let value = self.eval(operand)?;
        Ok(match op {
          UnaryOperator::Minus => -value,
        })
      }
      Expr::BinaryOp { op, left, right } => {
        let l = self.eval(left)?;
        let r = self.eval(right)?;
        Ok(op.apply(l, r))
      }
      Expr::FunctionCall { name, args } => {
        let values = args
          .iter()
          .map(|arg| self.eval(arg))
          .collect::<Result<Vec<f64>, ExprError>>()?;
        self.call(name, &values)
      }
    }
  }
}
