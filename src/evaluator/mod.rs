use crate::ExprError;
use crate::config::{Dimension, FunctionType};
use crate::functions::library;
use crate::syntax::{Expr, parse_expression};

mod rewrite;
mod scope;

pub use rewrite::*;
pub use scope::*;

/// An expression parsed once and evaluated at many sample points.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
  source: String,
  ast: Expr,
}

impl Expression {
  /// Rewrite and parse `source`. No identifier checks happen here; see
  /// [`Expression::validate`].
  pub fn compile(
    source: &str,
    function_type: FunctionType,
  ) -> Result<Self, ExprError> {
    let rewritten = rewrite(source, function_type);
    let ast = parse_expression(&rewritten)?;
    Ok(Expression {
      source: source.to_string(),
      ast,
    })
  }

  pub fn source(&self) -> &str {
    &self.source
  }

  pub fn ast(&self) -> &Expr {
    &self.ast
  }

  /// Check every name against the library, the constants and the variables
  /// available in `dimension`, and every call against its arity.
  pub fn validate(&self, dimension: Dimension) -> Result<(), ExprError> {
    let library = library();
    let variables = dimension.variables();
    let mut error = None;

    self.ast.for_each_identifier(&mut |name| {
      if error.is_some()
        || variables.contains(&name)
        || constant(name).is_some()
      {
        return;
      }
      error = Some(if library.contains(name) {
        ExprError::NotAValue(name.to_string())
      } else {
        ExprError::UnknownIdentifier(name.to_string())
      });
    });

    self.ast.for_each_call(&mut |name, got| {
      if error.is_some() {
        return;
      }
      match library.arity(name) {
        Some(expected) if expected == got => {}
        Some(expected) => {
          error = Some(ExprError::ArityMismatch {
            name: name.to_string(),
            expected,
            got,
          })
        }
        None if variables.contains(&name) || constant(name).is_some() => {
          error = Some(ExprError::NotCallable(name.to_string()))
        }
        None => error = Some(ExprError::UnknownFunction(name.to_string())),
      }
    });

    match error {
      Some(e) => Err(e),
      None => Ok(()),
    }
  }

  /// Evaluate at one point. Any non-finite result is an error.
  pub fn eval(&self, bindings: &Bindings) -> Result<f64, ExprError> {
    let scope = Scope::new(library(), bindings);
    let value = scope.eval(&self.ast)?;
    if value.is_finite() {
      Ok(value)
    } else {
      Err(ExprError::NonFinite(value))
    }
  }

  /// Evaluate at one point, folding every failure into `None`.
  pub fn eval_or_none(&self, bindings: &Bindings) -> Option<f64> {
    self.eval(bindings).ok()
  }
}

/// Compile and evaluate in one step, keeping the reason for a failure.
pub fn try_evaluate(
  expression: &str,
  function_type: FunctionType,
  bindings: &Bindings,
) -> Result<f64, ExprError> {
  Expression::compile(expression, function_type)?.eval(bindings)
}

/// Compile and evaluate in one step. Never fails: anything that cannot be
/// plotted comes back as NaN.
pub fn evaluate(
  expression: &str,
  function_type: FunctionType,
  bindings: &Bindings,
) -> f64 {
  match try_evaluate(expression, function_type, bindings) {
    Ok(value) => value,
    Err(e) => {
      log::debug!("evaluating {expression:?} at {bindings:?}: {e}");
      f64::NAN
    }
  }
}
