use std::collections::HashMap;
use std::sync::LazyLock;

use super::special_functions as special;

/// A pure numeric function callable from an expression.
#[derive(Clone, Copy)]
pub enum MathFn {
  Unary(fn(f64) -> f64),
  Binary(fn(f64, f64) -> f64),
}

impl MathFn {
  pub fn arity(&self) -> usize {
    match self {
      MathFn::Unary(_) => 1,
      MathFn::Binary(_) => 2,
    }
  }

  /// Apply to already evaluated arguments. The caller checks arity first;
  /// a mismatched slice yields `None`.
  pub fn call(&self, args: &[f64]) -> Option<f64> {
    match (self, args) {
      (MathFn::Unary(f), [a]) => Some(f(*a)),
      (MathFn::Binary(f), [a, b]) => Some(f(*a, *b)),
      _ => None,
    }
  }
}

impl std::fmt::Debug for MathFn {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      MathFn::Unary(_) => f.write_str("MathFn::Unary"),
      MathFn::Binary(_) => f.write_str("MathFn::Binary"),
    }
  }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
  func: MathFn,
  description: &'static str,
}

/// The fixed table of callable functions, shared read-only by every evaluation.
#[derive(Debug)]
pub struct FunctionLibrary {
  entries: HashMap<&'static str, Entry>,
}

static STANDARD: LazyLock<FunctionLibrary> =
  LazyLock::new(FunctionLibrary::standard);

/// The process-wide function library.
pub fn library() -> &'static FunctionLibrary {
  &STANDARD
}

impl FunctionLibrary {
  fn standard() -> Self {
    let table: [(&'static str, MathFn, &'static str); 33] = [
      // Elementary
      ("sin", MathFn::Unary(f64::sin), "Sine"),
      ("cos", MathFn::Unary(f64::cos), "Cosine"),
      ("tan", MathFn::Unary(f64::tan), "Tangent"),
      ("asin", MathFn::Unary(f64::asin), "Inverse sine"),
      ("acos", MathFn::Unary(f64::acos), "Inverse cosine"),
      ("atan", MathFn::Unary(f64::atan), "Inverse tangent"),
      ("sinh", MathFn::Unary(f64::sinh), "Hyperbolic sine"),
      ("cosh", MathFn::Unary(f64::cosh), "Hyperbolic cosine"),
      ("tanh", MathFn::Unary(f64::tanh), "Hyperbolic tangent"),
      ("exp", MathFn::Unary(f64::exp), "Exponential e^x"),
      ("log", MathFn::Unary(f64::ln), "Natural logarithm"),
      ("log10", MathFn::Unary(f64::log10), "Base-10 logarithm"),
      ("log2", MathFn::Unary(f64::log2), "Base-2 logarithm"),
      ("sqrt", MathFn::Unary(f64::sqrt), "Square root"),
      ("abs", MathFn::Unary(f64::abs), "Absolute value"),
      ("pow", MathFn::Binary(f64::powf), "pow(x, y) = x^y"),
      // Bessel
      (
        "besselJ0",
        MathFn::Unary(special::bessel_j0),
        "Bessel function of the first kind, order 0",
      ),
      (
        "besselJ1",
        MathFn::Unary(special::bessel_j1),
        "Bessel function of the first kind, order 1",
      ),
      (
        "besselY0",
        MathFn::Unary(special::bessel_y0),
        "Bessel function of the second kind, order 0 (x > 0)",
      ),
      (
        "besselY1",
        MathFn::Unary(special::bessel_y1),
        "Bessel function of the second kind, order 1 (x > 0)",
      ),
      // Error functions
      ("erf", MathFn::Unary(special::erf), "Error function"),
      (
        "erfc",
        MathFn::Unary(special::erfc),
        "Complementary error function 1 - erf(x)",
      ),
      (
        "erfcx",
        MathFn::Unary(special::erfcx),
        "Scaled complementary error function exp(x^2) * erfc(x)",
      ),
      // Gamma family
      ("gamma", MathFn::Unary(special::gamma), "Gamma function"),
      (
        "lngamma",
        MathFn::Unary(special::lngamma),
        "Natural logarithm of |gamma(x)|",
      ),
      (
        "digamma",
        MathFn::Unary(special::digamma),
        "Digamma function, derivative of ln(gamma(x))",
      ),
      // Other special functions
      ("sinc", MathFn::Unary(special::sinc), "sin(x)/x, 1 at x = 0"),
      ("sign", MathFn::Unary(special::sign), "Sign of x: -1, 0 or 1"),
      (
        "heaviside",
        MathFn::Unary(special::heaviside),
        "Heaviside step: 0, 0.5 at x = 0, 1",
      ),
      (
        "lambertW",
        MathFn::Unary(special::lambert_w),
        "Lambert W function, principal branch (x >= -1/e)",
      ),
      (
        "zeta",
        MathFn::Unary(special::zeta),
        "Riemann zeta function (x > 1)",
      ),
      (
        "factorial",
        MathFn::Unary(special::factorial),
        "n! for non-negative integers",
      ),
      (
        "binomial",
        MathFn::Binary(special::binomial),
        "Binomial coefficient binomial(n, k)",
      ),
    ];

    let entries = table
      .into_iter()
      .map(|(name, func, description)| (name, Entry { func, description }))
      .collect();
    FunctionLibrary { entries }
  }

  pub fn get(&self, name: &str) -> Option<MathFn> {
    self.entries.get(name).map(|entry| entry.func)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.entries.contains_key(name)
  }

  pub fn arity(&self, name: &str) -> Option<usize> {
    self.get(name).map(|func| func.arity())
  }

  pub fn describe(&self, name: &str) -> Option<&'static str> {
    self.entries.get(name).map(|entry| entry.description)
  }

  /// All function names, sorted.
  pub fn names(&self) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = self.entries.keys().copied().collect();
    names.sort_unstable();
    names
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
