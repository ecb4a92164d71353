use crate::config::FunctionType;

/// Starter expressions offered for each function type.
pub fn examples(function_type: FunctionType) -> &'static [&'static str] {
  match function_type {
    FunctionType::Polynomial => &["x^2", "3*x^3 - 2*x + 1", "x^4 - 4*x^2 + 4"],
    FunctionType::Trigonometric => &["sin(x)", "cos(2*x)", "tan(x/2)"],
    FunctionType::Exponential => &["exp(x)", "2^x", "exp(-x^2/2)"],
    FunctionType::Logarithmic => &["log(x)", "log10(x)", "log2(x)"],
    FunctionType::Special => &["sinc(x)", "sign(x)", "heaviside(x)"],
    FunctionType::Bessel => &["besselJ0(x)", "besselJ1(x)", "besselY0(x)"],
    FunctionType::Error => &["erf(x)", "erfc(x)", "erfcx(x)"],
    FunctionType::Gamma => &["gamma(x)", "lngamma(x)", "digamma(x)"],
    FunctionType::Hyperbolic => &["sinh(x)", "cosh(x)", "tanh(x)"],
  }
}

/// Named `z = f(x, y)` surfaces.
pub const SURFACE_PRESETS: [(&str, &str); 9] = [
  ("Simple Plane", "x + y"),
  ("Paraboloid", "x^2 + y^2"),
  ("Sine Wave", "sin(sqrt(x^2 + y^2))"),
  ("Ripple", "sin(x*x + y*y) / (x*x + y*y + 0.1)"),
  ("Saddle", "x^2 - y^2"),
  ("Gaussian", "exp(-(x^2 + y^2)/5)"),
  ("Mexican Hat", "(1 - (x^2 + y^2)/4) * exp(-(x^2 + y^2)/8)"),
  ("Sinc Product", "sinc(x) * sinc(y)"),
  ("Bessel", "besselJ0(sqrt(x^2 + y^2) * 2)"),
];
