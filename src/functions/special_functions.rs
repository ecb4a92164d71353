//! Numerical approximations of the special functions exposed to expressions.
//!
//! Every function is total: domain violations produce NaN instead of a panic
//! or an error, so a single bad sample never aborts a plot.

use std::f64::consts::PI;

/// 2/pi, truncated as in the published Bessel coefficients.
const TWO_OVER_PI: f64 = 0.636619772;
/// Branch point of the principal Lambert W branch, -1/e.
const LAMBERT_W_BRANCH_POINT: f64 = -0.36787944117144232159;

// --- Bessel functions ---
//
// Two regimes after Numerical Recipes: a rational approximation for |x| < 8
// and a trigonometric envelope with polynomial corrections in 8/|x| beyond.

/// Asymptotic P/Q polynomials shared by J0 and Y0 (argument y = (8/x)^2).
fn order0_envelope(y: f64, q_last: f64) -> (f64, f64) {
  let p = 1.0
    + y
      * (-0.1098628627e-2
        + y * (0.2734510407e-4 + y * (-0.2073370639e-5 + y * 0.2093887211e-6)));
  let q = -0.1562499995e-1
    + y
      * (0.1430488765e-3
        + y * (-0.6911147651e-5 + y * (0.7621095161e-6 + y * q_last)));
  (p, q)
}

/// Asymptotic P/Q polynomials shared by J1 and Y1.
fn order1_envelope(y: f64) -> (f64, f64) {
  let p = 1.0
    + y
      * (0.183105e-2
        + y * (-0.3516396496e-4 + y * (0.2457520174e-5 + y * -0.240337019e-6)));
  let q = 0.04687499995
    + y
      * (-0.2002690873e-3
        + y * (0.8449199096e-5 + y * (-0.88228987e-6 + y * 0.105787412e-6)));
  (p, q)
}

/// Bessel function of the first kind, order 0.
pub fn bessel_j0(x: f64) -> f64 {
  if x == 0.0 {
    return 1.0;
  }
  let ax = x.abs();
  if ax < 8.0 {
    let y = x * x;
    let num = 57568490574.0
      + y
        * (-13362590354.0
          + y
            * (651619640.7
              + y * (-11214424.18 + y * (77392.33017 + y * -184.9052456))));
    let den = 57568490411.0
      + y
        * (1029532985.0
          + y * (9494680.718 + y * (59272.64853 + y * (267.8532712 + y))));
    num / den
  } else {
    let z = 8.0 / ax;
    let y = z * z;
    let xx = ax - 0.785398164;
    let (p, q) = order0_envelope(y, -0.934935152e-7);
    (TWO_OVER_PI / ax).sqrt() * (xx.cos() * p - z * xx.sin() * q)
  }
}

/// Bessel function of the first kind, order 1. Odd in x.
pub fn bessel_j1(x: f64) -> f64 {
  if x == 0.0 {
    return 0.0;
  }
  let ax = x.abs();
  if ax < 8.0 {
    let y = x * x;
    let num = x
      * (72362614232.0
        + y
          * (-7895059235.0
            + y
              * (242396853.1
                + y * (-2972611.439 + y * (15704.4826 + y * -30.16036606)))));
    let den = 144725228442.0
      + y
        * (2300535178.0
          + y * (18583304.74 + y * (99447.43394 + y * (376.9991397 + y))));
    num / den
  } else {
    let z = 8.0 / ax;
    let y = z * z;
    let xx = ax - 2.356194491;
    let (p, q) = order1_envelope(y);
    let ans = (TWO_OVER_PI / ax).sqrt() * (xx.cos() * p - z * xx.sin() * q);
    if x < 0.0 { -ans } else { ans }
  }
}

/// Bessel function of the second kind, order 0. Defined for x > 0.
pub fn bessel_y0(x: f64) -> f64 {
  if x.is_nan() || x <= 0.0 {
    return f64::NAN;
  }
  if x < 8.0 {
    let y = x * x;
    let num = -2957821389.0
      + y
        * (7062834065.0
          + y
            * (-512359803.6
              + y * (10879881.29 + y * (-86327.92757 + y * 228.4622733))));
    let den = 40076544269.0
      + y
        * (745249964.8
          + y * (7189466.438 + y * (47447.2647 + y * (226.1030244 + y))));
    num / den + TWO_OVER_PI * bessel_j0(x) * x.ln()
  } else {
    let z = 8.0 / x;
    let y = z * z;
    let xx = x - 0.785398164;
    let (p, q) = order0_envelope(y, -0.934945152e-7);
    (TWO_OVER_PI / x).sqrt() * (xx.sin() * p + z * xx.cos() * q)
  }
}

/// Bessel function of the second kind, order 1. Defined for x > 0.
pub fn bessel_y1(x: f64) -> f64 {
  if x.is_nan() || x <= 0.0 {
    return f64::NAN;
  }
  if x < 8.0 {
    let y = x * x;
    let num = x
      * (-0.4900604943e13
        + y
          * (0.127527439e13
            + y
              * (-0.5153438139e11
                + y
                  * (0.7349264551e9
                    + y * (-0.4237922726e7 + y * 0.8511937935e4)))));
    let den = 0.249958057e14
      + y
        * (0.4244419664e12
          + y
            * (0.3733650367e10
              + y
                * (0.2245904002e8
                  + y * (0.102042605e6 + y * (0.3549632885e3 + y)))));
    num / den + TWO_OVER_PI * (bessel_j1(x) * x.ln() - 1.0 / x)
  } else {
    let z = 8.0 / x;
    let y = z * z;
    let xx = x - 2.356194491;
    let (p, q) = order1_envelope(y);
    (TWO_OVER_PI / x).sqrt() * (xx.sin() * p + z * xx.cos() * q)
  }
}

// --- Error functions ---

/// Error function, Abramowitz and Stegun 7.1.26 (|error| <= 1.5e-7).
pub fn erf(x: f64) -> f64 {
  let sign = if x >= 0.0 { 1.0 } else { -1.0 };
  let x = x.abs();

  let a1 = 0.254829592;
  let a2 = -0.284496736;
  let a3 = 1.421413741;
  let a4 = -1.453152027;
  let a5 = 1.061405429;
  let p = 0.3275911;

  let t = 1.0 / (1.0 + p * x);
  let poly = ((((a5 * t + a4) * t + a3) * t + a2) * t + a1) * t;
  let y = 1.0 - poly * (-x * x).exp();
  sign * y
}

pub fn erfc(x: f64) -> f64 {
  1.0 - erf(x)
}

/// Scaled complementary error function exp(x^2) * erfc(x).
pub fn erfcx(x: f64) -> f64 {
  (x * x).exp() * erfc(x)
}

// --- Gamma family ---

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 8] = [
  676.5203681218851,
  -1259.1392167224028,
  771.323_428_777_653_1,
  -176.615_029_162_140_6,
  12.507343278686905,
  -0.13857109526572012,
  9.984_369_578_019_572e-6,
  1.5056327351493116e-7,
];

fn is_non_positive_integer(x: f64) -> bool {
  x <= 0.0 && x.floor() == x
}

/// Lanczos approximation for the Gamma function.
///
/// Poles at zero and the negative integers yield NaN; the reflection formula
/// handles everything below 1/2.
pub fn gamma(x: f64) -> f64 {
  if is_non_positive_integer(x) {
    return f64::NAN;
  }
  if x < 0.5 {
    // Reflection formula: Gamma(1-z) * Gamma(z) = pi / sin(pi*z)
    return PI / ((PI * x).sin() * gamma(1.0 - x));
  }
  let x = x - 1.0;
  let mut sum = 0.999_999_999_999_809_9;
  for (i, &c) in LANCZOS_COEFFICIENTS.iter().enumerate() {
    sum += c / (x + i as f64 + 1.0);
  }
  let t = x + LANCZOS_G + 0.5;
  (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * sum
}

pub fn lngamma(x: f64) -> f64 {
  gamma(x).abs().ln()
}

/// Digamma (psi) function, the logarithmic derivative of Gamma.
pub fn digamma(x: f64) -> f64 {
  if is_non_positive_integer(x) {
    return f64::NAN;
  }
  if x < 0.0 {
    return digamma(1.0 - x) - PI / (PI * x).tan();
  }

  // Shift x upward until the asymptotic series is accurate
  let mut x = x;
  let mut result = 0.0;
  while x < 10.0 {
    result -= 1.0 / x;
    x += 1.0;
  }

  let mut r = 1.0 / x;
  result += x.ln() - 0.5 * r;
  r *= r;
  result
    - r * (1.0 / 12.0
      - r * (1.0 / 120.0
        - r * (1.0 / 252.0
          - r * (1.0 / 240.0 - r * (1.0 / 132.0 - r * 691.0 / 32760.0)))))
}

// --- Other special functions ---

pub fn sinc(x: f64) -> f64 {
  if x == 0.0 { 1.0 } else { x.sin() / x }
}

pub fn sign(x: f64) -> f64 {
  if x > 0.0 {
    1.0
  } else if x < 0.0 {
    -1.0
  } else if x.is_nan() {
    f64::NAN
  } else {
    0.0
  }
}

pub fn heaviside(x: f64) -> f64 {
  if x > 0.0 {
    1.0
  } else if x < 0.0 {
    0.0
  } else if x.is_nan() {
    f64::NAN
  } else {
    0.5
  }
}

/// Principal branch of the Lambert W function, solved with Halley's method.
pub fn lambert_w(x: f64) -> f64 {
  if x.is_nan() || x < LAMBERT_W_BRANCH_POINT {
    return f64::NAN;
  }

  let mut w = if x < 1.0 { x } else { x.ln() };
  for _ in 0..10 {
    let ew = w.exp();
    let residual = w * ew - x;
    let w1 = w + 1.0;
    let delta = residual / (ew * w1 - (w + 2.0) * residual / (2.0 * w1));
    w -= delta;
    if delta.abs() < 1e-10 {
      break;
    }
  }
  w
}

/// Riemann zeta for x > 1 via the alternating Dirichlet eta series:
/// zeta(s) = eta(s) / (1 - 2^(1-s)).
pub fn zeta(x: f64) -> f64 {
  if x.is_nan() || x <= 1.0 {
    return f64::NAN;
  }

  let mut sum = 0.0;
  for n in 1..=1000u32 {
    let sign = if n % 2 == 1 { 1.0 } else { -1.0 };
    let term = sign / (n as f64).powf(x);
    sum += term;
    if term.abs() < 1e-10 {
      break;
    }
  }
  sum / (1.0 - 2.0_f64.powf(1.0 - x))
}

/// n! for non-negative integers, NaN otherwise.
pub fn factorial(n: f64) -> f64 {
  if n.is_nan() || n < 0.0 || n.floor() != n {
    return f64::NAN;
  }
  let mut result = 1.0;
  let mut i = 2.0;
  while i <= n {
    result *= i;
    // 171! already overflows
    if result.is_infinite() {
      break;
    }
    i += 1.0;
  }
  result
}

/// Binomial coefficient C(n, k). Invalid or out-of-range arguments give 0.
pub fn binomial(n: f64, k: f64) -> f64 {
  if k < 0.0 || n < 0.0 || n.floor() != n || k.floor() != k {
    return 0.0;
  }
  if k > n {
    return 0.0;
  }
  if k == 0.0 || k == n {
    return 1.0;
  }

  let k = if k > n - k { n - k } else { k };
  let mut result = 1.0;
  let mut i = 1.0;
  while i <= k {
    result *= n - (k - i);
    result /= i;
    if result.is_infinite() {
      break;
    }
    i += 1.0;
  }
  result
}
