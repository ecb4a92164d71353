use approx::assert_abs_diff_eq;
use funcplot::*;

fn eval_at(expr: &str, x: f64) -> f64 {
  evaluate(expr, FunctionType::Polynomial, &Bindings::x(x))
}

mod arithmetic {
  use super::*;

  #[test]
  fn caret_is_power() {
    assert_eq!(eval_at("x^2", 3.0), 9.0);
    assert_eq!(eval_at("x^2", -2.0), 4.0);
    assert_eq!(eval_at("x**3", 2.0), 8.0);
  }

  #[test]
  fn precedence() {
    assert_eq!(eval_at("2*3+4", 0.0), 10.0);
    assert_eq!(eval_at("2+3*4", 0.0), 14.0);
    assert_eq!(eval_at("(1+2)*3", 0.0), 9.0);
    assert_eq!(eval_at("8 - 3 - 2", 0.0), 3.0);
    assert_eq!(eval_at("10/4/5", 0.0), 0.5);
  }

  #[test]
  fn power_is_right_associative() {
    assert_eq!(eval_at("2^3^2", 0.0), 512.0);
  }

  #[test]
  fn leading_minus_binds_looser_than_power() {
    assert_eq!(eval_at("-x^2", 3.0), -9.0);
    assert_eq!(eval_at("(-x)^2", 3.0), 9.0);
    assert_eq!(eval_at("2^-1", 0.0), 0.5);
    assert_eq!(eval_at("2*-x", 4.0), -8.0);
  }

  #[test]
  fn number_forms() {
    assert_eq!(eval_at(".5*x", 4.0), 2.0);
    assert_eq!(eval_at("1e3 + x", 1.0), 1001.0);
    assert_abs_diff_eq!(eval_at("2.5e-3 * x", 2.0), 0.005, epsilon = 1e-15);
  }

  #[test]
  fn intermediate_infinity_is_allowed() {
    assert_eq!(eval_at("1/(1/x)", 0.0), 0.0);
  }
}

mod non_finite {
  use super::*;

  #[test]
  fn division_by_zero() {
    assert!(eval_at("1/x", 0.0).is_nan());
    assert!(matches!(
      try_evaluate("1/x", FunctionType::Polynomial, &Bindings::x(0.0)),
      Err(ExprError::NonFinite(v)) if v.is_infinite()
    ));
  }

  #[test]
  fn outside_domain() {
    assert!(eval_at("sqrt(x)", -1.0).is_nan());
    assert!(eval_at("log(x)", 0.0).is_nan());
    assert!(eval_at("gamma(x)", -2.0).is_nan());
  }
}

mod constants_and_functions {
  use super::*;

  #[test]
  fn constants() {
    assert_eq!(eval_at("PI", 0.0), std::f64::consts::PI);
    assert_eq!(eval_at("E", 0.0), std::f64::consts::E);
    assert_abs_diff_eq!(eval_at("cos(PI)", 0.0), -1.0, epsilon = 1e-15);
  }

  #[test]
  fn library_calls() {
    assert_eq!(eval_at("besselJ0(x)", 0.0), 1.0);
    assert_eq!(eval_at("binomial(5, 2)", 0.0), 10.0);
    assert_eq!(eval_at("pow(x, 10)", 2.0), 1024.0);
    assert_eq!(eval_at("abs(x) + sign(x)", -3.0), 2.0);
    assert_eq!(eval_at("factorial(x)", 5.0), 120.0);
  }

  #[test]
  fn math_qualifier_is_accepted() {
    assert_eq!(eval_at("Math.sqrt(x)", 16.0), 4.0);
  }

  #[test]
  fn nested_calls() {
    assert_abs_diff_eq!(
      eval_at("exp(log(x))", 7.0),
      7.0,
      epsilon = 1e-12
    );
  }
}

mod exponential_rewrite {
  use super::*;

  #[test]
  fn e_power_is_exp_for_exponential_type() {
    let value =
      evaluate("e^x", FunctionType::Exponential, &Bindings::x(1.0));
    assert_abs_diff_eq!(value, std::f64::consts::E, epsilon = 1e-15);
  }

  #[test]
  fn e_power_keeps_following_terms() {
    let value =
      evaluate("e^x + 1", FunctionType::Exponential, &Bindings::x(0.0));
    assert_eq!(value, 2.0);
  }

  #[test]
  fn lowercase_e_is_unknown_elsewhere() {
    assert!(evaluate("e^x", FunctionType::Polynomial, &Bindings::x(1.0))
      .is_nan());
  }
}

mod failures {
  use super::*;

  fn error_of(expr: &str) -> ExprError {
    try_evaluate(expr, FunctionType::Polynomial, &Bindings::x(1.0))
      .unwrap_err()
  }

  #[test]
  fn unknown_function_is_nan() {
    assert!(eval_at("foo(x)", 1.0).is_nan());
    assert!(matches!(
      error_of("foo(x)"),
      ExprError::UnknownFunction(name) if name == "foo"
    ));
  }

  #[test]
  fn y_is_unbound_in_2d() {
    assert!(matches!(
      error_of("x + y"),
      ExprError::UnknownIdentifier(name) if name == "y"
    ));
  }

  #[test]
  fn function_used_as_value() {
    assert!(matches!(error_of("sin + 1"), ExprError::NotAValue(_)));
  }

  #[test]
  fn variable_called_as_function() {
    assert!(matches!(error_of("x(2)"), ExprError::NotCallable(_)));
    assert!(matches!(error_of("PI(2)"), ExprError::NotCallable(_)));
  }

  #[test]
  fn wrong_argument_count() {
    assert!(matches!(
      error_of("pow(2)"),
      ExprError::ArityMismatch { expected: 2, got: 1, .. }
    ));
    assert!(matches!(
      error_of("sin(1, 2)"),
      ExprError::ArityMismatch { expected: 1, got: 2, .. }
    ));
  }

  #[test]
  fn syntax_errors() {
    assert!(matches!(error_of("2 + "), ExprError::ParseError(_)));
    assert!(matches!(error_of("(x"), ExprError::ParseError(_)));
    assert!(matches!(error_of("x y"), ExprError::ParseError(_)));
    assert!(eval_at("2 + ", 0.0).is_nan());
  }

  #[test]
  fn empty_input() {
    assert!(matches!(error_of(""), ExprError::EmptyInput));
    assert!(matches!(error_of("   "), ExprError::EmptyInput));
  }
}

mod compiled {
  use super::*;

  #[test]
  fn deterministic() {
    let expr = "besselJ1(x) * erf(x/3) + gamma(x/2 + 3)";
    for x in [-4.0, -0.5, 0.0, 1.25, 9.0] {
      let a = eval_at(expr, x);
      let b = eval_at(expr, x);
      assert_eq!(a.to_bits(), b.to_bits());
    }
  }

  #[test]
  fn compile_once_eval_many() {
    let expr =
      Expression::compile("x^2 + 1", FunctionType::Polynomial).unwrap();
    assert_eq!(expr.source(), "x^2 + 1");
    assert_eq!(expr.eval(&Bindings::x(0.0)).unwrap(), 1.0);
    assert_eq!(expr.eval(&Bindings::x(2.0)).unwrap(), 5.0);
    assert_eq!(expr.eval_or_none(&Bindings::x(3.0)), Some(10.0));
  }

  #[test]
  fn validate_checks_dimension() {
    let expr = Expression::compile("x*y", FunctionType::Special).unwrap();
    assert!(matches!(
      expr.validate(Dimension::TwoD),
      Err(ExprError::UnknownIdentifier(_))
    ));
    assert!(expr.validate(Dimension::ThreeD).is_ok());
  }

  #[test]
  fn validate_checks_names_and_arity() {
    let check = |s: &str| {
      Expression::compile(s, FunctionType::Special)
        .unwrap()
        .validate(Dimension::ThreeD)
    };
    assert!(check("sin(x) * cos(y) + PI").is_ok());
    assert!(matches!(check("floor(x)"), Err(ExprError::UnknownFunction(_))));
    assert!(matches!(check("z + 1"), Err(ExprError::UnknownIdentifier(_))));
    assert!(matches!(check("gamma * 2"), Err(ExprError::NotAValue(_))));
    assert!(matches!(
      check("binomial(x)"),
      Err(ExprError::ArityMismatch { .. })
    ));
  }

  #[test]
  fn surface_bindings() {
    let value = evaluate(
      "sin(x)*cos(y)",
      FunctionType::Special,
      &Bindings::xy(0.0, 0.0),
    );
    assert_eq!(value, 0.0);
    let value =
      evaluate("x + y", FunctionType::Special, &Bindings::xy(2.0, 3.0));
    assert_eq!(value, 5.0);
  }
}

mod long_input {
  use super::*;

  #[test]
  fn long_sign_runs_fold() {
    let even = format!("{}x", "-".repeat(20_000));
    let odd = format!("{}x", "-".repeat(20_001));
    assert_eq!(eval_at(&even, 1.0), 1.0);
    assert_eq!(eval_at(&odd, 1.0), -1.0);
    assert_eq!(eval_at(&format!("2*{}x", "+-".repeat(100_000)), 3.0), 6.0);
  }

  #[test]
  fn deep_parentheses_are_rejected() {
    let deep = format!("{}x{}", "(".repeat(20_000), ")".repeat(20_000));
    assert!(eval_at(&deep, 1.0).is_nan());
    assert!(matches!(
      try_evaluate(&deep, FunctionType::Polynomial, &Bindings::x(1.0)),
      Err(ExprError::Malformed(_))
    ));
    let nested_calls =
      format!("{}x{}", "sin(".repeat(5_000), ")".repeat(5_000));
    assert!(eval_at(&nested_calls, 1.0).is_nan());
  }

  #[test]
  fn long_power_chains_are_rejected() {
    let chain = format!("x{}", "^1".repeat(20_000));
    assert!(eval_at(&chain, 2.0).is_nan());
  }

  #[test]
  fn long_sums_are_rejected() {
    let sum = format!("x{}", "+x".repeat(20_000));
    assert!(eval_at(&sum, 1.0).is_nan());
  }

  #[test]
  fn moderate_nesting_still_evaluates() {
    let nested = format!("{}x{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(eval_at(&nested, 4.0), 4.0);
    let sum = format!("x{}", "+x".repeat(299));
    assert_eq!(eval_at(&sum, 1.0), 300.0);
  }
}
