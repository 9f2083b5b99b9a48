//! End-to-end tests for formula evaluation

use pretty_assertions::assert_eq;
use tally_formula::{FormulaError, FormulaParser, ParserConfig, SeededRandom};

fn eval(formula: &str) -> f64 {
    let mut parser = FormulaParser::new();
    let value = parser.result(formula);
    assert!(
        !parser.error(),
        "{formula} failed: {}",
        parser.error_message()
    );
    value
}

fn eval_err(formula: &str) -> String {
    let mut parser = FormulaParser::new();
    assert_eq!(parser.result(formula), 0.0, "{formula}");
    assert!(parser.error(), "{formula} should fail");
    parser.error_message().to_string()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Test operator precedence and grouping
#[test]
fn test_precedence() {
    assert_eq!(eval("2+3*4"), 14.0);
    assert_eq!(eval("(2+3)*4"), 20.0);
    assert_eq!(eval("2+3*4^2"), 50.0);
    assert_eq!(eval("10-4-3"), 3.0);
    assert_eq!(eval("100/10/5"), 2.0);
    assert_eq!(eval("10%4"), 2.0);
    assert_eq!(eval("((1+2))*(3+4)"), 21.0);
}

/// `^` is left-associative
#[test]
fn test_power_is_left_associative() {
    assert_eq!(eval("2^3^2"), 64.0);
    assert_eq!(eval("2^(3^2)"), 512.0);
}

#[test]
fn test_unary_minus() {
    assert_eq!(eval("-3+5"), 2.0);
    assert_eq!(eval("2*-3"), -6.0);
    assert_eq!(eval("2--3"), 5.0);
    assert_eq!(eval("2^-1"), 0.5);
    assert_eq!(eval("(-2)*(-2)"), 4.0);
}

#[test]
fn test_whitespace_case_and_decimals() {
    assert_eq!(eval(" 2 +  3 "), 5.0);
    assert_eq!(eval("3,5+1"), 4.5);
    assert_eq!(eval("1.25*4"), 5.0);
    assert_eq!(eval("abs(-2)"), 2.0);
    assert_eq!(eval("4.*2"), 8.0);
}

#[test]
fn test_comma_decimal_separator() {
    let mut parser = FormulaParser::with_config(ParserConfig::with_decimal_separator(',')).unwrap();
    assert_eq!(parser.result("1,5+1.5"), 3.0);
    assert_eq!(parser.result("POWER(1,5;2)"), 2.25);
    assert!(!parser.error());
}

#[test]
fn test_constants() {
    assert!(approx(eval("PI"), std::f64::consts::PI));
    assert!(approx(eval("2*pi"), std::f64::consts::TAU));
    assert!(approx(eval("LN(E)"), 1.0));
}

#[test]
fn test_custom_constants() {
    let mut config = ParserConfig::default();
    config.constants.insert("VAT", 0.2);
    let mut parser = FormulaParser::with_config(config).unwrap();
    parser.variables_mut().set("VAT", 99.0);
    assert_eq!(parser.result("100*VAT"), 20.0);
}

#[test]
fn test_variables() {
    let mut parser = FormulaParser::new();
    parser.variables_mut().set("X", 10.0);
    assert_eq!(parser.result("X*2"), 20.0);
    assert!(!parser.error());

    parser.variables_mut().set("x", 3.0);
    assert_eq!(parser.result("x*2"), 6.0);

    parser.variables_mut().set("TOTAL_2", 7.0);
    assert_eq!(parser.result("TOTAL_2+X"), 10.0);
}

#[test]
fn test_unknown_variable_is_zero() {
    let mut parser = FormulaParser::new();
    assert_eq!(parser.result("FOO+1"), 1.0);
    assert!(!parser.error());
}

#[test]
fn test_function_calls() {
    assert_eq!(eval("ABS(-5)"), 5.0);
    assert_eq!(eval("MAX(3;7)"), 7.0);
    assert_eq!(eval("MIN(3;7)"), 3.0);
    assert_eq!(eval("LIMINF(5;10)"), 10.0);
    assert_eq!(eval("LIMSUP(15;10)"), 10.0);
    assert_eq!(eval("POW(2;10)"), 1024.0);
    assert_eq!(eval("POWER(10;2)-1"), 99.0);
    assert!(approx(eval("LOG(100)"), 2.0));
    assert!(approx(eval("LOG(81;3)"), 4.0));
    assert_eq!(eval("ROUND(2.5)+ROUND(2.49)"), 5.0);
    assert_eq!(eval("INT(-1.5)"), -2.0);
    assert_eq!(eval("SQRT(16)"), 4.0);
    assert!(approx(eval("SIN(PI/2)"), 1.0));
}

#[test]
fn test_trig_functions() {
    assert_eq!(eval("SIN(0)"), 0.0);
    assert_eq!(eval("COS(0)"), 1.0);
    assert_eq!(eval("TAN(0)"), 0.0);
    assert!(approx(eval("TAN(PI/4)"), 1.0));
    assert!(approx(eval("ASIN(1)"), std::f64::consts::FRAC_PI_2));
    assert_eq!(eval("ACOS(1)"), 0.0);
    assert!(approx(eval("ACOS(0)"), std::f64::consts::FRAC_PI_2));
    assert!(approx(eval("ATAN(1)"), std::f64::consts::FRAC_PI_4));
    assert_eq!(eval("SINH(0)"), 0.0);
    assert!(approx(eval("SINH(1)"), 1.0f64.sinh()));
    assert_eq!(eval("COSH(0)"), 1.0);
    assert!(approx(eval("COSH(1)"), 1.0f64.cosh()));
    assert_eq!(eval("TANH(0)"), 0.0);
    assert!(approx(eval("TANH(1)"), 1.0f64.tanh()));
}

#[test]
fn test_floor_aliases() {
    assert_eq!(eval("INT(-1.5)"), -2.0);
    assert_eq!(eval("TRUNC(-1.5)"), -2.0);
    assert_eq!(eval("FLOOR(1.7)"), 1.0);
    assert_eq!(eval("CEIL(1.2)"), 2.0);
    assert_eq!(eval("SGN(-4)+SIGN(4)"), 0.0);
    assert_eq!(eval("FRAC(2.75)"), 0.75);
    assert_eq!(eval("ABS(-2.5)"), 2.5);
}

#[test]
fn test_rnd_non_positive_bound() {
    let mut parser = FormulaParser::new().with_random(SeededRandom::new(3));
    assert_eq!(parser.result("RND(-5)"), 0.0);
    assert!(!parser.error());
    assert_eq!(parser.result("RND(0)"), 0.0);
    assert!(!parser.error());
}

#[test]
fn test_nested_function_calls() {
    assert_eq!(eval("MAX(MIN(4;9);ABS(-6))"), 6.0);
    assert_eq!(eval("1+MAX(2;3)*2"), 7.0);
    assert_eq!(eval("MAX(1+2;2*2)"), 4.0);
    assert_eq!(eval("ABS(MIN(-3;-8))"), 8.0);
}

#[test]
fn test_conversion_and_sign_functions() {
    assert_eq!(eval("DAYS2MINS(1)"), 1440.0);
    assert_eq!(eval("DAYS2HOURS(2)"), 48.0);
    assert_eq!(eval("HOURS2MINS(1.5)"), 90.0);
    assert_eq!(eval("HOURS2DAYS(36)"), 1.5);
    assert_eq!(eval("MINS2HOURS(90)"), 1.5);
    assert_eq!(eval("MINS2DAYS(2880)"), 2.0);
    assert_eq!(eval("VALPO(-3)+VALNE(-3)"), -3.0);
    assert_eq!(eval("IFPO(2)+IFNE(2)+IFZE(0)+IFNZ(0)"), 2.0);
}

#[test]
fn test_rnd_with_seeded_source() {
    let mut parser = FormulaParser::new().with_random(SeededRandom::new(5));
    for _ in 0..20 {
        let value = parser.result("RND(6)");
        assert!(!parser.error());
        assert!((0.0..6.0).contains(&value));
        assert_eq!(value, value.floor());
    }
}

#[test]
fn test_divide_by_zero() {
    assert_eq!(eval_err("5/0"), "Divide by zero");
    assert_eq!(eval_err("1+10/(2-2)"), "Divide by zero");
}

#[test]
fn test_invalid_characters() {
    assert_eq!(eval_err("2+@"), "Invalid chars on expression");
    assert_eq!(eval_err("A=B"), "Invalid chars on expression");
    // "," is a decimal point, so this is MAX(1.2)
    assert_eq!(eval_err("MAX(1,2)"), "Wrong parameters number in: MAX");
}

#[test]
fn test_syntax_errors() {
    for formula in ["2+", "(1+2", "*3", "2X", "1.2.3", "", "()", "MAX(;)"] {
        assert_eq!(eval_err(formula), "Syntax error", "{formula}");
    }
}

#[test]
fn test_function_errors() {
    assert_eq!(eval_err("FOO(1)"), "Undefined function: FOO");
    assert_eq!(eval_err("MAX(1;2;3)"), "Wrong parameters number in: MAX");
    assert_eq!(eval_err("sgn(1;2)"), "Wrong parameters number in: SGN");
}

#[test]
fn test_try_result_returns_typed_error() {
    let mut parser = FormulaParser::new();
    assert_eq!(parser.try_result("2*3"), Ok(6.0));
    assert_eq!(parser.try_result("1/0"), Err(FormulaError::DivideByZero));
    assert!(parser.error());
    assert_eq!(parser.error_message(), "Divide by zero");
}

#[test]
fn test_variables_read_at_tokenize_time() {
    let mut parser = FormulaParser::new();
    parser.variables_mut().set("X", 1.0);
    assert_eq!(parser.result("X+X"), 2.0);
    assert_eq!(parser.infix().as_slice()[0].value, 1.0);

    parser.variables_mut().set("X", 2.0);
    assert_eq!(parser.result("X+X"), 4.0);
}

#[test]
fn test_idempotence() {
    let mut parser = FormulaParser::new();
    parser.variables_mut().set("Y", 4.0);
    for formula in ["Y*(2+3)", "Y/0", "MAX(Y;1)", "2+@"] {
        let first = parser.result(formula);
        let first_error = (parser.error(), parser.error_message().to_string());
        let second = parser.result(formula);
        let second_error = (parser.error(), parser.error_message().to_string());
        assert_eq!(first, second, "{formula}");
        assert_eq!(first_error, second_error, "{formula}");
    }
}

#[test]
fn test_static_parse() {
    assert_eq!(FormulaParser::parse("(2+3)*4"), 20.0);
    assert_eq!(FormulaParser::parse("5/0"), 0.0);
}

#[cfg(feature = "serde")]
#[test]
fn test_config_from_json() {
    let config: ParserConfig =
        serde_json::from_str(r#"{ "decimal_separator": ",", "max_atoms": null }"#).unwrap();
    assert_eq!(config.decimal_separator, ',');
    assert_eq!(config.max_atoms, None);
    assert!(config.constants.get("PI").is_some());
}
