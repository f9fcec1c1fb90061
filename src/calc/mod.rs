//! A small reference evaluation capability.
//!
//! The resolver core is agnostic to the statement language; this module
//! supplies a concrete one, just big enough to drive real documents:
//! integer and string arithmetic over `name = expression` bindings, plus a
//! record form `{ a = 1, b = 2 }` that binds several names in one
//! statement. It exists for the CLI, the integration tests, and the
//! documentation examples; embedders with their own expression engine
//! implement [`Evaluate`] themselves and never touch this.
//!
//! Failure mapping follows the resolver's taxonomy: malformed text is a
//! parse error, a reference to a name missing from the environment is an
//! unresolved-name error (and retried by the resolver on later passes),
//! and runtime failures like division by zero are plain evaluation errors.

mod parser;

use self::parser::{PRATT_PARSER, Rule, parse_statement};
use core::fmt;
use ecow::EcoString;
use pest::iterators::Pair;
use settle_core::environment::{Bindings, Environment, Name};
use settle_core::resolver::{EvalError, Evaluate, StatementError};

/// A calc value: an integer or a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalcValue {
    Int(i64),
    Str(EcoString),
}

impl CalcValue {
    fn type_name(&self) -> &'static str {
        match self {
            CalcValue::Int(_) => "Int",
            CalcValue::Str(_) => "Str",
        }
    }
}

impl fmt::Display for CalcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcValue::Int(value) => write!(f, "{}", value),
            CalcValue::Str(value) => {
                write!(f, "\"")?;
                for ch in value.chars() {
                    match ch {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        _ => write!(f, "{}", ch)?,
                    }
                }
                write!(f, "\"")
            }
        }
    }
}

/// The calc evaluation capability.
pub struct Calc;

impl Evaluate for Calc {
    type Value = CalcValue;

    fn evaluate(
        &self,
        statement: &str,
        env: &Environment<CalcValue>,
    ) -> Result<Bindings<CalcValue>, EvalError> {
        let mut pairs =
            parse_statement(statement).map_err(|e| StatementError::parse(e.to_string()))?;
        let statement_pair = pairs
            .next()
            .ok_or_else(|| StatementError::parse("empty statement"))?;

        let mut bindings = Bindings::new();
        for pair in statement_pair.into_inner() {
            match pair.as_rule() {
                Rule::binding => bindings.push(eval_binding(pair, env)?),
                Rule::record => {
                    for binding in pair.into_inner() {
                        bindings.push(eval_binding(binding, env)?);
                    }
                }
                Rule::EOI => {}
                rule => {
                    return Err(EvalError::Statement(StatementError::parse(format!(
                        "unexpected rule {:?}",
                        rule
                    ))));
                }
            }
        }
        Ok(bindings)
    }
}

fn eval_binding(
    pair: Pair<'_, Rule>,
    env: &Environment<CalcValue>,
) -> Result<(Name, CalcValue), StatementError> {
    let mut inner = pair.into_inner();
    let name = inner
        .next()
        .ok_or_else(|| StatementError::parse("binding without a name"))?;
    let expression = inner
        .next()
        .ok_or_else(|| StatementError::parse("binding without an expression"))?;
    let value = eval_expression(expression, env)?;
    Ok((Name::from(name.as_str()), value))
}

fn eval_expression(
    pair: Pair<'_, Rule>,
    env: &Environment<CalcValue>,
) -> Result<CalcValue, StatementError> {
    PRATT_PARSER
        .map_primary(|primary| match primary.as_rule() {
            Rule::int => primary
                .as_str()
                .parse::<i64>()
                .map(CalcValue::Int)
                .map_err(|_| StatementError::parse("integer literal out of range")),
            Rule::string => Ok(CalcValue::Str(unescape(primary.as_str()))),
            Rule::ident => env
                .get(primary.as_str())
                .cloned()
                .ok_or_else(|| StatementError::unresolved(primary.as_str())),
            Rule::expression => eval_expression(primary, env),
            rule => Err(StatementError::parse(format!(
                "unexpected rule {:?} in expression",
                rule
            ))),
        })
        .map_prefix(|op, rhs| match op.as_rule() {
            Rule::neg => match rhs? {
                CalcValue::Int(value) => value
                    .checked_neg()
                    .map(CalcValue::Int)
                    .ok_or_else(|| StatementError::other("integer overflow")),
                value => Err(StatementError::other(format!(
                    "cannot negate {}",
                    value.type_name()
                ))),
            },
            rule => Err(StatementError::parse(format!(
                "unexpected prefix {:?}",
                rule
            ))),
        })
        .map_infix(|lhs, op, rhs| apply_infix(lhs?, op.as_rule(), rhs?))
        .parse(pair.into_inner())
}

fn apply_infix(
    lhs: CalcValue,
    op: Rule,
    rhs: CalcValue,
) -> Result<CalcValue, StatementError> {
    use CalcValue::{Int, Str};
    let overflow = || StatementError::other("integer overflow");
    match (lhs, op, rhs) {
        (Int(a), Rule::add, Int(b)) => a.checked_add(b).map(Int).ok_or_else(overflow),
        (Int(a), Rule::sub, Int(b)) => a.checked_sub(b).map(Int).ok_or_else(overflow),
        (Int(a), Rule::mul, Int(b)) => a.checked_mul(b).map(Int).ok_or_else(overflow),
        (Int(_), Rule::div, Int(0)) => Err(StatementError::other("division by zero")),
        (Int(a), Rule::div, Int(b)) => a.checked_div(b).map(Int).ok_or_else(overflow),
        (Str(a), Rule::add, Str(b)) => {
            let mut joined = a;
            joined.push_str(&b);
            Ok(Str(joined))
        }
        (lhs, op, rhs) => Err(StatementError::other(format!(
            "cannot apply {:?} to {} and {}",
            op,
            lhs.type_name(),
            rhs.type_name()
        ))),
    }
}

/// Strip the surrounding quotes and process backslash escapes.
///
/// Unknown escapes keep the escaped character itself, so `\"` and `\'`
/// need no cases of their own.
fn unescape(raw: &str) -> EcoString {
    let body = &raw[1..raw.len() - 1];
    let mut text = EcoString::new();
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            text.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => text.push('\n'),
            Some('t') => text.push('\t'),
            Some('r') => text.push('\r'),
            Some('0') => text.push('\0'),
            Some(other) => text.push(other),
            None => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn eval(statement: &str) -> Result<Bindings<CalcValue>, EvalError> {
        Calc.evaluate(statement, &Environment::new())
    }

    fn eval_in(statement: &str, env: &Environment<CalcValue>) -> Bindings<CalcValue> {
        Calc.evaluate(statement, env).unwrap()
    }

    fn env_of(entries: &[(&str, CalcValue)]) -> Environment<CalcValue> {
        let mut env = Environment::new();
        for (name, value) in entries {
            env.merge(settle_core::resolver::single_binding(*name, value.clone()));
        }
        env
    }

    #[test]
    fn test_simple_binding() {
        let bindings = eval("A = 1").unwrap();
        assert_eq!(
            bindings.as_slice(),
            [(Name::from("A"), CalcValue::Int(1))].as_slice()
        );
    }

    #[test]
    fn test_operator_precedence() {
        let bindings = eval("A = 2 + 3 * 4").unwrap();
        assert_eq!(bindings[0].1, CalcValue::Int(14));
    }

    #[test]
    fn test_parentheses() {
        let bindings = eval("A = (2 + 3) * 4").unwrap();
        assert_eq!(bindings[0].1, CalcValue::Int(20));
    }

    #[test]
    fn test_negation() {
        let bindings = eval("A = -3 + 10").unwrap();
        assert_eq!(bindings[0].1, CalcValue::Int(7));
    }

    #[test]
    fn test_environment_lookup() {
        let env = env_of(&[("B", CalcValue::Int(41))]);
        let bindings = eval_in("A = B + 1", &env);
        assert_eq!(bindings[0].1, CalcValue::Int(42));
    }

    #[test]
    fn test_unknown_name_is_unresolved() {
        let result = eval("A = missing");
        assert_eq!(
            result,
            Err(EvalError::Statement(StatementError::unresolved("missing")))
        );
    }

    #[test]
    fn test_string_concatenation() {
        let bindings = eval("S = \"foo\" + 'bar'").unwrap();
        assert_eq!(bindings[0].1, CalcValue::Str("foobar".into()));
    }

    #[test]
    fn test_string_escapes() {
        let bindings = eval(r#"S = "a\"b\n""#).unwrap();
        assert_eq!(bindings[0].1, CalcValue::Str("a\"b\n".into()));
    }

    #[test]
    fn test_record_binds_every_field() {
        let bindings = eval("{ a = 1, b = 2 }").unwrap();
        assert_eq!(
            bindings.as_slice(),
            [
                (Name::from("a"), CalcValue::Int(1)),
                (Name::from("b"), CalcValue::Int(2)),
            ]
            .as_slice()
        );
    }

    #[test]
    fn test_record_fields_do_not_see_each_other() {
        // Record fields evaluate against the environment only; the whole
        // statement fails until `a` is resolvable from the outside.
        let result = eval("{ a = 1, b = a + 1 }");
        assert_eq!(
            result,
            Err(EvalError::Statement(StatementError::unresolved("a")))
        );
    }

    #[test]
    fn test_dotted_name_binding() {
        let bindings = eval("shared.Foo = 7").unwrap();
        assert_eq!(bindings[0].0, Name::from("shared.Foo"));
    }

    #[test]
    fn test_division_by_zero() {
        let result = eval("A = 1 / 0");
        assert_eq!(
            result,
            Err(EvalError::Statement(StatementError::other(
                "division by zero"
            )))
        );
    }

    #[test]
    fn test_type_mismatch() {
        let result = eval("A = 1 + 'x'");
        assert!(matches!(
            result,
            Err(EvalError::Statement(StatementError::Other { .. }))
        ));
    }

    #[test]
    fn test_malformed_statement_is_a_parse_error() {
        let result = eval("A =");
        assert!(matches!(
            result,
            Err(EvalError::Statement(StatementError::Parse { .. }))
        ));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(CalcValue::Int(42).to_string(), "42");
        assert_eq!(
            CalcValue::Str("a\"b".into()).to_string(),
            r#""a\"b""#
        );
    }
}
