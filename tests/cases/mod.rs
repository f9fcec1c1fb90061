use settle::calc::{Calc, CalcValue};
use settle::{Engine, EngineOptions, Environment};

pub fn engine() -> Engine<Calc> {
    Engine::new(Calc, EngineOptions::default())
}

/// Flatten an environment into comparable `(name, value)` pairs, assuming
/// every value is an integer.
pub fn int_entries(env: &Environment<CalcValue>) -> Vec<(&str, i64)> {
    env.iter()
        .map(|(name, value)| match value {
            CalcValue::Int(n) => (name, *n),
            CalcValue::Str(s) => panic!("expected Int for {}, got {:?}", name, s),
        })
        .collect()
}
