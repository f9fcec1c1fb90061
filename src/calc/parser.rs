use lazy_static::lazy_static;
use pest::iterators::Pairs;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest::Parser;
use pest_derive::Parser;

lazy_static! {
    // Note: precedence is defined lowest to highest.
    pub(crate) static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        .op(
            Op::infix(Rule::add, Assoc::Left) |
            Op::infix(Rule::sub, Assoc::Left)
        )                                               // `+`, `-`
        .op(
            Op::infix(Rule::mul, Assoc::Left) |
            Op::infix(Rule::div, Assoc::Left)
        )                                               // `*`, `/`
        .op(Op::prefix(Rule::neg))                      // `-`
        ;
}

#[derive(Parser)]
#[grammar = "calc/calc.pest"]
pub struct CalcParser;

/// Parse one statement, returning the pairs under `Rule::statement`.
pub(crate) fn parse_statement(text: &str) -> Result<Pairs<'_, Rule>, pest::error::Error<Rule>> {
    CalcParser::parse(Rule::statement, text)
}
