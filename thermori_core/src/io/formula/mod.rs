//! Module for parsing reaction formula strings into sparse stoichiometries

use thiserror::Error;

use crate::io::formula::lexer::LexerError;
use crate::io::formula::parser::ParseError;
use crate::model::reaction::Stoichiometry;

mod lexer;
pub mod parser;
mod token;

/// Parse a reaction formula string into a sparse stoichiometry
///
/// # Parameters
/// - `input`: &str holding the reaction formula, e.g. `"2 C00001 + C00002 <=> C00009"`
///
/// # Returns
/// Parse result which is
/// - `Ok`: map from metabolite identifier to signed stoichiometric
///   coefficient (negative = substrate, positive = product)
/// - `Err`: the FormulaParseError describing the issue with the formula
///   which was being parsed
///
/// # Examples
/// ```rust
/// use thermori_core::io::formula::parse_formula;
/// let stoichiometry = parse_formula("C00002 + C00001 <=> C00008 + C00009").unwrap();
/// assert_eq!(stoichiometry.get("C00002"), Some(&-1.0));
/// assert_eq!(stoichiometry.get("C00008"), Some(&1.0));
/// ```
pub fn parse_formula(input: &str) -> Result<Stoichiometry, FormulaParseError> {
    // Start by creating a lexer
    let mut lexer = lexer::Lexer::new(input);
    // Convert the formula string into tokens
    let tokens = lexer.scan_tokens()?;

    // Now parse those tokens into a stoichiometry
    let mut parser = parser::FormulaParser::new(tokens);
    let stoichiometry = parser.parse()?;
    Ok(stoichiometry)
}

/// Enum representing possible lex and parse errors
#[derive(Debug, Error)]
pub enum FormulaParseError {
    /// Lexing Error
    #[error("error occurred during lexing (conversion of formula string to tokens)")]
    LexingError(#[from] LexerError),
    /// Parsing Error
    #[error("error occurred during parsing (conversion of tokens to stoichiometry)")]
    ParsingError(#[from] ParseError),
}
