use thiserror::Error;

use crate::io::formula::token::Token;
use crate::model::reaction::Stoichiometry;

/*
Reaction formula grammar:
reaction -> side ARROW side
side     -> term ("+" term)*
term     -> NUMBER? IDENTIFIER

e.g. 2 C00001 + C00002 <=> C00003
 */

/// Reaction formula parser
pub struct FormulaParser {
    /// Vector of tokens from the formula string
    tokens: Vec<Token>,
    /// Current token being processed
    current: usize,
}

impl FormulaParser {
    /// Create a new FormulaParser
    pub fn new(tokens: Vec<Token>) -> FormulaParser {
        FormulaParser { tokens, current: 0 }
    }

    // region Parsing Functions

    /// Parse the token vector into a sparse stoichiometry. Substrate-side
    /// coefficients are negated, a metabolite appearing on both sides has
    /// its coefficients summed, and entries that cancel to zero are
    /// dropped.
    pub fn parse(&mut self) -> Result<Stoichiometry, ParseError> {
        let mut stoichiometry = Stoichiometry::new();
        self.side(&mut stoichiometry, -1.0)?;
        self.consume(Token::Arrow, "Expect reaction arrow between sides.")?;
        self.side(&mut stoichiometry, 1.0)?;
        if !self.is_at_end() {
            return Err(ParseError::TrailingInput);
        }
        stoichiometry.retain(|_, coefficient| *coefficient != 0.0);
        Ok(stoichiometry)
    }

    fn side(&mut self, stoichiometry: &mut Stoichiometry, sign: f64) -> Result<(), ParseError> {
        self.term(stoichiometry, sign)?;
        while self.match_token(Token::Plus) {
            self.term(stoichiometry, sign)?;
        }
        Ok(())
    }

    fn term(&mut self, stoichiometry: &mut Stoichiometry, sign: f64) -> Result<(), ParseError> {
        let coefficient = self.match_number().unwrap_or(1.0);
        match self.match_identifier() {
            Some(metabolite) => {
                *stoichiometry.entry(metabolite).or_insert(0.0) += sign * coefficient;
                Ok(())
            }
            None => Err(ParseError::ExpectedMetabolite),
        }
    }

    // endregion Parsing Functions

    // region parsing helper functions

    /// Check whether the token at the current position matches the provided
    /// `token`, if it does advance [`self.current`] and return true,
    /// otherwise return false
    fn match_token(&mut self, token: Token) -> bool {
        if self.check(&token) {
            self.advance();
            return true;
        }
        false
    }

    /// If the current token is an identifier, advance past it and return
    /// the metabolite id, otherwise return None
    fn match_identifier(&mut self) -> Option<String> {
        if let Token::Identifier(id) = self.peek() {
            self.advance();
            return Some(id);
        }
        None
    }

    /// If the current token is a number, advance past it and return its
    /// value, otherwise return None
    fn match_number(&mut self) -> Option<f64> {
        if let Token::Number(value) = self.peek() {
            self.advance();
            return Some(value);
        }
        None
    }

    /// Check whether the current token matches the provided `token`
    fn check(&self, token: &Token) -> bool {
        if self.is_at_end() {
            return false;
        }
        &self.peek() == token
    }

    /// Advance `self.current` one position unless at the end of the token
    /// Vec, then return the previous token
    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// Check whether the parser is at the end of the token Vec
    fn is_at_end(&self) -> bool {
        self.peek() == Token::Eof
    }

    /// Get a copy of the current token
    fn peek(&self) -> Token {
        self.tokens[self.current].clone()
    }

    /// Get a copy of the previous token
    fn previous(&self) -> Token {
        self.tokens[self.current - 1].clone()
    }

    /// Check whether the current token matches an input token, if it
    /// matches advance to the next token, and if it doesn't return an error
    fn consume(&mut self, token: Token, msg: &str) -> Result<Token, ParseError> {
        if self.check(&token) {
            return Ok(self.advance());
        }

        Err(ParseError::MissingToken(msg.to_string()))
    }

    // endregion parsing helper functions
}

/// Enum representing possible parse errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// A term did not contain a metabolite identifier
    #[error("expected a metabolite identifier")]
    ExpectedMetabolite,
    /// A required token was missing
    #[error("{0}")]
    MissingToken(String),
    /// Tokens remained after the product side was parsed
    #[error("unexpected trailing input after the product side")]
    TrailingInput,
}

#[cfg(test)]
mod tests {
    use crate::io::formula::lexer::Lexer;
    use crate::io::formula::parser::{FormulaParser, ParseError};

    fn parse(formula: &str) -> Result<crate::model::reaction::Stoichiometry, ParseError> {
        let tokens = Lexer::new(formula)
            .scan_tokens()
            .unwrap_or_else(|_| panic!("Failed to lex during test"));
        FormulaParser::new(tokens).parse()
    }

    #[test]
    fn test_simple_reaction() {
        let stoichiometry = parse("A + B <=> C").unwrap();
        assert_eq!(stoichiometry.get("A"), Some(&-1.0));
        assert_eq!(stoichiometry.get("B"), Some(&-1.0));
        assert_eq!(stoichiometry.get("C"), Some(&1.0));
    }

    #[test]
    fn test_explicit_coefficients() {
        let stoichiometry = parse("2 C00001 + C00002 <=> 3 C00003").unwrap();
        assert_eq!(stoichiometry.get("C00001"), Some(&-2.0));
        assert_eq!(stoichiometry.get("C00002"), Some(&-1.0));
        assert_eq!(stoichiometry.get("C00003"), Some(&3.0));
    }

    #[test]
    fn test_both_sides_merge() {
        // 2 A -> A nets to one A consumed
        let stoichiometry = parse("2 A + B <=> A + C").unwrap();
        assert_eq!(stoichiometry.get("A"), Some(&-1.0));
        assert_eq!(stoichiometry.get("B"), Some(&-1.0));
        assert_eq!(stoichiometry.get("C"), Some(&1.0));
    }

    #[test]
    fn test_cancelled_metabolite_dropped() {
        let stoichiometry = parse("A + B <=> A + C").unwrap();
        assert!(!stoichiometry.contains_key("A"));
        assert_eq!(stoichiometry.get("B"), Some(&-1.0));
        assert_eq!(stoichiometry.get("C"), Some(&1.0));
    }

    #[test]
    fn test_missing_arrow() {
        match parse("A + B + C") {
            Err(ParseError::MissingToken(_)) => {}
            other => panic!("Expected missing-arrow error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_metabolite() {
        assert_eq!(parse("A + <=> B"), Err(ParseError::ExpectedMetabolite));
    }
}
