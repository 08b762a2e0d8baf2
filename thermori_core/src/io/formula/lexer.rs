//! Lex a reaction formula string into a series of tokens for later parsing

use std::collections::VecDeque;

use thiserror::Error;

use crate::io::formula::token::Token;

pub struct Lexer {
    source: Vec<char>,
    tokens: VecDeque<Token>,
    start: usize,
    current: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            tokens: VecDeque::new(),
            start: 0,
            current: 0,
        }
    }

    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, LexerError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }

        self.tokens.push_back(Token::Eof);
        Ok(self.tokens.iter().cloned().collect())
    }

    fn scan_token(&mut self) -> Result<(), LexerError> {
        let c: char = self.advance();
        match c {
            '+' => self.add_token(Token::Plus),
            // Arrow notations: "<=>", "=>", or a bare "="
            '<' => self.read_forward_arrow()?,
            '=' => {
                if self.peek() == '>' {
                    self.advance();
                }
                self.add_token(Token::Arrow);
            }
            '0'..='9' | '.' => self.read_number()?,
            'a'..='z' | 'A'..='Z' | '_' => self.read_identifier(),
            // Whitespace
            ' ' | '\r' | '\n' | '\t' => {}
            _ => return Err(LexerError::InvalidCharacter(c)),
        };
        Ok(())
    }

    /// Read the tail of a "<=>" arrow, the leading '<' already consumed
    fn read_forward_arrow(&mut self) -> Result<(), LexerError> {
        for expected in ['=', '>'] {
            if self.peek() != expected {
                return Err(LexerError::MalformedArrow);
            }
            self.advance();
        }
        self.add_token(Token::Arrow);
        Ok(())
    }

    fn read_number(&mut self) -> Result<(), LexerError> {
        while Lexer::is_digit(self.peek()) || self.peek() == '.' {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        match text.parse::<f64>() {
            Ok(value) => {
                self.add_token(Token::Number(value));
                Ok(())
            }
            Err(_) => Err(LexerError::MalformedNumber(text)),
        }
    }

    fn read_identifier(&mut self) {
        while Lexer::is_alphanumeric(self.peek()) {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        self.add_token(Token::Identifier(text));
    }

    fn advance(&mut self) -> char {
        let char_at_current = self.source[self.current];
        self.current += 1;
        char_at_current
    }

    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    fn is_alpha(c: char) -> bool {
        matches!(c, 'a'..='z' | 'A'..='Z' | '_')
    }

    fn is_alphanumeric(c: char) -> bool {
        Lexer::is_alpha(c) || Lexer::is_digit(c)
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            return '\0';
        }
        self.source[self.current]
    }

    fn add_token(&mut self, token: Token) {
        self.tokens.push_back(token);
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

/// Enum representing possible lexing errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexerError {
    #[error("invalid character {0:?} in reaction formula")]
    InvalidCharacter(char),
    #[error("malformed reaction arrow, expected \"<=>\"")]
    MalformedArrow,
    #[error("malformed stoichiometric coefficient {0:?}")]
    MalformedNumber(String),
}
