use crate::error::TokenizeError;
use crate::token::{Literal, Token, TokenType};
use log::{debug, trace};
use std::iter::Peekable;
use std::str::Chars;

type Result<T> = std::result::Result<T, TokenizeError>;

/// Splits DPL source text into [`Token`]s, one at a time.
///
/// The final item is always a [`TokenType::Eof`] token. After an error or
/// the EOF token, the iterator is exhausted.
pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    current_char: Option<char>,
    line_no: usize,
    col_no: usize,
    ended: bool,
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.ended {
            return None;
        }

        let result = self.next_token();

        match &result {
            Ok(token) => {
                trace!("{}", token);
                if token.token_type() == TokenType::Eof {
                    self.ended = true;
                }
            }
            Err(_) => self.ended = true,
        }

        Some(result)
    }
}

impl<'a> Tokenizer<'a> {
    /// Create a new [`Tokenizer`] over `input_text`.
    pub fn new(input_text: &'a str) -> Self {
        debug!("Creating tokenizer:\n{}", input_text);

        let mut chars = input_text.chars().peekable();
        let current_char = chars.next();

        Self {
            chars,
            current_char,
            line_no: 1,
            col_no: 1,
            ended: false,
        }
    }

    fn advance(&mut self) {
        let previous = self.current_char;
        self.current_char = self.chars.next();

        match previous {
            Some('\n') => {
                self.line_no += 1;
                self.col_no = 1;
            }
            // EOF keeps the column of the last character.
            _ if self.current_char.is_some() => self.col_no += 1,
            _ => (),
        }
    }

    fn lookahead(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn skip_whitespace(&mut self) {
        while self.current_char.map_or(false, char::is_whitespace) {
            self.advance();
        }
    }

    fn skip_comment(&mut self) -> Result<()> {
        let (line, column) = (self.line_no, self.col_no);

        // Opening brace
        self.advance();

        loop {
            match self.current_char {
                Some('}') => break,
                Some(_) => self.advance(),
                None => {
                    return Err(TokenizeError::UnterminatedComment {
                        line,
                        column,
                    })
                }
            }
        }

        // Closing brace
        self.advance();

        Ok(())
    }

    fn handle_identifier(&mut self) -> Token {
        let (line_no, col_no) = (self.line_no, self.col_no);

        let mut value = String::new();

        while let Some(character) = self.current_char {
            if !(character.is_alphanumeric() || character == '_') {
                break;
            }

            value.push(character);
            self.advance();
        }

        match TokenType::from_keyword(&value) {
            Some(TokenType::True) => Token::new(
                TokenType::True,
                Some(Literal::Boolean(true)),
                line_no,
                col_no,
            ),
            Some(TokenType::False) => Token::new(
                TokenType::False,
                Some(Literal::Boolean(false)),
                line_no,
                col_no,
            ),
            Some(keyword) => Token::reserved(keyword, line_no, col_no),
            None => Token::identifier(value, line_no, col_no),
        }
    }

    fn crawl_digits(&mut self, value: &mut String) {
        while let Some(character) = self.current_char {
            if !character.is_ascii_digit() {
                break;
            }

            value.push(character);
            self.advance();
        }
    }

    fn handle_number(&mut self) -> Result<Token> {
        let (line_no, col_no) = (self.line_no, self.col_no);

        let mut value = String::new();
        self.crawl_digits(&mut value);

        let is_real = self.current_char == Some('.');

        if is_real {
            value.push('.');
            self.advance();
            self.crawl_digits(&mut value);
        }

        let literal = if is_real {
            value.parse::<f64>().ok().map(Literal::Real)
        } else {
            value.parse::<i64>().ok().map(Literal::Integer)
        };

        let token_type = if is_real {
            TokenType::RealConst
        } else {
            TokenType::IntegerConst
        };

        match literal {
            Some(literal) => {
                Ok(Token::new(token_type, Some(literal), line_no, col_no))
            }
            None => Err(TokenizeError::InvalidNumber {
                text: value,
                line: line_no,
                column: col_no,
            }),
        }
    }

    fn handle_string(&mut self) -> Token {
        let (line_no, col_no) = (self.line_no, self.col_no);

        // Opening quote
        self.advance();

        let mut value = String::new();

        while let Some(character) = self.current_char {
            if !(character.is_alphabetic()
                || TokenType::from_punctuation(character).is_some())
            {
                break;
            }

            value.push(character);
            self.advance();

            if self.current_char.map_or(false, char::is_whitespace) {
                value.push(' ');
                self.skip_whitespace();
            }
        }

        // Closing quote, whichever character it is.
        self.advance();

        trace!(r#"Crawled string: "{}""#, value);

        Token::new(
            TokenType::StringConst,
            Some(Literal::String(value)),
            line_no,
            col_no,
        )
    }

    fn handle_punctuation(&mut self, character: char) -> Result<Token> {
        let (line_no, col_no) = (self.line_no, self.col_no);

        let token_type = TokenType::from_punctuation(character).ok_or(
            TokenizeError::UnrecognizedCharacter {
                character,
                line: line_no,
                column: col_no,
            },
        )?;

        self.advance();

        Ok(Token::reserved(token_type, line_no, col_no))
    }

    fn next_token(&mut self) -> Result<Token> {
        while let Some(character) = self.current_char {
            if character.is_whitespace() {
                self.skip_whitespace();
                continue;
            }

            if character == '{' {
                self.skip_comment()?;
                continue;
            }

            if character.is_alphabetic() {
                return Ok(self.handle_identifier());
            }

            if character == '\'' || character == '"' {
                return Ok(self.handle_string());
            }

            if character.is_ascii_digit() {
                return self.handle_number();
            }

            if character == ':' && self.lookahead() == Some('=') {
                let token =
                    Token::reserved(TokenType::Assign, self.line_no, self.col_no);
                self.advance();
                self.advance();
                return Ok(token);
            }

            return self.handle_punctuation(character);
        }

        Ok(Token::new(TokenType::Eof, None, self.line_no, self.col_no))
    }
}
