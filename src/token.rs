use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// Kind of a [`Token`].
///
/// The single-character punctuation and the reserved keywords each form a
/// contiguous block of variants, listed in [`TokenType::PUNCTUATION`] and
/// [`TokenType::KEYWORDS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum TokenType {
    // Single character tokens
    Plus,
    Minus,
    Mul,
    FloatDiv,
    LParen,
    RParen,
    Semi,
    Dot,
    Colon,
    Comma,
    UnderScore,
    AtSign,
    Exclamation,
    Dollar,
    Hash,
    Percentage,
    Ampersand,
    Equal,
    Diacritic,
    Pipe,
    QuestionMark,
    LessThan,
    GreaterThan,
    LBracket,
    RBracket,
    Tilde,
    Circumflex,
    LBrace,
    RBrace,

    // Reserved keywords
    Program,
    Integer,
    String,
    Boolean,
    True,
    False,
    Real,
    IntegerDiv,
    Var,
    Begin,
    Writeln,
    End,

    // Literals and markers
    ID,
    IntegerConst,
    RealConst,
    StringConst,
    Assign,
    Eof,
}

static RESERVED_KEYWORDS: Lazy<HashMap<&'static str, TokenType>> =
    Lazy::new(|| {
        TokenType::KEYWORDS
            .iter()
            .map(|token_type| (token_type.as_str(), *token_type))
            .collect()
    });

impl TokenType {
    /// Single character tokens, in declaration order.
    pub const PUNCTUATION: [TokenType; 29] = [
        Self::Plus,
        Self::Minus,
        Self::Mul,
        Self::FloatDiv,
        Self::LParen,
        Self::RParen,
        Self::Semi,
        Self::Dot,
        Self::Colon,
        Self::Comma,
        Self::UnderScore,
        Self::AtSign,
        Self::Exclamation,
        Self::Dollar,
        Self::Hash,
        Self::Percentage,
        Self::Ampersand,
        Self::Equal,
        Self::Diacritic,
        Self::Pipe,
        Self::QuestionMark,
        Self::LessThan,
        Self::GreaterThan,
        Self::LBracket,
        Self::RBracket,
        Self::Tilde,
        Self::Circumflex,
        Self::LBrace,
        Self::RBrace,
    ];

    /// Reserved keywords, in declaration order.
    pub const KEYWORDS: [TokenType; 12] = [
        Self::Program,
        Self::Integer,
        Self::String,
        Self::Boolean,
        Self::True,
        Self::False,
        Self::Real,
        Self::IntegerDiv,
        Self::Var,
        Self::Begin,
        Self::Writeln,
        Self::End,
    ];

    /// Canonical source text of this [`TokenType`]. Keywords are uppercase,
    /// literal and marker kinds return their name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mul => "*",
            Self::FloatDiv => "/",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Semi => ";",
            Self::Dot => ".",
            Self::Colon => ":",
            Self::Comma => ",",
            Self::UnderScore => "_",
            Self::AtSign => "@",
            Self::Exclamation => "!",
            Self::Dollar => "$",
            Self::Hash => "#",
            Self::Percentage => "%",
            Self::Ampersand => "&",
            Self::Equal => "=",
            Self::Diacritic => "¨",
            Self::Pipe => "|",
            Self::QuestionMark => "?",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Tilde => "~",
            Self::Circumflex => "^",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Program => "PROGRAM",
            Self::Integer => "INTEGER",
            Self::String => "STRING",
            Self::Boolean => "BOOLEAN",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Real => "REAL",
            Self::IntegerDiv => "DIV",
            Self::Var => "VAR",
            Self::Begin => "BEGIN",
            Self::Writeln => "WRITELN",
            Self::End => "END",
            Self::ID => "ID",
            Self::IntegerConst => "INTEGER_CONST",
            Self::RealConst => "REAL_CONST",
            Self::StringConst => "STRING_CONST",
            Self::Assign => ":=",
            Self::Eof => "EOF",
        }
    }

    /// Name used in listings and error messages, e.g. `SEMI`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Mul => "MUL",
            Self::FloatDiv => "FLOAT_DIV",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::Semi => "SEMI",
            Self::Dot => "DOT",
            Self::Colon => "COLON",
            Self::Comma => "COMMA",
            Self::UnderScore => "UNDER_SCORE",
            Self::AtSign => "AT_SIGN",
            Self::Exclamation => "EXCLAMATION",
            Self::Dollar => "DOLLAR",
            Self::Hash => "HASH",
            Self::Percentage => "PERCENTAGE",
            Self::Ampersand => "AMPERSAND",
            Self::Equal => "EQUAL",
            Self::Diacritic => "DIACRITIC",
            Self::Pipe => "PIPE",
            Self::QuestionMark => "QUESTION_MARK",
            Self::LessThan => "LESS_THAN",
            Self::GreaterThan => "GREATER_THAN",
            Self::LBracket => "LBRACKET",
            Self::RBracket => "RBRACKET",
            Self::Tilde => "TILDE",
            Self::Circumflex => "CIRCUMFLEX",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
            Self::IntegerDiv => "INTEGER_DIV",
            Self::Assign => "ASSIGN",
            other => other.as_str(),
        }
    }

    /// Whether this [`TokenType`] is a single character token.
    pub fn is_punctuation(self) -> bool {
        Self::PUNCTUATION.contains(&self)
    }

    /// Whether this [`TokenType`] is a reserved keyword.
    pub fn is_keyword(self) -> bool {
        Self::KEYWORDS.contains(&self)
    }

    /// Looks up the single character token for `character`.
    pub fn from_punctuation(character: char) -> Option<Self> {
        Self::PUNCTUATION.iter().copied().find(|token_type| {
            let mut chars = token_type.as_str().chars();
            chars.next() == Some(character) && chars.next().is_none()
        })
    }

    /// Looks up a reserved keyword, ignoring case.
    pub fn from_keyword(word: &str) -> Option<Self> {
        RESERVED_KEYWORDS.get(word.to_uppercase().as_str()).copied()
    }

    /// Builtin type name of the value a literal of this kind produces.
    pub fn literal_type_name(self) -> Option<&'static str> {
        match self {
            Self::IntegerConst => Some(Self::Integer.as_str()),
            Self::RealConst => Some(Self::Real.as_str()),
            Self::StringConst => Some(Self::String.as_str()),
            Self::True | Self::False => Some(Self::Boolean.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Value carried by a [`Token`].
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum Literal {
    Integer(i64),
    Real(f64),
    String(String),
    Boolean(bool),
    Identifier(String),
    /// Canonical text of a keyword or punctuation token.
    Reserved(&'static str),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(integer) => write!(f, "{}", integer),
            Literal::Real(real) => write!(f, "{:?}", real),
            Literal::String(string) | Literal::Identifier(string) => {
                write!(f, "'{}'", string)
            }
            Literal::Boolean(true) => write!(f, "TRUE"),
            Literal::Boolean(false) => write!(f, "FALSE"),
            Literal::Reserved(text) => write!(f, "'{}'", text),
        }
    }
}

/// DPL Token
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    token_type: TokenType,
    literal: Option<Literal>,
    line_no: usize,
    col_no: usize,
}

impl Token {
    /// Create a new [`Token`].
    pub fn new(
        token_type: TokenType,
        literal: Option<Literal>,
        line_no: usize,
        col_no: usize,
    ) -> Self {
        Self {
            token_type,
            literal,
            line_no,
            col_no,
        }
    }

    /// Create a keyword or punctuation [`Token`], carrying its canonical text.
    pub fn reserved(token_type: TokenType, line_no: usize, col_no: usize) -> Self {
        Self::new(
            token_type,
            Some(Literal::Reserved(token_type.as_str())),
            line_no,
            col_no,
        )
    }

    /// Create an identifier [`Token`].
    pub fn identifier<S: Into<String>>(
        name: S,
        line_no: usize,
        col_no: usize,
    ) -> Self {
        Self::new(
            TokenType::ID,
            Some(Literal::Identifier(name.into())),
            line_no,
            col_no,
        )
    }

    /// Kind of this token.
    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    /// Value carried by this token, if any.
    pub fn literal(&self) -> Option<&Literal> {
        self.literal.as_ref()
    }

    /// Line the token starts on, counting from 1.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Column the token starts on, counting from 1.
    pub fn col_no(&self) -> usize {
        self.col_no
    }

    /// Textual value of identifiers, strings and reserved tokens.
    pub fn text(&self) -> Option<&str> {
        match &self.literal {
            Some(
                Literal::Identifier(string) | Literal::String(string),
            ) => Some(string),
            Some(Literal::Reserved(text)) => Some(text),
            _ => None,
        }
    }

    /// Whether this is a numeric literal equal to zero.
    pub fn is_zero(&self) -> bool {
        match self.literal {
            Some(Literal::Integer(integer)) => integer == 0,
            Some(Literal::Real(real)) => real == 0.0,
            _ => false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, ", self.token_type)?;

        match &self.literal {
            Some(literal) => write!(f, "{}", literal)?,
            None => write!(f, "None")?,
        }

        write!(f, ", position={}:{})", self.line_no, self.col_no)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_type_groups_test() {
        assert!(TokenType::PUNCTUATION.iter().all(|t| t.as_str().chars().count() == 1));
        assert!(TokenType::KEYWORDS.iter().all(|t| t.is_keyword()));
        assert!(!TokenType::ID.is_keyword());
        assert!(!TokenType::Assign.is_punctuation());
        assert!(TokenType::RBrace.is_punctuation());
    }

    #[test]
    fn token_type_from_keyword_test() {
        assert_eq!(TokenType::from_keyword("program"), Some(TokenType::Program));
        assert_eq!(TokenType::from_keyword("WriteLn"), Some(TokenType::Writeln));
        assert_eq!(TokenType::from_keyword("div"), Some(TokenType::IntegerDiv));
        assert_eq!(TokenType::from_keyword("programs"), None);
    }

    #[test]
    fn token_type_from_punctuation_test() {
        assert_eq!(TokenType::from_punctuation('-'), Some(TokenType::Minus));
        assert_eq!(TokenType::from_punctuation('¨'), Some(TokenType::Diacritic));
        assert_eq!(TokenType::from_punctuation('\''), None);
    }

    #[test]
    fn token_display_test() {
        let token = Token::new(
            TokenType::IntegerConst,
            Some(Literal::Integer(3)),
            1,
            4,
        );
        assert_eq!(token.to_string(), "Token(INTEGER_CONST, 3, position=1:4)");

        let token = Token::reserved(TokenType::Semi, 2, 7);
        assert_eq!(token.to_string(), "Token(SEMI, ';', position=2:7)");
    }
}
