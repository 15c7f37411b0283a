use const_format::concatcp;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

#[derive(Clone, Default, Debug, PartialEq)]
pub struct Token {
    pub(crate) typ: TokenType,
    pub(crate) lexeme: String,
}

impl Token {
    pub fn new(typ: TokenType, lexeme: &str) -> Self {
        Self {
            typ,
            lexeme: lexeme.to_string(),
        }
    }
    pub fn typ(&self) -> TokenType {
        self.typ
    }
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }
    pub(crate) fn is(&self, typ: TokenType) -> bool {
        self.typ == typ
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}('{}')", self.typ, self.lexeme)
    }
}

#[allow(non_camel_case_types)]
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum TokenType {
    ENDMARKER,
    #[default]
    ERRORTOKEN,
    NUMBER,
    NAME,
    VAR,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    EXCLAMATION,
    EQUAL,
    SEMI,
    LPAR,
    RPAR,
}

const PLUS: (&str, TokenType) = ("+", TokenType::PLUS);
const MINUS: (&str, TokenType) = ("-", TokenType::MINUS);
const STAR: (&str, TokenType) = ("*", TokenType::STAR);
const SLASH: (&str, TokenType) = ("/", TokenType::SLASH);
const EXCLAMATION: (&str, TokenType) = ("!", TokenType::EXCLAMATION);
const EQUAL: (&str, TokenType) = ("=", TokenType::EQUAL);
const SEMI: (&str, TokenType) = (";", TokenType::SEMI);
const LPAR: (&str, TokenType) = ("(", TokenType::LPAR);
const RPAR: (&str, TokenType) = (")", TokenType::RPAR);

const SIMPLE_TOKENS: [(&str, TokenType); 9] =
    [PLUS, MINUS, STAR, SLASH, EXCLAMATION, EQUAL, SEMI, LPAR, RPAR];

const KEYWORDS: [(&str, TokenType); 1] = [("var", TokenType::VAR)];

const S_WHITESPACE: &str = r"^[ \t\r\n]+";
const S_DIGITS: &str = r"[0-9]+";
const S_WORD: &str = r"[A-Za-z][A-Za-z0-9]*";
const S_NUMBER: &str = concatcp!("^", S_DIGITS);
const S_NAME: &str = concatcp!("^", S_WORD);
// An unrecognised character swallows the letters and digits glued to it.
const S_UNKNOWN: &str = r"^.[A-Za-z0-9]*";

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(S_WHITESPACE).expect("Error compiling regex."));
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(S_NUMBER).expect("Error compiling regex."));
static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(S_NAME).expect("Error compiling regex."));
static UNKNOWN: Lazy<Regex> = Lazy::new(|| Regex::new(S_UNKNOWN).expect("Error compiling regex."));

/// Lazily splits source text into tokens, one per call to [`Tokenizer::next_token`].
///
/// Once the input is exhausted every further call yields `ENDMARKER`.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    start: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, start: 0 }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let token = self.read_token();
        trace!(token = %token, "read token");
        token
    }

    fn read_token(&mut self) -> Token {
        let rest = &self.input[self.start..];
        for (lexeme, tok_type) in SIMPLE_TOKENS {
            if rest.starts_with(lexeme) {
                return self.push(tok_type, lexeme.len());
            }
        }
        if rest.is_empty() {
            return Token::new(TokenType::ENDMARKER, "");
        }
        if let Some(m) = NUMBER.find(rest) {
            return self.push(TokenType::NUMBER, m.end());
        }
        if let Some(m) = NAME.find(rest) {
            let typ = KEYWORDS
                .iter()
                .find(|(keyword, _)| *keyword == m.as_str())
                .map_or(TokenType::NAME, |(_, typ)| *typ);
            return self.push(typ, m.end());
        }
        let len = UNKNOWN
            .find(rest)
            .map(|m| m.end())
            .unwrap_or_else(|| rest.chars().next().map_or(rest.len(), char::len_utf8));
        self.push(TokenType::ERRORTOKEN, len)
    }

    fn skip_whitespace(&mut self) {
        if let Some(m) = WHITESPACE.find(&self.input[self.start..]) {
            self.start += m.end();
        }
    }

    fn push(&mut self, typ: TokenType, len: usize) -> Token {
        let end = self.start + len;
        let token = Token::new(typ, &self.input[self.start..end]);
        self.start = end;
        token
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (!token.is(TokenType::ENDMARKER)).then_some(token)
    }
}

/// Collects every token of `input`, terminated by a single `ENDMARKER`.
pub fn tokenize_string(input: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Tokenizer::new(input).collect();
    tokens.push(Token::new(TokenType::ENDMARKER, ""));
    tokens
}
