use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Lexical token of the authored asset files.
///
/// The scanner is deliberately permissive: anything it does not recognize
/// becomes a `Punct`, so unrelated code around the data blocks never stops
/// the scan. Only an unterminated string or block comment does, via `Invalid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Identifier(String),
    QuotedString(String),
    Number(String),
    Punct(char),
    Invalid(ErrorKind),
    EndOfFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self { line: 1, col: 1 }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Location { line, col } = self;
        write!(f, "{line}:{col}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedToken {
    pub tok: Token,
    pub loc: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnterminatedString,
    UnterminatedComment,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::UnterminatedString => f.write_str("unterminated string literal"),
            ErrorKind::UnterminatedComment => f.write_str("unterminated block comment"),
        }
    }
}

/// Scan `source` into tokens. The result always ends with `EndOfFile`.
pub fn scan(source: &str) -> Vec<ScannedToken> {
    Scanner::new(source).scan()
}

struct Scanner {
    chars: Vec<char>,
    tokens: Vec<ScannedToken>,
    index: usize,
    loc: Location,
}

impl Scanner {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            tokens: Vec::new(),
            index: 0,
            loc: Location::default(),
        }
    }

    fn scan(mut self) -> Vec<ScannedToken> {
        while !self.at_end() {
            let start = self.loc;
            if let Err(kind) = self.scan_token(start) {
                self.add(Token::Invalid(kind), start);
                break;
            }
        }
        let end = self.loc;
        self.add(Token::EndOfFile, end);
        self.tokens
    }

    fn scan_token(&mut self, start: Location) -> Result<(), ErrorKind> {
        match self.current() {
            ch if ch.is_whitespace() => self.increment(),
            '/' if self.peek() == Some('/') => self.line_comment(),
            '/' if self.peek() == Some('*') => self.block_comment()?,
            quote @ ('\'' | '"' | '`') => {
                let value = self.string(quote)?;
                self.add(Token::QuotedString(value), start);
            }
            '0'..='9' => {
                let lexeme = self.take_while(|ch| ch.is_ascii_alphanumeric() || ch == '.' || ch == '_');
                self.add(Token::Number(lexeme), start);
            }
            ch if is_ident_start(ch) => {
                let name = self.take_while(is_ident_char);
                self.add(Token::Identifier(name), start);
            }
            ch => {
                self.increment();
                self.add(Token::Punct(ch), start);
            }
        }
        Ok(())
    }

    fn at_end(&self) -> bool {
        self.index >= self.chars.len()
    }

    fn current(&self) -> char {
        self.chars[self.index]
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index + 1).copied()
    }

    fn increment(&mut self) {
        if self.current() == '\n' {
            self.loc.line += 1;
            self.loc.col = 1;
        } else {
            self.loc.col += 1;
        }
        self.index += 1;
    }

    fn add(&mut self, tok: Token, loc: Location) {
        self.tokens.push(ScannedToken { tok, loc });
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut lexeme = String::new();
        while !self.at_end() && pred(self.current()) {
            lexeme.push(self.current());
            self.increment();
        }
        lexeme
    }

    fn line_comment(&mut self) {
        while !self.at_end() && self.current() != '\n' {
            self.increment();
        }
    }

    fn block_comment(&mut self) -> Result<(), ErrorKind> {
        // Skip the opening "/*".
        self.increment();
        self.increment();
        loop {
            if self.at_end() {
                return Err(ErrorKind::UnterminatedComment);
            }
            if self.current() == '*' && self.peek() == Some('/') {
                self.increment();
                self.increment();
                return Ok(());
            }
            self.increment();
        }
    }

    fn string(&mut self, quote: char) -> Result<String, ErrorKind> {
        self.increment();
        let mut value = String::new();
        loop {
            if self.at_end() {
                return Err(ErrorKind::UnterminatedString);
            }
            let ch = self.current();
            // Plain quotes may not span lines; template literals may.
            if ch == '\n' && quote != '`' {
                return Err(ErrorKind::UnterminatedString);
            }
            self.increment();
            if ch == quote {
                return Ok(value);
            }
            if ch != '\\' {
                value.push(ch);
                continue;
            }
            if self.at_end() {
                return Err(ErrorKind::UnterminatedString);
            }
            let escaped = self.current();
            self.increment();
            match escaped {
                'n' => value.push('\n'),
                't' => value.push('\t'),
                'r' => value.push('\r'),
                '0' => value.push('\0'),
                // Line continuation.
                '\n' => {}
                other => value.push(other),
            }
        }
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        scan(source).into_iter().map(|t| t.tok).collect()
    }

    #[test]
    fn scans_declaration_head() {
        let toks = kinds("export const anteriorData: ISVGModelData[] = [");
        assert_eq!(
            toks,
            vec![
                Token::Identifier("export".into()),
                Token::Identifier("const".into()),
                Token::Identifier("anteriorData".into()),
                Token::Punct(':'),
                Token::Identifier("ISVGModelData".into()),
                Token::Punct('['),
                Token::Punct(']'),
                Token::Punct('='),
                Token::Punct('['),
                Token::EndOfFile,
            ]
        );
    }

    #[test]
    fn unescapes_quotes_inside_strings() {
        let toks = kinds(r#"'it\'s' "a \"b\"" `c`"#);
        assert_eq!(toks[0], Token::QuotedString("it's".into()));
        assert_eq!(toks[1], Token::QuotedString("a \"b\"".into()));
        assert_eq!(toks[2], Token::QuotedString("c".into()));
    }

    #[test]
    fn brackets_inside_strings_are_not_punctuation() {
        let toks = kinds("['1 2 ] [ 3 4']");
        assert_eq!(
            toks,
            vec![
                Token::Punct('['),
                Token::QuotedString("1 2 ] [ 3 4".into()),
                Token::Punct(']'),
                Token::EndOfFile,
            ]
        );
    }

    #[test]
    fn skips_comments_and_tracks_lines() {
        let scanned = scan("// head\n/* multi\nline */ chest");
        assert_eq!(scanned[0].tok, Token::Identifier("chest".into()));
        assert_eq!(scanned[0].loc, Location { line: 3, col: 9 });
    }

    #[test]
    fn unterminated_string_stops_the_scan() {
        let toks = kinds("[ 'open");
        assert_eq!(
            toks,
            vec![
                Token::Punct('['),
                Token::Invalid(ErrorKind::UnterminatedString),
                Token::EndOfFile,
            ]
        );
    }

    #[test]
    fn unterminated_comment_stops_the_scan() {
        let toks = kinds("a /* never closed");
        assert_eq!(toks[1], Token::Invalid(ErrorKind::UnterminatedComment));
    }
}
