use crate::diagnostic::Diagnostic;
use crate::span::{Span, Spanned};
use crate::token::{Keyword, Symbol, TokenKind, MAX_INT_CONST};

/// Scans raw source bytes into lexemes, discarding comments as it goes
/// (spec.md §4.1).
struct Lexer<'src> {
    source: &'src [u8],
    file_id: u16,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str, file_id: u16) -> Self {
        Self {
            source: source.as_bytes(),
            file_id,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    fn tokenize(mut self) -> (Vec<Spanned<TokenKind>>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let is_eof = tok.node == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        (tokens, self.diagnostics)
    }

    fn next_token(&mut self) -> Spanned<TokenKind> {
        loop {
            self.skip_whitespace();

            if self.pos >= self.source.len() {
                return self.make_token(TokenKind::Eof, self.pos, self.pos);
            }

            if self.skip_comment() {
                continue;
            }

            let start = self.pos;
            let ch = self.source[self.pos];

            if ch == b'"' {
                return self.scan_string(start);
            }
            if is_ident_start(ch) {
                return self.scan_ident_or_keyword(start);
            }
            if ch.is_ascii_digit() {
                return self.scan_number(start);
            }
            if let Some(sym) = Symbol::from_char(ch) {
                self.pos += 1;
                return self.make_token(TokenKind::Symbol(sym), start, self.pos);
            }

            self.diagnostics.push(Diagnostic::error(
                format!("unexpected character '{}'", ch as char),
                Span::new(self.file_id, start as u32, start as u32 + 1),
            ));
            self.pos += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.source.len() && self.source[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    /// Skip a line (`//`) or block/doc (`/*`, `/**`) comment starting at the
    /// current position. Returns true if a comment was consumed.
    fn skip_comment(&mut self) -> bool {
        if self.pos + 1 >= self.source.len() || self.source[self.pos] != b'/' {
            return false;
        }
        match self.source[self.pos + 1] {
            b'/' => {
                self.pos += 2;
                while self.pos < self.source.len() && self.source[self.pos] != b'\n' {
                    self.pos += 1;
                }
                if self.pos < self.source.len() {
                    self.pos += 1; // consume the newline
                }
                true
            }
            b'*' => {
                let start = self.pos;
                self.pos += 2;
                while self.pos + 1 < self.source.len()
                    && !(self.source[self.pos] == b'*' && self.source[self.pos + 1] == b'/')
                {
                    self.pos += 1;
                }
                if self.pos + 1 < self.source.len() {
                    self.pos += 2; // consume closing "*/"
                } else {
                    self.diagnostics.push(Diagnostic::error(
                        "unterminated block comment",
                        Span::new(self.file_id, start as u32, self.pos as u32),
                    ));
                    self.pos = self.source.len();
                }
                true
            }
            _ => false,
        }
    }

    fn scan_string(&mut self, start: usize) -> Spanned<TokenKind> {
        self.pos += 1; // opening quote
        let body_start = self.pos;
        while self.pos < self.source.len() && self.source[self.pos] != b'"' {
            self.pos += 1;
        }
        if self.pos >= self.source.len() {
            self.diagnostics.push(Diagnostic::error(
                "unterminated string literal",
                Span::new(self.file_id, start as u32, self.pos as u32),
            ));
            let text = String::from_utf8_lossy(&self.source[body_start..self.pos]).into_owned();
            return self.make_token(TokenKind::StringConst(text), start, self.pos);
        }
        let text = String::from_utf8_lossy(&self.source[body_start..self.pos]).into_owned();
        self.pos += 1; // closing quote
        self.make_token(TokenKind::StringConst(text), start, self.pos)
    }

    fn scan_ident_or_keyword(&mut self, start: usize) -> Spanned<TokenKind> {
        while self.pos < self.source.len() && is_ident_continue(self.source[self.pos]) {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap();
        let kind = match Keyword::from_str(text) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Identifier(text.to_string()),
        };
        self.make_token(kind, start, self.pos)
    }

    fn scan_number(&mut self, start: usize) -> Spanned<TokenKind> {
        while self.pos < self.source.len() && self.source[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap();
        match text.parse::<u32>() {
            Ok(n) if n <= MAX_INT_CONST as u32 => {
                self.make_token(TokenKind::IntConst(n as u16), start, self.pos)
            }
            _ => {
                self.diagnostics.push(Diagnostic::error(
                    format!(
                        "integer literal '{}' exceeds the maximum of {}",
                        text, MAX_INT_CONST
                    ),
                    Span::new(self.file_id, start as u32, self.pos as u32),
                ));
                self.make_token(TokenKind::IntConst(0), start, self.pos)
            }
        }
    }

    fn make_token(&self, kind: TokenKind, start: usize, end: usize) -> Spanned<TokenKind> {
        Spanned::new(kind, Span::new(self.file_id, start as u32, end as u32))
    }
}

fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_ident_continue(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

/// The token source the compilation engine drives (spec.md §4.1).
///
/// Tokenizes the whole file up front (mirroring the teacher's
/// `Lexer::tokenize`), then exposes a cursor over the resulting lexeme list
/// with one token of lookahead beyond `current()` — enough for the engine to
/// disambiguate terms without destructively rewinding the scan (spec.md §9
/// Design Notes).
pub struct TokenSource {
    tokens: Vec<Spanned<TokenKind>>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl TokenSource {
    pub fn new(source: &str, file_id: u16) -> Self {
        let (tokens, diagnostics) = Lexer::new(source, file_id).tokenize();
        Self {
            tokens,
            pos: 0,
            diagnostics,
        }
    }

    pub fn has_more(&self) -> bool {
        self.current().node != TokenKind::Eof
    }

    pub fn current(&self) -> &Spanned<TokenKind> {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// One-token lookahead without consuming `current()` (spec.md §4.4.11).
    pub fn peek(&self) -> &Spanned<TokenKind> {
        let idx = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    pub fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Lexical diagnostics collected while tokenizing the whole file.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests;
