mod class;
mod expr;
mod stmt;
mod subroutine;

use crate::diagnostic::Diagnostic;
use crate::lexer::TokenSource;
use crate::span::Span;
use crate::symbol::SymbolTable;
use crate::token::{Keyword, Symbol, TokenKind};
use crate::vm::InstructionSink;

/// Recursive-descent parser + VM code emitter for a single class file
/// (spec.md §4.4). One `Compiler` is created per input file; its
/// `SymbolTable` and label counter live for the duration of one class
/// (spec.md §3 Lifecycle).
pub struct Compiler {
    tokens: TokenSource,
    table: SymbolTable,
    sink: InstructionSink,
    class_name: String,
    label_counter: u32,
}

/// Compile one Jack class file to VM instruction text.
///
/// `file_id` identifies the source for diagnostics spanning multiple input
/// files (spec.md §5: files are processed sequentially and independently).
pub fn compile_class(source: &str, file_id: u16) -> Result<String, Vec<Diagnostic>> {
    let tokens = TokenSource::new(source, file_id);
    if !tokens.diagnostics().is_empty() {
        return Err(tokens.diagnostics().to_vec());
    }

    let mut compiler = Compiler {
        tokens,
        table: SymbolTable::new(),
        sink: InstructionSink::new(),
        class_name: String::new(),
        label_counter: 0,
    };
    compiler.compile_class().map_err(|d| vec![d])?;
    Ok(compiler.sink.into_output())
}

impl Compiler {
    fn span(&self) -> Span {
        self.tokens.current().span
    }

    fn error(&self, message: impl Into<String>) -> Diagnostic {
        Diagnostic::error(message, self.span())
    }

    fn at_keyword(&self, kw: Keyword) -> bool {
        matches!(&self.tokens.current().node, TokenKind::Keyword(k) if *k == kw)
    }

    fn at_symbol(&self, sym: Symbol) -> bool {
        matches!(&self.tokens.current().node, TokenKind::Symbol(s) if *s == sym)
    }

    fn eat_keyword(&mut self, kw: Keyword) -> Result<(), Diagnostic> {
        if self.at_keyword(kw) {
            self.tokens.advance();
            Ok(())
        } else {
            Err(self.error(format!(
                "expected '{}', found '{}'",
                kw,
                self.tokens.current().node
            )))
        }
    }

    fn eat_symbol(&mut self, sym: Symbol) -> Result<(), Diagnostic> {
        if self.at_symbol(sym) {
            self.tokens.advance();
            Ok(())
        } else {
            Err(self.error(format!(
                "expected '{}', found '{}'",
                sym,
                self.tokens.current().node
            )))
        }
    }

    /// Consume an identifier, returning its text and source span (the span
    /// lets callers attach "undefined identifier" errors to the right
    /// location even after later tokens have been consumed).
    fn eat_identifier(&mut self) -> Result<(String, Span), Diagnostic> {
        let span = self.span();
        match self.tokens.current().node.clone() {
            TokenKind::Identifier(name) => {
                self.tokens.advance();
                Ok((name, span))
            }
            other => Err(Diagnostic::error(
                format!("expected an identifier, found '{}'", other),
                span,
            )),
        }
    }

    fn fresh_label(&mut self) -> String {
        let n = self.label_counter;
        self.label_counter += 1;
        format!("L{}", n)
    }
}
