//! Statement productions (spec.md §4.4.6).

use super::Compiler;
use crate::diagnostic::Diagnostic;
use crate::span::Span;
use crate::symbol::Kind;
use crate::token::{Keyword, Symbol};
use crate::vm::{ArithOp, Segment};

impl Compiler {
    /// `Statement*`
    pub(super) fn compile_statements(&mut self) -> Result<(), Diagnostic> {
        loop {
            if self.at_keyword(Keyword::Let) {
                self.compile_let()?;
            } else if self.at_keyword(Keyword::If) {
                self.compile_if()?;
            } else if self.at_keyword(Keyword::While) {
                self.compile_while()?;
            } else if self.at_keyword(Keyword::Do) {
                self.compile_do()?;
            } else if self.at_keyword(Keyword::Return) {
                self.compile_return()?;
            } else {
                return Ok(());
            }
        }
    }

    /// `'let' VarName ('[' Expression ']')? '=' Expression ';'`
    ///
    /// Array targets use the temp/pointer dance (spec.md §9 Open Question
    /// 2): the right-hand value is parked in `temp 0` so that evaluating
    /// the index expression cannot clobber it, `that` is re-pointed at the
    /// target element, then the value is written through it.
    fn compile_let(&mut self) -> Result<(), Diagnostic> {
        self.eat_keyword(Keyword::Let)?;
        let (name, span) = self.eat_identifier()?;

        if self.at_symbol(Symbol::LBracket) {
            self.tokens.advance();
            let (kind, index) = self.resolve(&name, span)?;
            self.sink.push(kind.segment(), index);
            self.compile_expression()?;
            self.sink.arithmetic(ArithOp::Add);
            self.eat_symbol(Symbol::RBracket)?;
            self.eat_symbol(Symbol::Eq)?;
            self.compile_expression()?;
            self.eat_symbol(Symbol::Semicolon)?;

            self.sink.pop(Segment::Temp, 0);
            self.sink.pop(Segment::Pointer, 1);
            self.sink.push(Segment::Temp, 0);
            self.sink.pop(Segment::That, 0);
        } else {
            self.eat_symbol(Symbol::Eq)?;
            self.compile_expression()?;
            self.eat_symbol(Symbol::Semicolon)?;
            let (kind, index) = self.resolve(&name, span)?;
            self.sink.pop(kind.segment(), index);
        }
        Ok(())
    }

    /// `'if' '(' Expression ')' '{' Statements '}' ('else' '{' Statements '}')?`
    ///
    /// `l_end` is allocated only when an `else` branch is present, so a
    /// bare `if` consumes a single label (spec.md §4.4.6, scenario S3).
    fn compile_if(&mut self) -> Result<(), Diagnostic> {
        self.eat_keyword(Keyword::If)?;
        self.eat_symbol(Symbol::LParen)?;
        self.compile_expression()?;
        self.eat_symbol(Symbol::RParen)?;

        let l_else = self.fresh_label();
        self.sink.arithmetic(ArithOp::Not);
        self.sink.if_goto(&l_else);

        self.eat_symbol(Symbol::LBrace)?;
        self.compile_statements()?;
        self.eat_symbol(Symbol::RBrace)?;

        if self.at_keyword(Keyword::Else) {
            self.tokens.advance();
            let l_end = self.fresh_label();
            self.sink.goto(&l_end);
            self.sink.label(&l_else);

            self.eat_symbol(Symbol::LBrace)?;
            self.compile_statements()?;
            self.eat_symbol(Symbol::RBrace)?;

            self.sink.label(&l_end);
        } else {
            self.sink.label(&l_else);
        }
        Ok(())
    }

    /// `'while' '(' Expression ')' '{' Statements '}'`
    fn compile_while(&mut self) -> Result<(), Diagnostic> {
        self.eat_keyword(Keyword::While)?;
        let l_top = self.fresh_label();
        let l_end = self.fresh_label();

        self.sink.label(&l_top);
        self.eat_symbol(Symbol::LParen)?;
        self.compile_expression()?;
        self.eat_symbol(Symbol::RParen)?;
        self.sink.arithmetic(ArithOp::Not);
        self.sink.if_goto(&l_end);

        self.eat_symbol(Symbol::LBrace)?;
        self.compile_statements()?;
        self.eat_symbol(Symbol::RBrace)?;

        self.sink.goto(&l_top);
        self.sink.label(&l_end);
        Ok(())
    }

    /// `'do' SubroutineCall ';'` — the returned value is always discarded.
    fn compile_do(&mut self) -> Result<(), Diagnostic> {
        self.eat_keyword(Keyword::Do)?;
        self.compile_subroutine_call()?;
        self.eat_symbol(Symbol::Semicolon)?;
        self.sink.pop(Segment::Temp, 0);
        Ok(())
    }

    /// `'return' Expression? ';'`
    fn compile_return(&mut self) -> Result<(), Diagnostic> {
        self.eat_keyword(Keyword::Return)?;
        if self.at_symbol(Symbol::Semicolon) {
            self.sink.push(Segment::Constant, 0);
        } else {
            self.compile_expression()?;
        }
        self.eat_symbol(Symbol::Semicolon)?;
        self.sink.emit_return();
        Ok(())
    }

    /// Look `name` up in scope, producing a diagnostic at `span` if undefined.
    pub(super) fn resolve(&self, name: &str, span: Span) -> Result<(Kind, u16), Diagnostic> {
        match (self.table.kind_of(name), self.table.index_of(name)) {
            (Some(kind), Some(index)) => Ok((kind, index)),
            _ => Err(Diagnostic::error(
                format!("undefined identifier '{}'", name),
                span,
            )),
        }
    }
}
