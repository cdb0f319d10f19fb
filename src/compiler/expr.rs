//! Expression and term productions (spec.md §4.4.7 through §4.4.11).

use super::Compiler;
use crate::diagnostic::Diagnostic;
use crate::token::{Keyword, Symbol, TokenKind};
use crate::vm::{ArithOp, Segment};

fn binary_op(sym: Symbol) -> Option<ArithOp> {
    match sym {
        Symbol::Plus => Some(ArithOp::Add),
        Symbol::Minus => Some(ArithOp::Sub),
        Symbol::Amp => Some(ArithOp::And),
        Symbol::Pipe => Some(ArithOp::Or),
        Symbol::Lt => Some(ArithOp::Lt),
        Symbol::Gt => Some(ArithOp::Gt),
        Symbol::Eq => Some(ArithOp::Eq),
        _ => None,
    }
}

impl Compiler {
    /// `Term (BinaryOp Term)*` — operators emit after both operands, in
    /// left-to-right application order (spec.md §4.4.7).
    pub(super) fn compile_expression(&mut self) -> Result<(), Diagnostic> {
        self.compile_term()?;
        loop {
            let op = match &self.tokens.current().node {
                TokenKind::Symbol(Symbol::Star) => {
                    self.tokens.advance();
                    self.compile_term()?;
                    self.sink.call("Math.multiply", 2);
                    continue;
                }
                TokenKind::Symbol(Symbol::Slash) => {
                    self.tokens.advance();
                    self.compile_term()?;
                    self.sink.call("Math.divide", 2);
                    continue;
                }
                TokenKind::Symbol(sym) => binary_op(*sym),
                _ => None,
            };
            match op {
                Some(op) => {
                    self.tokens.advance();
                    self.compile_term()?;
                    self.sink.arithmetic(op);
                }
                None => return Ok(()),
            }
        }
    }

    /// One of: IntegerConstant | StringConstant | KeywordConstant |
    /// VarName | VarName '[' Expression ']' | SubroutineCall |
    /// '(' Expression ')' | UnaryOp Term (spec.md §4.4.8, §4.4.9, §4.4.11).
    fn compile_term(&mut self) -> Result<(), Diagnostic> {
        let current = self.tokens.current().node.clone();
        match current {
            TokenKind::IntConst(n) => {
                self.tokens.advance();
                self.sink.push(Segment::Constant, n);
            }
            TokenKind::StringConst(s) => {
                self.tokens.advance();
                self.compile_string_constant(&s);
            }
            TokenKind::Keyword(Keyword::True) => {
                self.tokens.advance();
                self.sink.push(Segment::Constant, 0);
                self.sink.arithmetic(ArithOp::Not);
            }
            TokenKind::Keyword(Keyword::False) | TokenKind::Keyword(Keyword::Null) => {
                self.tokens.advance();
                self.sink.push(Segment::Constant, 0);
            }
            TokenKind::Keyword(Keyword::This) => {
                self.tokens.advance();
                self.sink.push(Segment::Pointer, 0);
            }
            TokenKind::Symbol(Symbol::LParen) => {
                self.tokens.advance();
                self.compile_expression()?;
                self.eat_symbol(Symbol::RParen)?;
            }
            TokenKind::Symbol(Symbol::Minus) => {
                self.tokens.advance();
                self.compile_term()?;
                self.sink.arithmetic(ArithOp::Neg);
            }
            TokenKind::Symbol(Symbol::Tilde) => {
                self.tokens.advance();
                self.compile_term()?;
                self.sink.arithmetic(ArithOp::Not);
            }
            TokenKind::Identifier(_) => self.compile_identifier_term()?,
            other => {
                return Err(self.error(format!("expected a term, found '{}'", other)));
            }
        }
        Ok(())
    }

    /// Disambiguates `VarName`, `VarName '[' Expr ']'` and `SubroutineCall`
    /// using the single token of lookahead past the identifier, without
    /// rewinding the stream (spec.md §4.4.11).
    fn compile_identifier_term(&mut self) -> Result<(), Diagnostic> {
        let next_is_call = matches!(
            self.tokens.peek().node,
            TokenKind::Symbol(Symbol::LParen) | TokenKind::Symbol(Symbol::Dot)
        );
        let next_is_index = matches!(self.tokens.peek().node, TokenKind::Symbol(Symbol::LBracket));

        if next_is_call {
            self.compile_subroutine_call()?;
            return Ok(());
        }

        let (name, span) = self.eat_identifier()?;
        if next_is_index {
            self.tokens.advance(); // '['
            let (kind, index) = self.resolve(&name, span)?;
            self.sink.push(kind.segment(), index);
            self.compile_expression()?;
            self.sink.arithmetic(ArithOp::Add);
            self.eat_symbol(Symbol::RBracket)?;
            self.sink.pop(Segment::Pointer, 1);
            self.sink.push(Segment::That, 0);
        } else {
            let (kind, index) = self.resolve(&name, span)?;
            self.sink.push(kind.segment(), index);
        }
        Ok(())
    }

    /// `SubroutineName '(' ExpressionList ')' | (ClassName|VarName) '.'
    /// SubroutineName '(' ExpressionList ')'` (spec.md §4.4.10).
    ///
    /// A bare call is always a method call on the current object (Jack
    /// programs spell a same-class function call as `ClassName.f(...)`), so
    /// `pointer 0` is pushed and the argument count bumped by one to
    /// account for the implicit receiver.
    pub(super) fn compile_subroutine_call(&mut self) -> Result<(), Diagnostic> {
        let (first, first_span) = self.eat_identifier()?;

        if self.at_symbol(Symbol::Dot) {
            self.tokens.advance();
            let (method, _) = self.eat_identifier()?;

            let (callee, mut nargs) = match self.table.type_of(&first).cloned() {
                Some(crate::symbol::Type::Class(class_name)) => {
                    let (kind, index) = self.resolve(&first, first_span)?;
                    self.sink.push(kind.segment(), index);
                    (format!("{}.{}", class_name, method), 1)
                }
                Some(_) | None => (format!("{}.{}", first, method), 0),
            };

            self.eat_symbol(Symbol::LParen)?;
            nargs += self.compile_expression_list()?;
            self.eat_symbol(Symbol::RParen)?;
            self.sink.call(&callee, nargs);
        } else {
            self.sink.push(Segment::Pointer, 0);
            self.eat_symbol(Symbol::LParen)?;
            let nargs = self.compile_expression_list()?;
            self.eat_symbol(Symbol::RParen)?;
            self.sink
                .call(&format!("{}.{}", self.class_name, first), nargs + 1);
        }
        Ok(())
    }

    /// `(Expression (',' Expression)*)?` — returns the argument count.
    fn compile_expression_list(&mut self) -> Result<u16, Diagnostic> {
        if self.at_symbol(Symbol::RParen) {
            return Ok(0);
        }
        let mut count = 1;
        self.compile_expression()?;
        while self.at_symbol(Symbol::Comma) {
            self.tokens.advance();
            self.compile_expression()?;
            count += 1;
        }
        Ok(count)
    }

    /// Builds a string object one character at a time via
    /// `String.new`/`String.appendChar` (spec.md §9 Open Question 1).
    fn compile_string_constant(&mut self, text: &str) {
        self.sink.push(Segment::Constant, text.len() as u16);
        self.sink.call("String.new", 1);
        for ch in text.chars() {
            self.sink.push(Segment::Constant, ch as u16);
            self.sink.call("String.appendChar", 2);
        }
    }
}
