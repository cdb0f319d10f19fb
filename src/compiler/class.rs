//! Class and class-variable-declaration productions (spec.md §4.4.2, §4.4.3).

use super::Compiler;
use crate::diagnostic::Diagnostic;
use crate::symbol::{Kind, Type};
use crate::token::{Keyword, Symbol, TokenKind};

impl Compiler {
    /// `'class' ClassName '{' ClassVarDec* SubroutineDec* '}'`
    pub(super) fn compile_class(&mut self) -> Result<(), Diagnostic> {
        self.eat_keyword(Keyword::Class)?;
        let (name, _) = self.eat_identifier()?;
        self.class_name = name;
        self.eat_symbol(Symbol::LBrace)?;

        while self.at_keyword(Keyword::Static) || self.at_keyword(Keyword::Field) {
            self.compile_class_var_dec()?;
        }
        while self.at_keyword(Keyword::Constructor)
            || self.at_keyword(Keyword::Function)
            || self.at_keyword(Keyword::Method)
        {
            self.compile_subroutine_dec()?;
        }

        self.eat_symbol(Symbol::RBrace)?;
        Ok(())
    }

    /// `('static'|'field') Type VarName (',' VarName)* ';'`
    fn compile_class_var_dec(&mut self) -> Result<(), Diagnostic> {
        let kind = if self.at_keyword(Keyword::Static) {
            self.tokens.advance();
            Kind::Static
        } else {
            self.eat_keyword(Keyword::Field)?;
            Kind::Field
        };

        let ty = self.parse_type()?;
        let (name, _) = self.eat_identifier()?;
        self.define_var(&name, ty.clone(), kind)?;

        while self.at_symbol(Symbol::Comma) {
            self.tokens.advance();
            let (name, _) = self.eat_identifier()?;
            self.define_var(&name, ty.clone(), kind)?;
        }

        self.eat_symbol(Symbol::Semicolon)?;
        Ok(())
    }

    /// `int | char | boolean | ClassName`
    pub(super) fn parse_type(&mut self) -> Result<Type, Diagnostic> {
        match self.tokens.current().node.clone() {
            TokenKind::Keyword(Keyword::Int) => {
                self.tokens.advance();
                Ok(Type::Int)
            }
            TokenKind::Keyword(Keyword::Char) => {
                self.tokens.advance();
                Ok(Type::Char)
            }
            TokenKind::Keyword(Keyword::Boolean) => {
                self.tokens.advance();
                Ok(Type::Boolean)
            }
            TokenKind::Identifier(name) => {
                self.tokens.advance();
                Ok(Type::Class(name))
            }
            other => Err(self.error(format!("expected a type, found '{}'", other))),
        }
    }

    /// Define `name` in the scope implied by `kind`; redefinition in the
    /// same scope is a fatal semantic error (spec.md §3 Invariants, §4.2).
    pub(super) fn define_var(
        &mut self,
        name: &str,
        ty: Type,
        kind: Kind,
    ) -> Result<(), Diagnostic> {
        self.table
            .define(name, ty, kind)
            .map_err(|_| self.error(format!("'{}' is already defined in this scope", name)))
    }
}
