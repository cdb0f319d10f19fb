//! Subroutine declaration, parameter list, body and local-variable
//! declarations (spec.md §4.4.4, §4.4.5).

use super::Compiler;
use crate::diagnostic::Diagnostic;
use crate::symbol::{Kind, Type};
use crate::token::{Keyword, Symbol, TokenKind};
use crate::vm::Segment;

#[derive(Clone, Copy, PartialEq, Eq)]
enum SubroutineKind {
    Constructor,
    Function,
    Method,
}

impl Compiler {
    /// `('constructor'|'function'|'method') ('void'|Type) SubName
    ///  '(' ParamList ')' SubBody`
    pub(super) fn compile_subroutine_dec(&mut self) -> Result<(), Diagnostic> {
        self.table.start_subroutine();

        let sub_kind = match self.tokens.current().node.clone() {
            TokenKind::Keyword(Keyword::Constructor) => SubroutineKind::Constructor,
            TokenKind::Keyword(Keyword::Function) => SubroutineKind::Function,
            TokenKind::Keyword(Keyword::Method) => SubroutineKind::Method,
            other => {
                return Err(self.error(format!(
                    "expected 'constructor', 'function' or 'method', found '{}'",
                    other
                )))
            }
        };
        self.tokens.advance();

        // Method receiver occupies argument 0 (spec.md §4.4.4).
        if sub_kind == SubroutineKind::Method {
            let class_name = self.class_name.clone();
            self.define_var("this", Type::Class(class_name), Kind::Arg)?;
        }

        // Return type: 'void' | Type. Not needed for emission (spec.md's
        // compiler does no return-type checking beyond identifier
        // definedness), only consumed here.
        if self.at_keyword(Keyword::Void) {
            self.tokens.advance();
        } else {
            self.parse_type()?;
        }

        let (name, _) = self.eat_identifier()?;
        self.eat_symbol(Symbol::LParen)?;
        self.compile_parameter_list()?;
        self.eat_symbol(Symbol::RParen)?;

        self.compile_subroutine_body(sub_kind, &name)
    }

    /// `Type VarName (',' Type VarName)*` — possibly empty.
    fn compile_parameter_list(&mut self) -> Result<(), Diagnostic> {
        if self.at_symbol(Symbol::RParen) {
            return Ok(());
        }
        let ty = self.parse_type()?;
        let (name, _) = self.eat_identifier()?;
        self.define_var(&name, ty, Kind::Arg)?;

        while self.at_symbol(Symbol::Comma) {
            self.tokens.advance();
            let ty = self.parse_type()?;
            let (name, _) = self.eat_identifier()?;
            self.define_var(&name, ty, Kind::Arg)?;
        }
        Ok(())
    }

    /// `'{' VarDec* Statements '}'`
    ///
    /// Locals must be counted before the `function` directive is emitted
    /// (spec.md §4.4.4), so the VarDec prefix is parsed first and the
    /// header is written once the local count is known; the
    /// constructor/method prologue follows the header and precedes the
    /// compiled statements (spec.md §9 Open Question 3).
    fn compile_subroutine_body(
        &mut self,
        sub_kind: SubroutineKind,
        name: &str,
    ) -> Result<(), Diagnostic> {
        self.eat_symbol(Symbol::LBrace)?;

        while self.at_keyword(Keyword::Var) {
            self.compile_var_dec()?;
        }

        let nlocals = self.table.var_count(Kind::Local);
        self.sink
            .function(&format!("{}.{}", self.class_name, name), nlocals);

        match sub_kind {
            SubroutineKind::Constructor => {
                let nfields = self.table.var_count(Kind::Field);
                self.sink.push(Segment::Constant, nfields);
                self.sink.call("Memory.alloc", 1);
                self.sink.pop(Segment::Pointer, 0);
            }
            SubroutineKind::Method => {
                self.sink.push(Segment::Argument, 0);
                self.sink.pop(Segment::Pointer, 0);
            }
            SubroutineKind::Function => {}
        }

        self.compile_statements()?;
        self.eat_symbol(Symbol::RBrace)?;
        Ok(())
    }

    /// `'var' Type VarName (',' VarName)* ';'`
    fn compile_var_dec(&mut self) -> Result<(), Diagnostic> {
        self.eat_keyword(Keyword::Var)?;
        let ty = self.parse_type()?;
        let (name, _) = self.eat_identifier()?;
        self.define_var(&name, ty.clone(), Kind::Local)?;

        while self.at_symbol(Symbol::Comma) {
            self.tokens.advance();
            let (name, _) = self.eat_identifier()?;
            self.define_var(&name, ty.clone(), Kind::Local)?;
        }

        self.eat_symbol(Symbol::Semicolon)?;
        Ok(())
    }
}
