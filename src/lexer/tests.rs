use super::TokenSource;
use crate::token::{Keyword, Symbol, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    let mut ts = TokenSource::new(source, 0);
    let mut out = Vec::new();
    while ts.has_more() {
        out.push(ts.current().node.clone());
        ts.advance();
    }
    out
}

#[test]
fn tokenizes_class_skeleton() {
    let toks = kinds("class Main {\n}");
    assert_eq!(
        toks,
        vec![
            TokenKind::Keyword(Keyword::Class),
            TokenKind::Identifier("Main".into()),
            TokenKind::Symbol(Symbol::LBrace),
            TokenKind::Symbol(Symbol::RBrace),
        ]
    );
}

#[test]
fn strips_line_and_block_comments() {
    let toks = kinds("// hello\nclass /** doc */ Main {}");
    assert_eq!(
        toks,
        vec![
            TokenKind::Keyword(Keyword::Class),
            TokenKind::Identifier("Main".into()),
            TokenKind::Symbol(Symbol::LBrace),
            TokenKind::Symbol(Symbol::RBrace),
        ]
    );
}

#[test]
fn whitespace_and_comments_do_not_affect_emission() {
    let a = kinds("class Main{function void f(){return;}}");
    let b = kinds(
        "class   Main  {\n  // comment\n  function void f() {\n    /* x */ return ;\n  }\n}",
    );
    assert_eq!(a, b);
}

#[test]
fn recognises_string_literal() {
    let toks = kinds("\"hello world\"");
    assert_eq!(toks, vec![TokenKind::StringConst("hello world".into())]);
}

#[test]
fn max_int_const_accepted_boundary_rejected() {
    let toks = kinds("32767");
    assert_eq!(toks, vec![TokenKind::IntConst(32767)]);

    let ts = TokenSource::new("32768", 0);
    assert_eq!(ts.diagnostics().len(), 1);
    assert!(ts.diagnostics()[0].message.contains("exceeds"));
}

#[test]
fn unterminated_string_is_reported() {
    let ts = TokenSource::new("\"oops", 0);
    assert_eq!(ts.diagnostics().len(), 1);
    assert!(ts.diagnostics()[0].message.contains("unterminated"));
}

#[test]
fn peek_does_not_consume_current() {
    let mut ts = TokenSource::new("foo . bar", 0);
    assert_eq!(ts.current().node, TokenKind::Identifier("foo".to_string()));
    assert_eq!(ts.peek().node, TokenKind::Symbol(Symbol::Dot));
    // current() is unaffected by peek()
    assert_eq!(ts.current().node, TokenKind::Identifier("foo".to_string()));
    ts.advance();
    assert_eq!(ts.current().node, TokenKind::Symbol(Symbol::Dot));
}
