//! Parser for the decaf source language.
//!
//! Produces an arena AST whose node spans point into the parsed text, the
//! full token list (trivia included), and the lexical scope tree. The
//! patching stages need all three: spans to edit, tokens to find keywords
//! and punctuation between nodes, and scopes to pick fresh names.

mod cursor;
mod error;
mod parser;
pub mod scope;

use decaf_ir::{Ast, ScopeTree, TokenList};

pub use error::ParseError;

use cursor::Cursor;
use parser::Parser;

/// Everything the patching stages know about one source text.
#[derive(Clone, Debug)]
pub struct Parsed {
    pub ast: Ast,
    pub tokens: TokenList,
    pub scopes: ScopeTree,
}

/// Lex, parse and analyze `source`.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> Result<Parsed, ParseError> {
    let tokens = decaf_lexer::lex(source)?;
    let ast = Parser::new(Cursor::new(source, &tokens)).parse_program()?;
    let scopes = scope::analyze(&ast);
    tracing::debug!(nodes = ast.len(), scopes = scopes.len(), "parsed");
    Ok(Parsed {
        ast,
        tokens,
        scopes,
    })
}
