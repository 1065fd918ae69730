//! Shared data model for the decaf transpiler.
//!
//! Everything the patching core consumes from the front end lives here:
//!
//! - [`Span`]: half-open byte ranges into a source buffer
//! - [`TokenList`]: the flat token stream, including trivia, with navigation
//! - [`Ast`]: an arena of immutable syntax nodes with parent links
//! - [`ScopeTree`]: lexical scopes with bindings, references and declarations
//!
//! The lexer and parser produce these once per stage; nothing in this crate
//! is mutated after construction.

pub mod ast;
pub mod scope;
mod span;
pub mod token;

pub use ast::{
    Ast, BinaryOperator, LogicalOperator, Node, NodeId, NodeKind, Role, UnaryOperator,
};
pub use scope::{Scope, ScopeId, ScopeTree};
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
