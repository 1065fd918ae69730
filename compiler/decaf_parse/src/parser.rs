//! Recursive-descent parser.
//!
//! Block structure comes from indentation: a block opens when a header
//! (`->`, `if cond`, `else`, `while cond`, `loop`) is followed by a newline
//! and a more deeply indented line, and it closes at the first line indented
//! less than its statements. `self.indent` is the column of the statements
//! of the block being parsed.
//!
//! Every node is allocated after its children, and node spans are taken
//! from the first and last consumed tokens so they include any parentheses
//! around a composite expression's operands.

mod expr;
mod primary;

use decaf_ir::{Ast, NodeId, NodeKind, Span, TokenKind};
use decaf_stack::ensure_sufficient_stack;

use crate::cursor::Cursor;
use crate::ParseError;

pub(crate) type PResult<T> = Result<T, ParseError>;

pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    ast: Ast,
    indent: u32,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(cursor: Cursor<'a>) -> Self {
        Parser {
            cursor,
            ast: Ast::new(),
            indent: 0,
        }
    }

    /// Parse a whole program and hand back the finished tree.
    pub(crate) fn parse_program(mut self) -> PResult<Ast> {
        self.cursor.skip_newlines();
        let statements = if self.cursor.at_eof() {
            Vec::new()
        } else {
            self.indent = self.cursor.line_indent();
            self.parse_statements()?
        };
        self.cursor.skip_newlines();
        if !self.cursor.at_eof() {
            return Err(self.unexpected("end of statement"));
        }

        let block_span = self.span_of_list(&statements);
        let body = self.ast.alloc(
            NodeKind::Block {
                statements,
                inline: false,
            },
            block_span,
        );
        let end = self.cursor.source().len() as u32;
        let program = self.ast.alloc(NodeKind::Program { body }, Span::new(0, end));
        self.ast.finish(program);
        Ok(self.ast)
    }

    /// Statements at `self.indent`, separated by newlines or `;`. Stops
    /// before a dedent, at end of input, or at a token that cannot continue
    /// the block; the caller decides whether that token is valid.
    fn parse_statements(&mut self) -> PResult<Vec<NodeId>> {
        let mut statements = Vec::new();
        loop {
            statements.push(self.parse_statement()?);
            while self.cursor.eat(TokenKind::Semicolon) {
                if matches!(
                    self.cursor.current_kind(),
                    TokenKind::Newline | TokenKind::Eof
                ) {
                    break;
                }
                statements.push(self.parse_statement()?);
            }

            if !self.cursor.check(TokenKind::Newline) {
                break;
            }
            let before = self.cursor.mark();
            self.cursor.skip_newlines();
            if self.cursor.at_eof() {
                self.cursor.reset(before);
                break;
            }
            let indent = self.cursor.line_indent();
            if indent == self.indent {
                continue;
            }
            if indent > self.indent {
                return Err(ParseError::Indentation {
                    span: self.cursor.current().span,
                    message: "unexpected indentation",
                });
            }
            self.cursor.reset(before);
            break;
        }
        Ok(statements)
    }

    /// A block on the following, more indented lines. The cursor is on the
    /// newline that ends the header.
    fn parse_indented_block(&mut self) -> PResult<NodeId> {
        self.cursor.skip_newlines();
        let indent = self.cursor.line_indent();
        if self.cursor.at_eof() || indent <= self.indent {
            return Err(ParseError::Indentation {
                span: self.cursor.current().span,
                message: "expected an indented block",
            });
        }

        let outer = std::mem::replace(&mut self.indent, indent);
        let statements = self.parse_statements();
        self.indent = outer;
        let statements = statements?;

        let span = self.span_of_list(&statements);
        Ok(self.ast.alloc(
            NodeKind::Block {
                statements,
                inline: false,
            },
            span,
        ))
    }

    /// A single statement on the header's own line.
    fn parse_inline_block(&mut self) -> PResult<NodeId> {
        let statement = self.parse_statement()?;
        let span = self.ast.span(statement);
        Ok(self.ast.alloc(
            NodeKind::Block {
                statements: vec![statement],
                inline: true,
            },
            span,
        ))
    }

    /// Body after a header: indented when a newline follows, inline otherwise.
    fn parse_body(&mut self) -> PResult<NodeId> {
        if self.cursor.check(TokenKind::Newline) {
            self.parse_indented_block()
        } else {
            self.parse_inline_block()
        }
    }

    fn parse_statement(&mut self) -> PResult<NodeId> {
        ensure_sufficient_stack(|| {
            let start = self.cursor.current_start();
            let statement = match self.cursor.current_kind() {
                TokenKind::Return => {
                    self.cursor.advance();
                    let expression = if self.at_statement_end() {
                        None
                    } else {
                        Some(self.parse_expression()?)
                    };
                    self.alloc_from(start, NodeKind::Return { expression })
                }
                TokenKind::Throw => {
                    self.cursor.advance();
                    let expression = self.parse_expression()?;
                    self.alloc_from(start, NodeKind::Throw { expression })
                }
                TokenKind::Break => {
                    self.cursor.advance();
                    self.alloc_from(start, NodeKind::Break)
                }
                TokenKind::Continue => {
                    self.cursor.advance();
                    self.alloc_from(start, NodeKind::Continue)
                }
                _ => self.parse_expression()?,
            };
            self.parse_postfix_statement(start, statement)
        })
    }

    /// `stmt if cond`, `stmt unless cond`, `stmt while cond`, `stmt until cond`.
    fn parse_postfix_statement(&mut self, start: u32, mut statement: NodeId) -> PResult<NodeId> {
        loop {
            let keyword = self.cursor.current_kind();
            if !matches!(
                keyword,
                TokenKind::If | TokenKind::Unless | TokenKind::While | TokenKind::Until
            ) {
                return Ok(statement);
            }
            self.cursor.advance();
            let condition = self.parse_expression()?;
            let body_span = self.ast.span(statement);
            let body = self.ast.alloc(
                NodeKind::Block {
                    statements: vec![statement],
                    inline: true,
                },
                body_span,
            );
            let kind = match keyword {
                TokenKind::If | TokenKind::Unless => NodeKind::Conditional {
                    condition,
                    consequent: body,
                    alternate: None,
                    negated: keyword == TokenKind::Unless,
                    postfix: true,
                },
                _ => NodeKind::While {
                    condition: Some(condition),
                    body,
                    negated: keyword == TokenKind::Until,
                    postfix: true,
                    is_loop: false,
                },
            };
            statement = self.alloc_from(start, kind);
        }
    }

    fn at_statement_end(&self) -> bool {
        matches!(
            self.cursor.current_kind(),
            TokenKind::Newline
                | TokenKind::Eof
                | TokenKind::Semicolon
                | TokenKind::If
                | TokenKind::Unless
                | TokenKind::While
                | TokenKind::Until
                | TokenKind::Else
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::Comma
        )
    }

    /// Allocate a node spanning from `start` to the last consumed token.
    fn alloc_from(&mut self, start: u32, kind: NodeKind) -> NodeId {
        let end = self.cursor.prev_end();
        self.ast.alloc(kind, Span::new(start, end.max(start)))
    }

    fn span_of_list(&self, ids: &[NodeId]) -> Span {
        match (ids.first(), ids.last()) {
            (Some(&first), Some(&last)) => self.ast.span(first).merge(self.ast.span(last)),
            _ => Span::point(self.cursor.current_start()),
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = self.cursor.current();
        if token.kind == TokenKind::Reserved {
            return ParseError::Unsupported {
                span: token.span,
                word: self.cursor.text(token).to_owned(),
            };
        }
        ParseError::UnexpectedToken {
            span: token.span,
            found: token.kind,
            expected,
        }
    }
}
