//! Primary expressions: literals, names, literal collections, functions
//! and the block-bodied control-flow forms.

use decaf_ir::{NodeId, NodeKind, Token, TokenKind};

use super::{PResult, Parser};
use crate::ParseError;

impl Parser<'_> {
    pub(super) fn parse_primary(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let token = self.cursor.current();
        let kind = match token.kind {
            TokenKind::Identifier => {
                NodeKind::Identifier(self.cursor.text(token).to_owned())
            }
            TokenKind::Number => NodeKind::Number,
            TokenKind::String => NodeKind::String,
            TokenKind::Regex => NodeKind::Regex,
            TokenKind::True
            | TokenKind::False
            | TokenKind::Yes
            | TokenKind::No
            | TokenKind::On
            | TokenKind::Off => NodeKind::Bool,
            TokenKind::Null => NodeKind::Null,
            TokenKind::Undefined => NodeKind::Undefined,
            TokenKind::This => NodeKind::This,
            TokenKind::At => return Ok(self.parse_this_access()),
            TokenKind::LParen => {
                return if self.is_function_ahead() {
                    self.parse_function()
                } else {
                    self.parse_parenthesized()
                };
            }
            TokenKind::Arrow | TokenKind::FatArrow => return self.parse_function(),
            TokenKind::LBracket => {
                let members = self.parse_delimited(TokenKind::RBracket, Self::parse_expression)?;
                return Ok(self.alloc_from(start, NodeKind::ArrayInitialiser { members }));
            }
            TokenKind::LBrace => {
                let members = self.parse_delimited(TokenKind::RBrace, Self::parse_object_member)?;
                return Ok(self.alloc_from(start, NodeKind::ObjectInitialiser { members }));
            }
            TokenKind::If | TokenKind::Unless => return self.parse_conditional(),
            TokenKind::While | TokenKind::Until => return self.parse_while(),
            TokenKind::Loop => return self.parse_loop(),
            TokenKind::Reserved => return Err(self.unexpected("expression")),
            found => {
                return Err(ParseError::ExpectedExpression {
                    span: token.span,
                    found,
                })
            }
        };
        self.cursor.advance();
        Ok(self.alloc_from(start, kind))
    }

    /// `@` alone is `this`; `@name` is a member access on it.
    fn parse_this_access(&mut self) -> NodeId {
        let at = self.cursor.advance();
        let this = self.ast.alloc(NodeKind::This, at.span);
        let name = self.cursor.current();
        if name.kind.is_word() && self.cursor.is_adjacent() {
            self.cursor.advance();
            self.alloc_from(
                at.span.start,
                NodeKind::MemberAccess {
                    expression: this,
                    member: name.span,
                },
            )
        } else {
            this
        }
    }

    /// Parentheses group without producing a node of their own; the parent
    /// span still covers them.
    fn parse_parenthesized(&mut self) -> PResult<NodeId> {
        let open = self.cursor.advance();
        self.cursor.skip_newlines();
        let inner = self.parse_expression()?;
        self.cursor.skip_newlines();
        self.expect_close(TokenKind::RParen, open)?;
        Ok(inner)
    }

    fn is_function_ahead(&self) -> bool {
        self.cursor.matching_paren_ahead().is_some_and(|close| {
            matches!(
                self.cursor.peek_kind(close + 1),
                TokenKind::Arrow | TokenKind::FatArrow
            )
        })
    }

    fn parse_function(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let parameters = if self.cursor.check(TokenKind::LParen) {
            self.parse_delimited(TokenKind::RParen, Self::parse_parameter)?
        } else {
            Vec::new()
        };
        let bound = match self.cursor.current_kind() {
            TokenKind::Arrow => false,
            TokenKind::FatArrow => true,
            _ => return Err(self.unexpected("`->` or `=>`")),
        };
        self.cursor.advance();

        let body = match self.cursor.current_kind() {
            TokenKind::Newline if self.has_indented_line_ahead() => {
                Some(self.parse_indented_block()?)
            }
            TokenKind::Newline
            | TokenKind::Eof
            | TokenKind::RParen
            | TokenKind::RBracket
            | TokenKind::RBrace
            | TokenKind::Comma => None,
            _ => Some(self.parse_inline_block()?),
        };
        Ok(self.alloc_from(
            start,
            NodeKind::Function {
                parameters,
                body,
                bound,
            },
        ))
    }

    fn has_indented_line_ahead(&mut self) -> bool {
        let mark = self.cursor.mark();
        self.cursor.skip_newlines();
        let deeper = !self.cursor.at_eof() && self.cursor.line_indent() > self.indent;
        self.cursor.reset(mark);
        deeper
    }

    /// `x`, `@x`, `x = default`, `@x = default`.
    fn parse_parameter(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let token = self.cursor.current();
        let param = match token.kind {
            TokenKind::Identifier => {
                self.cursor.advance();
                let name = self.cursor.text(token).to_owned();
                self.alloc_from(start, NodeKind::Identifier(name))
            }
            TokenKind::At => {
                let param = self.parse_this_access();
                if !matches!(self.ast.kind(param), NodeKind::MemberAccess { .. }) {
                    return Err(ParseError::ExpectedIdentifier {
                        span: self.cursor.current().span,
                        found: self.cursor.current_kind(),
                    });
                }
                param
            }
            found => {
                return Err(ParseError::ExpectedIdentifier {
                    span: token.span,
                    found,
                })
            }
        };
        if !self.cursor.eat(TokenKind::Eq) {
            return Ok(param);
        }
        let default = self.parse_expression()?;
        Ok(self.alloc_from(start, NodeKind::DefaultParam { param, default }))
    }

    /// `key: value`, or a bare name standing for `name: name`.
    fn parse_object_member(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let token = self.cursor.current();
        let key_kind = match token.kind {
            TokenKind::String => NodeKind::String,
            TokenKind::Number => NodeKind::Number,
            kind if kind.is_word() => NodeKind::Identifier(self.cursor.text(token).to_owned()),
            found => {
                return Err(ParseError::ExpectedIdentifier {
                    span: token.span,
                    found,
                })
            }
        };
        self.cursor.advance();
        let key = self.alloc_from(start, key_kind);

        let value = if self.cursor.eat(TokenKind::Colon) {
            self.cursor.skip_newlines();
            Some(self.parse_expression()?)
        } else if token.kind == TokenKind::Identifier {
            None
        } else {
            return Err(self.unexpected("`:`"));
        };
        Ok(self.alloc_from(start, NodeKind::ObjectMember { key, value }))
    }

    /// Comma- or newline-separated items up to `close`. The cursor is on the
    /// opening delimiter.
    fn parse_delimited(
        &mut self,
        close: TokenKind,
        mut item: impl FnMut(&mut Self) -> PResult<NodeId>,
    ) -> PResult<Vec<NodeId>> {
        let open = self.cursor.advance();
        let mut items = Vec::new();
        self.cursor.skip_newlines();
        while !self.cursor.check(close) {
            if self.cursor.at_eof() {
                return Err(self.unclosed(open));
            }
            items.push(item(self)?);
            let comma = self.cursor.eat(TokenKind::Comma);
            let newline = self.cursor.check(TokenKind::Newline);
            self.cursor.skip_newlines();
            if !comma && !newline && !self.cursor.check(close) {
                return Err(match self.cursor.current_kind() {
                    TokenKind::Eof | TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                        self.unclosed(open)
                    }
                    _ => self.unexpected("`,`"),
                });
            }
        }
        self.cursor.advance();
        Ok(items)
    }

    pub(super) fn parse_arguments(&mut self) -> PResult<Vec<NodeId>> {
        self.parse_delimited(TokenKind::RParen, Self::parse_expression)
    }

    pub(super) fn expect_close(&mut self, close: TokenKind, open: Token) -> PResult<()> {
        if self.cursor.eat(close) {
            Ok(())
        } else {
            Err(self.unclosed(open))
        }
    }

    fn unclosed(&self, open: Token) -> ParseError {
        ParseError::UnclosedDelimiter {
            span: open.span,
            open: open.kind,
            found: self.cursor.current().span,
        }
    }

    /// `if`/`unless` with a `then` clause or an indented block, and an
    /// optional `else` on the same line or aligned with the `if` line.
    fn parse_conditional(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let keyword = self.cursor.advance();
        let condition = self.parse_expression()?;
        let consequent = self.parse_clause_body()?;

        let mut alternate = None;
        if self.cursor.check(TokenKind::Else) {
            alternate = Some(self.parse_else()?);
        } else if self.cursor.check(TokenKind::Newline) {
            let mark = self.cursor.mark();
            self.cursor.skip_newlines();
            if self.cursor.check(TokenKind::Else) && self.cursor.line_indent() == self.indent {
                alternate = Some(self.parse_else()?);
            } else {
                self.cursor.reset(mark);
            }
        }

        Ok(self.alloc_from(
            start,
            NodeKind::Conditional {
                condition,
                consequent,
                alternate,
                negated: keyword.kind == TokenKind::Unless,
                postfix: false,
            },
        ))
    }

    fn parse_else(&mut self) -> PResult<NodeId> {
        self.cursor.advance();
        if matches!(
            self.cursor.current_kind(),
            TokenKind::If | TokenKind::Unless
        ) {
            self.parse_conditional()
        } else {
            self.parse_body()
        }
    }

    /// `then stmt` or an indented block.
    fn parse_clause_body(&mut self) -> PResult<NodeId> {
        if self.cursor.eat(TokenKind::Then) {
            self.parse_inline_block()
        } else if self.cursor.check(TokenKind::Newline) {
            self.parse_indented_block()
        } else {
            Err(self.unexpected("`then` or a new line"))
        }
    }

    fn parse_while(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let keyword = self.cursor.advance();
        let condition = self.parse_expression()?;
        let body = self.parse_clause_body()?;
        Ok(self.alloc_from(
            start,
            NodeKind::While {
                condition: Some(condition),
                body,
                negated: keyword.kind == TokenKind::Until,
                postfix: false,
                is_loop: false,
            },
        ))
    }

    fn parse_loop(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        self.cursor.advance();
        let body = self.parse_body()?;
        Ok(self.alloc_from(
            start,
            NodeKind::While {
                condition: None,
                body,
                negated: false,
                postfix: false,
                is_loop: true,
            },
        ))
    }
}
