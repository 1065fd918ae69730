//! Operator expressions, from assignment down to access and call chains.

use decaf_ir::{BinaryOperator, LogicalOperator, NodeId, NodeKind, TokenKind, UnaryOperator};
use decaf_stack::ensure_sufficient_stack;

use super::{PResult, Parser};
use crate::ParseError;

enum AssignKind {
    Plain,
    Compound(BinaryOperator),
    Logical(LogicalOperator),
}

fn assign_kind(kind: TokenKind) -> Option<AssignKind> {
    Some(match kind {
        TokenKind::Eq => AssignKind::Plain,
        TokenKind::PlusEq => AssignKind::Compound(BinaryOperator::Add),
        TokenKind::MinusEq => AssignKind::Compound(BinaryOperator::Subtract),
        TokenKind::StarEq => AssignKind::Compound(BinaryOperator::Multiply),
        TokenKind::SlashEq => AssignKind::Compound(BinaryOperator::Divide),
        TokenKind::PercentEq => AssignKind::Compound(BinaryOperator::Remainder),
        TokenKind::OrEq => AssignKind::Logical(LogicalOperator::Or),
        TokenKind::AndEq => AssignKind::Logical(LogicalOperator::And),
        TokenKind::QuestionEq => AssignKind::Logical(LogicalOperator::Exist),
        _ => return None,
    })
}

fn comparison_operator(kind: TokenKind) -> Option<BinaryOperator> {
    Some(match kind {
        TokenKind::Lt => BinaryOperator::Less,
        TokenKind::Gt => BinaryOperator::Greater,
        TokenKind::LtEq => BinaryOperator::LessEq,
        TokenKind::GtEq => BinaryOperator::GreaterEq,
        TokenKind::EqEq | TokenKind::Is => BinaryOperator::Equal,
        TokenKind::NotEq | TokenKind::Isnt => BinaryOperator::NotEqual,
        _ => return None,
    })
}

impl Parser<'_> {
    pub(super) fn parse_expression(&mut self) -> PResult<NodeId> {
        ensure_sufficient_stack(|| self.parse_assignment())
    }

    /// Right-associative assignment of every flavor.
    fn parse_assignment(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let assignee = self.parse_existential()?;
        let Some(kind) = assign_kind(self.cursor.current_kind()) else {
            return Ok(assignee);
        };
        if !matches!(
            self.ast.kind(assignee),
            NodeKind::Identifier(_)
                | NodeKind::MemberAccess { .. }
                | NodeKind::DynamicMemberAccess { .. }
        ) {
            return Err(ParseError::InvalidAssignmentTarget {
                span: self.ast.span(assignee),
            });
        }
        self.cursor.advance();
        self.skip_continuation_newlines();
        let expression = self.parse_expression()?;

        let node = match kind {
            AssignKind::Plain => NodeKind::AssignOp {
                assignee,
                expression,
            },
            AssignKind::Compound(op) => NodeKind::CompoundAssignOp {
                op,
                assignee,
                expression,
            },
            AssignKind::Logical(op) => NodeKind::LogicalAssignOp {
                op,
                assignee,
                expression,
            },
        };
        Ok(self.alloc_from(start, node))
    }

    /// Binary `a ? b`. An adjacent `?` is the postfix existence operator
    /// and is handled in the access chain.
    fn parse_existential(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let mut left = self.parse_or()?;
        while self.cursor.check(TokenKind::Question) && !self.cursor.is_adjacent() {
            self.cursor.advance();
            self.skip_continuation_newlines();
            let right = self.parse_or()?;
            left = self.alloc_from(
                start,
                NodeKind::BinaryOp {
                    op: BinaryOperator::Existential,
                    left,
                    right,
                },
            );
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let mut left = self.parse_and()?;
        while matches!(
            self.cursor.current_kind(),
            TokenKind::Or | TokenKind::PipePipe
        ) {
            self.cursor.advance();
            self.skip_continuation_newlines();
            let right = self.parse_and()?;
            left = self.binary(start, BinaryOperator::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let mut left = self.parse_comparison()?;
        while matches!(
            self.cursor.current_kind(),
            TokenKind::And | TokenKind::AmpAmp
        ) {
            self.cursor.advance();
            self.skip_continuation_newlines();
            let right = self.parse_comparison()?;
            left = self.binary(start, BinaryOperator::And, left, right);
        }
        Ok(left)
    }

    /// One comparison is a `BinaryOp`; two or more in a row form a
    /// `ChainedComparison` over all operands.
    fn parse_comparison(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let first = self.parse_in()?;
        let mut operands = vec![first];
        let mut last_op = None;
        while let Some(op) = comparison_operator(self.cursor.current_kind()) {
            self.cursor.advance();
            self.skip_continuation_newlines();
            operands.push(self.parse_in()?);
            last_op = Some(op);
        }
        match (operands.len(), last_op) {
            (1, _) | (_, None) => Ok(first),
            (2, Some(op)) => Ok(self.binary(start, op, operands[0], operands[1])),
            _ => Ok(self.alloc_from(start, NodeKind::ChainedComparison { operands })),
        }
    }

    fn parse_in(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let mut left = self.parse_additive()?;
        while self.cursor.check(TokenKind::In) {
            self.cursor.advance();
            let right = self.parse_additive()?;
            left = self.binary(start, BinaryOperator::In, left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Subtract,
                _ => return Ok(left),
            };
            self.cursor.advance();
            self.skip_continuation_newlines();
            let right = self.parse_multiplicative()?;
            left = self.binary(start, op, left, right);
        }
    }

    fn parse_multiplicative(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Star => BinaryOperator::Multiply,
                TokenKind::Slash => BinaryOperator::Divide,
                TokenKind::Percent => BinaryOperator::Remainder,
                TokenKind::PercentPercent => BinaryOperator::Modulo,
                _ => return Ok(left),
            };
            self.cursor.advance();
            self.skip_continuation_newlines();
            let right = self.parse_unary()?;
            left = self.binary(start, op, left, right);
        }
    }

    fn parse_unary(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let op = match self.cursor.current_kind() {
            TokenKind::Not => UnaryOperator::Not,
            TokenKind::Bang => UnaryOperator::Bang,
            TokenKind::Minus => UnaryOperator::Negate,
            TokenKind::Plus => UnaryOperator::Plus,
            TokenKind::Typeof => UnaryOperator::Typeof,
            _ => return self.parse_power(),
        };
        self.cursor.advance();
        let expression = ensure_sufficient_stack(|| self.parse_unary())?;
        Ok(self.alloc_from(start, NodeKind::UnaryOp { op, expression }))
    }

    /// `**` binds tighter than unary operators on its left and is
    /// right-associative.
    fn parse_power(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let base = self.parse_access_chain()?;
        if !self.cursor.eat(TokenKind::StarStar) {
            return Ok(base);
        }
        self.skip_continuation_newlines();
        let exponent = self.parse_unary()?;
        Ok(self.binary(start, BinaryOperator::Power, base, exponent))
    }

    fn parse_access_chain(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        let base = if self.cursor.check(TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        self.parse_chain_links(start, base, true)
    }

    /// `new C`, `new C(args)`, `new a.b.C(args)`. The constructor chain
    /// stops before the first call, which supplies the arguments.
    fn parse_new(&mut self) -> PResult<NodeId> {
        let start = self.cursor.current_start();
        self.cursor.advance();
        let ctor_start = self.cursor.current_start();
        let ctor = self.parse_primary()?;
        let ctor = self.parse_chain_links(ctor_start, ctor, false)?;
        let arguments = if self.cursor.check(TokenKind::LParen) && self.cursor.is_adjacent() {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(self.alloc_from(start, NodeKind::NewOp { ctor, arguments }))
    }

    fn parse_chain_links(
        &mut self,
        start: u32,
        mut object: NodeId,
        allow_calls: bool,
    ) -> PResult<NodeId> {
        loop {
            let kind = match self.cursor.current_kind() {
                TokenKind::Dot => {
                    self.cursor.advance();
                    let member = self.parse_member_name()?;
                    NodeKind::MemberAccess {
                        expression: object,
                        member,
                    }
                }
                TokenKind::QuestionDot => {
                    self.cursor.advance();
                    let member = self.parse_member_name()?;
                    NodeKind::SoakedMemberAccess {
                        expression: object,
                        member,
                    }
                }
                TokenKind::LBracket if self.cursor.is_adjacent() => {
                    let index = self.parse_index()?;
                    NodeKind::DynamicMemberAccess {
                        expression: object,
                        index,
                    }
                }
                TokenKind::QuestionLBracket => {
                    let index = self.parse_index()?;
                    NodeKind::SoakedDynamicMemberAccess {
                        expression: object,
                        index,
                    }
                }
                TokenKind::LParen if allow_calls && self.cursor.is_adjacent() => {
                    let arguments = self.parse_arguments()?;
                    NodeKind::FunctionApplication {
                        function: object,
                        arguments,
                    }
                }
                TokenKind::QuestionLParen if allow_calls => {
                    let arguments = self.parse_arguments()?;
                    NodeKind::SoakedFunctionApplication {
                        function: object,
                        arguments,
                    }
                }
                TokenKind::Question if self.cursor.is_adjacent() => {
                    self.cursor.advance();
                    NodeKind::ExistsOp { expression: object }
                }
                _ => return Ok(object),
            };
            object = self.alloc_from(start, kind);
        }
    }

    fn parse_member_name(&mut self) -> PResult<decaf_ir::Span> {
        let token = self.cursor.current();
        if token.kind.is_word() {
            self.cursor.advance();
            Ok(token.span)
        } else {
            Err(ParseError::ExpectedIdentifier {
                span: token.span,
                found: token.kind,
            })
        }
    }

    /// `[expr]` or `?[expr]`; the cursor is on the opening bracket.
    fn parse_index(&mut self) -> PResult<NodeId> {
        let open = self.cursor.advance();
        self.cursor.skip_newlines();
        let index = self.parse_expression()?;
        self.cursor.skip_newlines();
        self.expect_close(TokenKind::RBracket, open)?;
        Ok(index)
    }

    fn binary(&mut self, start: u32, op: BinaryOperator, left: NodeId, right: NodeId) -> NodeId {
        self.alloc_from(start, NodeKind::BinaryOp { op, left, right })
    }

    /// An operator at the end of a line continues the expression on the
    /// next line.
    fn skip_continuation_newlines(&mut self) {
        self.cursor.skip_newlines();
    }
}
