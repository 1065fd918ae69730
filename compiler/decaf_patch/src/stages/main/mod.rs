//! Main stage: rewrite normalized source into JavaScript.
//!
//! Patchers emit braces, parentheses and semicolons, rename operators and
//! keywords, make implicit returns explicit, and declare every variable
//! with `let`. Shapes normalization should have removed are errors.

mod assign;
mod block;
mod control;
mod function;
mod literals;
mod operators;
mod program;

use decaf_ir::{Ast, BinaryOperator, NodeId, NodeKind, Role};

use super::is_repeatable_node;
use crate::error::PatchResult;
use crate::options::StageName;
use crate::patcher::{Hoist, Hoists, PatchCx, PatcherFlags, Stage};
use crate::suggestion::Suggestion;

/// The main stage.
#[derive(Copy, Clone, Debug, Default)]
pub struct MainStage;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MainKind {
    Program,
    Block,
    Passthrough,
    Bool,
    This,
    MemberAccess,
    /// Calls, `new`, arrays and objects: comma-separated children.
    Sequence,
    Unary,
    Exists,
    Binary,
    Existential,
    ChainedComparison,
    Assign,
    CompoundAssign,
    LogicalAssign,
    Function,
    Conditional,
    While,
    /// Forms the normalize stage removes.
    Unsupported,
}

type Cx<'a, 'b> = &'a mut PatchCx<'b, MainStage>;

impl Stage for MainStage {
    const NAME: StageName = StageName::Main;
    type Kind = MainKind;

    fn patcher_for(ast: &Ast, id: NodeId, _built: &[MainKind]) -> MainKind {
        match ast.kind(id) {
            NodeKind::Program { .. } => MainKind::Program,
            NodeKind::Block { .. } => MainKind::Block,
            NodeKind::Bool => MainKind::Bool,
            NodeKind::This => MainKind::This,
            NodeKind::MemberAccess { .. } => MainKind::MemberAccess,
            NodeKind::FunctionApplication { .. }
            | NodeKind::NewOp { .. }
            | NodeKind::ArrayInitialiser { .. }
            | NodeKind::ObjectInitialiser { .. } => MainKind::Sequence,
            NodeKind::UnaryOp { .. } => MainKind::Unary,
            NodeKind::ExistsOp { .. } => MainKind::Exists,
            NodeKind::BinaryOp {
                op: BinaryOperator::Existential,
                ..
            } => MainKind::Existential,
            NodeKind::BinaryOp { .. } => MainKind::Binary,
            NodeKind::ChainedComparison { .. } => MainKind::ChainedComparison,
            NodeKind::AssignOp { .. } => MainKind::Assign,
            NodeKind::CompoundAssignOp { .. } => MainKind::CompoundAssign,
            NodeKind::LogicalAssignOp { .. } => MainKind::LogicalAssign,
            NodeKind::Function { .. } => MainKind::Function,
            NodeKind::Conditional { postfix: false, .. } => MainKind::Conditional,
            NodeKind::While {
                postfix: false,
                is_loop: false,
                ..
            } => MainKind::While,
            NodeKind::SoakedMemberAccess { .. }
            | NodeKind::SoakedDynamicMemberAccess { .. }
            | NodeKind::SoakedFunctionApplication { .. }
            | NodeKind::Conditional { .. }
            | NodeKind::While { .. } => MainKind::Unsupported,
            NodeKind::Identifier(_)
            | NodeKind::Number
            | NodeKind::String
            | NodeKind::Regex
            | NodeKind::Null
            | NodeKind::Undefined
            | NodeKind::DynamicMemberAccess { .. }
            | NodeKind::ObjectMember { .. }
            | NodeKind::DefaultParam { .. }
            | NodeKind::Return { .. }
            | NodeKind::Throw { .. }
            | NodeKind::Break
            | NodeKind::Continue => MainKind::Passthrough,
        }
    }

    fn patch_as_expression(cx: &mut PatchCx<'_, Self>, id: NodeId) -> PatchResult<Hoists> {
        match cx.kind(id) {
            MainKind::Program => program::patch_program(cx, id),
            MainKind::Block => block::patch_block(cx, id),
            MainKind::Passthrough => cx.patch_children(id),
            MainKind::Bool => literals::patch_bool(cx, id),
            MainKind::This => literals::patch_this(cx, id),
            MainKind::MemberAccess => literals::patch_member_access(cx, id),
            MainKind::Sequence => literals::patch_sequence(cx, id),
            MainKind::Unary => operators::patch_unary(cx, id),
            MainKind::Exists => operators::patch_exists(cx, id),
            MainKind::Binary => operators::patch_binary(cx, id),
            MainKind::Existential => operators::patch_existential(cx, id),
            MainKind::ChainedComparison => operators::patch_chained_comparison(cx, id),
            MainKind::Assign => assign::patch_assign(cx, id, Role::Expression),
            MainKind::CompoundAssign => assign::patch_compound_assign(cx, id),
            MainKind::LogicalAssign => assign::patch_logical_assign(cx, id, Role::Expression),
            MainKind::Function => function::patch_function(cx, id),
            MainKind::Conditional => control::patch_conditional_expression(cx, id),
            MainKind::While => Err(cx.unsupported(id, "a loop cannot be used as a value")),
            MainKind::Unsupported => Err(cx.unsupported(
                id,
                "this form should have been removed by normalization",
            )),
        }
    }

    fn patch_as_statement(cx: &mut PatchCx<'_, Self>, id: NodeId) -> PatchResult<Hoists> {
        match cx.kind(id) {
            MainKind::Block => block::patch_block(cx, id),
            MainKind::Conditional if !cx.is_surrounded_by_parentheses(id) => {
                control::patch_conditional_statement(cx, id)
            }
            MainKind::While => control::patch_while(cx, id),
            _ => patch_expression_statement(cx, id),
        }
    }

    fn is_repeatable(cx: &PatchCx<'_, Self>, id: NodeId) -> bool {
        is_repeatable_node(cx.ast(), id)
    }

    fn temporary_declaration(name: &str) -> Option<Hoist> {
        Some(Hoist::Declaration(name.to_owned()))
    }
}

/// An expression in statement position, returned when it is the last
/// statement of a function.
fn patch_expression_statement(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<Hoists> {
    let implicit_return = cx.has_flag(id, PatcherFlags::IMPLICIT_RETURN);
    let hoists = match cx.kind(id) {
        MainKind::Assign => assign::patch_assign(cx, id, Role::Statement)?,
        MainKind::LogicalAssign => assign::patch_logical_assign(cx, id, Role::Statement)?,
        _ => MainStage::patch_as_expression(cx, id)?,
    };

    // `{` or `function` opening a statement would start a block or a
    // declaration.
    let opens_ambiguously = matches!(
        cx.node(id),
        NodeKind::ObjectInitialiser { .. } | NodeKind::Function { .. }
    );
    if opens_ambiguously && !implicit_return && !cx.is_surrounded_by_parentheses(id) {
        cx.parenthesize(id)?;
    }

    if implicit_return && !cx.has_flag(id, PatcherFlags::BLOCK_STATEMENT) {
        cx.prepend_right(cx.outer_span(id).start, "return ")?;
        cx.add_suggestion(Suggestion::ImplicitReturns);
    }
    Ok(hoists)
}

/// Whether an operator-like expression needs its own parentheses where it
/// sits.
fn needs_parens(cx: &PatchCx<'_, MainStage>, id: NodeId) -> bool {
    if cx.is_surrounded_by_parentheses(id) {
        return false;
    }
    let Some(parent) = cx.parent(id) else {
        return false;
    };
    cx.ast().is_object_of_parent(id)
        || matches!(
            cx.node(parent),
            NodeKind::UnaryOp { .. }
                | NodeKind::BinaryOp { .. }
                | NodeKind::ChainedComparison { .. }
                | NodeKind::ExistsOp { .. }
        )
}

fn parenthesize_if_needed(cx: Cx<'_, '_>, id: NodeId) -> PatchResult<()> {
    if needs_parens(cx, id) {
        cx.parenthesize(id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
