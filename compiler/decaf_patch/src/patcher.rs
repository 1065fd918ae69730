//! The patcher framework shared by every stage.
//!
//! A stage is a closed set of patcher kinds plus the rules that patch each
//! kind. The patcher tree is an arena indexed by `NodeId`, built bottom-up
//! so a node's patcher kind may depend on its children's. Parents drive
//! traversal: a parent's rule decides when and in which role each child is
//! patched, through [`PatchCx::patch`].
//!
//! Rules only touch the world through `PatchCx`: edits to the shared
//! buffer, claims against the scope tracker, helper registrations and
//! suggestions, and their own node's state. Code that must land at an
//! ancestor's boundary is returned as [`Hoists`].

mod hoist;
mod state;

use std::fmt;

use decaf_ir::{Ast, NodeId, NodeKind, Role, ScopeId, Span, Token, TokenKind, TokenList};
use decaf_parse::Parsed;
use decaf_stack::ensure_sufficient_stack;
use tracing::trace;

pub use hoist::{Hoist, Hoists};
pub use state::{PatcherFlags, PatcherState, RepeatableOptions};

use crate::edit_buffer::{EditBuffer, EditError};
use crate::error::{PatchError, PatchResult};
use crate::helpers::Helpers;
use crate::options::{Options, StageName};
use crate::registry;
use crate::scope::ScopeTracker;
use crate::source_utils::{self, CommentRanges};
use crate::suggestion::Suggestion;

/// One full rewriting pass.
pub trait Stage: Sized {
    const NAME: StageName;

    /// Closed set of patcher kinds for this stage.
    type Kind: Copy + Eq + fmt::Debug;

    /// Pick the patcher for `id`. Every child of `id` already has an entry
    /// in `built`, indexed by `NodeId`.
    fn patcher_for(ast: &Ast, id: NodeId, built: &[Self::Kind]) -> Self::Kind;

    fn patch_as_expression(cx: &mut PatchCx<'_, Self>, id: NodeId) -> PatchResult<Hoists>;

    fn patch_as_statement(cx: &mut PatchCx<'_, Self>, id: NodeId) -> PatchResult<Hoists> {
        Self::patch_as_expression(cx, id)
    }

    /// Whether the node can be evaluated more than once without a change in
    /// behavior.
    fn is_repeatable(cx: &PatchCx<'_, Self>, id: NodeId) -> bool;

    /// Patch `id` so it is evaluated once, returning the code later uses
    /// should reference.
    fn patch_as_repeatable(
        cx: &mut PatchCx<'_, Self>,
        id: NodeId,
        options: RepeatableOptions,
    ) -> PatchResult<(String, Hoists)> {
        extract_temporary(cx, id, options)
    }

    /// How a temporary introduced by this stage gets declared.
    fn temporary_declaration(name: &str) -> Option<Hoist>;
}

/// Patch `id` and, unless it can be repeated as written, capture its value
/// in a claimed temporary: `(tmp = expr)`.
pub fn extract_temporary<S: Stage>(
    cx: &mut PatchCx<'_, S>,
    id: NodeId,
    options: RepeatableOptions,
) -> PatchResult<(String, Hoists)> {
    if !options.force_temporary && S::is_repeatable(cx, id) {
        let hoists = S::patch_as_expression(cx, id)?;
        return Ok((cx.slice_node(id)?, hoists));
    }

    let mut hoists = S::patch_as_expression(cx, id)?;
    let name = cx.claim_free_binding(id, options.base);
    let span = cx.span(id);
    if options.parenthesize {
        cx.prepend_right(span.start, &format!("({name} = "))?;
        cx.append_left(span.end, ")")?;
    } else {
        cx.prepend_right(span.start, &format!("{name} = "))?;
    }
    hoists.append(S::temporary_declaration(&name).into());
    Ok((name, hoists))
}

struct PatcherRecord<K> {
    kind: K,
    state: PatcherState,
}

/// Shared context for one stage run.
pub struct PatchCx<'a, S: Stage> {
    source: &'a str,
    parsed: &'a Parsed,
    options: &'a Options,
    patchers: Vec<PatcherRecord<S::Kind>>,
    buffer: EditBuffer<'a>,
    scopes: ScopeTracker,
    helpers: Helpers,
    suggestions: Vec<Suggestion>,
    comments: CommentRanges,
    /// Nodes whose patch call is in progress, innermost last.
    current: Vec<NodeId>,
}

impl<'a, S: Stage> PatchCx<'a, S> {
    pub fn new(source: &'a str, parsed: &'a Parsed, options: &'a Options) -> Self {
        let patchers = registry::build_patchers::<S>(&parsed.ast)
            .into_iter()
            .map(|kind| PatcherRecord {
                kind,
                state: PatcherState::default(),
            })
            .collect();
        PatchCx {
            source,
            parsed,
            options,
            patchers,
            buffer: EditBuffer::new(source),
            scopes: ScopeTracker::new(&parsed.scopes),
            helpers: Helpers::new(),
            suggestions: Vec::new(),
            comments: CommentRanges::from_tokens(&parsed.tokens),
            current: Vec::new(),
        }
    }

    // ---- traversal ----

    /// Patch `id` in `role`. Each node is patched at most once; a node a
    /// parent marked repeatable is patched through
    /// [`Stage::patch_as_repeatable`] whatever the role.
    pub fn patch(&mut self, id: NodeId, role: Role) -> PatchResult<Hoists> {
        if self.has_flag(id, PatcherFlags::PATCHED) {
            return Err(PatchError::AlreadyPatched {
                span: self.span(id),
                node: self.node(id).name(),
            });
        }
        self.set_flag(id, PatcherFlags::PATCHED);
        let repeatable = self.state(id).repeatable;

        trace!(
            stage = %S::NAME,
            node = self.node(id).name(),
            kind = ?self.kind(id),
            span = ?self.span(id),
            ?role,
            "patch"
        );

        self.current.push(id);
        let result = ensure_sufficient_stack(|| match (repeatable, role) {
            (Some(options), _) => {
                let (code, hoists) = S::patch_as_repeatable(self, id, options)?;
                self.state_mut(id).repeat_code = Some(code);
                Ok(hoists)
            }
            (None, Role::Statement) => S::patch_as_statement(self, id),
            (None, Role::Expression) => S::patch_as_expression(self, id),
        });
        self.current.pop();
        result
    }

    /// Patch every child in the role its slot implies.
    pub fn patch_children(&mut self, id: NodeId) -> PatchResult<Hoists> {
        let mut hoists = Hoists::new();
        for (child, role) in self.node(id).children_with_roles() {
            hoists.append(self.patch(child, role)?);
        }
        Ok(hoists)
    }

    /// Request that `id` be patched as a repeatable expression.
    pub fn set_requires_repeatable(&mut self, id: NodeId, options: RepeatableOptions) {
        self.state_mut(id).repeatable = Some(options);
    }

    /// Code referencing a node patched as repeatable.
    pub fn repeat_code(&self, id: NodeId) -> Option<&str> {
        self.state(id).repeat_code.as_deref()
    }

    /// Request, patch, and return the reference code in one step.
    pub fn patch_repeatable(
        &mut self,
        id: NodeId,
        options: RepeatableOptions,
    ) -> PatchResult<(String, Hoists)> {
        self.set_requires_repeatable(id, options);
        let hoists = self.patch(id, Role::Expression)?;
        let code = self.repeat_code(id).unwrap_or_default().to_owned();
        Ok((code, hoists))
    }

    // ---- node queries ----

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn ast(&self) -> &'a Ast {
        &self.parsed.ast
    }

    pub fn tokens(&self) -> &'a TokenList {
        &self.parsed.tokens
    }

    pub fn options(&self) -> &'a Options {
        self.options
    }

    pub fn node(&self, id: NodeId) -> &'a NodeKind {
        self.parsed.ast.kind(id)
    }

    pub fn kind(&self, id: NodeId) -> S::Kind {
        self.patchers[id.index()].kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.parsed.ast.span(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parsed.ast.parent(id)
    }

    pub fn text(&self, span: Span) -> &'a str {
        span.text(self.source)
    }

    pub fn node_text(&self, id: NodeId) -> &'a str {
        self.text(self.span(id))
    }

    pub fn state(&self, id: NodeId) -> &PatcherState {
        &self.patchers[id.index()].state
    }

    pub fn state_mut(&mut self, id: NodeId) -> &mut PatcherState {
        &mut self.patchers[id.index()].state
    }

    pub fn has_flag(&self, id: NodeId, flag: PatcherFlags) -> bool {
        self.state(id).flags.contains(flag)
    }

    pub fn set_flag(&mut self, id: NodeId, flag: PatcherFlags) {
        self.state_mut(id).flags.insert(flag);
    }

    pub fn is_scope_root_block(&self, id: NodeId) -> bool {
        self.parsed.ast.is_scope_root_block(id)
    }

    // ---- tokens ----

    pub fn source_token_at_index(&self, index: usize) -> Option<Token> {
        self.tokens().get(index).copied()
    }

    /// Index of the node's first token.
    pub fn first_token(&self, id: NodeId) -> Option<usize> {
        self.tokens().index_of_token_starting_at(self.span(id).start)
    }

    /// Index of the node's last token.
    pub fn last_token(&self, id: NodeId) -> Option<usize> {
        self.tokens().index_of_token_ending_at(self.span(id).end)
    }

    /// First non-trivia token after the node.
    pub fn next_semantic_token(&self, id: NodeId) -> Option<Token> {
        let after = self.tokens().first_index_at_or_after(self.span(id).end);
        self.tokens()
            .next_semantic_index(after)
            .and_then(|i| self.source_token_at_index(i))
    }

    /// Last non-trivia token before the node.
    pub fn previous_semantic_token(&self, id: NodeId) -> Option<Token> {
        let at = self.tokens().first_index_at_or_after(self.span(id).start);
        let before = at.checked_sub(1)?;
        self.tokens()
            .previous_semantic_index(before)
            .and_then(|i| self.source_token_at_index(i))
    }

    /// First token lying entirely within `start..end` whose kind matches.
    pub fn index_of_token_between(
        &self,
        start: u32,
        end: u32,
        mut predicate: impl FnMut(TokenKind) -> bool,
    ) -> Option<usize> {
        let tokens = self.tokens();
        (tokens.first_index_at_or_after(start)..tokens.len())
            .take_while(|&i| tokens[i].span.end <= end && tokens[i].kind != TokenKind::Eof)
            .find(|&i| predicate(tokens[i].kind))
    }

    /// First matching token strictly between two sibling nodes.
    pub fn index_of_source_token_between_patchers_matching(
        &self,
        left: NodeId,
        right: NodeId,
        predicate: impl FnMut(TokenKind) -> bool,
    ) -> Option<usize> {
        self.index_of_token_between(self.span(left).end, self.span(right).start, predicate)
    }

    /// Like [`Self::index_of_token_between`], but failing with a positioned
    /// error naming what was expected.
    pub fn expect_token_between(
        &self,
        id: NodeId,
        start: u32,
        end: u32,
        expected: &'static str,
        predicate: impl FnMut(TokenKind) -> bool,
    ) -> PatchResult<Token> {
        self.index_of_token_between(start, end, predicate)
            .and_then(|i| self.source_token_at_index(i))
            .ok_or_else(|| self.missing_token(id, expected))
    }

    /// The parentheses directly around `span`, if a `(` right before it is
    /// matched by a `)` right after it.
    fn surrounding_parens(&self, span: Span) -> Option<Span> {
        let tokens = self.tokens();
        let before = tokens
            .first_index_at_or_after(span.start)
            .checked_sub(1)
            .and_then(|i| tokens.previous_semantic_index(i))?;
        let after = tokens.next_semantic_index(tokens.first_index_at_or_after(span.end))?;
        let matched = tokens[before].kind == TokenKind::LParen
            && tokens[after].kind == TokenKind::RParen
            && source_utils::matching_delimiter_index(tokens, before) == Some(after);
        matched.then(|| Span::new(tokens[before].span.start, tokens[after].span.end))
    }

    pub fn is_surrounded_by_parentheses(&self, id: NodeId) -> bool {
        self.surrounding_parens(self.span(id)).is_some()
    }

    /// The node's span widened over every pair of parentheses wrapping it.
    pub fn outer_span(&self, id: NodeId) -> Span {
        let mut span = self.span(id);
        while let Some(wider) = self.surrounding_parens(span) {
            span = wider;
        }
        span
    }

    /// A block's span widened to the outer spans of its first and last
    /// statements. Block spans cover the statements' own spans, which stop
    /// inside any parentheses around them.
    pub fn block_outer_span(&self, id: NodeId) -> Span {
        match self.node(id) {
            NodeKind::Block { statements, .. } => match (statements.first(), statements.last()) {
                (Some(&first), Some(&last)) => {
                    Span::new(self.outer_span(first).start, self.outer_span(last).end)
                }
                _ => self.span(id),
            },
            _ => self.outer_span(id),
        }
    }

    // ---- layout ----

    /// Indentation of the line the node starts on.
    pub fn indent(&self, id: NodeId) -> &'a str {
        source_utils::indent_of(self.source, self.span(id).start)
    }

    pub fn is_multiline(&self, id: NodeId) -> bool {
        source_utils::is_multiline(self.source, self.span(id))
    }

    pub fn trimmed_span(&self, id: NodeId) -> Span {
        source_utils::trimmed_range(self.source, self.span(id))
    }

    pub fn comments(&self) -> &CommentRanges {
        &self.comments
    }

    pub fn has_comments_between(&self, start: u32, end: u32) -> bool {
        self.comments.any_within(Span::new(start, end))
    }

    // ---- edits ----

    fn edit_error(&self, source: EditError) -> PatchError {
        let id = self.current.last().copied().unwrap_or_else(|| self.ast().root());
        PatchError::Edit {
            span: self.span(id),
            node: self.node(id).name(),
            source,
        }
    }

    pub fn insert(&mut self, offset: u32, text: &str) -> PatchResult<()> {
        self.buffer.insert(offset, text).map_err(|e| self.edit_error(e))
    }

    pub fn append_left(&mut self, offset: u32, text: &str) -> PatchResult<()> {
        self.buffer
            .append_left(offset, text)
            .map_err(|e| self.edit_error(e))
    }

    pub fn prepend_right(&mut self, offset: u32, text: &str) -> PatchResult<()> {
        self.buffer
            .prepend_right(offset, text)
            .map_err(|e| self.edit_error(e))
    }

    pub fn overwrite(&mut self, start: u32, end: u32, text: &str) -> PatchResult<()> {
        self.buffer
            .overwrite(start, end, text)
            .map_err(|e| self.edit_error(e))
    }

    pub fn remove(&mut self, start: u32, end: u32) -> PatchResult<()> {
        self.buffer.remove(start, end).map_err(|e| self.edit_error(e))
    }

    pub fn slice(&self, start: u32, end: u32) -> PatchResult<String> {
        self.buffer.slice(start, end).map_err(|e| self.edit_error(e))
    }

    /// Current text of the node, edits included.
    pub fn slice_node(&self, id: NodeId) -> PatchResult<String> {
        let span = self.span(id);
        self.slice(span.start, span.end)
    }

    /// Wrap the node's current text in parentheses.
    pub fn parenthesize(&mut self, id: NodeId) -> PatchResult<()> {
        let span = self.span(id);
        self.prepend_right(span.start, "(")?;
        self.append_left(span.end, ")")
    }

    pub fn render(&self) -> PatchResult<String> {
        self.buffer.render().map_err(|e| self.edit_error(e))
    }

    // ---- names, helpers, suggestions ----

    fn scope_for(&self, id: NodeId) -> ScopeId {
        self.parsed.scopes.scope_of(id).unwrap_or(ScopeId::ROOT)
    }

    /// Claim a fresh name in the scope enclosing `id`.
    pub fn claim_free_binding(&mut self, id: NodeId, base: &str) -> String {
        let scope = self.scope_for(id);
        self.scopes.claim_free_binding(scope, base)
    }

    /// Whether `name` is bound where `id` appears.
    pub fn has_binding(&self, id: NodeId, name: &str) -> bool {
        self.scopes.has_binding(self.scope_for(id), name)
    }

    pub fn is_declaration(&self, id: NodeId) -> bool {
        self.parsed.scopes.is_declaration(id)
    }

    /// Whether the name declared by `id` is read before `id` runs.
    pub fn is_read_before_declaration(&self, id: NodeId) -> bool {
        self.parsed.scopes.first_read_before_declaration(id).is_some()
    }

    /// Names declared in the scope of block `id` that are read before their
    /// declaring assignment, with the span of that first read, in source
    /// order.
    pub fn early_read_declarations(&self, id: NodeId) -> Vec<(&'a str, Span)> {
        let scope = self.scope_for(id);
        let mut reads: Vec<(&'a str, Span)> = self
            .parsed
            .scopes
            .early_reads()
            .filter(|&(declaration, _)| self.scope_for(declaration) == scope)
            .filter_map(|(declaration, read)| {
                let (NodeKind::AssignOp { assignee, .. }
                | NodeKind::CompoundAssignOp { assignee, .. }
                | NodeKind::LogicalAssignOp { assignee, .. }) = self.node(declaration)
                else {
                    return None;
                };
                let name = self.ast().identifier_name(*assignee)?;
                Some((name, self.span(read)))
            })
            .collect();
        reads.sort_by_key(|&(name, span)| (span.start, name));
        reads
    }

    pub fn register_helper(&mut self, (name, code): (&str, &str)) -> PatchResult<String> {
        self.helpers.register(name, code).map_err(|source| PatchError::Helper {
            span: self
                .current
                .last()
                .map_or(Span::point(0), |&id| self.span(id)),
            source,
        })
    }

    pub fn helpers(&self) -> &Helpers {
        &self.helpers
    }

    pub fn add_suggestion(&mut self, suggestion: Suggestion) {
        self.suggestions.push(suggestion);
    }

    /// Suggestions gathered so far, sorted and deduplicated.
    pub fn take_suggestions(&mut self) -> Vec<Suggestion> {
        let mut suggestions = std::mem::take(&mut self.suggestions);
        suggestions.sort();
        suggestions.dedup();
        suggestions
    }

    // ---- errors ----

    pub fn unsupported(&self, id: NodeId, message: impl Into<String>) -> PatchError {
        PatchError::Unsupported {
            span: self.span(id),
            node: self.node(id).name(),
            message: message.into(),
        }
    }

    pub fn missing_token(&self, id: NodeId, expected: &'static str) -> PatchError {
        PatchError::MissingToken {
            span: self.span(id),
            node: self.node(id).name(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests;
