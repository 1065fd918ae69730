//! Text edit buffer over an immutable source string.
//!
//! Edits are addressed in original-source offsets and only realized when
//! the buffer is rendered. Inserted text attaches to one side of an offset:
//!
//! - left (`insert`, `append_left`): joins the content that ends at the
//!   offset. Calls at one offset render in call order.
//! - right (`prepend_right`): joins the content that starts at the offset,
//!   ahead of anything already attached there, so a later call wraps an
//!   earlier one.
//!
//! At a single offset the render order is: left inserts, right inserts,
//! then the source character at that offset.
//!
//! `slice(start, end)` covers right inserts at `start`, everything strictly
//! inside, and left inserts at `end`. `remove` and `overwrite` clear exactly
//! that set.

use std::collections::BTreeMap;

use decaf_ir::Span;
use tracing::trace;

/// A rejected edit. Every variant carries original-source offsets.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("range {start}..{end} is outside the source (length {len})")]
    OutOfBounds { start: u32, end: u32, len: u32 },

    #[error("range {start}..{end} is inverted")]
    Inverted { start: u32, end: u32 },

    #[error("cannot overwrite an empty range at {offset}")]
    EmptyOverwrite { offset: u32 },

    #[error("edit {start}..{end} overlaps an earlier edit at {existing:?} (`{excerpt}`)")]
    Overlap {
        start: u32,
        end: u32,
        existing: Span,
        excerpt: String,
    },

    #[error("cannot insert at {offset}, inside the edited range {existing:?}")]
    InsertInsideEdit { offset: u32, existing: Span },

    #[error("slice {start}..{end} splits the edited range {existing:?}")]
    SliceSplitsEdit {
        start: u32,
        end: u32,
        existing: Span,
    },
}

impl EditError {
    /// Original-source range the error points at.
    pub fn span(&self) -> Span {
        match self {
            EditError::OutOfBounds { start, end, .. }
            | EditError::Inverted { start, end }
            | EditError::Overlap { start, end, .. }
            | EditError::SliceSplitsEdit { start, end, .. } => {
                Span::new((*start).min(*end), (*start).max(*end))
            }
            EditError::EmptyOverwrite { offset } | EditError::InsertInsideEdit { offset, .. } => {
                Span::point(*offset)
            }
        }
    }
}

/// Inserts attached at one offset.
#[derive(Clone, Debug, Default)]
struct Attached {
    left: Vec<String>,
    right: Vec<String>,
}

impl Attached {
    fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

/// A removed or overwritten range.
#[derive(Clone, Debug)]
struct Replacement {
    end: u32,
    text: String,
}

pub struct EditBuffer<'s> {
    source: &'s str,
    attached: BTreeMap<u32, Attached>,
    replaced: BTreeMap<u32, Replacement>,
}

impl<'s> EditBuffer<'s> {
    pub fn new(source: &'s str) -> Self {
        EditBuffer {
            source,
            attached: BTreeMap::new(),
            replaced: BTreeMap::new(),
        }
    }

    pub fn original(&self) -> &'s str {
        self.source
    }

    #[inline]
    fn len(&self) -> u32 {
        self.source.len() as u32
    }

    /// Same as [`EditBuffer::append_left`].
    pub fn insert(&mut self, offset: u32, text: &str) -> Result<(), EditError> {
        self.append_left(offset, text)
    }

    pub fn append_left(&mut self, offset: u32, text: &str) -> Result<(), EditError> {
        self.check_insert(offset)?;
        trace!(offset, text, "append_left");
        if !text.is_empty() {
            self.attached
                .entry(offset)
                .or_default()
                .left
                .push(text.to_owned());
        }
        Ok(())
    }

    pub fn prepend_right(&mut self, offset: u32, text: &str) -> Result<(), EditError> {
        self.check_insert(offset)?;
        trace!(offset, text, "prepend_right");
        if !text.is_empty() {
            self.attached
                .entry(offset)
                .or_default()
                .right
                .insert(0, text.to_owned());
        }
        Ok(())
    }

    /// Replace `start..end` with `text`. Fails if the range intersects any
    /// earlier overwrite or removal.
    pub fn overwrite(&mut self, start: u32, end: u32, text: &str) -> Result<(), EditError> {
        self.check_range(start, end)?;
        if start == end {
            return Err(EditError::EmptyOverwrite { offset: start });
        }
        if let Some(existing) = self.replaced_intersecting(start, end).next() {
            return Err(self.overlap(start, end, existing));
        }
        trace!(start, end, text, "overwrite");
        self.clear_attached(start, end);
        self.replaced.insert(
            start,
            Replacement {
                end,
                text: text.to_owned(),
            },
        );
        Ok(())
    }

    /// Delete `start..end`. Earlier edits wholly inside the range are
    /// swallowed; partial overlap fails. Empty ranges are a no-op.
    pub fn remove(&mut self, start: u32, end: u32) -> Result<(), EditError> {
        self.check_range(start, end)?;
        if start == end {
            return Ok(());
        }
        let inside: Vec<Span> = self.replaced_intersecting(start, end).collect();
        if let Some(&partial) = inside
            .iter()
            .find(|s| s.start < start || s.end > end)
        {
            return Err(self.overlap(start, end, partial));
        }
        trace!(start, end, "remove");
        for span in inside {
            self.replaced.remove(&span.start);
        }
        self.clear_attached(start, end);
        self.replaced.insert(
            start,
            Replacement {
                end,
                text: String::new(),
            },
        );
        Ok(())
    }

    /// The current text of `start..end`, edits included.
    pub fn slice(&self, start: u32, end: u32) -> Result<String, EditError> {
        self.check_range(start, end)?;
        if let Some(existing) = self.replaced_splitting(start, end) {
            return Err(EditError::SliceSplitsEdit {
                start,
                end,
                existing,
            });
        }

        let mut out = String::new();
        if start == end {
            if let Some(at) = self.attached.get(&start) {
                at.left.iter().for_each(|t| out.push_str(t));
                at.right.iter().for_each(|t| out.push_str(t));
            }
            return Ok(out);
        }

        if let Some(at) = self.attached.get(&start) {
            at.right.iter().for_each(|t| out.push_str(t));
        }
        let mut pos = start;
        while pos < end {
            if pos > start {
                if let Some(at) = self.attached.get(&pos) {
                    at.left.iter().for_each(|t| out.push_str(t));
                    at.right.iter().for_each(|t| out.push_str(t));
                }
            }
            if let Some(replacement) = self.replaced.get(&pos) {
                out.push_str(&replacement.text);
                pos = replacement.end;
                continue;
            }
            let next_insert = self.attached.range(pos + 1..end).next().map(|(&k, _)| k);
            let next_edit = self.replaced.range(pos + 1..end).next().map(|(&k, _)| k);
            let next = [next_insert, next_edit]
                .into_iter()
                .flatten()
                .min()
                .unwrap_or(end);
            out.push_str(&self.source[pos as usize..next as usize]);
            pos = next;
        }
        if let Some(at) = self.attached.get(&end) {
            at.left.iter().for_each(|t| out.push_str(t));
        }
        Ok(out)
    }

    /// Render the whole buffer.
    pub fn render(&self) -> Result<String, EditError> {
        let len = self.len();
        let mut out = String::new();
        if let Some(at) = self.attached.get(&0) {
            at.left.iter().for_each(|t| out.push_str(t));
        }
        if len == 0 {
            if let Some(at) = self.attached.get(&0) {
                at.right.iter().for_each(|t| out.push_str(t));
            }
            return Ok(out);
        }
        out.push_str(&self.slice(0, len)?);
        if let Some(at) = self.attached.get(&len) {
            at.right.iter().for_each(|t| out.push_str(t));
        }
        Ok(out)
    }

    fn check_range(&self, start: u32, end: u32) -> Result<(), EditError> {
        if start > end {
            return Err(EditError::Inverted { start, end });
        }
        if end > self.len() {
            return Err(EditError::OutOfBounds {
                start,
                end,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn check_insert(&self, offset: u32) -> Result<(), EditError> {
        self.check_range(offset, offset)?;
        match self.replaced.range(..offset).next_back() {
            Some((&s, r)) if r.end > offset => Err(EditError::InsertInsideEdit {
                offset,
                existing: Span::new(s, r.end),
            }),
            _ => Ok(()),
        }
    }

    fn replaced_intersecting(&self, start: u32, end: u32) -> impl Iterator<Item = Span> + '_ {
        let before = self
            .replaced
            .range(..start)
            .next_back()
            .filter(|(_, r)| r.end > start);
        before
            .into_iter()
            .chain(self.replaced.range(start..end))
            .map(|(&s, r)| Span::new(s, r.end))
    }

    fn replaced_splitting(&self, start: u32, end: u32) -> Option<Span> {
        [start, end].into_iter().find_map(|offset| {
            self.replaced
                .range(..offset)
                .next_back()
                .filter(|(_, r)| r.end > offset)
                .map(|(&s, r)| Span::new(s, r.end))
        })
    }

    /// Drop the inserts `slice(start, end)` would render.
    fn clear_attached(&mut self, start: u32, end: u32) {
        if let Some(at) = self.attached.get_mut(&start) {
            at.right.clear();
        }
        let inner: Vec<u32> = self.attached.range(start + 1..end).map(|(&k, _)| k).collect();
        for offset in inner {
            self.attached.remove(&offset);
        }
        if let Some(at) = self.attached.get_mut(&end) {
            at.left.clear();
        }
        self.attached.retain(|_, at| !at.is_empty());
    }

    fn overlap(&self, start: u32, end: u32, existing: Span) -> EditError {
        let from = existing.start.saturating_sub(10) as usize;
        let to = (existing.end as usize + 10).min(self.source.len());
        let excerpt = self
            .source
            .get(from..to)
            .unwrap_or_default()
            .replace('\n', "\\n");
        EditError::Overlap {
            start,
            end,
            existing,
            excerpt,
        }
    }
}

#[cfg(test)]
mod tests;
