use crate::editing::{AnchorId, Embed};

/// Result of inserting an embed into an editing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbedInsert {
    /// Anchor tracking the inserted embed across later edits
    pub anchor: AnchorId,
    /// How many content units the insertion actually produced
    pub occupied: usize,
    /// Offset the embed landed at (clamped to the document length)
    pub at: usize,
}

/// Boundary to the host document editing component.
///
/// The upload subsystem drives everything through this trait and never
/// touches the document representation directly. All offsets are in the
/// surface's native content-unit addressing. Implementations are expected to
/// keep anchors valid across unrelated edits and to report them as gone once
/// the anchored node has been deleted; callers re-resolve at the moment of
/// use rather than caching offsets.
///
/// The in-crate [`Document`](crate::editing::Document) is a reference
/// implementation; hosts with their own editor supply their own.
pub trait EditorSurface {
    /// Insert a non-text embed at `at`, returning a tracking anchor and the
    /// number of units the mutation actually produced.
    fn insert_embed(&mut self, at: usize, embed: Embed) -> EmbedInsert;

    /// Delete `len` content units starting at `at`.
    fn delete_range(&mut self, at: usize, len: usize);

    /// Current offset of an anchor, or `None` once its node is gone.
    fn anchor_offset(&self, id: AnchorId) -> Option<usize>;

    /// Collapsed caret position.
    fn caret(&self) -> usize;

    fn set_caret(&mut self, at: usize);

    /// Give the editing surface input focus. No-op by default; interactive
    /// hosts override this.
    fn focus(&mut self) {}
}
