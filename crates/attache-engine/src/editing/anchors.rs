use uuid::Uuid;

use crate::editing::commands::Splice;

/// Stable handle to a position in the unit buffer that survives edits.
///
/// An anchor tracks the unit it was attached to: insertions at or before it
/// shift it right, deletions before it shift it left, and a deletion that
/// covers the anchored unit removes the anchor entirely. Callers therefore
/// re-resolve an anchor at the moment of use instead of caching its offset.
#[derive(Clone, Debug, PartialEq)]
pub struct Anchor {
    pub id: AnchorId,
    pub offset: usize,
}

/// Unique identifier for an anchor
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct AnchorId(Uuid);

impl AnchorId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Current offset of an anchor, or `None` if its unit has been deleted.
pub(crate) fn resolve(anchors: &[Anchor], id: AnchorId) -> Option<usize> {
    anchors.iter().find(|a| a.id == id).map(|a| a.offset)
}

/// Transform all anchors through one splice.
///
/// Insertion at exactly the anchor offset moves the anchor forward: the
/// anchored unit itself shifts right, so the anchor follows it.
pub(crate) fn transform_anchors(anchors: &mut Vec<Anchor>, splice: &Splice) {
    match splice {
        Splice::Insert { at, nodes } => {
            let len = nodes.len();
            for anchor in anchors.iter_mut() {
                if anchor.offset >= *at {
                    anchor.offset += len;
                }
            }
        }
        Splice::Delete { range } => {
            let len = range.len();
            // Anchors inside the deleted range lose their unit
            anchors.retain(|a| !range.contains(&a.offset));
            for anchor in anchors.iter_mut() {
                if anchor.offset >= range.end {
                    anchor.offset -= len;
                }
            }
        }
    }
}
