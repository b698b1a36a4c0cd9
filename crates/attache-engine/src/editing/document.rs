use crate::editing::commands::{self, Splice};
use crate::editing::{Anchor, AnchorId, Cmd, Patch, anchors};
use crate::surface::{EditorSurface, EmbedInsert};

/// An embedded (non-text) object occupying one content unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Embed {
    /// Image still uploading; shows a locally decoded preview until the
    /// upload settles.
    PendingImage { preview: String },
    /// Final image reference.
    Image { src: String },
}

/// One content unit of the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Char(char),
    Embed(Embed),
}

/// Reference in-memory document addressed in content units.
///
/// One unit per character or embed; all offsets handed to and returned from
/// this type count units, not bytes. Anchors registered on the document are
/// transformed through every edit so they keep pointing at the same unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The unit buffer
    nodes: Vec<Node>,
    /// Current selection/caret as unit offsets
    selection: std::ops::Range<usize>,
    /// Version number that increments with each edit
    version: u64,
    /// Stable position handles that survive edits
    anchors: Vec<Anchor>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            selection: 0..0,
            version: 0,
            anchors: Vec::new(),
        }
    }

    /// Create a document from plain text (one unit per character)
    pub fn from_text(text: &str) -> Self {
        let nodes: Vec<Node> = text.chars().map(Node::Char).collect();
        let len = nodes.len();
        Self {
            nodes,
            selection: len..len, // Start with cursor at end
            version: 0,
            anchors: Vec::new(),
        }
    }

    /// Create a document from raw bytes, ensuring valid UTF-8
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_text(text))
    }

    /// Apply a command to the document
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let splices = commands::compile_command(self, &cmd);

        // Track inserted ranges for the patch
        let mut changed = Vec::new();
        for splice in &splices {
            match splice {
                Splice::Insert { at, nodes } => {
                    changed.push(*at..(*at + nodes.len()));
                    self.nodes.splice(*at..*at, nodes.iter().cloned());
                }
                Splice::Delete { range } => {
                    self.nodes.drain(range.clone());
                }
            }

            // Anchors and selection track each splice as it lands
            anchors::transform_anchors(&mut self.anchors, splice);
            self.selection = commands::transform_selection(&self.selection, splice);
        }

        self.version += 1;

        Patch {
            changed,
            new_selection: self.selection.clone(),
            version: self.version,
        }
    }

    /// Insert an embed and return a fresh anchor tracking it.
    ///
    /// The anchor follows the embed through later edits; `occupied` reports
    /// how many units the insertion actually produced (see `Patch`).
    pub fn insert_embed(&mut self, at: usize, embed: Embed) -> EmbedInsert {
        let at = at.min(self.len());
        let patch = self.apply(Cmd::InsertEmbed { at, embed });
        let occupied = patch.inserted_units();
        let id = AnchorId::generate();
        self.anchors.push(Anchor { id, offset: at });
        EmbedInsert {
            anchor: id,
            occupied,
            at,
        }
    }

    /// Current offset of an anchor, or `None` if its unit was deleted
    pub fn anchor_offset(&self, id: AnchorId) -> Option<usize> {
        anchors::resolve(&self.anchors, id)
    }

    /// Get the current selection range
    pub fn selection(&self) -> std::ops::Range<usize> {
        self.selection.clone()
    }

    /// Set the selection range
    pub fn set_selection(&mut self, selection: std::ops::Range<usize>) {
        self.selection = selection;
    }

    /// Get the current version
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Buffer length in content units
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn ends_with_newline(&self) -> bool {
        matches!(self.nodes.last(), Some(Node::Char('\n')))
    }

    /// The unit at `at`, if any
    pub fn node_at(&self, at: usize) -> Option<&Node> {
        self.nodes.get(at)
    }

    /// Text rendering of the buffer; embeds appear as U+FFFC (the object
    /// replacement character).
    pub fn text(&self) -> String {
        self.nodes
            .iter()
            .map(|n| match n {
                Node::Char(c) => *c,
                Node::Embed(_) => '\u{FFFC}',
            })
            .collect()
    }

    /// All embeds with their current offsets, in document order
    pub fn embeds(&self) -> Vec<(usize, Embed)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| match n {
                Node::Embed(e) => Some((i, e.clone())),
                Node::Char(_) => None,
            })
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSurface for Document {
    fn insert_embed(&mut self, at: usize, embed: Embed) -> EmbedInsert {
        Document::insert_embed(self, at, embed)
    }

    fn delete_range(&mut self, at: usize, len: usize) {
        self.apply(Cmd::DeleteRange {
            range: at..at + len,
        });
    }

    fn anchor_offset(&self, id: AnchorId) -> Option<usize> {
        Document::anchor_offset(self, id)
    }

    fn caret(&self) -> usize {
        self.selection.start
    }

    fn set_caret(&mut self, at: usize) {
        self.selection = at..at;
    }
}
