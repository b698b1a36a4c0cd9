/// Result of applying a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Unit ranges that were inserted by this edit
    pub changed: Vec<std::ops::Range<usize>>,
    /// Selection after the edit, transformed through it
    pub new_selection: std::ops::Range<usize>,
    /// Document version after the edit
    pub version: u64,
}

impl Patch {
    /// Total number of content units this edit inserted.
    ///
    /// This is how callers learn the true footprint of an insertion — an
    /// embed can occupy more than one unit depending on the line structure
    /// around it, so the count is taken from what the mutation actually
    /// produced rather than assumed.
    pub fn inserted_units(&self) -> usize {
        self.changed.iter().map(|r| r.len()).sum()
    }
}
