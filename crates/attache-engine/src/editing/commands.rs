use crate::editing::document::{Document, Embed, Node};

/// Commands that can be applied to the document
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    InsertText { at: usize, text: String },
    InsertEmbed { at: usize, embed: Embed },
    DeleteRange { range: std::ops::Range<usize> },
}

/// A single contiguous buffer mutation compiled from a command.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Splice {
    Insert { at: usize, nodes: Vec<Node> },
    Delete { range: std::ops::Range<usize> },
}

/// Compile a command into the splices it performs on the buffer.
///
/// Offsets in later splices assume the earlier ones have been applied.
/// An embed appended past the end of a non-empty document that does not end
/// in a line break also inserts a terminating newline, so an embed insertion
/// can compile to two splices.
pub(crate) fn compile_command(doc: &Document, cmd: &Cmd) -> Vec<Splice> {
    let len = doc.len();
    match cmd {
        Cmd::InsertText { at, text } => {
            let at = (*at).min(len);
            let nodes: Vec<Node> = text.chars().map(Node::Char).collect();
            if nodes.is_empty() {
                Vec::new()
            } else {
                vec![Splice::Insert { at, nodes }]
            }
        }
        Cmd::InsertEmbed { at, embed } => {
            let at = (*at).min(len);
            let mut splices = vec![Splice::Insert {
                at,
                nodes: vec![Node::Embed(embed.clone())],
            }];
            if at == len && len > 0 && !doc.ends_with_newline() {
                splices.push(Splice::Insert {
                    at: at + 1,
                    nodes: vec![Node::Char('\n')],
                });
            }
            splices
        }
        Cmd::DeleteRange { range } => {
            let start = range.start.min(len);
            let end = range.end.min(len);
            if start >= end {
                Vec::new()
            } else {
                vec![Splice::Delete { range: start..end }]
            }
        }
    }
}

/// Transform a selection through one splice.
pub(crate) fn transform_selection(
    selection: &std::ops::Range<usize>,
    splice: &Splice,
) -> std::ops::Range<usize> {
    match splice {
        Splice::Insert { at, nodes } => {
            let len = nodes.len();
            if *at <= selection.start {
                // Insertion before or at the selection start shifts it right
                (selection.start + len)..(selection.end + len)
            } else if *at < selection.end {
                // Insertion inside the selection grows the end
                selection.start..(selection.end + len)
            } else {
                selection.clone()
            }
        }
        Splice::Delete { range } => {
            let len = range.len();
            if range.end <= selection.start {
                // Deletion completely before the selection shifts it left
                (selection.start - len)..(selection.end - len)
            } else if range.start >= selection.end {
                selection.clone()
            } else {
                // Deletion overlaps the selection: collapse to the deletion point
                range.start..range.start
            }
        }
    }
}
