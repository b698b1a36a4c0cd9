use thiserror::Error;

use crate::editing::Embed;
use crate::surface::EditorSurface;
use crate::upload::SourceFile;
use crate::upload::registry::{TaskId, UploadRegistry};

/// Why a reconciliation turned into a no-op.
///
/// Neither case is fatal and neither corrupts the document: a stale task was
/// already resolved once, and a lost anchor means the user removed the
/// placeholder themselves.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("upload task is no longer registered")]
    StaleTask,
    #[error("placeholder anchor no longer exists in the document")]
    AnchorLost,
}

/// Insert a placeholder embed for `file` at `at` and register the upload.
///
/// The placeholder carries the locally decoded `preview` so the user sees
/// the image immediately; the returned task id is what the upload's
/// settlement hands back to [`apply_success`] / [`apply_failure`]. The caret
/// moves to immediately after the placeholder.
pub fn insert_placeholder<S: EditorSurface>(
    surface: &mut S,
    registry: &mut UploadRegistry,
    file: SourceFile,
    at: usize,
    preview: String,
) -> TaskId {
    let ins = surface.insert_embed(at, Embed::PendingImage { preview });
    surface.set_caret(ins.at + 1);
    registry.register(file, ins.anchor, ins.occupied)
}

/// Swap the task's placeholder for the final image reference.
///
/// Claims the registry entry (second calls are no-ops), re-resolves the
/// anchor to find where the placeholder sits right now, then deletes the
/// placeholder span and inserts the final embed back-to-back — the two steps
/// form one atomic patch from the document's perspective, with no suspension
/// point for another task's patch to interleave into.
pub fn apply_success<S: EditorSurface>(
    surface: &mut S,
    registry: &mut UploadRegistry,
    id: TaskId,
    url: &str,
) -> Result<(), ReconcileError> {
    let task = registry.claim(id).ok_or(ReconcileError::StaleTask)?;
    let offset = surface
        .anchor_offset(task.anchor)
        .ok_or(ReconcileError::AnchorLost)?;

    let caret = surface.caret();
    surface.delete_range(offset, task.placeholder_len);
    surface.insert_embed(
        offset,
        Embed::Image {
            src: url.to_string(),
        },
    );

    // A caret that sat immediately after the placeholder stays immediately
    // after the newly inserted reference.
    if caret == offset + 1 {
        surface.set_caret(offset + 1);
    }
    Ok(())
}

/// Excise the task's placeholder after a failed upload.
pub fn apply_failure<S: EditorSurface>(
    surface: &mut S,
    registry: &mut UploadRegistry,
    id: TaskId,
) -> Result<(), ReconcileError> {
    let task = registry.claim(id).ok_or(ReconcileError::StaleTask)?;
    let offset = surface
        .anchor_offset(task.anchor)
        .ok_or(ReconcileError::AnchorLost)?;

    surface.delete_range(offset, task.placeholder_len);
    Ok(())
}
