/*!
 * # Upload Module
 *
 * Lifecycle of an image attachment: a placeholder embed is inserted the
 * moment a file arrives, the upload runs in the background, and when it
 * settles the placeholder is swapped for the final reference (success) or
 * excised (failure).
 *
 * The hard part is finding the placeholder again. The document keeps moving
 * while the upload is in flight — the user types, deletes, attaches more
 * images — so each task holds an [`AnchorId`](crate::editing::AnchorId)
 * instead of an offset and re-resolves it at the moment of reconciliation.
 *
 * ## Module structure
 *
 * - **`registry`**: task bookkeeping, one entry per in-flight upload
 * - **`driver`**: [`ImageUploader`], async orchestration of read + upload
 * - **`reconcile`**: placeholder insertion and the success/failure patches
 * - **`preview`**: local data-URL preview of the file being uploaded
 *
 * Everything runs on one logical thread; a task suspends only while awaiting
 * the local preview read and the upload operation itself. Nothing here is
 * fatal to the host document: every failure path degrades to "the
 * placeholder never appears or disappears cleanly".
 */

use std::rc::Rc;

pub mod driver;
pub mod preview;
pub mod reconcile;
pub mod registry;

pub use driver::{ImageUploader, PreviewFn, PreviewFuture, UploadFn, UploadFuture, UploadOptions};
pub use preview::PreviewError;
pub use reconcile::ReconcileError;
pub use registry::{TaskId, TaskState, UploadRegistry, UploadTask};

/// A file handed to the core by the host's capture layer (file picker, drop,
/// paste — all outside this crate). Cheap to clone; the bytes are shared.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub mime: String,
    pub data: Rc<[u8]>,
}

impl SourceFile {
    pub fn new(mime: impl Into<String>, data: impl Into<Rc<[u8]>>) -> Self {
        Self {
            mime: mime.into(),
            data: data.into(),
        }
    }
}
