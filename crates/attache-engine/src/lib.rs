pub mod editing;
pub mod surface;
pub mod upload;

// Re-export key types for easier usage
pub use editing::{Anchor, AnchorId, Cmd, Document, Embed, Node, Patch};
pub use surface::{EditorSurface, EmbedInsert};
pub use upload::{
    ImageUploader, PreviewError, ReconcileError, SourceFile, TaskId, TaskState, UploadFn,
    UploadFuture, UploadOptions, UploadRegistry, UploadTask,
};
