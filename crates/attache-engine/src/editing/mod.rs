/*!
 * # Editing Core Module
 *
 * Reference document model for hosts that do not bring their own editor.
 * The document is a flat buffer of *content units* — one unit per character
 * or embedded object — which is also the addressing scheme the upload
 * subsystem uses for offsets.
 *
 * ## Architecture
 *
 * - All edits are **Commands** (`Cmd`) that compile to splices and are
 *   applied atomically; each application returns a `Patch` describing the
 *   inserted ranges, the transformed selection, and the new version.
 * - **Anchors** are stable handles to a position in the buffer. They are
 *   transformed through every edit (insertions shift them, deletions that
 *   cover them remove them), so a caller can re-resolve an anchor to its
 *   current offset at any time instead of caching a stale number.
 * - The buffer never reorders units behind the caller's back; the only
 *   structural adjustment is that an embed appended past the end of a
 *   document that does not end in a line break gets a terminating newline,
 *   which is why an embed insertion can occupy more than one unit.
 *
 * ## Module structure
 *
 * - **`document`**: the `Document` type, unit buffer plus selection/version
 * - **`commands`**: `Cmd` enum and splice compilation
 * - **`anchors`**: stable position handles and their edit transformation
 * - **`patch`**: edit result metadata
 */

// Module exports
pub mod anchors;
pub mod commands;
pub mod document;
pub mod patch;

// Public API re-exports
pub use anchors::{Anchor, AnchorId};
pub use commands::Cmd;
pub use document::{Document, Embed, Node};
pub use patch::Patch;
