/*!
 * # Editing Session
 *
 * Keeps the form, the stored fragment and the preview of one snippet in
 * step while the user edits.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Model
 * - One [`Snippet`](crate::models::Snippet) per session, owned by [`SnippetEditor`]
 * - Built once at open time: empty, or decoded from the stored fragment
 * - Re-encoded after every change; only the encoded fragment is persisted
 *
 * ### 2. Command-Based Editing
 * - All edits arrive as [`Cmd`] values and return a [`Patch`]
 * - A patch says whether the fragment changed and carries any icon fetch the
 *   host has to dispatch
 *
 * ### 3. Asynchronous Icons
 * - Icon fetches run wherever the host likes and come back through
 *   [`SnippetEditor::complete_icon`]
 * - Responses for a URL the user has since changed are discarded
 * - Failures raise a notification and leave the fragment untouched
 *
 * ### 4. Basic and Advanced Modes
 * - Basic: structured form driving the codec
 * - Advanced: raw HTML, used for fragments the codec cannot decode
 * - Leaving advanced mode is refused unless the raw HTML decodes
 *
 * ### 5. Read API: Immutable Snapshots
 * - UIs render from [`EditorSnapshot`] and never mutate the model directly
 *
 * ## Module Structure
 *
 * - **`commands`**: `Cmd` enum of UI edits
 * - **`patch`**: result of applying an edit
 * - **`session`**: `SnippetEditor`, the synchronization component
 * - **`snapshot`**: `EditorSnapshot` and `EditorMode`
 */

pub mod commands;
pub mod patch;
pub mod session;
pub mod snapshot;

pub use commands::Cmd;
pub use patch::Patch;
pub use session::SnippetEditor;
pub use snapshot::{EditorMode, EditorSnapshot};
