use std::path::PathBuf;

use log::debug;

use super::App;
use crate::console::{ConsoleSettings, IdSource, SessionView};
use crate::definitions::AdminCursor;

impl App {
    /// Creates a new instance of the `App` state.
    ///
    /// # Arguments
    ///
    /// * `workspace_root` - The directory the console was started in.
    /// * `settings` - Seeds for the conversation, providers and agent cards.
    /// * `ids` - The id source shared by every store in the session.
    pub fn new(workspace_root: PathBuf, settings: &ConsoleSettings, ids: Box<dyn IdSource>) -> Self {
        let canonical_root = workspace_root.canonicalize().unwrap_or(workspace_root);
        debug!("Initializing App with workspace: {}", canonical_root.display());

        Self {
            should_quit: false,
            session: SessionView::new(settings, ids),
            admin: AdminCursor::default(),
            overlay: None,
            status_message: String::from("F1 conversation · F2 admin · Ctrl+P commands · Ctrl+Q quit"),
            workspace_root: canonical_root,
        }
    }
}
