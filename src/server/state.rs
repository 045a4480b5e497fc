//! Server state management for the stitching server

use std::path::PathBuf;

use crate::board::Board;
use crate::settings::{StitchSettings, Units, DEFAULT_SETTINGS_FILE};
use crate::stitch::GroupRegistry;

/// In-memory state: the loaded board, its placement groups and the dialog defaults
pub struct ServerState {
    pub board_path: Option<PathBuf>,
    pub board: Option<Board>,
    pub groups: GroupRegistry,
    pub settings_path: PathBuf,
    pub settings: StitchSettings,
    pub units: Units,
}

impl ServerState {
    /// Fresh state reading defaults from `settings_path`
    pub fn new(settings_path: PathBuf) -> Self {
        let settings = StitchSettings::load(&settings_path);
        Self {
            board_path: None,
            board: None,
            groups: GroupRegistry::new(),
            settings_path,
            settings,
            units: Units::default(),
        }
    }

    /// Install a board and rebuild the group registry from it
    pub fn set_board(&mut self, board: Board, path: Option<PathBuf>) {
        self.groups = board.group_registry();
        self.board = Some(board);
        self.board_path = path;
    }

    /// Drop the board, keep settings
    pub fn close(&mut self) {
        self.board = None;
        self.board_path = None;
        self.groups = GroupRegistry::new();
    }

    pub fn is_board_loaded(&self) -> bool {
        self.board.is_some()
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_SETTINGS_FILE))
    }
}
