use crate::bridge::{BridgeError, LibraryInfo};
use crossterm::event::Event as CrosstermEvent;

/// Correlates a bridge call with its reply.
pub type RequestId = u64;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// Reply to `library.list`
    LibrariesLoaded {
        result: Result<Vec<LibraryInfo>, BridgeError>,
    },

    /// Reply to `library.create`
    LibraryCreated {
        result: Result<LibraryInfo, BridgeError>,
    },

    /// Reply to `library.delete`, success or failure
    DeleteSettled {
        request: RequestId,
        result: Result<(), BridgeError>,
    },

    /// Tick for UI refresh
    Tick,
}
