//! Library deletion behind a confirmation dialog.
//!
//! One confirmation issues one `library.delete` call. The dialog stays open
//! and locked while the call is outstanding, then closes exactly once when the
//! matching reply arrives, whether it succeeded or failed.

use crate::app::action::Action;
use crate::app::confirm::ConfirmDialog;
use crate::app::event::RequestId;
use crate::app::query::QueryKey;
use crate::bridge::{BridgeError, LibraryId};
use crate::telemetry::analytics::AnalyticsEvent;
use tracing::debug;

const TITLE: &str = "Delete Library";
const DESCRIPTION: &str =
    "Deleting a library will permanently delete the database, the files themselves will not be deleted.";
const CTA: &str = "Delete";

#[derive(Debug)]
pub struct DeleteLibraryDialog {
    library: LibraryId,
    on_submit: Option<Action>,
    request: Option<RequestId>,
    pub dialog: ConfirmDialog,
}

impl DeleteLibraryDialog {
    /// Open the dialog for `library`. `on_submit` runs after a successful
    /// delete and never after a failed one.
    pub fn open(library: LibraryId, on_submit: Option<Action>) -> Self {
        let mut dialog = ConfirmDialog::new(TITLE, DESCRIPTION, CTA).danger();
        dialog.open();
        Self {
            library,
            on_submit,
            request: None,
            dialog,
        }
    }

    pub fn library(&self) -> LibraryId {
        self.library
    }

    pub fn is_pending(&self) -> bool {
        self.request.is_some()
    }

    /// Confirm the dialog. Returns the bridge call to issue, or `None` if a
    /// call is already outstanding.
    pub fn submit(&mut self, request: RequestId) -> Option<Action> {
        if self.is_pending() {
            return None;
        }
        self.request = Some(request);
        self.dialog.loading = true;
        Some(Action::DeleteLibrary {
            request,
            library: self.library,
        })
    }

    /// Apply the reply for `request`. Returns `None` for a reply that does not
    /// belong to the outstanding call. Otherwise the dialog is closed and the
    /// follow-up actions (success) or the error (failure) are returned.
    pub fn settle(
        &mut self,
        request: RequestId,
        result: Result<(), BridgeError>,
    ) -> Option<Result<Vec<Action>, BridgeError>> {
        if self.request != Some(request) {
            debug!(request, outstanding = ?self.request, "ignoring unmatched delete reply");
            return None;
        }
        self.request = None;
        self.dialog.close();

        Some(result.map(|()| {
            let mut actions = vec![Action::InvalidateQuery(QueryKey::LibraryList)];
            if let Some(on_submit) = self.on_submit.take() {
                actions.push(on_submit);
            }
            actions.push(Action::TrackEvent(AnalyticsEvent::LibraryDelete));
            actions
        }))
    }
}
