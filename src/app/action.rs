use crate::app::event::RequestId;
use crate::app::query::QueryKey;
use crate::app::route::Route;
use crate::bridge::LibraryId;
use crate::host::HostCommand;
use crate::telemetry::analytics::AnalyticsEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FetchLibraries,
    CreateLibrary { name: String },
    DeleteLibrary { request: RequestId, library: LibraryId },
    InvalidateQuery(QueryKey),
    Navigate(Route),
    TrackEvent(AnalyticsEvent),
    CaptureError { error: String },
    /// Throw away all state and start over from the config file.
    Reload,
    /// Leave the crash page and render the current state again.
    ResetBoundary,
    InvokeHost(HostCommand),
    Quit,
}
