//! Cached query results keyed by procedure name.

use crate::bridge::LibraryInfo;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    LibraryList,
}

impl QueryKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKey::LibraryList => "library.list",
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cached query. Starts stale with no data.
#[derive(Debug)]
pub struct Query<T> {
    data: Option<T>,
    error: Option<String>,
    stale: bool,
    fetching: bool,
}

impl<T> Query<T> {
    pub fn new() -> Self {
        Self {
            data: None,
            error: None,
            stale: true,
            fetching: false,
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// Mark the query as in flight. Returns `false` if a fetch is already
    /// outstanding, in which case no new call should be issued.
    pub fn begin_fetch(&mut self) -> bool {
        if self.fetching {
            return false;
        }
        self.fetching = true;
        self.stale = false;
        true
    }

    /// Store a fetch result. Returns `true` if the query was invalidated
    /// while the fetch was in flight and must be fetched again.
    pub fn resolve(&mut self, result: Result<T, String>) -> bool {
        self.fetching = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
        self.stale
    }

    /// Mark the cached data as outdated. Returns `true` if a refetch should
    /// be issued now.
    pub fn invalidate(&mut self) -> bool {
        self.stale = true;
        !self.fetching
    }
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
pub struct QueryCache {
    pub libraries: Query<Vec<LibraryInfo>>,
}

impl QueryCache {
    pub fn invalidate(&mut self, key: QueryKey) -> bool {
        match key {
            QueryKey::LibraryList => self.libraries.invalidate(),
        }
    }
}
