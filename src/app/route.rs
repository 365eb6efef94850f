use crate::bridge::{LibraryId, LibraryInfo};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Libraries,
    Library(LibraryId),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("library not found: {0}")]
    LibraryNotFound(LibraryId),
}

/// Check that a route points at something that exists in the loaded listing.
pub fn resolve(route: &Route, libraries: &[LibraryInfo]) -> Result<(), NavigationError> {
    match route {
        Route::Libraries => Ok(()),
        Route::Library(id) => {
            if libraries.iter().any(|l| l.id == *id) {
                Ok(())
            } else {
                Err(NavigationError::LibraryNotFound(*id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_resolve() {
        let lib = LibraryInfo {
            id: LibraryId::new(),
            name: "Media".into(),
            description: None,
            created_at: Utc::now(),
        };
        let libs = vec![lib.clone()];
        assert!(resolve(&Route::Libraries, &[]).is_ok());
        assert!(resolve(&Route::Library(lib.id), &libs).is_ok());

        let missing = LibraryId::new();
        let err = resolve(&Route::Library(missing), &libs).unwrap_err();
        assert_eq!(err.to_string(), format!("library not found: {}", missing));
    }
}
