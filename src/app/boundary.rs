//! Render boundary: turns a panic raised while drawing into a value.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

thread_local! {
    static ACTIVE: Cell<bool> = const { Cell::new(false) };
}

/// Whether the current thread is inside [`catch`]. The panic hook uses this to
/// leave the terminal alone for panics that will be recovered.
pub fn is_active() -> bool {
    ACTIVE.with(|a| a.get())
}

/// Run `f`, converting a panic into its message.
pub fn catch<R>(f: impl FnOnce() -> R) -> Result<R, String> {
    let was_active = ACTIVE.with(|a| a.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    ACTIVE.with(|a| a.set(was_active));
    result.map_err(|payload| panic_message(payload.as_ref()))
}

pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
