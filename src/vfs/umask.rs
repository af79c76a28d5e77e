//! Scoped replacement of the process-wide permission mask.

use std::cell::Cell;
use std::sync::{Mutex, MutexGuard};

// Serialises mask swaps made through guards in this process.
static UMASK_LOCK: Mutex<()> = Mutex::new(());

thread_local! {
    // Set while this thread owns `UMASK_LOCK`, so guards can nest.
    static HELD: Cell<bool> = const { Cell::new(false) };
}

/// Holds the process umask steady for its lifetime, optionally replacing it.
///
/// Guards taken on one thread nest: only the outermost one locks. Drop them in
/// reverse order. On non-unix hosts the guard only takes the lock.
pub struct UmaskGuard {
    #[cfg(unix)]
    previous: Option<libc::mode_t>,
    lock: Option<MutexGuard<'static, ()>>,
}

impl UmaskGuard {
    /// Installs `mask` until the guard is dropped.
    pub fn set(mask: u32) -> Self {
        Self::acquire(Some(mask))
    }

    /// Keeps whatever mask the process has, blocking other guards meanwhile.
    pub fn hold() -> Self {
        Self::acquire(None)
    }

    pub fn acquire(mask: Option<u32>) -> Self {
        let lock = if HELD.with(Cell::get) {
            None
        } else {
            let lock = UMASK_LOCK
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            HELD.with(|held| held.set(true));
            Some(lock)
        };

        #[cfg(unix)]
        {
            // SAFETY: umask has no preconditions and cannot fail.
            let previous = mask.map(|mask| unsafe { libc::umask(mask as libc::mode_t) });
            Self { previous, lock }
        }

        #[cfg(not(unix))]
        {
            let _ = mask;
            Self { lock }
        }
    }
}

impl Drop for UmaskGuard {
    fn drop(&mut self) {
        #[cfg(unix)]
        {
            if let Some(previous) = self.previous {
                // SAFETY: see `UmaskGuard::acquire`.
                unsafe { libc::umask(previous) };
            }
        }
        if self.lock.is_some() {
            HELD.with(|held| held.set(false));
        }
    }
}
