//=========================================================================
// Crash Reporter
//=========================================================================
//
// Routes panics through the logger before the previous hook runs, so a
// crash shows up next to the frame and scene logs that led to it.
//
// Usage:
//   let _crash = CrashReporter::register();
//   ... run the application ...
//   drop(_crash);  // hook installed before register() restored
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::panic::{self, PanicHookInfo};
use std::sync::Arc;
use std::thread;

use log::{debug, error};

//=== CrashReporter =======================================================

type PanicHook = dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static;

/// Guard owning the installed panic hook.
#[must_use = "the hook is removed when the reporter is dropped"]
pub struct CrashReporter {
    previous: Arc<PanicHook>,
}

impl CrashReporter {
    /// Installs the logging panic hook, chained in front of the current one.
    pub fn register() -> Self {
        let previous: Arc<PanicHook> = Arc::from(panic::take_hook());
        let chained = Arc::clone(&previous);

        panic::set_hook(Box::new(move |info| {
            let thread = thread::current();
            error!(
                target: "crash",
                "Thread `{}` panicked: {}",
                thread.name().unwrap_or("<unnamed>"),
                info
            );
            chained(info);
        }));
        debug!(target: "crash", "Crash reporter registered");
        Self { previous }
    }
}

impl fmt::Debug for CrashReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrashReporter").finish_non_exhaustive()
    }
}

impl Drop for CrashReporter {
    fn drop(&mut self) {
        // take_hook panics while unwinding
        if thread::panicking() {
            return;
        }
        drop(panic::take_hook());

        let previous = Arc::clone(&self.previous);
        panic::set_hook(Box::new(move |info| previous(info)));
        debug!(target: "crash", "Crash reporter unregistered");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
