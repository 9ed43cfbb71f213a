//! Host-side state the signal handler is allowed to touch.
//!
//! Everything reachable from [`SignalHost`] runs inside a signal handler, so
//! it is restricted to lock-free atomics and calls the implementor has
//! checked to be async-signal-safe.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use libc::c_int;

/// Number of pending-counter slots; covers every Linux signal number.
const SLOTS: usize = 65;

/// External `raise_signal` entry point of an embedding host.
pub type RaiseFn = extern "C" fn(c_int) -> c_int;

/// Capability handed to the signal handler.
///
/// # Safety
///
/// Both methods are called from signal-delivery context. Implementations
/// must not allocate, lock, block or do I/O, and must tolerate being
/// re-entered by a second signal.
pub unsafe trait SignalHost: Sync {
    /// Requests an interruption at the host's next check point.
    fn set_interrupt(&self);

    /// Receives the raw signal number. The handler discards the result.
    fn raise_signal(&self, sig: c_int) -> c_int;
}

/// Process-wide interrupt request, set from signal context and
/// cleared by the host's own loop.
#[derive(Debug, Default)]
pub struct InterruptFlag {
    raised: AtomicBool,
}

impl InterruptFlag {
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    /// Clears the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::SeqCst)
    }
}

/// Ready-made host: an interrupt flag, per-signal pending counters and an
/// optional external callback.
///
/// Signal numbers outside the counter table are not counted but still
/// reach the callback.
pub struct HostState {
    interrupt: InterruptFlag,
    pending: [AtomicU32; SLOTS],
    callback: Option<RaiseFn>,
}

impl Default for HostState {
    fn default() -> Self {
        Self::new()
    }
}

impl HostState {
    pub const fn new() -> Self {
        Self {
            interrupt: InterruptFlag::new(),
            pending: [const { AtomicU32::new(0) }; SLOTS],
            callback: None,
        }
    }

    /// Forwards every delivered signal to `callback` as well.
    ///
    /// # Safety
    ///
    /// `callback` runs in signal-delivery context and must be
    /// async-signal-safe.
    pub const unsafe fn with_callback(callback: RaiseFn) -> Self {
        Self {
            interrupt: InterruptFlag::new(),
            pending: [const { AtomicU32::new(0) }; SLOTS],
            callback: Some(callback),
        }
    }

    pub fn interrupt(&self) -> &InterruptFlag {
        &self.interrupt
    }

    pub fn pending(&self, sig: c_int) -> u32 {
        Self::slot(sig)
            .and_then(|idx| self.pending.get(idx))
            .map_or(0, |count| count.load(Ordering::SeqCst))
    }

    /// Drains the pending counters, lowest signal number first.
    pub fn take_pending(&self) -> Vec<(c_int, u32)> {
        self.pending
            .iter()
            .enumerate()
            .filter_map(|(idx, count)| {
                let n = count.swap(0, Ordering::SeqCst);
                (n > 0).then_some((idx as c_int, n))
            })
            .collect()
    }

    fn slot(sig: c_int) -> Option<usize> {
        usize::try_from(sig).ok().filter(|&idx| idx > 0 && idx < SLOTS)
    }
}

unsafe impl SignalHost for HostState {
    fn set_interrupt(&self) {
        self.interrupt.raise();
    }

    fn raise_signal(&self, sig: c_int) -> c_int {
        let counted = match Self::slot(sig) {
            Some(idx) => {
                self.pending[idx].fetch_add(1, Ordering::SeqCst);
                true
            }
            None => false,
        };

        match self.callback {
            Some(callback) => callback(sig),
            None if counted => 0,
            None => -1,
        }
    }
}
