use std::io;
use std::mem;
use std::ptr;

use libc::{c_int, sighandler_t};

use super::handler::{bind, forward_signal};
use super::set::SignalSet;
use super::SignalError;
use crate::core::host::SignalHost;

/// Outcome of one registration pass.
#[derive(Debug, Default)]
pub struct Registration {
    installed: Vec<c_int>,
    failed: Vec<SignalError>,
}

impl Registration {
    pub fn installed(&self) -> &[c_int] {
        &self.installed
    }

    pub fn failed(&self) -> &[SignalError] {
        &self.failed
    }

    pub fn failed_signals(&self) -> Vec<c_int> {
        self.failed
            .iter()
            .filter_map(|e| match e {
                SignalError::Registration(sig, _) => Some(*sig),
                _ => None,
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Registrar {
    signals: Vec<c_int>,
    quiet: bool,
}

impl Default for Registrar {
    fn default() -> Self {
        Self::monitored()
    }
}

impl Registrar {
    pub fn monitored() -> Self {
        Self::for_set(&SignalSet::monitored())
    }

    pub fn for_set(set: &SignalSet) -> Self {
        Self {
            signals: set.raw(),
            quiet: false,
        }
    }

    /// Registers arbitrary raw numbers, e.g. to exercise the failure path.
    pub fn with_signals(signals: &[c_int]) -> Self {
        Self {
            signals: signals.to_vec(),
            quiet: false,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn signals(&self) -> &[c_int] {
        &self.signals
    }

    /// Registers `forward_signal` for every signal. A failure is reported
    /// and skipped; the remaining signals are still registered.
    pub fn install(&self) -> Registration {
        let mut registration = Registration::default();

        for &sig in &self.signals {
            match register(sig) {
                Ok(()) => {
                    tracing::debug!(signal = sig, "handler installed");
                    registration.installed.push(sig);
                }
                Err(e) => {
                    if !self.quiet {
                        eprintln!("sigaction: {}", e);
                    }
                    tracing::warn!(signal = sig, error = %e, "handler registration failed");
                    registration.failed.push(SignalError::Registration(sig, e));
                }
            }
        }

        registration
    }
}

/// Registers the handler for hang-up, interrupt and alarm.
pub fn install() -> Registration {
    Registrar::monitored().install()
}

/// Binds `host` and registers the monitored signals.
pub fn arm(host: &'static dyn SignalHost) -> Result<Registration, SignalError> {
    bind(host)?;
    Ok(install())
}

/// Currently installed disposition for `sig`.
pub fn current_handler(sig: c_int) -> io::Result<sighandler_t> {
    unsafe {
        let mut old: libc::sigaction = mem::zeroed();
        if libc::sigaction(sig, ptr::null(), &mut old) != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(old.sa_sigaction)
    }
}

pub fn is_forwarding(sig: c_int) -> bool {
    current_handler(sig)
        .map(|handler| handler == forward_signal as sighandler_t)
        .unwrap_or(false)
}

fn register(sig: c_int) -> io::Result<()> {
    unsafe {
        let mut sa: libc::sigaction = mem::zeroed();
        sa.sa_sigaction = forward_signal as sighandler_t;
        sa.sa_flags = 0;
        libc::sigemptyset(&mut sa.sa_mask);
        if libc::sigaction(sig, &sa, ptr::null_mut()) != 0 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_signals_fail_without_aborting() {
        let registration = Registrar::with_signals(&[0, libc::SIGKILL, 4096])
            .quiet(true)
            .install();

        assert!(registration.installed().is_empty());
        assert_eq!(registration.failed_signals(), vec![0, libc::SIGKILL, 4096]);
        assert!(!registration.is_complete());
    }

    #[test]
    fn test_monitored_registrar_signals() {
        assert_eq!(
            Registrar::default().signals(),
            &[libc::SIGHUP, libc::SIGINT, libc::SIGALRM]
        );
    }

    #[test]
    fn test_current_handler_rejects_invalid() {
        assert!(current_handler(0).is_err());
        assert!(!is_forwarding(0));
    }
}
