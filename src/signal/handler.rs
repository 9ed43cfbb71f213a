use std::sync::OnceLock;

use libc::c_int;

use super::SignalError;
use crate::core::host::SignalHost;

static HOST: OnceLock<&'static dyn SignalHost> = OnceLock::new();

/// Injects the host the handler forwards to. Only one host per process.
pub fn bind(host: &'static dyn SignalHost) -> Result<(), SignalError> {
    HOST.set(host).map_err(|_| SignalError::HostAlreadyBound)?;
    tracing::debug!("signal host bound");
    Ok(())
}

pub fn is_bound() -> bool {
    HOST.get().is_some()
}

/// Delivery action registered for every monitored signal.
///
/// Sets the interrupt flag first, then hands the raw number to the host.
/// Signals arriving before a host is bound are dropped.
pub extern "C" fn forward_signal(sig: c_int) {
    // `get` is a single acquire load once initialised.
    let Some(host) = HOST.get() else {
        return;
    };
    host.set_interrupt();
    let _ = host.raise_signal(sig);
}
