//! Relays hang-up, interrupt and alarm signals to an embedding host.
//!
//! The host owns an interrupt flag and receives every delivered signal
//! number through the [`core::host::SignalHost`] capability. Typical use:
//!
//! ```no_run
//! use sigrelay::core::host::HostState;
//!
//! static HOST: HostState = HostState::new();
//!
//! let registration = sigrelay::signal::arm(&HOST).expect("host already bound");
//! assert!(registration.is_complete());
//!
//! // later, at a safe point in the host's loop:
//! // Drain every time: the flag can be cleared before the count lands.
//! let _ = HOST.interrupt().take();
//! for (sig, count) in HOST.take_pending() {
//!     println!("signal {} x{}", sig, count);
//! }
//! ```

pub mod error;
pub mod flags;
pub mod highlight;
pub mod relay;

pub mod core;
pub mod signal;
