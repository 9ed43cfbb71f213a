use std::fmt;

use libc::c_int;

pub mod handler;
pub mod registrar;
pub mod set;

pub use handler::{bind, forward_signal, is_bound};
pub use registrar::{arm, current_handler, install, is_forwarding, Registrar, Registration};
pub use set::{Signal, SignalSet};

#[derive(Debug)]
pub enum SignalError {
    HostAlreadyBound,
    Unsupported(String),
    Registration(c_int, std::io::Error),
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalError::HostAlreadyBound => write!(f, "a signal host is already bound"),
            SignalError::Unsupported(name) => write!(f, "unsupported signal: {}", name),
            SignalError::Registration(sig, e) => {
                write!(f, "failed to register signal {}: {}", sig, e)
            }
        }
    }
}

impl std::error::Error for SignalError {}
