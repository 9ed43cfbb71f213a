use std::fmt;
use std::str::FromStr;

use libc::c_int;
use signal_hook::consts::{SIGALRM, SIGHUP, SIGINT};

use super::SignalError;

/// One of the signals the relay forwards to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Hangup,
    Interrupt,
    Alarm,
}

impl Signal {
    pub const fn as_raw(self) -> c_int {
        match self {
            Signal::Hangup => SIGHUP,
            Signal::Interrupt => SIGINT,
            Signal::Alarm => SIGALRM,
        }
    }

    pub fn from_raw(sig: c_int) -> Option<Self> {
        SignalSet::MONITORED
            .iter()
            .copied()
            .find(|signal| signal.as_raw() == sig)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Signal::Hangup => "HUP",
            Signal::Interrupt => "INT",
            Signal::Alarm => "ALRM",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIG{}", self.name())
    }
}

impl FromStr for Signal {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(raw) = trimmed.parse::<c_int>() {
            return Signal::from_raw(raw)
                .ok_or_else(|| SignalError::Unsupported(trimmed.to_string()));
        }

        let upper = trimmed.to_ascii_uppercase();
        let name = upper.strip_prefix("SIG").unwrap_or(&upper);
        SignalSet::MONITORED
            .iter()
            .copied()
            .find(|signal| signal.name() == name)
            .ok_or_else(|| SignalError::Unsupported(trimmed.to_string()))
    }
}

/// The signals a relay is registered for.
///
/// Always a subset of [`SignalSet::MONITORED`], kept in monitored order
/// without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalSet {
    signals: Vec<Signal>,
}

impl Default for SignalSet {
    fn default() -> Self {
        Self::monitored()
    }
}

impl SignalSet {
    pub const MONITORED: [Signal; 3] = [Signal::Hangup, Signal::Interrupt, Signal::Alarm];

    pub fn monitored() -> Self {
        Self {
            signals: Self::MONITORED.to_vec(),
        }
    }

    pub fn from_signals(signals: &[Signal]) -> Self {
        let signals = Self::MONITORED
            .iter()
            .copied()
            .filter(|signal| signals.contains(signal))
            .collect();
        Self { signals }
    }

    /// Parses a list such as `"HUP, INT"` or `"SIGALRM 1"`.
    pub fn parse(list: &str) -> Result<Self, SignalError> {
        let parsed = list
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(Signal::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        if parsed.is_empty() {
            return Err(SignalError::Unsupported(list.to_string()));
        }
        Ok(Self::from_signals(&parsed))
    }

    pub fn iter(&self) -> impl Iterator<Item = Signal> + '_ {
        self.signals.iter().copied()
    }

    pub fn raw(&self) -> Vec<c_int> {
        self.iter().map(Signal::as_raw).collect()
    }

    pub fn contains(&self, signal: Signal) -> bool {
        self.signals.contains(&signal)
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl fmt::Display for SignalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Signal::name).collect();
        write!(f, "{}", names.join(" "))
    }
}
