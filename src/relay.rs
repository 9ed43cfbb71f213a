//! Host event loop built on [`HostState`].
//!
//! The loop is the "normal context" half of the relay: it polls the
//! interrupt flag at each check point and drains the signals the handler
//! recorded.

use std::thread;

use crate::core::config::Config;
use crate::core::host::HostState;
use crate::error::RelayError;
use crate::flags::Flags;
use crate::highlight::Highlighter;
use crate::signal::{self, Registrar, Signal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Stop,
}

pub struct Relay {
    config: Config,
    flags: Flags,
    host: &'static HostState,
    highlighter: Highlighter,
}

impl Relay {
    pub fn new(config: Config, flags: Flags, host: &'static HostState) -> Self {
        Relay {
            config,
            flags,
            host,
            highlighter: Highlighter::new(),
        }
    }

    pub fn with_highlighter(mut self, highlighter: Highlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Binds the host and registers the configured signals.
    pub fn arm(&self) -> Result<(), RelayError> {
        signal::bind(self.host)?;
        let registration = Registrar::for_set(&self.config.signals)
            .quiet(self.config.quiet)
            .install();

        tracing::info!(
            installed = registration.installed().len(),
            failed = registration.failed().len(),
            "relay armed"
        );
        if !self.config.quiet {
            println!(
                "{} {} (pid {})",
                self.highlighter.success("relaying"),
                self.config.signals,
                std::process::id()
            );
            if self.config.signals.contains(Signal::Interrupt) {
                println!("{}", self.highlighter.hint("send SIGINT (Ctrl-C) to stop"));
            }
        }
        self.schedule_alarm();
        Ok(())
    }

    pub fn run(&mut self) -> Result<(), RelayError> {
        self.arm()?;
        loop {
            thread::sleep(self.config.poll_interval);
            if self.step()? == Step::Stop {
                break;
            }
        }
        tracing::info!("relay stopped");
        Ok(())
    }

    /// One check point: clears the interrupt flag and handles whatever
    /// the handler recorded since the last one.
    ///
    /// Counters are drained on every call. The flag is raised before the
    /// counter is bumped, so a poll landing between the two clears the flag
    /// while the signal is still on its way into the counter.
    pub fn step(&mut self) -> Result<Step, RelayError> {
        let flagged = self.host.interrupt().take();
        let pending = self.host.take_pending();
        if pending.is_empty() {
            if flagged {
                tracing::debug!("interrupt flag set with no pending signal");
            }
            return Ok(Step::Continue);
        }

        let mut step = Step::Continue;
        for (sig, count) in pending {
            let Some(signal) = Signal::from_raw(sig) else {
                tracing::warn!(signal = sig, count, "unexpected signal");
                continue;
            };
            self.report(signal, count);

            match signal {
                Signal::Alarm => self.schedule_alarm(),
                Signal::Hangup => self.reload(),
                Signal::Interrupt => step = Step::Stop,
            }
        }
        Ok(step)
    }

    fn report(&self, signal: Signal, count: u32) {
        tracing::debug!(signal = %signal, count, "signal received");
        if !self.config.quiet {
            println!("{}", self.highlighter.signal(&signal.to_string(), count));
        }
    }

    fn reload(&mut self) {
        match self.config.reload(&self.flags) {
            Ok(mut config) => {
                // Registration is not redone; only loop settings change.
                config.signals = self.config.signals.clone();
                self.config = config;
                tracing::info!("config reloaded");
                self.schedule_alarm();
            }
            Err(e) => {
                if !self.config.quiet {
                    eprintln!("{}", self.highlighter.error(&format!("reload failed: {}", e)));
                }
                tracing::warn!(error = %e, "config reload failed");
            }
        }
    }

    fn schedule_alarm(&self) {
        if self.config.alarm > 0 && self.config.signals.contains(Signal::Alarm) {
            unsafe {
                libc::alarm(self.config.alarm);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ConfigPaths;
    use crate::core::host::SignalHost;

    fn relay() -> Relay {
        let host: &'static HostState = Box::leak(Box::new(HostState::new()));
        let config = Config::with_paths(ConfigPaths::in_dir("/nonexistent"));
        Relay::new(config, Flags::new(), host).with_highlighter(Highlighter::plain())
    }

    fn deliver(relay: &Relay, sig: libc::c_int) {
        relay.host.set_interrupt();
        relay.host.raise_signal(sig);
    }

    #[test]
    fn test_idle_step_continues() {
        let mut relay = relay();
        assert_eq!(relay.step().expect("step"), Step::Continue);
    }

    #[test]
    fn test_interrupt_stops_loop() {
        let mut relay = relay();
        relay.config.quiet = true;
        deliver(&relay, libc::SIGHUP);
        deliver(&relay, libc::SIGINT);

        assert_eq!(relay.step().expect("step"), Step::Stop);
        assert!(!relay.host.interrupt().is_set());
        assert!(relay.host.take_pending().is_empty());
    }

    #[test]
    fn test_flag_without_pending_signal() {
        let mut relay = relay();
        relay.host.set_interrupt();
        assert_eq!(relay.step().expect("step"), Step::Continue);
        assert!(!relay.host.interrupt().is_set());
    }

    #[test]
    fn test_signal_counted_after_flag_was_cleared() {
        let mut relay = relay();
        relay.config.quiet = true;

        // The loop polls between the handler's two steps.
        relay.host.set_interrupt();
        assert_eq!(relay.step().expect("first step"), Step::Continue);
        relay.host.raise_signal(libc::SIGINT);

        assert!(!relay.host.interrupt().is_set());
        assert_eq!(relay.step().expect("second step"), Step::Stop);
        assert_eq!(relay.host.pending(libc::SIGINT), 0);
    }

    #[test]
    fn test_hangup_reload_keeps_signal_set() {
        let mut relay = relay();
        relay.config.quiet = true;
        relay.config.signals = crate::signal::SignalSet::from_signals(&[Signal::Hangup]);
        deliver(&relay, libc::SIGHUP);

        assert_eq!(relay.step().expect("step"), Step::Continue);
        assert_eq!(relay.config().signals.len(), 1);
    }
}
