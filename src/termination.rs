//! Cancellation sources polled at the top of every loop iteration

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::{SIGINT, SIGTERM};
use tracing::debug;

use crate::error::Result;

/// Non-blocking "has someone asked us to stop" query.
///
/// Polling must not change any state: asking twice without an interrupt in
/// between gives the same answer.
pub trait TerminationSource {
    fn has_fired(&self) -> bool;
}

impl<T: TerminationSource + ?Sized> TerminationSource for &T {
    fn has_fired(&self) -> bool {
        (**self).has_fired()
    }
}

/// Flag set by SIGINT / SIGTERM (Ctrl+C on Windows) or by [`SignalFlag::trigger`]
#[derive(Debug, Clone, Default)]
pub struct SignalFlag {
    fired: Arc<AtomicBool>,
}

impl SignalFlag {
    /// A flag with no signal handlers attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flag and hook it up to the process interrupt signals
    pub fn register() -> Result<Self> {
        let flag = Self::new();
        for signal in [SIGINT, SIGTERM] {
            signal_hook::flag::register(signal, Arc::clone(&flag.fired))?;
        }
        debug!("Interrupt handlers installed");
        Ok(flag)
    }

    /// Request termination from code
    pub fn trigger(&self) {
        self.fired.store(true, Ordering::SeqCst);
    }
}

impl TerminationSource for SignalFlag {
    fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

/// A source that never fires
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl TerminationSource for Never {
    fn has_fired(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polling_does_not_fire() {
        let flag = SignalFlag::new();
        for _ in 0..100 {
            assert!(!flag.has_fired());
        }
    }

    #[test]
    fn trigger_is_shared_between_clones() {
        let flag = SignalFlag::new();
        let handle = flag.clone();

        handle.trigger();

        assert!(flag.has_fired());
        assert!(flag.has_fired());
    }

    #[test]
    fn never_never_fires() {
        assert!(!Never.has_fired());
        assert!(!(&Never).has_fired());
    }
}
