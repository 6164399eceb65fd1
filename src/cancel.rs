//! Operator cancellation
//!
//! A running test is stopped only by the operator pressing CTRL+C on the
//! console. The serial receive path raises a [`CancelFlag`]; the poll loop
//! observes it once per iteration through [`Interrupt`].

use core::sync::atomic::{AtomicBool, Ordering};

use crate::config::INTERRUPT_CHAR;

/// Source of the operator's cancellation request
pub trait Interrupt {
    /// Check for, and consume, a pending cancellation request
    fn interrupt_received(&mut self) -> bool;

    /// Forget a request raised before the current test started
    fn discard_pending(&mut self) {}
}

/// Cancellation token shared between the receive path and the poll loop
#[derive(Debug, Default)]
pub struct CancelFlag {
    raised: AtomicBool,
}

impl CancelFlag {
    /// Create a lowered flag
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Request cancellation
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Inspect a byte from the console receive path
    ///
    /// Returns `true` if the byte was the interrupt character, which raises
    /// the flag.
    pub fn feed(&self, byte: u8) -> bool {
        if byte == INTERRUPT_CHAR {
            self.raise();
            true
        } else {
            false
        }
    }

    /// Peek without consuming
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// Consume a pending request
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }

    /// Drop a pending request
    ///
    /// A test session does this before it starts so that a CTRL+C typed
    /// at the prompt does not end the next test.
    pub fn clear(&self) {
        self.raised.store(false, Ordering::Release);
    }
}

impl Interrupt for CancelFlag {
    fn interrupt_received(&mut self) -> bool {
        self.take()
    }

    fn discard_pending(&mut self) {
        self.clear();
    }
}

impl Interrupt for &CancelFlag {
    fn interrupt_received(&mut self) -> bool {
        self.take()
    }

    fn discard_pending(&mut self) {
        self.clear();
    }
}
