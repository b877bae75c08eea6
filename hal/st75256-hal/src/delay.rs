//! Blocking delays
//!
//! Only used for the reset pulse, which must be held for a minimum time
//! before the controller accepts commands.

/// Blocking millisecond delay provider
pub trait DelayMs {
    /// Block the calling thread for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

impl<D: DelayMs + ?Sized> DelayMs for &mut D {
    fn delay_ms(&mut self, ms: u32) {
        D::delay_ms(self, ms)
    }
}
