//! Time source capability

/// Milliseconds since an arbitrary epoch
///
/// Wraps to zero after `u32::MAX` (about 49.7 days).
pub type Ticks = u32;

/// Monotonic tick source
///
/// Must never go backwards between wraps.
pub trait Clock {
    /// Current tick count
    fn now(&self) -> Ticks;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Ticks {
        (**self).now()
    }
}
