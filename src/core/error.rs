//! Error types for the sub-app scheduler
//!
//! Registration failures are returned synchronously; failures reported by
//! a sub-app's own callbacks never show up here, they are absorbed by the
//! state machine.

use core::fmt;

/// Registration error
///
/// The discriminant is the negative errno a C caller of the registration
/// entry point would have received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i32)]
pub enum SappError {
    /// The registry lock could not be taken within the bounded wait
    LockUnavailable = -13,
    /// Every registry slot is already allocated
    CapacityExceeded = -11,
    /// The sub-app is registered and not in a restartable state
    Busy = -16,
    /// The sub-app name is empty
    InvalidName = -22,
}

/// Result type alias for scheduler operations
pub type SappResult<T> = Result<T, SappError>;

impl SappError {
    /// Negative errno equivalent of this error
    #[inline]
    pub const fn errno(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for SappError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SappError::LockUnavailable => f.write_str("failed to take registry lock"),
            SappError::CapacityExceeded => f.write_str("too many sapps registered"),
            SappError::Busy => f.write_str("sapp is busy and cannot be restarted"),
            SappError::InvalidName => f.write_str("sapp name must not be empty"),
        }
    }
}
