//! Core type definitions for the sub-app scheduler

/// Tick counter type
pub type OsTick = u32;

/// Delay in whole milliseconds
pub type Millis = u32;

/// Lifecycle state of a sub-app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SappState {
    /// Freshly allocated, entered once per slot
    Startup = 0,
    /// Idle, waiting to be (re)started
    Disabled = 1,
    /// Running the `setup` callback
    Setup = 2,
    /// Polling the loop callback until it stops
    Loop = 3,
    /// Tearing down, always moves on to `Disabled`
    Fini = 4,
}

impl SappState {
    /// Decode a raw state value, `None` if it is not a known state
    #[inline]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(SappState::Startup),
            1 => Some(SappState::Disabled),
            2 => Some(SappState::Setup),
            3 => Some(SappState::Loop),
            4 => Some(SappState::Fini),
            _ => None,
        }
    }

    /// Raw value stored in the task record
    #[inline]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Whether `start` may (re)initialize a sub-app in this state
    #[inline]
    pub const fn is_restartable(self) -> bool {
        matches!(self, SappState::Startup | SappState::Disabled)
    }

    /// Whether the sub-app's timer must be stopped in this state
    #[inline]
    pub const fn is_idle(self) -> bool {
        matches!(self, SappState::Disabled | SappState::Fini)
    }

    /// Name shown by the status report
    pub const fn as_str(self) -> &'static str {
        match self {
            SappState::Startup => "STATE_STARTUP",
            SappState::Disabled => "STATE_DISABLED",
            SappState::Setup => "STATE_SETUP",
            SappState::Loop => "STATE_LOOP",
            SappState::Fini => "STATE_FINI",
        }
    }
}

/// Policy used to decide whether two names denote the same sub-app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    /// Equal contents
    Content,
    /// Same string instance (address and length)
    Identity,
}

impl NameMatch {
    /// Compare two names under this policy
    #[inline]
    pub fn matches(self, a: &str, b: &str) -> bool {
        match self {
            NameMatch::Content => a == b,
            NameMatch::Identity => core::ptr::eq(a.as_ptr(), b.as_ptr()) && a.len() == b.len(),
        }
    }
}
