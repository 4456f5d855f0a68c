//! Trigger state machine for the bulk sync and status-check buttons.
//!
//! A trigger is enabled only while `Idle`. Sync-all passes through
//! `CoolingDown` after its request settles; status checks go straight back
//! to `Idle`.

/// Lifecycle of a button that launches a network operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerState {
    #[default]
    Idle,
    InFlight,
    CoolingDown,
}

impl TriggerState {
    /// True if the operation can be started (the button is enabled).
    pub fn is_enabled(self) -> bool {
        matches!(self, TriggerState::Idle)
    }

    pub fn is_in_flight(self) -> bool {
        matches!(self, TriggerState::InFlight)
    }

    /// State after the user fires the trigger.
    pub fn on_start(self) -> Self {
        TriggerState::InFlight
    }

    /// State after the request settles, success or failure.
    ///
    /// With a cool-down the trigger stays disabled until `on_cooldown_elapsed`.
    pub fn on_settled(self, with_cooldown: bool) -> Self {
        if with_cooldown {
            TriggerState::CoolingDown
        } else {
            TriggerState::Idle
        }
    }

    /// State after the cool-down timer fires.
    pub fn on_cooldown_elapsed(self) -> Self {
        match self {
            TriggerState::CoolingDown => TriggerState::Idle,
            // A new run started meanwhile; its own settle handles re-enabling.
            other => other,
        }
    }
}
