use crate::config::{CMD_TOGGLE_HOLD, CMD_TOGGLE_MEASUREMENT, SWITCH_HOLD, SWITCH_MEASUREMENT};
use crate::state::SharedState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Switch {
    One,
    Two,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    ToggleMeasurement,
    ToggleHold,
}

impl Command {
    /// Serial command byte. Anything else is not a command.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_TOGGLE_MEASUREMENT => Some(Command::ToggleMeasurement),
            CMD_TOGGLE_HOLD => Some(Command::ToggleHold),
            _ => None,
        }
    }

    pub fn from_switch(switch: Switch) -> Option<Self> {
        if switch == SWITCH_MEASUREMENT {
            Some(Command::ToggleMeasurement)
        } else if switch == SWITCH_HOLD {
            Some(Command::ToggleHold)
        } else {
            None
        }
    }
}

/// The only writer of the mode flags. Cheap to copy into every switch and
/// serial handler; calls may race each other and the periodic tasks.
#[derive(Clone, Copy)]
pub struct InputController<'a> {
    state: &'a SharedState,
}

impl<'a> InputController<'a> {
    pub fn new(state: &'a SharedState) -> Self {
        Self { state }
    }

    /// Applies `command` and returns the flag's new value.
    pub fn apply(&self, command: Command) -> bool {
        match command {
            Command::ToggleMeasurement => self.state.toggle_measurement(),
            Command::ToggleHold => self.state.toggle_hold(),
        }
    }

    /// Switch edge callback.
    pub fn on_switch(&self, switch: Switch) -> Option<Command> {
        let command = Command::from_switch(switch)?;
        let now = self.apply(command);
        info!("switch {:?}: {:?} -> {}", switch, command, now);
        Some(command)
    }

    /// Serial receive callback, one byte per call. Unknown bytes are dropped.
    pub fn on_serial_byte(&self, byte: u8) -> Option<Command> {
        let Some(command) = Command::from_byte(byte) else {
            debug!("ignoring serial byte {=u8:#x}", byte);
            return None;
        };
        let now = self.apply(command);
        info!("serial {:?} -> {}", command, now);
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::OperatingFlags;

    #[test]
    fn switch_one_toggles_measurement() {
        let state = SharedState::new();
        let input = InputController::new(&state);

        assert_eq!(input.on_switch(Switch::One), Some(Command::ToggleMeasurement));
        assert!(!state.measurement_enabled());
        input.on_switch(Switch::One);
        assert!(state.measurement_enabled());
        assert!(!state.hold_display());
    }

    #[test]
    fn switch_two_toggles_hold() {
        let state = SharedState::new();
        let input = InputController::new(&state);

        assert_eq!(input.on_switch(Switch::Two), Some(Command::ToggleHold));
        assert!(state.hold_display());
        assert!(state.measurement_enabled());
    }

    #[test]
    fn serial_commands() {
        let state = SharedState::new();
        let input = InputController::new(&state);

        assert_eq!(input.on_serial_byte(b'o'), Some(Command::ToggleMeasurement));
        assert_eq!(input.on_serial_byte(b'h'), Some(Command::ToggleHold));
        assert_eq!(
            state.flags(),
            OperatingFlags {
                measurement_enabled: false,
                hold_display: true,
            }
        );
    }

    #[test]
    fn unknown_serial_bytes_change_nothing() {
        let state = SharedState::new();
        let input = InputController::new(&state);

        for byte in [b'O', b'H', b'x', b'\r', b'\n', 0x00, 0xff] {
            assert_eq!(input.on_serial_byte(byte), None);
        }
        assert_eq!(state.flags(), OperatingFlags::default());
    }

    #[test]
    fn switch_and_serial_share_flags() {
        let state = SharedState::new();
        let input = InputController::new(&state);

        input.on_switch(Switch::Two);
        input.on_serial_byte(b'h');
        assert!(!state.hold_display());

        input.on_serial_byte(b'o');
        input.on_switch(Switch::One);
        assert!(state.measurement_enabled());
    }
}
