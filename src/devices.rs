use crate::definitions::{display, keyboard};

/// A full snapshot of the display, indexed by `[row][column]`.
pub type Pixels = [[bool; display::WIDTH]; display::HEIGHT];

/// The state of all the keys, indexed by the key value `0x0-0xF`.
pub type Keys = [bool; keyboard::SIZE];

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will display all from the pixels
    fn display(&mut self, pixels: &Pixels);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for reading the keyboard state from the host
pub trait KeyboardCommands {
    /// Will return the current state of every key.
    fn get_keyboard(&mut self) -> Keys;
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for the tone, it is on as long as the sound timer runs.
pub trait SoundCommands {
    /// The sound timer started counting.
    fn start(&mut self);
    /// The sound timer reached zero.
    fn stop(&mut self);
}

/// Will store the current keyboard state and the last key that
/// went down.
///
/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
#[derive(Default, Debug, Clone)]
pub struct Keyboard {
    keys: Keys,
    /// The last key that changed from released to pressed and was not
    /// yet taken by a waiting instruction.
    pressed: Option<usize>,
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    /// Sets a single key, a key out of range is ignored.
    pub fn set_key(&mut self, key: usize, to: bool) {
        if key >= keyboard::SIZE {
            log::warn!("Key {:#X} does not exist on the keyboard.", key);
            return;
        }
        if to && !self.keys[key] {
            self.pressed = Some(key);
        }
        self.keys[key] = to;
    }

    /// Flips a single key, a key out of range is ignored.
    pub fn toggle_key(&mut self, key: usize) {
        let current = self.keys.get(key).copied().unwrap_or(false);
        self.set_key(key, !current)
    }

    /// Replaces the whole keyboard state, if multiple keys went down at
    /// once the lowest one counts as the press.
    pub fn set_keys(&mut self, keys: &Keys) {
        let pressed = self
            .keys
            .iter()
            .zip(keys.iter())
            .position(|(last, current)| !*last && *current);
        if pressed.is_some() {
            self.pressed = pressed;
        }
        self.keys = *keys;
    }

    pub fn get_keys(&self) -> &Keys {
        &self.keys
    }

    /// Checks the key given by the low nibble of `key`.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }

    /// Takes the last key press, if there was one.
    pub fn take_pressed(&mut self) -> Option<usize> {
        self.pressed.take()
    }

    /// Forgets any key press that happened up to now.
    pub fn clear_pressed(&mut self) {
        self.pressed = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_transition() {
        let mut keyboard = Keyboard::new();
        assert_eq!(keyboard.take_pressed(), None);

        keyboard.set_key(0x4, true);
        assert!(keyboard.is_pressed(0x4));
        assert_eq!(keyboard.take_pressed(), Some(0x4));
        assert_eq!(keyboard.take_pressed(), None);

        // holding the key down is not a new press
        keyboard.set_key(0x4, true);
        assert_eq!(keyboard.take_pressed(), None);

        keyboard.set_key(0x4, false);
        assert_eq!(keyboard.take_pressed(), None);
        assert!(!keyboard.is_pressed(0x4));
    }

    #[test]
    fn test_set_keys() {
        let mut keyboard = Keyboard::new();
        let mut keys = [false; keyboard::SIZE];
        keys[0x3] = true;
        keys[0xA] = true;

        keyboard.set_keys(&keys);
        assert_eq!(keyboard.get_keys(), &keys);
        assert_eq!(keyboard.take_pressed(), Some(0x3));

        // the same state again has no new press
        keyboard.set_keys(&keys);
        assert_eq!(keyboard.take_pressed(), None);

        keys[0x3] = false;
        keys[0xF] = true;
        keyboard.set_keys(&keys);
        assert_eq!(keyboard.take_pressed(), Some(0xF));
    }

    #[test]
    fn test_toggle_and_out_of_range() {
        let mut keyboard = Keyboard::new();
        keyboard.toggle_key(0x1);
        assert!(keyboard.is_pressed(0x1));
        keyboard.toggle_key(0x1);
        assert!(!keyboard.is_pressed(0x1));

        assert_eq!(keyboard.take_pressed(), Some(0x1));

        keyboard.set_key(keyboard::SIZE, true);
        keyboard.toggle_key(keyboard::SIZE);
        assert!(keyboard.get_keys().iter().all(|key| !key));
        assert_eq!(keyboard.take_pressed(), None);

        // only the low nibble selects the key
        keyboard.set_key(0x2, true);
        assert!(keyboard.is_pressed(0x12));
    }
}
