/// # Keypad
/// Chip-8 input is generated with a 16 key hexadecimal keypad.
/// The host writes it between cycles; instructions only read it.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; 16],
}

impl Keypad {
    pub fn new() -> Self {
        Keypad { keys: [false; 16] }
    }

    pub fn press(&mut self, key: u8) {
        self.keys[(key & 0xF) as usize] = true;
    }

    pub fn release(&mut self, key: u8) {
        self.keys[(key & 0xF) as usize] = false;
    }

    /// Replace the whole table, e.g. with a fresh sample of the host keyboard
    pub fn set_all(&mut self, keys: [bool; 16]) {
        self.keys = keys;
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }

    /// The lowest numbered key currently held, if any
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&k| k).map(|k| k as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keypad = Keypad::new();
        keypad.press(0xE);
        assert!(keypad.is_pressed(0xE));
        keypad.release(0xE);
        assert!(!keypad.is_pressed(0xE));
    }

    #[test]
    fn test_first_pressed() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.first_pressed(), None);
        keypad.press(0xB);
        keypad.press(0x3);
        assert_eq!(keypad.first_pressed(), Some(0x3));
    }

    #[test]
    fn test_set_all() {
        let mut keypad = Keypad::new();
        let mut keys = [false; 16];
        keys[0x7] = true;
        keypad.set_all(keys);
        assert_eq!(keypad.first_pressed(), Some(0x7));
    }
}
