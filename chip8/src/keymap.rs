use sdl2::keyboard::Scancode;

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// The hex layout is mapped to the left 4 alphanumeric columns.
/// Scancodes are used so the block stays put on non-QWERTY layouts.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
const KEYMAP: [Scancode; 16] = [
    Scancode::X,    // 0
    Scancode::Num1, // 1
    Scancode::Num2, // 2
    Scancode::Num3, // 3
    Scancode::Q,    // 4
    Scancode::W,    // 5
    Scancode::E,    // 6
    Scancode::A,    // 7
    Scancode::S,    // 8
    Scancode::D,    // 9
    Scancode::Z,    // A
    Scancode::C,    // B
    Scancode::Num4, // C
    Scancode::R,    // D
    Scancode::F,    // E
    Scancode::V,    // F
];

/// The keypad index a host key stands for, if any
pub fn keymap(scancode: Scancode) -> Option<u8> {
    KEYMAP
        .iter()
        .position(|&key| key == scancode)
        .map(|key| key as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_corners() {
        assert_eq!(keymap(Scancode::Num1), Some(0x1));
        assert_eq!(keymap(Scancode::Num4), Some(0xC));
        assert_eq!(keymap(Scancode::Z), Some(0xA));
        assert_eq!(keymap(Scancode::V), Some(0xF));
    }

    #[test]
    fn test_keymap_unmapped() {
        assert_eq!(keymap(Scancode::Space), None);
    }
}
