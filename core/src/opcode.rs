/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each. Their behavior is cased on some combination of:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
/// - `(_, n, n, n)` some fixed function that doesn't require variables (e.g. CLS; clear screen)
///
/// Nibbles not used to determine the operation often (but not always) carry important data.
/// - `(_, n, n, n)` represent a 12-bit address
/// - `(_, _, n, n)` encodes some data that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` refers either to the register Vx or a range of registers V0..Vx
/// - `(_, _, n, _)` refers to the the register Vy
///
/// An `Opcode` is decoded once per fetch and dropped after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    /// The instruction class, left in place.
    /// `[i___]`
    pub instruction: u16,

    /// The Opcode's second nibble.
    /// `[_x__]`
    pub x: u8,

    /// The Opcode's third nibble.
    /// `[__y_]`
    pub y: u8,

    /// The Opcode's fourth nibble.
    /// `[___n]`
    pub n: u8,

    /// The Opcode's least significant byte.
    /// `[__nn]`
    pub nn: u8,

    /// The Opcode without its most significant nibble.
    /// `[_nnn]`
    pub nnn: u16,
}

impl Opcode {
    /// Returns the Opcode's component nibbles.
    pub fn nibbles(&self) -> (u8, u8, u8, u8) {
        ((self.instruction >> 12) as u8, self.x, self.y, self.n)
    }
}

impl From<u16> for Opcode {
    fn from(word: u16) -> Self {
        Opcode {
            instruction: word & 0xF000,
            x: ((word & 0x0F00) >> 8) as u8,
            y: ((word & 0x00F0) >> 4) as u8,
            n: (word & 0x000F) as u8,
            nn: (word & 0x00FF) as u8,
            nnn: word & 0x0FFF,
        }
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_decode() {
        let op = Opcode::from(0xABCD);
        assert_eq!(op.instruction, 0xA000);
        assert_eq!(op.x, 0xB);
        assert_eq!(op.y, 0xC);
        assert_eq!(op.n, 0xD);
        assert_eq!(op.nn, 0xCD);
        assert_eq!(op.nnn, 0x0BCD);
    }

    #[test]
    fn test_nibbles() {
        let op = Opcode::from(0xABCD);
        assert_eq!(op.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_decode_low_class() {
        let op = Opcode::from(0x00EE);
        assert_eq!(op.instruction, 0x0000);
        assert_eq!(op.nibbles(), (0x0, 0x0, 0xE, 0xE));
        assert_eq!(op.nnn, 0x0EE);
    }
}
