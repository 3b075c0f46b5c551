use crate::constants::{MEMORY_SIZE, SCHIP_SPRITE_SHEET_ADDR, SPRITE_SHEET_ADDR, STACK_DEPTH};
use crate::error::Chip8Error;
use crate::sprites::{SCHIP_SPRITE_SHEET, SPRITE_SHEET};

/// # Memory
/// - 4096 bytes of addressable memory
/// - a 16 entry call stack of return addresses
///
/// Reads always come back as a two byte window (see `fetch`), whether the
/// caller wants an instruction or a single byte.
#[derive(Clone)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
    pub stack: Stack,
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            cells: [0; MEMORY_SIZE],
            stack: Stack::new(),
        }
    }

    /// Zeroed memory with both sprite sheets in the reserved area:
    /// - 0x050..0x0A0 standard glyphs
    /// - 0x0A0..0x140 Super-Chip glyphs
    pub fn with_sprite_sheets() -> Self {
        let mut memory = Memory::new();
        let standard = SPRITE_SHEET_ADDR as usize;
        let schip = SCHIP_SPRITE_SHEET_ADDR as usize;
        memory.cells[standard..standard + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        memory.cells[schip..schip + SCHIP_SPRITE_SHEET.len()].copy_from_slice(&SCHIP_SPRITE_SHEET);
        memory
    }

    /// Store a single byte
    ///
    /// # Arguments
    /// * `address` where to write; must be below 0x1000
    /// * `byte` the value to store
    pub fn write(&mut self, address: u16, byte: u8) -> Result<(), Chip8Error> {
        let cell = self
            .cells
            .get_mut(address as usize)
            .ok_or(Chip8Error::AddressOutOfRange {
                address: address as usize,
            })?;
        *cell = byte;
        Ok(())
    }

    /// Read the byte at `address` into the high 8 bits and the byte at
    /// `address + 1` into the low 8 bits.
    ///
    /// Callers after a single byte shift the result right by 8.
    /// A window starting on the last cell reads 0 for its low half.
    pub fn fetch(&self, address: u16) -> Result<u16, Chip8Error> {
        let high = *self
            .cells
            .get(address as usize)
            .ok_or(Chip8Error::AddressOutOfRange {
                address: address as usize,
            })?;
        let low = self.cells.get(address as usize + 1).copied().unwrap_or(0);
        Ok(u16::from(high) << 8 | u16::from(low))
    }

    /// Copy `bytes` into memory starting at `address`.
    /// Nothing is written if they don't all fit.
    pub fn load(&mut self, address: u16, bytes: &[u8]) -> Result<(), Chip8Error> {
        let start = address as usize;
        let end = start + bytes.len();
        if end > MEMORY_SIZE {
            return Err(Chip8Error::AddressOutOfRange { address: end - 1 });
        }
        self.cells[start..end].copy_from_slice(bytes);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// # Stack
/// Return addresses pushed by `2NNN` and popped by `00EE`.
#[derive(Clone)]
pub struct Stack {
    addresses: [u16; STACK_DEPTH],
    sp: usize,
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            addresses: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    pub fn push(&mut self, address: u16) -> Result<(), Chip8Error> {
        if self.sp == STACK_DEPTH {
            return Err(Chip8Error::StackOverflow { depth: self.sp });
        }
        self.addresses[self.sp] = address;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.addresses[self.sp])
    }

    pub fn len(&self) -> usize {
        self.sp
    }

    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_zeroed() {
        let memory = Memory::new();
        assert!(memory.cells.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_sprite_sheets_loaded() {
        let memory = Memory::with_sprite_sheets();
        for address in 0x050..0x0A0 {
            let byte = (memory.fetch(address).unwrap() >> 8) as u8;
            assert_eq!(byte, SPRITE_SHEET[address as usize - 0x050]);
        }
        for address in 0x0A0..0x140 {
            let byte = (memory.fetch(address).unwrap() >> 8) as u8;
            assert_eq!(byte, SCHIP_SPRITE_SHEET[address as usize - 0x0A0]);
        }
        assert!(memory.cells[0x140..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fetch_combines_bytes() {
        let mut memory = Memory::new();
        memory.write(0x200, 0xAA).unwrap();
        memory.write(0x201, 0xBB).unwrap();
        assert_eq!(memory.fetch(0x200).unwrap(), 0xAABB);
        assert_eq!(memory.fetch(0x200).unwrap() >> 8, 0xAA);
        assert_eq!(memory.fetch(0x201).unwrap() >> 8, 0xBB);
    }

    #[test]
    fn test_fetch_last_cell() {
        let mut memory = Memory::new();
        memory.write(0xFFF, 0x12).unwrap();
        assert_eq!(memory.fetch(0xFFF).unwrap(), 0x1200);
    }

    #[test]
    fn test_out_of_range() {
        let mut memory = Memory::new();
        assert!(matches!(
            memory.write(0x1000, 0x1),
            Err(Chip8Error::AddressOutOfRange { address: 0x1000 })
        ));
        assert!(matches!(
            memory.fetch(0x1000),
            Err(Chip8Error::AddressOutOfRange { address: 0x1000 })
        ));
    }

    #[test]
    fn test_load_writes_slice() {
        let mut memory = Memory::new();
        memory.load(0x8, &[0, 1, 2, 3, 4, 5, 6, 7]).unwrap();
        assert_eq!(
            memory.cells[..16],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7]
        );
    }

    #[test]
    fn test_load_rejects_overrun() {
        let mut memory = Memory::new();
        assert!(memory.load(0xFF9, &[0xFF; 8]).is_err());
        assert!(memory.cells.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_stack_is_lifo() {
        let mut stack = Stack::new();
        stack.push(0x202).unwrap();
        stack.push(0x404).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop().unwrap(), 0x404);
        assert_eq!(stack.pop().unwrap(), 0x202);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_stack_overflow() {
        let mut stack = Stack::new();
        for address in 0..STACK_DEPTH as u16 {
            stack.push(address).unwrap();
        }
        assert!(matches!(
            stack.push(0x200),
            Err(Chip8Error::StackOverflow { depth: STACK_DEPTH })
        ));
    }

    #[test]
    fn test_stack_underflow() {
        let mut stack = Stack::new();
        assert!(matches!(stack.pop(), Err(Chip8Error::StackUnderflow)));
    }
}
