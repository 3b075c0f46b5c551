use rand::rngs::StdRng;
use rand::Rng;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, PROGRAM_START};
use crate::error::Chip8Error;
use crate::frame_buffer::FrameBuffer;
use crate::keypad::Keypad;
use crate::memory::Memory;

/// The Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the flag register; every operation that defines a
///       flag overwrites it
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Timers
/// - 2 8-bit timers (delay & sound)
/// - a tone plays while the sound timer is above 0
///
/// ## Memory
/// - 4096 bytes of addressable memory and a 16 entry call stack
/// - 64x32 frame buffer
///
/// The methods here are the building blocks of the instruction set; each
/// opcode handler decodes its operands and calls one of them.
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    rng: StdRng,
}

impl State {
    pub fn new(rng: StdRng) -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            delay_timer: 0,
            sound_timer: 0,
            memory: Memory::with_sprite_sheets(),
            frame_buffer: FrameBuffer::new(),
            draw_flag: false,
            rng,
        }
    }

    /// The address `offset` bytes past I
    fn indexed(&self, offset: u16) -> Result<u16, Chip8Error> {
        self.i
            .checked_add(offset)
            .ok_or(Chip8Error::AddressOutOfRange {
                address: self.i as usize + offset as usize,
            })
    }

    /// A single byte; the high half of a two byte window
    pub fn read_byte(&self, address: u16) -> Result<u8, Chip8Error> {
        Ok((self.memory.fetch(address)? >> 8) as u8)
    }

    pub fn clear_screen(&mut self) {
        self.frame_buffer.clear();
        self.draw_flag = true;
    }

    /// PC = STACK.pop()
    pub fn ret(&mut self) -> Result<(), Chip8Error> {
        self.pc = self.memory.stack.pop()?;
        Ok(())
    }

    /// PC = addr + offset
    pub fn jump(&mut self, addr: u16, offset: u8) {
        self.pc = addr + u16::from(offset);
    }

    /// STACK.push(PC); PC = addr
    pub fn call(&mut self, addr: u16) -> Result<(), Chip8Error> {
        self.memory.stack.push(self.pc)?;
        self.pc = addr;
        Ok(())
    }

    /// Step over the next instruction
    pub fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc += 0x2;
        }
    }

    pub fn load(&mut self, reg: u8, value: u8) {
        self.v[reg as usize] = value;
    }

    /// Vreg += value, wrapping.
    /// VF is only touched when `with_flag` is set, and then holds the carry.
    pub fn add(&mut self, reg: u8, value: u8, with_flag: bool) {
        let (res, carry) = self.v[reg as usize].overflowing_add(value);
        self.v[reg as usize] = res;
        if with_flag {
            self.v[0xF] = carry as u8;
        }
    }

    pub fn or(&mut self, reg: u8, value: u8) {
        self.v[reg as usize] |= value;
    }

    pub fn and(&mut self, reg: u8, value: u8) {
        self.v[reg as usize] &= value;
    }

    pub fn xor(&mut self, reg: u8, value: u8) {
        self.v[reg as usize] ^= value;
    }

    /// VF = minuend > subtrahend; Vreg = minuend - subtrahend, wrapping
    ///
    /// The flag is written first, so with reg = F the difference is kept.
    pub fn subtract(&mut self, reg: u8, minuend: u8, subtrahend: u8) {
        self.v[0xF] = (minuend > subtrahend) as u8;
        self.v[reg as usize] = minuend.wrapping_sub(subtrahend);
    }

    /// VF = the bit about to be shifted out; then Vreg >>= 1.
    /// With reg = F the shift acts on the flag just written.
    pub fn shift_right(&mut self, reg: u8) {
        self.v[0xF] = self.v[reg as usize] & 0x1;
        self.v[reg as usize] >>= 1;
    }

    /// VF = the bit about to be shifted out; then Vreg <<= 1
    pub fn shift_left(&mut self, reg: u8) {
        self.v[0xF] = self.v[reg as usize] >> 7;
        self.v[reg as usize] <<= 1;
    }

    pub fn load_index(&mut self, value: u16) {
        self.i = value;
    }

    /// I += value; VF is set when I leaves the 12-bit address space.
    /// I never wraps past 0xFFFF.
    pub fn add_to_index(&mut self, value: u16) -> Result<(), Chip8Error> {
        self.i = self
            .i
            .checked_add(value)
            .ok_or(Chip8Error::AddressOutOfRange {
                address: self.i as usize + value as usize,
            })?;
        self.v[0xF] = (self.i > 0x0FFF) as u8;
        Ok(())
    }

    /// Vreg = random byte & mask
    pub fn random(&mut self, reg: u8, mask: u8) {
        let rand_byte: u8 = self.rng.gen();
        self.v[reg as usize] = rand_byte & mask;
    }

    /// XORs a sprite of `height` rows from memory at I onto the FrameBuffer.
    ///
    /// The origin wraps onto the display but the sprite itself is clipped at
    /// the right and bottom edges. VF is set if any lit pixel was erased.
    pub fn draw(&mut self, x: u8, y: u8, height: u8) -> Result<(), Chip8Error> {
        let x = x as usize % DISPLAY_WIDTH;
        let y = y as usize % DISPLAY_HEIGHT;
        self.v[0xF] = 0x0;

        for row in 0..height as usize {
            if y + row >= DISPLAY_HEIGHT {
                break;
            }
            let sprite = self.read_byte(self.indexed(row as u16)?)?;
            for bit in 0..8 {
                if x + bit >= DISPLAY_WIDTH {
                    break;
                }
                if (sprite >> (7 - bit)) & 1 == 1 && self.frame_buffer.toggle(y + row, x + bit) {
                    self.v[0xF] = 0x1;
                }
            }
        }

        self.draw_flag = true;
        Ok(())
    }

    pub fn set_delay_timer(&mut self, value: u8) {
        self.delay_timer = value;
    }

    pub fn set_sound_timer(&mut self, value: u8) {
        self.sound_timer = value;
    }

    /// Vreg = the first held key.
    /// With nothing held, rewind the pc so this instruction runs again next cycle.
    pub fn wait_for_key(&mut self, reg: u8, keypad: &Keypad) {
        match keypad.first_pressed() {
            Some(key) => self.v[reg as usize] = key,
            None => self.pc -= 0x2,
        }
    }

    /// mem[I..I+3] = hundreds, tens and units of value
    pub fn store_bcd(&mut self, value: u8) -> Result<(), Chip8Error> {
        let digits = [value / 100, value / 10 % 10, value % 10];
        for (offset, digit) in digits.iter().enumerate() {
            let address = self.indexed(offset as u16)?;
            self.memory.write(address, *digit)?;
        }
        Ok(())
    }

    /// mem[I..=I+x] = V0..=Vx; I is left alone
    pub fn store_registers(&mut self, x: u8) -> Result<(), Chip8Error> {
        for reg in 0..=x {
            let address = self.indexed(u16::from(reg))?;
            self.memory.write(address, self.v[reg as usize])?;
        }
        Ok(())
    }

    /// V0..=Vx = mem[I..=I+x]; I is left alone
    pub fn read_registers(&mut self, x: u8) -> Result<(), Chip8Error> {
        for reg in 0..=x {
            self.v[reg as usize] = self.read_byte(self.indexed(u16::from(reg))?)?;
        }
        Ok(())
    }

    /// One 60Hz timer tick
    pub fn decrement_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}
