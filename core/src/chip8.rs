use std::io::Read;
use std::time::Duration;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, TIMER_SPEED};
use crate::error::Chip8Error;
use crate::frame_buffer::FrameBuffer;
use crate::instruction::from_op;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::state::State;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `keypad` with public interfaces for manipulating it
///  - time owed to the 60Hz timers
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    keypad: Keypad,
    timer_debt: Duration,
}

impl Chip8 {
    /// A machine whose random numbers are seeded from the OS
    pub fn new() -> Self {
        Chip8::with_rng(StdRng::from_entropy())
    }

    /// A machine whose random number sequence is fixed by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Chip8::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Chip8 {
            state: State::new(rng),
            keypad: Keypad::new(),
            timer_debt: Duration::from_secs(0),
        }
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), Chip8Error> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.load_rom_bytes(&rom)
    }

    /// Copy a rom into program space, starting at 0x200
    pub fn load_rom_bytes(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        self.state.memory.load(PROGRAM_START, rom)?;
        debug!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    /// Returns the FrameBuffer if the display should be redrawn, and clears the draw flag
    pub fn get_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.keypad.release(key);
    }

    /// Overwrite the pressed status of every key at once
    pub fn set_keys(&mut self, keys: [bool; 16]) {
        self.keypad.set_all(keys);
    }

    /// Whether a tone should be playing
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Advances the CPU by a single cycle
    /// - gets the opcode at the pc and steps the pc past it
    /// - executes it; opcodes with no instruction do nothing
    pub fn cycle(&mut self) -> Result<(), Chip8Error> {
        let word = self.get_op()?;
        self.state.pc += 0x2;
        let op = Opcode::from(word);
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            word,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        match from_op(&op) {
            Some(instruction) => instruction(&op, &mut self.state, &self.keypad),
            None => {
                warn!("ignoring unknown opcode {:04X} at {:04X}", word, self.state.pc - 0x2);
                Ok(())
            }
        }
    }

    /// Advances the CPU by one cycle then steps both timers once.
    ///
    /// This ties the timer rate to the instruction rate; `advance_timers`
    /// keeps them at 60Hz regardless of clock speed.
    pub fn tick(&mut self) -> Result<(), Chip8Error> {
        self.cycle()?;
        self.state.decrement_timers();
        Ok(())
    }

    /// Handles the delay and sound timers
    /// - adds `elapsed` to the time owed to the timers
    /// - decrements both timers once for every full 1/60s owed
    pub fn advance_timers(&mut self, elapsed: Duration) {
        let period = Duration::from_secs(1) / TIMER_SPEED;
        self.timer_debt += elapsed;
        while self.timer_debt >= period {
            self.timer_debt -= period;
            self.state.decrement_timers();
        }
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<u16, Chip8Error> {
        let pc = self.state.pc as usize;
        if pc + 1 >= MEMORY_SIZE {
            return Err(Chip8Error::AddressOutOfRange { address: pc + 1 });
        }
        self.state.memory.fetch(self.state.pc)
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprites::{SCHIP_SPRITE_SHEET, SPRITE_SHEET};

    fn with_program(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::with_seed(0);
        chip8.load_rom_bytes(program).unwrap();
        chip8
    }

    #[test]
    fn test_chip8_loads_fonts() {
        let chip8 = Chip8::new();
        for address in 0x050..0x0A0 {
            let byte = chip8.state.read_byte(address).unwrap();
            assert_eq!(byte, SPRITE_SHEET[address as usize - 0x050]);
        }
        for address in 0x0A0..0x140 {
            let byte = chip8.state.read_byte(address).unwrap();
            assert_eq!(byte, SCHIP_SPRITE_SHEET[address as usize - 0x0A0]);
        }
        assert_eq!(chip8.state.pc, 0x200);
    }

    #[test]
    fn test_chip8_gets_op() {
        let chip8 = with_program(&[0xAA, 0xBB]);
        assert_eq!(chip8.get_op().unwrap(), 0xAABB);
    }

    #[test]
    fn test_get_op_past_end_of_memory() {
        let mut chip8 = Chip8::with_seed(0);
        chip8.state.pc = 0xFFF;
        assert!(matches!(
            chip8.cycle(),
            Err(Chip8Error::AddressOutOfRange { address: 0x1000 })
        ));
    }

    #[test]
    fn test_cycle_advances_pc() {
        // insert a cls opcode
        let mut chip8 = with_program(&[0x00, 0xE0]);
        let starting_pc = chip8.state.pc;
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.pc, starting_pc + 0x2);
    }

    #[test]
    fn test_unknown_opcode_is_noop() {
        let mut chip8 = with_program(&[0xF1, 0xFF]);
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.v, [0; 16]);
        assert_eq!(chip8.state.i, 0x0);
    }

    #[test]
    fn test_rom_round_trip() {
        let rom: Vec<u8> = (0..=255).collect();
        let mut reader: &[u8] = &rom;
        let mut chip8 = Chip8::new();
        chip8.load_rom(&mut reader).unwrap();
        let loaded: Vec<u8> = (0..rom.len() as u16)
            .map(|offset| (chip8.state.memory.fetch(0x200 + offset).unwrap() >> 8) as u8)
            .collect();
        assert_eq!(loaded, rom);
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
        }
    }

    #[test]
    fn test_rom_read_error() {
        let mut chip8 = Chip8::new();
        let result = chip8.load_rom(&mut BrokenReader);
        assert!(matches!(result, Err(Chip8Error::Io(_))));
        assert_eq!(chip8.state.read_byte(0x200).unwrap(), 0x0);
    }

    #[test]
    fn test_rom_fills_program_space() {
        let mut chip8 = Chip8::new();
        chip8.load_rom_bytes(&[0xAB; MAX_ROM_SIZE]).unwrap();
        assert_eq!(chip8.state.read_byte(0xFFF).unwrap(), 0xAB);
    }

    #[test]
    fn test_rom_too_large() {
        let mut chip8 = Chip8::new();
        let result = chip8.load_rom_bytes(&[0xAB; MAX_ROM_SIZE + 1]);
        assert!(matches!(
            result,
            Err(Chip8Error::RomTooLarge { size: 3585, max: 3584 })
        ));
        assert_eq!(chip8.state.read_byte(0x200).unwrap(), 0x0);
    }

    #[test]
    fn test_call_and_return() {
        // 0x200: call 0x300
        // 0x300: return
        let mut chip8 = with_program(&[0x23, 0x00]);
        chip8.state.memory.load(0x300, &[0x00, 0xEE]).unwrap();
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.pc, 0x300);
        assert_eq!(chip8.state.memory.stack.len(), 1);
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.pc, 0x202);
        assert!(chip8.state.memory.stack.is_empty());
    }

    #[test]
    fn test_clear_screen_cycle() {
        let mut chip8 = with_program(&[0x00, 0xE0]);
        chip8.state.frame_buffer.set(0, 0, 1);
        chip8.state.frame_buffer.set(0, 1, 1);
        chip8.cycle().unwrap();
        assert!(chip8
            .frame_buffer()
            .rows()
            .iter()
            .flatten()
            .all(|&p| p == 0));
    }

    #[test]
    fn test_wait_for_key_reissues_until_pressed() {
        let mut chip8 = with_program(&[0xF3, 0x0A]);
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.pc, 0x200);
        chip8.key_press(0xC);
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.v[0x3], 0xC);
    }

    #[test]
    fn test_key_release() {
        let mut chip8 = Chip8::new();
        chip8.key_press(0x4);
        chip8.key_release(0x4);
        assert_eq!(chip8.keypad.first_pressed(), None);
        let mut keys = [false; 16];
        keys[0x2] = true;
        chip8.set_keys(keys);
        assert_eq!(chip8.keypad.first_pressed(), Some(0x2));
    }

    #[test]
    fn test_get_frame_clears_draw_flag() {
        // 0x200: cls
        let mut chip8 = with_program(&[0x00, 0xE0]);
        assert!(chip8.get_frame().is_none());
        chip8.cycle().unwrap();
        assert!(chip8.get_frame().is_some());
        assert!(chip8.get_frame().is_none());
    }

    #[test]
    fn test_tick_decrements_timers() {
        // 0x200: v0 = 0x0 (repeated)
        let mut chip8 = with_program(&[0x60, 0x00, 0x60, 0x00]);
        chip8.state.delay_timer = 0x2;
        chip8.state.sound_timer = 0x1;
        chip8.tick().unwrap();
        assert_eq!(chip8.state.delay_timer, 0x1);
        assert!(!chip8.sound_active());
        chip8.tick().unwrap();
        assert_eq!(chip8.state.delay_timer, 0x0);
    }

    #[test]
    fn test_advance_timers_at_60hz() {
        let mut chip8 = Chip8::new();
        chip8.state.delay_timer = 0xFF;
        chip8.state.sound_timer = 0x1;
        assert!(chip8.sound_active());

        chip8.advance_timers(Duration::from_millis(10));
        assert_eq!(chip8.state.delay_timer, 0xFF);
        chip8.advance_timers(Duration::from_millis(10));
        assert_eq!(chip8.state.delay_timer, 0xFE);
        assert!(!chip8.sound_active());

        chip8.advance_timers(Duration::from_secs(1));
        assert_eq!(chip8.state.delay_timer, 0xFE - 60);
    }

    #[test]
    fn test_seeded_machines_agree() {
        // 0x200: v1 = rand & 0xFF
        let mut first = Chip8::with_seed(42);
        let mut second = Chip8::with_seed(42);
        first.load_rom_bytes(&[0xC1, 0xFF]).unwrap();
        second.load_rom_bytes(&[0xC1, 0xFF]).unwrap();
        first.cycle().unwrap();
        second.cycle().unwrap();
        assert_eq!(first.state.v[0x1], second.state.v[0x1]);
    }
}
