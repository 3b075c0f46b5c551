/// Instructions executed per second
pub const CLOCK_SPEED: u32 = 700;
/// Timer decrements per second
pub const TIMER_SPEED: u32 = 60;

pub const MEMORY_SIZE: usize = 4096;
pub const STACK_DEPTH: usize = 16;

/// Where ROMs are loaded and execution begins
pub const PROGRAM_START: u16 = 0x200;
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const SPRITE_SHEET_ADDR: u16 = 0x050;
pub const SPRITE_HEIGHT: u16 = 5;
pub const SCHIP_SPRITE_SHEET_ADDR: u16 = 0x0A0;
pub const SCHIP_SPRITE_HEIGHT: u16 = 10;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;
