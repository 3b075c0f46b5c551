use crate::constants::{
    SCHIP_SPRITE_HEIGHT, SCHIP_SPRITE_SHEET_ADDR, SPRITE_HEIGHT, SPRITE_SHEET_ADDR,
};
use crate::error::Chip8Error;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::state::State;

// The pc has already been stepped past the current instruction when these run.

/// clear
pub fn clr(_op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.clear_screen();
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.ret()
}

/// PC = addr
pub fn jump(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.jump(op.nnn, 0x0);
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.call(op.nnn)
}

/// if Vx == nn then pc += 2
pub fn ske(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.skip_if(state.v[op.x as usize] == op.nn);
    Ok(())
}

/// if Vx != nn then pc += 2
pub fn skne(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.skip_if(state.v[op.x as usize] != op.nn);
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.skip_if(state.v[op.x as usize] == state.v[op.y as usize]);
    Ok(())
}

/// Vx = nn
pub fn load(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.load(op.x, op.nn);
    Ok(())
}

/// Vx += nn
/// Overflow wraps and VF is left alone
pub fn add(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.add(op.x, op.nn, false);
    Ok(())
}

/// Vx = Vy
pub fn mv(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.load(op.x, state.v[op.y as usize]);
    Ok(())
}

/// Vx |= Vy
pub fn or(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.or(op.x, state.v[op.y as usize]);
    Ok(())
}

/// Vx &= Vy
pub fn and(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.and(op.x, state.v[op.y as usize]);
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.xor(op.x, state.v[op.y as usize]);
    Ok(())
}

/// Vx += Vy; VF = overflow
pub fn addr(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.add(op.x, state.v[op.y as usize], true);
    Ok(())
}

/// Vx = Vx - Vy; VF = !underflow
pub fn sub(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let (vx, vy) = (state.v[op.x as usize], state.v[op.y as usize]);
    state.subtract(op.x, vx, vy);
    Ok(())
}

/// Vx >>= 1; VF = lsb
/// Vy is ignored
pub fn shr(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.shift_right(op.x);
    Ok(())
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let (vx, vy) = (state.v[op.x as usize], state.v[op.y as usize]);
    state.subtract(op.x, vy, vx);
    Ok(())
}

/// Vx <<= 1; VF = msb
/// Vy is ignored
pub fn shl(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.shift_left(op.x);
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.skip_if(state.v[op.x as usize] != state.v[op.y as usize]);
    Ok(())
}

/// I = addr
pub fn loadi(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.load_index(op.nnn);
    Ok(())
}

/// PC = addr + V0
pub fn jumpi(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.jump(op.nnn, state.v[0x0]);
    Ok(())
}

/// Vx = rand_byte & nn
pub fn rand(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.random(op.x, op.nn);
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// Sets VF if any pixels were erased
pub fn draw(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.draw(state.v[op.x as usize], state.v[op.y as usize], op.n)
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &Opcode, state: &mut State, keypad: &Keypad) -> Result<(), Chip8Error> {
    state.skip_if(keypad.is_pressed(state.v[op.x as usize]));
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &Opcode, state: &mut State, keypad: &Keypad) -> Result<(), Chip8Error> {
    state.skip_if(!keypad.is_pressed(state.v[op.x as usize]));
    Ok(())
}

/// Vx = DT
pub fn moved(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.load(op.x, state.delay_timer);
    Ok(())
}

/// await keypress for Vx
pub fn keyd(op: &Opcode, state: &mut State, keypad: &Keypad) -> Result<(), Chip8Error> {
    state.wait_for_key(op.x, keypad);
    Ok(())
}

/// DT = Vx
pub fn loads(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.set_delay_timer(state.v[op.x as usize]);
    Ok(())
}

/// ST = Vx
pub fn ld(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.set_sound_timer(state.v[op.x as usize]);
    Ok(())
}

/// I += Vx; VF = I > 0xFFF
/// Fails rather than wrap past 0xFFFF
pub fn addi(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.add_to_index(u16::from(state.v[op.x as usize]))
}

/// I = address of the small sprite for digit Vx
/// See sprites::SPRITE_SHEET
pub fn ldspr(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let digit = u16::from(state.v[op.x as usize] & 0xF);
    state.load_index(SPRITE_SHEET_ADDR + digit * SPRITE_HEIGHT);
    Ok(())
}

/// I = address of the large sprite for digit Vx
/// See sprites::SCHIP_SPRITE_SHEET
pub fn ldhspr(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    let digit = u16::from(state.v[op.x as usize] & 0xF);
    state.load_index(SCHIP_SPRITE_SHEET_ADDR + digit * SCHIP_SPRITE_HEIGHT);
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.store_bcd(state.v[op.x as usize])
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.store_registers(op.x)
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: &Opcode, state: &mut State, _keypad: &Keypad) -> Result<(), Chip8Error> {
    state.read_registers(op.x)
}
