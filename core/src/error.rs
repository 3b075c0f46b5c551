use thiserror::Error;

/// Ways a Chip-8 program or ROM load can fail
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("stack overflow: call with {depth} return addresses already on the stack")]
    StackOverflow { depth: usize },

    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("memory access out of range at address {address:#06X}")]
    AddressOutOfRange { address: usize },

    #[error("ROM is too large ({size} bytes), program space holds {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("unable to read ROM: {0}")]
    Io(#[from] std::io::Error),
}
