use std::fmt;

use log::debug;

/// Content of every byte of a frame that has never been loaded (`-1` as a signed byte).
pub const UNLOADED: u8 = 0xFF;

#[derive(Debug, PartialEq)]
pub enum MemoryError {
    OutOfRange,
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryError::OutOfRange => write!(f, "frame or offset out of range"),
        }
    }
}

impl std::error::Error for MemoryError {}

/// Fixed pool of `FRAMES` frames of `FRAME_SIZE` bytes each.
#[derive(Clone)]
pub struct PhysicalMemory<const FRAME_SIZE: usize, const FRAMES: usize> {
    frames: Vec<[u8; FRAME_SIZE]>,
}

impl<const FRAME_SIZE: usize, const FRAMES: usize> PhysicalMemory<FRAME_SIZE, FRAMES> {
    pub fn create() -> Self {
        assert!(
            FRAME_SIZE.is_power_of_two(),
            "Frame size {} is not a power of 2",
            FRAME_SIZE
        );
        assert!(FRAMES > 0, "Memory must hold at least one frame");
        Self {
            frames: vec![[UNLOADED; FRAME_SIZE]; FRAMES],
        }
    }

    pub const fn capacity() -> usize {
        FRAME_SIZE * FRAMES
    }

    pub fn check_address(&self, frame_number: usize, offset: usize) -> Result<(), MemoryError> {
        if frame_number >= FRAMES || offset >= FRAME_SIZE {
            return Err(MemoryError::OutOfRange);
        }
        Ok(())
    }

    /// Overwrites the whole frame.
    pub fn load(&mut self, frame_number: usize, bytes: &[u8; FRAME_SIZE]) -> Result<(), MemoryError> {
        self.check_address(frame_number, 0)?;
        debug!("Loading frame[{}]", frame_number);
        self.frames[frame_number].copy_from_slice(bytes);
        Ok(())
    }

    pub fn read_u8(&self, frame_number: usize, offset: usize) -> Result<u8, MemoryError> {
        self.check_address(frame_number, offset)?;
        Ok(self.frames[frame_number][offset])
    }

    pub fn read_i8(&self, frame_number: usize, offset: usize) -> Result<i8, MemoryError> {
        Ok(self.read_u8(frame_number, offset)? as i8)
    }

    pub fn frame(&self, frame_number: usize) -> Result<&[u8; FRAME_SIZE], MemoryError> {
        self.frames.get(frame_number).ok_or(MemoryError::OutOfRange)
    }
}

impl<const FRAME_SIZE: usize, const FRAMES: usize> Default for PhysicalMemory<FRAME_SIZE, FRAMES> {
    fn default() -> Self {
        Self::create()
    }
}
