pub mod scratch_buffer;
pub mod timer;

pub use scratch_buffer::ScratchBuffer;
pub use timer::Timer;
