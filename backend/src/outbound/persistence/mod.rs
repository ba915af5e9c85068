//! Store adapters behind the domain's transactional ports.

pub mod memory;

pub use self::memory::MemoryBackend;
