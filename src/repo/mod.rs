//! Blob Repository Module
//!
//! Wraps the opaque key→bytes store that holds entry payloads. The trait is
//! the seam where a cloud blob client would plug in; the bundled backend is
//! in-memory.

mod blob;
mod memory;

pub use blob::{BlobError, BlobRepository, Metadata};
pub use memory::MemoryBlobRepository;
