//! Record-store and identity interpreters.

mod file;
mod memory;
mod sessions;

pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;
pub use sessions::TokenFileValidator;
