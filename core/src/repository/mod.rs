pub mod file;
pub mod memory;
pub mod traits;

// Re-export
pub use file::FileStateRepository;
pub use memory::InMemoryStateRepository;
pub use traits::StateRepository;
