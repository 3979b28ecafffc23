mod fetcher;
mod file_system;
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "memory")]
mod memory;
#[cfg(feature = "os")]
mod os;

pub use crate::{fetcher::ChunkFetcher, file_system::FileSystem};
#[cfg(feature = "http")]
pub use http::HttpFetcher;
#[cfg(feature = "memory")]
pub use memory::MemoryFileSystem;
#[cfg(feature = "os")]
pub use os::OsFileSystem;
