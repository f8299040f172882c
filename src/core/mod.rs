//! Core data types shared by every backend.

pub mod filter;
pub mod request;
pub mod state;

pub use filter::FileFilter;
pub use request::{DialogMode, DialogRequest};
pub use state::{DirectoryState, StartLocation};
