//! Object types and operations
//!
//! Every object is identified by the SHA-1 of `<type> <size>\0<content>`:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Flat listing of mode, path and object ID for every staged file
//! - **Commit**: Tree, optional parent, identity and message

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const RAW_OBJECT_ID_LENGTH: usize = 20;
