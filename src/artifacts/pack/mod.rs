//! Pack stream encoding
//!
//! A pack carries a set of whole objects in one stream:
//!
//! ```text
//! "PACK" | version (u32 BE) | object count (u32 BE)
//! per object: type/size header, zlib-compressed content
//! SHA-1 of every preceding byte
//! ```
//!
//! Only undeltified objects are written.

pub mod object_header;
pub mod pack_writer;

/// Pack stream signature
pub const SIGNATURE: &[u8; 4] = b"PACK";

/// Pack format version
pub const VERSION: u32 = 2;
