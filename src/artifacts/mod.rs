//! Data structures and algorithms
//!
//! - `core`: trailing checksums and the shared sorted merge
//! - `index`: index file header, entries and modes
//! - `log`: ancestry walk and reachable object sets
//! - `objects`: blob, tree and commit objects and their identifiers
//! - `pack`: pack stream encoding
//! - `push`: smart-HTTP push framing
//! - `status`: working tree vs index comparison

pub mod core;
pub mod index;
pub mod log;
pub mod objects;
pub mod pack;
pub mod push;
pub mod status;
