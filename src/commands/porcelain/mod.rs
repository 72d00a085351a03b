//! Porcelain commands
//!
//! - `init`: lay out an empty repository
//! - `add`: stage files and directories
//! - `commit`: record the staged tree on master
//! - `status`: compare the working tree with the index
//! - `push`: send master to a smart-HTTP remote

pub mod add;
pub mod commit;
pub mod init;
pub mod push;
pub mod status;
