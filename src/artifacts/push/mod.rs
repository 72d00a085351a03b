//! Smart-HTTP push framing
//!
//! - `advertisement`: reading the remote master tip out of a ref advertisement
//! - `update_command`: the pkt-line framed ref update that precedes a pack

pub mod advertisement;
pub mod update_command;

/// Service name used for both the discovery query and the upload endpoint
pub const RECEIVE_PACK_SERVICE: &str = "git-receive-pack";

/// Content type of the push request body
pub const RECEIVE_PACK_REQUEST: &str = "application/x-git-receive-pack-request";
