//! Ref update command
//!
//! Before the pack, a push sends one pkt-line naming the ref update,
//! followed by a flush packet:
//!
//! ```text
//! <4 hex len><old> <new> refs/heads/master\0 report-status\n0000
//! ```
//!
//! The length prefix counts itself and the trailing newline.

use crate::areas::refs::MASTER_BRANCH;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use derive_new::new;

/// Flush packet terminating the command list
const FLUSH_PKT: &str = "0000";

/// Capability requested from the remote
const CAPABILITIES: &str = "report-status";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct UpdateCommand {
    old: ObjectId,
    new: ObjectId,
}

impl UpdateCommand {
    pub fn line(&self) -> String {
        format!(
            "{} {} refs/heads/{}\0 {}",
            self.old, self.new, MASTER_BRANCH, CAPABILITIES
        )
    }

    /// Pkt-line framed command and flush packet
    pub fn framed(&self) -> String {
        let line = self.line();
        format!("{:04x}{}\n{}", line.len() + 5, line, FLUSH_PKT)
    }

    /// Full request body: the framed command followed by the pack
    pub fn request_body(&self, pack: &[u8]) -> Bytes {
        let mut body = self.framed().into_bytes();
        body.extend_from_slice(pack);
        body.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn frames_command_with_length_and_flush() {
        let command = UpdateCommand::new(
            ObjectId::zero(),
            ObjectId::try_parse("ce013625030ba8dba906f756967f9e9ca394464a".to_string()).unwrap(),
        );

        let framed = command.framed();

        // 40 + 1 + 40 + 1 + 17 + 1 + 14 = 114 characters, plus 5
        assert!(framed.starts_with("0077"));
        assert_eq!(
            framed,
            format!(
                "0077{} ce013625030ba8dba906f756967f9e9ca394464a refs/heads/master\0 report-status\n0000",
                ObjectId::zero()
            )
        );
    }

    #[test]
    fn body_appends_pack_after_flush() {
        let command = UpdateCommand::new(ObjectId::zero(), ObjectId::zero());

        let body = command.request_body(b"PACK");

        assert!(body.ends_with(b"0000PACK"));
        assert_eq!(body.len(), command.framed().len() + 4);
    }
}
