//! Ref advertisement parsing
//!
//! The reply to `GET info/refs?service=git-receive-pack` is a pkt-line
//! stream. Its first line announces the service; the second line carries the
//! first advertised ref, which for a single-branch repository is master:
//!
//! ```text
//! 001f# service=git-receive-pack\n
//! 0000<4 hex len><40 hex id> refs/heads/master\0<capabilities>\n
//! ```
//!
//! The id occupies characters `[8, 48)` of that second line: the flush
//! packet and the length prefix come before it.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;

/// Offset of the identifier inside the second advertised line
const OID_OFFSET: usize = 8;

/// Remote master tip, or the all-zero id for an empty remote
pub fn parse_remote_master(advertisement: &str) -> anyhow::Result<ObjectId> {
    let line = advertisement
        .lines()
        .nth(1)
        .ok_or(TwigError::MalformedAdvertisement)?;

    let oid = line
        .get(OID_OFFSET..OID_OFFSET + OBJECT_ID_LENGTH)
        .ok_or(TwigError::MalformedAdvertisement)?;

    ObjectId::try_parse(oid.to_string()).map_err(|_| TwigError::MalformedAdvertisement.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn reads_master_from_second_line() {
        let advertisement = "001f# service=git-receive-pack\n\
            0000009bce013625030ba8dba906f756967f9e9ca394464a refs/heads/master\0report-status delete-refs\n\
            0000";

        let oid = parse_remote_master(advertisement).unwrap();

        assert_eq!(oid.as_ref(), "ce013625030ba8dba906f756967f9e9ca394464a");
    }

    #[test]
    fn empty_remote_advertises_zero_id() {
        let advertisement = "001f# service=git-receive-pack\n\
            000000830000000000000000000000000000000000000000 capabilities^{}\0report-status\n\
            0000";

        assert!(parse_remote_master(advertisement).unwrap().is_zero());
    }

    #[rstest]
    #[case::single_line("001f# service=git-receive-pack\n")]
    #[case::short_line("001f# service=git-receive-pack\n0000009bce0136\n")]
    #[case::not_hex("001f# service=git-receive-pack\n0000009bzz013625030ba8dba906f756967f9e9ca394464a x\n")]
    fn rejects_advertisements_without_an_id(#[case] advertisement: &str) {
        let error = parse_remote_master(advertisement).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<TwigError>(),
            Some(TwigError::MalformedAdvertisement)
        ));
    }
}
