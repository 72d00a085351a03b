//! Commit object
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>        (absent for the first commit)
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! History is linear: a commit has at most one parent.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::TwigError;
use anyhow::Context;
use bytes::Bytes;
use std::io::BufRead;

const AUTHOR_NAME_VAR: &str = "GIT_AUTHOR_NAME";
const AUTHOR_EMAIL_VAR: &str = "GIT_AUTHOR_EMAIL";
const AUTHOR_DATE_VAR: &str = "GIT_AUTHOR_DATE";

/// Author or committer information
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    /// Create a new author stamped with the current local time
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// "Name <email> timestamp timezone"
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Load the identity from `GIT_AUTHOR_NAME` and `GIT_AUTHOR_EMAIL`
    ///
    /// `GIT_AUTHOR_DATE` optionally pins the timestamp; otherwise the current
    /// time is used.
    pub fn load_from_env() -> anyhow::Result<Self> {
        let name = std::env::var(AUTHOR_NAME_VAR)
            .map_err(|_| TwigError::ConfigMissing(AUTHOR_NAME_VAR))?;
        let email = std::env::var(AUTHOR_EMAIL_VAR)
            .map_err(|_| TwigError::ConfigMissing(AUTHOR_EMAIL_VAR))?;
        let timestamp = std::env::var(AUTHOR_DATE_VAR).ok().and_then(|date_str| {
            chrono::DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        });

        match timestamp {
            Some(ts) => Ok(Author::new_with_timestamp(name, email, ts)),
            None => Ok(Author::new(name, email)),
        }
    }
}

impl TryFrom<&str> for Author {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Format: "name <email> timestamp timezone"
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(anyhow::anyhow!("Invalid author format"));
        }

        let timezone = parts[0];
        let timestamp = parts[1]
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("Invalid timestamp"))?;
        let name_email_part = parts[2];

        // the email is the last bracketed part; the name may contain either bracket
        let email_start = name_email_part
            .rfind('<')
            .ok_or_else(|| anyhow::anyhow!("Invalid author format: missing '<'"))?;
        let email_end = name_email_part[email_start..]
            .find('>')
            .map(|offset| email_start + offset)
            .ok_or_else(|| anyhow::anyhow!("Invalid author format: missing '>'"))?;

        let name = name_email_part[..email_start].trim().to_string();
        let email = name_email_part[email_start + 1..email_end].to_string();

        let offset = chrono::DateTime::parse_from_str(
            &format!("1970-01-01 00:00:00 {timezone}"),
            "%Y-%m-%d %H:%M:%S %z",
        )
        .map_err(|_| anyhow::anyhow!("Invalid timezone"))?
        .offset()
        .to_owned();
        let timestamp = chrono::DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| anyhow::anyhow!("Invalid timestamp"))?
            .with_timezone(&offset);

        Ok(Author {
            name,
            email,
            timestamp,
        })
    }
}

/// Commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    parent: Option<ObjectId>,
    tree_oid: ObjectId,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    /// Create a new commit; the author also acts as committer
    pub fn new(parent: Option<ObjectId>, tree_oid: ObjectId, author: Author, message: String) -> Self {
        Commit {
            parent,
            tree_oid,
            author: author.clone(),
            committer: author,
            message,
        }
    }

    /// First line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![];

        lines.push(format!("tree {}", self.tree_oid));
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());
        lines.push(self.message.to_string());

        Ok(Bytes::from(format!("{}\n", lines.join("\n"))))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let (headers, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;
        let mut lines = headers.lines();

        let tree_oid = lines
            .next()
            .and_then(|line| line.strip_prefix("tree "))
            .context("Invalid commit object: missing tree line")?;
        let tree_oid = ObjectId::try_parse(tree_oid.to_string())?;

        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing author line")?;

        let parent = match next_line.strip_prefix("parent ") {
            Some(parent_oid) => {
                next_line = lines
                    .next()
                    .context("Invalid commit object: missing author line")?;
                Some(ObjectId::try_parse(parent_oid.to_string())?)
            }
            None => None,
        };

        let author = next_line
            .strip_prefix("author ")
            .context("Invalid commit object: invalid author line")?;
        let author = Author::try_from(author)?;

        let committer = lines
            .next()
            .and_then(|line| line.strip_prefix("committer "))
            .context("Invalid commit object: missing committer line")?;
        let committer = Author::try_from(committer)?;

        Ok(Commit {
            parent,
            tree_oid,
            author,
            committer,
            message: message.strip_suffix('\n').unwrap_or(message).to_string(),
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use std::io::Cursor;

    #[fixture]
    fn author() -> Author {
        let timestamp = chrono::DateTime::parse_from_str(
            "2024-03-01 12:00:00 +0200",
            "%Y-%m-%d %H:%M:%S %z",
        )
        .unwrap();
        Author::new_with_timestamp("Jane Doe".to_string(), "jane@example.com".to_string(), timestamp)
    }

    #[fixture]
    fn tree_oid() -> ObjectId {
        ObjectId::try_parse("4b825dc642cb6eb9a060e54bf8d69288fbee4904".to_string()).unwrap()
    }

    #[rstest]
    fn root_commit_has_no_parent_line(author: Author, tree_oid: ObjectId) {
        let commit = Commit::new(None, tree_oid, author, "first".to_string());
        let content = String::from_utf8(commit.serialize().unwrap().to_vec()).unwrap();

        assert_eq!(
            content,
            "tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\
             author Jane Doe <jane@example.com> 1709287200 +0200\n\
             committer Jane Doe <jane@example.com> 1709287200 +0200\n\
             \n\
             first\n"
        );
    }

    #[rstest]
    fn parsed_commit_keeps_parent_and_message(author: Author, tree_oid: ObjectId) {
        let parent = ObjectId::try_parse("ce013625030ba8dba906f756967f9e9ca394464a".to_string()).unwrap();
        let commit = Commit::new(
            Some(parent.clone()),
            tree_oid.clone(),
            author,
            "second\n\nwith a body".to_string(),
        );

        let parsed = Commit::deserialize(Cursor::new(commit.serialize().unwrap())).unwrap();

        assert_eq!(parsed, commit);
        assert_eq!(parsed.parent(), Some(&parent));
        assert_eq!(parsed.tree_oid(), &tree_oid);
        assert_eq!(parsed.short_message(), "second");
    }

    #[rstest]
    #[case::closing_bracket_in_name("a>b", "e@x")]
    #[case::opening_bracket_in_name("a<b", "e@x")]
    #[case::both_brackets_in_name("x <y> z", "e@x")]
    fn names_with_brackets_survive_parsing(
        #[case] name: &str,
        #[case] email: &str,
        author: Author,
        tree_oid: ObjectId,
    ) {
        let author = Author::new_with_timestamp(name.to_string(), email.to_string(), author.timestamp);
        let commit = Commit::new(None, tree_oid, author, "msg".to_string());

        let parsed = Commit::deserialize(Cursor::new(commit.serialize().unwrap())).unwrap();

        assert_eq!(parsed, commit);
    }

    #[rstest]
    #[case::missing_closing_bracket("a <e@x 0 +0000")]
    #[case::closing_bracket_only_in_name("a>b e@x 0 +0000")]
    #[case::missing_timestamp("a <e@x>")]
    fn malformed_identity_is_rejected(#[case] identity: &str) {
        assert!(Author::try_from(identity).is_err());
    }

    #[test]
    fn commit_without_tree_line_is_rejected() {
        let content = "author a <b> 0 +0000\ncommitter a <b> 0 +0000\n\nmsg\n";
        assert!(Commit::deserialize(Cursor::new(content)).is_err());
    }
}
