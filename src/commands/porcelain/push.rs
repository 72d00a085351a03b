//! Push
//!
//! A push moves through three states:
//!
//! 1. `Discover`: ask the remote for its master tip.
//! 2. `Transfer`: compute the objects reachable locally but not from the
//!    remote tip, pack them and upload the pack behind a ref update command.
//!    The upload always happens, with an empty pack when nothing is missing.
//! 3. `Done`: report the outcome.
//!
//! Objects reachable from the remote tip must exist locally: there is no
//! fetch, so a remote that is ahead fails with `ObjectNotFound`.

use crate::areas::refs::MASTER_BRANCH;
use crate::areas::remote::Remote;
use crate::areas::repository::Repository;
use crate::artifacts::log::reachable::{dedupe, missing, reachable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::pack::pack_writer::build_pack;
use crate::artifacts::push::update_command::UpdateCommand;
use crate::errors::TwigError;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    UpToDate,
    Updated {
        old: ObjectId,
        new: ObjectId,
        objects: usize,
    },
}

#[derive(Debug)]
enum PushState {
    Discover,
    Transfer { remote_tip: ObjectId },
    Done(PushOutcome),
}

impl Repository {
    pub async fn push(&mut self, remote: &Remote) -> anyhow::Result<PushOutcome> {
        let local_tip = self.refs().read_head()?.ok_or(TwigError::UnbornBranch)?;
        let mut state = PushState::Discover;

        let outcome = loop {
            state = match state {
                PushState::Discover => {
                    let remote_tip = remote.discover().await?;
                    tracing::debug!(remote = remote.url(), %remote_tip, "discovered remote master");
                    PushState::Transfer { remote_tip }
                }
                PushState::Transfer { remote_tip } => self.transfer(remote, &local_tip, remote_tip).await?,
                PushState::Done(outcome) => break outcome,
            }
        };

        self.report(remote, &outcome)?;

        Ok(outcome)
    }

    async fn transfer(
        &self,
        remote: &Remote,
        local_tip: &ObjectId,
        remote_tip: ObjectId,
    ) -> anyhow::Result<PushState> {
        let local_objects = dedupe(reachable(self.database(), local_tip)?);
        let remote_objects = dedupe(reachable(self.database(), &remote_tip)?);
        let missing_objects = missing(&local_objects, &remote_objects);

        let pack = build_pack(self.database(), &missing_objects)?;
        let command = UpdateCommand::new(remote_tip.clone(), local_tip.clone());
        tracing::debug!(objects = missing_objects.len(), line = %command.line(), "sending pack");

        remote.send_pack(command.request_body(&pack)).await?;

        if missing_objects.is_empty() && &remote_tip == local_tip {
            return Ok(PushState::Done(PushOutcome::UpToDate));
        }

        Ok(PushState::Done(PushOutcome::Updated {
            old: remote_tip,
            new: local_tip.clone(),
            objects: missing_objects.len(),
        }))
    }

    fn report(&self, remote: &Remote, outcome: &PushOutcome) -> anyhow::Result<()> {
        let mut writer = self.writer();

        match outcome {
            PushOutcome::UpToDate => writeln!(writer, "Everything up-to-date")?,
            PushOutcome::Updated { old, new, objects } => {
                tracing::info!(objects, %old, %new, "pushed master");
                writeln!(writer, "Writing objects: {}, done.", objects)?;
                writeln!(writer, "To {}", remote.url())?;
                writeln!(
                    writer,
                    "   {}..{}  {} -> {}",
                    old.to_short_oid(),
                    new.to_short_oid(),
                    MASTER_BRANCH,
                    MASTER_BRANCH
                )?;
            }
        }

        Ok(())
    }
}
