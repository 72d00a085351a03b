//! Smart-HTTP remote
//!
//! Two requests make up a push: a ref discovery `GET` and the pack upload
//! `POST`. Both carry HTTP basic auth. Any network failure or non-success
//! status is a [`TwigError::Transport`]; nothing is retried.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::push::advertisement;
use crate::artifacts::push::{RECEIVE_PACK_REQUEST, RECEIVE_PACK_SERVICE};
use crate::errors::TwigError;
use bytes::Bytes;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

#[derive(Debug, Clone)]
pub struct Remote {
    client: Client,
    url: String,
    username: String,
    password: String,
}

impl Remote {
    pub fn new(url: &str, username: String, password: String) -> Self {
        Remote {
            client: Client::new(),
            url: url.trim_end_matches('/').to_string(),
            username,
            password,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn refs_url(&self) -> String {
        format!("{}/info/refs?service={}", self.url, RECEIVE_PACK_SERVICE)
    }

    fn receive_pack_url(&self) -> String {
        format!("{}/{}", self.url, RECEIVE_PACK_SERVICE)
    }

    /// Ask the remote for its master tip
    pub async fn discover(&self) -> anyhow::Result<ObjectId> {
        let response = self
            .client
            .get(self.refs_url())
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(transport)?;

        let body = response.text().await.map_err(transport)?;
        tracing::debug!(url = %self.refs_url(), bytes = body.len(), "received ref advertisement");

        advertisement::parse_remote_master(&body)
    }

    /// Upload a framed ref update and its pack
    ///
    /// The report-status reply is read to completion but not interpreted.
    pub async fn send_pack(&self, body: Bytes) -> anyhow::Result<()> {
        let size = body.len();
        let response = self
            .client
            .post(self.receive_pack_url())
            .basic_auth(&self.username, Some(&self.password))
            .header(CONTENT_TYPE, RECEIVE_PACK_REQUEST)
            .body(body)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(transport)?;

        let reply = response.bytes().await.map_err(transport)?;
        tracing::debug!(sent = size, received = reply.len(), "uploaded pack");

        Ok(())
    }
}

fn transport(error: reqwest::Error) -> anyhow::Error {
    TwigError::Transport(error.to_string()).into()
}
