// File: ./src/client/google.rs
//! Blocking client for the Sheets, Docs and Drive REST APIs.
//!
//! Authentication is not handled here: the client is given a ready bearer
//! token.
use crate::client::{DocumentStore, RowSource};
use crate::config::Endpoints;
use crate::model::{Document, EditRequest};
use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use reqwest::blocking::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Serialize)]
struct CopyRequest<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct CopiedFile {
    id: String,
}

#[derive(Serialize)]
struct BatchUpdate<'a> {
    requests: &'a [EditRequest],
}

#[derive(Clone, Debug)]
pub struct GoogleClient {
    endpoints: Endpoints,
    token: String,
    http: reqwest::blocking::Client,
}

impl GoogleClient {
    pub fn new(endpoints: Endpoints, token: &str) -> Self {
        Self {
            endpoints,
            token: token.to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        request
            .bearer_auth(&self.token)
            .send()
            .with_context(|| format!("{} failed", what))?
            .error_for_status()
            .with_context(|| format!("{} was rejected", what))
    }

    fn values_url(&self, sheet_id: &str, range: &str) -> Result<Url> {
        let mut url = Url::parse(&self.endpoints.sheets)
            .with_context(|| format!("Invalid sheets endpoint '{}'", self.endpoints.sheets))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Sheets endpoint cannot carry a path"))?
            .pop_if_empty()
            .extend(["spreadsheets", sheet_id, "values", range]);
        Ok(url)
    }
}

impl RowSource for GoogleClient {
    fn rows(&self, sheet_id: &str, range: &str) -> Result<Vec<Vec<String>>> {
        let url = self.values_url(sheet_id, range)?;
        log::debug!("Reading {} from sheet {}", range, sheet_id);
        let what = format!("Reading range '{}'", range);
        let values: ValueRange = self
            .send(self.http.get(url), &what)?
            .json()
            .with_context(|| format!("{}: undecodable response", what))?;
        Ok(values.values)
    }
}

impl DocumentStore for GoogleClient {
    fn copy_template(&self, template_id: &str, title: &str) -> Result<String> {
        let url = format!(
            "{}/files/{}/copy",
            self.endpoints.drive.trim_end_matches('/'),
            template_id
        );
        let what = format!("Copying template {}", template_id);
        let copied: CopiedFile = self
            .send(self.http.post(url).json(&CopyRequest { name: title }), &what)?
            .json()
            .with_context(|| format!("{}: undecodable response", what))?;
        Ok(copied.id)
    }

    fn get_document(&self, document_id: &str) -> Result<Document> {
        let url = format!(
            "{}/documents/{}",
            self.endpoints.docs.trim_end_matches('/'),
            document_id
        );
        let what = format!("Fetching document {}", document_id);
        self.send(self.http.get(url), &what)?
            .json()
            .with_context(|| format!("{}: undecodable response", what))
    }

    fn batch_update(&self, document_id: &str, requests: &[EditRequest]) -> Result<()> {
        if requests.is_empty() {
            return Ok(());
        }
        let url = format!(
            "{}/documents/{}:batchUpdate",
            self.endpoints.docs.trim_end_matches('/'),
            document_id
        );
        log::debug!("Applying {} edits to {}", requests.len(), document_id);
        self.send(
            self.http.post(url).json(&BatchUpdate { requests }),
            &format!("Updating document {}", document_id),
        )?;
        Ok(())
    }
}
