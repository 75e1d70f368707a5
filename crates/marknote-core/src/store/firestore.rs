//! Cloud Firestore note store over the REST API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::{mpsc, watch};

use super::document::{
    encode_new_note, encode_patch, Document, ListDocumentsResponse, PATCH_FIELD_PATHS,
};
use super::{NoteStore, Snapshot, Subscription};
use crate::config::StoreConfig;
use crate::models::{NewNote, Note, NoteId, NotePatch};
use crate::util::compact_text;
use crate::{Error, Result};

const HTTP_TIMEOUT_SECS: u64 = 10;
const LIST_PAGE_SIZE: &str = "300";

/// Note store backed by a Firestore collection.
///
/// Subscriptions re-list the collection every `poll_interval` and emit a
/// snapshot on the first load and whenever the listing changes. Writes made
/// through this handle wake every poller so the change shows up right away.
#[derive(Clone)]
pub struct FirestoreNoteStore {
    config: Arc<StoreConfig>,
    client: reqwest::Client,
    /// Bumped after every write; each poller re-lists when it changes.
    refresh: Arc<watch::Sender<u64>>,
}

impl std::fmt::Debug for FirestoreNoteStore {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FirestoreNoteStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FirestoreNoteStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        let (refresh, _) = watch::channel(0);
        Ok(Self {
            config: Arc::new(config),
            client,
            refresh: Arc::new(refresh),
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Fetch every note in the collection, following pagination.
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        let mut notes = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .request(Method::GET, self.config.collection_url())
                .query(&[("pageSize", LIST_PAGE_SIZE)]);
            if let Some(token) = page_token.as_deref() {
                request = request.query(&[("pageToken", token)]);
            }

            let page: ListDocumentsResponse = read_json(request.send().await?).await?;
            for document in page.documents {
                notes.push(document.into_note()?);
            }

            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => return Ok(notes),
            }
        }
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.client
            .request(method, url)
            .query(&[("key", self.config.api_key.as_str())])
            .header(reqwest::header::ACCEPT, "application/json")
    }

    fn wake_pollers(&self) {
        self.refresh
            .send_modify(|generation| *generation = generation.wrapping_add(1));
    }

    async fn poll(self, sender: mpsc::UnboundedSender<Snapshot>) {
        let mut last_delivered: Option<Vec<Note>> = None;
        let mut refresh = self.refresh.subscribe();

        loop {
            match self.list_notes().await {
                Ok(notes) if last_delivered.as_ref() != Some(&notes) => {
                    tracing::debug!("Firestore snapshot with {} notes", notes.len());
                    if sender.send(Snapshot::new(notes.clone())).is_err() {
                        return;
                    }
                    last_delivered = Some(notes);
                }
                Ok(_) => {}
                Err(error) => {
                    tracing::warn!("Failed to refresh notes from Firestore: {}", error);
                }
            }

            tokio::select! {
                () = tokio::time::sleep(self.config.poll_interval) => {}
                _ = refresh.changed() => {}
                () = sender.closed() => return,
            }
        }
    }
}

impl NoteStore for FirestoreNoteStore {
    fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let poller = tokio::spawn(self.clone().poll(sender));
        Subscription::with_poller(receiver, poller)
    }

    async fn create(&self, note: NewNote) -> Result<NoteId> {
        let response = self
            .request(Method::POST, self.config.collection_url())
            .json(&encode_new_note(&note))
            .send()
            .await?;
        let document: Document = read_json(response).await?;
        let id = document.id()?;

        tracing::info!("Created note {}", id);
        self.wake_pollers();
        Ok(id)
    }

    async fn merge_update(&self, id: &NoteId, patch: NotePatch) -> Result<()> {
        let mask: Vec<(&str, &str)> = PATCH_FIELD_PATHS
            .iter()
            .map(|path| ("updateMask.fieldPaths", *path))
            .collect();
        let response = self
            .request(Method::PATCH, self.config.document_url(id.as_str()))
            .query(&mask)
            .query(&[("currentDocument.exists", "true")])
            .json(&encode_patch(&patch))
            .send()
            .await?;
        check_status(response).await?;

        tracing::debug!("Merged update into note {}", id);
        self.wake_pollers();
        Ok(())
    }

    async fn delete(&self, id: &NoteId) -> Result<()> {
        let response = self
            .request(Method::DELETE, self.config.document_url(id.as_str()))
            .send()
            .await?;
        check_status(response).await?;

        tracing::info!("Deleted note {}", id);
        self.wake_pollers();
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(api_error(status, &body))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = check_status(response).await?.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn api_error(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorEnvelope>(body).map_or_else(
        |_| {
            let trimmed = compact_text(body);
            if trimmed.is_empty() {
                format!("HTTP {}", status.as_u16())
            } else {
                format!("{} ({})", trimmed, status.as_u16())
            }
        },
        |envelope| {
            let text = envelope
                .error
                .message
                .or(envelope.error.status)
                .unwrap_or_default();
            format!("{} ({})", compact_text(&text), status.as_u16())
        },
    );

    match status {
        StatusCode::NOT_FOUND => Error::NotFound(message),
        StatusCode::SERVICE_UNAVAILABLE => Error::Unavailable(message),
        _ => Error::Api(message),
    }
}
