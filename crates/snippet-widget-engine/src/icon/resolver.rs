use super::{IconError, IconFetcher, data_uri, is_data_uri};
use crate::models::Icon;

/// Monotonic identifier for an icon request within one resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A fetch the host should perform, off the event loop if it likes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRequest {
    pub id: RequestId,
    pub url: String,
}

impl IconRequest {
    pub fn respond(self, result: Result<Vec<u8>, IconError>) -> IconResponse {
        IconResponse {
            id: self.id,
            url: self.url,
            result,
        }
    }

    /// Runs the fetch synchronously and packages the outcome.
    pub fn fetch_with(self, fetcher: &dyn IconFetcher) -> IconResponse {
        let result = fetcher.fetch(&self.url);
        self.respond(result)
    }
}

/// The single outcome of an [`IconRequest`].
#[derive(Debug)]
pub struct IconResponse {
    pub id: RequestId,
    pub url: String,
    pub result: Result<Vec<u8>, IconError>,
}

/// What submitting an icon URL asks the caller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Same URL as the icon already shown or already being fetched.
    Unchanged,
    /// Input emptied: drop the icon.
    Cleared,
    /// The URL is itself a data URI, no fetch needed.
    Immediate(Icon),
    /// Dispatch this request and feed the response to [`IconResolver::complete`].
    Fetch(IconRequest),
}

/// How a completed request affects the model.
#[derive(Debug)]
pub enum Resolution {
    Resolved(Icon),
    Failed(IconError),
    /// The input moved on since the request was issued; ignore it.
    Stale,
}

/// Tracks which icon URL is current and which fetch, if any, may still
/// update the model.
///
/// Only the latest request is authoritative. A response is applied when it
/// answers the request still pending; anything else is stale, including an
/// older request for a URL that was typed again.
#[derive(Debug, Default)]
pub struct IconResolver {
    next_id: u64,
    pending: Option<IconRequest>,
    resolved_url: Option<String>,
}

impl IconResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver whose model already shows the icon fetched from `url`.
    pub fn with_resolved(url: impl Into<String>) -> Self {
        Self {
            resolved_url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn pending(&self) -> Option<&IconRequest> {
        self.pending.as_ref()
    }

    pub fn resolved_url(&self) -> Option<&str> {
        self.resolved_url.as_deref()
    }

    /// Records a new value of the icon URL input.
    pub fn submit(&mut self, url: &str) -> Submission {
        let url = url.trim();

        if url.is_empty() {
            if let Some(request) = self.pending.take() {
                log::debug!("icon input cleared, dropping request {}", request.id.0);
            }
            self.resolved_url = None;
            return Submission::Cleared;
        }

        let pending_same = self.pending.as_ref().is_some_and(|r| r.url == url);
        let resolved_same = self.pending.is_none() && self.resolved_url.as_deref() == Some(url);
        if pending_same || resolved_same {
            return Submission::Unchanged;
        }

        if is_data_uri(url) {
            self.pending = None;
            self.resolved_url = Some(url.to_string());
            return Submission::Immediate(Icon::from_data_uri(url));
        }

        self.next_id += 1;
        let request = IconRequest {
            id: RequestId(self.next_id),
            url: url.to_string(),
        };
        log::debug!("requesting icon {} for {}", request.id.0, request.url);
        self.pending = Some(request.clone());
        Submission::Fetch(request)
    }

    /// Applies a finished fetch, discarding it if the input has moved on.
    pub fn complete(&mut self, response: IconResponse) -> Resolution {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.id == response.id && pending.url == response.url);
        if !current {
            log::debug!(
                "ignoring stale icon response {} for {}",
                response.id.0,
                response.url
            );
            return Resolution::Stale;
        }
        self.pending = None;

        match response.result {
            Ok(bytes) if bytes.is_empty() => Resolution::Failed(IconError::Empty(response.url)),
            Ok(bytes) => {
                let icon = Icon::new(response.url.clone(), data_uri(&bytes));
                self.resolved_url = Some(response.url);
                Resolution::Resolved(icon)
            }
            Err(err) => Resolution::Failed(err),
        }
    }
}
