//! Outgoing requests to the content service and their round-trip context.
//!
//! Zellij performs web requests on the host and later delivers a
//! `WebRequestResult` event carrying the same context map that was passed in.
//! [`RequestContext`] is that map in typed form: it identifies the endpoint,
//! the generation token used to discard stale responses, and the trace context
//! of the span that issued the request.

use crate::domain::Id;
use std::collections::BTreeMap;

/// Marker stored in every context map so foreign results can be ignored.
const ORIGIN: &str = "maktaba";

const KEY_ORIGIN: &str = "origin";
const KEY_REQUEST: &str = "request";
const KEY_GENERATION: &str = "generation";
const KEY_SECTION: &str = "section";
const KEY_ITEM: &str = "item";
const KEY_QUERY: &str = "query";
const KEY_TRACE_ID: &str = "trace_id";
const KEY_PARENT_SPAN_ID: &str = "parent_span_id";

/// One read operation against the content service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// `GET /api/stats`
    Stats,
    /// `GET /api/sections`
    Sections,
    /// `GET /api/section/{id}`
    SectionDetail {
        /// Section whose items are requested.
        section: Id,
    },
    /// `GET /api/item/{section}/{item}`
    Item {
        /// Section owning the item.
        section: Id,
        /// Item identifier, scoped to the section.
        item: Id,
    },
    /// `GET /api/search?q={query}`
    Search {
        /// Trimmed, non-empty query text.
        query: String,
    },
}

impl ApiRequest {
    /// Short name used in logs and in the context map.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Stats => "stats",
            Self::Sections => "sections",
            Self::SectionDetail { .. } => "section",
            Self::Item { .. } => "item",
            Self::Search { .. } => "search",
        }
    }

    /// Path and query string, with identifiers and query percent-encoded.
    ///
    /// ```
    /// use maktaba::loader::ApiRequest;
    ///
    /// let search = ApiRequest::Search { query: "كلمة two".to_string() };
    /// assert_eq!(search.path(), "/api/search?q=%D9%83%D9%84%D9%85%D8%A9%20two");
    /// ```
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Stats => "/api/stats".to_string(),
            Self::Sections => "/api/sections".to_string(),
            Self::SectionDetail { section } => {
                format!("/api/section/{}", urlencoding::encode(section.as_str()))
            }
            Self::Item { section, item } => format!(
                "/api/item/{}/{}",
                urlencoding::encode(section.as_str()),
                urlencoding::encode(item.as_str())
            ),
            Self::Search { query } => format!("/api/search?q={}", urlencoding::encode(query)),
        }
    }

    /// Absolute URL against the configured service base.
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

/// Distributed tracing context carried across the host round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,
    /// Span that issued the request.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace context of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            None
        }
    }

    /// Re-attaches this context as the remote parent for the current thread.
    ///
    /// The returned guard must be held while the response is processed.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;
        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(opentelemetry::Context::current().with_remote_span_context(span_context).attach())
    }
}

/// Typed form of the context map attached to a web request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// The request that was issued.
    pub request: ApiRequest,
    /// Generation token of the surface that issued it.
    pub generation: u64,
    /// Trace context of the issuing span.
    pub trace: Option<TraceContext>,
}

impl RequestContext {
    /// Creates a context for `request`, capturing the current trace context.
    #[must_use]
    pub fn new(request: ApiRequest, generation: u64) -> Self {
        Self {
            request,
            generation,
            trace: TraceContext::from_current(),
        }
    }

    /// Serializes into the string map Zellij echoes back with the result.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(KEY_ORIGIN.to_string(), ORIGIN.to_string());
        map.insert(KEY_REQUEST.to_string(), self.request.kind().to_string());
        map.insert(KEY_GENERATION.to_string(), self.generation.to_string());

        match &self.request {
            ApiRequest::Stats | ApiRequest::Sections => {}
            ApiRequest::SectionDetail { section } => {
                map.insert(KEY_SECTION.to_string(), section.to_string());
            }
            ApiRequest::Item { section, item } => {
                map.insert(KEY_SECTION.to_string(), section.to_string());
                map.insert(KEY_ITEM.to_string(), item.to_string());
            }
            ApiRequest::Search { query } => {
                map.insert(KEY_QUERY.to_string(), query.clone());
            }
        }

        if let Some(trace) = &self.trace {
            map.insert(KEY_TRACE_ID.to_string(), trace.trace_id.clone());
            map.insert(KEY_PARENT_SPAN_ID.to_string(), trace.parent_span_id.clone());
        }

        map
    }

    /// Rebuilds a context from an echoed map.
    ///
    /// Returns `None` for maps that were not produced by [`Self::to_map`], such
    /// as results of requests issued by other code paths.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        if map.get(KEY_ORIGIN).map(String::as_str) != Some(ORIGIN) {
            return None;
        }

        let generation = map.get(KEY_GENERATION)?.parse::<u64>().ok()?;
        let field = |key: &str| map.get(key).cloned();

        let request = match map.get(KEY_REQUEST)?.as_str() {
            "stats" => ApiRequest::Stats,
            "sections" => ApiRequest::Sections,
            "section" => ApiRequest::SectionDetail {
                section: Id::new(field(KEY_SECTION)?),
            },
            "item" => ApiRequest::Item {
                section: Id::new(field(KEY_SECTION)?),
                item: Id::new(field(KEY_ITEM)?),
            },
            "search" => ApiRequest::Search {
                query: field(KEY_QUERY)?,
            },
            _ => return None,
        };

        let trace = match (field(KEY_TRACE_ID), field(KEY_PARENT_SPAN_ID)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id,
                parent_span_id,
            }),
            _ => None,
        };

        Some(Self {
            request,
            generation,
            trace,
        })
    }
}
