//! Decoding of `WebRequestResult` payloads into typed responses.

use super::request::{ApiRequest, RequestContext};
use crate::domain::{Id, Item, LoadError, SearchResult, Section, SectionDetail, Stats};
use serde::de::DeserializeOwned;

/// Longest body excerpt kept in a [`LoadError::Status`].
const DETAIL_LIMIT: usize = 120;

/// A decoded response, tagged with the generation of the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub generation: u64,
    pub payload: Payload,
}

/// Outcome of one request. Every variant carries its own failure signal so a
/// failed load can be routed to the surface that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Stats(Result<Stats, LoadError>),
    Sections(Result<Vec<Section>, LoadError>),
    SectionDetail {
        section: Id,
        items: Result<Vec<Item>, LoadError>,
    },
    Item {
        section: Id,
        item: Id,
        result: Result<Item, LoadError>,
    },
    Search {
        query: String,
        results: Result<Vec<SearchResult>, LoadError>,
    },
}

impl Payload {
    /// The failure carried by this payload, if the load failed.
    #[must_use]
    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Stats(result) => result.as_ref().err(),
            Self::Sections(result) => result.as_ref().err(),
            Self::SectionDetail { items, .. } => items.as_ref().err(),
            Self::Item { result, .. } => result.as_ref().err(),
            Self::Search { results, .. } => results.as_ref().err(),
        }
    }
}

impl Response {
    /// Decodes a host result for the request described by `context`.
    ///
    /// A non-2xx status becomes [`LoadError::Status`] regardless of the body; a
    /// 2xx body that does not match the endpoint's shape becomes
    /// [`LoadError::Decode`].
    #[must_use]
    pub fn decode(status: u16, body: &[u8], context: &RequestContext) -> Self {
        let payload = match &context.request {
            ApiRequest::Stats => Payload::Stats(parse(status, body)),
            ApiRequest::Sections => Payload::Sections(parse(status, body)),
            ApiRequest::SectionDetail { section } => Payload::SectionDetail {
                section: section.clone(),
                items: parse::<SectionDetail>(status, body).map(|detail| detail.items),
            },
            ApiRequest::Item { section, item } => Payload::Item {
                section: section.clone(),
                item: item.clone(),
                result: parse(status, body),
            },
            ApiRequest::Search { query } => Payload::Search {
                query: query.clone(),
                results: parse(status, body),
            },
        };

        if let Some(err) = payload.error() {
            tracing::warn!(
                request = context.request.kind(),
                generation = context.generation,
                status,
                error = %err,
                "Load failed"
            );
        }

        Self {
            generation: context.generation,
            payload,
        }
    }
}

fn parse<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, LoadError> {
    if !(200..300).contains(&status) {
        let text = String::from_utf8_lossy(body);
        return Err(LoadError::Status {
            status,
            detail: text.chars().take(DETAIL_LIMIT).collect(),
        });
    }
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(request: ApiRequest) -> RequestContext {
        RequestContext {
            request,
            generation: 9,
            trace: None,
        }
    }

    #[test]
    fn sections_decode() {
        let body = br#"[{"id":"HSK1","name":"Books","icon":"📚","count":3,"category":"edu"}]"#;
        let response = Response::decode(200, body, &context(ApiRequest::Sections));
        assert_eq!(response.generation, 9);
        match response.payload {
            Payload::Sections(Ok(sections)) => {
                assert_eq!(sections.len(), 1);
                assert_eq!(sections[0].name, "Books");
                assert_eq!(sections[0].icon, "📚");
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn section_detail_unwraps_items() {
        let body = br#"{"section":{"id":"s1"},"items":[{"id":1,"title":"One","content":"BQAxyz"}]}"#;
        let request = ApiRequest::SectionDetail { section: Id::new("s1") };
        match Response::decode(200, body, &context(request)).payload {
            Payload::SectionDetail { section, items: Ok(items) } => {
                assert_eq!(section.as_str(), "s1");
                assert_eq!(items[0].id.as_str(), "1");
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn error_status_is_a_failure_even_with_json_body() {
        let body = br#"{"error":"Item not found"}"#;
        let request = ApiRequest::Item {
            section: Id::new("s1"),
            item: Id::new("99"),
        };
        let response = Response::decode(404, body, &context(request));
        assert!(response.payload.error().is_some());
        match response.payload {
            Payload::Item {
                result: Err(LoadError::Status { status, detail }),
                ..
            } => {
                assert_eq!(status, 404);
                assert!(detail.contains("Item not found"));
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_a_decode_failure() {
        let response = Response::decode(200, b"<html>", &context(ApiRequest::Stats));
        assert!(matches!(response.payload, Payload::Stats(Err(LoadError::Decode(_)))));
    }

    #[test]
    fn empty_search_results_are_success() {
        let request = ApiRequest::Search { query: "zzz".into() };
        let response = Response::decode(200, b"[]", &context(request));
        assert!(response.payload.error().is_none());
    }

    #[test]
    fn status_detail_is_truncated() {
        let body = "x".repeat(1000);
        match Response::decode(500, body.as_bytes(), &context(ApiRequest::Stats)).payload {
            Payload::Stats(Err(LoadError::Status { detail, .. })) => assert_eq!(detail.len(), DETAIL_LIMIT),
            other => panic!("unexpected payload {other:?}"),
        }
    }
}
