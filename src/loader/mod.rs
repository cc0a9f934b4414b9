//! Data loader: typed requests to the content service and decoding of results.
//!
//! Requests leave the plugin as [`crate::app::Action::Fetch`] and are issued by
//! the Zellij shim with `web_request`. The host echoes the serialized
//! [`RequestContext`] back alongside the status and body, and
//! [`Response::decode`] turns the triple into a [`Response`] that the
//! application handler can apply.

pub mod request;
pub mod response;

pub use request::{ApiRequest, RequestContext, TraceContext};
pub use response::{Payload, Response};
