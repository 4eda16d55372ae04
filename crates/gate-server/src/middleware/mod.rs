//! Tower middleware applied to every route.
//!
//! - `RequestIdLayer` assigns or propagates `x-request-id`
//! - `request_logging` wraps each request in a span and logs its outcome

mod logging;
mod request_id;

pub use logging::request_logging;
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdLayer, RequestIdService};
