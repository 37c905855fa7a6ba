use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::counters::RequestCounters;

/// Counts every inbound request, API and static alike, then passes it on.
///
/// Side effects only: this middleware never short-circuits, never rejects
/// and never blocks a request.
pub async fn count_requests(
    State(counters): State<RequestCounters>,
    request: Request,
    next: Next,
) -> Response {
    counters.record();
    next.run(request).await
}
