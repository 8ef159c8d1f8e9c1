//! Request accounting middleware.
//! Counts every accepted request and tracks it as a live handler task.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::node::Node;

pub async fn accounting_middleware(
    State(node): State<Node>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let _live = node.enter_task();
    node.record_request();
    next.run(req).await
}
