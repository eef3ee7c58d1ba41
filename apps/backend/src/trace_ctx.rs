//! Task-local trace context for web requests.
//!
//! `RequestTrace` establishes the scope; error responses and log lines read the
//! id back out. Outside of a request the id is `"unknown"`.

use tokio::task_local;

const UNKNOWN: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Get the trace_id for the current task.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

/// Run a future within a trace context.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trace_id_outside_context_is_unknown() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn trace_id_is_visible_inside_scope_only() {
        let id = "trace-abc".to_string();

        let seen = with_trace_id(id.clone(), async { trace_id() }).await;

        assert_eq!(seen, id);
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn nested_scope_shadows_outer() {
        let seen = with_trace_id("outer".to_string(), async {
            let inner = with_trace_id("inner".to_string(), async { trace_id() }).await;
            (inner, trace_id())
        })
        .await;

        assert_eq!(seen, ("inner".to_string(), "outer".to_string()));
    }
}
