//! External log-viewer redirect links.
//!
//! Builds the redirect URL from a configured base plus the task identity.
//! The identifiers are opaque strings here; only query-string escaping is
//! applied.

use crate::metadata::TaskInstanceRef;

/// Build the external log-viewer URL for one attempt.
///
/// Appends `task_id`, `execution_date`, `try_number`, and (for mapped
/// tasks) `map_index` query parameters to `base`.
#[must_use]
pub fn external_log_url(base: &str, meta: &TaskInstanceRef) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    let mut url = format!(
        "{base}{separator}task_id={}&execution_date={}&try_number={}",
        urlencoding::encode(&meta.task_id),
        urlencoding::encode(&meta.execution_date),
        meta.try_number,
    );
    if let Some(index) = meta.map_index() {
        url.push_str(&format!("&map_index={index}"));
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn meta(map_index: i64) -> TaskInstanceRef {
        TaskInstanceRef {
            dag_id: "etl".to_owned(),
            dag_run_id: "scheduled__2024-01-01".to_owned(),
            task_id: "extract load".to_owned(),
            map_index,
            execution_date: "2024-01-01T00:00:00+00:00".to_owned(),
            try_number: 2,
            state: None,
        }
    }

    #[test]
    fn escapes_query_values() {
        let url = external_log_url("https://logs.example.com/redirect", &meta(-1));
        assert!(url.contains("task_id=extract%20load"), "url: {url}");
        assert!(
            url.contains("execution_date=2024-01-01T00%3A00%3A00%2B00%3A00"),
            "url: {url}"
        );
        assert!(url.contains("try_number=2"), "url: {url}");
        assert!(!url.contains("map_index"), "url: {url}");
    }

    #[test]
    fn mapped_task_carries_its_index() {
        let url = external_log_url("https://logs.example.com/redirect", &meta(4));
        assert!(url.ends_with("&map_index=4"), "url: {url}");
    }

    #[test]
    fn base_with_existing_query_uses_ampersand() {
        let url = external_log_url("https://logs.example.com/redirect?view=logs", &meta(-1));
        assert!(
            url.starts_with("https://logs.example.com/redirect?view=logs&task_id="),
            "url: {url}"
        );
    }
}
