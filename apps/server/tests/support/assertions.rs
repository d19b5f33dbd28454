use anyhow::Context as _;
use axum::http::StatusCode;
use serde_json::Value;

/// Assert a response status, naming the step that produced it.
pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(
        actual, expected,
        "{context}: expected HTTP {expected}, got {actual}"
    );
}

/// Assert a standard error body and return its `detail`.
pub fn assert_error(body: &Value, status: StatusCode, error_code: &str) -> anyhow::Result<String> {
    assert_eq!(
        body["status_code"].as_u64(),
        Some(u64::from(status.as_u16())),
        "status_code in error body"
    );
    assert_eq!(body["error_code"].as_str(), Some(error_code), "error_code");
    assert!(body["timestamp"].is_string(), "timestamp must be present");
    body["detail"]
        .as_str()
        .map(str::to_string)
        .context("error detail is a string")
}

/// Assert the `field` of an InvalidField error body.
pub fn assert_error_field(body: &Value, field: &str) {
    assert_eq!(body["field"].as_str(), Some(field), "error field");
}

/// `case_number` of every result in an envelope, in order.
pub fn result_case_numbers(envelope: &Value) -> anyhow::Result<Vec<String>> {
    envelope["results"]
        .as_array()
        .context("results is an array")?
        .iter()
        .map(|case| {
            case["case_number"]
                .as_str()
                .map(str::to_string)
                .context("result has case_number")
        })
        .collect()
}

/// Assert envelope paging fields.
pub fn assert_page(
    envelope: &Value,
    page: u64,
    page_size: u64,
    total_count: u64,
    total_pages: u64,
) {
    assert_eq!(envelope["page"].as_u64(), Some(page), "page");
    assert_eq!(envelope["page_size"].as_u64(), Some(page_size), "page_size");
    assert_eq!(
        envelope["total_count"].as_u64(),
        Some(total_count),
        "total_count"
    );
    assert_eq!(
        envelope["total_pages"].as_u64(),
        Some(total_pages),
        "total_pages"
    );
}
