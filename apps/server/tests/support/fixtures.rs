use super::{assert_status, to_json_body, CaseBuilder, TestApp};
use anyhow::Context as _;
use axum::http::{Method, StatusCode};
use serde_json::Value;

/// POST a case payload and return the created record.
pub async fn create_case(app: &TestApp, body: &Value) -> anyhow::Result<Value> {
    let (status, _headers, bytes) = app
        .request(Method::POST, "/cases", Some(to_json_body(body)?))
        .await?;
    assert_status(status, StatusCode::CREATED, "create case");
    serde_json::from_slice(&bytes).context("parse created case")
}

/// Identifier of a created record.
pub fn case_id(case: &Value) -> anyhow::Result<String> {
    case["id"]
        .as_str()
        .map(str::to_string)
        .context("created case has id")
}

/// Three cases shaped like crawled court records.
pub fn sample_cases() -> Vec<Value> {
    vec![
        CaseBuilder::new("2025-CA-006779-O")
            .description("AUGUSTE, LUCIE vs. SIMONET, CHARLENE M.")
            .case_type("CA - Auto Negligence")
            .status("Pending")
            .judge("Brian Sandor")
            .filed("2025-07-17")
            .county("Orange")
            .party("LUCIE AUGUSTE", "Plaintiff", Some("MARCUS A. LOPEZ"))
            .party("CHARLENE M. SIMONET", "Defendant", None)
            .document("Complaint", 12, "2025-07-17")
            .build(),
        CaseBuilder::new("2024-DR-001234-O")
            .description("IN RE: THE MARRIAGE OF SMITH, JOHN AND SMITH, JANE")
            .case_type("DR - Dissolution of Marriage")
            .status("Active")
            .judge("Alicia Chen")
            .filed("2024-03-02")
            .county("Orange")
            .party("JOHN SMITH", "Petitioner", Some("RACHEL GOLD"))
            .party("JANE SMITH", "Respondent", None)
            .build(),
        CaseBuilder::new("2023-CV-000987-S")
            .description("ACME SUPPLY CO vs. RIVERA, DANIEL")
            .case_type("CV - Contract Dispute")
            .status("Closed")
            .judge("Maria Rodriguez")
            .filed("2023-11-20")
            .county("Seminole")
            .party("ACME SUPPLY CO", "Plaintiff", Some("PEÑA & ASSOCIATES"))
            .party("DANIEL RIVERA", "Defendant", None)
            .build(),
    ]
}

/// Create [`sample_cases`] and return them as created.
pub async fn seed_sample_cases(app: &TestApp) -> anyhow::Result<Vec<Value>> {
    let mut created = Vec::new();
    for body in sample_cases() {
        created.push(create_case(app, &body).await?);
    }
    Ok(created)
}
