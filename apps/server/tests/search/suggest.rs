//! GET /search/suggest/{field}

use crate::support::*;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn suggestions_are_sorted_and_distinct() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_sample_cases(app).await?;
            // Repeats an existing county, judge and status
            create_case(
                app,
                &CaseBuilder::new("2024-CV-555")
                    .county("Orange")
                    .judge("Brian Sandor")
                    .status("Active")
                    .case_type("CV - Contract Dispute")
                    .build(),
            )
            .await?;

            let expectations = [
                ("counties", json!(["Orange", "Seminole"])),
                ("statuses", json!(["Active", "Closed", "Pending"])),
                (
                    "judges",
                    json!(["Alicia Chen", "Brian Sandor", "Maria Rodriguez"]),
                ),
                (
                    "case-types",
                    json!([
                        "CA - Auto Negligence",
                        "CV - Contract Dispute",
                        "DR - Dissolution of Marriage"
                    ]),
                ),
            ];
            for (field, expected) in expectations {
                let (status, body) = app.get_json(&format!("/search/suggest/{field}")).await?;
                assert_status(status, StatusCode::OK, field);
                assert_eq!(body, expected, "suggestions for {field}");
            }
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn empty_store_suggests_nothing() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.get_json("/search/suggest/judges").await?;
            assert_status(status, StatusCode::OK, "empty suggestions");
            assert_eq!(body, json!([]));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn unknown_field_is_not_found() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.get_json("/search/suggest/attorneys").await?;
            assert_status(status, StatusCode::NOT_FOUND, "unknown field");
            let detail = assert_error(&body, status, "not_found")?;
            assert!(detail.contains("attorneys"), "{detail}");
            Ok(())
        })
    })
    .await
}
