//! The same API against the PostgreSQL store.
//!
//! Each test gets its own schema with migrations applied. Tests pass without
//! running anything when no test database is configured.

use crate::support::*;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn crud_lifecycle() -> anyhow::Result<()> {
    with_postgres_test_app(|app| {
        Box::pin(async move {
            let created = create_case(
                app,
                &CaseBuilder::new("2024-CV-1")
                    .party("JOHN DOE", "Plaintiff", Some("RACHEL GOLD"))
                    .document("Complaint", 4, "01/15/2024")
                    .build(),
            )
            .await?;
            let id = case_id(&created)?;
            assert_eq!(created["documents"][0]["date"], "2024-01-15");

            let (status, fetched) = app.get_json(&format!("/cases/{id}")).await?;
            assert_status(status, StatusCode::OK, "read");
            assert_eq!(fetched["case_number"], "2024-CV-1");
            assert_eq!(fetched["parties"], created["parties"]);

            let (status, by_number) = app.get_json("/cases/case-number/2024-CV-1").await?;
            assert_status(status, StatusCode::OK, "read by number");
            assert_eq!(by_number["id"], created["id"]);

            let (status, _, bytes) = app
                .request(
                    Method::PUT,
                    &format!("/cases/{id}"),
                    Some(to_json_body(&json!({"status": "Closed", "county": "Lake"}))?),
                )
                .await?;
            assert_status(status, StatusCode::OK, "update");
            let updated: serde_json::Value = serde_json::from_slice(&bytes)?;
            assert_eq!(updated["status"], "Closed");
            assert_eq!(updated["judge_name"], created["judge_name"]);

            let (_, stored) = app.get_json(&format!("/cases/{id}")).await?;
            assert_eq!(stored["county"], "Lake");

            let (status, _, _) = app
                .request(Method::DELETE, &format!("/cases/{id}"), None)
                .await?;
            assert_status(status, StatusCode::NO_CONTENT, "delete");

            let (status, body) = app.get_json(&format!("/cases/{id}")).await?;
            assert_status(status, StatusCode::NOT_FOUND, "read after delete");
            assert_error(&body, status, "not_found")?;
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn case_number_is_unique() -> anyhow::Result<()> {
    with_postgres_test_app(|app| {
        Box::pin(async move {
            create_case(app, &CaseBuilder::new("2024-CV-1").build()).await?;
            let second = create_case(app, &CaseBuilder::new("2024-CV-2").build()).await?;

            let (status, _, bytes) = app
                .request(
                    Method::POST,
                    "/cases",
                    Some(to_json_body(&CaseBuilder::new("2024-CV-1").build())?),
                )
                .await?;
            assert_status(status, StatusCode::CONFLICT, "duplicate create");
            let body: serde_json::Value = serde_json::from_slice(&bytes)?;
            let detail = assert_error(&body, status, "conflict")?;
            assert!(detail.contains("2024-CV-1"), "{detail}");

            let (status, _, _) = app
                .request(
                    Method::PUT,
                    &format!("/cases/{}", case_id(&second)?),
                    Some(to_json_body(&json!({"case_number": "2024-CV-1"}))?),
                )
                .await?;
            assert_status(status, StatusCode::CONFLICT, "update onto taken number");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn search_filters_text_and_paging() -> anyhow::Result<()> {
    with_postgres_test_app(|app| {
        Box::pin(async move {
            seed_sample_cases(app).await?;

            let (status, envelope) = app.get_json("/search?county=orange&page_size=1").await?;
            assert_status(status, StatusCode::OK, "county search");
            assert_page(&envelope, 1, 1, 2, 2);
            assert_eq!(result_case_numbers(&envelope)?, vec!["2025-CA-006779-O"]);

            let (_, envelope) = app.get_json("/search?q=Smith").await?;
            assert_eq!(result_case_numbers(&envelope)?, vec!["2024-DR-001234-O"]);

            let (_, envelope) = app.get_json("/search?q=pena").await?;
            assert_eq!(result_case_numbers(&envelope)?, vec!["2023-CV-000987-S"]);

            let (_, envelope) = app
                .get_json("/search?filed_date_from=2024-03-02&filed_date_to=2024-03-02")
                .await?;
            assert_eq!(result_case_numbers(&envelope)?, vec!["2024-DR-001234-O"]);

            let (_, envelope) = app.get_json("/search?attorney_name=lopez").await?;
            assert_eq!(result_case_numbers(&envelope)?, vec!["2025-CA-006779-O"]);

            let (_, envelope) = app.get_json("/search?county=%25").await?;
            assert_eq!(envelope["total_count"], 0);

            let (_, envelope) = app.get_json("/search?page=9").await?;
            assert_eq!(envelope["total_count"], 3);
            assert!(result_case_numbers(&envelope)?.is_empty());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn advanced_search_and_suggestions() -> anyhow::Result<()> {
    with_postgres_test_app(|app| {
        Box::pin(async move {
            seed_sample_cases(app).await?;

            let (status, envelope) = app
                .get_json("/search/advanced?statuses=Pending,Closed&counties=orange,seminole")
                .await?;
            assert_status(status, StatusCode::OK, "advanced");
            assert_eq!(
                result_case_numbers(&envelope)?,
                vec!["2025-CA-006779-O", "2023-CV-000987-S"]
            );

            let (_, envelope) = app
                .get_json("/search/advanced?parties=smith&text_query=marriage")
                .await?;
            assert_eq!(result_case_numbers(&envelope)?, vec!["2024-DR-001234-O"]);

            let (status, counties) = app.get_json("/search/suggest/counties").await?;
            assert_status(status, StatusCode::OK, "suggest");
            assert_eq!(counties, json!(["Orange", "Seminole"]));

            let (_, statuses) = app.get_json("/search/suggest/statuses").await?;
            assert_eq!(statuses, json!(["Active", "Closed", "Pending"]));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn health_reports_postgres() -> anyhow::Result<()> {
    with_postgres_test_app(|app| {
        Box::pin(async move {
            let (status, body) = app.get_json("/health").await?;
            assert_status(status, StatusCode::OK, "health");
            assert_eq!(body["database"], "connected");
            assert_eq!(body["backend"], "postgres");
            Ok(())
        })
    })
    .await
}
