//! GET /search field filters
//!
//! Each filter narrows the result set; absent filters never exclude records.

use crate::support::*;
use axum::http::StatusCode;

async fn numbers(app: &TestApp, query: &str) -> anyhow::Result<Vec<String>> {
    let (status, envelope) = app.get_json(&format!("/search?{query}")).await?;
    assert_status(status, StatusCode::OK, query);
    result_case_numbers(&envelope)
}

#[tokio::test]
async fn no_filters_match_everything() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_sample_cases(app).await?;

            let (status, envelope) = app.get_json("/search").await?;
            assert_status(status, StatusCode::OK, "bare search");
            assert_page(&envelope, 1, 20, 3, 1);

            // Empty values behave like absent ones
            let (_, envelope) = app
                .get_json("/search?q=&county=&status=&filed_date_from=")
                .await?;
            assert_eq!(envelope["total_count"], 3);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn substring_filters_are_case_insensitive() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_sample_cases(app).await?;

            assert_eq!(
                numbers(app, "county=orange").await?,
                vec!["2025-CA-006779-O", "2024-DR-001234-O"]
            );
            assert_eq!(
                numbers(app, "judge_name=SANDOR").await?,
                vec!["2025-CA-006779-O"]
            );
            assert_eq!(
                numbers(app, "case_type=dissolution").await?,
                vec!["2024-DR-001234-O"]
            );
            assert_eq!(
                numbers(app, "case_number=000987").await?,
                vec!["2023-CV-000987-S"]
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn party_filters_match_any_party() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_sample_cases(app).await?;

            assert_eq!(
                numbers(app, "party_name=rivera").await?,
                vec!["2023-CV-000987-S"]
            );
            assert_eq!(
                numbers(app, "attorney_name=Lopez").await?,
                vec!["2025-CA-006779-O"]
            );
            assert!(numbers(app, "attorney_name=nobody").await?.is_empty());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn status_filter_is_exact_and_validated() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_sample_cases(app).await?;

            assert_eq!(
                numbers(app, "status=closed").await?,
                vec!["2023-CV-000987-S"]
            );

            let (status, body) = app.get_json("/search?status=Archived").await?;
            assert_status(status, StatusCode::BAD_REQUEST, "unknown status");
            assert_error_field(&body, "status");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn date_range_is_inclusive() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_sample_cases(app).await?;

            assert_eq!(
                numbers(app, "filed_date_from=2024-03-02").await?,
                vec!["2025-CA-006779-O", "2024-DR-001234-O"]
            );
            assert_eq!(
                numbers(app, "filed_date_to=2024-03-02").await?,
                vec!["2024-DR-001234-O", "2023-CV-000987-S"]
            );
            assert_eq!(
                numbers(app, "filed_date_from=2024-03-02&filed_date_to=2024-03-02").await?,
                vec!["2024-DR-001234-O"]
            );
            // An inverted range is empty, not an error
            assert!(numbers(app, "filed_date_from=2025-01-01&filed_date_to=2024-01-01")
                .await?
                .is_empty());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn malformed_dates_are_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            for (query, field) in [
                ("filed_date_from=2024-02-30", "filed_date_from"),
                ("filed_date_to=03/02/2024", "filed_date_to"),
            ] {
                let (status, body) = app.get_json(&format!("/search?{query}")).await?;
                assert_status(status, StatusCode::BAD_REQUEST, query);
                let detail = assert_error(&body, status, "validation_error")?;
                assert!(detail.contains("YYYY-MM-DD"), "{detail}");
                assert_error_field(&body, field);
            }
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn filters_combine_with_and() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_sample_cases(app).await?;

            assert_eq!(
                numbers(app, "county=orange&status=Active").await?,
                vec!["2024-DR-001234-O"]
            );
            assert!(numbers(app, "county=seminole&status=Active")
                .await?
                .is_empty());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn like_wildcards_are_literal() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_sample_cases(app).await?;
            create_case(
                app,
                &CaseBuilder::new("2024-CV-100%").county("Lake_County").build(),
            )
            .await?;

            assert_eq!(numbers(app, "county=%25").await?, Vec::<String>::new());
            assert_eq!(
                numbers(app, "county=_").await?,
                vec!["2024-CV-100%"]
            );
            assert_eq!(
                numbers(app, "case_number=100%25").await?,
                vec!["2024-CV-100%"]
            );
            Ok(())
        })
    })
    .await
}
