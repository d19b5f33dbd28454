//! Free-text search (`q`)

use crate::support::*;
use axum::http::StatusCode;

#[tokio::test]
async fn token_match_is_case_insensitive_and_exclusive() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            create_case(
                app,
                &CaseBuilder::new("T-1")
                    .description("ESTATE MATTER")
                    .party("JOHN SMITH", "Petitioner", None)
                    .build(),
            )
            .await?;
            create_case(
                app,
                &CaseBuilder::new("T-2")
                    .description("ESTATE MATTER")
                    .party("JOHN JONES", "Petitioner", None)
                    .build(),
            )
            .await?;

            let (status, envelope) = app.get_json("/search?q=Smith").await?;
            assert_status(status, StatusCode::OK, "text search");
            assert_eq!(result_case_numbers(&envelope)?, vec!["T-1"]);
            assert_eq!(envelope["total_count"], 1);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn any_term_matches_and_more_terms_rank_higher() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_sample_cases(app).await?;

            let (_, envelope) = app.get_json("/search?q=john%20smith").await?;
            assert_eq!(result_case_numbers(&envelope)?, vec!["2024-DR-001234-O"]);

            let (_, envelope) = app.get_json("/search?q=smith%20rivera").await?;
            assert_eq!(envelope["total_count"], 2);
            assert_eq!(
                result_case_numbers(&envelope)?,
                vec!["2024-DR-001234-O", "2023-CV-000987-S"]
            );

            // One unknown term does not hide matches on the other
            let (_, envelope) = app.get_json("/search?q=rivera%20zebra").await?;
            assert_eq!(result_case_numbers(&envelope)?, vec!["2023-CV-000987-S"]);

            let (_, envelope) = app.get_json("/search?q=zebra%20giraffe").await?;
            assert_eq!(envelope["total_count"], 0);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn cases_matching_more_terms_rank_first() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            create_case(
                app,
                &CaseBuilder::new("M-ONE")
                    .description("SMITH vs. JONES")
                    .filed("2025-06-01")
                    .build(),
            )
            .await?;
            create_case(
                app,
                &CaseBuilder::new("M-BOTH")
                    .description("SMITH vs. ACME")
                    .filed("2021-06-01")
                    .build(),
            )
            .await?;

            let (_, envelope) = app.get_json("/search?q=smith%20acme").await?;
            assert_eq!(result_case_numbers(&envelope)?, vec!["M-BOTH", "M-ONE"]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn text_covers_documents_attorneys_and_accents() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_sample_cases(app).await?;

            let (_, envelope) = app.get_json("/search?q=complaint").await?;
            assert_eq!(result_case_numbers(&envelope)?, vec!["2025-CA-006779-O"]);

            let (_, envelope) = app.get_json("/search?q=gold").await?;
            assert_eq!(result_case_numbers(&envelope)?, vec!["2024-DR-001234-O"]);

            // Diacritics fold for text search
            let (_, envelope) = app.get_json("/search?q=pena").await?;
            assert_eq!(result_case_numbers(&envelope)?, vec!["2023-CV-000987-S"]);
            let (_, envelope) = app.get_json("/search?q=Pe%C3%B1a").await?;
            assert_eq!(result_case_numbers(&envelope)?, vec!["2023-CV-000987-S"]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn relevance_ranks_before_filing_date() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            create_case(
                app,
                &CaseBuilder::new("R-NEW")
                    .description("SMITH vs. ACME")
                    .filed("2025-01-01")
                    .build(),
            )
            .await?;
            create_case(
                app,
                &CaseBuilder::new("R-OLD")
                    .description("SMITH, JOHN vs. SMITH, JANE")
                    .party("JOHN SMITH", "Petitioner", None)
                    .party("JANE SMITH", "Respondent", None)
                    .filed("2020-01-01")
                    .build(),
            )
            .await?;

            let (_, envelope) = app.get_json("/search?q=smith").await?;
            assert_eq!(result_case_numbers(&envelope)?, vec!["R-OLD", "R-NEW"]);

            // Without a text query, newest filing first
            let (_, envelope) = app.get_json("/search?county=orange").await?;
            assert_eq!(result_case_numbers(&envelope)?, vec!["R-NEW", "R-OLD"]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn query_is_sanitized() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_sample_cases(app).await?;

            // Braces and dollar signs are stripped
            let (status, envelope) = app.get_json("/search?q=%7B%24smith%7D").await?;
            assert_status(status, StatusCode::OK, "operator characters");
            assert_eq!(result_case_numbers(&envelope)?, vec!["2024-DR-001234-O"]);

            // Whitespace-only query means no text clause
            let (_, envelope) = app.get_json("/search?q=%20%20").await?;
            assert_eq!(envelope["total_count"], 3);

            // SQL metacharacters are just text
            let (status, envelope) = app
                .get_json("/search?q=%27%3B%20DROP%20TABLE%20legal_cases%3B--")
                .await?;
            assert_status(status, StatusCode::OK, "quote injection");
            assert_eq!(envelope["total_count"], 0);
            Ok(())
        })
    })
    .await
}
