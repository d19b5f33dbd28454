//! Paging parameters and the envelope

use crate::support::*;
use axum::http::StatusCode;

/// Five Active cases filed in 2024 plus one older Pending case.
async fn seed_active_2024(app: &TestApp) -> anyhow::Result<()> {
    for (n, date) in [
        ("A-1", "2024-01-10"),
        ("A-2", "2024-02-10"),
        ("A-3", "2024-03-10"),
        ("A-4", "2024-04-10"),
        ("A-5", "2024-05-10"),
    ] {
        create_case(app, &CaseBuilder::new(n).status("Active").filed(date).build()).await?;
    }
    create_case(
        app,
        &CaseBuilder::new("P-1")
            .status("Pending")
            .filed("2023-06-01")
            .build(),
    )
    .await?;
    Ok(())
}

#[tokio::test]
async fn first_page_holds_most_recent_matches() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_active_2024(app).await?;

            let (status, envelope) = app
                .get_json("/search?status=Active&filed_date_from=2024-01-01&page=1&page_size=2")
                .await?;
            assert_status(status, StatusCode::OK, "page 1");
            assert_page(&envelope, 1, 2, 5, 3);
            assert_eq!(result_case_numbers(&envelope)?, vec!["A-5", "A-4"]);

            let (_, envelope) = app
                .get_json("/search?status=Active&filed_date_from=2024-01-01&page=3&page_size=2")
                .await?;
            assert_page(&envelope, 3, 2, 5, 3);
            assert_eq!(result_case_numbers(&envelope)?, vec!["A-1"]);
            assert_eq!(envelope["has_next"], false);
            assert_eq!(envelope["has_prev"], true);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn pages_past_the_end_are_empty_with_same_total() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_active_2024(app).await?;

            for page in [4, 5, 50] {
                let (status, envelope) = app
                    .get_json(&format!("/search?status=Active&page={page}&page_size=2"))
                    .await?;
                assert_status(status, StatusCode::OK, "beyond last page");
                assert!(result_case_numbers(&envelope)?.is_empty());
                assert_eq!(envelope["total_count"], 5);
                assert_eq!(envelope["total_pages"], 3);
            }
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn page_numbers_beyond_32_bits_are_empty_not_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_active_2024(app).await?;

            for page in ["5000000000", "9223372036854775807"] {
                let (status, envelope) = app
                    .get_json(&format!("/search?status=Active&page={page}&page_size=100"))
                    .await?;
                assert_status(status, StatusCode::OK, page);
                assert!(result_case_numbers(&envelope)?.is_empty());
                assert_eq!(envelope["page"].to_string(), page);
                assert_eq!(envelope["total_count"], 5);
                assert_eq!(envelope["has_next"], false);
                assert_eq!(envelope["has_prev"], true);
            }
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn empty_result_reports_one_page() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, envelope) = app.get_json("/search?county=nowhere").await?;
            assert_status(status, StatusCode::OK, "empty search");
            assert_page(&envelope, 1, 20, 0, 1);
            assert_eq!(envelope["has_next"], false);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn invalid_paging_is_rejected_before_searching() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            for (query, field) in [
                ("page=0", "page"),
                ("page=-1", "page"),
                ("page=abc", "page"),
                ("page_size=0", "page_size"),
                ("page_size=101", "page_size"),
            ] {
                let (status, body) = app.get_json(&format!("/search?{query}")).await?;
                assert_status(status, StatusCode::BAD_REQUEST, query);
                assert_error_field(&body, field);
            }

            let (status, _) = app.get_json("/search?page_size=100").await?;
            assert_status(status, StatusCode::OK, "max page size");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn oversized_page_size_is_clamped_when_configured() -> anyhow::Result<()> {
    with_test_app_with_config(
        |config| config.search.clamp_page_size = true,
        |app| {
            Box::pin(async move {
                let (status, envelope) = app.get_json("/search?page_size=500").await?;
                assert_status(status, StatusCode::OK, "clamped");
                assert_eq!(envelope["page_size"], 100);

                let (status, _) = app.get_json("/search?page_size=0").await?;
                assert_status(status, StatusCode::BAD_REQUEST, "zero still rejected");
                Ok(())
            })
        },
    )
    .await
}

#[tokio::test]
async fn configured_default_page_size_applies() -> anyhow::Result<()> {
    with_test_app_with_config(
        |config| config.search.default_page_size = 2,
        |app| {
            Box::pin(async move {
                seed_active_2024(app).await?;
                let (_, envelope) = app.get_json("/search").await?;
                assert_page(&envelope, 1, 2, 6, 3);
                Ok(())
            })
        },
    )
    .await
}
