// tests/e2e_http.rs
use axum::http::StatusCode;
use gazette_core::application::{commands::articles::CreateArticleCommand, services::ServiceSettings};
use tower::util::ServiceExt as _;

mod support;

use support::{ALICE_TOKEN, RequestBuilder, STAFF_TOKEN};

#[tokio::test]
async fn health_returns_ok() {
    let state = support::build_test_state();
    let app = support::make_test_router(&state);

    let resp = app.oneshot(RequestBuilder::get("/health").build()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(support::read_json(resp).await["status"], "ok");

    let direct = gazette_core::presentation::http::routes::health().await;
    assert_eq!(direct.0.status, "ok");
}

#[tokio::test]
async fn article_page_counts_one_view_per_visit() {
    let state = support::build_test_state();
    let article = support::seed_simple_article(&state, "Counted").await;
    let app = support::make_test_router(&state);
    let page = format!("/api/v1/articles/{}", article.slug);

    let resp = app.clone().oneshot(RequestBuilder::get(&page).build()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = support::read_json(resp).await;
    assert_eq!(json["article"]["views"], 1);
    assert!(json.get("flash").is_none());

    // the comment listing is not a page view
    let resp = app
        .clone()
        .oneshot(RequestBuilder::get(format!("{page}/comments")).build())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.clone().oneshot(RequestBuilder::get(&page).build()).await.unwrap();
    assert_eq!(support::read_json(resp).await["article"]["views"], 2);
}

#[tokio::test]
async fn article_page_lists_popular_articles_without_itself() {
    let state = support::build_test_state();
    let main = support::seed_simple_article(&state, "Main").await;
    let hot = support::seed_simple_article(&state, "Hot").await;
    support::seed_simple_article(&state, "Cold").await;
    let app = support::make_test_router(&state);

    for _ in 0..3 {
        app.clone()
            .oneshot(RequestBuilder::get(format!("/api/v1/articles/{}", hot.slug)).build())
            .await
            .unwrap();
    }

    let resp = app
        .oneshot(RequestBuilder::get(format!("/api/v1/articles/{}", main.slug)).build())
        .await
        .unwrap();
    let json = support::read_json(resp).await;
    let popular = json["popular_articles"].as_array().unwrap();
    assert_eq!(popular.len(), 2);
    assert_eq!(popular[0]["slug"], hot.slug);
    assert!(popular.iter().all(|entry| entry["slug"] != main.slug));
}

#[tokio::test]
async fn drafts_are_not_served() {
    let state = support::build_test_state();
    let command = CreateArticleCommand::builder()
        .title("Unfinished")
        .text("wip")
        .publish(false)
        .build()
        .unwrap();
    let draft = support::seed_article(&state, command).await;
    let app = support::make_test_router(&state);

    let resp = app
        .clone()
        .oneshot(RequestBuilder::get(format!("/api/v1/articles/{}", draft.slug)).build())
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;

    let resp = app.oneshot(RequestBuilder::get("/api/v1/articles").build()).await.unwrap();
    assert_eq!(support::read_json(resp).await["total_items"], 0);
}

#[tokio::test]
async fn listing_clamps_out_of_range_pages() {
    let state = support::build_test_state_with(ServiceSettings {
        articles_per_page: 3,
        ..ServiceSettings::default()
    });
    for title in ["One", "Two", "Three", "Four"] {
        support::seed_simple_article(&state, title).await;
    }
    let app = support::make_test_router(&state);

    let cases = [
        ("/api/v1/articles", 1, 3),
        ("/api/v1/articles?page=abc", 1, 3),
        ("/api/v1/articles?page=2", 2, 1),
        ("/api/v1/articles?page=99", 2, 1),
        ("/api/v1/articles?page=0", 2, 1),
    ];
    for (uri, page, items) in cases {
        let resp = app.clone().oneshot(RequestBuilder::get(uri).build()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let json = support::read_json(resp).await;
        assert_eq!(json["page"], page, "{uri}");
        assert_eq!(json["items"].as_array().unwrap().len(), items, "{uri}");
        assert_eq!(json["total_pages"], 2);
        assert_eq!(json["total_items"], 4);
    }
}

#[tokio::test]
async fn listing_is_newest_first_with_comment_counts() {
    let state = support::build_test_state();
    let older = support::seed_simple_article(&state, "Older").await;
    let newer = support::seed_simple_article(&state, "Newer").await;
    support::seed_comment(&state, &support::alice(), &older.slug, "hi", None).await;
    let app = support::make_test_router(&state);

    let resp = app.oneshot(RequestBuilder::get("/api/v1/articles").build()).await.unwrap();
    let json = support::read_json(resp).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items[0]["slug"], newer.slug);
    assert_eq!(items[1]["slug"], older.slug);
    assert_eq!(items[1]["comments_count"], 1);
    assert_eq!(json["has_next"], false);
    assert_eq!(json["has_previous"], false);
}

#[tokio::test]
async fn tag_and_category_filters() {
    let state = support::build_test_state();
    support::seed_tag(&state, "Rust").await;
    support::seed_category(&state, "Reviews").await;
    let tagged = CreateArticleCommand::builder()
        .title("Tagged")
        .text("body")
        .tag("rust")
        .category("reviews")
        .build()
        .unwrap();
    let tagged = support::seed_article(&state, tagged).await;
    support::seed_simple_article(&state, "Plain").await;
    let app = support::make_test_router(&state);

    for uri in [
        "/api/v1/articles?tag=rust",
        "/api/v1/articles?category=reviews",
        "/api/v1/tags/rust/articles",
    ] {
        let resp = app.clone().oneshot(RequestBuilder::get(uri).build()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let json = support::read_json(resp).await;
        assert_eq!(json["total_items"], 1, "{uri}");
        assert_eq!(json["items"][0]["slug"], tagged.slug, "{uri}");
        assert_eq!(json["items"][0]["tags"][0]["color"], "#3498db");
    }

    // an unknown tag in the listing filter is an empty page
    let resp = app
        .clone()
        .oneshot(RequestBuilder::get("/api/v1/articles?tag=missing").build())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = support::read_json(resp).await;
    assert_eq!(json["total_items"], 0);
    assert_eq!(json["page"], 1);

    let resp = app
        .clone()
        .oneshot(RequestBuilder::get("/api/v1/articles?category=missing").build())
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;

    let resp = app
        .oneshot(RequestBuilder::get("/api/v1/tags/missing/articles").build())
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}

#[tokio::test]
async fn creating_articles_needs_staff() {
    let state = support::build_test_state();
    let app = support::make_test_router(&state);
    let body = serde_json::json!({
        "title": "Hello World",
        "blocks": [{ "block_type": "text", "content": "Hi" }]
    });

    let resp = app
        .clone()
        .oneshot(RequestBuilder::post("/api/v1/articles").json(body.clone()).build())
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post("/api/v1/articles")
                .token(ALICE_TOKEN)
                .json(body.clone())
                .build(),
        )
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;

    for expected_slug in ["hello-world", "hello-world-1"] {
        let resp = app
            .clone()
            .oneshot(
                RequestBuilder::post("/api/v1/articles")
                    .token(STAFF_TOKEN)
                    .json(body.clone())
                    .build(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let json = support::read_json(resp).await;
        assert_eq!(json["slug"], expected_slug);
        assert_eq!(json["author"], "editor");
        assert_eq!(json["published"], true);
        assert_eq!(json["blocks"][0]["content"], "Hi");
    }
}

#[tokio::test]
async fn unknown_block_type_is_a_bad_request() {
    let state = support::build_test_state();
    let app = support::make_test_router(&state);

    let resp = app
        .oneshot(
            RequestBuilder::post("/api/v1/articles")
                .token(STAFF_TOKEN)
                .json(serde_json::json!({
                    "title": "Odd",
                    "blocks": [{ "block_type": "video", "content": "?" }]
                }))
                .build(),
        )
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn tags_and_categories_are_managed_by_staff() {
    let state = support::build_test_state();
    let app = support::make_test_router(&state);

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post("/api/v1/tags")
                .token(STAFF_TOKEN)
                .json(serde_json::json!({ "name": "Game News", "color": "#ff0000" }))
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let json = support::read_json(resp).await;
    assert_eq!(json["slug"], "game-news");
    assert_eq!(json["color"], "#ff0000");

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post("/api/v1/tags")
                .token(STAFF_TOKEN)
                .json(serde_json::json!({ "name": "Game News" }))
                .build(),
        )
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::CONFLICT, "Conflict").await;

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post("/api/v1/categories")
                .token(ALICE_TOKEN)
                .json(serde_json::json!({ "name": "Reviews" }))
                .build(),
        )
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post("/api/v1/categories")
                .token(STAFF_TOKEN)
                .json(serde_json::json!({ "name": "Reviews" }))
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.clone().oneshot(RequestBuilder::get("/api/v1/tags").build()).await.unwrap();
    let tags = support::read_json(resp).await;
    assert_eq!(tags.as_array().unwrap().len(), 1);

    let resp = app.oneshot(RequestBuilder::get("/api/v1/categories").build()).await.unwrap();
    let categories = support::read_json(resp).await;
    assert_eq!(categories[0]["slug"], "reviews");
}
