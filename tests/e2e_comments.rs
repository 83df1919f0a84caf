// tests/e2e_comments.rs
use axum::http::StatusCode;
use gazette_core::application::commands::articles::CreateArticleCommand;
use tower::util::ServiceExt as _;

mod support;

use support::{ALICE_TOKEN, BOB_TOKEN, RequestBuilder, STAFF_TOKEN};

async fn comments_of(app: &axum::Router, slug: &str) -> serde_json::Value {
    let resp = app
        .clone()
        .oneshot(RequestBuilder::get(format!("/api/v1/articles/{slug}/comments")).build())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    support::read_json(resp).await
}

/// A member comments, another member replies, and both show up as one thread.
#[tokio::test]
async fn reply_is_listed_under_its_root() {
    let state = support::build_test_state();
    let article = support::seed_simple_article(&state, "Launch Day").await;
    let app = support::make_test_router(&state);
    let uri = format!("/api/v1/articles/{}/comments", article.slug);

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post(&uri)
                .token(ALICE_TOKEN)
                .xhr()
                .field("content", "First!")
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = support::read_json(resp).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Your comment has been added!");
    let root_id = json["comment_id"].as_i64().expect("comment id");

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post(&uri)
                .token(BOB_TOKEN)
                .xhr()
                .field("content", "Welcome")
                .field("parent", root_id)
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let listing = comments_of(&app, &article.slug).await;
    assert_eq!(listing["count"], 2);
    let threads = listing["comments"].as_array().unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0]["id"], root_id);
    assert_eq!(threads[0]["author"], "alice");
    assert_eq!(threads[0]["is_reply"], false);
    let replies = threads[0]["replies"].as_array().unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["author"], "bob");
    assert_eq!(replies[0]["parent_id"], root_id);
    assert_eq!(replies[0]["is_reply"], true);
}

#[tokio::test]
async fn anonymous_script_submission_gets_401_payload() {
    let state = support::build_test_state();
    let article = support::seed_simple_article(&state, "Patch Notes").await;
    let app = support::make_test_router(&state);

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post(format!("/api/v1/articles/{}/comments", article.slug))
                .xhr()
                .field("content", "hello")
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let json = support::read_json(resp).await;
    assert_eq!(json["success"], false);

    assert_eq!(comments_of(&app, &article.slug).await["count"], 0);
}

#[tokio::test]
async fn anonymous_page_submission_redirects_with_error_flash() {
    let state = support::build_test_state();
    let article = support::seed_simple_article(&state, "Patch Notes").await;
    let app = support::make_test_router(&state);
    let page = format!("/api/v1/articles/{}", article.slug);

    let resp = app
        .clone()
        .oneshot(RequestBuilder::post(&page).field("content", "hello").build())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(support::location(&resp), page);
    let cookie = support::set_cookie_pair(&resp).expect("flash cookie");

    let resp = app
        .clone()
        .oneshot(RequestBuilder::get(&page).cookie(cookie).build())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = support::set_cookie_pair(&resp).expect("cleared cookie");
    assert_eq!(cleared, "flash=");
    let json = support::read_json(resp).await;
    assert_eq!(json["flash"]["level"], "error");
    assert_eq!(json["flash"]["message"], "You must be signed in to comment.");
}

#[tokio::test]
async fn page_submission_success_redirects_with_success_flash() {
    let state = support::build_test_state();
    let article = support::seed_simple_article(&state, "Review").await;
    let app = support::make_test_router(&state);
    let page = format!("/api/v1/articles/{}", article.slug);

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post(format!("{page}/comments"))
                .token(ALICE_TOKEN)
                .field("content", "Great read")
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(support::location(&resp), page);
    let cookie = support::set_cookie_pair(&resp).expect("flash cookie");

    let resp = app
        .clone()
        .oneshot(RequestBuilder::get(&page).cookie(cookie).build())
        .await
        .unwrap();
    let json = support::read_json(resp).await;
    assert_eq!(json["flash"]["level"], "success");
    assert_eq!(json["comments_count"], 1);
    assert_eq!(json["comments"][0]["content"], "Great read");
}

#[tokio::test]
async fn blank_content_is_reported_per_field() {
    let state = support::build_test_state();
    let article = support::seed_simple_article(&state, "Review").await;
    let app = support::make_test_router(&state);

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post(format!("/api/v1/articles/{}/comments", article.slug))
                .token(ALICE_TOKEN)
                .xhr()
                .field("content", "   ")
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = support::read_json(resp).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["errors"]["content"][0], "This field is required.");
}

#[tokio::test]
async fn disabled_comments_refuse_even_signed_in_callers() {
    let state = support::build_test_state();
    let command = CreateArticleCommand::builder()
        .title("Closed Thread")
        .text("No comments here")
        .comments_enabled(false)
        .build()
        .unwrap();
    let article = support::seed_article(&state, command).await;
    let app = support::make_test_router(&state);

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post(format!("/api/v1/articles/{}/comments", article.slug))
                .token(ALICE_TOKEN)
                .xhr()
                .field("content", "let me in")
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(support::read_json(resp).await["success"], false);
}

#[tokio::test]
async fn parent_from_another_article_becomes_a_root_comment() {
    let state = support::build_test_state();
    let first = support::seed_simple_article(&state, "First Story").await;
    let second = support::seed_simple_article(&state, "Second Story").await;
    let foreign =
        support::seed_comment(&state, &support::alice(), &first.slug, "over here", None).await;
    let app = support::make_test_router(&state);

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post(format!("/api/v1/articles/{}/comments", second.slug))
                .token(BOB_TOKEN)
                .xhr()
                .field("content", "confused reply")
                .field("parent", foreign.id)
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let listing = comments_of(&app, &second.slug).await;
    let threads = listing["comments"].as_array().unwrap();
    assert_eq!(threads.len(), 1);
    assert!(threads[0]["parent_id"].is_null());
    assert_eq!(threads[0]["content"], "confused reply");
}

#[tokio::test]
async fn read_only_delete_is_refused_after_authorization() {
    let state = support::build_test_state();
    let article = support::seed_simple_article(&state, "Story").await;
    let comment =
        support::seed_comment(&state, &support::alice(), &article.slug, "mine", None).await;
    let app = support::make_test_router(&state);
    let uri = format!("/api/v1/comments/{}/delete", comment.id);

    let resp = app
        .clone()
        .oneshot(RequestBuilder::get(&uri).token(ALICE_TOKEN).build())
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
        .await;

    let resp = app
        .clone()
        .oneshot(RequestBuilder::get(&uri).token(BOB_TOKEN).build())
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::get("/api/v1/comments/9999/delete")
                .token(ALICE_TOKEN)
                .build(),
        )
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::get("/api/v1/comments/abc/delete")
                .token(ALICE_TOKEN)
                .build(),
        )
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;

    assert_eq!(comments_of(&app, &article.slug).await["count"], 1);
}

#[tokio::test]
async fn author_deletes_comment_and_its_replies() {
    let state = support::build_test_state();
    let article = support::seed_simple_article(&state, "Story").await;
    let root = support::seed_comment(&state, &support::alice(), &article.slug, "root", None).await;
    support::seed_comment(&state, &support::bob(), &article.slug, "reply", Some(root.id)).await;
    let other = support::seed_comment(&state, &support::bob(), &article.slug, "other", None).await;
    let app = support::make_test_router(&state);

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post(format!("/api/v1/comments/{}/delete", root.id))
                .token(ALICE_TOKEN)
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        support::location(&resp),
        format!("/api/v1/articles/{}", article.slug)
    );

    let listing = comments_of(&app, &article.slug).await;
    assert_eq!(listing["count"], 1);
    assert_eq!(listing["comments"][0]["id"], other.id);
}

#[tokio::test]
async fn stranger_cannot_delete_but_staff_can() {
    let state = support::build_test_state();
    let article = support::seed_simple_article(&state, "Story").await;
    let comment =
        support::seed_comment(&state, &support::alice(), &article.slug, "mine", None).await;
    let app = support::make_test_router(&state);
    let uri = format!("/api/v1/comments/{}", comment.id);

    let resp = app
        .clone()
        .oneshot(RequestBuilder::delete(&uri).token(BOB_TOKEN).build())
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;

    let resp = app
        .clone()
        .oneshot(RequestBuilder::delete(&uri).token(STAFF_TOKEN).build())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = support::read_json(resp).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Comment deleted.");

    assert_eq!(comments_of(&app, &article.slug).await["count"], 0);
}

#[tokio::test]
async fn non_numeric_comment_id_is_not_found() {
    let state = support::build_test_state();
    let app = support::make_test_router(&state);

    let resp = app
        .oneshot(
            RequestBuilder::post("/api/v1/comments/abc/delete")
                .token(ALICE_TOKEN)
                .xhr()
                .build(),
        )
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}

#[tokio::test]
async fn unapproved_comments_disappear_from_threads_and_counts() {
    let state = support::build_test_state();
    let article = support::seed_simple_article(&state, "Story").await;
    let root = support::seed_comment(&state, &support::alice(), &article.slug, "root", None).await;
    let reply =
        support::seed_comment(&state, &support::bob(), &article.slug, "reply", Some(root.id)).await;
    let app = support::make_test_router(&state);

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post("/api/v1/comments/moderation")
                .token(STAFF_TOKEN)
                .json(serde_json::json!({ "ids": [reply.id], "approved": false }))
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = support::read_json(resp).await;
    assert_eq!(json["updated"], 1);
    assert_eq!(json["approved"], false);

    let listing = comments_of(&app, &article.slug).await;
    assert_eq!(listing["count"], 1);
    assert!(listing["comments"][0]["replies"].as_array().unwrap().is_empty());

    // hiding the root hides the thread
    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post("/api/v1/comments/moderation")
                .token(STAFF_TOKEN)
                .json(serde_json::json!({ "ids": [root.id, reply.id], "approved": false }))
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let listing = comments_of(&app, &article.slug).await;
    assert_eq!(listing["count"], 0);
    assert!(listing["comments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn moderation_is_staff_only_and_needs_ids() {
    let state = support::build_test_state();
    let app = support::make_test_router(&state);

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post("/api/v1/comments/moderation")
                .token(ALICE_TOKEN)
                .json(serde_json::json!({ "ids": [1], "approved": true }))
                .build(),
        )
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::post("/api/v1/comments/moderation")
                .token(STAFF_TOKEN)
                .json(serde_json::json!({ "ids": [], "approved": true }))
                .build(),
        )
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn deleting_an_article_removes_its_comments() {
    let state = support::build_test_state();
    let article = support::seed_simple_article(&state, "Doomed").await;
    let comment =
        support::seed_comment(&state, &support::alice(), &article.slug, "bye", None).await;
    let app = support::make_test_router(&state);

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::delete(format!("/api/v1/articles/{}", article.slug))
                .token(STAFF_TOKEN)
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(support::read_json(resp).await["status"], "deleted");

    let resp = app
        .clone()
        .oneshot(
            RequestBuilder::delete(format!("/api/v1/comments/{}", comment.id))
                .token(STAFF_TOKEN)
                .build(),
        )
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}
