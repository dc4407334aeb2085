mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_post_success() {
    let app = TestApp::spawn().await;

    let author = app.register("Jame", 27, "s3cret!").await;
    let token = app.login("Jame", "s3cret!").await;

    let response = app
        .post_authenticated("/api/posts", &token)
        .json(&json!({ "title": "Hello", "body": "First post" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["title"], "Hello");
    assert_eq!(body["data"]["body"], "First post");
    assert_eq!(body["data"]["author_id"], author["id"]);
    assert_eq!(body["data"]["author"]["name"], "Jame");
    assert!(body["data"]["author"].get("password_hash").is_none());
    assert!(body["data"]["id"].is_string());
}

#[tokio::test]
async fn test_create_post_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/posts")
        .json(&json!({ "title": "Hello", "body": "First post" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .post_authenticated("/api/posts", "not-a-token")
        .json(&json!({ "title": "Hello", "body": "First post" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_post_blank_title() {
    let app = TestApp::spawn().await;

    app.register("Jame", 27, "s3cret!").await;
    let token = app.login("Jame", "s3cret!").await;

    let response = app
        .post_authenticated("/api/posts", &token)
        .json(&json!({ "title": "  ", "body": "No title" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_posts() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/posts")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    app.register("Jame", 27, "s3cret!").await;
    let token = app.login("Jame", "s3cret!").await;

    for title in ["One", "Two"] {
        let response = app
            .post_authenticated("/api/posts", &token)
            .json(&json!({ "title": title, "body": "text" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .get("/api/posts")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let posts = body["data"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p["author"]["name"] == "Jame"));
}

#[tokio::test]
async fn test_list_user_posts() {
    let app = TestApp::spawn().await;

    let jame = app.register("Jame", 27, "s3cret!").await;
    let alex = app.register("Alex", 31, "hunter2").await;

    let jame_token = app.login("Jame", "s3cret!").await;
    let alex_token = app.login("Alex", "hunter2").await;

    app.post_authenticated("/api/posts", &jame_token)
        .json(&json!({ "title": "By Jame", "body": "text" }))
        .send()
        .await
        .expect("Failed to execute request");
    app.post_authenticated("/api/posts", &alex_token)
        .json(&json!({ "title": "By Alex", "body": "text" }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .get(&format!("/api/users/{}/posts", jame["id"].as_str().unwrap()))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let posts = body["data"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "By Jame");
    assert_eq!(posts[0]["author_id"], jame["id"]);
    assert_ne!(posts[0]["author_id"], alex["id"]);
}

#[tokio::test]
async fn test_list_user_posts_none_found() {
    let app = TestApp::spawn().await;

    let jame = app.register("Jame", 27, "s3cret!").await;

    let response = app
        .get(&format!("/api/users/{}/posts", jame["id"].as_str().unwrap()))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Post not found");
}

#[tokio::test]
async fn test_list_user_posts_invalid_id() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users/not-a-uuid/posts")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
