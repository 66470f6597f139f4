//! Review endpoint integration tests: the rating invariant, the
//! one-review-per-user rule and author/admin authorization.

mod common;

use common::*;
use http::StatusCode;
use market_server::db::models::ProductCategory;
use serde_json::json;

async fn product_average(t: &TestApp, id: &str) -> f64 {
    let (status, body) = send(&t.app, get(&format!("/api/products/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["averageRating"].as_f64().unwrap()
}

#[tokio::test]
async fn average_rating_follows_review_lifecycle() {
    let t = spawn_app().await;
    seed_user(&t.state, "sella", "Sella", "seller").await;
    seed_user(&t.state, "alice", "Alice", "user").await;
    seed_user(&t.state, "bob", "Bob", "user").await;
    let id = seed_product(&t.state, "Glass vase", ProductCategory::HomeDecor, 30.0, "sella").await;

    let alice = token_for(&t.state, "user:alice", "Alice", "user");
    let bob = token_for(&t.state, "user:bob", "Bob", "user");

    // create: 5 -> mean 5.0
    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            &format!("/api/products/{id}/reviews"),
            &alice,
            json!({"rating": 5, "review": "Gorgeous"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let alice_review_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(product_average(&t, &id).await, 5.0);

    // second reviewer: (5 + 4) / 2 = 4.5
    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            &format!("/api/products/{id}/reviews"),
            &bob,
            json!({"rating": 4, "review": "Pretty good"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let bob_review_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(product_average(&t, &id).await, 4.5);

    // update: (3 + 4) / 2 = 3.5
    let (status, _) = send(
        &t.app,
        json_request(
            "PUT",
            &format!("/api/reviews/{alice_review_id}"),
            &alice,
            json!({"rating": 3}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product_average(&t, &id).await, 3.5);

    // delete one: mean of the remaining 4
    let (status, _) = send(
        &t.app,
        json_request(
            "DELETE",
            &format!("/api/reviews/{alice_review_id}"),
            &alice,
            json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product_average(&t, &id).await, 4.0);

    // delete the last one: back to 0
    let (status, _) = send(
        &t.app,
        json_request(
            "DELETE",
            &format!("/api/reviews/{bob_review_id}"),
            &bob,
            json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product_average(&t, &id).await, 0.0);
}

#[tokio::test]
async fn one_review_per_user_and_product() {
    let t = spawn_app().await;
    seed_user(&t.state, "sella", "Sella", "seller").await;
    seed_user(&t.state, "alice", "Alice", "user").await;
    let id = seed_product(&t.state, "Cork board", ProductCategory::Other, 12.0, "sella").await;

    let alice = token_for(&t.state, "user:alice", "Alice", "user");
    let uri = format!("/api/products/{id}/reviews");

    let (status, _) = send(
        &t.app,
        json_request("POST", &uri, &alice, json!({"rating": 4, "review": "Handy"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // second attempt by the same user is a 400
    let (status, body) = send(
        &t.app,
        json_request("POST", &uri, &alice, json!({"rating": 2, "review": "Changed my mind"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Already reviewed this product");

    // still exactly one review
    let (_, body) = send(&t.app, get(&uri)).await;
    assert_eq!(body["count"], 1);

    // reviewing a missing product is a 404
    let (status, _) = send(
        &t.app,
        json_request(
            "POST",
            "/api/products/product:doesnotexist/reviews",
            &alice,
            json!({"rating": 4, "review": "Ghost product"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // out-of-range rating is a validation error
    let (status, _) = send(
        &t.app,
        json_request(
            "POST",
            &uri,
            &token_for(&t.state, "user:sella", "Sella", "seller"),
            json!({"rating": 6, "review": "Too enthusiastic"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn only_author_or_admin_may_modify_a_review() {
    let t = spawn_app().await;
    seed_user(&t.state, "sella", "Sella", "seller").await;
    seed_user(&t.state, "alice", "Alice", "user").await;
    seed_user(&t.state, "bob", "Bob", "user").await;
    seed_user(&t.state, "root", "Root", "admin").await;
    let id = seed_product(&t.state, "Denim tote", ProductCategory::Fashion, 18.0, "sella").await;

    let alice = token_for(&t.state, "user:alice", "Alice", "user");
    let (_, body) = send(
        &t.app,
        json_request(
            "POST",
            &format!("/api/products/{id}/reviews"),
            &alice,
            json!({"rating": 5, "review": "Sturdy"}),
        ),
    )
    .await;
    let review_id = body["data"]["id"].as_str().unwrap().to_string();

    // a stranger can neither update nor delete
    let bob = token_for(&t.state, "user:bob", "Bob", "user");
    let (status, _) = send(
        &t.app,
        json_request(
            "PUT",
            &format!("/api/reviews/{review_id}"),
            &bob,
            json!({"rating": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &t.app,
        json_request("DELETE", &format!("/api/reviews/{review_id}"), &bob, json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // unauthenticated requests never reach the handler
    let (status, _) = send(
        &t.app,
        json_request_unauth("PUT", &format!("/api/reviews/{review_id}"), json!({"rating": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // an admin may
    let root = token_for(&t.state, "user:root", "Root", "admin");
    let (status, body) = send(
        &t.app,
        json_request(
            "PUT",
            &format!("/api/reviews/{review_id}"),
            &root,
            json!({"rating": 2, "review": "Moderated"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rating"], 2);
    assert_eq!(product_average(&t, &id).await, 2.0);

    let (status, _) = send(
        &t.app,
        json_request("DELETE", &format!("/api/reviews/{review_id}"), &root, json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // gone now
    let (status, _) = send(
        &t.app,
        json_request("DELETE", &format!("/api/reviews/{review_id}"), &root, json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn review_listing_populates_reviewers() {
    let t = spawn_app().await;
    seed_user(&t.state, "sella", "Sella", "seller").await;
    seed_user(&t.state, "alice", "Alice", "user").await;
    seed_user(&t.state, "bob", "Bob", "user").await;
    let id = seed_product(&t.state, "Patchwork quilt", ProductCategory::Fashion, 75.0, "sella").await;

    for (user, token_role, rating) in [("alice", "user", 5), ("bob", "user", 3)] {
        let token = token_for(&t.state, &format!("user:{user}"), user, token_role);
        let (status, _) = send(
            &t.app,
            json_request(
                "POST",
                &format!("/api/products/{id}/reviews"),
                &token,
                json!({"rating": rating, "review": "warm"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // listing is public
    let (status, body) = send(&t.app, get(&format!("/api/products/{id}/reviews"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    for review in body["data"].as_array().unwrap() {
        assert!(review["user"]["name"].as_str().is_some());
        assert!(review["user"]["avatar"].as_str().is_some());
    }

    // unknown product lists as empty, matching the upstream API
    let (status, body) = send(&t.app, get("/api/products/product:doesnotexist/reviews")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}
