//! End-to-end requests through the router against an in-memory database.

mod common;

use common::app;
use explorer_router::Request;
use serde_json::json;

#[tokio::test]
async fn test_list_tables() {
    let app = app().await;
    let (status, body) = app.json(Request::get("/")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!(["items", "users"]));
}

#[tokio::test]
async fn test_create_without_nullable_field_omits_it_on_read() {
    let app = app().await;

    let (status, body) = app
        .text(Request::put("/items").form_body("title=x&description=y"))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, "last insert id 4");

    let (status, body) = app.json(Request::get("/items/4")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"id": 4, "title": "x", "description": "y"}));

    let updated: Option<String> = sqlx::query_scalar("SELECT updated FROM items WHERE id = 4")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(updated, None);
}

#[tokio::test]
async fn test_update_with_only_primary_key_is_rejected() {
    let app = app().await;
    let (status, body) = app
        .text(Request::post("/items/3").form_body("id=4"))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body, "missing data to update");
}

#[tokio::test]
async fn test_list_with_limit_and_offset() {
    let app = app().await;
    let (status, body) = app
        .json(
            Request::get("/items")
                .query_param("limit", "1")
                .query_param("offset", "1"),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!([{"id": 2, "title": "memcache", "description": "cache client"}])
    );
}

#[tokio::test]
async fn test_delete_missing_record() {
    let app = app().await;
    let (status, body) = app.text(Request::delete("/items/999")).await;
    assert_eq!(status, 404);
    assert_eq!(body, "record not found");
}

#[tokio::test]
async fn test_update_with_invalid_float() {
    let app = app().await;
    let (status, body) = app
        .text(Request::post("/items/3").form_body("rating=not-a-number"))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body, "invalid type rating");
}

#[tokio::test]
async fn test_non_finite_floats_are_rejected() {
    let app = app().await;
    for form in ["rating=inf", "rating=-inf", "rating=NaN"] {
        let (status, body) = app.text(Request::post("/items/1").form_body(form)).await;
        assert_eq!((status, body.as_str()), (400, "invalid type rating"), "{form}");
    }

    let (status, body) = app
        .text(Request::put("/items").form_body("title=x&description=y&rating=nan"))
        .await;
    assert_eq!((status, body.as_str()), (400, "invalid type rating"));

    let (_, body) = app.json(Request::get("/items/1")).await;
    assert!(body.get("rating").is_none());
    let (_, body) = app.json(Request::get("/items/3")).await;
    assert_eq!(body["rating"], json!(4.5));
}

#[tokio::test]
async fn test_default_paging_and_bad_params() {
    let app = app().await;
    for i in 0..5 {
        let form = format!("title=t{i}&description=d");
        let (status, _) = app.text(Request::put("/items").form_body(form)).await;
        assert_eq!(status, 200);
    }

    let (_, body) = app.json(Request::get("/items")).await;
    assert_eq!(body.as_array().unwrap().len(), 5);

    let (_, body) = app
        .json(
            Request::get("/items")
                .query_param("limit", "abc")
                .query_param("offset", "-3"),
        )
        .await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_full_record_lifecycle() {
    let app = app().await;

    let (status, body) = app
        .text(Request::put("/users").form_body("login=rvasily&status=1&unknown=field"))
        .await;
    assert_eq!((status, body.as_str()), (200, "last insert id 1"));

    let (status, body) = app
        .text(Request::post("/users/1").form_body("status=2&login=rv"))
        .await;
    assert_eq!((status, body.as_str()), (200, "updated record id 1"));

    let (_, body) = app.json(Request::get("/users/1")).await;
    assert_eq!(body, json!({"user_id": 1, "login": "rv", "status": 2}));

    let (status, body) = app.text(Request::delete("/users/1")).await;
    assert_eq!((status, body.as_str()), (200, "deleted record id 1"));

    let (status, body) = app.text(Request::get("/users/1")).await;
    assert_eq!((status, body.as_str()), (404, "record not found"));
}

#[tokio::test]
async fn test_null_sentinel_over_http() {
    let app = app().await;

    let (status, _) = app
        .text(Request::post("/items/1").form_body("updated=%00"))
        .await;
    assert_eq!(status, 200);
    let (_, body) = app.json(Request::get("/items/1")).await;
    assert!(body.get("updated").is_none());

    let (status, body) = app
        .text(Request::post("/items/1").form_body("title=%2500"))
        .await;
    assert_eq!((status, body.as_str()), (400, "title cannot be null"));
}

#[tokio::test]
async fn test_create_missing_required_field() {
    let app = app().await;
    let (status, body) = app
        .text(Request::put("/items").form_body("title=only"))
        .await;
    assert_eq!((status, body.as_str()), (400, "description cannot be null"));
}

#[tokio::test]
async fn test_unknown_table() {
    let app = app().await;
    for req in [
        Request::get("/nope"),
        Request::get("/nope/1"),
        Request::put("/nope").form_body("a=b"),
        Request::post("/nope/1").form_body("a=b"),
        Request::delete("/nope/1"),
    ] {
        let (status, body) = app.text(req).await;
        assert_eq!((status, body.as_str()), (404, "unknown table"));
    }
}

#[tokio::test]
async fn test_invalid_id() {
    let app = app().await;
    for req in [
        Request::get("/items/abc"),
        Request::post("/items/1.5").form_body("title=x"),
        Request::delete("/items/%27"),
    ] {
        let (status, body) = app.text(req).await;
        assert_eq!((status, body.as_str()), (400, "invalid id"));
    }
}

#[tokio::test]
async fn test_routing_errors() {
    let app = app().await;
    assert_eq!(app.send(Request::delete("/items")).await.status, 405);
    assert_eq!(app.send(Request::put("/items/1")).await.status, 405);
    assert_eq!(app.send(Request::get("/items/1/extra")).await.status, 404);
}

#[tokio::test]
async fn test_hostile_values_are_stored_verbatim() {
    let app = app().await;
    let payload = "x'); DROP TABLE items; --";
    let form = "title=x%27%29%3B+DROP+TABLE+items%3B+--&description=ok";

    let (status, body) = app.text(Request::put("/items").form_body(form)).await;
    assert_eq!((status, body.as_str()), (200, "last insert id 4"));

    let (_, body) = app.json(Request::get("/items/4")).await;
    assert_eq!(body["title"], json!(payload));

    let (status, _) = app.text(Request::get("/items")).await;
    assert_eq!(status, 200);
}
