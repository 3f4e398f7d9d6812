//! Keep, ledger and check-in endpoints

use axum::http::StatusCode;
use serde_json::json;

use super::{send, seed_campaign, test_app, DM, PLAYER};

async fn seed_keep(app: &axum::Router, campaign_id: &str) {
    let (status, _) = send(
        app,
        "POST",
        &format!("/campaigns/{campaign_id}/keep/facilities"),
        Some(DM),
        Some(json!({
            "name": "Smithy",
            "upkeepAmount": 5.0,
            "upkeepCurrency": "gp",
            "profitAmount": 20.0,
            "profitCurrency": "gp"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        &format!("/campaigns/{campaign_id}/keep/hirelings"),
        Some(DM),
        Some(json!({
            "name": "Guard",
            "salaryAmount": 2.0,
            "salaryCurrency": "gp",
            "profitAmount": 0.0,
            "profitCurrency": "gp"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_check_in_recomputes_on_server() {
    let (app, _temp) = test_app().await;
    let campaign_id = seed_campaign(&app).await;
    seed_keep(&app, &campaign_id).await;

    // Client-supplied totals are ignored; only weeks matter
    let (status, check_in) = send(
        &app,
        "POST",
        &format!("/campaigns/{campaign_id}/keep/check-ins"),
        Some(DM),
        Some(json!({ "weeks": 3, "netProfit": { "gp": 1000000.0 } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(check_in["weeksAway"], 3);
    assert_eq!(check_in["netProfit"]["gp"], 39.0);
    assert_eq!(check_in["breakdown"]["gp"]["totalUpkeep"], 21.0);
    assert_eq!(check_in["breakdown"]["gp"]["hirelings"][0]["type"], "salary");

    let id = check_in["id"].as_str().expect("check-in id");
    let (status, view) = send(
        &app,
        "GET",
        &format!("/campaigns/{campaign_id}/keep/check-ins/{id}"),
        Some(PLAYER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["outcome"], "profit");
    assert_eq!(view["totalGains"], 39.0);
}

#[tokio::test]
async fn test_invalid_weeks_rejected_without_writing() {
    let (app, _temp) = test_app().await;
    let campaign_id = seed_campaign(&app).await;
    seed_keep(&app, &campaign_id).await;

    for weeks in [0, -2] {
        let (status, body) = send(
            &app,
            "POST",
            &format!("/campaigns/{campaign_id}/keep/check-ins"),
            Some(DM),
            Some(json!({ "weeks": weeks })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request_error");
    }

    let (_, page) = send(
        &app,
        "GET",
        &format!("/campaigns/{campaign_id}/keep/check-ins"),
        Some(DM),
        None,
    )
    .await;
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn test_mistyped_weeks_is_a_json_bad_request() {
    let (app, _temp) = test_app().await;
    let campaign_id = seed_campaign(&app).await;
    seed_keep(&app, &campaign_id).await;

    for body in [json!({ "weeks": "abc" }), json!({ "weeks": 2.5 }), json!({})] {
        let (status, response) = send(
            &app,
            "POST",
            &format!("/campaigns/{campaign_id}/keep/check-ins"),
            Some(DM),
            Some(body.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(response["error"]["type"], "invalid_request_error");
        assert!(response["error"]["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    let (_, page) = send(
        &app,
        "GET",
        &format!("/campaigns/{campaign_id}/keep/check-ins"),
        Some(DM),
        None,
    )
    .await;
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn test_mistyped_history_query_is_a_json_bad_request() {
    let (app, _temp) = test_app().await;
    let campaign_id = seed_campaign(&app).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/campaigns/{campaign_id}/keep/check-ins?page=abc"),
        Some(PLAYER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request_error");
}

#[tokio::test]
async fn test_preview_does_not_record() {
    let (app, _temp) = test_app().await;
    let campaign_id = seed_campaign(&app).await;
    seed_keep(&app, &campaign_id).await;

    let (status, ledger) = send(
        &app,
        "POST",
        &format!("/campaigns/{campaign_id}/keep/ledger"),
        Some(PLAYER),
        Some(json!({ "weeks": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ledger["weeks"], 2);
    assert_eq!(ledger["netProfit"]["gp"], 26.0);

    let (_, page) = send(
        &app,
        "GET",
        &format!("/campaigns/{campaign_id}/keep/check-ins"),
        Some(DM),
        None,
    )
    .await;
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn test_history_pagination_query() {
    let (app, _temp) = test_app().await;
    let campaign_id = seed_campaign(&app).await;
    seed_keep(&app, &campaign_id).await;

    for weeks in 1..=3 {
        let (status, _) = send(
            &app,
            "POST",
            &format!("/campaigns/{campaign_id}/keep/check-ins"),
            Some(DM),
            Some(json!({ "weeks": weeks })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = send(
        &app,
        "GET",
        &format!("/campaigns/{campaign_id}/keep/check-ins?page=2&pageSize=2"),
        Some(PLAYER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["page"], 2);
    assert_eq!(page["pageSize"], 2);
    assert_eq!(page["total"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["entries"][0]["weeksAway"], 1);

    // Oversized pages are clamped
    let (_, page) = send(
        &app,
        "GET",
        &format!("/campaigns/{campaign_id}/keep/check-ins?pageSize=500"),
        Some(PLAYER),
        None,
    )
    .await;
    assert_eq!(page["pageSize"], 50);
}

#[tokio::test]
async fn test_unknown_currency_rejected() {
    let (app, _temp) = test_app().await;
    let campaign_id = seed_campaign(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/campaigns/{campaign_id}/keep/facilities"),
        Some(DM),
        Some(json!({
            "name": "Mint",
            "upkeepAmount": 1.0,
            "upkeepCurrency": "zz",
            "profitAmount": 1.0,
            "profitCurrency": "gp"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .is_some_and(|m| m.contains("zz")));
}

#[tokio::test]
async fn test_negative_amount_rejected() {
    let (app, _temp) = test_app().await;
    let campaign_id = seed_campaign(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/campaigns/{campaign_id}/keep/hirelings"),
        Some(DM),
        Some(json!({
            "name": "Thief",
            "salaryAmount": -4.0,
            "salaryCurrency": "gp",
            "profitAmount": 0.0,
            "profitCurrency": "gp"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_keep_icon() {
    let (app, _temp) = test_app().await;
    let campaign_id = seed_campaign(&app).await;
    let uri = format!("/campaigns/{campaign_id}/keep");

    let (status, keep) = send(
        &app,
        "PUT",
        &uri,
        Some(DM),
        Some(json!({ "iconUrl": "/icons/tower.png", "description": "Old tower" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(keep["iconUrl"], "/icons/tower.png");

    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(DM),
        Some(json!({ "iconUrl": "javascript:alert(1)" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shop_items_need_known_currency() {
    let (app, _temp) = test_app().await;
    let campaign_id = seed_campaign(&app).await;

    let (status, shop) = send(
        &app,
        "POST",
        &format!("/campaigns/{campaign_id}/shops"),
        Some(DM),
        Some(json!({ "name": "General Store", "keeper": "Tobin" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let shop_id = shop["id"].as_str().expect("shop id");
    let items_uri = format!("/campaigns/{campaign_id}/shops/{shop_id}/items");

    let (status, _) = send(
        &app,
        "POST",
        &items_uri,
        Some(DM),
        Some(json!({ "name": "Rope", "price": 1.0, "currency": "gp", "quantity": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        &items_uri,
        Some(DM),
        Some(json!({ "name": "Ale", "price": 4.0, "currency": "cp" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, listed) = send(
        &app,
        "GET",
        &format!("/campaigns/{campaign_id}/shops/{shop_id}"),
        Some(PLAYER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["name"], "General Store");
    assert_eq!(listed["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(listed["items"][0]["quantity"], 5);
}
