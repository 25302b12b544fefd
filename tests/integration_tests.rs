// Integration tests for Event Finder

use actix_web::{test, web, App};
use event_finder::config::SearchSettings;
use event_finder::core::{SearchEngine, SearchError};
use event_finder::models::{GeoPoint, SearchCriteria, SearchEventsResponse, SortStrategy};
use event_finder::routes::{configure_routes, events::AppState};
use event_finder::services::{CachedEventStore, EventStore, InMemoryEventStore, RealtimeDbClient, StoreError};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const EVENTS_BODY: &str = r#"{
    "-NaA": {
        "attendees": ["u1", "u2"],
        "details": { "cost": 10, "partySize": 4, "categories": ["music"], "region": { "latitude": 0.0, "longitude": 0.0 } }
    },
    "-NaB": {
        "details": { "cost": 5, "partySize": 2, "categories": { "food": true }, "region": { "latitude": 0.0, "longitude": 0.001 } }
    },
    "-NaC": {
        "attendees": { "-x": "u3" },
        "details": { "cost": 30, "partySize": 10, "categories": ["music", "outdoor"], "region": { "latitude": 0.5, "longitude": 0.5 } }
    },
    "-NaD": { "details": { "cost": "tbd", "partySize": 4 } }
}"#;

fn client_for(server: &mockito::Server) -> RealtimeDbClient {
    RealtimeDbClient::new(server.url(), "events".to_string(), Duration::from_secs(5)).unwrap()
}

fn seeded_state() -> AppState {
    let records: Value = serde_json::from_str(EVENTS_BODY).unwrap();
    let store = match records {
        Value::Object(map) => InMemoryEventStore::new(map),
        _ => unreachable!(),
    };

    AppState {
        engine: SearchEngine::new(Arc::new(store)),
        search: SearchSettings {
            default_limit: 2,
            max_limit: 10,
        },
    }
}

#[tokio::test]
async fn test_realtime_db_snapshot_search() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/events.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(EVENTS_BODY)
        .create_async()
        .await;

    let engine = SearchEngine::new(Arc::new(client_for(&server)));
    let criteria = SearchCriteria {
        party_size: Some(2),
        max_cost: Some(20.0),
        sort: SortStrategy::ByCost,
        ..Default::default()
    };

    let result = engine.search(&criteria).await.unwrap();

    mock.assert_async().await;
    assert_eq!(result.total_candidates, 3);
    assert_eq!(result.skipped_records, 1);
    let ids: Vec<&str> = result.events.iter().map(|e| e.event.id.as_str()).collect();
    assert_eq!(ids, vec!["-NaB", "-NaA"]);
}

#[tokio::test]
async fn test_null_collection_is_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/events.json")
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    let snapshot = client_for(&server).fetch_all().await.unwrap();
    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn test_store_error_status_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/events.json")
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;

    let engine = SearchEngine::new(Arc::new(client_for(&server)));
    let criteria = SearchCriteria {
        sort: SortStrategy::ByCost,
        ..Default::default()
    };

    let err = engine.search(&criteria).await.unwrap_err();
    assert!(matches!(err, SearchError::Store(StoreError::ApiError(_))));
}

#[tokio::test]
async fn test_non_object_body_is_invalid() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/events.json")
        .with_status(200)
        .with_body("[1, 2, 3]")
        .create_async()
        .await;

    let err = client_for(&server).fetch_all().await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_cached_store_fetches_once() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/events.json")
        .with_status(200)
        .with_body(EVENTS_BODY)
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(CachedEventStore::new(Arc::new(client_for(&server)), 60));
    let engine = SearchEngine::new(store);
    let criteria = SearchCriteria {
        user_location: Some(GeoPoint::new(0.0, 0.0)),
        ..Default::default()
    };

    let first = engine.search(&criteria).await.unwrap();
    let second = engine.search(&criteria).await.unwrap();

    mock.assert_async().await;
    assert_eq!(first.events, second.events);
}

#[actix_web::test]
async fn test_search_endpoint_paginates() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(seeded_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/events/search")
        .set_json(json!({ "userLocation": { "latitude": 0.0, "longitude": 0.0 } }))
        .to_request();
    let resp: SearchEventsResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.total_results, 3);
    assert_eq!(resp.skipped_records, 1);
    assert_eq!(resp.next_offset, Some(2));
    let ids: Vec<&str> = resp.events.iter().map(|e| e.event.id.as_str()).collect();
    assert_eq!(ids, vec!["-NaA", "-NaB"]);

    let req = test::TestRequest::post()
        .uri("/api/v1/events/search")
        .set_json(json!({ "userLocation": { "latitude": 0.0, "longitude": 0.0 }, "offset": 2 }))
        .to_request();
    let resp: SearchEventsResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.events.len(), 1);
    assert_eq!(resp.events[0].event.id, "-NaC");
    assert_eq!(resp.next_offset, None);
}

#[actix_web::test]
async fn test_search_endpoint_filters_categories() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(seeded_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/events/search")
        .set_json(json!({
            "categories": ["outdoor", "food"],
            "sort": "byCost",
            "descending": true,
            "limit": 10
        }))
        .to_request();
    let resp: SearchEventsResponse = test::call_and_read_body_json(&app, req).await;

    let ids: Vec<&str> = resp.events.iter().map(|e| e.event.id.as_str()).collect();
    assert_eq!(ids, vec!["-NaC", "-NaB"]);
    assert!(resp.events.iter().all(|e| e.distance_km.is_none()));
}

#[actix_web::test]
async fn test_search_endpoint_rejects_distance_without_location() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(seeded_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/events/search")
        .set_json(json!({ "maxDistanceKm": 5.0, "sort": "byCost" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid criteria");
}

#[actix_web::test]
async fn test_search_endpoint_validates_request() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(seeded_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/events/search")
        .set_json(json!({ "limit": 0, "sort": "byCost" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_search_endpoint_accepts_unmeetable_bounds() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(seeded_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/events/search")
        .set_json(json!({ "partySize": 0, "sort": "byCost", "limit": 10 }))
        .to_request();
    let resp: SearchEventsResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp.total_results, 3);

    let req = test::TestRequest::post()
        .uri("/api/v1/events/search")
        .set_json(json!({ "maxCost": -1.0, "sort": "byCost" }))
        .to_request();
    let resp: SearchEventsResponse = test::call_and_read_body_json(&app, req).await;
    assert!(resp.events.is_empty());
    assert_eq!(resp.total_results, 0);
    assert_eq!(resp.next_offset, None);
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(seeded_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}
