//! OverseerrClient against a local fake of the Overseerr v1 API.

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use fetcherr_core::{
    ActivationGate, ActivationReply, BackendError, MediaBackend,
    OverseerrClient, RequestIntent, RequestPayload,
    model::{MediaType, Requester, StatusData, TmdbId},
};
use serde_json::{Value, json};
use tokio::sync::Mutex;

const API_KEY: &str = "test-key";

#[derive(Clone, Default)]
struct Fake {
    requests: Arc<Mutex<Vec<Value>>>,
    queries: Arc<Mutex<Vec<String>>>,
}

fn authorised(headers: &HeaderMap) -> bool {
    headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        == Some(API_KEY)
}

async fn search(
    State(fake): State<Fake>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorised(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "nope"})))
            .into_response();
    }
    let query = params.get("query").cloned().unwrap_or_default();
    fake.queries.lock().await.push(query.clone());
    if query == "explode" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "search index offline"})),
        )
            .into_response();
    }

    Json(json!({
        "page": 1,
        "totalPages": 1,
        "totalResults": 3,
        "results": [
            {
                "id": 438631,
                "mediaType": "movie",
                "title": "Dune",
                "releaseDate": "2021-09-15",
                "overview": "Paul Atreides...",
                "voteAverage": 7.8
            },
            {
                "id": 137693,
                "mediaType": "person",
                "name": "Denis Villeneuve"
            },
            {
                "id": 90228,
                "mediaType": "tv",
                "name": "Dune: Prophecy",
                "firstAirDate": "2024-11-17",
                "mediaInfo": {
                    "status": 2,
                    "seasons": [{"seasonNumber": 1, "status": 2}]
                }
            }
        ]
    }))
    .into_response()
}

async fn tv(headers: HeaderMap, Path(id): Path<u64>) -> Response {
    if !authorised(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id != 1399 {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "Not found"})))
            .into_response();
    }
    Json(json!({
        "id": 1399,
        "name": "Game of Thrones",
        "seasons": [
            {"seasonNumber": 0, "name": "Specials"},
            {"seasonNumber": 1},
            {"seasonNumber": 2}
        ]
    }))
    .into_response()
}

async fn request(
    State(fake): State<Fake>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorised(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    fake.requests.lock().await.push(body.clone());
    match body["mediaId"].as_u64() {
        Some(603) => (
            StatusCode::CONFLICT,
            Json(json!({"message": "Request for this media already exists."})),
        )
            .into_response(),
        Some(666) => {
            (StatusCode::BAD_GATEWAY, "upstream exploded").into_response()
        }
        _ => (StatusCode::CREATED, Json(json!({"id": 1, "status": 1})))
            .into_response(),
    }
}

async fn spawn_fake() -> (String, Fake) {
    let fake = Fake::default();
    let router = Router::new()
        .route("/api/v1/search", get(search))
        .route("/api/v1/tv/{id}", get(tv))
        .route("/api/v1/request", post(request))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake overseerr");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve fake overseerr");
    });

    (format!("http://{addr}/"), fake)
}

#[tokio::test]
async fn search_keeps_movies_and_series_only() {
    let (base, fake) = spawn_fake().await;
    let client = OverseerrClient::new(&base, API_KEY).unwrap();

    let results = client.search("  Dune ").await.expect("search");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].media_type, MediaType::Movie);
    assert_eq!(results[0].id, TmdbId(438631));
    assert_eq!(results[0].status, None);
    assert_eq!(results[1].media_type, MediaType::Series);
    assert!(matches!(
        results[1].status,
        Some(StatusData::Series { ref seasons, .. }) if seasons.len() == 1
    ));
    assert_eq!(*fake.queries.lock().await, vec!["Dune".to_string()]);
}

#[tokio::test]
async fn query_text_is_encoded() {
    let (base, fake) = spawn_fake().await;
    let client = OverseerrClient::new(&base, API_KEY).unwrap();

    client.search("Amélie & friends?").await.expect("search");

    assert_eq!(
        *fake.queries.lock().await,
        vec!["Amélie & friends?".to_string()]
    );
}

#[tokio::test]
async fn search_failures_are_errors() {
    let (base, _fake) = spawn_fake().await;

    let client = OverseerrClient::new(&base, API_KEY).unwrap();
    match client.search("explode").await {
        Err(BackendError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "search index offline");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let unauthorised = OverseerrClient::new(&base, "wrong").unwrap();
    assert!(matches!(
        unauthorised.search("Dune").await,
        Err(BackendError::InvalidApiKey)
    ));
}

#[tokio::test]
async fn season_list_is_returned_as_reported() {
    let (base, _fake) = spawn_fake().await;
    let client = OverseerrClient::new(&base, API_KEY).unwrap();

    assert_eq!(
        client.list_seasons(TmdbId(1399)).await.expect("seasons"),
        vec![0, 1, 2]
    );
    assert!(matches!(
        client.list_seasons(TmdbId(1)).await,
        Err(BackendError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn submissions_return_every_status_as_data() {
    let (base, fake) = spawn_fake().await;
    let client = OverseerrClient::new(&base, API_KEY).unwrap();

    let created = client
        .submit(&RequestPayload::series(TmdbId(1399), vec![1, 2]))
        .await
        .expect("created");
    assert_eq!(created.status, 201);

    let conflict = client
        .submit(&RequestPayload::movie(TmdbId(603)))
        .await
        .expect("conflict");
    assert_eq!(conflict.status, 409);
    assert_eq!(
        conflict.body["message"],
        "Request for this media already exists."
    );

    let gateway = client
        .submit(&RequestPayload::movie(TmdbId(666)))
        .await
        .expect("bad gateway");
    assert_eq!(gateway.status, 502);
    assert_eq!(gateway.body, Value::String("upstream exploded".into()));

    let sent = fake.requests.lock().await.clone();
    assert_eq!(
        sent[0],
        json!({"mediaType": "tv", "mediaId": 1399, "is4k": false, "seasons": [1, 2]})
    );
    assert_eq!(
        sent[1],
        json!({"mediaType": "movie", "mediaId": 603, "is4k": false})
    );
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        OverseerrClient::new(&format!("http://{addr}"), API_KEY).unwrap();
    assert!(matches!(
        client.search("Dune").await,
        Err(BackendError::Network(_))
    ));
}

/// Accepts connections and never writes a byte back.
async fn spawn_silent() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn stalled_search_times_out_as_a_network_error() {
    let base = spawn_silent().await;
    let client =
        OverseerrClient::with_timeout(&base, API_KEY, Duration::from_millis(200))
            .unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), client.search("Dune"))
        .await
        .expect("search should give up on its own");
    assert!(matches!(result, Err(BackendError::Network(_))));
}

#[tokio::test]
async fn stalled_request_reports_the_backend_unavailable() {
    let base = spawn_silent().await;
    let client =
        OverseerrClient::with_timeout(&base, API_KEY, Duration::from_millis(200))
            .unwrap();

    let reply = tokio::time::timeout(
        Duration::from_secs(5),
        ActivationGate::default().execute(
            &client,
            &RequestIntent::AllSeasons(TmdbId(1399)),
            &Requester::default(),
        ),
    )
    .await
    .expect("activation should give up on its own");
    assert_eq!(reply, ActivationReply::BackendUnavailable);
}
