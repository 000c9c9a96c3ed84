#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Url;
use serde_json::json;

/// A request as seen by the mock server, with query and form decoded.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub form: HashMap<String, String>,
}

impl RecordedRequest {
    pub fn query(&self, key: &str) -> &str {
        self.query.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn header(&self, key: &str) -> &str {
        self.headers
            .get(&key.to_lowercase())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn form(&self, key: &str) -> &str {
        self.form.get(key).map(String::as_str).unwrap_or_default()
    }

    /// The `variables` query parameter of a history request.
    pub fn variables(&self) -> serde_json::Value {
        serde_json::from_str(self.query("variables")).unwrap()
    }
}

/// Decides the response for a request. `calls` is how many requests with the
/// same method and path were received before this one.
type Responder = dyn Fn(&RecordedRequest, usize) -> (u16, String) + Send + Sync;

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Arc<Responder>,
}

pub struct MockServer {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockServer {
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&RecordedRequest, usize) -> (u16, String) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: Arc::clone(&requests),
            responder: Arc::new(responder),
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockServer {
            url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let request = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: decode_pairs(uri.query().unwrap_or_default()),
        headers: headers
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_lowercase(),
                    v.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect(),
        form: decode_pairs(&body),
    };

    let mut requests = state.requests.lock().unwrap();
    let calls = requests
        .iter()
        .filter(|r| r.method == request.method && r.path == request.path)
        .count();
    let (status, body) = (state.responder)(&request, calls);
    requests.push(request);

    (
        StatusCode::from_u16(status).unwrap(),
        [("content-type", "application/json")],
        body,
    )
}

fn decode_pairs(raw: &str) -> HashMap<String, String> {
    let url = Url::parse(&format!("http://mock/?{}", raw)).unwrap();
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn b64_timestamp(ts: i64) -> String {
    STANDARD.encode(ts.to_string())
}

/// A history response body holding `tracks` as (title, artist, album).
pub fn history_page(tracks: &[(String, String, String)], end_cursor: i64) -> String {
    let edges: Vec<serde_json::Value> = tracks
        .iter()
        .enumerate()
        .map(|(i, (title, artist, album))| {
            json!({
                "node": {
                    "subtitle": title,
                    "title": artist,
                    "album": album,
                    "start_time": end_cursor + 200 * i as i64,
                    "end_time": end_cursor + 200 * i as i64 + 180,
                    "musical_kind": "Pop",
                    "year": 2001
                },
                "cursor": b64_timestamp(end_cursor + 200 * i as i64)
            })
        })
        .collect();

    json!({
        "data": {
            "timelineCursor": {
                "edges": edges,
                "pageInfo": {
                    "endCursor": b64_timestamp(end_cursor),
                    "hasNextPage": true
                }
            }
        }
    })
    .to_string()
}

/// `count` synthetic tracks named `<prefix> <n>`.
pub fn generated_tracks(prefix: &str, count: usize) -> Vec<(String, String, String)> {
    (0..count)
        .map(|i| {
            (
                format!("{} {}", prefix, i),
                format!("Artist {}", i),
                format!("Album {}", i),
            )
        })
        .collect()
}

/// The ten tracks of the reference history fixture.
pub fn ten_track_fixture() -> Vec<(String, String, String)> {
    [
        ("Scar tissue", "Red Hot Chili Peppers", "Greatest hits"),
        ("Off the wall", "Jil Is Lucky", "Off the wall"),
        ("Kalimba (Flute mix)", "Freakniks", "Electro tunes"),
        (
            "Tsukikaage no rendezvous",
            "Keiko Mari",
            "Nippon girls: Japanese pop, beat & bossa nova 1966-1970",
        ),
        (
            "Un petit poisson, un petit oiseau",
            "Juliette Greco",
            "Déshabillez-moi 1965-1969",
        ),
        (
            "I want to be happy",
            "Ray Brown",
            "Brown Ray trio / Some of my best friends are guitarists",
        ),
        ("I'm so happy I can't stop crying", "Sting", "Mercury falling"),
        (
            "Sambarilove (feat. Roubinho Jacobina)",
            "Chiara Civello",
            "Eclipse",
        ),
        ("Retiens l'été", "Double Francoise", "Les bijoux"),
        (
            "Serenade nº13 en Sol Maj K 525 \"une petite musique de nuit\" : I. Allegro",
            "I Musici",
            "Mozart, pachelbel, albinoni",
        ),
    ]
    .iter()
    .map(|(t, a, al)| (t.to_string(), a.to_string(), al.to_string()))
    .collect()
}
