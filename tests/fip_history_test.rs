mod common;

use common::{MockServer, b64_timestamp, generated_tracks, history_page, ten_track_fixture};
use radiosync::{config::SourceConfig, error::SyncError, fip::HistoryClient, types::Track};

const END_CURSOR_PAGE_1: i64 = 1592890417;
const END_CURSOR_PAGE_2: i64 = 1592870417;

fn client_for(server: &MockServer) -> HistoryClient {
    HistoryClient::new(SourceConfig::new(server.url.clone(), 7))
}

/// Serves pages of exactly the requested size, walking back 20000s per page.
async fn sized_pages_server() -> MockServer {
    MockServer::start(|req, calls| {
        let first = req.variables()["first"].as_u64().unwrap() as usize;
        let tracks = generated_tracks(&format!("Page {}", calls + 1), first);
        (200, history_page(&tracks, END_CURSOR_PAGE_1 - 20000 * calls as i64))
    })
    .await
}

#[tokio::test]
async fn test_fetch_ten_tracks_in_fixture_order() {
    let server = MockServer::start(|_, _| (200, history_page(&ten_track_fixture(), END_CURSOR_PAGE_1))).await;

    let tracks = client_for(&server).fetch_history(0, 10).await.unwrap();

    let expected: Vec<Track> = ten_track_fixture()
        .into_iter()
        .map(|(title, artist, album)| Track {
            title,
            artist,
            album,
        })
        .collect();
    assert_eq!(tracks, expected);
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_request_carries_graphql_parameters() {
    let server = MockServer::start(|_, _| (200, history_page(&ten_track_fixture(), END_CURSOR_PAGE_1))).await;

    client_for(&server).fetch_history(1592467324, 10).await.unwrap();

    let requests = server.requests();
    let request = &requests[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.query("operationName"), "History");

    let variables = request.variables();
    assert_eq!(variables["first"], 10);
    assert_eq!(variables["after"], "MTU5MjQ2NzMyNA==");
    assert_eq!(variables["stationID"], 7);

    let extensions: serde_json::Value = serde_json::from_str(request.query("extensions")).unwrap();
    assert_eq!(extensions["persistedQuery"]["version"], 1);
    assert_eq!(
        extensions["persistedQuery"]["sha256Hash"],
        "f8f404573583a6a9410cd24637f214a0b93038696c1d20f19202111b51fd8270"
    );
}

#[tokio::test]
async fn test_up_to_one_hundred_tracks_is_a_single_request() {
    for count in [1, 42, 100] {
        let server = sized_pages_server().await;

        let tracks = client_for(&server).fetch_history(0, count).await.unwrap();

        assert_eq!(tracks.len(), count);
        assert_eq!(server.requests().len(), 1, "count {}", count);
    }
}

#[tokio::test]
async fn test_two_hundred_tracks_from_two_pages() {
    let server = MockServer::start(|_, calls| {
        if calls == 0 {
            let mut tracks = generated_tracks("First part", 100);
            tracks[0].0 = "Scar tissue".to_string();
            (200, history_page(&tracks, END_CURSOR_PAGE_1))
        } else {
            let mut tracks = generated_tracks("Second part", 100);
            tracks[0].0 = "Belleville".to_string();
            (200, history_page(&tracks, END_CURSOR_PAGE_2))
        }
    })
    .await;

    let tracks = client_for(&server).fetch_history(0, 200).await.unwrap();

    assert_eq!(tracks.len(), 200);
    assert_eq!(tracks[0].title, "Scar tissue");
    assert_eq!(tracks[99].title, "First part 99");
    assert_eq!(tracks[100].title, "Belleville");
    assert_eq!(tracks[199].title, "Second part 99");
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_next_page_starts_at_previous_end_cursor() {
    let server = sized_pages_server().await;

    let tracks = client_for(&server).fetch_history(0, 200).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].variables()["after"], b64_timestamp(0));
    assert_eq!(requests[1].variables()["after"], b64_timestamp(END_CURSOR_PAGE_1));
    assert_ne!(requests[0].variables(), requests[1].variables());
    assert_ne!(tracks[0], tracks[100]);
}

#[tokio::test]
async fn test_remainder_goes_into_a_smaller_last_page() {
    let server = sized_pages_server().await;

    let tracks = client_for(&server).fetch_history(0, 250).await.unwrap();

    let sizes: Vec<u64> = server
        .requests()
        .iter()
        .map(|r| r.variables()["first"].as_u64().unwrap())
        .collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    assert_eq!(tracks.len(), 250);
    assert_eq!(tracks[200].title, "Page 3 0");

    let cursors: Vec<String> = server
        .requests()
        .iter()
        .map(|r| r.variables()["after"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        cursors,
        vec![
            b64_timestamp(0),
            b64_timestamp(END_CURSOR_PAGE_1),
            b64_timestamp(END_CURSOR_PAGE_1 - 20000),
        ]
    );
}

#[tokio::test]
async fn test_zero_tracks_sends_no_request() {
    let server = sized_pages_server().await;

    let tracks = client_for(&server).fetch_history(0, 0).await.unwrap();

    assert!(tracks.is_empty());
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_empty_response_is_an_error() {
    let server = MockServer::start(|_, _| (200, "{}".to_string())).await;

    let result = client_for(&server).fetch_history(0, 10).await;

    assert!(matches!(result, Err(SyncError::EmptyPage { .. })));
}

#[tokio::test]
async fn test_empty_page_midway_discards_everything() {
    let server = MockServer::start(|_, calls| {
        if calls == 0 {
            (200, history_page(&generated_tracks("Page 1", 100), END_CURSOR_PAGE_1))
        } else {
            (200, history_page(&[], END_CURSOR_PAGE_2))
        }
    })
    .await;

    let result = client_for(&server).fetch_history(0, 300).await;

    assert!(matches!(result, Err(SyncError::EmptyPage { .. })));
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_bad_request_is_a_protocol_error() {
    let server = MockServer::start(|_, _| {
        (
            400,
            r#"{"errors":[{"message":"PersistedQueryNotFound"}]}"#.to_string(),
        )
    })
    .await;

    let result = client_for(&server).fetch_history(0, 10).await;

    match result {
        Err(SyncError::Protocol { status, body }) => {
            assert_eq!(status.as_u16(), 400);
            assert!(body.contains("PersistedQueryNotFound"));
        }
        other => panic!("expected a protocol error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let server = MockServer::start(|_, _| (200, "<html>maintenance</html>".to_string())).await;

    let result = client_for(&server).fetch_history(0, 10).await;

    assert!(matches!(result, Err(SyncError::Decode(_))));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_transport_error() {
    let client = HistoryClient::new(SourceConfig::new("http://127.0.0.1:9", 7));

    let result = client.fetch_history(0, 10).await;

    assert!(matches!(result, Err(SyncError::Transport(_))));
}

#[tokio::test]
async fn test_huge_count_pages_until_the_history_runs_dry() {
    let server = MockServer::start(|_, calls| {
        if calls < 3 {
            (
                200,
                history_page(&generated_tracks("Page", 100), END_CURSOR_PAGE_1 - 20000 * calls as i64),
            )
        } else {
            (200, history_page(&[], END_CURSOR_PAGE_2))
        }
    })
    .await;

    let result = client_for(&server).fetch_history(0, usize::MAX).await;

    assert!(matches!(result, Err(SyncError::EmptyPage { .. })));
    assert_eq!(server.requests().len(), 4);
}

#[tokio::test]
async fn test_oversized_page_is_cut_to_the_requested_count() {
    let server = MockServer::start(|_, _| {
        (200, history_page(&generated_tracks("Extra", 15), END_CURSOR_PAGE_1))
    })
    .await;

    let tracks = client_for(&server).fetch_history(0, 10).await.unwrap();

    assert_eq!(tracks.len(), 10);
    assert_eq!(tracks[9].title, "Extra 9");
}

#[tokio::test]
async fn test_oversized_pages_keep_the_total_exact() {
    let server = MockServer::start(|req, calls| {
        let first = req.variables()["first"].as_u64().unwrap() as usize;
        let tracks = generated_tracks(&format!("Page {}", calls + 1), first + 5);
        (200, history_page(&tracks, END_CURSOR_PAGE_1 - 20000 * calls as i64))
    })
    .await;

    let tracks = client_for(&server).fetch_history(0, 150).await.unwrap();

    assert_eq!(tracks.len(), 150);
    assert_eq!(tracks[99].title, "Page 1 99");
    assert_eq!(tracks[100].title, "Page 2 0");
}

#[tokio::test]
async fn test_graphql_errors_are_a_protocol_error() {
    let server = MockServer::start(|_, _| {
        (
            200,
            r#"{"errors":[{"message":"PersistedQueryNotFound"}],"data":null}"#.to_string(),
        )
    })
    .await;

    let result = client_for(&server).fetch_history(0, 10).await;

    match result {
        Err(SyncError::Protocol { status, body }) => {
            assert_eq!(status.as_u16(), 200);
            assert!(body.contains("PersistedQueryNotFound"));
        }
        other => panic!("expected a protocol error, got {:?}", other),
    }
}
