use std::sync::Arc;

use rainbow_snake::{
    api::{api, models::Status, Services},
    board::GRID_SIZE,
    client::ScoreClient,
    Error,
};
use reqwest::Url;

fn spawn_server() -> Url {
    let status = Status {
        name:      "rainbow-snake".to_owned(),
        version:   "0.1.0".to_owned(),
        author:    "tests".to_owned(),
        grid_size: GRID_SIZE,
        tick_ms:   100,
    };
    let routes = api(Arc::new(Services::in_memory()), status);
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    Url::parse(&format!("http://{addr}")).unwrap()
}

#[tokio::test]
async fn register_conflict_carries_suggestion() {
    let client = ScoreClient::new(spawn_server());

    client.register("fox").await.unwrap();
    match client.register("fox").await {
        Err(Error::Conflict {
            nickname,
            suggestion,
        }) => {
            assert_eq!(nickname, "fox");
            assert_eq!(suggestion, "fox1");
        }
        other => panic!("expected a conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn blank_nickname_is_a_validation_error() {
    let client = ScoreClient::new(spawn_server());

    assert!(matches!(
        client.register("").await,
        Err(Error::Validation(message)) if message == "Nickname is required"
    ));
}

#[tokio::test]
async fn leaderboard_is_ranked_and_truncated() {
    let client = ScoreClient::new(spawn_server());

    for (nickname, score) in [("fox", 5), ("owl", 9), ("cat", 1), ("fox", 3)] {
        client.record_score(nickname, score).await.unwrap();
    }

    let top = client.leaderboard(2).await.unwrap();
    let names: Vec<_> = top.iter().map(|e| e.nickname.as_str()).collect();
    assert_eq!(names, ["owl", "fox"]);
    assert_eq!(top[1].score, 5);
}

#[tokio::test]
async fn submitted_scores_arrive() {
    let client = ScoreClient::new(spawn_server());

    client.submit_score("fox".to_owned(), 12).await.unwrap();

    let scores = client.scores().await.unwrap();
    assert_eq!(scores.get("fox"), Some(&12));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // bind then drop to find a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        ScoreClient::new(Url::parse(&format!("http://{addr}")).unwrap());

    assert!(matches!(
        client.record_score("fox", 1).await,
        Err(Error::Transport(_))
    ));

    // fire-and-forget submission swallows the failure
    client.submit_score("fox".to_owned(), 1).await.unwrap();
}
