use mock_api::{InMemoryStore, MockCaptions, MockComments, MockServer, MockVideo, Store};
use std::path::Path;
use std::process::{Command, Output};
use std::sync::Arc;

fn fetcher_command(workdir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_fetcher"));
    command
        .current_dir(workdir)
        .env_remove("YOUTUBE_API_KEY")
        .env_remove("YOUTUBE_API_BASE_URL")
        .env_remove("YOUTUBE_TIMEDTEXT_URL")
        .env("RUST_LOG", "warn");
    command
}

#[test]
fn test_missing_api_key_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();

    let output = fetcher_command(dir.path()).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("YOUTUBE_API_KEY"), "stderr: {stderr}");
    assert!(!dir.path().join("lottery_videos_data.json").exists());
}

#[test]
fn test_log_filter_from_dotenv() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "RUST_LOG=debug\n").unwrap();

    let output = fetcher_command(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Loaded .env"), "stderr: {stderr}");
}

#[test]
fn test_bad_catalog_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("catalog.json"), "not json").unwrap();

    let output = fetcher_command(dir.path())
        .env("YOUTUBE_API_KEY", "k")
        .args(["--catalog", "catalog.json"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("catalog error"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_end_to_end_against_mock() {
    let store = InMemoryStore::new();
    store.add_video(MockVideo::new("duAeRtYeC0E", "Powerball 12-16-24"));
    store.set_captions("duAeRtYeC0E", MockCaptions::uploaded("en", &[(0, 900, "numbers")]));
    store.add_video(MockVideo::new("quietVideo1", "Quiet"));
    store.set_comments("quietVideo1", MockComments::Disabled);
    let server = MockServer::start(Arc::new(store), Some("e2e-key")).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("catalog.json"),
        r#"{"Lottery": ["https://www.youtube.com/watch?v=duAeRtYeC0E", "quietVideo1", "gone1234567", "https://vimeo.com/1"]}"#,
    )
    .unwrap();

    let mut command = fetcher_command(dir.path());
    command
        .env("YOUTUBE_API_KEY", "e2e-key")
        .env("YOUTUBE_API_BASE_URL", server.api_base())
        .env("YOUTUBE_TIMEDTEXT_URL", server.timedtext_url())
        .args(["--catalog", "catalog.json", "--output", "out.json"]);
    let output: Output = tokio::task::spawn_blocking(move || command.output())
        .await
        .unwrap()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("out.json")).unwrap())
            .unwrap();
    let lottery = written["Lottery"].as_array().unwrap();
    assert_eq!(lottery.len(), 4);
    assert_eq!(lottery[0]["transcript"][0]["text"], "numbers");
    assert_eq!(lottery[1]["top_comments"]["unavailable"], "comments_disabled");
    assert_eq!(lottery[2]["metadata"]["unavailable"], "video_not_found");
    assert_eq!(lottery[3]["video_id"], "https://vimeo.com/1");
    assert_eq!(lottery[3]["metadata"]["unavailable"], "video_not_found");
}
