//! End-to-end runs of the `taxipot` binary against a fake server.

use assert_cmd::Command;
use predicates::prelude::*;
use taxipot_testing::fixtures::{PotBuilder, jwt_with_email, pots};
use taxipot_testing::{BackendState, FakeBackend, TestWorld};
use tokio::runtime::Runtime;

/// Server on its own runtime; the binary is run synchronously meanwhile.
struct Server {
    backend: FakeBackend,
    _runtime: Runtime,
}

impl Server {
    fn start(state: BackendState) -> Self {
        let runtime = Runtime::new().unwrap();
        let backend = runtime.block_on(FakeBackend::start(state)).unwrap();
        Self {
            backend,
            _runtime: runtime,
        }
    }

    fn world(&self) -> TestWorld {
        TestWorld::new()
            .unwrap()
            .with_base_url(self.backend.base_url())
    }
}

#[test]
fn test_help_lists_commands() {
    let world = TestWorld::new().unwrap();
    let result = world.run(&["--help"]).unwrap();
    assert!(result.success());
    for command in ["tui", "rooms", "me", "landmarks", "login", "logout"] {
        assert!(result.stdout.contains(command), "missing {}", command);
    }
}

#[test]
#[allow(deprecated)]
fn test_unknown_command_fails_with_usage() {
    Command::cargo_bin("taxipot")
        .unwrap()
        .arg("rideshare")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: taxipot"));
}

#[test]
#[allow(deprecated)]
fn test_json_format_emits_envelope() {
    let dir = tempfile::TempDir::new().unwrap();
    Command::cargo_bin("taxipot")
        .unwrap()
        .args(["--data-dir"])
        .arg(dir.path())
        .args(["--format", "json", "me", "show"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("{")
                .and(predicate::str::contains("\"nickname\": \"학부생\"")),
        );
}

#[test]
fn test_landmarks_are_listed_offline() {
    let world = TestWorld::new().unwrap();
    let result = world.run(&["landmarks"]).unwrap();
    assert!(result.success(), "{}", result.stderr);
    assert!(result.stdout.contains("1    서울대입구역"));
    assert!(result.stdout.contains("3    자연대"));
}

#[test]
fn test_login_without_token_prints_redirect() {
    let world = TestWorld::new().unwrap();
    let result = world.run(&["login"]).unwrap();
    assert!(result.success(), "{}", result.stderr);
    assert!(
        result
            .stdout
            .contains("https://snuxi.com/login?redirect_uri=http%3A%2F%2Flocalhost%3A5173")
    );
}

#[test]
fn test_login_rejects_non_snu_account() {
    let world = TestWorld::new().unwrap();
    let token = jwt_with_email("kim@gmail.com");
    let result = world.run(&["login", "--token", &token]).unwrap();
    assert!(!result.success());
    assert!(result.stderr.contains("SNU email"));
    assert_eq!(world.credential(), None);
}

#[test]
fn test_login_stores_credential_and_profile_shows_email() {
    let world = TestWorld::new().unwrap();
    let token = jwt_with_email("kim@snu.ac.kr");
    let result = world.run(&["login", "--token", &token]).unwrap();
    assert!(result.success(), "{}", result.stderr);
    assert!(result.stdout.contains("Logged in as kim@snu.ac.kr"));
    assert_eq!(world.credential().as_deref(), Some(token.as_str()));

    let profile = world.run(&["me", "show"]).unwrap();
    assert!(profile.stdout.contains("Email:    kim@snu.ac.kr"));
    assert!(profile.stdout.contains("Nickname: 학부생"));
}

#[test]
fn test_search_renders_cards() {
    let server = Server::start(BackendState::with_pots(vec![
        PotBuilder::new(1).route(1, 3).capacity(2, 4).build(),
        PotBuilder::new(2).route(1, 3).capacity(4, 4).build(),
        PotBuilder::new(3).route(2, 3).build(),
    ]));
    let world = server.world();

    let result = world
        .run(&["rooms", "search", "--from", "1", "--to", "3"])
        .unwrap();
    assert!(result.success(), "{}", result.stderr);
    assert!(result.stdout.starts_with("서울대입구역 → 자연대"));
    assert!(result.stdout.contains("[#1] 서울대입구역 → 자연대"));
    assert!(result.stdout.contains("[#2]"));
    assert!(!result.stdout.contains("[#3]"));
    assert!(result.stdout.contains("taxipot rooms join 1"));

    let request = server.backend.last_request().unwrap();
    assert_eq!(request.param("departureId"), Some("1"));
    assert_eq!(request.param("page"), Some("0"));
}

#[test]
fn test_search_all_follows_every_page_as_json() {
    let server = Server::start(BackendState::with_pots(pots(1..=12, 1, 2)));
    let world = server.world().with_format("json");

    let result = world
        .run(&["rooms", "search", "--size", "5", "--all"])
        .unwrap();
    assert!(result.success(), "{}", result.stderr);

    let json = result.json().unwrap();
    let rooms = json["content"]["rooms"].as_array().unwrap();
    assert_eq!(rooms.len(), 12);
    assert_eq!(json["content"]["has_more"], false);
    assert_eq!(json["content"]["page"], 2);
    assert_eq!(server.backend.requests().len(), 3);
}

#[test]
fn test_quiet_search_prints_ids_only() {
    let server = Server::start(BackendState::with_pots(pots([4, 8], 1, 2)));
    let world = server.world();

    let result = world.run(&["rooms", "search", "--quiet"]).unwrap();
    assert!(result.success(), "{}", result.stderr);
    assert_eq!(result.stdout, "4\n8\n");
}

#[test]
fn test_search_passes_unlisted_landmark_to_server() {
    let server = Server::start(BackendState::with_pots(pots([4, 8], 1, 2)));
    let world = server.world();

    let result = world
        .run(&["rooms", "search", "--from", "99", "--quiet"])
        .unwrap();
    assert!(result.success(), "{}", result.stderr);
    assert_eq!(result.stdout, "");

    let request = server.backend.last_request().unwrap();
    assert_eq!(request.param("departureId"), Some("99"));
    assert_eq!(request.param("destinationId"), None);
}

#[test]
fn test_join_requires_login() {
    let world = TestWorld::new().unwrap().with_base_url("http://127.0.0.1:1");
    let result = world.run(&["rooms", "join", "5"]).unwrap();
    assert!(!result.success());
    assert!(result.stderr.contains("taxipot login"));
}

#[test]
fn test_join_then_leave() {
    let server = Server::start(BackendState::with_pots(pots([5], 1, 2)));
    let world = server
        .world()
        .with_credential(&jwt_with_email("kim@snu.ac.kr"))
        .unwrap();

    let joined = world.run(&["rooms", "join", "5"]).unwrap();
    assert!(joined.success(), "{}", joined.stderr);
    assert!(joined.stdout.contains("Joined room #5"));
    assert!(joined.stdout.contains("Chat: /chat/5"));
    assert_eq!(server.backend.with_state(|s| s.current_pot), Some(5));

    let mine = world.run(&["me", "pot"]).unwrap();
    assert!(mine.success(), "{}", mine.stderr);
    assert!(mine.stdout.contains("taxipot rooms leave 5"));

    let left = world.run(&["rooms", "leave", "5"]).unwrap();
    assert!(left.success(), "{}", left.stderr);
    assert!(left.stdout.contains("Left room #5"));
    assert_eq!(server.backend.with_state(|s| s.current_pot), None);
}

#[test]
fn test_join_rejection_shows_server_message() {
    let mut state = BackendState::with_pots(pots([9], 1, 2));
    state.join_rejection = Some((409, "방이 가득 찼습니다".to_string()));
    let server = Server::start(state);
    let world = server
        .world()
        .with_credential(&jwt_with_email("kim@snu.ac.kr"))
        .unwrap();

    let result = world.run(&["rooms", "join", "9"]).unwrap();
    assert!(!result.success());
    assert!(result.stderr.contains("방이 가득 찼습니다"));
}

#[test]
fn test_create_validates_before_sending() {
    let server = Server::start(BackendState::default());
    let world = server
        .world()
        .with_credential(&jwt_with_email("kim@snu.ac.kr"))
        .unwrap();

    let result = world
        .run(&[
            "rooms", "create", "--from", "1", "--to", "3", "--time", "2099-01-01T09:00",
            "--min", "4", "--max", "2",
        ])
        .unwrap();
    assert!(!result.success());
    assert!(result.stderr.contains("인원은"));
    assert!(server.backend.requests().is_empty());
}

#[test]
fn test_create_room() {
    let server = Server::start(BackendState::default());
    let world = server
        .world()
        .with_credential(&jwt_with_email("kim@snu.ac.kr"))
        .unwrap();

    let result = world
        .run(&[
            "rooms", "create", "--from", "6", "--to", "1", "--time", "2099-01-01T09:00",
            "--fee", "6000",
        ])
        .unwrap();
    assert!(result.success(), "{}", result.stderr);
    assert!(result.stdout.contains("[#1]"));
    assert!(result.stdout.contains("Chat: /chat/1"));

    let stored = server.backend.with_state(|s| s.pots.last().cloned()).unwrap();
    assert_eq!(stored.departure_id, 6);
    assert_eq!(stored.destination_id, 1);
}

#[test]
fn test_logout_forgets_credential() {
    let server = Server::start(BackendState::default());
    let world = server
        .world()
        .with_credential(&jwt_with_email("kim@snu.ac.kr"))
        .unwrap();

    let result = world.run(&["logout"]).unwrap();
    assert!(result.success(), "{}", result.stderr);
    assert!(result.stdout.contains("Logged out."));
    assert_eq!(world.credential(), None);
    assert_eq!(server.backend.last_request().unwrap().path, "/logout");
}
