//! End-to-end switching scenarios against the in-memory window server.

use casement_core::groups::GroupRepository;
use casement_core::switching::{SwitchOutcome, minimize_all, restore_all, switch_to};
use casement_core::test_support::FakeWindowServer;
use casement_core::{Group, GroupError, WindowReference};
use tempfile::TempDir;

fn refs(pairs: &[(&str, &str)]) -> Vec<WindowReference> {
    pairs
        .iter()
        .map(|(app, title)| WindowReference::new(app, title, None))
        .collect()
}

fn dev_group(repo: &GroupRepository) -> Group {
    repo.create("Dev", refs(&[("Cursor", "main.ts"), ("Terminal", "bash")]))
        .unwrap()
}

fn setup() -> (TempDir, GroupRepository) {
    let dir = TempDir::new().unwrap();
    let repo = GroupRepository::new(dir.path().join("groups.json"));
    (dir, repo)
}

fn desk() -> FakeWindowServer {
    FakeWindowServer::new()
        .with_app("Cursor", &["main.ts"])
        .with_app("Terminal", &["bash"])
        .with_app("Notes", &["Untitled"])
        .with_app("Ghostty", &["casement switch"])
        .excluding("Ghostty")
}

#[test]
fn test_dev_group_switch() {
    let (_dir, repo) = setup();
    let dev = dev_group(&repo);
    let server = desk();

    let result = switch_to(&server, &dev).unwrap();

    assert_eq!(result.shown, 2);
    assert!(result.not_found.is_empty());
    assert_eq!(result.outcome(), SwitchOutcome::Success);
    assert_eq!(server.is_minimized("Notes", "Untitled"), Some(true));
    assert_eq!(server.is_minimized("Cursor", "main.ts"), Some(false));
    assert_eq!(server.is_minimized("Terminal", "bash"), Some(false));
    // The host terminal is never touched.
    assert_eq!(server.is_minimized("Ghostty", "casement switch"), Some(false));
}

#[test]
fn test_dev_group_with_terminal_not_running() {
    let (_dir, repo) = setup();
    let dev = dev_group(&repo);
    let server = desk();
    server.quit("Terminal");

    let result = switch_to(&server, &dev).unwrap();

    assert_eq!(result.shown, 1);
    assert_eq!(result.not_found, refs(&[("Terminal", "bash")]));
    assert_eq!(result.outcome(), SwitchOutcome::Partial);
    assert_eq!(server.frontmost().as_deref(), Some("Cursor"));
    assert_eq!(server.is_minimized("Notes", "Untitled"), Some(true));
}

#[test]
fn test_zero_matched_windows_is_failure() {
    let (_dir, repo) = setup();
    let dev = dev_group(&repo);
    let server = FakeWindowServer::new().with_app("Notes", &["Untitled"]);

    let result = switch_to(&server, &dev).unwrap();

    assert_eq!(result.shown, 0);
    assert_eq!(result.not_found, dev.windows);
    assert_eq!(result.outcome(), SwitchOutcome::Failed);
}

#[test]
fn test_switch_is_idempotent() {
    let (_dir, repo) = setup();
    let dev = dev_group(&repo);
    let server = desk();

    let first = switch_to(&server, &dev).unwrap();
    let screen_after_first = server.on_screen();
    let second = switch_to(&server, &dev).unwrap();

    assert_eq!(server.on_screen(), screen_after_first);
    assert_eq!(first.shown, second.shown);
    assert_eq!(first.not_found, second.not_found);
    assert_eq!(second.minimized, 0);
}

#[test]
fn test_only_group_windows_remain_on_screen() {
    let (_dir, repo) = setup();
    let dev = dev_group(&repo);
    let server = desk()
        .with_app("Safari", &["Docs", "Docs", "News"])
        .with_app("iTerm2", &["zsh", "zsh"])
        .with_minimized_window("Cursor", "scratch.ts");

    let result = switch_to(&server, &dev).unwrap();

    assert_eq!(result.minimized, 6);
    assert_eq!(result.minimize_failures, 0);
    let mut on_screen = server.on_screen();
    on_screen.retain(|(app, _)| app != "Ghostty");
    on_screen.sort();
    assert_eq!(
        on_screen,
        vec![
            ("Cursor".to_string(), "main.ts".to_string()),
            ("Terminal".to_string(), "bash".to_string()),
        ]
    );
    assert_eq!(server.front_window("Cursor").as_deref(), Some("main.ts"));
    assert_eq!(server.front_window("Terminal").as_deref(), Some("bash"));
    assert_eq!(server.is_minimized("Cursor", "scratch.ts"), Some(true));
}

#[test]
fn test_minimize_all_hides_same_titled_windows() {
    let server = desk()
        .with_app("Safari", &["Docs", "Docs", "News"])
        .with_app("iTerm2", &["zsh", "zsh"]);

    assert_eq!(minimize_all(&server).unwrap(), 8);

    assert!(server.on_screen().is_empty());
    assert_eq!(server.is_minimized("Ghostty", "casement switch"), Some(false));
    assert_eq!(minimize_all(&server).unwrap(), 0);
}

#[test]
fn test_restore_all_after_switch_and_hide() {
    let (_dir, repo) = setup();
    let dev = dev_group(&repo);
    let server = desk().with_hidden_app("Mail", &["Inbox"]);

    switch_to(&server, &dev).unwrap();
    assert!(server.minimized_count() > 0);
    restore_all(&server).unwrap();
    assert_eq!(server.minimized_count(), 0);

    assert_eq!(minimize_all(&server).unwrap(), 4);
    restore_all(&server).unwrap();
    assert_eq!(server.minimized_count(), 0);
    assert!(server.app("Mail").unwrap().visible);
}

#[test]
fn test_group_names_collide_case_insensitively() {
    let (_dir, repo) = setup();
    repo.create("Work", refs(&[("Slack", "general")])).unwrap();

    let result = repo.create("work", refs(&[("Mail", "Inbox")]));
    assert!(matches!(result, Err(GroupError::NameCollision { .. })));
}

#[test]
fn test_switch_to_reloaded_group() {
    let (_dir, repo) = setup();
    let dev = dev_group(&repo);
    let server = desk();

    let reloaded = repo.find_by_name("dev").unwrap();
    assert_eq!(reloaded, dev);
    assert_eq!(switch_to(&server, &reloaded).unwrap().shown, 2);
}
