//! End-to-end tests for the `scoreboard` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn scoreboard(data_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("scoreboard").unwrap();
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}

#[test]
fn status_before_new() {
    let dir = tempdir().unwrap();
    scoreboard(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("NOT STARTED"));
}

#[test]
fn over_and_wicket_scenario() {
    let dir = tempdir().unwrap();
    scoreboard(dir.path()).arg("new").assert().success();

    for _ in 0..4 {
        scoreboard(dir.path())
            .args(["score", "run"])
            .assert()
            .success();
    }
    scoreboard(dir.path())
        .args(["score", "ball"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4/0 (0.5 ov)"));
    scoreboard(dir.path())
        .args(["score", "dot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4/0 (1.0 ov)"));
    scoreboard(dir.path())
        .args(["score", "wicket"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4/1 (1.1 ov)"))
        .stdout(predicate::str::contains("frame: "));
}

#[test]
fn undo_at_floor_is_harmless() {
    let dir = tempdir().unwrap();
    scoreboard(dir.path()).arg("new").assert().success();
    scoreboard(dir.path())
        .args(["score", "ball", "--mode", "minus"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0/0 (0.0 ov)"));
}

#[test]
fn unknown_command_is_rejected() {
    let dir = tempdir().unwrap();
    scoreboard(dir.path()).arg("new").assert().success();
    scoreboard(dir.path())
        .args(["score", "six"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown command"));
}

#[test]
fn chase_shows_required_rate() {
    let dir = tempdir().unwrap();
    scoreboard(dir.path())
        .args(["new", "--target", "60", "--target-overs", "10"])
        .assert()
        .success();
    scoreboard(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Target:   60 in 10.0 overs"))
        .stdout(predicate::str::contains("RRR:      6.00"));
}

#[test]
fn invalid_target_balls_fails() {
    let dir = tempdir().unwrap();
    scoreboard(dir.path())
        .args(["new", "--target", "60", "--target-balls", "6"])
        .assert()
        .failure();
}

#[test]
fn export_then_import_on_peer() {
    let primary = tempdir().unwrap();
    let secondary = tempdir().unwrap();
    let secondary_config = secondary.path().join("scoreboard.toml");
    std::fs::write(&secondary_config, "[node]\nrole = \"secondary\"\n").unwrap();

    scoreboard(primary.path()).arg("new").assert().success();
    scoreboard(secondary.path()).arg("new").assert().success();
    scoreboard(primary.path())
        .args(["score", "leg-bye"])
        .assert()
        .success();

    let output = scoreboard(primary.path()).arg("export").output().unwrap();
    assert!(output.status.success());
    let frame = String::from_utf8(output.stdout).unwrap();

    scoreboard(secondary.path())
        .args(["import", frame.trim()])
        .assert()
        .success()
        .stdout(predicate::str::contains("replaced by 0xF0F0F0F0E1"))
        .stdout(predicate::str::contains("reply: "))
        .stdout(predicate::str::contains("1/0 (0.1 ov)"));
}

fn line_value(stdout: &[u8], prefix: &str) -> String {
    String::from_utf8_lossy(stdout)
        .lines()
        .find_map(|line| line.strip_prefix(prefix))
        .unwrap_or_else(|| panic!("no {prefix:?} line"))
        .trim()
        .to_string()
}

#[test]
fn ack_returned_from_peer_settles_link() {
    let primary = tempdir().unwrap();
    let secondary = tempdir().unwrap();
    let secondary_config = secondary.path().join("scoreboard.toml");
    std::fs::write(&secondary_config, "[node]\nrole = \"secondary\"\n").unwrap();

    scoreboard(primary.path()).arg("new").assert().success();
    scoreboard(secondary.path()).arg("new").assert().success();

    let output = scoreboard(primary.path())
        .args(["score", "run"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let frame = line_value(&output.stdout, "frame: ");

    let output = scoreboard(secondary.path())
        .args(["import", &frame])
        .output()
        .unwrap();
    assert!(output.status.success());
    let reply = line_value(&output.stdout, "reply: ");

    scoreboard(primary.path())
        .args(["import", &reply])
        .assert()
        .success()
        .stdout(predicate::str::contains("in sync at sequence 1"))
        .stdout(predicate::str::contains("1/0 (0.1 ov)"));
}

#[test]
fn diverged_ack_is_reported_and_resent() {
    use score_core::{MatchState, Mode};
    use score_types::{Frame, MessageType, NodeRole};

    let dir = tempdir().unwrap();
    scoreboard(dir.path()).arg("new").assert().success();
    scoreboard(dir.path())
        .args(["score", "run"])
        .assert()
        .success();

    let mut peer_copy = MatchState::new();
    peer_copy.wicket(Mode::Plus);
    let ack = Frame::new(
        MessageType::Ack,
        NodeRole::Secondary.address(),
        1,
        peer_copy.to_wire().to_vec(),
    );

    scoreboard(dir.path())
        .args(["import", &hex::encode(ack.to_bytes().unwrap())])
        .assert()
        .success()
        .stdout(predicate::str::contains("DIVERGED: local 1/0 vs peer 0/1"))
        .stdout(predicate::str::contains("reply: "))
        .stdout(predicate::str::contains("1/0 (0.1 ov)"));
}

#[test]
fn repeat_flag_needs_extra() {
    let dir = tempdir().unwrap();
    scoreboard(dir.path()).arg("new").assert().success();
    scoreboard(dir.path())
        .args(["score", "run", "--repeat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--repeat only applies to extra"));
}

#[test]
fn corrupt_match_file_is_not_hidden() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("match.json"), "garbage").unwrap();
    scoreboard(dir.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid match file"));
}
