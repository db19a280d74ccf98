//! CLI tests for certreport
//!
//! These run the binary against a temporary database and configuration.

use assert_cmd::Command;
use certreport::{Certificate, CertificateMode, CertificateStatus, Course, LmsDatabase};
use chrono::{Duration, Utc};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

struct Fixture {
    _dir: TempDir,
    db: PathBuf,
    config: PathBuf,
}

impl Fixture {
    fn new(listed: &[&str]) -> Self {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("lms.db");
        let config = dir.path().join("config.json");
        let listings = serde_json::json!({ "course_listings": { "all": listed } });
        std::fs::write(&config, serde_json::to_string_pretty(&listings).unwrap()).unwrap();
        Self {
            _dir: dir,
            db,
            config,
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("certreport").unwrap();
        cmd.env_remove("CERTREPORT_DB")
            .env_remove("CERTREPORT_CONFIG")
            .arg("--db")
            .arg(&self.db)
            .arg("--config")
            .arg(&self.config);
        cmd
    }

    fn open(&self) -> LmsDatabase {
        LmsDatabase::open(Path::new(&self.db)).unwrap()
    }
}

fn seed_ended_course(db: &LmsDatabase, course_id: &str) {
    db.upsert_course(&Course {
        id: course_id.to_string(),
        display_name: None,
        start: None,
        end: Some(Utc::now() - Duration::days(5)),
    })
    .unwrap();
    let user = db.create_user("learner", "learner@example.com", "Learner").unwrap();
    db.enroll(user.id, course_id).unwrap();
    db.insert_certificate(&Certificate {
        user_id: user.id,
        course_id: course_id.to_string(),
        mode: CertificateMode::Verified,
        status: CertificateStatus::Downloadable,
    })
    .unwrap();
}

// =============================================================================
// Report
// =============================================================================

#[test]
fn test_report_prints_progress_and_table() {
    let fx = Fixture::new(&["MITx/6.002x/2012_Fall"]);
    seed_ended_course(&fx.open(), "MITx/6.002x/2012_Fall");

    fx.cmd()
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Looking up certificate states for MITx/6.002x/2012_Fall",
        ))
        .stdout(predicate::str::contains(format!("{:>26}", "course ID")))
        .stdout(predicate::str::contains(format!(
            "{:>26} {:>16} {:>16}",
            "MITx/6.002x/2012_Fall", 0, 1
        )));
}

#[test]
fn test_report_explicit_course_not_ended() {
    let fx = Fixture::new(&[]);
    let db = fx.open();
    db.upsert_course(&Course {
        id: "edX/Demo/2099".to_string(),
        display_name: None,
        start: None,
        end: Some(Utc::now() + Duration::days(365)),
    })
    .unwrap();

    fx.cmd()
        .args(["report", "--course", "edX/Demo/2099"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Looking up certificate states for edX/Demo/2099"));
}

#[test]
fn test_report_missing_course_fails() {
    let fx = Fixture::new(&["no/such/course"]);

    fx.cmd()
        .arg("report")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Course not found: no/such/course"));
}

#[test]
fn test_report_skip_missing() {
    let fx = Fixture::new(&["no/such/course"]);

    fx.cmd()
        .args(["report", "--skip-missing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("course ID"));
}

#[test]
fn test_report_json() {
    let fx = Fixture::new(&["MITx/6.002x/2012_Fall"]);
    seed_ended_course(&fx.open(), "MITx/6.002x/2012_Fall");

    let output = fx
        .cmd()
        .args(["report", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["course_id"], "MITx/6.002x/2012_Fall");
    assert_eq!(value[0]["metrics"]["verified"], 1);
    assert_eq!(value[0]["metrics"]["enrolled_current"], 1);
}

// =============================================================================
// Seeding and Data Entry
// =============================================================================

#[test]
fn test_seed_users_enrolls() {
    let fx = Fixture::new(&[]);

    fx.cmd()
        .args(["seed-users", "5", "course-v1:HarvardX+CS50x+2012"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let db = fx.open();
    let stats = db.get_statistics().unwrap();
    assert_eq!(stats.user_count, 5);
    assert_eq!(stats.enrollment_count, 5);
}

#[test]
fn test_seed_users_rejects_bad_course() {
    let fx = Fixture::new(&[]);

    fx.cmd()
        .args(["seed-users", "2", "not a course"])
        .assert()
        .failure();
    assert_eq!(fx.open().get_statistics().unwrap().user_count, 0);
}

#[test]
fn test_seed_users_rejects_oversized_count() {
    let fx = Fixture::new(&[]);

    fx.cmd()
        .args(["seed-users", "18446744073709551615"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("18446744073709551615"));
    assert_eq!(fx.open().get_statistics().unwrap().user_count, 0);
}

#[test]
fn test_course_add_and_list() {
    let fx = Fixture::new(&[]);

    fx.cmd()
        .args(["course", "add", "MITx/6.002x/2012_Fall", "--end", "2012-12-31"])
        .assert()
        .success();

    fx.cmd()
        .args(["course", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MITx/6.002x/2012_Fall"))
        .stdout(predicate::str::contains("2012-12-31"))
        .stdout(predicate::str::contains("Yes"));
}

#[test]
fn test_course_add_bad_date() {
    let fx = Fixture::new(&[]);

    fx.cmd()
        .args(["course", "add", "MITx/6.002x/2012_Fall", "--end", "someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_certificate_set_unknown_user() {
    let fx = Fixture::new(&[]);

    fx.cmd()
        .args(["certificate", "set", "ghost", "edX/Demo/2014", "--status", "downloadable"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User not found: ghost"));
}

#[test]
fn test_certificate_set_then_report() {
    let fx = Fixture::new(&[]);
    {
        let db = fx.open();
        db.create_user("alice", "alice@example.com", "Alice").unwrap();
    }

    fx.cmd()
        .args(["cert", "set", "alice", "edX/Demo/2014", "--mode", "audit", "--status", "notpassing"])
        .assert()
        .success();

    fx.cmd()
        .args(["report", "-c", "edX/Demo/2014", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"notpassing\": 1"))
        .stdout(predicate::str::contains("\"audit_enrolled\": 1"));
}
