//! HTTP-level integration tests for `POST /api/backup`.

mod common;

use std::io::Write;

use axum::http::StatusCode;
use common::{body_json, post_backup, TEST_BACKUP_TOKEN};
use mastergym_api::config::BackupConfig;
use sqlx::PgPool;

fn script(body: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new()
        .suffix(".sh")
        .tempfile()
        .expect("create temp file");
    write!(f, "{body}").expect("write script");
    f
}

fn backup_config(token: Option<&str>, script: &std::path::Path) -> BackupConfig {
    BackupConfig {
        token: token.map(str::to_string),
        script_path: script.to_path_buf(),
        interpreter: "bash".to_string(),
        timeout_secs: 10,
    }
}

// ---------------------------------------------------------------------------
// Test: Valid token runs the script and returns its output
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn valid_token_runs_script(pool: PgPool) {
    let script = script("echo 'dump written'\n");
    let config =
        common::test_config_with_backup(backup_config(Some(TEST_BACKUP_TOKEN), script.path()));
    let app = common::build_test_app_with(pool, config);

    let response = post_backup(app, Some(TEST_BACKUP_TOKEN)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["success"], true);
    assert_eq!(json["data"]["exit_code"], 0);
    assert_eq!(json["data"]["output"], "dump written");
}

// ---------------------------------------------------------------------------
// Test: A backup may outlast the request timeout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn backup_is_not_cut_by_request_timeout(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let done = dir.path().join("done");
    let script = script(&format!(
        "sleep 3\ntouch '{}'\necho finished\n",
        done.display()
    ));
    let mut config =
        common::test_config_with_backup(backup_config(Some(TEST_BACKUP_TOKEN), script.path()));
    config.request_timeout_secs = 1;
    let app = common::build_test_app_with(pool, config);

    let response = post_backup(app, Some(TEST_BACKUP_TOKEN)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["success"], true);
    assert_eq!(json["data"]["exit_code"], 0);
    assert_eq!(json["data"]["output"], "finished");
    assert!(done.exists());
}

// ---------------------------------------------------------------------------
// Test: Other routes still honour the request timeout setting
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn api_routes_keep_working_with_short_request_timeout(pool: PgPool) {
    let mut config = common::test_config();
    config.request_timeout_secs = 1;
    let app = common::build_test_app_with(pool, config);

    let response = common::get_as(app, "/api/clients", common::GYM_A).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: Failing script reports its exit code
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn failing_script_reports_exit_code(pool: PgPool) {
    let script = script("exit 4\n");
    let config =
        common::test_config_with_backup(backup_config(Some(TEST_BACKUP_TOKEN), script.path()));
    let app = common::build_test_app_with(pool, config);

    let json = body_json(post_backup(app, Some(TEST_BACKUP_TOKEN)).await).await;
    assert_eq!(json["data"]["success"], false);
    assert_eq!(json["data"]["exit_code"], 4);
    assert_eq!(json["data"]["output"], "Backup failed.");
}

// ---------------------------------------------------------------------------
// Test: Wrong or missing token is refused without running anything
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_token_is_refused(pool: PgPool) {
    let marker = tempfile::tempdir().expect("tempdir");
    let marker_file = marker.path().join("ran");
    let script = script(&format!("touch '{}'\n", marker_file.display()));
    let config =
        common::test_config_with_backup(backup_config(Some(TEST_BACKUP_TOKEN), script.path()));

    for token in [Some("nope"), None] {
        let app = common::build_test_app_with(pool.clone(), config.clone());
        let response = post_backup(app, token).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"]["success"], false);
        assert_eq!(json["data"]["exit_code"], -1);
        assert_eq!(json["data"]["output"], "Invalid backup token.");
    }
    assert!(!marker_file.exists());
}

// ---------------------------------------------------------------------------
// Test: Unconfigured token disables the endpoint
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unconfigured_token_disables_backups(pool: PgPool) {
    let script = script("echo hi\n");
    let config = common::test_config_with_backup(backup_config(Some("  "), script.path()));
    let app = common::build_test_app_with(pool, config);

    let json = body_json(post_backup(app, Some("  ")).await).await;
    assert_eq!(json["data"]["success"], false);
    assert_eq!(json["data"]["output"], "Backup token not configured.");
}

// ---------------------------------------------------------------------------
// Test: Missing script is reported
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_script_is_reported(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = body_json(post_backup(app, Some(TEST_BACKUP_TOKEN)).await).await;
    assert_eq!(json["data"]["success"], false);
    assert_eq!(json["data"]["exit_code"], -1);
    assert_eq!(json["data"]["output"], "Backup script not found.");
}

// ---------------------------------------------------------------------------
// Test: Backup does not need a JWT
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn backup_does_not_require_bearer_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_backup(app, Some("wrong")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
