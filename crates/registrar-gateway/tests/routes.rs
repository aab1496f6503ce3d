//! Router tests against a store built from a small data directory.

use std::fs;

use axum::http::StatusCode;
use axum_test::TestServer;
use registrar_core::{LoadConfig, Store};
use registrar_gateway::{create_router, AppState, GatewayConfig};
use serde_json::Value;

struct Fixture {
    server: TestServer,
    _dir: tempfile::TempDir,
}

fn fixture(with_db: bool) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path();
    fs::write(path.join("majors.txt"), "SFEN\tR\tSSW 540\nSFEN\tE\tCS 501\n").unwrap();
    fs::write(path.join("students.txt"), "1\tA\tSFEN\n2\tC\tSFEN\n").unwrap();
    fs::write(path.join("instructors.txt"), "99\t<Einstein>, A\tSFEN\n98\tD\tSFEN\n").unwrap();
    fs::write(
        path.join("grades.txt"),
        "1\tSSW 540\tA\t99\n2\tSSW 540\tB\t98\n2\tCS 501\tA\t99\n",
    )
    .unwrap();

    let db = path.join("registrar.db");
    if with_db {
        let mut store = Store::open(&db).unwrap();
        store.import(&LoadConfig::new(path)).unwrap();
    }

    let app = create_router(AppState::new(GatewayConfig::new(&db)));
    Fixture {
        server: TestServer::new(app).unwrap(),
        _dir: dir,
    }
}

#[tokio::test]
async fn test_health() {
    let fixture = fixture(true);
    let response = fixture.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store_available"], true);
}

#[tokio::test]
async fn test_health_degraded_without_db() {
    let fixture = fixture(false);
    let body: Value = fixture.server.get("/health").await.json();

    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn test_instructor_page() {
    let fixture = fixture(true);
    let response = fixture.server.get("/instructors").await;

    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("<h1>Instructors Summary</h1>"));
    assert!(page.contains("Number of students by class and instructor"));
    assert!(page.contains("&lt;Einstein&gt;, A"));
    assert!(page.contains("<td>98</td><td>D</td><td>SFEN</td><td>SSW 540</td><td>1</td>"));
}

#[tokio::test]
async fn test_instructor_json_counts_per_instructor() {
    let fixture = fixture(true);
    let body: Value = fixture.server.get("/api/instructors").await.json();

    assert_eq!(body["success"], true);
    let rows = body["data"].as_array().unwrap();
    let summary: Vec<_> = rows
        .iter()
        .map(|r| {
            (
                r["cwid"].as_str().unwrap().to_string(),
                r["course"].as_str().unwrap().to_string(),
                r["students"].as_u64().unwrap(),
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            ("99".to_string(), "SSW 540".to_string(), 1),
            ("99".to_string(), "CS 501".to_string(), 1),
            ("98".to_string(), "SSW 540".to_string(), 1),
        ]
    );
}

#[tokio::test]
async fn test_missing_db_is_unavailable() {
    let fixture = fixture(false);
    let response = fixture.server.get("/instructors").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["code"], "STORE_UNAVAILABLE");
}
