mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;

fn students(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|i| {
            json!({
                "id": i, "name": format!("Mahasiswa {}", i), "gender": "L",
                "nik": "3201000000000001", "email": null, "handphone": null, "telephone": null
            })
        })
        .collect()
}

#[tokio::test]
async fn second_page_carries_page_info() -> Result<()> {
    let executor = common::fixture()
        .on_count(&["FROM mahasiswa"], 25)
        .on(&["FROM mahasiswa"], students(10));
    let server = TestServer::spawn(executor).await?;

    let (status, body) = server.get("/api/misca/students?current_page=2&per_page=10", &[]).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully retrieved students");
    assert_eq!(body["data"]["list"].as_array().map(Vec::len), Some(10));

    let page_info = &body["data"]["page_info"];
    assert_eq!(page_info["current_page"], 2);
    assert_eq!(page_info["last_page"], 3);
    assert_eq!(page_info["from"], 11);
    assert_eq!(page_info["to"], 20);
    assert_eq!(page_info["total_data"], 25);
    assert_eq!(page_info["total_data_in_current_page"], 10);
    assert_eq!(page_info["has_previous_page"], true);
    assert_eq!(page_info["has_next_page"], true);

    let page_query = server
        .executor
        .executed()
        .into_iter()
        .find(|sql| sql.query.starts_with("SELECT id, nama_mahasiswa AS name"))
        .expect("page query");
    assert_eq!(page_query.params, vec![json!(10), json!(10)]);
    Ok(())
}

#[tokio::test]
async fn every_violation_is_reported() -> Result<()> {
    let server = TestServer::spawn(common::fixture()).await?;
    let (status, body) = server.get("/api/misca/students?current_page=0&per_page=-1&order=up", &[]).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "current_page must be at least 1, got 0, per_page must be greater than 0, got -1, order must be one of [asc desc], got 'up'"
    );
    assert_eq!(body["errors"], body["message"]);
    Ok(())
}

#[tokio::test]
async fn non_numeric_page_is_bad_request() -> Result<()> {
    let server = TestServer::spawn(common::fixture()).await?;
    let (status, body) = server.get("/api/misca/students?per_page=abc", &[]).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap_or_default().starts_with("invalid query string"));
    Ok(())
}

#[tokio::test]
async fn unknown_sort_is_bad_request() -> Result<()> {
    let server = TestServer::spawn(common::fixture()).await?;
    let (status, body) = server.get("/api/misca/students?sort_by=password", &[]).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap_or_default().starts_with("sort_by must be one of ["));
    Ok(())
}

#[tokio::test]
async fn smart_mode_searches_smart_columns() -> Result<()> {
    let server = TestServer::spawn(common::fixture()).await?;
    let (status, body) = server
        .get("/api/misca/students?keyword=sri&sort_by=name&order=desc", &[("X-Instance-Mode", "SMART")])
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["list"], json!([]));
    assert_eq!(body["data"]["page_info"]["total_data"], 0);
    assert_eq!(body["data"]["page_info"]["last_page"], 0);

    let executed = server.executor.executed();
    let page_query = executed.last().expect("page query");
    assert!(page_query.query.contains("(nm_pd LIKE ? OR nik LIKE ?)"));
    assert!(page_query.query.contains("ORDER BY nm_pd DESC"));
    assert_eq!(page_query.params[..2], [json!("%sri%"), json!("%sri%")]);
    Ok(())
}

#[tokio::test]
async fn per_page_is_capped() -> Result<()> {
    let config = common::config(&[("PAGINATION_MAX_PER_PAGE", "20")]);
    let server = TestServer::spawn_with(config, common::fixture().on_count(&["FROM dosen"], 100)).await?;
    let (status, body) = server.get("/api/misca/lecturers?per_page=500", &[]).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["page_info"]["per_page"], 20);
    assert_eq!(body["data"]["page_info"]["last_page"], 5);
    Ok(())
}

#[tokio::test]
async fn totals_use_total_envelope() -> Result<()> {
    let server = TestServer::spawn(common::fixture().on_count(&["FROM mahasiswa"], 1234)).await?;
    let (status, body) = server.get("/api/misca/students/total", &[]).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully retrieved total students");
    assert_eq!(body["data"], json!({"total": 1234}));
    Ok(())
}
