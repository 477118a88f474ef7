mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;

fn detail_row(jadwal: &str) -> Value {
    json!({
        "id_pd": "pd-1", "nik": "3201000000000001", "semester": "20241",
        "id_kelas": "10|11|12", "nama_kelas": "A|B|C",
        "nama_matakuliah": "Kalkulus|Fisika|Kimia", "kode_matakuliah": "MK1|MK2|MK3",
        "id_dosen_pengajar": "", "jadwal": jadwal
    })
}

#[tokio::test]
async fn details_are_unflattened_per_class() -> Result<()> {
    let executor = common::fixture()
        .on(&["FROM setting"], vec![json!({"value": "20241"})])
        .on_count(&["FROM nilai"], 1)
        .on(&["FROM nilai"], vec![detail_row("Senin-08:00-10:00|Selasa-08:00-10:00")]);
    let server = TestServer::spawn(executor).await?;

    let (status, body) = server.get("/api/misca/student_classes_details", &[]).await?;
    assert_eq!(status, StatusCode::OK);

    let student = &body["data"]["list"][0];
    assert_eq!(student["id_pd"], "pd-1");
    assert_eq!(student["semester"], "20241");
    assert_eq!(
        student["kelas_perkuliahan"],
        json!([
            {"id_kelas": "10", "nama_kelas": "A", "nama_matakuliah": "Kalkulus", "kode_matakuliah": "MK1", "id_dosen_pengajar": "", "jadwal": "Senin-08:00-10:00"},
            {"id_kelas": "11", "nama_kelas": "B", "nama_matakuliah": "Fisika", "kode_matakuliah": "MK2", "id_dosen_pengajar": "", "jadwal": "Selasa-08:00-10:00"},
            {"id_kelas": "12", "nama_kelas": "C", "nama_matakuliah": "Kimia", "kode_matakuliah": "MK3", "id_dosen_pengajar": "", "jadwal": ""}
        ])
    );

    let executed = server.executor.executed();
    let count = executed.iter().find(|sql| sql.query.starts_with("SELECT COUNT(*)")).expect("count query");
    assert_eq!(count.params, vec![json!("20241")]);
    Ok(())
}

#[tokio::test]
async fn strict_mode_reports_mismatch() -> Result<()> {
    let config = common::config(&[("UNFLATTEN_MODE", "strict")]);
    let executor = common::fixture()
        .on_count(&["FROM nilai"], 1)
        .on(&["FROM nilai"], vec![detail_row("Senin-08:00-10:00|Selasa-08:00-10:00")]);
    let server = TestServer::spawn_with(config, executor).await?;

    let (status, body) = server.get("/api/misca/student_classes_details?semester=20241", &[]).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["errors"]
        .as_str()
        .unwrap_or_default()
        .starts_with("Data mismatch: all pipe-separated fields must have the same number of elements"));
    Ok(())
}

#[tokio::test]
async fn simple_list_keeps_joined_ids() -> Result<()> {
    let executor = common::fixture()
        .on_count(&["FROM nilai"], 1)
        .on(&["FROM nilai"], vec![json!({"id_pd": "pd-1", "nik": "3201000000000001", "id_kelas": "10|11|12", "semester": "20232"})]);
    let server = TestServer::spawn(executor).await?;

    let (status, body) = server.get("/api/misca/student_classes?semester=20232", &[]).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["list"][0]["id_kelas"], "10|11|12");
    assert_eq!(body["data"]["page_info"]["total_data"], 1);
    Ok(())
}

#[tokio::test]
async fn no_active_semester_is_404() -> Result<()> {
    let server = TestServer::spawn(common::fixture()).await?;

    let (status, body) = server.get("/api/misca/student_classes/total", &[]).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Active semester not found");

    let (status, _) = server.get("/api/misca/classes", &[("X-Instance-Mode", "smart")]).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn class_total_uses_requested_semester() -> Result<()> {
    let server = TestServer::spawn(common::fixture().on_count(&["FROM kelaskuliah"], 87)).await?;
    let (status, body) = server.get("/api/misca/classes/total?semester=20232", &[]).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 87);
    Ok(())
}
