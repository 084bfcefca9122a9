// Single-field catalog resources: the generic create/list/get/update/delete
// contract, exercised through armazones plus the tipo_cliente special case.
mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn armazon_lifecycle_and_duplicate_rejection() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let marca = common::unique("RayBan");

    // Create
    let res = client
        .post(format!("{}/armazones/create", server.base_url))
        .json(&json!({ "marca": marca }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await?;
    let id = created["id"].as_i64().expect("generated id");
    assert_eq!(created["marca"], json!(marca));

    // Same value again is a duplicate
    let res = client
        .post(format!("{}/armazones/create", server.base_url))
        .json(&json!({ "marca": marca }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["code"], "DUPLICATE");

    // Listed and fetchable
    let res = client
        .get(format!("{}/armazones/all", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let all: Vec<serde_json::Value> = res.json().await?;
    assert!(all.iter().any(|a| a["id"].as_i64() == Some(id)));

    let res = client
        .get(format!("{}/armazones/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Empty patch is rejected
    let res = client
        .post(format!("{}/armazones/update/{}", server.base_url, id))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["code"], "EMPTY_UPDATE");

    // Sparse update applies the supplied field
    let renamed = common::unique("Oakley");
    let res = client
        .post(format!("{}/armazones/update/{}", server.base_url, id))
        .json(&json!({ "marca": renamed }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await?;
    assert_eq!(updated["marca"], json!(renamed));
    assert_eq!(updated["id"].as_i64(), Some(id));

    // Delete once, then 404 on repeat
    let res = client
        .delete(format!("{}/armazones/delete/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    assert!(body["message"].as_str().unwrap_or_default().contains("eliminado"));

    let res = client
        .delete(format!("{}/armazones/delete/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/armazones/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_bodies_are_422() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Wrong type for the single field
    let res = client
        .post(format!("{}/materiales/create", server.base_url))
        .json(&json!({ "material": 42 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["code"], "UNPROCESSABLE_ENTITY");
    assert!(body["detalle"].is_string());
    Ok(())
}

#[tokio::test]
async fn tipo_cliente_update_rejects_an_empty_name() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/tipo_cliente/create", server.base_url))
        .json(&json!({ "cliente": common::unique("Mayorista") }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await?;
    let id = created["id"].as_i64().unwrap();

    let res = client
        .post(format!("{}/tipo_cliente/update/{}", server.base_url, id))
        .json(&json!({ "cliente": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
