// Branch scenario: both catalog references must exist before a branch can be
// created, and the branch name is unique.
mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

async fn seed_refs(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<(i64, i64)> {
    let res = client
        .post(format!("{}/tipo_sucursal/create", base_url))
        .json(&json!({ "tipo": common::unique("Matriz") }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let tipo: serde_json::Value = res.json().await?;

    let res = client
        .post(format!("{}/estado_sucursal/create", base_url))
        .json(&json!({ "estado": common::unique("Activa") }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let estado: serde_json::Value = res.json().await?;

    Ok((tipo["id"].as_i64().unwrap(), estado["id"].as_i64().unwrap()))
}

#[tokio::test]
async fn branch_creation_requires_valid_references_and_a_unique_name() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (tipo_id, estado_id) = seed_refs(&client, &server.base_url).await?;
    let nombre = common::unique("Centro");

    // Unknown branch type is rejected before anything is written
    let res = client
        .post(format!("{}/sucursales/create", server.base_url))
        .json(&json!({
            "sucursal": nombre,
            "tipo_sucursal_id": 999_999,
            "estado_sucursal_id": estado_id,
            "dependencia": "N/A",
            "mondeda": "MXN",
            "razon_social": "Optica SA"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["code"], "REFERENCE_NOT_FOUND");
    assert!(body["message"].as_str().unwrap().contains("999999"));

    // Valid references succeed
    let res = client
        .post(format!("{}/sucursales/create", server.base_url))
        .json(&json!({
            "sucursal": nombre,
            "tipo_sucursal_id": tipo_id,
            "estado_sucursal_id": estado_id,
            "dependencia": "N/A",
            "mondeda": "MXN",
            "razon_social": "Optica SA"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await?;
    let id = created["id"].as_i64().expect("generated id");
    assert_eq!(created["mondeda"], "MXN");

    // Second branch with the same name is a duplicate
    let res = client
        .post(format!("{}/sucursales/create", server.base_url))
        .json(&json!({
            "sucursal": nombre,
            "tipo_sucursal_id": tipo_id,
            "estado_sucursal_id": estado_id,
            "dependencia": "N/A",
            "mondeda": "MXN",
            "razon_social": "Optica SA"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["code"], "DUPLICATE");

    // Patching in a bad reference is also rejected
    let res = client
        .post(format!("{}/sucursales/update/{}", server.base_url, id))
        .json(&json!({ "estado_sucursal_id": 999_999 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["code"], "REFERENCE_NOT_FOUND");

    // A one-field patch leaves every other column untouched
    let res = client
        .post(format!("{}/sucursales/update/{}", server.base_url, id))
        .json(&json!({ "dependencia": "Regional" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await?;
    assert_eq!(updated["dependencia"], "Regional");
    assert_eq!(updated["sucursal"], created["sucursal"]);
    assert_eq!(updated["mondeda"], created["mondeda"]);
    assert_eq!(updated["razon_social"], created["razon_social"]);
    assert_eq!(updated["tipo_sucursal_id"], created["tipo_sucursal_id"]);
    assert_eq!(updated["estado_sucursal_id"], created["estado_sucursal_id"]);
    Ok(())
}

#[tokio::test]
async fn branch_listing_is_ordered_by_name() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (tipo_id, estado_id) = seed_refs(&client, &server.base_url).await?;

    // Two branches whose names sort in a known order regardless of collation
    let first = common::unique("Aurora");
    let last = common::unique("Zapopan");
    for nombre in [&last, &first] {
        let res = client
            .post(format!("{}/sucursales/create", server.base_url))
            .json(&json!({
                "sucursal": nombre,
                "tipo_sucursal_id": tipo_id,
                "estado_sucursal_id": estado_id,
                "dependencia": "N/A",
                "mondeda": "MXN",
                "razon_social": "Optica SA"
            }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = client
        .get(format!("{}/sucursales/all", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let all: Vec<serde_json::Value> = res.json().await?;
    let pos = |name: &str| all.iter().position(|s| s["sucursal"].as_str() == Some(name));
    let first_pos = pos(&first).expect("first branch listed");
    let last_pos = pos(&last).expect("last branch listed");
    assert!(first_pos < last_pos, "listing is ordered by name");
    Ok(())
}

#[tokio::test]
async fn deleting_a_referenced_catalog_row_leaves_the_branch_orphaned() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (tipo_id, estado_id) = seed_refs(&client, &server.base_url).await?;

    let res = client
        .post(format!("{}/sucursales/create", server.base_url))
        .json(&json!({
            "sucursal": common::unique("Norte"),
            "tipo_sucursal_id": tipo_id,
            "estado_sucursal_id": estado_id,
            "dependencia": "N/A",
            "mondeda": "MXN",
            "razon_social": "Optica SA"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let branch: serde_json::Value = res.json().await?;

    // Loose foreign keys: the referenced row deletes cleanly and the branch
    // keeps pointing at the departed id
    let res = client
        .delete(format!("{}/tipo_sucursal/delete/{}", server.base_url, tipo_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/sucursales/{}", server.base_url, branch["id"].as_i64().unwrap()))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await?;
    assert_eq!(fetched["tipo_sucursal_id"].as_i64(), Some(tipo_id));
    Ok(())
}
