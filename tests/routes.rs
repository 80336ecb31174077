use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use client_registry::routes::configure;

mod common;

fn maria() -> Value {
    json!({
        "name": "Maria",
        "cpf": "12345698700",
        "income": 20000.0,
        "birthDate": "2010-08-14T20:50:00Z",
        "children": 4
    })
}

#[actix_web::test]
async fn test_create_then_fetch_client() {
    let test_db = common::TestDb::new("routes_create_fetch.db");
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_db.repository()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/clients")
        .set_json(maria())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/clients/1"
    );
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Maria");

    let req = test::TestRequest::get().uri("/clients/1").to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn test_create_ignores_id_in_body() {
    let test_db = common::TestDb::new("routes_create_ignores_id.db");
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_db.repository()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/clients")
        .set_json(maria())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let mut intruder = maria();
    intruder["id"] = json!(1);
    intruder["name"] = json!("Intruder");
    intruder["cpf"] = json!("98765432100");
    let req = test::TestRequest::post()
        .uri("/clients")
        .set_json(&intruder)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/clients/2"
    );
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["id"], 2);

    let req = test::TestRequest::get().uri("/clients/1").to_request();
    let original: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(original["name"], "Maria");

    let req = test::TestRequest::get().uri("/clients").to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["totalElements"], 2);
}

#[actix_web::test]
async fn test_missing_client_is_reported_as_not_found() {
    let test_db = common::TestDb::new("routes_missing.db");
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_db.repository()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/clients/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Resource not found");
    assert_eq!(body["message"], "Id not found 999");
    assert_eq!(body["path"], "/clients/999");

    let req = test::TestRequest::put()
        .uri("/clients/999")
        .set_json(maria())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete().uri("/clients/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_update_and_delete_client() {
    let test_db = common::TestDb::new("routes_update_delete.db");
    let repo = test_db.repository();
    let jorge = common::seed_clients(&repo).pop().unwrap();
    let id = jorge.id.unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repo))
            .configure(configure),
    )
    .await;

    let mut changes = maria();
    changes["id"] = json!(77);
    let req = test::TestRequest::put()
        .uri(&format!("/clients/{id}"))
        .set_json(&changes)
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["id"], id.get());
    assert_eq!(updated["name"], "Maria");
    assert_eq!(updated["children"], 4);

    let req = test::TestRequest::delete()
        .uri(&format!("/clients/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&format!("/clients/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_listing_is_paged_and_sorted() {
    let test_db = common::TestDb::new("routes_listing.db");
    let repo = test_db.repository();
    common::seed_clients(&repo);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repo))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/clients?page=1&linesPerPage=2&direction=DESC&orderBy=income")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(page["totalElements"], 6);
    assert_eq!(page["totalPages"], 3);
    assert_eq!(page["number"], 1);
    assert_eq!(page["size"], 2);
    assert_eq!(page["first"], false);
    assert_eq!(page["content"][0]["name"], "Jose Saramago");
    assert_eq!(page["content"][1]["name"], "Djamila Ribeiro");
}

#[actix_web::test]
async fn test_filtered_listings() {
    let test_db = common::TestDb::new("routes_filters.db");
    let repo = test_db.repository();
    common::seed_clients(&repo);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repo))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/clients/income?income=4500.0")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["totalElements"], 1);
    assert_eq!(page["content"][0]["name"], "Djamila Ribeiro");

    let req = test::TestRequest::get()
        .uri("/clients/incomeGreaterThan?income=5000&orderBy=income")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["totalElements"], 2);
    assert_eq!(page["content"][0]["name"], "Carolina Maria de Jesus");
    assert_eq!(page["content"][1]["name"], "Toni Morrison");

    let req = test::TestRequest::get()
        .uri("/clients/cpf?cpf=1061")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["totalElements"], 2);
    assert_eq!(page["content"][0]["name"], "Conceição Evaristo");
}

#[actix_web::test]
async fn test_invalid_input_is_rejected() {
    let test_db = common::TestDb::new("routes_invalid.db");
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_db.repository()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/clients?linesPerPage=0")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation error");

    let req = test::TestRequest::get()
        .uri("/clients?page=18446744073709551615")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/clients/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let mut body = maria();
    body["cpf"] = json!("123");
    let req = test::TestRequest::post()
        .uri("/clients")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/clients")
        .insert_header(header::ContentType::json())
        .set_payload("{\"name\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Malformed body");
}
