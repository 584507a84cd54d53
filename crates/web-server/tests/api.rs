mod common;

use axum::http::{Method, StatusCode};
use common::{assert_status, database_app, json_body, send};
use serde_json::json;

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn country_lifecycle() {
    let (app, _pool) = database_app().await;
    let kazakhstan = r#"{"cname": "Kazakhstan", "population": 19000000}"#;

    let response = send(&app, Method::POST, "/api/countries/", Some(kazakhstan)).await;
    assert_status(&response, StatusCode::CREATED);
    assert_eq!(
        json_body(response).await,
        json!({ "cname": "Kazakhstan", "population": 19000000 })
    );

    let response = send(&app, Method::POST, "/api/countries/", Some(kazakhstan)).await;
    assert_status(&response, StatusCode::CONFLICT);

    let response = send(&app, Method::GET, "/api/countries/", None).await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!([{ "cname": "Kazakhstan", "population": 19000000 }])
    );

    let response = send(
        &app,
        Method::PUT,
        "/api/countries/Kazakhstan",
        Some(r#"{"cname": "Kazakhstan", "population": null}"#),
    )
    .await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(json_body(response).await["population"], json!(null));

    let response = send(&app, Method::DELETE, "/api/countries/Kazakhstan", None).await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "Country deleted" })
    );

    let response = send(&app, Method::DELETE, "/api/countries/Kazakhstan", None).await;
    assert_status(&response, StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Country not found" })
    );
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn replacing_a_missing_row_is_not_found() {
    let (app, _pool) = database_app().await;

    let response = send(
        &app,
        Method::PUT,
        "/api/disease-types/42",
        Some(r#"{"id": 42, "description": "Virology"}"#),
    )
    .await;

    assert_status(&response, StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Disease type not found" })
    );
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn oversized_value_is_a_bad_request() {
    let (app, _pool) = database_app().await;
    let body = json!({ "cname": "x".repeat(51), "population": 1 }).to_string();

    let response = send(&app, Method::POST, "/api/countries/", Some(&body)).await;

    assert_status(&response, StatusCode::BAD_REQUEST);
    let error = json_body(response).await["error"].clone();
    assert!(
        error.as_str().is_some_and(|message| message.contains("too long")),
        "unexpected error body: {error}"
    );

    let response = send(&app, Method::GET, "/api/countries/", None).await;
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn dangling_foreign_key_is_a_conflict() {
    let (app, _pool) = database_app().await;

    let response = send(
        &app,
        Method::POST,
        "/api/users/",
        Some(
            r#"{"email": "a@mail.kz", "name": "Asel", "surname": "N", "salary": 100,
                "phone": null, "cname": "Nowhere"}"#,
        ),
    )
    .await;

    assert_status(&response, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn records_are_addressed_by_their_full_key() {
    let (app, _pool) = database_app().await;
    let setup = [
        ("/api/countries/", r#"{"cname": "Italy", "population": 59000000}"#),
        (
            "/api/users/",
            r#"{"email": "ps@mail.it", "name": "Giulia", "surname": "Rossi", "salary": 3000,
                "phone": "+39", "cname": "Italy"}"#,
        ),
        ("/api/public-servants/", r#"{"email": "ps@mail.it", "department": "Health"}"#),
        ("/api/disease-types/", r#"{"id": 1, "description": "Virology"}"#),
        (
            "/api/diseases/",
            r#"{"disease_code": "covid-19", "pathogen": "virus", "description": "covid-19", "id": 1}"#,
        ),
        (
            "/api/discoveries/",
            r#"{"cname": "Italy", "disease_code": "covid-19", "first_enc_date": "2020-01-30"}"#,
        ),
        (
            "/api/records/",
            r#"{"email": "ps@mail.it", "cname": "Italy", "disease_code": "covid-19",
                "total_deaths": 1, "total_patients": 10}"#,
        ),
    ];
    for (uri, body) in setup {
        let response = send(&app, Method::POST, uri, Some(body)).await;
        assert_status(&response, StatusCode::CREATED);
    }

    let response = send(&app, Method::GET, "/api/records/ps@mail.it/Italy/covid-19", None).await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(json_body(response).await["total_patients"], json!(10));

    let response = send(&app, Method::GET, "/api/discoveries/covid-19", None).await;
    assert_eq!(json_body(response).await["first_enc_date"], json!("2020-01-30"));

    let response = send(
        &app,
        Method::DELETE,
        "/api/records/ps@mail.it/Italy/covid-19",
        None,
    )
    .await;
    assert_eq!(
        json_body(response).await,
        json!({ "message": "Record deleted" })
    );

    let response = send(&app, Method::GET, "/api/records/", None).await;
    assert_eq!(json_body(response).await, json!([]));
}
