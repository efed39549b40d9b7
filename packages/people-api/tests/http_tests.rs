//! HTTP round trips through the router against the in-memory store.

use std::sync::Arc;

use chrono::NaiveDate;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use serde_json::{json, Value};

use people_api::router::Router;
use people_core::config::ServerConfig;
use people_core::{InMemoryPersonStore, PersonModel, PersonStore};

fn person(id: u64, first_name: &str, last_name: &str, year: i32, address: &str) -> PersonModel {
    PersonModel {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        gender: "Male".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(year, 2, 15).unwrap(),
        phone_number: "0989479615".to_string(),
        address: address.to_string(),
    }
}

fn setup() -> (Router, Arc<InMemoryPersonStore>) {
    let store = Arc::new(
        InMemoryPersonStore::with_people(vec![
            person(1, "Thai", "Do Van", 2001, "Thai Binh"),
            person(2, "Hoc", "Nguyen Thai", 2000, "Ha Nam"),
            person(3, "Thanh", "Do Tien", 1999, "Ha Noi"),
        ])
        .unwrap(),
    );
    let router = Router::new(store.clone(), Arc::new(ServerConfig::default()));
    (router, store)
}

fn request(method: Method, uri: &str, body: &str) -> Request<Full<Bytes>> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

fn json_body(response: &Response<Bytes>) -> Value {
    serde_json::from_slice(response.body()).unwrap()
}

fn mang_json() -> String {
    json!({
        "id": 4,
        "firstName": "Mang",
        "lastName": "Nguyen Ba",
        "dateOfBirth": "2001-02-15",
        "address": "Ha Noi"
    })
    .to_string()
}

#[tokio::test]
async fn test_list_people() {
    let (router, _store) = setup();
    let response = router.respond(request(Method::GET, "/people", "")).await;
    assert_eq!(response.status(), 200);

    let body = json_body(&response);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["view"], "Index");
    assert_eq!(body["data"]["model"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["model"][0]["firstName"], "Thai");
    assert!(body["data"].get("errors").is_none());
}

#[tokio::test]
async fn test_create_person_redirects_to_index() {
    let (router, store) = setup();
    let response = router
        .respond(request(Method::POST, "/people", &mang_json()))
        .await;
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()["Location"], "/people");

    let people = store.get_all().unwrap();
    assert_eq!(people.len(), 4);
    let last = people.last().unwrap();
    assert_eq!(last.id, 4);
    assert_eq!(last.last_name, "Nguyen Ba");
}

#[tokio::test]
async fn test_create_person_assigns_id() {
    let (router, store) = setup();
    let body = json!({
        "firstName": "Mang",
        "lastName": "Nguyen Ba",
        "dateOfBirth": "2001-02-15"
    })
    .to_string();
    let response = router.respond(request(Method::POST, "/people", &body)).await;
    assert_eq!(response.status(), 303);
    assert_eq!(store.detail(4).unwrap().first_name, "Mang");
}

#[tokio::test]
async fn test_create_invalid_person() {
    let (router, store) = setup();
    let body = json!({ "id": 4, "firstName": "Mang", "dateOfBirth": "2001-02-15" }).to_string();
    let response = router.respond(request(Method::POST, "/people", &body)).await;
    assert_eq!(response.status(), 422);

    let body = json_body(&response);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["view"], "Add");
    assert_eq!(body["data"]["model"]["firstName"], "Mang");
    assert_eq!(body["data"]["errors"]["lastName"][0], "Last name is required");
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn test_create_without_body() {
    let (router, store) = setup();
    let response = router.respond(request(Method::POST, "/people", "")).await;
    assert_eq!(response.status(), 422);
    assert_eq!(
        json_body(&response)["data"]["errors"]["person"][0],
        "A person is required"
    );
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn test_create_malformed_body() {
    let (router, _store) = setup();
    let response = router
        .respond(request(Method::POST, "/people", "{not json"))
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(json_body(&response)["error"]["code"], "400");
}

#[tokio::test]
async fn test_create_without_date_of_birth() {
    let (router, store) = setup();
    let body = json!({ "id": 4, "firstName": "Mang", "lastName": "Nguyen Ba" }).to_string();
    let response = router.respond(request(Method::POST, "/people", &body)).await;
    assert_eq!(response.status(), 400);
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn test_create_after_max_id() {
    let (router, store) = setup();
    let max = json!({
        "id": u64::MAX,
        "firstName": "Mang",
        "lastName": "Nguyen Ba",
        "dateOfBirth": "2001-02-15"
    })
    .to_string();
    let response = router.respond(request(Method::POST, "/people", &max)).await;
    assert_eq!(response.status(), 303);

    let next = json!({
        "firstName": "Hoc",
        "lastName": "Tran",
        "dateOfBirth": "2000-02-15"
    })
    .to_string();
    let response = router.respond(request(Method::POST, "/people", &next)).await;
    assert_eq!(response.status(), 409);
    assert_eq!(store.len(), 4);
}

#[tokio::test]
async fn test_create_duplicate_id() {
    let (router, store) = setup();
    let body = json!({
        "id": 2,
        "firstName": "Hoc",
        "lastName": "Again",
        "dateOfBirth": "2000-02-15"
    })
    .to_string();
    let response = router.respond(request(Method::POST, "/people", &body)).await;
    assert_eq!(response.status(), 409);
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn test_new_person_form() {
    let (router, _store) = setup();
    let response = router.respond(request(Method::GET, "/people/new", "")).await;
    assert_eq!(response.status(), 200);
    let body = json_body(&response);
    assert_eq!(body["data"]["view"], "Add");
    assert!(body["data"]["model"].is_null());
}

#[tokio::test]
async fn test_read_person() {
    let (router, _store) = setup();
    let response = router.respond(request(Method::GET, "/people/2", "")).await;
    assert_eq!(response.status(), 200);
    let body = json_body(&response);
    assert_eq!(body["data"]["view"], "Detail");
    assert_eq!(body["data"]["model"]["address"], "Ha Nam");
    assert_eq!(body["data"]["model"]["dateOfBirth"], "2000-02-15");

    let missing = router.respond(request(Method::GET, "/people/99", "")).await;
    assert_eq!(missing.status(), 404);
    assert_eq!(json_body(&missing)["error"]["message"], "Person 99 not found");

    let invalid = router.respond(request(Method::GET, "/people/abc", "")).await;
    assert_eq!(invalid.status(), 400);
}

#[tokio::test]
async fn test_edit_person_form() {
    let (router, _store) = setup();
    let response = router
        .respond(request(Method::GET, "/people/3/edit", ""))
        .await;
    assert_eq!(response.status(), 200);
    let body = json_body(&response);
    assert_eq!(body["data"]["view"], "Edit");
    assert_eq!(body["data"]["model"]["id"], 3);

    let missing = router
        .respond(request(Method::GET, "/people/42/edit", ""))
        .await;
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn test_update_person() {
    let (router, store) = setup();
    let response = router
        .respond(request(Method::PUT, "/people/1", &mang_json()))
        .await;
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()["Location"], "/people");

    let people = store.get_all().unwrap();
    assert_eq!(people.len(), 3);
    assert_eq!(people[0].id, 1);
    assert_eq!(people[0].last_name, "Nguyen Ba");
    assert!(store.detail(4).is_err());
}

#[tokio::test]
async fn test_update_errors() {
    let (router, store) = setup();

    let missing = router
        .respond(request(Method::PUT, "/people/99", &mang_json()))
        .await;
    assert_eq!(missing.status(), 404);

    let empty = router.respond(request(Method::PUT, "/people/1", "")).await;
    assert_eq!(empty.status(), 400);

    let body = json!({ "firstName": "", "lastName": "Do Van", "dateOfBirth": "2001-02-15" }).to_string();
    let invalid = router.respond(request(Method::PUT, "/people/1", &body)).await;
    assert_eq!(invalid.status(), 422);
    assert_eq!(json_body(&invalid)["data"]["view"], "Edit");

    assert_eq!(store.detail(1).unwrap().first_name, "Thai");
}

#[tokio::test]
async fn test_delete_person() {
    let (router, store) = setup();
    let response = router
        .respond(request(Method::DELETE, "/people/1", ""))
        .await;
    assert_eq!(response.status(), 200);
    let body = json_body(&response);
    assert_eq!(body["data"]["view"], "Delete");
    assert_eq!(body["data"]["model"]["id"], 1);
    assert_eq!(store.len(), 2);

    let again = router
        .respond(request(Method::DELETE, "/people/1", ""))
        .await;
    assert_eq!(again.status(), 404);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_unknown_route_and_method() {
    let (router, _store) = setup();
    let unknown = router.respond(request(Method::GET, "/persons", "")).await;
    assert_eq!(unknown.status(), 404);

    let patch = router.respond(request(Method::PATCH, "/people/1", "{}")).await;
    assert_eq!(patch.status(), 405);

    let post_new = router
        .respond(request(Method::POST, "/people/new", "{}"))
        .await;
    assert_eq!(post_new.status(), 405);
}
