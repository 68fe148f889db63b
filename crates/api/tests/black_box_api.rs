use std::sync::Arc;

use fauna_store::InMemoryAnimalStore;
use reqwest::{header::LOCATION, redirect, StatusCode};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, backed by the in-memory store, bound to an
        // ephemeral port.
        let app = fauna_api::app::build_app(Arc::new(InMemoryAnimalStore::new()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn client() -> reqwest::Client {
    // Redirects stay observable so 303s can be asserted directly.
    reqwest::Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .unwrap()
}

async fn initialize(client: &reqwest::Client, base_url: &str) -> Vec<serde_json::Value> {
    let res = client
        .get(format!("{}/animals/initialize", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    res.json::<Vec<serde_json::Value>>().await.unwrap()
}

async fn index_html(client: &reqwest::Client, base_url: &str) -> String {
    let res = client
        .get(format!("{}/animals", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    res.text().await.unwrap()
}

/// Record ids linked from the index page (excludes the new-form link).
fn linked_ids(html: &str) -> Vec<String> {
    html.split("href=\"/animals/")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .filter(|id| *id != "new" && !id.contains('/'))
        .map(|id| id.to_string())
        .collect()
}

#[tokio::test]
async fn liveness_returns_fixed_message() {
    let srv = TestServer::spawn().await;

    let res = client()
        .get(format!("{}/", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.text().await.unwrap(),
        "your server is running... better catch it."
    );
}

#[tokio::test]
async fn initialize_resets_collection_to_seed_set() {
    let srv = TestServer::spawn().await;
    let client = client();

    let created = initialize(&client, &srv.base_url).await;
    assert_eq!(created.len(), 3);

    let species: Vec<&str> = created
        .iter()
        .map(|a| a["species"].as_str().unwrap())
        .collect();
    assert_eq!(species, ["Tiger", "Elephant", "Panda"]);
    assert_eq!(created[0]["location"], "Asia");
    assert_eq!(created[1]["lifeExpectancy"], 60.0);
    assert!(created.iter().all(|a| a["extinct"] == false));
    assert!(created.iter().all(|a| a["id"].as_str().is_some()));

    // Not additive: extra records are wiped by the next call.
    let res = client
        .post(format!("{}/animals", srv.base_url))
        .form(&[
            ("species", "Wolf"),
            ("location", "Europe"),
            ("extinct", "on"),
            ("lifeExpectancy", "8"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let again = initialize(&client, &srv.base_url).await;
    assert_eq!(again.len(), 3);

    let html = index_html(&client, &srv.base_url).await;
    assert!(!html.contains("Wolf"));
    assert_eq!(linked_ids(&html).len(), 3);
}

#[tokio::test]
async fn create_redirects_and_lists_the_new_record() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client
        .post(format!("{}/animals", srv.base_url))
        .form(&[
            ("species", "Wolf"),
            ("location", "Europe"),
            ("extinct", "on"),
            ("lifeExpectancy", "8"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(LOCATION).unwrap(), "/animals");

    let html = index_html(&client, &srv.base_url).await;
    assert!(html.contains("Wolf"));
    assert!(html.contains("Europe"));
}

#[tokio::test]
async fn created_record_round_trips_by_id() {
    let srv = TestServer::spawn().await;
    let client = client();

    client
        .post(format!("{}/animals", srv.base_url))
        .form(&[
            ("species", "Wolf"),
            ("location", "Europe"),
            ("extinct", "on"),
            ("lifeExpectancy", "8"),
        ])
        .send()
        .await
        .unwrap();

    let html = index_html(&client, &srv.base_url).await;
    let ids = linked_ids(&html);
    assert_eq!(ids.len(), 1);

    let res = client
        .get(format!("{}/animals/{}", srv.base_url, ids[0]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let show = res.text().await.unwrap();
    assert!(show.contains("Wolf"));
    assert!(show.contains("Location: Europe"));
    assert!(show.contains("Extinct: true"));
    assert!(show.contains("Life expectancy: 8 years"));
}

#[tokio::test]
async fn extinct_coercion_only_accepts_the_literal_on() {
    let srv = TestServer::spawn().await;
    let client = client();

    // POST with extinct=true: stored as false.
    client
        .post(format!("{}/animals", srv.base_url))
        .form(&[
            ("species", "Dodo"),
            ("location", "Mauritius"),
            ("extinct", "true"),
            ("lifeExpectancy", "20"),
        ])
        .send()
        .await
        .unwrap();

    let ids = linked_ids(&index_html(&client, &srv.base_url).await);
    let show = client
        .get(format!("{}/animals/{}", srv.base_url, ids[0]))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(show.contains("Extinct: false"));

    // PUT with extinct=true: still false; with extinct=on: true.
    let res = client
        .put(format!("{}/animals/{}", srv.base_url, ids[0]))
        .form(&[
            ("species", "Dodo"),
            ("location", "Mauritius"),
            ("extinct", "true"),
            ("lifeExpectancy", "20"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let show = client
        .get(format!("{}/animals/{}", srv.base_url, ids[0]))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(show.contains("Extinct: false"));

    client
        .put(format!("{}/animals/{}", srv.base_url, ids[0]))
        .form(&[
            ("species", "Dodo"),
            ("location", "Mauritius"),
            ("extinct", "on"),
            ("lifeExpectancy", "20"),
        ])
        .send()
        .await
        .unwrap();

    let show = client
        .get(format!("{}/animals/{}", srv.base_url, ids[0]))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(show.contains("Extinct: true"));
}

#[tokio::test]
async fn put_fully_replaces_all_four_fields() {
    let srv = TestServer::spawn().await;
    let client = client();

    let created = initialize(&client, &srv.base_url).await;
    let tiger_id = created[0]["id"].as_str().unwrap();

    let res = client
        .put(format!("{}/animals/{}", srv.base_url, tiger_id))
        .form(&[
            ("species", "Wolf"),
            ("location", "Europe"),
            ("extinct", "on"),
            ("lifeExpectancy", "8"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(LOCATION).unwrap(), "/animals");

    let show = client
        .get(format!("{}/animals/{}", srv.base_url, tiger_id))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(show.contains("Wolf"));
    assert!(show.contains("Location: Europe"));
    assert!(show.contains("Extinct: true"));
    assert!(show.contains("Life expectancy: 8 years"));
    assert!(!show.contains("Tiger"));
    assert!(!show.contains("Asia"));
}

#[tokio::test]
async fn delete_removes_the_record() {
    let srv = TestServer::spawn().await;
    let client = client();

    let created = initialize(&client, &srv.base_url).await;
    let tiger_id = created[0]["id"].as_str().unwrap();

    let res = client
        .delete(format!("{}/animals/{}", srv.base_url, tiger_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(LOCATION).unwrap(), "/animals");

    let html = index_html(&client, &srv.base_url).await;
    assert!(!html.contains("Tiger"));
    assert!(html.contains("Elephant"));
    assert!(html.contains("Panda"));

    let res = client
        .get(format!("{}/animals/{}", srv.base_url, tiger_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn method_override_rewrites_form_posts() {
    let srv = TestServer::spawn().await;
    let client = client();

    let created = initialize(&client, &srv.base_url).await;
    let panda_id = created[2]["id"].as_str().unwrap();

    // Edit forms POST with ?_method=PUT.
    let res = client
        .post(format!("{}/animals/{}?_method=PUT", srv.base_url, panda_id))
        .form(&[
            ("species", "Red Panda"),
            ("location", "Himalayas"),
            ("lifeExpectancy", "14"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let show = client
        .get(format!("{}/animals/{}", srv.base_url, panda_id))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(show.contains("Red Panda"));
    assert!(show.contains("Location: Himalayas"));
    // Checkbox omitted entirely: unchecked means false.
    assert!(show.contains("Extinct: false"));

    // Delete forms POST with ?_method=DELETE.
    let res = client
        .post(format!(
            "{}/animals/{}?_method=DELETE",
            srv.base_url, panda_id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let html = index_html(&client, &srv.base_url).await;
    assert!(!html.contains("Red Panda"));
}

#[tokio::test]
async fn new_and_edit_render_forms() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client
        .get(format!("{}/animals/new", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains("<form"));
    assert!(html.contains("name=\"species\""));
    assert!(html.contains("action=\"/animals\""));

    let created = initialize(&client, &srv.base_url).await;
    let tiger_id = created[0]["id"].as_str().unwrap();

    let res = client
        .get(format!("{}/animals/{}/edit", srv.base_url, tiger_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains("value=\"Tiger\""));
    assert!(html.contains(&format!("action=\"/animals/{}?_method=PUT\"", tiger_id)));
}

#[tokio::test]
async fn missing_and_malformed_ids() {
    let srv = TestServer::spawn().await;
    let client = client();

    initialize(&client, &srv.base_url).await;

    let unknown = "00000000-0000-0000-0000-000000000000";

    let res = client
        .get(format!("{}/animals/{}", srv.base_url, unknown))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/animals/{}/edit", srv.base_url, unknown))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/animals/not-a-uuid", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Update and delete stay fire-and-forget: unknown ids still redirect.
    let res = client
        .put(format!("{}/animals/{}", srv.base_url, unknown))
        .form(&[("species", "Ghost")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = client
        .delete(format!("{}/animals/{}", srv.base_url, unknown))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    // Nothing was upserted by the unknown-id update.
    let html = index_html(&client, &srv.base_url).await;
    assert!(!html.contains("Ghost"));
    assert_eq!(linked_ids(&html).len(), 3);
}
