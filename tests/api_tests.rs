// tests/api_tests.rs

use study_hub::{
    catalog::loader::parse_catalog, config::Config, models::item::CatalogKind, routes,
    state::AppState,
};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    // 1. Load the bundled sample catalogs
    let quizzes = parse_catalog(include_str!("../data/quizzes.json"), CatalogKind::Quizzes)
        .expect("Failed to parse quiz catalog");
    let tutorials = parse_catalog(include_str!("../data/tutorials.json"), CatalogKind::Tutorials)
        .expect("Failed to parse tutorial catalog");

    // 2. Create test configuration and state
    let config = Config {
        rust_log: "error".to_string(),
        ..Config::default()
    };
    let state = AppState::new(config, quizzes, tutorials);

    // 3. Create the router with the app state
    let app = routes::create_router(state);

    // 4. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 5. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// GETs a list endpoint and returns the ids of the returned items.
async fn list_ids(client: &reqwest::Client, url: &str) -> Vec<String> {
    let body: serde_json::Value = client
        .get(url)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse json");

    body["items"]
        .as_array()
        .expect("items missing")
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn health_reports_catalog_sizes() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .get(&format!("{}/api/health", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["ok"], true);
    assert_eq!(body["quizzes"], 5);
    assert_eq!(body["tutorials"], 6);
}

#[tokio::test]
async fn empty_filter_returns_whole_catalog_in_order() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .get(&format!("{}/api/quizzes/items", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["total"], 5);
    assert_eq!(body["matched"], 5);
    let ids: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["q1", "q2", "q3", "q4", "q5"]);
}

#[tokio::test]
async fn category_and_difficulty_narrow_results() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let math = list_ids(&client, &format!("{}/api/quizzes/items?category=Math", address)).await;
    assert_eq!(math, vec!["q1", "q2"]);

    let math_beginner = list_ids(
        &client,
        &format!("{}/api/quizzes/items?category=Math&difficulty=Beginner", address),
    )
    .await;
    assert_eq!(math_beginner, vec!["q1"]);

    let everything = list_ids(
        &client,
        &format!("{}/api/quizzes/items?category=all&difficulty=all&status=all", address),
    )
    .await;
    assert_eq!(everything.len(), 5);
}

#[tokio::test]
async fn search_ignores_case() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let lower = list_ids(&client, &format!("{}/api/quizzes/items?q=sql", address)).await;
    let upper = list_ids(&client, &format!("{}/api/quizzes/items?q=SQL", address)).await;

    assert_eq!(lower, vec!["q4"]);
    assert_eq!(lower, upper);

    // Instructor and tags are searchable too.
    let tutorials = format!("{}/api/tutorials/items", address);
    let by_instructor = list_ids(&client, &format!("{}?q=chen", tutorials)).await;
    assert_eq!(by_instructor, vec!["2"]);

    let by_tag = list_ids(&client, &format!("{}?q=command%20line", tutorials)).await;
    assert_eq!(by_tag, vec!["4"]);
}

#[tokio::test]
async fn no_matches_is_an_empty_ok_response() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/tutorials/items?q=quantum", address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["total"], 6);
    assert_eq!(body["matched"], 0);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn status_filter_uses_recorded_progress() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let tutorials = format!("{}/api/tutorials/items", address);
    let completed = list_ids(&client, &format!("{}?status=completed", tutorials)).await;
    let in_progress = list_ids(&client, &format!("{}?status=in_progress", tutorials)).await;
    let fresh = list_ids(&client, &format!("{}?status=not_attempted", tutorials)).await;

    assert_eq!(completed, vec!["4"]);
    assert_eq!(in_progress, vec!["2", "3", "6"]);
    assert_eq!(fresh, vec!["1", "5"]);
}

#[tokio::test]
async fn invalid_filter_values_are_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/quizzes/items?difficulty=Expert", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("difficulty"));

    let response = client
        .get(&format!("{}/api/podcasts/items", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn get_item_returns_view_or_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .get(&format!("{}/api/tutorials/items/1", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["kind"], "tutorial");
    assert_eq!(body["instructor"], "Dr. Sarah Johnson");
    assert_eq!(body["views_label"], "45.8K");
    assert_eq!(body["state"]["saved"], true);
    assert_eq!(body["status"], "not_attempted");

    let response = client
        .get(&format!("{}/api/tutorials/items/missing", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Item not found: missing");
}

#[tokio::test]
async fn categories_are_distinct_in_catalog_order() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let categories: Vec<String> = client
        .get(&format!("{}/api/quizzes/categories", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        categories,
        vec!["Math", "Science", "Database Management", "Algorithms"]
    );
}
