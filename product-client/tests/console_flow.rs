// product-client/tests/console_flow.rs
// 表单流程测试 - 按钮 → API → 表单/提示/结果表

use product_api_mock::MockServer;
use product_client::console::{FLASH_DELETE_FAILED, FLASH_DELETED, FLASH_SUCCESS};
use product_client::{Action, ClientConfig, ConsoleState, FormField, NetworkHttpClient};

const API_KEY: &str = "console-key";

async fn setup() -> (MockServer, NetworkHttpClient) {
    let server = MockServer::start(API_KEY).await.unwrap();
    let client = ClientConfig::new(server.base_url())
        .with_api_key(API_KEY)
        .build_http_client()
        .unwrap();
    (server, client)
}

fn fill(state: &mut ConsoleState, values: [(FormField, &str); 5]) {
    for (field, value) in values {
        state.form.set(field, value);
    }
}

#[tokio::test]
async fn test_create_update_buy_delete_round() {
    let (server, client) = setup().await;
    let mut state = ConsoleState::new();

    fill(
        &mut state,
        [
            (FormField::Name, "Kibble"),
            (FormField::Category, "pet"),
            (FormField::Price, "19.5"),
            (FormField::Stock, "2"),
            (FormField::Description, "Dry food"),
        ],
    );
    state.dispatch(&client, Action::Create).await;
    assert_eq!(state.flash(), FLASH_SUCCESS);
    assert_eq!(state.form.id, "1");
    assert_eq!(state.form.price, "19.5");

    state.form.set(FormField::Description, "Dry food, 2kg");
    state.dispatch(&client, Action::Update).await;
    assert_eq!(state.flash(), FLASH_SUCCESS);
    assert_eq!(server.state.get(1).unwrap().description, "Dry food, 2kg");

    state.dispatch(&client, Action::Buy).await;
    assert_eq!(state.form.stock, "1");
    state.dispatch(&client, Action::Buy).await;
    assert_eq!(state.form.stock, "0");

    state.dispatch(&client, Action::Buy).await;
    assert_eq!(state.flash(), "Product with id '1' has been sold out!");
    assert_eq!(state.form.stock, "0");

    state.dispatch(&client, Action::Delete).await;
    assert_eq!(state.flash(), FLASH_DELETED);
    assert!(state.form.is_empty());
    assert!(server.state.get(1).is_none());
}

#[tokio::test]
async fn test_retrieve_missing_clears_fields() {
    let (_server, client) = setup().await;
    let mut state = ConsoleState::new();
    state.form.set(FormField::Id, "77");
    state.form.set(FormField::Name, "stale");

    state.dispatch(&client, Action::Retrieve).await;

    assert_eq!(state.flash(), "Product with id '77' was not found.");
    assert_eq!(state.form.id, "77");
    assert!(state.form.name.is_empty());
}

#[tokio::test]
async fn test_create_validation_error_keeps_form() {
    let (_server, client) = setup().await;
    let mut state = ConsoleState::new();
    state.form.set(FormField::Category, "pet");

    state.dispatch(&client, Action::Create).await;

    assert_eq!(state.flash(), "Field cannot be empty string");
    assert_eq!(state.form.category, "pet");
    assert!(state.form.id.is_empty());
}

#[tokio::test]
async fn test_delete_without_key_shows_fixed_error() {
    let server = MockServer::start(API_KEY).await.unwrap();
    let client = ClientConfig::new(server.base_url()).build_http_client().unwrap();
    let id = server.state.seed("Mat", "pet", 10.0, 1, "").id;
    let mut state = ConsoleState::new();
    state.form.set(FormField::Id, id.to_string());

    state.dispatch(&client, Action::Delete).await;

    assert_eq!(state.flash(), FLASH_DELETE_FAILED);
    assert!(server.state.get(id).is_some());
    assert_eq!(state.form.id, id.to_string());
}

#[tokio::test]
async fn test_search_fills_table_and_first_row() {
    let (server, client) = setup().await;
    server.state.seed("Ball", "pet", 5.0, 3, "Rubber");
    server.state.seed("Rice", "food", 2.0, 8, "White");
    server.state.seed("Rope", "pet", 30.0, 1, "Tug");
    let mut state = ConsoleState::new();
    state.form.set(FormField::Category, "pet");

    state.dispatch(&client, Action::Search).await;

    let table = state.results.as_ref().unwrap();
    let names: Vec<&str> = table.rows().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Ball", "Rope"]);
    assert_eq!(state.form.id, "1");
    assert_eq!(state.form.description, "Rubber");
    assert_eq!(state.flash(), FLASH_SUCCESS);
    assert_eq!(table.to_html().matches("<tr>").count(), 3);
}

#[tokio::test]
async fn test_search_without_hits_keeps_form() {
    let (_server, client) = setup().await;
    let mut state = ConsoleState::new();
    state.form.set(FormField::Category, "garden");
    state.form.set(FormField::Stock, "4");
    let before = state.form.clone();

    state.dispatch(&client, Action::Search).await;

    assert_eq!(state.form, before);
    assert!(state.results.as_ref().unwrap().is_empty());
    assert_eq!(state.flash(), FLASH_SUCCESS);
}

#[tokio::test]
async fn test_clear_resets_all_fields() {
    let (server, client) = setup().await;
    let mut state = ConsoleState::new();
    fill(
        &mut state,
        [
            (FormField::Name, "a"),
            (FormField::Category, "b"),
            (FormField::Price, "c"),
            (FormField::Stock, "d"),
            (FormField::Description, "e"),
        ],
    );
    state.form.set(FormField::Id, "5");

    state.dispatch(&client, Action::Clear).await;

    assert!(state.form.is_empty());
    assert!(server.state.requests().is_empty());
}
