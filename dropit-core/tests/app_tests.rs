// Tests for app assembly and the document accessors

use dropit_client::{FigmaClient, ImageFormat, ImageOptions, StyleType};
use dropit_core::{
    DropitError, ErrorKind, ScreenKind, build_app, fetch_style, images_by_ids, list_components,
    list_images, list_styles,
};
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FILE_ID: &str = "FILE123";

fn shop_file() -> serde_json::Value {
    json!({
        "name": "Shop",
        "document": {
            "id": "0:0", "name": "Document", "type": "DOCUMENT",
            "children": [
                {"id": "1:0", "name": "Home", "type": "CANVAS", "children": [
                    {"id": "1:1", "name": "Landing", "type": "FRAME",
                     "styles": {"fill": "S:bg"},
                     "fills": [{"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1, "a": 1}}],
                     "children": [
                        {"id": "1:2", "name": "Hero", "type": "RECTANGLE",
                         "fills": [{"type": "IMAGE", "imageRef": "hero-ref"}]}
                     ]},
                    {"id": "1:3", "name": "Cards", "type": "GROUP", "children": [
                        {"id": "1:4", "name": "Title", "type": "TEXT",
                         "styles": {"text": "S:h1"},
                         "style": {"fontFamily": "Inter", "fontSize": 24}}
                    ]},
                    {"id": "1:5", "name": "Loose note", "type": "TEXT"}
                ]},
                {"id": "2:0", "name": "Checkout", "type": "CANVAS", "children": [
                    {"id": "2:1", "name": "Cart", "type": "FRAME", "children": [
                        {"id": "2:2", "name": "Product", "type": "RECTANGLE",
                         "fills": [{"type": "IMAGE", "imageRef": "product-ref"}]}
                    ]}
                ]},
                {"id": "3:0", "name": "Not a page", "type": "FRAME"}
            ]
        },
        "components": {
            "5:1": {"key": "c-button", "name": "Button", "description": "Primary action"},
            "5:2": {"key": "c-chip", "name": "Chip", "description": ""}
        },
        "styles": {
            "S:bg": {"key": "k-bg", "name": "Surface", "styleType": "FILL", "remote": false},
            "S:h1": {"key": "k-h1", "name": "Heading", "styleType": "TEXT", "remote": false,
                     "description": "Titles"}
        }
    })
}

async fn mount_file(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/files/{}", FILE_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_images(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/images/{}", FILE_ID)))
        .and(query_param("ids", "1:2,2:2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "err": null,
            "images": {"1:2": "https://cdn.example.com/hero.png", "2:2": null}
        })))
        .mount(server)
        .await;
}

async fn client_for(server: &MockServer) -> FigmaClient {
    let client = FigmaClient::new()
        .unwrap()
        .with_base_url(Url::parse(&server.uri()).unwrap());
    client.initialize("token").unwrap();
    client
}

// ============================================================================
// build_app
// ============================================================================

#[tokio::test]
async fn test_build_app_collects_screens_styles_images() {
    let server = MockServer::start().await;
    mount_file(&server, shop_file()).await;
    mount_images(&server).await;

    let client = client_for(&server).await;
    let app = build_app(&client, FILE_ID).await.unwrap();

    assert_eq!(app.name, "Shop");

    let screens: Vec<(&str, ScreenKind, &str)> = app
        .screens
        .iter()
        .map(|s| (s.name.as_str(), s.kind, s.page_name.as_str()))
        .collect();
    assert_eq!(
        screens,
        vec![
            ("Landing", ScreenKind::Frame, "Home"),
            ("Cards", ScreenKind::Group, "Home"),
            ("Cart", ScreenKind::Frame, "Checkout"),
        ]
    );

    assert_eq!(app.styles.len(), 2);
    assert_eq!(app.styles[0].style_type, StyleType::Fill);
    assert!(app.styles[0].details.is_some());

    assert_eq!(app.images.len(), 2);
    assert_eq!(
        app.images[0].image_url.as_deref(),
        Some("https://cdn.example.com/hero.png")
    );
    assert_eq!(app.images[1].image_url, None);
}

#[tokio::test]
async fn test_build_app_scopes_styles_and_images_to_screens() {
    let server = MockServer::start().await;
    mount_file(&server, shop_file()).await;
    mount_images(&server).await;

    let client = client_for(&server).await;
    let app = build_app(&client, FILE_ID).await.unwrap();

    let landing = &app.screens[0];
    assert_eq!(landing.images.len(), 1);
    assert_eq!(landing.images[0].node_id, "1:2");
    assert_eq!(landing.styles.len(), 1);
    assert_eq!(landing.styles[0].style_id, "S:bg");

    let cards = &app.screens[1];
    assert!(cards.images.is_empty());
    assert_eq!(cards.styles[0].style_id, "S:h1");

    let cart = &app.screens[2];
    assert_eq!(cart.images[0].node_id, "2:2");
    assert!(cart.styles.is_empty());
}

#[tokio::test]
async fn test_build_app_twice_is_structurally_equal() {
    let server = MockServer::start().await;
    mount_file(&server, shop_file()).await;
    mount_images(&server).await;

    let client = client_for(&server).await;
    let first = build_app(&client, FILE_ID).await.unwrap();
    let second = build_app(&client, FILE_ID).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_build_app_empty_document() {
    let server = MockServer::start().await;
    mount_file(
        &server,
        json!({
            "name": "Blank",
            "document": {"id": "0:0", "name": "Document", "type": "DOCUMENT"},
            "styles": {}
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/images/{}", FILE_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"images": {}})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let app = build_app(&client, FILE_ID).await.unwrap();

    assert_eq!(app.name, "Blank");
    assert!(app.screens.is_empty());
    assert!(app.styles.is_empty());
    assert!(app.images.is_empty());
}

#[tokio::test]
async fn test_build_app_without_document_root_is_invalid() {
    let server = MockServer::start().await;
    mount_file(&server, json!({"name": "Broken"})).await;

    let client = client_for(&server).await;
    let err = build_app(&client, FILE_ID).await.unwrap_err();

    assert!(matches!(err, DropitError::InvalidDocument(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidDocument);
}

#[tokio::test]
async fn test_build_app_before_initialize() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shop_file()))
        .expect(0)
        .mount(&server)
        .await;

    let client = FigmaClient::new()
        .unwrap()
        .with_base_url(Url::parse(&server.uri()).unwrap());
    let err = build_app(&client, FILE_ID).await.unwrap_err();

    assert!(matches!(err, DropitError::DocumentFetch { .. }));
    assert_eq!(err.kind(), ErrorKind::Uninitialized);
}

#[tokio::test]
async fn test_build_app_document_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"status": 404, "err": "Not found"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = build_app(&client, FILE_ID).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().starts_with("Could not fetch document FILE123"));
}

#[tokio::test]
async fn test_build_app_image_failure_returns_no_app() {
    let server = MockServer::start().await;
    mount_file(&server, shop_file()).await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/images/{}", FILE_ID)))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"status": 400, "err": "Bad ids"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = build_app(&client, FILE_ID).await.unwrap_err();

    assert!(matches!(err, DropitError::ImageFetch { .. }));
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
}

// ============================================================================
// Accessors
// ============================================================================

#[tokio::test]
async fn test_list_images_passes_options_through() {
    let server = MockServer::start().await;
    mount_file(&server, shop_file()).await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/images/{}", FILE_ID)))
        .and(query_param("format", "jpg"))
        .and(query_param("scale", "0.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": {"1:2": "https://cdn/hero.jpg", "2:2": "https://cdn/product.jpg"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let options = ImageOptions::default()
        .with_format(ImageFormat::Jpg)
        .with_scale(0.5);
    let images = list_images(&client, FILE_ID, &options).await.unwrap();

    assert_eq!(images.len(), 2);
    assert_eq!(images[1].name, "Product");
    assert_eq!(images[1].image_url.as_deref(), Some("https://cdn/product.jpg"));
}

#[tokio::test]
async fn test_list_images_in_deeply_nested_document() {
    let mut node = json!({
        "id": "9:9", "name": "Buried", "type": "RECTANGLE",
        "fills": [{"type": "IMAGE", "imageRef": "buried-ref"}]
    });
    for level in 0..250 {
        node = json!({
            "id": format!("8:{}", level), "name": "Wrapper", "type": "GROUP",
            "children": [node]
        });
    }

    let server = MockServer::start().await;
    mount_file(
        &server,
        json!({
            "name": "Nested",
            "document": {"id": "0:0", "name": "Document", "type": "DOCUMENT", "children": [
                {"id": "1:0", "name": "Page", "type": "CANVAS", "children": [node]}
            ]}
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/images/{}", FILE_ID)))
        .and(query_param("ids", "9:9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": {"9:9": "https://cdn/buried.png"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let images = list_images(&client, FILE_ID, &ImageOptions::default())
        .await
        .unwrap();

    assert_eq!(images.len(), 1);
    assert_eq!(images[0].name, "Buried");
    assert_eq!(images[0].image_url.as_deref(), Some("https://cdn/buried.png"));
}

#[tokio::test]
async fn test_list_components() {
    let server = MockServer::start().await;
    mount_file(&server, shop_file()).await;

    let client = client_for(&server).await;
    let components = list_components(&client, FILE_ID).await.unwrap();

    assert_eq!(components.len(), 2);
    assert_eq!(components[0].node_id, "5:1");
    assert_eq!(components[0].key, "c-button");
    assert_eq!(components[1].name, "Chip");
}

#[tokio::test]
async fn test_list_styles() {
    let server = MockServer::start().await;
    mount_file(&server, shop_file()).await;

    let client = client_for(&server).await;
    let styles = list_styles(&client, FILE_ID).await.unwrap();

    let names: Vec<&str> = styles.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Surface", "Heading"]);
    assert_eq!(styles[1].description, "Titles");
}

#[tokio::test]
async fn test_fetch_style_failure_names_style() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/styles/k-missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"status": 404, "error": true})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = fetch_style(&client, "k-missing").await.unwrap_err();

    assert!(matches!(err, DropitError::StyleFetch { ref key, .. } if key == "k-missing"));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_images_by_ids_returns_raw_map() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/images/{}", FILE_ID)))
        .and(query_param("ids", "9:9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": {"9:9": "https://cdn/9.png"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let urls = images_by_ids(&client, FILE_ID, &["9:9".to_string()], &ImageOptions::default())
        .await
        .unwrap();

    assert_eq!(urls["9:9"].as_deref(), Some("https://cdn/9.png"));
}
