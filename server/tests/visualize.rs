//! Router-level tests with a stub segmentation backend.

use std::io::Cursor;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use tower::ServiceExt;

use arview::{ArPipeline, PatternChoice, PatternKind, Segmenter};
use server::catalog::{IdolAsset, IdolCatalog};
use server::router::router;
use server::state::AppState;

const BOUNDARY: &str = "X-TEST-BOUNDARY";

struct AllWall;

impl Segmenter for AllWall {
    fn segment(&self, photo: &RgbImage) -> arview::Result<GrayImage> {
        Ok(GrayImage::from_pixel(
            photo.width(),
            photo.height(),
            Luma([255]),
        ))
    }
}

fn encode_png(image: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("Should encode");
    bytes
}

fn test_app() -> axum::Router {
    // Bright idol cutout on a near-black backdrop.
    let mut idol = RgbImage::from_pixel(60, 90, Rgb([0, 0, 0]));
    for y in 10..80 {
        for x in 10..50 {
            idol.put_pixel(x, y, Rgb([230, 180, 60]));
        }
    }
    let asset = IdolAsset::new(1, "Ganesh", "12 inches", "image/png", encode_png(&idol))
        .expect("Should decode idol");

    let pipeline = ArPipeline::builder(AllWall)
        .pattern_choice(PatternChoice::Fixed(PatternKind::Geometric))
        .build();

    router(AppState {
        catalog: Arc::new(IdolCatalog::from_assets([asset])),
        pipeline: Arc::new(pipeline),
    })
}

fn multipart_body(fields: &[(&str, &[u8], bool)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value, is_file) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        if *is_file {
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"wall.png\"\r\n\
                     Content-Type: image/png\r\n\r\n"
                )
                .as_bytes(),
            );
        } else {
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            );
        }
        body.extend_from_slice(value);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn visualize_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ar/visualize")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("Should build request")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Should collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body should be JSON")
}

#[tokio::test]
async fn visualize_returns_composite_jpeg() {
    let wall = encode_png(&RgbImage::from_pixel(400, 300, Rgb([128, 128, 128])));
    let body = multipart_body(&[
        ("photo", &wall, true),
        ("idol_id", b"1", false),
        ("x", b"0.5", false),
        ("y", b"1.0", false),
        ("scale", b"0.25", false),
    ]);

    let response = test_app().oneshot(visualize_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["width"], 400);
    assert_eq!(json["height"], 300);

    let data_uri = json["image"].as_str().expect("image should be a string");
    let encoded = data_uri
        .strip_prefix("data:image/jpeg;base64,")
        .expect("image should be a JPEG data URI");
    let jpeg = {
        use base64::Engine as _;
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .expect("payload should be valid base64")
    };

    let composite = image::load_from_memory(&jpeg)
        .expect("payload should decode")
        .to_rgb8();
    assert_eq!(composite.dimensions(), (400, 300));

    // The idol lands bottom-center: that region must differ from a region
    // far from the placement, which only carries the decorated background.
    let placed = composite.get_pixel(200, 290);
    let background = composite.get_pixel(20, 290);
    let diff: i32 = placed
        .0
        .iter()
        .zip(background.0.iter())
        .map(|(&a, &b)| (a as i32 - b as i32).abs())
        .sum();
    assert!(diff > 60, "idol not visible: {placed:?} vs {background:?}");
}

#[tokio::test]
async fn grayscale_photo_is_accepted() {
    // Single-channel uploads are converted to RGB before the pipeline runs.
    let mut wall = Vec::new();
    GrayImage::from_pixel(320, 240, Luma([128]))
        .write_to(&mut Cursor::new(&mut wall), ImageFormat::Png)
        .expect("Should encode");
    let body = multipart_body(&[("photo", &wall, true), ("idol_id", b"1", false)]);

    let response = test_app().oneshot(visualize_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["width"], 320);
    assert_eq!(json["height"], 240);
}

#[tokio::test]
async fn rgba_photo_is_accepted() {
    // The alpha channel is dropped on conversion to RGB.
    let mut wall = Vec::new();
    RgbaImage::from_pixel(320, 240, Rgba([128, 128, 128, 200]))
        .write_to(&mut Cursor::new(&mut wall), ImageFormat::Png)
        .expect("Should encode");
    let body = multipart_body(&[("photo", &wall, true), ("idol_id", b"1", false)]);

    let response = test_app().oneshot(visualize_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["width"], 320);
    assert_eq!(json["height"], 240);
}

#[tokio::test]
async fn unknown_idol_is_404() {
    let wall = encode_png(&RgbImage::from_pixel(100, 80, Rgb([128, 128, 128])));
    let body = multipart_body(&[("photo", &wall, true), ("idol_id", b"999", false)]);

    let response = test_app().oneshot(visualize_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = json_body(response).await;
    assert_eq!(json["code"], "IDOL_NOT_FOUND");
}

#[tokio::test]
async fn undecodable_photo_is_400() {
    let body = multipart_body(&[
        ("photo", b"not an image at all", true),
        ("idol_id", b"1", false),
    ]);

    let response = test_app().oneshot(visualize_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    assert_eq!(json["code"], "INVALID_IMAGE");
}

#[tokio::test]
async fn out_of_range_scale_is_400() {
    let wall = encode_png(&RgbImage::from_pixel(100, 80, Rgb([128, 128, 128])));
    let body = multipart_body(&[
        ("photo", &wall, true),
        ("idol_id", b"1", false),
        ("scale", b"1.5", false),
    ]);

    let response = test_app().oneshot(visualize_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_photo_is_400() {
    let body = multipart_body(&[("idol_id", b"1", false)]);
    let response = test_app().oneshot(visualize_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn idol_listing_returns_metadata() {
    let response = test_app()
        .oneshot(Request::builder().uri("/idols").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let idols = json.as_array().expect("listing should be an array");
    assert_eq!(idols.len(), 1);
    assert_eq!(idols[0]["id"], 1);
    assert_eq!(idols[0]["name"], "Ganesh");
    assert_eq!(idols[0]["size"], "12 inches");
}

#[tokio::test]
async fn idol_image_route_serves_bytes() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/idols/1/image")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(image::load_from_memory(&bytes).is_ok());
}

#[tokio::test]
async fn unknown_idol_image_is_404() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/idols/999/image")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_is_ok() {
    let response = test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
