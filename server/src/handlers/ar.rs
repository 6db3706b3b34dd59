//! Handler for the AR visualization endpoint.
//!
//! `POST /ar/visualize` takes a multipart form: `photo` (wall image bytes),
//! `idol_id`, and optional `x`, `y`, `scale` placement fields. The composite
//! comes back as a base64 JPEG data URI inside a JSON payload.

use axum::Json;
use axum::extract::{Multipart, State};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;
use serde::Serialize;

use arview::Placement;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct VisualizeResponse {
    pub status: &'static str,
    /// `data:image/jpeg;base64,...`
    pub image: String,
    pub width: u32,
    pub height: u32,
}

/// POST /ar/visualize
pub async fn visualize(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<VisualizeResponse>> {
    let mut photo_bytes: Option<Vec<u8>> = None;
    let mut idol_id: Option<u32> = None;
    let mut x: Option<f32> = None;
    let mut y: Option<f32> = None;
    let mut scale: Option<f32> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "photo" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read photo: {e}")))?;
                photo_bytes = Some(bytes.to_vec());
            }
            "idol_id" => idol_id = Some(parse_field(&name, &text(field).await?)?),
            "x" => x = Some(parse_field(&name, &text(field).await?)?),
            "y" => y = Some(parse_field(&name, &text(field).await?)?),
            "scale" => scale = Some(parse_field(&name, &text(field).await?)?),
            _ => {}
        }
    }

    let photo_bytes =
        photo_bytes.ok_or_else(|| AppError::BadRequest("missing 'photo' field".into()))?;
    let idol_id =
        idol_id.ok_or_else(|| AppError::BadRequest("missing 'idol_id' field".into()))?;

    let defaults = Placement::default();
    let placement = Placement::new(
        x.unwrap_or(defaults.x),
        y.unwrap_or(defaults.y),
        scale.unwrap_or(defaults.scale),
    )?;

    // Grayscale photos widen to three channels; alpha channels are dropped.
    let wall = image::load_from_memory(&photo_bytes)
        .map_err(|e| AppError::InvalidImage(format!("could not decode wall photo: {e}")))?
        .to_rgb8();
    if wall.width() == 0 || wall.height() == 0 {
        return Err(AppError::InvalidImage("wall photo has zero pixels".into()));
    }

    let idol = state
        .catalog
        .get(idol_id)
        .ok_or(AppError::IdolNotFound(idol_id))?
        .image()
        .clone();

    // The pipeline is synchronous and CPU-bound; keep it off the runtime.
    let pipeline = state.pipeline.clone();
    let composite =
        tokio::task::spawn_blocking(move || pipeline.visualize(&wall, &idol, &placement))
            .await
            .map_err(|e| AppError::Pipeline(format!("pipeline task failed: {e}")))??;

    let (width, height) = composite.dimensions();
    let mut jpeg = Vec::new();
    composite
        .write_to(&mut std::io::Cursor::new(&mut jpeg), ImageFormat::Jpeg)
        .map_err(|e| AppError::Pipeline(format!("failed to encode composite: {e}")))?;

    Ok(Json(VisualizeResponse {
        status: "ok",
        image: format!("data:image/jpeg;base64,{}", STANDARD.encode(&jpeg)),
        width,
        height,
    }))
}

async fn text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("failed to read field: {e}")))
}

fn parse_field<T: std::str::FromStr>(name: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("field '{name}' is not a valid number: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_accepts_padded_numbers() {
        assert_eq!(parse_field::<u32>("idol_id", " 7 ").unwrap(), 7);
        assert_eq!(parse_field::<f32>("x", "0.5").unwrap(), 0.5);
    }

    #[test]
    fn test_parse_field_rejects_garbage() {
        assert!(parse_field::<f32>("x", "half").is_err());
        assert!(parse_field::<u32>("idol_id", "1.5").is_err());
    }
}
