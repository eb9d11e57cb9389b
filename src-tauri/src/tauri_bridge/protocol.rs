//! Custom protocol handlers for efficient data transfer
//!
//! This module implements the `frame://` custom protocol for direct binary
//! transfer of render frames, bypassing Tauri's IPC JSON serialization.

use image::{codecs::jpeg::JpegEncoder, ImageEncoder, RgbaImage};
use tauri::http::{Response as HttpResponse, StatusCode};
use tracing::{debug, error};

use crate::config::compression::JPEG_QUALITY;
use super::shared_state::{lock, Frame, SharedFrameBuffer, SharedPerfStats};
use super::BridgeError;

type Response = HttpResponse<Vec<u8>>;

/// Handle requests to the custom `frame://` protocol
///
/// Supported endpoints:
/// - `frame` or `frame.jpg`: JPEG-compressed frame (~50-100KB)
/// - `frame.raw`: Raw RGBA frame
/// - `stats`: Performance statistics as JSON
pub fn handle_frame_protocol(
    uri_path: &str,
    buffer: &SharedFrameBuffer,
    perf_stats: &SharedPerfStats,
) -> Response {
    let resource = uri_path.trim_start_matches('/');

    debug!(resource, "frame protocol request");

    let result = match resource {
        // JPEG compressed frame - much smaller data size!
        "frame" | "frame.jpg" => handle_jpeg_frame(buffer),

        // Raw RGBA frame (for comparison/debugging)
        "frame.raw" => handle_raw_frame(buffer),

        // Performance stats as JSON
        "stats" => handle_stats(perf_stats),

        _ => Ok(text(StatusCode::NOT_FOUND, "Not Found")),
    };

    result.unwrap_or_else(|err| match err {
        BridgeError::NoFrame => text(StatusCode::SERVICE_UNAVAILABLE, "Frame not ready"),
        other => {
            error!(%other, resource, "frame protocol request failed");
            text(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string())
        }
    })
}

/// Handle JPEG-compressed frame request
fn handle_jpeg_frame(buffer: &SharedFrameBuffer) -> Result<Response, BridgeError> {
    let frame = buffer.latest()?.ok_or(BridgeError::NoFrame)?;
    let jpeg_data = encode_jpeg(&frame)?;
    Ok(frame_response(&frame, "image/jpeg", jpeg_data))
}

/// Handle raw RGBA frame request
fn handle_raw_frame(buffer: &SharedFrameBuffer) -> Result<Response, BridgeError> {
    let frame = buffer.latest()?.ok_or(BridgeError::NoFrame)?;
    let rgba = frame.rgba.clone();
    Ok(frame_response(&frame, "application/octet-stream", rgba))
}

/// Handle performance stats request
fn handle_stats(perf_stats: &SharedPerfStats) -> Result<Response, BridgeError> {
    let json = serde_json::to_vec(&*lock(&perf_stats.0)?).unwrap_or_default();
    Ok(build(
        HttpResponse::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/json")
            .header("Access-Control-Allow-Origin", "*"),
        json,
    ))
}

/// Compress RGBA to JPEG (alpha dropped)
fn encode_jpeg(frame: &Frame) -> Result<Vec<u8>, BridgeError> {
    let Some(img) = RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone()) else {
        return Err(BridgeError::InvalidSize {
            width: frame.width,
            height: frame.height,
        });
    };
    let rgb_img = image::DynamicImage::ImageRgba8(img).to_rgb8();

    let mut jpeg_data = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg_data, JPEG_QUALITY).write_image(
        rgb_img.as_raw(),
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(jpeg_data)
}

fn frame_response(frame: &Frame, content_type: &str, body: Vec<u8>) -> Response {
    build(
        HttpResponse::builder()
            .status(StatusCode::OK)
            .header("Content-Type", content_type)
            .header("X-Frame-Width", frame.width.to_string())
            .header("X-Frame-Height", frame.height.to_string())
            .header("Access-Control-Allow-Origin", "*")
            .header(
                "Access-Control-Expose-Headers",
                "X-Frame-Width, X-Frame-Height",
            ),
        body,
    )
}

fn text(status: StatusCode, body: &str) -> Response {
    build(
        HttpResponse::builder()
            .status(status)
            .header("Content-Type", "text/plain"),
        body.as_bytes().to_vec(),
    )
}

// Header values above are all ASCII, so the builder only fails on programmer error.
fn build(builder: tauri::http::response::Builder, body: Vec<u8>) -> Response {
    builder.body(body).unwrap_or_else(|err| {
        error!(%err, "failed to build protocol response");
        let mut response = HttpResponse::new(Vec::new());
        *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        response
    })
}
