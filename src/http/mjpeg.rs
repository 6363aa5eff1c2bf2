use axum::body::{Body, Bytes};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;

use crate::engine::EngineHandle;

pub const BOUNDARY: &str = "frame";

/// Wrap one JPEG image as a multipart/x-mixed-replace part.
pub fn frame_part(jpeg: &[u8]) -> Bytes {
    let header = format!("--{BOUNDARY}\r\nContent-Type: image/jpeg\r\n\r\n");
    let mut part = Vec::with_capacity(header.len() + jpeg.len() + 2);
    part.extend_from_slice(header.as_bytes());
    part.extend_from_slice(jpeg);
    part.extend_from_slice(b"\r\n");
    Bytes::from(part)
}

/// Stream every annotated frame published after subscription.
///
/// Lagging clients skip the frames they missed rather than buffering them.
pub fn stream(handle: &EngineHandle) -> Response {
    let frames = BroadcastStream::new(handle.subscribe_frames()).filter_map(|result| async move {
        match result {
            Ok(jpeg) => Some(Ok::<_, Infallible>(frame_part(&jpeg))),
            Err(_) => None,
        }
    });

    (
        [
            (
                CONTENT_TYPE,
                format!("multipart/x-mixed-replace; boundary={BOUNDARY}"),
            ),
            (CACHE_CONTROL, "no-cache".to_string()),
        ],
        Body::from_stream(frames),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_part_layout() {
        let part = frame_part(&[0xFF, 0xD8, 0xFF, 0xD9]);
        let expected: &[u8] = b"--frame\r\nContent-Type: image/jpeg\r\n\r\n\xFF\xD8\xFF\xD9\r\n";
        assert_eq!(&part[..], expected);
    }
}
