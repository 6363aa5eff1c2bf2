//! Measurement overlay drawn onto streamed frames.
//!
//! Presentation only: nothing here feeds back into the control loop.

use image::Rgb;

use crate::gesture::{PixelPoint, HAND_CONNECTIONS, LANDMARK_COUNT};

use super::font::{self, GLYPH_HEIGHT};
use super::Frame;

const SKELETON_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const LANDMARK_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const MEASURE_LINE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const TIP_COLOR: Rgb<u8> = Rgb([0, 255, 255]);
const MIDPOINT_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const LABEL_COLOR: Rgb<u8> = Rgb([255, 255, 0]);

const MEASURE_LINE_THICKNESS: i32 = 6;
const TIP_RADIUS: i32 = 10;
const MIDPOINT_RADIUS: i32 = 6;
const LANDMARK_RADIUS: i32 = 3;
const LABEL_SCALE: u32 = 2;
/// Label baseline offset from the midpoint
const LABEL_OFFSET: (i32, i32) = (-40, -15);

/// Drawing instructions for one frame with a detected hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub landmarks: [PixelPoint; LANDMARK_COUNT],
    pub thumb: PixelPoint,
    pub index: PixelPoint,
    pub midpoint: PixelPoint,
    pub distance: u32,
}

/// Draw the hand skeleton, then the thumb–index measurement and its
/// `"<distance>px"` label on top.
pub fn render_overlay(frame: &mut Frame, overlay: &Overlay) {
    for &(from, to) in HAND_CONNECTIONS.iter() {
        draw_line(frame, overlay.landmarks[from], overlay.landmarks[to], 2, SKELETON_COLOR);
    }
    for &point in overlay.landmarks.iter() {
        fill_circle(frame, point, LANDMARK_RADIUS, LANDMARK_COLOR);
    }

    draw_line(
        frame,
        overlay.thumb,
        overlay.index,
        MEASURE_LINE_THICKNESS,
        MEASURE_LINE_COLOR,
    );
    fill_circle(frame, overlay.thumb, TIP_RADIUS, TIP_COLOR);
    fill_circle(frame, overlay.index, TIP_RADIUS, TIP_COLOR);
    fill_circle(frame, overlay.midpoint, MIDPOINT_RADIUS, MIDPOINT_COLOR);

    let (x, baseline) = label_origin(overlay.midpoint);
    let top = baseline - (GLYPH_HEIGHT * LABEL_SCALE) as i32;
    font::draw_text(
        frame,
        x,
        top,
        &format!("{}px", overlay.distance),
        LABEL_COLOR,
        LABEL_SCALE,
    );
}

/// Left end of the label baseline.
fn label_origin(midpoint: PixelPoint) -> (i32, i32) {
    (midpoint.x + LABEL_OFFSET.0, midpoint.y + LABEL_OFFSET.1)
}

fn put_pixel(frame: &mut Frame, x: i32, y: i32, color: Rgb<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < frame.width() && y < frame.height() {
        frame.put_pixel(x, y, color);
    }
}

fn fill_circle(frame: &mut Frame, center: PixelPoint, radius: i32, color: Rgb<u8>) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                put_pixel(frame, center.x + dx, center.y + dy, color);
            }
        }
    }
}

/// Bresenham line stamped with a disc of the requested thickness.
fn draw_line(frame: &mut Frame, from: PixelPoint, to: PixelPoint, thickness: i32, color: Rgb<u8>) {
    let radius = (thickness / 2).max(0);
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);

    loop {
        if radius == 0 {
            put_pixel(frame, x, y, color);
        } else {
            fill_circle(frame, PixelPoint::new(x, y), radius, color);
        }
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
