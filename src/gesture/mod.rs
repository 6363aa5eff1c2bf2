// Gesture module - hand landmark model and thumb–index distance measurement
//
// Landmarks arrive from the vision collaborator in normalized [0,1] image
// coordinates. Only the thumb tip and index fingertip feed the control loop;
// the rest of the skeleton is kept for overlay drawing.

pub mod distance;
pub mod landmarks;

pub use distance::{measure_distance, PixelPoint};
pub use landmarks::{HandLandmarks, Landmark, HAND_CONNECTIONS, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP};
