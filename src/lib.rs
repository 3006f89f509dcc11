//! Segment-map raycasting: a fan of rays cast from a moving viewpoint,
//! nearest wall hits per ray, and the fish-eye-corrected column projection
//! that turns them into a first-person view. Drawing, input capture and the
//! frame loop live in the driver binary, behind the [`projector::DrawSink`]
//! boundary.

pub mod map;
pub mod math;
pub mod projector;
pub mod ray;
pub mod viewer;
