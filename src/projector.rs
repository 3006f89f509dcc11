use anyhow::Result;
use glam::Vec2;

use crate::viewer::Viewer;

/// Where the core's drawing ends up. The driver supplies one per output
/// surface; the core only ever emits lines, points and shaded rectangles.
pub trait DrawSink {
    fn line(&mut self, from: Vec2, to: Vec2) -> Result<()>;
    fn point(&mut self, at: Vec2, radius: f32) -> Result<()>;
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, shade: u8) -> Result<()>;
}

/// One vertical wall slice, split around the screen midline.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Column {
    pub x: f32,
    pub width: f32,
    /// Top edge of the upper half; the lower half starts at the midline.
    pub top: f32,
    pub half_height: f32,
    pub shade: u8,
}

/// Turns the viewer's (angle, distance) hits into screen columns:
/// fish-eye-corrected distance, inverse-proportional height, linear
/// distance shading.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Projector {
    pub screen_w: f32,
    pub screen_h: f32,
    /// Distance-to-height divisor; bigger means squatter walls.
    pub depth_scale: f32,
    /// Brightness of a wall at zero distance.
    pub max_shade: u8,
    /// Distance at which shading bottoms out at black.
    pub falloff: f32,
}

impl Projector {
    pub fn new(screen_w: f32, screen_h: f32) -> Self {
        Self {
            screen_w,
            screen_h,
            depth_scale: 0.02,
            max_shade: 125,
            falloff: 600.0,
        }
    }

    /// Per-column projection values, one slot per ray.
    ///
    /// The centre ray is looked up in the full ray list, so it stays the
    /// fan's geometric centre even when edge rays miss.
    pub fn columns(&self, viewer: &Viewer) -> Vec<Option<Column>> {
        let rays = viewer.rays();
        if rays.is_empty() {
            return Vec::new();
        }

        let width = self.screen_w / rays.len() as f32;
        let centre_deg = rays[rays.len() / 2].angle_deg;

        viewer
            .hits()
            .iter()
            .enumerate()
            .map(|(i, hit)| {
                hit.map(|hit| {
                    // flatten the circular fan onto the screen plane
                    let beta_deg = hit.angle_deg - centre_deg;
                    let corrected = hit.distance * beta_deg.to_radians().cos();

                    let shade = self.max_shade as f32 * (1.0 - corrected / self.falloff);
                    let half_height = self.screen_h / (corrected * self.depth_scale) / 2.0;

                    Column {
                        x: i as f32 * width + width / 2.0,
                        width,
                        top: self.screen_h / 2.0 - half_height,
                        half_height,
                        shade: shade.clamp(0.0, self.max_shade as f32) as u8,
                    }
                })
            })
            .collect()
    }

    /// Emit the upper and lower half of every surviving column.
    pub fn render(&self, viewer: &Viewer, sink: &mut dyn DrawSink) -> Result<()> {
        let midline = self.screen_h / 2.0;

        for column in self.columns(viewer).into_iter().flatten() {
            sink.rect(
                column.x,
                column.top,
                column.width,
                column.half_height,
                column.shade,
            )?;
            sink.rect(
                column.x,
                midline,
                column.width,
                column.half_height,
                column.shade,
            )?;
        }

        Ok(())
    }
}
