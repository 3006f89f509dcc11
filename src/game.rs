use crate::{StringToAnyhow, HEIGHT, WIDTH};
use anyhow::Context;
use fancast::map::{Map, Meta};
use fancast::math::VecExt;
use fancast::projector::{DrawSink, Projector};
use fancast::viewer::Viewer;
use glam::Vec2;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;
use std::f32::consts::PI;

#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum GameState {
    Playing,
    TopDown,
    Paused,
}

const FOV: f32 = PI / 3.0;
// one ray per pixel column
const RAY_COUNT: usize = WIDTH;
const SPEED: f32 = 2.0;

/// Adapts the SDL canvas to the core's draw sink. Lines and points use the
/// current stroke color; rectangles are shaded gray by the caller.
struct CanvasSink<'c> {
    canvas: &'c mut Canvas<Window>,
    stroke: Color,
}

impl DrawSink for CanvasSink<'_> {
    fn line(&mut self, from: Vec2, to: Vec2) -> anyhow::Result<()> {
        self.canvas.set_draw_color(self.stroke);
        self.canvas
            .draw_line(
                Point::new(from.x as i32, from.y as i32),
                Point::new(to.x as i32, to.y as i32),
            )
            .ah()
    }

    fn point(&mut self, at: Vec2, radius: f32) -> anyhow::Result<()> {
        self.canvas.set_draw_color(self.stroke);
        let r = radius as i32;
        self.canvas
            .fill_rect(Rect::new(
                at.x as i32 - r,
                at.y as i32 - r,
                radius as u32 * 2,
                radius as u32 * 2,
            ))
            .ah()
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, shade: u8) -> anyhow::Result<()> {
        self.canvas.set_draw_color(Color::RGB(shade, shade, shade));
        // SDL rects are i32 internally; a point-blank wall projects taller
        // than any screen
        let h = h.min(16_384.0);
        self.canvas
            .fill_rect(Rect::new(x as i32, y as i32, w.ceil() as u32, h as u32))
            .ah()
    }
}

pub(crate) struct Game {
    map: Map,
    viewer: Viewer,
    projector: Projector,
    pub game_state: GameState,
    mouse: Vec2,
    pending_move: Vec2,
    pub canvas: Canvas<Window>,
    pub update: bool,
}

impl Game {
    /// initialize game
    pub fn new(canvas: Canvas<Window>) -> anyhow::Result<Self> {
        let map = Map::load("map/map.fan".into())?;
        let spawn = map.spawn.context("no spawn in map")?;
        let viewer = Viewer::new(spawn, FOV, 0.0, RAY_COUNT)?;

        let mut projector = Projector::new(WIDTH as f32, HEIGHT as f32);
        if let Some(Meta::Shade { max, falloff }) = map
            .meta
            .iter()
            .find(|item| matches!(item, Meta::Shade { .. }))
        {
            projector.max_shade = *max;
            projector.falloff = *falloff as f32;
        }

        Ok(Self {
            map,
            viewer,
            projector,
            game_state: GameState::Playing,
            // look along +x until the mouse says otherwise
            mouse: spawn + Vec2::new(50.0, 0.0),
            pending_move: Vec2::ZERO,
            canvas,
            update: true,
        })
    }

    /// handle key presses for while in "playing" state
    pub fn playing_key_once(&mut self, key: Keycode) {
        match key {
            // top-down view toggle
            Keycode::M => {
                self.game_state = if self.game_state == GameState::TopDown {
                    GameState::Playing
                } else {
                    GameState::TopDown
                };
            }
            // pause game
            Keycode::Escape => self.game_state = GameState::Paused,
            _ => {}
        }
    }

    /// handle key repeating for while in "playing" state
    pub fn playing_key(&mut self, key: Keycode) {
        match key {
            Keycode::W | Keycode::Up => self.pending_move.y -= 1.0,
            Keycode::S | Keycode::Down => self.pending_move.y += 1.0,
            Keycode::A | Keycode::Left => self.pending_move.x -= 1.0,
            Keycode::D | Keycode::Right => self.pending_move.x += 1.0,
            _ => {}
        }
    }

    pub fn mouse_moved(&mut self, x: i32, y: i32) {
        self.mouse = Vec2::new(x as f32, y as f32);
    }

    /// fold the buffered input into the viewer and run one sweep
    fn advance_frame(&mut self) {
        let mut step = self.pending_move;
        self.pending_move = Vec2::ZERO;

        // diagonal movement is no faster than straight
        if step.mag() > 1.0 {
            step = step.normalize_or_zero();
        }
        self.viewer.advance(step * SPEED);

        // mouse y grows downward; mirror it so the fan tracks the cursor
        let pos = self.viewer.pos();
        let target = pos + Vec2::new(self.mouse.x - pos.x, pos.y - self.mouse.y);

        self.viewer.sweep(target, &self.map.walls);
    }

    /// draw while in "playing" state
    pub fn playing_draw(&mut self) -> anyhow::Result<()> {
        self.advance_frame();

        self.canvas.set_draw_color(Color::BLACK);
        self.canvas.clear();

        let mut sink = CanvasSink {
            canvas: &mut self.canvas,
            stroke: Color::WHITE,
        };
        self.projector.render(&self.viewer, &mut sink)?;

        if self.game_state == GameState::TopDown {
            self.top_down_draw()?;
        }

        Ok(())
    }

    /// top-down overlay: walls, the surviving rays, the viewer itself
    fn top_down_draw(&mut self) -> anyhow::Result<()> {
        self.canvas.set_blend_mode(BlendMode::Blend);
        self.canvas.set_draw_color(Color::RGBA(0, 0, 0, 0x77));
        self.canvas.fill_rect(None).ah()?;
        self.canvas.set_blend_mode(BlendMode::None);

        let pos = self.viewer.pos();
        let mut sink = CanvasSink {
            canvas: &mut self.canvas,
            stroke: Color::WHITE,
        };

        for wall in self.map.walls.iter() {
            sink.line(wall.a, wall.b)?;
        }

        sink.stroke = Color::GREEN;
        for hit in self.viewer.hits().iter().flatten() {
            sink.line(pos, hit.point)?;
        }

        sink.stroke = Color::RED;
        sink.point(pos, 4.0)?;

        Ok(())
    }

    /// draw pause screen
    pub fn pause_draw(&mut self) -> anyhow::Result<()> {
        self.canvas.set_blend_mode(BlendMode::Blend);
        self.canvas.set_draw_color(Color::RGBA(0, 0, 0, 0xDD));
        self.canvas.fill_rect(None).ah()?;
        self.canvas.set_blend_mode(BlendMode::None);

        Ok(())
    }
}
