use anyhow::Context;
use glam::Vec2;
use std::collections::{HashMap, HashSet};
use std::fs::read_to_string;
use std::path::PathBuf;

/// An impenetrable wall boundary between two points.
///
/// Degenerate segments (`a == b`) are the caller's contract to avoid; the
/// intersection math treats them as permanent misses rather than errors.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            a: Vec2::new(x1, y1),
            b: Vec2::new(x2, y2),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Meta {
    /// Wall brightness `max` at zero distance, fading linearly to black
    /// over `falloff` map units.
    Shade { max: u8, falloff: u32 },
    /// Close the map with four boundary walls around the given extent.
    Frame { width: u32, height: u32 },
}

#[derive(Clone, PartialEq, Default, Debug)]
pub struct Map {
    pub walls: Vec<Segment>,
    pub spawn: Option<Vec2>,
    pub meta: HashSet<Meta>,
}

impl Map {
    pub fn load(name: PathBuf) -> anyhow::Result<Self> {
        log::info!("loading map at {}", name.display());
        Self::parse(&read_to_string(&name)?)
    }

    pub fn parse(source: &str) -> anyhow::Result<Self> {
        let mut lines = source.lines();
        let mut this = Self::default();

        while let Some(line) = lines.by_ref().next() {
            match line {
                "!!!!META" => this.parse_meta(&mut lines)?,
                "!!!!WALLS" => this.parse_walls(&mut lines)?,
                other => anyhow::bail!("unrecognized directive: {other}"),
            }
        }

        for meta in this.meta.iter() {
            if let Meta::Frame { width, height } = meta {
                let (w, h) = (*width as f32, *height as f32);
                this.walls.extend([
                    Segment::new(0., 0., w, 0.),
                    Segment::new(0., 0., 0., h),
                    Segment::new(w, 0., w, h),
                    Segment::new(0., h, w, h),
                ]);
            }
        }

        Ok(this)
    }

    fn parse_meta<'lines>(
        &mut self,
        mut lines: impl Iterator<Item = &'lines str>,
    ) -> anyhow::Result<()> {
        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            let mut chunks = line.split(',');
            let directive = chunks.by_ref().next().unwrap();
            let params = chunks
                .map(|param| param.split_once('='))
                .collect::<Option<HashMap<_, _>>>()
                .context("incorrectly formatted meta")?;
            match directive {
                "shade" => {
                    self.meta.insert(Meta::Shade {
                        max: params.get("max").unwrap_or(&"125").parse()?,
                        falloff: params.get("falloff").unwrap_or(&"600").parse()?,
                    });
                }
                "frame" => {
                    self.meta.insert(Meta::Frame {
                        width: params.get("width").context("frame needs a width")?.parse()?,
                        height: params
                            .get("height")
                            .context("frame needs a height")?
                            .parse()?,
                    });
                }
                "spawn" => {
                    self.spawn = Some(Vec2::new(
                        params.get("x").context("spawn needs an x")?.parse()?,
                        params.get("y").context("spawn needs a y")?.parse()?,
                    ));
                }
                other => anyhow::bail!("unrecognized meta directive: {other}"),
            }
        }

        Ok(())
    }

    fn parse_walls<'lines>(
        &mut self,
        mut lines: impl Iterator<Item = &'lines str>,
    ) -> anyhow::Result<()> {
        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            let coords = line
                .split(',')
                .map(|coord| coord.trim().parse::<f32>())
                .collect::<Result<Vec<_>, _>>()?;
            let &[x1, y1, x2, y2] = &coords[..] else {
                anyhow::bail!("wall needs four coordinates: {line}");
            };
            self.walls.push(Segment::new(x1, y1, x2, y2));
        }

        Ok(())
    }
}
