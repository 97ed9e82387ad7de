use crate::ray::Cardinal;
use anyhow::Context;
use glam::Vec2;
use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::PathBuf;

/// The built-in level pack: fourteen mazes of increasing size.
const LEVEL_PACK: &str = include_str!("levels.maze");

/// One grid cell. Exit cells carry the face that is rendered as "active";
/// stepping into the cell completes the level regardless of that face.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Empty,
    Wall,
    Exit(Cardinal),
}

/// Player position in fractional cell units plus heading in radians.
///
/// The angle is not normalized by storage; callers may wrap it as they like.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Pose {
    pub pos: Vec2,
    pub angle: f32,
}

/// A rectangular, immutable tile grid. Built once by the level parser; the
/// renderer and collision queries only ever read it.
#[derive(Clone, PartialEq, Debug)]
pub struct Map {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Map {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && (col as usize) < self.width && row >= 0 && (row as usize) < self.height
    }

    /// Tile at integer cell coordinates. Out-of-bounds reads as `Wall`.
    pub fn cell(&self, col: i32, row: i32) -> Tile {
        if self.in_bounds(col, row) {
            self.tiles[row as usize * self.width + col as usize]
        } else {
            Tile::Wall
        }
    }

    /// Whether a continuous position is inside a wall (or off the map).
    /// Exit cells do not block; walking onto them is how a level is won.
    pub fn is_blocked(&self, pos: Vec2) -> bool {
        self.cell(pos.x.floor() as i32, pos.y.floor() as i32) == Tile::Wall
    }

    /// Whether a continuous position stands on an exit cell, from any side.
    pub fn is_exit(&self, pos: Vec2) -> bool {
        matches!(
            self.cell(pos.x.floor() as i32, pos.y.floor() as i32),
            Tile::Exit(_)
        )
    }

    /// Parse a bare grid from tile rows, without the level meta section.
    pub fn parse(src: &str) -> anyhow::Result<Self> {
        parse_main(&mut src.lines())
    }
}

/// A maze plus its starting pose and 1-based display number.
#[derive(Clone, PartialEq, Debug)]
pub struct Level {
    pub number: usize,
    pub map: Map,
    pub start: Pose,
}

impl Level {
    /// Parse a level-pack string: one `!!!!META` + `!!!!MAIN` pair per level.
    pub fn parse_set(src: &str) -> anyhow::Result<Vec<Level>> {
        let mut lines = src.lines();
        let mut levels = Vec::new();
        let mut start = None;

        while let Some(line) = lines.by_ref().next() {
            match line {
                "" => {}
                "!!!!META" => start = Some(parse_meta(&mut lines)?),
                "!!!!MAIN" => {
                    let map = parse_main(&mut lines)?;
                    let number = levels.len() + 1;
                    levels.push(Level {
                        number,
                        map,
                        start: start
                            .take()
                            .with_context(|| format!("level {number} has no start pose"))?,
                    });
                }
                other => anyhow::bail!("unrecognized directive: {other}"),
            }
        }

        log::debug!("parsed {} levels", levels.len());
        Ok(levels)
    }

    /// Load a level pack from disk.
    pub fn load_set(name: PathBuf) -> anyhow::Result<Vec<Level>> {
        log::info!("loading levels at {}", name.display());
        Self::parse_set(&read_to_string(&name)?)
    }

    /// The level pack compiled into the crate.
    pub fn builtin_set() -> anyhow::Result<Vec<Level>> {
        Self::parse_set(LEVEL_PACK)
    }
}

fn parse_meta<'lines>(mut lines: impl Iterator<Item = &'lines str>) -> anyhow::Result<Pose> {
    let mut start = None;

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
            "start" => {
                start = Some(Pose {
                    pos: Vec2::new(
                        params.get("x").context("start missing x")?.parse()?,
                        params.get("y").context("start missing y")?.parse()?,
                    ),
                    // angles are written in degrees in the pack files
                    angle: params
                        .get("angle")
                        .unwrap_or(&"0")
                        .parse::<f32>()?
                        .to_radians(),
                });
            }
            other => anyhow::bail!("unrecognized meta directive: {other}"),
        }
    }

    start.context("meta without a start pose")
}

fn parse_main<'lines>(mut lines: impl Iterator<Item = &'lines str>) -> anyhow::Result<Map> {
    let mut tiles = vec![];
    let mut width = None;
    let mut height = 0;

    for line in lines.by_ref() {
        if line.is_empty() {
            break;
        }

        height += 1;
        let mut row_len = 0;
        for tile in line.chars() {
            row_len += 1;
            tiles.push(match tile {
                ' ' => Tile::Empty,
                '#' => Tile::Wall,
                'N' => Tile::Exit(Cardinal::North),
                'W' => Tile::Exit(Cardinal::West),
                'E' => Tile::Exit(Cardinal::East),
                'S' => Tile::Exit(Cardinal::South),
                other => anyhow::bail!("invalid tile in map: {other}"),
            });
        }

        match width {
            None => width = Some(row_len),
            Some(w) if w == row_len => {}
            Some(w) => anyhow::bail!("ragged map row: expected {w} tiles, got {row_len}"),
        }
    }

    let width = width.context("map with no rows")?;
    Ok(Map {
        width,
        height,
        tiles,
    })
}
