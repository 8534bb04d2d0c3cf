//! Plain-text level grids
//!
//! A level file holds rows of whitespace-separated tile codes: 0 empty,
//! 1 solid, 2 and up destructible with a small code-to-color table. Cell
//! size comes from dividing the level pixel area by the grid dimensions.
//! The parsed grid is retained so a reload rebuilds bricks without touching
//! the filesystem again.

use std::path::Path;

use glam::{Vec2, Vec3};

use crate::sim::state::{Body, Brick};

const SOLID_TINT: Vec3 = Vec3::new(0.8, 0.8, 0.7);

/// Tint for a destructible tile code; codes outside the table render white
fn tile_tint(code: u32) -> Vec3 {
    match code {
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        5 => Vec3::new(1.0, 0.5, 0.0),
        _ => Vec3::ONE,
    }
}

/// One parsed level: the tile grid plus the bricks built from it
#[derive(Debug)]
pub struct Level {
    tiles: Vec<Vec<u32>>,
    pub bricks: Vec<Brick>,
    /// Pixel area the brick field occupies
    width: f32,
    height: f32,
}

impl Level {
    /// Parse level text over a `width` x `height` pixel brick field.
    ///
    /// The first row fixes the column count: shorter rows are padded with
    /// empty cells, longer rows truncated. Blank lines are skipped.
    pub fn parse(text: &str, width: f32, height: f32) -> Self {
        let mut tiles: Vec<Vec<u32>> = Vec::new();
        for line in text.lines() {
            // Token reading stops at the first non-numeric entry in a row
            let row: Vec<u32> = line
                .split_whitespace()
                .map_while(|token| token.parse().ok())
                .collect();
            if row.is_empty() {
                continue;
            }
            tiles.push(row);
        }

        if let Some(columns) = tiles.first().map(Vec::len) {
            let jagged = tiles.iter().any(|row| row.len() != columns);
            if jagged {
                log::warn!("jagged level rows, normalizing to {columns} columns");
            }
            for row in &mut tiles {
                row.resize(columns, 0);
            }
        }

        let bricks = build_bricks(&tiles, width, height);
        Self {
            tiles,
            bricks,
            width,
            height,
        }
    }

    /// Load a level from disk. A missing or unreadable file is not an
    /// error: the level simply has zero bricks.
    pub fn load(path: &Path, width: f32, height: f32) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text, width, height),
            Err(err) => {
                log::warn!("level {} unreadable ({err}), loading empty", path.display());
                Self::parse("", width, height)
            }
        }
    }

    /// Rebuild the bricks from the retained tile grid
    pub fn reset(&mut self) {
        self.bricks = build_bricks(&self.tiles, self.width, self.height);
    }

    /// Cleared once every destructible brick is destroyed
    pub fn is_completed(&self) -> bool {
        self.bricks
            .iter()
            .all(|brick| brick.solid || brick.body.destroyed)
    }
}

fn build_bricks(tiles: &[Vec<u32>], width: f32, height: f32) -> Vec<Brick> {
    let rows = tiles.len();
    let Some(columns) = tiles.first().map(Vec::len).filter(|&c| c > 0) else {
        return Vec::new();
    };

    let unit = Vec2::new(width / columns as f32, height / rows as f32);
    let mut bricks = Vec::new();
    for (y, row) in tiles.iter().enumerate() {
        for (x, &code) in row.iter().enumerate() {
            if code == 0 {
                continue;
            }
            let pos = Vec2::new(unit.x * x as f32, unit.y * y as f32);
            let (tint, solid) = if code == 1 {
                (SOLID_TINT, true)
            } else {
                (tile_tint(code), false)
            };
            bricks.push(Brick {
                body: Body::new(pos, unit, tint),
                solid,
            });
        }
    }
    bricks
}
