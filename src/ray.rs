use crate::map::{Map, Tile};
use glam::Vec2;

/// The four cell faces a ray can strike.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Cardinal {
    North,
    East,
    South,
    West,
}

/// Result of a single ray cast: perpendicular distance to the struck cell,
/// what was struck, which face, and where.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RayHit {
    pub distance: f32,
    pub tile: Tile,
    pub face: Cardinal,
    pub cell: (i32, i32),
}

/// Cast a single ray from `origin` at `angle` through the map using grid DDA,
/// returning the first non-empty cell within `max_distance`.
///
/// The distance is measured to the grid line just crossed (the pre-increment
/// side distance), not point-to-point, so a caller projecting wall heights
/// from it gets no fisheye distortion. Leaving the map counts as striking an
/// implicit boundary wall at `max_distance`.
pub fn cast_ray(origin: Vec2, angle: f32, map: &Map, max_distance: f32) -> Option<RayHit> {
    let dir = Vec2::from_angle(angle);

    let mut map_x = origin.x.floor() as i32;
    let mut map_y = origin.y.floor() as i32;

    // parametric ray length to cross one grid line per axis; infinite for
    // axis-aligned rays, which the IEEE comparisons below tolerate
    let delta_dist_x = dir.x.abs().recip();
    let delta_dist_y = dir.y.abs().recip();

    let (step_x, mut side_dist_x) = if dir.x < 0. {
        (-1, (origin.x - map_x as f32) * delta_dist_x)
    } else {
        (1, (map_x as f32 + 1. - origin.x) * delta_dist_x)
    };
    let (step_y, mut side_dist_y) = if dir.y < 0. {
        (-1, (origin.y - map_y as f32) * delta_dist_y)
    } else {
        (1, (map_y as f32 + 1. - origin.y) * delta_dist_y)
    };

    loop {
        // advance whichever axis crosses its next grid line sooner; an
        // infinite (or NaN) side distance never wins this comparison
        let (distance, face) = if side_dist_x < side_dist_y {
            let crossed = side_dist_x;
            side_dist_x += delta_dist_x;
            map_x += step_x;
            let face = if dir.x > 0. {
                Cardinal::West
            } else {
                Cardinal::East
            };
            (crossed, face)
        } else {
            let crossed = side_dist_y;
            side_dist_y += delta_dist_y;
            map_y += step_y;
            let face = if dir.y > 0. {
                Cardinal::North
            } else {
                Cardinal::South
            };
            (crossed, face)
        };

        if distance > max_distance {
            return None;
        }

        if !map.in_bounds(map_x, map_y) {
            // imaginary wall closing off an open edge
            return Some(RayHit {
                distance: max_distance,
                tile: Tile::Wall,
                face,
                cell: (map_x, map_y),
            });
        }

        let tile = map.cell(map_x, map_y);
        if tile != Tile::Empty {
            return Some(RayHit {
                distance,
                tile,
                face,
                cell: (map_x, map_y),
            });
        }
    }
}
