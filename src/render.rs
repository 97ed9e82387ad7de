use crate::map::{Map, Pose, Tile};
use crate::ray::{cast_ray, RayHit};
use std::f32::consts::FRAC_PI_3;

/// Flat 8-bit color for one wall strip.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// One draw command for the host rasterizer: paint a vertical strip of
/// `height` pixels, centered on the horizon, at `column`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ColumnDraw {
    pub column: usize,
    pub height: f32,
    pub color: Rgb,
}

/// Everything the projection sweep is tuned by. The defaults give a 640x480
/// view with a 60 degree field of view and a view distance of 20 cells.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RenderParams {
    /// Angular width of the sweep, centered on the pose's heading.
    pub fov: f32,
    /// Number of rays, one per screen column.
    pub columns: usize,
    /// Wall strips are clamped to this many pixels.
    pub viewport_height: f32,
    /// Rays travelling further than this report no hit.
    pub max_distance: f32,
    /// Screen-space wall height is `projection_scale / distance`.
    pub projection_scale: f32,
    pub base_brightness: f32,
    pub brightness_range: f32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            fov: FRAC_PI_3,
            columns: 640,
            viewport_height: 480.,
            max_distance: 20.,
            projection_scale: 300.,
            base_brightness: 200.,
            brightness_range: 150.,
        }
    }
}

/// Sweep the field of view and emit one draw command per column whose ray
/// registered a hit; columns that miss are skipped, leaving the background.
///
/// The sweep is lazy and pure: the same pose, map, and params always yield
/// the same sequence, and the iterator can be cloned to restart it.
pub fn project_columns(
    pose: Pose,
    map: &Map,
    params: RenderParams,
) -> impl Iterator<Item = ColumnDraw> + Clone + '_ {
    (0..params.columns).filter_map(move |column| project_column(pose, map, params, column))
}

/// Order-preserving parallel version of [`project_columns`]: every ray is
/// independent, so the columns fan out across the rayon pool and collect
/// back sorted by column index.
#[cfg(feature = "parallel")]
pub fn project_columns_par(pose: Pose, map: &Map, params: RenderParams) -> Vec<ColumnDraw> {
    use rayon::prelude::*;

    (0..params.columns)
        .into_par_iter()
        .filter_map(|column| project_column(pose, map, params, column))
        .collect()
}

fn project_column(
    pose: Pose,
    map: &Map,
    params: RenderParams,
    column: usize,
) -> Option<ColumnDraw> {
    let start_angle = pose.angle - params.fov / 2.;
    let angle_step = params.fov / params.columns as f32;
    let angle = start_angle + column as f32 * angle_step;

    let hit = cast_ray(pose.pos, angle, map, params.max_distance)?;
    Some(ColumnDraw {
        column,
        height: (params.projection_scale / hit.distance).min(params.viewport_height),
        color: shade(&hit, &params),
    })
}

/// Distance-faded greyscale, except the active face of an exit cell, which
/// glows blue so the player can spot the way out.
fn shade(hit: &RayHit, params: &RenderParams) -> Rgb {
    let brightness = (params.base_brightness
        - (hit.distance / params.max_distance) * params.brightness_range)
        .clamp(0., 255.);

    match hit.tile {
        Tile::Exit(facing) if facing == hit.face => Rgb {
            r: (brightness * 0.5) as u8,
            g: (brightness * 0.5) as u8,
            b: (brightness + 55.).min(255.) as u8,
        },
        _ => {
            let grey = brightness as u8;
            Rgb {
                r: grey,
                g: grey,
                b: grey,
            }
        }
    }
}
