use approx::assert_relative_eq;
use glam::Vec2;
use std::f32::consts::FRAC_PI_2;
use warren::{project_columns, ColumnDraw, Level, Map, Pose, RenderParams};

fn single_ray_params() -> RenderParams {
    RenderParams {
        fov: 0.,
        columns: 1,
        ..RenderParams::default()
    }
}

fn sweep(pose: Pose, map: &Map, params: RenderParams) -> Vec<ColumnDraw> {
    project_columns(pose, map, params).collect()
}

#[test]
fn identical_inputs_give_identical_sweeps() {
    let level = &Level::builtin_set().unwrap()[0];
    let params = RenderParams::default();

    let first = sweep(level.start, &level.map, params);
    let second = sweep(level.start, &level.map, params);

    assert_eq!(first, second);
    assert!(!first.is_empty());
    assert!(first.windows(2).all(|w| w[0].column < w[1].column));
    assert!(first.iter().all(|draw| draw.column < params.columns));
}

#[test]
fn sweep_restarts_from_a_clone() {
    let level = &Level::builtin_set().unwrap()[0];
    let columns = project_columns(level.start, &level.map, RenderParams::default());

    let restarted: Vec<_> = columns.clone().collect();
    let original: Vec<_> = columns.collect();
    assert_eq!(original, restarted);
}

#[test]
fn wall_height_shrinks_with_distance_and_clamps_nearby() {
    let map = Map::parse("#####\n#   #\n#####").unwrap();
    let params = single_ray_params();

    let far = sweep(Pose { pos: Vec2::new(1.5, 1.5), angle: 0. }, &map, params);
    let near = sweep(Pose { pos: Vec2::new(2.5, 1.5), angle: 0. }, &map, params);

    // distances 2.5 and 1.5 against projection_scale 300
    assert_relative_eq!(far[0].height, 120., epsilon = 1e-3);
    assert_relative_eq!(near[0].height, 200., epsilon = 1e-3);

    // half a cell from the wall the strip saturates the viewport
    let box3 = Map::parse("###\n# #\n###").unwrap();
    let clamped = sweep(Pose { pos: Vec2::new(1.5, 1.5), angle: 0. }, &box3, params);
    assert_relative_eq!(clamped[0].height, params.viewport_height);
}

#[test]
fn shading_fades_grey_with_distance() {
    let map = Map::parse("#####\n#   #\n#####").unwrap();
    let params = single_ray_params();

    let draw = sweep(Pose { pos: Vec2::new(1.5, 1.5), angle: 0. }, &map, params);
    // brightness = 200 - (2.5 / 20) * 150
    assert_eq!(draw[0].color.r, 181);
    assert_eq!(draw[0].color.g, 181);
    assert_eq!(draw[0].color.b, 181);
}

#[test]
fn only_the_active_exit_face_is_tinted() {
    let map = Map::parse("#######\n#  E  #\n#######").unwrap();
    let params = single_ray_params();

    // approaching from the west strikes the west face: plain grey
    let west = sweep(Pose { pos: Vec2::new(1.5, 1.5), angle: 0. }, &map, params);
    assert_eq!(west[0].color.r, west[0].color.g);
    assert_eq!(west[0].color.g, west[0].color.b);

    // approaching from the east strikes the designated east face: blue glow
    let east = sweep(
        Pose { pos: Vec2::new(5.5, 1.5), angle: std::f32::consts::PI },
        &map,
        params,
    );
    assert_eq!(east[0].color.r, east[0].color.g);
    assert!(east[0].color.b > east[0].color.r);
}

#[test]
fn missed_columns_are_skipped() {
    let row = format!("#{}#", " ".repeat(30));
    let walls = "#".repeat(32);
    let map = Map::parse(&format!("{walls}\n{row}\n{walls}")).unwrap();

    let params = RenderParams {
        fov: 0.,
        columns: 1,
        max_distance: 5.,
        ..RenderParams::default()
    };
    let draws = sweep(Pose { pos: Vec2::new(1.5, 1.5), angle: 0. }, &map, params);
    assert!(draws.is_empty());
}

#[test]
fn uniform_corridor_clusters_distances() {
    let map = Map::parse("####\n#  #\n####").unwrap();
    let params = RenderParams {
        fov: FRAC_PI_2,
        columns: 4,
        ..RenderParams::default()
    };

    let draws = sweep(Pose { pos: Vec2::new(1.5, 1.5), angle: 0. }, &map, params);
    assert_eq!(draws.len(), 4);

    // heights are inverse distance, so the cluster check reads off them
    let max = draws.iter().map(|d| d.height).fold(f32::MIN, f32::max);
    let min = draws.iter().map(|d| d.height).fold(f32::MAX, f32::min);
    assert!(
        max / min < 3.,
        "straight corridor should cluster: min {min}, max {max}"
    );
}

#[test]
fn open_side_diverges_distances() {
    // west wall near, south edge open
    let map = Map::parse("#######\n#     #\n#     #\n#     #\n#     #").unwrap();
    let params = RenderParams {
        fov: FRAC_PI_2,
        columns: 4,
        ..RenderParams::default()
    };

    let draws = sweep(
        Pose { pos: Vec2::new(1.5, 1.5), angle: FRAC_PI_2 },
        &map,
        params,
    );
    assert_eq!(draws.len(), 4);

    let max = draws.iter().map(|d| d.height).fold(f32::MIN, f32::max);
    let min = draws.iter().map(|d| d.height).fold(f32::MAX, f32::min);
    assert!(
        max / min > 4.,
        "open side should diverge: min {min}, max {max}"
    );
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_sweep_matches_sequential_order() {
    let level = &Level::builtin_set().unwrap()[2];
    let params = RenderParams::default();

    let sequential = sweep(level.start, &level.map, params);
    let parallel = warren::project_columns_par(level.start, &level.map, params);
    assert_eq!(sequential, parallel);
}
