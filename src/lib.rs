//! First-person grid-maze rendering core.
//!
//! The crate is a pure computation library: a host loop feeds it a [`Map`]
//! and the player's current [`Pose`] each frame, and gets back one
//! [`ColumnDraw`] per screen column from [`project_columns`], produced by
//! casting a DDA ray per column. Movement stays on the host side too; it
//! validates proposed positions with [`Map::is_blocked`] and detects level
//! completion with [`Map::is_exit`].

pub mod map;
pub mod ray;
pub mod render;

pub use map::{Level, Map, Pose, Tile};
pub use ray::{cast_ray, Cardinal, RayHit};
pub use render::{project_columns, ColumnDraw, RenderParams, Rgb};

#[cfg(feature = "parallel")]
pub use render::project_columns_par;
