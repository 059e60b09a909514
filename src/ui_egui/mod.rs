// egui adapter for the scheduling grid

pub mod pointer;
pub mod surface_store;

pub use pointer::{edge_at, RowGeometry};
pub use surface_store::SurfaceStore;
