// Keeps the interaction surface in egui memory between frames, so the view
// code can stay a plain function of (entries, context).

use egui::{Context, Id};

use crate::interaction::InteractionSurface;

pub struct SurfaceStore;

impl SurfaceStore {
    fn storage_id() -> Id {
        Id::new("workorder_interaction_surface")
    }

    /// Current surface, or a default one if none was stored yet
    pub fn load(ctx: &Context) -> InteractionSurface {
        ctx.data(|data| data.get_temp::<InteractionSurface>(Self::storage_id()))
            .unwrap_or_default()
    }

    pub fn store(ctx: &Context, surface: InteractionSurface) {
        ctx.data_mut(|data| data.insert_temp(Self::storage_id(), surface));
    }

    /// Run `f` against the stored surface and write the result back.
    pub fn with<R>(ctx: &Context, f: impl FnOnce(&mut InteractionSurface) -> R) -> R {
        let mut surface = Self::load(ctx);
        let result = f(&mut surface);
        Self::store(ctx, surface);
        result
    }

    pub fn clear(ctx: &Context) {
        ctx.data_mut(|data| data.remove::<InteractionSurface>(Self::storage_id()));
    }
}
