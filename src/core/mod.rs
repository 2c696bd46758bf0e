mod effects;
mod reducer;

pub mod infra;

pub use effects::{CoreDispatch, CoreEffect, CoreEffects};
pub use reducer::spawn_app_actor;
