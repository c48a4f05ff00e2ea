//! Model-View-Intent primitives the screen stores are built from.
//!
//! ```text
//! source emission / user action ──→ Intent ──→ Reducer ──→ State ──→ subscribers
//! ```

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
