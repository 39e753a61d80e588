// ============================================================================
// STATE MODULE - Rc<RefCell> shared state, tokens and the app context
// ============================================================================

pub mod reactivity;
pub mod token_vault;
pub mod app_state;

pub use reactivity::*;
pub use token_vault::*;
pub use app_state::*;
