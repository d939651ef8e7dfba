// Keymod Transform Module
// Modifier resolution: Fn layer, shift, accent composition and memoization

pub mod accent;
pub mod cache;
pub mod engine;
pub mod function;

pub use accent::{compose, Accent};
pub use cache::{ResolutionCache, Resolved};
pub use engine::Resolver;
pub use function::{FnTarget, FunctionLayer};
