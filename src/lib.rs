pub mod classifier;
pub mod indent;
pub mod invariants;
mod normalize;
pub mod observe;
pub mod options;
pub mod syntax;
pub mod types;

#[cfg(feature = "pulldown")]
pub mod adapters;

pub use classifier::*;
pub use indent::*;
pub use invariants::*;
pub use observe::*;
pub use options::*;
pub use types::*;
