mod assessment;
mod citation;
mod clause;
mod precedent;
mod prediction;

pub use assessment::*;
pub use citation::*;
pub use clause::*;
pub use precedent::*;
pub use prediction::*;
