pub mod focus;
pub mod lighting;
pub mod orbit;
pub mod picking;
pub mod rng;
pub mod starfield;
