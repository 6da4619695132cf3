pub mod body;
pub mod material;
pub mod node;
