pub mod contract;
pub mod feature;
pub mod opinion;
pub mod recommendation;
pub mod sentiment;
