mod core;

pub use core::{Commodity, Link, LinkId, Network, NodeId, Path};
