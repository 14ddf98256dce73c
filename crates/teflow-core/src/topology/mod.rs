mod fat_tree;
mod ring;

pub use fat_tree::{fat_tree, FatTreeLayout};
pub use ring::{access_aggregation, AccessLayout, AccessParams, LinkLayer};
