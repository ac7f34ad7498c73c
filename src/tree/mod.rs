//! Region quadtree
//!
//! A node covers a rectangular [`Region`]; internal nodes own exactly four
//! children whose regions tile the parent under the floor/remainder split
//! rule. Geometry is never stored separately: every child's region follows
//! from its parent's region and its quadrant.

mod node;
mod region;
mod traversal;

pub use node::QuadNode;
pub use region::{Quadrant, Region};
pub use traversal::{count_leaves, count_nodes, depth, Leaves, PreOrder, TreeSummary};
