//! Graph analyses over parsed declaration trees.

pub mod test_topology;
