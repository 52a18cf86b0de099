//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec for reference occurrence offsets (usually 1-2).
pub type Occurrences = SmallVec<[usize; 2]>;

/// SmallVec for per-name symbol candidates (usually 1).
pub type SmallVec2<T> = SmallVec<[T; 2]>;
