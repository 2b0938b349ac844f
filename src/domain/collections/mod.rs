//! Container types backing the workspace registry.

pub mod chained_hash_map;
pub mod linked_hash_set;
pub mod linked_list;

pub use chained_hash_map::ChainedHashMap;
pub use linked_hash_set::LinkedHashSet;
pub use linked_list::LinkedList;
