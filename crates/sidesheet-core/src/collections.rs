//! Hash map used by listener registries: FxHash by default, the std hasher
//! with the `std-hash` feature.

#[cfg(not(feature = "std-hash"))]
pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;

#[cfg(feature = "std-hash")]
pub type HashMap<K, V> = std::collections::HashMap<K, V>;
