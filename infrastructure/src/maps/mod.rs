//! Static map rendering

pub mod static_map;

pub use static_map::{
    LegendEntry, LegendKind, MISSING_KEY_MESSAGE, MapImage, StaticMap, StaticMapBuilder,
};
