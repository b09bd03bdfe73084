//! Value objects - Immutable objects defined by their attributes

mod hint_category;

pub use hint_category::HintCategory;
