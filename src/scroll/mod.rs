pub(crate) mod element;
pub(crate) mod geometry;
pub(crate) mod tracker;
