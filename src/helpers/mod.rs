pub mod grouping;
pub mod meta;
pub mod summary;
pub mod template;
