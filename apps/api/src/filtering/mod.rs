pub mod engine;
pub mod tags;

/// User-entered tag filters, in chip display order.
pub type ManualFilterSet = tags::TagSet;
