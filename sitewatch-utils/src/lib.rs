/// Transient alerts shown across views.
pub mod alerts;
/// Shared pagination helpers and page-change plumbing.
pub mod pagination;
/// Pure parser helpers.
pub mod parse;
/// Plain-text rendering of pagination controls.
pub mod render;
