//! Layout and pointer-interaction engine for the widget dashboard.
//!
//! This crate is compiled to WebAssembly and runs in the browser, and is also
//! built natively for tests and the headless replay tool. It owns the widget
//! records of a dashboard, translates raw pointer events into percentage-based
//! move and resize geometry, and keeps the stacking order dense. The host
//! layer only wires DOM events to [`engine::BoardCore`] (or [`dom::Board`] in
//! the browser) and decides what to do with settings snapshots.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Per-widget session state machine and the [`engine::BoardCore`] router |
//! | [`store`] | Widget records and the stack-order preserving [`store::LayoutStore`] |
//! | [`geometry`] | Pixel and percentage rectangles, coordinate conversions |
//! | [`policy`] | Move clamping and per-edge resize rules |
//! | [`input`] | Pointer events, interaction modes and session state |
//! | [`hit`] | Edge/corner hotspots and their capture extents |
//! | [`surface`] | The view-layer seam and a headless implementation |
//! | [`output`] | Settings-output hook invoked after layout mutations |
//! | [`dom`] | `web_sys` surface and the `wasm-bindgen` board wrapper |
//! | [`consts`] | Shared numeric constants (minimum size, snap distance, hotspot sizes) |

pub mod consts;
pub mod dom;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod output;
pub mod policy;
pub mod store;
pub mod surface;
