//! Viewport interaction engine for the annotation stage.
//!
//! This crate decides two things for a rendered annotation surface: which
//! tool currently receives pointer input, and what the viewport transform
//! (zoom scale and pan offset) is. Rendering of the annotation shapes and all
//! data fetching belong to the host; the host wires DOM events into a
//! [`surface::Surface`] and re-renders when the viewport notifies a change.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`surface`] | Per-surface owner of viewport, tool manager and scheduler |
//! | [`manager`] | Tool registration, group exclusivity and event routing |
//! | [`tool`] | Tool identity, groups and the tagged tool variants |
//! | [`pan_zoom`] | Pan/zoom tool and its drag state machine |
//! | [`move_tool`] | Passive move/select tool |
//! | [`viewport`] | Viewport contract and the image viewport implementation |
//! | [`scheduler`] | Animation-frame scheduling capability |
//! | [`notify`] | Observer lists for change notification |
//! | [`input`] | Pointer and keyboard input types |
//! | [`shortcuts`] | Advisory keyboard bindings and tool actions |
//! | [`container`] | Host container handle and cursor styles |
//! | [`geom`] | Points, deltas and sizes |
//! | [`config`] | Zoom configuration |
//! | [`consts`] | Shared numeric constants (zoom step and limits) |
//! | `web` | Browser scheduler and container (feature `web`) |

pub mod config;
pub mod consts;
pub mod container;
pub mod geom;
pub mod input;
pub mod manager;
pub mod move_tool;
pub mod notify;
pub mod pan_zoom;
pub mod scheduler;
pub mod shortcuts;
pub mod surface;
pub mod tool;
pub mod viewport;
#[cfg(feature = "web")]
pub mod web;
