//! ---
//! uikit_section: "05-input"
//! uikit_subsection: "module"
//! uikit_type: "source"
//! uikit_scope: "code"
//! uikit_description: "Touch event records and normalisation."
//! uikit_version: "v0.0.0-prealpha"
//! uikit_owner: "tbd"
//! ---
#![warn(missing_docs)]

//! Touch input helpers. Mini-program canvases report touch coordinates as
//! `x`/`y`, while chart libraries read `offsetX`/`offsetY`; this crate bridges
//! the two.

pub mod touch;

pub use touch::{normalize_touches, wrap_touch, InputError, TouchEvent, TouchPoint};
