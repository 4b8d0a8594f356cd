//! ---
//! uikit_section: "14-versioning"
//! uikit_subsection: "module"
//! uikit_type: "source"
//! uikit_scope: "code"
//! uikit_description: "Version comparison helpers for platform feature gates."
//! uikit_version: "v0.0.0-prealpha"
//! uikit_owner: "tbd"
//! ---
#![warn(missing_docs)]

//! Helpers for comparing the loose, dotted version strings reported by host
//! platforms and SDKs (`"2.9.0"`, `"8.0.5"`, `"3.1beta"`).

pub mod compare;

pub use compare::{compare_version, meets_minimum};
