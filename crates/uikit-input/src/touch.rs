//! ---
//! uikit_section: "05-input"
//! uikit_subsection: "module"
//! uikit_type: "source"
//! uikit_scope: "code"
//! uikit_description: "Touch event records and normalisation."
//! uikit_version: "v0.0.0-prealpha"
//! uikit_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::trace;

/// Errors raised while decoding host touch events.
#[derive(Debug, Error)]
pub enum InputError {
    /// The payload was not a valid touch event document.
    #[error("invalid touch event payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One contact point as reported by the host canvas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TouchPoint {
    /// Host-assigned identifier, stable for the lifetime of the contact.
    /// Hosts disagree on its type, so it is kept as delivered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Value>,
    /// Horizontal position relative to the canvas.
    pub x: f64,
    /// Vertical position relative to the canvas.
    pub y: f64,
    /// Horizontal offset read by chart libraries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    /// Vertical offset read by chart libraries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
    /// Remaining host fields, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TouchPoint {
    /// Contact at `(x, y)` with no offsets yet.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }
}

/// A touch event as delivered by the host framework.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TouchEvent {
    /// Event name, e.g. `touchstart`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Contacts currently on the surface.
    #[serde(default)]
    pub touches: Vec<TouchPoint>,
    /// Contacts that changed in this event. Left as delivered; an absent
    /// list and an empty one stay distinct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed_touches: Option<Vec<TouchPoint>>,
    /// Remaining host fields, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TouchEvent {
    /// Decode a host event from its JSON form.
    pub fn from_json(payload: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Encode the event back to JSON for the chart library.
    pub fn to_json(&self) -> Result<String, InputError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Copy each touch's `x`/`y` into `offsetX`/`offsetY`, in place.
pub fn normalize_touches(event: &mut TouchEvent) {
    for touch in &mut event.touches {
        touch.offset_x = Some(touch.x);
        touch.offset_y = Some(touch.y);
    }
    trace!(touches = event.touches.len(), "touch offsets normalised");
}

/// Owned form of [`normalize_touches`], returning the same event.
pub fn wrap_touch(mut event: TouchEvent) -> TouchEvent {
    normalize_touches(&mut event);
    event
}
