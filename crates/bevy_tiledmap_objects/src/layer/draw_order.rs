//! Object layer draw order and its string form (the `draworder` attribute).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How objects of a layer are drawn.
///
/// Unrecognized strings decode to [`DrawOrder::Unknown`], which in turn encodes as
/// `"unknown"`, so `Unknown` is stable in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DrawOrder {
    /// Unrecognized or unset draw order
    Unknown,
    /// Objects sorted by their y coordinate
    #[default]
    TopDown,
    /// Objects drawn in the order they are stored
    Index,
}

/// Encode a draw order as its attribute string.
pub fn draw_order_to_string(draw_order: DrawOrder) -> &'static str {
    match draw_order {
        DrawOrder::Unknown => "unknown",
        DrawOrder::TopDown => "topdown",
        DrawOrder::Index => "index",
    }
}

/// Decode a draw order attribute string. Anything unrecognized becomes `Unknown`.
pub fn draw_order_from_string(value: &str) -> DrawOrder {
    match value {
        "topdown" => DrawOrder::TopDown,
        "index" => DrawOrder::Index,
        _ => DrawOrder::Unknown,
    }
}

impl fmt::Display for DrawOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(draw_order_to_string(*self))
    }
}

impl FromStr for DrawOrder {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(draw_order_from_string(s))
    }
}

impl From<String> for DrawOrder {
    fn from(value: String) -> Self {
        draw_order_from_string(&value)
    }
}

impl From<DrawOrder> for String {
    fn from(value: DrawOrder) -> Self {
        draw_order_to_string(value).to_owned()
    }
}
