//! Document codec.
//!
//! Two document shapes share one node encoding. A *tree document* is a single node object:
//!
//! ```json
//! {
//!   "name": "Root",
//!   "position": [0, 0, 0],
//!   "rotation": [0, 0, 0],
//!   "scale": [1, 1, 1],
//!   "color": [1, 1, 1, 1],
//!   "componentNames": [],
//!   "components": []
//! }
//! ```
//!
//! `color` is `null` when unset, otherwise four components in `[0, 1]`, and `components` holds
//! the child nodes. A *catalog document* is
//! `{ "elements": [ ... ] }` with one node object per template. Nothing in the text tells the two
//! apart, so callers pick [`decode_tree`] or [`decode_catalog`].

mod document;
mod json;

pub use document::{decode_catalog, decode_tree, encode_catalog, encode_tree, DecodeError, DecodeResult};
pub use json::{JsonError, JsonResult};
