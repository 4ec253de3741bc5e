//! Server-side HTML construction with composable nodes.
//!
//! This crate provides a [`Node`] render contract and an [`Element`] tag
//! builder with a fluent API for attributes, classes, inline styles and
//! children. A tree renders depth-first into a single byte buffer.
//!
//! # Architecture
//!
//! - [`Node`]: anything that can append itself to the output buffer.
//!   Implemented by [`RawHtml`], [`Nodes`], [`NodeFn`], [`Element`] and
//!   `Option`/`Box`/`Arc`/`&` wrappers.
//! - [`Element`]: one tag. Classes and styles accumulate separately and are
//!   folded into `class`/`style` attributes when the element renders.
//! - [`AttrValue`]: the closed set of attribute value kinds. Non-primitive
//!   values go through `serde_json`.
//! - [`Renderer`]: the entry points, configured from [`weft_config`].
//!
//! Attribute values are always single-quoted and only `'` is escaped inside
//! them. Text nodes are escaped once, when built.
//!
//! # Example
//!
//! ```
//! use weft::{Context, must_string, nodes, tags::{a, div}, text};
//!
//! let page = div(nodes![a(nodes![text("Click me")]).href("/link")]);
//! assert_eq!(
//!     must_string(&page, &Context::new()),
//!     "\n<div>\n<a href='/link'>Click me</a>\n</div>\n"
//! );
//! ```

mod attr;
mod context;
mod element;
mod error;
mod escape;
mod node;
mod render;
pub mod tags;

pub use attr::{AttrValue, JsonValue};
pub use context::{CancelHandle, Context};
pub use element::{Element, MutableAttrs, tag};
pub use error::RenderError;
pub use escape::{escape_attr, escape_text};
pub use node::{BoxNode, Node, NodeFn, Nodes, RawHtml, node_fn, raw, text, textf};
pub use render::{RenderOptions, Renderer, fprint, must_string, render_to_string};
