//! Render entry points.
//!
//! Every entry point allocates one buffer, renders the whole tree into it
//! depth-first, and only then hands the bytes to the caller. A failed render
//! never writes partial output.

use std::io::Write;

use weft_config::{Config, DEFAULT_BUFFER_CAPACITY, RenderConfig};

use crate::context::Context;
use crate::error::RenderError;
use crate::node::Node;

/// Options for [`Renderer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Initial capacity of the output buffer, in bytes.
    pub buffer_capacity: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            buffer_capacity: config.buffer_capacity,
        }
    }
}

/// Renders node trees with fixed options.
///
/// # Example
///
/// ```
/// use weft::{Context, Renderer, RenderOptions, nodes, tags::p, text};
///
/// let renderer = Renderer::new(RenderOptions { buffer_capacity: 256 });
/// let html = renderer.render_to_string(&p(nodes![text("hi")]), &Context::new()).unwrap();
/// assert_eq!(html, "\n<p>hi</p>\n");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    /// Create a renderer with the given options.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Create a renderer from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(RenderOptions::from(&config.render))
    }

    /// Options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `root` into a fresh byte buffer.
    pub fn render(&self, root: &dyn Node, ctx: &Context) -> Result<Vec<u8>, RenderError> {
        let mut buf = Vec::with_capacity(self.options.buffer_capacity);
        match root.render(ctx, &mut buf) {
            Ok(()) => {
                tracing::debug!(bytes = buf.len(), "Rendered HTML");
                Ok(buf)
            }
            Err(e) => {
                tracing::warn!(error = %e, "HTML render failed");
                Err(e)
            }
        }
    }

    /// Render `root` and write the result to `w`.
    ///
    /// A `None` root writes nothing.
    pub fn render_to_writer<W: Write + ?Sized>(
        &self,
        w: &mut W,
        root: Option<&dyn Node>,
        ctx: &Context,
    ) -> Result<(), RenderError> {
        let Some(root) = root else {
            return Ok(());
        };
        let buf = self.render(root, ctx)?;
        w.write_all(&buf)?;
        Ok(())
    }

    /// Render `root` into a `String`.
    pub fn render_to_string(&self, root: &dyn Node, ctx: &Context) -> Result<String, RenderError> {
        let buf = self.render(root, ctx)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Render `root` into a `String`, panicking on any error.
    ///
    /// For call sites where a render failure is a bug rather than a
    /// recoverable condition.
    pub fn must_string(&self, root: &dyn Node, ctx: &Context) -> String {
        match self.render_to_string(root, ctx) {
            Ok(html) => html,
            Err(e) => panic!("HTML render failed: {e}"),
        }
    }
}

/// Render `root` to `w` with default options. A `None` root writes nothing.
pub fn fprint<W: Write + ?Sized>(
    w: &mut W,
    root: Option<&dyn Node>,
    ctx: &Context,
) -> Result<(), RenderError> {
    Renderer::default().render_to_writer(w, root, ctx)
}

/// Render `root` into a `String` with default options.
pub fn render_to_string(root: &dyn Node, ctx: &Context) -> Result<String, RenderError> {
    Renderer::default().render_to_string(root, ctx)
}

/// Render `root` into a `String` with default options, panicking on error.
pub fn must_string(root: &dyn Node, ctx: &Context) -> String {
    Renderer::default().must_string(root, ctx)
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::attr::AttrValue;
    use crate::element::tag;
    use crate::node::{node_fn, raw, text};
    use pretty_assertions::assert_eq;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_fprint_writes_whole_tree() {
        let tree = tag("div").child(tag("a").href("/link").child(text("Click me")));
        let mut out = Vec::new();
        fprint(&mut out, Some(&tree), &Context::new()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n<div>\n<a href='/link'>Click me</a>\n</div>\n"
        );
    }

    #[test]
    fn test_fprint_none_root_writes_nothing() {
        let mut out = Vec::new();
        fprint(&mut out, None, &Context::new()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_fprint_skips_write_on_render_error() {
        let tree = tag("div")
            .child(raw("partial"))
            .child(node_fn(|_, _| Err(RenderError::msg("nope"))));
        let mut out = Vec::new();
        let err = fprint(&mut out, Some(&tree), &Context::new()).unwrap_err();
        assert!(matches!(err, RenderError::Component(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_fprint_surfaces_io_error() {
        let tree = tag("p").text("x");
        let err = fprint(&mut FailingWriter, Some(&tree), &Context::new()).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }

    #[test]
    fn test_render_to_string_rejects_invalid_utf8() {
        let tree = tag("p").attr("data-bin", vec![0xff_u8, 0xfe]);
        let err = render_to_string(&tree, &Context::new()).unwrap_err();
        assert!(matches!(err, RenderError::Utf8(_)));
    }

    #[test]
    fn test_renderer_render_bytes() {
        let renderer = Renderer::new(RenderOptions { buffer_capacity: 8 });
        let bytes = renderer.render(&raw("abc"), &Context::new()).unwrap();
        assert_eq!(bytes, b"abc");
    }

    #[test]
    fn test_renderer_from_config() {
        let mut config = Config::default();
        config.render.buffer_capacity = 1234;
        let renderer = Renderer::from_config(&config);
        assert_eq!(renderer.options().buffer_capacity, 1234);
    }

    #[test]
    fn test_default_options_match_config_default() {
        assert_eq!(
            RenderOptions::default(),
            RenderOptions::from(&RenderConfig::default())
        );
    }

    #[test]
    fn test_must_string() {
        let html = must_string(&tag("b").text("ok"), &Context::new());
        assert_eq!(html, "\n<b>ok</b>\n");
    }

    #[test]
    #[should_panic(expected = "HTML render failed")]
    fn test_must_string_panics_on_error() {
        let mut map = std::collections::HashMap::new();
        map.insert((1, 2), 3);
        let tree = tag("div").attr("data-x", AttrValue::json(map));
        let _ = must_string(&tree, &Context::new());
    }

    #[test]
    fn test_cancelled_context_seen_by_node() {
        let handle = crate::context::CancelHandle::new();
        let ctx = Context::new().with_cancel(handle.clone());
        let tree = tag("ul").child(node_fn(|ctx, buf| {
            ctx.check()?;
            buf.extend_from_slice(b"<li>row</li>");
            Ok(())
        }));

        assert!(render_to_string(&tree, &ctx).is_ok());
        handle.cancel();
        let err = render_to_string(&tree, &ctx).unwrap_err();
        assert!(matches!(err, RenderError::Cancelled));
    }
}
