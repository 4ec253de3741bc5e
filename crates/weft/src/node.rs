//! The [`Node`] render contract and its basic implementations.

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::error::RenderError;
use crate::escape::escape_text;

/// Anything that can render itself into an HTML byte buffer.
///
/// Implementations append to `buf` and return the first error they hit.
/// Nodes are `Send + Sync` so a finished tree can be rendered from several
/// threads at once.
pub trait Node: Send + Sync {
    /// Append this node's markup to `buf`.
    fn render(&self, ctx: &Context, buf: &mut Vec<u8>) -> Result<(), RenderError>;

    /// Box this node for storage in a heterogeneous list.
    fn boxed(self) -> BoxNode
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

/// Owned, type-erased node.
pub type BoxNode = Box<dyn Node>;

/// Pre-escaped markup appended verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawHtml(String);

impl RawHtml {
    /// Wrap markup that is already safe to emit.
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// The wrapped markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Node for RawHtml {
    fn render(&self, _ctx: &Context, buf: &mut Vec<u8>) -> Result<(), RenderError> {
        buf.extend_from_slice(self.0.as_bytes());
        Ok(())
    }
}

impl From<String> for RawHtml {
    fn from(html: String) -> Self {
        Self(html)
    }
}

impl From<&str> for RawHtml {
    fn from(html: &str) -> Self {
        Self(html.to_owned())
    }
}

/// Markup emitted without escaping.
pub fn raw(html: impl Into<String>) -> RawHtml {
    RawHtml::new(html)
}

/// Text content, escaped once here and emitted verbatim on every render.
pub fn text(s: &str) -> RawHtml {
    RawHtml(escape_text(s).into_owned())
}

/// Formatted text content, escaped like [`text`].
///
/// ```
/// let n = weft::textf(format_args!("{} items", 3));
/// assert_eq!(n.as_str(), "3 items");
/// ```
pub fn textf(args: fmt::Arguments<'_>) -> RawHtml {
    match args.as_str() {
        Some(s) => text(s),
        None => text(&args.to_string()),
    }
}

/// An ordered list of nodes rendered back to back, with no wrapping markup.
#[derive(Default)]
pub struct Nodes(Vec<BoxNode>);

impl Nodes {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node.
    pub fn push(&mut self, node: impl Node + 'static) {
        self.0.push(Box::new(node));
    }

    /// Append a node, returning the list.
    #[must_use]
    pub fn with(mut self, node: impl Node + 'static) -> Self {
        self.push(node);
        self
    }

    /// Number of nodes in the list.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the nodes.
    pub fn iter(&self) -> std::slice::Iter<'_, BoxNode> {
        self.0.iter()
    }
}

impl Node for Nodes {
    fn render(&self, ctx: &Context, buf: &mut Vec<u8>) -> Result<(), RenderError> {
        for node in &self.0 {
            node.render(ctx, buf)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Nodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nodes").field("len", &self.0.len()).finish()
    }
}

impl From<Vec<BoxNode>> for Nodes {
    fn from(nodes: Vec<BoxNode>) -> Self {
        Self(nodes)
    }
}

impl FromIterator<BoxNode> for Nodes {
    fn from_iter<I: IntoIterator<Item = BoxNode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<BoxNode> for Nodes {
    fn extend<I: IntoIterator<Item = BoxNode>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Nodes {
    type Item = BoxNode;
    type IntoIter = std::vec::IntoIter<BoxNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Nodes {
    type Item = &'a BoxNode;
    type IntoIter = std::slice::Iter<'a, BoxNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build a [`Nodes`] list from heterogeneous nodes.
///
/// ```
/// use weft::{nodes, text, tags::br};
///
/// let list = nodes![text("a"), br(), text("b")];
/// assert_eq!(list.len(), 3);
/// ```
#[macro_export]
macro_rules! nodes {
    () => {
        $crate::Nodes::new()
    };
    ($($node:expr),+ $(,)?) => {
        $crate::Nodes::from(::std::vec![$(::std::boxed::Box::new($node) as $crate::BoxNode),+])
    };
}

/// Adapter that lets a closure act as a node.
pub struct NodeFn<F>(F);

impl<F> Node for NodeFn<F>
where
    F: Fn(&Context, &mut Vec<u8>) -> Result<(), RenderError> + Send + Sync,
{
    fn render(&self, ctx: &Context, buf: &mut Vec<u8>) -> Result<(), RenderError> {
        (self.0)(ctx, buf)
    }
}

impl<F> fmt::Debug for NodeFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NodeFn")
    }
}

/// Wrap a render closure as a node.
///
/// ```
/// use weft::{Context, node_fn, render_to_string};
///
/// let greeting = node_fn(|_ctx, buf| {
///     buf.extend_from_slice(b"hello");
///     Ok(())
/// });
/// assert_eq!(render_to_string(&greeting, &Context::new()).unwrap(), "hello");
/// ```
pub fn node_fn<F>(f: F) -> NodeFn<F>
where
    F: Fn(&Context, &mut Vec<u8>) -> Result<(), RenderError> + Send + Sync,
{
    NodeFn(f)
}

/// Absent nodes render nothing.
impl<N: Node> Node for Option<N> {
    fn render(&self, ctx: &Context, buf: &mut Vec<u8>) -> Result<(), RenderError> {
        match self {
            Some(node) => node.render(ctx, buf),
            None => Ok(()),
        }
    }
}

impl<N: Node + ?Sized> Node for Box<N> {
    fn render(&self, ctx: &Context, buf: &mut Vec<u8>) -> Result<(), RenderError> {
        (**self).render(ctx, buf)
    }
}

impl<N: Node + ?Sized> Node for Arc<N> {
    fn render(&self, ctx: &Context, buf: &mut Vec<u8>) -> Result<(), RenderError> {
        (**self).render(ctx, buf)
    }
}

impl<N: Node + ?Sized> Node for &N {
    fn render(&self, ctx: &Context, buf: &mut Vec<u8>) -> Result<(), RenderError> {
        (**self).render(ctx, buf)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use pretty_assertions::assert_eq;

    fn render(node: &dyn Node) -> Result<String, RenderError> {
        let mut buf = Vec::new();
        node.render(&Context::new(), &mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_raw_is_verbatim() {
        assert_eq!(render(&raw("<b>bold</b>")).unwrap(), "<b>bold</b>");
    }

    #[test]
    fn test_text_escapes_at_construction() {
        let node = text("1 < 2 & 3 > 2");
        assert_eq!(node.as_str(), "1 &lt; 2 &amp; 3 &gt; 2");
        assert_eq!(render(&node).unwrap(), "1 &lt; 2 &amp; 3 &gt; 2");
    }

    #[test]
    fn test_textf() {
        let node = textf(format_args!("{} < {}", 1, 2));
        assert_eq!(node.as_str(), "1 &lt; 2");
    }

    #[test]
    fn test_nodes_render_in_order() {
        let list = nodes![raw("a"), raw("b"), raw("c")];
        assert_eq!(list.len(), 3);
        assert_eq!(render(&list).unwrap(), "abc");
    }

    #[test]
    fn test_nodes_skip_absent() {
        let list = nodes![raw("a"), None::<RawHtml>, Some(raw("b"))];
        assert_eq!(render(&list).unwrap(), "ab");
    }

    #[test]
    fn test_nodes_empty() {
        let list = nodes![];
        assert!(list.is_empty());
        assert_eq!(render(&list).unwrap(), "");
    }

    #[test]
    fn test_nodes_collect_and_extend() {
        let mut list: Nodes = ["x", "y"].into_iter().map(|s| raw(s).boxed()).collect();
        list.extend([raw("z").boxed()]);
        list.push(raw("!"));
        assert_eq!(render(&list).unwrap(), "xyz!");
        assert_eq!(list.iter().count(), 4);
    }

    #[test]
    fn test_nodes_with_chains() {
        let list = Nodes::new().with(raw("a")).with(None::<RawHtml>).with(text("<b>"));
        assert_eq!(list.len(), 3);
        assert_eq!(render(&list).unwrap(), "a&lt;b&gt;");
    }

    #[test]
    fn test_nodes_stop_at_first_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let list = nodes![
            raw("ok"),
            node_fn(|_, _| Err(RenderError::msg("fail"))),
            node_fn(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        ];
        let err = render(&list).unwrap_err();
        assert_eq!(err.to_string(), "component error: fail");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_node_fn_reads_context() {
        struct Locale(&'static str);

        let node = node_fn(|ctx, buf| {
            let locale = ctx.value::<Locale>().map_or("en", |l| l.0);
            buf.extend_from_slice(locale.as_bytes());
            Ok(())
        });
        let ctx = Context::new().with_value(Locale("de"));
        let mut buf = Vec::new();
        node.render(&ctx, &mut buf).unwrap();
        assert_eq!(buf, b"de");
    }

    #[test]
    fn test_shared_node_renders_through_arc_and_ref() {
        let shared: Arc<dyn Node> = Arc::new(raw("shared"));
        let list = nodes![Arc::clone(&shared), Arc::clone(&shared)];
        assert_eq!(render(&list).unwrap(), "sharedshared");
        let by_ref: &dyn Node = &*shared;
        assert_eq!(render(&by_ref).unwrap(), "shared");
    }
}
