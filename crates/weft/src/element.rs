//! HTML element builder.
//!
//! [`Element`] describes one tag: its attributes, CSS classes, inline style
//! fragments and children. Builder methods consume and return the element so
//! calls chain; [`MutableAttrs`] covers in-place updates on an existing value.
//!
//! ```
//! use weft::{Context, Element, text, must_string};
//!
//! let link = Element::new("a").href("/docs").class("nav-link").child(text("Docs"));
//! assert_eq!(
//!     must_string(&link, &Context::new()),
//!     "\n<a href='/docs' class='nav-link'>Docs</a>\n"
//! );
//! ```

use std::fmt;

use crate::attr::{AttrValue, Coerced};
use crate::context::Context;
use crate::error::RenderError;
use crate::escape::{escape_text, push_attr_escaped};
use crate::node::{BoxNode, Node, text};

const CLASS: &str = "class";
const STYLE: &str = "style";

#[derive(Clone, Debug)]
struct Attr {
    key: String,
    value: AttrValue,
}

/// One HTML tag with attributes, classes, styles and children.
pub struct Element {
    tag: String,
    omit_end_tag: bool,
    attrs: Vec<Attr>,
    classes: Vec<String>,
    styles: Vec<String>,
    children: Vec<BoxNode>,
}

/// Types whose attributes can be set in place.
pub trait MutableAttrs {
    /// Set `key` to `value`, updating an existing key where it stands.
    fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>);
}

/// Start building an element with the given tag name.
pub fn tag(name: impl Into<String>) -> Element {
    Element::new(name)
}

impl Element {
    /// Create an element with the given tag name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            tag: name.into(),
            omit_end_tag: false,
            attrs: Vec::new(),
            classes: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Replace the tag name.
    #[must_use]
    pub fn tag_name(mut self, name: impl Into<String>) -> Self {
        self.tag = name.into();
        self
    }

    /// Emit only the opening tag: no children, no closing tag.
    #[must_use]
    pub fn omit_end_tag(mut self) -> Self {
        self.omit_end_tag = true;
        self
    }

    /// Replace the children with a single escaped text node.
    #[must_use]
    pub fn text(self, s: &str) -> Self {
        self.children([text(s).boxed()])
    }

    /// Replace the children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = BoxNode>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    /// Append one child.
    #[must_use]
    pub fn child(mut self, child: impl Node + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    /// Append children after the existing ones.
    #[must_use]
    pub fn append_children(mut self, children: impl IntoIterator<Item = BoxNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Insert children before the existing ones.
    #[must_use]
    pub fn prepend_children(mut self, children: impl IntoIterator<Item = BoxNode>) -> Self {
        let mut merged: Vec<BoxNode> = children.into_iter().collect();
        merged.append(&mut self.children);
        self.children = merged;
        self
    }

    /// Number of children composed into this element.
    pub fn children_len(&self) -> usize {
        self.children.len()
    }

    /// Set an attribute. Re-setting a key keeps its original position.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Set several attributes in order.
    #[must_use]
    pub fn attrs<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<AttrValue>,
    {
        for (key, value) in pairs {
            self.set_attr(key, value);
        }
        self
    }

    /// Set an attribute only when `add` is true.
    #[must_use]
    pub fn attr_if(self, key: impl Into<String>, value: impl Into<AttrValue>, add: bool) -> Self {
        if !add {
            return self;
        }
        self.attr(key, value)
    }

    /// Current value of an explicitly set attribute.
    pub fn attr_value(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.iter().find(|a| a.key == key).map(|a| &a.value)
    }

    /// Add CSS classes.
    ///
    /// The name is split on spaces; blank pieces are dropped and the rest
    /// trimmed, so `"btn  btn-primary"` adds two classes.
    #[must_use]
    pub fn class(mut self, name: &str) -> Self {
        self.push_class(name);
        self
    }

    /// Add several CSS class names, each handled like [`class`](Self::class).
    #[must_use]
    pub fn classes<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            self.push_class(name.as_ref());
        }
        self
    }

    /// Add a CSS class only when `add` is true.
    #[must_use]
    pub fn class_if(mut self, name: &str, add: bool) -> Self {
        if add {
            self.push_class(name);
        }
        self
    }

    /// Accumulated class tokens in insertion order.
    pub fn class_names(&self) -> &[String] {
        &self.classes
    }

    fn push_class(&mut self, name: &str) {
        self.classes.extend(
            name.split(' ')
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .map(str::to_owned),
        );
    }

    /// Add an inline style fragment such as `color: red`.
    ///
    /// Surrounding `;` are stripped; empty fragments are ignored.
    #[must_use]
    pub fn style(mut self, fragment: &str) -> Self {
        let fragment = fragment.trim_matches(';');
        if !fragment.is_empty() {
            self.styles.push(fragment.to_owned());
        }
        self
    }

    /// Add an inline style fragment only when `add` is true.
    #[must_use]
    pub fn style_if(self, fragment: &str, add: bool) -> Self {
        if !add {
            return self;
        }
        self.style(fragment)
    }

    /// Set a `data-{key}` attribute.
    #[must_use]
    pub fn data(self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attr(format!("data-{key}"), value)
    }

    /// Set the `title` attribute. The value is text-escaped first.
    #[must_use]
    pub fn title(self, v: &str) -> Self {
        self.attr("title", escape_text(v))
    }

    /// Set the `tabindex` attribute.
    #[must_use]
    pub fn tab_index(self, v: i64) -> Self {
        self.attr("tabindex", v)
    }

    /// Value of the `class` attribute produced by accumulated classes.
    fn class_value(&self) -> Option<String> {
        let joined = self.classes.join(" ");
        let trimmed = joined.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.to_owned())
    }

    /// Value of the `style` attribute produced by accumulated fragments.
    fn style_value(&self) -> Option<String> {
        let joined = self.styles.join("; ");
        let trimmed = joined.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(format!("{trimmed};"))
    }
}

/// Setters for common string attributes.
macro_rules! str_attrs {
    ($($(#[$doc:meta])* $method:ident => $key:literal),* $(,)?) => {
        impl Element {
            $(
                $(#[$doc])*
                #[must_use]
                pub fn $method(self, v: impl Into<String>) -> Self {
                    self.attr($key, AttrValue::Str(v.into()))
                }
            )*
        }
    };
}

/// Setters for presence-only attributes.
macro_rules! bool_attrs {
    ($($(#[$doc:meta])* $method:ident => $key:literal),* $(,)?) => {
        impl Element {
            $(
                $(#[$doc])*
                #[must_use]
                pub fn $method(self, v: bool) -> Self {
                    self.attr($key, v)
                }
            )*
        }
    };
}

str_attrs! {
    /// Set the `id` attribute.
    id => "id",
    /// Set the `href` attribute.
    href => "href",
    /// Set the `rel` attribute.
    rel => "rel",
    /// Set the `role` attribute.
    role => "role",
    /// Set the `alt` attribute.
    alt => "alt",
    /// Set the `target` attribute.
    target => "target",
    /// Set the `name` attribute.
    name => "name",
    /// Set the `value` attribute.
    value => "value",
    /// Set the `for` attribute.
    for_ => "for",
    /// Set the `type` attribute.
    type_ => "type",
    /// Set the `placeholder` attribute.
    placeholder => "placeholder",
    /// Set the `src` attribute.
    src => "src",
    /// Set the `property` attribute.
    property => "property",
    /// Set the `action` attribute.
    action => "action",
    /// Set the `method` attribute.
    method => "method",
    /// Set the `content` attribute.
    content => "content",
    /// Set the `charset` attribute.
    charset => "charset",
}

bool_attrs! {
    /// Set or clear the `required` attribute.
    required => "required",
    /// Set or clear the `readonly` attribute.
    readonly => "readonly",
    /// Set or clear the `disabled` attribute.
    disabled => "disabled",
    /// Set or clear the `checked` attribute.
    checked => "checked",
}

impl MutableAttrs for Element {
    fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|a| a.key == key) {
            Some(existing) => existing.value = value,
            None => self.attrs.push(Attr { key, value }),
        }
    }
}

impl Node for Element {
    fn render(&self, ctx: &Context, buf: &mut Vec<u8>) -> Result<(), RenderError> {
        // Classes and styles are folded into a render-local view so the
        // element itself is never mutated.
        let mut class = self.class_value().map(AttrValue::Str);
        let mut style = self.style_value().map(AttrValue::Str);

        buf.extend_from_slice(b"\n<");
        buf.extend_from_slice(self.tag.as_bytes());

        for attr in &self.attrs {
            let value = match attr.key.as_str() {
                CLASS if class.is_some() => class.take(),
                STYLE if style.is_some() => style.take(),
                _ => None,
            };
            write_attr(buf, &attr.key, value.as_ref().unwrap_or(&attr.value))?;
        }
        if let Some(value) = &class {
            write_attr(buf, CLASS, value)?;
        }
        if let Some(value) = &style {
            write_attr(buf, STYLE, value)?;
        }

        buf.push(b'>');

        if self.omit_end_tag {
            buf.push(b'\n');
            return Ok(());
        }

        for child in &self.children {
            child.render(ctx, buf)?;
        }

        buf.extend_from_slice(b"</");
        buf.extend_from_slice(self.tag.as_bytes());
        buf.extend_from_slice(b">\n");
        Ok(())
    }
}

fn write_attr(buf: &mut Vec<u8>, key: &str, value: &AttrValue) -> Result<(), RenderError> {
    match value.coerce(key)? {
        Coerced::Omit => {}
        Coerced::Bare => {
            buf.push(b' ');
            push_attr_escaped(buf, key.as_bytes());
        }
        Coerced::Value(text) => {
            buf.push(b' ');
            push_attr_escaped(buf, key.as_bytes());
            buf.extend_from_slice(b"='");
            push_attr_escaped(buf, &text);
            buf.push(b'\'');
        }
    }
    Ok(())
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("omit_end_tag", &self.omit_end_tag)
            .field("attrs", &self.attrs)
            .field("classes", &self.classes)
            .field("styles", &self.styles)
            .field("children", &self.children.len())
            .finish()
    }
}
