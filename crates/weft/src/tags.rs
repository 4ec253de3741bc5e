//! Constructors for common HTML tags.
//!
//! Container tags take their children. Text tags take their text content.
//! Void tags omit the end tag.
//!
//! ```
//! use weft::{Context, must_string, nodes, tags::{a, li, ul}, text};
//!
//! let menu = ul(nodes![li(nodes![a(nodes![text("Home")]).href("/")])]).class("menu");
//! assert_eq!(
//!     must_string(&menu, &Context::new()),
//!     "\n<ul class='menu'>\n<li>\n<a href='/'>Home</a>\n</li>\n</ul>\n"
//! );
//! ```

use crate::element::{Element, tag};
use crate::node::{BoxNode, Nodes, raw};

macro_rules! container_tags {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("`<", stringify!($name), ">` element wrapping `children`.")]
            pub fn $name(children: impl IntoIterator<Item = BoxNode>) -> Element {
                tag(stringify!($name)).children(children)
            }
        )*
    };
}

macro_rules! text_tags {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("`<", stringify!($name), ">` element with escaped text content.")]
            pub fn $name(text: &str) -> Element {
                tag(stringify!($name)).text(text)
            }
        )*
    };
}

container_tags!(
    head, body, header, footer, main, nav, section, article, aside, div, ul, ol, li, table,
    thead, tbody, tr, td, form, label, p, a, select, option,
);

text_tags!(
    h1, h2, h3, h4, h5, h6, span, strong, em, button, title, th, textarea,
);

/// Document root: a doctype followed by `<html>` wrapping `children`.
pub fn html(children: impl IntoIterator<Item = BoxNode>) -> Nodes {
    let root = tag("html").children(children);
    crate::nodes![raw("<!DOCTYPE html>\n"), root]
}

/// `<img>` with its source.
pub fn img(src: &str) -> Element {
    tag("img").omit_end_tag().src(src)
}

/// `<meta>`.
pub fn meta() -> Element {
    tag("meta").omit_end_tag()
}

/// `<link>` pointing at `href`.
pub fn link(href: &str) -> Element {
    tag("link").omit_end_tag().href(href)
}

/// `<input>` with a field name.
pub fn input(name: &str) -> Element {
    tag("input").omit_end_tag().name(name)
}

/// `<br>`.
pub fn br() -> Element {
    tag("br").omit_end_tag()
}

/// `<hr>`.
pub fn hr() -> Element {
    tag("hr").omit_end_tag()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::node::{Node, text};
    use crate::nodes;
    use crate::render::must_string;
    use pretty_assertions::assert_eq;

    fn render(node: &dyn Node) -> String {
        must_string(node, &Context::new())
    }

    #[test]
    fn test_container_tag() {
        assert_eq!(render(&div(nodes![])), "\n<div></div>\n");
        assert_eq!(
            render(&section(None::<BoxNode>).id("s")),
            "\n<section id='s'></section>\n"
        );
        assert_eq!(
            render(&div(nodes![text("a"), br(), text("b")])),
            "\n<div>a\n<br>\nb</div>\n"
        );
    }

    #[test]
    fn test_text_tag_escapes() {
        assert_eq!(render(&h1("Tom & Jerry")), "\n<h1>Tom &amp; Jerry</h1>\n");
        assert_eq!(render(&th("Name")), "\n<th>Name</th>\n");
    }

    #[test]
    fn test_void_tags() {
        assert_eq!(
            render(&img("/img/photo.jpg").alt("photo")),
            "\n<img src='/img/photo.jpg' alt='photo'>\n"
        );
        assert_eq!(render(&meta().charset("utf-8")), "\n<meta charset='utf-8'>\n");
        assert_eq!(
            render(&link("/css/style.css").rel("stylesheet")),
            "\n<link href='/css/style.css' rel='stylesheet'>\n"
        );
        assert_eq!(render(&input("q").required(true)), "\n<input name='q' required>\n");
        assert_eq!(render(&br()), "\n<br>\n");
        assert_eq!(render(&hr()), "\n<hr>\n");
    }

    #[test]
    fn test_html_document() {
        let doc = html(nodes![
            head(nodes![title("Page")]),
            body(nodes![p(nodes![text("hi")])]),
        ]);
        assert_eq!(
            render(&doc),
            "<!DOCTYPE html>\n\n<html>\n<head>\n<title>Page</title>\n</head>\n\n<body>\n<p>hi</p>\n</body>\n</html>\n"
        );
    }

    #[test]
    fn test_table_rows() {
        let rows: Nodes = (1..=2)
            .map(|i| tr(nodes![td(nodes![text(&format!("Cell {i}"))])]).boxed())
            .collect();
        let table = table(nodes![tbody(rows)]).class("data-table");
        assert_eq!(
            render(&table),
            "\n<table class='data-table'>\n<tbody>\n<tr>\n<td>Cell 1</td>\n</tr>\n\n<tr>\n<td>Cell 2</td>\n</tr>\n</tbody>\n</table>\n"
        );
    }
}
