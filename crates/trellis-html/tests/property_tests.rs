//! Property tests over randomly generated element trees: round-trip through
//! the parser, serialization idempotence, stream/tree agreement, filtering
//! correctness, and namespace containment.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use trellis_dom::snapshot::NodeSnapshot;
use trellis_dom::{Document, Namespace, NodeId};
use trellis_html::builder::{Builder, build};
use trellis_html::consumer::{
    Anchor, DomConsumer, FilterDecision, HtmlStreamConsumer, TagConsumer, TagConsumerExt,
};
use trellis_html::{
    Result, SerializeOptions, Tag, build_document, parse_document, serialize, vocabulary,
};

const NAMES: &[&str] = &[
    "div", "span", "p", "section", "a", "em", "ul", "li", "svg", "g", "circle", "br", "img",
];
const ATTR_NAMES: &[&str] = &["id", "class", "title", "data-x"];
const TEXT_CHARS: &[char] = &['a', 'b', ' ', '<', '>', '&', '"', '\'', ';', '#', 'é'];

/// A tree description the builder can replay any number of times.
#[derive(Debug, Clone)]
enum Item {
    Element {
        name: &'static str,
        attrs: Vec<(&'static str, String)>,
        children: Vec<Item>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Tree(Item);

fn pick<T: Copy>(g: &mut Gen, pool: &[T]) -> T {
    *g.choose(pool).unwrap_or(&pool[0])
}

fn arbitrary_string(g: &mut Gen) -> String {
    let len = usize::arbitrary(g) % 6;
    (0..len).map(|_| pick(g, TEXT_CHARS)).collect()
}

fn arbitrary_element(g: &mut Gen, depth: usize) -> Item {
    let name = pick(g, NAMES);
    let attrs = (0..usize::arbitrary(g) % 3)
        .map(|_| (pick(g, ATTR_NAMES), arbitrary_string(g)))
        .collect();
    let children = if vocabulary::is_void(name) || depth == 0 {
        Vec::new()
    } else {
        (0..usize::arbitrary(g) % 4)
            .map(|_| {
                if bool::arbitrary(g) {
                    Item::Text(arbitrary_string(g))
                } else {
                    arbitrary_element(g, depth - 1)
                }
            })
            .collect()
    };
    Item::Element {
        name,
        attrs,
        children,
    }
}

impl Arbitrary for Tree {
    fn arbitrary(g: &mut Gen) -> Self {
        Tree(arbitrary_element(g, 4))
    }
}

fn emit<C: TagConsumer>(b: &mut Builder<'_, C>, item: &Item) -> Result<()> {
    match item {
        Item::Text(text) => b.text(text),
        Item::Element {
            name,
            attrs,
            children,
        } => {
            let _ = b.element(name, |b| {
                for (attr, value) in attrs {
                    b.attr(attr, value.as_str())?;
                }
                for child in children {
                    emit(b, child)?;
                }
                Ok(())
            })?;
            Ok(())
        }
    }
}

fn realize(tree: &Tree) -> Document {
    build_document(|b| emit(b, &tree.0)).unwrap()
}

/// `item` with every element named in `skipped` removed along with its subtree.
fn without(item: &Item, skipped: &[&str]) -> Option<Item> {
    match item {
        Item::Element { name, .. } if skipped.contains(name) => None,
        Item::Element {
            name,
            attrs,
            children,
        } => Some(Item::Element {
            name: *name,
            attrs: attrs.clone(),
            children: children.iter().filter_map(|c| without(c, skipped)).collect(),
        }),
        Item::Text(_) => Some(item.clone()),
    }
}

#[quickcheck]
fn prop_reparse_preserves_structure(tree: Tree) -> bool {
    let doc = realize(&tree);
    let reparsed = parse_document(&serialize(&doc, false)).unwrap();
    NodeSnapshot::capture(&doc, NodeId::ROOT) == NodeSnapshot::capture(&reparsed, NodeId::ROOT)
}

#[quickcheck]
fn prop_serialization_is_idempotent(tree: Tree, pretty: bool) -> bool {
    let doc = realize(&tree);
    serialize(&doc, pretty) == serialize(&doc, pretty)
}

#[quickcheck]
fn prop_stream_matches_tree(tree: Tree, pretty: bool) -> bool {
    let doc = realize(&tree);
    let mut consumer = HtmlStreamConsumer::new(SerializeOptions::pretty(pretty));
    let streamed = build(&mut consumer, |b| emit(b, &tree.0)).unwrap();
    streamed == serialize(&doc, pretty)
}

#[quickcheck]
fn prop_filter_removes_exactly_skipped_subtrees(tree: Tree, skip_index: usize) -> bool {
    let skipped = [NAMES[skip_index % NAMES.len()]];

    let mut filtered = Document::new();
    let mut consumer = DomConsumer::new(&mut filtered, Anchor::Document)
        .unwrap()
        .filter(|tag: &Tag| {
            if skipped.iter().any(|name| tag.is(name)) {
                FilterDecision::Skip
            } else {
                FilterDecision::Pass
            }
        });
    let _ = build(&mut consumer, |b| emit(b, &tree.0)).unwrap();

    let expected = build_document(|b| match without(&tree.0, &skipped) {
        Some(item) => emit(b, &item),
        None => Ok(()),
    })
    .unwrap();

    serialize(&filtered, false) == serialize(&expected, false)
}

#[quickcheck]
fn prop_namespace_contained_in_foreign_subtree(tree: Tree) -> bool {
    let doc = realize(&tree);
    doc.descendants(NodeId::ROOT)
        .into_iter()
        .filter_map(|id| doc.as_element(id).map(|e| (id, e.namespace)))
        .all(|(id, namespace)| {
            let mut node = Some(id);
            let mut under_svg = false;
            while let Some(current) = node {
                if doc.as_element(current).is_some_and(|e| e.has_tag_name("svg")) {
                    under_svg = true;
                }
                node = doc.parent(current);
            }
            let expected = if under_svg { Namespace::Svg } else { Namespace::Html };
            namespace == expected
        })
}
