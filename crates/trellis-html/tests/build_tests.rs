//! Integration tests for building documents: the literal output scenarios,
//! append / prepend / create anchors, namespaces, filtering, and the error
//! taxonomy.

use trellis_dom::snapshot::NodeSnapshot;
use trellis_dom::{Document, HierarchyError, Namespace, NodeId};
use trellis_html::builder::{Builder, ScriptType, build};
use trellis_html::consumer::{
    Anchor, DomConsumer, FilterDecision, HtmlStreamConsumer, TagConsumer, TagConsumerExt,
};
use trellis_html::{
    BuildError, Result, SerializeOptions, Tag, append, build_document, create, parse_document,
    prepend, serialize, serialize_node,
};

/// `html > body > (h1:"header", div:"content" > span:"yo")`
fn sample_page<C: TagConsumer>(b: &mut Builder<'_, C>) -> Result<()> {
    let _ = b.html(|b| {
        let _ = b.body(|b| {
            let _ = b.h1(|b| b.text("header"))?;
            let _ = b.div(|b| {
                b.text("content")?;
                let _ = b.span(|b| b.text("yo"))?;
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    })?;
    Ok(())
}

/// A document holding `html > body > div#content`, returning the div.
fn content_div() -> (Document, NodeId) {
    let doc = build_document(|b| {
        let _ = b.html(|b| {
            let _ = b.body(|b| {
                let _ = b.div(|b| b.id("content"))?;
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();
    let div = doc.get_element_by_id("content").unwrap();
    (doc, div)
}

/// A document holding `html > body`, returning the body.
fn empty_body() -> (Document, NodeId) {
    let doc = build_document(|b| {
        let _ = b.html(|b| {
            let _ = b.body(|_| Ok(()))?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();
    let body = doc.body().unwrap();
    (doc, body)
}

const SAMPLE_PRETTY: &str = "<!DOCTYPE html>
<html>
  <body>
    <h1>header</h1>
    <div>content<span>yo</span>
    </div>
  </body>
</html>";

// ========== Literal scenarios ==========

#[test]
fn test_build_then_query_by_id() {
    let doc = build_document(|b| {
        let _ = b.div(|b| {
            b.id("test-node")?;
            b.text("content")
        })?;
        Ok(())
    })
    .unwrap();

    let node = doc.get_element_by_id("test-node").unwrap();
    let element = doc.as_element(node).unwrap();
    assert_eq!(element.tag_name.to_lowercase(), "div");
    assert_eq!(doc.text_content(node), "content");
}

#[test]
fn test_compact_serialization() {
    let doc = build_document(|b| sample_page(b)).unwrap();
    assert_eq!(
        serialize(&doc, false),
        "<!DOCTYPE html>\n<html><body><h1>header</h1><div>content<span>yo</span></div></body></html>"
    );
}

#[test]
fn test_pretty_serialization() {
    let doc = build_document(|b| sample_page(b)).unwrap();
    assert_eq!(serialize(&doc, true), SAMPLE_PRETTY);
}

#[test]
fn test_appended_svg_declares_namespace() {
    let (mut doc, body) = empty_body();
    let _ = append(&mut doc, body, |b| {
        let _ = b.svg(|_| Ok(()))?;
        Ok(())
    })
    .unwrap();

    assert_eq!(
        serialize(&doc, false),
        "<!DOCTYPE html>\n<html><body><svg xmlns=\"http://www.w3.org/2000/svg\"></svg></body></html>"
    );
}

#[test]
fn test_prepend_precedes_existing_children() {
    let (mut doc, body) = empty_body();
    let _ = append(&mut doc, body, |b| {
        let _ = b.a(|b| b.text("aaa"))?;
        Ok(())
    })
    .unwrap();
    let _ = prepend(&mut doc, body, |b| {
        let _ = b.p(|b| b.text("OK"))?;
        Ok(())
    })
    .unwrap();

    assert_eq!(
        serialize_node(&doc, body, false),
        "<body><p>OK</p><a>aaa</a></body>"
    );
}

#[test]
fn test_filter_skips_div_subtree() {
    let mut doc = Document::new();
    let mut consumer = DomConsumer::new(&mut doc, Anchor::Document)
        .unwrap()
        .filter(|tag: &Tag| {
            if tag.is("div") {
                FilterDecision::Skip
            } else {
                FilterDecision::Pass
            }
        });
    let _ = build(&mut consumer, |b| {
        let _ = b.body(|b| {
            let _ = b.div(|b| {
                let _ = b.a(|b| b.text("link1"))?;
                Ok(())
            })?;
            let _ = b.a(|b| b.text("link2"))?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();

    assert_eq!(
        serialize(&doc, false),
        "<!DOCTYPE html>\n<body><a>link2</a></body>"
    );
}

// ========== Anchors ==========

#[test]
fn test_append_returns_new_nodes_in_order() {
    let (mut doc, body) = empty_body();
    let roots = append(&mut doc, body, |b| {
        let _ = b.p(|b| b.text("one"))?;
        b.text("between")?;
        let _ = b.p(|b| b.text("two"))?;
        Ok(())
    })
    .unwrap();

    assert_eq!(roots.len(), 3);
    assert_eq!(doc.children(body), roots.as_slice());
    assert_eq!(doc.text_content(roots[2]), "two");
}

#[test]
fn test_prepend_keeps_build_order() {
    let (mut doc, body) = empty_body();
    let _ = append(&mut doc, body, |b| {
        let _ = b.hr(|_| Ok(()))?;
        Ok(())
    })
    .unwrap();
    let _ = prepend(&mut doc, body, |b| {
        let _ = b.h1(|b| b.text("1"))?;
        let _ = b.h2(|b| b.text("2"))?;
        Ok(())
    })
    .unwrap();

    assert_eq!(
        serialize_node(&doc, body, false),
        "<body><h1>1</h1><h2>2</h2><hr></body>"
    );
}

#[test]
fn test_create_is_detached_until_appended() {
    let (mut doc, body) = empty_body();
    let div = create(&mut doc, |b| {
        let _ = b.div(|b| {
            b.id("later")?;
            b.text("detached")
        })?;
        Ok(())
    })
    .unwrap();

    assert!(!doc.is_connected(div));
    assert_eq!(doc.get_element_by_id("later"), None);

    doc.append_child(body, div).unwrap();
    assert_eq!(doc.get_element_by_id("later"), Some(div));
    assert_eq!(
        serialize_node(&doc, body, false),
        "<body><div id=\"later\">detached</div></body>"
    );
}

#[test]
fn test_append_reports_top_level_nodes() {
    let (mut doc, content) = content_div();

    let mut p1 = None;
    let nodes = append(&mut doc, content, |b| {
        p1 = Some(b.p(|b| b.text("p1"))?);
        let _ = b.p(|b| {
            b.text("p2")?;
            let _ = b.p(|b| b.text("p3"))?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();

    assert_eq!(nodes.len(), 2);
    assert_eq!(p1, Some(nodes[0]));
    assert_eq!(doc.text_content(nodes[0]), "p1");
    assert_eq!(
        serialize(&doc, true),
        "<!DOCTYPE html>
<html>
  <body>
    <div id=\"content\">
      <p>p1</p>
      <p>p2<p>p3</p>
      </p>
    </div>
  </body>
</html>"
    );
}

#[test]
fn test_create_then_append_child_pretty() {
    let (mut doc, content) = content_div();
    let _ = append(&mut doc, content, |b| {
        let _ = b.p(|b| b.text("p1"))?;
        Ok(())
    })
    .unwrap();

    let p2 = create(&mut doc, |b| {
        let _ = b.p(|b| b.text("p2"))?;
        Ok(())
    })
    .unwrap();
    doc.append_child(content, p2).unwrap();

    assert_eq!(
        serialize(&doc, true),
        "<!DOCTYPE html>
<html>
  <body>
    <div id=\"content\">
      <p>p1</p>
      <p>p2</p>
    </div>
  </body>
</html>"
    );
}

#[test]
fn test_append_into_text_node_is_refused() {
    let (mut doc, body) = empty_body();
    let text = doc.create_text("t");
    doc.append_child(body, text).unwrap();
    let before = doc.len();

    let result = append(&mut doc, text, |b| {
        let _ = b.p(|b| b.text("lost"))?;
        Ok(())
    });

    assert!(matches!(
        result,
        Err(BuildError::Hierarchy(HierarchyError::NotAParent { kind: "text" }))
    ));
    assert_eq!(doc.len(), before);
    assert_eq!(
        serialize(&doc, false),
        "<!DOCTYPE html>\n<html><body>t</body></html>"
    );
}

#[test]
fn test_create_nothing_is_an_error() {
    let mut doc = Document::new();
    let result = create(&mut doc, |_| Ok(()));
    assert!(matches!(result, Err(BuildError::EmptyFragment)));
}

// ========== Content kinds ==========

#[test]
fn test_script_and_comment() {
    let doc = build_document(|b| {
        let _ = b.html(|b| {
            let _ = b.head(|b| {
                let _ = b.script(ScriptType::TextJavaScript, |b| b.text("if (a < b) alert('hello');"))?;
                Ok(())
            })?;
            let _ = b.body(|b| b.comment("commented"))?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();

    assert_eq!(
        serialize(&doc, false),
        "<!DOCTYPE html>\n<html><head><script type=\"text/javascript\">if (a < b) alert('hello');</script></head><body><!--commented--></body></html>"
    );
}

#[test]
fn test_comment_directly_under_html() {
    let doc = build_document(|b| {
        let _ = b.html(|b| b.comment("commented"))?;
        Ok(())
    })
    .unwrap();

    assert_eq!(
        serialize(&doc, false),
        "<!DOCTYPE html>\n<html><!--commented--></html>"
    );
}

#[test]
fn test_raw_and_escaped_text() {
    let doc = build_document(|b| {
        let _ = b.p(|b| {
            b.text("<b>escaped</b>")?;
            b.raw("<b>raw</b>")
        })?;
        Ok(())
    })
    .unwrap();

    assert_eq!(
        serialize(&doc, false),
        "<!DOCTYPE html>\n<p>&lt;b&gt;escaped&lt;/b&gt;<b>raw</b></p>"
    );
}

#[test]
fn test_generic_element_and_attributes() {
    let doc = build_document(|b| {
        let _ = b.element("custom-widget", |b| {
            b.attr("data-count", 2)?;
            b.attr("title", "a \"quoted\" & <odd> value")?;
            b.attr("hidden", true)
        })?;
        Ok(())
    })
    .unwrap();

    assert_eq!(
        serialize(&doc, false),
        "<!DOCTYPE html>\n<custom-widget data-count=\"2\" title=\"a &quot;quoted&quot; &amp; &lt;odd&gt; value\" hidden></custom-widget>"
    );
}

#[test]
fn test_attribute_removal() {
    let doc = build_document(|b| {
        let _ = b.div(|b| {
            b.id("x")?;
            b.attr("class", "a")?;
            b.remove_attr("class")
        })?;
        Ok(())
    })
    .unwrap();

    assert_eq!(serialize(&doc, false), "<!DOCTYPE html>\n<div id=\"x\"></div>");
}

// ========== Namespaces ==========

#[test]
fn test_namespace_does_not_leak_to_siblings() {
    let doc = build_document(|b| {
        let _ = b.div(|b| {
            let _ = b.svg(|b| {
                let _ = b.element("circle", |b| b.attr("r", 4))?;
                Ok(())
            })?;
            let _ = b.p(|_| Ok(()))?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();

    let ns = |name: &str| doc.as_element(doc.get_elements_by_tag_name(name)[0]).unwrap().namespace;
    assert_eq!(ns("div"), Namespace::Html);
    assert_eq!(ns("svg"), Namespace::Svg);
    assert_eq!(ns("circle"), Namespace::Svg);
    assert_eq!(ns("p"), Namespace::Html);
    assert_eq!(
        doc.namespace_uri(doc.get_elements_by_tag_name("circle")[0]),
        Some("http://www.w3.org/2000/svg")
    );
}

#[test]
fn test_append_into_svg_inherits_namespace() {
    let mut doc = build_document(|b| {
        let _ = b.svg(|_| Ok(()))?;
        Ok(())
    })
    .unwrap();
    let svg = doc.document_element().unwrap();

    let roots = append(&mut doc, svg, |b| {
        let _ = b.element("g", |_| Ok(()))?;
        Ok(())
    })
    .unwrap();

    assert_eq!(doc.as_element(roots[0]).unwrap().namespace, Namespace::Svg);
    assert_eq!(
        serialize_node(&doc, svg, false),
        "<svg xmlns=\"http://www.w3.org/2000/svg\"><g></g></svg>"
    );
}

#[test]
fn test_svg_round_trips_through_parser() {
    let doc = build_document(|b| {
        let _ = b.div(|b| {
            let _ = b.svg(|b| {
                b.id("'")?;
                let _ = b.br(|_| Ok(()))?;
                let _ = b.img(|b| b.text("x"))?;
                let _ = b.element("circle", |b| b.attr("hidden", ""))?;
                Ok(())
            })?;
            let _ = b.br(|_| Ok(()))?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();

    let markup = serialize(&doc, false);
    assert_eq!(
        markup,
        "<!DOCTYPE html>\n<div><svg xmlns=\"http://www.w3.org/2000/svg\" id=\"'\"><br></br><img>x</img><circle hidden=\"\"></circle></svg><br></div>"
    );
    let reparsed = parse_document(&markup).unwrap();
    assert_eq!(
        NodeSnapshot::capture(&reparsed, NodeId::ROOT),
        NodeSnapshot::capture(&doc, NodeId::ROOT)
    );
    assert_eq!(serialize(&reparsed, false), markup);
}

// ========== Stream consumer ==========

#[test]
fn test_stream_matches_tree_serialization() {
    for pretty in [false, true] {
        let doc = build_document(|b| sample_page(b)).unwrap();

        let mut consumer = HtmlStreamConsumer::new(SerializeOptions::pretty(pretty));
        let streamed = build(&mut consumer, |b| sample_page(b)).unwrap();

        assert_eq!(streamed, serialize(&doc, pretty));
    }
}

// ========== Errors ==========

#[test]
fn test_mismatched_close() {
    let mut doc = Document::new();
    let mut consumer = DomConsumer::new(&mut doc, Anchor::Document).unwrap();
    consumer.on_tag_start(&Tag::new("div")).unwrap();

    let err = consumer.on_tag_end(&Tag::new("span")).unwrap_err();
    assert!(matches!(
        err,
        BuildError::MismatchedClose { expected: Some(ref open), ref found }
            if open == "div" && found == "span"
    ));
}

#[test]
fn test_content_inside_void_element() {
    let result = build_document(|b| {
        let _ = b.p(|b| {
            let _ = b.br(|b| b.text("not allowed"))?;
            Ok(())
        })?;
        Ok(())
    });

    assert!(matches!(
        result,
        Err(BuildError::IllegalChildOfVoidElement { ref parent, .. }) if parent == "br"
    ));
}

#[test]
fn test_void_element_accepts_attributes() {
    let doc = build_document(|b| {
        let _ = b.img(|b| {
            b.attr("src", "a.png")?;
            b.attr("alt", "")
        })?;
        Ok(())
    })
    .unwrap();

    assert_eq!(
        serialize(&doc, false),
        "<!DOCTYPE html>\n<img src=\"a.png\" alt=\"\">"
    );
}

#[test]
fn test_finalize_twice() {
    let mut consumer = HtmlStreamConsumer::default();
    let _ = build(&mut consumer, |b| {
        let _ = b.p(|_| Ok(()))?;
        Ok(())
    })
    .unwrap();

    assert!(matches!(
        consumer.finalize(),
        Err(BuildError::AlreadyFinalized)
    ));
}

#[test]
fn test_missing_anchor_creates_nothing() {
    let (mut doc, _) = empty_body();
    let before = doc.len();

    let result = append(&mut doc, NodeId(999), |b| {
        let _ = b.p(|_| Ok(()))?;
        Ok(())
    });

    assert!(matches!(result, Err(BuildError::MissingAnchor(NodeId(999)))));
    assert_eq!(doc.len(), before);
}

#[test]
fn test_document_accepts_a_single_root_element() {
    let result = build_document(|b| {
        let _ = b.html(|_| Ok(()))?;
        let _ = b.html(|_| Ok(()))?;
        Ok(())
    });
    assert!(matches!(
        result,
        Err(BuildError::Hierarchy(HierarchyError::SecondDocumentElement))
    ));

    let result = build_document(|b| {
        let _ = b.html(|_| Ok(()))?;
        b.text("stray")
    });
    assert!(matches!(
        result,
        Err(BuildError::Hierarchy(HierarchyError::NotInsertable { kind: "text" }))
    ));

    let doc = build_document(|b| {
        b.comment("generated")?;
        b.text("\n")?;
        let _ = b.html(|_| Ok(()))?;
        Ok(())
    })
    .unwrap();
    assert_eq!(
        serialize(&doc, false),
        "<!DOCTYPE html>\n<!--generated--><html></html>"
    );
}

#[test]
fn test_failed_build_leaves_partial_tree() {
    let (mut doc, body) = empty_body();
    let result = append(&mut doc, body, |b| {
        let _ = b.p(|b| b.text("kept"))?;
        let _ = b.div(|b| b.entity("no-such-entity"))?;
        Ok(())
    });

    assert!(matches!(result, Err(BuildError::UnknownEntity(_))));
    assert_eq!(
        serialize_node(&doc, body, false),
        "<body><p>kept</p><div></div></body>"
    );
}
