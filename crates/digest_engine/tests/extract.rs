use std::collections::BTreeMap;

use digest_engine::{
    extract_metadata, ContentExtractor, Image, ParsedDocument, ParseError, Table,
};
use pretty_assertions::assert_eq;

fn parse(html: &str) -> ParsedDocument {
    ParsedDocument::parse(html).expect("parse")
}

#[test]
fn end_to_end_page_yields_expected_model() {
    let html = r#"<html><head><title>T</title><meta name="x" content="y"></head><body><h1>H</h1><p>Para  one</p><table><tr><th>A</th></tr><tr><td>1</td></tr></table><img src="i.png" alt="pic"></body></html>"#;
    let model = ContentExtractor::default().extract(&parse(html));

    assert_eq!(model.article_info.title.as_deref(), Some("T"));
    assert_eq!(model.article_info.headings, vec!["H"]);
    assert_eq!(model.article_info.paragraphs, vec!["Para one"]);
    assert_eq!(model.article_info.links, Vec::<String>::new());
    assert_eq!(
        model.article_info.metadata,
        BTreeMap::from([("x".to_string(), "y".to_string())])
    );
    assert_eq!(
        model.tables,
        vec![Table {
            id: 1,
            header: Some(vec!["A".to_string()]),
            rows: vec![vec!["1".to_string()]],
        }]
    );
    assert_eq!(
        model.images,
        vec![Image {
            src: "i.png".to_string(),
            alt: Some("pic".to_string()),
            title: None,
        }]
    );
    assert_eq!(model.full_text, "THPara oneA1");
}

#[test]
fn headings_keep_document_order_across_levels() {
    let html = "<h2> Two </h2><h1>One</h1><h4>Four</h4><h3>\n Three\n</h3>";
    let info = ContentExtractor::default().extract(&parse(html)).article_info;
    assert_eq!(info.headings, vec!["Two", "One", "Three"]);
}

#[test]
fn title_is_absent_without_title_element() {
    let info = ContentExtractor::default()
        .extract(&parse("<p>no title here</p>"))
        .article_info;
    assert_eq!(info.title, None);
    assert_eq!(info.paragraphs, vec!["no title here"]);
}

#[test]
fn links_include_empty_href_but_not_missing_href() {
    let html = r##"<a href="/a">A</a><a>none</a><a href="">empty</a><a href="#frag">F</a>"##;
    let info = ContentExtractor::default().extract(&parse(html)).article_info;
    assert_eq!(info.links, vec!["/a", "", "#frag"]);
}

#[test]
fn metadata_keys_fall_back_to_property_then_unknown() {
    let html = r#"<head>
        <meta charset="utf-8">
        <meta name="description" content="Desc">
        <meta property="og:title" content="OG">
        <meta http-equiv="refresh" content="30">
        <meta name="empty" content="">
        <meta name="keywords">
    </head>"#;
    let metadata = extract_metadata(&parse(html));
    assert_eq!(
        metadata,
        BTreeMap::from([
            ("description".to_string(), "Desc".to_string()),
            ("og:title".to_string(), "OG".to_string()),
            ("unknown".to_string(), "30".to_string()),
        ])
    );
}

#[test]
fn later_meta_tag_overwrites_earlier_with_same_name() {
    let html = r#"<meta name="author" content="first"><meta name="author" content="second">"#;
    let metadata = extract_metadata(&parse(html));
    assert_eq!(metadata.len(), 1);
    assert_eq!(metadata.get("author").map(String::as_str), Some("second"));
}

#[test]
fn page_without_content_meta_has_empty_metadata() {
    let html = r#"<head><meta charset="utf-8"><title>x</title></head>"#;
    assert!(extract_metadata(&parse(html)).is_empty());
}

#[test]
fn images_require_non_empty_src() {
    let html = r#"<img src="a.png" title="T"><img src=""><img alt="no src"><img src="b.png" alt="">"#;
    let images = ContentExtractor::default().extract(&parse(html)).images;
    assert_eq!(
        images,
        vec![
            Image {
                src: "a.png".to_string(),
                alt: None,
                title: Some("T".to_string()),
            },
            Image {
                src: "b.png".to_string(),
                alt: Some(String::new()),
                title: None,
            },
        ]
    );
}

#[test]
fn full_text_skips_scripts_and_styles_and_is_cleaned() {
    let html = r#"<html><head><style>p { color: red; }</style><script>var x = "<b>";</script></head>
        <body><p>Hello,   world!</p><noscript>enable js</noscript><p>(Costs: $5)</p></body></html>"#;
    let model = ContentExtractor::default().extract(&parse(html));
    assert!(!model.full_text.contains("color"));
    assert!(!model.full_text.contains("var x"));
    assert!(!model.full_text.contains("enable js"));
    assert!(model.full_text.contains("Hello, world!"));
    assert!(model.full_text.contains("Costs 5"));
    assert!(model
        .full_text
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c.is_whitespace() || ".,!?-".contains(c)));
}

#[test]
fn empty_body_cannot_be_parsed() {
    assert_eq!(
        ParsedDocument::parse("").err(),
        Some(ParseError::EmptyDocument)
    );
    assert_eq!(
        ParsedDocument::parse(" \n\t").err(),
        Some(ParseError::EmptyDocument)
    );
}

#[test]
fn extraction_is_deterministic() {
    let html = r#"<title>X</title><h1>a</h1><p>b</p><a href="c">c</a><table><tr><td>1</td></tr></table>"#;
    let extractor = ContentExtractor::default();
    assert_eq!(extractor.extract(&parse(html)), extractor.extract(&parse(html)));
}
