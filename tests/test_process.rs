use insta::assert_snapshot;
use rstest::rstest;

use xmlproc::mappers::{Logger, NamespaceNormalizer, Pruner};
use xmlproc::{Error, Event, Mapped, Processor, QName, Reader, StartElement, Writer};

fn normalize(xml: &str) -> String {
    let mut processor = Processor::default();
    let mut writer = Writer::new(Vec::new());
    processor.process(Reader::new(xml), &mut writer).unwrap();
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

#[test]
fn test_prefixed_namespace() {
    assert_snapshot!(
        normalize(r#"<a xmlns:p="urn:x"><p:b/></a>"#),
        @r###"<a xmlns:p="urn:x"><p:b></p:b></a>"###
    );
}

#[test]
fn test_default_namespace() {
    assert_snapshot!(
        normalize(r#"<a xmlns="urn:x"><b/></a>"#),
        @r###"<a xmlns="urn:x"><b></b></a>"###
    );
}

#[rstest]
#[case::undeclared_prefix("<y:a/>", "<y:a></y:a>")]
#[case::xml_prefix(r#"<a xml:lang="en"/>"#, r#"<a xml:lang="en"></a>"#)]
#[case::shadowing(
    r#"<a xmlns:p="urn:x"><b xmlns:q="urn:x"><q:c/></b><p:d/></a>"#,
    r#"<a xmlns:p="urn:x"><b xmlns:q="urn:x"><q:c></q:c></b><p:d></p:d></a>"#
)]
#[case::default_shadowing(
    r#"<a xmlns="urn:x"><b xmlns="urn:y"><c/></b><d/></a>"#,
    r#"<a xmlns="urn:x"><b xmlns="urn:y"><c></c></b><d></d></a>"#
)]
#[case::default_wins(
    r#"<a xmlns:p="urn:x" xmlns="urn:x"><p:b/></a>"#,
    r#"<a xmlns:p="urn:x" xmlns="urn:x"><b></b></a>"#
)]
#[case::prefixed_attribute(
    r#"<a xmlns:p="urn:x" p:c="1" d="2"/>"#,
    r#"<a xmlns:p="urn:x" p:c="1" d="2"></a>"#
)]
#[case::comments_and_whitespace(
    "<a>\n  <!-- c -->\n  <b> x </b>\n</a>",
    "<a><b> x </b></a>"
)]
#[case::entities(r#"<a b="&quot;">&lt;&amp;&gt;</a>"#, r#"<a b="&quot;">&lt;&amp;&gt;</a>"#)]
fn test_normalize(#[case] xml: &str, #[case] expected: &str) {
    assert_eq!(normalize(xml), expected);
}

#[test]
fn test_unresolved_namespace_is_declared() {
    let mut writer = Writer::new(Vec::new());
    let events = vec![
        Event::start(QName::ns("urn:1", "a")),
        Event::end(QName::ns("urn:1", "a")),
    ];
    Processor::default()
        .process(events.into_iter().map(Ok), &mut writer)
        .unwrap();
    let xml = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    assert_snapshot!(xml, @r###"<a xmlns="urn:1"></a>"###);
}

#[test]
fn test_pruning() {
    let mut out = Vec::new();
    Processor::default()
        .process(
            vec![Event::comment("hi"), Event::text("   "), Event::text("ok")]
                .into_iter()
                .map(Ok),
            &mut out,
        )
        .unwrap();
    assert_eq!(out, vec![Event::text("ok")]);
}

#[test]
fn test_logger_passes_events_on() {
    let mut processor = Processor::new();
    processor.add_mapper(Logger::default());
    processor.add_mapper(NamespaceNormalizer::new());
    let mut out = Vec::new();
    processor
        .process(Reader::new(r#"<a xmlns="urn:x"/>"#), &mut out)
        .unwrap();
    assert_eq!(
        out,
        vec![
            StartElement::new(QName::new("a"))
                .with_attribute(QName::new("xmlns"), "urn:x")
                .into(),
            Event::end(QName::new("a")),
        ]
    );
}

#[test]
fn test_process_streams_indents() {
    let mut out = Vec::new();
    Processor::default()
        .process_streams(
            r#"<?xml version="1.0"?><a xmlns="urn:x"><b>text</b><c><d/></c></a>"#.as_bytes(),
            &mut out,
        )
        .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "<?xml version=\"1.0\"?>\n<a xmlns=\"urn:x\">\n  <b>text</b>\n  <c>\n    <d></d>\n  </c>\n</a>"
    );
}

#[test]
fn test_process_streams_latin1() {
    let mut out = Vec::new();
    Processor::default()
        .process_streams(
            &b"<?xml version=\"1.0\" encoding=\"iso-8859-1\"?><a>caf\xe9</a>"[..],
            &mut out,
        )
        .unwrap();
    assert!(String::from_utf8(out).unwrap().ends_with("<a>caf\u{e9}</a>"));
}

#[test]
fn test_reader_error_stops_processing() {
    let mut out = Vec::new();
    let mut processor = Processor::new();
    processor.add_mapper(Pruner);
    let err = processor
        .process(Reader::new("<a><b></a>"), &mut out)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCloseTag(..)));
    assert_eq!(
        out,
        vec![Event::start(QName::new("a")), Event::start(QName::new("b"))]
    );
}

#[test]
fn test_unclosed_document() {
    let mut out = Vec::new();
    let err = Processor::default()
        .process_streams("<a><b></b>".as_bytes(), &mut out)
        .unwrap_err();
    assert!(matches!(err, Error::UnclosedTag(name) if name == "a"));
}

#[test]
fn test_mapper_error_message() {
    let mut processor = Processor::default();
    processor.add_mapper(|event: Event| {
        if let Event::StartElement(element) = &event {
            if element.attribute("id").is_none() {
                return Err(Error::mapper(format!("{} has no id", element.name)));
            }
        }
        Ok(Mapped::Keep(event))
    });
    let err = processor
        .process(Reader::new("<a/>"), Vec::<Event>::new())
        .unwrap_err();
    assert_eq!(err.to_string(), "mapper failed: a has no id");
}
