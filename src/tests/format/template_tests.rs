//! Tests for the template serializer.

use crate::format::{FormatError, Serializer, TemplateSerializer};
use crate::model::PageView;

fn render(template: &str, view: &PageView) -> Result<String, FormatError> {
    let serializer = TemplateSerializer::parse(template)?;
    let bytes = serializer.serialize(view)?;
    Ok(String::from_utf8(bytes).unwrap())
}

#[test]
fn placeholders_are_replaced_by_fields() {
    let mut view = PageView::new("UA-1").with_path("/home");
    view.timestamp = 1_700_000_000;

    let out = render("{{tracking_id}} {{ .path }} at {{timestamp}}", &view).unwrap();
    assert_eq!(out, "UA-1 /home at 1700000000\n");
}

#[test]
fn nested_tags_are_addressable() {
    let view = PageView::new("UA-1").with_tag("campaign", "spring");
    assert_eq!(render("[{{tags.campaign}}]", &view).unwrap(), "[spring]\n");

    // empty tags are omitted from the record, the lookup stays lenient
    let bare = PageView::new("UA-1");
    assert_eq!(render("[{{tags.campaign}}]", &bare).unwrap(), "[]\n");
}

#[test]
fn unknown_fields_fail_at_render_time() {
    let err = render("{{nope}}", &PageView::new("UA-1")).unwrap_err();
    assert!(matches!(err, FormatError::Template(ref m) if m.contains("nope")));
}

#[test]
fn malformed_templates_are_rejected_at_parse_time() {
    assert!(matches!(
        TemplateSerializer::parse("{{path"),
        Err(FormatError::Template(_))
    ));
    assert!(matches!(
        TemplateSerializer::parse("{{ }}"),
        Err(FormatError::Template(_))
    ));
}

#[test]
fn literal_templates_render_verbatim() {
    let serializer = TemplateSerializer::parse("hit").unwrap();
    assert_eq!(serializer.source(), "hit");
    assert_eq!(serializer.serialize(&PageView::default()).unwrap(), b"hit\n".to_vec());
}
