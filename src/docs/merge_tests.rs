use super::*;
use std::collections::HashMap;
use crate::constants::EL_SUMMARY;
use crate::test_utils::{bound, exported, method, property, type_doc, type_info};
use crate::xml_tree::{XmlElement, XmlNode};

const NSSTRING: &str = "MonoMac.Foundation.NSString";

/// Serves canned fragments keyed by symbol name
struct CannedProvider {
    fragments: HashMap<String, XmlElement>,
}

impl CannedProvider {
    fn with(symbol: &str, paragraphs: usize) -> Self {
        let mut root = XmlElement::new("div");
        for i in 0..paragraphs {
            root.children.push(XmlNode::Element(
                XmlElement::new("para").with_child(XmlNode::text(format!("Paragraph {}.", i + 1))),
            ));
        }
        let mut fragments = HashMap::new();
        fragments.insert(symbol.to_string(), root);
        Self { fragments }
    }
}

impl ExternalDocProvider for CannedProvider {
    fn member_docs(&self, _type_info: &TypeInfo, symbol: &str) -> Option<XmlElement> {
        self.fragments.get(symbol).cloned()
    }
}

fn window_type() -> TypeInfo {
    bound(
        type_info(
            "MonoMac.AppKit",
            "NSWindow",
            vec![
                exported("DidResizeNotification", NSSTRING, "NSWindowDidResizeNotification"),
                exported("DefaultKey", NSSTRING, "NSWindowDefaultKey"),
                property("Title", "System.String"),
            ],
        ),
        &[("MonoMac.AppKit.NSWindowDelegate", "Delegate")],
    )
}

fn window_delegate() -> TypeInfo {
    type_info(
        "MonoMac.AppKit",
        "NSWindowDelegate",
        vec![
            method("DidResize", None),
            method("WindowShouldClose", Some("System.Boolean")),
        ],
    )
}

fn window_doc() -> DocumentTree {
    DocumentTree::parse(&type_doc(
        "MonoMac.AppKit.NSWindow",
        &[
            ("DidResizeNotification", NSSTRING),
            ("DefaultKey", NSSTRING),
            ("Title", "System.String"),
            ("DidResize", "System.Void"),
            ("WindowShouldClose", "System.Boolean"),
        ],
    ))
    .unwrap()
}

fn index() -> MetadataIndex {
    MetadataIndex::from_types(vec![window_type(), window_delegate()]).unwrap()
}

fn external_engine(provider: CannedProvider) -> MergeEngine {
    MergeEngine::new(
        MergeOptions {
            merge_external: true,
            ..MergeOptions::default()
        },
        Some(Box::new(provider)),
    )
}

fn summary_text(doc: &mut DocumentTree, member: &str) -> String {
    doc.member_mut(member).unwrap().summary().unwrap().text()
}

fn remarks_text(doc: &mut DocumentTree, member: &str) -> String {
    doc.member_mut(member).unwrap().remarks().unwrap().text()
}

#[test]
fn test_event_without_return_value() {
    let engine = MergeEngine::new(MergeOptions::default(), None);
    let mut doc = window_doc();
    let t = window_type();

    let report = engine.process_type(&t, t.binding.as_ref().unwrap(), &mut doc, &index());

    assert_eq!(report.events_documented, 2);
    assert_eq!(summary_text(&mut doc, "DidResize"), "Event raised by the object.");
    assert_eq!(
        remarks_text(&mut doc, "DidResize"),
        "If you assign a value to this event, this will reset the value for the Delegate property to an internal handler that maps delegates to events."
    );
}

#[test]
fn test_delegate_with_return_value() {
    let engine = MergeEngine::new(MergeOptions::default(), None);
    let mut doc = window_doc();
    let t = window_type();

    engine.process_type(&t, t.binding.as_ref().unwrap(), &mut doc, &index());

    assert_eq!(
        summary_text(&mut doc, "WindowShouldClose"),
        "Delegate invoked by the object to get a value."
    );
    let remarks = remarks_text(&mut doc, "WindowShouldClose");
    assert!(remarks.starts_with("You assign a function, delegate or anonymous method to this property"));
    assert!(remarks.contains("reset the value for the Delegate property"));
}

#[test]
fn test_fields_untouched_without_external_merge() {
    let engine = MergeEngine::new(MergeOptions::default(), None);
    let mut doc = window_doc();
    let t = window_type();

    let report = engine.process_type(&t, t.binding.as_ref().unwrap(), &mut doc, &index());

    assert_eq!(report.fields_merged, 0);
    assert_eq!(summary_text(&mut doc, "DidResizeNotification"), "To be added.");
    assert_eq!(remarks_text(&mut doc, "DidResizeNotification"), "To be added.");
}

#[test]
fn test_external_fragment_is_split_after_two_nodes() {
    let engine = external_engine(CannedProvider::with("NSWindowDidResizeNotification", 5));
    let mut doc = window_doc();
    let t = window_type();

    let report = engine.process_type(&t, t.binding.as_ref().unwrap(), &mut doc, &index());
    assert_eq!(report.fields_merged, 1);

    let member = doc.member_mut("DidResizeNotification").unwrap();
    let summary: Vec<String> = member
        .summary()
        .unwrap()
        .child_elements()
        .map(XmlElement::text)
        .collect();
    let remarks: Vec<String> = member
        .remarks()
        .unwrap()
        .child_elements()
        .map(XmlElement::text)
        .collect();
    assert_eq!(summary, vec!["Paragraph 1.", "Paragraph 2."]);
    assert_eq!(remarks, vec!["Paragraph 3.", "Paragraph 4.", "Paragraph 5."]);
    assert_eq!(member.summary().unwrap().children.len(), 2);
    assert_eq!(member.remarks().unwrap().children.len(), 3);
}

#[test]
fn test_non_notification_symbol_is_skipped() {
    // DefaultKey has the right return type but its symbol lacks the suffix
    let engine = external_engine(CannedProvider::with("NSWindowDefaultKey", 3));
    let mut doc = window_doc();
    let t = window_type();

    let report = engine.process_type(&t, t.binding.as_ref().unwrap(), &mut doc, &index());

    assert_eq!(report.fields_merged, 0);
    assert_eq!(summary_text(&mut doc, "DefaultKey"), "To be added.");
}

#[test]
fn test_other_return_type_is_skipped() {
    let engine = MergeEngine::new(
        MergeOptions {
            merge_external: true,
            notification_type: "Foundation.NSString".to_string(),
        },
        Some(Box::new(CannedProvider::with("NSWindowDidResizeNotification", 3))),
    );
    let mut doc = window_doc();
    let t = window_type();

    let report = engine.process_type(&t, t.binding.as_ref().unwrap(), &mut doc, &index());

    assert_eq!(report.fields_merged, 0);
    assert_eq!(report.external_failures, 0);
    assert_eq!(summary_text(&mut doc, "DidResizeNotification"), "To be added.");
}

#[test]
fn test_missing_fragment_is_reported() {
    let engine = external_engine(CannedProvider::with("SomethingElse", 3));
    let mut doc = window_doc();
    let t = window_type();

    let report = engine.process_type(&t, t.binding.as_ref().unwrap(), &mut doc, &index());

    assert_eq!(report.external_failures, 1);
    assert_eq!(summary_text(&mut doc, "DidResizeNotification"), "To be added.");
}

#[test]
fn test_stale_members_are_skipped() {
    let engine = MergeEngine::new(MergeOptions::default(), None);
    let mut doc = DocumentTree::parse(&type_doc(
        "MonoMac.AppKit.NSWindow",
        &[("WindowShouldClose", "System.Boolean")],
    ))
    .unwrap();
    let t = window_type();

    let report = engine.process_type(&t, t.binding.as_ref().unwrap(), &mut doc, &index());

    // Two exported fields and DidResize are missing from the document
    assert_eq!(report.stale_members, 3);
    assert_eq!(report.events_documented, 1);
    assert!(doc.member("DidResize").is_none());
    assert_eq!(
        summary_text(&mut doc, "WindowShouldClose"),
        "Delegate invoked by the object to get a value."
    );
}

#[test]
fn test_unresolved_delegate_type() {
    let engine = MergeEngine::new(MergeOptions::default(), None);
    let mut doc = window_doc();
    let t = window_type();
    let index = MetadataIndex::from_types(vec![window_type()]).unwrap();

    let report = engine.process_type(&t, t.binding.as_ref().unwrap(), &mut doc, &index);

    assert_eq!(report.unresolved_delegates, 1);
    assert_eq!(report.events_documented, 0);
    assert_eq!(summary_text(&mut doc, "DidResize"), "To be added.");
}

#[test]
fn test_event_groups_pair_by_position() {
    let engine = MergeEngine::new(MergeOptions::default(), None);
    let t = bound(
        type_info("MonoMac.AppKit", "NSWindow", Vec::new()),
        &[
            ("MonoMac.AppKit.FirstDelegate", "WeakFirst"),
            ("MonoMac.AppKit.SecondDelegate", "WeakSecond"),
        ],
    );
    let first = type_info("MonoMac.AppKit", "FirstDelegate", vec![method("Opened", None)]);
    let second = type_info("MonoMac.AppKit", "SecondDelegate", vec![method("Closed", None)]);
    let index = MetadataIndex::from_types(vec![t.clone(), first, second]).unwrap();
    let mut doc = DocumentTree::parse(&type_doc(
        "MonoMac.AppKit.NSWindow",
        &[("Opened", "System.Void"), ("Closed", "System.Void")],
    ))
    .unwrap();

    engine.process_type(&t, t.binding.as_ref().unwrap(), &mut doc, &index);

    assert!(remarks_text(&mut doc, "Opened").contains("the WeakFirst property"));
    assert!(remarks_text(&mut doc, "Closed").contains("the WeakSecond property"));
}

#[test]
fn test_repeated_merge_is_stable() {
    let engine = external_engine(CannedProvider::with("NSWindowDidResizeNotification", 4));
    let t = window_type();
    let index = index();

    let mut doc = window_doc();
    engine.process_type(&t, t.binding.as_ref().unwrap(), &mut doc, &index);
    let first = doc.to_xml_string();

    let mut reloaded = DocumentTree::parse(&first).unwrap();
    engine.process_type(&t, t.binding.as_ref().unwrap(), &mut reloaded, &index);
    assert_eq!(reloaded.to_xml_string(), first);
    assert!(first.contains(&format!("<{}>", EL_SUMMARY)));
}
