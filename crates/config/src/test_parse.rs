#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::*;

    fn load(json: &str) -> Result<Configuration, Error> {
        load_from_str(json, None)
    }

    #[test]
    fn every_item_type_parses() {
        let json = r##"{
            "title": "Tour",
            "items": [
                { "type": "title", "label": "Intro", "soundPath": "intro.wav" },
                { "type": "file", "label": "Main", "path": "src/main.rs", "line": 3,
                  "highlightStartLine": 3, "highlightEndLine": 5,
                  "highlightType": "selection", "highlightColor": "#ff000055",
                  "highlightDuration": 1500, "closeSoundPath": "close.wav" },
                { "type": "dialog", "label": "Note", "message": "Hello", "severity": "warning" },
                { "type": "folder", "label": "More", "folderIconColor": "red", "items": [] },
                { "type": "diff", "label": "Patch", "diffPath": "p.diff", "action": "preview" },
                { "type": "quiz", "label": "Q", "question": "2+2?",
                  "correctAnswers": ["4"], "wrongAnswers": ["3", "5"], "displayMode": "menu" },
                { "type": "browser", "label": "Docs", "url": "https://example.com",
                  "browserType": "external", "title": "Docs page" }
            ]
        }"##;
        let cfg = load(json).unwrap();
        assert_eq!(cfg.title, "Tour");
        let tags: Vec<_> = cfg.items.iter().map(Item::context_value).collect();
        assert_eq!(
            tags,
            vec!["title", "file", "dialog", "folder", "diff", "quiz", "browser"]
        );

        match &cfg.items[1].kind {
            ItemKind::File(f) => {
                assert_eq!(f.path, "src/main.rs");
                assert_eq!(f.line, Some(3));
                assert_eq!(f.highlight_type, Some(HighlightType::Selection));
                assert_eq!(f.highlight_duration, Some(1500));
            }
            other => panic!("expected file, got {other:?}"),
        }
        match &cfg.items[2].kind {
            ItemKind::Dialog(d) => assert_eq!(d.severity, Severity::Warning),
            other => panic!("expected dialog, got {other:?}"),
        }
        match &cfg.items[5].kind {
            ItemKind::Quiz(q) => {
                assert_eq!(q.display_mode, DisplayMode::Menu);
                assert_eq!(q.wrong_answers.len(), 2);
            }
            other => panic!("expected quiz, got {other:?}"),
        }
    }

    #[test]
    fn defaults_apply_when_optional_fields_absent() {
        let json = r#"{
            "title": "T",
            "items": [
                { "type": "dialog", "label": "D", "message": "m" },
                { "type": "quiz", "label": "Q", "question": "?", "correctAnswers": ["a"], "wrongAnswers": [] },
                { "type": "browser", "label": "B", "url": "https://example.com" },
                { "type": "diff", "label": "P", "diffPath": "x.diff" }
            ]
        }"#;
        let cfg = load(json).unwrap();
        let ItemKind::Dialog(d) = &cfg.items[0].kind else {
            panic!("dialog")
        };
        assert_eq!(d.severity, Severity::Info);
        let ItemKind::Quiz(q) = &cfg.items[1].kind else {
            panic!("quiz")
        };
        assert_eq!(q.display_mode, DisplayMode::Webview);
        let ItemKind::Browser(b) = &cfg.items[2].kind else {
            panic!("browser")
        };
        assert_eq!(b.browser_type, BrowserType::Simple);
        let ItemKind::Diff(p) = &cfg.items[3].kind else {
            panic!("diff")
        };
        assert_eq!(p.action, None);
    }

    #[test]
    fn nested_folders_keep_order() {
        let json = r#"{
            "title": "T",
            "items": [
                { "type": "folder", "label": "A", "items": [
                    { "type": "title", "label": "A1" },
                    { "type": "folder", "label": "A2", "items": [
                        { "type": "title", "label": "A2a" }
                    ]}
                ]},
                { "type": "title", "label": "B" }
            ]
        }"#;
        let cfg = load(json).unwrap();
        assert_eq!(cfg.len(), 5);
        let deep = cfg.get(&"0.1.0".parse().unwrap()).unwrap();
        assert_eq!(deep.label(), "A2a");
        assert!(cfg.get(&"1.0".parse().unwrap()).is_none());
        assert!(cfg.get(&ItemPath::root()).is_none());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = load("{ \"title\": \"T\", \"items\": [ }").unwrap_err();
        assert!(err.is_parse(), "{err:?}");
        let Error::Parse { line, excerpt, .. } = &err else {
            unreachable!()
        };
        assert_eq!(*line, 1);
        assert!(excerpt.contains('^'));
    }

    #[test]
    fn unknown_tag_is_a_schema_error() {
        let err = load(r#"{ "title": "T", "items": [ { "type": "video", "label": "V" } ] }"#)
            .unwrap_err();
        assert!(err.is_schema(), "{err:?}");
        assert!(err.to_string().contains("video"));
    }

    #[test]
    fn missing_required_field_names_the_item() {
        let json = r#"{ "title": "T", "items": [
            { "type": "folder", "label": "F", "items": [ { "type": "file", "label": "X" } ] }
        ] }"#;
        let err = load(json).unwrap_err();
        let Error::Schema { item, message, .. } = &err else {
            panic!("expected schema error, got {err:?}")
        };
        assert_eq!(item.as_deref(), Some("items[0].items[0]"));
        assert!(message.contains("`path`"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let json = r#"{ "title": "T", "items": [ { "type": "title", "label": "X", "colour": "red" } ] }"#;
        assert!(load(json).unwrap_err().is_schema());
    }

    #[test]
    fn field_from_another_variant_is_rejected() {
        let json = r#"{ "title": "T", "items": [
            { "type": "file", "label": "X", "path": "a", "diffPath": "b.diff" }
        ] }"#;
        let err = load(json).unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains("diffPath"));
    }

    #[test]
    fn quiz_requires_a_correct_answer() {
        let json = r#"{ "title": "T", "items": [
            { "type": "quiz", "label": "Q", "question": "?", "correctAnswers": [], "wrongAnswers": ["x"] }
        ] }"#;
        assert!(load(json).unwrap_err().is_schema());
    }

    #[test]
    fn line_numbers_are_validated() {
        let zero = r#"{ "title": "T", "items": [ { "type": "file", "label": "X", "path": "a", "line": 0 } ] }"#;
        assert!(load(zero).unwrap_err().is_schema());

        let negative = r#"{ "title": "T", "items": [ { "type": "file", "label": "X", "path": "a", "line": -2 } ] }"#;
        assert!(load(negative).unwrap_err().is_schema());

        let inverted = r#"{ "title": "T", "items": [
            { "type": "file", "label": "X", "path": "a", "highlightStartLine": 9, "highlightEndLine": 2 }
        ] }"#;
        assert!(load(inverted).unwrap_err().is_schema());
    }

    #[test]
    fn bad_enum_value_is_a_schema_error() {
        let json = r#"{ "title": "T", "items": [
            { "type": "dialog", "label": "D", "message": "m", "severity": "fatal" }
        ] }"#;
        let err = load(json).unwrap_err();
        assert!(err.is_schema());
        assert!(err.pretty().contains("schema error at"));
    }

    #[test]
    fn missing_root_fields_fail() {
        assert!(load(r#"{ "items": [] }"#).unwrap_err().is_schema());
        assert!(load(r#"{ "title": "T" }"#).unwrap_err().is_schema());
    }

    #[test]
    fn non_json_extension_is_rejected() {
        let err = load_from_path(Path::new("walkthrough.yaml")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert!(err.path().is_some());
    }

    #[test]
    fn dump_uses_document_field_names() {
        let json = r#"{ "title": "T", "items": [
            { "type": "diff", "label": "P", "diffPath": "x.diff", "revertSoundPath": "r.wav" }
        ] }"#;
        let cfg = load(json).unwrap();
        let out = serde_json::to_value(&cfg).unwrap();
        let item = &out["items"][0];
        assert_eq!(item["type"], "diff");
        assert_eq!(item["diffPath"], "x.diff");
        assert_eq!(item["revertSoundPath"], "r.wav");
        assert_eq!(item["label"], "P");
    }
}
