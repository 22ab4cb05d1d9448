#[cfg(test)]
mod tests {
    use crate::*;

    fn cfg(json: &str) -> Configuration {
        load_from_str(json, None).unwrap()
    }

    fn file(label: &str) -> Item {
        Item::new(
            label,
            ItemKind::File(FileItem {
                path: "a.txt".into(),
                ..FileItem::default()
            }),
        )
    }

    #[test]
    fn default_icons_follow_type() {
        let c = cfg(r#"{ "title": "T", "items": [
            { "type": "title", "label": "a" },
            { "type": "file", "label": "b", "path": "x" },
            { "type": "dialog", "label": "c", "message": "m" },
            { "type": "folder", "label": "d", "items": [] },
            { "type": "diff", "label": "e", "diffPath": "p" },
            { "type": "quiz", "label": "f", "question": "?", "correctAnswers": ["y"], "wrongAnswers": [] },
            { "type": "browser", "label": "g", "url": "u" }
        ] }"#);
        let icons: Vec<_> = resolve_tree(&c)
            .into_iter()
            .map(|r| r.decoration.icon)
            .collect();
        assert_eq!(
            icons,
            vec![
                "event-marker",
                "file",
                "message",
                "folder",
                "change-set",
                "question",
                "globe"
            ]
        );
    }

    #[test]
    fn explicit_icon_wins() {
        let mut item = file("x");
        item.base.icon = Some("rocket".into());
        assert_eq!(resolve(&item, &Inherited::default()).icon, "rocket");
    }

    #[test]
    fn explicit_color_ignores_ancestors() {
        let mut item = file("x");
        item.base.icon_color = Some("green".into());
        item.base.label_color = Some("white".into());
        let inherited = Inherited {
            icon_color: Some("red".into()),
            label_color: Some("black".into()),
        };
        let deco = resolve(&item, &inherited);
        assert_eq!(deco.icon_color.as_deref(), Some("green"));
        assert_eq!(deco.label_color.as_deref(), Some("white"));
    }

    #[test]
    fn absent_colors_stay_absent() {
        let deco = resolve(&file("x"), &Inherited::default());
        assert_eq!(deco.icon_color, None);
        assert_eq!(deco.label_color, None);
    }

    #[test]
    fn folder_override_beats_inherited_but_not_own_color() {
        let folder = |icon_color: Option<&str>| {
            let mut f = Item::new(
                "F",
                ItemKind::Folder(FolderItem {
                    items: vec![],
                    folder_icon_color: Some("blue".into()),
                    folder_label_color: None,
                }),
            );
            f.base.icon_color = icon_color.map(str::to_string);
            f
        };
        let inherited = Inherited {
            icon_color: Some("red".into()),
            label_color: Some("gray".into()),
        };
        let d = resolve(&folder(None), &inherited);
        assert_eq!(d.icon_color.as_deref(), Some("blue"));
        assert_eq!(d.label_color.as_deref(), Some("gray"));

        let d = resolve(&folder(Some("pink")), &inherited);
        assert_eq!(d.icon_color.as_deref(), Some("pink"));
    }

    #[test]
    fn folder_colors_flow_transitively() {
        let c = cfg(r#"{ "title": "T", "items": [
            { "type": "folder", "label": "F", "folderLabelColor": "blue", "items": [
                { "type": "folder", "label": "G", "items": [
                    { "type": "file", "label": "X", "path": "x" }
                ]}
            ]}
        ] }"#);
        let tree = resolve_tree(&c);
        let x = &tree[0].children[0].children[0];
        assert_eq!(x.item.label(), "X");
        assert_eq!(x.path.to_string(), "0.0.0");
        assert_eq!(x.decoration.label_color.as_deref(), Some("blue"));
        assert_eq!(c.get(&x.path), Some(x.item));
    }

    #[test]
    fn nearest_override_wins() {
        let c = cfg(r#"{ "title": "T", "items": [
            { "type": "folder", "label": "F", "folderIconColor": "red", "items": [
                { "type": "folder", "label": "G", "folderIconColor": "green", "items": [
                    { "type": "title", "label": "X" }
                ]},
                { "type": "title", "label": "Y" }
            ]}
        ] }"#);
        let tree = resolve_tree(&c);
        let g = &tree[0].children[0];
        assert_eq!(g.decoration.icon_color.as_deref(), Some("green"));
        assert_eq!(
            g.children[0].decoration.icon_color.as_deref(),
            Some("green")
        );
        assert_eq!(
            tree[0].children[1].decoration.icon_color.as_deref(),
            Some("red")
        );
    }

    #[test]
    fn resolution_does_not_touch_source() {
        let c = cfg(r#"{ "title": "T", "items": [
            { "type": "folder", "label": "F", "folderIconColor": "red", "items": [
                { "type": "title", "label": "X" }
            ]}
        ] }"#);
        let before = c.clone();
        let _tree = resolve_tree(&c);
        assert_eq!(c, before);
        assert_eq!(c.items[0].children().unwrap()[0].base.icon_color, None);
    }
}
