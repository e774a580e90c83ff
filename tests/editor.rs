//! Editing session: commands, persistence, import/export, reset, print

use resume_pager::document::ExperienceItem;
use resume_pager::{
    ContactField, Direction, Document, EditOp, Editor, EditorConfig, Error, ItemField,
    KeyValueStore, MemoryStore, Page, SectionKind, RESET_PROMPT, STORAGE_KEY,
};

fn editor() -> Editor {
    Editor::in_memory()
}

fn saved(editor: &Editor) -> Option<Document> {
    editor
        .store()
        .get(STORAGE_KEY)
        .map(|text| Document::from_json(&text).unwrap())
}

#[test]
fn test_open_restores_saved_document() {
    let mut doc = Document::new();
    doc.contact.full_name = "Grace Hopper".into();
    let store = MemoryStore::with_entry(STORAGE_KEY, &doc.to_json().unwrap());

    let editor = Editor::open(store, EditorConfig::default());
    assert_eq!(editor.document().contact.full_name, "Grace Hopper");
}

#[test]
fn test_open_ignores_corrupt_storage() {
    let store = MemoryStore::with_entry(STORAGE_KEY, "{\"contact\": ");
    let editor = Editor::open(store, EditorConfig::default());
    assert_eq!(editor.document(), &Document::new());
    assert_eq!(editor.page_count(), 1);
}

#[test]
fn test_custom_storage_key() {
    let config = EditorConfig::default()
        .with_storage_key("other")
        .with_autosave_window(0);
    let mut editor = Editor::open(MemoryStore::new(), config);
    editor
        .apply_at(EditOp::SetSummary { value: "Hi".into() }, 5)
        .unwrap();
    assert!(editor.tick(5));
    assert!(editor.store().get("other").is_some());
    assert!(editor.store().get(STORAGE_KEY).is_none());
}

#[test]
fn test_debounce_persists_last_edit_only() {
    let mut editor = editor();
    for (i, name) in ["A", "Ad", "Ada"].iter().enumerate() {
        editor
            .apply_at(EditOp::set_contact(ContactField::FullName, *name), i as u64 * 100)
            .unwrap();
        assert!(!editor.tick(i as u64 * 100 + 50));
    }

    // last edit at 200, window 500
    assert!(!editor.tick(699));
    assert!(editor.tick(700));
    assert_eq!(editor.store().writes(), 1);
    assert_eq!(saved(&editor).unwrap().contact.full_name, "Ada");
    assert!(!editor.tick(2000));
}

#[test]
fn test_save_now() {
    let mut editor = editor();
    editor
        .apply_at(EditOp::SetSkills { value: "Rust, SQL".into() }, 0)
        .unwrap();
    editor.save_now().unwrap();
    assert!(!editor.has_pending_save());
    assert_eq!(saved(&editor).unwrap().skills, vec!["Rust", "SQL"]);
}

#[test]
fn test_failed_autosave_keeps_document() {
    let mut editor = editor();
    editor.store_mut().set_read_only(true);
    editor
        .apply_at(EditOp::set_contact(ContactField::Email, "a@b.c"), 0)
        .unwrap();
    assert!(!editor.tick(1000));
    assert_eq!(editor.document().contact.email, "a@b.c");
    assert!(matches!(editor.save_now(), Err(Error::Storage(_))));
}

#[test]
fn test_invalid_command_changes_nothing() {
    let mut editor = editor();
    let err = editor
        .apply_at(
            EditOp::set_item_field(SectionKind::Experience, 3, ItemField::Role, "Dev"),
            0,
        )
        .unwrap_err();
    assert!(matches!(err, Error::ItemOutOfRange { .. }));
    assert_eq!(editor.revision(), 0);
    assert!(!editor.has_pending_save());
}

#[test]
fn test_commands_reflow_pages() {
    let mut editor = editor();
    editor.set_scroll_top(150.0);
    for i in 0..30 {
        editor
            .apply_at(EditOp::add_item(SectionKind::Experience), i)
            .unwrap();
        editor
            .apply_at(
                EditOp::set_item_field(SectionKind::Experience, i as usize, ItemField::Role, format!("Role {i}")),
                i,
            )
            .unwrap();
        for _ in 0..3 {
            editor
                .apply_at(EditOp::AddBullet { section: SectionKind::Experience, index: i as usize }, i)
                .unwrap();
        }
        for bullet in 0..3 {
            editor
                .apply_at(
                    EditOp::EditBullet {
                        section: SectionKind::Experience,
                        index: i as usize,
                        bullet,
                        value: "Kept the lights on for a very large fleet of machines".into(),
                    },
                    i,
                )
                .unwrap();
        }
    }

    assert!(editor.page_count() > 1);
    assert_eq!(editor.page_label(), format!("{} pages", editor.page_count()));
    assert_eq!(editor.scroll_top(), 150.0);

    let preview = editor.preview();
    assert_eq!(preview.page_count, editor.page_count());
    assert_eq!(preview.pages.len(), editor.page_count());
    assert_eq!(preview.scroll_top, 150.0);
}

#[test]
fn test_move_keeps_other_items() {
    let mut editor = editor();
    for role in ["first", "second"] {
        editor
            .apply_at(EditOp::add_item(SectionKind::Awards), 0)
            .unwrap();
        let index = editor.document().awards.len() - 1;
        editor
            .apply_at(
                EditOp::set_item_field(SectionKind::Awards, index, ItemField::Title, role),
                0,
            )
            .unwrap();
    }

    let result = editor
        .apply_at(EditOp::move_item(SectionKind::Awards, 1, Direction::Down), 0)
        .unwrap();
    assert!(!result.has_changes());

    editor
        .apply_at(EditOp::move_item(SectionKind::Awards, 1, Direction::Up), 0)
        .unwrap();
    let titles: Vec<_> = editor.document().awards.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["second", "first"]);
}

#[test]
fn test_malformed_import_leaves_session_untouched() {
    let mut editor = editor();
    editor
        .apply_at(EditOp::set_contact(ContactField::FullName, "Ada"), 0)
        .unwrap();
    editor.save_now().unwrap();

    let before = editor.document().clone();
    let pages = editor.pagination().clone();
    let revision = editor.revision();
    let writes = editor.store().writes();

    for payload in ["not json", "[1, 2, 3]", "\"resume\"", "{\"experience\": 5}"] {
        let err = editor.import_json(payload).unwrap_err();
        assert!(err.is_malformed_import(), "{payload}: {err}");
        assert!(err.to_string().starts_with("Invalid JSON file"));
    }

    assert_eq!(editor.document(), &before);
    assert_eq!(editor.pagination(), &pages);
    assert_eq!(editor.revision(), revision);
    assert_eq!(editor.store().writes(), writes);
}

#[test]
fn test_import_replaces_and_saves() {
    let mut editor = editor();
    editor
        .import_json(
            r#"{
                "contact": {"fullName": "Linus", "links": null},
                "summary": null,
                "experience": [{"role": "Maintainer", "bullets": ["Merged"]}],
                "others": null
            }"#,
        )
        .unwrap();

    let doc = editor.document();
    assert_eq!(doc.contact.full_name, "Linus");
    assert_eq!(doc.summary, "");
    assert_eq!(doc.experience[0].role, "Maintainer");
    assert_eq!(doc.others.title(), "Others");
    assert!(doc.research.is_empty());

    assert!(!editor.has_pending_save());
    assert_eq!(saved(&editor).as_ref(), Some(editor.document()));
}

#[test]
fn test_export_import_round_trip() {
    let mut editor = editor();
    editor
        .apply_at(EditOp::set_contact(ContactField::Link, "https://ada.dev"), 0)
        .unwrap();
    editor
        .apply_at(EditOp::SetOthersTitle { value: "Talks".into() }, 0)
        .unwrap();
    editor
        .apply_at(EditOp::add_item(SectionKind::Others), 0)
        .unwrap();

    let exported = editor.export_json().unwrap();
    assert!(exported.contains("\n  \"contact\""));

    let before = editor.document().clone();
    let mut other = Editor::in_memory();
    other.import_json(&exported).unwrap();
    assert_eq!(other.document(), &before);
}

#[test]
fn test_refused_reset_keeps_document() {
    let mut editor = editor();
    editor
        .apply_at(EditOp::set_contact(ContactField::FullName, "Ada"), 0)
        .unwrap();

    let mut prompt = String::new();
    let reset = editor.reset(|text| {
        prompt = text.to_string();
        false
    });
    assert!(!reset);
    assert_eq!(prompt, RESET_PROMPT);
    assert_eq!(editor.document().contact.full_name, "Ada");
    assert_eq!(editor.store().writes(), 0);
}

#[test]
fn test_confirmed_reset() {
    let mut editor = editor();
    editor.import_json(&{
        let mut doc = Document::new();
        doc.experience.push(ExperienceItem::default());
        doc.to_json().unwrap()
    })
    .unwrap();

    assert!(editor.reset(|_| true));
    assert_eq!(editor.document(), &Document::new());
    assert_eq!(saved(&editor), Some(Document::new()));
    assert_eq!(editor.page_count(), 1);
}

#[test]
fn test_print_snapshot_escapes_and_scrolls_to_top() {
    let mut editor = editor();
    editor
        .apply_at(EditOp::set_contact(ContactField::FullName, "<script>alert('x')</script>"), 0)
        .unwrap();
    editor.set_scroll_top(900.0);

    let html = editor.print_snapshot();
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    assert!(!html.contains("<script>"));
    assert_eq!(html.matches(r#"<div class="page""#).count(), editor.page_count());
    assert_eq!(editor.scroll_top(), 0.0);
}

#[test]
fn test_scale_follows_available_width() {
    let mut editor = editor();
    let native = editor.config().layout.page_width;

    assert_eq!(editor.set_available_width(native * 0.5), 0.5);
    assert_eq!(editor.stack_gap(), 12.0);

    assert_eq!(editor.set_available_width(native * 2.0), 1.0);
    assert_eq!(editor.stack_gap(), 16.0);

    // relayout keeps the scale
    editor.set_available_width(600.0);
    let scale = editor.scale();
    editor
        .apply_at(EditOp::SetSummary { value: "x".into() }, 0)
        .unwrap();
    assert_eq!(editor.scale(), scale);
}

#[test]
fn test_host_oracle() {
    // one section fragment per page
    let oracle = |page: &Page| page.sections().count() <= 1 && page.item_count() <= 1;
    let mut editor = Editor::open_with_oracle(
        MemoryStore::new(),
        EditorConfig::default(),
        Box::new(oracle),
    );
    for kind in [SectionKind::Experience, SectionKind::Education, SectionKind::Awards] {
        editor.apply_at(EditOp::add_item(kind), 0).unwrap();
    }
    assert_eq!(editor.page_count(), 3);
    assert!(editor.overflowing_pages().is_empty());
}
