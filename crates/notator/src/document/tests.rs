use super::{content_hash, DocumentStore, Tab};
use crate::editor::EditableText;
use crate::error::NoteError;
use std::fs;
use tempfile::TempDir;

fn store(dir: &TempDir) -> DocumentStore {
    DocumentStore::new(dir.path(), "txt")
}

#[test]
fn open_missing_file_gives_empty_buffer() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("ny.txt");

    let tab = store(&dir).open(1, &path).expect("open missing");

    assert!(tab.editor.is_empty());
    assert!(!tab.dirty);
    assert_eq!(tab.title, "ny");
    assert_eq!(tab.path.as_deref(), Some(path.as_path()));
}

#[test]
fn open_rejects_invalid_utf8() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("binary.txt");
    fs::write(&path, [0xff, 0xfe, 0x00]).expect("write bytes");

    let err = store(&dir).open(1, &path).err().expect("encoding error");

    assert!(matches!(err, NoteError::Encoding { .. }));
}

#[test]
fn save_without_path_needs_path_and_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let mut tab = Tab::untitled(1, "Note");
    tab.editor.set_text("kladde");
    tab.mark_dirty();

    let err = store(&dir).save(&mut tab).err().expect("needs path");

    assert!(matches!(err, NoteError::NeedsPath));
    assert!(tab.dirty);
    assert_eq!(fs::read_dir(dir.path()).expect("read dir").count(), 0);
}

#[test]
fn save_clears_dirty_and_updates_hash() {
    let dir = TempDir::new().expect("temp dir");
    let store = store(&dir);
    let path = dir.path().join("a.txt");
    let mut tab = store.open(1, &path).expect("open");
    tab.editor.set_text("første linje");
    tab.mark_dirty();
    tab.mark_dirty();

    store.save(&mut tab).expect("save");

    assert!(!tab.dirty);
    assert_eq!(tab.last_saved_hash, content_hash("første linje"));
    assert_eq!(fs::read_to_string(&path).expect("read"), "første linje");
    assert!(!dir.path().join("a.txt.tmp").exists());
}

#[test]
fn unsaved_changes_ignore_edits_that_restore_saved_text() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("a.txt");
    fs::write(&path, "same").expect("write");
    let mut tab = store(&dir).open(1, &path).expect("open");

    tab.editor.set_text("same");
    tab.mark_dirty();
    assert!(!tab.has_unsaved_changes());

    tab.editor.set_text("other");
    assert!(tab.has_unsaved_changes());
}

#[test]
fn save_as_adds_extension_and_retitles() {
    let dir = TempDir::new().expect("temp dir");
    let store = store(&dir);
    let mut tab = Tab::untitled(3, "Note 1200-0101");
    tab.editor.set_text("indhold");
    tab.mark_dirty();

    let path = store.save_as(&mut tab, "dagbog").expect("save as");

    assert_eq!(path, dir.path().join("dagbog.txt"));
    assert_eq!(tab.title, "dagbog");
    assert!(!tab.dirty);
    assert_eq!(fs::read_to_string(path).expect("read"), "indhold");
}

#[test]
fn resolve_name_rejects_paths_outside_notes_dir() {
    let dir = TempDir::new().expect("temp dir");
    let store = store(&dir);

    for name in ["", "  ", "../x", "sub/x", "a\\b", "."] {
        assert!(
            matches!(store.resolve_name(name), Err(NoteError::InvalidName(_))),
            "{name:?} should be rejected"
        );
    }
    assert_eq!(
        store.resolve_name("noter.md").expect("explicit extension"),
        dir.path().join("noter.md")
    );
}

#[test]
fn list_strips_extension_and_sorts() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("b.txt"), "").expect("write");
    fs::write(dir.path().join("a.txt"), "").expect("write");
    fs::write(dir.path().join("session.toml"), "").expect("write");
    fs::create_dir(dir.path().join("dir.txt")).expect("mkdir");

    let names: Vec<String> = store(&dir).list().into_iter().map(|doc| doc.name).collect();

    assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn list_skips_reserved_files() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("quotes.txt"), "citat").expect("write");
    fs::write(dir.path().join("note.txt"), "").expect("write");

    let names: Vec<String> = store(&dir)
        .reserve(dir.path().join("quotes.txt"))
        .list()
        .into_iter()
        .map(|doc| doc.name)
        .collect();

    assert_eq!(names, vec!["note".to_string()]);
}

#[test]
fn delete_missing_file_is_not_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("væk.txt");
    fs::write(&path, "x").expect("write");
    let store = store(&dir);

    store.delete(&path).expect("delete");
    store.delete(&path).expect("delete again");

    assert!(!path.exists());
}
