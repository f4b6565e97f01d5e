//! End-to-end undo/redo behaviour of the editor.

use kurbo::Point;
use overlaid_core::{BaseImage, Editor, EditorConfig, Snapshot, read_image};

const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Apply `n` assorted mutating intents.
fn mutate(editor: &mut Editor, n: usize) {
    for step in 0..n {
        match step % 5 {
            0 => {
                editor.add_text();
            }
            1 => {
                let id = *editor.surface().ids().last().unwrap();
                editor.edit_text(id, format!("step {step}"));
            }
            2 => {
                let id = *editor.surface().ids().last().unwrap();
                editor.select_overlay(id);
                editor.toggle_bold();
            }
            3 => {
                let id = *editor.surface().ids().last().unwrap();
                editor.drag_start(id);
                editor.drag_end(id, Point::new(step as f64 * 10.0, 7.0));
            }
            _ => {
                editor.load_image(BaseImage::from_bytes(PNG).unwrap());
            }
        }
    }
}

#[test]
fn test_n_intents_then_n_undos_restore_start() {
    for n in [1, 2, 5, 9] {
        let mut editor = Editor::new();
        let start = editor.export_surface();
        mutate(&mut editor, n);
        assert_eq!(editor.history().undo_depth(), n);

        for _ in 0..n {
            assert!(editor.undo());
        }
        assert_eq!(editor.export_surface(), start);
        assert!(!editor.can_undo());
        assert!(!editor.undo());
    }
}

#[test]
fn test_redo_is_inverse_of_undo() {
    let mut editor = Editor::new();
    mutate(&mut editor, 7);

    for _ in 0..3 {
        let before = editor.export_surface();
        assert!(editor.undo());
        assert_ne!(editor.export_surface(), before);
        assert!(editor.redo());
        assert_eq!(editor.export_surface(), before);
        editor.undo();
    }
}

#[test]
fn test_new_intent_after_undo_clears_redo() {
    let mut editor = Editor::new();
    mutate(&mut editor, 4);
    editor.undo();
    editor.undo();
    assert!(editor.can_redo());

    editor.add_text();
    assert!(!editor.can_redo());
    assert!(!editor.signals().redo_available);
    assert!(!editor.redo());
}

#[test]
fn test_selecting_other_overlay_keeps_single_highlight() {
    let mut editor = Editor::new();
    let a = editor.add_text();
    let b = editor.add_text();

    editor.select_overlay(a);
    editor.select_overlay(b);

    let highlighted: Vec<_> = editor
        .surface()
        .overlays()
        .filter(|o| o.is_highlighted())
        .map(|o| o.id())
        .collect();
    assert_eq!(highlighted, vec![b]);
    assert!(editor.signals().delete_affordance_visible);
}

#[test]
fn test_undo_delete_restores_overlay_and_interactivity() {
    let mut editor = Editor::new();
    let id = editor.add_text();
    editor.edit_text(id, "keep me");
    editor.select_overlay(id);
    editor.set_font("Courier New");
    editor.drag_start(id);
    editor.drag_end(id, Point::new(33.0, 44.0));
    let before_delete = editor.surface().overlay(id).unwrap().clone();

    editor.select_overlay(id);
    assert!(editor.delete_selected());
    assert!(!editor.surface().contains(id));
    assert!(!editor.signals().delete_affordance_visible);

    assert!(editor.undo());
    let restored = editor.surface().overlay(id).unwrap();
    assert_eq!(restored.position, before_delete.position);
    assert_eq!(restored.style, before_delete.style);
    assert_eq!(restored.content, "keep me");
    assert!(restored.is_interactive());

    assert!(editor.drag_start(id));
    assert!(editor.drag_end(id, Point::new(1.0, 2.0)));
    assert!(editor.select_overlay(id));
}

#[test]
fn test_bold_then_drag_scenario() {
    let mut editor = Editor::new();
    let t1 = editor.add_text();
    let original_position = editor.surface().overlay(t1).unwrap().position;
    let commit1 = editor.export_surface();

    editor.select_overlay(t1);
    editor.toggle_bold();
    let commit2 = editor.export_surface();
    assert!(editor.surface().overlay(t1).unwrap().style.bold);

    editor.drag_start(t1);
    editor.drag_end(t1, Point::new(120.0, 80.0));
    assert_eq!(editor.history().undo_depth(), 3);

    editor.undo();
    assert_eq!(editor.export_surface(), commit2);
    let overlay = editor.surface().overlay(t1).unwrap();
    assert!(overlay.style.bold);
    assert_eq!(overlay.position, original_position);

    editor.undo();
    assert_eq!(editor.export_surface(), commit1);
    assert!(!editor.surface().overlay(t1).unwrap().style.bold);

    editor.redo();
    assert_eq!(editor.export_surface(), commit2);
}

#[test]
fn test_upload_then_text_undo_twice_is_empty() {
    let mut editor = Editor::new();
    editor.load_image(BaseImage::from_bytes(PNG).unwrap());
    editor.add_text();

    editor.undo();
    editor.undo();
    assert!(editor.surface().is_empty());
    assert_eq!(editor.export_surface(), Snapshot::default());
    assert!(!editor.can_undo());
}

#[test]
fn test_late_image_load_is_next_history_entry() {
    let mut editor = Editor::new();
    let pending = read_image(async { Ok::<_, String>(PNG.to_vec()) });

    // Edits made while the read is in flight commit on their own.
    let id = editor.add_text();
    editor.edit_text(id, "while loading");
    assert_eq!(editor.history().undo_depth(), 2);

    let image = pollster::block_on(pending).unwrap();
    editor.load_image(image);
    assert_eq!(editor.history().undo_depth(), 3);

    editor.undo();
    assert!(editor.surface().image.is_none());
    assert_eq!(editor.surface().overlay(id).unwrap().content, "while loading");
}

#[test]
fn test_bounded_history_unwinds_to_oldest_retained_state() {
    let config = EditorConfig {
        history_limit: Some(3),
        ..EditorConfig::default()
    };
    let mut editor = Editor::with_config(config);
    for _ in 0..5 {
        editor.add_text();
    }

    let mut undos = 0;
    while editor.undo() {
        undos += 1;
    }
    assert_eq!(undos, 3);
    assert_eq!(editor.surface().len(), 2);
}
