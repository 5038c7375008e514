use super::head::HeadSpec;
use super::*;

fn editor_with(value: &str, start: usize, end: usize) -> ComposerEditor {
    let mut editor = ComposerEditor::new(
        value.to_string(),
        ComposerSettings::default(),
        Capabilities::default(),
    );
    editor.set_ready(true);
    editor.set_selection(start, end);
    editor
}

fn selected_text(editor: &ComposerEditor) -> &str {
    let sel = editor.selection();
    char_slice(editor.value(), sel.start, sel.end)
}

fn apply_bold(editor: &mut ComposerEditor) {
    let sel = editor.get_selected(true, false).unwrap();
    editor.apply_surround(
        &sel,
        &HeadSpec::Constant("**"),
        "**",
        "bold_text",
        SurroundOptions::default(),
    );
}

#[test]
fn readiness_and_focus_are_host_controlled() {
    let mut editor = ComposerEditor::new(
        "text".to_string(),
        ComposerSettings::default(),
        Capabilities::default(),
    );
    assert!(!editor.is_ready());
    editor.set_ready(true);
    assert!(editor.is_ready());
    editor.focus();
    assert!(editor.is_focused());
    editor.blur();
    assert!(!editor.is_focused());
}

#[test]
fn snapshots_require_a_mounted_surface() {
    let editor = ComposerEditor::new(
        "text".to_string(),
        ComposerSettings::default(),
        Capabilities::default(),
    );
    assert!(editor.get_selected(false, false).is_none());
}

#[test]
fn snapshots_trim_trailing_whitespace_from_the_selection() {
    let editor = editor_with("word  ", 0, 6);
    let sel = editor.get_selected(false, false).unwrap();
    assert_eq!(sel.value, "word");
    assert_eq!(sel.end, 4);
    assert_eq!(sel.post, "  ");
}

#[test]
fn snapshots_trim_leading_whitespace_only_on_request() {
    let editor = editor_with("  word", 0, 6);
    let plain = editor.get_selected(false, false).unwrap();
    assert_eq!(plain.value, "  word");
    let trimmed = editor.get_selected(true, false).unwrap();
    assert_eq!(trimmed.value, "word");
    assert_eq!(trimmed.start, 2);
}

#[test]
fn snapshots_carry_the_line_containing_the_start() {
    let editor = editor_with("one\ntwo three\nfour", 8, 8);
    let sel = editor.get_selected(false, true).unwrap();
    assert_eq!(sel.line_val.as_deref(), Some("two three"));
}

#[test]
fn capture_rejects_malformed_bounds() {
    assert!(snapshot::capture("abc", 2, 1, false, false).is_none());
    assert!(snapshot::capture("abc", 0, 9, false, false).is_none());
}

#[test]
fn empty_selection_bold_inserts_the_localized_placeholder() {
    let mut editor = editor_with("intro ", 6, 6);
    apply_bold(&mut editor);
    assert_eq!(editor.value(), "intro **strong text**");

    // The restore is deferred; nothing moves until the paint tick.
    assert_eq!(editor.selection(), SelectionRange::new(6, 6));
    editor.apply_pending_selections();
    assert_eq!(editor.selection(), SelectionRange::new(8, 19));
    assert_eq!(selected_text(&editor), "strong text");
}

#[test]
fn bold_toggle_is_idempotent_through_the_session() {
    let mut editor = editor_with("some words", 5, 10);
    apply_bold(&mut editor);
    editor.apply_pending_selections();
    assert_eq!(editor.value(), "some **words**");
    assert_eq!(selected_text(&editor), "words");

    apply_bold(&mut editor);
    editor.apply_pending_selections();
    assert_eq!(editor.value(), "some words");
    assert_eq!(editor.selection(), SelectionRange::new(5, 10));
}

#[test]
fn restores_clamp_to_the_committed_buffer() {
    let mut editor = editor_with("ab", 0, 0);
    editor.select_text(1, 99, SelectOptions::default());
    editor.apply_pending_selections();
    assert_eq!(editor.selection(), SelectionRange::new(1, 2));
}

#[test]
fn restores_preserve_the_scroll_offset() {
    let mut editor = editor_with(&"x\n".repeat(100), 0, 0);
    editor.focus();
    editor.resolve_scroll(50, 100, 10);
    assert_eq!(editor.scroll_top(), 41);

    editor.select_text(0, 4, SelectOptions::default());
    editor.apply_pending_selections();
    assert_eq!(editor.scroll_top(), 41);
    assert_eq!(editor.selection(), SelectionRange::new(0, 4));

    // The focus raised during the restore must not jump the viewport on the
    // next layout pass either.
    editor.resolve_scroll(0, 100, 10);
    assert_eq!(editor.scroll_top(), 41);
}

#[test]
fn restores_skip_focusing_when_the_platform_jumps() {
    let mut editor = ComposerEditor::new(
        "text".to_string(),
        ComposerSettings::default(),
        Capabilities {
            focus_jumps_viewport: true,
            force_focus_on_restore: false,
        },
    );
    editor.set_ready(true);
    editor.select_text(0, 4, SelectOptions::default());
    editor.apply_pending_selections();
    assert!(!editor.is_focused());
}

#[test]
fn the_focus_guard_can_be_overridden() {
    let mut editor = ComposerEditor::new(
        "text".to_string(),
        ComposerSettings::default(),
        Capabilities {
            focus_jumps_viewport: true,
            force_focus_on_restore: true,
        },
    );
    editor.set_ready(true);
    editor.select_text(0, 4, SelectOptions::default());
    editor.apply_pending_selections();
    assert!(editor.is_focused());
}

#[test]
fn set_value_clamps_the_live_selection() {
    let mut editor = editor_with("a long buffer", 7, 13);
    editor.set_value("ab".to_string());
    assert_eq!(editor.selection(), SelectionRange::new(2, 2));
}

#[test]
fn replace_text_shifts_a_selection_behind_the_needle() {
    let mut editor = editor_with("hello world", 6, 11);
    assert!(editor.replace_text("hello", "hi", ReplaceOptions { force_focus: true }));
    editor.apply_pending_selections();
    assert_eq!(editor.value(), "hi world");
    assert_eq!(editor.selection(), SelectionRange::new(3, 8));
    assert_eq!(selected_text(&editor), "world");
}

#[test]
fn replace_text_collapses_a_selection_inside_the_needle() {
    let mut editor = editor_with("abcdef", 2, 3);
    assert!(editor.replace_text("bcd", "XY", ReplaceOptions { force_focus: true }));
    editor.apply_pending_selections();
    assert_eq!(editor.value(), "aXYef");
    assert_eq!(editor.selection(), SelectionRange::new(3, 3));
}

#[test]
fn replace_text_without_focus_leaves_no_pending_restore() {
    let mut editor = editor_with("hello world", 0, 0);
    assert!(editor.replace_text("world", "there", ReplaceOptions::default()));
    editor.apply_pending_selections();
    assert_eq!(editor.value(), "hello there");
    assert_eq!(editor.selection(), SelectionRange::new(0, 0));
}

#[test]
fn replace_text_reports_a_missing_needle() {
    let mut editor = editor_with("hello", 0, 0);
    assert!(!editor.replace_text("absent", "x", ReplaceOptions::default()));
    assert_eq!(editor.value(), "hello");
}

#[test]
fn typing_replaces_the_selection() {
    let mut editor = editor_with("hello world", 0, 5);
    editor.insert_str("goodbye");
    assert_eq!(editor.value(), "goodbye world");
    assert_eq!(editor.selection(), SelectionRange::new(7, 7));
}

#[test]
fn backspace_and_delete_are_selection_aware() {
    let mut editor = editor_with("abc", 1, 1);
    editor.backspace();
    assert_eq!(editor.value(), "bc");

    let mut editor = editor_with("abc", 0, 2);
    editor.backspace();
    assert_eq!(editor.value(), "c");

    let mut editor = editor_with("abc", 0, 0);
    editor.delete_forward();
    assert_eq!(editor.value(), "bc");
}

#[test]
fn edits_are_ignored_before_the_surface_is_ready() {
    let mut editor = ComposerEditor::new(
        "abc".to_string(),
        ComposerSettings::default(),
        Capabilities::default(),
    );
    editor.insert_str("x");
    editor.backspace();
    assert_eq!(editor.value(), "abc");
}

#[test]
fn caret_motion_follows_logical_lines() {
    let mut editor = editor_with("one\ntwo three", 2, 2);
    editor.move_down(false);
    assert_eq!(editor.cursor_position(), (1, 2));
    editor.move_line_end(false);
    assert_eq!(editor.cursor_position(), (1, 9));
    editor.move_up(false);
    assert_eq!(editor.cursor_position(), (0, 3));
    editor.move_line_start(false);
    assert_eq!(editor.cursor_position(), (0, 0));
}

#[test]
fn shift_motion_extends_the_selection() {
    let mut editor = editor_with("words", 0, 0);
    editor.move_right(true);
    editor.move_right(true);
    assert_eq!(editor.selection(), SelectionRange::new(0, 2));
    editor.move_left(false);
    assert!(editor.selection().is_empty());
}

#[test]
fn buffer_commits_notify_observers() {
    let mut editor = editor_with("", 0, 0);
    let before = editor.revision();
    editor.insert_str("x");
    assert!(editor.revision() > before);

    let before = editor.revision();
    editor.select_text(0, 1, SelectOptions::default());
    editor.apply_pending_selections();
    assert!(editor.revision() > before);
}

#[test]
fn format_code_wraps_an_inline_selection_in_backticks() {
    let mut editor = editor_with("run code now", 4, 8);
    editor.format_code();
    editor.apply_pending_selections();
    assert_eq!(editor.value(), "run `code` now");
    assert_eq!(selected_text(&editor), "code");
}

#[test]
fn format_code_round_trips_an_inline_span() {
    let mut editor = editor_with("run code now", 4, 8);
    editor.format_code();
    editor.apply_pending_selections();
    editor.format_code();
    editor.apply_pending_selections();
    assert_eq!(editor.value(), "run code now");
    assert_eq!(editor.selection(), SelectionRange::new(4, 8));
}

#[test]
fn format_code_on_a_blank_line_inserts_a_fenced_placeholder() {
    let mut editor = editor_with("", 0, 0);
    editor.format_code();
    editor.apply_pending_selections();
    assert_eq!(editor.value(), "```\npaste code here\n```");
    assert_eq!(selected_text(&editor), "paste code here");
}

#[test]
fn format_code_honors_the_four_space_style() {
    let mut editor = ComposerEditor::new(
        String::new(),
        ComposerSettings {
            code_formatting_style: CodeFormattingStyle::FourSpacesIndent,
            ..ComposerSettings::default()
        },
        Capabilities::default(),
    );
    editor.set_ready(true);
    editor.format_code();
    editor.apply_pending_selections();
    assert_eq!(editor.value(), "    enter code here");
    assert_eq!(selected_text(&editor), "enter code here");
}

#[test]
fn format_code_fences_a_multiline_selection() {
    let mut editor = editor_with("let x\nlet y", 0, 11);
    editor.format_code();
    editor.apply_pending_selections();
    assert_eq!(editor.value(), "```\nlet x\nlet y\n```\n");
    assert!(editor.selection().is_empty());
}

#[test]
fn format_code_indents_a_multiline_selection_per_line() {
    let mut editor = ComposerEditor::new(
        "a\nb".to_string(),
        ComposerSettings {
            code_formatting_style: CodeFormattingStyle::FourSpacesIndent,
            ..ComposerSettings::default()
        },
        Capabilities::default(),
    );
    editor.set_ready(true);
    editor.set_selection(0, 3);
    editor.format_code();
    editor.apply_pending_selections();
    assert_eq!(editor.value(), "    a\n    b");
}

#[test]
fn add_text_collapses_the_caret_after_the_insertion() {
    let mut editor = editor_with("start end", 6, 9);
    let sel = editor.get_selected(false, false).unwrap();
    editor.add_text(&sel, "middle");
    editor.apply_pending_selections();
    assert_eq!(editor.value(), "start middle");
    assert_eq!(editor.selection(), SelectionRange::new(12, 12));
}
