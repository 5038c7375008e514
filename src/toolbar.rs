use crate::composer::{ComposerEditor, HeadSpec, SurroundOptions, ordered_item_head};
use crate::locale;

const GROUPS: &[&str] = &["font_styles", "insertions", "extras"];

/// A single toolbar action: an id, the group it renders in, a title key for
/// the UI, an optional Ctrl shortcut, and the command it runs against the
/// editor.
pub struct ToolbarButton {
    pub id: &'static str,
    pub group: &'static str,
    pub title_key: &'static str,
    pub shortcut: Option<char>,
    pub perform: fn(&mut ComposerEditor),
}

/// The command registry every toolbar action dispatches through.
pub struct Toolbar {
    buttons: Vec<ToolbarButton>,
}

impl Toolbar {
    pub fn new() -> Self {
        let mut toolbar = Self { buttons: Vec::new() };
        toolbar.add_button(ToolbarButton {
            id: "bold",
            group: "font_styles",
            title_key: "bold_title",
            shortcut: Some('b'),
            perform: perform_bold,
        });
        toolbar.add_button(ToolbarButton {
            id: "italic",
            group: "font_styles",
            title_key: "italic_title",
            shortcut: Some('i'),
            perform: perform_italic,
        });
        toolbar.add_button(ToolbarButton {
            id: "code",
            group: "insertions",
            title_key: "code_format_title",
            shortcut: Some('e'),
            perform: perform_code,
        });
        toolbar.add_button(ToolbarButton {
            id: "blockquote",
            group: "insertions",
            title_key: "blockquote_title",
            shortcut: Some('r'),
            perform: perform_blockquote,
        });
        toolbar.add_button(ToolbarButton {
            id: "bullet",
            group: "extras",
            title_key: "ulist_title",
            shortcut: Some('u'),
            perform: perform_bullet_list,
        });
        toolbar.add_button(ToolbarButton {
            id: "list",
            group: "extras",
            title_key: "olist_title",
            shortcut: Some('o'),
            perform: perform_ordered_list,
        });
        toolbar
    }

    /// Registering a button outside the known groups is a programming error in
    /// toolbar setup, not recoverable user input.
    pub fn add_button(&mut self, button: ToolbarButton) {
        if !GROUPS.contains(&button.group) {
            panic!(
                "unknown toolbar group `{}` for button `{}`",
                button.group, button.id
            );
        }
        self.buttons.push(button);
    }

    pub fn buttons(&self) -> &[ToolbarButton] {
        &self.buttons
    }

    pub fn dispatch_shortcut(&self, ch: char, editor: &mut ComposerEditor) -> Option<&ToolbarButton> {
        let button = self.buttons.iter().find(|button| button.shortcut == Some(ch))?;
        (button.perform)(editor);
        Some(button)
    }

    pub fn dispatch(&self, id: &str, editor: &mut ComposerEditor) -> bool {
        let Some(button) = self.buttons.iter().find(|button| button.id == id) else {
            return false;
        };
        (button.perform)(editor);
        true
    }

    pub fn help_line(&self) -> String {
        self.buttons
            .iter()
            .filter_map(|button| {
                button.shortcut.map(|ch| {
                    format!("Ctrl-{} {}", ch.to_ascii_uppercase(), locale::t(button.title_key))
                })
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new()
    }
}

fn perform_bold(editor: &mut ComposerEditor) {
    let Some(sel) = editor.get_selected(true, false) else {
        return;
    };
    editor.apply_surround(
        &sel,
        &HeadSpec::Constant("**"),
        "**",
        "bold_text",
        SurroundOptions::default(),
    );
}

fn perform_italic(editor: &mut ComposerEditor) {
    let Some(sel) = editor.get_selected(true, false) else {
        return;
    };
    editor.apply_surround(
        &sel,
        &HeadSpec::Constant("*"),
        "*",
        "italic_text",
        SurroundOptions::default(),
    );
}

fn perform_code(editor: &mut ComposerEditor) {
    editor.format_code();
}

fn perform_blockquote(editor: &mut ComposerEditor) {
    let Some(sel) = editor.get_selected(false, false) else {
        return;
    };
    editor.apply_list(
        &sel,
        &HeadSpec::Constant("> "),
        "blockquote_text",
        SurroundOptions {
            apply_empty_lines: true,
            ..SurroundOptions::default()
        },
    );
}

fn perform_bullet_list(editor: &mut ComposerEditor) {
    let Some(sel) = editor.get_selected(false, false) else {
        return;
    };
    editor.apply_list(
        &sel,
        &HeadSpec::Constant("* "),
        "list_item",
        SurroundOptions::default(),
    );
}

fn perform_ordered_list(editor: &mut ComposerEditor) {
    let Some(sel) = editor.get_selected(false, false) else {
        return;
    };
    editor.apply_list(
        &sel,
        &HeadSpec::Generator(ordered_item_head),
        "list_item",
        SurroundOptions::default(),
    );
}

#[cfg(test)]
#[path = "toolbar_tests.rs"]
mod toolbar_tests;
