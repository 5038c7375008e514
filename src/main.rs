use std::{
    env, fs, io,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

mod composer;
mod locale;
mod render;
mod theme;
mod toolbar;

use composer::{Capabilities, ComposerEditor, ComposerSettings, IdentityConverter, PastePayload, PasteResponse};
use render::render_buffer;
use theme::Theme;
use toolbar::Toolbar;

const STATUS_TIMEOUT: Duration = Duration::from_secs(4);

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let path = env::args().nth(1).map(PathBuf::from);
    let (value, initial_status) = match &path {
        Some(path) => load_buffer(path)?,
        None => (String::new(), Some("New document".to_string())),
    };

    let mut app = App::new(value, path, initial_status);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;
    terminal.clear().ok();

    // The surface exists now; snapshots taken before this point are no-ops.
    app.editor.set_ready(true);
    app.editor.focus();

    let res = run_app(&mut terminal, &mut app).context("application error");

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )
    .ok();
    terminal.show_cursor().ok();

    res
}

fn load_buffer(path: &PathBuf) -> Result<(String, Option<String>)> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok((content, None))
    } else {
        Ok((String::new(), Some("New document".to_string())))
    }
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let poll_timeout = Duration::from_millis(250);

    while !app.should_quit() {
        // Deferred selection restores land once per paint, after the buffer
        // commit that queued them and before layout.
        app.editor.apply_pending_selections();

        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;

        if event::poll(poll_timeout).context("event poll failed")? {
            let evt = event::read().context("failed to read event")?;
            app.handle_event(evt)?;
        }
    }

    Ok(())
}

struct App {
    editor: ComposerEditor,
    toolbar: Toolbar,
    theme: Theme,
    file_path: Option<PathBuf>,
    should_quit: bool,
    saved_revision: u64,
    status_message: Option<(String, Instant)>,
}

impl App {
    fn new(value: String, file_path: Option<PathBuf>, initial_status: Option<String>) -> Self {
        let editor = ComposerEditor::new(value, ComposerSettings::default(), Capabilities::default());
        let saved_revision = editor.buffer_revision();
        Self {
            editor,
            toolbar: Toolbar::new(),
            theme: Theme::default(),
            file_path,
            should_quit: false,
            saved_revision,
            status_message: initial_status.map(|message| (message, Instant::now())),
        }
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn dirty(&self) -> bool {
        self.editor.buffer_revision() != self.saved_revision
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.height == 0 || area.width == 0 {
            return;
        }

        let status_height = if area.height > 1 { 2 } else { 1 };
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(status_height)])
            .split(area);
        let text_area = vertical[0];
        let status_area = vertical[1];

        let render = render_buffer(&self.editor, text_area.width.max(1) as usize, &self.theme);
        self.editor
            .resolve_scroll(render.cursor.line, render.total_lines, text_area.height as usize);
        let scroll_top = self.editor.scroll_top();

        let paragraph = Paragraph::new(Text::from(render.lines))
            .block(Block::default().borders(Borders::NONE))
            .scroll((scroll_top as u16, 0));
        frame.render_widget(paragraph, text_area);

        if render.cursor.line >= scroll_top
            && render.cursor.line < scroll_top + text_area.height as usize
            && text_area.width > 0
        {
            let cursor_y = text_area.y + (render.cursor.line - scroll_top) as u16;
            let cursor_x = text_area.x + render.cursor.column.min(text_area.width - 1);
            frame.set_cursor_position(Position::new(cursor_x, cursor_y));
        }

        let status_text = self.status_line(render.total_lines);
        let status_widget = Paragraph::new(Line::from(Span::styled(
            status_text,
            Style::default()
                .fg(self.theme.status_bar_fg)
                .bg(self.theme.status_bar_bg),
        )))
        .block(Block::default().borders(Borders::TOP));
        frame.render_widget(status_widget, status_area);
    }

    fn status_line(&mut self, total_lines: usize) -> String {
        self.prune_status_message();
        let (line, column) = self.editor.cursor_position();
        let cursor_details = format!("Ln {}, Col {}", line + 1, column + 1);
        if let Some((message, _)) = &self.status_message {
            return format!("{cursor_details} | {message}");
        }

        let marker = if self.dirty() { "*" } else { "" };
        let name = self
            .file_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "[scratch]".to_string());
        format!(
            "{cursor_details} | {name}{marker} | Lines: {total_lines} | {} | Ctrl-S save | Ctrl-Q quit",
            self.toolbar.help_line()
        )
    }

    fn prune_status_message(&mut self) {
        if let Some((_, shown_at)) = &self.status_message {
            if shown_at.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
            }
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    fn handle_event(&mut self, evt: Event) -> Result<()> {
        match evt {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Paste(data) => self.handle_paste(data),
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
            }
            KeyCode::Char('s') if ctrl => {
                self.save();
            }
            KeyCode::Char('a') if ctrl => {
                self.editor.select_all();
            }
            KeyCode::Char(ch) if ctrl => {
                let title_key = self
                    .toolbar
                    .dispatch_shortcut(ch.to_ascii_lowercase(), &mut self.editor)
                    .map(|button| button.title_key);
                if let Some(title_key) = title_key {
                    self.set_status(locale::t(title_key).to_string());
                }
            }
            KeyCode::Left => {
                self.editor.move_left(shift);
                self.editor.focus();
            }
            KeyCode::Right => {
                self.editor.move_right(shift);
                self.editor.focus();
            }
            KeyCode::Up => {
                self.editor.move_up(shift);
                self.editor.focus();
            }
            KeyCode::Down => {
                self.editor.move_down(shift);
                self.editor.focus();
            }
            KeyCode::Home => {
                self.editor.move_line_start(shift);
                self.editor.focus();
            }
            KeyCode::End => {
                self.editor.move_line_end(shift);
                self.editor.focus();
            }
            KeyCode::Backspace => {
                self.editor.backspace();
                self.editor.focus();
            }
            KeyCode::Delete => {
                self.editor.delete_forward();
                self.editor.focus();
            }
            KeyCode::Enter => {
                self.editor.insert_char('\n');
                self.editor.focus();
            }
            KeyCode::Char(ch) => {
                self.editor.insert_char(ch);
                self.editor.focus();
            }
            _ => {}
        }
    }

    fn handle_paste(&mut self, data: String) {
        let data = data.replace("\r\n", "\n").replace('\r', "\n");
        let payload = PastePayload {
            plain_text: Some(data.clone()),
            html: None,
            can_paste_html: false,
            can_upload: false,
        };
        match self.editor.paste(&payload, &IdentityConverter) {
            PasteResponse::Handled => {}
            PasteResponse::DelegateUpload => {
                self.set_status("Clipboard attachments are not supported here");
            }
            PasteResponse::Default => {
                self.editor.insert_str(&data);
            }
        }
        self.editor.focus();
    }

    fn save(&mut self) {
        let Some(path) = &self.file_path else {
            self.set_status("No file path; start as: quill <file.md>");
            return;
        };
        match fs::write(path, self.editor.value()) {
            Ok(()) => {
                self.saved_revision = self.editor.buffer_revision();
                self.set_status(format!("Saved {}", path.display()));
            }
            Err(err) => {
                self.set_status(format!("Save failed: {err}"));
            }
        }
    }
}
