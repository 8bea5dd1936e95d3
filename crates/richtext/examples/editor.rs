use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyModifiers;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::style::Stylize;
use ratatui::text::Line;
use richtext::crossterm_input::input_event_from_crossterm;
use richtext::editor::EditorAction;
use richtext::editor::RichTextEditor;
use richtext::theme::Theme;
use std::io;
use std::time::Duration;

const SAMPLE: &str = "**richtext** editor demo

> Select text with Shift+arrows, then press Alt+b, Alt+i or Alt+u.
1. Alt+o numbers the selected lines
2. Alt+l turns them into bullets
- Alt+q quotes, Alt+p switches layout
- Tab moves focus to the preview, y copies a mouse selection

Ctrl+q quits.";

fn main() -> io::Result<()> {
    env_logger::init();

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    let mut editor = RichTextEditor::new();
    editor.set_text(SAMPLE);
    let res = run(&mut terminal, &theme, &mut editor);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    editor: &mut RichTextEditor,
) -> io::Result<()> {
    let mut status = String::from("ready");
    loop {
        let mut editor_area = ratatui::layout::Rect::default();
        terminal.draw(|f| {
            let [main, bottom] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .areas(f.area());
            editor_area = main;
            let buf = f.buffer_mut();
            editor.render_ref(main, buf, theme);
            buf.set_line(
                bottom.x,
                bottom.y,
                &Line::from(status.as_str().dark_gray()),
                bottom.width,
            );
            if let Some((x, y)) = editor.cursor_pos(main) {
                f.set_cursor_position((x, y));
            }
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let event = crossterm::event::read()?;
        if let Event::Key(key) = &event
            && key.code == KeyCode::Char('q')
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            return Ok(());
        }
        let Some(event) = input_event_from_crossterm(event) else {
            continue;
        };
        match editor.input(editor_area, event) {
            EditorAction::None => {}
            EditorAction::Changed => {
                status = format!("{} bytes", editor.text().len());
            }
            EditorAction::Submitted(text) => {
                status = format!("submitted {} lines", text.lines().count());
            }
            EditorAction::CopyRequested(text) => {
                status = format!("copy requested: {text:?}");
            }
        }
    }
}
