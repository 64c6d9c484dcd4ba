use std::{io, thread, time::Duration};

use anyhow::{anyhow, Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::debug;

use st_core::{Console, Menu, MenuAction, TextStyle};

const TICK_RATE: Duration = Duration::from_millis(250);
const TRANSCRIPT_CAPACITY: usize = 200;
const MENU_MAX_HEIGHT: u16 = 12;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    success: Color,
    warning: Color,
    danger: Color,
    selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Magenta,
            muted: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            selection_bg: Color::DarkGray,
        }
    }
}

fn style_color(theme: &Theme, style: TextStyle) -> Color {
    match style {
        TextStyle::Info => theme.primary_fg,
        TextStyle::Accent => theme.accent,
        TextStyle::Muted => theme.muted,
        TextStyle::Success => theme.success,
        TextStyle::Warning => theme.warning,
        TextStyle::Error => theme.danger,
    }
}

enum AppEvent {
    Input(Event),
    Tick,
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

/// Terminal implementation of the game's console capabilities.
///
/// Output lines accumulate in a bounded transcript; menus render as a
/// highlighted list below it, and the exit confirmation as a centered modal.
pub struct TerminalConsole {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    events: mpsc::Receiver<AppEvent>,
    theme: Theme,
    transcript: Vec<(TextStyle, String)>,
    restored: bool,
}

impl TerminalConsole {
    pub fn new() -> Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        Ok(Self {
            terminal,
            events: event_rx,
            theme: Theme::default(),
            transcript: Vec::new(),
            restored: false,
        })
    }

    /// Leave the alternate screen and give the terminal back to the shell.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        disable_raw_mode().context("failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("failed to leave alternate screen")?;
        self.terminal.show_cursor()?;
        self.restored = true;
        Ok(())
    }

    async fn next_key(&mut self) -> Result<Option<KeyEvent>> {
        match self.events.recv().await {
            None => Err(anyhow!("input channel closed")),
            Some(AppEvent::Input(Event::Key(key))) => Ok(Some(key)),
            Some(AppEvent::Input(_)) | Some(AppEvent::Tick) => Ok(None),
        }
    }

    fn draw_transcript(&mut self) -> Result<()> {
        let Self {
            terminal,
            theme,
            transcript,
            ..
        } = self;
        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(4),
                    Constraint::Length(3),
                ])
                .split(frame.size());
            render_title(theme, frame, chunks[0]);
            render_transcript(theme, transcript, frame, chunks[1]);
            render_help(frame, chunks[2], "");
        })?;
        Ok(())
    }

    fn draw_menu(&mut self, menu: &Menu, cursor: usize) -> Result<()> {
        let Self {
            terminal,
            theme,
            transcript,
            ..
        } = self;
        let menu_height = (menu.entries.len() as u16)
            .saturating_add(2)
            .min(MENU_MAX_HEIGHT);
        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(4),
                    Constraint::Length(menu_height),
                    Constraint::Length(3),
                ])
                .split(frame.size());
            render_title(theme, frame, chunks[0]);
            render_transcript(theme, transcript, frame, chunks[1]);
            render_menu(theme, frame, chunks[2], menu, cursor);
            render_help(frame, chunks[3], "j/k or arrows to move   Enter to select");
        })?;
        Ok(())
    }

    fn draw_confirm(&mut self, prompt: &str) -> Result<()> {
        let Self {
            terminal,
            theme,
            transcript,
            ..
        } = self;
        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(4),
                    Constraint::Length(3),
                ])
                .split(frame.size());
            render_title(theme, frame, chunks[0]);
            render_transcript(theme, transcript, frame, chunks[1]);
            render_help(frame, chunks[2], "y = yes   n = no");

            let area = centered_rect(46, 5, frame.size());
            frame.render_widget(Clear, area);
            let body = vec![
                Line::from(prompt.to_string()),
                Line::from(""),
                Line::from(Span::styled(
                    "y = yes   n = no",
                    Style::default().fg(theme.muted),
                )),
            ];
            let modal = Paragraph::new(body)
                .block(Block::default().borders(Borders::ALL).title("Confirm"))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(modal, area);
        })?;
        Ok(())
    }
}

impl Console for TerminalConsole {
    fn line(&mut self, style: TextStyle, text: &str) -> Result<()> {
        self.transcript.push((style, text.to_string()));
        if self.transcript.len() > TRANSCRIPT_CAPACITY {
            let overflow = self.transcript.len() - TRANSCRIPT_CAPACITY;
            self.transcript.drain(..overflow);
        }
        self.draw_transcript()
    }

    async fn choose(&mut self, menu: &Menu) -> Result<MenuAction> {
        let mut cursor = 0usize;
        loop {
            self.draw_menu(menu, cursor)?;
            let Some(key) = self.next_key().await? else {
                continue;
            };
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Err(anyhow!("interrupted"));
            }
            match key.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    if cursor + 1 < menu.entries.len() {
                        cursor += 1;
                    }
                }
                KeyCode::Char('k') | KeyCode::Up => cursor = cursor.saturating_sub(1),
                KeyCode::Home => cursor = 0,
                KeyCode::End => cursor = menu.entries.len().saturating_sub(1),
                KeyCode::Enter => {
                    let entry = &menu.entries[cursor];
                    debug!(label = %entry.label, "Menu selection");
                    return Ok(entry.action.clone());
                }
                _ => {}
            }
        }
    }

    async fn confirm(&mut self, prompt: &str) -> Result<bool> {
        loop {
            self.draw_confirm(prompt)?;
            let Some(key) = self.next_key().await? else {
                continue;
            };
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Err(anyhow!("interrupted"));
            }
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                _ => {}
            }
        }
    }

    async fn pause(&mut self, delay: Duration) {
        tokio::time::sleep(delay).await;
        // Keystrokes made during the pause must not leak into the next menu.
        while self.events.try_recv().is_ok() {}
    }
}

/// The opening banner and story, shown once before the first turn.
pub fn print_intro<C: Console>(console: &mut C, starting_credits: u32) -> Result<()> {
    console.line(TextStyle::Success, "Space Transport")?;
    console.line(
        TextStyle::Info,
        &format!("version {}", env!("CARGO_PKG_VERSION")),
    )?;
    console.line(TextStyle::Info, "")?;
    console.line(TextStyle::Muted, "-----------------------")?;
    console.line(TextStyle::Info, "")?;
    console.line(
        TextStyle::Info,
        "You just started a small space transport company called, creatively, \
         Space Transport, Inc..",
    )?;
    console.line(
        TextStyle::Info,
        &format!(
            "A bank has loaned you {starting_credits} credits toward buying your first \
             space transport (ST)."
        ),
    )?;
    console.line(TextStyle::Info, "")?;
    console.line(
        TextStyle::Info,
        "Unfortunately, this is only enough to buy an ancient, rickety ST.",
    )?;
    console.line(TextStyle::Info, "")?;
    console.line(TextStyle::Info, "Better than nothing, I suppose!")?;
    Ok(())
}

fn render_title(theme: &Theme, frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "SPACE TRANSPORT",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn render_transcript(
    theme: &Theme,
    transcript: &[(TextStyle, String)],
    frame: &mut Frame,
    area: Rect,
) {
    let height = area.height.saturating_sub(2) as usize;
    let start = transcript.len().saturating_sub(height);
    let lines: Vec<Line> = transcript[start..]
        .iter()
        .map(|(style, text)| {
            Line::from(Span::styled(
                text.clone(),
                Style::default().fg(style_color(theme, *style)),
            ))
        })
        .collect();
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_menu(theme: &Theme, frame: &mut Frame, area: Rect, menu: &Menu, cursor: usize) {
    let items: Vec<ListItem> = menu
        .entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let marker = if idx == cursor {
                Span::styled(
                    "▶ ",
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw("  ")
            };
            ListItem::new(Line::from(vec![
                marker,
                Span::styled(
                    entry.label.clone(),
                    Style::default().fg(theme.primary_fg),
                ),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(cursor.min(menu.entries.len().saturating_sub(1))));
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(menu.prompt.clone()),
        )
        .highlight_style(Style::default().bg(theme.selection_bg));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_help(frame: &mut Frame, area: Rect, text: &str) {
    let paragraph = Paragraph::new(Line::from(text.to_string()))
        .block(Block::default().borders(Borders::ALL).title("Keys"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
