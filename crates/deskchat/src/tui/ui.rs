//! TUI rendering using ratatui.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::app::{App, Sender};
use super::input::PLACEHOLDER;

const PROMPT: &str = "> ";

/// Most rows the command popup shows before scrolling.
const POPUP_ROWS: u16 = 8;

/// Draw the TUI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Chat window
            Constraint::Length(1), // Context status
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_messages(frame, app, chunks[1]);
    draw_status(frame, app, chunks[2]);
    draw_input(frame, app, chunks[3]);
    draw_footer(frame, app, chunks[4]);

    if app.input.show_attachments() {
        draw_attachments(frame, app, chunks[1]);
    }
    if app.input.selector().is_visible() {
        let height = app
            .input
            .selector()
            .popup_height(POPUP_ROWS)
            .min(chunks[1].height);
        let popup = popup_above(chunks[3], height);
        app.input.selector_mut().render(frame, popup);
    }
}

/// Rect of `height` rows sitting directly on top of `anchor`.
fn popup_above(anchor: Rect, height: u16) -> Rect {
    Rect {
        x: anchor.x,
        y: anchor.y.saturating_sub(height),
        width: anchor.width,
        height: height.min(anchor.y),
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(" Deskchat - {} ", app.workspace)).style(
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(header, area);
}

/// Draw the scrollable chat window.
fn draw_messages(frame: &mut Frame, app: &App, area: Rect) {
    let inner_height = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = app
        .messages
        .iter()
        .flat_map(|msg| {
            let (label, style) = match msg.sender {
                Sender::User => ("you", Style::default().fg(Color::Cyan)),
                Sender::Bot => ("bot", Style::default().fg(Color::Green)),
                Sender::System => ("", Style::default().fg(Color::Yellow)),
            };
            let time = msg.timestamp.format("%H:%M").to_string();
            msg.content
                .lines()
                .enumerate()
                .map(move |(i, text)| {
                    let prefix = if i > 0 {
                        "        ".to_string()
                    } else if label.is_empty() {
                        format!("[{}] ", time)
                    } else {
                        format!("[{}] {}: ", time, label)
                    };
                    Line::from(vec![
                        Span::styled(prefix, Style::default().fg(Color::DarkGray)),
                        Span::styled(text.to_string(), style),
                    ])
                })
                .collect::<Vec<_>>()
        })
        .collect();

    let end = lines.len().saturating_sub(app.scroll_offset);
    let start = end.saturating_sub(inner_height);
    let items: Vec<ListItem> = lines[start..end].iter().cloned().map(ListItem::new).collect();

    let title = if app.scroll_offset > 0 {
        format!(" Chat [scroll: {}] ", app.scroll_offset)
    } else {
        " Chat ".to_string()
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

/// Current file, include toggle and attachment count.
fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let input = &app.input;
    let toggle = if input.include_current_file() { "[x]" } else { "[ ]" };
    let text = format!(
        " {} file: {} | attached: {} ",
        toggle,
        input.current_file().unwrap_or("none"),
        input.attached_files().len()
    );
    let status = Paragraph::new(text).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status, area);
}

/// The part of `text` that fits in `width` columns with the cursor on
/// screen, and the cursor column inside that part.
///
/// Columns are display widths, so wide chars take two cells.
fn visible_input(text: &str, cursor: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let char_width = |c: char| c.width().unwrap_or(0);

    // Keep one cell free for the cursor itself.
    let mut start = cursor;
    let mut before = 0;
    while start > 0 {
        let w = char_width(chars[start - 1]);
        if before + w > width - 1 {
            break;
        }
        before += w;
        start -= 1;
    }

    let mut used = 0;
    let visible = chars[start..]
        .iter()
        .take_while(|c| {
            used += char_width(**c);
            used <= width
        })
        .collect();
    (visible, before)
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let field = app.input.field();
    let prompt_width = PROMPT.width() as u16;
    let room = area.width.saturating_sub(2).saturating_sub(prompt_width);
    let (visible, cursor_col) = visible_input(field.text(), field.cursor(), room as usize);

    let line = if field.is_empty() {
        Line::from(vec![
            Span::raw(PROMPT),
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(format!("{}{}", PROMPT, visible))
    };

    let mut block = Block::default().borders(Borders::ALL).title(" Input ");
    if let Some(hint) = app.input.hint() {
        block = block.title_bottom(Line::styled(
            format!(" {} ", hint),
            Style::default().fg(Color::Red),
        ));
    }
    frame.render_widget(Paragraph::new(line).block(block), area);

    let cursor_x = area
        .x
        .saturating_add(1)
        .saturating_add(prompt_width)
        .saturating_add(cursor_col as u16)
        .min(area.right().saturating_sub(2));
    frame.set_cursor_position((cursor_x, area.y.saturating_add(1)));
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let keys = if app.input.selector().is_visible() {
        "Up/Down: select | Enter/Tab: complete | Esc: close"
    } else {
        "Enter: send | /: commands | F2: attached | F3: toggle file | Ctrl+C: quit"
    };
    let footer = Paragraph::new(format!(" {} ", keys))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(footer, area);
}

/// Popup listing attached files in the bottom-right of the chat window.
fn draw_attachments(frame: &mut Frame, app: &App, area: Rect) {
    let files = app.input.attached_files();
    let items: Vec<ListItem> = if files.is_empty() {
        vec![ListItem::new(Span::styled(
            "No attached files.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        files.iter().map(|f| ListItem::new(f.as_str())).collect()
    };

    let width = area.width.min(48);
    let height = (items.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + area.width - width,
        y: area.y + area.height - height,
        width,
        height,
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Attached (Ctrl+X clears) "),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(list, popup);
}
