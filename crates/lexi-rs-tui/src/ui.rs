//! Rendering routines for the Lexi TUI.

use crate::app::{App, Mode};
use chrono::Local;
use lexi_rs_core::{
    DraftField, ListStatus, SortDirection, SortKey, ToastKind, VocabularyEntry,
};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap,
};

const PRIMARY: Color = Color::Rgb(236, 91, 43); // #EC5B2B
const SECONDARY: Color = Color::Rgb(238, 121, 72); // #EE7948
const TEXT: Color = Color::Rgb(238, 238, 238); // #eeeeee
const TEXT_MUTED: Color = Color::Rgb(128, 128, 128); // #808080
const BORDER: Color = Color::Rgb(60, 60, 60); // #3c3c3c
const BORDER_ACTIVE: Color = Color::Rgb(238, 121, 72); // #EE7948
const YELLOW: Color = Color::Rgb(229, 192, 123); // #e5c07b
const GREEN: Color = Color::Rgb(120, 220, 140);
const RED: Color = Color::Rgb(255, 110, 110);
const MODAL_BG: Color = Color::Rgb(20, 20, 20);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Draw the entire TUI frame.
pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // search
            Constraint::Min(0),    // table
            Constraint::Length(1), // footer count
            Constraint::Length(1), // status bar
        ])
        .split(area);

    draw_header(frame, app, root[0]);
    draw_search(frame, app, root[1]);
    draw_table(frame, app, root[2]);
    draw_footer(frame, app, root[3]);
    draw_status_bar(frame, app, root[4]);

    match app.mode {
        Mode::Detail => draw_detail(frame, app, area),
        Mode::Form => draw_form(frame, app, area),
        Mode::Table | Mode::Search => {}
    }
    draw_toast(frame, app, area);
}

fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label_style = Style::default().fg(TEXT_MUTED);
    let value_style = Style::default().fg(TEXT);
    let (key, direction) = app.list.sort();
    let mut spans = vec![
        Span::styled(
            " Lexi",
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" v{VERSION}"), label_style),
        Span::styled("  store ", label_style),
        Span::styled(app.store_label.as_str(), value_style),
        Span::styled("  sort ", label_style),
        Span::styled(format!("{key} {direction}"), value_style),
    ];
    if app.remote_pending {
        spans.push(Span::styled("  syncing…", Style::default().fg(YELLOW)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn draw_search(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let is_active = app.mode == Mode::Search;
    let border_color = if is_active { BORDER_ACTIVE } else { BORDER };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            " Search ",
            Style::default().fg(if is_active { SECONDARY } else { TEXT_MUTED }),
        ));
    let inner = block.inner(area);

    let term = app.list.search_term();
    let line = if term.is_empty() && !is_active {
        Line::from(Span::styled(
            " Search vocabularies... (press /)",
            Style::default().fg(TEXT_MUTED),
        ))
    } else {
        Line::from(Span::styled(format!(" {term}"), Style::default().fg(TEXT)))
    };
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(line), inner);

    if is_active {
        let offset = term.chars().count() as u16;
        frame.set_cursor_position((inner.x + 1 + offset, inner.y));
    }
}

/// Header label with the sort arrow when `key` is active.
fn sort_label(title: &str, key: SortKey, active: (SortKey, SortDirection)) -> String {
    match active {
        (current, SortDirection::Asc) if current == key => format!("{title} ↑"),
        (current, SortDirection::Desc) if current == key => format!("{title} ↓"),
        _ => title.to_string(),
    }
}

fn draw_table(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER))
        .title(Span::styled(" Vocabularies ", Style::default().fg(TEXT_MUTED)));

    let status = app.list.status();
    if !matches!(status, ListStatus::Ready { .. }) {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(status_lines(&status, app.list.search_term())).wrap(Wrap { trim: false }),
            inner,
        );
        return;
    }

    let sort = app.list.sort();
    let header_style = Style::default().fg(TEXT_MUTED).add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from(sort_label("Word", SortKey::Word, sort)),
        Cell::from("Bangla Meaning"),
        Cell::from("English Meaning"),
        Cell::from("Example"),
        Cell::from(sort_label("Added", SortKey::CreatedAt, sort)),
    ])
    .style(header_style);

    let rows: Vec<Row<'_>> = app
        .list
        .projection()
        .into_iter()
        .map(entry_row)
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(18),
            Constraint::Percentage(22),
            Constraint::Percentage(24),
            Constraint::Percentage(24),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD))
    .highlight_symbol("› ");

    let mut state = TableState::default();
    state.select(app.selected_row());
    frame.render_stateful_widget(table, area, &mut state);
}

fn entry_row(entry: &VocabularyEntry) -> Row<'static> {
    let placeholder = Style::default()
        .fg(TEXT_MUTED)
        .add_modifier(Modifier::ITALIC);
    let optional = |value: &Option<String>, missing: &'static str| match value {
        Some(text) => Cell::from(text.clone()).style(Style::default().fg(TEXT)),
        None => Cell::from(missing).style(placeholder),
    };
    Row::new(vec![
        Cell::from(entry.word.clone()).style(Style::default().fg(TEXT).add_modifier(Modifier::BOLD)),
        optional(&entry.meaning_bangla, "Not provided"),
        optional(&entry.meaning_english, "Not provided"),
        optional(&entry.example_sentence, "No example"),
        Cell::from(format_date(entry)).style(Style::default().fg(TEXT_MUTED)),
    ])
}

fn format_date(entry: &VocabularyEntry) -> String {
    entry
        .created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d")
        .to_string()
}

/// Placeholder text for every non-tabular status.
pub(crate) fn status_lines(status: &ListStatus, term: &str) -> Vec<Line<'static>> {
    let muted = Style::default().fg(TEXT_MUTED);
    match status {
        ListStatus::Loading => vec![Line::from(Span::styled(" Loading vocabularies...", muted))],
        ListStatus::Unavailable(message) => vec![
            Line::from(Span::styled(
                " Could not load vocabularies",
                Style::default().fg(RED).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(format!(" {message}"), muted)),
            Line::from(Span::styled(" Press r to retry.", muted)),
        ],
        ListStatus::Empty => vec![
            Line::from(Span::styled(
                " No vocabularies yet",
                Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                " Start building your vocabulary by adding your first word! (press a)",
                muted,
            )),
        ],
        ListStatus::NoMatches => vec![Line::from(Span::styled(
            format!(" No vocabularies match \"{term}\""),
            muted,
        ))],
        ListStatus::Ready { .. } => Vec::new(),
    }
}

/// Footer text; empty when there is nothing to count.
pub(crate) fn footer_text(status: &ListStatus) -> String {
    match status {
        ListStatus::Ready { shown, total } => format!("Showing {shown} of {total} vocabularies"),
        ListStatus::NoMatches => "Showing 0 vocabularies".to_string(),
        _ => String::new(),
    }
}

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let text = footer_text(&app.list.status());
    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!(" {text}"),
        Style::default().fg(TEXT_MUTED),
    )));
    frame.render_widget(paragraph, area);
}

fn draw_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let key_style = Style::default().fg(TEXT_MUTED);
    let desc_style = Style::default().fg(BORDER);
    let pairs: &[(&str, &str)] = match app.mode {
        Mode::Table => &[
            (" q", " quit"),
            ("  /", " search"),
            ("  w/c", " sort"),
            ("  Enter", " details"),
            ("  a", " add"),
            ("  d", " delete"),
            ("  r", " reload"),
        ],
        Mode::Search => &[(" Enter", " keep"), ("  Esc", " clear")],
        Mode::Detail => &[(" d", " delete"), ("  Esc", " close")],
        Mode::Form => &[
            (" Tab", " next field"),
            ("  Enter", " save"),
            ("  Ctrl+R", " reset"),
            ("  Esc", " close"),
        ],
    };
    let spans: Vec<Span<'_>> = pairs
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(*key, key_style),
                Span::styled(*desc, desc_style),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Rect of the given size centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(PRIMARY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(MODAL_BG))
}

/// Lines of the detail modal body.
pub(crate) fn detail_lines(entry: &VocabularyEntry) -> Vec<Line<'static>> {
    let created = entry.created_at.with_timezone(&Local);
    let label = Style::default().fg(SECONDARY).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", entry.word),
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                " Added on {} at {}",
                created.format("%Y-%m-%d"),
                created.format("%H:%M:%S")
            ),
            Style::default().fg(TEXT_MUTED),
        )),
    ];
    let sections = [
        ("Bangla Meaning", entry.meaning_bangla.as_ref(), false),
        ("English Meaning", entry.meaning_english.as_ref(), false),
        ("Example Sentence", entry.example_sentence.as_ref(), true),
    ];
    let mut any = false;
    for (title, value, quoted) in sections {
        let Some(value) = value else {
            continue;
        };
        any = true;
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!(" {title}"), label)));
        let text = if quoted {
            format!("   \"{value}\"")
        } else {
            format!("   {value}")
        };
        lines.push(Line::from(Span::styled(text, Style::default().fg(TEXT))));
    }
    if !any {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " No additional details available for this word.",
            Style::default().fg(TEXT_MUTED),
        )));
    }
    lines
}

fn draw_detail(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(entry) = app.list.selected_entry() else {
        return;
    };
    let modal = centered(area, 70, 16);
    let mut lines = detail_lines(entry);
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" d", Style::default().fg(RED).add_modifier(Modifier::BOLD)),
        Span::styled(" Delete", Style::default().fg(TEXT_MUTED)),
        Span::styled("   Esc", Style::default().fg(TEXT).add_modifier(Modifier::BOLD)),
        Span::styled(" Close", Style::default().fg(TEXT_MUTED)),
    ]));
    frame.render_widget(Clear, modal);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(modal_block("Details")),
        modal,
    );
}

fn draw_form(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let modal = centered(area, 64, 15);
    let block = modal_block("Add Vocabulary");
    let inner = block.inner(modal);
    frame.render_widget(Clear, modal);
    frame.render_widget(block, modal);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    for (index, field) in DraftField::ALL.into_iter().enumerate() {
        let focused = app.draft.focused == field;
        let border = if focused { BORDER_ACTIVE } else { BORDER };
        let required = if field == DraftField::Word { " *" } else { "" };
        let field_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                format!(" {}{required} ", field.label()),
                Style::default().fg(if focused { SECONDARY } else { TEXT_MUTED }),
            ));
        let field_inner = field_block.inner(rows[index]);
        let value = app.draft.field(field);
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {value}"), Style::default().fg(TEXT)))
                .block(field_block),
            rows[index],
        );
        if focused && !app.draft.submitting {
            let offset = value.chars().count() as u16;
            frame.set_cursor_position((field_inner.x + 1 + offset, field_inner.y));
        }
    }

    if app.draft.submitting {
        frame.render_widget(
            Paragraph::new(Span::styled(" Adding...", Style::default().fg(YELLOW))),
            rows[4],
        );
    }
}

fn draw_toast(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(toast) = app.list.toast() else {
        return;
    };
    let color = match toast.kind {
        ToastKind::Success => GREEN,
        ToastKind::Error => RED,
    };
    let width = (toast.message.chars().count() as u16 + 4).min(area.width);
    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + 1,
        width,
        height: 3.min(area.height),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(MODAL_BG));
    frame.render_widget(Clear, toast_area);
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", toast.message),
            Style::default().fg(color),
        ))
        .block(block),
        toast_area,
    );
}

#[cfg(test)]
mod tests {
    use super::{draw, footer_text, sort_label};
    use crate::app::{App, Mode};
    use lexi_rs_core::{
        ListOptions, ListStatus, SortDirection, SortKey, VocabularyList,
    };
    use lexi_rs_test_utils::{EntryBuilder, StubStore};
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    async fn app_with(entries: Vec<lexi_rs_store::VocabularyEntry>) -> App {
        let store = Arc::new(StubStore::with_entries(entries));
        let mut list = VocabularyList::new(store, None, ListOptions::default());
        list.load().await;
        App::new(list, "memory")
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 24)).expect("terminal");
        terminal.draw(|frame| draw(frame, app)).expect("draw");
        screen_text(&terminal)
    }

    #[test]
    fn sort_label_marks_only_the_active_key() {
        let active = (SortKey::Word, SortDirection::Desc);
        assert_eq!(sort_label("Word", SortKey::Word, active), "Word ↓");
        assert_eq!(sort_label("Added", SortKey::CreatedAt, active), "Added");
    }

    #[test]
    fn footer_counts_shown_and_total() {
        assert_eq!(
            footer_text(&ListStatus::Ready { shown: 2, total: 5 }),
            "Showing 2 of 5 vocabularies"
        );
        assert_eq!(footer_text(&ListStatus::Loading), "");
    }

    #[tokio::test]
    async fn empty_collection_renders_empty_state() {
        let app = app_with(Vec::new()).await;
        let screen = render(&app);
        assert!(screen.contains("No vocabularies yet"));
    }

    #[tokio::test]
    async fn table_renders_rows_and_placeholders() {
        let app = app_with(vec![
            EntryBuilder::new("1", "laconic")
                .english("using few words")
                .build(),
        ])
        .await;
        let screen = render(&app);
        assert!(screen.contains("laconic"));
        assert!(screen.contains("using few words"));
        assert!(screen.contains("Not provided"));
        assert!(screen.contains("No example"));
        assert!(screen.contains("Showing 1 of 1 vocabularies"));
    }

    #[tokio::test]
    async fn detail_modal_shows_missing_details_notice() {
        let mut app = app_with(vec![EntryBuilder::new("1", "bare").build()]).await;
        app.list.select_next();
        app.mode = Mode::Detail;
        let screen = render(&app);
        assert!(screen.contains("Added on"));
        assert!(screen.contains("No additional details available"));
    }
}
