//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! Layout, top to bottom: a title row; a body split into the source selector
//! (with the fetch button underneath) and the content pane; a one-line status
//! bar.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Content};

pub const APP_TITLE: &str = "News Aggregator";

const ACCENT: Color = Color::Rgb(0x00, 0x7b, 0xff);
const SIDEBAR_WIDTH: u16 = 24;

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [title_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [sidebar_area, content_area] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
            .areas(body_area);

    let [selector_area, button_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(sidebar_area);

    draw_title(frame, title_area);
    draw_source_selector(app, frame, selector_area);
    draw_fetch_button(app, frame, button_area);
    draw_content(app, frame, content_area);
    draw_status_bar(app, frame, status_area);
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Span::styled(
        APP_TITLE,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

/// Render the list of news sources.
fn draw_source_selector(app: &mut App, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = app.registry.names().map(ListItem::new).collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Select News Source ")
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Render the fetch button; greyed out while a fetch is running.
fn draw_fetch_button(app: &App, frame: &mut Frame, area: Rect) {
    let style = if app.is_fetching() {
        Style::default().fg(Color::Gray).bg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::White)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    };

    let button = Paragraph::new(Line::from(" Fetch News "))
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, area);
}

/// Render the scrollable content pane.
///
/// The scroll bound depends on how the text wraps at this width, so it is
/// settled here rather than in [`App`].
fn draw_content(app: &mut App, frame: &mut Frame, area: Rect) {
    let style = match app.content() {
        Content::Placeholder(_) => Style::default().fg(Color::DarkGray),
        Content::Message(_) | Content::Document(_) => Style::default(),
    };

    let block = Block::default().title(" Headlines ").borders(Borders::ALL);
    let inner = block.inner(area);
    let content = Paragraph::new(app.view().clone())
        .style(style)
        .wrap(Wrap { trim: false });
    app.clamp_scroll(content.line_count(inner.width), inner.height);

    frame.render_widget(content.scroll((app.scroll, 0)).block(block), area);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(app.status.text(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            "q: quit  ↑/↓: source  Enter: fetch  PgUp/PgDn: scroll  1-0: open link",
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(status, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FetchOutcome;
    use crate::input;
    use crate::source::{FeedItem, Registry};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen(app: &mut App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(app, f)).unwrap();
        let buf = terminal.backend().buffer().clone();
        buf.content()
            .iter()
            .map(|c| c.symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    #[test]
    fn draw_shows_sources_and_welcome() {
        let mut app = App::new(Registry::builtin());
        let text = screen(&mut app);

        assert!(text.contains("News Aggregator"));
        assert!(text.contains("Kathmandu Post"));
        assert!(text.contains("Fetch News"));
        assert!(text.contains("Select a news source"));
        assert!(text.contains("Ready."));
    }

    #[test]
    fn draw_shows_fetching_status() {
        let mut app = App::new(Registry::builtin());
        app.begin_fetch("CNN").unwrap();
        let text = screen(&mut app);

        assert!(text.contains("Fetching news from CNN..."));
        assert!(text.contains("Please wait."));
    }

    #[test]
    fn draw_shows_fetched_headlines() {
        let mut app = App::new(Registry::builtin());
        app.begin_fetch("Kathmandu Post").unwrap();
        app.complete_fetch(FetchOutcome::Success(vec![FeedItem::from_parts(
            Some("Valley wakes up"),
            Some("<p>Morning fog lifts.</p>"),
            Some("https://kathmandupost.com/a"),
        )]));
        let text = screen(&mut app);

        assert!(text.contains("Valley wakes up"));
        assert!(text.contains("Morning fog lifts."));
        assert!(text.contains("https://kathmandupost.com/a"));
    }

    #[test]
    fn scroll_bottom_reaches_last_entry_when_summaries_wrap() {
        let summary = "lorem ipsum ".repeat(50);
        let items: Vec<FeedItem> = (0..10)
            .map(|i| {
                FeedItem::from_parts(
                    Some(format!("Story {i}").as_str()),
                    Some(summary.as_str()),
                    Some(format!("https://example.com/LAST{i}").as_str()),
                )
            })
            .collect();

        let mut app = App::new(Registry::builtin());
        app.begin_fetch("BBC News").unwrap();
        app.complete_fetch(FetchOutcome::Success(items));

        app.scroll_bottom();
        let text = screen(&mut app);
        assert!(text.contains("https://example.com/LAST9"), "last link should be visible");
        assert!(!text.contains("Story 0"));

        // Scrolling past the end stays on the last page.
        app.scroll_down(input::PAGE);
        assert!(screen(&mut app).contains("https://example.com/LAST9"));

        app.scroll_top();
        assert!(screen(&mut app).contains("Story 0"));
    }

    #[test]
    fn fetch_button_is_greyed_while_fetching() {
        let mut app = App::new(Registry::builtin());
        app.begin_fetch("CNN").unwrap();

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
        let buf = terminal.backend().buffer();

        // The button's inner row sits two lines above the status bar.
        let cell = &buf[(SIDEBAR_WIDTH / 2, 27)];
        assert_eq!(cell.bg, Color::DarkGray);
    }

    #[test]
    fn draw_does_not_panic_on_tiny_terminal() {
        let mut app = App::new(Registry::builtin());
        let backend = TestBackend::new(10, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
    }
}
