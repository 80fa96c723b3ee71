//! TUI rendering with ratatui
//!
//! Typed text on the left, prediction panels on the right.

use super::app::{App, MessageStyle, WordStatus};
use crate::core::ScoredOption;
use crate::output::formatters::char_or_placeholder;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50), // Text and messages
            Constraint::Percentage(50), // Predictions
        ])
        .split(chunks[1]);

    render_text_panel(f, app, main_chunks[0]);
    render_predictions(f, app, main_chunks[1]);

    render_status(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("⌨  TRIE NEXT - Predictive Typing")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_text_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Typed text
            Constraint::Length(5), // Best guesses
            Constraint::Length(7), // Messages
        ])
        .split(area);

    render_typed_text(f, app, chunks[0]);
    render_best_guess(f, app, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_typed_text(f: &mut Frame, app: &App, area: Rect) {
    let mut spans: Vec<Span> = Vec::with_capacity(app.committed.len() * 2 + 2);
    for word in &app.committed {
        let color = if app.is_known(word) {
            Color::Green
        } else {
            Color::Red
        };
        spans.push(Span::styled(word.clone(), Style::default().fg(color)));
        spans.push(Span::raw(" "));
    }

    let current_style = match app.status() {
        WordStatus::Known => Style::default().fg(Color::Green),
        WordStatus::Unknown => Style::default().fg(Color::Red),
        WordStatus::Partial => Style::default().fg(Color::White),
    };
    spans.push(Span::styled(
        app.current.clone(),
        current_style.add_modifier(Modifier::BOLD),
    ));

    // Ghost text for the rest of the best completion
    if let Some(rest) = app
        .predictions
        .next_word
        .as_deref()
        .and_then(|word| word.strip_prefix(app.current.as_str()))
        .filter(|rest| !rest.is_empty())
    {
        spans.push(Span::styled(
            rest.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));

    let paragraph = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .title(" Text ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_best_guess(f: &mut Frame, app: &App, area: Rect) {
    let highlight = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let content = vec![
        Line::from(vec![
            Span::raw("Next letter: "),
            Span::styled(
                char_or_placeholder(app.predictions.next_char).to_string(),
                highlight,
            ),
        ]),
        Line::from(vec![
            Span::raw("Completion:  "),
            Span::styled(
                app.predictions.next_word.clone().unwrap_or_default(),
                highlight,
            ),
        ]),
        Line::from(format!(
            "Frequency:   {}",
            app.trie.frequency(&app.current)
        )),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Best Guess ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(paragraph, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_predictions(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let letters = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let words = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let p = &app.predictions;
    render_options(f, " Top Letters ", &p.top_letters, Color::Cyan, letters[0]);
    render_options(
        f,
        " Alternative Letters ",
        &p.alternative_letters,
        Color::Magenta,
        letters[1],
    );
    render_options(f, " Top Words ", &p.top_words, Color::Cyan, words[0]);
    render_options(
        f,
        " Alternative Words ",
        &p.alternative_words,
        Color::Magenta,
        words[1],
    );
}

fn render_options(f: &mut Frame, title: &str, options: &[ScoredOption], color: Color, area: Rect) {
    let items: Vec<ListItem> = if options.is_empty() {
        vec![ListItem::new("—").style(Style::default().fg(Color::DarkGray))]
    } else {
        options
            .iter()
            .map(|option| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<12}", option.label),
                        Style::default().fg(color),
                    ),
                    Span::raw(format!("{:5.1}%", option.percent)),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(list, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(area);

    let words_text = format!("Words typed: {}", app.committed.len());
    let words = Paragraph::new(words_text).alignment(Alignment::Center);
    f.render_widget(words, chunks[0]);

    let inserts_text = format!("Insertions: {}", app.trie.total_insertions());
    let inserts = Paragraph::new(inserts_text).alignment(Alignment::Center);
    f.render_widget(inserts, chunks[1]);

    let help = Paragraph::new("Tab: Complete | Enter: Learn | Ctrl-D: Forget | Esc: Quit")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}
