use crate::app::{App, InputMode};
use deck_common::{InputKind, Language};
use deck_core::export::ExportHelper;
use deck_core::{ErrorSeverity, SlideViewer};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    match app.state.viewer() {
        Some(viewer) => draw_viewer(f, app, viewer),
        None => draw_form(f, app),
    }
}

fn selected(active: bool, color: Color) -> Style {
    if active {
        Style::default().fg(color).add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_form(f: &mut Frame, app: &App) {
    let input = app.state.input();
    let error = app.state.error_message();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(if error.is_some() { 3 } else { 0 }),
            Constraint::Length(3),
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled("Narrative to Slides", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(
            "Professional presentations from documents or YouTube transcripts",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Deck"));
    f.render_widget(header, chunks[0]);

    let mut settings = vec![Span::raw("Source (F2) ")];
    for kind in [InputKind::Document, InputKind::Youtube] {
        let color = if kind == InputKind::Youtube { Color::Red } else { Color::Magenta };
        settings.push(Span::styled(
            format!(" {} ", kind.display_label()),
            selected(input.input_kind == kind, color),
        ));
        settings.push(Span::raw(" "));
    }
    settings.push(Span::raw("  Language (F3) "));
    for language in Language::ALL {
        settings.push(Span::styled(
            format!(" {} ", language.display_label()),
            selected(input.language == language, Color::Blue),
        ));
        settings.push(Span::raw(" "));
    }
    settings.push(Span::raw("  Thinking Mode (F4) "));
    settings.push(Span::styled(
        if input.extended_reasoning { " ON " } else { " OFF " },
        selected(input.extended_reasoning, Color::Magenta),
    ));
    let settings = Paragraph::new(Line::from(settings))
        .block(Block::default().borders(Borders::ALL).title("Configuration"));
    f.render_widget(settings, chunks[1]);

    let body = if input.text.is_empty() {
        Text::styled(input.input_kind.placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        Text::raw(input.text.as_str())
    };
    let mut block = Block::default().borders(Borders::ALL).title("Content Input");
    if !input.text.is_empty() {
        block = block.title(
            Line::from(format!("{} CHARS", input.char_count())).right_aligned(),
        );
    }
    let scroll = input_scroll(
        &input.text,
        chunks[2].width.saturating_sub(2),
        chunks[2].height.saturating_sub(2),
    );
    let text_area = Paragraph::new(body)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(text_area, chunks[2]);

    if let Some(message) = error {
        let (label, color) = match app.state.error_severity() {
            Some(ErrorSeverity::Info) => ("Notice", Color::Yellow),
            Some(ErrorSeverity::Warning) => ("Warning", Color::Yellow),
            _ => ("Error", Color::Red),
        };
        let error_box = Paragraph::new(message)
            .style(Style::default().fg(color))
            .block(Block::default().borders(Borders::ALL).title(label))
            .wrap(Wrap { trim: true });
        f.render_widget(error_box, chunks[3]);
    }

    let footer = match &app.mode {
        InputMode::FilePath(buffer) => Paragraph::new(Line::from(vec![
            Span::styled("Open file: ", Style::default().fg(Color::Cyan)),
            Span::raw(buffer.as_str()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Enter to load, Esc to cancel")),
        InputMode::Editing if app.state.is_processing() => Paragraph::new(format!(
            "{} Synthesizing...",
            app.spinner()
        ))
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL)),
        InputMode::Editing if app.state.is_draining() => {
            Paragraph::new("Waiting for the previous request to finish...")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL))
        }
        InputMode::Editing => Paragraph::new(
            "Ctrl+G/F5 Generate Deck | Ctrl+V Paste | Ctrl+O Upload .txt | Ctrl+R Reset | Esc Quit",
        )
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL)),
    };
    f.render_widget(footer, chunks[4]);
}

/// Rows to scroll so the end of the input stays in view, counting the rows
/// the text takes once wrapped to `width`.
fn input_scroll(text: &str, width: u16, height: u16) -> u16 {
    let wrapped = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .line_count(width);
    let rows = wrapped + usize::from(text.ends_with('\n'));
    u16::try_from(rows.saturating_sub(usize::from(height))).unwrap_or(u16::MAX)
}

fn draw_viewer(f: &mut Frame, app: &App, viewer: &SlideViewer) {
    let deck = viewer.deck();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(deck.title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(viewer.position_label(), Style::default().fg(Color::Blue)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Presentation Project"));
    f.render_widget(header, chunks[0]);

    let mut lines = Vec::new();
    if let Some(slide) = viewer.current_slide() {
        lines.push(Line::from(Span::styled(
            slide.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
        for bullet in &slide.bullets {
            lines.push(Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::Blue)),
                Span::raw(bullet.as_str()),
            ]));
        }
    }
    let slide = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(slide, chunks[1]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Blue))
        .ratio(viewer.progress().clamp(0.0, 1.0))
        .label(viewer.position_label());
    f.render_widget(gauge, chunks[2]);

    let enabled = Style::default().fg(Color::Yellow);
    let disabled = Style::default().fg(Color::DarkGray);
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("← PREV", if viewer.is_first() { disabled } else { enabled }),
        Span::raw("  "),
        Span::styled("NEXT →", if viewer.is_last() { disabled } else { enabled }),
        Span::styled(
            " | e Dev Export | b Edit Input | n New Doc | q Quit",
            enabled,
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[3]);

    if viewer.export_panel_open() {
        draw_export_panel(f, app.export_scroll);
    }
}

fn draw_export_panel(f: &mut Frame, scroll: u16) {
    let helper = ExportHelper::new();
    let heading = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(Span::styled("python-pptx script", heading))];
    lines.extend(
        helper
            .script
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Cyan)))),
    );
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("API Request/Response Schema", heading)));
    lines.extend(helper.schema.lines().map(|l| Line::from(l.to_string())));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Implementation Note",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(helper.note));

    let area = centered_rect(90, 85, f.area());
    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Developer Export Tools (↑/↓ scroll, Esc close)"),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(Clear, area);
    f.render_widget(panel, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
