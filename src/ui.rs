use crate::{
    app::AppController,
    input::{Field, InputCollector},
    render::DisplayInstruction,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const HEADER_HEIGHT: u16 = 3;
const INPUT_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
const MARGIN: u16 = 1;

pub fn render_ui(f: &mut Frame, app: &AppController) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(MARGIN)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(INPUT_HEIGHT), // City
            Constraint::Length(INPUT_HEIGHT), // Mood
            Constraint::Min(5),               // Result panel
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_input(f, chunks[1], &app.input, Field::City);
    render_input(f, chunks[2], &app.input, Field::Mood);
    render_result(f, chunks[3], &app.display());
    render_footer(f, chunks[4]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled("MOODTUNE", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
        Span::styled(" - a playlist for your weather and your mood", Style::default().fg(Color::Cyan)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Magenta)));

    f.render_widget(header, area);
}

fn render_input(f: &mut Frame, area: Rect, input: &InputCollector, field: Field) {
    let (title, value, placeholder) = match field {
        Field::City => ("City", input.city(), "Where are you?"),
        Field::Mood => ("Mood", input.mood(), "How do you feel?"),
    };
    let focused = input.focus() == field;

    let line = if value.is_empty() && !focused {
        Line::from(Span::styled(placeholder, Style::default().fg(Color::DarkGray)))
    } else if focused {
        Line::from(vec![
            Span::raw(value.to_string()),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::from(Span::raw(value.to_string()))
    };

    let border = if focused { Color::Yellow } else { Color::Gray };
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title),
    );

    f.render_widget(widget, area);
}

fn render_result(f: &mut Frame, area: Rect, instruction: &DisplayInstruction) {
    let (title, color, lines) = match instruction {
        DisplayInstruction::Hidden => return,
        DisplayInstruction::Loading => (
            "Working",
            Color::Blue,
            vec![Line::from(Span::styled(
                "Generating playlist…",
                Style::default().fg(Color::White).add_modifier(Modifier::ITALIC),
            ))],
        ),
        DisplayInstruction::Embed { src, weather_category, emotion_category, playlist_url } => {
            let mut lines = Vec::new();
            if let Some(weather) = weather_category {
                lines.push(labelled("Weather: ", weather, Color::Cyan));
            }
            if let Some(emotion) = emotion_category {
                lines.push(labelled("Mood: ", emotion, Color::Magenta));
            }
            lines.push(Line::from(""));
            lines.push(labelled("Player: ", src, Color::Green));
            if let Some(url) = playlist_url {
                lines.push(labelled("Playlist: ", url, Color::Green));
            }
            ("Your playlist", Color::Green, lines)
        }
        DisplayInstruction::Error { kind, message } => (
            kind.label(),
            Color::Red,
            vec![Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Red)))],
        ),
    };

    let panel = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title),
        );

    f.render_widget(panel, area);
}

fn labelled<'a>(label: &'a str, value: &'a str, color: Color) -> Line<'a> {
    Line::from(vec![
        Span::raw(label),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn render_footer(f: &mut Frame, area: Rect) {
    let controls = Paragraph::new(Line::from(vec![
        Span::styled("TAB ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::styled("Switch field • ", Style::default().fg(Color::White)),
        Span::styled("ENTER ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::styled("Generate • ", Style::default().fg(Color::White)),
        Span::styled("CTRL-U ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled("Clear • ", Style::default().fg(Color::White)),
        Span::styled("ESC ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::styled("Quit", Style::default().fg(Color::White)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray))
            .title("Controls"),
    );

    f.render_widget(controls, area);
}
