use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use unicode_width::UnicodeWidthChar;

use crate::app::{App, CommandPaletteState, InputPromptState, OverlayState};
use crate::console::session::mask_secret;
use crate::console::{AgentCard, AgentCardField, ProviderConfig, ProviderField, Role, ViewMode};
use crate::definitions::AdminSection;

mod theme;
use theme::*;

const SIDEBAR_WIDTH: u16 = 24;
const MIN_WIDTH: u16 = 80;
const MIN_HEIGHT: u16 = 20;

pub fn render(f: &mut Frame<'_>, app: &App) {
    let size = f.size();
    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        let block = Paragraph::new(format!(
            "Terminal too small, resize to at least {}x{}.",
            MIN_WIDTH, MIN_HEIGHT
        ))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title("Dexter")
                .borders(Borders::ALL)
                .style(Style::default().fg(FG_PRIMARY).bg(MENU_BG)),
        )
        .style(Style::default().fg(FG_PRIMARY).bg(BG_PRIMARY));
        f.render_widget(block, size);
        return;
    }

    let base = Block::default().style(Style::default().bg(BG_PRIMARY));
    f.render_widget(base, size);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(size);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
        .split(vertical[0]);

    render_sidebar(f, app, horizontal[0]);
    match app.session.active_view() {
        ViewMode::Conversation => render_conversation(f, app, horizontal[1]),
        ViewMode::Admin => render_admin(f, app, horizontal[1]),
    }
    render_status_bar(f, app, vertical[1]);

    if let Some(overlay) = app.overlay.as_ref() {
        match overlay {
            OverlayState::CommandPalette(state) => render_command_palette_overlay(f, state),
            OverlayState::InputPrompt(state) => render_input_prompt_overlay(f, state),
        }
    }
}

fn render_sidebar(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(BORDER_IDLE))
        .style(Style::default().bg(BG_SIDEBAR));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(2),
            Constraint::Length(1),
        ])
        .split(inner);

    let brand = Paragraph::new(vec![
        Line::from(Span::styled(
            " Dexter",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(" Web Console", Style::default().fg(FG_DIM))),
    ]);
    f.render_widget(brand, sections[0]);

    let active = app.session.active_view();
    let nav: Vec<Line> = [(ViewMode::Conversation, "F1"), (ViewMode::Admin, "F2")]
        .into_iter()
        .map(|(mode, key)| {
            let style = if mode == active {
                Style::default()
                    .fg(BAR_TEXT)
                    .bg(BAR_HIGHLIGHT_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(FG_PRIMARY)
            };
            Line::from(vec![
                Span::styled(format!(" {:<16}", mode.label()), style),
                Span::styled(format!(" {key}"), Style::default().fg(FG_DIM)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(nav), sections[1]);

    let status = Line::from(vec![
        Span::styled(" ● ", Style::default().fg(STATUS_ON)),
        Span::styled(
            format!("{} messages", app.session.message_count()),
            Style::default().fg(FG_PRIMARY),
        ),
    ]);
    f.render_widget(Paragraph::new(status), sections[2]);
}

fn render_panel_header(f: &mut Frame<'_>, area: Rect, title: &str, subtitle: &str, action: Option<&str>) {
    let mut title_spans = vec![Span::styled(
        title.to_string(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    if let Some(action) = action {
        title_spans.push(Span::styled(
            format!("   [{action}]"),
            Style::default().fg(BORDER_FOCUS),
        ));
    }
    let header = Paragraph::new(vec![
        Line::from(title_spans),
        Line::from(Span::styled(subtitle.to_string(), Style::default().fg(FG_DIM))),
    ])
    .style(Style::default().bg(BG_PANEL));
    f.render_widget(header, area);
}

fn render_conversation(f: &mut Frame<'_>, app: &App, area: Rect) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(5),
        ])
        .split(area);

    render_panel_header(
        f,
        sections[0],
        "Research Console",
        "Guide the agent and review tool-ready responses.",
        None,
    );
    render_messages(f, app, sections[1]);
    render_draft(f, app, sections[2]);
}

fn render_messages(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER_IDLE))
        .style(Style::default().bg(BG_PANEL));
    let wrap_width = block.inner(area).width.max(1) as usize;

    let items: Vec<ListItem> = app
        .session
        .messages()
        .iter()
        .map(|message| {
            let role_color = match message.role() {
                Role::User => USER_ROLE,
                Role::Agent => AGENT_ROLE,
            };
            let mut lines = vec![Line::from(Span::styled(
                message.role().label(),
                Style::default().fg(role_color).add_modifier(Modifier::BOLD),
            ))];
            for line in message.content().lines() {
                push_wrapped_line(&mut lines, line, Style::default().fg(FG_PRIMARY), wrap_width);
            }
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    // Keep the newest message in view.
    let mut state = ListState::default();
    state.select(items.len().checked_sub(1));
    let list = List::new(items).block(block);
    f.render_stateful_widget(list, area, &mut state);
}

fn render_draft(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(BORDER_FOCUS)
                .add_modifier(Modifier::BOLD),
        )
        .title(Span::styled(
            "Press Enter to enqueue a request (Shift+Enter for newline)",
            Style::default().fg(FG_PRIMARY),
        ))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(area);

    let draft = app.session.draft();
    let width = inner.width.max(1) as usize;
    // Same wrap rule as `cursor_display_position`.
    let mut lines: Vec<Line<'static>> = Vec::new();
    if draft.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ask a question about a company, market, or filing...",
            Style::default().fg(FG_DIM),
        )));
    } else {
        for line in draft.buffer().split('\n') {
            push_wrapped_line(&mut lines, line, Style::default().fg(FG_PRIMARY), width);
        }
    }

    let (col, row) = draft.cursor_display_position(width);
    let scroll = row.saturating_sub(inner.height.saturating_sub(1));
    let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);

    if app.overlay.is_none() {
        let x = inner.x.saturating_add(col.min(inner.width.saturating_sub(1)));
        let y = inner.y.saturating_add((row - scroll).min(inner.height.saturating_sub(1)));
        f.set_cursor(x, y);
    }
}

fn render_admin(f: &mut Frame<'_>, app: &App, area: Rect) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);
    render_panel_header(
        f,
        sections[0],
        "Admin Control Center",
        "Manage provider credentials and A2A agent cards.",
        Some(if app.session.keys_visible() {
            "k: Hide keys"
        } else {
            "k: Show keys"
        }),
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(sections[1]);
    render_providers(f, app, columns[0]);
    render_agent_cards(f, app, columns[1]);
}

fn section_block(app: &App, section: AdminSection, subtitle: &str) -> Block<'static> {
    let focused = app.admin.section == section;
    let border = if focused {
        Style::default().fg(BORDER_FOCUS).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(BORDER_IDLE)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Line::from(vec![
            Span::styled(
                format!(" {} ", section.label()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{subtitle} "), Style::default().fg(FG_DIM)),
        ]))
        .style(Style::default().bg(BG_PANEL))
}

fn toggle_span(enabled: bool, label: &str) -> Span<'static> {
    let (mark, color) = if enabled {
        ("[x]", STATUS_ON)
    } else {
        ("[ ]", STATUS_OFF)
    };
    Span::styled(format!("  {mark} {label}"), Style::default().fg(color))
}

fn field_line(label: &str, value: Span<'static>, selected: bool) -> Line<'static> {
    let label_style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(PANEL_HIGHLIGHT_BG)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(FG_DIM)
    };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{label}:"), label_style),
        Span::raw(" "),
        value,
    ])
}

fn provider_value(app: &App, provider: &ProviderConfig, field: ProviderField) -> Span<'static> {
    match field {
        ProviderField::ApiKey if provider.api_key.is_empty() => {
            Span::styled("sk-...", Style::default().fg(FG_DIM))
        }
        ProviderField::ApiKey => Span::styled(
            app.session.display_api_key(provider).into_owned(),
            Style::default().fg(FG_PRIMARY),
        ),
        other => Span::styled(provider.text(other).to_string(), Style::default().fg(FG_PRIMARY)),
    }
}

fn render_providers(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = section_block(app, AdminSection::Providers, "Toggle providers and store API credentials.");
    let focused = app.admin.section == AdminSection::Providers;

    let items: Vec<ListItem> = app
        .session
        .providers()
        .iter()
        .enumerate()
        .map(|(row, provider)| {
            let row_selected = focused && row == app.admin.provider_row;
            let mut lines = vec![Line::from(vec![
                Span::styled(
                    provider.name.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                toggle_span(provider.enabled, "Enabled"),
            ])];
            for field in ProviderField::ALL {
                let selected = row_selected && field == app.admin.provider_field();
                lines.push(field_line(field.label(), provider_value(app, provider, field), selected));
            }
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.admin.provider_row));
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(ROW_SELECTED_BG));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_agent_cards(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = section_block(app, AdminSection::AgentCards, "a: Add card");
    let focused = app.admin.section == AdminSection::AgentCards;

    let items: Vec<ListItem> = app
        .session
        .agent_cards()
        .iter()
        .enumerate()
        .map(|(row, card)| {
            let row_selected = focused && row == app.admin.card_row;
            ListItem::new(agent_card_lines(app, card, row_selected))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.admin.card_row));
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(ROW_SELECTED_BG));
    f.render_stateful_widget(list, area, &mut state);
}

fn agent_card_lines(app: &App, card: &AgentCard, row_selected: bool) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            card.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        toggle_span(card.enabled, "Live"),
    ])];
    for field in AgentCardField::ALL {
        let selected = row_selected && field == app.admin.card_field();
        let value = Span::styled(card.text(field).to_string(), Style::default().fg(FG_PRIMARY));
        lines.push(field_line(field.label(), value, selected));
    }
    let skills = card.skill_list();
    if !skills.is_empty() {
        let mut chips = vec![Span::raw("  ")];
        for skill in skills {
            chips.push(Span::styled(
                format!("[{skill}]"),
                Style::default().fg(AGENT_ROLE),
            ));
            chips.push(Span::raw(" "));
        }
        lines.push(Line::from(chips));
    }
    lines.push(Line::from(""));
    lines
}

fn render_status_bar(f: &mut Frame<'_>, app: &App, area: Rect) {
    let providers = app.session.provider_registry();
    let text = format!(
        " {} | [VIEW:{}] [PROVIDERS:{}/{}] [CARDS:{}] [KEYS:{}]",
        app.status_message,
        app.session.active_view().label(),
        providers.enabled_count(),
        providers.len(),
        app.session.agent_cards().len(),
        if app.session.keys_visible() { "SHOWN" } else { "HIDDEN" },
    );
    f.render_widget(Clear, area);
    let bar = Paragraph::new(text).style(Style::default().fg(BAR_TEXT).bg(BAR_BG));
    f.render_widget(bar, area);
}

fn render_command_palette_overlay(f: &mut Frame<'_>, state: &CommandPaletteState) {
    let area = centered_rect(60, 50, f.size());
    f.render_widget(Clear, area);
    let block = Block::default()
        .title(Span::styled(
            "Command Palette",
            Style::default().fg(BAR_TEXT).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MENU_BORDER))
        .style(Style::default().bg(MENU_BG));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(2),
            Constraint::Length(1),
        ])
        .split(inner);

    let filter_line = if state.filter.is_empty() {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(FG_PRIMARY)),
            Span::styled("Type to filter", Style::default().fg(FG_DIM)),
        ])
    } else {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(FG_PRIMARY)),
            Span::styled(
                state.filter.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ])
    };
    f.render_widget(Paragraph::new(filter_line), chunks[0]);

    let items: Vec<ListItem> = state
        .visible
        .iter()
        .filter_map(|idx| state.entries.get(*idx))
        .map(|entry| {
            let mut spans = vec![Span::styled(entry.label.clone(), Style::default().fg(FG_PRIMARY))];
            if let Some(detail) = entry.detail.as_ref() {
                spans.push(Span::styled(format!("  {detail}"), Style::default().fg(FG_DIM)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(state.selected));
    }
    let list = List::new(items).highlight_style(
        Style::default()
            .bg(PANEL_HIGHLIGHT_BG)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    );
    f.render_stateful_widget(list, chunks[1], &mut list_state);

    let footer = if state.visible.is_empty() {
        "No matches · Esc close"
    } else {
        "Enter run · Esc close"
    };
    f.render_widget(
        Paragraph::new(footer).style(Style::default().fg(FG_DIM)),
        chunks[2],
    );
}

fn render_input_prompt_overlay(f: &mut Frame<'_>, state: &InputPromptState) {
    let area = centered_rect(60, 25, f.size());
    f.render_widget(Clear, area);
    let block = Block::default()
        .title(Span::styled(
            state.title.as_str(),
            Style::default().fg(BAR_TEXT).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MENU_BORDER))
        .style(Style::default().bg(MENU_BG));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(state.placeholder.as_str()).style(Style::default().fg(FG_DIM)),
        chunks[0],
    );

    let shown = if state.masked {
        mask_secret(&state.value)
    } else {
        state.value.clone()
    };
    let mut spans = vec![Span::styled("> ", Style::default().fg(FG_PRIMARY))];
    if shown.is_empty() {
        spans.push(Span::styled("(empty)", Style::default().fg(FG_DIM)));
    } else {
        spans.push(Span::styled(shown, Style::default().fg(Color::White)));
    }
    spans.push(Span::styled(" ▍", Style::default().fg(BORDER_FOCUS)));
    f.render_widget(
        Paragraph::new(Line::from(spans)).wrap(Wrap { trim: false }),
        chunks[1],
    );

    f.render_widget(
        Paragraph::new("Enter confirm · Esc cancel").style(Style::default().fg(FG_DIM)),
        chunks[2],
    );
}

fn push_wrapped_line(lines: &mut Vec<Line<'static>>, text: &str, style: Style, width: usize) {
    for segment in wrap_to_width(text, width) {
        lines.push(Line::from(Span::styled(segment, style)));
    }
}

fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![text.to_string()];
    }
    let mut result = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1).max(1);
        if current_width + ch_width > width && !current.is_empty() {
            result.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }
    result.push(current);
    result
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ids::SequentialIds;
    use crate::console::{ConsoleSettings, ProviderPatch};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app() -> App {
        App::new(
            std::env::temp_dir(),
            &ConsoleSettings::default(),
            Box::new(SequentialIds::new("id")),
        )
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("test backend");
        terminal.draw(|f| render(f, app)).expect("draw");
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn wrap_splits_on_display_width() {
        assert_eq!(wrap_to_width("abcdef", 4), ["abcd", "ef"]);
        assert_eq!(wrap_to_width("比率比率", 4), ["比率", "比率"]);
        assert_eq!(wrap_to_width("", 4), [""]);
    }

    #[test]
    fn sidebar_shows_derived_message_count() {
        let mut app = app();
        assert!(screen_text(&app).contains("1 messages"));
        app.session.draft_mut().set("hello");
        app.session.send_message();
        assert!(screen_text(&app).contains("3 messages"));
    }

    #[test]
    fn admin_masks_keys_until_toggled() {
        let mut app = app();
        app.session.set_active_view(ViewMode::Admin);
        app.session
            .update_provider("openai", ProviderPatch::default().api_key("sk-secret"));

        let hidden = screen_text(&app);
        assert!(hidden.contains("Admin Control Center"));
        assert!(!hidden.contains("sk-secret"));
        assert!(hidden.contains("k: Show keys"));

        app.session.toggle_key_visibility();
        let shown = screen_text(&app);
        assert!(shown.contains("sk-secret"));
        assert!(shown.contains("k: Hide keys"));
    }

    #[test]
    fn draft_cursor_follows_wrapped_text() {
        let mut app = app();
        for ch in format!("{} {}", "a".repeat(90), "b".repeat(10)).chars() {
            app.session.draft_mut().insert_char(ch);
        }
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("test backend");
        terminal.draw(|f| render(f, &app)).expect("draw");
        let (x, y) = terminal.get_cursor().expect("cursor");
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.get(x - 1, y).symbol(), "b");
        assert_eq!(buffer.get(x, y).symbol(), " ");
        let wrapped_row: String = (x - 7..x).map(|col| buffer.get(col, y).symbol().to_string()).collect();
        assert_eq!(wrapped_row, "bbbbbbb");
    }

    #[test]
    fn long_draft_scrolls_to_cursor_row() {
        let mut app = app();
        for line in ["one", "two", "three", "four", "five"] {
            for ch in line.chars() {
                app.session.draft_mut().insert_char(ch);
            }
            app.session.draft_mut().insert_newline();
        }
        app.session.draft_mut().insert_char('z');
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("test backend");
        terminal.draw(|f| render(f, &app)).expect("draw");
        let (x, y) = terminal.get_cursor().expect("cursor");
        assert_eq!(terminal.backend().buffer().get(x - 1, y).symbol(), "z");
    }

    #[test]
    fn tiny_terminal_shows_resize_hint() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).expect("test backend");
        terminal.draw(|f| render(f, &app)).expect("draw");
        let buffer = terminal.backend().buffer();
        let first_rows: String = (0..buffer.area.width)
            .map(|x| buffer.get(x, 1).symbol().to_string())
            .collect();
        assert!(first_rows.contains("Terminal"));
    }
}
