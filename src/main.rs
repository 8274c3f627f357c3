//! MoneyBox TUI - Actor-based personal finance tracker client
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine, view registry and refresh choreography
//! - Gateway Layer (Tokio) - async remote CRUD execution

mod app;
mod config;
mod constants;
mod format;
mod gateway;
mod messages;
mod models;
mod ui;
mod views;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use app::{AppActor, AppState};
use config::Config;
use constants::APP_NAME;
use gateway::GatewayActor;
use messages::render::{ModalView, RenderState};
use messages::ui_events::{key_to_ui_event, Panel};
use messages::{GatewayCommand, GatewayReply, UiEvent};
use ui::{kind_color, kind_sign, render_input};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", "moneybox.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::load();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (gw_cmd_tx, gw_cmd_rx) = mpsc::unbounded_channel::<GatewayCommand>();
    let (gw_reply_tx, gw_reply_rx) = mpsc::unbounded_channel::<GatewayReply>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn gateway actor
    let gateway_actor = GatewayActor::new(config.base_url.clone(), gw_reply_tx);
    tokio::spawn(gateway_actor.run(gw_cmd_rx));

    // Spawn app actor; view construction fails fast on a broken layout
    let state = AppState::new()?;
    let app_actor = AppActor::new(state, gw_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, gw_reply_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.confirm.is_some(),
                    current_state.modal.is_some(),
                    current_state.focus,
                    current_state.logged_in,
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(f, state, main_chunks[0]);

    if state.logged_in {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(0)])
            .split(main_chunks[1]);

        draw_sidebar(f, state, content_chunks[0]);
        draw_page(f, state, content_chunks[1]);
    } else {
        draw_logged_out(f, main_chunks[1]);
    }

    draw_status_bar(f, state, main_chunks[2]);

    // Popups
    if let Some(modal) = &state.modal {
        draw_modal(f, modal, area);
    }

    if let Some(message) = &state.confirm {
        draw_confirm(f, message, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", APP_NAME),
        Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
    )));
    f.render_widget(title, area);

    if state.logged_in && !state.user_name.is_empty() {
        let user = Paragraph::new(format!("{} ", state.user_name))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Right);
        f.render_widget(user, area);
    }
}

fn draw_sidebar(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.focus == Panel::Accounts;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let items: Vec<ListItem> = state
        .accounts
        .iter()
        .map(|row| {
            let marker = if row.active { "● " } else { "  " };
            let style = if row.active {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(row.name.clone(), style),
                Span::styled(
                    format!("  {} ₽", row.sum),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let empty = items.is_empty();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Accounts (a:new) "),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold());

    if empty {
        let placeholder = Paragraph::new("No accounts yet.\n\nPress 'a' to create one.")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(" Accounts (a:new) "),
            )
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: false });
        f.render_widget(placeholder, area);
        return;
    }

    let mut list_state = ListState::default();
    if is_focused {
        list_state.select(Some(state.accounts_cursor));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_page(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    // Title region; fed by its own read, independent of the list below
    let title_block = Block::default()
        .borders(Borders::ALL)
        .title(if state.page_bound { " Account (x:remove) " } else { " Account " });
    let title = Paragraph::new(state.page_title.as_str())
        .block(title_block)
        .style(Style::default().bold());
    f.render_widget(title, chunks[0]);

    let is_focused = state.focus == Panel::Transactions;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    if !state.page_bound {
        let hint = Paragraph::new("Select an account to see its records.")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(" Records "),
            )
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = state
        .page_rows
        .iter()
        .map(|row| {
            ListItem::new(Line::from(vec![
                Span::raw(row.name.clone()),
                Span::styled(
                    format!("  {}", row.date),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("  {}{} ₽", kind_sign(row.kind), row.sum),
                    Style::default().fg(kind_color(row.kind)).bold(),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Records (i:income e:expense d:remove) "),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold());

    let mut list_state = ListState::default();
    if is_focused && !state.page_rows.is_empty() {
        list_state.select(Some(state.page_cursor));
    }
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}

fn draw_logged_out(f: &mut Frame, area: Rect) {
    let content = "You are signed out.\n\nPress 'l' to sign in.";
    let paragraph = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title(" Welcome "))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let busy = if state.busy { " [...]" } else { "" };

    let hints = if state.confirm.is_some() {
        " y:confirm | n/Esc:cancel "
    } else if state.modal.is_some() {
        " Tab:next field | ↑/↓:pick account | Enter:submit | Esc:close "
    } else if !state.logged_in {
        " l:sign in | q:quit "
    } else {
        " Tab:panel | Enter:open | a:account | i:income | e:expense | d/x:remove | r:refresh | o:sign out | q:quit "
    };

    let bar = Paragraph::new(format!("{}{}", hints, busy))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_modal(f: &mut Frame, modal: &ModalView, area: Rect) {
    let select_rows = if modal.select.is_some() { 3 } else { 0 };
    let height = 2 + select_rows + 3 * modal.fields.len() as u16;
    let popup_area = centered_fixed(48, height, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", modal.title))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(popup_area);

    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let mut constraints = Vec::new();
    if modal.select.is_some() {
        constraints.push(Constraint::Length(3));
    }
    for _ in &modal.fields {
        constraints.push(Constraint::Length(3));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let mut next = 0;

    if let Some(select) = &modal.select {
        let border_style = if select.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let shown = match select.selected.and_then(|i| select.options.get(i)) {
            Some(name) => format!("◂ {} ▸", name),
            None => String::from("no accounts"),
        };
        let select_widget = Paragraph::new(shown).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Account "),
        );
        f.render_widget(select_widget, chunks[next]);
        next += 1;
    }

    for field in &modal.fields {
        let input = render_input(&field.label, &field.value, field.secret, field.focused);
        f.render_widget(input, chunks[next]);
        next += 1;
    }
}

fn draw_confirm(f: &mut Frame, message: &str, area: Rect) {
    let popup_area = centered_fixed(50, 5, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Confirm ")
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(popup_area);

    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let text = Paragraph::new(message.to_string()).alignment(Alignment::Center);
    f.render_widget(text, chunks[0]);

    let keys = Line::from(vec![
        Span::styled("y", Style::default().fg(Color::Cyan).bold()),
        Span::styled(":Yes  ", Style::default().fg(Color::DarkGray)),
        Span::styled("n", Style::default().fg(Color::Cyan).bold()),
        Span::styled("/", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan).bold()),
        Span::styled(":No", Style::default().fg(Color::DarkGray)),
    ]);
    let keys_widget = Paragraph::new(keys).alignment(Alignment::Center);
    f.render_widget(keys_widget, chunks[2]);
}

/// A fixed-size rect centered in `r`, clamped to fit
fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let x = r.x + (r.width - width) / 2;
    let y = r.y + (r.height - height) / 2;
    Rect::new(x, y, width, height)
}
