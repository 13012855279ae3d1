// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use orderdesk_app::{
    BadgeTone, DELETE_PROMPT, OrderField, OrderKey, OrderTableView, RowCell, ViewEvent, ViewMode,
    edit_form_fields,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::info;

const ACTIONS_HEADER: &str = "Actions";
const ACTIONS_CELL: &str = "e edit  d delete";
const FORM_CURSOR: &str = "›";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiOptions {
    pub title: String,
    pub status_clear: Duration,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            title: "All Orders".to_owned(),
            status_clear: Duration::from_secs(4),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct FormUiState {
    field_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct ConfirmUiState {
    id: OrderKey,
    customer: String,
    product_name: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ViewData {
    title: String,
    selected_row: usize,
    form: Option<FormUiState>,
    confirm: Option<ConfirmUiState>,
    help_visible: bool,
    status_line: Option<String>,
    status_token: u64,
    status_clear: Duration,
}

impl ViewData {
    fn new(options: &UiOptions) -> Self {
        Self {
            title: options.title.clone(),
            status_clear: options.status_clear,
            ..Self::default()
        }
    }
}

pub fn run_app(view: &mut OrderTableView, options: &UiOptions) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    info!(orders = view.orders().len(), "order table opened");
    let result = with_terminal_restored(
        || {
            execute!(io::stdout(), terminal::EnterAlternateScreen)
                .context("enter alternate screen")?;
            event_loop(view, options)
        },
        restore_terminal,
    );
    info!(orders = view.orders().len(), "order table closed");
    result
}

/// Runs `body`, then always runs `restore`. An error from `body` wins over
/// one from `restore`.
fn with_terminal_restored<T>(
    body: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    let result = body();
    let restored = restore();
    match result {
        Ok(value) => restored.map(|()| value),
        Err(error) => Err(error),
    }
}

fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode().context("disable raw mode");
    let screen =
        execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen");
    raw.and(screen)
}

fn event_loop(view: &mut OrderTableView, options: &UiOptions) -> Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(options);
    let (internal_tx, internal_rx) = mpsc::channel();

    loop {
        process_internal_events(&mut view_data, &internal_rx);
        terminal
            .draw(|frame| render(frame, view, &view_data))
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(120)).context("poll event")? {
            continue;
        }
        if let Event::Key(key) = event::read().context("read event")?
            && handle_key_event(view, &mut view_data, &internal_tx, key)
        {
            return Ok(());
        }
    }
}

fn process_internal_events(view_data: &mut ViewData, rx: &Receiver<InternalEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                view_data.status_line = None;
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64, delay: Duration) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    view_data.status_line = Some(message.into());
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token, view_data.status_clear);
}

fn status_for_event(event: &ViewEvent) -> Option<String> {
    match event {
        ViewEvent::EditOpened(id) => Some(format!("editing order {id}")),
        ViewEvent::FieldUpdated(_) | ViewEvent::NoEdit => None,
        ViewEvent::Saved { id, replaced } if *replaced > 0 => Some(format!("order {id} saved")),
        // A save whose order is gone closes quietly.
        ViewEvent::Saved { .. } | ViewEvent::EditClosed => Some("edit closed".to_owned()),
        ViewEvent::Deleted { id, .. } => Some(format!("order {id} deleted")),
        ViewEvent::DeleteDeclined(_) => Some("delete canceled".to_owned()),
    }
}

fn apply_view_event(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    event: &ViewEvent,
) {
    if let Some(status) = status_for_event(event) {
        emit_status(view_data, internal_tx, status);
    }
}

fn handle_key_event(
    view: &mut OrderTableView,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
            emit_status(view_data, internal_tx, "help hidden");
        }
        return false;
    }

    if view_data.confirm.is_some() {
        handle_confirm_key(view, view_data, internal_tx, key);
        return false;
    }

    if view.mode() == ViewMode::Editing {
        handle_form_key(view, view_data, internal_tx, key);
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return true,
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => move_row(view, view_data, 1),
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => move_row(view, view_data, -1),
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
            view_data.selected_row = 0;
        }
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
            view_data.selected_row = view.orders().len().saturating_sub(1);
        }
        (KeyCode::Char('e'), KeyModifiers::NONE) | (KeyCode::Enter, _) => {
            match view.begin_edit_at(view_data.selected_row) {
                Some(event) => {
                    view_data.form = Some(FormUiState::default());
                    apply_view_event(view_data, internal_tx, &event);
                }
                None => emit_status(view_data, internal_tx, "no row selected"),
            }
        }
        (KeyCode::Char('d'), KeyModifiers::NONE) => match view.orders().get(view_data.selected_row)
        {
            Some(order) => {
                view_data.confirm = Some(ConfirmUiState {
                    id: order.id.clone(),
                    customer: order.customer.clone(),
                    product_name: order.product_name.clone(),
                });
            }
            None => emit_status(view_data, internal_tx, "no row selected"),
        },
        (KeyCode::Char('?'), KeyModifiers::NONE) => {
            view_data.help_visible = true;
            emit_status(view_data, internal_tx, "help open");
        }
        (KeyCode::Esc, _) => {
            view_data.status_line = None;
        }
        _ => {}
    }

    false
}

fn handle_confirm_key(
    view: &mut OrderTableView,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let answer = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => true,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
        _ => return,
    };
    let Some(confirm) = view_data.confirm.take() else {
        return;
    };

    let event = view.delete(&confirm.id, answer);
    clamp_selected_row(view, view_data);
    apply_view_event(view_data, internal_tx, &event);
}

fn handle_form_key(
    view: &mut OrderTableView,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let form = *view_data.form.get_or_insert_with(FormUiState::default);
    let field = OrderField::ALL[form.field_index.min(OrderField::ALL.len() - 1)];

    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            let event = view.cancel_edit();
            view_data.form = None;
            apply_view_event(view_data, internal_tx, &event);
        }
        (KeyCode::Enter, _) | (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
            let event = view.save();
            view_data.form = None;
            clamp_selected_row(view, view_data);
            apply_view_event(view_data, internal_tx, &event);
        }
        (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::Down, _) => {
            let status = move_form_field_cursor(view_data, 1);
            emit_status(view_data, internal_tx, status);
        }
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => {
            let status = move_form_field_cursor(view_data, -1);
            emit_status(view_data, internal_tx, status);
        }
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            view.update_field(field, String::new());
        }
        (KeyCode::Backspace, _) => {
            if let Some(mut text) = view.edit_buffer().map(|order| order.field_text(field)) {
                text.pop();
                view.update_field(field, text);
            }
        }
        (KeyCode::Char(ch), modifiers)
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            if let Some(mut text) = view.edit_buffer().map(|order| order.field_text(field)) {
                text.push(ch);
                view.update_field(field, text);
            }
        }
        _ => {}
    }
}

fn move_form_field_cursor(view_data: &mut ViewData, delta: isize) -> String {
    let mut form = view_data.form.unwrap_or_default();
    let len = OrderField::ALL.len() as isize;
    form.field_index = (form.field_index as isize + delta).rem_euclid(len) as usize;
    view_data.form = Some(form);
    format_form_field_status(form.field_index)
}

fn format_form_field_status(index: usize) -> String {
    let fields = OrderField::ALL;
    let field = fields[index.min(fields.len() - 1)];
    format!("field {} ({}/{})", field.key(), index + 1, fields.len())
}

fn move_row(view: &OrderTableView, view_data: &mut ViewData, delta: isize) {
    let len = view.orders().len();
    if len == 0 {
        view_data.selected_row = 0;
        return;
    }
    let next = (view_data.selected_row as isize + delta).clamp(0, len as isize - 1);
    view_data.selected_row = next as usize;
}

fn clamp_selected_row(view: &OrderTableView, view_data: &mut ViewData) {
    view_data.selected_row = view_data
        .selected_row
        .min(view.orders().len().saturating_sub(1));
}

fn render(frame: &mut ratatui::Frame<'_>, view: &OrderTableView, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let heading = Paragraph::new(format!("{} ({})", view_data.title, order_count_label(view)))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().title("orderdesk").borders(Borders::ALL));
    frame.render_widget(heading, layout[0]);

    render_table(frame, layout[1], view, view_data);

    let status_widget = Paragraph::new(status_text(view, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if let (Some(order), Some(form)) = (view.edit_buffer(), view_data.form) {
        let area = centered_rect(70, 80, frame.area());
        frame.render_widget(Clear, area);
        let overlay = Paragraph::new(render_form_overlay_text(order, form.field_index)).block(
            Block::default()
                .title("Edit Order")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(overlay, area);
    }

    if let Some(confirm) = &view_data.confirm {
        let area = centered_rect(50, 30, frame.area());
        frame.render_widget(Clear, area);
        let dialog = Paragraph::new(render_confirm_overlay_text(confirm)).block(
            Block::default()
                .title("delete")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Red)),
        );
        frame.render_widget(dialog, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn order_count_label(view: &OrderTableView) -> String {
    match view.orders().len() {
        1 => "1 order".to_owned(),
        count => format!("{count} orders"),
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    view: &OrderTableView,
    view_data: &ViewData,
) {
    let header_cells = OrderField::ALL
        .iter()
        .map(|field| field.header())
        .chain([ACTIONS_HEADER])
        .map(|label| {
            Cell::from(label).style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        });
    let header = Row::new(header_cells).style(Style::default().bg(Color::Blue));

    let rows = view.rows().into_iter().enumerate().map(|(row_index, row)| {
        let selected = row_index == view_data.selected_row;
        let mut cells = row
            .cells
            .iter()
            .map(|cell| match cell {
                RowCell::Text(text) => Cell::from(text.clone()),
                RowCell::Badge(badge) => Cell::from(badge.text.clone()).style(badge_style(badge.tone)),
            })
            .collect::<Vec<_>>();
        cells.push(Cell::from(ACTIONS_CELL).style(Style::default().fg(Color::DarkGray)));

        let row_style = if selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        Row::new(cells).style(row_style)
    });

    let widths = column_widths();
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(view_data.title.as_str())
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn column_widths() -> Vec<Constraint> {
    OrderField::ALL
        .iter()
        .map(|field| match field {
            OrderField::Id | OrderField::Quantity => Constraint::Length(8),
            OrderField::Description => Constraint::Min(20),
            OrderField::Customer | OrderField::ProductName | OrderField::Status => {
                Constraint::Min(12)
            }
            _ => Constraint::Min(9),
        })
        .chain([Constraint::Length(ACTIONS_CELL.chars().count() as u16)])
        .collect()
}

fn badge_style(tone: BadgeTone) -> Style {
    let color = match tone {
        BadgeTone::Blue => Color::Blue,
        BadgeTone::Yellow => Color::Yellow,
        BadgeTone::Green => Color::Green,
        BadgeTone::Red => Color::Red,
        BadgeTone::Neutral => Color::Gray,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn render_form_overlay_text(order: &orderdesk_app::Order, field_index: usize) -> String {
    let fields = edit_form_fields();
    let mut lines = Vec::with_capacity(fields.len() + 2);
    for (index, (field, input)) in fields.into_iter().enumerate() {
        let marker = if index == field_index { FORM_CURSOR } else { " " };
        lines.push(format!(
            "{marker} {:<16} {:<8} {}",
            field.key(),
            input.hint(),
            order.field_text(field)
        ));
    }
    lines.push(String::new());
    lines.push("enter save | esc close | tab/shift+tab field | ctrl+u clear".to_owned());
    lines.join("\n")
}

fn render_confirm_overlay_text(confirm: &ConfirmUiState) -> String {
    format!(
        "{DELETE_PROMPT}\n\norder {}: {} / {}\n\ny confirm | n cancel",
        confirm.id, confirm.customer, confirm.product_name
    )
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
table: j/k or up/down move | g/G first/last | e or enter edit | d delete | esc clear status | q quit\n\
edit: type to change field | backspace delete char | ctrl+u clear field | tab/shift+tab field\n\
edit: enter or ctrl+s save | esc close without saving\n\
delete: y or enter confirm | n or esc cancel"
}

fn status_text(view: &OrderTableView, view_data: &ViewData) -> String {
    let mode = if view_data.confirm.is_some() {
        "CONFIRM"
    } else {
        match view.mode() {
            ViewMode::Browsing => "TABLE",
            ViewMode::Editing => "EDIT",
        }
    };
    let hints = match (view.mode(), view_data.confirm.is_some()) {
        (_, true) => "y confirm | n cancel",
        (ViewMode::Editing, false) => "enter save | esc close | tab field",
        (ViewMode::Browsing, false) => "j/k move | e edit | d delete | ? help | q quit",
    };
    match &view_data.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        ConfirmUiState, InternalEvent, UiOptions, ViewData, badge_style, format_form_field_status,
        handle_key_event, help_overlay_text, process_internal_events, render,
        render_confirm_overlay_text, render_form_overlay_text, status_for_event, status_text,
        with_terminal_restored,
    };
    use anyhow::{Result, anyhow};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use orderdesk_app::{
        BadgeTone, DELETE_PROMPT, Loose, OrderField, OrderTableView, ViewEvent, ViewMode,
    };
    use orderdesk_testkit::OrderBuilder;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;
    use std::cell::Cell;
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::time::Duration;

    fn view_data_for_test() -> ViewData {
        ViewData::new(&UiOptions {
            status_clear: Duration::from_secs(60),
            ..UiOptions::default()
        })
    }

    fn internal_channel() -> (Sender<InternalEvent>, Receiver<InternalEvent>) {
        mpsc::channel()
    }

    fn press(
        view: &mut OrderTableView,
        view_data: &mut ViewData,
        tx: &Sender<InternalEvent>,
        code: KeyCode,
    ) -> bool {
        handle_key_event(view, view_data, tx, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press_ctrl(
        view: &mut OrderTableView,
        view_data: &mut ViewData,
        tx: &Sender<InternalEvent>,
        ch: char,
    ) -> bool {
        handle_key_event(
            view,
            view_data,
            tx,
            KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL),
        )
    }

    fn type_text(
        view: &mut OrderTableView,
        view_data: &mut ViewData,
        tx: &Sender<InternalEvent>,
        text: &str,
    ) {
        for ch in text.chars() {
            press(view, view_data, tx, KeyCode::Char(ch));
        }
    }

    fn rendered_text(view: &OrderTableView, view_data: &ViewData) -> String {
        let mut terminal =
            Terminal::new(TestBackend::new(220, 40)).expect("test terminal should build");
        terminal
            .draw(|frame| render(frame, view, view_data))
            .expect("draw should succeed");
        let buffer = terminal.backend().buffer().clone();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn terminal_is_restored_after_body_error_and_body_error_wins() {
        let restored = Cell::new(false);
        let error = with_terminal_restored(
            || -> Result<()> { Err(anyhow!("draw frame")) },
            || {
                restored.set(true);
                Err(anyhow!("leave alternate screen"))
            },
        )
        .expect_err("body error should surface");

        assert!(restored.get());
        assert_eq!(error.to_string(), "draw frame");
    }

    #[test]
    fn restore_error_surfaces_when_body_succeeds() {
        let error = with_terminal_restored(|| Ok(7), || Err(anyhow!("disable raw mode")))
            .expect_err("restore error should surface");
        assert_eq!(error.to_string(), "disable raw mode");

        let value = with_terminal_restored(|| Ok(7), || Ok(())).expect("clean exit");
        assert_eq!(value, 7);
    }

    #[test]
    fn edit_type_and_save_updates_selected_order() {
        let mut view = OrderTableView::seeded();
        let mut view_data = view_data_for_test();
        let (tx, _rx) = internal_channel();

        press(&mut view, &mut view_data, &tx, KeyCode::Char('j'));
        press(&mut view, &mut view_data, &tx, KeyCode::Char('e'));
        assert_eq!(view.mode(), ViewMode::Editing);
        assert_eq!(view_data.status_line.as_deref(), Some("editing order 2"));

        for _ in 0..6 {
            press(&mut view, &mut view_data, &tx, KeyCode::Tab);
        }
        assert_eq!(view_data.status_line.as_deref(), Some("field price (7/12)"));

        press_ctrl(&mut view, &mut view_data, &tx, 'u');
        type_text(&mut view, &mut view_data, &tx, "9");
        press(&mut view, &mut view_data, &tx, KeyCode::Enter);

        assert_eq!(view.mode(), ViewMode::Browsing);
        assert_eq!(view.orders()[1].price, Loose::Text("9".to_owned()));
        assert_eq!(view.orders()[1].customer, "Jane Smith");
        assert_eq!(view_data.status_line.as_deref(), Some("order 2 saved"));
        assert_eq!(view_data.form, None);
    }

    #[test]
    fn typing_appends_and_backspace_trims_current_field() {
        let mut view = OrderTableView::seeded();
        let mut view_data = view_data_for_test();
        let (tx, _rx) = internal_channel();

        press(&mut view, &mut view_data, &tx, KeyCode::Enter);
        press(&mut view, &mut view_data, &tx, KeyCode::Tab);
        type_text(&mut view, &mut view_data, &tx, " Jr.");
        press(&mut view, &mut view_data, &tx, KeyCode::Backspace);

        let buffer = view.edit_buffer().expect("edit buffer open");
        assert_eq!(buffer.customer, "John Doe Jr");
        assert_eq!(view.orders()[0].customer, "John Doe");
    }

    #[test]
    fn shifted_characters_are_typed_not_ignored() {
        let mut view = OrderTableView::seeded();
        let mut view_data = view_data_for_test();
        let (tx, _rx) = internal_channel();

        press(&mut view, &mut view_data, &tx, KeyCode::Char('e'));
        press(&mut view, &mut view_data, &tx, KeyCode::BackTab);
        assert_eq!(view_data.status_line.as_deref(), Some("field total (12/12)"));
        handle_key_event(
            &mut view,
            &mut view_data,
            &tx,
            KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT),
        );

        assert_eq!(
            view.edit_buffer().map(|order| order.total.clone()),
            Some(Loose::Text("150X".to_owned()))
        );
    }

    #[test]
    fn esc_closes_form_without_saving() {
        let mut view = OrderTableView::seeded();
        let mut view_data = view_data_for_test();
        let (tx, _rx) = internal_channel();

        press(&mut view, &mut view_data, &tx, KeyCode::Char('e'));
        press_ctrl(&mut view, &mut view_data, &tx, 'u');
        type_text(&mut view, &mut view_data, &tx, "x");
        press(&mut view, &mut view_data, &tx, KeyCode::Esc);

        assert_eq!(view, OrderTableView::seeded());
        assert_eq!(view_data.status_line.as_deref(), Some("edit closed"));
    }

    #[test]
    fn delete_waits_for_confirmation_then_removes_row() {
        let mut view = OrderTableView::seeded();
        let mut view_data = view_data_for_test();
        let (tx, _rx) = internal_channel();

        press(&mut view, &mut view_data, &tx, KeyCode::Char('d'));
        assert!(view_data.confirm.is_some());
        assert_eq!(view.orders().len(), 3);

        // Unrelated keys do nothing while the prompt is open.
        press(&mut view, &mut view_data, &tx, KeyCode::Char('j'));
        press(&mut view, &mut view_data, &tx, KeyCode::Char('e'));
        assert_eq!(view.mode(), ViewMode::Browsing);
        assert_eq!(view_data.selected_row, 0);

        press(&mut view, &mut view_data, &tx, KeyCode::Char('y'));
        assert!(view_data.confirm.is_none());
        let ids: Vec<_> = view.orders().iter().map(|order| order.id.clone()).collect();
        assert_eq!(ids, vec![Loose::Typed(2), Loose::Typed(3)]);
        assert_eq!(view_data.status_line.as_deref(), Some("order 1 deleted"));
    }

    #[test]
    fn declined_delete_keeps_rows() {
        let mut view = OrderTableView::seeded();
        let mut view_data = view_data_for_test();
        let (tx, _rx) = internal_channel();

        press(&mut view, &mut view_data, &tx, KeyCode::Char('d'));
        press(&mut view, &mut view_data, &tx, KeyCode::Char('n'));

        assert_eq!(view.orders().len(), 3);
        assert_eq!(view_data.status_line.as_deref(), Some("delete canceled"));
    }

    #[test]
    fn deleting_last_row_clamps_selection() {
        let mut view = OrderTableView::seeded();
        let mut view_data = view_data_for_test();
        let (tx, _rx) = internal_channel();

        press(&mut view, &mut view_data, &tx, KeyCode::Char('G'));
        assert_eq!(view_data.selected_row, 2);
        press(&mut view, &mut view_data, &tx, KeyCode::Char('d'));
        press(&mut view, &mut view_data, &tx, KeyCode::Enter);

        assert_eq!(view.orders().len(), 2);
        assert_eq!(view_data.selected_row, 1);
    }

    #[test]
    fn empty_table_reports_no_selection() {
        let mut view = OrderTableView::new(Vec::new());
        let mut view_data = view_data_for_test();
        let (tx, _rx) = internal_channel();

        press(&mut view, &mut view_data, &tx, KeyCode::Char('d'));
        assert!(view_data.confirm.is_none());
        assert_eq!(view_data.status_line.as_deref(), Some("no row selected"));

        press(&mut view, &mut view_data, &tx, KeyCode::Char('e'));
        assert_eq!(view.mode(), ViewMode::Browsing);
    }

    #[test]
    fn row_cursor_stays_in_bounds() {
        let mut view = OrderTableView::seeded();
        let mut view_data = view_data_for_test();
        let (tx, _rx) = internal_channel();

        press(&mut view, &mut view_data, &tx, KeyCode::Char('k'));
        assert_eq!(view_data.selected_row, 0);
        for _ in 0..5 {
            press(&mut view, &mut view_data, &tx, KeyCode::Down);
        }
        assert_eq!(view_data.selected_row, 2);
        press(&mut view, &mut view_data, &tx, KeyCode::Char('g'));
        assert_eq!(view_data.selected_row, 0);
    }

    #[test]
    fn quit_keys_end_the_loop_only_outside_forms() {
        let mut view = OrderTableView::seeded();
        let mut view_data = view_data_for_test();
        let (tx, _rx) = internal_channel();

        press(&mut view, &mut view_data, &tx, KeyCode::Char('e'));
        assert!(!press(&mut view, &mut view_data, &tx, KeyCode::Char('q')));
        assert!(press_ctrl(&mut view, &mut view_data, &tx, 'q'));

        press(&mut view, &mut view_data, &tx, KeyCode::Esc);
        assert!(press(&mut view, &mut view_data, &tx, KeyCode::Char('q')));
    }

    #[test]
    fn help_overlay_swallows_keys_until_closed() {
        let mut view = OrderTableView::seeded();
        let mut view_data = view_data_for_test();
        let (tx, _rx) = internal_channel();

        press(&mut view, &mut view_data, &tx, KeyCode::Char('?'));
        assert!(view_data.help_visible);
        press(&mut view, &mut view_data, &tx, KeyCode::Char('d'));
        assert!(view_data.confirm.is_none());

        press(&mut view, &mut view_data, &tx, KeyCode::Esc);
        assert!(!view_data.help_visible);
        assert_eq!(view_data.status_line.as_deref(), Some("help hidden"));
        assert!(help_overlay_text().contains("d delete"));
    }

    #[test]
    fn stale_status_tokens_do_not_clear_newer_messages() {
        let mut view_data = view_data_for_test();
        let (tx, rx) = internal_channel();
        view_data.status_line = Some("order 1 deleted".to_owned());
        view_data.status_token = 2;

        tx.send(InternalEvent::ClearStatus { token: 1 })
            .expect("channel open");
        process_internal_events(&mut view_data, &rx);
        assert_eq!(view_data.status_line.as_deref(), Some("order 1 deleted"));

        tx.send(InternalEvent::ClearStatus { token: 2 })
            .expect("channel open");
        process_internal_events(&mut view_data, &rx);
        assert_eq!(view_data.status_line, None);
    }

    #[test]
    fn silent_save_miss_reads_as_closed() {
        let missed = ViewEvent::Saved {
            id: Loose::Typed(3),
            replaced: 0,
        };
        assert_eq!(status_for_event(&missed).as_deref(), Some("edit closed"));
        assert_eq!(
            status_for_event(&ViewEvent::FieldUpdated(OrderField::Price)),
            None
        );
    }

    #[test]
    fn form_overlay_lists_every_field_with_cursor() {
        let order = OrderTableView::seeded().orders()[0].clone();
        let text = render_form_overlay_text(&order, 2);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines[0].split_whitespace().collect::<Vec<_>>(),
            vec!["id", "int", "1"]
        );
        assert!(lines[2].starts_with("› product_name"));
        assert!(lines[2].contains(" text "));
        assert!(lines[2].ends_with("Milk"));
        assert_eq!(
            lines[6].split_whitespace().collect::<Vec<_>>(),
            vec!["price", "decimal", "5"]
        );
        assert!(lines[11].contains("total"));
        assert!(text.contains("enter save"));
        assert_eq!(format_form_field_status(2), "field product_name (3/12)");
    }

    #[test]
    fn confirm_overlay_shows_prompt_and_order() {
        let text = render_confirm_overlay_text(&ConfirmUiState {
            id: Loose::Typed(2),
            customer: "Jane Smith".to_owned(),
            product_name: "Cheese".to_owned(),
        });
        assert!(text.starts_with(DELETE_PROMPT));
        assert!(text.contains("order 2: Jane Smith / Cheese"));
    }

    #[test]
    fn badge_tones_map_to_colors() {
        assert_eq!(badge_style(BadgeTone::Blue).fg, Some(Color::Blue));
        assert_eq!(badge_style(BadgeTone::Red).fg, Some(Color::Red));
        assert_eq!(badge_style(BadgeTone::Neutral).fg, Some(Color::Gray));
    }

    #[test]
    fn status_text_tracks_mode() {
        let mut view = OrderTableView::seeded();
        let mut view_data = view_data_for_test();
        assert!(status_text(&view, &view_data).starts_with("TABLE | "));

        view.begin_edit_at(0);
        view_data.status_line = Some("editing order 1".to_owned());
        assert!(status_text(&view, &view_data).starts_with("EDIT | editing order 1 | enter save"));
    }

    #[test]
    fn rendered_table_shows_headers_and_badges() {
        let view = OrderTableView::new(vec![
            OrderBuilder::new(1).customer("Dana").status("Shipped").build(),
            OrderBuilder::new(2).customer("Eli").status("Backordered").build(),
        ]);
        let view_data = view_data_for_test();

        let text = rendered_text(&view, &view_data);
        assert!(text.contains("All Orders (2 orders)"));
        assert!(text.contains("Order ID"));
        assert!(text.contains("Actions"));
        assert!(text.contains("Shipped"));
        assert!(text.contains("Backordered"));
        assert!(text.contains("e edit  d delete"));
    }

    #[test]
    fn rendered_edit_overlay_appears_only_while_editing() {
        let mut view = OrderTableView::seeded();
        let mut view_data = view_data_for_test();
        let (tx, _rx) = internal_channel();

        assert!(!rendered_text(&view, &view_data).contains("Edit Order"));
        press(&mut view, &mut view_data, &tx, KeyCode::Char('e'));
        let text = rendered_text(&view, &view_data);
        assert!(text.contains("Edit Order"));
        assert!(text.contains("sub_category"));
    }
}
