use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use premscout::feed;
use premscout::lineup;
use premscout::rating;
use premscout::roster::PlayerRecord;
use premscout::state::{AppState, Delta, ProviderCommand, Screen, apply_delta};
use premscout::table_query::{PAGE_SIZE, SortField, TablePage};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.search_active {
            self.on_search_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.screen = Screen::Lineup,
            KeyCode::Char('2') => self.state.screen = Screen::Table,
            KeyCode::Char('d') | KeyCode::Enter => self.state.open_detail(),
            KeyCode::Char('b') | KeyCode::Esc => {
                if self.state.selected_player.is_some() {
                    self.state.close_detail();
                } else if self.state.help_overlay {
                    self.state.help_overlay = false;
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('h') | KeyCode::Left => self.state.prev_page(),
            KeyCode::Char('l') | KeyCode::Right => self.state.next_page(),
            KeyCode::Char('/') => {
                self.state.screen = Screen::Table;
                self.state.search_active = true;
            }
            KeyCode::Char('p') => self.state.cycle_position_filter(),
            KeyCode::Char('t') => self.state.cycle_team_filter(),
            KeyCode::Char('[') => self.state.adjust_max_cost(-1),
            KeyCode::Char(']') => self.state.adjust_max_cost(1),
            KeyCode::Char('s') => self.cycle_sort_field(),
            KeyCode::Char('x') => {
                if let Some(field) = self.state.query.sort {
                    self.state.toggle_sort(field);
                }
            }
            KeyCode::Char('0') => self.state.reset_sort(),
            KeyCode::Char('r') => self.request_reload(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.state.search_active = false,
            KeyCode::Backspace => self.state.search_pop(),
            KeyCode::Char(c) => self.state.search_push(c),
            _ => {}
        }
    }

    fn cycle_sort_field(&mut self) {
        let next = match self.state.query.sort {
            None => Some(SortField::ALL[0]),
            Some(current) => SortField::ALL
                .iter()
                .position(|f| *f == current)
                .and_then(|idx| SortField::ALL.get(idx + 1))
                .copied(),
        };
        match next {
            Some(field) => {
                self.state.query.sort = Some(field);
                self.state.query.descending = true;
            }
            None => self.state.reset_sort(),
        }
    }

    fn request_reload(&mut self) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Reload unavailable");
            return;
        };
        if tx.send(ProviderCommand::Reload).is_err() {
            self.state.push_log("[WARN] Reload request failed");
        } else {
            self.state.push_log("[INFO] Reload requested");
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    feed::spawn_csv_provider(tx, cmd_rx);

    let mut app = App::new(Some(cmd_tx));
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Lineup => render_lineup(frame, chunks[1], &app.state),
        Screen::Table => render_table(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(app.state.last_log().unwrap_or("No activity yet"))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state));
    frame.render_widget(footer, chunks[3]);

    if let Some(player) = &app.state.selected_player {
        render_detail_overlay(frame, frame.size(), player, &app.state.enriched);
    }

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let screen = match state.screen {
        Screen::Lineup => "TEAM OF THE WEEK",
        Screen::Table => "PLAYER DATA",
    };
    let sort = match state.query.sort {
        Some(field) => format!(
            "{} {}",
            field.label(),
            if state.query.descending { "v" } else { "^" }
        ),
        None => "none".to_string(),
    };
    let line1 = format!("  __  PREMSCOUT | {} | {screen} | Sort: {sort}", state.gameweek);
    let line2 = " (__)".to_string();
    format!("{line1}\n{line2}")
}

fn footer_text(state: &AppState) -> String {
    if state.search_active {
        return format!(
            "Search: {}_  (Enter/Esc done, Backspace delete)",
            state.query.name_filter
        );
    }
    match state.screen {
        Screen::Lineup => {
            "1 Lineup | 2 Table | j/k Move | Enter/d Card | r Reload | ? Help | q Quit".to_string()
        }
        Screen::Table => {
            "/ Search | p Pos | t Team | [/] Price | s Sort | x Flip | 0 Reset | h/l Page | Enter Card | q Quit"
                .to_string()
        }
    }
}

fn render_lineup(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = state.lineup_rows();
    if rows.iter().all(Vec::is_empty) {
        let empty = Paragraph::new("No player data yet")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    let title = Paragraph::new(format!(
        "{} PREMSCOUT Projected Points",
        state.gameweek
    ))
    .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center);
    frame.render_widget(title, sections[0]);

    let mut flat_idx = 0usize;
    for (row_idx, row) in rows.iter().enumerate() {
        let row_area = sections[row_idx + 1];
        if row.is_empty() {
            continue;
        }
        let constraints: Vec<Constraint> = row
            .iter()
            .map(|_| Constraint::Ratio(1, row.len() as u32))
            .collect();
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(row_area);

        for (col_idx, player) in row.iter().enumerate() {
            let selected = flat_idx == state.lineup_cursor;
            render_lineup_card(frame, cols[col_idx], player, selected);
            flat_idx += 1;
        }
    }
}

fn render_lineup_card(frame: &mut Frame, area: Rect, player: &PlayerRecord, selected: bool) {
    let style = if selected {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(player.position.code())
        .borders(Borders::ALL)
        .style(style);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }
    let text = format!(
        "{}\n{}\n{:.1} pts",
        player.name,
        player.team,
        lineup::display_points(player.predicted_points)
    );
    let card = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(card, inner);
}

fn render_table(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let page = state.table_page();
    render_filter_line(frame, sections[0], state, &page);

    let widths = table_columns();
    render_table_header(frame, sections[1], &widths, state.query.sort);

    let list_area = sections[2];
    if page.rows.is_empty() {
        let empty = Paragraph::new("No players match the current filters")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    let visible = (list_area.height as usize).min(page.rows.len()).min(PAGE_SIZE);
    for (i, player) in page.rows.iter().take(visible).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let selected = i == state.table_cursor;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let scout_style = if selected {
            row_style
        } else {
            Style::default().fg(Color::Green)
        };

        render_cell_text(frame, cols[0], &player.name, row_style);
        render_cell_text(frame, cols[1], &player.team, row_style);
        render_cell_text(frame, cols[2], player.position.code(), row_style);
        render_cell_text(frame, cols[3], &format!("{:.1}", player.expected_goals), scout_style);
        render_cell_text(
            frame,
            cols[4],
            &format!("{:.1}", lineup::display_points(player.predicted_points)),
            scout_style,
        );
        render_cell_text(frame, cols[5], &format!("{:.0}", player.goals_scored), row_style);
        render_cell_text(frame, cols[6], &format!("{:.0}", player.total_points), row_style);
        render_cell_text(
            frame,
            cols[7],
            &format!("${:.1}M", player.now_cost as f64 / 10.0),
            row_style,
        );
        render_cell_text(frame, cols[8], &format!("{:.1}", player.form), row_style);
        render_cell_text(frame, cols[9], &format!("{:.0}", player.assists), row_style);
        render_cell_text(frame, cols[10], &format!("{:.0}", player.clean_sheets), row_style);
        render_cell_text(frame, cols[11], &format!("{:.1}", player.saves_per_90), row_style);
    }
}

fn render_filter_line(frame: &mut Frame, area: Rect, state: &AppState, page: &TablePage) {
    let position = state
        .query
        .position_filter
        .map(|p| p.code())
        .unwrap_or("All");
    let team = if state.query.team_filter.is_empty() {
        "All"
    } else {
        state.query.team_filter.as_str()
    };
    let search = if state.query.name_filter.is_empty() {
        "-".to_string()
    } else {
        state.query.name_filter.clone()
    };
    let text = format!(
        "Search: {search} | Pos: {position} | Team: {team} | Max price: ${:.1}M | Page {} of {}",
        state.query.max_cost_tenths as f64 / 10.0,
        state.query.page,
        page.total_pages.max(1)
    );
    let line = Paragraph::new(text).style(Style::default().fg(Color::Cyan));
    frame.render_widget(line, area);
}

fn table_columns() -> [Constraint; 12] {
    [
        Constraint::Min(18),
        Constraint::Length(14),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(4),
        Constraint::Length(6),
    ]
}

fn render_table_header(
    frame: &mut Frame,
    area: Rect,
    widths: &[Constraint],
    sort: Option<SortField>,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);

    let fields = [
        SortField::Name,
        SortField::Team,
        SortField::Position,
        SortField::ExpectedGoals,
        SortField::PredictedPoints,
        SortField::GoalsScored,
        SortField::TotalPoints,
        SortField::NowCost,
        SortField::Form,
        SortField::Assists,
        SortField::CleanSheets,
        SortField::SavesPer90,
    ];
    for (i, field) in fields.iter().enumerate() {
        let mut style = Style::default().add_modifier(Modifier::BOLD);
        if matches!(field, SortField::ExpectedGoals | SortField::PredictedPoints) {
            style = style.fg(Color::Green);
        }
        if sort == Some(*field) {
            style = style.bg(Color::Blue);
        }
        render_cell_text(frame, cols[i], field.label(), style);
    }
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, area);
}

fn render_detail_overlay(
    frame: &mut Frame,
    area: Rect,
    player: &PlayerRecord,
    all: &[PlayerRecord],
) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let stars = rating::rate_detail(player, all);
    let text = [
        player.team.clone(),
        player.name.clone(),
        player.position.label().to_string(),
        String::new(),
        format!("Total Points: {:.0}", player.total_points),
        format!("Price: ${:.1}M", player.now_cost as f64 / 10.0),
        format!("Goals: {:.0}", player.goals_scored),
        format!("Assists: {:.0}", player.assists),
        format!("Minutes: {:.0}", player.minutes),
        format!("Form: {:.1}", player.form),
        format!("Headshot: {}", player.image),
        String::new(),
        format!("Position Value Rating: {}", rating::star_bar(stars)),
        rating::detail_tooltip(player.position),
    ]
    .join("\n");

    let card = Paragraph::new(text)
        .block(Block::default().title("Player Card").borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(card, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "PREMSCOUT Terminal - Help",
        "",
        "Global:",
        "  1            Team of the Week",
        "  2            Player table",
        "  Enter / d    Player card",
        "  b / Esc      Close card",
        "  j/k or ↑/↓   Move",
        "  r            Reload datasets",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Table:",
        "  /            Name search",
        "  p / t        Position / team filter",
        "  [ / ]        Price ceiling -/+ 0.1M",
        "  s / x / 0    Sort field / flip / reset",
        "  h/l or ←/→   Page",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL));
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
