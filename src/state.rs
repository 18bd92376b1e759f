use std::collections::{HashMap, VecDeque};

use crate::headshots;
use crate::lineup::{self, FORMATION_1_3_4_3};
use crate::roster::{PlayerRecord, Position};
use crate::table_query::{self, MAX_COST_CEILING, SortField, TablePage, TableQuery};

const LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Lineup,
    Table,
}

/// Messages from the dataset provider thread. Each load slot updates
/// independently; the enriched view is rebuilt from whatever is present.
#[derive(Debug, Clone)]
pub enum Delta {
    SetPlayers(Vec<PlayerRecord>),
    SetHeadshots(HashMap<String, String>),
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    Reload,
}

pub struct AppState {
    pub screen: Screen,
    pub gameweek: String,
    /// Load slots, replaced wholesale per load cycle.
    pub players: Vec<PlayerRecord>,
    pub headshots: HashMap<String, String>,
    /// Players with headshots joined; rebuilt on every delta so it stays a
    /// pure function of the two slots.
    pub enriched: Vec<PlayerRecord>,
    pub query: TableQuery,
    pub table_cursor: usize,
    pub lineup_cursor: usize,
    pub selected_player: Option<PlayerRecord>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub search_active: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Lineup,
            gameweek: crate::dataset::gameweek_label(),
            players: Vec::new(),
            headshots: HashMap::new(),
            enriched: Vec::new(),
            query: TableQuery::default(),
            table_cursor: 0,
            lineup_cursor: 0,
            selected_player: None,
            logs: VecDeque::with_capacity(LOG_CAPACITY),
            help_overlay: false,
            search_active: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        if self.logs.len() == LOG_CAPACITY {
            self.logs.pop_front();
        }
        self.logs.push_back(msg.into());
    }

    pub fn last_log(&self) -> Option<&str> {
        self.logs.back().map(String::as_str)
    }

    pub fn table_page(&self) -> TablePage {
        table_query::query_table(&self.enriched, &self.query)
    }

    pub fn lineup_rows(&self) -> Vec<Vec<PlayerRecord>> {
        lineup::select_lineup(&self.enriched, &FORMATION_1_3_4_3)
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        if self.query.sort == Some(field) {
            self.query.descending = !self.query.descending;
        } else {
            self.query.sort = Some(field);
            self.query.descending = true;
        }
    }

    pub fn reset_sort(&mut self) {
        self.query.sort = None;
        self.query.descending = true;
        self.query.page = 1;
    }

    pub fn cycle_position_filter(&mut self) {
        self.query.position_filter = match self.query.position_filter {
            None => Some(Position::Goalkeeper),
            Some(Position::Goalkeeper) => Some(Position::Defender),
            Some(Position::Defender) => Some(Position::Midfielder),
            Some(Position::Midfielder) => Some(Position::Forward),
            Some(Position::Forward) | Some(Position::Unknown) => None,
        };
        self.table_cursor = 0;
    }

    pub fn cycle_team_filter(&mut self) {
        let teams = self.table_page().teams;
        if teams.is_empty() {
            self.query.team_filter.clear();
            return;
        }
        let next = match teams.iter().position(|t| *t == self.query.team_filter) {
            None => Some(0),
            Some(idx) if idx + 1 < teams.len() => Some(idx + 1),
            Some(_) => None,
        };
        self.query.team_filter = next.map(|idx| teams[idx].clone()).unwrap_or_default();
        self.table_cursor = 0;
    }

    /// Adjust the price ceiling by `delta` tenths of a million.
    pub fn adjust_max_cost(&mut self, delta: i32) {
        let current = self.query.max_cost_tenths as i32;
        self.query.max_cost_tenths = (current + delta).clamp(0, MAX_COST_CEILING as i32) as u32;
        self.table_cursor = 0;
    }

    pub fn next_page(&mut self) {
        let total = self.table_page().total_pages;
        if self.query.page < total {
            self.query.page += 1;
            self.table_cursor = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.query.page > 1 {
            self.query.page -= 1;
            self.table_cursor = 0;
        }
    }

    pub fn select_next(&mut self) {
        match self.screen {
            Screen::Table => {
                let len = self.table_page().rows.len();
                if len > 0 {
                    self.table_cursor = (self.table_cursor + 1).min(len - 1);
                }
            }
            Screen::Lineup => {
                let len = self.lineup_len();
                if len > 0 {
                    self.lineup_cursor = (self.lineup_cursor + 1).min(len - 1);
                }
            }
        }
    }

    pub fn select_prev(&mut self) {
        match self.screen {
            Screen::Table => self.table_cursor = self.table_cursor.saturating_sub(1),
            Screen::Lineup => self.lineup_cursor = self.lineup_cursor.saturating_sub(1),
        }
    }

    fn lineup_len(&self) -> usize {
        self.lineup_rows().iter().map(Vec::len).sum()
    }

    /// Record under the cursor on the active screen.
    pub fn highlighted_player(&self) -> Option<PlayerRecord> {
        match self.screen {
            Screen::Table => self.table_page().rows.get(self.table_cursor).cloned(),
            Screen::Lineup => self
                .lineup_rows()
                .into_iter()
                .flatten()
                .nth(self.lineup_cursor),
        }
    }

    pub fn open_detail(&mut self) {
        self.selected_player = self.highlighted_player();
    }

    pub fn close_detail(&mut self) {
        self.selected_player = None;
    }

    pub fn search_push(&mut self, c: char) {
        self.query.name_filter.push(c);
        self.table_cursor = 0;
    }

    pub fn search_pop(&mut self) {
        self.query.name_filter.pop();
        self.table_cursor = 0;
    }

    fn clamp_cursors(&mut self) {
        let rows = self.table_page().rows.len();
        self.table_cursor = self.table_cursor.min(rows.saturating_sub(1));
        let lineup = self.lineup_len();
        self.lineup_cursor = self.lineup_cursor.min(lineup.saturating_sub(1));
    }
}

/// The only way load state changes: pure slot replacement plus a rebuild of
/// the derived join. Whichever dataset lands first shows placeholder images
/// until the other arrives.
pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetPlayers(players) => {
            state.players = players;
            rebuild_enriched(state);
        }
        Delta::SetHeadshots(map) => {
            state.headshots = map;
            rebuild_enriched(state);
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

fn rebuild_enriched(state: &mut AppState) {
    state.enriched = headshots::join_headshots(&state.players, &state.headshots);
    state.clamp_cursors();
}
