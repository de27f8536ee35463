//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the session database,
//! handles key presses, and renders the three tabs: the work plan, the
//! per-project report and the users page.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame, Terminal,
};

use crate::db::{format_priority, format_role, format_status, format_type, truncate, Database, Outcome};
use crate::identity::Actor;
use crate::tui::{
    colors::{priority_color, role_color, status_color, DARK_GREEN, DARK_RED},
    enums::{AppState, Tab},
    input::InputField,
    task_form::{
        TaskForm, DESCRIPTION_ORDER, PRIORITY_ORDER, PROJECT_ORDER, STATUS_ORDER, TITLE_ORDER,
        TYPE_ORDER,
    },
    utils::centered_rect,
};

const READ_ONLY_MESSAGE: &str = "Sola lettura: serve il ruolo Operaio (premi 'r')";

/// Terminal UI state around one session database.
pub struct App {
    state: AppState,
    tab: Tab,
    db: Database,
    task_list_state: TableState,
    task_form: TaskForm,
    project_input: InputField,
    user_input: InputField,
    confirm_delete: Option<u64>,
    status_message: String,
}

impl App {
    pub fn new(db: Database) -> Self {
        let task_form = TaskForm::new(db.projects());
        let mut task_list_state = TableState::default();
        if !db.tasks().is_empty() {
            task_list_state.select(Some(0));
        }
        App {
            state: AppState::Browse,
            tab: Tab::Tasks,
            db,
            task_list_state,
            task_form,
            project_input: InputField::new(),
            user_input: InputField::new(),
            confirm_delete: None,
            status_message: String::new(),
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    fn visible_tabs(&self) -> Vec<Tab> {
        Tab::visible(self.db.is_privileged())
    }

    fn switch_tab(&mut self, forward: bool) {
        let tabs = self.visible_tabs();
        let idx = tabs.iter().position(|t| *t == self.tab).unwrap_or(0);
        let next = if forward {
            (idx + 1) % tabs.len()
        } else {
            (idx + tabs.len() - 1) % tabs.len()
        };
        self.tab = tabs[next];
    }

    fn select_tab(&mut self, n: usize) {
        if let Some(tab) = self.visible_tabs().get(n) {
            self.tab = *tab;
        }
    }

    fn selected_task_id(&self) -> Option<u64> {
        self.task_list_state
            .selected()
            .and_then(|i| self.db.tasks().get(i))
            .map(|t| t.id)
    }

    /// Keep the table selection inside the task list after it changed.
    fn clamp_selection(&mut self) {
        let len = self.db.tasks().len();
        match self.task_list_state.selected() {
            _ if len == 0 => self.task_list_state.select(None),
            Some(i) if i >= len => self.task_list_state.select(Some(len - 1)),
            None => self.task_list_state.select(Some(0)),
            Some(_) => {}
        }
    }

    fn report(&mut self, outcome: Outcome, applied: String) {
        let msg = match outcome {
            Outcome::Applied => applied,
            Outcome::RejectedPermission => READ_ONLY_MESSAGE.to_string(),
            Outcome::RejectedEmpty => "Il nome non può essere vuoto".to_string(),
            Outcome::RejectedNotFound => "Attività non trovata".to_string(),
            Outcome::RejectedDuplicate => "Esiste già un progetto con questo nome".to_string(),
            Outcome::RejectedIdsExhausted => "Identificativi esauriti".to_string(),
        };
        self.set_status_message(msg);
    }

    fn toggle_role(&mut self) {
        let actor = self.db.actor();
        let next = Actor::new(actor.name.clone(), actor.role.toggled());
        self.set_status_message(format!("Ruolo: {}", format_role(next.role)));
        self.db.set_actor(next);
        if !self.visible_tabs().contains(&self.tab) {
            self.tab = Tab::Tasks;
        }
    }

    fn cycle_selected_status(&mut self, forward: bool) {
        let Some(task) = self.selected_task_id().and_then(|id| self.db.get(id)) else {
            return;
        };
        let (id, current) = (task.id, task.status);
        let next = if forward { current.next() } else { current.prev() };
        let outcome = self.db.update_status(id, next);
        self.report(outcome, format!("Stato: {}", format_status(next)));
    }

    /// Dispatch one key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        self.clear_status_message();
        match self.state {
            AppState::Browse => return self.handle_browse_input(key),
            AppState::AddTask => self.handle_form_input(key),
            AppState::AddProject => self.handle_project_input(key),
            AppState::EditUser => self.handle_user_input(key),
            AppState::Confirm => self.handle_confirm_input(key),
            AppState::Help => self.state = AppState::Browse,
        }
        false
    }

    fn handle_browse_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::Right => self.switch_tab(true),
            KeyCode::BackTab | KeyCode::Left => self.switch_tab(false),
            KeyCode::Char(c @ '1'..='3') => self.select_tab(c as usize - '1' as usize),
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            KeyCode::Char('r') => self.toggle_role(),
            KeyCode::Char('u') => {
                self.user_input = InputField::with_value(&self.db.actor().name);
                self.state = AppState::EditUser;
            }
            KeyCode::Char('p') => {
                if self.db.is_privileged() {
                    self.project_input = InputField::new();
                    self.state = AppState::AddProject;
                } else {
                    self.set_status_message(READ_ONLY_MESSAGE);
                }
            }
            _ if self.tab == Tab::Tasks => self.handle_task_list_input(key),
            _ => {}
        }
        false
    }

    fn handle_task_list_input(&mut self, key: KeyCode) {
        let len = self.db.tasks().len();
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(selected) = self.task_list_state.selected() {
                    self.task_list_state.select(Some(selected.saturating_sub(1)));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected + 1 < len {
                        self.task_list_state.select(Some(selected + 1));
                    }
                } else if len > 0 {
                    self.task_list_state.select(Some(0));
                }
            }
            KeyCode::Char('a') => {
                if self.db.is_privileged() {
                    self.task_form = TaskForm::new(self.db.projects());
                    self.state = AppState::AddTask;
                } else {
                    self.set_status_message(READ_ONLY_MESSAGE);
                }
            }
            KeyCode::Char('s') => self.cycle_selected_status(true),
            KeyCode::Char('S') => self.cycle_selected_status(false),
            KeyCode::Char('d') | KeyCode::Delete => {
                if !self.db.is_privileged() {
                    self.set_status_message(READ_ONLY_MESSAGE);
                } else if let Some(id) = self.selected_task_id() {
                    self.confirm_delete = Some(id);
                    self.state = AppState::Confirm;
                }
            }
            _ => {}
        }
    }

    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.state = AppState::Browse;
                self.set_status_message("Inserimento annullato");
            }
            KeyCode::Enter => {
                let before = self.db.tasks().len();
                let outcome = self.db.add_task(self.task_form.to_new_task());
                self.report(outcome, "Attività aggiunta".to_string());
                if outcome.is_applied() {
                    self.state = AppState::Browse;
                    self.task_list_state.select(Some(before));
                }
            }
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            _ => match self.task_form.active_input() {
                Some(input) => edit_input(input, key),
                None => match key {
                    KeyCode::Left => self.task_form.cycle(false),
                    KeyCode::Right | KeyCode::Char(' ') => self.task_form.cycle(true),
                    _ => {}
                },
            },
        }
    }

    fn handle_project_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.state = AppState::Browse,
            KeyCode::Enter => {
                let name = self.project_input.value.clone();
                let outcome = self.db.add_project(&name);
                self.report(outcome, format!("Progetto '{}' aggiunto", name.trim()));
                if outcome.is_applied() {
                    self.state = AppState::Browse;
                }
            }
            _ => edit_input(&mut self.project_input, key),
        }
    }

    fn handle_user_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.state = AppState::Browse,
            KeyCode::Enter => {
                let role = self.db.actor().role;
                let name = self.user_input.take();
                self.set_status_message(format!("Utente: {name}"));
                self.db.set_actor(Actor::new(name, role));
                self.state = AppState::Browse;
            }
            _ => edit_input(&mut self.user_input, key),
        }
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(id) = self.confirm_delete.take() {
                    let outcome = self.db.delete_task(id);
                    self.report(outcome, "Attività eliminata".to_string());
                    self.clamp_selection();
                }
                self.state = AppState::Browse;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_delete = None;
                self.state = AppState::Browse;
            }
            _ => {}
        }
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(false);
                }
                return Ok(self.handle_key(key.code, key.modifiers));
            }
        }
        Ok(false)
    }

    /// Render the title bar with the current user.
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let actor = self.db.actor();
        let access = if actor.is_privileged() { "modifica completa" } else { "sola lettura" };
        let header = Line::from(vec![
            Span::styled("CONTEA · GESTIONE ATTIVITÀ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("{} · {} ({access})", actor.name, format_role(actor.role)),
                Style::default().fg(role_color(actor.role)).add_modifier(Modifier::ITALIC),
            ),
        ]);
        let block = Paragraph::new(header).block(Block::default().borders(Borders::ALL));
        f.render_widget(block, area);
    }

    fn render_tabs(&self, f: &mut Frame, area: Rect) {
        let tabs = self.visible_tabs();
        let titles: Vec<Line> = tabs
            .iter()
            .enumerate()
            .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.title())))
            .collect();
        let selected = tabs.iter().position(|t| *t == self.tab).unwrap_or(0);
        let widget = Tabs::new(titles)
            .select(selected)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(
                Style::default()
                    .fg(role_color(self.db.actor().role))
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(widget, area);
    }

    /// Render the work plan: every task in insertion order.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let header = Row::new(vec!["Tipo", "Stato", "Priorità", "Progetto", "Titolo"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .db
            .tasks()
            .iter()
            .map(|t| {
                let project = if t.project.is_empty() { "-" } else { t.project.as_str() };
                let title = if t.description.is_empty() {
                    t.title.clone()
                } else {
                    format!("{} · {}", t.title, t.description)
                };
                Row::new(vec![
                    Span::raw(format_type(t.kind)),
                    Span::styled(format_status(t.status), Style::default().fg(status_color(t.status))),
                    Span::styled(format_priority(t.priority), Style::default().fg(priority_color(t.priority))),
                    Span::raw(truncate(project, 16)),
                    Span::raw(title),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(8),
            Constraint::Length(11),
            Constraint::Length(9),
            Constraint::Length(17),
            Constraint::Min(20),
        ];

        let hint = if self.db.is_privileged() {
            "a aggiungi · s stato · d elimina · p progetto"
        } else {
            "sola lettura"
        };
        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Attività ({}) - {hint}", self.db.tasks().len())),
            )
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.task_list_state);
    }

    /// Render the per-project report.
    fn render_report(&self, f: &mut Frame, area: Rect) {
        let header = Row::new(vec!["Progetto", "In corso", "Completate", "Totale", "%"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = self
            .db
            .stats()
            .into_iter()
            .map(|s| {
                let pct = s.percent_done();
                let style = if s.total > 0 && s.in_progress == 0 {
                    Style::default().fg(Color::White).bg(DARK_GREEN)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    s.project_name.clone(),
                    s.in_progress.to_string(),
                    s.done.to_string(),
                    s.total.to_string(),
                    format!("{pct}%"),
                ])
                .style(style)
            })
            .collect();
        let widths = [
            Constraint::Min(20),
            Constraint::Length(9),
            Constraint::Length(11),
            Constraint::Length(7),
            Constraint::Length(5),
        ];
        let table = Table::new(rows, widths).header(header).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Stato dei progetti ({})", self.db.projects().len())),
        );
        f.render_widget(table, area);
    }

    fn render_users(&self, f: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(Span::styled("Gestione utenti", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(
                "In questa versione le utenze si simulano localmente. Il profilo corrente può \
                 cambiare ruolo per testare i permessi (Umarell = sola lettura, Operaio = modifica completa).",
            ),
            Line::from(""),
            Line::from("r cambia ruolo · u cambia nome"),
        ];
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Utenti"))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_task_form(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(70, 70, area);
        f.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let form = &self.task_form;
        let fields = [
            (TITLE_ORDER, "Titolo", form.title.value.clone()),
            (DESCRIPTION_ORDER, "Descrizione", form.description.value.clone()),
            (TYPE_ORDER, "Tipo", format!("< {} >", format_type(form.selected_kind()))),
            (PROJECT_ORDER, "Progetto", format!("< {} >", form.project_label())),
            (PRIORITY_ORDER, "Priorità", format!("< {} >", format_priority(form.selected_priority()))),
            (STATUS_ORDER, "Stato", format!("< {} >", format_status(form.selected_status()))),
        ];
        for (order, title, value) in fields {
            let style = if form.current_field == order {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let widget = Paragraph::new(value)
                .block(Block::default().borders(Borders::ALL).title(title).border_style(style));
            f.render_widget(widget, chunks[order]);
        }

        let instructions = Paragraph::new("Tab campo successivo · ←/→ cambia valore · Enter salva · Esc annulla")
            .block(Block::default().borders(Borders::ALL).title("Aggiungi attività"));
        f.render_widget(instructions, chunks[6]);

        if let Some(input) = match form.current_field {
            TITLE_ORDER => Some(&form.title),
            DESCRIPTION_ORDER => Some(&form.description),
            _ => None,
        } {
            let field = chunks[form.current_field];
            f.set_cursor_position((field.x + 1 + input.cursor() as u16, field.y + 1));
        }
    }

    fn render_prompt(&self, f: &mut Frame, area: Rect, title: &str, input: &InputField) {
        let area = centered_rect(50, 20, area);
        let area = Rect { height: area.height.min(3), ..area };
        f.render_widget(Clear, area);
        let widget = Paragraph::new(input.value.as_str())
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(widget, area);
        f.set_cursor_position((area.x + 1 + input.cursor() as u16, area.y + 1));
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Conferma")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 20, area);
        f.render_widget(Clear, area);

        let title = self
            .confirm_delete
            .and_then(|id| self.db.get(id))
            .map_or_else(String::new, |t| t.title.clone());
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Eliminare l'attività?",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(title),
            Line::from(""),
            Line::from("y conferma · n annulla"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let lines = [
            "Tab / ←→ / 1-3   cambia scheda",
            "↑↓ / j k         seleziona attività",
            "a                aggiungi attività (Operaio)",
            "p                aggiungi progetto (Operaio)",
            "s / S            stato successivo / precedente (Operaio)",
            "d                elimina attività (Operaio)",
            "r                cambia ruolo Operaio/Umarell",
            "u                cambia nome utente",
            "q / Esc          esci",
        ];
        let text: Vec<Line> = lines.iter().map(|l| Line::from(*l)).collect();
        let area = centered_rect(60, 60, area);
        f.render_widget(Clear, area);
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Aiuto - premi un tasto"));
        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::Browse => format!(
                    "Progetti: {} | Attività: {} | h aiuto",
                    self.db.projects().len(),
                    self.db.tasks().len()
                ),
                AppState::AddTask => "Nuova attività".to_string(),
                AppState::AddProject => "Nuovo progetto (Enter salva, Esc annulla)".to_string(),
                AppState::EditUser => "Nome utente (Enter salva, Esc annulla)".to_string(),
                AppState::Confirm => "Conferma eliminazione".to_string(),
                AppState::Help => "Aiuto".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(role_color(self.db.actor().role)).fg(Color::White))
            .alignment(Alignment::Left);

        f.render_widget(status, area);
    }

    /// Main render function that dispatches to appropriate view renderers.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_tabs(f, chunks[1]);
        match self.tab {
            Tab::Tasks => self.render_task_list(f, chunks[2]),
            Tab::Report => self.render_report(f, chunks[2]),
            Tab::Users => self.render_users(f, chunks[2]),
        }

        match self.state {
            AppState::Browse => {}
            AppState::AddTask => self.render_task_form(f, chunks[2]),
            AppState::AddProject => self.render_prompt(f, chunks[2], "Nome progetto", &self.project_input),
            AppState::EditUser => self.render_prompt(f, chunks[2], "Nome utente", &self.user_input),
            AppState::Confirm => self.render_confirm(f, chunks[2]),
            AppState::Help => self.render_help(f, chunks[2]),
        }

        self.render_status_bar(f, chunks[3]);
    }

    /// Main event loop for the TUI application.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Route an editing key to a text input.
fn edit_input(input: &mut InputField, key: KeyCode) {
    match key {
        KeyCode::Char(c) => input.handle_char(c),
        KeyCode::Backspace => input.handle_backspace(),
        KeyCode::Delete => input.handle_delete(),
        KeyCode::Left => input.move_cursor_left(),
        KeyCode::Right => input.move_cursor_right(),
        _ => {}
    }
}
