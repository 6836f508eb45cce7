use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use open::that as open_target;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::data::glyph;
use crate::models::EmergencyContact;
use crate::state::{ArticlesController, ContactsController, MedicinesController, Watcher};

use super::helpers::{
    centered_rect, push_bullet_section, push_text_section, section_line, surface_error,
};
use super::screens::ListCursor;

/// Footer space reserved for status messages and key hints.
const FOOTER_HEIGHT: u16 = 3;
/// Height allocation per contact card on the emergency screen.
const CONTACT_CARD_HEIGHT: u16 = 4;

/// The three top-level sections, cycled with Tab / BackTab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Contacts,
    Articles,
    Medicines,
}

impl Section {
    fn next(self) -> Self {
        match self {
            Section::Contacts => Section::Articles,
            Section::Articles => Section::Medicines,
            Section::Medicines => Section::Contacts,
        }
    }

    fn previous(self) -> Self {
        match self {
            Section::Contacts => Section::Medicines,
            Section::Articles => Section::Contacts,
            Section::Medicines => Section::Articles,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Section::Contacts => "Emergency Contacts",
            Section::Articles => "Health Articles",
            Section::Medicines => "Medicines",
        }
    }
}

/// High-level navigation states. Keeping this explicit makes it easy to
/// reason about which rendering path runs and what keyboard shortcuts do.
enum Screen {
    Contacts,
    Articles,
    ArticleDetail,
    Medicines,
    MedicineDetail,
}

impl Screen {
    fn section(&self) -> Section {
        match self {
            Screen::Contacts => Section::Contacts,
            Screen::Articles | Screen::ArticleDetail => Section::Articles,
            Screen::Medicines | Screen::MedicineDetail => Section::Medicines,
        }
    }
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    Searching(SearchState),
    SelectingCategory(CategoryPicker),
    ConfirmCall(EmergencyContact),
}

/// State for an active inline search.
struct SearchState {
    query: String,
}

/// Cursor into the derived category list while the picker modal is open.
struct CategoryPicker {
    cursor: ListCursor,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
///
/// Each dataset keeps its own controller; the app polls all three every
/// tick and uses watchers on the filtered views to keep the list cursors
/// inside bounds when a search or category change shrinks a list.
pub struct App {
    contacts: ContactsController,
    articles: ArticlesController,
    medicines: MedicinesController,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
    contact_cursor: ListCursor,
    article_cursor: ListCursor,
    medicine_cursor: ListCursor,
    detail_scroll: u16,
    contact_watch: Watcher,
    article_watch: Watcher,
    medicine_watch: Watcher,
}

impl App {
    pub fn new(
        contacts: ContactsController,
        articles: ArticlesController,
        medicines: MedicinesController,
    ) -> Self {
        Self {
            contacts,
            articles,
            medicines,
            screen: Screen::Contacts,
            mode: Mode::Normal,
            status: None,
            contact_cursor: ListCursor::default(),
            article_cursor: ListCursor::default(),
            medicine_cursor: ListCursor::default(),
            detail_scroll: 0,
            contact_watch: Watcher::default(),
            article_watch: Watcher::default(),
            medicine_watch: Watcher::default(),
        }
    }

    /// Drain any finished background loads and publish their results. A
    /// malformed bundled dataset is unrecoverable, so the error propagates
    /// and tears the application down with a sensible message.
    pub(crate) fn poll_loads(&mut self) -> Result<()> {
        self.contacts
            .poll()
            .context("failed to load emergency contacts")?;
        self.articles
            .poll()
            .context("failed to load health articles")?;
        self.medicines
            .poll()
            .context("failed to load medicines")?;
        self.sync_cursors();
        Ok(())
    }

    /// Clamp each list cursor whenever the filtered view it tracks changed.
    fn sync_cursors(&mut self) {
        if self.contact_watch.changed(self.contacts.filtered()) {
            self.contact_cursor
                .clamp_to(self.contacts.filtered().get().len());
        }
        if self.article_watch.changed(self.articles.filtered()) {
            self.article_cursor
                .clamp_to(self.articles.filtered().get().len());
        }
        if self.medicine_watch.changed(self.medicines.filtered()) {
            self.medicine_cursor
                .clamp_to(self.medicines.filtered().get().len());
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Searching(state) => self.handle_search(code, state)?,
            Mode::SelectingCategory(picker) => self.handle_category_pick(code, picker)?,
            Mode::ConfirmCall(contact) => self.handle_confirm_call(code, contact)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Contacts => {
                let len = self.contacts.filtered().get().len();
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        *exit = true;
                    }
                    KeyCode::Up => self.contact_cursor.move_selection(-1, len),
                    KeyCode::Down => self.contact_cursor.move_selection(1, len),
                    KeyCode::PageUp => self.contact_cursor.move_selection(-5, len),
                    KeyCode::PageDown => self.contact_cursor.move_selection(5, len),
                    KeyCode::Home => self.contact_cursor.select_first(),
                    KeyCode::End => self.contact_cursor.select_last(len),
                    KeyCode::Tab => self.switch_section(self.screen.section().next()),
                    KeyCode::BackTab => self.switch_section(self.screen.section().previous()),
                    KeyCode::Char('f') => {
                        self.clear_status();
                        return Ok(Mode::Searching(SearchState {
                            query: self.contacts.query().to_string(),
                        }));
                    }
                    KeyCode::Enter => {
                        let contact = self
                            .contact_cursor
                            .current(len)
                            .and_then(|idx| self.contacts.filtered().get().get(idx))
                            .cloned();
                        if let Some(contact) = contact {
                            self.clear_status();
                            return Ok(Mode::ConfirmCall(contact));
                        }
                        self.set_status("No contact selected.", StatusKind::Error);
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::Articles => {
                let len = self.articles.filtered().get().len();
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        *exit = true;
                    }
                    KeyCode::Up => self.article_cursor.move_selection(-1, len),
                    KeyCode::Down => self.article_cursor.move_selection(1, len),
                    KeyCode::PageUp => self.article_cursor.move_selection(-5, len),
                    KeyCode::PageDown => self.article_cursor.move_selection(5, len),
                    KeyCode::Home => self.article_cursor.select_first(),
                    KeyCode::End => self.article_cursor.select_last(len),
                    KeyCode::Tab => self.switch_section(self.screen.section().next()),
                    KeyCode::BackTab => self.switch_section(self.screen.section().previous()),
                    KeyCode::Char('f') => {
                        self.clear_status();
                        return Ok(Mode::Searching(SearchState {
                            query: self.articles.query().to_string(),
                        }));
                    }
                    KeyCode::Enter => {
                        let name = self
                            .article_cursor
                            .current(len)
                            .and_then(|idx| self.articles.filtered().get().get(idx))
                            .map(|article| article.name.clone());
                        if let Some(name) = name {
                            self.clear_status();
                            self.articles.select(&name);
                            self.detail_scroll = 0;
                            self.screen = Screen::ArticleDetail;
                        } else {
                            self.set_status("No article selected.", StatusKind::Error);
                        }
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::ArticleDetail => {
                match code {
                    KeyCode::Char('q') => {
                        *exit = true;
                    }
                    KeyCode::Esc => {
                        self.clear_status();
                        self.articles.clear_selection();
                        self.screen = Screen::Articles;
                    }
                    KeyCode::Up => self.detail_scroll = self.detail_scroll.saturating_sub(1),
                    KeyCode::Down => self.detail_scroll = self.detail_scroll.saturating_add(1),
                    KeyCode::PageUp => self.detail_scroll = self.detail_scroll.saturating_sub(5),
                    KeyCode::PageDown => self.detail_scroll = self.detail_scroll.saturating_add(5),
                    KeyCode::Home => self.detail_scroll = 0,
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::Medicines => {
                let len = self.medicines.filtered().get().len();
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        *exit = true;
                    }
                    KeyCode::Up => self.medicine_cursor.move_selection(-1, len),
                    KeyCode::Down => self.medicine_cursor.move_selection(1, len),
                    KeyCode::PageUp => self.medicine_cursor.move_selection(-5, len),
                    KeyCode::PageDown => self.medicine_cursor.move_selection(5, len),
                    KeyCode::Home => self.medicine_cursor.select_first(),
                    KeyCode::End => self.medicine_cursor.select_last(len),
                    KeyCode::Tab => self.switch_section(self.screen.section().next()),
                    KeyCode::BackTab => self.switch_section(self.screen.section().previous()),
                    KeyCode::Char('f') => {
                        self.clear_status();
                        return Ok(Mode::Searching(SearchState {
                            query: self.medicines.query().to_string(),
                        }));
                    }
                    KeyCode::Char('c') => {
                        self.clear_status();
                        let categories = self.medicines.categories().get();
                        let mut cursor = ListCursor::default();
                        let current = self.medicines.selected_category();
                        if let Some(idx) = categories.iter().position(|c| c == current) {
                            cursor.move_selection(idx as isize, categories.len());
                        }
                        return Ok(Mode::SelectingCategory(CategoryPicker { cursor }));
                    }
                    KeyCode::Enter => {
                        let name = self
                            .medicine_cursor
                            .current(len)
                            .and_then(|idx| self.medicines.filtered().get().get(idx))
                            .map(|medicine| medicine.name.clone());
                        if let Some(name) = name {
                            self.clear_status();
                            self.medicines.select(&name);
                            self.detail_scroll = 0;
                            self.screen = Screen::MedicineDetail;
                        } else {
                            self.set_status("No medicine selected.", StatusKind::Error);
                        }
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::MedicineDetail => {
                match code {
                    KeyCode::Char('q') => {
                        *exit = true;
                    }
                    KeyCode::Esc => {
                        self.clear_status();
                        self.medicines.clear_selection();
                        self.screen = Screen::Medicines;
                    }
                    KeyCode::Up => self.detail_scroll = self.detail_scroll.saturating_sub(1),
                    KeyCode::Down => self.detail_scroll = self.detail_scroll.saturating_add(1),
                    KeyCode::PageUp => self.detail_scroll = self.detail_scroll.saturating_sub(5),
                    KeyCode::PageDown => self.detail_scroll = self.detail_scroll.saturating_add(5),
                    KeyCode::Home => self.detail_scroll = 0,
                    _ => {}
                }
                Ok(Mode::Normal)
            }
        }
    }

    /// Live search on the current section. Every keystroke reapplies the
    /// filter so the list narrows as the user types; Esc clears the query
    /// entirely, Enter keeps it active and returns to normal navigation.
    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_section_query(String::new());
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => {
                return Ok(Mode::Normal);
            }
            KeyCode::Up => self.move_section_cursor(-1),
            KeyCode::Down => self.move_section_cursor(1),
            KeyCode::PageUp => self.move_section_cursor(-5),
            KeyCode::PageDown => self.move_section_cursor(5),
            KeyCode::Backspace => {
                state.query.pop();
                self.set_section_query(state.query.clone());
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                state.query.push(ch);
                self.set_section_query(state.query.clone());
            }
            _ => {}
        }
        Ok(Mode::Searching(state))
    }

    fn handle_category_pick(&mut self, code: KeyCode, mut picker: CategoryPicker) -> Result<Mode> {
        let len = self.medicines.categories().get().len();
        match code {
            KeyCode::Esc => Ok(Mode::Normal),
            KeyCode::Up => {
                picker.cursor.move_selection(-1, len);
                Ok(Mode::SelectingCategory(picker))
            }
            KeyCode::Down => {
                picker.cursor.move_selection(1, len);
                Ok(Mode::SelectingCategory(picker))
            }
            KeyCode::Home => {
                picker.cursor.select_first();
                Ok(Mode::SelectingCategory(picker))
            }
            KeyCode::End => {
                picker.cursor.select_last(len);
                Ok(Mode::SelectingCategory(picker))
            }
            KeyCode::Enter => {
                let category = picker
                    .cursor
                    .current(len)
                    .and_then(|idx| self.medicines.categories().get().get(idx))
                    .cloned();
                if let Some(category) = category {
                    self.medicines.select_category(category.clone());
                    self.sync_cursors();
                    self.set_status(format!("Showing {category} medicines."), StatusKind::Info);
                }
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::SelectingCategory(picker)),
        }
    }

    /// Confirmation gate in front of the call dispatcher. Nothing is dialed
    /// until the user explicitly confirms.
    fn handle_confirm_call(&mut self, code: KeyCode, contact: EmergencyContact) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Call cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.dispatch_call(&contact);
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmCall(contact)),
        }
    }

    /// Hand the number to the system dialer via a `tel:` target. Dispatch
    /// failure is reported in the footer rather than tearing the app down.
    fn dispatch_call(&mut self, contact: &EmergencyContact) {
        let target = format!("tel:{}", contact.phone_number);
        let result = open_target(&target).context("failed to reach the system dialer");
        match result {
            Ok(()) => self.set_status(format!("Calling {contact}."), StatusKind::Info),
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    fn switch_section(&mut self, section: Section) {
        self.clear_status();
        self.screen = match section {
            Section::Contacts => Screen::Contacts,
            Section::Articles => Screen::Articles,
            Section::Medicines => Screen::Medicines,
        };
    }

    fn set_section_query(&mut self, query: String) {
        match self.screen.section() {
            Section::Contacts => self.contacts.set_query(query),
            Section::Articles => self.articles.set_query(query),
            Section::Medicines => self.medicines.set_query(query),
        }
        self.sync_cursors();
    }

    fn move_section_cursor(&mut self, offset: isize) {
        match self.screen.section() {
            Section::Contacts => {
                let len = self.contacts.filtered().get().len();
                self.contact_cursor.move_selection(offset, len);
            }
            Section::Articles => {
                let len = self.articles.filtered().get().len();
                self.article_cursor.move_selection(offset, len);
            }
            Section::Medicines => {
                let len = self.medicines.filtered().get().len();
                self.medicine_cursor.move_selection(offset, len);
            }
        }
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Contacts => self.draw_contacts(frame, content_area),
            Screen::Articles => self.draw_articles(frame, content_area),
            Screen::ArticleDetail => self.draw_article_detail(frame, content_area),
            Screen::Medicines => self.draw_medicines(frame, content_area),
            Screen::MedicineDetail => self.draw_medicine_detail(frame, content_area),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::SelectingCategory(picker) => self.draw_category_picker(frame, area, picker),
            Mode::ConfirmCall(contact) => self.draw_confirm_call(frame, area, contact),
            Mode::Normal => {}
        }
    }

    fn draw_contacts(&self, frame: &mut Frame, area: Rect) {
        if !self.contacts.is_loaded() {
            self.draw_loading(frame, area, Section::Contacts);
            return;
        }

        let contacts = self.contacts.filtered().get();
        if contacts.is_empty() {
            self.draw_empty_list(frame, area, Section::Contacts, !self.contacts.query().is_empty());
            return;
        }

        self.render_contact_cards(frame, area, contacts, self.contact_cursor.selected());
    }

    fn render_contact_cards(
        &self,
        frame: &mut Frame,
        area: Rect,
        contacts: &[EmergencyContact],
        selected: usize,
    ) {
        if area.height == 0 {
            return;
        }

        let card_height = CONTACT_CARD_HEIGHT as usize;
        let capacity = ((area.height as usize) / card_height).max(1);
        let len = contacts.len();
        let mut start = if selected >= capacity {
            selected + 1 - capacity
        } else {
            0
        };
        if start + capacity > len {
            start = len.saturating_sub(capacity);
        }

        for (index, contact) in contacts.iter().enumerate().skip(start).take(capacity) {
            let offset = ((index - start) * card_height) as u16;
            if offset >= area.height {
                break;
            }
            let card_area = Rect {
                x: area.x,
                y: area.y + offset,
                width: area.width,
                height: CONTACT_CARD_HEIGHT.min(area.height - offset),
            };

            let mut block = Block::default()
                .borders(Borders::ALL)
                .title(contact.name.clone());
            if index == selected {
                block = block.style(Style::default().fg(Color::Yellow));
            }

            let motif = glyph(&contact.icon);
            let lines = vec![
                Line::from(vec![
                    Span::styled(motif[0], Style::default().fg(Color::Red)),
                    Span::raw("  "),
                    Span::styled(
                        contact.phone_number.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(motif[1], Style::default().fg(Color::Red))),
            ];

            let card = Paragraph::new(lines)
                .alignment(Alignment::Left)
                .block(block);
            frame.render_widget(card, card_area);
        }
    }

    fn draw_articles(&self, frame: &mut Frame, area: Rect) {
        if !self.articles.is_loaded() {
            self.draw_loading(frame, area, Section::Articles);
            return;
        }

        let articles = self.articles.filtered().get();
        if articles.is_empty() {
            self.draw_empty_list(frame, area, Section::Articles, !self.articles.query().is_empty());
            return;
        }

        let items: Vec<ListItem> = articles
            .iter()
            .map(|article| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        article.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("  {}", article.definition),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Section::Articles.title()),
            )
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(self.article_cursor.current(articles.len()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_medicines(&self, frame: &mut Frame, area: Rect) {
        if !self.medicines.is_loaded() {
            self.draw_loading(frame, area, Section::Medicines);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let header = Paragraph::new(Line::from(vec![
            Span::raw("Category: "),
            Span::styled(
                self.medicines.selected_category().to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  (press "),
            Span::styled("[c]", Style::default().fg(Color::Cyan)),
            Span::raw(" to change)"),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Section::Medicines.title()),
        );
        frame.render_widget(header, chunks[0]);

        let medicines = self.medicines.filtered().get();
        if medicines.is_empty() {
            self.draw_empty_list(
                frame,
                chunks[1],
                Section::Medicines,
                !self.medicines.query().is_empty()
                    || self.medicines.selected_category() != crate::models::ALL_CATEGORIES,
            );
            return;
        }

        let items: Vec<ListItem> = medicines
            .iter()
            .map(|medicine| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        medicine.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("  {}", medicine.category.join(", ")),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(self.medicine_cursor.current(medicines.len()));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_article_detail(&self, frame: &mut Frame, area: Rect) {
        let Some(article) = self.articles.selected() else {
            self.draw_missing_detail(frame, area, "Article");
            return;
        };

        let motif = glyph(&article.image);
        let mut lines = vec![
            Line::from(Span::styled(motif[0], Style::default().fg(Color::Cyan))),
            Line::from(Span::styled(motif[1], Style::default().fg(Color::Cyan))),
            Line::from(""),
        ];
        push_text_section(&mut lines, "Definition", &article.definition);
        push_bullet_section(&mut lines, "Types", &article.types);
        push_bullet_section(&mut lines, "Causes", &article.causes);
        push_bullet_section(&mut lines, "Symptoms", &article.symptoms);
        push_bullet_section(&mut lines, "Prevention", &article.prevention_strategy);

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(article.name.clone()),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.detail_scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_medicine_detail(&self, frame: &mut Frame, area: Rect) {
        let Some(medicine) = self.medicines.selected() else {
            self.draw_missing_detail(frame, area, "Medicine");
            return;
        };

        let mut lines = vec![
            section_line("Categories"),
            Line::from(format!("  {}", medicine.category.join(", "))),
            Line::from(""),
        ];
        push_text_section(&mut lines, "Description", &medicine.description);
        push_bullet_section(&mut lines, "Uses", &medicine.uses);
        push_text_section(&mut lines, "How to Use", &medicine.how_to_use);
        push_bullet_section(&mut lines, "Side Effects", &medicine.side_effects);
        push_bullet_section(&mut lines, "Precautions", &medicine.precautions);
        push_bullet_section(&mut lines, "Interactions", &medicine.interactions);
        push_text_section(&mut lines, "Storage", &medicine.storage_instructions);
        push_text_section(&mut lines, "Warnings", &medicine.warnings);

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(medicine.name.clone()),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.detail_scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_missing_detail(&self, frame: &mut Frame, area: Rect, label: &str) {
        let message = Paragraph::new(format!(
            "{label} no longer available. Press Esc to go back."
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(message, area);
    }

    fn draw_loading(&self, frame: &mut Frame, area: Rect, section: Section) {
        let message = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(section.title()));
        frame.render_widget(message, area);
    }

    fn draw_empty_list(&self, frame: &mut Frame, area: Rect, section: Section, filtered: bool) {
        let text = if filtered {
            "No entries match the current filter."
        } else {
            "No entries to display."
        };
        let message = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(section.title()));
        frame.render_widget(message, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Search {}", self.screen.section().title()));
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        // The cursor tracks the end of the query but must stay inside the
        // popup even when the query is wider than the box.
        let inner = block.inner(popup_area);
        let offset = "Search: ".len() + state.query.chars().count();
        let cursor_x = inner
            .x
            .saturating_add(offset.min(u16::MAX as usize) as u16)
            .min(inner.right().saturating_sub(1));
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_category_picker(&self, frame: &mut Frame, area: Rect, picker: &CategoryPicker) {
        let popup_area = centered_rect(40, 60, area);
        frame.render_widget(Clear, popup_area);

        let categories = self.medicines.categories().get();
        let items: Vec<ListItem> = categories
            .iter()
            .map(|category| ListItem::new(category.clone()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Select Category"),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(picker.cursor.current(categories.len()));
        frame.render_stateful_widget(list, popup_area, &mut state);
    }

    fn draw_confirm_call(&self, frame: &mut Frame, area: Rect, contact: &EmergencyContact) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Confirm Call").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!(
                "Call {} at {}?",
                contact.name, contact.phone_number
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.screen, &self.mode) {
            (_, Mode::Searching(_)) => Line::from(vec![
                Span::styled("[Type]", key_style),
                Span::raw(" Filter   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Accept   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Clear   "),
                Span::styled("[Up/Dn]", key_style),
                Span::raw(" Navigate"),
            ]),
            (_, Mode::SelectingCategory(_)) => Line::from(vec![
                Span::styled("[Up/Dn]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (_, Mode::ConfirmCall(_)) => Line::from(vec![
                Span::styled("[Y]", key_style),
                Span::raw(" Call   "),
                Span::styled("[N/Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Screen::ArticleDetail | Screen::MedicineDetail, _) => Line::from(vec![
                Span::styled("[Up/Dn]", key_style),
                Span::raw(" Scroll   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Back   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            (Screen::Contacts, _) => Line::from(vec![
                Span::styled("[Up/Dn]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Call   "),
                Span::styled("[f]", key_style),
                Span::raw(" Search   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Section   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            (Screen::Medicines, _) => Line::from(vec![
                Span::styled("[Up/Dn]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Details   "),
                Span::styled("[f]", key_style),
                Span::raw(" Search   "),
                Span::styled("[c]", key_style),
                Span::raw(" Category   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Section   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            _ => Line::from(vec![
                Span::styled("[Up/Dn]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Details   "),
                Span::styled("[f]", key_style),
                Span::raw(" Search   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Section   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, Medicine};
    use std::thread;
    use std::time::{Duration, Instant};

    fn sample_contacts() -> Vec<EmergencyContact> {
        vec![
            EmergencyContact {
                name: "Ambulance".to_string(),
                phone_number: "102".to_string(),
                icon: "ambulance".to_string(),
            },
            EmergencyContact {
                name: "Poison Control".to_string(),
                phone_number: "1800-222-1222".to_string(),
                icon: "poison".to_string(),
            },
        ]
    }

    fn sample_articles() -> Vec<Article> {
        vec![
            Article {
                name: "Asthma".to_string(),
                image: "asthma".to_string(),
                definition: "Chronic airway condition.".to_string(),
                types: vec![],
                causes: vec![],
                symptoms: vec!["Wheezing".to_string()],
                prevention_strategy: vec![],
            },
            Article {
                name: "Diabetes".to_string(),
                image: "diabetes".to_string(),
                definition: "Blood sugar disorder.".to_string(),
                types: vec!["Type 1".to_string(), "Type 2".to_string()],
                causes: vec![],
                symptoms: vec!["Thirst".to_string()],
                prevention_strategy: vec![],
            },
        ]
    }

    fn sample_medicines() -> Vec<Medicine> {
        vec![
            Medicine {
                name: "Paracetamol".to_string(),
                category: vec!["Pain Relief".to_string(), "Fever".to_string()],
                description: "Analgesic and antipyretic.".to_string(),
                uses: vec!["Headache".to_string()],
                how_to_use: "500mg every 6 hours.".to_string(),
                side_effects: vec![],
                precautions: vec![],
                interactions: vec![],
                storage_instructions: String::new(),
                warnings: String::new(),
            },
            Medicine {
                name: "Amoxicillin".to_string(),
                category: vec!["Antibiotic".to_string()],
                description: "Broad spectrum antibiotic.".to_string(),
                uses: vec!["Bacterial infections".to_string()],
                how_to_use: "As prescribed.".to_string(),
                side_effects: vec![],
                precautions: vec![],
                interactions: vec![],
                storage_instructions: String::new(),
                warnings: String::new(),
            },
        ]
    }

    fn loaded_app() -> App {
        let mut app = App::new(
            ContactsController::with_source(|| Ok(sample_contacts())),
            ArticlesController::with_source(|| Ok(sample_articles())),
            MedicinesController::with_source(|| Ok(sample_medicines())),
        );
        let deadline = Instant::now() + Duration::from_secs(2);
        while !(app.contacts.is_loaded()
            && app.articles.is_loaded()
            && app.medicines.is_loaded())
        {
            app.poll_loads().unwrap();
            assert!(Instant::now() < deadline, "datasets never finished loading");
            thread::sleep(Duration::from_millis(5));
        }
        app
    }

    #[test]
    fn tab_cycles_through_all_sections() {
        let mut app = loaded_app();
        assert!(matches!(app.screen, Screen::Contacts));
        app.handle_key(KeyCode::Tab).unwrap();
        assert!(matches!(app.screen, Screen::Articles));
        app.handle_key(KeyCode::Tab).unwrap();
        assert!(matches!(app.screen, Screen::Medicines));
        app.handle_key(KeyCode::Tab).unwrap();
        assert!(matches!(app.screen, Screen::Contacts));
        app.handle_key(KeyCode::BackTab).unwrap();
        assert!(matches!(app.screen, Screen::Medicines));
    }

    #[test]
    fn enter_on_a_contact_asks_for_confirmation() {
        let mut app = loaded_app();
        app.handle_key(KeyCode::Enter).unwrap();
        match &app.mode {
            Mode::ConfirmCall(contact) => assert_eq!(contact.name, "Ambulance"),
            _ => panic!("expected the call confirmation dialog"),
        }
    }

    #[test]
    fn cancelling_the_call_returns_to_normal_mode() {
        let mut app = loaded_app();
        app.handle_key(KeyCode::Enter).unwrap();
        app.handle_key(KeyCode::Esc).unwrap();
        assert!(matches!(app.mode, Mode::Normal));
        assert!(matches!(app.screen, Screen::Contacts));
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.text, "Call cancelled.");
    }

    #[test]
    fn search_narrows_articles_as_the_query_grows() {
        let mut app = loaded_app();
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Char('f')).unwrap();
        for ch in "wheez".chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
        let filtered = app.articles.filtered().get();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Asthma");
    }

    #[test]
    fn escape_clears_the_active_search() {
        let mut app = loaded_app();
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Char('f')).unwrap();
        app.handle_key(KeyCode::Char('x')).unwrap();
        assert!(app.articles.filtered().get().is_empty());
        app.handle_key(KeyCode::Esc).unwrap();
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.articles.filtered().get().len(), 2);
    }

    #[test]
    fn enter_accepts_the_search_and_keeps_the_filter() {
        let mut app = loaded_app();
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Char('f')).unwrap();
        for ch in "asthma".chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.articles.filtered().get().len(), 1);
    }

    #[test]
    fn article_detail_opens_and_escape_clears_the_selection() {
        let mut app = loaded_app();
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(matches!(app.screen, Screen::ArticleDetail));
        assert_eq!(app.articles.selected().unwrap().name, "Asthma");
        app.handle_key(KeyCode::Esc).unwrap();
        assert!(matches!(app.screen, Screen::Articles));
        assert!(app.articles.selected().is_none());
    }

    #[test]
    fn category_picker_filters_the_medicine_list() {
        let mut app = loaded_app();
        app.handle_key(KeyCode::BackTab).unwrap();
        assert!(matches!(app.screen, Screen::Medicines));
        app.handle_key(KeyCode::Char('c')).unwrap();
        assert!(matches!(app.mode, Mode::SelectingCategory(_)));
        // All, Pain Relief, Fever, Antibiotic
        app.handle_key(KeyCode::End).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.medicines.selected_category(), "Antibiotic");
        let filtered = app.medicines.filtered().get();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Amoxicillin");
    }

    #[test]
    fn cursor_is_clamped_when_a_filter_shrinks_the_list() {
        let mut app = loaded_app();
        app.handle_key(KeyCode::BackTab).unwrap();
        app.handle_key(KeyCode::Down).unwrap();
        assert_eq!(app.medicine_cursor.selected(), 1);
        app.handle_key(KeyCode::Char('f')).unwrap();
        for ch in "paracetamol".chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
        assert_eq!(app.medicines.filtered().get().len(), 1);
        assert_eq!(app.medicine_cursor.selected(), 0);
    }

    #[test]
    fn quit_key_requests_exit() {
        let mut app = loaded_app();
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
    }

    #[test]
    fn search_cursor_stays_inside_the_popup_for_long_queries() {
        use ratatui::backend::{Backend, TestBackend};
        use ratatui::Terminal;

        let mut app = loaded_app();
        app.handle_key(KeyCode::Char('f')).unwrap();
        for _ in 0..200 {
            app.handle_key(KeyCode::Char('z')).unwrap();
        }

        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let position = terminal.backend_mut().get_cursor_position().unwrap();
        assert!(position.x < 40, "cursor left the terminal: {position:?}");
    }

    #[test]
    fn draw_renders_without_panicking() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let app = loaded_app();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
    }
}
