use arboard::Clipboard;
use ratatui::crossterm::event::KeyEvent;
use std::time::Instant;
use tracing::{debug, error, info, trace};

use crate::branding::{self, BrandingEntry};
use crate::browser::{Browser, BrowserView, FilterSpec};
use crate::domain::{CMDMode, HELP_TEXT, Message, SVConfig, SVError};
use crate::inputter::{InputResult, Inputter};
use crate::navigation::{NavGroup, flatten, navigation_tree};
use crate::record::{Cell, Record};
use crate::resource::Resource;
use crate::session::{Role, Session};
use crate::source;

/// Column holding a college code. Labelled with college names and preset for department heads.
const COLLEGE_COLUMN: &str = "College";
const ROW_ACTIONS: &str = "⏎ details · y copy";

#[derive(Debug, PartialEq)]
pub enum Status {
    READY,
    QUITTING,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Modus {
    TABLE,
    POPUP,
    CMDINPUT,
}

/// Snapshot of everything the UI draws in one frame.
pub struct UIData {
    pub branding: &'static BrandingEntry,
    pub role: Role,
    pub navigation: Vec<NavGroup>,
    pub current_view: Resource,
    pub table: BrowserView,
    pub selected_row: usize,
    pub selected_column: usize,
    pub focused_filter: usize,
    pub show_popup: bool,
    pub popup_title: String,
    pub popup_message: String,
    pub cmdinput: InputResult,
    pub cmd_mode: Option<CMDMode>,
    pub active_cmdinput: bool,
    pub status_message: String,
    pub last_status_message_update: Instant,
}

pub struct Model {
    config: SVConfig,
    pub status: Status,
    modus: Modus,
    previous_modus: Modus,
    session: Session,
    navigation: Vec<NavGroup>,
    views: Vec<Resource>,
    current_view: usize,
    browser: Browser,
    cursor_row: usize,
    cursor_column: usize,
    focused_filter: usize,
    input: Inputter,
    cmd_mode: Option<CMDMode>,
    last_input: InputResult,
    active_cmdinput: bool,
    search_before_input: String,
    popup_title: String,
    popup_message: String,
    status_message: String,
    last_status_message_update: Instant,
}

impl Model {
    pub fn init(config: &SVConfig, session: Session) -> Result<Self, SVError> {
        if !session.is_authenticated() {
            return Err(SVError::NotAuthenticated);
        }
        let role = session.role();
        let navigation = navigation_tree(role);
        let views = flatten(&navigation);

        let current_view = match config.initial_view {
            Some(resource) => views
                .iter()
                .position(|&v| v == resource)
                .ok_or_else(|| SVError::UnknownView(resource.title().to_string()))?,
            None => 0,
        };

        let (records, message) = Self::fetch(config, views[current_view]);
        let browser = Self::build_browser(config, &session, views[current_view], records)?;
        info!(
            "Session started as {:?} for {}",
            role,
            session.branding().display_name
        );

        Ok(Self {
            config: config.clone(),
            status: Status::READY,
            modus: Modus::TABLE,
            previous_modus: Modus::TABLE,
            session,
            navigation,
            views,
            current_view,
            browser,
            cursor_row: 0,
            cursor_column: 0,
            focused_filter: 0,
            input: Inputter::default(),
            cmd_mode: None,
            last_input: InputResult::default(),
            active_cmdinput: false,
            search_before_input: String::new(),
            popup_title: String::new(),
            popup_message: String::new(),
            status_message: message,
            last_status_message_update: Instant::now(),
        })
    }

    // Loading failures leave the view empty and are reported on the status line.
    fn fetch(config: &SVConfig, resource: Resource) -> (Vec<Record>, String) {
        match source::load_resource(&config.data_dir, resource) {
            Ok(records) => {
                let message = format!("Loaded {} {}", records.len(), resource.collection());
                (records, message)
            }
            Err(SVError::FileNotFound) => {
                debug!("No data for {resource}");
                (
                    Vec::new(),
                    format!("No {} data in {:?}", resource.collection(), config.data_dir),
                )
            }
            Err(e) => {
                error!("Loading {resource} failed: {e}");
                (Vec::new(), format!("Loading {resource} failed: {e}"))
            }
        }
    }

    fn build_browser(
        config: &SVConfig,
        session: &Session,
        resource: Resource,
        records: Vec<Record>,
    ) -> Result<Browser, SVError> {
        let columns: Vec<String> = resource.columns().iter().map(|c| c.to_string()).collect();
        let filters: Vec<FilterSpec> = resource
            .filter_columns()
            .iter()
            .map(|&column| {
                let spec = FilterSpec::from_records(column, &records);
                if column == COLLEGE_COLUMN {
                    spec.with_labels(|code| {
                        if branding::is_known(code) {
                            branding::display_name(code).to_string()
                        } else {
                            code.to_string()
                        }
                    })
                } else {
                    spec
                }
            })
            .collect();

        let mut browser = Browser::new(columns, records)?
            .with_filters(filters)
            .with_page_sizes(&config.page_sizes, config.default_page_size)
            .with_row_actions(|_| ROW_ACTIONS.to_string());

        if session.role() == Role::DepartmentHead
            && let Some(department) = session.department()
        {
            let code = department.trim().to_uppercase();
            let offered = browser.filters().iter().any(|f| {
                f.column == COLLEGE_COLUMN && f.options.iter().any(|o| o.value == code)
            });
            if offered {
                debug!("Scoping {resource} to {code}");
                browser.set_filter(COLLEGE_COLUMN, &code);
            }
        }
        Ok(browser)
    }

    fn open_view(&mut self, idx: usize) -> Result<(), SVError> {
        let resource = self.views[idx];
        trace!("Opening view {resource}");
        let (records, message) = Self::fetch(&self.config, resource);
        self.browser = Self::build_browser(&self.config, &self.session, resource, records)?;
        self.current_view = idx;
        self.cursor_row = 0;
        self.cursor_column = 0;
        self.focused_filter = 0;
        self.set_status_message(message);
        Ok(())
    }

    fn reload(&mut self) {
        let resource = self.views[self.current_view];
        let (records, message) = Self::fetch(&self.config, resource);
        self.browser.set_data(records);
        self.clamp_cursor();
        self.set_status_message(message);
    }

    pub fn current_view(&self) -> Resource {
        self.views[self.current_view]
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn raw_keyevents(&self) -> bool {
        self.active_cmdinput
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.last_status_message_update = Instant::now();
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn get_uidata(&self) -> UIData {
        UIData {
            branding: self.session.branding(),
            role: self.session.role(),
            navigation: self.navigation.clone(),
            current_view: self.current_view(),
            table: self.browser.view(),
            selected_row: self.cursor_row,
            selected_column: self.cursor_column,
            focused_filter: self.focused_filter,
            show_popup: self.modus == Modus::POPUP,
            popup_title: self.popup_title.clone(),
            popup_message: self.popup_message.clone(),
            cmdinput: self.last_input.clone(),
            cmd_mode: self.cmd_mode,
            active_cmdinput: self.active_cmdinput,
            status_message: self.status_message.clone(),
            last_status_message_update: self.last_status_message_update,
        }
    }

    pub fn update(&mut self, message: Option<Message>) -> Result<(), SVError> {
        if let Some(msg) = message {
            trace!("Update: Modus {:?}, Message {:?}", self.modus, msg);
            match self.modus {
                Modus::TABLE => match msg {
                    Message::Quit => self.quit(),
                    Message::MoveDown => self.move_selection_down(),
                    Message::MoveUp => self.move_selection_up(),
                    Message::MoveLeft => {
                        self.cursor_column = self.cursor_column.saturating_sub(1);
                    }
                    Message::MoveRight => {
                        let last = self.browser.columns().len() - 1;
                        self.cursor_column = std::cmp::min(self.cursor_column + 1, last);
                    }
                    Message::NextPage => self.change_page(Browser::next_page),
                    Message::PrevPage => self.change_page(Browser::prev_page),
                    Message::FirstPage => self.change_page(Browser::first_page),
                    Message::LastPage => self.change_page(Browser::last_page),
                    Message::SortAscending => self.sort_selected_column(true),
                    Message::SortDescending => self.sort_selected_column(false),
                    Message::CyclePageSize => {
                        let size = self.browser.cycle_page_size();
                        self.clamp_cursor();
                        self.set_status_message(format!("{size} rows per page"));
                    }
                    Message::FocusNextFilter => self.focus_next_filter(),
                    Message::CycleFilterOption => self.cycle_filter_option(),
                    Message::ClearFilters => {
                        self.browser.clear_filters();
                        self.browser.set_search("");
                        self.clamp_cursor();
                        self.set_status_message("Cleared search and filters");
                    }
                    Message::Search => self.enter_cmd_mode(CMDMode::Search),
                    Message::JumpToPage => self.enter_cmd_mode(CMDMode::JumpToPage),
                    Message::Enter => self.show_record(),
                    Message::Help => self.show_help(),
                    Message::CopyRow => self.copy_row(),
                    Message::NextView => {
                        let next = (self.current_view + 1) % self.views.len();
                        self.open_view(next)?;
                    }
                    Message::PrevView => {
                        let prev = (self.current_view + self.views.len() - 1) % self.views.len();
                        self.open_view(prev)?;
                    }
                    Message::Reload => self.reload(),
                    _ => (),
                },
                Modus::POPUP => match msg {
                    Message::Quit => self.quit(),
                    Message::Exit | Message::Enter => self.close_popup(),
                    _ => (),
                },
                Modus::CMDINPUT => {
                    if let Message::RawKey(key) = msg {
                        self.raw_input(key)
                    }
                }
            }
        }
        Ok(())
    }

    // -------------------- Control handling functions ---------------------- //

    fn clamp_cursor(&mut self) {
        let rows = self.browser.page_records().len();
        self.cursor_row = std::cmp::min(self.cursor_row, rows.saturating_sub(1));
    }

    fn change_page(&mut self, step: impl FnOnce(&mut Browser)) {
        step(&mut self.browser);
        self.cursor_row = 0;
        self.set_status_message(format!(
            "Page {} of {}",
            self.browser.page(),
            std::cmp::max(1, self.browser.total_pages())
        ));
    }

    fn move_selection_down(&mut self) {
        let rows = self.browser.page_records().len();
        if self.cursor_row + 1 < rows {
            self.cursor_row += 1;
        } else if self.browser.page() < self.browser.total_pages() {
            // At the bottom of the page, continue on the next one
            self.browser.next_page();
            self.cursor_row = 0;
        }
    }

    fn move_selection_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
        } else if self.browser.page() > 1 {
            self.browser.prev_page();
            self.cursor_row = self.browser.page_records().len().saturating_sub(1);
        }
    }

    fn selected_record(&self) -> Option<&Record> {
        self.browser.page_record(self.cursor_row)
    }

    fn sort_selected_column(&mut self, ascending: bool) {
        let column = self.browser.columns()[self.cursor_column].clone();
        self.browser.sort_by(&column, ascending);
        self.cursor_row = 0;
        let direction = if ascending { "ascending" } else { "descending" };
        self.set_status_message(format!("Sorted by {column} {direction}"));
    }

    fn focus_next_filter(&mut self) {
        let count = self.browser.filters().len();
        if count == 0 {
            self.set_status_message("This view has no filters");
            return;
        }
        self.focused_filter = (self.focused_filter + 1) % count;
        let column = self.browser.filters()[self.focused_filter].column.clone();
        self.set_status_message(format!("Filter: {column}"));
    }

    fn cycle_filter_option(&mut self) {
        match self.browser.cycle_filter(self.focused_filter) {
            Some(value) => {
                let spec = &self.browser.filters()[self.focused_filter];
                let message = format!(
                    "{}: {} ({} records)",
                    spec.column,
                    spec.label_for(&value),
                    self.browser.filtered_count()
                );
                self.cursor_row = 0;
                self.set_status_message(message);
            }
            None => self.set_status_message("This view has no filters"),
        }
    }

    fn show_help(&mut self) {
        self.open_popup("Help", HELP_TEXT.to_string());
    }

    fn show_record(&mut self) {
        let Some(record) = self.selected_record() else {
            self.set_status_message("No record selected");
            return;
        };
        let width = record.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        let details = record
            .iter()
            .map(|(name, cell)| format!("{name:>width$}  {}", Self::describe_cell(cell)))
            .collect::<Vec<String>>()
            .join("\n");
        let title = format!("{} record", self.current_view().title());
        self.open_popup(&title, details);
    }

    fn describe_cell(cell: &Cell) -> String {
        match cell {
            Cell::Nested(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Cell::Empty => "∅".to_string(),
            _ => cell.stringify(),
        }
    }

    fn open_popup(&mut self, title: &str, message: String) {
        self.previous_modus = self.modus;
        self.modus = Modus::POPUP;
        self.popup_title = title.to_string();
        self.popup_message = message;
    }

    fn close_popup(&mut self) {
        trace!("Close popup ...");
        self.modus = self.previous_modus;
        self.previous_modus = Modus::POPUP;
    }

    fn raw_input(&mut self, key: KeyEvent) {
        if self.active_cmdinput {
            self.last_input = self.input.read(key);
            if self.cmd_mode == Some(CMDMode::Search) {
                // Results follow the input while typing
                let term = if self.last_input.canceled {
                    self.search_before_input.clone()
                } else {
                    self.last_input.input.clone()
                };
                self.browser.set_search(&term);
                self.cursor_row = 0;
            }
            if self.last_input.finished {
                self.handle_cmd_input();
            }
        }
    }

    fn enter_cmd_mode(&mut self, mode: CMDMode) {
        trace!("Entering command mode {mode:?}");
        self.previous_modus = self.modus;
        self.modus = Modus::CMDINPUT;
        self.cmd_mode = Some(mode);
        self.active_cmdinput = true;

        self.input.clear();
        if mode == CMDMode::Search {
            self.search_before_input = self.browser.state().search.clone();
            self.input.set(&self.search_before_input);
        }
        self.last_input = self.input.get();
    }

    fn handle_cmd_input(&mut self) {
        trace!("Handle cmd input {:?}", self.last_input);
        self.active_cmdinput = false;
        self.modus = self.previous_modus;
        self.previous_modus = Modus::CMDINPUT;

        let cmd_input = self.last_input.input.trim().to_string();
        match self.cmd_mode {
            Some(CMDMode::Search) => {
                let count = self.browser.filtered_count();
                if self.last_input.canceled {
                    self.set_status_message("Search canceled");
                } else if count == 0 {
                    self.set_status_message("Found no matches!");
                } else {
                    self.set_status_message(format!("Found {count} results"));
                }
            }
            Some(CMDMode::JumpToPage) if !self.last_input.canceled => {
                match cmd_input.parse::<usize>() {
                    Ok(page) => self.change_page(|b| b.go_to_page(page)),
                    Err(_) => self.set_status_message(format!("Not a page number: {cmd_input}")),
                }
            }
            _ => {}
        }
        self.cmd_mode = None;
    }

    fn wrap_cell_content(c: &str) -> String {
        let needs_escaping = c.contains('"');
        let needs_wrapping = c.chars().any(|c| c == ' ' || c == '\t' || c == ',');
        let mut out = String::from(c);

        if needs_escaping {
            out = out.replace('"', "\"\"");
        }
        if needs_wrapping || needs_escaping {
            out = format!("\"{out}\"");
        }
        out
    }

    /// Selected row as one CSV line over the displayed columns.
    fn selected_row_as_csv(&self) -> Option<String> {
        let record = self.selected_record()?;
        let content = self
            .browser
            .columns()
            .iter()
            .map(|column| Self::wrap_cell_content(&record.text(column).unwrap_or_default()))
            .collect::<Vec<String>>();
        Some(content.join(","))
    }

    fn copy_row(&mut self) {
        let Some(row_content) = self.selected_row_as_csv() else {
            self.set_status_message("No record selected");
            return;
        };
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(row_content)) {
            Ok(_) => {
                trace!("Copied row to clipboard.");
                self.set_status_message("Copied row to clipboard");
            }
            Err(e) => {
                error!("Error copying to clipboard: {:?}", e);
                self.set_status_message(format!("Clipboard unavailable: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{ALL_OPTION, TableBody};
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};
    use std::path::{Path, PathBuf};

    fn fixtures() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
    }

    fn config() -> SVConfig {
        SVConfig::default().with_data_dir(fixtures())
    }

    fn admin() -> Session {
        Session::new(
            Some("token".into()),
            Some("admin".into()),
            Some("Registrar".into()),
            None,
        )
    }

    fn head_of(department: &str) -> Session {
        Session::new(
            Some("token".into()),
            Some("faculty".into()),
            Some("Department Head".into()),
            Some(department.into()),
        )
    }

    fn send(model: &mut Model, messages: &[Message]) {
        for message in messages {
            model.update(Some(message.clone())).unwrap();
        }
    }

    fn type_text(model: &mut Model, text: &str) {
        for c in text.chars() {
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            model.update(Some(Message::RawKey(key))).unwrap();
        }
    }

    fn key(model: &mut Model, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        model.update(Some(Message::RawKey(key))).unwrap();
    }

    #[test]
    fn refuses_to_start_without_token() {
        let session = Session::new(None, Some("admin".into()), None, None);
        assert!(matches!(
            Model::init(&config(), session),
            Err(SVError::NotAuthenticated)
        ));
    }

    #[test]
    fn admin_cycles_through_all_views() {
        let mut model = Model::init(&config(), admin()).unwrap();
        assert_eq!(model.current_view(), Resource::Colleges);
        assert_eq!(model.browser().total_count(), 6);

        send(&mut model, &[Message::NextView]);
        assert_eq!(model.current_view(), Resource::Programs);
        send(&mut model, &[Message::PrevView, Message::PrevView]);
        assert_eq!(model.current_view(), Resource::AuditLogs);
    }

    #[test]
    fn department_head_is_scoped_to_their_college() {
        let config = config().with_initial_view(Some(Resource::Professors));
        let model = Model::init(&config, head_of("ccs")).unwrap();
        assert_eq!(model.browser().selected_filter(COLLEGE_COLUMN), "CCS");
        assert!(
            model
                .browser()
                .filtered_records()
                .iter()
                .all(|r| r.text(COLLEGE_COLUMN).as_deref() == Some("CCS"))
        );

        let data = model.get_uidata();
        assert_eq!(data.branding.code, "CCS");
        assert_eq!(data.role, Role::DepartmentHead);
        assert_eq!(data.table.filters[0].label, "College of Computer Studies");
    }

    #[test]
    fn unknown_department_is_not_scoped() {
        let config = config().with_initial_view(Some(Resource::Professors));
        let model = Model::init(&config, head_of("XYZ")).unwrap();
        assert_eq!(model.browser().selected_filter(COLLEGE_COLUMN), ALL_OPTION);
        assert_eq!(model.get_uidata().branding, &branding::DEFAULT);
    }

    #[test]
    fn restricted_views_cannot_be_opened() {
        let config = config().with_initial_view(Some(Resource::Users));
        assert!(matches!(
            Model::init(&config, head_of("CCS")),
            Err(SVError::UnknownView(_))
        ));
    }

    #[test]
    fn missing_collection_shows_empty_table() {
        let config = SVConfig::default().with_data_dir(fixtures().join("missing"));
        let model = Model::init(&config, admin()).unwrap();
        assert!(model.status_message().starts_with("No colleges data"));
        assert_eq!(model.get_uidata().table.body, TableBody::NoMatches);
    }

    #[test]
    fn live_search_and_cancel() {
        let config = config().with_initial_view(Some(Resource::Rooms));
        let mut model = Model::init(&config, admin()).unwrap();
        assert_eq!(model.browser().filtered_count(), 12);

        send(&mut model, &[Message::Search]);
        assert!(model.raw_keyevents());
        type_text(&mut model, "lab");
        let labs = model.browser().filtered_count();
        assert!(labs > 0 && labs < 12);
        key(&mut model, KeyCode::Enter);
        assert!(!model.raw_keyevents());
        assert_eq!(model.status_message(), format!("Found {labs} results"));

        send(&mut model, &[Message::Search]);
        type_text(&mut model, "zzz");
        assert_eq!(model.browser().filtered_count(), 0);
        key(&mut model, KeyCode::Esc);
        assert_eq!(model.browser().state().search, "lab");
        assert_eq!(model.browser().filtered_count(), labs);
    }

    #[test]
    fn paging_with_the_cursor_and_jump() {
        let config = config().with_initial_view(Some(Resource::Rooms));
        let mut model = Model::init(&config, admin()).unwrap();
        assert_eq!(model.browser().total_pages(), 2);

        for _ in 0..10 {
            send(&mut model, &[Message::MoveDown]);
        }
        assert_eq!(model.browser().page(), 2);
        assert_eq!(model.get_uidata().selected_row, 0);
        send(&mut model, &[Message::MoveUp]);
        assert_eq!(model.browser().page(), 1);
        assert_eq!(model.get_uidata().selected_row, 9);

        send(&mut model, &[Message::JumpToPage]);
        type_text(&mut model, "2");
        key(&mut model, KeyCode::Enter);
        assert_eq!(model.browser().page(), 2);
        assert_eq!(model.status_message(), "Page 2 of 2");

        send(&mut model, &[Message::CyclePageSize]);
        assert_eq!(model.browser().page_size(), 20);
        assert_eq!(model.browser().page(), 1);
    }

    #[test]
    fn filters_cycle_from_the_keyboard() {
        let config = config().with_initial_view(Some(Resource::Rooms));
        let mut model = Model::init(&config, admin()).unwrap();
        send(&mut model, &[Message::CycleFilterOption]);
        let building = model.browser().selected_filter("Building").to_string();
        assert_ne!(building, ALL_OPTION);
        assert!(model.browser().filtered_count() < 12);

        send(&mut model, &[Message::FocusNextFilter, Message::CycleFilterOption]);
        assert_ne!(model.browser().selected_filter("Type"), ALL_OPTION);

        send(&mut model, &[Message::ClearFilters]);
        assert_eq!(model.browser().filtered_count(), 12);
    }

    #[test]
    fn sorting_uses_the_selected_column() {
        let config = config().with_initial_view(Some(Resource::Rooms));
        let mut model = Model::init(&config, admin()).unwrap();
        send(&mut model, &[Message::MoveRight, Message::MoveRight, Message::SortDescending]);
        let sort = model.browser().sort().unwrap();
        assert_eq!(sort.column, "Capacity");
        assert!(!sort.ascending);
        let first = model.browser().page_record(0).unwrap();
        assert_eq!(first.get("Capacity"), Some(&Cell::Number(120.0)));
    }

    #[test]
    fn record_popup_opens_and_closes() {
        let config = config().with_initial_view(Some(Resource::Professors));
        let mut model = Model::init(&config, admin()).unwrap();
        send(&mut model, &[Message::Enter]);
        let data = model.get_uidata();
        assert!(data.show_popup);
        assert_eq!(data.popup_title, "Professors record");
        assert!(data.popup_message.contains("Email"));
        assert!(data.popup_message.contains("original"));

        send(&mut model, &[Message::NextPage, Message::Exit]);
        assert!(!model.get_uidata().show_popup);
        assert_eq!(model.browser().page(), 1);
    }

    #[test]
    fn copied_rows_are_csv_quoted() {
        assert_eq!(Model::wrap_cell_content("CCS"), "CCS");
        assert_eq!(Model::wrap_cell_content("Lab, 2nd floor"), "\"Lab, 2nd floor\"");
        assert_eq!(Model::wrap_cell_content("say \"hi\""), "\"say \"\"hi\"\"\"");

        let config = config().with_initial_view(Some(Resource::Rooms));
        let model = Model::init(&config, admin()).unwrap();
        assert_eq!(
            model.selected_row_as_csv().as_deref(),
            Some("CCS-101,\"CCS Building\",40,Lecture")
        );
    }

    #[test]
    fn quit_from_any_table_state() {
        let mut model = Model::init(&config(), admin()).unwrap();
        send(&mut model, &[Message::Help]);
        assert!(model.get_uidata().show_popup);
        send(&mut model, &[Message::Quit]);
        assert_eq!(model.status, Status::QUITTING);
    }
}
