use std::fmt;
use std::io::Error;
use std::path::PathBuf;

use derive_setters::Setters;
use polars::error::PolarsError;
use ratatui::crossterm::event::KeyEvent;

use crate::resource::Resource;

pub const DEFAULT_PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;

pub const HELP_TEXT: &str = "\
Navigation
  Tab / Shift-Tab   next / previous view
  j k / Down Up     move row selection
  h l / Left Right  move column selection
  n p / PgDn PgUp   next / previous page
  g G / Home End    first / last page
  :                 jump to page

Search & filter
  /                 search in all fields
  f                 focus next filter
  Space             cycle focused filter option
  c                 clear search and filters
  +  -              sort selected column ascending / descending
  s                 cycle rows per page

Records
  Enter             show record details
  y                 copy row to clipboard
  r                 reload view
  ?                 this help
  Esc               close popup
  q                 quit";

#[derive(Debug)]
pub enum SVError {
    IoError(Error),
    PolarsError(PolarsError),
    JsonError(serde_json::Error),
    LoadingFailed(String),
    FileNotFound,
    PermissionDenied,
    UnknownFileType,
    UnknownView(String),
    NotAuthenticated,
    NoColumns,
}

impl fmt::Display for SVError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SVError::IoError(e) => write!(f, "I/O error: {e}"),
            SVError::PolarsError(e) => write!(f, "could not read table: {e}"),
            SVError::JsonError(e) => write!(f, "invalid JSON: {e}"),
            SVError::LoadingFailed(reason) => write!(f, "loading failed: {reason}"),
            SVError::FileNotFound => write!(f, "file not found"),
            SVError::PermissionDenied => write!(f, "permission denied"),
            SVError::UnknownFileType => write!(f, "unknown file type"),
            SVError::UnknownView(name) => write!(f, "unknown view \"{name}\""),
            SVError::NotAuthenticated => {
                write!(f, "no session token found, run `schedview login` first")
            }
            SVError::NoColumns => write!(f, "a table needs at least one column"),
        }
    }
}

impl std::error::Error for SVError {}

impl From<Error> for SVError {
    fn from(err: Error) -> Self {
        SVError::IoError(err)
    }
}

impl From<PolarsError> for SVError {
    fn from(err: PolarsError) -> Self {
        SVError::PolarsError(err)
    }
}

impl From<serde_json::Error> for SVError {
    fn from(err: serde_json::Error) -> Self {
        SVError::JsonError(err)
    }
}

#[derive(Debug, Clone, Setters)]
#[setters(prefix = "with_")]
pub struct SVConfig {
    pub event_poll_time: u64,
    pub max_column_width: usize,
    pub page_sizes: Vec<usize>,
    pub default_page_size: usize,
    pub data_dir: PathBuf,
    pub initial_view: Option<Resource>,
}

impl Default for SVConfig {
    fn default() -> Self {
        Self {
            event_poll_time: 100,
            max_column_width: 32,
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZE,
            data_dir: PathBuf::from("."),
            initial_view: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CMDMode {
    Search,
    JumpToPage,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    SortAscending,
    SortDescending,
    CyclePageSize,
    FocusNextFilter,
    CycleFilterOption,
    ClearFilters,
    Search,
    JumpToPage,
    Enter,
    Exit,
    Help,
    CopyRow,
    NextView,
    PrevView,
    Reload,
    RawKey(KeyEvent),
}
