//! Session attributes persisted between runs.
//!
//! The store is a flat JSON object of string values. It is read once at startup into an
//! immutable [`Session`] that is handed to everything that needs it.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::branding::{self, BrandingEntry};
use crate::domain::SVError;

pub const TOKEN_KEY: &str = "token";
pub const USER_TYPE_KEY: &str = "userType";
pub const POSITION_KEY: &str = "position";
pub const DEPARTMENT_KEY: &str = "department";

const ADMIN_USER_TYPE: &str = "admin";
const DEPARTMENT_HEAD_POSITION: &str = "department head";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    DepartmentHead,
}

impl Role {
    pub fn title(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::DepartmentHead => "Department Head",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user_type: Option<String>,
    position: Option<String>,
    department: Option<String>,
}

impl Session {
    pub fn new(
        token: Option<String>,
        user_type: Option<String>,
        position: Option<String>,
        department: Option<String>,
    ) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            token: non_empty(token),
            user_type: non_empty(user_type),
            position: non_empty(position),
            department: non_empty(department),
        }
    }

    pub fn from_values(values: &HashMap<String, String>) -> Self {
        let get = |key: &str| values.get(key).cloned();
        Self::new(
            get(TOKEN_KEY),
            get(USER_TYPE_KEY),
            get(POSITION_KEY),
            get(DEPARTMENT_KEY),
        )
    }

    pub fn to_values(&self) -> HashMap<String, String> {
        [
            (TOKEN_KEY, &self.token),
            (USER_TYPE_KEY, &self.user_type),
            (POSITION_KEY, &self.position),
            (DEPARTMENT_KEY, &self.department),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key.to_string(), v)))
        .collect()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Only an admin that is not also a department head gets the full tree.
    pub fn role(&self) -> Role {
        let is_admin = self
            .user_type
            .as_deref()
            .is_some_and(|t| t.trim().eq_ignore_ascii_case(ADMIN_USER_TYPE));
        let is_head = self
            .position
            .as_deref()
            .is_some_and(|p| p.trim().eq_ignore_ascii_case(DEPARTMENT_HEAD_POSITION));
        if is_admin && !is_head {
            Role::Admin
        } else {
            Role::DepartmentHead
        }
    }

    pub fn user_type(&self) -> Option<&str> {
        self.user_type.as_deref()
    }

    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn branding(&self) -> &'static BrandingEntry {
        branding::resolve(self.department.as_deref().unwrap_or_default())
    }
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored session. A missing store is an empty session.
    pub fn load(&self) -> Result<Session, SVError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No session store at {:?}", self.path);
                return Ok(Session::default());
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return Err(SVError::PermissionDenied);
            }
            Err(e) => return Err(SVError::IoError(e)),
        };
        let values: HashMap<String, String> = serde_json::from_str(&content)?;
        Ok(Session::from_values(&values))
    }

    pub fn save(&self, session: &Session) -> Result<(), SVError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&session.to_values())?;
        fs::write(&self.path, content)?;
        info!("Saved session to {:?}", self.path);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SVError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Removed session {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SVError::IoError(e)),
        }
    }
}
