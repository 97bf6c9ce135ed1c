//! Request DTOs and field validation.
//!
//! Bodies are read as loose JSON objects so that every bad field can be
//! reported at once (`Missing name`, `Invalid createdDate`, ...) instead of
//! failing on the first serde error.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use drivetree_core::error::AppError;
use drivetree_core::result::AppResult;
use drivetree_service::{CreateFileRequest, CreateFolderRequest};

/// Longest accepted name, extension or MIME type, in characters.
pub const MAX_NAME_LENGTH: u64 = 255;

/// Validate that a string does not contain control characters.
pub fn no_control_chars(value: &str) -> Result<(), validator::ValidationError> {
    if value.chars().any(char::is_control) {
        return Err(validator::ValidationError::new("no_control_chars")
            .with_message("Must not contain control characters".into()));
    }
    Ok(())
}

/// Validate that a string is not empty after trimming whitespace.
pub fn not_empty_trimmed(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("not_empty_trimmed")
            .with_message("Must not be empty".into()));
    }
    Ok(())
}

/// Validate that a name does not contain a path separator.
pub fn no_path_separator(value: &str) -> Result<(), validator::ValidationError> {
    if value.contains('/') {
        return Err(validator::ValidationError::new("no_path_separator")
            .with_message("Must not contain '/'".into()));
    }
    Ok(())
}

#[derive(Debug, Validate)]
struct NameField {
    #[validate(
        length(min = 1, max = 255),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars"),
        custom(function = "no_path_separator")
    )]
    value: String,
}

#[derive(Debug, Validate)]
struct LabelField {
    #[validate(
        length(max = 255),
        custom(function = "no_control_chars"),
        custom(function = "no_path_separator")
    )]
    value: String,
}

/// Parse a client date: RFC 3339, or a bare `YYYY-MM-DD` taken as midnight UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Reads fields out of a JSON object, collecting one message per bad field.
#[derive(Debug)]
pub struct FieldReader<'a> {
    body: &'a Map<String, Value>,
    errors: Vec<String>,
}

impl<'a> FieldReader<'a> {
    /// Start reading a body.
    pub fn new(body: &'a Map<String, Value>) -> Self {
        Self {
            body,
            errors: Vec::new(),
        }
    }

    fn present(&self, key: &str) -> Option<&'a Value> {
        self.body.get(key).filter(|v| !v.is_null())
    }

    fn missing(&mut self, key: &str) {
        self.errors.push(format!("Missing {key}"));
    }

    fn invalid(&mut self, key: &str) {
        self.errors.push(format!("Invalid {key}"));
    }

    fn uuid_value(&mut self, key: &str, value: &Value) -> Option<Uuid> {
        match value.as_str().and_then(|s| Uuid::parse_str(s.trim()).ok()) {
            Some(id) => Some(id),
            None => {
                self.invalid(key);
                None
            }
        }
    }

    /// A UUID string that must be present.
    pub fn required_uuid(&mut self, key: &str) -> Option<Uuid> {
        match self.present(key) {
            Some(value) => self.uuid_value(key, value),
            None => {
                self.missing(key);
                None
            }
        }
    }

    /// A UUID string that may be absent or `null`.
    pub fn optional_uuid(&mut self, key: &str) -> Option<Uuid> {
        let value = self.present(key)?;
        self.uuid_value(key, value)
    }

    /// A key that must be present, holding a UUID string or `null`.
    ///
    /// The outer `None` means the field was bad; `Some(None)` is an explicit null.
    pub fn nullable_uuid(&mut self, key: &str) -> Option<Option<Uuid>> {
        match self.body.get(key) {
            None => {
                self.missing(key);
                None
            }
            Some(Value::Null) => Some(None),
            Some(value) => self.uuid_value(key, value).map(Some),
        }
    }

    /// A folder or file name: non-blank, at most 255 characters, no control
    /// characters and no `/`.
    pub fn name(&mut self, key: &str) -> Option<String> {
        let Some(value) = self.present(key) else {
            self.missing(key);
            return None;
        };
        let Some(raw) = value.as_str() else {
            self.invalid(key);
            return None;
        };
        let field = NameField {
            value: raw.trim().to_string(),
        };
        if field.validate().is_err() {
            self.invalid(key);
            return None;
        }
        Some(field.value)
    }

    /// A short label such as an extension. May be empty.
    pub fn label(&mut self, key: &str) -> Option<String> {
        let Some(value) = self.present(key) else {
            self.missing(key);
            return None;
        };
        let Some(raw) = value.as_str() else {
            self.invalid(key);
            return None;
        };
        let field = LabelField {
            value: raw.trim().to_string(),
        };
        if field.validate().is_err() {
            self.invalid(key);
            return None;
        }
        Some(field.value)
    }

    /// A non-empty string of at most 255 characters.
    pub fn text(&mut self, key: &str) -> Option<String> {
        let Some(value) = self.present(key) else {
            self.missing(key);
            return None;
        };
        match value.as_str().map(str::trim) {
            Some(s) if !s.is_empty() && s.chars().count() as u64 <= MAX_NAME_LENGTH => {
                Some(s.to_string())
            }
            _ => {
                self.invalid(key);
                None
            }
        }
    }

    /// A date string, see [`parse_date`].
    pub fn date(&mut self, key: &str) -> Option<DateTime<Utc>> {
        let Some(value) = self.present(key) else {
            self.missing(key);
            return None;
        };
        match value.as_str().and_then(parse_date) {
            Some(date) => Some(date),
            None => {
                self.invalid(key);
                None
            }
        }
    }

    /// A non-negative integer, given as a JSON number or a numeric string.
    pub fn size(&mut self, key: &str) -> Option<i64> {
        let Some(value) = self.present(key) else {
            self.missing(key);
            return None;
        };
        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        match parsed {
            Some(size) if size >= 0 => Some(size),
            _ => {
                self.invalid(key);
                None
            }
        }
    }

    /// The `status` flag of a new row, which must be boolean `true`.
    pub fn live_status(&mut self, key: &str) {
        match self.present(key) {
            None => self.missing(key),
            Some(Value::Bool(true)) => {}
            Some(_) => self.invalid(key),
        }
    }

    /// Fail with every collected message, if any.
    pub fn finish(self) -> AppResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation_list(self.errors))
        }
    }
}

fn incomplete() -> AppError {
    AppError::validation("Invalid request body")
}

/// `POST /user/{userId}/folder`
pub fn create_folder_request(body: &Map<String, Value>) -> AppResult<CreateFolderRequest> {
    let mut reader = FieldReader::new(body);
    let id = reader.required_uuid("id");
    let name = reader.name("name");
    let parent_id = reader.optional_uuid("parentId");
    let created_date = reader.date("createdDate");
    reader.live_status("status");
    reader.finish()?;

    let (Some(id), Some(name), Some(created_date)) = (id, name, created_date) else {
        return Err(incomplete());
    };
    Ok(CreateFolderRequest {
        id,
        name,
        parent_id,
        created_date,
    })
}

/// `POST /user/{userId}/file`
pub fn create_file_request(body: &Map<String, Value>) -> AppResult<CreateFileRequest> {
    let mut reader = FieldReader::new(body);
    let id = reader.required_uuid("id");
    let name = reader.name("name");
    let extension = reader.label("extension");
    let mime_type = reader.text("mimeType");
    let size = reader.size("size");
    let folder_id = reader.optional_uuid("folderId");
    let created_date = reader.date("createdDate");
    reader.live_status("status");
    reader.finish()?;

    let (Some(id), Some(name), Some(extension), Some(mime_type), Some(size), Some(created_date)) =
        (id, name, extension, mime_type, size, created_date)
    else {
        return Err(incomplete());
    };
    Ok(CreateFileRequest {
        id,
        name,
        extension,
        mime_type,
        size,
        folder_id,
        created_date,
    })
}

/// `PUT` on a folder or file: `{ name }`.
pub fn rename_request(body: &Map<String, Value>) -> AppResult<String> {
    let mut reader = FieldReader::new(body);
    let name = reader.name("name");
    reader.finish()?;
    name.ok_or_else(incomplete)
}

/// `PATCH` on a folder (`parentId`) or file (`folderId`): a UUID or `null`.
pub fn move_request(body: &Map<String, Value>, key: &str) -> AppResult<Option<Uuid>> {
    let mut reader = FieldReader::new(body);
    let target = reader.nullable_uuid(key);
    reader.finish()?;
    target.ok_or_else(incomplete)
}

/// `POST .../share`: `{ userId }`.
pub fn share_request(body: &Map<String, Value>) -> AppResult<Uuid> {
    let mut reader = FieldReader::new(body);
    let user_id = reader.required_uuid("userId");
    reader.finish()?;
    user_id.ok_or_else(incomplete)
}
