//! Pin repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `pins` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Pin::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - A persisted position is either a complete (lat, lng) pair or fully NULL.

use crate::db::DbError;
use crate::model::pin::{GeoPoint, Pin, PinId, PinValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const PIN_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    lat,
    lng,
    is_deleted
FROM pins";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for pin persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(PinValidationError),
    Db(DbError),
    NotFound(PinId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "pin not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted pin data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<PinValidationError> for RepoError {
    fn from(value: PinValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing pins.
#[derive(Debug, Clone, Default)]
pub struct PinListQuery {
    pub include_deleted: bool,
    /// When set, only pins with a stored position are returned. This is the
    /// query shape map refresh uses.
    pub only_positioned: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for pin CRUD operations.
pub trait PinRepository {
    fn create_pin(&self, pin: &Pin) -> RepoResult<PinId>;
    fn update_pin(&self, pin: &Pin) -> RepoResult<()>;
    fn get_pin(&self, id: PinId, include_deleted: bool) -> RepoResult<Option<Pin>>;
    fn list_pins(&self, query: &PinListQuery) -> RepoResult<Vec<Pin>>;
    fn soft_delete_pin(&self, id: PinId) -> RepoResult<()>;
}

/// SQLite-backed pin repository.
pub struct SqlitePinRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePinRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PinRepository for SqlitePinRepository<'_> {
    fn create_pin(&self, pin: &Pin) -> RepoResult<PinId> {
        pin.validate()?;

        self.conn.execute(
            "INSERT INTO pins (
                uuid,
                title,
                lat,
                lng,
                is_deleted
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                pin.uuid.to_string(),
                pin.title.as_str(),
                pin.position.map(|p| p.lat),
                pin.position.map(|p| p.lng),
                bool_to_int(pin.is_deleted),
            ],
        )?;

        Ok(pin.uuid)
    }

    fn update_pin(&self, pin: &Pin) -> RepoResult<()> {
        pin.validate()?;

        let changed = self.conn.execute(
            "UPDATE pins
             SET
                title = ?1,
                lat = ?2,
                lng = ?3,
                is_deleted = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?5;",
            params![
                pin.title.as_str(),
                pin.position.map(|p| p.lat),
                pin.position.map(|p| p.lng),
                bool_to_int(pin.is_deleted),
                pin.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(pin.uuid));
        }

        Ok(())
    }

    fn get_pin(&self, id: PinId, include_deleted: bool) -> RepoResult<Option<Pin>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PIN_SELECT_SQL}
             WHERE uuid = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_pin_row(row)?));
        }

        Ok(None)
    }

    fn list_pins(&self, query: &PinListQuery) -> RepoResult<Vec<Pin>> {
        let mut sql = format!("{PIN_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND is_deleted = 0");
        }

        if query.only_positioned {
            sql.push_str(" AND lat IS NOT NULL AND lng IS NOT NULL");
        }

        sql.push_str(" ORDER BY updated_at DESC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut pins = Vec::new();

        while let Some(row) = rows.next()? {
            pins.push(parse_pin_row(row)?);
        }

        Ok(pins)
    }

    fn soft_delete_pin(&self, id: PinId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE pins
             SET
                is_deleted = 1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_pin_row(row: &Row<'_>) -> RepoResult<Pin> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in pins.uuid"))
    })?;

    let lat: Option<f64> = row.get("lat")?;
    let lng: Option<f64> = row.get("lng")?;
    let position = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        (None, None) => None,
        _ => {
            return Err(RepoError::InvalidData(format!(
                "partial position (lat={lat:?}, lng={lng:?}) for pin `{uuid_text}`"
            )));
        }
    };

    let is_deleted = match row.get::<_, i64>("is_deleted")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_deleted value `{other}` in pins.is_deleted"
            )));
        }
    };

    let pin = Pin {
        uuid,
        title: row.get("title")?,
        position,
        is_deleted,
    };
    pin.validate()?;
    Ok(pin)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
