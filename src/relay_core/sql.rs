use anyhow::Result;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

use super::schema::messages;
use super::store::MessageStore;
use super::types::{Message, Role};

type Pooled = diesel::r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

/// Database-backed message log. Connections are leased from the pool per
/// call and returned when the guard drops, success or failure.
pub struct SqliteStore {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct MessageRecord {
    id: i32,
    role: Role,
    content: String,
    timestamp: NaiveDateTime,
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Message {
        Message {
            id: Some(record.id),
            role: record.role,
            content: record.content,
            timestamp: Some(record.timestamp),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = messages)]
struct NewMessage<'a> {
    role: Role,
    content: &'a str,
}

impl SqliteStore {
    pub fn connect(database_url: &str) -> Result<SqliteStore> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder().build(manager)?;
        Ok(SqliteStore { pool })
    }

    fn conn(&self) -> Result<Pooled> {
        Ok(self.pool.get()?)
    }
}

impl MessageStore for SqliteStore {
    fn insert(&self, role: Role, content: &str) -> Result<Message> {
        let mut conn = self.conn()?;
        let record: MessageRecord = diesel::insert_into(messages::table)
            .values(NewMessage { role, content })
            .get_result(&mut conn)?;
        Ok(record.into())
    }

    fn latest(&self, n: usize) -> Result<Vec<Message>> {
        let mut conn = self.conn()?;
        let records = messages::table
            .order((messages::timestamp.desc(), messages::id.desc()))
            .limit(n as i64)
            .load::<MessageRecord>(&mut conn)?;
        Ok(records.into_iter().map(Message::from).collect())
    }

    fn all(&self) -> Result<Vec<Message>> {
        let mut conn = self.conn()?;
        let records = messages::table
            .order((messages::timestamp.asc(), messages::id.asc()))
            .load::<MessageRecord>(&mut conn)?;
        Ok(records.into_iter().map(Message::from).collect())
    }
}
