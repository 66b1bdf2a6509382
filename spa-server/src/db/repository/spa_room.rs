//! Spa Room Repository

use super::{BaseRepository, RepoError, RepoResult, Stamped, make_thing, strip_table_prefix};
use crate::db::models::{SpaRoom, SpaRoomCreate, SpaRoomStatus, SpaRoomUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "spa_room";

#[derive(Clone)]
pub struct SpaRoomRepository {
    base: BaseRepository,
}

impl SpaRoomRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<SpaRoom>> {
        let rooms: Vec<SpaRoom> = self
            .base
            .db()
            .query("SELECT * FROM spa_room ORDER BY room_number")
            .await?
            .take(0)?;
        Ok(rooms)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<SpaRoom>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let room: Option<SpaRoom> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(room)
    }

    pub async fn find_by_number(&self, room_number: &str) -> RepoResult<Option<SpaRoom>> {
        let number_owned = room_number.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM spa_room WHERE room_number = $number LIMIT 1")
            .bind(("number", number_owned))
            .await?;
        let rooms: Vec<SpaRoom> = result.take(0)?;
        Ok(rooms.into_iter().next())
    }

    pub async fn create(&self, data: SpaRoomCreate) -> RepoResult<SpaRoom> {
        if self.find_by_number(&data.room_number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Room '{}' already exists",
                data.room_number
            )));
        }

        let now = Utc::now();
        let room = SpaRoom {
            id: None,
            room_number: data.room_number,
            room_type: data.room_type,
            capacity: data.capacity,
            amenities: data.amenities,
            features: data.features,
            status: data.status.unwrap_or(SpaRoomStatus::Available),
            hourly_rate: data.hourly_rate,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<SpaRoom> = self.base.db().create(TABLE).content(room).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create room".to_string()))
    }

    pub async fn update(&self, id: &str, data: SpaRoomUpdate) -> RepoResult<SpaRoom> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))?;

        if let Some(ref new_number) = data.room_number
            && new_number != &existing.room_number
            && self.find_by_number(new_number).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Room '{}' already exists",
                new_number
            )));
        }

        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let thing = make_thing(TABLE, &pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", Stamped::now(data)))
            .await?;

        self.find_by_id(&pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))
    }

    pub async fn toggle_active(&self, id: &str) -> RepoResult<SpaRoom> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))?;

        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let thing = make_thing(TABLE, &pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE { is_active: $active, updated_at: $now }")
            .bind(("thing", thing))
            .bind(("active", !existing.is_active))
            .bind(("now", Utc::now()))
            .await?;

        self.find_by_id(&pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<SpaRoom> = self.base.db().delete((TABLE, pure_id)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Room {} not found", id)));
        }
        Ok(true)
    }
}
