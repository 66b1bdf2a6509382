//! Appointment Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{
    AppointmentCreate, AppointmentDetail, AppointmentStatus, AppointmentUpdate, PaymentStatus,
    SpaAppointment,
};
use crate::utils::generate_token;
use chrono::{DateTime, Utc};
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

const TABLE: &str = "spa_appointment";

// Record links are stored in their string form, so reference expansion is an
// explicit subquery rather than a FETCH clause.
const DETAIL_FIELDS: &str = "*, \
    IF service != NONE THEN (SELECT * FROM type::thing(service))[0] ELSE NONE END AS service, \
    IF therapist != NONE THEN (SELECT * FROM type::thing(therapist))[0] ELSE NONE END AS therapist, \
    IF spa_room != NONE THEN (SELECT * FROM type::thing(spa_room))[0] ELSE NONE END AS spa_room";

#[derive(Clone)]
pub struct AppointmentRepository {
    base: BaseRepository,
}

impl AppointmentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All appointments with their references fetched, newest date first
    pub async fn find_all_detail(&self) -> RepoResult<Vec<AppointmentDetail>> {
        let appointments: Vec<AppointmentDetail> = self
            .base
            .db()
            .query(format!(
                "SELECT {DETAIL_FIELDS} FROM spa_appointment ORDER BY appointment_date DESC"
            ))
            .await?
            .take(0)?;
        Ok(appointments)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<SpaAppointment>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let appointment: Option<SpaAppointment> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(appointment)
    }

    /// One appointment with its references fetched
    pub async fn find_detail(&self, id: &str) -> RepoResult<Option<AppointmentDetail>> {
        let thing = make_thing(TABLE, id);
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {DETAIL_FIELDS} FROM $thing"))
            .bind(("thing", thing))
            .await?;
        let appointments: Vec<AppointmentDetail> = result.take(0)?;
        Ok(appointments.into_iter().next())
    }

    pub async fn create(&self, data: AppointmentCreate) -> RepoResult<SpaAppointment> {
        let now = Utc::now();
        let appointment = SpaAppointment {
            id: None,
            appointment_id: generate_token("APT"),
            guest_id: make_thing("guest", &data.guest_id),
            guest_name: data.guest_name,
            guest_phone: data.guest_phone,
            guest_email: data.guest_email,
            room_number: data.room_number,
            service: make_thing("spa_service", &data.service),
            service_name: data.service_name,
            therapist: data.therapist.map(|id| make_thing("therapist", &id)),
            therapist_name: data.therapist_name,
            spa_room: data.spa_room.map(|id| make_thing("spa_room", &id)),
            spa_room_number: data.spa_room_number,
            package: data.package.map(|id| make_thing("spa_package", &id)),
            package_name: data.package_name,
            appointment_date: data.appointment_date,
            start_time: data.start_time,
            end_time: data.end_time,
            duration: data.duration,
            status: data.status.unwrap_or(AppointmentStatus::Pending),
            service_price: data.service_price,
            therapist_price: data.therapist_price.unwrap_or(0.0),
            room_price: data.room_price.unwrap_or(0.0),
            discount: data.discount.unwrap_or(0.0),
            total_price: data.total_price,
            payment_status: data.payment_status.unwrap_or(PaymentStatus::Pending),
            notes: data.notes,
            special_requests: data.special_requests,
            health_notes: data.health_notes,
            allergies: data.allergies,
            preferences: data.preferences,
            reminder_sent: false,
            created_at: now,
            updated_at: now,
        };

        let created: Option<SpaAppointment> =
            self.base.db().create(TABLE).content(appointment).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create appointment".to_string()))
    }

    pub async fn update(&self, id: &str, data: AppointmentUpdate) -> RepoResult<SpaAppointment> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Appointment {} not found", id)))?;

        // Reference ids come in as strings, record links go out as Things
        #[derive(Serialize)]
        struct AppointmentUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            guest_name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            guest_phone: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            guest_email: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            room_number: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            service: Option<Thing>,
            #[serde(skip_serializing_if = "Option::is_none")]
            service_name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            therapist: Option<Thing>,
            #[serde(skip_serializing_if = "Option::is_none")]
            therapist_name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            spa_room: Option<Thing>,
            #[serde(skip_serializing_if = "Option::is_none")]
            spa_room_number: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            package: Option<Thing>,
            #[serde(skip_serializing_if = "Option::is_none")]
            package_name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            appointment_date: Option<DateTime<Utc>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            start_time: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            end_time: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            duration: Option<i32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            status: Option<AppointmentStatus>,
            #[serde(skip_serializing_if = "Option::is_none")]
            service_price: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            therapist_price: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            room_price: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            discount: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            total_price: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            payment_status: Option<PaymentStatus>,
            #[serde(skip_serializing_if = "Option::is_none")]
            notes: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            special_requests: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            health_notes: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            allergies: Option<Vec<String>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            preferences: Option<Vec<String>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            reminder_sent: Option<bool>,
            updated_at: DateTime<Utc>,
        }

        let update_data = AppointmentUpdateDb {
            guest_name: data.guest_name,
            guest_phone: data.guest_phone,
            guest_email: data.guest_email,
            room_number: data.room_number,
            service: data.service.map(|id| make_thing("spa_service", &id)),
            service_name: data.service_name,
            therapist: data.therapist.map(|id| make_thing("therapist", &id)),
            therapist_name: data.therapist_name,
            spa_room: data.spa_room.map(|id| make_thing("spa_room", &id)),
            spa_room_number: data.spa_room_number,
            package: data.package.map(|id| make_thing("spa_package", &id)),
            package_name: data.package_name,
            appointment_date: data.appointment_date,
            start_time: data.start_time,
            end_time: data.end_time,
            duration: data.duration,
            status: data.status,
            service_price: data.service_price,
            therapist_price: data.therapist_price,
            room_price: data.room_price,
            discount: data.discount,
            total_price: data.total_price,
            payment_status: data.payment_status,
            notes: data.notes,
            special_requests: data.special_requests,
            health_notes: data.health_notes,
            allergies: data.allergies,
            preferences: data.preferences,
            reminder_sent: data.reminder_sent,
            updated_at: Utc::now(),
        };

        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let thing = make_thing(TABLE, &pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", update_data))
            .await?;

        self.find_by_id(&pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Appointment {} not found", id)))
    }

    /// Write the status value as-is. No transition rules apply.
    pub async fn set_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> RepoResult<SpaAppointment> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Appointment {} not found", id)))?;

        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let thing = make_thing(TABLE, &pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE { status: $status, updated_at: $now }")
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("now", Utc::now()))
            .await?;

        self.find_by_id(&pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Appointment {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<SpaAppointment> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<SpaAppointment> = self.base.db().delete((TABLE, pure_id)).await?;
        deleted.ok_or_else(|| RepoError::NotFound(format!("Appointment {} not found", id)))
    }
}
