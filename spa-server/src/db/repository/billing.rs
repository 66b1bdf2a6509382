//! Billing Repository

use super::{BaseRepository, RepoError, RepoResult, Stamped, make_thing, strip_table_prefix};
use crate::billing::{BillingRecompute, BillingStore};
use crate::db::models::{BillingCreate, BillingDetail, BillingUpdate, PaymentStatus, SpaBilling};
use crate::utils::{AppError, AppResult, generate_token};
use async_trait::async_trait;
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

const TABLE: &str = "spa_billing";

// The appointment link is stored in its string form, so expansion is an
// explicit subquery and equality filters bind the string representation.
const DETAIL_FIELDS: &str = "*, \
    IF appointment != NONE THEN (SELECT * FROM type::thing(appointment))[0] ELSE NONE END AS appointment";

#[derive(Clone)]
pub struct BillingRepository {
    base: BaseRepository,
}

impl BillingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All invoices with their appointment fetched, newest first
    pub async fn find_all_detail(&self) -> RepoResult<Vec<BillingDetail>> {
        let billings: Vec<BillingDetail> = self
            .base
            .db()
            .query(format!(
                "SELECT {DETAIL_FIELDS} FROM spa_billing ORDER BY created_at DESC"
            ))
            .await?
            .take(0)?;
        Ok(billings)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<SpaBilling>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let billing: Option<SpaBilling> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(billing)
    }

    /// One invoice with its appointment fetched
    pub async fn find_detail(&self, id: &str) -> RepoResult<Option<BillingDetail>> {
        let thing = make_thing(TABLE, id);
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {DETAIL_FIELDS} FROM $thing"))
            .bind(("thing", thing))
            .await?;
        let billings: Vec<BillingDetail> = result.take(0)?;
        Ok(billings.into_iter().next())
    }

    /// The invoice paired to an appointment with the appointment fetched
    pub async fn find_for_appointment(
        &self,
        appointment_id: &str,
    ) -> RepoResult<Option<BillingDetail>> {
        let link = make_thing("spa_appointment", appointment_id).to_string();
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {DETAIL_FIELDS} FROM spa_billing WHERE appointment = $appt LIMIT 1"
            ))
            .bind(("appt", link))
            .await?;
        let billings: Vec<BillingDetail> = result.take(0)?;
        Ok(billings.into_iter().next())
    }

    /// Manual invoice creation, independent of the appointment derivation.
    /// The record is stored exactly as supplied, token generated here.
    pub async fn create(&self, data: BillingCreate) -> RepoResult<SpaBilling> {
        let now = Utc::now();
        let billing = SpaBilling {
            id: None,
            billing_id: generate_token("BIL"),
            appointment: make_thing("spa_appointment", &data.appointment),
            guest_id: make_thing("guest", &data.guest_id),
            guest_name: data.guest_name,
            guest_email: data.guest_email,
            guest_phone: data.guest_phone,
            guest_address: data.guest_address,
            invoice_date: data.invoice_date.unwrap_or(now),
            items: data.items,
            subtotal: data.subtotal,
            tax: data.tax.unwrap_or(0.0),
            discount: data.discount.unwrap_or(0.0),
            total: data.total,
            amount_paid: data.amount_paid.unwrap_or(0.0),
            amount_due: data.amount_due,
            payment_status: data.payment_status.unwrap_or(PaymentStatus::Pending),
            payment_method: data.payment_method,
            notes: data.notes,
            due_date: data.due_date,
            created_at: now,
            updated_at: now,
        };

        let created: Option<SpaBilling> = self.base.db().create(TABLE).content(billing).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create billing".to_string()))
    }

    /// Direct edit of invoice fields. Values are written as given; nothing is
    /// recomputed and nothing flows back to the appointment.
    pub async fn update(&self, id: &str, data: BillingUpdate) -> RepoResult<SpaBilling> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Billing {} not found", id)))?;

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
            .ok_or_else(|| RepoError::NotFound(format!("Billing {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<SpaBilling> = self.base.db().delete((TABLE, pure_id)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Billing {} not found", id)));
        }
        Ok(true)
    }
}

#[async_trait]
impl BillingStore for BillingRepository {
    async fn find_by_appointment(&self, appointment: &Thing) -> AppResult<Option<SpaBilling>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM spa_billing WHERE appointment = $appt LIMIT 1")
            .bind(("appt", appointment.to_string()))
            .await
            .map_err(RepoError::from)?;
        let billings: Vec<SpaBilling> = result.take(0).map_err(RepoError::from)?;
        Ok(billings.into_iter().next())
    }

    async fn insert(&self, billing: SpaBilling) -> AppResult<SpaBilling> {
        let created: Option<SpaBilling> = self
            .base
            .db()
            .create(TABLE)
            .content(billing)
            .await
            .map_err(RepoError::from)?;
        created.ok_or_else(|| AppError::Database("Failed to create billing".to_string()))
    }

    async fn apply_recompute(
        &self,
        id: &Thing,
        patch: BillingRecompute,
    ) -> AppResult<SpaBilling> {
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", id.clone()))
            .bind(("data", patch))
            .await
            .map_err(RepoError::from)?;

        let refreshed = self
            .find_by_id(&id.id.to_raw())
            .await
            .map_err(AppError::from)?;
        refreshed.ok_or_else(|| AppError::NotFound(format!("Billing {} not found", id)))
    }

    async fn delete_by_appointment(&self, appointment: &Thing) -> AppResult<()> {
        self.base
            .db()
            .query("DELETE spa_billing WHERE appointment = $appt")
            .bind(("appt", appointment.to_string()))
            .await
            .map_err(RepoError::from)?;
        Ok(())
    }
}
