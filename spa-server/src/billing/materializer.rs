//! Billing materialization
//!
//! Creates and refreshes the invoice record paired to an appointment. The
//! callers treat these operations as side effects: a failure here is logged
//! and swallowed so the appointment write itself always stands.

use super::pricing::{build_line_items, compute_totals};
use crate::db::models::{BillingItem, PaymentStatus, SpaAppointment, SpaBilling};
use crate::utils::{AppError, AppResult, generate_token};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use surrealdb::sql::Thing;

/// Days until a fresh invoice falls due
const DUE_DAYS: i64 = 7;

/// Computed fields written back onto an existing invoice. `amount_paid` is
/// deliberately absent: payments recorded so far survive a regeneration.
/// `payment_status` tracks the appointment; payment method and notes are
/// left untouched.
#[derive(Debug, Clone, Serialize)]
pub struct BillingRecompute {
    pub items: Vec<BillingItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub discount: f64,
    pub total: f64,
    pub amount_due: f64,
    pub payment_status: PaymentStatus,
    pub updated_at: DateTime<Utc>,
}

/// Persistence seam for invoice records
#[async_trait]
pub trait BillingStore: Send + Sync {
    async fn find_by_appointment(&self, appointment: &Thing) -> AppResult<Option<SpaBilling>>;
    async fn insert(&self, billing: SpaBilling) -> AppResult<SpaBilling>;
    async fn apply_recompute(&self, id: &Thing, patch: BillingRecompute)
    -> AppResult<SpaBilling>;
    async fn delete_by_appointment(&self, appointment: &Thing) -> AppResult<()>;
}

fn appointment_link(appointment: &SpaAppointment) -> AppResult<Thing> {
    appointment
        .id
        .clone()
        .ok_or_else(|| AppError::Internal("appointment record has no id".to_string()))
}

/// Build and persist a fresh invoice for a newly created appointment.
pub async fn create_for_appointment<S: BillingStore + ?Sized>(
    store: &S,
    appointment: &SpaAppointment,
) -> AppResult<SpaBilling> {
    let link = appointment_link(appointment)?;
    let totals = compute_totals(appointment, 0.0);
    let now = Utc::now();

    let billing = SpaBilling {
        id: None,
        billing_id: generate_token("BIL"),
        appointment: link,
        guest_id: appointment.guest_id.clone(),
        guest_name: appointment.guest_name.clone(),
        guest_email: None,
        guest_phone: None,
        guest_address: None,
        invoice_date: now,
        items: build_line_items(appointment),
        subtotal: totals.subtotal,
        tax: totals.tax,
        discount: totals.discount,
        total: totals.total,
        amount_paid: 0.0,
        amount_due: totals.amount_due,
        payment_status: appointment.payment_status,
        payment_method: None,
        notes: None,
        due_date: Some(now + Duration::days(DUE_DAYS)),
        created_at: now,
        updated_at: now,
    };

    store.insert(billing).await
}

/// Recompute the invoice paired to an updated appointment.
///
/// Returns `Ok(None)` when no invoice exists for the appointment; the gap is
/// left as-is rather than backfilled.
pub async fn regenerate_for_appointment<S: BillingStore + ?Sized>(
    store: &S,
    appointment: &SpaAppointment,
) -> AppResult<Option<SpaBilling>> {
    let link = appointment_link(appointment)?;
    let Some(existing) = store.find_by_appointment(&link).await? else {
        return Ok(None);
    };
    let billing_id = existing
        .id
        .clone()
        .ok_or_else(|| AppError::Internal("billing record has no id".to_string()))?;

    let totals = compute_totals(appointment, existing.amount_paid);
    let patch = BillingRecompute {
        items: build_line_items(appointment),
        subtotal: totals.subtotal,
        tax: totals.tax,
        discount: totals.discount,
        total: totals.total,
        amount_due: totals.amount_due,
        payment_status: appointment.payment_status,
        updated_at: Utc::now(),
    };

    store.apply_recompute(&billing_id, patch).await.map(Some)
}

/// Remove the invoice paired to a deleted appointment.
pub async fn delete_for_appointment<S: BillingStore + ?Sized>(
    store: &S,
    appointment: &Thing,
) -> AppResult<()> {
    store.delete_by_appointment(appointment).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::AppointmentStatus;
    use std::sync::Mutex;

    struct MemoryStore {
        records: Mutex<Vec<SpaBilling>>,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl BillingStore for MemoryStore {
        async fn find_by_appointment(&self, appointment: &Thing) -> AppResult<Option<SpaBilling>> {
            let records = self.records.lock().unwrap();
            Ok(records
                .iter()
                .find(|b| &b.appointment == appointment)
                .cloned())
        }

        async fn insert(&self, mut billing: SpaBilling) -> AppResult<SpaBilling> {
            billing.id = Some(Thing::from(("spa_billing", "b1")));
            self.records.lock().unwrap().push(billing.clone());
            Ok(billing)
        }

        async fn apply_recompute(
            &self,
            id: &Thing,
            patch: BillingRecompute,
        ) -> AppResult<SpaBilling> {
            let mut records = self.records.lock().unwrap();
            let billing = records
                .iter_mut()
                .find(|b| b.id.as_ref() == Some(id))
                .ok_or_else(|| AppError::NotFound("billing not found".to_string()))?;
            billing.items = patch.items;
            billing.subtotal = patch.subtotal;
            billing.tax = patch.tax;
            billing.discount = patch.discount;
            billing.total = patch.total;
            billing.amount_due = patch.amount_due;
            billing.payment_status = patch.payment_status;
            billing.updated_at = patch.updated_at;
            Ok(billing.clone())
        }

        async fn delete_by_appointment(&self, appointment: &Thing) -> AppResult<()> {
            self.records
                .lock()
                .unwrap()
                .retain(|b| &b.appointment != appointment);
            Ok(())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl BillingStore for FailingStore {
        async fn find_by_appointment(&self, _: &Thing) -> AppResult<Option<SpaBilling>> {
            Err(AppError::Database("store offline".to_string()))
        }

        async fn insert(&self, _: SpaBilling) -> AppResult<SpaBilling> {
            Err(AppError::Database("store offline".to_string()))
        }

        async fn apply_recompute(&self, _: &Thing, _: BillingRecompute) -> AppResult<SpaBilling> {
            Err(AppError::Database("store offline".to_string()))
        }

        async fn delete_by_appointment(&self, _: &Thing) -> AppResult<()> {
            Err(AppError::Database("store offline".to_string()))
        }
    }

    fn sample_appointment() -> SpaAppointment {
        let now = Utc::now();
        SpaAppointment {
            id: Some(Thing::from(("spa_appointment", "a1"))),
            appointment_id: "APT-1-test".to_string(),
            guest_id: Thing::from(("guest", "g1")),
            guest_name: "Ana Silva".to_string(),
            guest_phone: None,
            guest_email: None,
            room_number: Some("204".to_string()),
            service: Thing::from(("spa_service", "s1")),
            service_name: Some("Hot Stone Massage".to_string()),
            therapist: None,
            therapist_name: None,
            spa_room: None,
            spa_room_number: None,
            package: None,
            package_name: None,
            appointment_date: now,
            start_time: "10:00".to_string(),
            end_time: "11:00".to_string(),
            duration: 60,
            status: AppointmentStatus::Confirmed,
            service_price: 100.0,
            therapist_price: 50.0,
            room_price: 30.0,
            discount: 20.0,
            total_price: 160.0,
            payment_status: PaymentStatus::Pending,
            notes: None,
            special_requests: None,
            health_notes: None,
            allergies: vec![],
            preferences: vec![],
            reminder_sent: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_builds_full_invoice() {
        let store = MemoryStore::new();
        let appt = sample_appointment();

        let billing = create_for_appointment(&store, &appt).await.unwrap();

        assert!(billing.billing_id.starts_with("BIL-"));
        assert_eq!(billing.subtotal, 180.0);
        assert_eq!(billing.tax, 18.0);
        assert_eq!(billing.total, 178.0);
        assert_eq!(billing.amount_paid, 0.0);
        assert_eq!(billing.amount_due, 178.0);
        assert_eq!(billing.items.len(), 3);
        assert_eq!(billing.payment_status, PaymentStatus::Pending);
        assert!(billing.due_date.unwrap() > billing.created_at);
    }

    #[tokio::test]
    async fn create_copies_payment_status_from_appointment() {
        let store = MemoryStore::new();
        let mut appt = sample_appointment();
        appt.payment_status = PaymentStatus::Paid;

        let billing = create_for_appointment(&store, &appt).await.unwrap();
        assert_eq!(billing.payment_status, PaymentStatus::Paid);
        // A payment status copy never implies a payment was recorded
        assert_eq!(billing.amount_paid, 0.0);
    }

    #[tokio::test]
    async fn regenerate_preserves_amount_paid() {
        let store = MemoryStore::new();
        let mut appt = sample_appointment();
        create_for_appointment(&store, &appt).await.unwrap();

        // Record a partial payment, then reprice the appointment
        {
            let mut records = store.records.lock().unwrap();
            records[0].amount_paid = 100.0;
        }
        appt.service_price = 200.0;

        let billing = regenerate_for_appointment(&store, &appt)
            .await
            .unwrap()
            .expect("billing should exist");

        // 200 + 50 + 30 = 280, tax 28, -20 discount = 288
        assert_eq!(billing.subtotal, 280.0);
        assert_eq!(billing.total, 288.0);
        assert_eq!(billing.amount_paid, 100.0);
        assert_eq!(billing.amount_due, 188.0);
    }

    #[tokio::test]
    async fn regenerate_tracks_appointment_payment_status() {
        let store = MemoryStore::new();
        let mut appt = sample_appointment();
        create_for_appointment(&store, &appt).await.unwrap();

        appt.payment_status = PaymentStatus::Partial;
        let billing = regenerate_for_appointment(&store, &appt)
            .await
            .unwrap()
            .expect("billing should exist");

        assert_eq!(billing.payment_status, PaymentStatus::Partial);
    }

    #[tokio::test]
    async fn regenerate_without_invoice_is_a_noop() {
        let store = MemoryStore::new();
        let appt = sample_appointment();

        let result = regenerate_for_appointment(&store, &appt).await.unwrap();
        assert!(result.is_none());
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_failures_propagate_to_caller() {
        let appt = sample_appointment();

        assert!(create_for_appointment(&FailingStore, &appt).await.is_err());
        assert!(
            regenerate_for_appointment(&FailingStore, &appt)
                .await
                .is_err()
        );
        assert!(
            delete_for_appointment(&FailingStore, &Thing::from(("spa_appointment", "a1")))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn delete_removes_paired_invoice() {
        let appt = sample_appointment();
        let store = MemoryStore::new();
        create_for_appointment(&store, &appt).await.unwrap();

        let link = appt.id.clone().unwrap();
        delete_for_appointment(&store, &link).await.unwrap();
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn appointment_without_id_is_rejected() {
        let store = MemoryStore::new();
        let mut appt = sample_appointment();
        appt.id = None;

        assert!(create_for_appointment(&store, &appt).await.is_err());
    }
}
