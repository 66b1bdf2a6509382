//! Invoice pricing
//!
//! Derives line items and totals from an appointment's price snapshots.
//!
//! The subtotal always sums all three price components, while line items
//! only list the strictly-positive ones. The two are intentionally not
//! reconciled: a zero-priced component contributes nothing either way, and a
//! negative snapshot still lowers the subtotal without producing a line.

use super::money::{TAX_RATE, round2, to_decimal, to_f64};
use crate::db::models::{BillingItem, SpaAppointment};
use rust_decimal::Decimal;

/// Computed monetary fields of an invoice
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub discount: f64,
    pub total: f64,
    pub amount_due: f64,
}

/// Build invoice lines from the appointment's price snapshots.
/// Only strictly-positive components produce a line.
pub fn build_line_items(appointment: &SpaAppointment) -> Vec<BillingItem> {
    let mut items = Vec::new();

    if appointment.service_price > 0.0 {
        items.push(BillingItem {
            description: appointment
                .service_name
                .clone()
                .unwrap_or_else(|| "Spa Service".to_string()),
            quantity: 1,
            unit_price: appointment.service_price,
            subtotal: appointment.service_price,
        });
    }

    if appointment.therapist_price > 0.0 {
        items.push(BillingItem {
            description: format!(
                "Therapist: {}",
                appointment
                    .therapist_name
                    .as_deref()
                    .unwrap_or("Professional")
            ),
            quantity: 1,
            unit_price: appointment.therapist_price,
            subtotal: appointment.therapist_price,
        });
    }

    if appointment.room_price > 0.0 {
        items.push(BillingItem {
            description: format!(
                "Spa Room: {}",
                appointment.spa_room_number.as_deref().unwrap_or("Spa Room")
            ),
            quantity: 1,
            unit_price: appointment.room_price,
            subtotal: appointment.room_price,
        });
    }

    items
}

/// Sum of all three price components, positive or not
pub fn aggregate_subtotal(appointment: &SpaAppointment) -> Decimal {
    to_decimal(appointment.service_price)
        + to_decimal(appointment.therapist_price)
        + to_decimal(appointment.room_price)
}

/// Compute invoice totals for an appointment.
///
/// total = subtotal + tax - discount, with no lower bound: a discount larger
/// than the taxed subtotal yields a negative total and a negative balance.
pub fn compute_totals(appointment: &SpaAppointment, amount_paid: f64) -> InvoiceTotals {
    let subtotal = aggregate_subtotal(appointment);
    let tax = round2(subtotal * TAX_RATE);
    let discount = to_decimal(appointment.discount);
    let total = subtotal + tax - discount;
    let amount_due = total - to_decimal(amount_paid);

    InvoiceTotals {
        subtotal: to_f64(subtotal),
        tax: to_f64(tax),
        discount: to_f64(discount),
        total: to_f64(total),
        amount_due: to_f64(amount_due),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{AppointmentStatus, PaymentStatus};
    use chrono::Utc;
    use surrealdb::sql::Thing;

    fn appointment(service: f64, therapist: f64, room: f64, discount: f64) -> SpaAppointment {
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
            service_name: Some("Deep Tissue Massage".to_string()),
            therapist: None,
            therapist_name: Some("Marta".to_string()),
            spa_room: None,
            spa_room_number: Some("SPA-2".to_string()),
            package: None,
            package_name: None,
            appointment_date: now,
            start_time: "10:00".to_string(),
            end_time: "11:00".to_string(),
            duration: 60,
            status: AppointmentStatus::Pending,
            service_price: service,
            therapist_price: therapist,
            room_price: room,
            discount,
            total_price: service + therapist + room - discount,
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

    #[test]
    fn totals_for_fully_priced_appointment() {
        let appt = appointment(100.0, 50.0, 30.0, 20.0);
        let totals = compute_totals(&appt, 0.0);

        assert_eq!(totals.subtotal, 180.0);
        assert_eq!(totals.tax, 18.0);
        assert_eq!(totals.discount, 20.0);
        assert_eq!(totals.total, 178.0);
        assert_eq!(totals.amount_due, 178.0);
    }

    #[test]
    fn zero_room_price_drops_its_line_only() {
        let appt = appointment(100.0, 50.0, 0.0, 0.0);
        let items = build_line_items(&appt);
        let totals = compute_totals(&appt, 0.0);

        assert_eq!(items.len(), 2);
        assert_eq!(totals.subtotal, 150.0);
        assert_eq!(totals.tax, 15.0);
        assert_eq!(totals.total, 165.0);
        assert_eq!(totals.amount_due, 165.0);
    }

    #[test]
    fn line_items_skip_non_positive_components() {
        let appt = appointment(80.0, 0.0, -5.0, 0.0);
        let items = build_line_items(&appt);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Deep Tissue Massage");
        assert_eq!(items[0].unit_price, 80.0);

        // The skipped components still flow into the subtotal
        let totals = compute_totals(&appt, 0.0);
        assert_eq!(totals.subtotal, 75.0);
    }

    #[test]
    fn missing_names_fall_back_to_generic_labels() {
        let mut appt = appointment(100.0, 50.0, 30.0, 0.0);
        appt.service_name = None;
        appt.therapist_name = None;
        appt.spa_room_number = None;

        let items = build_line_items(&appt);
        assert_eq!(items[0].description, "Spa Service");
        assert_eq!(items[1].description, "Therapist: Professional");
        assert_eq!(items[2].description, "Spa Room: Spa Room");
    }

    #[test]
    fn oversized_discount_goes_negative() {
        let appt = appointment(50.0, 0.0, 0.0, 100.0);
        let totals = compute_totals(&appt, 0.0);

        // 50 + 5 - 100
        assert_eq!(totals.total, -45.0);
        assert_eq!(totals.amount_due, -45.0);
    }

    #[test]
    fn amount_paid_reduces_balance() {
        let appt = appointment(100.0, 0.0, 0.0, 0.0);
        let totals = compute_totals(&appt, 60.0);

        assert_eq!(totals.total, 110.0);
        assert_eq!(totals.amount_due, 50.0);
    }

    #[test]
    fn tax_rounds_half_away_from_zero() {
        // subtotal 0.05 -> raw tax 0.005 -> rounds to 0.01
        let appt = appointment(0.05, 0.0, 0.0, 0.0);
        let totals = compute_totals(&appt, 0.0);

        assert_eq!(totals.tax, 0.01);
        assert_eq!(totals.total, 0.06);
    }

    #[test]
    fn all_items_present_when_all_positive() {
        let appt = appointment(100.0, 50.0, 30.0, 0.0);
        let items = build_line_items(&appt);

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].description, "Deep Tissue Massage");
        assert_eq!(items[1].description, "Therapist: Marta");
        assert_eq!(items[2].description, "Spa Room: SPA-2");
        assert!(items.iter().all(|i| i.quantity == 1));
        assert!(items.iter().all(|i| i.unit_price == i.subtotal));
    }
}
