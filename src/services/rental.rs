use chrono::{NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::rental_booking::{
    self, BookingStatus, DriveOption, PaymentMethod, RentalType,
};
use crate::entities::transaction::{self, TransactionStatus};
use crate::entities::{rental_vehicle, user};
use crate::error::{AppError, AppResult};
use crate::services::notify::Notifier;
use crate::utils::pricing;

pub fn status_name(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::NotPaid => "not_paid",
        BookingStatus::Pending => "pending",
        BookingStatus::Active => "active",
        BookingStatus::Late => "late",
        BookingStatus::Completed => "completed",
        BookingStatus::CompletedLate => "completed_late",
        BookingStatus::Cancelled => "cancelled",
    }
}

/// Operator-driven lifecycle. Cancellation is not part of this table; it goes
/// through `cancel`, which owns the transaction and notification side effects.
pub fn transition_allowed(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;
    matches!(
        (from, to),
        (NotPaid, Pending) | (Pending, Active) | (Active, Late) | (Active, Completed) | (Late, CompletedLate)
    )
}

pub fn cancellable(status: BookingStatus) -> bool {
    !matches!(
        status,
        BookingStatus::Completed | BookingStatus::CompletedLate | BookingStatus::Cancelled
    )
}

pub fn rate_per_unit(vehicle: &rental_vehicle::Model, rental_type: RentalType) -> i64 {
    match rental_type {
        RentalType::Hour => vehicle.rate_per_hour,
        RentalType::Day => vehicle.rate_per_day,
        RentalType::Week => vehicle.rate_per_week,
        RentalType::Month => vehicle.rate_per_month,
    }
}

pub struct CreateBooking {
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub pickup_location: String,
    pub pickup_date: NaiveDate,
    pub pickup_time: NaiveTime,
    pub return_location: String,
    pub return_date: NaiveDate,
    pub return_time: NaiveTime,
    pub rental_type: RentalType,
    pub drive_option: DriveOption,
    pub payment_method: PaymentMethod,
}

/// Create a booking with the price fixed at submission time. Pay-at-pickup
/// bookings start pending and get their settlement transaction row; prepaid
/// bookings start not_paid until the payment gateway confirms.
pub async fn create(
    db: &DatabaseConnection,
    input: CreateBooking,
) -> AppResult<rental_booking::Model> {
    let renter = user::Entity::find_by_id(input.user_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let vehicle = rental_vehicle::Entity::find_by_id(input.vehicle_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Rental vehicle not found".to_string()))?;

    if !vehicle.available {
        return Err(AppError::BadRequest(
            "Vehicle is not available for rent".to_string(),
        ));
    }

    let pickup = input.pickup_date.and_time(input.pickup_time);
    let ret = input.return_date.and_time(input.return_time);

    let units = pricing::duration_units(pickup, ret, input.rental_type);
    let rate = rate_per_unit(&vehicle, input.rental_type);
    let total = pricing::total_amount(rate, units, input.rental_type, input.drive_option);

    let status = match input.payment_method {
        PaymentMethod::PayAtPickup => BookingStatus::Pending,
        PaymentMethod::Prepaid => BookingStatus::NotPaid,
    };

    let new_booking = rental_booking::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(renter.id),
        vehicle_id: Set(vehicle.id),
        pickup_location: Set(input.pickup_location),
        pickup_date: Set(input.pickup_date),
        pickup_time: Set(input.pickup_time),
        return_location: Set(input.return_location),
        return_date: Set(input.return_date),
        return_time: Set(input.return_time),
        rental_type: Set(input.rental_type),
        drive_option: Set(input.drive_option),
        payment_method: Set(input.payment_method),
        total_amount: Set(total),
        status: Set(status),
        version: Set(0),
        ..Default::default()
    };

    let booking = new_booking.insert(db).await?;

    if booking.payment_method == PaymentMethod::PayAtPickup {
        let tx = transaction::ActiveModel {
            id: Set(Uuid::new_v4()),
            booking_id: Set(booking.id),
            status: Set(TransactionStatus::NotApplicable),
            ..Default::default()
        };
        tx.insert(db).await?;
    }

    Ok(booking)
}

/// Pending, active and late bookings for the operator dashboard.
pub async fn list_active(db: &DatabaseConnection) -> AppResult<Vec<rental_booking::Model>> {
    Ok(rental_booking::Entity::find()
        .filter(rental_booking::Column::Status.is_in([
            BookingStatus::Pending,
            BookingStatus::Active,
            BookingStatus::Late,
        ]))
        .order_by_desc(rental_booking::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Finished bookings: cancelled or completed (on time or late).
pub async fn list_history(db: &DatabaseConnection) -> AppResult<Vec<rental_booking::Model>> {
    Ok(rental_booking::Entity::find()
        .filter(rental_booking::Column::Status.is_in([
            BookingStatus::Cancelled,
            BookingStatus::Completed,
            BookingStatus::CompletedLate,
        ]))
        .order_by_desc(rental_booking::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Cancel a booking. Terminal bookings reject. For pay-at-pickup bookings the
/// settlement transaction is cancelled along with it, then the party that did
/// not initiate the cancellation is notified.
pub async fn cancel(
    db: &DatabaseConnection,
    notifier: &Notifier,
    admin_email: &str,
    booking_id: Uuid,
    reason: Option<String>,
    admin_acting: bool,
) -> AppResult<rental_booking::Model> {
    let booking = rental_booking::Entity::find_by_id(booking_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if !cancellable(booking.status) {
        return Err(AppError::InvalidTransition {
            from: status_name(booking.status).to_string(),
            to: status_name(BookingStatus::Cancelled).to_string(),
        });
    }

    let updated = write_status(db, &booking, BookingStatus::Cancelled).await?;

    sync_transaction(db, &updated, TransactionStatus::Cancelled).await?;

    notify_cancellation(db, notifier, admin_email, &updated, reason, admin_acting).await;

    Ok(updated)
}

/// Operator/system status advance, checked against the transition table.
/// Completing a pay-at-pickup booking marks its transaction paid.
pub async fn update_status(
    db: &DatabaseConnection,
    booking_id: Uuid,
    new_status: BookingStatus,
) -> AppResult<rental_booking::Model> {
    let booking = rental_booking::Entity::find_by_id(booking_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if new_status == BookingStatus::Cancelled {
        return Err(AppError::BadRequest(
            "Cancellation must go through the cancel operation".to_string(),
        ));
    }

    if !transition_allowed(booking.status, new_status) {
        return Err(AppError::InvalidTransition {
            from: status_name(booking.status).to_string(),
            to: status_name(new_status).to_string(),
        });
    }

    let updated = write_status(db, &booking, new_status).await?;

    if matches!(
        updated.status,
        BookingStatus::Completed | BookingStatus::CompletedLate
    ) {
        sync_transaction(db, &updated, TransactionStatus::Paid).await?;
    }

    Ok(updated)
}

/// Conditional write on the version read, so concurrent writers can't lose
/// updates silently.
async fn write_status(
    db: &DatabaseConnection,
    booking: &rental_booking::Model,
    new_status: BookingStatus,
) -> AppResult<rental_booking::Model> {
    let update = rental_booking::ActiveModel {
        status: Set(new_status),
        version: Set(booking.version + 1),
        ..Default::default()
    };

    let result = rental_booking::Entity::update_many()
        .set(update)
        .filter(rental_booking::Column::Id.eq(booking.id))
        .filter(rental_booking::Column::Version.eq(booking.version))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::Conflict(
            "Booking was modified concurrently, retry".to_string(),
        ));
    }

    rental_booking::Entity::find_by_id(booking.id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
}

/// Keep the settlement transaction in step with the booking. Only
/// pay-at-pickup bookings carry one; prepaid bookings are a no-op.
async fn sync_transaction(
    db: &DatabaseConnection,
    booking: &rental_booking::Model,
    status: TransactionStatus,
) -> AppResult<()> {
    if booking.payment_method != PaymentMethod::PayAtPickup {
        return Ok(());
    }

    let tx = transaction::Entity::find()
        .filter(transaction::Column::BookingId.eq(booking.id))
        .one(db)
        .await?;

    if let Some(tx) = tx {
        let mut active: transaction::ActiveModel = tx.into();
        active.status = Set(status);
        active.update(db).await?;
    }

    Ok(())
}

/// The audience is whichever party did not initiate the cancellation: an
/// admin cancellation mails the renter, a renter cancellation mails the
/// operator inbox.
async fn notify_cancellation(
    db: &DatabaseConnection,
    notifier: &Notifier,
    admin_email: &str,
    booking: &rental_booking::Model,
    reason: Option<String>,
    admin_acting: bool,
) {
    let vehicle_desc = match rental_vehicle::Entity::find_by_id(booking.vehicle_id)
        .one(db)
        .await
    {
        Ok(Some(v)) => format!("{} {} {}", v.year, v.make, v.model),
        _ => "the vehicle".to_string(),
    };

    let reason_line = reason
        .map(|r| format!("\n\nReason: {}", r))
        .unwrap_or_default();

    if admin_acting {
        let renter = match user::Entity::find_by_id(booking.user_id).one(db).await {
            Ok(Some(u)) => u,
            Ok(None) => {
                tracing::warn!(booking_id = %booking.id, "Booking renter no longer exists");
                return;
            }
            Err(e) => {
                tracing::warn!(booking_id = %booking.id, error = %e, "Failed to load booking renter");
                return;
            }
        };

        notifier.dispatch(
            renter.email,
            "Rental booking cancelled".to_string(),
            format!(
                "Your rental booking for {} (pickup {} at {}) has been cancelled by the operator.{}",
                vehicle_desc, booking.pickup_date, booking.pickup_time, reason_line
            ),
        );
    } else {
        notifier.dispatch(
            admin_email.to_string(),
            "Rental booking cancelled by customer".to_string(),
            format!(
                "Booking {} for {} (pickup {} at {}) was cancelled by the customer.{}",
                booking.id, vehicle_desc, booking.pickup_date, booking.pickup_time, reason_line
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use BookingStatus::*;

        assert!(transition_allowed(NotPaid, Pending));
        assert!(transition_allowed(Pending, Active));
        assert!(transition_allowed(Active, Late));
        assert!(transition_allowed(Active, Completed));
        assert!(transition_allowed(Late, CompletedLate));

        // no skipping ahead or moving backwards
        assert!(!transition_allowed(NotPaid, Active));
        assert!(!transition_allowed(Pending, Completed));
        assert!(!transition_allowed(Active, CompletedLate));
        assert!(!transition_allowed(Late, Completed));
        assert!(!transition_allowed(Active, Pending));

        // terminal states stay terminal
        for to in [NotPaid, Pending, Active, Late, Completed, CompletedLate] {
            assert!(!transition_allowed(Completed, to));
            assert!(!transition_allowed(CompletedLate, to));
            assert!(!transition_allowed(Cancelled, to));
        }
    }

    #[test]
    fn test_cancellable_set() {
        use BookingStatus::*;

        for status in [NotPaid, Pending, Active, Late] {
            assert!(cancellable(status));
        }
        for status in [Completed, CompletedLate, Cancelled] {
            assert!(!cancellable(status));
        }
    }
}
