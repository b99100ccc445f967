use chrono::{NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::appointment::{self, AppointmentStatus};
use crate::entities::{user, vehicle};
use crate::error::{AppError, AppResult};
use crate::services::notify::Notifier;

/// Role a caller claims when acting on an appointment. Determines the
/// notification recipient; authorization is checked separately against the
/// appointment's parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActingRole {
    Buyer,
    Seller,
}

impl ActingRole {
    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw {
            "buyer" => Ok(ActingRole::Buyer),
            "seller" => Ok(ActingRole::Seller),
            other => Err(AppError::InvalidRole(other.to_string())),
        }
    }
}

pub fn status_name(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Pending => "pending",
        AppointmentStatus::Confirmed => "confirmed",
        AppointmentStatus::Cancelled => "cancelled",
        AppointmentStatus::Completed => "completed",
    }
}

/// Transition table for the appointment lifecycle. Cancelled and completed
/// are terminal.
pub fn transition_allowed(from: AppointmentStatus, to: AppointmentStatus) -> bool {
    use AppointmentStatus::*;
    matches!(
        (from, to),
        (Pending, Confirmed)
            | (Pending, Cancelled)
            | (Pending, Completed)
            | (Confirmed, Cancelled)
            | (Confirmed, Completed)
    )
}

/// The party notified about a transition is the counterparty of whoever acted.
pub fn notification_recipient(
    acting_role: ActingRole,
    buyer_user_id: Uuid,
    seller_user_id: Uuid,
) -> Uuid {
    match acting_role {
        ActingRole::Buyer => seller_user_id,
        ActingRole::Seller => buyer_user_id,
    }
}

pub struct CreateAppointment {
    pub buyer_user_id: Uuid,
    pub vehicle_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub description: Option<String>,
}

/// Create a viewing appointment. The vehicle's current owner is captured as
/// the seller; later ownership changes do not touch existing appointments.
pub async fn create(
    db: &DatabaseConnection,
    input: CreateAppointment,
) -> AppResult<appointment::Model> {
    let buyer = user::Entity::find_by_id(input.buyer_user_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Buyer not found".to_string()))?;

    let vehicle = vehicle::Entity::find_by_id(input.vehicle_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    let new_appointment = appointment::ActiveModel {
        id: Set(Uuid::new_v4()),
        buyer_user_id: Set(buyer.id),
        vehicle_id: Set(vehicle.id),
        seller_user_id: Set(vehicle.owner_id),
        date: Set(input.date),
        time: Set(input.time),
        location: Set(input.location),
        description: Set(input.description),
        status: Set(AppointmentStatus::Pending),
        version: Set(0),
        ..Default::default()
    };

    Ok(new_appointment.insert(db).await?)
}

#[derive(Debug, Serialize)]
pub struct UserAppointments {
    pub as_buyer: Vec<appointment::Model>,
    pub as_seller: Vec<appointment::Model>,
}

/// All appointments a user is a party to, split by side, newest first.
/// A self-appointment (buyer bought from themselves) shows up in both lists.
pub async fn list_by_user(db: &DatabaseConnection, user_id: Uuid) -> AppResult<UserAppointments> {
    let as_buyer = appointment::Entity::find()
        .filter(appointment::Column::BuyerUserId.eq(user_id))
        .order_by_desc(appointment::Column::CreatedAt)
        .all(db)
        .await?;

    let as_seller = appointment::Entity::find()
        .filter(appointment::Column::SellerUserId.eq(user_id))
        .order_by_desc(appointment::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(UserAppointments {
        as_buyer,
        as_seller,
    })
}

pub async fn list_all(db: &DatabaseConnection) -> AppResult<Vec<appointment::Model>> {
    Ok(appointment::Entity::find()
        .order_by_desc(appointment::Column::CreatedAt)
        .all(db)
        .await?)
}

pub struct TransitionRequest {
    pub appointment_id: Uuid,
    pub new_status: AppointmentStatus,
    pub acting_role: ActingRole,
    pub actor_user_id: Uuid,
    pub actor_is_admin: bool,
    pub reason: Option<String>,
}

/// Move an appointment through its lifecycle. The write is conditional on the
/// version read, so two concurrent transitions cannot overwrite each other;
/// the loser gets a conflict. Notifications go out after the write commits
/// and never affect the outcome.
pub async fn transition(
    db: &DatabaseConnection,
    notifier: &Notifier,
    req: TransitionRequest,
) -> AppResult<appointment::Model> {
    let appt = appointment::Entity::find_by_id(req.appointment_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

    if !req.actor_is_admin {
        let expected = match req.acting_role {
            ActingRole::Buyer => appt.buyer_user_id,
            ActingRole::Seller => appt.seller_user_id,
        };
        if req.actor_user_id != expected {
            return Err(AppError::Forbidden(
                "You are not a party to this appointment".to_string(),
            ));
        }
    }

    if !transition_allowed(appt.status, req.new_status) {
        return Err(AppError::InvalidTransition {
            from: status_name(appt.status).to_string(),
            to: status_name(req.new_status).to_string(),
        });
    }

    let update = appointment::ActiveModel {
        status: Set(req.new_status),
        version: Set(appt.version + 1),
        ..Default::default()
    };

    let result = appointment::Entity::update_many()
        .set(update)
        .filter(appointment::Column::Id.eq(appt.id))
        .filter(appointment::Column::Version.eq(appt.version))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::Conflict(
            "Appointment was modified concurrently, retry".to_string(),
        ));
    }

    let updated = appointment::Entity::find_by_id(appt.id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

    match req.new_status {
        AppointmentStatus::Confirmed => {
            notify_counterparty(db, notifier, &updated, req.acting_role, None).await;
        }
        AppointmentStatus::Cancelled => {
            notify_counterparty(db, notifier, &updated, req.acting_role, req.reason).await;
        }
        _ => {}
    }

    Ok(updated)
}

/// Mail the side that did not act. Lookup failures are logged and swallowed;
/// the transition is already durable.
async fn notify_counterparty(
    db: &DatabaseConnection,
    notifier: &Notifier,
    appt: &appointment::Model,
    acting_role: ActingRole,
    reason: Option<String>,
) {
    let recipient_id =
        notification_recipient(acting_role, appt.buyer_user_id, appt.seller_user_id);

    let recipient = match user::Entity::find_by_id(recipient_id).one(db).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            tracing::warn!(appointment_id = %appt.id, "Notification recipient no longer exists");
            return;
        }
        Err(e) => {
            tracing::warn!(appointment_id = %appt.id, error = %e, "Failed to load notification recipient");
            return;
        }
    };

    let vehicle_desc = match vehicle::Entity::find_by_id(appt.vehicle_id).one(db).await {
        Ok(Some(v)) => format!("{} {} {}", v.year, v.make, v.model),
        _ => "the vehicle".to_string(),
    };

    let (subject, mut body) = match appt.status {
        AppointmentStatus::Cancelled => (
            "Viewing appointment cancelled".to_string(),
            format!(
                "The viewing appointment for {} on {} at {} ({}) has been cancelled.",
                vehicle_desc, appt.date, appt.time, appt.location
            ),
        ),
        _ => (
            "Viewing appointment confirmed".to_string(),
            format!(
                "The viewing appointment for {} on {} at {} ({}) has been confirmed.",
                vehicle_desc, appt.date, appt.time, appt.location
            ),
        ),
    };

    if let Some(reason) = reason {
        body.push_str(&format!("\n\nReason: {}", reason));
    }

    notifier.dispatch(recipient.email, subject, body);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acting_role_parse() {
        assert_eq!(ActingRole::parse("buyer").unwrap(), ActingRole::Buyer);
        assert_eq!(ActingRole::parse("seller").unwrap(), ActingRole::Seller);
        assert!(matches!(
            ActingRole::parse("admin"),
            Err(AppError::InvalidRole(_))
        ));
        assert!(matches!(
            ActingRole::parse(""),
            Err(AppError::InvalidRole(_))
        ));
    }

    #[test]
    fn test_transition_table() {
        use AppointmentStatus::*;

        assert!(transition_allowed(Pending, Confirmed));
        assert!(transition_allowed(Pending, Cancelled));
        assert!(transition_allowed(Pending, Completed));
        assert!(transition_allowed(Confirmed, Cancelled));
        assert!(transition_allowed(Confirmed, Completed));

        // terminal states stay terminal
        for to in [Pending, Confirmed, Cancelled, Completed] {
            assert!(!transition_allowed(Cancelled, to));
            assert!(!transition_allowed(Completed, to));
        }
        assert!(!transition_allowed(Confirmed, Pending));
        assert!(!transition_allowed(Pending, Pending));
    }

    #[test]
    fn test_recipient_is_counterparty() {
        let buyer = Uuid::new_v4();
        let seller = Uuid::new_v4();

        assert_eq!(notification_recipient(ActingRole::Buyer, buyer, seller), seller);
        assert_eq!(notification_recipient(ActingRole::Seller, buyer, seller), buyer);
    }
}
