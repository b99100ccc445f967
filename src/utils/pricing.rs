use chrono::NaiveDateTime;

use crate::entities::rental_booking::{DriveOption, RentalType};

/// Per-unit surcharge when the renter hires a driver.
const DRIVER_RATE_HOUR: i64 = 300;
const DRIVER_RATE_DAY: i64 = 2000;
const DRIVER_RATE_WEEK: i64 = 10_000;
const DRIVER_RATE_MONTH: i64 = 35_000;

/// Billing months are fixed at 30 days.
const SECONDS_PER_MONTH: i64 = 30 * 24 * 3600;

fn unit_seconds(rental_type: RentalType) -> i64 {
    match rental_type {
        RentalType::Hour => 3600,
        RentalType::Day => 24 * 3600,
        RentalType::Week => 7 * 24 * 3600,
        RentalType::Month => SECONDS_PER_MONTH,
    }
}

pub fn driver_surcharge_rate(rental_type: RentalType) -> i64 {
    match rental_type {
        RentalType::Hour => DRIVER_RATE_HOUR,
        RentalType::Day => DRIVER_RATE_DAY,
        RentalType::Week => DRIVER_RATE_WEEK,
        RentalType::Month => DRIVER_RATE_MONTH,
    }
}

/// Number of billable units between pickup and return: elapsed time rounded
/// up to whole units, never less than 1. An exact multiple stays exact
/// (4h at hourly billing is 4 units, not 5).
pub fn duration_units(pickup: NaiveDateTime, ret: NaiveDateTime, rental_type: RentalType) -> i64 {
    let elapsed = (ret - pickup).num_seconds();
    if elapsed <= 0 {
        return 1;
    }

    let unit = unit_seconds(rental_type);
    let units = (elapsed + unit - 1) / unit;
    units.max(1)
}

/// Total booking price: per-unit rate times units, plus the driver surcharge
/// for the same unit count when a driver is hired.
pub fn total_amount(
    rate_per_unit: i64,
    units: i64,
    rental_type: RentalType,
    drive_option: DriveOption,
) -> i64 {
    let base = rate_per_unit * units;
    match drive_option {
        DriveOption::SelfDrive => base,
        DriveOption::HiredDriver => base + driver_surcharge_rate(rental_type) * units,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_exact_hours_do_not_round_up() {
        let pickup = at(2024, 1, 1, 10, 0);
        let ret = at(2024, 1, 1, 14, 0);
        assert_eq!(duration_units(pickup, ret, RentalType::Hour), 4);
    }

    #[test]
    fn test_fractional_hour_rounds_up() {
        let pickup = at(2024, 1, 1, 10, 0);
        let ret = at(2024, 1, 1, 10, 1);
        assert_eq!(duration_units(pickup, ret, RentalType::Hour), 1);

        let ret = at(2024, 1, 1, 14, 1);
        assert_eq!(duration_units(pickup, ret, RentalType::Hour), 5);
    }

    #[test]
    fn test_identical_instants_bill_one_unit() {
        let t = at(2024, 1, 1, 10, 0);
        assert_eq!(duration_units(t, t, RentalType::Hour), 1);
        assert_eq!(duration_units(t, t, RentalType::Month), 1);
    }

    #[test]
    fn test_return_before_pickup_floors_to_one() {
        let pickup = at(2024, 1, 2, 10, 0);
        let ret = at(2024, 1, 1, 10, 0);
        assert_eq!(duration_units(pickup, ret, RentalType::Day), 1);
    }

    #[test]
    fn test_day_units() {
        let pickup = at(2024, 1, 1, 10, 0);
        let ret = at(2024, 1, 4, 10, 0);
        assert_eq!(duration_units(pickup, ret, RentalType::Day), 3);

        let ret = at(2024, 1, 4, 10, 30);
        assert_eq!(duration_units(pickup, ret, RentalType::Day), 4);
    }

    #[test]
    fn test_self_drive_total() {
        assert_eq!(
            total_amount(1000, 3, RentalType::Day, DriveOption::SelfDrive),
            3000
        );
    }

    #[test]
    fn test_hired_driver_total() {
        // 1000/day for 3 days plus the 2000/day driver surcharge
        assert_eq!(
            total_amount(1000, 3, RentalType::Day, DriveOption::HiredDriver),
            9000
        );
    }
}
