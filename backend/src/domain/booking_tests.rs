//! Tests for the booking lifecycle state machine.

use chrono::TimeZone;
use rstest::rstest;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::*;
use crate::domain::money::CurrencyCode;

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).single().expect("valid date")
}

fn draft() -> BookingDraft {
    BookingDraft {
        id: Uuid::new_v4(),
        client_id: UserId::random(),
        property_id: Uuid::new_v4(),
        guest_name: "Ada Lovelace".to_owned(),
        phone_number: "+44 20 7946 0000".to_owned(),
        range: DateRange::new(day(1), day(5)).expect("valid range"),
        total_price: Money::try_new(dec!(240), CurrencyCode::try_new("EUR").expect("valid code"))
            .expect("non-negative amount"),
        reserved_at: day(1),
    }
}

fn booking_in(status: BookingStatus) -> Booking {
    let mut booking = Booking::new(draft()).expect("valid draft");
    let now = day(1);
    match status {
        BookingStatus::Pending => {}
        BookingStatus::Confirmed => {
            booking.transition_to(BookingStatus::Confirmed, now).expect("legal");
        }
        BookingStatus::Rejected => {
            booking.transition_to(BookingStatus::Rejected, now).expect("legal");
        }
        BookingStatus::Cancelled => {
            booking.transition_to(BookingStatus::Cancelled, now).expect("legal");
        }
        BookingStatus::Completed => {
            booking.transition_to(BookingStatus::Confirmed, now).expect("legal");
            booking.transition_to(BookingStatus::Completed, now).expect("legal");
        }
    }
    booking
}

#[test]
fn new_bookings_start_pending_without_update_timestamp() {
    let booking = Booking::new(draft()).expect("valid draft");
    assert_eq!(booking.status(), BookingStatus::Pending);
    assert!(booking.updated_at().is_none());
}

#[rstest]
#[case("", "+44 20 7946 0000", BookingValidationError::EmptyGuestName)]
#[case("  ", "+44 20 7946 0000", BookingValidationError::EmptyGuestName)]
#[case("Ada Lovelace", "", BookingValidationError::EmptyPhoneNumber)]
fn construction_validates_contact_details(
    #[case] guest_name: &str,
    #[case] phone_number: &str,
    #[case] expected: BookingValidationError,
) {
    let mut input = draft();
    input.guest_name = guest_name.to_owned();
    input.phone_number = phone_number.to_owned();
    assert_eq!(Booking::new(input).expect_err("invalid draft"), expected);
}

#[rstest]
#[case(BookingStatus::Pending, BookingStatus::Confirmed)]
#[case(BookingStatus::Pending, BookingStatus::Rejected)]
#[case(BookingStatus::Pending, BookingStatus::Cancelled)]
#[case(BookingStatus::Confirmed, BookingStatus::Cancelled)]
#[case(BookingStatus::Confirmed, BookingStatus::Completed)]
fn legal_transitions_succeed_and_stamp_updated_at(
    #[case] from: BookingStatus,
    #[case] to: BookingStatus,
) {
    let mut booking = booking_in(from);
    let now = day(9);
    let event = booking.transition_to(to, now).expect("legal transition");
    assert_eq!(booking.status(), to);
    assert_eq!(booking.updated_at(), Some(now));
    assert_eq!(event.booking_id, booking.id());
}

#[rstest]
#[case(BookingStatus::Pending)]
#[case(BookingStatus::Confirmed)]
#[case(BookingStatus::Rejected)]
fn same_status_is_rejected(#[case] status: BookingStatus) {
    let mut booking = booking_in(status);
    let err = booking.transition_to(status, day(9)).expect_err("same status");
    assert_eq!(err, BookingTransitionError::SameStatus { status });
}

#[rstest]
#[case(BookingStatus::Confirmed)]
#[case(BookingStatus::Rejected)]
#[case(BookingStatus::Cancelled)]
#[case(BookingStatus::Completed)]
fn nothing_reverts_to_pending(#[case] from: BookingStatus) {
    let mut booking = booking_in(from);
    let err = booking
        .transition_to(BookingStatus::Pending, day(9))
        .expect_err("revert");
    assert_eq!(err, BookingTransitionError::RevertToPending);
}

#[rstest]
#[case(BookingStatus::Rejected)]
#[case(BookingStatus::Cancelled)]
#[case(BookingStatus::Completed)]
fn only_pending_bookings_confirm(#[case] from: BookingStatus) {
    let mut booking = booking_in(from);
    let err = booking
        .transition_to(BookingStatus::Confirmed, day(9))
        .expect_err("not pending");
    assert_eq!(
        err,
        BookingTransitionError::NotPending {
            target: BookingStatus::Confirmed,
            current: from,
        }
    );
}

#[test]
fn confirmed_bookings_cannot_be_rejected() {
    let mut booking = booking_in(BookingStatus::Confirmed);
    let err = booking
        .transition_to(BookingStatus::Rejected, day(9))
        .expect_err("not pending");
    assert_eq!(
        err,
        BookingTransitionError::NotPending {
            target: BookingStatus::Rejected,
            current: BookingStatus::Confirmed,
        }
    );
}

#[rstest]
#[case(BookingStatus::Rejected)]
#[case(BookingStatus::Cancelled)]
fn completed_bookings_stay_completed(#[case] target: BookingStatus) {
    let mut booking = booking_in(BookingStatus::Completed);
    let err = booking.transition_to(target, day(9)).expect_err("completed");
    assert_eq!(err, BookingTransitionError::AlreadyCompleted { target });
}

#[test]
fn rejected_bookings_cannot_be_cancelled() {
    let mut booking = booking_in(BookingStatus::Rejected);
    let err = booking
        .transition_to(BookingStatus::Cancelled, day(9))
        .expect_err("closed");
    assert_eq!(
        err,
        BookingTransitionError::AlreadyClosed {
            current: BookingStatus::Rejected,
        }
    );
}

#[rstest]
#[case(BookingStatus::Pending)]
#[case(BookingStatus::Rejected)]
#[case(BookingStatus::Cancelled)]
fn only_confirmed_bookings_complete(#[case] from: BookingStatus) {
    let mut booking = booking_in(from);
    let err = booking
        .transition_to(BookingStatus::Completed, day(9))
        .expect_err("not confirmed");
    assert_eq!(err, BookingTransitionError::NotConfirmed { current: from });
}

#[test]
fn events_carry_the_transition_kind() {
    let mut booking = booking_in(BookingStatus::Pending);
    let event = booking
        .transition_to(BookingStatus::Confirmed, day(9))
        .expect("legal transition");
    assert_eq!(event.lifecycle, BookingLifecycle::Confirmed);
    assert_eq!(event.property_id, booking.property_id());
    assert_eq!(event.client_id, booking.client_id());
}
