use hotel_bookings::adapters::mock::SentNotification;
use hotel_bookings::application::booking::{
    BookingApplicationError, delete_booking, delete_selected_booking, lock_store,
    select_booking, submit_booking,
};
use hotel_bookings::config::AppConfig;
use hotel_bookings::domain::BookingId;
use hotel_bookings::domain::RoomType;
use hotel_bookings::domain::booking::NewBooking;
use hotel_bookings::domain::dates::{format_range, nights_between};
use hotel_bookings::domain::validation::{BookingField, validate};

mod common;

use common::{TEST_NOW_MILLIS, create_test_context, draft};

// ============================================================================
// 統合テスト（関数型DDD - 関数ベースのAPI）
// ============================================================================

#[tokio::test]
async fn test_submit_then_lookup_returns_trimmed_input() {
    // Arrange
    let ctx = create_test_context(AppConfig::immediate());
    let input = NewBooking {
        guest_name: "  Ada Lovelace  ".to_string(),
        hotel_name: " Harbour Grand ".to_string(),
        room_type: RoomType::Suite,
        check_in: "2025-01-05".to_string(),
        check_out: "2025-01-08".to_string(),
        guests: 3.0,
    };

    // Act
    let id = submit_booking(&ctx.deps, &input).await.unwrap();

    // Assert
    let store = lock_store(&ctx.deps.store);
    let booking = store.find(id).unwrap();
    assert_eq!(booking.id, id);
    assert_eq!(booking.guest_name, "Ada Lovelace");
    assert_eq!(booking.hotel_name, "Harbour Grand");
    assert_eq!(booking.room_type, RoomType::Suite);
    assert_eq!(booking.check_in.to_string(), "2025-01-05");
    assert_eq!(booking.check_out.to_string(), "2025-01-08");
    assert_eq!(booking.guests.value(), 3);
    assert_eq!(booking.created_at, TEST_NOW_MILLIS);
    assert_eq!(store.selected_booking_id(), Some(id));
}

#[tokio::test]
async fn test_each_submission_gets_fresh_id_and_timestamp() {
    let ctx = create_test_context(AppConfig::immediate());

    let first = submit_booking(&ctx.deps, &draft("A", "2025-01-01", "2025-01-02"))
        .await
        .unwrap();
    ctx.clock.advance(1_000);
    let second = submit_booking(&ctx.deps, &draft("B", "2025-01-01", "2025-01-02"))
        .await
        .unwrap();

    assert_ne!(first, second);
    let store = lock_store(&ctx.deps.store);
    assert_eq!(store.find(first).unwrap().created_at, TEST_NOW_MILLIS);
    assert_eq!(store.find(second).unwrap().created_at, TEST_NOW_MILLIS + 1_000);
    assert_eq!(store.selected_booking_id(), Some(second));
}

#[tokio::test]
async fn test_delete_non_member_leaves_state_unchanged() {
    let ctx = create_test_context(AppConfig::immediate());
    let id = submit_booking(&ctx.deps, &draft("A", "2025-01-01", "2025-01-02"))
        .await
        .unwrap();
    let before = lock_store(&ctx.deps.store).bookings().to_vec();

    let removed = delete_booking(&ctx.deps, BookingId::new()).await.unwrap();

    assert!(removed.is_none());
    let store = lock_store(&ctx.deps.store);
    assert_eq!(store.bookings(), before.as_slice());
    assert_eq!(store.selected_booking_id(), Some(id));
    // 作成通知のみ
    assert_eq!(ctx.notifications.sent().len(), 1);
}

#[tokio::test]
async fn test_delete_selected_falls_back_to_first_in_stored_order() {
    let ctx = create_test_context(AppConfig::immediate());
    let a = submit_booking(&ctx.deps, &draft("A", "2025-06-01", "2025-06-02"))
        .await
        .unwrap();
    let b = submit_booking(&ctx.deps, &draft("B", "2025-01-01", "2025-01-02"))
        .await
        .unwrap();

    select_booking(&ctx.deps, b);
    delete_selected_booking(&ctx.deps).await.unwrap();
    assert_eq!(lock_store(&ctx.deps.store).selected_booking_id(), Some(a));

    delete_selected_booking(&ctx.deps).await.unwrap();
    let store = lock_store(&ctx.deps.store);
    assert!(store.is_empty());
    assert_eq!(store.selected_booking_id(), None);
    drop(store);

    assert_eq!(
        ctx.notifications.sent()[2..],
        [
            SentNotification::BookingDeleted {
                guest_name: "B".to_string(),
                hotel_name: "Harbour Grand".to_string(),
            },
            SentNotification::BookingDeleted {
                guest_name: "A".to_string(),
                hotel_name: "Harbour Grand".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_delete_unselected_keeps_selection() {
    let ctx = create_test_context(AppConfig::immediate());
    let a = submit_booking(&ctx.deps, &draft("A", "2025-01-01", "2025-01-02"))
        .await
        .unwrap();
    let b = submit_booking(&ctx.deps, &draft("B", "2025-01-01", "2025-01-02"))
        .await
        .unwrap();

    delete_booking(&ctx.deps, a).await.unwrap();

    assert_eq!(lock_store(&ctx.deps.store).selected_booking_id(), Some(b));
}

#[tokio::test]
async fn test_listing_order() {
    let ctx = create_test_context(AppConfig::immediate());
    let feb = submit_booking(&ctx.deps, &draft("Feb", "2025-02-01", "2025-02-03"))
        .await
        .unwrap();
    ctx.clock.advance(10);
    let jan_old = submit_booking(&ctx.deps, &draft("Jan old", "2025-01-01", "2025-01-03"))
        .await
        .unwrap();
    ctx.clock.advance(10);
    let jan_new = submit_booking(&ctx.deps, &draft("Jan new", "2025-01-01", "2025-01-03"))
        .await
        .unwrap();

    let store = lock_store(&ctx.deps.store);
    let sorted: Vec<BookingId> = store.sorted_bookings().iter().map(|b| b.id).collect();
    assert_eq!(sorted, vec![jan_new, jan_old, feb]);

    let stored: Vec<BookingId> = store.bookings().iter().map(|b| b.id).collect();
    assert_eq!(stored, vec![feb, jan_old, jan_new]);
}

#[tokio::test]
async fn test_invalid_submission_reports_field_errors() {
    let ctx = create_test_context(AppConfig::immediate());
    let input = NewBooking {
        check_out: "2025-01-01".to_string(),
        guests: 0.0,
        ..draft("A", "2025-01-05", "")
    };

    let err = submit_booking(&ctx.deps, &input).await.unwrap_err();

    let BookingApplicationError::ValidationFailed(errors) = err else {
        panic!("expected validation failure");
    };
    assert_eq!(
        errors.get(BookingField::CheckOut),
        Some("Check-out must be after check-in.")
    );
    assert_eq!(errors.get(BookingField::Guests), Some("Guests must be at least 1."));
    assert!(lock_store(&ctx.deps.store).is_empty());
}

#[test]
fn test_validate_empty_iff_all_rules_hold() {
    let valid = draft("A", "2025-01-05", "2025-01-06");
    assert!(validate(&valid).is_empty());

    let cases = [
        NewBooking {
            guest_name: " ".to_string(),
            ..valid.clone()
        },
        NewBooking {
            hotel_name: String::new(),
            ..valid.clone()
        },
        NewBooking {
            check_in: String::new(),
            ..valid.clone()
        },
        NewBooking {
            check_out: String::new(),
            ..valid.clone()
        },
        NewBooking {
            check_out: "2025-01-05".to_string(),
            ..valid.clone()
        },
        NewBooking {
            guests: f64::NAN,
            ..valid.clone()
        },
        NewBooking {
            guests: 0.0,
            ..valid.clone()
        },
    ];
    for case in &cases {
        assert_eq!(validate(case).len(), 1, "case: {:?}", case);
    }
}

#[test]
fn test_date_properties() {
    assert_eq!(nights_between("2025-01-05", "2025-01-08"), 3);
    assert_eq!(nights_between("2025-01-08", "2025-01-05"), 0);

    let range = format_range("2025-01-05", "2025-01-08");
    assert!(range.contains("Jan 5, 2025"));
    assert!(range.contains("Jan 8, 2025"));
    assert!(range.contains('→'));
}
