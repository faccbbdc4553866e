//! End-to-end engine behavior over a real (in-memory) database

mod common;

use muster_server::attendance::{AttendanceEngine, AttendanceStatus, ShiftCode};
use muster_server::db::repository;
use muster_server::utils::AppError;

use common::{seed_employee, seed_workspace, test_pool};

#[tokio::test]
async fn blank_day_differs_from_absent() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    let emp = seed_employee(&pool, ws, "Adam", None).await;
    let engine = AttendanceEngine::new(pool.clone());

    let record = engine
        .record_day(emp, 3, 2025, 1, Some(AttendanceStatus::Absent), None, None)
        .await
        .unwrap();

    let days = record.days();
    assert_eq!(days.get(1), Some(&AttendanceStatus::Absent));
    assert!(!days.contains(2));
    assert_eq!(days.present_days(), 0);

    // clearing removes the key entirely
    let record = engine
        .record_day(emp, 3, 2025, 1, None, None, None)
        .await
        .unwrap();
    assert!(!record.days().contains(1));

    // clearing an already-blank day is a no-op, not an error
    let record = engine
        .record_day(emp, 3, 2025, 1, None, None, None)
        .await
        .unwrap();
    assert!(!record.days().contains(1));
}

#[tokio::test]
async fn totals_derive_from_the_day_map() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    let emp = seed_employee(&pool, ws, "Adam", None).await;
    let engine = AttendanceEngine::new(pool.clone());

    engine
        .record_range(emp, 2, 2024, 1, 5, Some(AttendanceStatus::Present), None, None)
        .await
        .unwrap();
    engine
        .record_day(emp, 2, 2024, 6, Some(AttendanceStatus::Overtime), None, None)
        .await
        .unwrap();
    let record = engine
        .record_day(emp, 2, 2024, 7, Some(AttendanceStatus::Leave), None, None)
        .await
        .unwrap();

    assert_eq!(record.total_on_duty, 5);
    assert_eq!(record.ot_days, 1);

    // a stale stored counter never leaks out: reads recompute from the map
    sqlx::query("UPDATE attendance_record SET total_on_duty = 99 WHERE employee_id = ?")
        .bind(emp)
        .execute(&pool)
        .await
        .unwrap();
    let stored = repository::attendance::find_by_key(&pool, emp, 2, 2024)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.days().present_days(), 5);
    assert_eq!(stored.days().ot_days(), 1);
}

#[tokio::test]
async fn shift_follows_qualifying_attendance() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    let emp = seed_employee(&pool, ws, "Adam", None).await;
    let engine = AttendanceEngine::new(pool.clone());

    // P with a shift lands in both stores
    engine
        .record_day(emp, 3, 2025, 10, Some(AttendanceStatus::Present), Some(ShiftCode::Day), None)
        .await
        .unwrap();
    let shifts = repository::shift::find_by_key(&pool, emp, 3, 2025)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shifts.days().get(10), Some(ShiftCode::Day));

    // demoting the day to Absent cascades the shift away
    engine
        .record_day(emp, 3, 2025, 10, Some(AttendanceStatus::Absent), Some(ShiftCode::Day), None)
        .await
        .unwrap();
    let shifts = repository::shift::find_by_key(&pool, emp, 3, 2025)
        .await
        .unwrap()
        .unwrap();
    assert!(shifts.days().get(10).is_none());
    assert_eq!(shifts.days().assigned_days(), 0);
}

#[tokio::test]
async fn qualifying_rewrite_without_shift_keeps_assignment() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    let emp = seed_employee(&pool, ws, "Adam", None).await;
    let engine = AttendanceEngine::new(pool.clone());

    engine
        .record_day(emp, 3, 2025, 10, Some(AttendanceStatus::Present), Some(ShiftCode::Day), None)
        .await
        .unwrap();

    // a remarks-only P rewrite must not touch the assignment
    engine
        .record_day(
            emp,
            3,
            2025,
            10,
            Some(AttendanceStatus::Present),
            None,
            Some("half day".to_string()),
        )
        .await
        .unwrap();
    let shifts = repository::shift::find_by_key(&pool, emp, 3, 2025)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shifts.days().get(10), Some(ShiftCode::Day));

    // same for an OT rewrite
    engine
        .record_day(emp, 3, 2025, 10, Some(AttendanceStatus::Overtime), None, None)
        .await
        .unwrap();
    let shifts = repository::shift::find_by_key(&pool, emp, 3, 2025)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shifts.days().get(10), Some(ShiftCode::Day));
}

#[tokio::test]
async fn qualifying_range_rewrite_without_shift_keeps_assignments() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    let emp = seed_employee(&pool, ws, "Adam", None).await;
    let engine = AttendanceEngine::new(pool.clone());

    engine
        .record_range(emp, 3, 2025, 1, 5, Some(AttendanceStatus::Present), Some(ShiftCode::Day), None)
        .await
        .unwrap();

    // re-marking the span as Present without a shift keeps all five
    engine
        .record_range(emp, 3, 2025, 1, 5, Some(AttendanceStatus::Present), None, None)
        .await
        .unwrap();
    let shifts = repository::shift::find_by_key(&pool, emp, 3, 2025)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shifts.days().assigned_days(), 5);

    // a non-qualifying rewrite still clears its span
    engine
        .record_range(emp, 3, 2025, 4, 5, Some(AttendanceStatus::Leave), None, None)
        .await
        .unwrap();
    let shifts = repository::shift::find_by_key(&pool, emp, 3, 2025)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shifts.days().assigned_days(), 3);
}

#[tokio::test]
async fn shift_clear_without_record_writes_nothing() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    let emp = seed_employee(&pool, ws, "Adam", None).await;
    let engine = AttendanceEngine::new(pool.clone());

    // direct single-day clear against nothing
    let record = engine
        .record_shift_day(emp, 3, 2025, 1, None)
        .await
        .unwrap();
    assert_eq!(record.total_on_duty, 0);
    assert!(
        repository::shift::find_by_key(&pool, emp, 3, 2025)
            .await
            .unwrap()
            .is_none()
    );

    // direct range clear against nothing
    let record = engine
        .record_shift_range(emp, 3, 2025, 1, 10, None)
        .await
        .unwrap();
    assert_eq!(record.total_on_duty, 0);
    assert!(
        repository::shift::find_by_key(&pool, emp, 3, 2025)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn clearing_without_shift_record_writes_nothing() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    let emp = seed_employee(&pool, ws, "Adam", None).await;
    let engine = AttendanceEngine::new(pool.clone());

    // Absent day with no shift record yet: the cascade must not mint an
    // empty shift row
    engine
        .record_day(emp, 3, 2025, 1, Some(AttendanceStatus::Absent), None, None)
        .await
        .unwrap();
    let shifts = repository::shift::find_by_key(&pool, emp, 3, 2025)
        .await
        .unwrap();
    assert!(shifts.is_none());
}

#[tokio::test]
async fn shift_day_requires_present_or_overtime() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    let emp = seed_employee(&pool, ws, "Adam", None).await;
    let engine = AttendanceEngine::new(pool.clone());

    // blank day
    let err = engine
        .record_shift_day(emp, 3, 2025, 5, Some(ShiftCode::Night))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    // Leave day
    engine
        .record_day(emp, 3, 2025, 5, Some(AttendanceStatus::Leave), None, None)
        .await
        .unwrap();
    let err = engine
        .record_shift_day(emp, 3, 2025, 5, Some(ShiftCode::Night))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    // Overtime day qualifies
    engine
        .record_day(emp, 3, 2025, 5, Some(AttendanceStatus::Overtime), None, None)
        .await
        .unwrap();
    let record = engine
        .record_shift_day(emp, 3, 2025, 5, Some(ShiftCode::Night))
        .await
        .unwrap();
    assert_eq!(record.days.get(5), Some(ShiftCode::Night));

    // clearing is allowed regardless of attendance
    engine
        .record_day(emp, 3, 2025, 5, Some(AttendanceStatus::Absent), None, None)
        .await
        .unwrap();
    let record = engine
        .record_shift_day(emp, 3, 2025, 5, None)
        .await
        .unwrap();
    assert!(record.days.get(5).is_none());
}

#[tokio::test]
async fn shift_range_skips_nonqualifying_days() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    let emp = seed_employee(&pool, ws, "Adam", None).await;
    let engine = AttendanceEngine::new(pool.clone());

    engine
        .record_day(emp, 3, 2025, 1, Some(AttendanceStatus::Present), None, None)
        .await
        .unwrap();
    engine
        .record_day(emp, 3, 2025, 2, Some(AttendanceStatus::Absent), None, None)
        .await
        .unwrap();
    engine
        .record_day(emp, 3, 2025, 4, Some(AttendanceStatus::Overtime), None, None)
        .await
        .unwrap();

    // day 3 is blank, day 2 is Absent: both skipped without error
    let record = engine
        .record_shift_range(emp, 3, 2025, 1, 4, Some(ShiftCode::Day))
        .await
        .unwrap();
    assert_eq!(record.days.get(1), Some(ShiftCode::Day));
    assert!(record.days.get(2).is_none());
    assert!(record.days.get(3).is_none());
    assert_eq!(record.days.get(4), Some(ShiftCode::Day));
    assert_eq!(record.days.assigned_days(), 2);

    // range clear wipes everything in range
    let record = engine
        .record_shift_range(emp, 3, 2025, 1, 4, None)
        .await
        .unwrap();
    assert_eq!(record.days.assigned_days(), 0);
}

#[tokio::test]
async fn range_bounds_are_validated() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    let emp = seed_employee(&pool, ws, "Adam", None).await;
    let engine = AttendanceEngine::new(pool.clone());

    // start > end
    let err = engine
        .record_range(emp, 3, 2025, 10, 5, Some(AttendanceStatus::Present), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Feb 2023 has 28 days
    let err = engine
        .record_range(emp, 2, 2023, 1, 29, Some(AttendanceStatus::Present), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Feb 2024 is a leap year
    let record = engine
        .record_range(emp, 2, 2024, 1, 29, Some(AttendanceStatus::Present), None, None)
        .await
        .unwrap();
    assert_eq!(record.total_on_duty, 29);

    // day out of month in the single-day path
    let err = engine
        .record_day(emp, 4, 2025, 31, Some(AttendanceStatus::Present), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn remarks_persist_across_day_updates() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    let emp = seed_employee(&pool, ws, "Adam", None).await;
    let engine = AttendanceEngine::new(pool.clone());

    let record = engine
        .record_day(
            emp,
            3,
            2025,
            1,
            Some(AttendanceStatus::Present),
            None,
            Some("joined mid-month".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(record.remarks.as_deref(), Some("joined mid-month"));

    // a later write without remarks keeps the stored text
    let record = engine
        .record_day(emp, 3, 2025, 2, Some(AttendanceStatus::Present), None, None)
        .await
        .unwrap();
    assert_eq!(record.remarks.as_deref(), Some("joined mid-month"));
}

#[tokio::test]
async fn corrupt_day_map_reads_as_blank_and_recovers() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    let emp = seed_employee(&pool, ws, "Adam", None).await;
    let engine = AttendanceEngine::new(pool.clone());

    engine
        .record_range(emp, 3, 2025, 1, 10, Some(AttendanceStatus::Present), None, None)
        .await
        .unwrap();
    sqlx::query("UPDATE attendance_record SET day_map = 'not-json' WHERE employee_id = ?")
        .bind(emp)
        .execute(&pool)
        .await
        .unwrap();

    let stored = repository::attendance::find_by_key(&pool, emp, 3, 2025)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.days().is_empty());

    // the next write starts from the blank map and lands cleanly
    let record = engine
        .record_day(emp, 3, 2025, 1, Some(AttendanceStatus::Present), None, None)
        .await
        .unwrap();
    assert_eq!(record.total_on_duty, 1);
}

#[tokio::test]
async fn unknown_employee_is_rejected() {
    let pool = test_pool().await;
    seed_workspace(&pool, "Rig 1").await;
    let engine = AttendanceEngine::new(pool.clone());

    let err = engine
        .record_day(999, 3, 2025, 1, Some(AttendanceStatus::Present), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
