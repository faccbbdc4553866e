//! Export pipeline over a seeded roster

mod common;

use muster_server::attendance::{AttendanceEngine, AttendanceStatus, ShiftCode};
use muster_server::db::models::{EmployeeUpdate, STATUS_INACTIVE};
use muster_server::db::repository;
use muster_server::export::{self, TableKind};
use muster_server::utils::AppError;

use common::{seed_employee, seed_workspace, test_pool};

#[tokio::test]
async fn rows_follow_designation_then_name_order() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    seed_employee(&pool, ws, "Zed", Some("Rig Man")).await;
    seed_employee(&pool, ws, "Adam", Some("Rig Man")).await;
    seed_employee(&pool, ws, "Boss", Some("Rig I/C")).await;
    seed_employee(&pool, ws, "Nora", None).await;

    let data = export::load(&pool, ws, 1, 2025, None, TableKind::Attendance, true)
        .await
        .unwrap();
    let names: Vec<&str> = data.rows.iter().map(|r| r.name.as_str()).collect();
    // ranked designations first, ties by name, unranked last
    assert_eq!(names, vec!["Boss", "Adam", "Zed", "Nora"]);
}

#[tokio::test]
async fn inactive_employees_are_excluded_even_when_selected() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    let active = seed_employee(&pool, ws, "Adam", None).await;
    let inactive = seed_employee(&pool, ws, "Gone", None).await;
    repository::employee::update(
        &pool,
        inactive,
        EmployeeUpdate {
            name: None,
            designation: None,
            status: Some(STATUS_INACTIVE.to_string()),
        },
    )
    .await
    .unwrap();

    let data = export::load(
        &pool,
        ws,
        1,
        2025,
        Some(&[active, inactive]),
        TableKind::Attendance,
        true,
    )
    .await
    .unwrap();
    assert_eq!(data.rows.len(), 1);
    assert_eq!(data.rows[0].name, "Adam");
}

#[tokio::test]
async fn empty_selection_is_not_found() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    seed_employee(&pool, ws, "Adam", None).await;

    let err = export::load(&pool, ws, 1, 2025, Some(&[999]), TableKind::Attendance, true)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = export::load(&pool, 999, 1, 2025, None, TableKind::Attendance, true)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn future_months_are_rejected() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    seed_employee(&pool, ws, "Adam", None).await;

    let err = export::load(&pool, ws, 1, 2999, None, TableKind::Attendance, true)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn full_attendance_export_renders() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    let emp = seed_employee(&pool, ws, "Adam", Some("Top Man")).await;
    let engine = AttendanceEngine::new(pool.clone());

    engine
        .record_range(emp, 2, 2024, 1, 10, Some(AttendanceStatus::Present), Some(ShiftCode::Day), None)
        .await
        .unwrap();
    engine
        .record_day(emp, 2, 2024, 11, Some(AttendanceStatus::Overtime), Some(ShiftCode::Night), None)
        .await
        .unwrap();
    engine
        .record_day(
            emp,
            2,
            2024,
            12,
            Some(AttendanceStatus::Absent),
            None,
            Some("left site".to_string()),
        )
        .await
        .unwrap();

    let data = export::load(&pool, ws, 2, 2024, None, TableKind::Attendance, true)
        .await
        .unwrap();
    assert_eq!(data.rows.len(), 1);
    let row = &data.rows[0];
    assert_eq!(row.days.present_days(), 10);
    assert_eq!(row.days.ot_days(), 1);
    assert_eq!(row.remarks.as_deref(), Some("left site"));

    let file = export::render(&data).unwrap();
    assert!(file.bytes.starts_with(b"PK"));
    assert!(file.filename.starts_with("attendance_February_2024_"));
}

#[tokio::test]
async fn shift_export_joins_both_stores() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    let emp = seed_employee(&pool, ws, "Adam", None).await;
    let engine = AttendanceEngine::new(pool.clone());

    engine
        .record_day(emp, 2, 2024, 1, Some(AttendanceStatus::Present), Some(ShiftCode::Day), None)
        .await
        .unwrap();
    engine
        .record_day(emp, 2, 2024, 2, Some(AttendanceStatus::Present), Some(ShiftCode::Night), None)
        .await
        .unwrap();
    // orphan the day-2 assignment by demoting the attendance underneath it
    sqlx::query("UPDATE attendance_record SET day_map = '{\"1\":\"P\",\"2\":\"A\"}' WHERE employee_id = ?")
        .bind(emp)
        .execute(&pool)
        .await
        .unwrap();

    let data = export::load(&pool, ws, 2, 2024, None, TableKind::Shifts, false)
        .await
        .unwrap();
    let row = &data.rows[0];
    assert_eq!(row.days.present_days(), 1);

    let file = export::render(&data).unwrap();
    assert!(file.bytes.starts_with(b"PK"));
    assert!(file.filename.starts_with("shifts_February_2024_"));
}

#[tokio::test]
async fn corrupt_record_renders_as_blank_row() {
    let pool = test_pool().await;
    let ws = seed_workspace(&pool, "Rig 1").await;
    let emp = seed_employee(&pool, ws, "Adam", None).await;
    let engine = AttendanceEngine::new(pool.clone());
    engine
        .record_day(emp, 2, 2024, 1, Some(AttendanceStatus::Present), None, None)
        .await
        .unwrap();
    sqlx::query("UPDATE attendance_record SET day_map = '<<garbage>>' WHERE employee_id = ?")
        .bind(emp)
        .execute(&pool)
        .await
        .unwrap();

    let data = export::load(&pool, ws, 2, 2024, None, TableKind::Attendance, true)
        .await
        .unwrap();
    assert!(data.rows[0].days.is_empty());
    let file = export::render(&data).unwrap();
    assert!(file.bytes.starts_with(b"PK"));
}
