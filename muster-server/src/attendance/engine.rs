//! Attendance merge & derivation engine
//!
//! Coordinates the read-modify-write cycle over the two record stores:
//! merges day mutations into the stored sparse maps, recomputes the
//! derived totals, and cascades attendance changes into shift data.
//!
//! Writes to the same (employee, month, year) key are serialized through
//! a per-key async mutex held across the whole cycle; the storage upsert
//! alone cannot prevent lost updates because the map merge happens here,
//! between the read and the write.
//!
//! The attendance upsert and the shift cascade are two independent
//! writes. A cascade failure is logged and surfaced, but the committed
//! attendance write stands; shift state is eventually consistent relative
//! to attendance state.

use std::sync::Arc;

use dashmap::DashMap;
use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::db::models::{
    AttendanceRecord, AttendanceUpsert, ShiftRecord, ShiftRecordResponse, ShiftUpsert,
};
use crate::db::repository;
use crate::utils::time::{days_in_month, validate_month, validate_year};
use crate::utils::{AppError, AppResult};

use super::day_map::{DayMap, ShiftMap};
use super::status::{AttendanceStatus, ShiftCode};

type RecordKey = (i64, u32, i32);

pub struct AttendanceEngine {
    pool: SqlitePool,
    locks: DashMap<RecordKey, Arc<Mutex<()>>>,
}

impl AttendanceEngine {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            locks: DashMap::new(),
        }
    }

    fn lock_for(&self, key: RecordKey) -> Arc<Mutex<()>> {
        self.locks.entry(key).or_default().clone()
    }

    /// Drop the lock entry once no other task holds it; entries would
    /// otherwise accumulate one per key ever written
    fn release_lock(&self, key: &RecordKey) {
        // strong count 2 = the map entry plus our local clone
        self.locks
            .remove_if(key, |_, lock| Arc::strong_count(lock) == 2);
    }

    async fn ensure_employee(&self, employee_id: i64) -> AppResult<()> {
        repository::employee::find_by_id(&self.pool, employee_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {} not found", employee_id)))?;
        Ok(())
    }

    fn validate_day(month: u32, year: i32, day: u32) -> AppResult<u8> {
        validate_month(month)?;
        validate_year(year)?;
        let dim = days_in_month(month, year);
        if !(1..=dim).contains(&day) {
            return Err(AppError::validation(format!(
                "Day {} is out of range for {}/{} (1-{})",
                day, month, year, dim
            )));
        }
        Ok(day as u8)
    }

    fn validate_range(month: u32, year: i32, start_day: u32, end_day: u32) -> AppResult<(u8, u8)> {
        validate_month(month)?;
        validate_year(year)?;
        let dim = days_in_month(month, year);
        if start_day < 1 || end_day > dim || start_day > end_day {
            return Err(AppError::validation(format!(
                "Invalid day range {}-{} for {}/{} (1-{})",
                start_day, end_day, month, year, dim
            )));
        }
        Ok((start_day as u8, end_day as u8))
    }

    /// Set or clear the attendance status of a single day, cascading into
    /// shift data
    ///
    /// `status: None` clears the day (key removal). `remarks: None`
    /// preserves the stored remarks. A shift is applied only when the new
    /// status is Present/Overtime and `shift` is supplied; a qualifying
    /// status without a shift leaves the existing assignment untouched,
    /// while any non-qualifying status clears it.
    pub async fn record_day(
        &self,
        employee_id: i64,
        month: u32,
        year: i32,
        day: u32,
        status: Option<AttendanceStatus>,
        shift: Option<ShiftCode>,
        remarks: Option<String>,
    ) -> AppResult<AttendanceRecord> {
        let day = Self::validate_day(month, year, day)?;
        self.ensure_employee(employee_id).await?;

        let lock = self.lock_for((employee_id, month, year));
        let _guard = lock.lock().await;

        let existing = repository::attendance::find_by_key(&self.pool, employee_id, month, year)
            .await?;
        let stored_remarks = existing.as_ref().and_then(|r| r.remarks.clone());
        let mut days = existing.as_ref().map(|r| r.days()).unwrap_or_default();

        match &status {
            Some(s) => days.set(day, s.clone()),
            None => days.clear(day),
        }

        let record = self
            .upsert_attendance(employee_id, month, year, &days, remarks.or(stored_remarks))
            .await?;

        let mutations: Vec<(u8, Option<ShiftCode>)> = match (&status, shift) {
            (Some(s), Some(code)) if s.allows_shift() => vec![(day, Some(code))],
            (Some(s), None) if s.allows_shift() => Vec::new(),
            _ => vec![(day, None)],
        };
        self.cascade_shift(employee_id, month, year, &mutations)
            .await?;

        drop(_guard);
        self.release_lock(&(employee_id, month, year));

        Ok(record)
    }

    /// Apply one status to every day in [start_day, end_day] inclusive,
    /// cascading into shift data per day
    pub async fn record_range(
        &self,
        employee_id: i64,
        month: u32,
        year: i32,
        start_day: u32,
        end_day: u32,
        status: Option<AttendanceStatus>,
        shift: Option<ShiftCode>,
        remarks: Option<String>,
    ) -> AppResult<AttendanceRecord> {
        let (start, end) = Self::validate_range(month, year, start_day, end_day)?;
        self.ensure_employee(employee_id).await?;

        let lock = self.lock_for((employee_id, month, year));
        let _guard = lock.lock().await;

        let existing = repository::attendance::find_by_key(&self.pool, employee_id, month, year)
            .await?;
        let stored_remarks = existing.as_ref().and_then(|r| r.remarks.clone());
        let mut days = existing.as_ref().map(|r| r.days()).unwrap_or_default();

        for day in start..=end {
            match &status {
                Some(s) => days.set(day, s.clone()),
                None => days.clear(day),
            }
        }

        let record = self
            .upsert_attendance(employee_id, month, year, &days, remarks.or(stored_remarks))
            .await?;

        let mutations: Vec<(u8, Option<ShiftCode>)> = match (&status, shift) {
            (Some(s), Some(code)) if s.allows_shift() => {
                (start..=end).map(|day| (day, Some(code))).collect()
            }
            (Some(s), None) if s.allows_shift() => Vec::new(),
            _ => (start..=end).map(|day| (day, None)).collect(),
        };
        self.cascade_shift(employee_id, month, year, &mutations)
            .await?;

        drop(_guard);
        self.release_lock(&(employee_id, month, year));

        Ok(record)
    }

    /// Set or clear a single day's shift assignment
    ///
    /// Setting requires the day's current attendance status to be
    /// Present/Overtime; clearing is always allowed. A clear against a
    /// record that does not exist writes nothing.
    pub async fn record_shift_day(
        &self,
        employee_id: i64,
        month: u32,
        year: i32,
        day: u32,
        shift: Option<ShiftCode>,
    ) -> AppResult<ShiftRecordResponse> {
        let day = Self::validate_day(month, year, day)?;
        self.ensure_employee(employee_id).await?;

        let lock = self.lock_for((employee_id, month, year));
        let _guard = lock.lock().await;

        if shift.is_some() && !self.day_allows_shift(employee_id, month, year, day).await? {
            return Err(AppError::business_rule(format!(
                "Day {} requires Present or Overtime attendance before a shift can be assigned",
                day
            )));
        }

        let existing = repository::shift::find_by_key(&self.pool, employee_id, month, year).await?;
        if existing.is_none() && shift.is_none() {
            return Ok(ShiftRecordResponse::blank(employee_id, month, year));
        }

        let mut map = existing.map(|r| r.days()).unwrap_or_default();
        match shift {
            Some(code) => map.set(day, code),
            None => map.clear(day),
        }
        let record = self.upsert_shift(employee_id, month, year, &map).await?;

        drop(_guard);
        self.release_lock(&(employee_id, month, year));

        Ok(ShiftRecordResponse::from(&record))
    }

    /// Apply one shift assignment across [start_day, end_day] inclusive
    ///
    /// Days whose attendance status is not Present/Overtime are silently
    /// skipped; clearing (`shift: None`) applies to every day in range.
    /// When nothing was stored and nothing qualifies, no row is minted.
    pub async fn record_shift_range(
        &self,
        employee_id: i64,
        month: u32,
        year: i32,
        start_day: u32,
        end_day: u32,
        shift: Option<ShiftCode>,
    ) -> AppResult<ShiftRecordResponse> {
        let (start, end) = Self::validate_range(month, year, start_day, end_day)?;
        self.ensure_employee(employee_id).await?;

        let lock = self.lock_for((employee_id, month, year));
        let _guard = lock.lock().await;

        let attendance =
            repository::attendance::find_by_key(&self.pool, employee_id, month, year)
                .await?
                .map(|r| r.days())
                .unwrap_or_default();

        let existing = repository::shift::find_by_key(&self.pool, employee_id, month, year).await?;
        let mut map = existing.as_ref().map(|r| r.days()).unwrap_or_default();
        for day in start..=end {
            match shift {
                Some(code) => {
                    let qualifies = attendance
                        .get(day)
                        .map(AttendanceStatus::allows_shift)
                        .unwrap_or(false);
                    if qualifies {
                        map.set(day, code);
                    }
                }
                None => map.clear(day),
            }
        }

        if existing.is_none() && map.is_empty() {
            return Ok(ShiftRecordResponse::blank(employee_id, month, year));
        }

        let record = self.upsert_shift(employee_id, month, year, &map).await?;

        drop(_guard);
        self.release_lock(&(employee_id, month, year));

        Ok(ShiftRecordResponse::from(&record))
    }

    async fn day_allows_shift(
        &self,
        employee_id: i64,
        month: u32,
        year: i32,
        day: u8,
    ) -> AppResult<bool> {
        let days = repository::attendance::find_by_key(&self.pool, employee_id, month, year)
            .await?
            .map(|r| r.days())
            .unwrap_or_default();
        Ok(days
            .get(day)
            .map(AttendanceStatus::allows_shift)
            .unwrap_or(false))
    }

    async fn upsert_attendance(
        &self,
        employee_id: i64,
        month: u32,
        year: i32,
        days: &DayMap,
        remarks: Option<String>,
    ) -> AppResult<AttendanceRecord> {
        let record = repository::attendance::upsert(
            &self.pool,
            AttendanceUpsert {
                employee_id,
                month,
                year,
                day_map: days.to_json(),
                total_on_duty: days.present_days(),
                ot_days: days.ot_days(),
                remarks,
            },
        )
        .await?;
        Ok(record)
    }

    async fn upsert_shift(
        &self,
        employee_id: i64,
        month: u32,
        year: i32,
        map: &ShiftMap,
    ) -> AppResult<ShiftRecord> {
        let record = repository::shift::upsert(
            &self.pool,
            ShiftUpsert {
                employee_id,
                month,
                year,
                day_map: map.to_json(),
                total_on_duty: map.assigned_days(),
            },
        )
        .await?;
        Ok(record)
    }

    /// Apply shift mutations that follow from an attendance write
    ///
    /// `Some(code)` sets the day, `None` clears it; days with no mutation
    /// keep their assignment. When every mutation is a clear and no shift
    /// record exists yet, nothing is written.
    async fn cascade_shift(
        &self,
        employee_id: i64,
        month: u32,
        year: i32,
        mutations: &[(u8, Option<ShiftCode>)],
    ) -> AppResult<()> {
        if mutations.is_empty() {
            return Ok(());
        }

        let existing = repository::shift::find_by_key(&self.pool, employee_id, month, year)
            .await
            .map_err(|e| self.log_cascade_failure(employee_id, month, year, e))?;

        let clears_only = mutations.iter().all(|(_, assign)| assign.is_none());
        if existing.is_none() && clears_only {
            return Ok(());
        }

        let mut map = existing.map(|r| r.days()).unwrap_or_default();
        for (day, assign) in mutations {
            match assign {
                Some(code) => map.set(*day, *code),
                None => map.clear(*day),
            }
        }

        self.upsert_shift(employee_id, month, year, &map)
            .await
            .map_err(|e| {
                self.log_cascade_failure(employee_id, month, year, crate::db::repository::RepoError::Database(e.to_string()))
            })?;
        Ok(())
    }

    fn log_cascade_failure(
        &self,
        employee_id: i64,
        month: u32,
        year: i32,
        e: crate::db::repository::RepoError,
    ) -> AppError {
        tracing::error!(
            employee_id,
            month,
            year,
            error = %e,
            "Shift cascade failed after attendance write; shift data is stale for this record"
        );
        e.into()
    }
}
