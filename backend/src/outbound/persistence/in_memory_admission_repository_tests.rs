//! Tests for the in-memory admission store.

use std::str::FromStr;

use chrono::{TimeZone, Utc};
use pagination::{Direction, PageRequest};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{Tenure, percentage_35};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn pending(hire_date: NaiveDate, salary: &str, created_minute: u32) -> NewAdmission {
    let salary = BigDecimal::from_str(salary).expect("decimal literal");
    let created_at = Utc
        .with_ymd_and_hms(2025, 7, 5, 12, created_minute, 0)
        .single()
        .expect("valid timestamp");
    NewAdmission::from_parts(
        hire_date,
        salary.clone(),
        Tenure::default(),
        percentage_35(&salary),
        created_at,
    )
}

fn request(page: u32, size: u32, field: AdmissionSortField, direction: Direction) -> AdmissionPageRequest {
    PageRequest::new(page, size, Sort::new(field, direction)).expect("valid page request")
}

#[fixture]
fn store() -> InMemoryAdmissionRepository {
    let store = InMemoryAdmissionRepository::new();
    let seeds = [
        (date(2021, 3, 1), "1500.00"),
        (date(2022, 1, 1), "2500.00"),
        (date(2022, 6, 15), "3000.00"),
        (date(2023, 2, 10), "3500.00"),
        (date(2023, 9, 30), "4000.00"),
        (date(2023, 12, 31), "4500.00"),
        (date(2024, 1, 1), "5000.00"),
        (date(2024, 1, 2), "5500.00"),
    ];
    for (minute, (hire_date, salary)) in (0_u32..).zip(seeds) {
        store
            .insert(pending(hire_date, salary, minute))
            .expect("insert succeeds");
    }
    store
}

#[rstest]
fn insert_assigns_identifiers_that_can_be_read_back() {
    let store = InMemoryAdmissionRepository::new();
    let stored = store
        .insert(pending(date(2022, 5, 10), "3500.00", 0))
        .expect("insert succeeds");

    let found = store.find_by_id(&stored.id()).expect("lookup succeeds");
    assert_eq!(found, Some(stored));
}

#[rstest]
fn unknown_identifiers_are_absent(store: InMemoryAdmissionRepository) {
    let missing = AdmissionId::from_uuid(Uuid::new_v4());
    assert_eq!(store.find_by_id(&missing).expect("lookup succeeds"), None);
}

#[rstest]
fn find_all_defaults_to_newest_first(store: InMemoryAdmissionRepository) {
    let page = store
        .find_all(&request(0, 3, AdmissionSortField::CreatedAt, Direction::Desc))
        .expect("query succeeds");

    let hire_dates: Vec<_> = page.content.iter().map(Admission::hire_date).collect();
    assert_eq!(hire_dates, vec![date(2024, 1, 2), date(2024, 1, 1), date(2023, 12, 31)]);
    assert_eq!(page.total_elements, 8);
    assert_eq!(page.total_pages, 3);
    assert!(page.first);
    assert!(!page.last);
}

#[rstest]
fn date_range_pages_are_inclusive_and_offset(store: InMemoryAdmissionRepository) {
    let page = store
        .find_by_hire_date_between(
            date(2022, 1, 1),
            date(2024, 1, 1),
            &request(1, 5, AdmissionSortField::HireDate, Direction::Asc),
        )
        .expect("query succeeds");

    assert_eq!(page.total_elements, 6);
    assert_eq!(page.number, 1);
    let hire_dates: Vec<_> = page.content.iter().map(Admission::hire_date).collect();
    assert_eq!(hire_dates, vec![date(2024, 1, 1)]);
    assert!(page.last);
}

#[rstest]
fn salary_floor_is_inclusive_and_sorted(store: InMemoryAdmissionRepository) {
    let min = BigDecimal::from_str("4000").expect("decimal literal");
    let page = store
        .find_by_gross_salary_at_least(
            &min,
            &request(0, 20, AdmissionSortField::GrossSalary, Direction::Desc),
        )
        .expect("query succeeds");

    let salaries: Vec<String> = page
        .content
        .iter()
        .map(|admission| admission.gross_salary().to_string())
        .collect();
    assert_eq!(salaries, vec!["5500.00", "5000.00", "4500.00", "4000.00"]);
}

#[rstest]
fn ties_are_broken_by_identifier() {
    let store = InMemoryAdmissionRepository::new();
    for _ in 0..3 {
        store
            .insert(pending(date(2022, 1, 1), "1000", 0))
            .expect("insert succeeds");
    }

    let page = store
        .find_all(&request(0, 10, AdmissionSortField::CreatedAt, Direction::Desc))
        .expect("query succeeds");
    let ids: Vec<_> = page.content.iter().map(Admission::id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[rstest]
fn pages_past_the_end_are_empty(store: InMemoryAdmissionRepository) {
    let page = store
        .find_all(&request(9, 5, AdmissionSortField::Id, Direction::Asc))
        .expect("query succeeds");
    assert!(page.empty);
    assert_eq!(page.total_elements, 8);
}
