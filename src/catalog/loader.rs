//! Comma-separated catalog loading.
//!
//! A catalog directory holds three files, each with a header line:
//!
//! | File            | Columns                               |
//! |-----------------|---------------------------------------|
//! | `courses.txt`   | `name,professor,students,duration`    |
//! | `rooms.txt`     | `name,capacity`                       |
//! | `timeslots.txt` | `day,hour`                            |
//!
//! Columns are read by position, so header wording is free. Fields are
//! trimmed, blank lines are skipped, and double-quoted fields may contain
//! commas. Trailing extra fields are ignored. `students`, `duration`, and
//! `capacity` must be positive.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::types::{Catalog, Course, Room, TimeSlot};
use crate::error::{Result, TimetableError};

const COURSES_FILE: &str = "courses.txt";
const ROOMS_FILE: &str = "rooms.txt";
const TIMESLOTS_FILE: &str = "timeslots.txt";

const COURSE_COLUMNS: &[&str] = &["name", "professor", "students", "duration"];
const ROOM_COLUMNS: &[&str] = &["name", "capacity"];
const TIMESLOT_COLUMNS: &[&str] = &["day", "hour"];

/// Loads a catalog from `courses.txt`, `rooms.txt`, and `timeslots.txt`
/// inside `dir`.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Catalog> {
    let dir = dir.as_ref();

    let courses_path = dir.join(COURSES_FILE);
    let courses = courses_from(&fs::read_to_string(&courses_path)?, &courses_path)?;

    let rooms_path = dir.join(ROOMS_FILE);
    let rooms = rooms_from(&fs::read_to_string(&rooms_path)?, &rooms_path)?;

    let timeslots_path = dir.join(TIMESLOTS_FILE);
    let timeslots = timeslots_from(&fs::read_to_string(&timeslots_path)?, &timeslots_path)?;

    debug!(
        "loaded catalog from {}: {} courses, {} rooms, {} timeslots",
        dir.display(),
        courses.len(),
        rooms.len(),
        timeslots.len()
    );

    Catalog::new(courses, rooms, timeslots)
}

/// Parses the contents of a `courses.txt` file.
pub fn parse_courses(text: &str) -> Result<Vec<Course>> {
    courses_from(text, Path::new(COURSES_FILE))
}

/// Parses the contents of a `rooms.txt` file.
pub fn parse_rooms(text: &str) -> Result<Vec<Room>> {
    rooms_from(text, Path::new(ROOMS_FILE))
}

/// Parses the contents of a `timeslots.txt` file.
pub fn parse_timeslots(text: &str) -> Result<Vec<TimeSlot>> {
    timeslots_from(text, Path::new(TIMESLOTS_FILE))
}

#[derive(Debug, Deserialize)]
struct CourseRow {
    name: String,
    professor: String,
    students: u32,
    duration: u32,
}

#[derive(Debug, Deserialize)]
struct RoomRow {
    name: String,
    capacity: u32,
}

#[derive(Debug, Deserialize)]
struct TimeSlotRow {
    day: String,
    hour: i32,
}

fn courses_from(text: &str, file: &Path) -> Result<Vec<Course>> {
    parse_rows::<CourseRow>(text, file, COURSE_COLUMNS)?
        .into_iter()
        .map(|(line, row)| {
            positive(file, line, "students", row.students)?;
            positive(file, line, "duration", row.duration)?;
            Ok(Course::new(row.name, row.professor, row.students, row.duration))
        })
        .collect()
}

fn rooms_from(text: &str, file: &Path) -> Result<Vec<Room>> {
    parse_rows::<RoomRow>(text, file, ROOM_COLUMNS)?
        .into_iter()
        .map(|(line, row)| {
            positive(file, line, "capacity", row.capacity)?;
            Ok(Room::new(row.name, row.capacity))
        })
        .collect()
}

fn timeslots_from(text: &str, file: &Path) -> Result<Vec<TimeSlot>> {
    Ok(parse_rows::<TimeSlotRow>(text, file, TIMESLOT_COLUMNS)?
        .into_iter()
        .map(|(_, row)| TimeSlot::new(row.day, row.hour))
        .collect())
}

fn positive(file: &Path, line: usize, column: &str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(parse_error(file, line, format!("{column} must be positive")));
    }
    Ok(())
}

fn parse_error(file: &Path, line: usize, message: String) -> TimetableError {
    TimetableError::Parse {
        file: file.to_path_buf(),
        line,
        message,
    }
}

/// Deserializes every data row of `text` positionally into `T`, paired
/// with the 1-based line it started on.
fn parse_rows<T: DeserializeOwned>(
    text: &str,
    file: &Path,
    columns: &[&str],
) -> Result<Vec<(usize, T)>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|err| {
            let line = err.position().map_or(0, |p| p.line() as usize);
            parse_error(file, line, err.to_string())
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let line = record.position().map_or(0, |p| p.line() as usize);
        if record.len() < columns.len() {
            return Err(parse_error(
                file,
                line,
                format!("expected {} fields, found {}", columns.len(), record.len()),
            ));
        }

        let fields: StringRecord = record.iter().take(columns.len()).collect();
        let row = fields
            .deserialize(None)
            .map_err(|err| parse_error(file, line, field_message(&err, &fields, columns)))?;
        rows.push((line, row));
    }

    Ok(rows)
}

/// Names the offending column when the failure points at one.
fn field_message(err: &csv::Error, fields: &StringRecord, columns: &[&str]) -> String {
    if let csv::ErrorKind::Deserialize { err: de, .. } = err.kind() {
        if let Some(i) = de.field().map(|i| i as usize) {
            if let (Some(column), Some(value)) = (columns.get(i), fields.get(i)) {
                return format!("{column} must be a number, got {value:?}");
            }
        }
    }
    err.to_string()
}
