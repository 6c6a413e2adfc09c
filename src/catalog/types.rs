//! Catalog record types.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// A course to be scheduled.
///
/// `name` is not guaranteed to be unique; courses are identified by their
/// position in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub professor: String,
    /// Enrolled headcount.
    pub students: u32,
    /// Number of consecutive hour units the course occupies.
    pub duration: u32,
}

impl Course {
    pub fn new(
        name: impl Into<String>,
        professor: impl Into<String>,
        students: u32,
        duration: u32,
    ) -> Self {
        Self {
            name: name.into(),
            professor: professor.into(),
            students,
            duration,
        }
    }
}

/// A lecture room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    /// Maximum number of students.
    pub capacity: u32,
}

impl Room {
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

/// A teaching slot: a day label and a start hour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: String,
    pub hour: i32,
}

impl TimeSlot {
    pub fn new(day: impl Into<String>, hour: i32) -> Self {
        Self {
            day: day.into(),
            hour,
        }
    }
}

/// The full problem instance.
///
/// All three lists are guaranteed non-empty, so uniform index generation
/// into any of them is always possible.
///
/// # Examples
///
/// ```
/// use u_timetable::catalog::{Catalog, Course, Room, TimeSlot};
///
/// let catalog = Catalog::new(
///     vec![Course::new("Math 101", "Dr. Smith", 40, 2)],
///     vec![Room::new("Hall A", 100)],
///     vec![TimeSlot::new("Monday", 9)],
/// )
/// .unwrap();
/// assert_eq!(catalog.course_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogData")]
pub struct Catalog {
    courses: Vec<Course>,
    rooms: Vec<Room>,
    timeslots: Vec<TimeSlot>,
}

/// Unchecked wire form of [`Catalog`]; deserialization goes through
/// [`Catalog::new`] so an empty list is rejected up front.
#[derive(Deserialize)]
struct CatalogData {
    courses: Vec<Course>,
    rooms: Vec<Room>,
    timeslots: Vec<TimeSlot>,
}

impl TryFrom<CatalogData> for Catalog {
    type Error = TimetableError;

    fn try_from(data: CatalogData) -> Result<Self> {
        Catalog::new(data.courses, data.rooms, data.timeslots)
    }
}

impl Catalog {
    /// Builds a catalog, rejecting any empty list with
    /// [`TimetableError::CatalogInconsistency`].
    pub fn new(courses: Vec<Course>, rooms: Vec<Room>, timeslots: Vec<TimeSlot>) -> Result<Self> {
        if courses.is_empty() {
            return Err(TimetableError::catalog("course list is empty"));
        }
        if rooms.is_empty() {
            return Err(TimetableError::catalog("room list is empty"));
        }
        if timeslots.is_empty() {
            return Err(TimetableError::catalog("timeslot list is empty"));
        }
        Ok(Self {
            courses,
            rooms,
            timeslots,
        })
    }

    /// Skips the non-empty checks; only for exercising the guards
    /// downstream of [`Catalog::new`].
    #[cfg(test)]
    pub(crate) fn unchecked(courses: Vec<Course>, rooms: Vec<Room>, timeslots: Vec<TimeSlot>) -> Self {
        Self {
            courses,
            rooms,
            timeslots,
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn timeslots(&self) -> &[TimeSlot] {
        &self.timeslots
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn timeslot_count(&self) -> usize {
        self.timeslots.len()
    }
}
