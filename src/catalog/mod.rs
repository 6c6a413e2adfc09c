//! Problem catalog: the immutable courses, rooms, and timeslots a
//! timetable is built from.
//!
//! Chromosomes refer to catalog records by position only, so the GA needs
//! nothing beyond indexed access and length queries. [`load_dir`] reads the
//! three comma-separated files a catalog is usually shipped as.

mod loader;
mod types;

pub use loader::{load_dir, parse_courses, parse_rooms, parse_timeslots};
pub use types::{Catalog, Course, Room, TimeSlot};
