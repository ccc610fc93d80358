//! Class-schedule search and ranking.
//!
//! Given the courses a student wants, generates every conflict-free weekly
//! timetable (or a uniform sample when there are too many) and ranks them
//! against the student's preferences.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Weekday`, `Days`, `TimeSlot`, `Offering`,
//!   `CourseRecord`, `Component`, `AliasMap`, `DayBlocks`
//! - **`validation`**: Input integrity checks (duplicate IDs, empty
//!   components, malformed slots)
//! - **`conflict`**: Pairwise offering conflicts with a memo cache
//! - **`sat`**: CNF encoding and the satisfiability oracle seam
//! - **`scheduler`**: Enumeration, metrics, ranking, and the generator
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{ComponentOfferings, CourseRecord, Days, Offering, TimeSlot};
//! use u_timetable::scheduler::{GeneratorConfig, ScheduleGenerator};
//!
//! let slot = |d: &str, s, e| TimeSlot::new(d.parse::<Days>().unwrap(), s, e);
//! let courses = vec![
//!     CourseRecord::new("CMPUT 174").with_component(
//!         ComponentOfferings::new("LEC")
//!             .with_offering(Offering::new("10", "LEC", "A1").with_slot(slot("MWF", 600, 650))),
//!     ),
//!     CourseRecord::new("MATH 117").with_component(
//!         ComponentOfferings::new("LEC")
//!             .with_offering(Offering::new("20", "LEC", "A1").with_slot(slot("TR", 570, 650))),
//!     ),
//! ];
//!
//! let report = ScheduleGenerator::new(GeneratorConfig::default().with_seed(1))
//!     .generate(&courses)
//!     .unwrap();
//! assert_eq!(report.schedules[0].offering_ids, vec!["10", "20"]);
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Biere et al. (2009), "Handbook of Satisfiability"

pub mod conflict;
pub mod error;
pub mod models;
pub mod sat;
pub mod scheduler;
pub mod validation;

pub use error::{GenerateError, Result};
