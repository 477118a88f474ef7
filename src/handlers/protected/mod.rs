// handlers/protected/mod.rs - Protected handlers (api key required)
//
// Mounted under /api/misca. Each handler receives the `InstanceMode`
// resolved by middleware and builds its service per request.
pub mod classes;
pub mod lecturers;
pub mod rooms;
pub mod semesters;
pub mod student_classes;
pub mod students;
pub mod study_programs;
