pub mod api_key;
pub mod class;
pub mod lecturer;
pub mod room;
pub mod semester;
pub mod student;
pub mod student_class;

pub use api_key::ApiKey;
pub use class::Class;
pub use lecturer::Lecturer;
pub use room::{Room, RoomRow};
pub use semester::{ActiveSemester, Semester};
pub use student::Student;
pub use student_class::{ClassSession, StudentClass, StudentClassDetail, StudentClassRow};
