pub mod query;
pub mod translator;

pub use query::{ListQuery, SemesterQuery};
pub use translator::{Locale, Message, Translator};
