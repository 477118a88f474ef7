use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::filter::{FilterError, PaginationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Id,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "id" => Ok(Locale::Id),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Id => write!(f, "id"),
        }
    }
}

/// Fixed, user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    ListSemesters,
    ActiveSemester,
    ListStudents,
    TotalStudents,
    ListLecturers,
    TotalLecturers,
    ListClasses,
    TotalClasses,
    ListStudentClasses,
    TotalStudentClasses,
    ListStudentClassDetails,
    TotalStudentClassDetails,
    ListRooms,
    TotalRooms,
    ListStudyPrograms,
    TotalStudyPrograms,
    ServiceInfo,
    ApiKeyNotFound,
    ApiKeyMalformed,
    ApiKeyInactive,
    ActiveSemesterNotFound,
    RouteNotFound,
    InvalidRequest,
    DataMismatch,
    InternalError,
    DatabaseUnavailable,
}

/// Renders messages and validation errors in the configured locale.
/// Held in application state and shared by every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn message(&self, message: Message) -> &'static str {
        use Message::*;
        match self.locale {
            Locale::En => match message {
                ListSemesters => "Successfully retrieved all semesters",
                ActiveSemester => "Successfully retrieved the active semester",
                ListStudents => "Successfully retrieved students",
                TotalStudents => "Successfully retrieved total students",
                ListLecturers => "Successfully retrieved lecturers",
                TotalLecturers => "Successfully retrieved total lecturers",
                ListClasses => "Successfully retrieved classes",
                TotalClasses => "Successfully retrieved total classes",
                ListStudentClasses => "Successfully retrieved student classes",
                TotalStudentClasses => "Successfully retrieved total student classes",
                ListStudentClassDetails => "Successfully retrieved student class details",
                TotalStudentClassDetails => "Successfully retrieved total student class details",
                ListRooms => "Successfully retrieved rooms",
                TotalRooms => "Successfully retrieved total rooms",
                ListStudyPrograms => "Successfully retrieved study programs",
                TotalStudyPrograms => "Successfully retrieved total study programs",
                ServiceInfo => "Academic connector is running",
                ApiKeyNotFound => "Api key not found",
                ApiKeyMalformed => "Malformed api key",
                ApiKeyInactive => "Api key is inactive",
                ActiveSemesterNotFound => "Active semester not found",
                RouteNotFound => "Route not found",
                InvalidRequest => "Invalid request parameters",
                DataMismatch => "Inconsistent aggregated data",
                InternalError => "An error occurred on the server",
                DatabaseUnavailable => "Database temporarily unavailable",
            },
            Locale::Id => match message {
                ListSemesters => "Sukses mendapatkan semua data semester",
                ActiveSemester => "Sukses mendapatkan data semester yang aktif",
                ListStudents => "Sukses mendapatkan data mahasiswa",
                TotalStudents => "Sukses mendapatkan total mahasiswa",
                ListLecturers => "Sukses mendapatkan data dosen",
                TotalLecturers => "Sukses mendapatkan total dosen",
                ListClasses => "Sukses mendapatkan data kelas",
                TotalClasses => "Sukses mendapatkan total kelas",
                ListStudentClasses => "Sukses mendapatkan data kelas sederhana",
                TotalStudentClasses => "Sukses mendapatkan total kelas sederhana",
                ListStudentClassDetails => "Sukses mendapatkan data kelas",
                TotalStudentClassDetails => "Sukses mendapatkan total kelas",
                ListRooms => "Sukses mendapatkan data ruangan",
                TotalRooms => "Sukses mendapatkan total ruangan",
                ListStudyPrograms => "Sukses mendapatkan data program studi",
                TotalStudyPrograms => "Sukses mendapatkan total program studi",
                ServiceInfo => "Academic connector berjalan",
                ApiKeyNotFound => "Api key tidak ditemukan",
                ApiKeyMalformed => "Format api key salah",
                ApiKeyInactive => "Api key tidak aktif",
                ActiveSemesterNotFound => "Semester aktif tidak ditemukan",
                RouteNotFound => "Rute tidak ditemukan",
                InvalidRequest => "Parameter permintaan tidak valid",
                DataMismatch => "Data agregasi tidak konsisten",
                InternalError => "Terjadi kesalahan pada server",
                DatabaseUnavailable => "Database sedang tidak tersedia",
            },
        }
    }

    pub fn filter_error(&self, error: &FilterError) -> String {
        match (self.locale, error) {
            (Locale::En, FilterError::InvalidCurrentPage(v)) => {
                format!("current_page must be at least 1, got {}", v)
            }
            (Locale::Id, FilterError::InvalidCurrentPage(v)) => {
                format!("current_page minimal 1, diterima {}", v)
            }
            (Locale::En, FilterError::InvalidPerPage(v)) => {
                format!("per_page must be greater than 0, got {}", v)
            }
            (Locale::Id, FilterError::InvalidPerPage(v)) => {
                format!("per_page harus lebih besar dari 0, diterima {}", v)
            }
            (Locale::En, FilterError::InvalidOrder(v)) => {
                format!("order must be one of [asc desc], got '{}'", v)
            }
            (Locale::Id, FilterError::InvalidOrder(v)) => {
                format!("order harus salah satu dari [asc desc], diterima '{}'", v)
            }
            (Locale::En, FilterError::UnknownSortColumn { column, allowed }) => {
                format!("sort_by must be one of [{}], got '{}'", allowed.join(" "), column)
            }
            (Locale::Id, FilterError::UnknownSortColumn { column, allowed }) => {
                format!("sort_by harus salah satu dari [{}], diterima '{}'", allowed.join(" "), column)
            }
        }
    }

    pub fn pagination_error(&self, error: &PaginationError) -> String {
        match (self.locale, error) {
            (Locale::En, PaginationError::InvalidPerPage(v)) => {
                format!("per_page must be greater than 0, got {}", v)
            }
            (Locale::Id, PaginationError::InvalidPerPage(v)) => {
                format!("per_page harus lebih besar dari 0, diterima {}", v)
            }
            (Locale::En, PaginationError::InvalidCurrentPage(v)) => {
                format!("current_page must be at least 1, got {}", v)
            }
            (Locale::Id, PaginationError::InvalidCurrentPage(v)) => {
                format!("current_page minimal 1, diterima {}", v)
            }
            (Locale::En, PaginationError::NegativeTotal(v)) => {
                format!("total_data cannot be negative, got {}", v)
            }
            (Locale::Id, PaginationError::NegativeTotal(v)) => {
                format!("total_data tidak boleh negatif, diterima {}", v)
            }
        }
    }

    /// Joins every violation into one message, `", "` separated.
    pub fn filter_errors(&self, errors: &[FilterError]) -> String {
        errors.iter().map(|e| self.filter_error(e)).collect::<Vec<_>>().join(", ")
    }

    pub fn invalid_instance_mode(&self, value: &str) -> String {
        match self.locale {
            Locale::En => format!("X-Instance-Mode must be one of [misca smart], got '{}'", value),
            Locale::Id => format!("X-Instance-Mode harus salah satu dari [misca smart], diterima '{}'", value),
        }
    }

    /// Wraps a query-string deserialization failure (e.g. `per_page=abc`).
    pub fn malformed_query(&self, detail: &str) -> String {
        match self.locale {
            Locale::En => format!("invalid query string: {}", detail),
            Locale::Id => format!("query string tidak valid: {}", detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_violations_with_comma() {
        let t = Translator::new(Locale::En);
        let msg = t.filter_errors(&[FilterError::InvalidCurrentPage(0), FilterError::InvalidPerPage(-1)]);
        assert_eq!(msg, "current_page must be at least 1, got 0, per_page must be greater than 0, got -1");
    }

    #[test]
    fn renders_indonesian() {
        let t = Translator::new(Locale::Id);
        assert_eq!(t.message(Message::ApiKeyNotFound), "Api key tidak ditemukan");
        assert_eq!(t.filter_error(&FilterError::InvalidOrder("up".into())), "order harus salah satu dari [asc desc], diterima 'up'");
    }

    #[test]
    fn lists_allowed_sort_columns() {
        let t = Translator::default();
        let msg = t.filter_error(&FilterError::UnknownSortColumn {
            column: "x".into(),
            allowed: vec!["id".into(), "name".into()],
        });
        assert_eq!(msg, "sort_by must be one of [id name], got 'x'");
    }

    #[test]
    fn parses_locale() {
        assert_eq!("ID".parse::<Locale>().unwrap(), Locale::Id);
        assert!("fr".parse::<Locale>().is_err());
    }
}
