//! Lecture, section, and schedule records.
//!
//! Field names serialize to the keys used by the lecture dataset (`codigo`,
//! `nome`, `turmas`, `horario`, ...), so a dataset file deserializes directly
//! into these types. Metadata fields are optional on input and default to
//! empty values.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};
use crate::time::{ClockTime, Weekday};

/// A single weekly slot of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(rename = "dia")]
    pub day: Weekday,
    #[serde(rename = "inicio")]
    pub start: ClockTime,
    #[serde(rename = "fim")]
    pub end: ClockTime,
    #[serde(rename = "professores", default)]
    pub instructors: Vec<String>,
}

impl Schedule {
    pub fn new(day: Weekday, start: ClockTime, end: ClockTime) -> Self {
        Self {
            day,
            start,
            end,
            instructors: Vec::new(),
        }
    }

    /// Day, start, and end. Instructors are ignored.
    pub fn slot(&self) -> (Weekday, ClockTime, ClockTime) {
        (self.day, self.start, self.end)
    }
}

/// Seat counts for one enrollment category of a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacancy {
    #[serde(rename = "vagas", default)]
    pub seats: u32,
    #[serde(rename = "inscritos", default)]
    pub applicants: u32,
    #[serde(rename = "pendentes", default)]
    pub pending: u32,
    #[serde(rename = "matriculados", default)]
    pub enrolled: u32,
    /// Per-group breakdown inside the category.
    #[serde(rename = "grupos", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub groups: BTreeMap<String, Vacancy>,
}

/// One enrollable instance (turma) of a lecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "codigo")]
    pub code: String,
    /// Code of the theory section this one is attached to, if any.
    #[serde(rename = "codigo_teorica", default, skip_serializing_if = "Option::is_none")]
    pub theory_code: Option<String>,
    #[serde(rename = "tipo", default)]
    pub kind: String,
    /// First day of validity, `DD/MM/YYYY`.
    #[serde(rename = "inicio", default)]
    pub start_date: String,
    /// Last day of validity, `DD/MM/YYYY`.
    #[serde(rename = "fim", default)]
    pub end_date: String,
    #[serde(rename = "observacoes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "horario", default)]
    pub schedules: Vec<Schedule>,
    #[serde(rename = "vagas", default)]
    pub vacancies: BTreeMap<String, Vacancy>,
}

impl Section {
    pub fn new(code: impl Into<String>, schedules: Vec<Schedule>) -> Self {
        Self {
            code: code.into(),
            theory_code: None,
            kind: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            notes: None,
            schedules,
            vacancies: BTreeMap::new(),
        }
    }

    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }

    /// Both ends of the validity range are present.
    pub fn has_date_range(&self) -> bool {
        !self.start_date.trim().is_empty() && !self.end_date.trim().is_empty()
    }
}

/// A course offering with its sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "unidade", default)]
    pub unit: String,
    #[serde(rename = "departamento", default)]
    pub department: String,
    #[serde(default)]
    pub campus: String,
    #[serde(rename = "creditos_aula", default)]
    pub class_credits: u32,
    #[serde(rename = "creditos_trabalho", default)]
    pub work_credits: u32,
    #[serde(rename = "turmas", default)]
    pub sections: Vec<Section>,
}

impl Lecture {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            unit: String::new(),
            department: String::new(),
            campus: String::new(),
            class_credits: 0,
            work_credits: 0,
            sections: Vec::new(),
        }
    }

    pub fn with_credits(mut self, class_credits: u32, work_credits: u32) -> Self {
        self.class_credits = class_credits;
        self.work_credits = work_credits;
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn section(&self, code: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.code == code)
    }
}

/// Number of color tags a lecture can carry.
pub const COLOR_COUNT: u8 = 8;

/// Display color tag of a lecture in a plan, `0..COLOR_COUNT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Color(u8);

impl Color {
    pub fn new(index: u8) -> Result<Self> {
        if index < COLOR_COUNT {
            Ok(Self(index))
        } else {
            Err(TimetableError::InvalidColor(index))
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Colors in index order.
    pub fn all() -> impl Iterator<Item = Color> {
        (0..COLOR_COUNT).map(Color)
    }
}

impl TryFrom<u8> for Color {
    type Error = TimetableError;

    fn try_from(index: u8) -> Result<Self> {
        Self::new(index)
    }
}

impl From<Color> for u8 {
    fn from(c: Color) -> Self {
        c.0
    }
}

/// User-owned selection of one lecture inside a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    #[serde(default = "default_selected")]
    pub selected: bool,
    #[serde(default)]
    pub color: Color,
    /// Section codes explicitly chosen. Empty means every section is considered.
    #[serde(rename = "turmas", default)]
    pub sections: BTreeSet<String>,
}

fn default_selected() -> bool {
    true
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected: true,
            color: Color::default(),
            sections: BTreeSet::new(),
        }
    }
}

impl SelectionState {
    /// Whether `section_code` takes part in grouping and combination.
    pub fn considers(&self, section_code: &str) -> bool {
        self.sections.is_empty() || self.sections.contains(section_code)
    }
}
