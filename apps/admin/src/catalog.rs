//! Fixed catalog values shared by the admin screens.

/// Subjects content is partitioned by; also the login identities.
pub const SUBJECTS: [&str; 9] = [
    "Math",
    "Physics",
    "Chemistry",
    "Biology",
    "History",
    "Geography",
    "Literature",
    "SAT",
    "Economics",
];

pub const GRADES: [&str; 4] = ["Grade 9", "Grade 10", "Grade 11", "Grade 12"];

/// Longest note body, in characters.
pub const MAX_NOTE_LENGTH: usize = 5000;

/// Character limit of the bulk editors.
pub const BULK_EDITOR_LIMIT: usize = MAX_NOTE_LENGTH * 5;

/// Option count bounds on the single-question form (`a` through `e`).
pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 5;

const UNIT_COUNT: u32 = 9;

/// Display names `Unit 1` through `Unit 9`.
pub fn units() -> Vec<String> {
    (1..=UNIT_COUNT).map(|n| format!("Unit {}", n)).collect()
}

pub fn is_subject(name: &str) -> bool {
    SUBJECTS.contains(&name)
}

pub fn is_grade(name: &str) -> bool {
    GRADES.contains(&name)
}

/// First run of digits in a unit label (`Unit 3` -> `3`).
fn unit_number(unit: &str) -> Option<&str> {
    let start = unit.find(|c: char| c.is_ascii_digit())?;
    let rest = &unit[start..];
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Whether a stored unit value matches a unit filter.
///
/// Units were entered inconsistently, so `Unit 3` also matches `u3` and
/// `unit3` in any case.
pub fn unit_matches(filter: &str, stored: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    if stored == filter {
        return true;
    }
    match unit_number(filter) {
        Some(number) => {
            stored.eq_ignore_ascii_case(&format!("u{}", number))
                || stored.eq_ignore_ascii_case(&format!("unit{}", number))
        }
        None => false,
    }
}
