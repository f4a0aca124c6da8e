//! Static course corpora used across harnesses.
//!
//! The sample catalog is small but deliberately covers every edge the
//! harnesses exercise: multi-word titles that differ only in token order,
//! punctuation-heavy titles, a non-numeric course number, an empty level
//! (a NULL in the source view), and descriptions with commas and quotes.

use bulletin_core::CourseRow;
use std::path::Path;

/// (subject, number, title, college, level, modality, description)
type Fixture = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

pub const SAMPLE_COURSES: &[Fixture] = &[
    (
        "CS", "2110", "Object-Oriented Programming and Data Structures",
        "Engineering", "UG", "In Person",
        "Intermediate programming in a high-level language, including recursion and data structures.",
    ),
    (
        "CS", "3780", "Introduction to Machine Learning",
        "Engineering", "UG", "In Person",
        "Supervised learning, nearest neighbors, decision trees, and perceptrons.",
    ),
    (
        "CS", "4780", "Machine Learning for Intelligent Systems",
        "Engineering", "UG", "Hybrid",
        "Core techniques of machine learning: regression, kernels, deep learning basics.",
    ),
    (
        "CS", "6780", "Advanced Machine Learning",
        "Engineering", "GR", "In Person",
        "Graduate seminar: generalization theory, deep learning, reinforcement learning.",
    ),
    (
        "CS", "6998", "Deep Learning Systems Seminar",
        "Engineering", "GR", "Online",
        "Systems for training, and serving, \"large\" models.",
    ),
    (
        "INFO", "2450", "Communication and Technology",
        "Computing and Information Science", "UG", "In Person",
        "How communication shapes, and is shaped by, technology. Learning deep questions of design.",
    ),
    (
        "PHIL", "1100", "Introduction to Logic",
        "Arts and Sciences", "UG", "In Person",
        "Propositional and first-order logic, formal proofs.",
    ),
    (
        "PHIL", "4725", "Philosophy of Artificial Intelligence",
        "Arts and Sciences", "UG", "In Person",
        "Can machines think? Minds, machine learning, and meaning.",
    ),
    (
        "LAW", "6471", "Machine Learning and the Law",
        "Law School", "LAW", "In Person",
        "Regulation of automated decision-making; liability, and due process.",
    ),
    (
        "MATH", "4710", "Basic Probability",
        "Arts and Sciences", "UG", "In Person",
        "Probability spaces, random variables, limit theorems.",
    ),
    (
        "HIST", "481W", "History Writing Workshop",
        "Arts and Sciences", "UG", "In Person",
        "Writing-intensive seminar. Course number carries a letter suffix in the registrar feed.",
    ),
    (
        "MUSIC", "1000", "Sound Design",
        "Arts and Sciences", "", "Online",
        "Career label missing in the source view for this row.",
    ),
];

/// Build the sample catalog rows.
pub fn sample_rows() -> Vec<CourseRow> {
    SAMPLE_COURSES
        .iter()
        .map(
            |&(subject, number, title, college, level, modality, description)| CourseRow {
                subject: subject.to_string(),
                number: number.to_string(),
                title: title.to_string(),
                college: college.to_string(),
                level: level.to_string(),
                modality: (!modality.is_empty()).then(|| modality.to_string()),
                description: description.to_string(),
            },
        )
        .collect()
}

// ---------------------------------------------------------------------------
// Fixture file generation helpers
// ---------------------------------------------------------------------------

/// Write the sample catalog as a CSV file with the view's column headers.
pub fn write_csv_fixture(path: &Path) -> std::io::Result<()> {
    let mut out = String::from(
        "subject_code,course_number,title,college,career_label,modality,description\n",
    );
    for &(subject, number, title, college, level, modality, description) in SAMPLE_COURSES {
        for (i, field) in [subject, number, title, college, level, modality, description]
            .iter()
            .enumerate()
        {
            if i > 0 {
                out.push(',');
            }
            // Quote any field containing CSV metacharacters
            if field.contains(',') || field.contains('"') || field.contains('\n') {
                out.push('"');
                out.push_str(&field.replace('"', "\"\""));
                out.push('"');
            } else {
                out.push_str(field);
            }
        }
        out.push('\n');
    }
    std::fs::write(path, out)
}

/// Write the sample catalog as JSON Lines with the view's column names.
pub fn write_jsonl_fixture(path: &Path) -> std::io::Result<()> {
    let mut out = String::new();
    for &(subject, number, title, college, level, modality, description) in SAMPLE_COURSES {
        let modality = (!modality.is_empty()).then_some(modality);
        let value = serde_json::json!({
            "subject_code": subject,
            "course_number": number,
            "title": title,
            "college": college,
            "career_label": level,
            "modality": modality,
            "description": description,
        });
        out.push_str(&value.to_string());
        out.push('\n');
    }
    std::fs::write(path, out)
}
