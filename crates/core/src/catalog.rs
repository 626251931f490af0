//! Static catalog of subjects and revision types.
//!
//! Both lists are closed enumerations. The `id` strings are part of the wire
//! format and are stored verbatim on saved revisions, so they must never be
//! renamed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Subjects
// ---------------------------------------------------------------------------

/// A school subject covered by the exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subject {
    Maths,
    Francais,
    HistoireGeo,
    Emc,
    Svt,
    PhysiqueChimie,
    Anglais,
    Espagnol,
    Musique,
    ArtsPlastiques,
}

impl Subject {
    /// Every subject, in display order.
    pub const ALL: [Subject; 10] = [
        Subject::Maths,
        Subject::Francais,
        Subject::HistoireGeo,
        Subject::Emc,
        Subject::Svt,
        Subject::PhysiqueChimie,
        Subject::Anglais,
        Subject::Espagnol,
        Subject::Musique,
        Subject::ArtsPlastiques,
    ];

    /// `(id, display name, icon)` mapping table.
    const fn info(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Subject::Maths => ("maths", "Mathématiques", "calculator"),
            Subject::Francais => ("francais", "Français", "book-open"),
            Subject::HistoireGeo => ("histoire-geo", "Histoire-Géographie", "globe"),
            Subject::Emc => ("emc", "EMC", "users"),
            Subject::Svt => ("svt", "SVT", "leaf"),
            Subject::PhysiqueChimie => ("physique-chimie", "Physique-Chimie", "flask-conical"),
            Subject::Anglais => ("anglais", "Anglais", "languages"),
            Subject::Espagnol => ("espagnol", "Espagnol", "languages"),
            Subject::Musique => ("musique", "Musique", "music"),
            Subject::ArtsPlastiques => ("arts-plastiques", "Arts Plastiques", "palette"),
        }
    }

    pub const fn id(self) -> &'static str {
        self.info().0
    }

    pub const fn name(self) -> &'static str {
        self.info().1
    }

    pub const fn icon(self) -> &'static str {
        self.info().2
    }
}

impl FromStr for Subject {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subject::ALL
            .into_iter()
            .find(|subject| subject.id() == s)
            .ok_or_else(|| CoreError::InvalidRequest(format!("Unknown subject '{s}'")))
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ---------------------------------------------------------------------------
// Revision types
// ---------------------------------------------------------------------------

/// The shape of study material to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevisionType {
    #[serde(rename = "fiche")]
    StudySheet,
    #[serde(rename = "qcm")]
    Quiz,
    #[serde(rename = "flashcard")]
    Flashcards,
    #[serde(rename = "resume")]
    Summary,
    #[serde(rename = "trous")]
    FillInTheBlank,
}

impl RevisionType {
    /// Every revision type, in display order.
    pub const ALL: [RevisionType; 5] = [
        RevisionType::StudySheet,
        RevisionType::Quiz,
        RevisionType::Flashcards,
        RevisionType::Summary,
        RevisionType::FillInTheBlank,
    ];

    /// `(id, display name, description, icon)` mapping table.
    const fn info(self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            RevisionType::StudySheet => (
                "fiche",
                "Fiche de révision",
                "Résumé structuré des notions clés",
                "file-text",
            ),
            RevisionType::Quiz => (
                "qcm",
                "QCM",
                "Questions à choix multiples pour s'entraîner",
                "list-checks",
            ),
            RevisionType::Flashcards => (
                "flashcard",
                "Flashcards",
                "Cartes recto-verso pour mémoriser",
                "layers",
            ),
            RevisionType::Summary => (
                "resume",
                "Résumé",
                "Synthèse courte et efficace",
                "align-left",
            ),
            RevisionType::FillInTheBlank => (
                "trous",
                "Texte à trous",
                "Exercice de complétion",
                "pencil",
            ),
        }
    }

    pub const fn id(self) -> &'static str {
        self.info().0
    }

    pub const fn name(self) -> &'static str {
        self.info().1
    }

    pub const fn description(self) -> &'static str {
        self.info().2
    }

    pub const fn icon(self) -> &'static str {
        self.info().3
    }
}

impl FromStr for RevisionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RevisionType::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| CoreError::InvalidRequest(format!("Unknown revision type '{s}'")))
    }
}

impl fmt::Display for RevisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ---------------------------------------------------------------------------
// Serializable catalog entries
// ---------------------------------------------------------------------------

/// A subject as exposed by `GET /api/subjects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// A revision type as exposed by `GET /api/revision-types`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionTypeEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// All subjects as catalog entries, in display order.
pub fn subjects() -> Vec<SubjectEntry> {
    Subject::ALL
        .into_iter()
        .map(|s| SubjectEntry {
            id: s.id(),
            name: s.name(),
            icon: s.icon(),
        })
        .collect()
}

/// All revision types as catalog entries, in display order.
pub fn revision_types() -> Vec<RevisionTypeEntry> {
    RevisionType::ALL
        .into_iter()
        .map(|t| RevisionTypeEntry {
            id: t.id(),
            name: t.name(),
            description: t.description(),
            icon: t.icon(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn subject_ids_are_unique_and_round_trip() {
        let ids: HashSet<_> = Subject::ALL.iter().map(|s| s.id()).collect();
        assert_eq!(ids.len(), Subject::ALL.len());

        for subject in Subject::ALL {
            assert_eq!(subject.id().parse::<Subject>().unwrap(), subject);
        }
    }

    #[test]
    fn revision_type_ids_are_unique_and_round_trip() {
        let ids: HashSet<_> = RevisionType::ALL.iter().map(|t| t.id()).collect();
        assert_eq!(ids.len(), RevisionType::ALL.len());

        for kind in RevisionType::ALL {
            assert_eq!(kind.id().parse::<RevisionType>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_ids_are_invalid_requests() {
        assert_matches!("chimie".parse::<Subject>(), Err(CoreError::InvalidRequest(_)));
        assert_matches!("essay".parse::<RevisionType>(), Err(CoreError::InvalidRequest(_)));
        // Ids are case-sensitive.
        assert!("Maths".parse::<Subject>().is_err());
    }

    #[test]
    fn serde_names_match_catalog_ids() {
        for subject in Subject::ALL {
            let json = serde_json::to_value(subject).unwrap();
            assert_eq!(json, subject.id());
        }
        for kind in RevisionType::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.id());
        }
    }

    #[test]
    fn catalog_entries_follow_display_order() {
        let subjects = subjects();
        assert_eq!(subjects.len(), 10);
        assert_eq!(subjects[0].id, "maths");
        assert_eq!(subjects[0].icon, "calculator");
        assert_eq!(subjects[9].id, "arts-plastiques");

        let types = revision_types();
        assert_eq!(types.len(), 5);
        assert_eq!(types[0].id, "fiche");
        assert_eq!(types[1].name, "QCM");
    }
}
