//! Project domain model.
//!
//! # Responsibility
//! - Define the bid project record and its classification domains.
//! - Express partial edits as typed update commands instead of record merges.
//!
//! # Invariants
//! - `id` is assigned once by the store and never rewritten by updates.
//! - `deadline` is a calendar date serialized as `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable project identifier.
///
/// Seed projects use short numeric strings; new projects get UUID text.
pub type ProjectId = String;

/// Lifecycle state of a bid project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    /// Bid work is ongoing.
    Active,
    /// Bid is finished, won or lost.
    Closed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 2] = [Self::Active, Self::Closed];

    /// Wire value used in snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "pågående",
            Self::Closed => "avslutat",
        }
    }

    /// Parses either the wire value or the display label, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized || status.label() == normalized)
    }
}

/// Building category of the bid object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingType {
    #[serde(rename = "Bostäder")]
    Residential,
    #[serde(rename = "Kommersiellt")]
    Commercial,
    #[serde(rename = "Samhällsservice")]
    PublicServices,
    #[serde(rename = "Logistik")]
    Logistics,
    #[serde(rename = "Industri")]
    Industrial,
}

impl BuildingType {
    pub const ALL: [BuildingType; 5] = [
        Self::Residential,
        Self::Commercial,
        Self::PublicServices,
        Self::Logistics,
        Self::Industrial,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Residential => "Bostäder",
            Self::Commercial => "Kommersiellt",
            Self::PublicServices => "Samhällsservice",
            Self::Logistics => "Logistik",
            Self::Industrial => "Industri",
        }
    }
}

/// Contract form offered in the bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractingType {
    #[serde(rename = "Totalentreprenad")]
    DesignAndBuild,
    #[serde(rename = "Utförandeentreprenad")]
    BuildOnly,
    #[serde(rename = "Samverkansentreprenad")]
    Partnering,
}

impl ContractingType {
    pub const ALL: [ContractingType; 3] = [Self::DesignAndBuild, Self::BuildOnly, Self::Partnering];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DesignAndBuild => "Totalentreprenad",
            Self::BuildOnly => "Utförandeentreprenad",
            Self::Partnering => "Samverkansentreprenad",
        }
    }
}

/// Environmental certification targeted by the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvironmentalCertification {
    #[serde(rename = "Miljöbyggnad")]
    Miljobyggnad,
    #[serde(rename = "BREEAM")]
    Breeam,
    #[serde(rename = "LEED")]
    Leed,
    #[serde(rename = "Svanen")]
    Svanen,
    #[serde(rename = "Ingen")]
    Uncertified,
}

impl EnvironmentalCertification {
    pub const ALL: [EnvironmentalCertification; 5] = [
        Self::Miljobyggnad,
        Self::Breeam,
        Self::Leed,
        Self::Svanen,
        Self::Uncertified,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Miljobyggnad => "Miljöbyggnad",
            Self::Breeam => "BREEAM",
            Self::Leed => "LEED",
            Self::Svanen => "Svanen",
            Self::Uncertified => "Ingen",
        }
    }
}

/// Canonical bid project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub status: ProjectStatus,
    /// Image reference shown on project cards.
    pub thumbnail: String,
    pub city: String,
    pub region: String,
    pub building_type: BuildingType,
    pub contracting_type: ContractingType,
    /// Free-text name of the responsible manager.
    pub manager: String,
    pub environmental_certification: EnvironmentalCertification,
    pub deadline: NaiveDate,
}

/// Project payload before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub status: ProjectStatus,
    pub thumbnail: String,
    pub city: String,
    pub region: String,
    pub building_type: BuildingType,
    pub contracting_type: ContractingType,
    pub manager: String,
    pub environmental_certification: EnvironmentalCertification,
    pub deadline: NaiveDate,
}

impl NewProject {
    /// Binds the payload to a store-assigned id.
    pub fn into_project(self, id: ProjectId) -> Project {
        Project {
            id,
            name: self.name,
            status: self.status,
            thumbnail: self.thumbnail,
            city: self.city,
            region: self.region,
            building_type: self.building_type,
            contracting_type: self.contracting_type,
            manager: self.manager,
            environmental_certification: self.environmental_certification,
            deadline: self.deadline,
        }
    }

    /// Expands a full edit form into one update command per field group.
    pub fn into_updates(self) -> Vec<ProjectUpdate> {
        vec![
            ProjectUpdate::Identity {
                name: self.name,
                thumbnail: self.thumbnail,
                manager: self.manager,
            },
            ProjectUpdate::Location {
                city: self.city,
                region: self.region,
            },
            ProjectUpdate::Classification {
                building_type: self.building_type,
                contracting_type: self.contracting_type,
                environmental_certification: self.environmental_certification,
            },
            ProjectUpdate::Schedule {
                deadline: self.deadline,
            },
            ProjectUpdate::Status(self.status),
        ]
    }
}

/// Typed edit command, one variant per mutable field group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectUpdate {
    Identity {
        name: String,
        thumbnail: String,
        manager: String,
    },
    Location {
        city: String,
        region: String,
    },
    Classification {
        building_type: BuildingType,
        contracting_type: ContractingType,
        environmental_certification: EnvironmentalCertification,
    },
    Schedule {
        deadline: NaiveDate,
    },
    Status(ProjectStatus),
}

impl Project {
    /// Applies one update command in place.
    ///
    /// # Invariants
    /// - `id` is never touched.
    pub fn apply(&mut self, update: &ProjectUpdate) {
        match update {
            ProjectUpdate::Identity {
                name,
                thumbnail,
                manager,
            } => {
                self.name = name.clone();
                self.thumbnail = thumbnail.clone();
                self.manager = manager.clone();
            }
            ProjectUpdate::Location { city, region } => {
                self.city = city.clone();
                self.region = region.clone();
            }
            ProjectUpdate::Classification {
                building_type,
                contracting_type,
                environmental_certification,
            } => {
                self.building_type = *building_type;
                self.contracting_type = *contracting_type;
                self.environmental_certification = *environmental_certification;
            }
            ProjectUpdate::Schedule { deadline } => self.deadline = *deadline,
            ProjectUpdate::Status(status) => self.status = *status,
        }
    }

    /// Case-insensitive name match; an empty needle matches everything.
    pub fn name_contains(&self, needle: &str) -> bool {
        needle.is_empty() || self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        NewProject {
            name: "Göteborgs Sjukhus".to_string(),
            status: ProjectStatus::Active,
            thumbnail: "thumb.jpg".to_string(),
            city: "Göteborg".to_string(),
            region: "Västra Götaland".to_string(),
            building_type: BuildingType::PublicServices,
            contracting_type: ContractingType::BuildOnly,
            manager: "Maria Bergström".to_string(),
            environmental_certification: EnvironmentalCertification::Leed,
            deadline: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        }
        .into_project("3".to_string())
    }

    #[test]
    fn status_parse_accepts_wire_value_and_label() {
        assert_eq!(ProjectStatus::parse("closed"), Some(ProjectStatus::Closed));
        assert_eq!(ProjectStatus::parse(" Pågående "), Some(ProjectStatus::Active));
        assert_eq!(ProjectStatus::parse("archived"), None);
    }

    #[test]
    fn name_contains_ignores_case() {
        let project = sample();
        assert!(project.name_contains("sjukhus"));
        assert!(project.name_contains("GÖTEBORGS"));
        assert!(project.name_contains(""));
        assert!(!project.name_contains("malmö"));
    }

    #[test]
    fn apply_keeps_id_and_only_touches_its_group() {
        let mut project = sample();
        project.apply(&ProjectUpdate::Location {
            city: "Mölndal".to_string(),
            region: "Västra Götaland".to_string(),
        });
        assert_eq!(project.id, "3");
        assert_eq!(project.city, "Mölndal");
        assert_eq!(project.name, "Göteborgs Sjukhus");
    }

    #[test]
    fn wire_format_uses_camel_case_and_swedish_categories() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["buildingType"], "Samhällsservice");
        assert_eq!(json["contractingType"], "Utförandeentreprenad");
        assert_eq!(json["environmentalCertification"], "LEED");
        assert_eq!(json["status"], "active");
        assert_eq!(json["deadline"], "2026-01-15");
    }
}
