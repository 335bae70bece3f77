//! Built-in demo catalog: projects, their task boards and the team roster.

use crate::model::discussion::{BlogComment, BlogPost};
use crate::model::project::{
    BuildingType, ContractingType, EnvironmentalCertification, Project, ProjectStatus,
};
use crate::model::task::{Stage, TaskMap, TaskStatus};
use crate::model::team::TeamMember;
use crate::seed::templates::tasks_for_stage;
use chrono::{DateTime, Duration, NaiveDate, Utc};

struct ProjectRow {
    id: &'static str,
    name: &'static str,
    status: ProjectStatus,
    thumbnail: &'static str,
    city: &'static str,
    region: &'static str,
    building_type: BuildingType,
    contracting_type: ContractingType,
    manager: &'static str,
    certification: EnvironmentalCertification,
    deadline: (i32, u32, u32),
    /// Status of each stage's template tasks, in pipeline order.
    stage_statuses: [TaskStatus; 9],
}

const TODO: TaskStatus = TaskStatus::Todo;
const WIP: TaskStatus = TaskStatus::InProgress;
const DONE: TaskStatus = TaskStatus::Done;

const PROJECTS: &[ProjectRow] = &[
    ProjectRow {
        id: "1",
        name: "Norra Djurgårdsstaden",
        status: ProjectStatus::Active,
        thumbnail: "https://images.unsplash.com/photo-1503387762-592deb58ef4e?q=80&w=1664&auto=format&fit=crop",
        city: "Stockholm",
        region: "Stockholm",
        building_type: BuildingType::Residential,
        contracting_type: ContractingType::DesignAndBuild,
        manager: "Anna Lundberg",
        certification: EnvironmentalCertification::Miljobyggnad,
        deadline: (2024, 12, 31),
        stage_statuses: [TODO; 9],
    },
    ProjectRow {
        id: "2",
        name: "Logistik Arlanda",
        status: ProjectStatus::Active,
        thumbnail: "https://images.unsplash.com/photo-1586528116311-ad8dd3c8310d?q=80&w=1470&auto=format&fit=crop",
        city: "Sigtuna",
        region: "Stockholm",
        building_type: BuildingType::Logistics,
        contracting_type: ContractingType::Partnering,
        manager: "Erik Johansson",
        certification: EnvironmentalCertification::Breeam,
        deadline: (2025, 6, 30),
        stage_statuses: [TODO, TODO, TODO, TODO, WIP, TODO, TODO, TODO, TODO],
    },
    ProjectRow {
        id: "3",
        name: "Göteborgs Sjukhus",
        status: ProjectStatus::Active,
        thumbnail: "https://images.unsplash.com/photo-1629195636404-56f0555dc301?q=80&w=1664&auto=format&fit=crop",
        city: "Göteborg",
        region: "Västra Götaland",
        building_type: BuildingType::PublicServices,
        contracting_type: ContractingType::BuildOnly,
        manager: "Maria Bergström",
        certification: EnvironmentalCertification::Leed,
        deadline: (2026, 1, 15),
        stage_statuses: [DONE, DONE, WIP, TODO, TODO, TODO, TODO, TODO, TODO],
    },
    ProjectRow {
        id: "4",
        name: "Kontorskomplex Malmö",
        status: ProjectStatus::Closed,
        thumbnail: "https://images.unsplash.com/photo-1497366754035-f200968a6e72?q=80&w=1469&auto=format&fit=crop",
        city: "Malmö",
        region: "Skåne",
        building_type: BuildingType::Commercial,
        contracting_type: ContractingType::DesignAndBuild,
        manager: "Johan Nilsson",
        certification: EnvironmentalCertification::Svanen,
        deadline: (2023, 8, 30),
        stage_statuses: [DONE; 9],
    },
    ProjectRow {
        id: "5",
        name: "Industri Östersund",
        status: ProjectStatus::Closed,
        thumbnail: "https://images.unsplash.com/photo-1581091226033-d5c48150dbaa?q=80&w=1470&auto=format&fit=crop",
        city: "Östersund",
        region: "Jämtland",
        building_type: BuildingType::Industrial,
        contracting_type: ContractingType::Partnering,
        manager: "Lisa Andersson",
        certification: EnvironmentalCertification::Uncertified,
        deadline: (2023, 11, 15),
        stage_statuses: [DONE; 9],
    },
];

const TEAM: &[(&str, &str, &str, &str)] = &[
    ("1", "Anna Lundberg", "Project Manager", "https://randomuser.me/api/portraits/women/1.jpg"),
    ("2", "Erik Johansson", "Site Manager", "https://randomuser.me/api/portraits/men/2.jpg"),
    ("3", "Maria Bergström", "Project Engineer", "https://randomuser.me/api/portraits/women/3.jpg"),
    ("4", "Johan Nilsson", "Construction Manager", "https://randomuser.me/api/portraits/men/4.jpg"),
    ("5", "Lisa Andersson", "Financial Analyst", "https://randomuser.me/api/portraits/women/5.jpg"),
];

pub fn projects() -> Vec<Project> {
    PROJECTS
        .iter()
        .filter_map(|row| {
            let (year, month, day) = row.deadline;
            Some(Project {
                id: row.id.to_string(),
                name: row.name.to_string(),
                status: row.status,
                thumbnail: row.thumbnail.to_string(),
                city: row.city.to_string(),
                region: row.region.to_string(),
                building_type: row.building_type,
                contracting_type: row.contracting_type,
                manager: row.manager.to_string(),
                environmental_certification: row.certification,
                deadline: NaiveDate::from_ymd_opt(year, month, day)?,
            })
        })
        .collect()
}

pub fn tasks() -> TaskMap {
    PROJECTS
        .iter()
        .map(|row| {
            let tasks: Vec<_> = Stage::ALL
                .into_iter()
                .zip(row.stage_statuses)
                .flat_map(|(stage, status)| tasks_for_stage(stage, status))
                .collect();
            (row.id.to_string(), tasks)
        })
        .collect()
}

pub fn team_members() -> Vec<TeamMember> {
    TEAM.iter()
        .map(|(id, name, role, avatar)| TeamMember {
            id: id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            avatar: avatar.to_string(),
        })
        .collect()
}

/// Two starter posts for a project thread, dated relative to `now`.
pub fn starter_posts(project_id: &str, now: DateTime<Utc>) -> Vec<BlogPost> {
    vec![
        BlogPost {
            id: "1".to_string(),
            project_id: project_id.to_string(),
            author: "Anders Johansson".to_string(),
            author_avatar: Some("https://i.pravatar.cc/150?img=68".to_string()),
            content: "Vi har fått in bygglovsansökan godkänd för etapp 2. Dokumenten finns nu tillgängliga i projektmappen.".to_string(),
            timestamp: now - Duration::days(3),
            likes: vec!["user3".to_string(), "user4".to_string()],
            comments: vec![BlogComment {
                id: "c1".to_string(),
                post_id: "1".to_string(),
                author: "Maria Lindberg".to_string(),
                author_avatar: Some("https://i.pravatar.cc/150?img=47".to_string()),
                content: "Tack för uppdateringen! Ska gå igenom dokumenten idag.".to_string(),
                timestamp: now - Duration::days(2),
                likes: vec!["user1".to_string()],
            }],
        },
        BlogPost {
            id: "2".to_string(),
            project_id: project_id.to_string(),
            author: "Emma Svensson".to_string(),
            author_avatar: Some("https://i.pravatar.cc/150?img=24".to_string()),
            content: "Ny kostnadsberäkning för ventilationssystemet behöver gås igenom på nästa projektmöte.".to_string(),
            timestamp: now - Duration::days(1),
            likes: Vec::new(),
            comments: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::templates::template_count;

    #[test]
    fn every_row_has_a_valid_deadline() {
        assert_eq!(projects().len(), PROJECTS.len());
    }

    #[test]
    fn arlanda_bid_council_is_in_progress() {
        let tasks = tasks();
        let arlanda = &tasks["2"];
        assert_eq!(arlanda.len(), template_count());
        let council: Vec<_> = arlanda
            .iter()
            .filter(|task| task.stage == Stage::BidCouncil)
            .collect();
        assert!(council.iter().all(|task| task.status == TaskStatus::InProgress));
    }

    #[test]
    fn closed_projects_are_fully_done() {
        let tasks = tasks();
        for id in ["4", "5"] {
            assert!(tasks[id].iter().all(|task| task.status == TaskStatus::Done));
        }
    }
}
