/// Demo data
///
/// Provisions two Managers, three Team Members, three projects and six tasks.
/// Seeding is skipped when any user already exists, so running it twice is
/// harmless.

use chrono::NaiveDate;
use tracing::info;

use crate::models::{
    project::NewProject,
    task::{NewTask, TaskStatus},
    user::{NewUser, Role},
    ProjectId, UserId,
};
use crate::store::{EntityStore, StoreResult};

/// Password given to every demo account
pub const DEMO_PASSWORD: &str = "password123";

/// What a seeding run inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub projects: usize,
    pub tasks: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.users == 0 && self.projects == 0 && self.tasks == 0
    }
}

const USERS: [(&str, &str, Role, &str); 5] = [
    ("manager1", "Alice Johnson", Role::Manager, "alice.johnson@example.com"),
    ("manager2", "Robert Brown", Role::Manager, "robert.brown@example.com"),
    ("team_member1", "John Doe", Role::TeamMember, "john.doe@example.com"),
    ("team_member2", "Emma Smith", Role::TeamMember, "emma.smith@example.com"),
    ("team_member3", "James White", Role::TeamMember, "james.white@example.com"),
];

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Inserts the demo data into an empty store
pub async fn seed_demo_data(store: &dyn EntityStore) -> StoreResult<SeedReport> {
    if store.count_users().await? > 0 {
        info!("Store already has users, skipping seed");
        return Ok(SeedReport::default());
    }

    let mut report = SeedReport::default();

    let mut user_ids: Vec<UserId> = Vec::with_capacity(USERS.len());
    for (username, name, role, email) in USERS {
        let id = store
            .insert_user(NewUser {
                username: username.to_string(),
                password: DEMO_PASSWORD.to_string(),
                name: name.to_string(),
                role,
                email: email.to_string(),
            })
            .await?;
        user_ids.push(id);
        report.users += 1;
    }
    let member = |n: usize| Some(user_ids[n + 1]);

    let projects = [
        (
            "Website Redesign",
            "Redesign the company website for a modern look",
            date(2024, 10, 1),
            date(2025, 1, 31),
        ),
        (
            "Marketing Campaign",
            "Plan and execute a digital marketing campaign",
            date(2024, 11, 1),
            date(2025, 2, 28),
        ),
        (
            "Mobile App Development",
            "Develop a new mobile application for customer engagement",
            date(2024, 10, 15),
            date(2025, 4, 15),
        ),
    ];

    let mut project_ids: Vec<ProjectId> = Vec::with_capacity(projects.len());
    for (project_name, description, start_date, end_date) in projects {
        let id = store
            .insert_project(NewProject {
                project_name: project_name.to_string(),
                description: description.to_string(),
                start_date,
                end_date,
                status: Some("In Progress".to_string()),
            })
            .await?;
        project_ids.push(id);
        report.projects += 1;
    }

    let tasks = [
        (
            project_ids[0],
            "Create Wireframes",
            "Design wireframes for the new website layout",
            date(2024, 11, 10),
            TaskStatus::NotStarted,
            member(1),
        ),
        (
            project_ids[0],
            "Develop Frontend",
            "Implement frontend for the redesigned website",
            date(2024, 12, 20),
            TaskStatus::NotStarted,
            member(2),
        ),
        (
            project_ids[1],
            "Create Marketing Content",
            "Develop blog posts and social media content",
            date(2024, 11, 15),
            TaskStatus::InProgress,
            member(3),
        ),
        (
            project_ids[1],
            "Social Media Ads",
            "Run Facebook and Instagram ads",
            date(2024, 12, 5),
            TaskStatus::NotStarted,
            None,
        ),
        (
            project_ids[2],
            "Design App UI",
            "Create user interface for the mobile app",
            date(2024, 11, 30),
            TaskStatus::InProgress,
            member(2),
        ),
        (
            project_ids[2],
            "API Development",
            "Develop backend APIs for mobile app",
            date(2025, 1, 15),
            TaskStatus::NotStarted,
            None,
        ),
    ];

    for (project_id, task_name, description, due_date, status, assigned_user_id) in tasks {
        store
            .insert_task(NewTask {
                project_id,
                task_name: task_name.to_string(),
                description: description.to_string(),
                due_date,
                status,
                assigned_user_id,
            })
            .await?;
        report.tasks += 1;
    }

    info!(
        users = report.users,
        projects = report.projects,
        tasks = report.tasks,
        "Demo data seeded"
    );
    Ok(report)
}
