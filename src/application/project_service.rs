use crate::domain::error::DomainError;
use crate::domain::project::{
    CreateProject, Project, UpdateProject, position_to_index, remove_project,
};
use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Project CRUD on the ordered project list of one signed-in user.
///
/// Positions are 1-based, matching the numbering shown to the user.
pub struct ProjectService<R: UserRepository> {
    user_repository: Arc<R>,
}

impl<R: UserRepository> ProjectService<R> {
    pub fn new(user_repository: Arc<R>) -> Self {
        Self { user_repository }
    }

    fn get_user(&self, email: &str) -> Result<User> {
        self.user_repository
            .find_user_by_email(email)?
            .ok_or_else(|| DomainError::UserNotFound(email.to_string()).into())
    }

    #[instrument(skip(self, req), fields(email = email))]
    pub fn create_project(&self, email: &str, req: CreateProject) -> Result<Project> {
        let mut user = self.get_user(email)?;
        let project = Project::create(req).inspect_err(|e| warn!(error = %e, "Project rejected"))?;

        user.projects.push(project.clone());
        self.user_repository.update_user(user)?;

        info!(title = %project.title, "Project created");
        Ok(project)
    }

    pub fn list_projects(&self, email: &str) -> Result<Vec<Project>> {
        Ok(self.get_user(email)?.projects)
    }

    pub fn get_project(&self, email: &str, position: usize) -> Result<Project> {
        let projects = self.list_projects(email)?;
        let index = position_to_index(position, projects.len())?;
        Ok(projects[index].clone())
    }

    /// Replaces the non-blank fields of the project at `position`.
    ///
    /// Nothing is written back when validation fails.
    #[instrument(skip(self, req), fields(email = email, position = position))]
    pub fn edit_project(&self, email: &str, position: usize, req: UpdateProject) -> Result<Project> {
        let mut user = self.get_user(email)?;
        let index = position_to_index(position, user.projects.len())?;

        // Validate and apply on the copy; the roster only sees it on success
        let project = &mut user.projects[index];
        project
            .apply_update(req)
            .inspect_err(|e| warn!(error = %e, "Project edit rejected"))?;
        let updated = project.clone();

        self.user_repository.update_user(user)?;
        info!(title = %updated.title, "Project updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(email = email, position = position))]
    pub fn delete_project(&self, email: &str, position: usize) -> Result<Project> {
        let mut user = self.get_user(email)?;
        let removed = remove_project(&mut user.projects, position)?;
        debug!(remaining = user.projects.len(), "Project removed from list");

        self.user_repository.update_user(user)?;
        info!(title = %removed.title, "Project deleted");
        Ok(removed)
    }
}
