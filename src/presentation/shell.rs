use crate::application::auth_service::AuthService;
use crate::application::project_service::ProjectService;
use crate::data::json_store::{JsonStore, LoadOutcome};
use crate::domain::error::DomainError;
use crate::domain::project::{
    CreateProject, Project, UpdateProject, format_target, parse_position, parse_target,
};
use crate::domain::repository::UserRepository;
use crate::domain::user::{CreateUser, LoginRequest};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

/// Standard input reached end of file while a prompt was waiting.
#[derive(Error, Debug)]
#[error("Input closed")]
pub struct InputClosed;

// AppState holding the services and the persistence boundary
pub struct AppState<R: UserRepository> {
    pub auth_service: AuthService<R>,
    pub project_service: ProjectService<R>,
    pub user_repository: Arc<R>,
    pub store: JsonStore,
}

impl<R: UserRepository> AppState<R> {
    pub fn new(user_repository: Arc<R>, store: JsonStore) -> Self {
        Self {
            auth_service: AuthService::new(user_repository.clone()),
            project_service: ProjectService::new(user_repository.clone()),
            user_repository,
            store,
        }
    }
}

/// Line-oriented menu loop.
///
/// Two levels: the top menu (register, login, exit) and, once signed in, the
/// user menu (project CRUD, logout). The roster is written to disk only on Exit.
pub struct Shell<R: UserRepository, I: BufRead, W: Write> {
    state: AppState<R>,
    input: I,
    output: W,
}

impl<R: UserRepository, I: BufRead, W: Write> Shell<R, I, W> {
    pub fn new(state: AppState<R>, input: I, output: W) -> Self {
        Self {
            state,
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn report_load(&mut self, outcome: &LoadOutcome) -> Result<()> {
        match outcome {
            LoadOutcome::Loaded(_) => writeln!(self.output, "Data loaded successfully.")?,
            LoadOutcome::Fresh => {
                writeln!(self.output, "No previous data found. Starting fresh.")?
            }
        }
        Ok(())
    }

    /// Runs the top menu until Exit (saves) or end of input (does not save).
    pub fn run(&mut self) -> Result<()> {
        match self.main_menu() {
            Err(e) if e.is::<InputClosed>() => {
                warn!("Input closed, leaving without saving");
                Ok(())
            }
            other => other,
        }
    }

    fn main_menu(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n--- Welcome to Crowdfunding App ---")?;
            writeln!(self.output, "1. Register")?;
            writeln!(self.output, "2. Login")?;
            writeln!(self.output, "3. Exit")?;
            let choice = self.prompt("Choose an option: ")?;

            match choice.trim() {
                "1" => self.register()?,
                "2" => {
                    if let Some(email) = self.login()? {
                        self.user_menu(&email)?;
                    }
                }
                "3" => {
                    self.save()?;
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                other => {
                    debug!(choice = other, "Unknown main menu choice");
                    writeln!(self.output, "Invalid choice.")?;
                }
            }
        }
    }

    fn user_menu(&mut self, email: &str) -> Result<()> {
        loop {
            writeln!(self.output, "\n--- User Menu ---")?;
            writeln!(self.output, "1. Create Project")?;
            writeln!(self.output, "2. View My Projects")?;
            writeln!(self.output, "3. Edit My Project")?;
            writeln!(self.output, "4. Delete My Project")?;
            writeln!(self.output, "5. Logout")?;
            let choice = self.prompt("Choose an option: ")?;

            match choice.trim() {
                "1" => self.create_project(email)?,
                "2" => {
                    self.view_projects(email)?;
                }
                "3" => self.edit_project(email)?,
                "4" => self.delete_project(email)?,
                "5" => {
                    info!(email = email, "User logged out");
                    writeln!(self.output, "Logging out...")?;
                    return Ok(());
                }
                other => {
                    debug!(choice = other, "Unknown user menu choice");
                    writeln!(self.output, "Invalid choice.")?;
                }
            }
        }
    }

    fn register(&mut self) -> Result<()> {
        writeln!(self.output, "\nRegister a new user")?;
        let req = CreateUser {
            first_name: self.prompt("First name: ")?,
            last_name: self.prompt("Last name: ")?,
            email: self.prompt("Email: ")?,
            password: self.prompt("Password: ")?,
            confirm_password: self.prompt("Confirm password: ")?,
            phone: self.prompt("Mobile phone: ")?,
        };

        match self.state.auth_service.register_user(req) {
            Ok(_) => writeln!(self.output, "Registration successful!")?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn login(&mut self) -> Result<Option<String>> {
        writeln!(self.output, "\nLogin")?;
        let req = LoginRequest {
            email: self.prompt("Email: ")?,
            password: self.prompt("Password: ")?,
        };

        match self.state.auth_service.login(req) {
            Ok(user) => {
                writeln!(self.output, "Login successful!")?;
                Ok(Some(user.email))
            }
            Err(e) => {
                self.report(e)?;
                Ok(None)
            }
        }
    }

    fn create_project(&mut self, email: &str) -> Result<()> {
        writeln!(self.output, "\nCreate a new project")?;
        let title = self.prompt("Title: ")?;
        let details = self.prompt("Details: ")?;
        let target = self.prompt("Total target (EGP): ")?;
        // Reject the amount before asking for dates
        if let Err(e) = parse_target(&target) {
            return self.report(e.into());
        }
        let start_date = self.prompt("Start date (YYYY-MM-DD): ")?;
        let end_date = self.prompt("End date (YYYY-MM-DD): ")?;

        let req = CreateProject {
            title,
            details,
            target,
            start_date,
            end_date,
        };
        match self.state.project_service.create_project(email, req) {
            Ok(_) => writeln!(self.output, "Project created successfully.")?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    /// Prints the numbered list and returns how many projects it showed.
    fn view_projects(&mut self, email: &str) -> Result<usize> {
        let projects = self.state.project_service.list_projects(email)?;
        if projects.is_empty() {
            writeln!(self.output, "You have no projects.")?;
            return Ok(0);
        }

        writeln!(self.output, "\nYour Projects:")?;
        for (i, project) in projects.iter().enumerate() {
            writeln!(self.output, "\nProject {}:", i + 1)?;
            self.display(project)?;
        }
        Ok(projects.len())
    }

    fn edit_project(&mut self, email: &str) -> Result<()> {
        // Nothing to pick from
        if self.view_projects(email)? == 0 {
            return Ok(());
        }
        let Some(position) = self.prompt_position("Enter the project number to edit: ")? else {
            return Ok(());
        };
        let project = match self.state.project_service.get_project(email, position) {
            Ok(project) => project,
            Err(e) => return self.report(e),
        };

        writeln!(self.output, "\nEditing project:")?;
        self.display(&project)?;

        writeln!(
            self.output,
            "\nEnter new details (leave blank to keep current value):"
        )?;
        let title = self.prompt(&format!("New Title [{}]: ", project.title))?;
        let details = self.prompt(&format!("New Details [{}]: ", project.details))?;
        let target = self.prompt(&format!("New Target [{}]: ", format_target(project.target)))?;
        // Blank keeps the current target
        if !target.is_empty() {
            if let Err(e) = parse_target(&target) {
                return self.report(e.into());
            }
        }
        let start_date = self.prompt(&format!("New Start Date [{}]: ", project.start_date))?;
        let end_date = self.prompt(&format!("New End Date [{}]: ", project.end_date))?;

        let req = UpdateProject {
            title,
            details,
            target,
            start_date,
            end_date,
        };
        match self.state.project_service.edit_project(email, position, req) {
            Ok(_) => writeln!(self.output, "Project updated successfully.")?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn delete_project(&mut self, email: &str) -> Result<()> {
        if self.view_projects(email)? == 0 {
            return Ok(());
        }
        let Some(position) = self.prompt_position("Enter the project number to delete: ")? else {
            return Ok(());
        };

        match self.state.project_service.delete_project(email, position) {
            Ok(_) => writeln!(self.output, "Project deleted successfully.")?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn save(&mut self) -> Result<()> {
        let users = self.state.user_repository.all_users()?;
        self.state.store.save(&users).inspect_err(|e| {
            error!(error = %e, "Failed to save data");
        })?;
        writeln!(self.output, "Data saved successfully.")?;
        Ok(())
    }

    fn display(&mut self, project: &Project) -> Result<()> {
        writeln!(self.output, "\n{project}")?;
        Ok(())
    }

    /// Reads a 1-based project number. Prints "Invalid input." and returns
    /// `None` when the answer is not an integer.
    fn prompt_position(&mut self, label: &str) -> Result<Option<usize>> {
        let answer = self.prompt(label)?;
        let position = parse_position(&answer);
        if position.is_none() {
            writeln!(self.output, "Invalid input.")?;
        }
        Ok(position)
    }

    /// Prints domain failures and keeps going; anything else is fatal.
    fn report(&mut self, err: anyhow::Error) -> Result<()> {
        match err.downcast_ref::<DomainError>() {
            Some(domain_error) => {
                writeln!(self.output, "{domain_error}.")?;
                Ok(())
            }
            None => Err(err),
        }
    }

    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputClosed.into());
        }
        // Strip the line terminator only
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}
