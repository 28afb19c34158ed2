use crowdfund_console::data::json_store::JsonStore;
use crowdfund_console::data::user_repository::InMemoryUserRepository;
use crowdfund_console::domain::repository::UserRepository;
use crowdfund_console::presentation::shell::{AppState, Shell};
use std::io::Cursor;
use std::sync::Arc;
use tempfile::TempDir;

const REGISTER_SARA: &str = "1\nSara\nAli\nsara@example.com\npw\npw\n01012345678\n";
const LOGIN_SARA: &str = "2\nsara@example.com\npw\n";

macro_rules! run_script {
    ($repository:expr, $dir:expr, $script:expr) => {{
        let store = JsonStore::new($dir.path().join("app_data.json"));
        let state = AppState::new($repository.clone(), store);
        let mut shell = Shell::new(state, Cursor::new($script.to_string()), Vec::new());
        shell.run().unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }};
}

fn create_project(title: &str, start: &str, end: &str) -> String {
    format!("1\n{title}\n{title} details\n5000\n{start}\n{end}\n")
}

fn titles(repository: &InMemoryUserRepository, email: &str) -> Vec<String> {
    repository
        .find_user_by_email(email)
        .unwrap()
        .unwrap()
        .projects
        .into_iter()
        .map(|p| p.title)
        .collect()
}

#[test]
fn test_register_login_and_create_project() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(InMemoryUserRepository::new());
    let script = format!(
        "{REGISTER_SARA}{LOGIN_SARA}{}2\n5\n3\n",
        create_project("Clinic", "2024-01-01", "2024-02-01")
    );

    let output = run_script!(repository, dir, script);

    assert!(output.contains("Registration successful!"));
    assert!(output.contains("Login successful!"));
    assert!(output.contains("Project created successfully."));
    assert!(output.contains("Project 1:"));
    assert!(output.contains("Target: 5000.0 EGP"));
    assert!(output.contains("Logging out..."));
    assert!(output.ends_with("Data saved successfully.\nGoodbye!\n"));
    assert_eq!(titles(&repository, "sara@example.com"), ["Clinic"]);
}

#[test]
fn test_registration_does_not_sign_in() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(InMemoryUserRepository::new());
    let script = format!("{REGISTER_SARA}3\n");

    let output = run_script!(repository, dir, script);

    assert!(!output.contains("--- User Menu ---"));
    assert_eq!(repository.all_users().unwrap().len(), 1);
}

#[test]
fn test_duplicate_registration_is_reported() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(InMemoryUserRepository::new());
    let script = format!("{REGISTER_SARA}{REGISTER_SARA}3\n");

    let output = run_script!(repository, dir, script);

    assert!(output.contains("Email already registered."));
    let users = repository.all_users().unwrap();
    assert_eq!(users.iter().filter(|u| u.email == "sara@example.com").count(), 1);
}

#[test]
fn test_registration_failures_are_reported() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(InMemoryUserRepository::new());
    let script = "1\nA\nB\na@example.com\npw\nother\n01012345678\n\
                  1\nA\nB\na@example.com\npw\npw\n01312345678\n3\n";

    let output = run_script!(repository, dir, script);

    assert!(output.contains("Passwords do not match."));
    assert!(output.contains("Invalid Egyptian phone number."));
    assert!(repository.all_users().unwrap().is_empty());
}

#[test]
fn test_bad_credentials_stay_at_top_menu() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(InMemoryUserRepository::new());
    let script = format!("{REGISTER_SARA}2\nsara@example.com\nwrong\n3\n");

    let output = run_script!(repository, dir, script);

    assert!(output.contains("Invalid email or password."));
    assert!(!output.contains("--- User Menu ---"));
}

#[test]
fn test_invalid_menu_choices_reprint_menus() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(InMemoryUserRepository::new());
    let script = format!("9\nabc\n{REGISTER_SARA}{LOGIN_SARA}7\n5\n3\n");

    let output = run_script!(repository, dir, script);

    assert_eq!(output.matches("Invalid choice.").count(), 3);
    assert_eq!(output.matches("--- User Menu ---").count(), 2);
}

#[test]
fn test_create_project_rejections() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(InMemoryUserRepository::new());
    let script = format!(
        "{REGISTER_SARA}{LOGIN_SARA}\
         1\nT\nD\nlots\n\
         {}{}5\n3\n",
        create_project("Equal", "2024-01-01", "2024-01-01"),
        create_project("Month", "2024-13-01", "2024-12-01"),
    );

    let output = run_script!(repository, dir, script);

    assert!(output.contains("Invalid target amount."));
    assert!(output.contains("End date must be after start date."));
    assert!(output.contains("Invalid date format."));
    assert!(titles(&repository, "sara@example.com").is_empty());
}

#[test]
fn test_view_with_no_projects() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(InMemoryUserRepository::new());
    let script = format!("{REGISTER_SARA}{LOGIN_SARA}2\n3\n4\n5\n3\n");

    let output = run_script!(repository, dir, script);

    assert_eq!(output.matches("You have no projects.").count(), 3);
    assert!(!output.contains("Enter the project number"));
}

#[test]
fn test_delete_second_of_three_projects() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(InMemoryUserRepository::new());
    let script = format!(
        "{REGISTER_SARA}{LOGIN_SARA}{}{}{}4\n2\n5\n3\n",
        create_project("One", "2024-01-01", "2024-02-01"),
        create_project("Two", "2024-01-01", "2024-02-01"),
        create_project("Three", "2024-01-01", "2024-02-01"),
    );

    let output = run_script!(repository, dir, script);

    assert!(output.contains("Project deleted successfully."));
    assert_eq!(titles(&repository, "sara@example.com"), ["One", "Three"]);
}

#[test]
fn test_delete_with_bad_numbers_does_not_mutate() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(InMemoryUserRepository::new());
    let script = format!(
        "{REGISTER_SARA}{LOGIN_SARA}{}4\nx\n4\n0\n4\n-1\n4\n2\n4\n99999999999999999999\n5\n3\n",
        create_project("Only", "2024-01-01", "2024-02-01"),
    );

    let output = run_script!(repository, dir, script);

    assert_eq!(output.matches("Invalid input.").count(), 1);
    assert_eq!(output.matches("Invalid project number.").count(), 4);
    assert_eq!(titles(&repository, "sara@example.com"), ["Only"]);
}

#[test]
fn test_edit_with_blank_answers_keeps_project() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(InMemoryUserRepository::new());
    let script = format!(
        "{REGISTER_SARA}{LOGIN_SARA}{}3\n1\n\n\n\n\n\n5\n3\n",
        create_project("Clinic", "2024-01-01", "2024-02-01"),
    );

    let output = run_script!(repository, dir, script);

    assert!(output.contains("Editing project:"));
    assert!(output.contains("New Title [Clinic]: "));
    assert!(output.contains("New Target [5000.0]: "));
    assert!(output.contains("New Start Date [2024-01-01]: "));
    assert!(output.contains("Project updated successfully."));

    let user = repository.find_user_by_email("sara@example.com").unwrap().unwrap();
    let project = &user.projects[0];
    assert_eq!(project.title, "Clinic");
    assert_eq!(project.details, "Clinic details");
    assert_eq!(project.target, 5000.0);
    assert_eq!(project.start_date.to_string(), "2024-01-01");
    assert_eq!(project.end_date.to_string(), "2024-02-01");
}

#[test]
fn test_edit_changes_fields_and_rejects_bad_order() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(InMemoryUserRepository::new());
    let script = format!(
        "{REGISTER_SARA}{LOGIN_SARA}{}\
         3\n1\nHospital\n\n7500.5\n\n2024-03-01\n\
         3\n1\nBroken\n\n\n2024-04-01\n\n\
         3\n1\n\n\nabc\n\
         5\n3\n",
        create_project("Clinic", "2024-01-01", "2024-02-01"),
    );

    let output = run_script!(repository, dir, script);

    assert_eq!(output.matches("Project updated successfully.").count(), 1);
    assert!(output.contains("End date must be after start date."));
    assert!(output.contains("Invalid target amount."));

    let user = repository.find_user_by_email("sara@example.com").unwrap().unwrap();
    let project = &user.projects[0];
    assert_eq!(project.title, "Hospital");
    assert_eq!(project.details, "Clinic details");
    assert_eq!(project.target, 7500.5);
    assert_eq!(project.end_date.to_string(), "2024-03-01");
}

#[test]
fn test_logout_does_not_save() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(InMemoryUserRepository::new());
    let script = format!("{REGISTER_SARA}{LOGIN_SARA}5\n");

    let output = run_script!(repository, dir, script);

    assert!(output.contains("Logging out..."));
    assert!(!output.contains("Data saved successfully."));
    assert!(!dir.path().join("app_data.json").exists());
}

#[test]
fn test_end_of_input_leaves_without_saving() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(InMemoryUserRepository::new());

    let output = run_script!(repository, dir, REGISTER_SARA);

    assert!(output.contains("Registration successful!"));
    assert!(!dir.path().join("app_data.json").exists());
}

#[test]
fn test_windows_line_endings_are_accepted() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(InMemoryUserRepository::new());
    let script = "1\r\nSara\r\nAli\r\nsara@example.com\r\npw\r\npw\r\n01012345678\r\n3\r\n";

    let output = run_script!(repository, dir, script);

    assert!(output.contains("Registration successful!"));
    let user = repository.find_user_by_email("sara@example.com").unwrap().unwrap();
    assert_eq!(user.phone, "01012345678");
}
