//! Unit tests for project identifiers, names, roles and task numbering.

use crate::error::ErrorKind;
use crate::project::domain::{
    PersistedProjectData, Project, ProjectDomainError, ProjectId, ProjectName, Role, TaskNumber,
    UserId,
};
use eyre::ensure;
use rstest::rstest;

#[rstest]
#[case("TTP", "TTP")]
#[case("ttp", "TTP")]
#[case(" a1b ", "A1B")]
#[case("007", "007")]
fn project_id_accepts_three_alphanumerics(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(ProjectId::new(raw).map(|id| id.to_string()), Ok(expected.to_owned()));
}

#[rstest]
#[case("")]
#[case("TT")]
#[case("TTPX")]
#[case("T-P")]
#[case("ÄBC")]
fn project_id_rejects_other_shapes(#[case] raw: &str) {
    assert_eq!(
        ProjectId::new(raw),
        Err(ProjectDomainError::InvalidProjectId(raw.to_owned()))
    );
}

#[rstest]
#[case("abc".to_owned(), true)]
#[case("  Tracker Test  ".to_owned(), true)]
#[case("ab".to_owned(), false)]
#[case("   ab   ".to_owned(), false)]
#[case("n".repeat(25), true)]
#[case("n".repeat(26), false)]
fn project_name_length_is_bounded(#[case] raw: String, #[case] valid: bool) {
    assert_eq!(ProjectName::new(raw).is_ok(), valid);
}

#[rstest]
fn project_name_is_trimmed() -> eyre::Result<()> {
    ensure!(ProjectName::new("  Backlog  ")?.as_str() == "Backlog");
    Ok(())
}

#[rstest]
fn blank_user_id_is_rejected() {
    assert_eq!(UserId::new("  "), Err(ProjectDomainError::EmptyUserId));
}

#[rstest]
#[case("u".repeat(255), Ok(255))]
#[case(format!("  {}  ", "é".repeat(255)), Ok(255))]
#[case("u".repeat(256), Err(ProjectDomainError::UserIdTooLong { max: 255, actual: 256 }))]
fn user_id_length_is_bounded_in_characters(
    #[case] raw: String,
    #[case] expected: Result<usize, ProjectDomainError>,
) {
    let parsed = UserId::new(raw).map(|user| user.as_str().chars().count());
    assert_eq!(parsed, expected);
}

#[rstest]
fn over_long_user_id_is_a_validation_error() {
    let err = UserId::new("u".repeat(300)).expect_err("300 characters exceed the limit");
    assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
}

#[rstest]
#[case(Role::Viewer, Role::Viewer, true)]
#[case(Role::Viewer, Role::Developer, false)]
#[case(Role::Viewer, Role::Admin, false)]
#[case(Role::Developer, Role::Viewer, true)]
#[case(Role::Developer, Role::Developer, true)]
#[case(Role::Developer, Role::Admin, false)]
#[case(Role::Admin, Role::Viewer, true)]
#[case(Role::Admin, Role::Developer, true)]
#[case(Role::Admin, Role::Admin, true)]
fn role_satisfies_follows_rank(
    #[case] held: Role,
    #[case] minimum: Role,
    #[case] expected: bool,
) {
    assert_eq!(held.satisfies(minimum), expected);
    assert_eq!(held >= minimum, expected);
}

#[rstest]
fn role_parses_case_insensitively() {
    for role in Role::ALL {
        assert_eq!(Role::try_from(role.as_str().to_uppercase().as_str()), Ok(role));
    }
    assert!(Role::try_from("owner").is_err());
}

#[rstest]
fn mint_task_number_counts_from_one() -> eyre::Result<()> {
    let mut project = Project::new(ProjectId::new("TTP")?, ProjectName::new("Tracker")?);

    let first = project.mint_task_number()?;
    let second = project.mint_task_number()?;

    ensure!(first.value() == 1);
    ensure!(second.value() == 2);
    ensure!(project.last_task_index() == 2);
    Ok(())
}

#[rstest]
fn mint_task_number_refuses_to_overflow() -> eyre::Result<()> {
    let id = ProjectId::new("TTP")?;
    let mut project = Project::from_persisted(PersistedProjectData {
        id: id.clone(),
        name: ProjectName::new("Tracker")?,
        last_task_index: u64::MAX,
    });

    let result = project.mint_task_number();

    ensure!(result == Err(ProjectDomainError::TaskIndexExhausted(id)));
    ensure!(project.last_task_index() == u64::MAX);
    if let Err(err) = result {
        ensure!(err.kind() == ErrorKind::Precondition);
    }
    Ok(())
}

#[rstest]
fn task_number_zero_is_never_valid() {
    assert_eq!(TaskNumber::new(0), None);
    assert_eq!(TaskNumber::new(3).map(TaskNumber::value), Some(3));
}
