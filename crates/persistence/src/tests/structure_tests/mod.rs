// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! University structure persistence tests.

use campus_id_domain::{
    College, CollegeUpdate, Department, DepartmentUpdate, Level, Person, PersonType, Program,
    ProgramUpdate,
};

use super::{create_test_college, create_test_department};
use crate::{Persistence, PersistenceError};

#[test]
fn test_create_and_get_college() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let created: College = create_test_college(&mut persistence, "ENG");
    let college_id: i64 = created.college_id.unwrap();
    assert!(created.created_at.is_some());

    let fetched: College = persistence.get_college(college_id).unwrap().unwrap();
    assert_eq!(fetched, created);
    assert_eq!(
        persistence.get_college_by_code("ENG").unwrap(),
        Some(created)
    );
}

#[test]
fn test_get_missing_college_returns_none() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.get_college(999).unwrap().is_none());
}

#[test]
fn test_duplicate_college_code_is_a_unique_violation() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_test_college(&mut persistence, "ENG");

    let result: Result<College, PersistenceError> =
        persistence.create_college(&College::new("Other", "أخرى", "ENG"));
    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_colleges_are_listed_by_english_name() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_college(&College::new("Medicine", "الطب", "MED"))
        .unwrap();
    persistence
        .create_college(&College::new("Business", "إدارة الأعمال", "BUS"))
        .unwrap();

    let names: Vec<String> = persistence
        .list_colleges()
        .unwrap()
        .into_iter()
        .map(|c| c.name_en)
        .collect();
    assert_eq!(
        names,
        vec![String::from("Business"), String::from("Medicine")]
    );
}

#[test]
fn test_update_college_changes_only_given_fields() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let college: College = create_test_college(&mut persistence, "ENG");
    let college_id: i64 = college.college_id.unwrap();

    let update: CollegeUpdate = CollegeUpdate {
        name_en: Some(String::from("Engineering and Design")),
        ..CollegeUpdate::default()
    };
    let updated: College = persistence
        .update_college(college_id, &update)
        .unwrap()
        .unwrap();

    assert_eq!(updated.name_en, "Engineering and Design");
    assert_eq!(updated.code, "ENG");
    assert_eq!(updated.name_ar, college.name_ar);
}

#[test]
fn test_empty_update_returns_current_row() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let college: College = create_test_college(&mut persistence, "ENG");

    let unchanged: Option<College> = persistence
        .update_college(college.college_id.unwrap(), &CollegeUpdate::default())
        .unwrap();
    assert_eq!(unchanged, Some(college));
}

#[test]
fn test_update_missing_college_returns_none() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let update: CollegeUpdate = CollegeUpdate {
        code: Some(String::from("X")),
        ..CollegeUpdate::default()
    };
    assert!(persistence.update_college(42, &update).unwrap().is_none());
}

#[test]
fn test_departments_filter_by_college() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let eng: i64 = create_test_college(&mut persistence, "ENG")
        .college_id
        .unwrap();
    let cs: i64 = create_test_college(&mut persistence, "CS")
        .college_id
        .unwrap();

    create_test_department(&mut persistence, eng, "ME");
    create_test_department(&mut persistence, eng, "EE");
    create_test_department(&mut persistence, cs, "SE");

    assert_eq!(persistence.list_departments(None).unwrap().len(), 3);
    let eng_departments: Vec<Department> = persistence.list_departments(Some(eng)).unwrap();
    assert_eq!(eng_departments.len(), 2);
    assert!(eng_departments.iter().all(|d| d.college_id == eng));
}

#[test]
fn test_department_with_unknown_college_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let result: Result<Department, PersistenceError> =
        persistence.create_department(&Department::new(77, "Ghost", "شبح", "GH"));
    assert!(matches!(
        result,
        Err(PersistenceError::ForeignKeyViolation(_))
    ));
}

#[test]
fn test_delete_referenced_college_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let eng: i64 = create_test_college(&mut persistence, "ENG")
        .college_id
        .unwrap();
    create_test_department(&mut persistence, eng, "ME");

    let result: Result<bool, PersistenceError> = persistence.delete_college(eng);
    assert!(matches!(
        result,
        Err(PersistenceError::ForeignKeyViolation(_))
    ));
    assert!(persistence.get_college(eng).unwrap().is_some());
}

#[test]
fn test_delete_college_referenced_by_person_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let eng: i64 = create_test_college(&mut persistence, "ENG")
        .college_id
        .unwrap();
    let mut person: Person = Person::new(PersonType::Student, "ENG-2026-00001", "Omar");
    person.college_id = Some(eng);
    persistence.create_person(&person).unwrap();

    assert!(persistence.delete_college(eng).is_err());
}

#[test]
fn test_delete_unreferenced_college() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let eng: i64 = create_test_college(&mut persistence, "ENG")
        .college_id
        .unwrap();

    assert!(persistence.delete_college(eng).unwrap());
    assert!(!persistence.delete_college(eng).unwrap());
    assert!(persistence.get_college(eng).unwrap().is_none());
}

#[test]
fn test_update_department_moves_college() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let eng: i64 = create_test_college(&mut persistence, "ENG")
        .college_id
        .unwrap();
    let cs: i64 = create_test_college(&mut persistence, "CS")
        .college_id
        .unwrap();
    let department: Department = create_test_department(&mut persistence, eng, "SE");

    let update: DepartmentUpdate = DepartmentUpdate {
        college_id: Some(cs),
        ..DepartmentUpdate::default()
    };
    let moved: Department = persistence
        .update_department(department.department_id.unwrap(), &update)
        .unwrap()
        .unwrap();
    assert_eq!(moved.college_id, cs);
}

#[test]
fn test_program_lifecycle() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let eng: i64 = create_test_college(&mut persistence, "ENG")
        .college_id
        .unwrap();
    let me: i64 = create_test_department(&mut persistence, eng, "ME")
        .department_id
        .unwrap();

    let program: Program = persistence
        .create_program(&Program::new(
            me,
            "Mechanical Engineering",
            "الهندسة الميكانيكية",
            "BME",
        ))
        .unwrap();
    let program_id: i64 = program.program_id.unwrap();
    assert_eq!(program.duration_years, Program::DEFAULT_DURATION_YEARS);

    assert_eq!(persistence.list_programs(Some(me)).unwrap().len(), 1);
    assert!(persistence.list_programs(Some(me + 100)).unwrap().is_empty());

    let update: ProgramUpdate = ProgramUpdate {
        duration_years: Some(5),
        ..ProgramUpdate::default()
    };
    let updated: Program = persistence
        .update_program(program_id, &update)
        .unwrap()
        .unwrap();
    assert_eq!(updated.duration_years, 5);

    assert!(persistence.delete_program(program_id).unwrap());
    assert!(persistence.get_program(program_id).unwrap().is_none());
}

#[test]
fn test_levels_are_listed_by_order() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_level(&Level::new("Level 3", "المستوى الثالث", 3))
        .unwrap();
    persistence
        .create_level(&Level::new("Level 1", "المستوى الأول", 1))
        .unwrap();
    let second: Level = persistence
        .create_level(&Level::new("Level 2", "المستوى الثاني", 2))
        .unwrap();

    let orders: Vec<i32> = persistence
        .list_levels()
        .unwrap()
        .into_iter()
        .map(|l| l.order)
        .collect();
    assert_eq!(orders, vec![1, 2, 3]);
    assert_eq!(
        persistence.get_level(second.level_id.unwrap()).unwrap(),
        Some(second)
    );
}
