use super::*;

fn minimal_request() -> TimetableRequest {
    TimetableRequest {
        teachers: vec![TeacherDto {
            teacher_id: "t1".into(),
            name: "Ada".into(),
        }],
        teacher_courses: vec![CourseDto {
            course_id: "c1".into(),
            course_title: "Algorithms".into(),
            course_credit: 3,
            course_type: "theory".into(),
            course_hours: 3,
            teacher_id: "t1".into(),
            teacher_name: "Ada".into(),
        }],
        halls: vec![HallDto {
            hall_id: "h1".into(),
            hall_name: "Hall 1".into(),
            hall_capacity: 30,
            hall_type: "lecture".into(),
        }],
        teacher_busy_period: vec![],
        teacher_prefered_teaching_period: vec![],
        hall_busy_periods: vec![],
        break_period: BreakPeriodDto {
            start_time: "12:00".into(),
            end_time: "13:00".into(),
            daily: true,
            no_break_exceptions: vec![],
            day_exceptions: vec![],
        },
        operational_period: OperationalPeriodDto {
            start_time: "08:00".into(),
            end_time: "17:00".into(),
            daily: true,
            days: vec![
                "monday".into(),
                "tuesday".into(),
                "wednesday".into(),
                "thursday".into(),
                "friday".into(),
            ],
            day_exceptions: vec![],
        },
        periods: None,
        soft_constrains: Default::default(),
        required_joint_course_periods: vec![],
    }
}

#[test]
fn accepts_a_well_formed_minimal_request() {
    let result = validate(&minimal_request());
    assert!(result.is_ok());
    let validated = result.unwrap();
    assert_eq!(validated.teachers.len(), 1);
    assert_eq!(validated.courses.len(), 1);
    assert_eq!(validated.period_policy.default_minutes, 30);
}

#[test]
fn rejects_empty_collections_and_collects_all_three_errors() {
    let mut request = minimal_request();
    request.teachers.clear();
    request.teacher_courses.clear();
    request.halls.clear();

    let errors = validate(&request).unwrap_err();
    assert!(errors.contains(&ValidationError::NoTeachers));
    assert!(errors.contains(&ValidationError::NoCourses));
    assert!(errors.contains(&ValidationError::NoHalls));
}

#[test]
fn rejects_course_with_unknown_teacher() {
    let mut request = minimal_request();
    request.teacher_courses[0].teacher_id = "ghost".into();

    let errors = validate(&request).unwrap_err();
    assert!(errors.iter().any(|e| matches!(
        e,
        ValidationError::UnknownCourseTeacher { teacher_id, .. } if teacher_id == "ghost"
    )));
}

#[test]
fn rejects_invalid_course_and_hall_type() {
    let mut request = minimal_request();
    request.teacher_courses[0].course_type = "seminar".into();
    request.halls[0].hall_type = "gym".into();

    let errors = validate(&request).unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::InvalidCourseType { .. })));
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::InvalidHallType { .. })));
}

#[test]
fn rejects_malformed_and_inverted_intervals() {
    let mut request = minimal_request();
    request.break_period.start_time = "not-a-time".into();
    request.operational_period.start_time = "17:00".into();
    request.operational_period.end_time = "08:00".into();

    let errors = validate(&request).unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::MalformedTime { .. })));
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::StartNotBeforeEnd { .. })));
}

#[test]
fn rejects_unrecognised_day_strings() {
    let mut request = minimal_request();
    request.operational_period.days.push("funday".into());

    let errors = validate(&request).unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::InvalidDay { value, .. } if value == "funday")));
}

#[test]
fn rejects_zero_duration_period_policy() {
    let mut request = minimal_request();
    request.periods = Some(PeriodsDto {
        daily: true,
        duration_minutes: 0,
        day_exceptions: vec![],
    });

    let errors = validate(&request).unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::NonPositiveDuration { .. })));
}
