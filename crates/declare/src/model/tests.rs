use super::*;

const LOAN: &str = "\
activity Submit Application
bind Submit Application: amount
activity Assess Risk
activity Notify Outcome
amount: integer between 100 and 50000

Init[Submit Application] | | |
Response[Submit Application, Assess Risk] |A.amount > 1000 | | 0,30,d
Chain Response[Assess Risk, Notify Outcome] | | |
";

#[test]
fn reads_activities_and_constraints() {
    let model = DeclareModel::parse(LOAN).unwrap();
    assert_eq!(
        model.activities.iter().collect::<Vec<_>>(),
        ["Submit Application", "Assess Risk", "Notify Outcome"]
    );
    assert_eq!(model.constraints.len(), 3);

    let response = &model.constraints[1];
    assert_eq!(response.template, "Response");
    assert_eq!(response.activities, ["Submit Application", "Assess Risk"]);
    assert_eq!(response.conditions, ["A.amount > 1000", "0,30,d"]);
    assert_eq!(response.line, 8);

    let init = &model.constraints[0];
    assert_eq!(init.activities, ["Submit Application"]);
    assert!(init.conditions.is_empty());
}

#[test]
fn constraints_without_conditions() {
    let model: DeclareModel = "Existence[A]\nNot Co-Existence[A, B]".parse().unwrap();
    assert_eq!(model.constraints[0].template, "Existence");
    assert_eq!(model.constraints[1].template, "Not Co-Existence");
    assert_eq!(model.constraints[1].activities, ["A", "B"]);
    assert!(model.activities.is_empty());
}

#[test]
fn empty_model() {
    assert_eq!(DeclareModel::parse("").unwrap(), DeclareModel::default());
    assert_eq!(DeclareModel::parse("\n  \n").unwrap(), DeclareModel::default());
}

#[test]
fn invalid_lines() {
    assert_eq!(
        DeclareModel::parse("activity A\nthis is not declare\n").unwrap_err(),
        ModelError::InvalidLine {
            line: 2,
            text: "this is not declare".to_string()
        }
    );
    assert!(DeclareModel::parse("activity").is_err());
    assert!(DeclareModel::parse("Response]A, B[").is_err());
}

#[test]
fn keywords_need_a_word_boundary() {
    let model = DeclareModel::parse("activityA[x]").unwrap();
    assert_eq!(model.constraints[0].template, "activityA");
    assert!(model.activities.is_empty());
}
