use std::fmt;

use crate::{ExerciseID, MuscleGroupID, SetID, ValidationError};

/// The tree of an ongoing or persisted workout.
///
/// All modifying operations leave `self` untouched and return a new tree in which only the
/// addressed node differs. Operations addressing a node that does not exist return an unchanged
/// copy.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Workout {
    pub muscle_groups: Vec<MuscleGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MuscleGroup {
    pub id: MuscleGroupID,
    pub name: String,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: String,
    pub notes: String,
    pub sets: Vec<Set>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Set {
    pub id: SetID,
    pub weight: String,
    pub reps: String,
    pub completed: bool,
    pub set_type: SetType,
}

#[derive(
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
)]
#[strum(serialize_all = "lowercase")]
pub enum SetType {
    #[default]
    Normal,
    Warmup,
    Drop,
    Failure,
}

impl SetType {
    /// Warmup and drop sets restart the numbering of the following working sets.
    #[must_use]
    pub fn resets_numbering(self) -> bool {
        matches!(self, SetType::Warmup | SetType::Drop)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    Weight,
    Reps,
}

/// Label shown next to a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetLabel {
    Number(u32),
    Warmup,
    Drop,
    Failure,
}

impl fmt::Display for SetLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SetLabel::Number(number) => write!(f, "{number}"),
            SetLabel::Warmup => write!(f, "W"),
            SetLabel::Drop => write!(f, "D"),
            SetLabel::Failure => write!(f, "F"),
        }
    }
}

#[must_use]
pub fn parse_weight(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite())
}

#[must_use]
pub fn parse_reps(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok()
}

impl Set {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: SetID::generate(),
            weight: String::new(),
            reps: String::new(),
            completed: false,
            set_type: SetType::Normal,
        }
    }

    #[must_use]
    pub fn weight_value(&self) -> Option<f64> {
        parse_weight(&self.weight)
    }

    #[must_use]
    pub fn reps_value(&self) -> Option<u32> {
        parse_reps(&self.reps)
    }

    /// A set can only be completed if both weight and reps are numeric.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weight_value().is_some() && self.reps_value().is_some()
    }

    #[must_use]
    pub fn has_input(&self) -> bool {
        self.completed || !self.weight.is_empty() || !self.reps.is_empty()
    }
}

impl Exercise {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            id: ExerciseID::generate(),
            name: name.to_string(),
            notes: String::new(),
            sets: vec![Set::empty()],
        }
    }

    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }

    #[must_use]
    pub fn set_labels(&self) -> Vec<SetLabel> {
        let mut working_sets = 0;
        self.sets
            .iter()
            .map(|set| {
                let label = match set.set_type {
                    SetType::Normal => SetLabel::Number(working_sets + 1),
                    SetType::Warmup => SetLabel::Warmup,
                    SetType::Drop => SetLabel::Drop,
                    SetType::Failure => SetLabel::Failure,
                };
                working_sets = if set.set_type.resets_numbering() {
                    0
                } else {
                    working_sets + 1
                };
                label
            })
            .collect()
    }

    /// Weight and reps hints for each set, taken from the set before it.
    ///
    /// The first set and empty fields fall back to "0".
    #[must_use]
    pub fn set_placeholders(&self) -> Vec<(String, String)> {
        let hint = |value: &str| {
            if value.is_empty() {
                String::from("0")
            } else {
                value.to_string()
            }
        };
        self.sets
            .iter()
            .scan(None::<&Set>, |previous, set| {
                let placeholder = previous.map_or_else(
                    || (String::from("0"), String::from("0")),
                    |p| (hint(&p.weight), hint(&p.reps)),
                );
                *previous = Some(set);
                Some(placeholder)
            })
            .collect()
    }
}

impl Workout {
    #[must_use]
    pub fn new(muscle_groups: Vec<MuscleGroup>) -> Self {
        Self { muscle_groups }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.muscle_groups.is_empty()
    }

    #[must_use]
    pub fn muscle_group(&self, group_id: &MuscleGroupID) -> Option<&MuscleGroup> {
        self.muscle_groups.iter().find(|g| g.id == *group_id)
    }

    #[must_use]
    pub fn exercise(
        &self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
    ) -> Option<&Exercise> {
        self.muscle_group(group_id)?
            .exercises
            .iter()
            .find(|e| e.id == *exercise_id)
    }

    #[must_use]
    pub fn set(
        &self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
        set_id: &SetID,
    ) -> Option<&Set> {
        self.exercise(group_id, exercise_id)?
            .sets
            .iter()
            .find(|s| s.id == *set_id)
    }

    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.muscle_groups.iter().flat_map(|g| g.exercises.iter())
    }

    pub fn sets(&self) -> impl Iterator<Item = &Set> {
        self.exercises().flat_map(|e| e.sets.iter())
    }

    /// Whether the user entered anything that would be lost when leaving the session.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.sets().any(Set::has_input)
    }

    #[must_use]
    pub fn add_exercise(&self, group_id: &MuscleGroupID) -> Self {
        self.modify_group(group_id, |group| group.exercises.push(Exercise::new("")))
    }

    #[must_use]
    pub fn remove_exercise(&self, group_id: &MuscleGroupID, exercise_id: &ExerciseID) -> Self {
        self.modify_group(group_id, |group| {
            group.exercises.retain(|e| e.id != *exercise_id);
        })
    }

    #[must_use]
    pub fn remove_muscle_group(&self, group_id: &MuscleGroupID) -> Self {
        let mut workout = self.clone();
        workout.muscle_groups.retain(|g| g.id != *group_id);
        workout
    }

    #[must_use]
    pub fn add_set(&self, group_id: &MuscleGroupID, exercise_id: &ExerciseID) -> Self {
        self.modify_exercise(group_id, exercise_id, |exercise| {
            exercise.sets.push(Set::empty());
        })
    }

    /// Remove a set unless it is the last remaining set of the exercise.
    #[must_use]
    pub fn remove_set(
        &self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
        set_id: &SetID,
    ) -> Self {
        self.modify_exercise(group_id, exercise_id, |exercise| {
            if exercise.sets.len() > 1 {
                exercise.sets.retain(|s| s.id != *set_id);
            }
        })
    }

    #[must_use]
    pub fn update_exercise_name(
        &self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
        name: &str,
    ) -> Self {
        self.modify_exercise(group_id, exercise_id, |exercise| {
            exercise.name = name.to_string();
        })
    }

    #[must_use]
    pub fn update_exercise_notes(
        &self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
        notes: &str,
    ) -> Self {
        self.modify_exercise(group_id, exercise_id, |exercise| {
            exercise.notes = notes.to_string();
        })
    }

    #[must_use]
    pub fn update_set(
        &self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
        set_id: &SetID,
        field: SetField,
        value: &str,
    ) -> Self {
        self.modify_set(group_id, exercise_id, set_id, |set| match field {
            SetField::Weight => set.weight = value.to_string(),
            SetField::Reps => set.reps = value.to_string(),
        })
    }

    #[must_use]
    pub fn update_set_type(
        &self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
        set_id: &SetID,
        set_type: SetType,
    ) -> Self {
        self.modify_set(group_id, exercise_id, set_id, |set| set.set_type = set_type)
    }

    /// Flip the completion state of a set.
    ///
    /// Fails without producing a new tree if the weight or reps of the set are not numeric.
    pub fn toggle_set_completion(
        &self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
        set_id: &SetID,
    ) -> Result<Self, ValidationError> {
        match self.set(group_id, exercise_id, set_id) {
            Some(set) if !set.is_valid() => Err(ValidationError::InvalidSetInput(set_id.clone())),
            _ => Ok(self.modify_set(group_id, exercise_id, set_id, |set| {
                set.completed = !set.completed;
            })),
        }
    }

    /// Drop exercises without a name and muscle groups left without exercises.
    #[must_use]
    pub fn named_exercises_only(&self) -> Self {
        Self {
            muscle_groups: self
                .muscle_groups
                .iter()
                .map(|group| MuscleGroup {
                    id: group.id.clone(),
                    name: group.name.clone(),
                    exercises: group
                        .exercises
                        .iter()
                        .filter(|e| e.is_named())
                        .cloned()
                        .collect(),
                })
                .filter(|group| !group.exercises.is_empty())
                .collect(),
        }
    }

    fn modify_group(&self, group_id: &MuscleGroupID, f: impl FnOnce(&mut MuscleGroup)) -> Self {
        let mut workout = self.clone();
        if let Some(group) = workout.muscle_groups.iter_mut().find(|g| g.id == *group_id) {
            f(group);
        }
        workout
    }

    fn modify_exercise(
        &self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
        f: impl FnOnce(&mut Exercise),
    ) -> Self {
        self.modify_group(group_id, |group| {
            if let Some(exercise) = group.exercises.iter_mut().find(|e| e.id == *exercise_id) {
                f(exercise);
            }
        })
    }

    fn modify_set(
        &self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
        set_id: &SetID,
        f: impl FnOnce(&mut Set),
    ) -> Self {
        self.modify_exercise(group_id, exercise_id, |exercise| {
            if let Some(set) = exercise.sets.iter_mut().find(|s| s.id == *set_id) {
                f(set);
            }
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    pub(crate) fn set(id: &str, weight: &str, reps: &str, completed: bool) -> Set {
        Set {
            id: id.into(),
            weight: weight.to_string(),
            reps: reps.to_string(),
            completed,
            set_type: SetType::Normal,
        }
    }

    pub(crate) fn exercise(id: &str, name: &str, sets: Vec<Set>) -> Exercise {
        Exercise {
            id: id.into(),
            name: name.to_string(),
            notes: String::new(),
            sets,
        }
    }

    pub(crate) fn workout() -> Workout {
        Workout::new(vec![
            MuscleGroup {
                id: "chest".into(),
                name: "Chest".to_string(),
                exercises: vec![
                    exercise(
                        "e1",
                        "Bench Press",
                        vec![set("s1", "100", "10", true), set("s2", "100", "8", false)],
                    ),
                    exercise("e2", "", vec![set("s3", "", "", false)]),
                ],
            },
            MuscleGroup {
                id: "back".into(),
                name: "Back".to_string(),
                exercises: vec![exercise(
                    "e3",
                    "Row",
                    vec![set("s4", "60.5", "12", true), set("s5", "abc", "12", false)],
                )],
            },
        ])
    }

    fn group() -> MuscleGroupID {
        "chest".into()
    }

    #[rstest]
    #[case("100", Some(100.0))]
    #[case(" 62.5 ", Some(62.5))]
    #[case("-5", Some(-5.0))]
    #[case("", None)]
    #[case("abc", None)]
    #[case("inf", None)]
    #[case("NaN", None)]
    fn test_parse_weight(#[case] text: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_weight(text), expected);
    }

    #[rstest]
    #[case("10", Some(10))]
    #[case(" 8", Some(8))]
    #[case("10.5", None)]
    #[case("-1", None)]
    #[case("", None)]
    fn test_parse_reps(#[case] text: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_reps(text), expected);
    }

    #[rstest]
    #[case("100", "10", true)]
    #[case("0", "0", true)]
    #[case("", "10", false)]
    #[case("100", "", false)]
    #[case("heavy", "10", false)]
    fn test_set_is_valid(#[case] weight: &str, #[case] reps: &str, #[case] expected: bool) {
        assert_eq!(set("s", weight, reps, false).is_valid(), expected);
    }

    #[test]
    fn test_set_empty() {
        let set = Set::empty();
        assert_eq!(set.weight, "");
        assert_eq!(set.reps, "");
        assert!(!set.completed);
        assert_eq!(set.set_type, SetType::Normal);
    }

    #[test]
    fn test_set_type_text() {
        assert_eq!(SetType::Warmup.to_string(), "warmup");
        assert_eq!("drop".parse::<SetType>(), Ok(SetType::Drop));
        assert!("superset".parse::<SetType>().is_err());
    }

    #[rstest]
    #[case(
        &[SetType::Normal, SetType::Normal, SetType::Warmup, SetType::Normal, SetType::Normal],
        &["1", "2", "W", "1", "2"]
    )]
    #[case(
        &[SetType::Warmup, SetType::Warmup, SetType::Normal, SetType::Drop, SetType::Normal],
        &["W", "W", "1", "D", "1"]
    )]
    #[case(
        &[SetType::Normal, SetType::Failure, SetType::Normal],
        &["1", "F", "3"]
    )]
    fn test_exercise_set_labels(#[case] types: &[SetType], #[case] expected: &[&str]) {
        let exercise = exercise(
            "e",
            "A",
            types
                .iter()
                .map(|t| Set {
                    set_type: *t,
                    ..Set::empty()
                })
                .collect(),
        );
        assert_eq!(
            exercise
                .set_labels()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            expected
        );
    }

    #[rstest]
    #[case::first_set(vec![set("s1", "100", "10", false)], &[("0", "0")])]
    #[case::filled_previous(
        vec![set("s1", "100", "10", true), set("s2", "", "", false)],
        &[("0", "0"), ("100", "10")]
    )]
    #[case::empty_previous_field(
        vec![
            set("s1", "", "8", false),
            set("s2", "60", "", false),
            set("s3", "", "", false),
        ],
        &[("0", "0"), ("0", "8"), ("60", "0")]
    )]
    fn test_exercise_set_placeholders(
        #[case] sets: Vec<Set>,
        #[case] expected: &[(&str, &str)],
    ) {
        assert_eq!(
            exercise("e", "Bench Press", sets).set_placeholders(),
            expected
                .iter()
                .map(|(weight, reps)| ((*weight).to_string(), (*reps).to_string()))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_workout_add_exercise() {
        let workout = workout();
        let result = workout.add_exercise(&group());
        let exercises = &result.muscle_group(&group()).unwrap().exercises;
        assert_eq!(exercises.len(), 3);
        assert_eq!(exercises[2].name, "");
        assert_eq!(exercises[2].sets.len(), 1);
        assert_eq!(result.muscle_groups[1], workout.muscle_groups[1]);
    }

    #[test]
    fn test_workout_add_exercise_unknown_group() {
        assert_eq!(workout().add_exercise(&"legs".into()), workout());
    }

    #[test]
    fn test_workout_remove_exercise() {
        let result = workout().remove_exercise(&group(), &"e2".into());
        assert_eq!(result.muscle_groups[0].exercises.len(), 1);
        assert_eq!(result.muscle_groups[0].exercises[0].id, "e1".into());
    }

    #[test]
    fn test_workout_remove_muscle_group() {
        let result = workout().remove_muscle_group(&group());
        assert_eq!(result.muscle_groups.len(), 1);
        assert_eq!(result.muscle_groups[0].id, "back".into());
    }

    #[test]
    fn test_workout_add_set() {
        let result = workout().add_set(&group(), &"e2".into());
        let sets = &result.exercise(&group(), &"e2".into()).unwrap().sets;
        assert_eq!(sets.len(), 2);
        assert!(!sets[1].completed);
        assert_eq!(sets[1].set_type, SetType::Normal);
    }

    #[test]
    fn test_workout_remove_set() {
        let result = workout().remove_set(&group(), &"e1".into(), &"s1".into());
        let sets = &result.exercise(&group(), &"e1".into()).unwrap().sets;
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].id, "s2".into());
    }

    #[test]
    fn test_workout_remove_last_set() {
        let workout = workout();
        let result = workout.remove_set(&group(), &"e2".into(), &"s3".into());
        assert_eq!(
            result.exercise(&group(), &"e2".into()).unwrap().sets.len(),
            1
        );
        assert_eq!(result, workout);
    }

    #[test]
    fn test_workout_update_exercise_name_and_notes() {
        let result = workout()
            .update_exercise_name(&group(), &"e2".into(), "Dips")
            .update_exercise_notes(&group(), &"e2".into(), "slow");
        let exercise = result.exercise(&group(), &"e2".into()).unwrap();
        assert_eq!(exercise.name, "Dips");
        assert_eq!(exercise.notes, "slow");
    }

    #[test]
    fn test_workout_update_set() {
        let result = workout()
            .update_set(&group(), &"e2".into(), &"s3".into(), SetField::Weight, "40")
            .update_set(&group(), &"e2".into(), &"s3".into(), SetField::Reps, "x");
        let set = result.set(&group(), &"e2".into(), &"s3".into()).unwrap();
        assert_eq!(set.weight, "40");
        assert_eq!(set.reps, "x");
    }

    #[test]
    fn test_workout_update_set_type() {
        let result = workout()
            .update_set_type(&group(), &"e1".into(), &"s2".into(), SetType::Drop)
            .update_set_type(&group(), &"e1".into(), &"s1".into(), SetType::Failure)
            .update_set_type(&group(), &"e1".into(), &"s1".into(), SetType::Normal);
        let exercise = result.exercise(&group(), &"e1".into()).unwrap();
        assert_eq!(exercise.sets[0].set_type, SetType::Normal);
        assert_eq!(exercise.sets[1].set_type, SetType::Drop);
    }

    #[rstest]
    #[case("e1", "s1", Ok(false))]
    #[case("e1", "s2", Ok(true))]
    #[case("e2", "s3", Err(ValidationError::InvalidSetInput("s3".into())))]
    fn test_workout_toggle_set_completion(
        #[case] exercise_id: &str,
        #[case] set_id: &str,
        #[case] expected: Result<bool, ValidationError>,
    ) {
        let workout = workout();
        let result = workout.toggle_set_completion(&group(), &exercise_id.into(), &set_id.into());
        assert_eq!(
            result.map(|w| w
                .set(&group(), &exercise_id.into(), &set_id.into())
                .unwrap()
                .completed),
            expected
        );
    }

    #[test]
    fn test_workout_toggle_invalid_set_keeps_tree() {
        let workout = workout();
        let before = workout.clone();
        assert!(
            workout
                .toggle_set_completion(&"back".into(), &"e3".into(), &"s5".into())
                .is_err()
        );
        assert_eq!(workout, before);
    }

    #[test]
    fn test_workout_named_exercises_only() {
        let workout = Workout::new(vec![
            MuscleGroup {
                id: "chest".into(),
                name: "Chest".to_string(),
                exercises: vec![
                    exercise("e1", "", vec![set("s1", "", "", false)]),
                    exercise("e2", "Bench Press", vec![set("s2", "100", "10", true)]),
                ],
            },
            MuscleGroup {
                id: "legs".into(),
                name: "Legs".to_string(),
                exercises: vec![exercise("e3", "  ", vec![set("s3", "", "", false)])],
            },
        ]);
        let result = workout.named_exercises_only();
        assert_eq!(result.muscle_groups.len(), 1);
        assert_eq!(result.muscle_groups[0].exercises.len(), 1);
        assert_eq!(result.muscle_groups[0].exercises[0].name, "Bench Press");
    }

    #[rstest]
    #[case(set("s", "", "", false), false)]
    #[case(set("s", "20", "", false), true)]
    #[case(set("s", "", "5", false), true)]
    #[case(set("s", "", "", true), true)]
    fn test_workout_has_progress(#[case] set: Set, #[case] expected: bool) {
        let workout = Workout::new(vec![MuscleGroup {
            id: "core".into(),
            name: "Core".to_string(),
            exercises: vec![exercise("e", "Plank", vec![set])],
        }]);
        assert_eq!(workout.has_progress(), expected);
    }
}
