use crate::{Set, Workout};

/// Estimate the one-repetition maximum using the Brzycki formula.
///
/// Returns 0 if no estimate is possible, i.e. for reps outside of `1..37` or a non-positive
/// estimate.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn estimated_one_rep_max(weight: f64, reps: u32) -> u32 {
    if reps == 0 || reps >= 37 || !weight.is_finite() {
        return 0;
    }
    let estimate = (weight * 36.0 / f64::from(37 - reps)).round();
    if estimate > 0.0 { estimate as u32 } else { 0 }
}

/// The completed set of an exercise with the highest estimated one-repetition maximum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestSet {
    pub exercise: String,
    pub weight: String,
    pub reps: String,
    pub one_rep_max: u32,
}

impl Set {
    /// Volume of the set, counting only completed sets with numeric weight and reps.
    #[must_use]
    pub fn volume(&self) -> f64 {
        if !self.completed {
            return 0.0;
        }
        match (self.weight_value(), self.reps_value()) {
            (Some(weight), Some(reps)) => weight * f64::from(reps),
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn estimated_one_rep_max(&self) -> u32 {
        match (self.weight_value(), self.reps_value()) {
            (Some(weight), Some(reps)) => estimated_one_rep_max(weight, reps),
            _ => 0,
        }
    }
}

impl Workout {
    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.sets().map(Set::volume).sum()
    }

    #[must_use]
    pub fn total_reps(&self) -> u32 {
        self.sets()
            .filter(|s| s.completed)
            .map(|s| s.reps_value().unwrap_or(0))
            .fold(0, u32::saturating_add)
    }

    /// Percentage of completed sets of all named exercises.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn completion_percentage(&self) -> u32 {
        let (total, completed) = self
            .exercises()
            .filter(|e| e.is_named())
            .flat_map(|e| e.sets.iter())
            .fold((0_u32, 0_u32), |(total, completed), set| {
                (total + 1, completed + u32::from(set.completed))
            });
        if total == 0 {
            return 0;
        }
        (f64::from(completed) / f64::from(total) * 100.0).round() as u32
    }

    /// Number of completed sets per exercise name, in order of first appearance.
    #[must_use]
    pub fn completed_sets_per_exercise(&self) -> Vec<(String, usize)> {
        let mut result: Vec<(String, usize)> = vec![];
        for exercise in self.exercises().filter(|e| e.is_named()) {
            let completed = exercise.sets.iter().filter(|s| s.completed).count();
            match result.iter_mut().find(|(name, _)| *name == exercise.name) {
                Some((_, count)) => *count += completed,
                None => result.push((exercise.name.clone(), completed)),
            }
        }
        result
    }

    /// Best completed set per exercise name, in order of first appearance.
    #[must_use]
    pub fn best_sets(&self) -> Vec<BestSet> {
        let mut result: Vec<BestSet> = vec![];
        for exercise in self.exercises().filter(|e| e.is_named()) {
            let Some(best) = exercise
                .sets
                .iter()
                .filter(|s| s.completed)
                .map(|s| (s, s.estimated_one_rep_max()))
                .filter(|(_, one_rep_max)| *one_rep_max > 0)
                .fold(None, |best: Option<(&Set, u32)>, (set, one_rep_max)| match best {
                    Some((_, best_one_rep_max)) if best_one_rep_max >= one_rep_max => best,
                    _ => Some((set, one_rep_max)),
                })
            else {
                continue;
            };
            let candidate = BestSet {
                exercise: exercise.name.clone(),
                weight: best.0.weight.clone(),
                reps: best.0.reps.clone(),
                one_rep_max: best.1,
            };
            match result.iter_mut().find(|b| b.exercise == exercise.name) {
                Some(existing) if existing.one_rep_max < candidate.one_rep_max => {
                    *existing = candidate;
                }
                Some(_) => {}
                None => result.push(candidate),
            }
        }
        result
    }
}
