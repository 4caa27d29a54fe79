use crate::models::summary::GoalProgress;

/// Ages below this have no milestone.
pub const MIN_GOAL_AGE: u32 = 18;

/// `(max age inclusive, net-worth milestone)`, scanned in ascending order.
pub const NET_ASSET_GOALS: &[(u32, f64)] = &[
    (20, 3_650.0),
    (25, 18_250.0),
    (30, 73_000.0),
    (35, 219_000.0),
    (40, 438_000.0),
    (45, 730_000.0),
    (50, 1_095_000.0),
    (55, 1_460_000.0),
    (60, 1_825_000.0),
];

/// Milestone for anyone older than the last breakpoint.
pub const FINAL_NET_ASSET_GOAL: f64 = 2_000_000.0;

/// Age-based net-worth milestones.
pub struct GoalService;

impl GoalService {
    pub fn new() -> Self {
        Self
    }

    /// The milestone for `age`: 0 below 18, first matching breakpoint
    /// otherwise, and the final value past the last breakpoint.
    pub fn net_asset_goal(&self, age: u32) -> f64 {
        if age < MIN_GOAL_AGE {
            return 0.0;
        }
        NET_ASSET_GOALS
            .iter()
            .find(|(max_age, _)| age <= *max_age)
            .map(|(_, goal)| *goal)
            .unwrap_or(FINAL_NET_ASSET_GOAL)
    }

    pub fn goal_progress(&self, age: u32, net_worth: f64) -> GoalProgress {
        let goal = self.net_asset_goal(age);
        GoalProgress {
            age,
            goal,
            net_worth,
            difference: net_worth - goal,
        }
    }
}

impl Default for GoalService {
    fn default() -> Self {
        Self::new()
    }
}
