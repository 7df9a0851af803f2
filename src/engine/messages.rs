use crate::domain::{Evidence, ProbabilityZone};

/// One evidence update to run off the request-handling thread.
/// `job_id` correlates outcomes, which arrive in completion order.
#[derive(Debug, Clone)]
pub struct UpdateJob {
    pub job_id: u64,
    pub prior_zones: Vec<ProbabilityZone>,
    pub evidence: Evidence,
}

#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub job_id: u64,
    pub zones: Vec<ProbabilityZone>,
}
