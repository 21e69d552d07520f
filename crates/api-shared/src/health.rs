use crate::wire::HealthRes;

/// Simple health service shared by the REST API and the process runner.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Static method to check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "OPG triage is alive".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_health_reports_ok() {
        let res = HealthService::check_health();
        assert!(res.ok);
        assert!(!res.message.is_empty());
    }
}
