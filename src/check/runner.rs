//! Single check run: fetch, parse, select, evaluate.

use crate::check::evaluator::{evaluate, Thresholds};
use crate::check::verdict::CheckResult;
use crate::config::{validate_config, CheckConfig, ConfigError, ValidationError};
use crate::stats::{parse_stats, select, Selection, ServiceMatcher, StatsClient, StatsError};

/// A validated, ready-to-run HAProxy status check.
#[derive(Debug)]
pub struct HaproxyCheck {
    config: CheckConfig,
    matcher: ServiceMatcher,
    thresholds: Thresholds,
}

impl HaproxyCheck {
    /// Validate the configuration and compile the service matcher.
    pub fn new(mut config: CheckConfig) -> Result<Self, ConfigError> {
        config.normalize();
        validate_config(&config).map_err(ConfigError::Validation)?;

        // The anchored form is compiled separately from the validated one.
        let matcher = ServiceMatcher::new(&config.service, config.exact_match).map_err(|e| {
            ConfigError::Validation(vec![ValidationError::InvalidPattern {
                pattern: config.service.clone(),
                reason: e.to_string(),
            }])
        })?;
        let thresholds = Thresholds::from(&config);

        Ok(Self {
            config,
            matcher,
            thresholds,
        })
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Run the check once. Every failure resolves to an UNKNOWN result.
    pub async fn run(&self) -> CheckResult {
        let result = match self.collect().await {
            Ok(selection) => self.evaluate(&selection),
            Err(e) => CheckResult::unknown(e.to_string()),
        };

        tracing::info!(verdict = %result.verdict, message = %result.message, "Check complete");
        result
    }

    /// Evaluate an already fetched CSV body.
    pub fn evaluate_body(&self, body: &str) -> Result<CheckResult, StatsError> {
        let records = parse_stats(body)?;
        let selection = select(records, &self.matcher);
        Ok(self.evaluate(&selection))
    }

    fn evaluate(&self, selection: &Selection) -> CheckResult {
        evaluate(selection, self.matcher.pattern(), &self.thresholds)
    }

    async fn collect(&self) -> Result<Selection, StatsError> {
        let client = StatsClient::new(&self.config)?;
        let response = client.fetch().await?;
        let body = client.ensure_ok(response)?;
        let records = parse_stats(&body)?;
        Ok(select(records, &self.matcher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::verdict::Verdict;

    const BODY: &str = "# pxname,svname,qcur,qmax,scur,smax,slim,status,check_status,\n\
        api,FRONTEND,,,4,9,100,OPEN,,\n\
        api,api1,0,0,1,3,10,UP,L7OK,\n\
        api,api2,0,0,0,2,10,MAINT,,\n\
        api,api3,0,0,0,2,10,DOWN,L4TOUT,\n\
        api,BACKEND,0,0,1,5,20,UP,,\n\
        api-internal,int1,0,0,0,1,10,DOWN,L4CON,\n";

    fn check(service: &str, exact: bool) -> HaproxyCheck {
        HaproxyCheck::new(CheckConfig {
            hostname: "lb1".into(),
            service: service.into(),
            exact_match: exact,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = HaproxyCheck::new(CheckConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 2));
    }

    #[test]
    fn test_new_normalizes_path() {
        let check = HaproxyCheck::new(CheckConfig {
            hostname: "lb1".into(),
            service: "api".into(),
            path: "stats".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(check.config().path, "/stats");
    }

    #[test]
    fn test_maint_rows_are_invisible() {
        let result = check("api", true).evaluate_body(BODY).unwrap();
        assert_eq!(
            result,
            CheckResult::ok("UP: 50% of 2 /api/ services, DOWN: api/api3[L4TOUT]")
        );
    }

    #[test]
    fn test_substring_pulls_in_other_proxies() {
        let result = check("api", false).evaluate_body(BODY).unwrap();
        assert_eq!(result.verdict, Verdict::Warning);
        assert_eq!(
            result.message,
            "UP: 33% of 3 /api/ services, DOWN: api/api3[L4TOUT], api-internal/int1[L4CON]"
        );
    }

    #[test]
    fn test_no_match() {
        let result = check("^db$", false).evaluate_body(BODY).unwrap();
        assert_eq!(result, CheckResult::warning("No services matching /^db$/"));
    }

    #[test]
    fn test_parse_failure() {
        let err = check("api", false).evaluate_body("# pxname,svname\n").unwrap_err();
        assert!(matches!(err, StatsError::Parse(_)));
    }
}
