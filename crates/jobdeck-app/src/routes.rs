//! Client-side route table.

/// Route paths.
pub const LANDING: &str = "/";
pub const ONBOARDING: &str = "/onboarding";
pub const JOBS: &str = "/jobs";
pub const POST_JOB: &str = "/post-job";
pub const SAVED_JOBS: &str = "/saved-jobs";
pub const MY_JOBS: &str = "/my-jobs";

/// Where signed-out users land: home with the sign-in prompt marker.
pub const SIGN_IN_REDIRECT: &str = "/?sign-in=true";

/// The application's routes. Everything except the landing page sits behind
/// the access gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Onboarding,
    Jobs,
    Job(i64),
    PostJob,
    SavedJobs,
    MyJobs,
}

impl Route {
    /// Parse a path (query string ignored) into a route.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split('?').next().unwrap_or(path);
        match path {
            LANDING => Some(Route::Landing),
            ONBOARDING => Some(Route::Onboarding),
            JOBS => Some(Route::Jobs),
            POST_JOB => Some(Route::PostJob),
            SAVED_JOBS => Some(Route::SavedJobs),
            MY_JOBS => Some(Route::MyJobs),
            _ => path
                .strip_prefix("/job/")
                .and_then(|id| id.parse().ok())
                .map(Route::Job),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => LANDING.to_string(),
            Route::Onboarding => ONBOARDING.to_string(),
            Route::Jobs => JOBS.to_string(),
            Route::Job(id) => format!("/job/{}", id),
            Route::PostJob => POST_JOB.to_string(),
            Route::SavedJobs => SAVED_JOBS.to_string(),
            Route::MyJobs => MY_JOBS.to_string(),
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Landing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::Landing,
            Route::Onboarding,
            Route::Jobs,
            Route::Job(17),
            Route::PostJob,
            Route::SavedJobs,
            Route::MyJobs,
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn query_strings_are_ignored() {
        assert_eq!(Route::parse("/?sign-in=true"), Some(Route::Landing));
        assert_eq!(Route::parse("/jobs?search=go"), Some(Route::Jobs));
    }

    #[test]
    fn only_the_landing_page_is_public() {
        assert!(!Route::Landing.is_protected());
        assert!(Route::Onboarding.is_protected());
        assert!(Route::Job(1).is_protected());
    }

    #[test]
    fn junk_paths_do_not_parse() {
        assert_eq!(Route::parse("/job/abc"), None);
        assert_eq!(Route::parse("/nope"), None);
    }
}
