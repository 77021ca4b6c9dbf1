//! Landing page. Public; the only screen outside the gate.

use serde::Serialize;

/// What the landing screen needs to render.
#[derive(Debug, Clone, Serialize)]
pub struct LandingView {
    /// Set when the gate bounced a signed-out user here; the UI opens the
    /// sign-in prompt.
    pub sign_in_prompt: bool,
}

/// Build the landing view from the raw query string.
pub fn landing_view(query: Option<&str>) -> LandingView {
    let sign_in_prompt = query
        .map(|q| q.split('&').any(|pair| pair == "sign-in=true"))
        .unwrap_or(false);
    LandingView { sign_in_prompt }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_marker_opens_the_prompt() {
        assert!(landing_view(Some("sign-in=true")).sign_in_prompt);
        assert!(landing_view(Some("utm=x&sign-in=true")).sign_in_prompt);
        assert!(!landing_view(Some("sign-in=false")).sign_in_prompt);
        assert!(!landing_view(None).sign_in_prompt);
    }
}
