//! Terminal detection

use std::io::IsTerminal;

/// CI markers that rule out fancy output even on a TTY
const CI_VARS: [&str; 9] = [
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
    "BUILDKITE",
    "TEAMCITY_VERSION",
    "TF_BUILD",
];

/// Decides how status output is rendered
#[derive(Debug, Clone, Copy)]
pub struct UiContext {
    fancy: bool,
}

impl UiContext {
    /// Fancy output only when stdout is a terminal outside CI
    pub fn detect() -> Self {
        let fancy = std::io::stdout().is_terminal()
            && !CI_VARS.iter().any(|var| std::env::var_os(var).is_some());
        Self { fancy }
    }

    /// Plain bracketed output regardless of environment
    #[cfg(test)]
    pub fn non_interactive() -> Self {
        Self { fancy: false }
    }

    pub fn use_fancy_output(&self) -> bool {
        self.fancy
    }
}
