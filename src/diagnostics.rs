// ABOUTME: Diagnostics accumulator for non-fatal warnings during a promotion run.
// ABOUTME: Collects problems that don't fail the run but should be shown to users.

/// Collects non-fatal warnings during a run.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether a warning of the given kind was recorded.
    pub fn contains(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}

/// A non-fatal warning collected during a run.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// The daemon process could not be launched.
    pub fn daemon_start(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::DaemonStart,
            message: message.into(),
        }
    }

    /// The daemon never answered a readiness probe.
    pub fn daemon_unreachable(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::DaemonUnreachable,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Launching the daemon failed; later commands will likely fail too.
    DaemonStart,
    /// Readiness polling gave up before the daemon answered.
    DaemonUnreachable,
}
