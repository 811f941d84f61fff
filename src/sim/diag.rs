//! Numeric anomaly reporting and recovery
//!
//! The engine never surfaces numeric failures to the caller. Every NaN,
//! infinity or degenerate normalization is reported and replaced with a safe
//! fallback (zero component, skipped impulse, dropped contact) so the tick
//! loop keeps running deterministically. Reports go through the `log` facade,
//! so whatever subscriber the host installs is the diagnostic sink.

use glam::DVec2;

/// What to do when corrupted numbers are detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recovery {
    /// Warn and substitute a safe value. The production default.
    #[default]
    SelfHeal,
    /// Panic at the detection site. For tests that want corruption loud.
    FailFast,
}

impl Recovery {
    pub(crate) fn report(self, context: &str, detail: std::fmt::Arguments<'_>) {
        match self {
            Recovery::SelfHeal => log::warn!("{context}: {detail}"),
            Recovery::FailFast => panic!("{context}: {detail}"),
        }
    }
}

/// Zero any non-finite component of `v`, reporting the substitution.
pub(crate) fn heal_vec(recovery: Recovery, context: &str, v: DVec2) -> DVec2 {
    if v.is_finite() {
        return v;
    }
    recovery.report(
        context,
        format_args!("non-finite vector {v}, zeroing bad components"),
    );
    DVec2::new(
        if v.x.is_finite() { v.x } else { 0.0 },
        if v.y.is_finite() { v.y } else { 0.0 },
    )
}

/// Zero `s` if it is non-finite, reporting the substitution.
pub(crate) fn heal_scalar(recovery: Recovery, context: &str, s: f64) -> f64 {
    if s.is_finite() {
        return s;
    }
    recovery.report(context, format_args!("non-finite value {s}, zeroing"));
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heal_vec_zeroes_only_bad_components() {
        let healed = heal_vec(
            Recovery::SelfHeal,
            "test",
            DVec2::new(3.0, f64::NAN),
        );
        assert_eq!(healed, DVec2::new(3.0, 0.0));

        let fine = DVec2::new(1.0, -2.0);
        assert_eq!(heal_vec(Recovery::SelfHeal, "test", fine), fine);
    }

    #[test]
    fn test_heal_scalar_catches_infinity() {
        assert_eq!(heal_scalar(Recovery::SelfHeal, "test", f64::INFINITY), 0.0);
        assert_eq!(heal_scalar(Recovery::SelfHeal, "test", 1.5), 1.5);
    }

    #[test]
    #[should_panic]
    fn test_fail_fast_panics() {
        heal_scalar(Recovery::FailFast, "test", f64::NAN);
    }
}
