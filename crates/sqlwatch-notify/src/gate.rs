//! Cooldown and escalation gate for one template.
//!
//! Rules, first match wins:
//! 1. Never notified: notify.
//! 2. Current average is at least `degradation_multiplier` times the average
//!    recorded at the last notification: notify, cooldown ignored.
//! 3. Otherwise notify only once `cooldown_hours` have passed since the last
//!    notification.

use chrono::{DateTime, Duration, Utc};
use sqlwatch_core::models::QueryTemplate;
use sqlwatch_observability::tracing_setup::events;

/// Why the gate let a notification through or held it back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateDecision {
    FirstContact,
    /// `ratio` is current / last-notified average.
    Escalation { ratio: f64 },
    CooldownElapsed,
    Suppressed { remaining: Duration },
}

impl GateDecision {
    pub fn should_notify(&self) -> bool {
        !matches!(self, Self::Suppressed { .. })
    }

    /// Stable label carried into `NotificationRequest::reason` and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::FirstContact => "first_contact",
            Self::Escalation { .. } => "escalation",
            Self::CooldownElapsed => "cooldown_elapsed",
            Self::Suppressed { .. } => "suppressed",
        }
    }
}

/// Stateless gate. Notification state lives on the template and is changed
/// only through [`TemplateNotificationGate::update_notification_info_at`].
pub struct TemplateNotificationGate;

impl TemplateNotificationGate {
    pub fn decide(
        template: &QueryTemplate,
        cooldown_hours: u32,
        degradation_multiplier: f64,
        current_avg_time: f64,
    ) -> GateDecision {
        Self::decide_at(
            template,
            cooldown_hours,
            degradation_multiplier,
            current_avg_time,
            Utc::now(),
        )
    }

    pub fn decide_at(
        template: &QueryTemplate,
        cooldown_hours: u32,
        degradation_multiplier: f64,
        current_avg_time: f64,
        now: DateTime<Utc>,
    ) -> GateDecision {
        let decision = evaluate(
            template,
            cooldown_hours,
            degradation_multiplier,
            current_avg_time,
            now,
        );
        events::notification_gated(
            &template.fingerprint,
            decision.should_notify(),
            decision.reason(),
        );
        decision
    }

    pub fn should_notify(
        template: &QueryTemplate,
        cooldown_hours: u32,
        degradation_multiplier: f64,
        current_avg_time: f64,
    ) -> bool {
        Self::decide(template, cooldown_hours, degradation_multiplier, current_avg_time)
            .should_notify()
    }

    pub fn should_notify_at(
        template: &QueryTemplate,
        cooldown_hours: u32,
        degradation_multiplier: f64,
        current_avg_time: f64,
        now: DateTime<Utc>,
    ) -> bool {
        Self::decide_at(
            template,
            cooldown_hours,
            degradation_multiplier,
            current_avg_time,
            now,
        )
        .should_notify()
    }

    /// Record a successful send. Call exactly once per delivered notification.
    pub fn update_notification_info(template: &mut QueryTemplate, current_avg_time: f64) {
        Self::update_notification_info_at(template, current_avg_time, Utc::now());
    }

    pub fn update_notification_info_at(
        template: &mut QueryTemplate,
        current_avg_time: f64,
        now: DateTime<Utc>,
    ) {
        template.last_notified_at = Some(now);
        template.last_notified_avg_time = Some(current_avg_time);
    }
}

fn evaluate(
    template: &QueryTemplate,
    cooldown_hours: u32,
    degradation_multiplier: f64,
    current_avg_time: f64,
    now: DateTime<Utc>,
) -> GateDecision {
    let Some(last_notified_at) = template.last_notified_at else {
        return GateDecision::FirstContact;
    };

    if let Some(last_avg) = template.last_notified_avg_time.filter(|avg| *avg > 0.0) {
        let ratio = current_avg_time / last_avg;
        if ratio >= degradation_multiplier {
            return GateDecision::Escalation { ratio };
        }
    }

    let cooldown = Duration::hours(i64::from(cooldown_hours));
    let elapsed = now - last_notified_at;
    if elapsed >= cooldown {
        GateDecision::CooldownElapsed
    } else {
        GateDecision::Suppressed {
            remaining: cooldown - elapsed,
        }
    }
}
