use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use sqlwatch_core::config::SeverityThresholds;
use sqlwatch_core::models::QueryTemplate;
use sqlwatch_notify::{severity_for, TemplateNotificationGate as Gate};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

proptest! {
    #[test]
    fn first_contact_always_notifies(
        cooldown in 1u32..=168,
        multiplier in 1.1f64..=10.0,
        current in 0.0f64..1000.0,
    ) {
        let tpl = QueryTemplate::new("fp", "SELECT ?", t0());
        prop_assert!(Gate::should_notify_at(&tpl, cooldown, multiplier, current, t0()));
    }

    #[test]
    fn elapsed_cooldown_always_notifies(
        cooldown in 1u32..=168,
        extra_minutes in 0i64..10_000,
        last in 0.1f64..100.0,
        current in 0.0f64..1000.0,
    ) {
        let mut tpl = QueryTemplate::new("fp", "SELECT ?", t0());
        Gate::update_notification_info_at(&mut tpl, last, t0());
        let now = t0() + Duration::hours(i64::from(cooldown)) + Duration::minutes(extra_minutes);
        prop_assert!(Gate::should_notify_at(&tpl, cooldown, 1.5, current, now));
    }

    #[test]
    fn inside_cooldown_only_escalation_notifies(
        cooldown in 2u32..=168,
        last in 0.1f64..100.0,
        current in 0.0f64..1000.0,
        multiplier in 1.1f64..=10.0,
    ) {
        let mut tpl = QueryTemplate::new("fp", "SELECT ?", t0());
        Gate::update_notification_info_at(&mut tpl, last, t0());
        let now = t0() + Duration::hours(1);
        let notify = Gate::should_notify_at(&tpl, cooldown, multiplier, current, now);
        prop_assert_eq!(notify, current / last >= multiplier);
    }

    #[test]
    fn severity_is_monotonic(a in 0.0f64..200.0, b in 0.0f64..200.0) {
        let th = SeverityThresholds::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(severity_for(lo, &th) <= severity_for(hi, &th));
    }
}
