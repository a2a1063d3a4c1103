use proptest::prelude::*;
use sqlwatch_runtime::DecisionCore;
use test_fixtures::builders::t0;

proptest! {
    #[test]
    fn literal_changes_share_a_template(id in 0u32..1_000_000, name in "[a-z]{1,12}") {
        let core = DecisionCore::default();
        let a = core
            .ingest_at(&format!("SELECT * FROM users WHERE id = {id} AND name = '{name}'"), 1.0, t0())
            .unwrap();
        let b = core
            .ingest_at("SELECT * FROM users WHERE id = 1 AND name = 'x'", 1.0, t0())
            .unwrap();
        prop_assert_eq!(a.fingerprint.hash, b.fingerprint.hash);
        prop_assert_eq!(core.registry().len(), 1);
    }

    #[test]
    fn ingest_never_leaks_a_phone_number(suffix in 10_000_000u32..99_999_999) {
        let core = DecisionCore::default();
        let phone = format!("139{suffix}");
        let outcome = core
            .ingest_at(&format!("SELECT * FROM t WHERE phone = '{phone}'"), 1.0, t0())
            .unwrap();
        prop_assert!(!outcome.masked_sql.contains(&phone));
        prop_assert!(!outcome.fingerprint.template.contains(&phone));
    }
}
