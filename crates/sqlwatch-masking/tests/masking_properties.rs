use proptest::prelude::*;
use sqlwatch_fingerprint::fingerprint;
use sqlwatch_masking::{contains_sensitive, mask, SqlMasker};

/// Sensitive literal in one of the shapes the masker knows.
fn sensitive_literal() -> impl Strategy<Value = String> {
    prop_oneof![
        ("1[3-9][0-9]{9}").prop_map(|p| format!("'{p}'")),
        ("1[3-9][0-9]{9}").prop_map(|p| p),
        ("[1-9][0-9]{0,2}", "[0-9]{1,3}", "[0-9]{1,3}", "[0-9]{1,3}")
            .prop_map(|(a, b, c, d)| format!("'{a}.{b}.{c}.{d}'")),
        ("[a-z][a-z0-9]{0,7}", "[a-z]{2,8}").prop_map(|(u, d)| format!("'{u}@{d}.com'")),
        ("62[0-9]{14}").prop_map(|c| format!("'{c}'")),
        ("[A-Za-z0-9!#]{1,12}").prop_map(|p| format!("'{p}'")),
    ]
}

// ── No sensitive data: output is the input ────────────────────────────────

proptest! {
    #[test]
    fn text_without_digits_or_markers_is_unchanged(s in "[a-zA-Z ,()_]{0,80}") {
        prop_assert_eq!(mask(&s), s);
    }
}

// ── Idempotence ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn masking_is_idempotent(
        column in "[a-z_]{1,10}",
        value in sensitive_literal(),
    ) {
        let sql = format!("SELECT * FROM t WHERE {column} = {value}");
        let once = mask(&sql);
        prop_assert_eq!(mask(&once), once);
    }

    #[test]
    fn secret_assignments_are_idempotent(
        key in prop_oneof![
            Just("password"), Just("pwd"), Just("token"), Just("api_key"), Just("secret")
        ],
        value in "[A-Za-z0-9_]{8,20}",
    ) {
        let sql = format!("UPDATE cfg SET {key} = '{value}'");
        let once = mask(&sql);
        prop_assert!(!once.contains(&value), "value survived: {}", once);
        prop_assert_eq!(mask(&once), once);
    }
}

// ── Masked output carries no detectable value ─────────────────────────────

proptest! {
    #[test]
    fn phone_never_survives(p in "1[3-9][0-9]{9}") {
        let sql = format!("SELECT * FROM u WHERE phone = '{p}'");
        let masked = mask(&sql);
        prop_assert!(!masked.contains(&p));
        prop_assert!(!contains_sensitive(&masked));
    }

    #[test]
    fn email_keeps_first_char_and_domain(
        user in "[a-z][a-z0-9]{1,10}",
        domain in "[a-z]{2,10}",
    ) {
        let sql = format!("SELECT * FROM u WHERE mail = '{user}@{domain}.org'");
        let masked = mask(&sql);
        let first = &user[..1];
        let expected = format!("'{first}***@{domain}.org'");
        prop_assert!(masked.contains(&expected), "{}", masked);
    }
}

// ── Masking and fingerprinting commute on literals ────────────────────────

proptest! {
    #[test]
    fn masking_does_not_change_fingerprint(
        column in "[a-z]{3,10}",
        value in sensitive_literal(),
    ) {
        let sql = format!("SELECT id FROM t WHERE {column} = {value} LIMIT 10");
        let masked = mask(&sql);
        prop_assert_eq!(fingerprint(&masked).hash, fingerprint(&sql).hash);
    }
}

// ── Robustness ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn never_panics_and_never_falls_back(s in "\\PC{0,200}") {
        let outcome = SqlMasker::new().mask_with_report(&s);
        prop_assert!(!outcome.fell_back);
        prop_assert!(!outcome.is_degraded());
    }
}
