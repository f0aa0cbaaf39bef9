//! Property-based tests for record parsing, domain matching and signing.
//!
//! Signing uses real RSA-PSS, so the cryptographic properties run with a
//! reduced case count.

use std::time::Duration;

use mailsig::{KeyPair, SignatureWindow, Signer, Verifier, domains_match, parse_txt};
use proptest::prelude::*;

const PRIMARY_PRIVATE: &[u8] = include_bytes!("fixtures/primary_private.pem");
const PRIMARY_PUBLIC: &[u8] = include_bytes!("fixtures/primary_public.pem");

// ============================================================================
// STRATEGY DEFINITIONS
// ============================================================================

/// Base64url-ish token text: no commas, no whitespace.
fn token_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9_.-]{1,64}").expect("valid regex")
}

/// Simple DNS-style domains.
fn domain_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9-]{0,15}\\.[a-z]{2,6}").expect("valid regex")
}

/// Text that cannot contain the `mailsig:` prefix (no colon).
fn unrelated_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 =;._-]{0,80}").expect("valid regex")
}

fn keys() -> (Signer, Verifier) {
    let (signing_key, verifying_key) = KeyPair::from_pem(PRIMARY_PRIVATE, PRIMARY_PUBLIC)
        .unwrap()
        .into_parts();
    (
        Signer::new(signing_key, Duration::from_secs(3600)).unwrap(),
        Verifier::new(verifying_key),
    )
}

// ============================================================================
// RECORD PARSING
// ============================================================================

proptest! {
    #[test]
    fn single_token_record_parses(current in token_strategy()) {
        let record = format!("mailsig:{current}");
        prop_assert_eq!(parse_txt(&record), Some(SignatureWindow::current_only(current)));
    }

    #[test]
    fn two_token_record_parses(current in token_strategy(), previous in token_strategy()) {
        let record = format!("mailsig:{current},{previous}");
        prop_assert_eq!(
            parse_txt(&record),
            Some(SignatureWindow::new(current, Some(previous)))
        );
    }

    #[test]
    fn rendered_window_parses_back(current in token_strategy(), previous in proptest::option::of(token_strategy())) {
        let window = SignatureWindow::new(current, previous);
        prop_assert_eq!(parse_txt(&window.to_txt()), Some(window));
    }

    #[test]
    fn leading_text_is_skipped(prefix in unrelated_text_strategy(), current in token_strategy()) {
        let record = format!("{prefix} mailsig:{current}");
        prop_assert_eq!(parse_txt(&record).map(|w| w.current), Some(current));
    }

    #[test]
    fn records_without_prefix_never_parse(text in unrelated_text_strategy()) {
        prop_assert_eq!(parse_txt(&text), None);
    }

    #[test]
    fn parse_never_panics(text in ".{0,200}") {
        let _ = parse_txt(&text);
    }
}

// ============================================================================
// DOMAIN MATCHING
// ============================================================================

proptest! {
    #[test]
    fn domain_matches_any_ascii_case(domain in domain_strategy()) {
        prop_assert!(domains_match(&domain, &domain.to_ascii_uppercase()));
    }

    #[test]
    fn domain_matches_fully_qualified_form(domain in domain_strategy()) {
        let fully_qualified = format!("{domain}.");
        prop_assert!(domains_match(&domain, &fully_qualified));
    }

    #[test]
    fn subdomain_never_matches_parent(label in "[a-z]{1,10}", domain in domain_strategy()) {
        let subdomain = format!("{label}.{domain}");
        prop_assert!(!domains_match(&domain, &subdomain));
    }
}

// ============================================================================
// SIGN/VERIFY
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn issued_token_verifies_for_its_domain(domain in domain_strategy()) {
        let (signer, verifier) = keys();
        let token = signer.sign(&domain).unwrap();

        prop_assert!(verifier.verify(&domain, &token));
    }

    #[test]
    fn issued_token_never_verifies_for_other_domain(
        domain in domain_strategy(),
        other in domain_strategy(),
    ) {
        prop_assume!(!domains_match(&domain, &other));
        let (signer, verifier) = keys();
        let token = signer.sign(&domain).unwrap();

        prop_assert!(!verifier.verify(&other, &token));
    }

    #[test]
    fn truncated_token_never_verifies(domain in domain_strategy(), cut in 1usize..64) {
        let (signer, verifier) = keys();
        let token = signer.sign(&domain).unwrap();
        let truncated = &token[..token.len() - cut];

        prop_assert!(!verifier.verify(&domain, truncated));
    }
}
