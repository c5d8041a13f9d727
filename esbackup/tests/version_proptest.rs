//! Property tests for the version policy and resolver registry.

use esbackup::version::{self, highest_supported_major, SUPPORTED_BANDS};
use esbackup::{Operation, Resolver, VersionBand};
use proptest::prelude::*;

fn supported_major() -> impl Strategy<Value = u32> {
    prop::sample::select(SUPPORTED_BANDS.iter().map(VersionBand::major).collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn supported_versions_accepted(
        major in supported_major(),
        minor in 0u32..100,
        patch in 0u32..100,
    ) {
        let v = format!("{}.{}.{}", major, minor, patch);
        prop_assert!(version::is_supported(&v));
    }

    #[test]
    fn versions_above_highest_rejected(
        offset in 1u32..1000,
        minor in 0u32..100,
        patch in 0u32..100,
    ) {
        let v = format!("{}.{}.{}", highest_supported_major() + offset, minor, patch);
        prop_assert!(!version::is_supported(&v));
    }

    #[test]
    fn arbitrary_input_never_panics(input in ".*") {
        let _ = version::is_supported(&input);
        let _ = version::major_token(&input);
    }

    #[test]
    fn resolver_is_deterministic(major in supported_major()) {
        let resolver = Resolver::new();
        let band = VersionBand(major);
        for op in Operation::all() {
            let a = resolver.resolve(op, band).unwrap().name();
            let b = resolver.resolve(op, band).unwrap().name();
            prop_assert_eq!(a, b);
        }
    }
}

#[test]
fn major_token_matches_band() {
    for band in SUPPORTED_BANDS {
        let v = format!("{}.3.1", band.major());
        let token = version::major_token(&v).unwrap();
        assert_eq!(token.parse::<VersionBand>().unwrap(), *band);
    }
}
