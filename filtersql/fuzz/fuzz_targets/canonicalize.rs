#![no_main]

use arbitrary::Arbitrary;
use filtersql::{Bound, ColumnPolicy, OperatorKind, Policy, ValueMatcher};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    filter: String,
    bounds: [u8; 4],
    debug: bool,
}

const UNLIMITED: [u8; 4] = [4; 4];

fn bound(raw: u8) -> Bound {
    match raw % 5 {
        4 => Bound::Unlimited,
        n => Bound::AtMost(usize::from(n)),
    }
}

fn policy(bounds: [u8; 4]) -> Policy {
    let mut a = ColumnPolicy::new("a");
    let mut b = ColumnPolicy::qualified("t", "b");
    for op in OperatorKind::ALL {
        if op.takes_tuple() {
            a = a.comparison(op, [ValueMatcher::any_strings()]);
            b = b.comparison(op, [ValueMatcher::any_integers()]);
        } else {
            a = a.comparison(op, [ValueMatcher::any_string()]);
            b = b.comparison(op, [ValueMatcher::any_integer()]);
        }
    }
    let b = b.between([ValueMatcher::any_integer()], [ValueMatcher::any_integer()]);

    let [ands, ors, nots, parens] = bounds;
    Policy::new()
        .columns([a, b])
        .max_ands(bound(ands))
        .max_ors(bound(ors))
        .max_nots(bound(nots))
        .max_grouping_parens(bound(parens))
}

fuzz_target!(|input: FuzzInput| {
    let policy = policy(input.bounds);

    // The guard only counts space-delimited connectives, so the canonical
    // text is re-checked without bounds.
    if let Ok(canonical) = filtersql::validate_and_canonicalize(&input.filter, &policy, input.debug) {
        let again = filtersql::validate_and_canonicalize(&canonical, &policy(UNLIMITED), false);
        assert_eq!(again.as_deref(), Ok(canonical.as_str()));
    }

    let _ = filtersql::parse_filter(&input.filter);
    let _ = filtersql::guard::mask_string_literals(&input.filter);
});
