//! Property tests for slide order arithmetic.

use deck_model::Permutation;
use proptest::prelude::*;

fn permutation_strategy(max_len: usize) -> impl Strategy<Value = Vec<usize>> {
    (1..=max_len).prop_flat_map(|len| Just((1..=len).collect::<Vec<_>>()).prop_shuffle())
}

proptest! {
    #[test]
    fn shuffled_ranges_are_valid(indices in permutation_strategy(40)) {
        let order = Permutation::from(indices.clone());
        prop_assert!(order.validate(indices.len()).is_ok());
    }

    #[test]
    fn inverse_round_trips(indices in permutation_strategy(40)) {
        let order = Permutation::from(indices);
        let slides: Vec<usize> = (1..=order.len()).collect();
        let inverse = order.inverse().expect("valid permutation");
        let shuffled = order.apply_to(&slides).expect("apply order");
        prop_assert_eq!(inverse.apply_to(&shuffled).expect("apply inverse"), slides);
    }

    #[test]
    fn identity_keeps_sequence(len in 1usize..60) {
        let slides: Vec<String> = (1..=len).map(|n| format!("slide-{n}")).collect();
        let identity = Permutation::identity(len);
        prop_assert_eq!(identity.apply_to(&slides).expect("apply identity"), slides);
    }

    #[test]
    fn duplicated_index_is_rejected(indices in permutation_strategy(20), dup in 0usize..20) {
        prop_assume!(indices.len() > 1);
        let mut indices = indices;
        let dup = dup % indices.len();
        let target = (dup + 1) % indices.len();
        indices[target] = indices[dup];
        let order = Permutation::from(indices);
        prop_assert!(order.validate(order.len()).is_err());
    }
}
