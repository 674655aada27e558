/// A duration in whole minutes.
pub type Minutes = i64;

/// A number of lasagna layers.
pub type Layers = i64;

/// How long a lasagna has to stay in the oven.
pub const EXPECTED_BAKE_TIME: Minutes = 40;

/// How long it takes to prepare a single layer.
pub const PREPARATION_TIME: Minutes = 10;

/// The number of minutes the lasagna still has to bake after `elapsed_minutes` in the oven.
///
/// The result is not clamped, so a lasagna that has been in the oven too long reports a negative
/// remaining time.
pub const fn remaining_bake_time(elapsed_minutes: Minutes) -> Minutes {
    EXPECTED_BAKE_TIME - elapsed_minutes
}

/// The number of minutes it takes to prepare `number_of_layers` layers.
pub const fn preparation_time_for(number_of_layers: Layers) -> Minutes {
    PREPARATION_TIME * number_of_layers
}

/// The total number of minutes spent so far: preparing `number_of_layers` layers plus
/// `elapsed_bake_time` in the oven.
pub const fn total_elapsed_time(number_of_layers: Layers, elapsed_bake_time: Minutes) -> Minutes {
    preparation_time_for(number_of_layers) + elapsed_bake_time
}

/// Like [`remaining_bake_time`], but `None` when the result doesn't fit in [`Minutes`].
pub const fn checked_remaining_bake_time(elapsed_minutes: Minutes) -> Option<Minutes> {
    EXPECTED_BAKE_TIME.checked_sub(elapsed_minutes)
}

/// Like [`preparation_time_for`], but `None` when the result doesn't fit in [`Minutes`].
pub const fn checked_preparation_time_for(number_of_layers: Layers) -> Option<Minutes> {
    PREPARATION_TIME.checked_mul(number_of_layers)
}

/// Like [`total_elapsed_time`], but `None` when either step overflows.
pub const fn checked_total_elapsed_time(
    number_of_layers: Layers,
    elapsed_bake_time: Minutes,
) -> Option<Minutes> {
    match checked_preparation_time_for(number_of_layers) {
        Some(preparation) => preparation.checked_add(elapsed_bake_time),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn remaining_after_thirty_minutes() {
        assert_eq!(10, remaining_bake_time(30));
    }

    #[test]
    fn remaining_before_baking() {
        assert_eq!(40, remaining_bake_time(0));
    }

    #[test]
    fn remaining_when_overbaked() {
        assert_eq!(0, remaining_bake_time(40));
        assert_eq!(-5, remaining_bake_time(45));
    }

    #[test]
    fn preparation_single_layer() {
        assert_eq!(10, preparation_time_for(1));
    }

    #[test]
    fn preparation_four_layers() {
        assert_eq!(40, preparation_time_for(4));
    }

    #[test]
    fn preparation_without_layers() {
        assert_eq!(0, preparation_time_for(0));
        assert_eq!(-20, preparation_time_for(-2));
    }

    #[test]
    fn total_three_layers_twenty_minutes() {
        assert_eq!(50, total_elapsed_time(3, 20));
    }

    #[test]
    fn total_nothing_done() {
        assert_eq!(0, total_elapsed_time(0, 0));
    }

    #[test]
    fn arithmetic_holds_over_a_range() {
        for n in -50..=50 {
            assert_eq!(40 - n, remaining_bake_time(n));
            assert_eq!(10 * n, preparation_time_for(n));
            for e in [-40, -1, 0, 1, 17, 40, 1_000] {
                assert_eq!(10 * n + e, total_elapsed_time(n, e));
            }
        }
    }

    #[test]
    fn checked_agrees_in_range() {
        for n in -50..=50 {
            assert_eq!(Some(remaining_bake_time(n)), checked_remaining_bake_time(n));
            assert_eq!(Some(preparation_time_for(n)), checked_preparation_time_for(n));
            assert_eq!(Some(total_elapsed_time(n, 20)), checked_total_elapsed_time(n, 20));
        }
    }

    #[test]
    fn checked_rejects_overflow() {
        assert_eq!(None, checked_remaining_bake_time(Minutes::MIN));
        assert_eq!(Some(40 - Minutes::MAX), checked_remaining_bake_time(Minutes::MAX));
        assert_eq!(None, checked_preparation_time_for(Layers::MAX));
        assert_eq!(None, checked_preparation_time_for(Layers::MIN));
        assert_eq!(None, checked_total_elapsed_time(Layers::MAX, 0));
        assert_eq!(None, checked_total_elapsed_time(1, Minutes::MAX));
        assert_eq!(Some(Minutes::MIN + 10), checked_total_elapsed_time(1, Minutes::MIN));
    }

    #[test]
    fn usable_in_const_context() {
        const TOTAL: Minutes = total_elapsed_time(2, remaining_bake_time(15));
        assert_eq!(45, TOTAL);
    }

    #[test]
    fn repeated_calls_agree_across_threads() {
        let expected = (0..100)
            .map(|n| total_elapsed_time(n, remaining_bake_time(n)))
            .collect::<Vec<_>>();
        let handles = (0..4)
            .map(|_| {
                thread::spawn(|| {
                    (0..100)
                        .map(|n| total_elapsed_time(n, remaining_bake_time(n)))
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(expected, handle.join().unwrap());
        }
    }
}
