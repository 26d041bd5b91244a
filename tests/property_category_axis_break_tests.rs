use chart_axis_breaks::{AxisId, CategoryAxis, CategoryAxisBreak, CategoryAxisLink};
use proptest::prelude::*;

proptest! {
    #[test]
    fn start_category_set_then_get_property(category in ".*") {
        let mut axis_break = CategoryAxisBreak::new();
        axis_break.set_start_category(category.clone());
        prop_assert_eq!(axis_break.start_category(), Some(category.as_str()));
    }

    #[test]
    fn distinct_changes_invalidate_once_each_property(
        values in proptest::collection::vec(-100.0f64..100.0, 1..20)
    ) {
        let mut axis = CategoryAxis::new(AxisId(1), ["a", "b", "c"]);
        let id = axis.add_break(CategoryAxisBreak::new());
        let before = axis.data_range_invalidations();

        let mut expected = 0u64;
        let mut previous: Option<f64> = None;
        for value in values {
            let changed = axis
                .axis_break_mut(id)
                .expect("break exists")
                .set_end_value(value);
            prop_assert_eq!(changed, previous != Some(value));
            if changed {
                expected += 1;
            }
            previous = Some(value);
        }

        prop_assert_eq!(axis.data_range_invalidations() - before, expected);
    }

    #[test]
    fn positions_are_monotonic_with_break_property(
        start in 0.0f64..10.0,
        width in 0.0f64..10.0,
        break_size in 0.0f64..1.0,
        a in 0.0f64..20.0,
        b in 0.0f64..20.0
    ) {
        let mut axis = CategoryAxis::new(AxisId(2), (0..20).map(|i| i.to_string()));
        axis.add_break(
            CategoryAxisBreak::with_values(start, start + width)
                .with_break_size(break_size)
                .expect("valid size"),
        );
        axis.validate_data_range();

        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_px = axis.index_to_position(low).expect("low position");
        let high_px = axis.index_to_position(high).expect("high position");
        prop_assert!(low_px <= high_px + 1e-9);
    }

    #[test]
    fn position_round_trip_with_break_property(
        start in 0.0f64..10.0,
        width in 0.0f64..10.0,
        break_size in 0.05f64..1.0,
        index in 0.0f64..20.0
    ) {
        let mut axis = CategoryAxis::new(AxisId(3), (0..20).map(|i| i.to_string()));
        axis.add_break(
            CategoryAxisBreak::with_values(start, start + width)
                .with_break_size(break_size)
                .expect("valid size"),
        );
        axis.validate_data_range();

        let px = axis.index_to_position(index).expect("position");
        let recovered = axis.position_to_index(px).expect("index");
        prop_assert!((recovered - index).abs() <= 1e-6);
    }
}
