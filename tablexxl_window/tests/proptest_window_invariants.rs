// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for the window engine.
//!
//! For arbitrary list lengths, options, and scroll sequences:
//!
//! 1. The window lies inside the list and never exceeds the limit after a pass.
//! 2. Exactly the rows of the window are live, in ascending visual order.
//! 3. Spacers plus the materialized extent equal the full content extent.
//! 4. With jumping disabled the bottom spacer is zero.
//! 5. Rows are only ever evicted from either end of the window.
//! 6. When the limit can hold the viewport plus two blocks on each side, a
//!    second pass over the same viewport changes nothing.
//! 7. Clearing always leaves no live rows.

use std::collections::VecDeque;

use proptest::prelude::*;
use tablexxl_window::{Options, RenderSink, Viewport, Windower};

/// Sink that tracks live rows in visual order and flags any misuse.
#[derive(Default)]
struct CheckedSink {
    order: VecDeque<usize>,
    pending: Option<usize>,
    top: f64,
    bottom: f64,
}

impl RenderSink<(), f64> for CheckedSink {
    type Handle = usize;

    fn materialize(&mut self, index: usize, _record: &()) -> usize {
        assert!(self.pending.is_none(), "row {index} created before the last one was placed");
        self.pending = Some(index);
        index
    }

    fn evict(&mut self, handle: usize) {
        if self.order.front() == Some(&handle) {
            self.order.pop_front();
        } else if self.order.back() == Some(&handle) {
            self.order.pop_back();
        } else {
            panic!("evicted row {handle} is not at either end of {:?}", self.order);
        }
    }

    fn append_to_tail(&mut self, handle: &usize) {
        assert_eq!(self.pending.take(), Some(*handle), "placed a row that was not just created");
        self.order.push_back(*handle);
    }

    fn insert_at_head(&mut self, handle: &usize) {
        assert_eq!(self.pending.take(), Some(*handle), "placed a row that was not just created");
        self.order.push_front(*handle);
    }

    fn set_top_spacer_extent(&mut self, extent: f64) {
        self.top = extent;
    }

    fn set_bottom_spacer_extent(&mut self, extent: f64) {
        self.bottom = extent;
    }
}

fn options() -> impl Strategy<Value = Options<f64>> {
    (1_u32..=64, 0_usize..=300, 0_usize..=40, any::<bool>()).prop_map(
        |(row_height, max_materialized, block_size, allow_jump)| {
            Options::new()
                .with_row_height(f64::from(row_height))
                .with_max_materialized(max_materialized)
                .with_block_size(block_size)
                .with_allow_jump(allow_jump)
        },
    )
}

/// Scroll positions as fractions of the content, plus viewport heights.
fn scrolls() -> impl Strategy<Value = Vec<(f64, f64)>> {
    proptest::collection::vec((0.0_f64..=1.0, 0.0_f64..=1500.0), 1..=24)
}

proptest! {
    #[test]
    fn passes_preserve_window_invariants(
        len in 0_usize..=3000,
        options in options(),
        scrolls in scrolls(),
    ) {
        let items = vec![(); len];
        let mut sink = CheckedSink::default();
        let mut windower = Windower::new(options);
        let row_height = options.row_height();
        let content = row_height * len as f64;
        let block_extent = options.block_extent();
        let capacity = row_height * options.max_materialized() as f64;

        for (fraction, height) in scrolls {
            let top = (content * fraction).floor();
            let viewport = Viewport::new(top, top + height);
            let summary = windower.pass(&items, viewport, &mut sink);
            let window = summary.window;

            prop_assert!(window.end() <= len, "window {:?} past {} rows", window, len);
            prop_assert!(window.limit <= options.max_materialized());
            prop_assert_eq!(
                sink.order.iter().copied().collect::<Vec<_>>(),
                window.range().collect::<Vec<_>>()
            );
            prop_assert_eq!(sink.top, row_height * window.offset as f64);

            if options.allow_jump() {
                let total = sink.top + row_height * window.limit as f64 + sink.bottom;
                prop_assert_eq!(total, content);
            } else {
                prop_assert_eq!(sink.bottom, 0.0);
            }

            if height + 4.0 * block_extent <= capacity {
                let again = windower.pass(&items, viewport, &mut sink);
                prop_assert_eq!(again.window, window, "second pass moved the window");
                prop_assert_eq!(again.materialized + again.evicted, 0);
            }
        }

        windower.clear::<(), _>(&mut sink);
        prop_assert!(sink.order.is_empty());
        prop_assert!(windower.window().is_empty());
    }
}

proptest! {
    #[test]
    fn visible_rows_are_materialized_when_the_limit_allows(
        len in 1_usize..=5000,
        fraction in 0.0_f64..=1.0,
    ) {
        // 100 rows of 24px hold a 480px viewport plus two blocks on either side.
        let options = Options::new()
            .with_row_height(24.0)
            .with_max_materialized(100)
            .with_block_size(10);
        let items = vec![(); len];
        let mut sink = CheckedSink::default();
        let mut windower = Windower::new(options);

        let content = 24.0 * len as f64;
        let top = (content * fraction).floor().min((content - 480.0).max(0.0));
        let viewport = Viewport::new(top, top + 480.0);
        windower.pass(&items, viewport, &mut sink);

        let visible = windower.heights().visible_range(len, viewport);
        let window = windower.window();
        prop_assert!(
            visible.start >= window.offset && visible.end <= window.end(),
            "visible {:?} not inside window {:?}", visible, window
        );
    }
}
