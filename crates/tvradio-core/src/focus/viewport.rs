//! ViewportKeeper — keeps the focused item inside its scrolling container.
//!
//! Offsets are accumulated along the item's ancestor chain up to the scroll
//! container. Viewport-relative boxes are not used here: they go stale the
//! moment the container scrolls.

use super::scope::FocusScope;

/// Item position inside the scroll container's content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemExtent {
    pub top: f32,
    pub height: f32,
}

impl ItemExtent {
    /// `offsets` are the item's own offset followed by each ancestor's
    /// offset up to (not including) the container.
    pub fn from_offsets(offsets: impl IntoIterator<Item = f32>, height: f32) -> Self {
        Self {
            top: accumulated_offset(offsets),
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

pub fn accumulated_offset(offsets: impl IntoIterator<Item = f32>) -> f32 {
    offsets.into_iter().sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }
}

pub trait ScrollContainer {
    fn scroll_top(&self) -> f32;
    fn client_height(&self) -> f32;
    /// Full content height; bounds the largest scroll offset.
    fn scroll_height(&self) -> f32;
}

/// Scroll the container so that its top edge sits at `top`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub top: f32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportKeeper {
    padding: Padding,
}

impl ViewportKeeper {
    pub fn new(padding: Padding) -> Self {
        Self { padding }
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Minimal scroll that brings `item` inside
    /// `[scroll_top + padding.top, scroll_top + client_height - padding.bottom]`.
    /// `None` when it is already there.
    pub fn ensure_visible(
        &self,
        item: ItemExtent,
        container: &dyn ScrollContainer,
        padding: Padding,
    ) -> Option<ScrollCommand> {
        let scroll_top = container.scroll_top();
        let client = container.client_height();
        let window_top = scroll_top + padding.top;
        let window_bottom = scroll_top + client - padding.bottom;

        let wanted = if item.top < window_top {
            item.top - padding.top
        } else if item.bottom() > window_bottom {
            // Taller than the window: align the top edge instead.
            if item.height > client - padding.top - padding.bottom {
                item.top - padding.top
            } else {
                item.bottom() - client + padding.bottom
            }
        } else {
            return None;
        };

        let max_scroll = (container.scroll_height() - client).max(0.0);
        let top = wanted.clamp(0.0, max_scroll);
        if (top - scroll_top).abs() < f32::EPSILON {
            return None;
        }
        Some(ScrollCommand { top })
    }

    /// `ensure_visible` with this keeper's configured padding.
    pub fn keep(&self, item: ItemExtent, container: &dyn ScrollContainer) -> Option<ScrollCommand> {
        self.ensure_visible(item, container, self.padding)
    }
}

/// Items between the focus and the end of the scope. Lazy loaders poll this
/// to fetch more before the user reaches the end.
pub fn distance_to_end<A>(scope: &FocusScope<A>) -> usize {
    scope.total_items().saturating_sub(scope.current_index())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::scope::ScopeKind;

    struct Pane {
        top: f32,
        client: f32,
        content: f32,
    }

    impl ScrollContainer for Pane {
        fn scroll_top(&self) -> f32 {
            self.top
        }
        fn client_height(&self) -> f32 {
            self.client
        }
        fn scroll_height(&self) -> f32 {
            self.content
        }
    }

    fn pane(top: f32) -> Pane {
        Pane {
            top,
            client: 300.0,
            content: 2000.0,
        }
    }

    const PAD: Padding = Padding {
        top: 20.0,
        bottom: 20.0,
    };

    #[test]
    fn test_visible_item_issues_no_scroll() {
        let keeper = ViewportKeeper::default();
        let item = ItemExtent { top: 150.0, height: 50.0 };
        assert_eq!(keeper.ensure_visible(item, &pane(100.0), PAD), None);
        // Exactly on the padded edges still counts as visible.
        let edge = ItemExtent { top: 120.0, height: 260.0 };
        assert_eq!(keeper.ensure_visible(edge, &pane(100.0), PAD), None);
    }

    #[test]
    fn test_scrolls_down_by_minimum() {
        let keeper = ViewportKeeper::default();
        let item = ItemExtent { top: 500.0, height: 50.0 };
        // bottom 550 must land at scroll_top + 300 - 20
        assert_eq!(
            keeper.ensure_visible(item, &pane(100.0), PAD),
            Some(ScrollCommand { top: 270.0 })
        );
    }

    #[test]
    fn test_scrolls_up_by_minimum_and_clamps() {
        let keeper = ViewportKeeper::default();
        let item = ItemExtent { top: 60.0, height: 50.0 };
        assert_eq!(
            keeper.ensure_visible(item, &pane(200.0), PAD),
            Some(ScrollCommand { top: 40.0 })
        );
        let first = ItemExtent { top: 0.0, height: 50.0 };
        assert_eq!(
            keeper.ensure_visible(first, &pane(200.0), PAD),
            Some(ScrollCommand { top: 0.0 })
        );
    }

    #[test]
    fn test_never_scrolls_past_content() {
        let keeper = ViewportKeeper::default();
        let last = ItemExtent { top: 1980.0, height: 20.0 };
        assert_eq!(
            keeper.ensure_visible(last, &pane(1000.0), PAD),
            Some(ScrollCommand { top: 1700.0 })
        );
    }

    #[test]
    fn test_accumulated_offsets() {
        let extent = ItemExtent::from_offsets([40.0, 200.0, 12.0], 30.0);
        assert_eq!(extent.top, 252.0);
        assert_eq!(extent.bottom(), 282.0);
    }

    #[test]
    fn test_distance_to_end() {
        let mut scope: FocusScope<()> = FocusScope::new("home", ScopeKind::Page, 24);
        assert_eq!(distance_to_end(&scope), 24);
        scope.focus(20);
        assert_eq!(distance_to_end(&scope), 4);
    }
}
