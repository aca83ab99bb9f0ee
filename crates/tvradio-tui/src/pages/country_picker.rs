//! Country picker modal. Opens over the current page and owns all input
//! until a country is chosen or BACK closes it.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, Borders, Clear},
    Frame,
};

use tvradio_core::catalog::Country;
use tvradio_core::focus::binding::item_id;
use tvradio_core::focus::{ScopeBinding, ScopeLayout, Zone};

use super::DrawContext;
use crate::action::Action;
use crate::theme::style_focused_border;
use crate::widgets::tile::Tile;

pub const SCOPE: &str = "country-picker";

const WIDTH: u16 = 36;

/// One choice; `code` is `None` for "all countries".
#[derive(Debug, Clone, PartialEq)]
pub struct CountryOption {
    pub code: Option<String>,
    pub label: String,
}

pub struct CountryPicker {
    options: Vec<CountryOption>,
}

impl CountryPicker {
    pub fn new(countries: &[Country]) -> Self {
        let mut options = vec![CountryOption {
            code: None,
            label: "All countries".to_string(),
        }];
        options.extend(countries.iter().map(|c| CountryOption {
            code: Some(c.code.clone()),
            label: c.name.clone(),
        }));
        Self { options }
    }

    pub fn option(&self, index: usize) -> Option<&CountryOption> {
        self.options.get(index)
    }

    /// Row of the option matching `code`, 0 when none does.
    pub fn position(&self, code: Option<&str>) -> usize {
        self.options
            .iter()
            .position(|o| match (&o.code, code) {
                (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
                (None, None) => true,
                _ => false,
            })
            .unwrap_or(0)
    }

    pub fn binding(&self, selected: usize) -> ScopeBinding<Action> {
        let layout = ScopeLayout::new().section(Zone::named("countries"), self.options.len(), 1);
        ScopeBinding::modal(SCOPE, layout)
            .initial_index(selected)
            .on_select(|index| vec![Action::PickCountry(index)])
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, ctx: &mut DrawContext) {
        let height = (self.options.len() as u16 + 2).min(area.height);
        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::horizontal([Constraint::Length(WIDTH.min(area.width))])
            .flex(Flex::Center)
            .areas(row);

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style_focused_border())
            .title(" Country ");
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        for (i, option) in self.options.iter().enumerate() {
            let rect = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
            if rect.bottom() > inner.bottom() {
                break;
            }
            ctx.cache
                .record_rect(SCOPE, item_id(&Zone::named("countries"), i), rect);
            Tile::new(&option.label, ctx.visual(SCOPE, i)).draw_row(frame, rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> CountryPicker {
        CountryPicker::new(&[
            Country {
                code: "CL".into(),
                name: "Chile".into(),
            },
            Country {
                code: "JP".into(),
                name: "Japan".into(),
            },
        ])
    }

    #[test]
    fn test_all_countries_comes_first() {
        let picker = picker();
        assert_eq!(picker.option(0).unwrap().code, None);
        assert_eq!(picker.option(2).unwrap().label, "Japan");
        assert!(picker.option(3).is_none());
    }

    #[test]
    fn test_position_of_current_filter() {
        let picker = picker();
        assert_eq!(picker.position(None), 0);
        assert_eq!(picker.position(Some("cl")), 1);
        assert_eq!(picker.position(Some("ZZ")), 0);
    }

    #[test]
    fn test_rows_below_the_popup_are_not_measured() {
        let picker = picker();
        let cache = crate::pages::testing::draw_once(40, 4, |frame, area, ctx| {
            picker.draw(frame, area, ctx)
        });
        let id = |i| item_id(&Zone::named("countries"), i);
        assert!(cache.get(SCOPE, &id(0)).is_some());
        assert!(cache.get(SCOPE, &id(1)).is_some());
        assert!(cache.get(SCOPE, &id(2)).is_none());
    }

    #[test]
    fn test_binding_is_modal_at_selection() {
        let binding = picker().binding(2);
        assert_eq!(binding.scope_id, SCOPE);
        assert_eq!(binding.initial_index, 2);
        assert_eq!(binding.layout.total_items(), 3);
    }
}
