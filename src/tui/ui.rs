use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::core::view_model::HomeViewModel;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CardList, TitleBar};
use crate::tui::home::home_cards;

const KEY_HINTS: &str = "r refresh | ↑ at top to pull | q quit";

pub fn draw_ui(frame: &mut Frame, vm: &HomeViewModel, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, cards_area, hint_area] = layout.areas(frame.area());

    let state = vm.state();
    let weather = vm.weather_data();
    let cards = home_cards(state, weather.as_ref());

    CardList::new(&mut tui.card_list, &cards).render(frame, cards_area);

    TitleBar::new(
        tui.location_label.clone(),
        state.loading,
        state.has_network,
        spinner_frame,
    )
    .render(frame, title_area);

    frame.render_widget(
        Span::styled(KEY_HINTS, Style::default().add_modifier(Modifier::DIM)),
        hint_area,
    );
}
