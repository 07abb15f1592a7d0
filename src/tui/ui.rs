use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, TitleBar};

/// Lay out and draw one frame: title bar, message list, input box.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let input_height = tui.input_box.calculate_height();
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    MessageList::new(&mut tui.message_list, &app.log, spinner_frame).render(frame, main_area);

    // After the list so the unseen marker reflects this frame's layout.
    TitleBar::new(
        app.race.name.clone(),
        app.phase(),
        app.status_message.clone(),
        app.service_status.clone(),
        app.analyze_enabled,
        tui.message_list.has_unseen_content(),
    )
    .render(frame, title_area);

    tui.input_box.render(frame, input_area);
}
