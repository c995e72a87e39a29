pub mod layout;
pub mod screen;

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget, Frame};

use crate::app::App;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_view(self.screen).render(self, area, buf);
    }
}

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
