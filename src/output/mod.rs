mod schedule;
mod view;

pub use schedule::render_outcome;
pub use view::render_view;
