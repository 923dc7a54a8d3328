mod courses;
mod results;

pub use courses::{draw_courses_view, CourseRow, CoursesViewState};
pub use results::{draw_results_view, ResultsViewState};
