//! Console presentation: colours and the typing spinner.

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::Style;
