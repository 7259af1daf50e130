pub mod charts;
pub mod form;

pub use charts::{ChartController, ChartView, ChartsReport};
pub use form::{FormController, FormView};
