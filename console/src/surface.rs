use crate::{
    feedback::StatusMessage, form::FormValues, overlay::EditOverlay, table::TableView,
};

/// Everything visible at one moment.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub table: &'a TableView,
    pub add_form: &'a FormValues,
    pub overlay: &'a EditOverlay,
    pub status: Option<&'a StatusMessage>,
}

/// Presentation target for the registry view.
pub trait Surface {
    fn paint(&mut self, frame: &Frame<'_>);

    /// Blocking yes/no question; nothing else runs until it is answered.
    fn confirm(&mut self, question: &str) -> bool;
}
