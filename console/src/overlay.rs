//! The edit overlay: a two-state modal holding the edit form.

use entity::{EmployeeKey, EmployeeUpdate, Field};

use crate::{
    form::{FormValues, ValidationErrors},
    table::EditPrefill,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayState {
    #[default]
    Hidden,
    Visible,
}

/// Where a click landed while the overlay was up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayClick {
    CloseControl,
    Backdrop,
    Content,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditOverlay {
    state: OverlayState,
    key: Option<EmployeeKey>,
    values: FormValues,
}

impl EditOverlay {
    pub fn open(&mut self, prefill: &EditPrefill) {
        self.key = Some(prefill.key.clone());
        self.values = prefill.values.clone();
        self.state = OverlayState::Visible;
    }

    pub fn close(&mut self) {
        self.state = OverlayState::Hidden;
    }

    /// Returns whether the click closed the overlay.
    pub fn click(&mut self, target: OverlayClick) -> bool {
        match target {
            OverlayClick::CloseControl | OverlayClick::Backdrop if self.is_visible() => {
                self.close();
                true
            }
            _ => false,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == OverlayState::Visible
    }

    pub fn key(&self) -> Option<&EmployeeKey> {
        self.key.as_ref()
    }

    /// Read-only name of the record being edited.
    pub fn name(&self) -> &str {
        self.values.get(Field::Name)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Edit one input. The name input is read-only; editing it is refused.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> bool {
        if field == Field::Name {
            return false;
        }
        self.values.set(field, value);
        true
    }

    /// The request a save would send; `None` while hidden.
    pub fn submission(&self) -> Option<Result<(EmployeeKey, EmployeeUpdate), ValidationErrors>> {
        if !self.is_visible() {
            return None;
        }
        let key = self.key.clone()?;
        Some(self.values.to_update().map(|update| (key, update)))
    }
}
