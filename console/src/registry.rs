//! The registry view controller.
//!
//! `Registry` owns every piece of view state (add form, table, edit overlay,
//! status banner) together with the client and the surface it paints on.
//! Each UI event runs to completion before the next is handled; a successful
//! mutation always ends in a full reload of the collection.

use entity::Field;
use platform_api::{ApiError, EmployeeClient};
use tracing::{debug, error, info, warn};

use crate::{
    feedback::{StatusBanner, StatusKind},
    form::{FormValues, ValidationErrors},
    overlay::{EditOverlay, OverlayClick},
    surface::{Frame, Surface},
    table::TableView,
};

pub const LOAD_FAILED: &str = "Failed to load employees";
pub const ADD_FAILED: &str = "Failed to add employee";
pub const UPDATE_FAILED: &str = "Failed to update employee";
pub const DELETE_FAILED: &str = "Failed to delete employee";
pub const ADDED: &str = "Employee added successfully";
pub const UPDATED: &str = "Employee updated successfully";
pub const DELETED: &str = "Employee deleted successfully";

/// User interactions the view reacts to. Rows are zero-based table indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Reload,
    SubmitAdd,
    OpenEdit(usize),
    SubmitEdit,
    OverlayClick(OverlayClick),
    Delete(usize),
}

pub struct Registry<S> {
    client: EmployeeClient,
    surface: S,
    banner: StatusBanner,
    table: TableView,
    add_form: FormValues,
    overlay: EditOverlay,
}

impl<S: Surface> Registry<S> {
    pub fn new(client: EmployeeClient, surface: S, banner: StatusBanner) -> Self {
        Self {
            client,
            surface,
            banner,
            table: TableView::default(),
            add_form: FormValues::default(),
            overlay: EditOverlay::default(),
        }
    }

    /// Initial load and paint.
    pub async fn start(&mut self) {
        info!(
            collection = %self.client.endpoint().collection_url(),
            "registry view starting"
        );
        self.load().await;
    }

    pub async fn handle(&mut self, event: UiEvent) {
        debug!(?event, "ui event");
        match event {
            UiEvent::Reload => self.load().await,
            UiEvent::SubmitAdd => self.submit_add().await,
            UiEvent::OpenEdit(row) => self.open_edit(row),
            UiEvent::SubmitEdit => self.submit_edit().await,
            UiEvent::OverlayClick(target) => {
                if self.overlay.click(target) {
                    self.repaint();
                }
            }
            UiEvent::Delete(row) => self.delete(row).await,
        }
    }

    /// Fetch the collection and replace the table. On failure the table is
    /// left exactly as it was.
    pub async fn load(&mut self) {
        match self.client.list().await {
            Ok(employees) => {
                info!(count = employees.len(), "rendering employees");
                self.table = TableView::render(&employees);
            }
            Err(err) => {
                error!(error = %err, "failed to load employees");
                self.banner.show(LOAD_FAILED, StatusKind::Error);
            }
        }
        self.repaint();
    }

    pub async fn submit_add(&mut self) {
        let employee = match self.add_form.to_new_employee() {
            Ok(employee) => employee,
            Err(errors) => return self.reject_form(errors),
        };

        match self.client.create(&employee).await {
            Ok(()) => {
                info!(name = %employee.name, "employee added");
                self.banner.show(ADDED, StatusKind::Success);
                self.add_form.clear();
                self.load().await;
            }
            Err(err) => self.report(err, ADD_FAILED),
        }
    }

    pub fn open_edit(&mut self, row: usize) {
        let Some(actions) = self.table.actions(row) else {
            warn!(row, "edit requested for a row without actions");
            return;
        };
        let prefill = actions.edit.clone();
        debug!(key = %prefill.key, "opening edit overlay");
        self.overlay.open(&prefill);
        self.repaint();
    }

    pub async fn submit_edit(&mut self) {
        let (key, update) = match self.overlay.submission() {
            None => {
                debug!("save ignored, edit overlay is hidden");
                return;
            }
            Some(Err(errors)) => return self.reject_form(errors),
            Some(Ok(submission)) => submission,
        };

        match self.client.update(&key, &update).await {
            Ok(()) => {
                info!(%key, "employee updated");
                self.banner.show(UPDATED, StatusKind::Success);
                self.overlay.close();
                self.load().await;
            }
            Err(err) => self.report(err, UPDATE_FAILED),
        }
    }

    pub async fn delete(&mut self, row: usize) {
        let Some(target) = self.table.actions(row).map(|actions| actions.delete.clone()) else {
            warn!(row, "delete requested for a row without actions");
            return;
        };

        let question = format!("Are you sure you want to delete {}?", target.name);
        if !self.surface.confirm(&question) {
            debug!(key = %target.key, "delete declined");
            return;
        }

        match self.client.delete(&target.key).await {
            Ok(()) => {
                info!(key = %target.key, "employee deleted");
                self.banner.show(DELETED, StatusKind::Success);
                self.load().await;
            }
            Err(err) => self.report(err, DELETE_FAILED),
        }
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn add_form(&self) -> &FormValues {
        &self.add_form
    }

    /// Type into one add-form input.
    pub fn fill_add(&mut self, field: Field, value: impl Into<String>) {
        self.add_form.set(field, value);
    }

    pub fn overlay(&self) -> &EditOverlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut EditOverlay {
        &mut self.overlay
    }

    pub fn banner(&self) -> &StatusBanner {
        &self.banner
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn repaint(&mut self) {
        let status = self.banner.current();
        let frame = Frame {
            table: &self.table,
            add_form: &self.add_form,
            overlay: &self.overlay,
            status: status.as_ref(),
        };
        self.surface.paint(&frame);
    }

    fn reject_form(&mut self, errors: ValidationErrors) {
        warn!(fields = ?errors.fields(), "form rejected before submission");
        self.banner.show(errors.to_string(), StatusKind::Error);
        self.repaint();
    }

    fn report(&mut self, err: ApiError, fallback: &str) {
        error!(error = %err, status = ?err.status(), "{fallback}");
        self.banner.show(err.user_message(fallback), StatusKind::Error);
        self.repaint();
    }
}
