//! Form field values and their conversion into request payloads.

use std::collections::BTreeMap;

use entity::{Employee, EmployeeUpdate, Field, NewEmployee};
use thiserror::Error;

/// Raw text of each input, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<Field, String>,
}

impl FormValues {
    /// Values as the row displays them, used to prefill the edit overlay.
    pub fn from_employee(employee: &Employee) -> Self {
        let values = Field::ALL
            .into_iter()
            .map(|field| (field, employee.display(field)))
            .collect();
        Self { values }
    }

    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|value| value.is_empty())
    }

    pub fn to_new_employee(&self) -> Result<NewEmployee, ValidationErrors> {
        let mut check = Checker::new(self);
        let employee = NewEmployee {
            name: check.required(Field::Name),
            first_surname: check.text(Field::FirstSurname),
            second_surname: check.text(Field::SecondSurname),
            department: check.text(Field::Department),
            shift_type: check.text(Field::ShiftType),
            hours: check.integer(Field::Hours),
            clock_in_hour: check.integer(Field::ClockInHour),
            salary: check.integer(Field::Salary),
        };
        check.finish(employee)
    }

    pub fn to_update(&self) -> Result<EmployeeUpdate, ValidationErrors> {
        let mut check = Checker::new(self);
        let update = EmployeeUpdate {
            first_surname: check.text(Field::FirstSurname),
            second_surname: check.text(Field::SecondSurname),
            department: check.text(Field::Department),
            shift_type: check.text(Field::ShiftType),
            hours: check.integer(Field::Hours),
            clock_in_hour: check.integer(Field::ClockInHour),
            salary: check.integer(Field::Salary),
        };
        check.finish(update)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldProblem {
    #[error("is required")]
    Missing,
    #[error("must be a whole number (got {0:?})")]
    NotInteger(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{field} {problem}")]
pub struct FieldError {
    pub field: Field,
    pub problem: FieldProblem,
}

/// Every field that failed, in form order.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Check the form: {}", join(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn fields(&self) -> Vec<Field> {
        self.errors.iter().map(|err| err.field).collect()
    }
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

struct Checker<'a> {
    form: &'a FormValues,
    errors: Vec<FieldError>,
}

impl<'a> Checker<'a> {
    fn new(form: &'a FormValues) -> Self {
        Self {
            form,
            errors: Vec::new(),
        }
    }

    /// Free text goes through as typed, blank included.
    fn text(&mut self, field: Field) -> String {
        self.form.get(field).to_string()
    }

    fn required(&mut self, field: Field) -> String {
        let form = self.form;
        let value = form.get(field);
        if value.trim().is_empty() {
            self.fail(field, FieldProblem::Missing);
        }
        value.to_string()
    }

    fn integer(&mut self, field: Field) -> i64 {
        let form = self.form;
        let value = form.get(field).trim();
        if value.is_empty() {
            self.fail(field, FieldProblem::Missing);
            return 0;
        }
        match value.parse() {
            Ok(number) => number,
            Err(_) => {
                self.fail(field, FieldProblem::NotInteger(value.to_string()));
                0
            }
        }
    }

    fn fail(&mut self, field: Field, problem: FieldProblem) {
        self.errors.push(FieldError { field, problem });
    }

    fn finish<T>(self, payload: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(payload)
        } else {
            Err(ValidationErrors {
                errors: self.errors,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormValues {
        let mut form = FormValues::default();
        form.set(Field::Name, "Lucía");
        form.set(Field::FirstSurname, "Martín");
        form.set(Field::SecondSurname, "Ruiz");
        form.set(Field::Department, "Almacén");
        form.set(Field::ShiftType, "Parcial");
        form.set(Field::Hours, "20");
        form.set(Field::ClockInHour, " 7 ");
        form.set(Field::Salary, "950");
        form
    }

    #[test]
    fn complete_form_builds_payload() {
        let employee = filled().to_new_employee().unwrap();
        assert_eq!(employee.name, "Lucía");
        assert_eq!(employee.department, "Almacén");
        assert_eq!(employee.hours, 20);
        assert_eq!(employee.clock_in_hour, 7);
        assert_eq!(employee.salary, 950);
    }

    #[test]
    fn non_numeric_input_is_reported_per_field() {
        let mut form = filled();
        form.set(Field::Hours, "veinte");
        form.set(Field::Salary, "9.5");
        form.set(Field::Name, "   ");

        let err = form.to_new_employee().unwrap_err();
        assert_eq!(err.fields(), vec![Field::Name, Field::Hours, Field::Salary]);
        assert_eq!(
            err.errors[1].problem,
            FieldProblem::NotInteger("veinte".into())
        );
        assert_eq!(
            err.to_string(),
            "Check the form: Name is required; \
             Hours must be a whole number (got \"veinte\"); \
             Salary must be a whole number (got \"9.5\")"
        );
    }

    #[test]
    fn update_ignores_the_name() {
        let mut form = filled();
        form.set(Field::Name, "");
        let update = form.to_update().unwrap();
        assert_eq!(update.shift_type, "Parcial");
    }

    #[test]
    fn blank_text_columns_go_through_as_typed() {
        let mut form = filled();
        form.set(Field::SecondSurname, "");
        form.set(Field::Department, "  ");

        let employee = form.to_new_employee().unwrap();
        assert_eq!(employee.second_surname, "");
        let update = form.to_update().unwrap();
        assert_eq!(update.second_surname, "");
        assert_eq!(update.department, "  ");
    }

    #[test]
    fn update_rejects_non_numeric_input() {
        let mut form = filled();
        form.set(Field::ClockInHour, "8am");
        form.set(Field::Salary, "");

        let err = form.to_update().unwrap_err();
        assert_eq!(err.fields(), vec![Field::ClockInHour, Field::Salary]);
        assert_eq!(err.errors[1].problem, FieldProblem::Missing);
    }

    #[test]
    fn clearing_resets_every_input() {
        let mut form = filled();
        assert!(!form.is_empty());
        form.clear();
        assert!(form.is_empty());
        assert_eq!(form.get(Field::Name), "");
    }
}
