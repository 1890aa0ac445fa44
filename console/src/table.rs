//! Turns loaded records into table rows with their action controls.

use entity::{Employee, EmployeeKey, Field};

use crate::form::FormValues;

/// Eight record columns plus the actions column.
pub const COLUMN_COUNT: usize = Field::ALL.len() + 1;
pub const EMPTY_PLACEHOLDER: &str = "No employees registered";
pub const ACTIONS_HEADER: &str = "Actions";

/// Literal values captured when the row was rendered; opening the overlay
/// copies these, not whatever the backend holds by then.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditPrefill {
    pub key: EmployeeKey,
    pub values: FormValues,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteTarget {
    pub key: EmployeeKey,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowActions {
    pub edit: EditPrefill,
    pub delete: DeleteTarget,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableRow {
    Record {
        cells: Vec<String>,
        actions: RowActions,
    },
    Placeholder {
        text: &'static str,
        colspan: usize,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableView {
    rows: Vec<TableRow>,
}

impl TableView {
    /// Replace-all render: one row per record in the order given, or a
    /// single placeholder row when there are none.
    pub fn render(employees: &[Employee]) -> Self {
        if employees.is_empty() {
            return Self {
                rows: vec![TableRow::Placeholder {
                    text: EMPTY_PLACEHOLDER,
                    colspan: COLUMN_COUNT,
                }],
            };
        }

        let rows = employees
            .iter()
            .map(|employee| TableRow::Record {
                cells: Field::ALL
                    .into_iter()
                    .map(|field| employee.display(field))
                    .collect(),
                actions: RowActions {
                    edit: EditPrefill {
                        key: employee.key(),
                        values: FormValues::from_employee(employee),
                    },
                    delete: DeleteTarget {
                        key: employee.key(),
                        name: employee.name.clone(),
                    },
                },
            })
            .collect();
        Self { rows }
    }

    pub fn headers() -> [&'static str; COLUMN_COUNT] {
        let mut headers = [ACTIONS_HEADER; COLUMN_COUNT];
        for (slot, field) in headers.iter_mut().zip(Field::ALL) {
            *slot = field.label();
        }
        headers
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Action controls of the `index`-th row; `None` for the placeholder.
    pub fn actions(&self, index: usize) -> Option<&RowActions> {
        match self.rows.get(index)? {
            TableRow::Record { actions, .. } => Some(actions),
            TableRow::Placeholder { .. } => None,
        }
    }

    pub fn record_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, TableRow::Record { .. }))
            .count()
    }
}
