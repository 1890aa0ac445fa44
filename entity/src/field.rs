use std::fmt;

/// Columns of an employee record, in table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    FirstSurname,
    SecondSurname,
    Department,
    ShiftType,
    Hours,
    ClockInHour,
    Salary,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::FirstSurname,
        Field::SecondSurname,
        Field::Department,
        Field::ShiftType,
        Field::Hours,
        Field::ClockInHour,
        Field::Salary,
    ];

    /// Every column an update may change.
    pub const EDITABLE: [Field; 7] = [
        Field::FirstSurname,
        Field::SecondSurname,
        Field::Department,
        Field::ShiftType,
        Field::Hours,
        Field::ClockInHour,
        Field::Salary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::FirstSurname => "First surname",
            Field::SecondSurname => "Second surname",
            Field::Department => "Department",
            Field::ShiftType => "Shift type",
            Field::Hours => "Hours",
            Field::ClockInHour => "Clock-in hour",
            Field::Salary => "Salary",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Field::Hours | Field::ClockInHour | Field::Salary)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
