use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::Field;

/// Opaque identifier issued by the backend, when it issues one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(value) => Self(value),
            Raw::Signed(value) => Self(value.to_string()),
            Raw::Unsigned(value) => Self(value.to_string()),
        })
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How update and delete requests address a record.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EmployeeKey {
    Id(EmployeeId),
    Name(String),
}

impl EmployeeKey {
    /// Raw (unencoded) path segment for `{collection}/{key}`.
    pub fn path_segment(&self) -> &str {
        match self {
            EmployeeKey::Id(id) => id.as_str(),
            EmployeeKey::Name(name) => name,
        }
    }
}

impl fmt::Display for EmployeeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmployeeKey::Id(id) => write!(f, "id {id}"),
            EmployeeKey::Name(name) => write!(f, "name {name:?}"),
        }
    }
}

/// A record as returned by `GET {collection}`. Only the name is guaranteed;
/// any other column may come back `null` and renders as an empty cell.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Employee {
    #[serde(default, alias = "ID", alias = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(default, rename = "PrimerApellido", alias = "primer_apellido")]
    pub first_surname: Option<String>,
    #[serde(default, rename = "SegundoApellido", alias = "segundo_apellido")]
    pub second_surname: Option<String>,
    #[serde(default, rename = "Departamento")]
    pub department: Option<String>,
    #[serde(default, rename = "Tipo_de_Jornada")]
    pub shift_type: Option<String>,
    #[serde(default, rename = "Horas")]
    pub hours: Option<i64>,
    #[serde(default, rename = "Hora_de_fichar")]
    pub clock_in_hour: Option<i64>,
    #[serde(default, rename = "Sueldo")]
    pub salary: Option<i64>,
}

impl Employee {
    pub fn key(&self) -> EmployeeKey {
        match &self.id {
            Some(id) => EmployeeKey::Id(id.clone()),
            None => EmployeeKey::Name(self.name.clone()),
        }
    }

    /// Display text of a column, exactly as it will appear in the table.
    pub fn display(&self, field: Field) -> String {
        fn text(value: Option<&str>) -> String {
            value.unwrap_or_default().to_string()
        }
        fn number(value: Option<i64>) -> String {
            value.map(|n| n.to_string()).unwrap_or_default()
        }

        match field {
            Field::Name => self.name.clone(),
            Field::FirstSurname => text(self.first_surname.as_deref()),
            Field::SecondSurname => text(self.second_surname.as_deref()),
            Field::Department => text(self.department.as_deref()),
            Field::ShiftType => text(self.shift_type.as_deref()),
            Field::Hours => number(self.hours),
            Field::ClockInHour => number(self.clock_in_hour),
            Field::Salary => number(self.salary),
        }
    }

    /// Overwrites every editable column; the name and id stay.
    pub fn apply(&mut self, update: EmployeeUpdate) {
        self.first_surname = Some(update.first_surname);
        self.second_surname = Some(update.second_surname);
        self.department = Some(update.department);
        self.shift_type = Some(update.shift_type);
        self.hours = Some(update.hours);
        self.clock_in_hour = Some(update.clock_in_hour);
        self.salary = Some(update.salary);
    }
}

impl From<NewEmployee> for Employee {
    fn from(new: NewEmployee) -> Self {
        Self {
            id: None,
            name: new.name,
            first_surname: Some(new.first_surname),
            second_surname: Some(new.second_surname),
            department: Some(new.department),
            shift_type: Some(new.shift_type),
            hours: Some(new.hours),
            clock_in_hour: Some(new.clock_in_hour),
            salary: Some(new.salary),
        }
    }
}

/// Body of `POST {collection}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewEmployee {
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "primer_apellido")]
    pub first_surname: String,
    #[serde(rename = "segundo_apellido")]
    pub second_surname: String,
    #[serde(rename = "Departamento")]
    pub department: String,
    #[serde(rename = "Tipo_de_Jornada")]
    pub shift_type: String,
    #[serde(rename = "Horas")]
    pub hours: i64,
    #[serde(rename = "Hora_de_fichar")]
    pub clock_in_hour: i64,
    #[serde(rename = "Sueldo")]
    pub salary: i64,
}

/// Body of `PUT {collection}/{key}`. The name is never part of an update.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmployeeUpdate {
    #[serde(rename = "primer_apellido")]
    pub first_surname: String,
    #[serde(rename = "segundo_apellido")]
    pub second_surname: String,
    #[serde(rename = "Departamento")]
    pub department: String,
    #[serde(rename = "Tipo_de_Jornada")]
    pub shift_type: String,
    #[serde(rename = "Horas")]
    pub hours: i64,
    #[serde(rename = "Hora_de_fichar")]
    pub clock_in_hour: i64,
    #[serde(rename = "Sueldo")]
    pub salary: i64,
}
