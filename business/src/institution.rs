//! Institution records and how the list table shows them.

use serde::{Deserialize, Serialize};

use crate::table::{
    Align, Header, HeaderSpec, RowId, TableError, TableModel, TableRow, checkbox,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub street_number: u32,
    pub zip_code: u32,
    pub town: String,
}

/// A school or administrative body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    /// The INST-Code.
    pub id: RowId,
    pub name: String,
    pub address: Address,
    pub phone_number: u64,
    /// Whether the institution lies in the school administrative district.
    pub school_administrative_district: bool,
}

impl TableRow for Institution {
    fn id(&self) -> RowId {
        self.id.clone()
    }
}

/// Labels of the columns the list can be sorted by.
pub const SORTABLE_LABELS: [&str; 6] = [
    "Name",
    "INST-Code",
    "Straße",
    "Ort",
    "PLZ",
    "Telefonnummer",
];

pub fn institution_headers() -> HeaderSpec {
    HeaderSpec::new()
        .leaf("id", Header::new("INST-Code").min_width(80.0))
        .leaf("name", Header::new("Name").min_width(160.0))
        .group(
            "address",
            HeaderSpec::new()
                .leaf("street", Header::new("Straße"))
                .leaf("streetNumber", Header::new("Hausnummer"))
                .leaf("town", Header::new("Ort"))
                .leaf("zipCode", Header::new("PLZ")),
        )
        .leaf("phoneNumber", Header::new("Telefonnummer"))
        .leaf(
            "schoolAdministrativeDistrict",
            Header::new("SVB?").format(checkbox).align(Align::Right),
        )
}

/// Empty institutions table with the list's columns and sort controls.
pub fn institutions_table() -> Result<TableModel<Institution>, TableError> {
    Ok(TableModel::new(institution_headers())?.with_sortable(SORTABLE_LABELS))
}

fn demo(id: RowId, street: &str, zip_code: u32) -> Institution {
    Institution {
        id,
        name: "name".to_string(),
        address: Address {
            street: street.to_string(),
            street_number: 42,
            zip_code,
            town: "bla".to_string(),
        },
        phone_number: 123_456_789,
        school_administrative_district: true,
    }
}

/// Long on purpose, so the name column has to cut it.
const LLGGI_NAME: &str = "Landgraf Ludwigs Gymnasium Gießen wir brauchen mehr text hier jetzt das reicht noch nicht immer noch zu wenig die tabelle ist zu klein uff jetzt werd doch groß genug dass wir sehen was passiert pls oh sie reduziert automatisch padding und macht line breaks";

/// Demo records shown while no backend is configured.
pub fn fixtures() -> Vec<Institution> {
    vec![
        demo(RowId::Number(1), "asdf", 31415),
        demo(RowId::Number(2), "bsdf", 31415),
        demo(RowId::Number(3), "csdf", 31415),
        demo(RowId::Number(4), "gsdf", 31415),
        demo(RowId::Number(5), "efsadf", 31415),
        Institution {
            id: RowId::from("LLGGI"),
            name: LLGGI_NAME.to_string(),
            address: Address {
                street: "Reichenberger Straße".to_string(),
                street_number: 11,
                zip_code: 35396,
                town: "Gießen".to_string(),
            },
            phone_number: 123_456_789,
            school_administrative_district: true,
        },
        demo(RowId::Number(7), "blub", 31415),
        demo(RowId::Number(8), "blub", 31415),
        demo(RowId::Number(9), "blub", 31415),
        demo(RowId::Number(10), "blub", 31415),
        demo(RowId::Number(11), "blub", 2),
    ]
}

/// Fixtures whose INST-Code matches `query` exactly, or all of them for an
/// empty query.
pub fn search_fixtures(query: &str) -> Vec<Institution> {
    let query = query.trim();
    fixtures()
        .into_iter()
        .filter(|institution| query.is_empty() || institution.id.to_string() == query)
        .collect()
}
