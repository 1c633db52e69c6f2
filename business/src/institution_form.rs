//! Create-institution form: input fields, validation and submit state.
//!
//! Fields are validated when they change and again on submit. Messages are
//! the product's German copy.

use log::{info, warn};
use thiserror::Error;

use crate::api::ApiError;
use crate::institution::{Address, Institution};
use crate::table::RowId;

/// Editable text fields in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Id,
    PhoneNumber,
    Town,
    ZipCode,
    Street,
    StreetNumber,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Name,
        FormField::Id,
        FormField::PhoneNumber,
        FormField::Town,
        FormField::ZipCode,
        FormField::Street,
        FormField::StreetNumber,
    ];

    /// Access path of the field in the institution record.
    pub fn path(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Id => "id",
            FormField::PhoneNumber => "phoneNumber",
            FormField::Town => "address.town",
            FormField::ZipCode => "address.zipCode",
            FormField::Street => "address.street",
            FormField::StreetNumber => "address.streetNumber",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Id => "INST-Code",
            FormField::PhoneNumber => "Telefonnummer",
            FormField::Town => "Stadt",
            FormField::ZipCode => "Postleitzahl",
            FormField::Street => "Straße",
            FormField::StreetNumber => "Hausnummer",
        }
    }

    fn required_message(self) -> &'static str {
        match self {
            FormField::Name => "Name der Institution muss angegeben werden",
            FormField::Id => "INST-Code muss angegeben werden und eindeutig sein oder so",
            FormField::PhoneNumber => "Telefonnummer muss angegeben werden",
            FormField::Town => "Ort muss angegeben werden",
            FormField::ZipCode => "Postleitzahl muss angegeben werden",
            FormField::Street => "Straße muss angegeben werden",
            FormField::StreetNumber => "Hausnummer muss angegeben werden",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

const PHONE_PATTERN_MESSAGE: &str = "Telefonnummer nur aus Zahlen";
const ZIP_PATTERN_MESSAGE: &str = "Was denn bei deiner Postleitzahl los?!";
const STREET_NUMBER_MESSAGE: &str = "Hausnummer muss eine Zahl sein";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstitutionForm {
    pub name: String,
    pub id: String,
    pub phone_number: String,
    pub town: String,
    pub zip_code: String,
    pub street: String,
    pub street_number: String,
    /// "Liegt im Schulverwaltungsbezirk?"
    pub school_administrative_district: bool,
}

impl Default for InstitutionForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            id: String::new(),
            phone_number: String::new(),
            town: String::new(),
            zip_code: String::new(),
            street: String::new(),
            street_number: String::new(),
            school_administrative_district: true,
        }
    }
}

impl InstitutionForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Id => &self.id,
            FormField::PhoneNumber => &self.phone_number,
            FormField::Town => &self.town,
            FormField::ZipCode => &self.zip_code,
            FormField::Street => &self.street,
            FormField::StreetNumber => &self.street_number,
        }
    }

    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Id => &mut self.id,
            FormField::PhoneNumber => &mut self.phone_number,
            FormField::Town => &mut self.town,
            FormField::ZipCode => &mut self.zip_code,
            FormField::Street => &mut self.street,
            FormField::StreetNumber => &mut self.street_number,
        }
    }

    /// Sets the zip code. A non-empty zip code ticks the district box,
    /// clearing it unticks the box.
    pub fn set_zip_code(&mut self, zip_code: impl Into<String>) {
        self.zip_code = zip_code.into();
        self.sync_district_with_zip_code();
    }

    pub fn sync_district_with_zip_code(&mut self) {
        self.school_administrative_district = !self.zip_code.is_empty();
    }

    /// Validates one field, returning its first failing rule.
    pub fn validate_field(&self, field: FormField) -> Option<FieldError> {
        let value = self.value(field).trim();
        let fail = |message| Some(FieldError { field, message });

        if value.is_empty() {
            return fail(field.required_message());
        }

        match field {
            FormField::PhoneNumber if parse_phone_number(value).is_none() => {
                fail(PHONE_PATTERN_MESSAGE)
            }
            FormField::ZipCode if parse_digits::<u32>(value).is_none() => fail(ZIP_PATTERN_MESSAGE),
            FormField::StreetNumber if value.parse::<u32>().is_err() => fail(STREET_NUMBER_MESSAGE),
            _ => None,
        }
    }

    /// Checks every field and builds the record.
    pub fn validate(&self) -> Result<Institution, Vec<FieldError>> {
        let errors: Vec<FieldError> = FormField::ALL
            .iter()
            .filter_map(|&field| self.validate_field(field))
            .collect();

        let parsed = (
            parse_phone_number(self.phone_number.trim()),
            parse_digits::<u32>(self.zip_code.trim()),
            self.street_number.trim().parse::<u32>().ok(),
        );

        match (errors.is_empty(), parsed) {
            (true, (Some(phone_number), Some(zip_code), Some(street_number))) => Ok(Institution {
                id: RowId::parse(&self.id),
                name: self.name.trim().to_string(),
                address: Address {
                    street: self.street.trim().to_string(),
                    street_number,
                    zip_code,
                    town: self.town.trim().to_string(),
                },
                phone_number,
                school_administrative_district: self.school_administrative_district,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_digits<T: std::str::FromStr>(value: &str) -> Option<T> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Accepts digits with whitespace, `-` and `/` as separators.
fn parse_phone_number(value: &str) -> Option<u64> {
    if !value
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || c == '-' || c == '/')
    {
        return None;
    }
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    parse_digits(&digits)
}

/// Create page state: the form, its field errors and the submit status.
#[derive(Debug, Default)]
pub struct CreateInstitutionState {
    pub form: InstitutionForm,
    errors: Vec<FieldError>,
    submitting: bool,
    submit_error: Option<String>,
}

impl CreateInstitutionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_for(&self, field: FormField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Re-validates `field` after an edit.
    pub fn field_changed(&mut self, field: FormField) {
        if field == FormField::ZipCode {
            self.form.sync_district_with_zip_code();
        }
        self.errors.retain(|error| error.field != field);
        if let Some(error) = self.form.validate_field(field) {
            self.errors.push(error);
        }
    }

    /// Validates the whole form. Returns the record to send when valid.
    pub fn submit(&mut self) -> Option<Institution> {
        if self.submitting {
            return None;
        }
        match self.form.validate() {
            Ok(institution) => {
                info!("Submitting institution {}", institution.id);
                self.errors.clear();
                self.submit_error = None;
                self.submitting = true;
                Some(institution)
            }
            Err(errors) => {
                warn!("Institution form has {} invalid field(s)", errors.len());
                self.errors = errors;
                None
            }
        }
    }

    /// Applies the API answer to a submit. The form is cleared on success.
    pub fn finish(&mut self, result: &Result<Institution, ApiError>) {
        self.submitting = false;
        match result {
            Ok(_) => *self = Self::default(),
            Err(err) => self.submit_error = Some(err.to_string()),
        }
    }
}
