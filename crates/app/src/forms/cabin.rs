//! The create-cabin draft: fields, rules and the request it becomes.

use base64::Engine as _;
use shared_types::{
    CabinImageUpload, CreateCabinRequest, CAPACITY_MIN_MESSAGE, DISCOUNT_MESSAGE,
    FIELD_REQUIRED_MESSAGE, PRICE_MIN_MESSAGE,
};

use super::rules::Rule;
use super::state::{FieldValue, FormState, FormValues};

pub const CAPACITY_WHOLE_MESSAGE: &str = "Capacity must be a whole number";
pub const CAPACITY_TOO_LARGE_MESSAGE: &str = "Capacity is too large";

/// Fields of the create-cabin form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CabinField {
    Name,
    MaxCapacity,
    RegularPrice,
    Discount,
    Description,
    Image,
}

impl CabinField {
    /// Element id of the field's input.
    pub fn id(self) -> &'static str {
        match self {
            CabinField::Name => "name",
            CabinField::MaxCapacity => "maxCapacity",
            CabinField::RegularPrice => "regularPrice",
            CabinField::Discount => "discount",
            CabinField::Description => "description",
            CabinField::Image => "image",
        }
    }

    /// Map a field name used in server validation errors back to the form.
    pub fn from_request_field(name: &str) -> Option<Self> {
        match name {
            "name" => Some(CabinField::Name),
            "max_capacity" => Some(CabinField::MaxCapacity),
            "regular_price" => Some(CabinField::RegularPrice),
            "discount" => Some(CabinField::Discount),
            "description" => Some(CabinField::Description),
            "image" => Some(CabinField::Image),
            _ => None,
        }
    }
}

/// Capacity as stored: a whole number that fits an `i32`.
fn capacity(n: f64) -> Result<i32, &'static str> {
    if n.fract() != 0.0 {
        Err(CAPACITY_WHOLE_MESSAGE)
    } else if n > f64::from(i32::MAX) || n < f64::from(i32::MIN) {
        Err(CAPACITY_TOO_LARGE_MESSAGE)
    } else {
        Ok(n as i32)
    }
}

fn storable_capacity(value: &FieldValue, _: &FormValues<CabinField>) -> Option<&'static str> {
    capacity(value.as_number()?).err()
}

/// Discount may not exceed the regular price currently entered.
///
/// A regular price that does not parse is reported on its own field, so
/// the comparison is skipped.
fn discount_within_price(value: &FieldValue, values: &FormValues<CabinField>) -> Option<&'static str> {
    let price = values.number(CabinField::RegularPrice)?;
    match value.as_number() {
        Some(discount) if discount <= price => None,
        _ => Some(DISCOUNT_MESSAGE),
    }
}

/// A fresh create-cabin form. Discount starts at zero; everything else is
/// empty.
pub fn new_cabin_form() -> FormState<CabinField> {
    FormState::new()
        .register(
            CabinField::Name,
            FieldValue::text(""),
            vec![Rule::required(FIELD_REQUIRED_MESSAGE)],
        )
        .register(
            CabinField::MaxCapacity,
            FieldValue::text(""),
            vec![
                Rule::required(FIELD_REQUIRED_MESSAGE),
                Rule::min(1.0, CAPACITY_MIN_MESSAGE),
                Rule::Check(storable_capacity),
            ],
        )
        .register(
            CabinField::RegularPrice,
            FieldValue::text(""),
            vec![
                Rule::required(FIELD_REQUIRED_MESSAGE),
                Rule::min(1.0, PRICE_MIN_MESSAGE),
            ],
        )
        .register(
            CabinField::Discount,
            FieldValue::text("0"),
            vec![
                Rule::required(FIELD_REQUIRED_MESSAGE),
                Rule::Check(discount_within_price),
            ],
        )
        .register(
            CabinField::Description,
            FieldValue::text(""),
            vec![Rule::required(FIELD_REQUIRED_MESSAGE)],
        )
        .register(
            CabinField::Image,
            FieldValue::Files(Vec::new()),
            vec![Rule::required(FIELD_REQUIRED_MESSAGE)],
        )
}

/// Turn validated values into the create request.
///
/// Only the first selected file is sent. Returns `None` when a value does
/// not convert, which validation rules out.
pub fn cabin_request(values: &FormValues<CabinField>) -> Option<CreateCabinRequest> {
    let file = values.files(CabinField::Image).first()?;
    let max_capacity = capacity(values.number(CabinField::MaxCapacity)?).ok()?;

    Some(CreateCabinRequest {
        name: values.text(CabinField::Name).trim().to_string(),
        max_capacity,
        regular_price: values.number(CabinField::RegularPrice)?,
        discount: values.number(CabinField::Discount)?,
        description: values.text(CabinField::Description).trim().to_string(),
        image: CabinImageUpload {
            file_name: file.name.clone(),
            content_type: file.content_type.clone(),
            data: base64::engine::general_purpose::STANDARD.encode(&file.bytes),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::state::SelectedFile;
    use pretty_assertions::assert_eq;

    fn photo(name: &str) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: name.as_bytes().to_vec(),
        }
    }

    fn filled_form() -> FormState<CabinField> {
        let mut form = new_cabin_form();
        form.set_value(CabinField::Name, FieldValue::text("001"));
        form.set_value(CabinField::MaxCapacity, FieldValue::text("2"));
        form.set_value(CabinField::RegularPrice, FieldValue::text("250"));
        form.set_value(CabinField::Discount, FieldValue::text("25"));
        form.set_value(CabinField::Description, FieldValue::text("Small cabin in the woods"));
        form.set_value(CabinField::Image, FieldValue::Files(vec![photo("cabin-001.jpg")]));
        form
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let mut form = new_cabin_form();
        assert!(!form.validate());
        for field in [
            CabinField::Name,
            CabinField::MaxCapacity,
            CabinField::RegularPrice,
            CabinField::Description,
            CabinField::Image,
        ] {
            assert_eq!(form.error(field), Some(FIELD_REQUIRED_MESSAGE), "{field:?}");
        }
        // Discount defaults to 0 and has no price to compare against.
        assert_eq!(form.error(CabinField::Discount), None);
    }

    #[test]
    fn blank_discount_is_required() {
        let mut form = filled_form();
        form.set_value(CabinField::Discount, FieldValue::text(""));
        assert!(!form.validate());
        assert_eq!(form.error(CabinField::Discount), Some(FIELD_REQUIRED_MESSAGE));
    }

    #[test]
    fn zero_capacity_needs_at_least_one() {
        let mut form = filled_form();
        form.set_value(CabinField::MaxCapacity, FieldValue::text("0"));
        assert!(!form.validate());
        assert_eq!(form.error(CabinField::MaxCapacity), Some(CAPACITY_MIN_MESSAGE));
    }

    #[test]
    fn fractional_capacity_is_rejected() {
        let mut form = filled_form();
        form.set_value(CabinField::MaxCapacity, FieldValue::text("2.5"));
        assert!(!form.validate());
        assert_eq!(form.error(CabinField::MaxCapacity), Some(CAPACITY_WHOLE_MESSAGE));
    }

    #[test]
    fn capacity_beyond_i32_is_rejected() {
        let mut form = filled_form();
        form.set_value(CabinField::MaxCapacity, FieldValue::text("99999999999"));
        assert!(!form.validate());
        assert_eq!(form.error(CabinField::MaxCapacity), Some(CAPACITY_TOO_LARGE_MESSAGE));
        assert_eq!(cabin_request(&form.get_values()), None, "never narrowed");

        form.set_value(CabinField::MaxCapacity, FieldValue::text("2147483647"));
        assert!(form.validate());
        let req = cabin_request(&form.get_values()).unwrap();
        assert_eq!(req.max_capacity, i32::MAX);
    }

    #[test]
    fn zero_price_needs_at_least_one() {
        let mut form = filled_form();
        form.set_value(CabinField::RegularPrice, FieldValue::text("0"));
        form.set_value(CabinField::Discount, FieldValue::text("0"));
        assert!(!form.validate());
        assert_eq!(form.error(CabinField::RegularPrice), Some(PRICE_MIN_MESSAGE));
    }

    #[test]
    fn discount_above_price_is_blocked() {
        let mut form = filled_form();
        form.set_value(CabinField::Discount, FieldValue::text("300"));
        assert!(!form.validate());
        assert_eq!(form.error(CabinField::Discount), Some(DISCOUNT_MESSAGE));
    }

    #[test]
    fn discount_compares_numerically() {
        // "90" > "250" as strings; numerically it is fine.
        let mut form = filled_form();
        form.set_value(CabinField::Discount, FieldValue::text("90"));
        assert!(form.validate());

        form.set_value(CabinField::Discount, FieldValue::text("250"));
        assert!(form.validate(), "discount equal to price is allowed");
    }

    #[test]
    fn request_uses_first_file_only() {
        let mut form = filled_form();
        form.set_value(
            CabinField::Image,
            FieldValue::Files(vec![photo("first.jpg"), photo("second.jpg")]),
        );
        assert!(form.validate());

        let req = cabin_request(&form.get_values()).unwrap();
        assert_eq!(req.image.file_name, "first.jpg");
        assert_eq!(
            req.image.data,
            base64::engine::general_purpose::STANDARD.encode(b"first.jpg")
        );
        assert_eq!(req.max_capacity, 2);
        assert_eq!(req.regular_price, 250.0);
        assert_eq!(req.discount, 25.0);
    }

    #[test]
    fn server_field_names_map_back() {
        assert_eq!(CabinField::from_request_field("max_capacity"), Some(CabinField::MaxCapacity));
        assert_eq!(CabinField::from_request_field("image"), Some(CabinField::Image));
        assert_eq!(CabinField::from_request_field("created_at"), None);
    }
}
