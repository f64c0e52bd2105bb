//! Catalog attributes shared by products and cereals
//!
//! Products and cereals carry the same columns. They are defined once here
//! and registered for each record type through [`HasAttributes`].

use serde::{Deserialize, Serialize};

use crate::registry::{Assignment, FieldDescriptor, Value};

/// Descriptive and nutritional columns of a catalog entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attributes {
    pub name: String,
    /// Manufacturer code
    pub mfr: String,
    /// Hot or cold
    #[serde(rename = "type")]
    pub kind: String,
    pub calories: i32,
    pub protein: i32,
    pub fat: i32,
    pub sodium: i32,
    pub fiber: f64,
    pub carbo: f64,
    pub sugars: i32,
    pub potass: i32,
    pub vitamins: i32,
    pub shelf: i32,
    pub weight: f64,
    pub cups: f64,
    pub rating: f64,
}

/// Record types that embed [`Attributes`]
pub trait HasAttributes {
    fn attributes(&self) -> &Attributes;
    fn attributes_mut(&mut self) -> &mut Attributes;
}

/// Descriptors for every attribute column, in column order
pub(crate) fn attribute_fields<R: HasAttributes>() -> Vec<FieldDescriptor<R>> {
    vec![
        FieldDescriptor::<R>::text(
            "name",
            |r| r.attributes().name.as_str(),
            |r, v| r.attributes_mut().name = v,
        ),
        FieldDescriptor::<R>::text(
            "mfr",
            |r| r.attributes().mfr.as_str(),
            |r, v| r.attributes_mut().mfr = v,
        ),
        FieldDescriptor::<R>::text(
            "type",
            |r| r.attributes().kind.as_str(),
            |r, v| r.attributes_mut().kind = v,
        ),
        FieldDescriptor::<R>::int(
            "calories",
            |r| r.attributes().calories,
            |r, v| r.attributes_mut().calories = v,
        ),
        FieldDescriptor::<R>::int(
            "protein",
            |r| r.attributes().protein,
            |r, v| r.attributes_mut().protein = v,
        ),
        FieldDescriptor::<R>::int(
            "fat",
            |r| r.attributes().fat,
            |r, v| r.attributes_mut().fat = v,
        ),
        FieldDescriptor::<R>::int(
            "sodium",
            |r| r.attributes().sodium,
            |r, v| r.attributes_mut().sodium = v,
        ),
        FieldDescriptor::<R>::float(
            "fiber",
            |r| r.attributes().fiber,
            |r, v| r.attributes_mut().fiber = v,
        ),
        FieldDescriptor::<R>::float(
            "carbo",
            |r| r.attributes().carbo,
            |r, v| r.attributes_mut().carbo = v,
        ),
        FieldDescriptor::<R>::int(
            "sugars",
            |r| r.attributes().sugars,
            |r, v| r.attributes_mut().sugars = v,
        ),
        FieldDescriptor::<R>::int(
            "potass",
            |r| r.attributes().potass,
            |r, v| r.attributes_mut().potass = v,
        ),
        FieldDescriptor::<R>::int(
            "vitamins",
            |r| r.attributes().vitamins,
            |r, v| r.attributes_mut().vitamins = v,
        ),
        FieldDescriptor::<R>::int(
            "shelf",
            |r| r.attributes().shelf,
            |r, v| r.attributes_mut().shelf = v,
        ),
        FieldDescriptor::<R>::float(
            "weight",
            |r| r.attributes().weight,
            |r, v| r.attributes_mut().weight = v,
        ),
        FieldDescriptor::<R>::float(
            "cups",
            |r| r.attributes().cups,
            |r, v| r.attributes_mut().cups = v,
        ),
        FieldDescriptor::<R>::float(
            "rating",
            |r| r.attributes().rating,
            |r, v| r.attributes_mut().rating = v,
        ),
    ]
}

/// Partial form of [`Attributes`]
///
/// A `null` value and a missing key both mean "leave unchanged": none of
/// these columns is nullable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributesPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfr: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbo: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugars: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potass: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vitamins: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelf: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cups: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl AttributesPatch {
    /// Appends an assignment for every present column
    pub fn push_assignments(&self, out: &mut Vec<Assignment>) {
        let text = [
            ("name", &self.name),
            ("mfr", &self.mfr),
            ("type", &self.kind),
        ];
        for (field, value) in text {
            if let Some(value) = value {
                out.push(Assignment::new(field, Value::Text(value.clone())));
            }
        }

        let ints = [
            ("calories", self.calories),
            ("protein", self.protein),
            ("fat", self.fat),
            ("sodium", self.sodium),
            ("sugars", self.sugars),
            ("potass", self.potass),
            ("vitamins", self.vitamins),
            ("shelf", self.shelf),
        ];
        out.extend(
            ints.into_iter()
                .filter_map(|(field, value)| value.map(|v| Assignment::new(field, Value::Int(v)))),
        );

        let floats = [
            ("fiber", self.fiber),
            ("carbo", self.carbo),
            ("weight", self.weight),
            ("cups", self.cups),
            ("rating", self.rating),
        ];
        out.extend(
            floats
                .into_iter()
                .filter_map(|(field, value)| value.map(|v| Assignment::new(field, Value::Float(v)))),
        );
    }
}
