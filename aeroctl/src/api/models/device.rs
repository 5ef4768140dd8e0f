//! Device catalogue models: devices, their specification groups and derived combinations.
//!
//! A device offers one or more specification groups (colour, storage, ...). The rentable SKUs
//! are the cartesian product of those groups, each combination carrying its own price and
//! stock. Prices are never negative and stock is unsigned.

use super::pagination::{DEFAULT_PAGE_SIZE, Page, PageRequest};
use crate::query::ListQuery;
use crate::types::DeviceId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Active,
    Inactive,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Free-form key/value line shown on the device detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SpecDetail {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeviceParameter {
    pub name: String,
    pub value: String,
    pub unit: String,
    /// Parameter group this line belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ParamGroup {
    pub name: String,
    pub params: Vec<DeviceParameter>,
}

/// Node of the category tree used by cascading pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeviceCategory {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(no_recursion)]
    pub children: Option<Vec<DeviceCategory>>,
}

impl DeviceCategory {
    /// Depth-first lookup of a category by value.
    pub fn find<'a>(categories: &'a [DeviceCategory], value: &str) -> Option<&'a DeviceCategory> {
        categories.iter().find_map(|category| {
            if category.value == value {
                Some(category)
            } else {
                category.children.as_deref().and_then(|children| Self::find(children, value))
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpecValue {
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

/// Pre-packaged specification option (legacy single-level specs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecOption {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    pub spec_values: Vec<SpecValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecGroup {
    pub name: String,
    pub values: Vec<SpecValue>,
    /// Editor state kept by the console, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_value: Option<String>,
}

impl SpecGroup {
    pub fn new(name: impl Into<String>, values: Vec<SpecValue>) -> Self {
        Self {
            name: name.into(),
            values,
            input_visible: None,
            input_value: None,
        }
    }

    pub fn value(&self, name: &str) -> Option<&SpecValue> {
        self.values.iter().find(|v| v.name == name)
    }
}

/// One rentable SKU: a choice of one value per specification group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpecCombination {
    pub id: String,
    /// Group name to chosen value name
    pub specs: BTreeMap<String, String>,
    pub price: Decimal,
    pub stock: u32,
}

impl SpecCombination {
    /// Cartesian product of `groups`.
    ///
    /// Each combination is priced at `base_price` plus the chosen values' prices and stocked at
    /// the smallest stock among the chosen values. Groups without values are skipped, so a
    /// half-edited group doesn't wipe out every combination.
    pub fn derive(groups: &[SpecGroup], base_price: Decimal) -> Vec<SpecCombination> {
        let groups: Vec<&SpecGroup> = groups.iter().filter(|g| !g.values.is_empty()).collect();
        if groups.is_empty() {
            return Vec::new();
        }

        let mut choices: Vec<Vec<(&str, &SpecValue)>> = vec![Vec::new()];
        for group in &groups {
            choices = choices
                .into_iter()
                .flat_map(|prefix| {
                    group.values.iter().map(move |value| {
                        let mut next = prefix.clone();
                        next.push((group.name.as_str(), value));
                        next
                    })
                })
                .collect();
        }

        choices
            .into_iter()
            .enumerate()
            .map(|(index, chosen)| SpecCombination {
                id: format!("combo-{}", index + 1),
                specs: chosen
                    .iter()
                    .map(|(group, value)| (group.to_string(), value.name.clone()))
                    .collect(),
                price: chosen.iter().fold(base_price, |acc, (_, value)| acc + value.price),
                stock: chosen.iter().map(|(_, value)| value.stock).min().unwrap_or(0),
            })
            .collect()
    }
}

/// A rentable device in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub category_id: String,
    pub category_name: String,
    pub serial_number: String,
    pub status: DeviceStatus,
    pub base_price: Decimal,
    pub rent_days: u32,
    pub specification: String,
    pub spec_options: Vec<SpecOption>,
    pub parameters: Vec<DeviceParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub images: Vec<String>,
    pub main_image: String,
    pub create_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Warranty period in months
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    pub spec_groups: Vec<SpecGroup>,
    pub spec_combinations: Vec<SpecCombination>,
    pub param_groups: Vec<ParamGroup>,
}

/// Ways a device can break the catalogue invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("{field} has a negative price")]
    NegativePrice { field: String },

    #[error("combination {combination} references unknown spec group {group}")]
    UnknownSpecGroup { combination: String, group: String },

    #[error("combination {combination} references unknown value {value} in spec group {group}")]
    UnknownSpecValue {
        combination: String,
        group: String,
        value: String,
    },

    #[error("main image {main_image} is not part of the image collection")]
    MainImageMissing { main_image: String },
}

impl Device {
    /// The image shown in lists: the designated main image, or the first image as a fallback.
    pub fn primary_image(&self) -> Option<&str> {
        if !self.main_image.is_empty() {
            Some(&self.main_image)
        } else {
            self.images.first().map(String::as_str)
        }
    }

    /// Regenerate the combinations from the current spec groups.
    ///
    /// Combinations whose spec choice already existed keep their id, price and stock so that
    /// operator edits survive adding a new value to a group.
    pub fn rebuild_spec_combinations(&mut self) {
        let previous = std::mem::take(&mut self.spec_combinations);
        self.spec_combinations = SpecCombination::derive(&self.spec_groups, self.base_price)
            .into_iter()
            .map(|fresh| {
                previous
                    .iter()
                    .find(|old| old.specs == fresh.specs)
                    .cloned()
                    .unwrap_or(fresh)
            })
            .collect();
    }

    /// Check the catalogue invariants.
    pub fn validate(&self) -> Result<(), DeviceError> {
        let negative = |field: String, price: Decimal| {
            if price.is_sign_negative() && !price.is_zero() {
                Err(DeviceError::NegativePrice { field })
            } else {
                Ok(())
            }
        };

        negative("basePrice".to_string(), self.base_price)?;
        for option in &self.spec_options {
            negative(format!("specOption {}", option.id), option.price)?;
            for value in &option.spec_values {
                negative(format!("specOption {} value {}", option.id, value.name), value.price)?;
            }
        }
        for group in &self.spec_groups {
            for value in &group.values {
                negative(format!("specGroup {} value {}", group.name, value.name), value.price)?;
            }
        }

        for combination in &self.spec_combinations {
            negative(format!("combination {}", combination.id), combination.price)?;
            for (group_name, value_name) in &combination.specs {
                let group = self
                    .spec_groups
                    .iter()
                    .find(|g| &g.name == group_name)
                    .ok_or_else(|| DeviceError::UnknownSpecGroup {
                        combination: combination.id.clone(),
                        group: group_name.clone(),
                    })?;
                if group.value(value_name).is_none() {
                    return Err(DeviceError::UnknownSpecValue {
                        combination: combination.id.clone(),
                        group: group_name.clone(),
                        value: value_name.clone(),
                    });
                }
            }
        }

        if !self.images.is_empty() && !self.main_image.is_empty() && !self.images.contains(&self.main_image) {
            return Err(DeviceError::MainImageMissing {
                main_image: self.main_image.clone(),
            });
        }

        Ok(())
    }
}

/// Lightweight projection used by device pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeviceOption {
    pub id: DeviceId,
    pub name: String,
}

impl From<&Device> for DeviceOption {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id.clone(),
            name: device.name.clone(),
        }
    }
}

fn default_page_num() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Device list search form.
///
/// `name` is a substring match; category, status and brand match exactly; the price bounds are
/// inclusive and apply to the base price. Everything is combined with AND.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default = "default_page_num")]
    pub page_num: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            name: None,
            category_id: None,
            status: None,
            min_price: None,
            max_price: None,
            brand: None,
            page_num: default_page_num(),
            page_size: default_page_size(),
        }
    }
}

impl SearchParams {
    fn query(&self) -> ListQuery<'_, Device> {
        ListQuery::new()
            .contains(self.name.as_deref(), |d: &Device| d.name.as_str())
            .equals(self.category_id.as_deref(), |d: &Device| d.category_id.as_str())
            .equals(self.status.as_deref(), |d: &Device| d.status.as_str())
            .equals(self.brand.as_deref(), |d: &Device| d.brand.as_deref().unwrap_or(""))
            .when(self.min_price, |d: &Device, min: &Decimal| d.base_price >= *min)
            .when(self.max_price, |d: &Device, max: &Decimal| d.base_price <= *max)
    }

    /// Run the search over `devices`, preserving their order.
    pub fn search(&self, devices: &[Device]) -> Page<Device> {
        let page = PageRequest::new(self.page_num, self.page_size).resolve(DEFAULT_PAGE_SIZE);
        self.query().paginate(devices, page)
    }
}
