//! Record types rendered by the report composer.
//!
//! The types in this module are plain data holders populated by an upstream
//! data-access layer.  They are immutable for the duration of a render call:
//! the composer only reads and stringifies them.  No validation happens here;
//! a field that is still unset when its table cell is built surfaces as a
//! [`MissingField`][crate::error::ReportError::MissingField] error in the
//! render path.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A system user identified by account and contact fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    username: String,
    name: String,
    lastname: String,
    national_id: Option<String>,
    email: Option<String>,
    phone: Option<String>,
}

impl User {
    /// Creates a user from the identity fields that are always known.
    pub fn new(
        username: impl Into<String>,
        name: impl Into<String>,
        lastname: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            name: name.into(),
            lastname: lastname.into(),
            national_id: None,
            email: None,
            phone: None,
        }
    }

    /// Returns the account name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the first name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the last name.
    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    /// Returns the national identification number, if set.
    pub fn national_id(&self) -> Option<&str> {
        self.national_id.as_deref()
    }

    /// Returns the email address, if set.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the phone number, if set.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Sets the national identification number and returns the updated user.
    pub fn with_national_id(mut self, national_id: impl Into<Option<String>>) -> Self {
        self.national_id = national_id.into();
        self
    }

    /// Sets the email address and returns the updated user.
    pub fn with_email(mut self, email: impl Into<Option<String>>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the phone number and returns the updated user.
    pub fn with_phone(mut self, phone: impl Into<Option<String>>) -> Self {
        self.phone = phone.into();
        self
    }
}

/// A product with its physical dimensions and weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    name: String,
    code: String,
    width: f64,
    height: f64,
    length: f64,
    weight: f64,
}

impl Product {
    /// Creates a product; all fields are required.
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        width: f64,
        height: f64,
        length: f64,
        weight: f64,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            width,
            height,
            length,
            weight,
        }
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the product code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// One addressable storage slot, optionally holding a product.
///
/// The product link is by id only; the slot does not own product data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    building: String,
    zone: String,
    space_id: i32,
    space_height: i32,
    space_width: i32,
    space_length: i32,
    product_id: Option<i32>,
}

impl Warehouse {
    /// Creates a storage slot with its address and dimensions.
    pub fn new(
        building: impl Into<String>,
        zone: impl Into<String>,
        space_id: i32,
        space_height: i32,
        space_width: i32,
        space_length: i32,
    ) -> Self {
        Self {
            building: building.into(),
            zone: zone.into(),
            space_id,
            space_height,
            space_width,
            space_length,
            product_id: None,
        }
    }

    /// Returns the building identifier.
    pub fn building(&self) -> &str {
        &self.building
    }

    /// Returns the zone within the building.
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Returns the slot id.
    pub fn space_id(&self) -> i32 {
        self.space_id
    }

    /// Returns the slot height.
    pub fn space_height(&self) -> i32 {
        self.space_height
    }

    /// Returns the slot width.
    pub fn space_width(&self) -> i32 {
        self.space_width
    }

    /// Returns the slot length.
    pub fn space_length(&self) -> i32 {
        self.space_length
    }

    /// Returns the id of the stored product, if the slot is occupied.
    pub fn product_id(&self) -> Option<i32> {
        self.product_id
    }

    /// Sets the stored product id and returns the updated slot.
    pub fn with_product_id(mut self, product_id: impl Into<Option<i32>>) -> Self {
        self.product_id = product_id.into();
        self
    }
}

/// A unit of work together with the records associated to it for reporting.
///
/// The associated collections are report-time associations, not storage-level
/// ownership.  They are iterated in the order supplied by the caller; no
/// sorting is applied anywhere in the render path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: i32,
    name: String,
    description: String,
    state: i32,
    priority: i32,
    creation_date: Option<NaiveDate>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    users: Vec<User>,
    products: Vec<Product>,
    warehouses: Vec<Warehouse>,
}

impl Task {
    /// Creates a task; the dates and associated collections start empty.
    pub fn new(
        id: i32,
        name: impl Into<String>,
        description: impl Into<String>,
        state: i32,
        priority: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            state,
            priority,
            creation_date: None,
            start_date: None,
            end_date: None,
            users: Vec::new(),
            products: Vec::new(),
            warehouses: Vec::new(),
        }
    }

    /// Returns the task id.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Returns the task name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the state code.
    pub fn state(&self) -> i32 {
        self.state
    }

    /// Returns the human label for the state code.
    pub fn state_label(&self) -> String {
        format!("State {}", self.state)
    }

    /// Returns the priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the creation date, if set.
    pub fn creation_date(&self) -> Option<NaiveDate> {
        self.creation_date
    }

    /// Returns the start date, if set.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the end date, if set.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns the users associated for reporting.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Returns the products associated for reporting.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns the storage slots associated for reporting.
    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    /// Sets the creation date and returns the updated task.
    pub fn with_creation_date(mut self, date: impl Into<Option<NaiveDate>>) -> Self {
        self.creation_date = date.into();
        self
    }

    /// Sets the start date and returns the updated task.
    pub fn with_start_date(mut self, date: impl Into<Option<NaiveDate>>) -> Self {
        self.start_date = date.into();
        self
    }

    /// Sets the end date and returns the updated task.
    pub fn with_end_date(mut self, date: impl Into<Option<NaiveDate>>) -> Self {
        self.end_date = date.into();
        self
    }

    /// Replaces the associated users and returns the updated task.
    pub fn with_users(mut self, users: impl Into<Vec<User>>) -> Self {
        self.users = users.into();
        self
    }

    /// Replaces the associated products and returns the updated task.
    pub fn with_products(mut self, products: impl Into<Vec<Product>>) -> Self {
        self.products = products.into();
        self
    }

    /// Replaces the associated storage slots and returns the updated task.
    pub fn with_warehouses(mut self, warehouses: impl Into<Vec<Warehouse>>) -> Self {
        self.warehouses = warehouses.into();
        self
    }
}
