//! Resource vocabulary shared by every harness component.
//!
//! This module defines the resource kinds exposed by the target service, their
//! dependency relation (user → post → comment), server-assigned identifiers,
//! and the [`Payload`] type used for create/update bodies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A remote entity type exposed through a REST collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// `/users`
    User,
    /// `/posts`, owned by a user
    Post,
    /// `/comments`, attached to a post
    Comment,
}

impl ResourceKind {
    /// All kinds in dependency order, parents first.
    pub const ALL: [ResourceKind; 3] = [ResourceKind::User, ResourceKind::Post, ResourceKind::Comment];

    /// Returns the kind this kind depends on, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use apicheck_harness::ResourceKind;
    ///
    /// assert_eq!(ResourceKind::Comment.parent(), Some(ResourceKind::Post));
    /// assert_eq!(ResourceKind::User.parent(), None);
    /// ```
    pub fn parent(self) -> Option<ResourceKind> {
        match self {
            ResourceKind::User => None,
            ResourceKind::Post => Some(ResourceKind::User),
            ResourceKind::Comment => Some(ResourceKind::Post),
        }
    }

    /// Returns the payload field that carries the parent identifier.
    pub fn parent_field(self) -> Option<&'static str> {
        match self {
            ResourceKind::User => None,
            ResourceKind::Post => Some("user_id"),
            ResourceKind::Comment => Some("post_id"),
        }
    }

    /// Returns the collection path segment, e.g. `users`.
    pub fn collection(self) -> &'static str {
        match self {
            ResourceKind::User => "users",
            ResourceKind::Post => "posts",
            ResourceKind::Comment => "comments",
        }
    }

    /// Returns the lowercase singular name.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::User => "user",
            ResourceKind::Post => "post",
            ResourceKind::Comment => "comment",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A server-assigned resource identifier.
///
/// Identifiers are opaque positive integers. The harness never invents or
/// mutates them; it only carries what the service returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(u64);

impl ResourceId {
    /// Creates an identifier, rejecting zero.
    pub fn new(id: u64) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    /// Reads a positive integer identifier from a JSON value.
    pub fn from_json(value: &Value) -> Option<Self> {
        value.as_u64().and_then(Self::new)
    }

    /// Returns the raw value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ResourceId> for Value {
    fn from(id: ResourceId) -> Self {
        Value::from(id.0)
    }
}

/// User gender values accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// `male`
    Male,
    /// `female`
    Female,
}

impl Gender {
    /// All accepted values.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Returns the wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// User account status values accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// `active`
    Active,
    /// `inactive`
    Inactive,
}

impl UserStatus {
    /// All accepted values.
    pub const ALL: [UserStatus; 2] = [UserStatus::Active, UserStatus::Inactive];

    /// Returns the wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            other => Err(format!("unknown user status: {other}")),
        }
    }
}

/// A create/update body: field name to JSON value.
///
/// A payload has no identity until the service persists it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a payload from a JSON value, returning `None` unless it is an object.
    ///
    /// # Examples
    ///
    /// ```
    /// use apicheck_harness::Payload;
    /// use serde_json::json;
    ///
    /// let payload = Payload::from_value(json!({"name": "X"})).unwrap();
    /// assert_eq!(payload.get("name"), Some(&json!("X")));
    /// assert!(Payload::from_value(json!([1, 2])).is_none());
    /// ```
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Sets a field, returning the payload for chaining.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Sets a field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Removes a field, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Returns a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns a string field value.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Returns `true` if the field is present.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns `true` if the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the fields.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Shallow merge: every field in `overrides` replaces the field here.
    pub fn merge(mut self, overrides: &Payload) -> Self {
        for (field, value) in overrides.iter() {
            self.0.insert(field.clone(), value.clone());
        }
        self
    }

    /// Converts into a JSON object value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Returns a JSON object value without consuming the payload.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
