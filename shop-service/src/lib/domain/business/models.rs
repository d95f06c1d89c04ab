use std::fmt;

use crate::domain::business::errors::BusinessError;
use crate::domain::business::errors::BusinessNameError;
use crate::domain::user::models::UserId;

/// Storefront owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Business {
    pub id: BusinessId,
    pub name: BusinessName,
    pub city: String,
    pub region: String,
    pub description: Option<String>,
    pub logo: String,
    pub owner_id: UserId,
}

impl Business {
    pub const DEFAULT_LOCATION: &'static str = "Unspecified";
    pub const DEFAULT_LOGO: &'static str = "default.jpg";

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner_id == *user_id
    }

    /// Apply the fields present in `command`, leaving the others untouched.
    pub fn apply(&mut self, command: UpdateBusinessCommand) {
        if let Some(name) = command.name {
            self.name = name;
        }
        if let Some(city) = command.city {
            self.city = city;
        }
        if let Some(region) = command.region {
            self.region = region;
        }
        if let Some(description) = command.description {
            self.description = Some(description);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BusinessId(pub i64);

impl fmt::Display for BusinessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Business name value type, 1-20 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessName(String);

impl BusinessName {
    const MAX_LENGTH: usize = 20;

    pub fn new(name: String) -> Result<Self, BusinessNameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();

        if length == 0 {
            Err(BusinessNameError::Blank)
        } else if length > Self::MAX_LENGTH {
            Err(BusinessNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BusinessName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Partial update of a business; only provided fields change.
#[derive(Debug, Default)]
pub struct UpdateBusinessCommand {
    pub name: Option<BusinessName>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub description: Option<String>,
}

impl UpdateBusinessCommand {
    const MAX_LOCATION_LENGTH: usize = 100;

    /// Build a command, checking free-text fields against storage limits.
    ///
    /// # Errors
    /// * `InvalidName` - Name is blank or too long
    /// * `InvalidField` - City or region longer than 100 characters
    pub fn new(
        name: Option<String>,
        city: Option<String>,
        region: Option<String>,
        description: Option<String>,
    ) -> Result<Self, BusinessError> {
        let name = name.map(BusinessName::new).transpose()?;

        for (field, value) in [("city", &city), ("region", &region)] {
            if let Some(value) = value {
                if value.chars().count() > Self::MAX_LOCATION_LENGTH {
                    return Err(BusinessError::InvalidField(format!(
                        "{} longer than {} characters",
                        field,
                        Self::MAX_LOCATION_LENGTH
                    )));
                }
            }
        }

        Ok(Self {
            name,
            city,
            region,
            description,
        })
    }
}
