use serde::Deserialize;

// ###################################
// ->   STRUCTS
// ###################################
/// Deserializable Subscription
/// The subscription payload as posted by the form. Both fields may be missing,
/// validation happens on conversion to `ValidSubscription`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeserSubscription {
    pub email: Option<String>,
    pub first_name: Option<String>,
}

/// Validated Subscription
/// A subscription whose email is known to be present and non-empty.
/// The first name stays optional and is forwarded as-is.
#[derive(Debug)]
pub struct ValidSubscription {
    pub email: String,
    pub first_name: Option<String>,
}

// ###################################
// ->   IMPLS
// ###################################
impl TryFrom<DeserSubscription> for ValidSubscription {
    type Error = DataParsingError;

    fn try_from(deser_sub: DeserSubscription) -> Result<Self, Self::Error> {
        match deser_sub.email {
            Some(email) if !email.is_empty() => Ok(ValidSubscription {
                email,
                first_name: deser_sub.first_name,
            }),
            _ => Err(DataParsingError::EmailMissing),
        }
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug)]
pub enum DataParsingError {
    EmailMissing,
}
// Error Boilerplate
impl core::fmt::Display for DataParsingError {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for DataParsingError {}
