//! DNS record wire shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};

/// Possible types a DNS record can have.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Alias,
    Caa,
    Cname,
    Ds,
    Forward,
    Mx,
    Ns,
    Ptr,
    Redirect,
    Slave,
    Soa,
    Spf,
    Srv,
    Sshfp,
    Tlsa,
    Txt,
}

impl RecordType {
    /// Gets the string representation of the type.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl From<RecordType> for String {
    fn from(value: RecordType) -> Self {
        value.as_str().to_string()
    }
}

/// A DNS record stored in a zone.
///
/// `id` and `zone_id` are assigned by the server and omitted from request
/// bodies while zero, as are the timestamps while unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub zone_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A resource record tuple used as bulk-operation input.
///
/// Unlike [`Record`] it carries no ID or zone linkage: bulk endpoints match
/// existing records by whichever of the optional fields are supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RR {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

pub(crate) fn is_zero(n: &i64) -> bool {
    *n == 0
}
