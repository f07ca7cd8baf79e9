//! # Typed client for the LuaDNS API.
//!
//! Implements a small, synchronous client for the [LuaDNS API]: account
//! profile, zone and record management, and the bulk record operations.
//! Every call performs one blocking HTTP request authenticated with HTTP
//! Basic auth and returns a typed result; there are no retries and no
//! background work.
//!
//! ## Examples
//!
//! ```no_run
//! use luadns::{Client, ListParams};
//!
//! let client = Client::builder()
//!     .email("joe@example.com")
//!     .api_key("<APIKEY>")
//!     .build()
//!     .unwrap();
//!
//! let user = client.me().unwrap();
//! println!("package: {}", user.package);
//!
//! for zone in client.list_zones(&ListParams::default(), None).unwrap() {
//!     for record in client.list_records(zone.id, &ListParams::default(), None).unwrap() {
//!         println!("{} {} {}", record.name, record.rtype, record.content);
//!     }
//! }
//! ```
//!
//! Rate limits are not retried internally; a call that exceeds the request
//! quota fails with [Error::TooManyRequests] carrying the limit and the
//! reset time, leaving the retry policy to the caller.
//!
//! [LuaDNS API]: https://www.luadns.com/api.html

mod client;
mod errors;
mod params;
pub mod record;
mod rest;
mod user;
mod zone;

pub use client::*;
pub use errors::*;
pub use params::*;
pub use record::{RR, Record, RecordType};
pub use rest::*;
pub use user::*;
pub use zone::*;
