//! Prints the authenticated account profile, then walks every zone and its
//! records.
//!
//! Reads `LUADNS_EMAIL` and `LUADNS_API_KEY` from the environment, plus an
//! optional `LUADNS_ENDPOINT` for pointing at a non-production server:
//!
//! ```sh
//! LUADNS_EMAIL=joe@example.com LUADNS_API_KEY=... cargo run --example whoami
//! ```

use std::env;
use std::error::Error;

use luadns::{Client, ListMeta, ListParams};
use url::Url;

fn main() -> Result<(), Box<dyn Error>> {
    let email = env::var("LUADNS_EMAIL")?;
    let api_key = env::var("LUADNS_API_KEY")?;
    let endpoint = match env::var("LUADNS_ENDPOINT") {
        Ok(raw) => Some(Url::parse(&raw)?),
        Err(_) => None,
    };

    let client = Client::builder()
        .email(&email)
        .api_key(&api_key)
        .endpoint_if_some(endpoint.as_ref())
        .user_agent("whoami-demo")
        .build()?;

    let user = client.me()?;
    println!("email:   {}", user.email);
    println!("name:    {}", user.name);
    println!("package: {}", user.package);

    let mut meta = ListMeta::default();
    let zones = client.list_zones(&ListParams::default(), Some(&mut meta))?;
    println!("zones:   {} of {}", zones.len(), meta.total_count);

    for zone in &zones {
        println!("===> zone {}", zone.name);
        for record in client.list_records(zone.id, &ListParams::default(), None)? {
            println!(
                "     {} {} {} {}",
                record.name, record.rtype, record.content, record.ttl
            );
        }
    }

    Ok(())
}
