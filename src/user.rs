//! Account profile wire shape.

use serde::{Deserialize, Serialize};

/// The account profile returned by the `/users/me` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
    pub repo_uri: String,
    pub api_enabled: bool,
    pub tfa: bool,
    pub deploy_key: String,
    pub ttl: u32,
    pub package: String,
    pub name_servers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn user_deserializes_profile_body() {
        let body = json!({
            "email": "joe@example.com",
            "name": "Example User",
            "repo_uri": "",
            "api_enabled": true,
            "tfa": false,
            "deploy_key": "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABgQ example",
            "ttl": 300,
            "package": "Free",
            "name_servers": [
                "ns1.luadns.net.",
                "ns2.luadns.net.",
                "ns3.luadns.net.",
                "ns4.luadns.net."
            ]
        });

        let user: User = serde_json::from_value(body).unwrap();
        assert_eq!(user.email, "joe@example.com");
        assert_eq!(user.name, "Example User");
        assert!(user.api_enabled);
        assert!(!user.tfa);
        assert_eq!(user.ttl, 300);
        assert_eq!(user.package, "Free");
        assert_eq!(user.name_servers.len(), 4);
    }
}
