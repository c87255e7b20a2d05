//! Reference data used to populate filters and forms.
//!
//! Employees and clients are owned by other parts of the business system; the
//! calendar only needs their identifier and something to show.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::{AssigneeId, ClientId};

/// An employee events can be assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    #[serde(alias = "ID")]
    pub id: AssigneeId,
    #[serde(default, rename = "nom")]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A client events are performed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(alias = "ID")]
    pub id: ClientId,
    #[serde(default, rename = "nom")]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

fn display_name(f: &mut fmt::Formatter<'_>, name: &str, email: &str) -> fmt::Result {
    match (name.is_empty(), email.is_empty()) {
        (false, false) => write!(f, "{} ({})", name, email),
        (false, true) => write!(f, "{}", name),
        (true, _) => write!(f, "{}", email),
    }
}

impl fmt::Display for Assignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_name(f, &self.name, &self.email)
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_name(f, &self.name, &self.email)
    }
}

/// Reference data loaded alongside the events.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    pub assignees: Vec<Assignee>,
    pub clients: Vec<Client>,
}

impl Directory {
    pub fn assignee(&self, id: &AssigneeId) -> Option<&Assignee> {
        self.assignees.iter().find(|a| &a.id == id)
    }

    pub fn client(&self, id: &ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| &c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignee_from_store_payload() {
        let assignee: Assignee = serde_json::from_str(
            r#"{"ID": 3, "nom": "Camille", "email": "camille@example.com", "telephone": ""}"#,
        )
        .unwrap();

        assert_eq!(assignee.id, AssigneeId::from("3"));
        assert_eq!(assignee.to_string(), "Camille (camille@example.com)");
    }

    #[test]
    fn directory_lookup_uses_canonical_ids() {
        let directory = Directory {
            assignees: vec![],
            clients: vec![Client {
                id: ClientId::from(12),
                name: "Acme".to_string(),
                email: String::new(),
            }],
        };

        assert_eq!(
            directory.client(&ClientId::from("12")).map(|c| c.to_string()),
            Some("Acme".to_string())
        );
    }
}
