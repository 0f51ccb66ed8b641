//! Access control over backend resources
//!
//! Rules are evaluated per role:
//! - an admin role may do everything
//! - a rule without resource grants every resource
//! - a rule with a resource but without privilege grants every privilege of it
//! - otherwise resource and privilege must both match

use crate::core::error::{AdminError, AuthorizationError, RequestError};
use crate::entities::{Privilege, Resource, Role, Rule};
use axum::http::HeaderMap;

/// Header carrying the name of the caller's backend role
pub const ROLE_HEADER: &str = "x-admin-role";

/// Evaluated ACL: roles, resources, privileges and the rules linking them
#[derive(Debug, Clone, Default)]
pub struct Acl {
    roles: Vec<Role>,
    resources: Vec<Resource>,
    privileges: Vec<Privilege>,
    rules: Vec<Rule>,
}

impl Acl {
    /// Build the ACL, loading each rule's role, resource and privilege
    pub fn new(
        roles: Vec<Role>,
        resources: Vec<Resource>,
        privileges: Vec<Privilege>,
        rules: Vec<Rule>,
    ) -> Self {
        let rules = rules
            .into_iter()
            .map(|mut rule| {
                if let Some(role) = roles.iter().find(|r| r.id == rule.role_id()) {
                    rule.set_role(role.clone());
                }
                let resource = rule
                    .resource_id()
                    .and_then(|id| resources.iter().find(|r| r.id == id).cloned());
                if resource.is_some() {
                    rule.set_resource(resource);
                }
                let privilege = rule
                    .privilege_id()
                    .and_then(|id| privileges.iter().find(|p| p.id == id).cloned());
                if privilege.is_some() {
                    rule.set_privilege(privilege);
                }
                rule
            })
            .collect();

        Self {
            roles,
            resources,
            privileges,
            rules,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether the role may perform `privilege` on `resource`
    pub fn is_allowed(&self, role: &str, resource: &str, privilege: &str) -> bool {
        let Some(role) = self.roles.iter().find(|r| r.name == role) else {
            return false;
        };
        if role.admin {
            return true;
        }

        let resource = self.resources.iter().find(|r| r.name == resource);
        let privilege = resource.and_then(|res| {
            self.privileges
                .iter()
                .find(|p| p.resource_id == res.id && p.name == privilege)
        });

        self.rules
            .iter()
            .filter(|rule| rule.role_id() == role.id)
            .any(|rule| match (rule.resource_id(), resource) {
                (None, _) => true,
                (Some(resource_id), Some(res)) if resource_id == res.id => {
                    match (rule.privilege_id(), privilege) {
                        (None, _) => true,
                        (Some(privilege_id), Some(p)) => privilege_id == p.id,
                        (Some(_), None) => false,
                    }
                }
                _ => false,
            })
    }

    /// Check the role named in the request headers.
    ///
    /// Missing header fails with [`RequestError::MissingRole`], a denied
    /// check with [`AuthorizationError::Denied`] carrying `message`.
    pub fn authorize(
        &self,
        headers: &HeaderMap,
        resource: &str,
        privilege: &str,
        message: &str,
    ) -> Result<(), AdminError> {
        let role = headers
            .get(ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(RequestError::MissingRole)?;

        if self.is_allowed(role, resource, privilege) {
            Ok(())
        } else {
            tracing::warn!(role, resource, privilege, "acl denied backend action");
            Err(AuthorizationError::Denied {
                message: message.to_string(),
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn acl() -> Acl {
        let roles = vec![
            Role {
                id: 1,
                name: "admin".to_string(),
                description: String::new(),
                admin: true,
            },
            Role {
                id: 2,
                name: "viewer".to_string(),
                description: String::new(),
                admin: false,
            },
            Role {
                id: 3,
                name: "payment_manager".to_string(),
                description: String::new(),
                admin: false,
            },
            Role {
                id: 4,
                name: "superuser".to_string(),
                description: String::new(),
                admin: false,
            },
        ];
        let resources = vec![
            Resource {
                id: 10,
                name: "payment".to_string(),
            },
            Resource {
                id: 11,
                name: "article".to_string(),
            },
        ];
        let privileges = vec![
            Privilege {
                id: 100,
                resource_id: 10,
                name: "read".to_string(),
            },
            Privilege {
                id: 101,
                resource_id: 10,
                name: "delete".to_string(),
            },
        ];

        let mut viewer = Rule::new(2);
        viewer.set_resource_id(Some(10));
        viewer.set_privilege_id(Some(100));

        let mut manager = Rule::new(3);
        manager.set_resource_id(Some(10));

        let superuser = Rule::new(4);

        Acl::new(roles, resources, privileges, vec![viewer, manager, superuser])
    }

    #[test]
    fn test_admin_role_is_allowed_everything() {
        assert!(acl().is_allowed("admin", "payment", "delete"));
        assert!(acl().is_allowed("admin", "unknown", "anything"));
    }

    #[test]
    fn test_privilege_rule_matches_exactly() {
        let acl = acl();
        assert!(acl.is_allowed("viewer", "payment", "read"));
        assert!(!acl.is_allowed("viewer", "payment", "delete"));
        assert!(!acl.is_allowed("viewer", "article", "read"));
    }

    #[test]
    fn test_resource_rule_grants_all_privileges() {
        let acl = acl();
        assert!(acl.is_allowed("payment_manager", "payment", "delete"));
        assert!(acl.is_allowed("payment_manager", "payment", "read"));
        assert!(!acl.is_allowed("payment_manager", "article", "read"));
    }

    #[test]
    fn test_rule_without_resource_grants_everything() {
        assert!(acl().is_allowed("superuser", "article", "update"));
    }

    #[test]
    fn test_unknown_role_is_denied() {
        assert!(!acl().is_allowed("guest", "payment", "read"));
    }

    #[test]
    fn test_rules_are_loaded_with_references() {
        let acl = acl();
        let viewer = &acl.rules()[0];
        assert_eq!(viewer.role().map(|r| r.name.as_str()), Some("viewer"));
        assert_eq!(viewer.resource().map(|r| r.name.as_str()), Some("payment"));
        assert_eq!(viewer.privilege().map(|p| p.name.as_str()), Some("read"));
    }

    #[test]
    fn test_authorize_reads_role_header() {
        let acl = acl();
        let mut headers = HeaderMap::new();

        let err = acl
            .authorize(&headers, "payment", "read", "nope")
            .unwrap_err();
        assert!(matches!(err, AdminError::Request(RequestError::MissingRole)));

        headers.insert(ROLE_HEADER, HeaderValue::from_static("viewer"));
        assert!(acl.authorize(&headers, "payment", "read", "nope").is_ok());

        let err = acl
            .authorize(&headers, "payment", "delete", "You're not allowed to delete the payment.")
            .unwrap_err();
        assert_eq!(err.to_string(), "You're not allowed to delete the payment.");
    }
}
