//! ACL entities: roles, resources, privileges and the rules tying them together
//!
//! A [`Rule`] grants a role access to a resource/privilege pair. The role is
//! the owning side of the association and always present; resource and
//! privilege are optional, a missing one widens the grant.

use crate::{impl_data_entity, impl_entity};
use serde::{Deserialize, Serialize};

/// A backend user role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Admin roles are granted every privilege
    #[serde(default)]
    pub admin: bool,
}

impl_data_entity!(Role, "role", "roles", name);

/// A protected resource, usually one backend module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

impl_data_entity!(Resource, "resource", "resources", name);

/// A named operation on a resource (read, create, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Privilege {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "resourceID")]
    pub resource_id: i64,
    pub name: String,
}

impl_data_entity!(Privilege, "privilege", "privileges", name);

/// A single permission grant
///
/// The scalar ids are what gets stored; the references are filled in when
/// the rule is loaded together with its role, resource and privilege.
/// Setting a reference keeps the matching scalar id in sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    id: i64,

    #[serde(rename = "roleID")]
    role_id: i64,

    #[serde(rename = "resourceID", default)]
    resource_id: Option<i64>,

    #[serde(rename = "privilegeID", default)]
    privilege_id: Option<i64>,

    #[serde(skip)]
    role: Option<Role>,

    #[serde(skip)]
    resource: Option<Resource>,

    #[serde(skip)]
    privilege: Option<Privilege>,
}

impl_entity!(Rule, "rule", "rules");

impl Rule {
    /// Create an unsaved rule granting the role everything
    pub fn new(role_id: i64) -> Self {
        Self {
            role_id,
            ..Self::default()
        }
    }

    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    pub fn set_role(&mut self, role: Role) {
        self.role_id = role.id;
        self.role = Some(role);
    }

    pub fn role_id(&self) -> i64 {
        self.role_id
    }

    /// Set the role id, dropping a loaded role that no longer matches
    pub fn set_role_id(&mut self, role_id: i64) {
        self.role_id = role_id;
        if self.role.as_ref().is_some_and(|r| r.id != role_id) {
            self.role = None;
        }
    }

    pub fn resource(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }

    pub fn set_resource(&mut self, resource: Option<Resource>) {
        self.resource_id = resource.as_ref().map(|r| r.id);
        self.resource = resource;
    }

    pub fn resource_id(&self) -> Option<i64> {
        self.resource_id
    }

    pub fn set_resource_id(&mut self, resource_id: Option<i64>) {
        self.resource_id = resource_id;
        if self.resource.as_ref().map(|r| r.id) != resource_id {
            self.resource = None;
        }
    }

    pub fn privilege(&self) -> Option<&Privilege> {
        self.privilege.as_ref()
    }

    pub fn set_privilege(&mut self, privilege: Option<Privilege>) {
        self.privilege_id = privilege.as_ref().map(|p| p.id);
        self.privilege = privilege;
    }

    pub fn privilege_id(&self) -> Option<i64> {
        self.privilege_id
    }

    pub fn set_privilege_id(&mut self, privilege_id: Option<i64>) {
        self.privilege_id = privilege_id;
        if self.privilege.as_ref().map(|p| p.id) != privilege_id {
            self.privilege = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Entity;
    use serde_json::json;

    fn role(id: i64) -> Role {
        Role {
            id,
            name: "local_admins".to_string(),
            description: String::new(),
            admin: false,
        }
    }

    #[test]
    fn test_set_role_syncs_scalar() {
        let mut rule = Rule::new(0);
        rule.set_role(role(4));
        assert_eq!(rule.role_id(), 4);
        assert_eq!(rule.role().map(|r| r.id), Some(4));
    }

    #[test]
    fn test_changing_scalar_drops_stale_reference() {
        let mut rule = Rule::new(0);
        rule.set_role(role(4));
        rule.set_role_id(5);
        assert!(rule.role().is_none());

        rule.set_resource(Some(Resource {
            id: 9,
            name: "payment".to_string(),
        }));
        assert_eq!(rule.resource_id(), Some(9));
        rule.set_resource_id(Some(9));
        assert!(rule.resource().is_some());
        rule.set_resource_id(None);
        assert!(rule.resource().is_none());
    }

    #[test]
    fn test_privilege_is_optional() {
        let mut rule = Rule::new(1);
        assert_eq!(rule.privilege_id(), None);

        rule.set_privilege(Some(Privilege {
            id: 12,
            resource_id: 9,
            name: "read".to_string(),
        }));
        assert_eq!(rule.privilege_id(), Some(12));

        rule.set_privilege(None);
        assert_eq!(rule.privilege_id(), None);
        assert!(rule.privilege().is_none());
    }

    #[test]
    fn test_column_names() {
        let rule: Rule = serde_json::from_value(json!({
            "id": 3,
            "roleID": 1,
            "resourceID": 9,
            "privilegeID": null
        }))
        .unwrap();

        assert_eq!(rule.id(), 3);
        assert_eq!(rule.role_id(), 1);
        assert_eq!(rule.resource_id(), Some(9));
        assert_eq!(rule.privilege_id(), None);

        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value, json!({"id": 3, "roleID": 1, "resourceID": 9, "privilegeID": null}));
    }
}
