use crate::resource::Resource;
use crate::session::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavGroup {
    pub title: &'static str,
    pub items: Vec<Resource>,
}

/// The views a role can reach, grouped for the sidebar.
pub fn navigation_tree(role: Role) -> Vec<NavGroup> {
    match role {
        Role::Admin => vec![
            NavGroup {
                title: "Academics",
                items: vec![Resource::Colleges, Resource::Programs, Resource::Curriculum],
            },
            NavGroup {
                title: "Resources",
                items: vec![Resource::Professors, Resource::Rooms, Resource::Sections],
            },
            NavGroup {
                title: "Administration",
                items: vec![Resource::Users, Resource::AuditLogs],
            },
        ],
        Role::DepartmentHead => vec![
            NavGroup {
                title: "Department",
                items: vec![Resource::Curriculum, Resource::Professors, Resource::Sections],
            },
            NavGroup {
                title: "Facilities",
                items: vec![Resource::Rooms],
            },
        ],
    }
}

/// Views in sidebar order.
pub fn flatten(tree: &[NavGroup]) -> Vec<Resource> {
    tree.iter().flat_map(|g| g.items.iter().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_reaches_every_view() {
        let views = flatten(&navigation_tree(Role::Admin));
        assert_eq!(views.len(), Resource::ALL.len());
        for resource in Resource::ALL {
            assert!(views.contains(&resource));
        }
    }

    #[test]
    fn department_head_tree_is_restricted() {
        let views = flatten(&navigation_tree(Role::DepartmentHead));
        assert_eq!(
            views,
            vec![
                Resource::Curriculum,
                Resource::Professors,
                Resource::Sections,
                Resource::Rooms
            ]
        );
        assert!(!views.contains(&Resource::Users));
        assert!(!views.contains(&Resource::AuditLogs));
    }
}
