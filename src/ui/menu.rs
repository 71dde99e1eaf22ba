//! Sidebar menus of the role dashboards

use serde::Serialize;

use crate::auth::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub name: &'static str,
    pub href: &'static str,
}

const fn item(name: &'static str, href: &'static str) -> MenuItem {
    MenuItem { name, href }
}

const ADMIN_MENU: &[MenuItem] = &[
    item("Dashboard", "/admin"),
    item("Users Management", "/admin/users"),
    item("Class Management", "/admin/classes"),
    item("Subject Management", "/admin/subjects"),
    item("Exam Management", "/admin/exams"),
    item("Results Management", "/admin/results"),
    item("Teacher Assignment", "/admin/assign-teacher"),
    item("Student Assignment", "/admin/assign-student"),
    item("Timetable", "/admin/timetable"),
    item("Reports", "/admin/reports"),
    item("Settings", "/admin/settings"),
];

const TEACHER_MENU: &[MenuItem] = &[
    item("Dashboard", "/teacher"),
    item("My Classes", "/teacher/classes"),
    item("Students", "/teacher/students"),
    item("Attendance", "/teacher/attendance"),
    item("Exams", "/teacher/exams"),
    item("Results Management", "/teacher/results"),
    item("Upload Materials", "/teacher/materials"),
    item("Messages", "/teacher/messages"),
    item("Profile", "/teacher/profile"),
];

const STUDENT_MENU: &[MenuItem] = &[
    item("Dashboard", "/student"),
    item("My Classes", "/student/classes"),
    item("Timetable", "/student/timetable"),
    item("Attendance", "/student/attendance"),
    item("Exam Results", "/student/results"),
    item("Materials", "/student/materials"),
    item("Profile", "/student/profile"),
];

pub fn menu_for(role: Role) -> &'static [MenuItem] {
    match role {
        Role::Admin => ADMIN_MENU,
        Role::Teacher => TEACHER_MENU,
        Role::Student => STUDENT_MENU,
    }
}

/// Title of the page at `path`, taken from the menu entry it belongs to
pub fn page_title(role: Role, path: &str) -> &'static str {
    let path = path.trim_end_matches('/');
    menu_for(role)
        .iter()
        .filter(|entry| path == entry.href || path.starts_with(&format!("{}/", entry.href)))
        .max_by_key(|entry| entry.href.len())
        .map(|entry| entry.name)
        .unwrap_or("Dashboard")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menus_stay_inside_their_area() {
        for role in Role::ALL {
            let menu = menu_for(role);
            assert_eq!(menu[0].href, role.home_path());
            assert!(menu.iter().all(|entry| entry.href.starts_with(role.area_prefix())));
        }
    }

    #[test]
    fn test_page_title() {
        assert_eq!(page_title(Role::Admin, "/admin"), "Dashboard");
        assert_eq!(page_title(Role::Admin, "/admin/users"), "Users Management");
        assert_eq!(page_title(Role::Admin, "/admin/users/12/"), "Users Management");
        assert_eq!(page_title(Role::Teacher, "/teacher/materials"), "Upload Materials");
        assert_eq!(page_title(Role::Student, "/student/unknown"), "Dashboard");
    }
}
