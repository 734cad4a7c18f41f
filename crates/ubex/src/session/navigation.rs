use serde::{Deserialize, Serialize};

use crate::domain::UserRole;

/// Navigation targets reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Dashboard,
    Profile,
    Certificates,
    Vacancies,
    References,
    Analytics,
    Partners,
    Recruitment,
}

/// The concrete screen rendered for a role/view pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    StudentDashboard,
    Profile,
    Certificates,
    Vacancies,
    TeacherDashboard,
    ReferenceArchive,
    UniversityAnalytics,
    PartnerManagement,
    PartnerDashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub view: View,
    pub label: &'static str,
}

const STUDENT_NAV: &[NavItem] = &[
    NavItem {
        view: View::Profile,
        label: "Profilim",
    },
    NavItem {
        view: View::Dashboard,
        label: "Dashboard",
    },
    NavItem {
        view: View::Certificates,
        label: "Sertifikatlar",
    },
    NavItem {
        view: View::Vacancies,
        label: "Vakansiyalar",
    },
];

const TEACHER_NAV: &[NavItem] = &[
    NavItem {
        view: View::Dashboard,
        label: "Tələbələr",
    },
    NavItem {
        view: View::References,
        label: "Referanslar",
    },
];

const ADMIN_NAV: &[NavItem] = &[
    NavItem {
        view: View::Analytics,
        label: "Analitika",
    },
    NavItem {
        view: View::Partners,
        label: "Tərəfdaşlar",
    },
];

const PARTNER_NAV: &[NavItem] = &[
    NavItem {
        view: View::Dashboard,
        label: "İstedadlar",
    },
    NavItem {
        view: View::Recruitment,
        label: "İşə Qəbul",
    },
];

pub fn navigation(role: UserRole) -> &'static [NavItem] {
    match role {
        UserRole::Student => STUDENT_NAV,
        UserRole::Teacher => TEACHER_NAV,
        UserRole::UniversityAdmin => ADMIN_NAV,
        UserRole::PartnerCompany => PARTNER_NAV,
    }
}

/// View selected right after sign-in.
pub fn default_view(role: UserRole) -> View {
    match role {
        UserRole::UniversityAdmin => View::Analytics,
        UserRole::Student | UserRole::Teacher | UserRole::PartnerCompany => View::Dashboard,
    }
}

pub fn is_reachable(role: UserRole, view: View) -> bool {
    navigation(role).iter().any(|item| item.view == view)
}

/// Views outside a role's navigation fall back to that role's home screen.
pub fn resolve_screen(role: UserRole, view: View) -> Screen {
    match role {
        UserRole::Student => match view {
            View::Profile => Screen::Profile,
            View::Certificates => Screen::Certificates,
            View::Vacancies => Screen::Vacancies,
            _ => Screen::StudentDashboard,
        },
        UserRole::Teacher => match view {
            View::References => Screen::ReferenceArchive,
            _ => Screen::TeacherDashboard,
        },
        UserRole::UniversityAdmin => match view {
            View::Partners => Screen::PartnerManagement,
            _ => Screen::UniversityAnalytics,
        },
        UserRole::PartnerCompany => Screen::PartnerDashboard,
    }
}
