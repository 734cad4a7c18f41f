//! Seed data standing in for a backend. Read once at startup; every later
//! change lives in session state only.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{
    AcademicProject, Certificate, CvAnalysisStatus, CvData, LinkPlatform, ProfileLink, Skill,
    SkillCategory, SkillCount, Student, TeacherReference, UniversityStats, UserRole,
};
use crate::session::AuthUser;
use crate::workflows::applications::Vacancy;
use crate::workflows::partners::{Partner, PartnerStatus};
use crate::workflows::references::QueuedStudent;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn skill(name: &str, value: u8, category: SkillCategory) -> Skill {
    Skill {
        name: name.to_string(),
        value,
        category,
        ai_generated: false,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Landing copy for the role picker on the sign-in screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleProfile {
    pub role: UserRole,
    pub label: &'static str,
    pub description: &'static str,
}

pub const ROLE_PROFILES: [RoleProfile; 4] = [
    RoleProfile {
        role: UserRole::Student,
        label: "Tələbə / Magistr",
        description: "Öz bacarıq profilini gör və referans istə.",
    },
    RoleProfile {
        role: UserRole::Teacher,
        label: "Müəllim",
        description: "Tələbələrə strukturlaşdırılmış referans ver.",
    },
    RoleProfile {
        role: UserRole::UniversityAdmin,
        label: "Administrasiya",
        description: "Akademik effektivliyi analiz et.",
    },
    RoleProfile {
        role: UserRole::PartnerCompany,
        label: "Tərəfdaş Şirkət",
        description: "Təsdiqlənmiş istedadları kəşf et.",
    },
];

pub fn student() -> Student {
    Student {
        id: "st-001".to_string(),
        name: "Aysel".to_string(),
        surname: "Məmmədova".to_string(),
        email: "test.student@unec.edu.az".to_string(),
        faculty: "Kompüter Elmləri".to_string(),
        course_year: 3,
        gpa: 3.85,
        avatar: "https://picsum.photos/seed/aysel/200".to_string(),
        skills: vec![
            skill("Alqoritmlər", 72, SkillCategory::Technical),
            skill("Problem Həll Etmə", 68, SkillCategory::Analytical),
            skill("Komanda İşi", 75, SkillCategory::Soft),
            skill("Tədqiqat", 55, SkillCategory::Analytical),
            skill("Frontend İnkişaf", 82, SkillCategory::Technical),
        ],
        references: vec![TeacherReference {
            id: "ref-1".to_string(),
            teacher_name: "Dr. Əli Əliyev".to_string(),
            student_name: "Aysel Məmmədova".to_string(),
            course_name: "Verilənlər Strukturuna Giriş".to_string(),
            date: date(2023, 12, 15),
            rating: 5,
            skills: strings(&["Alqoritmlər", "Məntiqi Təfəkkür"]),
            comment: "Aysel dərslərdə çox aktiv idi və mürəkkəb alqoritmik problemləri həll etməkdə üstünlük göstərirdi.".to_string(),
            verified: true,
        }],
        projects: vec![AcademicProject {
            id: "p-1".to_string(),
            title: "Təhsil İdarəetmə Sistemi".to_string(),
            grade: "A".to_string(),
            skills_gained: strings(&["React", "Node.js", "UI/UX"]),
            description: "Universitet daxili imtahan nəticələrini izləyən tam funksional veb tətbiq."
                .to_string(),
        }],
        links: Vec::new(),
        certificates: vec![Certificate {
            id: "c1".to_string(),
            name: "Google Data Analytics Professional Certificate".to_string(),
            verification_number: "GDA-9921-X".to_string(),
            url: "https://coursera.org/verify/GDA9921X".to_string(),
            image: "https://picsum.photos/seed/analytics/600/400".to_string(),
            date: date(2024, 1, 10),
        }],
        applications: Vec::new(),
        cv: Some(CvData {
            file_name: String::new(),
            uploaded_at: None,
            analysis_status: CvAnalysisStatus::None,
        }),
    }
}

pub fn vacancies() -> Vec<Vacancy> {
    vec![
        Vacancy {
            id: "v1".to_string(),
            title: "Junior Frontend Developer".to_string(),
            company: "Pasha Bank".to_string(),
            description: "Modern veb texnologiyaları ilə bank sistemlərinin frontend hissəsinin qurulmasında iştirak edin.".to_string(),
            logo: "https://picsum.photos/seed/pasha/100".to_string(),
            tags: strings(&["React", "TypeScript", "Tailwind"]),
        },
        Vacancy {
            id: "v2".to_string(),
            title: "Data Analyst Intern".to_string(),
            company: "Azercell".to_string(),
            description: "Telekommunikasiya verilənlərinin analizi və hesabatların hazırlanması üzrə təcrübə proqramı.".to_string(),
            logo: "https://picsum.photos/seed/azercell/100".to_string(),
            tags: strings(&["Python", "SQL", "Tableau"]),
        },
        Vacancy {
            id: "v3".to_string(),
            title: "UI/UX Designer".to_string(),
            company: "Google (Azerbaijan)".to_string(),
            description: "İstifadəçi təcrübəsinin artırılması üçün innovativ dizayn həllərinin hazırlanması.".to_string(),
            logo: "https://picsum.photos/seed/google/100".to_string(),
            tags: strings(&["Figma", "User Research", "Prototyping"]),
        },
    ]
}

pub fn partners() -> Vec<Partner> {
    vec![
        Partner {
            id: "p1".to_string(),
            name: "Pasha Bank".to_string(),
            logo: "https://picsum.photos/seed/pasha/100".to_string(),
            description: "Azərbaycanın aparıcı korporativ bankı.".to_string(),
            website: "https://www.pashabank.az".to_string(),
            contact_email: "hr@pashabank.az".to_string(),
            industry: "Banking".to_string(),
            status: PartnerStatus::Active,
        },
        Partner {
            id: "p2".to_string(),
            name: "Azercell".to_string(),
            logo: "https://picsum.photos/seed/azercell/100".to_string(),
            description: "Ölkənin ən böyük mobil rabitə operatoru.".to_string(),
            website: "https://www.azercell.com".to_string(),
            contact_email: "career@azercell.com".to_string(),
            industry: "Telecommunications".to_string(),
            status: PartnerStatus::Active,
        },
        Partner {
            id: "p3".to_string(),
            name: "Google Azerbaijan".to_string(),
            logo: "https://picsum.photos/seed/google/100".to_string(),
            description: "Qlobal texnologiya nəhənginin regional nümayəndəliyi.".to_string(),
            website: "https://www.google.az".to_string(),
            contact_email: "partners@google.com".to_string(),
            industry: "Technology".to_string(),
            status: PartnerStatus::Active,
        },
    ]
}

pub fn teacher_queue() -> Vec<QueuedStudent> {
    [
        ("st-001", "Aysel", "Məmmədova", "Kompüter Elmləri", 3, "aysel"),
        ("st-002", "Rauf", "Hüseynov", "İqtisadiyyat", 4, "rauf"),
        ("st-003", "Nigar", "Qasımova", "Kompüter Elmləri", 2, "nigar"),
        ("st-004", "Elvin", "Zeynalov", "Maliyyə", 3, "elvin"),
    ]
    .into_iter()
    .map(|(id, name, surname, faculty, course_year, avatar)| QueuedStudent {
        id: id.to_string(),
        name: name.to_string(),
        surname: surname.to_string(),
        faculty: faculty.to_string(),
        course_year,
        avatar: format!("https://picsum.photos/seed/{avatar}/200"),
    })
    .collect()
}

pub fn sent_references() -> Vec<TeacherReference> {
    vec![
        TeacherReference {
            id: "ref-h1".to_string(),
            teacher_name: "Dr. Əli Əliyev".to_string(),
            student_name: "Rauf Hüseynov".to_string(),
            course_name: "Alqoritmlərin Analizi".to_string(),
            date: date(2024, 2, 10),
            rating: 5,
            skills: strings(&["Python", "Big O Notation"]),
            comment: "Tələbə mürəkkəb alqoritmik tapşırıqlarda yüksək məntiqi təfəkkür nümayiş etdirmişdir.".to_string(),
            verified: true,
        },
        TeacherReference {
            id: "ref-h2".to_string(),
            teacher_name: "Dr. Əli Əliyev".to_string(),
            student_name: "Fidan Kərimova".to_string(),
            course_name: "Verilənlər Bazası".to_string(),
            date: date(2024, 1, 22),
            rating: 4,
            skills: strings(&["SQL", "PostgreSQL"]),
            comment: "Praktik məşğələlərdə verilənlər bazasının optimallaşdırılması üzrə uğurlu nəticələr göstərmişdir.".to_string(),
            verified: true,
        },
    ]
}

/// Skills shown when a CV is analysed in demo mode.
pub fn demo_cv_skills() -> Vec<Skill> {
    [
        ("Python", 78, SkillCategory::Technical),
        ("Machine Learning", 62, SkillCategory::Technical),
        ("Public Speaking", 84, SkillCategory::Soft),
        ("Docker", 45, SkillCategory::Tools),
        ("Strategic Planning", 68, SkillCategory::Analytical),
    ]
    .into_iter()
    .map(|(name, value, category)| Skill {
        ai_generated: true,
        ..skill(name, value, category)
    })
    .collect()
}

pub fn demo_cv_links() -> Vec<ProfileLink> {
    vec![
        ProfileLink {
            id: "dl1".to_string(),
            platform: LinkPlatform::GitHub,
            label: Some("Portfolio (GitHub)".to_string()),
            url: "https://github.com/demo-user".to_string(),
        },
        ProfileLink {
            id: "dl2".to_string(),
            platform: LinkPlatform::LinkedIn,
            label: Some("Professional Profile".to_string()),
            url: "https://linkedin.com/in/demo-user".to_string(),
        },
    ]
}

pub fn university_stats() -> UniversityStats {
    UniversityStats {
        total_students: 1250,
        total_teachers: 85,
        partner_companies: 12,
        average_gpa: 3.2,
        top_skills: [
            ("Proqramlaşdırma", 450),
            ("Data Analitika", 320),
            ("Maliyyə Savadlılığı", 210),
            ("Dizayn Təfəkkürü", 180),
        ]
        .into_iter()
        .map(|(name, count)| SkillCount {
            name: name.to_string(),
            count,
        })
        .collect(),
    }
}

pub fn auth_users() -> Vec<AuthUser> {
    [
        ("test.student@unec.edu.az", "StudentPass123!", UserRole::Student),
        ("ali.aliyev@unec.edu.az", "TeacherPass456!", UserRole::Teacher),
        ("admin@unec.edu.az", "AdminPass789!", UserRole::UniversityAdmin),
        ("hr@pasha.unex.az", "PashaPass2025", UserRole::PartnerCompany),
        ("tech@azercell.unex.az", "AzercellPass2025", UserRole::PartnerCompany),
        ("dev@google.unex.az", "GooglePass2025", UserRole::PartnerCompany),
    ]
    .into_iter()
    .map(|(email, password, role)| AuthUser {
        email: email.to_string(),
        password: password.to_string(),
        role,
    })
    .collect()
}
