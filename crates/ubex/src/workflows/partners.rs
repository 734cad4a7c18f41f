//! Partner-company directory managed by university administrators.

use serde::{Deserialize, Serialize};

use crate::domain::next_record_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartnerStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub description: String,
    pub website: String,
    pub contact_email: String,
    pub industry: String,
    pub status: PartnerStatus,
}

/// Form contents for creating or editing a partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerDraft {
    pub name: String,
    pub industry: String,
    #[serde(default)]
    pub website: String,
    pub contact_email: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_status")]
    pub status: PartnerStatus,
    #[serde(default)]
    pub logo: String,
}

fn default_status() -> PartnerStatus {
    PartnerStatus::Active
}

/// Industry filter; `All` disables it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IndustryFilter {
    #[default]
    All,
    Only(String),
}

impl IndustryFilter {
    pub const ALL_LABEL: &'static str = "All";

    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => IndustryFilter::All,
            Some(value) if value == Self::ALL_LABEL => IndustryFilter::All,
            Some(value) => IndustryFilter::Only(value.to_string()),
        }
    }

    fn matches(&self, industry: &str) -> bool {
        match self {
            IndustryFilter::All => true,
            IndustryFilter::Only(wanted) => wanted == industry,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartnerError {
    #[error("partner name, industry, and contact email are required")]
    MissingRequiredFields,
    #[error("partner {0} not found")]
    NotFound(String),
}

#[derive(Debug, Clone, Default)]
pub struct PartnerDirectory {
    partners: Vec<Partner>,
}

impl PartnerDirectory {
    pub fn new(partners: Vec<Partner>) -> Self {
        Self { partners }
    }

    pub fn all(&self) -> &[Partner] {
        &self.partners
    }

    /// Case-insensitive substring match on name or industry, then the industry filter.
    pub fn filter(&self, search: &str, industry: &IndustryFilter) -> Vec<Partner> {
        let needle = search.trim().to_lowercase();
        self.partners
            .iter()
            .filter(|partner| {
                needle.is_empty()
                    || partner.name.to_lowercase().contains(&needle)
                    || partner.industry.to_lowercase().contains(&needle)
            })
            .filter(|partner| industry.matches(&partner.industry))
            .cloned()
            .collect()
    }

    /// `All` followed by each distinct industry in first-seen order.
    pub fn industries(&self) -> Vec<String> {
        let mut industries = vec![IndustryFilter::ALL_LABEL.to_string()];
        for partner in &self.partners {
            if !industries.contains(&partner.industry) {
                industries.push(partner.industry.clone());
            }
        }
        industries
    }

    /// Create a partner (prepended) or merge the draft into an existing one.
    pub fn save(&mut self, draft: PartnerDraft, editing: Option<&str>) -> Result<Partner, PartnerError> {
        if draft.name.trim().is_empty()
            || draft.industry.trim().is_empty()
            || draft.contact_email.trim().is_empty()
        {
            return Err(PartnerError::MissingRequiredFields);
        }

        let PartnerDraft {
            name,
            industry,
            website,
            contact_email,
            description,
            status,
            logo,
        } = draft;

        match editing {
            Some(id) => {
                let existing = self
                    .partners
                    .iter_mut()
                    .find(|partner| partner.id == id)
                    .ok_or_else(|| PartnerError::NotFound(id.to_string()))?;
                let logo = if logo.is_empty() {
                    existing.logo.clone()
                } else {
                    logo
                };
                *existing = Partner {
                    id: existing.id.clone(),
                    name,
                    logo,
                    description,
                    website,
                    contact_email,
                    industry,
                    status,
                };
                Ok(existing.clone())
            }
            None => {
                let id = next_record_id("partner");
                let logo = if logo.is_empty() {
                    format!("https://picsum.photos/seed/{id}/100")
                } else {
                    logo
                };
                let partner = Partner {
                    id,
                    name,
                    logo,
                    description,
                    website,
                    contact_email,
                    industry,
                    status,
                };
                self.partners.insert(0, partner.clone());
                Ok(partner)
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Result<Partner, PartnerError> {
        let index = self
            .partners
            .iter()
            .position(|partner| partner.id == id)
            .ok_or_else(|| PartnerError::NotFound(id.to_string()))?;
        Ok(self.partners.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn directory() -> PartnerDirectory {
        PartnerDirectory::new(seed::partners())
    }

    fn draft(name: &str, industry: &str) -> PartnerDraft {
        PartnerDraft {
            name: name.to_string(),
            industry: industry.to_string(),
            website: "https://example.az".to_string(),
            contact_email: "hr@example.az".to_string(),
            description: String::new(),
            status: PartnerStatus::Active,
            logo: String::new(),
        }
    }

    #[test]
    fn search_matches_name_or_industry_case_insensitively() {
        let directory = directory();
        let by_name = directory.filter("AZERCELL", &IndustryFilter::All);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "p2");

        let by_industry = directory.filter("bank", &IndustryFilter::All);
        assert_eq!(by_industry.len(), 1);
        assert_eq!(by_industry[0].industry, "Banking");

        assert_eq!(directory.filter("  ", &IndustryFilter::All).len(), 3);
    }

    #[test]
    fn industry_filter_combines_with_search() {
        let directory = directory();
        let tech = IndustryFilter::parse(Some("Technology"));
        assert_eq!(directory.filter("", &tech).len(), 1);
        assert!(directory.filter("pasha", &tech).is_empty());
        assert_eq!(IndustryFilter::parse(Some("All")), IndustryFilter::All);
        assert_eq!(IndustryFilter::parse(None), IndustryFilter::All);
    }

    #[test]
    fn industries_start_with_all_and_are_distinct() {
        let mut directory = directory();
        directory
            .save(draft("Kapital Bank", "Banking"), None)
            .expect("valid partner");
        assert_eq!(
            directory.industries(),
            vec!["All", "Banking", "Telecommunications", "Technology"]
        );
    }

    #[test]
    fn new_partners_are_prepended_with_generated_logo() {
        let mut directory = directory();
        let partner = directory
            .save(draft("Bakcell", "Telecommunications"), None)
            .expect("valid partner");
        assert_eq!(directory.all()[0], partner);
        assert!(partner.logo.contains(&partner.id));
        assert_eq!(directory.all().len(), 4);
    }

    #[test]
    fn edits_merge_into_existing_record() {
        let mut directory = directory();
        let mut changes = draft("Pasha Bank OJSC", "Banking");
        changes.status = PartnerStatus::Inactive;

        let updated = directory.save(changes, Some("p1")).expect("edit succeeds");
        assert_eq!(updated.id, "p1");
        assert_eq!(updated.status, PartnerStatus::Inactive);
        assert_eq!(updated.logo, "https://picsum.photos/seed/pasha/100");
        assert_eq!(directory.all().len(), 3);
    }

    #[test]
    fn required_fields_are_enforced() {
        let mut directory = directory();
        let mut missing = draft("Nameless", "Retail");
        missing.contact_email = " ".to_string();
        assert_eq!(
            directory.save(missing, None),
            Err(PartnerError::MissingRequiredFields)
        );
        assert_eq!(
            directory.save(draft("Ghost", "Retail"), Some("p99")),
            Err(PartnerError::NotFound("p99".to_string()))
        );
    }

    #[test]
    fn remove_drops_partner() {
        let mut directory = directory();
        let removed = directory.remove("p3").expect("partner exists");
        assert_eq!(removed.name, "Google Azerbaijan");
        assert!(directory.remove("p3").is_err());
    }
}
