//! Canonical target field definitions.

use serde::{Deserialize, Serialize};

/// A canonical CRM field that a spreadsheet column can map onto.
///
/// Serializes as the API name (e.g. `"MobilePhone"`), which is also what
/// the LLM fallback is instructed to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrmField {
    FirstName,
    LastName,
    Company,
    Email,
    Phone,
    MobilePhone,
    Title,
    Website,
    Description,
    Street,
    City,
    State,
    PostalCode,
    Country,
    Industry,
    AnnualRevenue,
    NumberOfEmployees,
    LeadSource,
    Status,
}

impl CrmField {
    /// All catalog fields, in display order.
    pub fn all() -> &'static [CrmField] {
        use CrmField::*;
        &[
            FirstName,
            LastName,
            Company,
            Email,
            Phone,
            MobilePhone,
            Title,
            Website,
            Description,
            Street,
            City,
            State,
            PostalCode,
            Country,
            Industry,
            AnnualRevenue,
            NumberOfEmployees,
            LeadSource,
            Status,
        ]
    }

    /// The CRM API name, used as the column header in exported data.
    pub fn api_name(&self) -> &'static str {
        match self {
            CrmField::FirstName => "FirstName",
            CrmField::LastName => "LastName",
            CrmField::Company => "Company",
            CrmField::Email => "Email",
            CrmField::Phone => "Phone",
            CrmField::MobilePhone => "MobilePhone",
            CrmField::Title => "Title",
            CrmField::Website => "Website",
            CrmField::Description => "Description",
            CrmField::Street => "Street",
            CrmField::City => "City",
            CrmField::State => "State",
            CrmField::PostalCode => "PostalCode",
            CrmField::Country => "Country",
            CrmField::Industry => "Industry",
            CrmField::AnnualRevenue => "AnnualRevenue",
            CrmField::NumberOfEmployees => "NumberOfEmployees",
            CrmField::LeadSource => "LeadSource",
            CrmField::Status => "Status",
        }
    }

    /// Human-readable label for display output.
    pub fn label(&self) -> &'static str {
        match self {
            CrmField::FirstName => "First Name",
            CrmField::LastName => "Last Name",
            CrmField::Company => "Company",
            CrmField::Email => "Email",
            CrmField::Phone => "Phone",
            CrmField::MobilePhone => "Mobile Phone",
            CrmField::Title => "Title",
            CrmField::Website => "Website",
            CrmField::Description => "Description",
            CrmField::Street => "Street",
            CrmField::City => "City",
            CrmField::State => "State/Province",
            CrmField::PostalCode => "Postal Code",
            CrmField::Country => "Country",
            CrmField::Industry => "Industry",
            CrmField::AnnualRevenue => "Annual Revenue",
            CrmField::NumberOfEmployees => "Employees",
            CrmField::LeadSource => "Lead Source",
            CrmField::Status => "Status",
        }
    }

    /// Look up a field by its API name. Case-sensitive, as API names are.
    pub fn from_api_name(name: &str) -> Option<CrmField> {
        CrmField::all()
            .iter()
            .find(|f| f.api_name() == name)
            .copied()
    }
}

impl std::fmt::Display for CrmField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_name_round_trip() {
        for field in CrmField::all() {
            assert_eq!(CrmField::from_api_name(field.api_name()), Some(*field));
        }
    }

    #[test]
    fn test_unknown_api_name() {
        assert_eq!(CrmField::from_api_name("Favorite_Color__c"), None);
        assert_eq!(CrmField::from_api_name("email"), None);
    }

    #[test]
    fn test_serializes_as_api_name() {
        let json = serde_json::to_string(&CrmField::MobilePhone).unwrap();
        assert_eq!(json, "\"MobilePhone\"");
    }
}
