//! Per-object field requirements.

use serde::{Deserialize, Serialize};

use super::fields::CrmField;
use crate::mapping::ColumnMapping;

/// CRM object type a spreadsheet is being mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Lead,
    Contact,
}

impl ObjectType {
    /// The static schema for this object type.
    pub fn schema(&self) -> ObjectSchema {
        match self {
            ObjectType::Lead => ObjectSchema {
                object: ObjectType::Lead,
                fields: CrmField::all().to_vec(),
                required: vec![CrmField::LastName],
            },
            ObjectType::Contact => ObjectSchema {
                object: ObjectType::Contact,
                // Contacts carry no lead-pipeline fields.
                fields: CrmField::all()
                    .iter()
                    .filter(|f| {
                        !matches!(
                            f,
                            CrmField::AnnualRevenue
                                | CrmField::NumberOfEmployees
                                | CrmField::Industry
                                | CrmField::LeadSource
                                | CrmField::Status
                        )
                    })
                    .copied()
                    .collect(),
                required: vec![CrmField::LastName],
            },
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectType::Lead => write!(f, "Lead"),
            ObjectType::Contact => write!(f, "Contact"),
        }
    }
}

impl std::str::FromStr for ObjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lead" => Ok(ObjectType::Lead),
            "contact" => Ok(ObjectType::Contact),
            _ => Err(format!("Unknown object type: {}. Use lead or contact.", s)),
        }
    }
}

/// Field requirements for one CRM object type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// The object this schema describes.
    pub object: ObjectType,
    /// Fields this object accepts.
    pub fields: Vec<CrmField>,
    /// Fields a record must carry (identifying fields).
    pub required: Vec<CrmField>,
}

impl ObjectSchema {
    /// Whether this object accepts the given field.
    pub fn allows(&self, field: CrmField) -> bool {
        self.fields.contains(&field)
    }

    /// Whether this field must be present on every record.
    pub fn is_required(&self, field: CrmField) -> bool {
        self.required.contains(&field)
    }

    /// Required fields that no mapping in the set resolves to.
    pub fn missing_required(&self, mappings: &[ColumnMapping]) -> Vec<CrmField> {
        self.required
            .iter()
            .filter(|req| !mappings.iter().any(|m| m.target_field() == Some(**req)))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappingOutcome;

    #[test]
    fn test_lead_requires_last_name() {
        let schema = ObjectType::Lead.schema();
        assert!(schema.is_required(CrmField::LastName));
        assert!(!schema.is_required(CrmField::Email));
    }

    #[test]
    fn test_contact_excludes_pipeline_fields() {
        let schema = ObjectType::Contact.schema();
        assert!(!schema.allows(CrmField::LeadSource));
        assert!(schema.allows(CrmField::Email));
    }

    #[test]
    fn test_missing_required() {
        let schema = ObjectType::Lead.schema();

        let mapped = vec![ColumnMapping {
            source_column: "Nome".to_string(),
            outcome: MappingOutcome::RuleMatched {
                field: CrmField::LastName,
                confidence: 95,
            },
        }];
        assert!(schema.missing_required(&mapped).is_empty());

        let unmapped = vec![ColumnMapping {
            source_column: "Nome".to_string(),
            outcome: MappingOutcome::Unmapped {
                reasoning: "no rule matched".to_string(),
            },
        }];
        assert_eq!(schema.missing_required(&unmapped), vec![CrmField::LastName]);
    }
}
